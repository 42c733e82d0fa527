//! Main application state shared with the HTTP handlers

use std::{
    sync::{Arc, Mutex},
    time::Instant,
};
use chrono::{DateTime, Utc};
use tokio::{
    sync::{mpsc, oneshot, watch},
    task::JoinHandle,
};
use tracing::info;

use super::ScreenState;
use crate::{
    error::AppError,
    lifecycle::{LifecycleController, Phase, SavedState, SessionId, SessionSelection},
    services::{AnimationSettings, ServerHost},
    tasks::{lifecycle_task, Command},
};

/// Commands queued before the lifecycle task catches up
const COMMAND_BUFFER: usize = 32;

/// Handle to the running lifecycle: a command sender plus the published screen
#[derive(Debug)]
pub struct AppState {
    commands: mpsc::Sender<Command>,
    screen: watch::Receiver<ScreenState>,
    /// Server metadata
    pub start_time: Instant,
    pub port: u16,
    pub host: String,
    /// Last action tracking
    pub last_action: Arc<Mutex<Option<String>>>,
    pub last_action_time: Arc<Mutex<Option<DateTime<Utc>>>>,
}

impl AppState {
    pub fn new(
        port: u16,
        host: String,
        commands: mpsc::Sender<Command>,
        screen: watch::Receiver<ScreenState>,
    ) -> Self {
        Self {
            commands,
            screen,
            start_time: Instant::now(),
            port,
            host,
            last_action: Arc::new(Mutex::new(None)),
            last_action_time: Arc::new(Mutex::new(None)),
        }
    }

    /// Wire up the view host, the controller and the lifecycle task
    pub fn launch(
        port: u16,
        host: String,
        settings: AnimationSettings,
    ) -> (Arc<Self>, JoinHandle<()>) {
        let (event_tx, event_rx) = mpsc::unbounded_channel();
        let (command_tx, command_rx) = mpsc::channel(COMMAND_BUFFER);
        let (view_host, screen) = ServerHost::new(settings, event_tx);
        let controller = LifecycleController::new(view_host);

        let task = tokio::spawn(lifecycle_task(controller, command_rx, event_rx));
        info!("Lifecycle task launched");
        (Arc::new(Self::new(port, host, command_tx, screen)), task)
    }

    pub async fn choose(&self, label: &str) -> Result<SessionSelection, AppError> {
        let label = label.to_string();
        let selection = self
            .request(|reply| Command::Choose {
                label: label.clone(),
                reply,
            })
            .await??;
        self.record_action(&format!("select {}", label));
        Ok(selection)
    }

    pub async fn restart(&self) -> Result<(), AppError> {
        self.request(|reply| Command::Restart { reply }).await??;
        self.record_action("restart");
        Ok(())
    }

    pub async fn report_playback(
        &self,
        session: Option<SessionId>,
        playing: bool,
    ) -> Result<(), AppError> {
        self.request(|reply| Command::Playback {
            session,
            playing,
            reply,
        })
        .await??;
        self.record_action(if playing { "animation playing" } else { "animation finished" });
        Ok(())
    }

    pub async fn save(&self) -> Result<SavedState, AppError> {
        self.request(|reply| Command::Save { reply }).await
    }

    pub async fn restore(&self, saved: SavedState) -> Result<Phase, AppError> {
        let phase = self
            .request(|reply| Command::Restore { saved, reply })
            .await??;
        self.record_action("restore");
        Ok(phase)
    }

    /// Ask the lifecycle task to cancel its timers and stop
    pub async fn shutdown(&self) -> Result<(), AppError> {
        self.commands
            .send(Command::Shutdown)
            .await
            .map_err(|_| AppError::Unavailable)
    }

    /// Latest published screen
    pub fn screen(&self) -> ScreenState {
        self.screen.borrow().clone()
    }

    /// Subscribe to screen updates
    pub fn watch_screen(&self) -> watch::Receiver<ScreenState> {
        self.screen.clone()
    }

    async fn request<T>(
        &self,
        build: impl FnOnce(oneshot::Sender<T>) -> Command,
    ) -> Result<T, AppError> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.commands
            .send(build(reply_tx))
            .await
            .map_err(|_| AppError::Unavailable)?;
        reply_rx.await.map_err(|_| AppError::Unavailable)
    }

    fn record_action(&self, action: &str) {
        if let Ok(mut last_action) = self.last_action.lock() {
            *last_action = Some(action.to_string());
        }
        if let Ok(mut last_time) = self.last_action_time.lock() {
            *last_time = Some(Utc::now());
        }
    }

    /// Calculate server uptime as a formatted string
    pub fn get_uptime(&self) -> String {
        let duration = self.start_time.elapsed();
        let hours = duration.as_secs() / 3600;
        let minutes = (duration.as_secs() % 3600) / 60;
        let seconds = duration.as_secs() % 60;

        if hours > 0 {
            format!("{}h {}m {}s", hours, minutes, seconds)
        } else if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}s", seconds)
        }
    }

    /// Get last action information
    pub fn get_last_action(&self) -> (Option<String>, Option<DateTime<Utc>>) {
        let last_action = self.last_action.lock().ok().and_then(|a| a.clone());
        let last_action_time = self.last_action_time.lock().ok().and_then(|t| *t);
        (last_action, last_action_time)
    }
}

