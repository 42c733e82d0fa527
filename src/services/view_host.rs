//! Headless view host backed by tokio timers

use std::time::Duration;

use tokio::{
    sync::{mpsc, watch},
    task::AbortHandle,
    time::sleep,
};
use tracing::debug;

use super::animation::{spawn_player, AnimationSettings};
use crate::{
    catalog::DurationChoice,
    error::HostError,
    host::ViewHost,
    lifecycle::{Phase, SessionId},
    state::ScreenState,
};

/// Reports flowing from the host back into the lifecycle task
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostEvent {
    Tick(SessionId),
    Playback { session: SessionId, playing: bool },
}

/// Keeps the screen model, publishes every change on a watch channel and turns
/// scheduled ticks and animation playback into [`HostEvent`]s.
pub struct ServerHost {
    screen: ScreenState,
    screen_tx: watch::Sender<ScreenState>,
    events: mpsc::UnboundedSender<HostEvent>,
    settings: AnimationSettings,
    player: Option<AbortHandle>,
}

impl ServerHost {
    pub fn new(
        settings: AnimationSettings,
        events: mpsc::UnboundedSender<HostEvent>,
    ) -> (Self, watch::Receiver<ScreenState>) {
        let (screen_tx, screen_rx) = watch::channel(ScreenState::new());
        let host = Self {
            screen: ScreenState::new(),
            screen_tx,
            events,
            settings,
            player: None,
        };
        (host, screen_rx)
    }

    /// Mirror controller-side state that has no dedicated host call
    pub fn record_phase(&mut self, phase: Phase, animation_playing: bool) {
        if self.screen.phase != phase || self.screen.animation_playing != animation_playing {
            self.screen.phase = phase;
            self.screen.animation_playing = animation_playing;
            self.publish();
        }
    }

    pub fn stop_player(&mut self) {
        if let Some(player) = self.player.take() {
            debug!("Stopping hourglass player");
            player.abort();
        }
    }

    fn publish(&self) {
        self.screen_tx.send_replace(self.screen.clone());
    }
}

impl ViewHost for ServerHost {
    type TickHandle = AbortHandle;

    fn render_choices(&mut self, catalog: &[DurationChoice]) {
        self.screen.choices_visible = true;
        self.screen.choices = catalog.to_vec();
        self.publish();
    }

    fn hide_choices(&mut self) {
        self.screen.choices_visible = false;
        self.publish();
    }

    fn show_animation(
        &mut self,
        session: SessionId,
        loop_count: u32,
        autoplay: bool,
    ) -> Result<(), HostError> {
        self.settings.check_available()?;
        self.stop_player();

        self.screen.animation_visible = true;
        self.screen.animation_playing = autoplay;
        self.screen.loop_count = loop_count;
        self.screen.session = Some(session);
        if autoplay && self.settings.simulate {
            self.player = Some(spawn_player(
                session,
                loop_count,
                &self.settings,
                self.events.clone(),
            ));
        }
        self.publish();
        Ok(())
    }

    fn hide_animation(&mut self) {
        self.stop_player();
        self.screen.animation_visible = false;
        self.screen.animation_playing = false;
        self.screen.loop_count = 0;
        self.screen.session = None;
        self.publish();
    }

    fn render_countdown(&mut self, seconds_remaining: u32, visible: bool) {
        self.screen.countdown_seconds = seconds_remaining;
        self.screen.countdown_visible = visible;
        self.publish();
    }

    fn render_restart_button(&mut self, visible: bool) {
        self.screen.restart_visible = visible;
        self.publish();
    }

    fn schedule_tick(&mut self, after: Duration, session: SessionId) -> AbortHandle {
        let events = self.events.clone();
        tokio::spawn(async move {
            sleep(after).await;
            if events.send(HostEvent::Tick(session)).is_err() {
                debug!("Lifecycle task gone, dropping tick for session {}", session);
            }
        })
        .abort_handle()
    }

    fn cancel_tick(&mut self, handle: AbortHandle) {
        handle.abort();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::CATALOG;

    #[tokio::test]
    async fn renders_are_published() {
        let (tx, _rx) = mpsc::unbounded_channel();
        let (mut host, screen) = ServerHost::new(AnimationSettings::default(), tx);

        host.render_choices(&CATALOG);
        assert!(screen.borrow().choices_visible);
        assert_eq!(screen.borrow().choices.len(), 4);

        host.render_countdown(7, true);
        assert_eq!(screen.borrow().countdown_text().as_deref(), Some("7"));
        host.render_countdown(0, false);
        assert_eq!(screen.borrow().countdown_text(), None);
    }

    #[tokio::test(start_paused = true)]
    async fn cancelled_tick_never_arrives() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let (mut host, _screen) = ServerHost::new(AnimationSettings::default(), tx);

        let cancelled = host.schedule_tick(Duration::from_secs(1), SessionId::new(1));
        host.cancel_tick(cancelled);
        host.schedule_tick(Duration::from_secs(2), SessionId::new(2));

        assert_eq!(rx.recv().await, Some(HostEvent::Tick(SessionId::new(2))));
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn external_animation_does_not_spawn_player() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let settings = AnimationSettings {
            simulate: false,
            ..AnimationSettings::default()
        };
        let (mut host, screen) = ServerHost::new(settings, tx);

        host.show_animation(SessionId::new(1), 3, true).unwrap();
        assert!(screen.borrow().animation_visible);
        assert!(screen.borrow().animation_playing);
        tokio::task::yield_now().await;
        assert!(rx.try_recv().is_err());

        host.hide_animation();
        assert!(!screen.borrow().animation_visible);
        assert_eq!(screen.borrow().session, None);
    }
}
