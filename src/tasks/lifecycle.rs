//! Lifecycle background task
//!
//! The only owner of the controller. User commands and host events are handled
//! one at a time, so the state machine needs no locking.

use std::ops::ControlFlow;

use tokio::sync::{mpsc, oneshot};
use tracing::{debug, error, info, warn};

use crate::{
    error::LifecycleError,
    lifecycle::{LifecycleController, Phase, SavedState, SessionId, SessionSelection},
    services::{HostEvent, ServerHost},
};

/// User-side requests, each answered on its own reply channel
#[derive(Debug)]
pub enum Command {
    Choose {
        label: String,
        reply: oneshot::Sender<Result<SessionSelection, LifecycleError>>,
    },
    Restart {
        reply: oneshot::Sender<Result<(), LifecycleError>>,
    },
    /// Playback report from an external renderer; without a session the
    /// current one is assumed
    Playback {
        session: Option<SessionId>,
        playing: bool,
        reply: oneshot::Sender<Result<(), LifecycleError>>,
    },
    Save {
        reply: oneshot::Sender<SavedState>,
    },
    Restore {
        saved: SavedState,
        reply: oneshot::Sender<Result<Phase, LifecycleError>>,
    },
    /// Cancel outstanding timers and stop the task
    Shutdown,
}

/// Run the lifecycle until shutdown or until every command sender is dropped
pub async fn lifecycle_task(
    mut controller: LifecycleController<ServerHost>,
    mut commands: mpsc::Receiver<Command>,
    mut host_events: mpsc::UnboundedReceiver<HostEvent>,
) {
    info!("Starting lifecycle task");

    if let Err(e) = controller.present() {
        error!("Failed to render selection panel: {}", e);
    }
    sync_screen(&mut controller);

    loop {
        tokio::select! {
            command = commands.recv() => match command {
                Some(command) => {
                    if handle_command(&mut controller, command).is_break() {
                        info!("Shutdown requested, stopping lifecycle task");
                        break;
                    }
                }
                None => {
                    info!("Command channel closed, stopping lifecycle task");
                    break;
                }
            },

            Some(event) = host_events.recv() => handle_host_event(&mut controller, event),
        }
        sync_screen(&mut controller);
    }

    controller.shutdown();
    controller.host_mut().stop_player();
    info!("Lifecycle task stopped");
}

fn handle_command(
    controller: &mut LifecycleController<ServerHost>,
    command: Command,
) -> ControlFlow<()> {
    match command {
        Command::Choose { label, reply } => {
            let result = controller.choose(&label);
            if let Err(e) = &result {
                warn!("Failed to start session for '{}': {}", label, e);
            }
            respond(controller, reply, result);
        }
        Command::Restart { reply } => {
            let result = controller.restart();
            respond(controller, reply, result);
        }
        Command::Playback {
            session,
            playing,
            reply,
        } => {
            let result = match session.or_else(|| controller.current_session()) {
                Some(session) => controller.on_playback_state_changed(session, playing),
                None => Err(LifecycleError::NoActiveSession),
            };
            respond(controller, reply, result);
        }
        Command::Save { reply } => {
            let saved = controller.save();
            respond(controller, reply, saved);
        }
        Command::Restore { saved, reply } => {
            let result = controller.restore(&saved);
            if let Err(e) = &result {
                warn!("Failed to restore saved state: {}", e);
            }
            respond(controller, reply, result);
        }
        Command::Shutdown => return ControlFlow::Break(()),
    }
    ControlFlow::Continue(())
}

fn handle_host_event(controller: &mut LifecycleController<ServerHost>, event: HostEvent) {
    let result = match event {
        HostEvent::Tick(session) => controller.on_tick(session),
        HostEvent::Playback { session, playing } => {
            controller.on_playback_state_changed(session, playing)
        }
    };
    if let Err(e) = result {
        error!("Failed to apply host event {:?}: {}", event, e);
    }
}

fn sync_screen(controller: &mut LifecycleController<ServerHost>) {
    let phase = controller.phase();
    let playing = controller
        .state()
        .session()
        .is_some_and(|s| s.animation_playing);
    controller.host_mut().record_phase(phase, playing);
}

/// Publish the settled screen before the caller reads it
fn respond<T>(
    controller: &mut LifecycleController<ServerHost>,
    reply: oneshot::Sender<T>,
    value: T,
) {
    sync_screen(controller);
    if reply.send(value).is_err() {
        debug!("Command caller went away before the reply");
    }
}
