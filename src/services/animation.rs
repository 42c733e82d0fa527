//! Simulated hourglass playback

use std::{path::PathBuf, time::Duration};

use tokio::{sync::mpsc, task::AbortHandle, time::sleep};
use tracing::{debug, info};

use super::view_host::HostEvent;
use crate::{error::HostError, lifecycle::SessionId};

/// How the hourglass asset plays
#[derive(Debug, Clone)]
pub struct AnimationSettings {
    /// Length of one loop at speed 1.0
    pub cycle: Duration,
    pub speed: f64,
    /// Asset that must exist before the hourglass can be shown
    pub asset: Option<PathBuf>,
    /// Run the built-in player; when off, playback is reported over the API
    pub simulate: bool,
}

impl AnimationSettings {
    /// Restart-mode playback: a repeat count of N plays the loop N + 1 times
    pub fn playback_duration(&self, loop_count: u32) -> Duration {
        let plays = u128::from(loop_count) + 1;
        // Speed in thousandths keeps catalog durations exact
        let speed_milli = ((self.speed * 1000.0).round() as u128).max(1);
        let millis = self.cycle.as_millis() * plays * 1000 / speed_milli;
        Duration::from_millis(u64::try_from(millis).unwrap_or(u64::MAX))
    }

    pub fn check_available(&self) -> Result<(), HostError> {
        match &self.asset {
            Some(path) if !path.is_file() => {
                Err(HostError::AnimationUnavailable(path.display().to_string()))
            }
            _ => Ok(()),
        }
    }
}

impl Default for AnimationSettings {
    fn default() -> Self {
        Self {
            cycle: Duration::from_millis(2000),
            speed: 0.8,
            asset: None,
            simulate: true,
        }
    }
}

/// Play `loop_count` loops for `session`, reporting start and end of playback
pub fn spawn_player(
    session: SessionId,
    loop_count: u32,
    settings: &AnimationSettings,
    events: mpsc::UnboundedSender<HostEvent>,
) -> AbortHandle {
    let duration = settings.playback_duration(loop_count);
    debug!(
        "Playing hourglass for session {}: {} loops over {:?}",
        session, loop_count, duration
    );

    tokio::spawn(async move {
        let _ = events.send(HostEvent::Playback {
            session,
            playing: true,
        });
        sleep(duration).await;
        info!("Hourglass playback finished for session {}", session);
        if events
            .send(HostEvent::Playback {
                session,
                playing: false,
            })
            .is_err()
        {
            debug!("Lifecycle task gone, dropping playback report");
        }
    })
    .abort_handle()
}
