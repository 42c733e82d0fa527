//! Flat saved-state record for recreating the screen

use serde::{Deserialize, Serialize};

use super::{
    machine::{Lifecycle, Session},
    selection::{checked, SessionId, SessionSelection},
};
use crate::error::LifecycleError;

/// Everything needed to rebuild the current phase, as primitive values.
///
/// An invisible animation means no session is running; the other fields must
/// then be zero or hidden.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SavedState {
    pub repeat_count: i64,
    pub total_seconds: i64,
    pub remaining_seconds: i64,
    pub animation_visible: bool,
    pub countdown_visible: bool,
    pub restart_visible: bool,
}

impl Lifecycle {
    pub fn save(&self) -> SavedState {
        match self {
            Lifecycle::Selecting => SavedState::default(),
            Lifecycle::Active(session) => SavedState {
                repeat_count: i64::from(session.selection.repeat_count()),
                total_seconds: i64::from(session.selection.total_seconds()),
                remaining_seconds: i64::from(session.remaining_seconds),
                animation_visible: true,
                countdown_visible: session.countdown_visible(),
                restart_visible: session.restart_visible,
            },
        }
    }

    /// Rebuild a lifecycle from a saved record, giving the session a fresh id
    pub fn restore(saved: &SavedState, id: SessionId) -> Result<Self, LifecycleError> {
        let selection = SessionSelection::new(saved.repeat_count, saved.total_seconds)?;
        let remaining_seconds = checked("remaining_seconds", saved.remaining_seconds)?;

        if !saved.animation_visible {
            if saved.countdown_visible || saved.restart_visible {
                return Err(LifecycleError::InconsistentSnapshot(
                    "countdown or restart visible without a session".to_string(),
                ));
            }
            return Ok(Lifecycle::Selecting);
        }

        if remaining_seconds > selection.total_seconds() {
            return Err(LifecycleError::InconsistentSnapshot(format!(
                "remaining {}s exceeds total {}s",
                remaining_seconds,
                selection.total_seconds()
            )));
        }
        if saved.countdown_visible != (remaining_seconds > 0) {
            return Err(LifecycleError::InconsistentSnapshot(format!(
                "countdown visible={} with {}s remaining",
                saved.countdown_visible, remaining_seconds
            )));
        }

        Ok(Lifecycle::Active(Session {
            id,
            selection,
            remaining_seconds,
            animation_playing: !saved.restart_visible,
            restart_visible: saved.restart_visible,
        }))
    }
}
