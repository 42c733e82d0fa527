//! View host port
//!
//! The lifecycle controller never touches a screen or a clock directly. It drives
//! an implementation of [`ViewHost`], and the host reports back by calling the
//! controller's `on_tick` and `on_playback_state_changed` entry points.

use std::time::Duration;

use crate::{catalog::DurationChoice, error::HostError, lifecycle::SessionId};

#[cfg(test)]
pub(crate) mod recording;

pub trait ViewHost {
    /// Handle for a scheduled tick, used to cancel it
    type TickHandle;

    fn render_choices(&mut self, catalog: &[DurationChoice]);

    fn hide_choices(&mut self);

    /// Show the hourglass for `session`, looping `loop_count` times. With
    /// `autoplay` off the view is shown at rest.
    fn show_animation(
        &mut self,
        session: SessionId,
        loop_count: u32,
        autoplay: bool,
    ) -> Result<(), HostError>;

    fn hide_animation(&mut self);

    fn render_countdown(&mut self, seconds_remaining: u32, visible: bool);

    fn render_restart_button(&mut self, visible: bool);

    /// Arrange for a tick carrying `session` to be delivered after `after`
    fn schedule_tick(&mut self, after: Duration, session: SessionId) -> Self::TickHandle;

    fn cancel_tick(&mut self, handle: Self::TickHandle);
}
