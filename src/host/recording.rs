//! In-memory host for controller tests

use std::time::Duration;

use super::ViewHost;
use crate::{catalog::DurationChoice, error::HostError, lifecycle::SessionId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduledTick {
    pub session: SessionId,
    pub after: Duration,
    pub cancelled: bool,
    pub fired: bool,
}

/// Tracks what a real screen would show and every tick it was asked for.
#[derive(Debug, Default)]
pub struct RecordingHost {
    pub choices_visible: bool,
    pub choice_count: usize,
    pub animation_visible: bool,
    pub animation_autoplay: bool,
    pub loop_count: u32,
    pub animation_session: Option<SessionId>,
    pub countdown_visible: bool,
    pub countdown_seconds: u32,
    pub restart_visible: bool,
    pub ticks: Vec<ScheduledTick>,
    pub fail_animation: bool,
}

impl RecordingHost {
    /// Ticks still waiting to fire
    pub fn pending_ticks(&self) -> Vec<usize> {
        self.ticks
            .iter()
            .enumerate()
            .filter(|(_, t)| !t.cancelled && !t.fired)
            .map(|(i, _)| i)
            .collect()
    }

    /// Mark the oldest pending tick as fired and return its session
    pub fn fire_next(&mut self) -> Option<SessionId> {
        let index = *self.pending_ticks().first()?;
        let tick = &mut self.ticks[index];
        tick.fired = true;
        Some(tick.session)
    }
}

impl ViewHost for RecordingHost {
    type TickHandle = usize;

    fn render_choices(&mut self, catalog: &[DurationChoice]) {
        self.choices_visible = true;
        self.choice_count = catalog.len();
    }

    fn hide_choices(&mut self) {
        self.choices_visible = false;
    }

    fn show_animation(
        &mut self,
        session: SessionId,
        loop_count: u32,
        autoplay: bool,
    ) -> Result<(), HostError> {
        if self.fail_animation {
            return Err(HostError::AnimationUnavailable("hourglass".to_string()));
        }
        self.animation_visible = true;
        self.animation_autoplay = autoplay;
        self.loop_count = loop_count;
        self.animation_session = Some(session);
        Ok(())
    }

    fn hide_animation(&mut self) {
        self.animation_visible = false;
        self.animation_session = None;
    }

    fn render_countdown(&mut self, seconds_remaining: u32, visible: bool) {
        self.countdown_seconds = seconds_remaining;
        self.countdown_visible = visible;
    }

    fn render_restart_button(&mut self, visible: bool) {
        self.restart_visible = visible;
    }

    fn schedule_tick(&mut self, after: Duration, session: SessionId) -> usize {
        self.ticks.push(ScheduledTick {
            session,
            after,
            cancelled: false,
            fired: false,
        });
        self.ticks.len() - 1
    }

    fn cancel_tick(&mut self, handle: usize) {
        if let Some(tick) = self.ticks.get_mut(handle) {
            tick.cancelled = true;
        }
    }
}
