//! Lifecycle controller: runs the state machine against a view host

use std::time::Duration;

use tracing::{debug, info, warn};

use super::{
    machine::{Effect, Event, Lifecycle, Phase},
    selection::{SessionId, SessionSelection},
    snapshot::SavedState,
};
use crate::{
    catalog::{self, CATALOG},
    error::{HostError, LifecycleError},
    host::ViewHost,
};

/// Countdown resolution
pub const TICK_INTERVAL: Duration = Duration::from_secs(1);

/// Owns the current lifecycle value, the session counter and the single pending
/// tick. Every state change goes through [`Lifecycle::apply`]; the new value is
/// committed only after the host accepted all of its effects.
pub struct LifecycleController<H: ViewHost> {
    host: H,
    state: Lifecycle,
    last_id: SessionId,
    pending_tick: Option<H::TickHandle>,
}

impl<H: ViewHost> LifecycleController<H> {
    pub fn new(host: H) -> Self {
        Self {
            host,
            state: Lifecycle::Selecting,
            last_id: SessionId::new(0),
            pending_tick: None,
        }
    }

    pub fn state(&self) -> &Lifecycle {
        &self.state
    }

    pub fn phase(&self) -> Phase {
        self.state.phase()
    }

    pub fn current_session(&self) -> Option<SessionId> {
        self.state.session().map(|s| s.id)
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    /// Draw the current state from scratch
    pub fn present(&mut self) -> Result<(), LifecycleError> {
        let effects = self.state.render();
        self.commit(self.state, &effects)
    }

    /// Start a session for a catalog label
    pub fn choose(&mut self, label: &str) -> Result<SessionSelection, LifecycleError> {
        let selection = catalog::select(label)?;
        self.start(selection)?;
        Ok(selection)
    }

    pub fn start(&mut self, selection: SessionSelection) -> Result<SessionId, LifecycleError> {
        let id = self.last_id.next();
        self.last_id = id;
        info!(
            "Starting session {}: {} loops, {}s",
            id,
            selection.repeat_count(),
            selection.total_seconds()
        );
        self.transition(Event::Start { id, selection })?;
        Ok(id)
    }

    pub fn on_tick(&mut self, session: SessionId) -> Result<(), LifecycleError> {
        if self.current_session() != Some(session) {
            debug!("Dropping stale tick for session {}", session);
            return Ok(());
        }
        // The tick that just fired was the pending one
        self.pending_tick = None;
        self.transition(Event::Tick { session })?;
        if let Some(s) = self.state.session() {
            debug!("Session {} countdown at {}s", s.id, s.remaining_seconds);
            if s.remaining_seconds == 0 {
                info!("Session {} countdown expired", s.id);
            }
        }
        Ok(())
    }

    pub fn on_playback_state_changed(
        &mut self,
        session: SessionId,
        playing: bool,
    ) -> Result<(), LifecycleError> {
        let was_visible = self.state.session().map(|s| s.restart_visible);
        self.transition(Event::PlaybackChanged { session, playing })?;
        if was_visible == Some(false) && self.state.session().is_some_and(|s| s.restart_visible) {
            info!("Session {} animation finished, restart available", session);
        }
        Ok(())
    }

    /// End the current session and return to the selection panel
    pub fn restart(&mut self) -> Result<(), LifecycleError> {
        match self.current_session() {
            Some(id) => info!("Restarting from session {} ({:?})", id, self.phase()),
            None => debug!("Restart requested with no active session"),
        }
        self.transition(Event::Restart)
    }

    pub fn save(&self) -> SavedState {
        self.state.save()
    }

    pub fn restore(&mut self, saved: &SavedState) -> Result<Phase, LifecycleError> {
        let id = self.last_id.next();
        let restored = Lifecycle::restore(saved, id)?;
        if restored.session().is_some() {
            self.last_id = id;
        }
        info!("Restoring lifecycle in phase {:?}", restored.phase());
        let effects = restored.render();
        self.commit(restored, &effects)?;
        Ok(self.phase())
    }

    /// Cancel the outstanding tick, if any
    pub fn shutdown(&mut self) {
        if let Some(handle) = self.pending_tick.take() {
            debug!("Cancelling pending tick on shutdown");
            self.host.cancel_tick(handle);
        }
    }

    fn transition(&mut self, event: Event) -> Result<(), LifecycleError> {
        let transition = self.state.apply(event);
        self.commit(transition.state, &transition.effects)
    }

    fn commit(&mut self, next: Lifecycle, effects: &[Effect]) -> Result<(), LifecycleError> {
        match self.execute(effects) {
            Ok(()) => {
                self.state = next;
                Ok(())
            }
            Err(err) => {
                warn!("View host rejected transition: {}, falling back to selection", err);
                self.state = Lifecycle::Selecting;
                if let Err(fallback) = self.execute(&Lifecycle::Selecting.render()) {
                    warn!("Failed to redraw selection panel: {}", fallback);
                }
                Err(err.into())
            }
        }
    }

    fn execute(&mut self, effects: &[Effect]) -> Result<(), HostError> {
        for effect in effects {
            match *effect {
                Effect::RenderChoices => self.host.render_choices(&CATALOG),
                Effect::HideChoices => self.host.hide_choices(),
                Effect::ShowAnimation {
                    session,
                    loop_count,
                    autoplay,
                } => self.host.show_animation(session, loop_count, autoplay)?,
                Effect::HideAnimation => self.host.hide_animation(),
                Effect::RenderCountdown { seconds, visible } => {
                    self.host.render_countdown(seconds, visible)
                }
                Effect::RenderRestartButton { visible } => {
                    self.host.render_restart_button(visible)
                }
                Effect::ScheduleTick { session } => {
                    if let Some(previous) = self.pending_tick.take() {
                        self.host.cancel_tick(previous);
                    }
                    self.pending_tick = Some(self.host.schedule_tick(TICK_INTERVAL, session));
                }
                Effect::CancelTick => {
                    if let Some(handle) = self.pending_tick.take() {
                        self.host.cancel_tick(handle);
                    }
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::recording::RecordingHost;

    fn controller() -> LifecycleController<RecordingHost> {
        let mut controller = LifecycleController::new(RecordingHost::default());
        controller.present().unwrap();
        controller
    }

    fn run_ticks(controller: &mut LifecycleController<RecordingHost>, count: u32) {
        for _ in 0..count {
            let session = controller.host_mut().fire_next().expect("pending tick");
            controller.on_tick(session).unwrap();
        }
    }

    #[test]
    fn present_shows_choices_only() {
        let controller = controller();
        let host = controller.host();
        assert!(host.choices_visible);
        assert_eq!(host.choice_count, 4);
        assert!(!host.animation_visible);
        assert!(!host.countdown_visible);
        assert!(!host.restart_visible);
    }

    #[test]
    fn choose_ten_runs_countdown_to_zero() {
        let mut controller = controller();
        let selection = controller.choose("10").unwrap();
        assert_eq!(selection, SessionSelection::from_parts(3, 10));

        let host = controller.host();
        assert!(!host.choices_visible);
        assert!(host.animation_visible);
        assert!(host.animation_autoplay);
        assert_eq!(host.loop_count, 3);
        assert!(host.countdown_visible);
        assert_eq!(host.countdown_seconds, 10);
        assert_eq!(host.ticks[0].after, TICK_INTERVAL);

        run_ticks(&mut controller, 10);
        let host = controller.host();
        assert_eq!(host.countdown_seconds, 0);
        assert!(!host.countdown_visible);
        assert!(host.animation_visible);
        assert!(!host.restart_visible);
        assert!(host.pending_ticks().is_empty());
        assert_eq!(controller.phase(), Phase::CountdownExpired);
    }

    #[test]
    fn one_tick_outstanding_at_a_time() {
        let mut controller = controller();
        controller.choose("15").unwrap();
        for _ in 0..5 {
            assert_eq!(controller.host().pending_ticks().len(), 1);
            run_ticks(&mut controller, 1);
        }
    }

    #[test]
    fn restart_shows_when_animation_stops_mid_countdown() {
        let mut controller = controller();
        let session = controller.start(SessionSelection::from_parts(3, 10)).unwrap();
        run_ticks(&mut controller, 6);

        controller.on_playback_state_changed(session, false).unwrap();
        let host = controller.host();
        assert!(host.restart_visible);
        assert!(host.countdown_visible);
        assert_eq!(host.countdown_seconds, 4);
        assert_eq!(controller.phase(), Phase::AnimationComplete);
    }

    #[test]
    fn restart_from_any_phase_returns_to_selection() {
        for (ticks, finished) in [(0, false), (10, false), (3, true), (10, true)] {
            let mut controller = controller();
            controller.choose("10").unwrap();
            let id = controller.current_session().unwrap();
            run_ticks(&mut controller, ticks);
            if finished {
                controller.on_playback_state_changed(id, false).unwrap();
            }

            controller.restart().unwrap();
            let host = controller.host();
            assert_eq!(controller.phase(), Phase::Selecting);
            assert_eq!(controller.current_session(), None);
            assert!(host.choices_visible);
            assert!(!host.animation_visible);
            assert!(!host.restart_visible);
            assert!(!host.countdown_visible);
            assert!(host.pending_ticks().is_empty());
        }
    }

    #[test]
    fn pending_tick_does_not_reach_next_session() {
        let mut controller = controller();
        controller.choose("10").unwrap();
        let first_id = controller.current_session().unwrap();
        run_ticks(&mut controller, 2);

        controller.restart().unwrap();
        assert!(controller.host().ticks.iter().any(|t| t.cancelled));

        controller.choose("15").unwrap();
        // A tick from the old session that escaped cancellation
        controller.on_tick(first_id).unwrap();
        assert_eq!(controller.host().countdown_seconds, 15);
        assert_eq!(controller.state().session().unwrap().remaining_seconds, 15);
    }

    #[test]
    fn choosing_again_resets_both_clocks() {
        let mut controller = controller();
        controller.choose("10").unwrap();
        let first = controller.current_session().unwrap();
        run_ticks(&mut controller, 4);
        controller.on_playback_state_changed(first, false).unwrap();

        controller.choose("30").unwrap();
        let second = controller.current_session().unwrap();
        assert_ne!(first, second);
        let host = controller.host();
        assert_eq!(host.countdown_seconds, 30);
        assert_eq!(host.loop_count, 11);
        assert!(!host.restart_visible);
        assert_eq!(host.pending_ticks().len(), 1);

        controller.on_playback_state_changed(first, false).unwrap();
        assert!(!controller.host().restart_visible);
    }

    #[test]
    fn zero_second_session_never_ticks() {
        let mut controller = controller();
        controller.start(SessionSelection::from_parts(0, 0)).unwrap();
        let host = controller.host();
        assert!(!host.countdown_visible);
        assert_eq!(host.countdown_seconds, 0);
        assert!(host.ticks.is_empty());
        assert_eq!(controller.phase(), Phase::CountdownExpired);
    }

    #[test]
    fn missing_animation_fails_without_half_state() {
        let mut controller = controller();
        controller.host_mut().fail_animation = true;

        let err = controller.choose("10").unwrap_err();
        assert!(matches!(err, LifecycleError::Host(HostError::AnimationUnavailable(_))));
        let host = controller.host();
        assert_eq!(controller.phase(), Phase::Selecting);
        assert!(host.choices_visible);
        assert!(!host.countdown_visible);
        assert!(host.ticks.is_empty());
    }

    #[test]
    fn unknown_label_leaves_state_alone() {
        let mut controller = controller();
        assert!(matches!(
            controller.choose("90"),
            Err(LifecycleError::UnknownChoice(_))
        ));
        assert_eq!(controller.phase(), Phase::Selecting);
    }

    #[test]
    fn restore_reschedules_countdown() {
        let mut controller = controller();
        controller.choose("30").unwrap();
        run_ticks(&mut controller, 12);
        let saved = controller.save();
        assert_eq!(saved.remaining_seconds, 18);

        let mut recreated = self::controller();
        let phase = recreated.restore(&saved).unwrap();
        assert_eq!(phase, Phase::Running);
        let host = recreated.host();
        assert!(host.animation_visible);
        assert!(!host.choices_visible);
        assert_eq!(host.countdown_seconds, 18);
        assert_eq!(host.pending_ticks().len(), 1);

        run_ticks(&mut recreated, 18);
        assert_eq!(recreated.phase(), Phase::CountdownExpired);
    }

    #[test]
    fn shutdown_cancels_pending_tick() {
        let mut controller = controller();
        controller.choose("10").unwrap();
        controller.shutdown();
        assert!(controller.host().pending_ticks().is_empty());
    }
}
