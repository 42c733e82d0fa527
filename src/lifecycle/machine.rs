//! Session state machine.
//!
//! The lifecycle is a plain value. Every event produces a new value plus the list
//! of view-host effects needed to bring the screen in line with it:
//!
//! ```text
//! Selecting --Start--> Running --Tick(0)--------> CountdownExpired --+
//!                         |                                          +--> Finished
//!                         +--PlaybackChanged(off)--> AnimationComplete
//!
//! any active phase --Restart--> Selecting
//! ```
//!
//! The countdown and the animation are separate clocks; either may finish first.

use serde::Serialize;

use super::selection::{SessionId, SessionSelection};

/// Phase names reported to observers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Selecting,
    Running,
    CountdownExpired,
    AnimationComplete,
    /// Countdown at zero and animation done
    Finished,
}

/// State of one running session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Session {
    pub id: SessionId,
    pub selection: SessionSelection,
    pub remaining_seconds: u32,
    pub animation_playing: bool,
    pub restart_visible: bool,
}

impl Session {
    fn started(id: SessionId, selection: SessionSelection) -> Self {
        Self {
            id,
            selection,
            remaining_seconds: selection.total_seconds(),
            animation_playing: true,
            restart_visible: false,
        }
    }

    /// The countdown shows only while there is something left to count
    pub fn countdown_visible(&self) -> bool {
        self.remaining_seconds > 0
    }

    pub fn phase(&self) -> Phase {
        match (self.countdown_visible(), self.restart_visible) {
            (true, false) => Phase::Running,
            (false, false) => Phase::CountdownExpired,
            (true, true) => Phase::AnimationComplete,
            (false, true) => Phase::Finished,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Lifecycle {
    #[default]
    Selecting,
    Active(Session),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    Start {
        id: SessionId,
        selection: SessionSelection,
    },
    Tick {
        session: SessionId,
    },
    PlaybackChanged {
        session: SessionId,
        playing: bool,
    },
    Restart,
}

/// A single instruction for the view host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    RenderChoices,
    HideChoices,
    ShowAnimation {
        session: SessionId,
        loop_count: u32,
        autoplay: bool,
    },
    HideAnimation,
    RenderCountdown {
        seconds: u32,
        visible: bool,
    },
    RenderRestartButton {
        visible: bool,
    },
    ScheduleTick {
        session: SessionId,
    },
    CancelTick,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    pub state: Lifecycle,
    pub effects: Vec<Effect>,
}

impl Transition {
    fn unchanged(state: Lifecycle) -> Self {
        Self {
            state,
            effects: Vec::new(),
        }
    }
}

impl Lifecycle {
    pub fn session(&self) -> Option<&Session> {
        match self {
            Lifecycle::Selecting => None,
            Lifecycle::Active(session) => Some(session),
        }
    }

    pub fn phase(&self) -> Phase {
        self.session().map_or(Phase::Selecting, Session::phase)
    }

    /// Reduce one event into the next lifecycle value
    pub fn apply(&self, event: Event) -> Transition {
        match event {
            Event::Start { id, selection } => self.start(id, selection),
            Event::Tick { session } => self.tick(session),
            Event::PlaybackChanged { session, playing } => self.playback_changed(session, playing),
            Event::Restart => self.restart(),
        }
    }

    /// Effects that draw this state from scratch, regardless of what the host
    /// currently shows.
    pub fn render(&self) -> Vec<Effect> {
        match self {
            Lifecycle::Selecting => teardown(),
            Lifecycle::Active(session) => {
                let mut effects = vec![
                    Effect::CancelTick,
                    Effect::ShowAnimation {
                        session: session.id,
                        loop_count: session.selection.repeat_count(),
                        autoplay: !session.restart_visible,
                    },
                    Effect::HideChoices,
                    Effect::RenderCountdown {
                        seconds: session.remaining_seconds,
                        visible: session.countdown_visible(),
                    },
                    Effect::RenderRestartButton {
                        visible: session.restart_visible,
                    },
                ];
                if session.countdown_visible() {
                    effects.push(Effect::ScheduleTick {
                        session: session.id,
                    });
                }
                effects
            }
        }
    }

    fn start(&self, id: SessionId, selection: SessionSelection) -> Transition {
        let next = Lifecycle::Active(Session::started(id, selection));
        let mut effects = Vec::new();
        if self.session().is_some() {
            // Superseded session: stop its clock and drop its animation first
            effects.push(Effect::HideAnimation);
        }
        effects.extend(next.render());
        Transition {
            state: next,
            effects,
        }
    }

    fn tick(&self, id: SessionId) -> Transition {
        let Some(session) = self.session().filter(|s| s.id == id) else {
            return Transition::unchanged(*self);
        };
        if session.remaining_seconds == 0 {
            return Transition::unchanged(*self);
        }

        let mut next = *session;
        next.remaining_seconds -= 1;
        let mut effects = vec![Effect::RenderCountdown {
            seconds: next.remaining_seconds,
            visible: next.countdown_visible(),
        }];
        if next.countdown_visible() {
            effects.push(Effect::ScheduleTick { session: id });
        }
        Transition {
            state: Lifecycle::Active(next),
            effects,
        }
    }

    fn playback_changed(&self, id: SessionId, playing: bool) -> Transition {
        let Some(session) = self.session().filter(|s| s.id == id) else {
            return Transition::unchanged(*self);
        };

        let mut next = *session;
        next.animation_playing = playing;
        let mut effects = Vec::new();
        if !playing && !session.restart_visible {
            next.restart_visible = true;
            effects.push(Effect::RenderRestartButton { visible: true });
        }
        Transition {
            state: Lifecycle::Active(next),
            effects,
        }
    }

    fn restart(&self) -> Transition {
        match self {
            Lifecycle::Selecting => Transition::unchanged(*self),
            Lifecycle::Active(_) => Transition {
                state: Lifecycle::Selecting,
                effects: teardown(),
            },
        }
    }
}

fn teardown() -> Vec<Effect> {
    vec![
        Effect::CancelTick,
        Effect::HideAnimation,
        Effect::RenderRestartButton { visible: false },
        Effect::RenderCountdown {
            seconds: 0,
            visible: false,
        },
        Effect::RenderChoices,
    ]
}
