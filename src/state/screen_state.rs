//! Screen model published by the view host

use serde::Serialize;

use crate::{
    catalog::DurationChoice,
    lifecycle::{Phase, SessionId},
};

/// What a client should currently draw
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScreenState {
    pub phase: Phase,
    /// Selection panel
    pub choices_visible: bool,
    pub choices: Vec<DurationChoice>,
    /// Hourglass view
    pub animation_visible: bool,
    pub animation_playing: bool,
    pub loop_count: u32,
    /// Session the hourglass belongs to; playback reports should carry it
    pub session: Option<SessionId>,
    pub countdown_visible: bool,
    pub countdown_seconds: u32,
    pub restart_visible: bool,
}

impl ScreenState {
    /// Blank screen before the first render
    pub fn new() -> Self {
        Self {
            phase: Phase::Selecting,
            choices_visible: false,
            choices: Vec::new(),
            animation_visible: false,
            animation_playing: false,
            loop_count: 0,
            session: None,
            countdown_visible: false,
            countdown_seconds: 0,
            restart_visible: false,
        }
    }

    /// Countdown text as displayed, if shown
    pub fn countdown_text(&self) -> Option<String> {
        self.countdown_visible
            .then(|| self.countdown_seconds.to_string())
    }
}

impl Default for ScreenState {
    fn default() -> Self {
        Self::new()
    }
}
