//! Error types for the hourglass timer.

use thiserror::Error;

/// Errors raised by the lifecycle controller and the selection catalog.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LifecycleError {
    /// A duration or repeat value outside `0..=u32::MAX`
    #[error("invalid {field}: {value}")]
    InvalidSelection { field: &'static str, value: i64 },

    /// No catalog entry carries this label
    #[error("unknown duration choice '{0}'")]
    UnknownChoice(String),

    /// A saved state record contradicts itself
    #[error("inconsistent saved state: {0}")]
    InconsistentSnapshot(String),

    /// A playback report arrived while no session is running
    #[error("no active session")]
    NoActiveSession,

    /// The view host could not render what it was asked to
    #[error("view host error: {0}")]
    Host(#[from] HostError),
}

/// Failures reported by a view host.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HostError {
    #[error("animation resource unavailable: {0}")]
    AnimationUnavailable(String),
}

/// Errors seen by the HTTP layer.
#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Lifecycle(#[from] LifecycleError),

    /// The lifecycle task is gone and can no longer answer commands
    #[error("lifecycle task unavailable")]
    Unavailable,
}
