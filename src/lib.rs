//! Hourglass Timer - pick a duration, watch the hourglass, restart
//!
//! The core is a pure lifecycle state machine driving a [`host::ViewHost`]. The
//! binary serves that host headlessly over HTTP, with tokio timers for the
//! countdown and a simulated hourglass player.

pub mod api;
pub mod catalog;
pub mod config;
pub mod error;
pub mod host;
pub mod lifecycle;
pub mod services;
pub mod state;
pub mod tasks;
pub mod utils;

// Re-export commonly used types
pub use api::create_router;
pub use config::Config;
pub use error::{AppError, HostError, LifecycleError};
pub use lifecycle::{LifecycleController, Phase, SavedState, SessionSelection};
pub use state::{AppState, ScreenState};
pub use utils::signals::shutdown_signal;
