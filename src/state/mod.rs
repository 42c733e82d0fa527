//! State management module
//!
//! This module contains the shared application handle and the screen model the
//! view host publishes.

pub mod app_state;
pub mod screen_state;

// Re-export main types
pub use app_state::AppState;
pub use screen_state::ScreenState;
