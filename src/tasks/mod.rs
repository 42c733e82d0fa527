//! Background tasks module
//!
//! This module contains the task that runs the timer lifecycle alongside the
//! HTTP server.

pub mod lifecycle;

// Re-export main items
pub use lifecycle::{lifecycle_task, Command};
