//! View host adapter
//!
//! This module implements the lifecycle's view host on top of tokio: timers for
//! countdown ticks, a simulated hourglass player and a published screen model.

pub mod animation;
pub mod view_host;

// Re-export main types
pub use animation::{spawn_player, AnimationSettings};
pub use view_host::{HostEvent, ServerHost};
