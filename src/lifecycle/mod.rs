//! Timer and animation lifecycle
//!
//! `machine` holds the pure state machine, `controller` applies its effects to a
//! [`ViewHost`](crate::host::ViewHost).

pub mod controller;
pub mod machine;
pub mod selection;
pub mod snapshot;

pub use controller::{LifecycleController, TICK_INTERVAL};
pub use machine::{Effect, Event, Lifecycle, Phase, Session, Transition};
pub use selection::{SessionId, SessionSelection};
pub use snapshot::SavedState;
