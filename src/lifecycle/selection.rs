//! Session selection and identity

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::LifecycleError;

/// The (repeat count, seconds) pair a session runs with. Immutable once built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SessionSelection {
    repeat_count: u32,
    total_seconds: u32,
}

impl SessionSelection {
    /// Build a selection from untrusted integers. Negative or oversized values are
    /// a contract violation and are rejected rather than clamped.
    pub fn new(repeat_count: i64, total_seconds: i64) -> Result<Self, LifecycleError> {
        Ok(Self {
            repeat_count: checked("repeat_count", repeat_count)?,
            total_seconds: checked("total_seconds", total_seconds)?,
        })
    }

    pub const fn from_parts(repeat_count: u32, total_seconds: u32) -> Self {
        Self {
            repeat_count,
            total_seconds,
        }
    }

    pub fn repeat_count(&self) -> u32 {
        self.repeat_count
    }

    pub fn total_seconds(&self) -> u32 {
        self.total_seconds
    }
}

pub(crate) fn checked(field: &'static str, value: i64) -> Result<u32, LifecycleError> {
    u32::try_from(value).map_err(|_| LifecycleError::InvalidSelection { field, value })
}

/// Identifies one session so late ticks and playback reports can be matched
/// against the session that asked for them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(u64);

impl SessionId {
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub(crate) fn next(&self) -> Self {
        Self(self.0.wrapping_add(1))
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn negative_values_are_rejected() {
        assert_eq!(
            SessionSelection::new(-1, 10),
            Err(LifecycleError::InvalidSelection {
                field: "repeat_count",
                value: -1
            })
        );
        assert_eq!(
            SessionSelection::new(3, -10),
            Err(LifecycleError::InvalidSelection {
                field: "total_seconds",
                value: -10
            })
        );
    }

    #[test]
    fn oversized_values_are_rejected() {
        assert!(SessionSelection::new(0, i64::from(u32::MAX) + 1).is_err());
    }

    #[test]
    fn zero_is_a_valid_selection() {
        let selection = SessionSelection::new(0, 0).unwrap();
        assert_eq!(selection.repeat_count(), 0);
        assert_eq!(selection.total_seconds(), 0);
    }
}
