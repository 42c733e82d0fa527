//! Fixed catalog of hourglass durations

use serde::Serialize;

use crate::{error::LifecycleError, lifecycle::SessionSelection};

/// One button on the selection panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DurationChoice {
    pub label: &'static str,
    /// Animation loop count tuned by hand for this duration
    pub repeat_count: u32,
    pub total_seconds: u32,
}

impl DurationChoice {
    const fn new(label: &'static str, repeat_count: u32, total_seconds: u32) -> Self {
        Self {
            label,
            repeat_count,
            total_seconds,
        }
    }

    /// Turn this choice into the selection for a new session
    pub fn select(&self) -> SessionSelection {
        SessionSelection::from_parts(self.repeat_count, self.total_seconds)
    }
}

/// Loop counts are not derived from the seconds; keep them in sync with the
/// hourglass asset rather than recomputing.
pub const CATALOG: [DurationChoice; 4] = [
    DurationChoice::new("10", 3, 10),
    DurationChoice::new("15", 5, 15),
    DurationChoice::new("30", 11, 30),
    DurationChoice::new("60", 21, 60),
];

/// Catalog entries in display order
pub fn present_choices() -> impl Iterator<Item = DurationChoice> {
    CATALOG.iter().copied()
}

pub fn find_choice(label: &str) -> Option<DurationChoice> {
    present_choices().find(|choice| choice.label == label)
}

/// Look up a label and return its selection
pub fn select(label: &str) -> Result<SessionSelection, LifecycleError> {
    find_choice(label)
        .map(|choice| choice.select())
        .ok_or_else(|| LifecycleError::UnknownChoice(label.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_order_is_stable() {
        let labels: Vec<_> = present_choices().map(|c| c.label).collect();
        assert_eq!(labels, vec!["10", "15", "30", "60"]);
    }

    #[test]
    fn select_returns_table_pairs() {
        let expected = [("10", 3, 10), ("15", 5, 15), ("30", 11, 30), ("60", 21, 60)];
        for (label, repeat_count, total_seconds) in expected {
            let selection = select(label).unwrap();
            assert_eq!(selection.repeat_count(), repeat_count, "label {}", label);
            assert_eq!(selection.total_seconds(), total_seconds, "label {}", label);
        }
    }

    #[test]
    fn unknown_label_is_rejected() {
        assert_eq!(
            select("45"),
            Err(LifecycleError::UnknownChoice("45".to_string()))
        );
    }
}
