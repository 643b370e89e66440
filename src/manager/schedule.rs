//! Frame selection: which registered entries a single update visits

use serde::{Deserialize, Serialize};

/// Policy for picking at most `max_effects_per_frame` entries per update
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FrameSchedule {
    /// The first N entries in registration order, every frame. Entries past
    /// the cap never run while the registry stays larger than the cap.
    #[default]
    FirstN,
    /// N consecutive entries starting where the previous frame stopped,
    /// wrapping around, so every entry eventually gets a turn.
    RoundRobin,
}

impl FrameSchedule {
    /// Registry indices to visit, in order. `cursor` is the running count
    /// of visits made by earlier frames.
    pub fn visits(self, len: usize, cap: usize, cursor: usize) -> impl Iterator<Item = usize> {
        let count = len.min(cap);
        let start = match self {
            Self::RoundRobin if len > 0 => cursor % len,
            _ => 0,
        };
        (0..count).map(move |i| (start + i) % len)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_n_always_starts_at_zero() {
        let v: Vec<_> = FrameSchedule::FirstN.visits(5, 3, 7).collect();
        assert_eq!(v, vec![0, 1, 2]);
        let v: Vec<_> = FrameSchedule::FirstN.visits(2, 10, 0).collect();
        assert_eq!(v, vec![0, 1]);
    }

    #[test]
    fn round_robin_wraps() {
        let v: Vec<_> = FrameSchedule::RoundRobin.visits(5, 3, 3).collect();
        assert_eq!(v, vec![3, 4, 0]);
        let v: Vec<_> = FrameSchedule::RoundRobin.visits(5, 3, 6).collect();
        assert_eq!(v, vec![1, 2, 3]);
    }

    #[test]
    fn empty_registry_visits_nothing() {
        assert_eq!(FrameSchedule::RoundRobin.visits(0, 4, 9).count(), 0);
        assert_eq!(FrameSchedule::FirstN.visits(3, 0, 0).count(), 0);
    }

    #[test]
    fn serializes_snake_case() {
        let json = serde_json::to_string(&FrameSchedule::RoundRobin).unwrap();
        assert_eq!(json, "\"round_robin\"");
    }
}
