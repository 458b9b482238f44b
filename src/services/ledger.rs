// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! In-memory workout ledger, the session's source of truth.

use crate::models::Workout;

/// Ordered workout collection. Insertion order is display order.
///
/// Ids are not deduplicated; lookups return the first match.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Ledger {
    workouts: Vec<Workout>,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a workout at the end.
    pub fn append(&mut self, workout: Workout) {
        self.workouts.push(workout);
    }

    pub fn find_by_id(&self, id: &str) -> Option<&Workout> {
        self.workouts.iter().find(|w| w.id() == id)
    }

    /// Register a click on the first workout with `id`.
    pub fn click(&mut self, id: &str) -> Option<&Workout> {
        let workout = self.workouts.iter_mut().find(|w| w.id() == id)?;
        workout.click();
        Some(workout)
    }

    /// Read-only view in insertion order. The iterator is `Clone`, so it
    /// can be restarted.
    pub fn all(&self) -> impl ExactSizeIterator<Item = &Workout> + Clone + '_ {
        self.workouts.iter()
    }

    pub fn len(&self) -> usize {
        self.workouts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.workouts.is_empty()
    }

    /// Remove every workout.
    pub fn clear(&mut self) {
        self.workouts.clear();
    }
}

impl Extend<Workout> for Ledger {
    fn extend<I: IntoIterator<Item = Workout>>(&mut self, iter: I) {
        self.workouts.extend(iter);
    }
}

impl FromIterator<Workout> for Ledger {
    fn from_iter<I: IntoIterator<Item = Workout>>(iter: I) -> Self {
        Self {
            workouts: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Coords, WorkoutExtra};
    use chrono::{TimeZone, Utc};

    fn workout(id: &str, distance: f64) -> Workout {
        Workout::new(
            id.to_string(),
            Utc.with_ymd_and_hms(2024, 4, 14, 12, 0, 0).unwrap(),
            Coords::new(52.52, 13.40),
            distance,
            30.0,
            WorkoutExtra::Running { cadence: 170 },
        )
    }

    #[test]
    fn test_append_keeps_insertion_order() {
        let mut ledger = Ledger::new();
        ledger.append(workout("0000000003", 3.0));
        ledger.append(workout("0000000001", 1.0));
        ledger.append(workout("0000000002", 2.0));

        let ids: Vec<&str> = ledger.all().map(|w| w.id()).collect();
        assert_eq!(ids, vec!["0000000003", "0000000001", "0000000002"]);
    }

    #[test]
    fn test_find_by_id_returns_first_duplicate() {
        let mut ledger = Ledger::new();
        ledger.append(workout("0000000001", 1.0));
        ledger.append(workout("0000000001", 2.0));

        let found = ledger.find_by_id("0000000001").unwrap();
        assert_eq!(found.distance(), 1.0);
        assert!(ledger.find_by_id("0000000009").is_none());
    }

    #[test]
    fn test_all_is_restartable() {
        let ledger: Ledger = vec![workout("0000000001", 1.0), workout("0000000002", 2.0)]
            .into_iter()
            .collect();

        let view = ledger.all();
        let first: Vec<_> = view.clone().map(|w| w.id().to_string()).collect();
        let second: Vec<_> = view.map(|w| w.id().to_string()).collect();
        assert_eq!(first, second);
        assert_eq!(ledger.all().len(), 2);
    }

    #[test]
    fn test_click_updates_first_match_only() {
        let mut ledger = Ledger::new();
        ledger.append(workout("0000000001", 1.0));
        ledger.append(workout("0000000001", 2.0));

        assert_eq!(ledger.click("0000000001").map(|w| w.clicks()), Some(1));
        let clicks: Vec<u32> = ledger.all().map(|w| w.clicks()).collect();
        assert_eq!(clicks, vec![1, 0]);
        assert!(ledger.click("missing").is_none());
    }

    #[test]
    fn test_clear_is_idempotent() {
        let mut ledger = Ledger::new();
        ledger.append(workout("0000000001", 1.0));

        ledger.clear();
        assert!(ledger.is_empty());
        ledger.clear();
        assert_eq!(ledger.len(), 0);
    }
}
