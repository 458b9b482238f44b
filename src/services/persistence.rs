// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Ledger persistence as a single versioned JSON blob.
//!
//! Blob layout:
//! ```json
//! { "version": 1, "workouts": [ { "type": "running", "id": "...", ... } ] }
//! ```
//! Each workout is a flat key/value object. Derived metrics are not written;
//! they are recomputed on load.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::db::{KeyValueStore, StoreError};
use crate::models::{Coords, Workout, WorkoutKind, WorkoutType};
use crate::services::Ledger;

/// Current blob format. Any other version loads as empty history.
pub const BLOB_VERSION: u32 = 1;

/// A stored workout with its type erased: plain key/value pairs.
///
/// Holds whatever element was stored, so a record that is not an object at
/// all still reaches reconciliation and is reported there.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FlatRecord(Value);

impl FlatRecord {
    /// The `type` discriminant, if present and a string.
    pub fn kind(&self) -> Option<&str> {
        self.0.get("type").and_then(Value::as_str)
    }

    pub fn id(&self) -> Option<&str> {
        self.0.get("id").and_then(Value::as_str)
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// The key/value pairs, or `None` if the stored element is not an object.
    pub fn as_map(&self) -> Option<&Map<String, Value>> {
        self.0.as_object()
    }
}

impl From<Map<String, Value>> for FlatRecord {
    fn from(map: Map<String, Value>) -> Self {
        Self(Value::Object(map))
    }
}

/// Serialized shape of one workout.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct FlatWorkout<'a> {
    #[serde(rename = "type")]
    kind: WorkoutType,
    id: &'a str,
    created_at: DateTime<Utc>,
    coords: Coords,
    distance: f64,
    duration: f64,
    clicks: u32,
    description: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    cadence: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    elevation_gain: Option<f64>,
}

#[derive(Serialize)]
struct EnvelopeOut<'a> {
    version: u32,
    workouts: &'a [FlatRecord],
}

#[derive(Deserialize)]
struct EnvelopeIn {
    version: u32,
    #[serde(default)]
    workouts: Vec<FlatRecord>,
}

/// Flatten one workout into its stored key/value form.
pub fn flatten(workout: &Workout) -> FlatRecord {
    let (cadence, elevation_gain) = match *workout.kind() {
        WorkoutKind::Running { cadence, .. } => (Some(cadence), None),
        WorkoutKind::Cycling { elevation_gain, .. } => (None, Some(elevation_gain)),
    };

    let flat = FlatWorkout {
        kind: workout.workout_type(),
        id: workout.id(),
        created_at: workout.created_at(),
        coords: workout.coords(),
        distance: workout.distance(),
        duration: workout.duration(),
        clicks: workout.clicks(),
        description: workout.description(),
        cadence,
        elevation_gain,
    };

    match serde_json::to_value(flat) {
        Ok(value) => FlatRecord(value),
        // A plain struct always serializes to an object
        Err(_) => FlatRecord::from(Map::new()),
    }
}

/// Encode the whole ledger as a blob.
pub fn serialize(ledger: &Ledger) -> Result<String, PersistenceError> {
    let records: Vec<FlatRecord> = ledger.all().map(flatten).collect();
    let envelope = EnvelopeOut {
        version: BLOB_VERSION,
        workouts: &records,
    };
    Ok(serde_json::to_string(&envelope)?)
}

/// Decode a blob into flat records.
///
/// Unparseable JSON, a missing or unknown version, and a `workouts` field
/// that is not a list all yield an empty list. Individual elements are
/// passed through as-is; bad ones are dropped during reconciliation.
pub fn deserialize(blob: &str) -> Vec<FlatRecord> {
    let envelope: EnvelopeIn = match serde_json::from_str(blob) {
        Ok(envelope) => envelope,
        Err(e) => {
            tracing::warn!(error = %e, "Stored workouts unreadable, starting empty");
            return Vec::new();
        }
    };

    if envelope.version != BLOB_VERSION {
        tracing::warn!(
            version = envelope.version,
            supported = BLOB_VERSION,
            "Unsupported workout blob version, starting empty"
        );
        return Vec::new();
    }

    envelope.workouts
}

/// Moves the ledger to and from one named entry of a key/value store.
///
/// Holds only the entry name; every call reads or writes the store directly.
#[derive(Debug, Clone)]
pub struct PersistenceAdapter {
    key: String,
}

impl PersistenceAdapter {
    pub fn new(key: impl Into<String>) -> Self {
        Self { key: key.into() }
    }

    /// Overwrite the stored blob with the full ledger.
    pub fn save(
        &self,
        store: &mut dyn KeyValueStore,
        ledger: &Ledger,
    ) -> Result<(), PersistenceError> {
        let blob = serialize(ledger)?;
        store.set(&self.key, &blob)?;
        tracing::debug!(key = %self.key, count = ledger.len(), bytes = blob.len(), "Workouts saved");
        Ok(())
    }

    /// Read the stored blob. Absent, unreadable, or malformed data is
    /// treated as no history.
    pub fn load(&self, store: &dyn KeyValueStore) -> Vec<FlatRecord> {
        match store.get(&self.key) {
            Ok(Some(blob)) => deserialize(&blob),
            Ok(None) => Vec::new(),
            Err(e) => {
                tracing::warn!(key = %self.key, error = %e, "Could not read stored workouts");
                Vec::new()
            }
        }
    }

    /// Delete the stored blob.
    pub fn clear(&self, store: &mut dyn KeyValueStore) -> Result<(), PersistenceError> {
        store.remove(&self.key)?;
        Ok(())
    }
}

/// Errors from persistence operations.
#[derive(Debug, thiserror::Error)]
pub enum PersistenceError {
    #[error("Failed to encode workouts: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("Failed to write workouts: {0}")]
    Write(#[from] StoreError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::MemoryStore;
    use crate::models::WorkoutExtra;
    use chrono::TimeZone;

    fn sample_ledger() -> Ledger {
        let created = Utc.with_ymd_and_hms(2024, 4, 14, 12, 0, 0).unwrap();
        let mut ledger = Ledger::new();
        ledger.append(Workout::new(
            "3087000123".to_string(),
            created,
            Coords::new(52.52, 13.40),
            5.2,
            24.0,
            WorkoutExtra::Running { cadence: 178 },
        ));
        ledger.append(Workout::new(
            "3087000124".to_string(),
            created,
            Coords::new(52.50, 13.35),
            27.0,
            95.0,
            WorkoutExtra::Cycling {
                elevation_gain: 250.0,
            },
        ));
        ledger
    }

    #[test]
    fn test_flatten_writes_only_matching_extra() {
        let ledger = sample_ledger();
        let flat: Vec<FlatRecord> = ledger.all().map(flatten).collect();

        assert_eq!(flat[0].kind(), Some("running"));
        assert_eq!(flat[0].get("cadence"), Some(&Value::from(178)));
        assert!(flat[0].get("elevationGain").is_none());
        assert!(flat[0].get("pace").is_none());

        assert_eq!(flat[1].kind(), Some("cycling"));
        assert_eq!(flat[1].get("elevationGain"), Some(&Value::from(250.0)));
        assert!(flat[1].get("cadence").is_none());
        assert!(flat[1].get("speed").is_none());
        assert_eq!(
            flat[1].get("createdAt"),
            Some(&Value::from("2024-04-14T12:00:00Z"))
        );
    }

    #[test]
    fn test_non_object_elements_do_not_hide_valid_records() {
        let mut blob: Value = serde_json::from_str(&serialize(&sample_ledger()).unwrap()).unwrap();
        let workouts = blob["workouts"].as_array_mut().unwrap();
        workouts.insert(1, Value::Null);
        workouts.push(Value::from(42));

        let records = deserialize(&blob.to_string());
        assert_eq!(records.len(), 4);
        assert_eq!(records[0].kind(), Some("running"));
        assert!(records[1].as_map().is_none());
        assert_eq!(records[2].kind(), Some("cycling"));
    }

    #[test]
    fn test_blob_carries_version() {
        let blob = serialize(&sample_ledger()).unwrap();
        let value: Value = serde_json::from_str(&blob).unwrap();
        assert_eq!(value["version"], BLOB_VERSION);
        assert_eq!(value["workouts"].as_array().map(Vec::len), Some(2));
    }

    #[test]
    fn test_deserialize_fails_open() {
        assert!(deserialize("").is_empty());
        assert!(deserialize("{not json").is_empty());
        assert!(deserialize("null").is_empty());
        // Unversioned array from older releases
        assert!(deserialize(r#"[{"type":"running"}]"#).is_empty());
        assert!(deserialize(r#"{"version":2,"workouts":[{"type":"running"}]}"#).is_empty());
    }

    #[test]
    fn test_save_overwrites_and_load_reads_back() {
        let adapter = PersistenceAdapter::new("workouts");
        let mut store = MemoryStore::new();

        adapter.save(&mut store, &sample_ledger()).unwrap();
        adapter.save(&mut store, &Ledger::new()).unwrap();
        assert!(adapter.load(&store).is_empty());

        adapter.save(&mut store, &sample_ledger()).unwrap();
        let first = adapter.load(&store);
        let second = adapter.load(&store);
        assert_eq!(first.len(), 2);
        assert_eq!(first, second);
    }

    #[test]
    fn test_write_failure_is_reported() {
        let adapter = PersistenceAdapter::new("workouts");
        let mut store = MemoryStore::offline();

        let err = adapter.save(&mut store, &sample_ledger()).unwrap_err();
        assert!(matches!(
            err,
            PersistenceError::Write(StoreError::Unavailable)
        ));
        assert!(adapter.load(&store).is_empty());
    }
}
