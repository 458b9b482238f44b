// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Rebuild typed workouts from flat stored records.
//!
//! Stored records only keep the `type` discriminant as data. For each record
//! we pick the variant from it, re-run the creation checks, and recompute the
//! derived metric from the stored base fields. Stored `pace`/`speed` values,
//! if any, are ignored.

use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::Value;

use crate::error::ValidationError;
use crate::models::{Coords, Workout, WorkoutType};
use crate::services::factory::{validate, ExtraInput};
use crate::services::persistence::FlatRecord;

/// Fields shared by every variant.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredBase {
    id: String,
    #[serde(alias = "date")]
    created_at: DateTime<Utc>,
    coords: Coords,
    distance: f64,
    duration: f64,
    #[serde(default)]
    clicks: u32,
    #[serde(default)]
    description: Option<String>,
}

/// Why a stored record was dropped.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SkipReason {
    #[error("record has no type")]
    MissingType,

    #[error("unknown workout type '{0}'")]
    UnknownType(String),

    #[error("malformed record: {0}")]
    Malformed(String),

    #[error(transparent)]
    Invalid(#[from] ValidationError),
}

/// A stored record that could not be rebuilt.
#[derive(Debug, Clone, PartialEq)]
pub struct ReconciliationSkip {
    /// Position in the stored sequence
    pub index: usize,
    pub id: Option<String>,
    pub reason: SkipReason,
}

/// Output of a rehydration pass.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Rehydrated {
    /// Rebuilt workouts in stored order
    pub workouts: Vec<Workout>,
    pub skipped: Vec<ReconciliationSkip>,
}

/// Turns flat records back into fully-typed workouts.
pub struct Reconciler;

impl Reconciler {
    /// Rebuild every record that can be rebuilt. Bad records are skipped and
    /// reported; they never abort the pass.
    pub fn rehydrate(records: &[FlatRecord]) -> Rehydrated {
        let mut out = Rehydrated::default();

        for (index, record) in records.iter().enumerate() {
            match Self::rehydrate_one(record) {
                Ok(workout) => out.workouts.push(workout),
                Err(reason) => {
                    tracing::warn!(
                        index,
                        id = record.id().unwrap_or(""),
                        reason = %reason,
                        "Skipping stored workout"
                    );
                    out.skipped.push(ReconciliationSkip {
                        index,
                        id: record.id().map(str::to_string),
                        reason,
                    });
                }
            }
        }

        tracing::info!(
            restored = out.workouts.len(),
            skipped = out.skipped.len(),
            "Workouts rehydrated"
        );
        out
    }

    /// Rebuild one record, dispatching on its discriminant.
    pub fn rehydrate_one(record: &FlatRecord) -> Result<Workout, SkipReason> {
        let map = record
            .as_map()
            .ok_or_else(|| SkipReason::Malformed("expected an object".to_string()))?;

        let name = record.kind().ok_or(SkipReason::MissingType)?;
        let kind: WorkoutType = name
            .parse()
            .map_err(|_| SkipReason::UnknownType(name.to_string()))?;

        let base: StoredBase = serde_json::from_value(Value::Object(map.clone()))
            .map_err(|e| SkipReason::Malformed(e.to_string()))?;

        let extra = match kind {
            WorkoutType::Running => ExtraInput {
                cadence: record.get("cadence").and_then(Value::as_f64),
                elevation_gain: None,
            },
            WorkoutType::Cycling => ExtraInput {
                cadence: None,
                elevation_gain: record.get("elevationGain").and_then(Value::as_f64),
            },
        };

        let extra = validate(kind, base.coords, base.distance, base.duration, extra)?;

        Ok(Workout::new(
            base.id,
            base.created_at,
            base.coords,
            base.distance,
            base.duration,
            extra,
        )
        .with_restored(base.clicks, base.description))
    }
}
