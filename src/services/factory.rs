// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Workout creation: input validation and id assignment.

use chrono::{DateTime, Utc};

use crate::error::ValidationError;
use crate::models::{Coords, Workout, WorkoutExtra, WorkoutType};

/// Clock-based ids are the last 10 decimal digits of a millisecond timestamp.
const ID_DIGITS: usize = 10;
const ID_MODULUS: u64 = 10_000_000_000;

/// Raw values from the workout form.
#[derive(Debug, Clone, PartialEq)]
pub struct WorkoutInput {
    pub kind: WorkoutType,
    pub coords: Coords,
    /// km
    pub distance: f64,
    /// minutes
    pub duration: f64,
    pub extra: ExtraInput,
}

/// Variant-specific form fields. Only the one matching the type is read.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ExtraInput {
    pub cadence: Option<f64>,
    pub elevation_gain: Option<f64>,
}

impl ExtraInput {
    pub fn cadence(cadence: f64) -> Self {
        Self {
            cadence: Some(cadence),
            elevation_gain: None,
        }
    }

    pub fn elevation_gain(elevation_gain: f64) -> Self {
        Self {
            cadence: None,
            elevation_gain: Some(elevation_gain),
        }
    }
}

/// Hands out workout ids in strictly increasing numeric order.
///
/// Ids follow the creation-time clock, but two records created within the
/// same millisecond (or after the clock steps back) get `last + 1` instead
/// of a duplicate. The counter never wraps: once it passes the 10-digit range
/// ids simply grow an extra digit.
#[derive(Debug, Default, Clone)]
pub struct IdGenerator {
    last: Option<u64>,
}

impl IdGenerator {
    pub fn next_id(&mut self, now: DateTime<Utc>) -> String {
        let millis = u64::try_from(now.timestamp_millis()).unwrap_or(0) % ID_MODULUS;
        let next = match self.last {
            Some(last) if millis <= last => last.saturating_add(1),
            _ => millis,
        };
        self.last = Some(next);
        format!("{:0width$}", next, width = ID_DIGITS)
    }

    /// Account for an id already in use so later ids are numerically greater.
    /// Ids that are not numeric are ignored.
    pub fn observe(&mut self, id: &str) {
        if let Ok(value) = id.parse::<u64>() {
            self.last = Some(self.last.map_or(value, |last| last.max(value)));
        }
    }
}

/// Validates form input and builds the matching workout variant.
#[derive(Debug, Default, Clone)]
pub struct WorkoutFactory {
    ids: IdGenerator,
}

impl WorkoutFactory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the id generator from records loaded from storage.
    pub fn observe_existing<'a>(&mut self, workouts: impl IntoIterator<Item = &'a Workout>) {
        for workout in workouts {
            self.ids.observe(workout.id());
        }
    }

    /// Create a workout stamped with `now`.
    ///
    /// The derived metric is computed here. On error nothing is created.
    pub fn create(
        &mut self,
        input: &WorkoutInput,
        now: DateTime<Utc>,
    ) -> Result<Workout, ValidationError> {
        let extra = validate(
            input.kind,
            input.coords,
            input.distance,
            input.duration,
            input.extra,
        )?;
        let id = self.ids.next_id(now);

        tracing::debug!(id = %id, kind = %input.kind, "Workout created");

        Ok(Workout::new(
            id,
            now,
            input.coords,
            input.distance,
            input.duration,
            extra,
        ))
    }
}

/// Check every field a workout of `kind` needs.
///
/// Shared with rehydration so stored records meet the same rules as new ones.
pub fn validate(
    kind: WorkoutType,
    coords: Coords,
    distance: f64,
    duration: f64,
    extra: ExtraInput,
) -> Result<WorkoutExtra, ValidationError> {
    if !coords.is_finite() {
        return Err(ValidationError::new("coords", "must be finite numbers"));
    }
    positive("distance", distance)?;
    positive("duration", duration)?;

    match kind {
        WorkoutType::Running => {
            let cadence = extra
                .cadence
                .ok_or_else(|| ValidationError::new("cadence", "is required for running"))?;
            positive("cadence", cadence)?;
            if cadence.fract() != 0.0 || cadence > f64::from(u32::MAX) {
                return Err(ValidationError::new(
                    "cadence",
                    "must be a whole number of steps per minute",
                ));
            }
            Ok(WorkoutExtra::Running {
                cadence: cadence as u32,
            })
        }
        WorkoutType::Cycling => {
            let elevation_gain = extra.elevation_gain.ok_or_else(|| {
                ValidationError::new("elevationGain", "is required for cycling")
            })?;
            if !elevation_gain.is_finite() {
                return Err(ValidationError::new("elevationGain", "must be a number"));
            }
            if elevation_gain < 0.0 {
                return Err(ValidationError::new("elevationGain", "must not be negative"));
            }
            Ok(WorkoutExtra::Cycling { elevation_gain })
        }
    }
}

fn positive(field: &'static str, value: f64) -> Result<(), ValidationError> {
    if !value.is_finite() {
        return Err(ValidationError::new(field, "must be a number"));
    }
    if value <= 0.0 {
        return Err(ValidationError::new(field, "must be greater than zero"));
    }
    Ok(())
}
