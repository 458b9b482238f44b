// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Workout record model and derived metrics.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ValidationError;
use crate::time_utils::format_month_day;

/// Workout discriminant, persisted as the `type` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WorkoutType {
    Running,
    Cycling,
}

impl WorkoutType {
    pub fn as_str(&self) -> &'static str {
        match self {
            WorkoutType::Running => "running",
            WorkoutType::Cycling => "cycling",
        }
    }

    /// Capitalized name used in descriptions ("Running").
    pub fn label(&self) -> &'static str {
        match self {
            WorkoutType::Running => "Running",
            WorkoutType::Cycling => "Cycling",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            WorkoutType::Running => "🏃",
            WorkoutType::Cycling => "🚴",
        }
    }
}

impl fmt::Display for WorkoutType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WorkoutType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "running" => Ok(WorkoutType::Running),
            "cycling" => Ok(WorkoutType::Cycling),
            other => Err(ValidationError::new(
                "type",
                format!("unknown workout type '{}'", other),
            )),
        }
    }
}

/// A map position as a (latitude, longitude) pair.
///
/// Serialized as a two-element array `[lat, lng]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 2]", into = "[f64; 2]")]
pub struct Coords {
    pub lat: f64,
    pub lng: f64,
}

impl Coords {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    pub fn is_finite(&self) -> bool {
        self.lat.is_finite() && self.lng.is_finite()
    }

    /// Geometry point (x = longitude, y = latitude).
    pub fn to_point(&self) -> geo::Point<f64> {
        geo::Point::new(self.lng, self.lat)
    }
}

impl From<[f64; 2]> for Coords {
    fn from([lat, lng]: [f64; 2]) -> Self {
        Self { lat, lng }
    }
}

impl From<Coords> for [f64; 2] {
    fn from(coords: Coords) -> Self {
        [coords.lat, coords.lng]
    }
}

/// Validated variant-specific input, before the metric is derived.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum WorkoutExtra {
    Running { cadence: u32 },
    Cycling { elevation_gain: f64 },
}

/// Variant-specific fields plus the eagerly derived metric.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum WorkoutKind {
    Running {
        /// Steps per minute
        cadence: u32,
        /// Minutes per km
        pace: f64,
    },
    Cycling {
        /// Meters climbed
        elevation_gain: f64,
        /// km/h
        speed: f64,
    },
}

impl WorkoutKind {
    /// Derive the metric for a variant from the shared base fields.
    pub fn derive(extra: WorkoutExtra, distance: f64, duration: f64) -> Self {
        match extra {
            WorkoutExtra::Running { cadence } => WorkoutKind::Running {
                cadence,
                pace: pace(distance, duration),
            },
            WorkoutExtra::Cycling { elevation_gain } => WorkoutKind::Cycling {
                elevation_gain,
                speed: speed(distance, duration),
            },
        }
    }

    pub fn workout_type(&self) -> WorkoutType {
        match self {
            WorkoutKind::Running { .. } => WorkoutType::Running,
            WorkoutKind::Cycling { .. } => WorkoutType::Cycling,
        }
    }
}

/// Running pace in minutes per km.
pub fn pace(distance_km: f64, duration_min: f64) -> f64 {
    duration_min / distance_km
}

/// Cycling speed in km/h.
pub fn speed(distance_km: f64, duration_min: f64) -> f64 {
    distance_km / (duration_min / 60.0)
}

/// A logged workout.
///
/// Fields are fixed at construction; only the click counter changes
/// afterwards. Records are built by `WorkoutFactory` or `Reconciler`.
#[derive(Debug, Clone, PartialEq)]
pub struct Workout {
    id: String,
    created_at: DateTime<Utc>,
    coords: Coords,
    distance: f64,
    duration: f64,
    description: String,
    clicks: u32,
    kind: WorkoutKind,
}

impl Workout {
    /// Build a fresh record. Inputs must already be validated.
    pub(crate) fn new(
        id: String,
        created_at: DateTime<Utc>,
        coords: Coords,
        distance: f64,
        duration: f64,
        extra: WorkoutExtra,
    ) -> Self {
        let kind = WorkoutKind::derive(extra, distance, duration);
        Self {
            description: describe(kind.workout_type(), created_at),
            id,
            created_at,
            coords,
            distance,
            duration,
            clicks: 0,
            kind,
        }
    }

    /// Carry over state that is not derived: the click counter and the
    /// description text that was shown when the record was created.
    pub(crate) fn with_restored(mut self, clicks: u32, description: Option<String>) -> Self {
        self.clicks = clicks;
        if let Some(description) = description.filter(|d| !d.is_empty()) {
            self.description = description;
        }
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn coords(&self) -> Coords {
        self.coords
    }

    /// Distance in km
    pub fn distance(&self) -> f64 {
        self.distance
    }

    /// Duration in minutes
    pub fn duration(&self) -> f64 {
        self.duration
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn clicks(&self) -> u32 {
        self.clicks
    }

    pub fn kind(&self) -> &WorkoutKind {
        &self.kind
    }

    pub fn workout_type(&self) -> WorkoutType {
        self.kind.workout_type()
    }

    /// Pace for running workouts.
    pub fn pace(&self) -> Option<f64> {
        match self.kind {
            WorkoutKind::Running { pace, .. } => Some(pace),
            WorkoutKind::Cycling { .. } => None,
        }
    }

    /// Speed for cycling workouts.
    pub fn speed(&self) -> Option<f64> {
        match self.kind {
            WorkoutKind::Cycling { speed, .. } => Some(speed),
            WorkoutKind::Running { .. } => None,
        }
    }

    /// Record a user interaction with the rendered entry.
    pub fn click(&mut self) {
        self.clicks = self.clicks.saturating_add(1);
    }
}

/// "<Capitalized type> on <Month name> <day>"
fn describe(kind: WorkoutType, created_at: DateTime<Utc>) -> String {
    format!("{} on {}", kind.label(), format_month_day(created_at))
}
