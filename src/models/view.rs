// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Render-ready workout summaries handed to the map and list renderers.

use serde::Serialize;

use crate::models::workout::{Coords, Workout, WorkoutKind, WorkoutType};

/// Everything a renderer needs to draw one marker and one list entry.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutView {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: WorkoutType,
    pub coords: Coords,
    pub description: String,
    pub distance: f64,
    pub duration: f64,
    #[serde(flatten)]
    pub metrics: ViewMetrics,
}

/// Variant-specific values: pace and cadence, or speed and elevation gain.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ViewMetrics {
    Running {
        pace: f64,
        cadence: u32,
    },
    Cycling {
        speed: f64,
        #[serde(rename = "elevationGain")]
        elevation_gain: f64,
    },
}

/// One "icon value unit" row of a list entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DetailRow {
    pub icon: &'static str,
    pub value: String,
    pub unit: &'static str,
}

impl From<&Workout> for WorkoutView {
    fn from(workout: &Workout) -> Self {
        let metrics = match *workout.kind() {
            WorkoutKind::Running { cadence, pace } => ViewMetrics::Running { pace, cadence },
            WorkoutKind::Cycling {
                elevation_gain,
                speed,
            } => ViewMetrics::Cycling {
                speed,
                elevation_gain,
            },
        };

        Self {
            id: workout.id().to_string(),
            kind: workout.workout_type(),
            coords: workout.coords(),
            description: workout.description().to_string(),
            distance: workout.distance(),
            duration: workout.duration(),
            metrics,
        }
    }
}

impl WorkoutView {
    /// Marker popup text, e.g. "🏃 Running on April 14".
    pub fn popup_content(&self) -> String {
        format!("{} {}", self.kind.icon(), self.description)
    }

    /// CSS class of the marker popup.
    pub fn popup_class(&self) -> String {
        format!("{}-popup", self.kind)
    }

    /// List entry rows in display order. Pace and speed use one decimal.
    pub fn details(&self) -> Vec<DetailRow> {
        let mut rows = vec![
            DetailRow {
                icon: self.kind.icon(),
                value: self.distance.to_string(),
                unit: "km",
            },
            DetailRow {
                icon: "⏱",
                value: self.duration.to_string(),
                unit: "min",
            },
        ];

        match self.metrics {
            ViewMetrics::Running { pace, cadence } => {
                rows.push(DetailRow {
                    icon: "⚡️",
                    value: format!("{:.1}", pace),
                    unit: "min/km",
                });
                rows.push(DetailRow {
                    icon: "👣",
                    value: cadence.to_string(),
                    unit: "spm",
                });
            }
            ViewMetrics::Cycling {
                speed,
                elevation_gain,
            } => {
                rows.push(DetailRow {
                    icon: "⚡️",
                    value: format!("{:.1}", speed),
                    unit: "km/h",
                });
                rows.push(DetailRow {
                    icon: "⛰",
                    value: elevation_gain.to_string(),
                    unit: "m",
                });
            }
        }

        rows
    }
}
