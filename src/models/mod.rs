// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Data models for the application.

pub mod view;
pub mod workout;

pub use view::{DetailRow, ViewMetrics, WorkoutView};
pub use workout::{Coords, Workout, WorkoutExtra, WorkoutKind, WorkoutType};
