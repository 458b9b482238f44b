// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use chrono::{DateTime, TimeZone, Utc};
use mapty::config::Config;
use mapty::db::FileStore;
use mapty::models::{Coords, WorkoutType};
use mapty::services::ExtraInput;
use mapty::{App, WorkoutForm};
use std::path::Path;

/// Fixed creation time so descriptions are predictable.
#[allow(dead_code)]
pub fn test_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 4, 14, 12, 0, 0).unwrap()
}

#[allow(dead_code)]
pub fn berlin() -> Coords {
    Coords::new(52.52, 13.40)
}

#[allow(dead_code)]
pub fn running_form(distance: f64, duration: f64, cadence: f64) -> WorkoutForm {
    WorkoutForm {
        kind: WorkoutType::Running,
        distance,
        duration,
        extra: ExtraInput::cadence(cadence),
    }
}

#[allow(dead_code)]
pub fn cycling_form(distance: f64, duration: f64, elevation_gain: f64) -> WorkoutForm {
    WorkoutForm {
        kind: WorkoutType::Cycling,
        distance,
        duration,
        extra: ExtraInput::elevation_gain(elevation_gain),
    }
}

/// Open a session backed by a file store in `dir`.
#[allow(dead_code)]
pub fn open_app(dir: &Path) -> App {
    let config = Config {
        data_dir: dir.to_path_buf(),
        ..Config::default()
    };
    let store = FileStore::open(dir).expect("Failed to open file store");
    App::open(config, Box::new(store))
}

/// Click the map at `coords` and submit `form`, returning the new id.
#[allow(dead_code)]
pub fn add_workout(app: &mut App, coords: Coords, form: WorkoutForm) -> String {
    app.select_location(coords).expect("Invalid location");
    let submitted = app
        .submit_at(form, test_time())
        .expect("Workout should be created");
    assert!(submitted.save_error.is_none(), "Save should succeed");
    submitted.workout.id
}
