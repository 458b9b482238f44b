// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Session state and the handlers the UI calls into.
//!
//! Handles the core workflow:
//! 1. Load stored workouts and rehydrate them into the ledger
//! 2. Remember where the user clicked on the map
//! 3. Validate the submitted form and create a workout
//! 4. Append it to the ledger and save (best effort)
//! 5. Hand render data back to the map and list collaborators

use chrono::{DateTime, Utc};
use geojson::{Feature, FeatureCollection};

use crate::config::Config;
use crate::db::KeyValueStore;
use crate::error::{AppError, Result, ValidationError};
use crate::models::{Coords, Workout, WorkoutType, WorkoutView};
use crate::services::{
    map, ExtraInput, Ledger, PersistenceAdapter, PersistenceError, Reconciler,
    ReconciliationSkip, WorkoutFactory, WorkoutInput,
};

/// Values typed into the workout form. The location comes from the
/// preceding map click.
#[derive(Debug, Clone, PartialEq)]
pub struct WorkoutForm {
    pub kind: WorkoutType,
    pub distance: f64,
    pub duration: f64,
    pub extra: ExtraInput,
}

/// Where the map should move when a list entry is selected.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PanTarget {
    pub coords: Coords,
    pub zoom: u8,
}

/// Result of loading stored history.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LoadReport {
    pub restored: usize,
    pub skipped: Vec<ReconciliationSkip>,
}

/// A newly created workout and what became of saving it.
#[derive(Debug)]
pub struct Submitted {
    pub workout: WorkoutView,
    pub marker: Feature,
    /// Set when the ledger could not be written. The workout stays in
    /// memory for the rest of the session regardless.
    pub save_error: Option<PersistenceError>,
}

/// All state for one user session.
pub struct App {
    config: Config,
    store: Box<dyn KeyValueStore>,
    persistence: PersistenceAdapter,
    factory: WorkoutFactory,
    ledger: Ledger,
    /// Set once the user's position is known and the map is shown
    map_center: Option<Coords>,
    /// Last map click, consumed by a successful submit
    pending_location: Option<Coords>,
}

impl App {
    /// Start a session and load any stored history.
    pub fn open(config: Config, store: Box<dyn KeyValueStore>) -> Self {
        let persistence = PersistenceAdapter::new(config.storage_key.clone());
        let mut app = Self {
            config,
            store,
            persistence,
            factory: WorkoutFactory::new(),
            ledger: Ledger::new(),
            map_center: None,
            pending_location: None,
        };
        app.reload();
        app
    }

    /// Replace the ledger with what is in storage.
    pub fn reload(&mut self) -> LoadReport {
        let records = self.persistence.load(&*self.store);
        let rehydrated = Reconciler::rehydrate(&records);

        self.ledger.clear();
        self.ledger.extend(rehydrated.workouts);
        self.factory.observe_existing(self.ledger.all());

        tracing::info!(
            count = self.ledger.len(),
            skipped = rehydrated.skipped.len(),
            "Workout history loaded"
        );

        LoadReport {
            restored: self.ledger.len(),
            skipped: rehydrated.skipped,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    pub fn workout(&self, id: &str) -> Result<&Workout> {
        self.ledger
            .find_by_id(id)
            .ok_or_else(|| AppError::NotFound(id.to_string()))
    }

    /// Render data for every workout, in display order.
    pub fn views(&self) -> Vec<WorkoutView> {
        self.ledger.all().map(WorkoutView::from).collect()
    }

    pub fn markers(&self) -> FeatureCollection {
        map::markers(self.ledger.all())
    }

    // ─── Map ─────────────────────────────────────────────────────

    /// The user's position is known: show the map there and return the
    /// markers for the loaded history.
    pub fn position_acquired(&mut self, coords: Coords) -> Result<FeatureCollection> {
        if !coords.is_finite() {
            return Err(ValidationError::new("coords", "must be finite numbers").into());
        }
        tracing::info!(lat = coords.lat, lng = coords.lng, "Position acquired");
        self.map_center = Some(coords);
        Ok(self.markers())
    }

    /// Geolocation failed. The list still works; the map stays hidden.
    pub fn position_failed(&mut self) {
        tracing::warn!("Could not get position, map unavailable");
        self.map_center = None;
    }

    pub fn map_ready(&self) -> bool {
        self.map_center.is_some()
    }

    /// Remember a map click; the form is shown for this location.
    pub fn select_location(&mut self, coords: Coords) -> Result<()> {
        if !coords.is_finite() {
            return Err(ValidationError::new("coords", "must be finite numbers").into());
        }
        self.pending_location = Some(coords);
        Ok(())
    }

    pub fn pending_location(&self) -> Option<Coords> {
        self.pending_location
    }

    // ─── Workouts ────────────────────────────────────────────────

    /// Create a workout at the last clicked location.
    pub fn submit(&mut self, form: WorkoutForm) -> Result<Submitted> {
        self.submit_at(form, Utc::now())
    }

    /// `submit` with an explicit creation time.
    pub fn submit_at(&mut self, form: WorkoutForm, now: DateTime<Utc>) -> Result<Submitted> {
        let coords = self
            .pending_location
            .ok_or_else(|| ValidationError::new("coords", "no location selected on the map"))?;

        let input = WorkoutInput {
            kind: form.kind,
            coords,
            distance: form.distance,
            duration: form.duration,
            extra: form.extra,
        };
        let workout = self.factory.create(&input, now)?;

        let view = WorkoutView::from(&workout);
        let marker = map::marker_feature(&workout);
        tracing::info!(id = %view.id, kind = %view.kind, "Workout added");

        self.ledger.append(workout);
        self.pending_location = None;

        Ok(Submitted {
            workout: view,
            marker,
            save_error: self.save().err(),
        })
    }

    /// A list entry was clicked: count it and return where to pan.
    ///
    /// Returns `None` while the map is not shown yet.
    pub fn select_workout(&mut self, id: &str) -> Result<Option<PanTarget>> {
        if !self.map_ready() {
            return Ok(None);
        }

        let coords = self
            .ledger
            .click(id)
            .map(|w| w.coords())
            .ok_or_else(|| AppError::NotFound(id.to_string()))?;

        // Click counts are not worth failing the interaction over
        if let Err(e) = self.save() {
            tracing::warn!(id, error = %e, "Could not save click count");
        }

        Ok(Some(PanTarget {
            coords,
            zoom: self.config.map_zoom,
        }))
    }

    /// Write the ledger to storage. Failures leave the ledger untouched.
    pub fn save(&mut self) -> std::result::Result<(), PersistenceError> {
        self.persistence
            .save(&mut *self.store, &self.ledger)
            .inspect_err(|e| tracing::warn!(error = %e, "Could not save workouts"))
    }

    /// Drop every workout, in memory and in storage.
    pub fn reset(&mut self) -> Result<()> {
        self.ledger.clear();
        self.pending_location = None;
        tracing::info!("Workout history reset");
        self.persistence.clear(&mut *self.store)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::MemoryStore;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 4, 14, 12, 0, 0).unwrap()
    }

    fn run_form() -> WorkoutForm {
        WorkoutForm {
            kind: WorkoutType::Running,
            distance: 5.2,
            duration: 24.0,
            extra: ExtraInput::cadence(178.0),
        }
    }

    #[test]
    fn test_submit_requires_location() {
        let mut app = App::open(Config::default(), Box::new(MemoryStore::new()));

        let err = app.submit_at(run_form(), now()).unwrap_err();
        assert!(matches!(err, AppError::Validation(ref e) if e.field == "coords"));
        assert!(app.ledger().is_empty());
    }

    #[test]
    fn test_failed_validation_keeps_location() {
        let mut app = App::open(Config::default(), Box::new(MemoryStore::new()));
        app.select_location(Coords::new(52.52, 13.40)).unwrap();

        let mut form = run_form();
        form.distance = 0.0;
        assert!(app.submit_at(form, now()).is_err());
        assert_eq!(app.pending_location(), Some(Coords::new(52.52, 13.40)));

        let submitted = app.submit_at(run_form(), now()).unwrap();
        assert!(submitted.save_error.is_none());
        assert_eq!(app.pending_location(), None);
        assert_eq!(app.ledger().len(), 1);
    }

    #[test]
    fn test_select_workout_before_map_is_ignored() {
        let mut app = App::open(Config::default(), Box::new(MemoryStore::new()));
        app.select_location(Coords::new(52.52, 13.40)).unwrap();
        let id = app.submit_at(run_form(), now()).unwrap().workout.id;

        assert_eq!(app.select_workout(&id).unwrap(), None);
        assert_eq!(app.workout(&id).unwrap().clicks(), 0);
    }

    #[test]
    fn test_select_unknown_workout() {
        let mut app = App::open(Config::default(), Box::new(MemoryStore::new()));
        app.position_acquired(Coords::new(0.0, 0.0)).unwrap();

        assert!(matches!(
            app.select_workout("nope"),
            Err(AppError::NotFound(_))
        ));
    }
}
