// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Mapty: log running and cycling workouts on a map
//!
//! This crate provides the workout model, the in-memory ledger, and the
//! local persistence that carries the ledger across sessions. Map and list
//! rendering live outside the crate and consume `WorkoutView`s and GeoJSON
//! markers.

pub mod app;
pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod services;
pub mod time_utils;

pub use app::{App, LoadReport, PanTarget, Submitted, WorkoutForm};
