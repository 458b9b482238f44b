// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - business logic layer.

pub mod factory;
pub mod ledger;
pub mod map;
pub mod persistence;
pub mod reconcile;

pub use factory::{ExtraInput, IdGenerator, WorkoutFactory, WorkoutInput};
pub use ledger::Ledger;
pub use persistence::{FlatRecord, PersistenceAdapter, PersistenceError};
pub use reconcile::{Reconciler, ReconciliationSkip, Rehydrated, SkipReason};
