// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Marker export for the map renderer.

use geojson::{Feature, FeatureCollection, Geometry, JsonObject};

use crate::models::{Workout, WorkoutView};

/// Build a GeoJSON point feature for one workout.
///
/// Properties: `id`, `type`, `popup` (popup text), `className` (popup class).
pub fn marker_feature(workout: &Workout) -> Feature {
    let view = WorkoutView::from(workout);
    let point = workout.coords().to_point();

    let mut properties = JsonObject::new();
    properties.insert("id".to_string(), view.id.clone().into());
    properties.insert("type".to_string(), view.kind.as_str().into());
    properties.insert("popup".to_string(), view.popup_content().into());
    properties.insert("className".to_string(), view.popup_class().into());

    Feature {
        bbox: None,
        geometry: Some(Geometry::new(geojson::Value::from(&point))),
        id: Some(geojson::feature::Id::String(view.id)),
        properties: Some(properties),
        foreign_members: None,
    }
}

/// All workout markers in ledger order.
pub fn markers<'a>(workouts: impl IntoIterator<Item = &'a Workout>) -> FeatureCollection {
    FeatureCollection {
        bbox: None,
        features: workouts.into_iter().map(marker_feature).collect(),
        foreign_members: None,
    }
}
