#![allow(clippy::unwrap_used)]

mod common;

use approx::assert_relative_eq;
use storeys::config::{FloorOptions, GeometryFailurePolicy};
use storeys::document::{ElementKey, ModelEvent};
use storeys::error::{ArgumentError, GeometryError};
use storeys::nodes::create_floors;
use storeys::operations::creation::MakeFace;
use storeys::topology::TopologyStore;
use storeys::StoreysError;

use common::{document, init_tracing, rect_wire, slab, story};

fn level_events(journal: &[ModelEvent]) -> usize {
    journal
        .iter()
        .filter(|e| {
            matches!(
                e,
                ModelEvent::LevelCreated { .. } | ModelEvent::LevelElevationChanged { .. }
            )
        })
        .count()
}

#[test]
fn one_bucket_per_building_floor() {
    init_tracing();
    let (mut doc, types) = document();
    let mut store = TopologyStore::new();
    let floors = vec![
        Some(story(&mut store, 2, 3_048.0)),
        Some(story(&mut store, 1, 6_096.0)),
        Some(story(&mut store, 3, 9_144.0)),
    ];

    let batch = create_floors(
        &mut doc,
        &store,
        Some(floors),
        Some(types.slab),
        Some("L"),
        &FloorOptions::default(),
    )
    .unwrap();

    let sizes: Vec<usize> = batch.floors.iter().map(Vec::len).collect();
    assert_eq!(sizes, vec![2, 1, 3]);
    assert!(batch.failures.is_empty());
    assert_eq!(doc.floor_count(), 6);
    for bucket in &batch.floors {
        assert!(bucket.iter().all(|f| f.level == bucket[0].level));
    }
}

#[test]
fn levels_are_named_from_prefix() {
    init_tracing();
    let (mut doc, types) = document();
    let mut store = TopologyStore::new();
    let floors = vec![Some(story(&mut store, 1, 0.0)), Some(story(&mut store, 1, 3_048.0))];

    let batch = create_floors(
        &mut doc,
        &store,
        Some(floors),
        Some(types.slab),
        Some("L"),
        &FloorOptions::default(),
    )
    .unwrap();

    let names: Vec<&str> = batch
        .floors
        .iter()
        .map(|bucket| doc.level(bucket[0].level).unwrap().name.as_str())
        .collect();
    assert_eq!(names, vec!["L 1", "L 2"]);
    let upper = doc.level(batch.floors[1][0].level).unwrap();
    assert_relative_eq!(upper.elevation, 10.0, epsilon = 1e-9);
}

#[test]
fn default_prefix_comes_from_options() {
    init_tracing();
    let (mut doc, types) = document();
    let mut store = TopologyStore::new();
    let floors = vec![Some(story(&mut store, 1, 0.0))];
    let options = FloorOptions::from_json(r#"{ "level_prefix": "Storey" }"#).unwrap();

    create_floors(&mut doc, &store, Some(floors), Some(types.slab), None, &options).unwrap();
    assert!(doc.level_by_name("Storey 1").is_some());
}

#[test]
fn rerun_reuses_levels_and_moves_them() {
    init_tracing();
    let (mut doc, types) = document();
    let mut store = TopologyStore::new();
    let first = vec![Some(story(&mut store, 1, 3_048.0))];
    let second = vec![Some(story(&mut store, 1, 3_657.6))];
    let options = FloorOptions::default();

    let a = create_floors(
        &mut doc,
        &store,
        Some(first),
        Some(types.slab),
        Some("L"),
        &options,
    )
    .unwrap();
    let b = create_floors(
        &mut doc,
        &store,
        Some(second),
        Some(types.slab),
        Some("L"),
        &options,
    )
    .unwrap();

    let level = a.floors[0][0].level;
    assert_eq!(level, b.floors[0][0].level);
    assert_eq!(doc.level_count(), 1);
    assert_relative_eq!(doc.level(level).unwrap().elevation, 12.0, epsilon = 1e-9);
    // Floors from the first run ride along with the moved level.
    assert_eq!(doc.floors_on(level).len(), 2);
}

#[test]
fn identical_rerun_creates_no_level() {
    init_tracing();
    let (mut doc, types) = document();
    let mut store = TopologyStore::new();
    let floors = vec![Some(story(&mut store, 2, 3_048.0)), Some(story(&mut store, 1, 6_096.0))];
    let options = FloorOptions::default();

    create_floors(
        &mut doc,
        &store,
        Some(floors.clone()),
        Some(types.slab),
        Some("L"),
        &options,
    )
    .unwrap();
    let levels = doc.level_count();
    let before = doc.journal().len();
    create_floors(&mut doc, &store, Some(floors), Some(types.slab), Some("L"), &options).unwrap();

    assert_eq!(doc.level_count(), levels);
    assert_eq!(level_events(&doc.journal()[before..]), 0);
}

#[test]
fn openings_follow_floor_commit() {
    init_tracing();
    let (mut doc, types) = document();
    let mut store = TopologyStore::new();
    let outer = rect_wire(&mut store, 0.0, 0.0, 12_000.0, 9_000.0, 3_048.0);
    let stair = rect_wire(&mut store, 1_000.0, 1_000.0, 3_000.0, 4_000.0, 3_048.0);
    let shaft = rect_wire(&mut store, 8_000.0, 5_000.0, 10_000.0, 7_000.0, 3_048.0);
    let face = MakeFace::new(outer, vec![stair, shaft]).execute(&mut store).unwrap();
    let floors = vec![Some(storeys::floors::BuildingFloor::new(vec![face]))];

    let batch = create_floors(
        &mut doc,
        &store,
        Some(floors),
        Some(types.slab),
        Some("L"),
        &FloorOptions::default(),
    )
    .unwrap();

    let element = &batch.floors[0][0];
    assert_eq!(element.openings.len(), 2);
    assert_eq!(doc.floor(element.floor).unwrap().openings, element.openings);

    let journal = doc.journal();
    let created = journal
        .iter()
        .position(|e| matches!(e, ModelEvent::FloorCreated { id, .. } if *id == element.floor))
        .unwrap();
    let committed = journal
        .iter()
        .skip(created)
        .position(|e| matches!(e, ModelEvent::Committed { .. }))
        .unwrap()
        + created;
    for (i, event) in journal.iter().enumerate() {
        if let ModelEvent::OpeningCreated { floor, .. } = event {
            assert_eq!(*floor, element.floor);
            assert!(i > committed, "opening created before its floor was committed");
        }
    }
    assert!(element
        .openings
        .iter()
        .all(|&o| doc.is_committed(ElementKey::Opening(o))));
}

#[test]
fn absent_floors_create_nothing() {
    init_tracing();
    let (mut doc, types) = document();
    let store = TopologyStore::new();
    let before = doc.journal().len();

    let result = create_floors(
        &mut doc,
        &store,
        None,
        Some(types.slab),
        Some("L"),
        &FloorOptions::default(),
    );

    assert!(matches!(result, Err(StoreysError::Argument(ArgumentError::MissingInput(_)))));
    assert_eq!(doc.journal().len(), before);
    assert_eq!(doc.level_count(), 0);
    assert_eq!(doc.floor_count(), 0);
}

#[test]
fn wall_type_fails_before_any_level_event() {
    init_tracing();
    let (mut doc, types) = document();
    let mut store = TopologyStore::new();
    let floors = vec![Some(story(&mut store, 1, 0.0))];

    let result = create_floors(
        &mut doc,
        &store,
        Some(floors),
        Some(types.wall),
        Some("L"),
        &FloorOptions::default(),
    );

    assert!(matches!(
        result,
        Err(StoreysError::Argument(ArgumentError::UnrecognizedFloorType { .. }))
    ));
    assert_eq!(level_events(doc.journal()), 0);
    assert_eq!(doc.floor_count(), 0);
}

#[test]
fn foundation_slab_and_configured_default_are_accepted() {
    init_tracing();
    let (mut doc, types) = document();
    let mut store = TopologyStore::new();

    let floors = vec![Some(story(&mut store, 1, 0.0))];
    let batch = create_floors(
        &mut doc,
        &store,
        Some(floors),
        Some(types.foundation),
        Some("F"),
        &FloorOptions::default(),
    )
    .unwrap();
    assert_eq!(doc.floor(batch.floors[0][0].floor).unwrap().floor_type, types.foundation);

    let floors = vec![Some(story(&mut store, 1, 0.0))];
    let options = FloorOptions::default().with_default_floor_type("Generic 300mm");
    let batch = create_floors(&mut doc, &store, Some(floors), None, Some("G"), &options).unwrap();
    assert_eq!(doc.floor(batch.floors[0][0].floor).unwrap().floor_type, types.slab);
}

#[test]
fn sloped_surface_is_skipped_by_default() {
    init_tracing();
    let (mut doc, types) = document();
    let mut store = TopologyStore::new();
    let good = slab(&mut store, 0.0, 0.0, 3_000.0, 3_000.0, 3_048.0);
    let tilted = {
        let wire = storeys::operations::creation::MakeWire::new(
            vec![
                storeys::math::Point3::new(5_000.0, 0.0, 3_048.0),
                storeys::math::Point3::new(8_000.0, 0.0, 3_048.0),
                storeys::math::Point3::new(8_000.0, 3_000.0, 2_000.0),
                storeys::math::Point3::new(5_000.0, 3_000.0, 2_000.0),
            ],
            true,
        )
        .execute(&mut store)
        .unwrap();
        MakeFace::new(wire, vec![]).execute(&mut store).unwrap()
    };
    let floors = vec![Some(storeys::floors::BuildingFloor::new(vec![tilted, good]))];

    let batch = create_floors(
        &mut doc,
        &store,
        Some(floors.clone()),
        Some(types.slab),
        Some("L"),
        &FloorOptions::default(),
    )
    .unwrap();
    assert_eq!(batch.floors[0].len(), 1);
    assert!(matches!(batch.failures[0].error, GeometryError::NotHorizontal { .. }));

    let abort = FloorOptions::default().with_failure_policy(GeometryFailurePolicy::AbortBatch);
    let result = create_floors(&mut doc, &store, Some(floors), Some(types.slab), Some("M"), &abort);
    assert!(matches!(result, Err(StoreysError::Surface { floor: 0, surface: 0, .. })));
    // The level was created and committed before the failing surface.
    assert!(doc
        .level_by_name("M 1")
        .is_some_and(|id| doc.is_committed(ElementKey::Level(id))));
}
