#![allow(dead_code, clippy::unwrap_used)]

use storeys::document::{scoped_transaction, Document, ElementTypeData, ElementTypeId, TypeFamily};
use storeys::floors::BuildingFloor;
use storeys::math::Point3;
use storeys::operations::creation::{MakeFace, MakeWire};
use storeys::topology::{FaceId, TopologyStore, WireId};
use storeys::StoreysError;

/// Installs a test-writer subscriber once; `RUST_LOG` raises the level.
pub fn init_tracing() {
    let env_filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive(tracing_subscriber::filter::LevelFilter::WARN.into());
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_test_writer()
        .try_init();
}

pub struct Types {
    pub slab: ElementTypeId,
    pub foundation: ElementTypeId,
    pub wall: ElementTypeId,
}

/// A document holding a floor, a foundation slab and a wall type.
pub fn document() -> (Document, Types) {
    let mut doc = Document::new();
    let types = scoped_transaction(&mut doc, "Load Types", |tx| {
        let mut add = |name: &str, family| {
            tx.add_element_type(ElementTypeData {
                name: name.into(),
                family,
            })
        };
        Ok::<_, StoreysError>(Types {
            slab: add("Generic 300mm", TypeFamily::Floor),
            foundation: add("Foundation 450mm", TypeFamily::FoundationSlab),
            wall: add("Basic Wall", TypeFamily::Wall),
        })
    })
    .unwrap();
    (doc, types)
}

pub fn rect_wire(store: &mut TopologyStore, x0: f64, y0: f64, x1: f64, y1: f64, z: f64) -> WireId {
    MakeWire::new(
        vec![
            Point3::new(x0, y0, z),
            Point3::new(x1, y0, z),
            Point3::new(x1, y1, z),
            Point3::new(x0, y1, z),
        ],
        true,
    )
    .execute(store)
    .unwrap()
}

/// A horizontal rectangular surface in millimetres.
pub fn slab(store: &mut TopologyStore, x0: f64, y0: f64, x1: f64, y1: f64, z: f64) -> FaceId {
    let wire = rect_wire(store, x0, y0, x1, y1, z);
    MakeFace::new(wire, vec![]).execute(store).unwrap()
}

/// One building floor of `count` side-by-side 3 m slabs at height `z`.
pub fn story(store: &mut TopologyStore, count: usize, z: f64) -> BuildingFloor {
    let surfaces = (0..count)
        .map(|i| {
            #[allow(clippy::cast_precision_loss)]
            let x = i as f64 * 4_000.0;
            slab(store, x, 0.0, x + 3_000.0, 3_000.0, z)
        })
        .collect();
    BuildingFloor::new(surfaces)
}
