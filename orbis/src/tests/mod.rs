use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use orbis_types::error::CrsError;
use orbis_types::geo::{CrsCode, CrsObject, CrsRef, CrsResolver};
use orbis_types::segment::SegmentType;
use orbis_types::{pt, Curve, CurveSegment, Ring, UnsupportedSegment};

use crate::registry::{CrsStore, MemoryCrsStore, StoreEntry};

pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Counterclockwise quarter of the unit circle from `(1, 0)` to `(0, 1)`.
pub fn quarter_arc() -> orbis_types::Arc {
    orbis_types::Arc::new(
        pt!(1.0, 0.0),
        pt!(0.5f64.sqrt(), 0.5f64.sqrt()),
        pt!(0.0, 1.0),
    )
    .unwrap()
}

/// Unit circle as a ring of an upper and a lower half arc.
pub fn ring_of_two_halves() -> Curve {
    let upper = orbis_types::Arc::new(pt!(1.0, 0.0), pt!(0.0, 1.0), pt!(-1.0, 0.0)).unwrap();
    let lower = orbis_types::Arc::new(pt!(-1.0, 0.0), pt!(0.0, -1.0), pt!(1.0, 0.0)).unwrap();

    Curve::Ring(
        Ring::new(
            vec![
                Curve::from_segments(vec![CurveSegment::Arc(upper)]).unwrap(),
                Curve::from_segments(vec![CurveSegment::Arc(lower)]).unwrap(),
            ],
            None,
        )
        .unwrap(),
    )
}

pub fn unsupported_segment(segment_type: SegmentType) -> CurveSegment {
    CurveSegment::Unsupported(
        UnsupportedSegment::new(
            segment_type,
            vec![pt!(0.0, 1.0), pt!(1.0, 2.0), pt!(2.0, 1.0), pt!(3.0, 3.0)],
        )
        .unwrap(),
    )
}

/// Resolver over the definitions of the built-in store that counts how often it is asked.
pub struct CountingResolver {
    store: MemoryCrsStore,
    calls: AtomicUsize,
}

impl CountingResolver {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            store: MemoryCrsStore::builtin(),
            calls: AtomicUsize::new(0),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl CrsResolver for CountingResolver {
    fn resolve(&self, uri: &str, _base_url: Option<&str>) -> Result<Option<CrsObject>, CrsError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match self.store.get(&CrsCode::parse(uri)?) {
            Some(StoreEntry::Definition(crs)) => Ok(Some(CrsObject::Crs(crs))),
            _ => Ok(None),
        }
    }
}

/// Unresolved reference to `EPSG:4326` backed by a [`CountingResolver`].
pub fn sample_crs_ref() -> CrsRef {
    CrsRef::new("EPSG:4326", CountingResolver::new())
}
