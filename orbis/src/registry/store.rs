use std::collections::HashMap;
use std::sync::Arc;

use orbis_types::error::CrsError;
use orbis_types::geo::{Axis, AxisOrientation, Crs, CrsCode, CrsKind, Datum, Projection};

/// What a store knows about a code.
#[derive(Debug, Clone, PartialEq)]
pub enum StoreEntry {
    /// The code identifies this definition.
    Definition(Arc<Crs>),
    /// The code is another name for the given identifier, which must be looked up in turn.
    Alias(String),
}

/// Source of CRS definitions searched by [`CrsRegistry`](super::CrsRegistry).
pub trait CrsStore: Send + Sync {
    /// Identifier of the store, used in log messages.
    fn id(&self) -> &str;

    /// Looks up the code.
    fn get(&self, code: &CrsCode) -> Option<StoreEntry>;

    /// All codes the store knows, including aliases.
    fn available_codes(&self) -> Vec<CrsCode>;
}

/// Store keeping definitions in memory.
#[derive(Debug, Clone)]
pub struct MemoryCrsStore {
    id: String,
    entries: HashMap<CrsCode, StoreEntry, ahash::RandomState>,
}

impl MemoryCrsStore {
    /// Creates an empty store.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            entries: HashMap::default(),
        }
    }

    /// Registers the definition under the code.
    pub fn insert(&mut self, code: CrsCode, crs: Arc<Crs>) {
        self.entries.insert(code, StoreEntry::Definition(crs));
    }

    /// Registers the definition under every one of its identifiers.
    pub fn insert_definition(&mut self, crs: Crs) -> Result<(), CrsError> {
        let codes = crs
            .identifiers()
            .iter()
            .map(|id| CrsCode::parse(id))
            .collect::<Result<Vec<_>, _>>()?;
        if codes.is_empty() {
            return Err(CrsError::InvalidCode(format!(
                "definition '{}' has no identifiers",
                crs.name()
            )));
        }

        let crs = Arc::new(crs);
        for code in codes {
            self.insert(code, crs.clone());
        }

        Ok(())
    }

    /// Registers `code` as another name for `target`.
    pub fn insert_alias(&mut self, code: CrsCode, target: impl Into<String>) {
        self.entries.insert(code, StoreEntry::Alias(target.into()));
    }

    /// Number of registered codes.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the store is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Store with a small set of commonly used definitions.
    pub fn builtin() -> Self {
        let mut store = Self::new("builtin");

        let wgs84 = Crs::geographic("WGS 84", Datum::WGS84).with_identifiers(["EPSG:4326"]);
        let etrs89 = Crs::geographic("ETRS89", Datum::GRS80).with_identifiers(["EPSG:4258"]);
        let crs84 = Crs::geographic("WGS 84 (CRS84)", Datum::WGS84)
            .to_xy_order()
            .with_identifiers(["CRS:84"]);

        let pseudo_mercator = Crs::projected(
            "WGS 84 / Pseudo-Mercator",
            wgs84.clone(),
            Projection::new(
                "Popular_Visualisation_Pseudo_Mercator",
                vec![
                    ("latitude_of_origin".into(), 0.0),
                    ("central_meridian".into(), 0.0),
                    ("false_easting".into(), 0.0),
                    ("false_northing".into(), 0.0),
                ],
            ),
        )
        .with_identifiers(["EPSG:3857"]);

        let utm32 = Crs::projected(
            "ETRS89 / UTM zone 32N",
            etrs89.clone(),
            Projection::new(
                "Transverse_Mercator",
                vec![
                    ("latitude_of_origin".into(), 0.0),
                    ("central_meridian".into(), 9.0),
                    ("scale_factor".into(), 0.9996),
                    ("false_easting".into(), 500_000.0),
                    ("false_northing".into(), 0.0),
                ],
            ),
        )
        .with_identifiers(["EPSG:25832"]);

        let height_axis = Axis::new("H", AxisOrientation::Up);
        let dhhn92 = Crs::new(
            "DHHN92 height",
            CrsKind::Vertical {
                datum_name: "Deutsches Haupthoehennetz 1992".into(),
            },
            vec![height_axis.clone()],
        )
        .with_identifiers(["EPSG:5783"]);

        let geocentric = Crs::new(
            "WGS 84 geocentric",
            CrsKind::Geocentric {
                datum: Datum::WGS84,
            },
            vec![
                Axis::new("X", AxisOrientation::Other),
                Axis::new("Y", AxisOrientation::Other),
                Axis::new("Z", AxisOrientation::Other),
            ],
        )
        .with_identifiers(["EPSG:4978"]);

        let compound = Crs::compound(
            "ETRS89 / UTM zone 32N + DHHN92 height",
            utm32.clone(),
            height_axis,
        )
        .with_identifiers(["EPSG:5555"]);

        for (code, crs) in [
            ("4326", wgs84),
            ("4258", etrs89),
            ("3857", pseudo_mercator),
            ("25832", utm32),
            ("5783", dhhn92),
            ("4978", geocentric),
            ("5555", compound),
        ] {
            store.insert(CrsCode::new(Some("EPSG"), code), Arc::new(crs));
        }

        store.insert(CrsCode::new(Some("CRS"), "84"), Arc::new(crs84));
        store.insert_alias(CrsCode::new(Some("OGC"), "CRS84"), "CRS:84");
        store.insert_alias(CrsCode::new(Some("EPSG"), "900913"), "EPSG:3857");

        store
    }
}

impl CrsStore for MemoryCrsStore {
    fn id(&self) -> &str {
        &self.id
    }

    fn get(&self, code: &CrsCode) -> Option<StoreEntry> {
        self.entries.get(code).cloned()
    }

    fn available_codes(&self) -> Vec<CrsCode> {
        self.entries.keys().cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use orbis_types::geo::CrsType;

    fn code(text: &str) -> CrsCode {
        CrsCode::parse(text).unwrap()
    }

    #[test]
    fn builtin_definitions() {
        let store = MemoryCrsStore::builtin();
        assert_eq!(store.id(), "builtin");
        assert_eq!(store.len(), 10);

        let expected = [
            ("EPSG:4326", CrsType::Geographic, 2),
            ("EPSG:4258", CrsType::Geographic, 2),
            ("CRS:84", CrsType::Geographic, 2),
            ("EPSG:3857", CrsType::Projected, 2),
            ("EPSG:25832", CrsType::Projected, 2),
            ("EPSG:5783", CrsType::Vertical, 1),
            ("EPSG:4978", CrsType::Geocentric, 3),
            ("EPSG:5555", CrsType::Compound, 3),
        ];
        for (id, crs_type, dimension) in expected {
            let Some(StoreEntry::Definition(crs)) = store.get(&code(id)) else {
                panic!("{id} is not defined");
            };
            assert_eq!(crs.crs_type(), crs_type, "{id}");
            assert_eq!(crs.dimension(), dimension, "{id}");
            assert_eq!(crs.id(), Some(id));
        }
    }

    #[test]
    fn builtin_aliases() {
        let store = MemoryCrsStore::builtin();
        assert_eq!(
            store.get(&code("urn:ogc:def:crs:OGC:1.3:CRS84")),
            Some(StoreEntry::Alias("CRS:84".into()))
        );
        assert_eq!(
            store.get(&code("EPSG:900913")),
            Some(StoreEntry::Alias("EPSG:3857".into()))
        );
        assert_eq!(store.get(&code("EPSG:1234")), None);
    }

    #[test]
    fn insert_definition() {
        let mut store = MemoryCrsStore::new("custom");
        assert!(store.is_empty());

        let crs = Crs::geographic("Local", Datum::WGS84)
            .with_identifiers(["urn:ogc:def:crs:EPSG::9999", "LOCAL:1"]);
        store.insert_definition(crs).unwrap();

        assert_eq!(store.len(), 2);
        assert_matches!(store.get(&code("EPSG:9999")), Some(StoreEntry::Definition(_)));
        assert_matches!(store.get(&code("local:1")), Some(StoreEntry::Definition(_)));

        let mut codes = store.available_codes();
        codes.sort();
        assert_eq!(codes, vec![code("EPSG:9999"), code("LOCAL:1")]);

        assert_matches!(
            store.insert_definition(Crs::geographic("Nameless", Datum::WGS84)),
            Err(CrsError::InvalidCode(_))
        );
    }
}
