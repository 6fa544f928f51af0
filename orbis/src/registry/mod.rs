//! Registry of CRS definitions that resolves [`CrsRef`]s by code.
//!
//! The registry searches an ordered list of [`CrsStore`]s, the first store knowing a code wins. Codes are normalized
//! with [`CrsCode`], so `EPSG:4326`, `urn:ogc:def:crs:EPSG::4326` and `http://www.opengis.net/def/crs/EPSG/0/4326` all
//! find the same definition. Aliases defined by a store are followed as reference chains.

use std::sync::Arc;

use log::debug;
use orbis_types::error::CrsError;
use orbis_types::geo::{Crs, CrsCode, CrsObject, CrsRef};
use parking_lot::RwLock;
use quick_cache::sync::Cache;
use serde::{Deserialize, Serialize};

mod store;

pub use store::{CrsStore, MemoryCrsStore, StoreEntry};

/// Registry configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegistryConfig {
    /// Maximum number of resolved definitions kept in the lookup cache.
    pub cache_capacity: usize,
    /// Whether [`MemoryCrsStore::builtin`] is added as the first store.
    pub include_builtin: bool,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            cache_capacity: 256,
            include_builtin: true,
        }
    }
}

/// Registry of CRS stores with a lookup cache.
pub struct CrsRegistry {
    stores: RwLock<Vec<Arc<dyn CrsStore>>>,
    cache: Cache<(CrsCode, bool), Arc<Crs>>,
}

impl CrsRegistry {
    /// Creates a new registry.
    pub fn new(config: RegistryConfig) -> Self {
        let mut stores: Vec<Arc<dyn CrsStore>> = vec![];
        if config.include_builtin {
            stores.push(Arc::new(MemoryCrsStore::builtin()));
        }

        Self {
            stores: RwLock::new(stores),
            cache: Cache::new(config.cache_capacity.max(1)),
        }
    }

    /// Appends a store. It is searched after all stores added before.
    pub fn add_store(&self, store: Arc<dyn CrsStore>) {
        debug!("Adding CRS store '{}'", store.id());
        self.stores.write().push(store);
    }

    /// Number of registered stores.
    pub fn store_count(&self) -> usize {
        self.stores.read().len()
    }

    /// Creates an unresolved reference to the CRS with the given identifier.
    ///
    /// The reference resolves against this registry on first use. With `force_xy` the resolved definition has
    /// east/north axis order.
    pub fn crs_ref(self: &Arc<Self>, uri: &str, force_xy: bool) -> CrsRef {
        let registry = self.clone();
        let resolver = move |uri: &str, _base_url: Option<&str>| registry.find(uri, force_xy);
        CrsRef::with_options(uri, None, force_xy, Some(Arc::new(resolver)))
    }

    /// Resolves the identifier to a definition.
    pub fn lookup(self: &Arc<Self>, uri: &str, force_xy: bool) -> Result<Arc<Crs>, CrsError> {
        let key = (CrsCode::parse(uri)?, force_xy);
        if let Some(crs) = self.cache.get(&key) {
            return Ok(crs);
        }

        let crs = self.crs_ref(uri, force_xy).resolve()?;
        self.cache.insert(key, crs.clone());

        Ok(crs)
    }

    /// Whether any store knows the identifier.
    pub fn contains(&self, uri: &str) -> bool {
        CrsCode::parse(uri).is_ok_and(|code| self.entry(&code).is_some())
    }

    /// Codes known to any of the stores, sorted and without duplicates.
    pub fn available_codes(&self) -> Vec<CrsCode> {
        let mut codes: Vec<CrsCode> = self
            .stores
            .read()
            .iter()
            .flat_map(|store| store.available_codes())
            .collect();
        codes.sort();
        codes.dedup();
        codes
    }

    /// Drops all cached definitions.
    pub fn clear_cache(&self) {
        self.cache.clear();
    }

    fn entry(&self, code: &CrsCode) -> Option<StoreEntry> {
        self.stores.read().iter().find_map(|store| {
            let entry = store.get(code)?;
            debug!("CRS {code} found in store '{}'", store.id());
            Some(entry)
        })
    }

    fn find(self: &Arc<Self>, uri: &str, force_xy: bool) -> Result<Option<CrsObject>, CrsError> {
        let code = CrsCode::parse(uri)?;
        if let Some(crs) = self.cache.get(&(code.clone(), force_xy)) {
            return Ok(Some(CrsObject::Crs(crs)));
        }

        Ok(match self.entry(&code) {
            Some(StoreEntry::Definition(crs)) if force_xy && !crs.is_xy_order() => {
                Some(CrsObject::Crs(Arc::new(crs.to_xy_order())))
            }
            Some(StoreEntry::Definition(crs)) => Some(CrsObject::Crs(crs)),
            Some(StoreEntry::Alias(target)) => {
                Some(CrsObject::Reference(self.crs_ref(&target, force_xy)))
            }
            None => {
                debug!("CRS {code} is not known to any store");
                None
            }
        })
    }
}

impl Default for CrsRegistry {
    fn default() -> Self {
        Self::new(RegistryConfig::default())
    }
}

impl std::fmt::Debug for CrsRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let stores: Vec<String> = self
            .stores
            .read()
            .iter()
            .map(|store| store.id().to_string())
            .collect();
        f.debug_struct("CrsRegistry")
            .field("stores", &stores)
            .field("cached", &self.cache.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::init_logger;
    use assert_matches::assert_matches;
    use orbis_types::geo::{AxisOrientation, CrsType, Datum};

    fn registry() -> Arc<CrsRegistry> {
        init_logger();
        Arc::new(CrsRegistry::default())
    }

    #[test]
    fn lookup_by_any_spelling() {
        let registry = registry();
        let expected = registry.lookup("EPSG:4326", false).unwrap();
        for uri in [
            "urn:ogc:def:crs:EPSG::4326",
            "http://www.opengis.net/def/crs/EPSG/0/4326",
            "http://www.opengis.net/gml/srs/epsg.xml#4326",
        ] {
            assert_eq!(registry.lookup(uri, false).unwrap(), expected, "{uri}");
        }
    }

    #[test]
    fn lookup_is_cached() {
        let registry = registry();
        let first = registry.lookup("EPSG:25832", false).unwrap();
        let second = registry.lookup("urn:ogc:def:crs:EPSG::25832", false).unwrap();
        assert!(Arc::ptr_eq(&first, &second));

        registry.clear_cache();
        let third = registry.lookup("EPSG:25832", false).unwrap();
        assert_eq!(first, third);
    }

    #[test]
    fn unknown_codes() {
        let registry = registry();
        assert_matches!(
            registry.lookup("EPSG:1", false),
            Err(CrsError::NotFound(uri)) if uri == "EPSG:1"
        );
        assert_matches!(registry.lookup("", false), Err(CrsError::InvalidCode(_)));
        assert!(!registry.contains("EPSG:1"));
        assert!(registry.contains("EPSG:900913"));
    }

    #[test]
    fn aliases_resolve_through_chain() {
        let registry = registry();
        let alias = registry.crs_ref("EPSG:900913", false);
        let target = registry.crs_ref("EPSG:3857", false);

        assert!(!alias.is_resolved());
        assert_eq!(alias.crs_type().unwrap(), CrsType::Projected);
        assert_eq!(alias.resolve().unwrap().id(), Some("EPSG:3857"));
        assert_eq!(alias.uri(), "EPSG:900913");
        assert_eq!(alias, target);
    }

    #[test]
    fn forced_axis_order() {
        let registry = registry();
        let forced = registry.lookup("EPSG:4326", true).unwrap();
        let plain = registry.lookup("EPSG:4326", false).unwrap();
        assert_eq!(forced.axes()[0].orientation(), AxisOrientation::East);
        assert_eq!(plain.axes()[0].orientation(), AxisOrientation::North);
        assert_ne!(forced, plain);

        let crs84 = registry.crs_ref("urn:ogc:def:crs:OGC:1.3:CRS84", false);
        assert_eq!(registry.crs_ref("EPSG:4326", true), crs84);
        assert_ne!(registry.crs_ref("EPSG:4326", false), crs84);
    }

    fn first_axis_through_outer_resolver(registry: &Arc<CrsRegistry>) -> AxisOrientation {
        let inner = registry.clone();
        let outer = move |_: &str, _: Option<&str>| {
            Ok::<_, CrsError>(Some(CrsObject::Reference(inner.crs_ref("EPSG:4326", true))))
        };
        let crs_ref = CrsRef::new("app:wgs84", Arc::new(outer));
        crs_ref.resolve().unwrap().axes()[0].orientation()
    }

    #[test]
    fn forced_resolution_does_not_depend_on_cache() {
        let cold = registry();
        assert_eq!(first_axis_through_outer_resolver(&cold), AxisOrientation::East);

        let warm = registry();
        warm.lookup("EPSG:4326", true).unwrap();
        assert_eq!(first_axis_through_outer_resolver(&warm), AxisOrientation::East);

        let direct = registry();
        let uncached = direct.find("EPSG:4326", true).unwrap();
        direct.lookup("EPSG:4326", true).unwrap();
        let cached = direct.find("EPSG:4326", true).unwrap();
        let (Some(CrsObject::Crs(uncached)), Some(CrsObject::Crs(cached))) = (uncached, cached)
        else {
            panic!("expected definitions");
        };
        assert_eq!(uncached, cached);
        assert!(uncached.is_xy_order());
    }

    #[test]
    fn compound_definition() {
        let registry = registry();
        let crs_ref = orbis_types::geo::CompoundCrsRef::new(registry.crs_ref("EPSG:5555", true));
        assert_eq!(
            crs_ref.height_axis().unwrap().orientation(),
            AxisOrientation::Up
        );
        assert_eq!(crs_ref.horizontal().unwrap().crs_type(), CrsType::Projected);
    }

    #[test]
    fn custom_stores_are_searched_in_order() {
        let registry = registry();

        let mut custom = MemoryCrsStore::new("custom");
        custom.insert(
            CrsCode::new(Some("EPSG"), "4326"),
            Arc::new(Crs::geographic("Shadowed", Datum::GRS80)),
        );
        custom.insert(
            CrsCode::new(Some("LOCAL"), "1"),
            Arc::new(Crs::geographic("Local", Datum::GRS80)),
        );
        custom.insert_alias(CrsCode::new(Some("LOCAL"), "2"), "urn:ogc:def:crs:EPSG::4258");
        registry.add_store(Arc::new(custom));
        assert_eq!(registry.store_count(), 2);

        assert_eq!(registry.lookup("EPSG:4326", false).unwrap().name(), "WGS 84");
        assert_eq!(registry.lookup("LOCAL:1", false).unwrap().name(), "Local");
        assert_eq!(registry.lookup("LOCAL:2", false).unwrap().name(), "ETRS89");

        let codes = registry.available_codes();
        assert!(codes.contains(&CrsCode::new(Some("LOCAL"), "1")));
        assert_eq!(
            codes.iter().filter(|c| c.code() == "4326").count(),
            1
        );
    }

    #[test]
    fn empty_registry() {
        let registry = Arc::new(CrsRegistry::new(RegistryConfig {
            include_builtin: false,
            ..Default::default()
        }));
        assert_eq!(registry.store_count(), 0);
        assert!(registry.available_codes().is_empty());
        assert_matches!(
            registry.lookup("EPSG:4326", false),
            Err(CrsError::NotFound(_))
        );
    }

    #[test]
    fn concurrent_lookups() {
        let registry = registry();
        let shared = registry.crs_ref("EPSG:900913", true);

        std::thread::scope(|scope| {
            for i in 0..8 {
                let registry = registry.clone();
                let shared = shared.clone();
                scope.spawn(move || {
                    let code = if i % 2 == 0 { "EPSG:3857" } else { "EPSG:900913" };
                    let crs = registry.lookup(code, true).unwrap();
                    assert_eq!(crs, shared.resolve().unwrap());
                });
            }
        });

        assert!(shared.is_resolved());
    }

    #[test]
    fn config_from_json() {
        let config: RegistryConfig = serde_json::from_str(r#"{"cache_capacity": 16}"#).unwrap();
        assert_eq!(
            config,
            RegistryConfig {
                cache_capacity: 16,
                include_builtin: true
            }
        );

        let config: RegistryConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, RegistryConfig::default());
    }
}
