//! Orbis is the geometry kernel of an OGC geometry service. It does two things every renderer and encoder of the
//! service relies on:
//!
//! * [`linearize`] turns curved geometries (arcs, circles, arc strings and rings or polygons made of them) into line
//!   strings with a caller chosen number of points per arc.
//! * [`registry`] resolves CRS identifiers in any of the common OGC spellings into concrete definitions. Geometry
//!   carries lazily resolved [`CrsRef`](orbis_types::geo::CrsRef)s that are created by the registry and resolved
//!   against it on first use.
//!
//! Geometry and CRS types live in the [`orbis_types`] crate, which is re-exported.
//!
//! ```
//! use std::sync::Arc;
//! use orbis::registry::CrsRegistry;
//!
//! let registry = Arc::new(CrsRegistry::default());
//! let web_mercator = registry.crs_ref("urn:ogc:def:crs:EPSG::900913", false);
//! assert_eq!(web_mercator.resolve().unwrap().name(), "WGS 84 / Pseudo-Mercator");
//! ```

pub use orbis_types;

pub mod error;
pub mod linearize;
pub mod registry;

pub use error::LinearizationError;
pub use linearize::{CurveLinearizer, LinearizationCriterion};
pub use registry::{CrsRegistry, RegistryConfig};

#[cfg(test)]
pub(crate) mod tests;
