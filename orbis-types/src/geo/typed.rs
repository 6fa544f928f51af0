use std::ops::Deref;
use std::sync::Arc;

use crate::error::CrsError;
use crate::geo::{Axis, Crs, CrsKind, CrsRef, CrsType, Projection};

fn resolve_as(crs_ref: &CrsRef, expected: CrsType) -> Result<Arc<Crs>, CrsError> {
    let crs = crs_ref.resolve()?;
    let actual = crs.crs_type();
    if actual != expected {
        return Err(CrsError::ShapeMismatch { expected, actual });
    }

    Ok(crs)
}

/// Reference asserted to resolve to a compound CRS.
///
/// The assertion is only checked when a compound specific accessor is called.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CompoundCrsRef(CrsRef);

impl CompoundCrsRef {
    /// Wraps the reference.
    pub fn new(crs_ref: CrsRef) -> Self {
        Self(crs_ref)
    }

    /// Height axis of the referenced CRS.
    pub fn height_axis(&self) -> Result<Axis, CrsError> {
        let crs = resolve_as(&self.0, CrsType::Compound)?;
        crs.height_axis().cloned().ok_or(CrsError::ShapeMismatch {
            expected: CrsType::Compound,
            actual: crs.crs_type(),
        })
    }

    /// Horizontal part of the referenced CRS.
    pub fn horizontal(&self) -> Result<Crs, CrsError> {
        let crs = resolve_as(&self.0, CrsType::Compound)?;
        match crs.kind() {
            CrsKind::Compound { horizontal, .. } => Ok((**horizontal).clone()),
            _ => Err(CrsError::ShapeMismatch {
                expected: CrsType::Compound,
                actual: crs.crs_type(),
            }),
        }
    }

    /// Underlying untyped reference.
    pub fn into_inner(self) -> CrsRef {
        self.0
    }
}

impl Deref for CompoundCrsRef {
    type Target = CrsRef;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

/// Reference asserted to resolve to a projected CRS.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ProjectedCrsRef(CrsRef);

impl ProjectedCrsRef {
    /// Wraps the reference.
    pub fn new(crs_ref: CrsRef) -> Self {
        Self(crs_ref)
    }

    /// Projection of the referenced CRS.
    pub fn projection(&self) -> Result<Projection, CrsError> {
        let crs = resolve_as(&self.0, CrsType::Projected)?;
        crs.projection().cloned().ok_or(CrsError::ShapeMismatch {
            expected: CrsType::Projected,
            actual: crs.crs_type(),
        })
    }

    /// Geographic CRS the projection is based on.
    pub fn base(&self) -> Result<Crs, CrsError> {
        let crs = resolve_as(&self.0, CrsType::Projected)?;
        match crs.kind() {
            CrsKind::Projected { base, .. } => Ok((**base).clone()),
            _ => Err(CrsError::ShapeMismatch {
                expected: CrsType::Projected,
                actual: crs.crs_type(),
            }),
        }
    }

    /// Underlying untyped reference.
    pub fn into_inner(self) -> CrsRef {
        self.0
    }
}

impl Deref for ProjectedCrsRef {
    type Target = CrsRef;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geo::{AxisOrientation, CrsObject, Datum};
    use assert_matches::assert_matches;

    fn utm32() -> Crs {
        Crs::projected(
            "ETRS89 / UTM zone 32N",
            Crs::geographic("ETRS89", Datum::GRS80),
            Projection::new(
                "Transverse_Mercator",
                vec![
                    ("central_meridian".into(), 9.0),
                    ("scale_factor".into(), 0.9996),
                    ("false_easting".into(), 500000.0),
                ],
            ),
        )
    }

    fn compound() -> Crs {
        Crs::compound(
            "ETRS89 / UTM 32N + DHHN92 height",
            utm32(),
            Axis::new("H", AxisOrientation::Up),
        )
    }

    fn lazy(crs: Crs) -> CrsRef {
        let crs = Arc::new(crs);
        let resolver =
            move |_: &str, _: Option<&str>| Ok::<_, CrsError>(Some(CrsObject::Crs(crs.clone())));
        CrsRef::new("EPSG:5555", Arc::new(resolver))
    }

    #[test]
    fn compound_accessors() {
        let crs_ref = CompoundCrsRef::new(lazy(compound()));
        assert!(!crs_ref.is_resolved());

        let axis = crs_ref.height_axis().unwrap();
        assert_eq!(axis.orientation(), AxisOrientation::Up);
        assert!(crs_ref.is_resolved());
        assert_eq!(crs_ref.horizontal().unwrap(), utm32());
        assert_eq!(crs_ref.dimension().unwrap(), 3);
    }

    #[test]
    fn projected_accessors() {
        let crs_ref = ProjectedCrsRef::new(lazy(utm32()));
        let projection = crs_ref.projection().unwrap();
        assert_eq!(projection.method(), "Transverse_Mercator");
        assert_eq!(projection.parameter("central_meridian"), Some(9.0));
        assert_eq!(crs_ref.base().unwrap().crs_type(), CrsType::Geographic);
    }

    #[test]
    fn shape_mismatch() {
        let crs_ref = CompoundCrsRef::new(lazy(utm32()));
        assert_matches!(
            crs_ref.height_axis(),
            Err(CrsError::ShapeMismatch {
                expected: CrsType::Compound,
                actual: CrsType::Projected
            })
        );

        let crs_ref = ProjectedCrsRef::new(lazy(compound()));
        assert_matches!(crs_ref.projection(), Err(CrsError::ShapeMismatch { .. }));
    }
}
