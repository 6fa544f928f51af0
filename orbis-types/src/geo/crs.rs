use std::fmt::{Display, Formatter};
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

use crate::geo::datum::Datum;

/// Direction an axis points to.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AxisOrientation {
    /// East
    East,
    /// West
    West,
    /// North
    North,
    /// South
    South,
    /// Up
    Up,
    /// Down
    Down,
    /// Any other direction (geocentric axes etc).
    Other,
}

impl AxisOrientation {
    fn is_east_west(&self) -> bool {
        matches!(self, Self::East | Self::West)
    }

    fn is_north_south(&self) -> bool {
        matches!(self, Self::North | Self::South)
    }
}

/// Coordinate system axis.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Axis {
    name: String,
    orientation: AxisOrientation,
}

impl Axis {
    /// Creates a new axis.
    pub fn new(name: impl Into<String>, orientation: AxisOrientation) -> Self {
        Self {
            name: name.into(),
            orientation,
        }
    }

    /// Name of the axis.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Direction of the axis.
    pub fn orientation(&self) -> AxisOrientation {
        self.orientation
    }
}

/// Map projection method with its parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Projection {
    method: String,
    parameters: Vec<(String, f64)>,
}

impl Projection {
    /// Creates a new projection description.
    pub fn new(method: impl Into<String>, parameters: Vec<(String, f64)>) -> Self {
        Self {
            method: method.into(),
            parameters,
        }
    }

    /// Name of the projection method, e.g. `Transverse_Mercator`.
    pub fn method(&self) -> &str {
        &self.method
    }

    /// All parameters in definition order.
    pub fn parameters(&self) -> &[(String, f64)] {
        &self.parameters
    }

    /// Value of the named parameter.
    pub fn parameter(&self, name: &str) -> Option<f64> {
        self.parameters
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| *v)
    }
}

impl PartialEq for Projection {
    fn eq(&self, other: &Self) -> bool {
        self.method == other.method
            && self.parameters.len() == other.parameters.len()
            && self
                .parameters
                .iter()
                .zip(&other.parameters)
                .all(|((n1, v1), (n2, v2))| n1 == n2 && v1.to_bits() == v2.to_bits())
    }
}

impl Eq for Projection {}

impl Hash for Projection {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.method.hash(state);
        for (name, value) in &self.parameters {
            name.hash(state);
            value.to_bits().hash(state);
        }
    }
}

/// Shape of a coordinate reference system.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CrsType {
    /// Latitude/longitude on an ellipsoid.
    Geographic,
    /// Earth centered cartesian.
    Geocentric,
    /// Projected plane.
    Projected,
    /// Heights.
    Vertical,
    /// Horizontal plus vertical.
    Compound,
}

impl Display for CrsType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Geographic => "Geographic",
            Self::Geocentric => "Geocentric",
            Self::Projected => "Projected",
            Self::Vertical => "Vertical",
            Self::Compound => "Compound",
        };
        f.write_str(name)
    }
}

/// Shape specific part of a CRS definition.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CrsKind {
    /// Geographic CRS.
    Geographic {
        /// Datum
        datum: Datum,
    },
    /// Geocentric CRS.
    Geocentric {
        /// Datum
        datum: Datum,
    },
    /// Projected CRS.
    Projected {
        /// Geographic CRS the projection is applied to.
        base: Box<Crs>,
        /// Projection method and parameters.
        projection: Projection,
    },
    /// Vertical CRS.
    Vertical {
        /// Name of the vertical datum.
        datum_name: String,
    },
    /// Compound of a horizontal CRS and a height axis.
    Compound {
        /// Horizontal part.
        horizontal: Box<Crs>,
        /// Height axis.
        vertical_axis: Axis,
    },
}

/// Concrete coordinate reference system definition.
///
/// Two definitions are equal when their shape, axis orientations, datums and projection parameters match. Names and
/// identifiers are not compared, so the same definition registered under several codes compares equal.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Crs {
    identifiers: Vec<String>,
    name: String,
    axes: Vec<Axis>,
    kind: CrsKind,
}

impl Crs {
    /// Creates a new definition.
    pub fn new(name: impl Into<String>, kind: CrsKind, axes: Vec<Axis>) -> Self {
        Self {
            identifiers: vec![],
            name: name.into(),
            axes,
            kind,
        }
    }

    /// Geographic CRS with latitude/longitude axis order.
    pub fn geographic(name: impl Into<String>, datum: Datum) -> Self {
        Self::new(
            name,
            CrsKind::Geographic { datum },
            vec![
                Axis::new("Lat", AxisOrientation::North),
                Axis::new("Lon", AxisOrientation::East),
            ],
        )
    }

    /// Projected CRS with easting/northing axis order.
    pub fn projected(name: impl Into<String>, base: Crs, projection: Projection) -> Self {
        Self::new(
            name,
            CrsKind::Projected {
                base: Box::new(base),
                projection,
            },
            vec![
                Axis::new("E", AxisOrientation::East),
                Axis::new("N", AxisOrientation::North),
            ],
        )
    }

    /// Compound of the horizontal CRS and a height axis.
    pub fn compound(name: impl Into<String>, horizontal: Crs, vertical_axis: Axis) -> Self {
        let mut axes = horizontal.axes.clone();
        axes.push(vertical_axis.clone());
        Self::new(
            name,
            CrsKind::Compound {
                horizontal: Box::new(horizontal),
                vertical_axis,
            },
            axes,
        )
    }

    /// Adds identifiers (codes) to the definition.
    pub fn with_identifiers<I, S>(mut self, identifiers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.identifiers
            .extend(identifiers.into_iter().map(Into::into));
        self
    }

    /// Replaces the axes of the definition.
    pub fn with_axes(self, axes: Vec<Axis>) -> Self {
        Self { axes, ..self }
    }

    /// Identifiers the definition is known under.
    pub fn identifiers(&self) -> &[String] {
        &self.identifiers
    }

    /// Primary identifier.
    pub fn id(&self) -> Option<&str> {
        self.identifiers.first().map(String::as_str)
    }

    /// Human readable name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Axes in coordinate order.
    pub fn axes(&self) -> &[Axis] {
        &self.axes
    }

    /// Shape specific part.
    pub fn kind(&self) -> &CrsKind {
        &self.kind
    }

    /// Shape of the definition.
    pub fn crs_type(&self) -> CrsType {
        match self.kind {
            CrsKind::Geographic { .. } => CrsType::Geographic,
            CrsKind::Geocentric { .. } => CrsType::Geocentric,
            CrsKind::Projected { .. } => CrsType::Projected,
            CrsKind::Vertical { .. } => CrsType::Vertical,
            CrsKind::Compound { .. } => CrsType::Compound,
        }
    }

    /// Number of axes.
    pub fn dimension(&self) -> usize {
        self.axes.len()
    }

    /// Geodetic datum, for vertical CRSs `None`.
    pub fn datum(&self) -> Option<&Datum> {
        match &self.kind {
            CrsKind::Geographic { datum } | CrsKind::Geocentric { datum } => Some(datum),
            CrsKind::Projected { base, .. } => base.datum(),
            CrsKind::Compound { horizontal, .. } => horizontal.datum(),
            CrsKind::Vertical { .. } => None,
        }
    }

    /// Projection of a projected CRS.
    pub fn projection(&self) -> Option<&Projection> {
        match &self.kind {
            CrsKind::Projected { projection, .. } => Some(projection),
            _ => None,
        }
    }

    /// Height axis of a compound CRS.
    pub fn height_axis(&self) -> Option<&Axis> {
        match &self.kind {
            CrsKind::Compound { vertical_axis, .. } => Some(vertical_axis),
            _ => None,
        }
    }

    /// Whether the first two axes are already in east/north (x/y) order.
    pub fn is_xy_order(&self) -> bool {
        !self.needs_swap()
    }

    fn needs_swap(&self) -> bool {
        matches!(
            self.axes.as_slice(),
            [first, second, ..] if first.orientation.is_north_south() && second.orientation.is_east_west()
        )
    }

    /// Returns the same definition with the first two axes in east/north order.
    pub fn to_xy_order(&self) -> Crs {
        let mut crs = self.clone();
        if crs.needs_swap() {
            crs.axes.swap(0, 1);
        }

        if let CrsKind::Compound { horizontal, .. } = &mut crs.kind {
            **horizontal = horizontal.to_xy_order();
        }

        crs
    }

    fn axis_orientations(&self) -> impl Iterator<Item = AxisOrientation> + '_ {
        self.axes.iter().map(Axis::orientation)
    }
}

impl PartialEq for Crs {
    fn eq(&self, other: &Self) -> bool {
        self.kind == other.kind && self.axis_orientations().eq(other.axis_orientations())
    }
}

impl Eq for Crs {}

impl Hash for Crs {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.kind.hash(state);
        for orientation in self.axis_orientations() {
            orientation.hash(state);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::hash_map::DefaultHasher;

    fn hash_of(crs: &Crs) -> u64 {
        let mut hasher = DefaultHasher::new();
        crs.hash(&mut hasher);
        hasher.finish()
    }

    fn wgs84() -> Crs {
        Crs::geographic("WGS 84", Datum::WGS84).with_identifiers(["EPSG:4326"])
    }

    #[test]
    fn equality_ignores_identifiers() {
        let a = wgs84();
        let b = Crs::geographic("World Geodetic System", Datum::WGS84)
            .with_identifiers(["urn:ogc:def:crs:EPSG::4326"]);

        assert_eq!(a, b);
        assert_eq!(hash_of(&a), hash_of(&b));
        assert_ne!(a, Crs::geographic("ETRS89", Datum::GRS80));
    }

    #[test]
    fn xy_order() {
        let crs = wgs84();
        assert!(!crs.is_xy_order());

        let xy = crs.to_xy_order();
        assert!(xy.is_xy_order());
        assert_eq!(xy.axes()[0].orientation(), AxisOrientation::East);
        assert_eq!(xy.identifiers(), crs.identifiers());
        assert_ne!(xy, crs);
        assert_eq!(xy.to_xy_order(), xy);
    }

    #[test]
    fn compound_xy_order_swaps_horizontal_part() {
        let compound = Crs::compound(
            "WGS 84 + height",
            wgs84(),
            Axis::new("H", AxisOrientation::Up),
        );
        assert_eq!(compound.dimension(), 3);

        let xy = compound.to_xy_order();
        let CrsKind::Compound { horizontal, .. } = xy.kind() else {
            panic!("expected compound");
        };
        assert!(horizontal.is_xy_order());
        assert_eq!(xy.axes()[2].orientation(), AxisOrientation::Up);
    }

    #[test]
    fn shape_accessors() {
        let utm = Crs::projected(
            "UTM 32N",
            wgs84(),
            Projection::new(
                "Transverse_Mercator",
                vec![("central_meridian".into(), 9.0)],
            ),
        );
        assert_eq!(utm.crs_type(), CrsType::Projected);
        assert_eq!(
            utm.projection().and_then(|p| p.parameter("central_meridian")),
            Some(9.0)
        );
        assert_eq!(utm.datum(), Some(&Datum::WGS84));
        assert!(utm.height_axis().is_none());
    }
}
