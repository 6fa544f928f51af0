//! Interpolation of a circle through three control points.

use std::f64::consts::TAU;

use nalgebra::{Point2, Vector2, Vector3};
use orbis_types::cartesian::{Orientation, Rect, COLLINEARITY_TOLERANCE};
use orbis_types::Point;

use crate::error::LinearizationError;

/// Two angles closer than this are treated as the same angle, which turns an arc into a full circle.
const ANGLE_TOLERANCE: f64 = 1e-10;

/// Circle through three non-collinear points, in coordinates shifted by `offset`.
#[derive(Debug)]
struct ThreePointCircle {
    offset: Vector2<f64>,
    center: Point2<f64>,
    orientation: Orientation,
}

impl ThreePointCircle {
    /// Returns `None` if the points are collinear.
    fn new(p0: &Point, p1: &Point, p2: &Point) -> Result<Option<Self>, LinearizationError> {
        if !(p0.is_finite() && p1.is_finite() && p2.is_finite()) {
            return Err(LinearizationError::IllegalGeometry(
                "control point with non-finite ordinates".into(),
            ));
        }

        if p0.xy() == p1.xy() && p1.xy() == p2.xy() {
            return Err(LinearizationError::IllegalGeometry(format!(
                "all three control points are at ({}, {})",
                p0.x(),
                p0.y()
            )));
        }

        let positions = [p0.xy(), p1.xy(), p2.xy()];
        let offset = Rect::from_points(positions.iter())
            .map(|rect| rect.center().coords)
            .unwrap_or_else(Vector2::zeros);
        let [a, b, c] = positions.map(|p| p - offset);

        let orientation = Orientation::triplet(&a, &b, &c);
        if orientation == Orientation::Collinear {
            return Ok(None);
        }

        let center = circumcenter(
            Vector3::new(a.x, a.y, 0.0),
            Vector3::new(b.x, b.y, 0.0),
            Vector3::new(c.x, c.y, 0.0),
        )?;

        Ok(Some(Self {
            offset,
            center,
            orientation,
        }))
    }

    fn angle_to(&self, point: &Point) -> f64 {
        let v = point.xy() - self.offset - self.center;
        v.y.atan2(v.x)
    }
}

fn circumcenter(
    a: Vector3<f64>,
    b: Vector3<f64>,
    c: Vector3<f64>,
) -> Result<Point2<f64>, LinearizationError> {
    let ab = a - b;
    let ac = a - c;
    let bc = b - c;
    let ba = b - a;
    let ca = c - a;
    let cb = c - b;

    let cross = ab.cross(&bc);
    let denom = 2.0 * cross.norm_squared();
    if !denom.is_finite() || denom < COLLINEARITY_TOLERANCE * COLLINEARITY_TOLERANCE {
        return Err(LinearizationError::IllegalGeometry(
            "control points are collinear".into(),
        ));
    }

    let alpha = bc.norm_squared() * ab.dot(&ac) / denom;
    let beta = ac.norm_squared() * ba.dot(&bc) / denom;
    let gamma = ab.norm_squared() * ca.dot(&cb) / denom;
    let center = a * alpha + b * beta + c * gamma;

    Ok(Point2::new(center.x, center.y))
}

/// Approximates the arc `p0, p1, p2` (or the full circle through them if `closed` is set) with `num_points` points.
///
/// Returns `Ok(None)` if the points are collinear and no circle exists. The first output point is `p0` and the last
/// one is `p2` (`p0` for circles) as given, only the points in between are computed.
pub(super) fn interpolate(
    p0: &Point,
    p1: &Point,
    p2: &Point,
    closed: bool,
    num_points: usize,
) -> Result<Option<Vec<Point>>, LinearizationError> {
    let Some(circle) = ThreePointCircle::new(p0, p1, p2)? else {
        return Ok(None);
    };

    let center = circle.center + circle.offset;
    let radius = (p0.xy() - center).norm();
    if !radius.is_finite() || radius == 0.0 {
        return Err(LinearizationError::IllegalGeometry(format!(
            "circle through the control points has radius {radius}"
        )));
    }

    let start_angle = circle.angle_to(p0);
    let end_angle = if closed {
        start_angle
    } else {
        circle.angle_to(p2)
    };
    let is_circle = (start_angle - end_angle).abs() < ANGLE_TOLERANCE;
    let clockwise = circle.orientation == Orientation::Clockwise;

    let sweep = if is_circle {
        TAU
    } else {
        let raw = start_angle - end_angle;
        match (clockwise, raw < 0.0) {
            (true, true) => raw + TAU,
            (true, false) => raw,
            (false, true) => -raw,
            (false, false) => TAU - raw,
        }
    };

    let step = sweep / (num_points - 1) as f64;
    let angle_step = if clockwise { -step } else { step };

    let end = if closed { p0 } else { p2 };
    let z_range = p0.z().zip(end.z());
    let crs = p0.crs().cloned();

    let mut points = Vec::with_capacity(num_points);
    points.push(p0.clone());
    for i in 1..num_points - 1 {
        let angle = start_angle + i as f64 * angle_step;
        let x = center.x + radius * angle.cos();
        let y = center.y + radius * angle.sin();
        let point = match z_range {
            Some((z0, z1)) => {
                let t = i as f64 / (num_points - 1) as f64;
                Point::new_3d(x, y, z0 + (z1 - z0) * t)
            }
            None => Point::new(x, y),
        };
        points.push(point.with_optional_crs(crs.clone()));
    }
    points.push(end.clone());

    Ok(Some(points))
}

/// Center of the circle through the three points, `None` for collinear points.
pub fn circle_center(
    p0: &Point,
    p1: &Point,
    p2: &Point,
) -> Result<Option<Point2<f64>>, LinearizationError> {
    Ok(ThreePointCircle::new(p0, p1, p2)?.map(|circle| circle.center + circle.offset))
}
