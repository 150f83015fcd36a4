#![warn(missing_docs)]

//! Math types for the partkit geometry utilities.
//!
//! Thin wrappers around nalgebra providing the handful of types every
//! utility shares: points, vectors, directions, rigid transforms, plane
//! bases and the near-equality tolerance used for vertex matching.

use nalgebra::{Matrix4, Unit, Vector3, Vector4};
use serde::{Deserialize, Serialize};

/// A point in 3D space.
pub type Point3 = nalgebra::Point3<f64>;

/// A vector in 3D space.
pub type Vec3 = Vector3<f64>;

/// A unit (normalized) direction vector in 3D space.
pub type Dir3 = Unit<Vector3<f64>>;

/// A point in a 2D plane.
pub type Point2 = nalgebra::Point2<f64>;

/// A 4x4 affine transformation matrix.
#[derive(Debug, Clone, PartialEq)]
pub struct Transform {
    /// The underlying 4x4 matrix.
    pub matrix: Matrix4<f64>,
}

impl Transform {
    /// Translation by `(dx, dy, dz)`.
    pub fn translation(dx: f64, dy: f64, dz: f64) -> Self {
        let mut m = Matrix4::identity();
        m[(0, 3)] = dx;
        m[(1, 3)] = dy;
        m[(2, 3)] = dz;
        Self { matrix: m }
    }

    /// Rotation about an axis through the origin by `angle` radians.
    ///
    /// Uses Rodrigues' rotation formula; positive angles turn
    /// counter-clockwise when looking down the axis toward the origin.
    pub fn rotation_about_axis(axis: &Dir3, angle: f64) -> Self {
        let (s, c) = angle.sin_cos();
        let t = 1.0 - c;
        let (x, y, z) = (axis.as_ref().x, axis.as_ref().y, axis.as_ref().z);
        let mut m = Matrix4::identity();
        m[(0, 0)] = t * x * x + c;
        m[(0, 1)] = t * x * y - s * z;
        m[(0, 2)] = t * x * z + s * y;
        m[(1, 0)] = t * x * y + s * z;
        m[(1, 1)] = t * y * y + c;
        m[(1, 2)] = t * y * z - s * x;
        m[(2, 0)] = t * x * z - s * y;
        m[(2, 1)] = t * y * z + s * x;
        m[(2, 2)] = t * z * z + c;
        Self { matrix: m }
    }

    /// Rotation by `angle` radians about the line through `anchor` along `axis`.
    pub fn rotation_about_line(anchor: &Point3, axis: &Dir3, angle: f64) -> Self {
        let to_origin = Self::translation(-anchor.x, -anchor.y, -anchor.z);
        let back = Self::translation(anchor.x, anchor.y, anchor.z);
        back.then(&Self::rotation_about_axis(axis, angle))
            .then(&to_origin)
    }

    /// Compose: `self` then `other` (self * other).
    ///
    /// The composed transform applies `other` first, then `self`.
    pub fn then(&self, other: &Transform) -> Self {
        Self {
            matrix: self.matrix * other.matrix,
        }
    }

    /// Transform a point.
    pub fn apply_point(&self, p: &Point3) -> Point3 {
        let v = self.matrix * Vector4::new(p.x, p.y, p.z, 1.0);
        Point3::new(v.x, v.y, v.z)
    }
}

/// Tolerance used when deciding whether two coordinates are the same.
///
/// Comparisons are absolute and per component: `|a - b| < linear`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Tolerance {
    /// Absolute per-component distance tolerance.
    pub linear: f64,
}

impl Tolerance {
    /// The fixed near-equality tolerance used across the toolbox (1e-14).
    pub const NEAR: Self = Self { linear: 1e-14 };

    /// A looser (or tighter) distance tolerance.
    pub fn with_linear(linear: f64) -> Self {
        Self { linear }
    }

    /// Check if two scalars are within tolerance of each other.
    pub fn near(&self, a: f64, b: f64) -> bool {
        (a - b).abs() < self.linear
    }

    /// Check if two points are coincident on every component.
    pub fn points_equal(&self, a: &Point3, b: &Point3) -> bool {
        self.near(a.x, b.x) && self.near(a.y, b.y) && self.near(a.z, b.z)
    }

    /// Check if two vectors match on every component.
    pub fn vectors_equal(&self, a: &Vec3, b: &Vec3) -> bool {
        self.near(a.x, b.x) && self.near(a.y, b.y) && self.near(a.z, b.z)
    }

    /// Check if a scalar distance is effectively zero.
    pub fn is_zero(&self, d: f64) -> bool {
        d.abs() < self.linear
    }
}

impl Default for Tolerance {
    fn default() -> Self {
        Self::NEAR
    }
}

/// Unsigned angle between two vectors, in radians (`0..=π`).
pub fn angle_between(a: &Vec3, b: &Vec3) -> f64 {
    a.angle(b)
}

/// Signed angle in radians that rotates `from` onto `to` about `axis`.
///
/// Exact when both vectors are perpendicular to the axis; otherwise the
/// components along the axis are ignored.
pub fn signed_angle_about(from: &Vec3, to: &Vec3, axis: &Dir3) -> f64 {
    let sin = from.cross(to).dot(axis.as_ref());
    let cos = from.dot(to);
    sin.atan2(cos)
}

/// Signed turning angle in degrees when walking `a -> b -> c`.
///
/// Positive for a left (counter-clockwise) turn, negative for a right turn,
/// zero when going straight. A full reversal reports `180`.
pub fn turning_angle_deg(a: &Point2, b: &Point2, c: &Point2) -> f64 {
    let d1 = b - a;
    let d2 = c - b;
    let cross = d1.x * d2.y - d1.y * d2.x;
    let dot = d1.dot(&d2);
    if cross == 0.0 {
        return if dot < 0.0 { 180.0 } else { 0.0 };
    }
    cross.atan2(dot).to_degrees()
}

/// Round to a fixed number of decimal digits.
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let scale = 10f64.powi(decimals);
    let rounded = (value * scale).round() / scale;
    // keep "-0" out of printed output
    if rounded == 0.0 {
        0.0
    } else {
        rounded
    }
}

/// Normal of a planar polygon by Newell's method.
///
/// The direction follows the right-hand rule over the vertex order.
/// Returns `None` for degenerate (zero area) polygons.
pub fn newell_normal(points: &[Point3]) -> Option<Dir3> {
    if points.len() < 3 {
        return None;
    }
    let mut n = Vec3::zeros();
    for (i, p) in points.iter().enumerate() {
        let q = &points[(i + 1) % points.len()];
        n.x += (p.y - q.y) * (p.z + q.z);
        n.y += (p.z - q.z) * (p.x + q.x);
        n.z += (p.x - q.x) * (p.y + q.y);
    }
    Dir3::try_new(n, f64::EPSILON)
}

/// An orthonormal 2D coordinate system embedded in a 3D plane.
#[derive(Debug, Clone)]
pub struct PlaneBasis {
    /// Origin of the plane.
    pub origin: Point3,
    /// Unit vector along the local X axis.
    pub x_dir: Dir3,
    /// Unit vector along the local Y axis.
    pub y_dir: Dir3,
    /// Unit normal (x_dir × y_dir).
    pub normal: Dir3,
}

impl PlaneBasis {
    /// Build a basis for the plane through `origin` with the given normal.
    ///
    /// A normal aligned with +Z yields the global XY axes, so planar data in
    /// XY keeps its coordinates.
    pub fn from_normal(origin: Point3, normal: Dir3) -> Self {
        let n = normal.into_inner();
        let seed = if n.x.abs() < 0.9 { Vec3::x() } else { Vec3::y() };
        let y = n.cross(&seed);
        let y_dir = Dir3::new_normalize(y);
        let x_dir = Dir3::new_normalize(y_dir.cross(&n));
        Self {
            origin,
            x_dir,
            y_dir,
            normal,
        }
    }

    /// Express a 3D point in local plane coordinates (drops the normal offset).
    pub fn project(&self, p: &Point3) -> Point2 {
        let d = p - self.origin;
        Point2::new(d.dot(self.x_dir.as_ref()), d.dot(self.y_dir.as_ref()))
    }
}
