//! Planar faces, shells and solids.

use partkit_math::{newell_normal, Dir3, Point3, Tolerance, Transform};
use serde::{Deserialize, Serialize};

use crate::{Edge, ShapeError, Wire};

/// A planar face bounded by an outer wire, with optional holes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Face {
    /// Outer boundary.
    pub outer: Wire,
    /// Inner boundaries (holes).
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub inner: Vec<Wire>,
}

impl Face {
    /// Face with the given outer boundary and no holes.
    pub fn new(outer: Wire) -> Self {
        Self {
            outer,
            inner: Vec::new(),
        }
    }

    /// Face bounded by the closed polygon through `points`.
    pub fn from_polygon(points: &[Point3]) -> Self {
        Self::new(Wire::polygon(points))
    }

    /// Distinct outer boundary vertices in loop order.
    pub fn outer_vertices(&self) -> Result<Vec<Point3>, ShapeError> {
        self.outer.ordered_vertices(&Tolerance::NEAR)
    }

    /// Unit normal following the outer boundary's direction (right-hand rule).
    pub fn normal(&self) -> Result<Dir3, ShapeError> {
        let points = self.outer_vertices()?;
        newell_normal(&points).ok_or(ShapeError::DegenerateFace)
    }

    /// All boundary edges, outer first.
    pub fn edges(&self) -> impl Iterator<Item = &Edge> {
        self.outer
            .edges
            .iter()
            .chain(self.inner.iter().flat_map(|w| w.edges.iter()))
    }

    /// The face with its orientation flipped.
    pub fn reversed(&self) -> Self {
        Self {
            outer: self.outer.reversed(),
            inner: self.inner.iter().map(Wire::reversed).collect(),
        }
    }

    /// Apply a rigid transform to the whole face.
    pub fn transformed(&self, t: &Transform) -> Self {
        Self {
            outer: self.outer.transformed(t),
            inner: self.inner.iter().map(|w| w.transformed(t)).collect(),
        }
    }

    /// Area enclosed by the outer boundary minus the holes.
    pub fn area(&self) -> Result<f64, ShapeError> {
        let outer = loop_area(&self.outer_vertices()?);
        let mut holes = 0.0;
        for w in &self.inner {
            holes += loop_area(&w.ordered_vertices(&Tolerance::NEAR)?);
        }
        Ok(outer - holes)
    }

    /// Contribution of this face to an enclosed volume (divergence theorem).
    fn signed_volume(&self) -> Result<f64, ShapeError> {
        let mut volume = fan_volume(&self.outer_vertices()?);
        for w in &self.inner {
            volume += fan_volume(&w.ordered_vertices(&Tolerance::NEAR)?);
        }
        Ok(volume)
    }
}

fn loop_area(points: &[Point3]) -> f64 {
    let mut n = partkit_math::Vec3::zeros();
    for (i, p) in points.iter().enumerate() {
        let q = points[(i + 1) % points.len()];
        n += p.coords.cross(&q.coords);
    }
    n.norm() / 2.0
}

fn fan_volume(points: &[Point3]) -> f64 {
    let Some(p0) = points.first() else {
        return 0.0;
    };
    points
        .windows(2)
        .skip(1)
        .map(|w| p0.coords.dot(&w[0].coords.cross(&w[1].coords)) / 6.0)
        .sum()
}

/// A connected set of faces.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Shell {
    /// Faces of the shell.
    pub faces: Vec<Face>,
}

/// A solid bounded by a closed shell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Solid {
    /// The closed outer shell.
    pub shell: Shell,
}

impl Solid {
    /// Enclosed volume; negative when the faces point inward.
    pub fn volume(&self) -> Result<f64, ShapeError> {
        let mut volume = 0.0;
        for face in &self.shell.faces {
            volume += face.signed_volume()?;
        }
        Ok(volume)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use partkit_math::Vec3;

    fn unit_square() -> Face {
        Face::from_polygon(&[
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(1.0, 1.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
        ])
    }

    #[test]
    fn test_normal_follows_winding() {
        let face = unit_square();
        assert_relative_eq!(face.normal().unwrap().z, 1.0, epsilon = 1e-12);
        assert_relative_eq!(face.reversed().normal().unwrap().z, -1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_degenerate_face() {
        let face = Face::from_polygon(&[
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(2.0, 0.0, 0.0),
        ]);
        assert!(matches!(face.normal(), Err(ShapeError::DegenerateFace)));
    }

    #[test]
    fn test_area_with_hole() {
        let mut face = Face::from_polygon(&[
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(4.0, 0.0, 0.0),
            Point3::new(4.0, 4.0, 0.0),
            Point3::new(0.0, 4.0, 0.0),
        ]);
        face.inner.push(Wire::polygon(&[
            Point3::new(1.0, 1.0, 0.0),
            Point3::new(1.0, 2.0, 0.0),
            Point3::new(2.0, 2.0, 0.0),
            Point3::new(2.0, 1.0, 0.0),
        ]));
        assert_relative_eq!(face.area().unwrap(), 15.0, epsilon = 1e-12);
    }

    #[test]
    fn test_transformed_face_moves_normal() {
        let t = Transform::rotation_about_axis(&Vec3::x_axis(), std::f64::consts::PI / 2.0);
        let n = unit_square().transformed(&t).normal().unwrap();
        assert_relative_eq!(n.y, -1.0, epsilon = 1e-12);
    }
}
