//! A single bend: where to rotate, about what, and by how much.

use partkit_math::{angle_between, signed_angle_about, Dir3, Point3, Tolerance, Transform, Vec3};
use partkit_shape::{Edge, Face};
use serde::{Deserialize, Serialize};

use crate::UnfoldError;

/// Largest angle (radians) between the rotated and expected normals that
/// still counts as flat in [`BendResolution::Signed`] mode.
const FLAT_ANGLE: f64 = 1e-9;

/// How the rotation direction of a bend is chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum BendResolution {
    /// Rotate by the signed angle from the face normal to the expected
    /// normal, measured about the bend axis. One rotation per bend.
    #[default]
    Signed,
    /// Rotate by the unsigned dihedral angle; if the normal then misses the
    /// expected normal, rotate back by twice the angle.
    DetectAndCorrect,
}

/// Rotation data for laying a face into the plane of its predecessor.
#[derive(Debug, Clone, PartialEq)]
pub struct Bend {
    /// Point on the rotation axis (first bend-edge endpoint).
    pub anchor: Point3,
    /// Rotation axis: first bend-edge endpoint minus the second.
    pub axis: Dir3,
    /// Unsigned angle between the two face normals, in degrees.
    pub angle_deg: f64,
    /// Normal the rotated face must end up with (the predecessor's normal).
    pub expected_normal: Dir3,
}

/// Record of one bend applied during unfolding.
#[derive(Debug, Clone, PartialEq)]
pub struct AppliedBend {
    /// Index of the bend in the chain.
    pub index: usize,
    /// Net rotation applied, in degrees.
    pub angle_deg: f64,
    /// Whether the corrective counter-rotation ran.
    pub corrected: bool,
}

/// Compute the bend that lays `face` into the plane of `prev` about `edge`.
///
/// `index` only labels errors.
pub fn calculate_bend(
    index: usize,
    prev: &Face,
    edge: &Edge,
    face: &Face,
) -> Result<Bend, UnfoldError> {
    let prev_normal = prev.normal()?;
    let face_normal = face.normal()?;
    let axis = Dir3::try_new(edge.start - edge.end, f64::EPSILON)
        .ok_or(UnfoldError::ZeroAxis { index })?;
    let angle_deg = angle_between(prev_normal.as_ref(), face_normal.as_ref()).to_degrees();

    Ok(Bend {
        anchor: edge.start,
        axis,
        angle_deg,
        expected_normal: prev_normal,
    })
}

impl Bend {
    fn rotate(&self, face: &Face, angle_deg: f64) -> Face {
        let t = Transform::rotation_about_line(&self.anchor, &self.axis, angle_deg.to_radians());
        face.transformed(&t)
    }

    /// Rotate `face` about this bend so its normal matches the expected one.
    pub fn apply(
        &self,
        index: usize,
        face: &Face,
        resolution: BendResolution,
        tol: &Tolerance,
    ) -> Result<(Face, AppliedBend), UnfoldError> {
        match resolution {
            BendResolution::Signed => self.apply_signed(index, face),
            BendResolution::DetectAndCorrect => self.apply_corrected(index, face, tol),
        }
    }

    fn apply_signed(&self, index: usize, face: &Face) -> Result<(Face, AppliedBend), UnfoldError> {
        let normal = face.normal()?;
        let angle_deg =
            signed_angle_about(normal.as_ref(), self.expected_normal.as_ref(), &self.axis)
                .to_degrees();
        let rotated = self.rotate(face, angle_deg);

        let landed = rotated.normal()?;
        if angle_between(landed.as_ref(), self.expected_normal.as_ref()) > FLAT_ANGLE {
            return Err(UnfoldError::DidNotFlatten {
                index,
                normal: to_array(landed.as_ref()),
                expected: to_array(self.expected_normal.as_ref()),
            });
        }
        log::debug!("bend {index}: rotated {angle_deg:.6} deg");
        Ok((
            rotated,
            AppliedBend {
                index,
                angle_deg,
                corrected: false,
            },
        ))
    }

    fn apply_corrected(
        &self,
        index: usize,
        face: &Face,
        tol: &Tolerance,
    ) -> Result<(Face, AppliedBend), UnfoldError> {
        let mut rotated = self.rotate(face, self.angle_deg);
        let mut applied = AppliedBend {
            index,
            angle_deg: self.angle_deg,
            corrected: false,
        };

        let normal = rotated.normal()?;
        if !tol.vectors_equal(normal.as_ref(), self.expected_normal.as_ref()) {
            log::debug!(
                "bend {index}: normal {:?} missed {:?}, counter-rotating",
                to_array(normal.as_ref()),
                to_array(self.expected_normal.as_ref())
            );
            rotated = self.rotate(&rotated, -2.0 * self.angle_deg);
            applied.angle_deg = -self.angle_deg;
            applied.corrected = true;

            let normal = rotated.normal()?;
            if !tol.vectors_equal(normal.as_ref(), self.expected_normal.as_ref()) {
                log::warn!(
                    "bend {index}: normal {:?} still differs from {:?} after correction",
                    to_array(normal.as_ref()),
                    to_array(self.expected_normal.as_ref())
                );
            }
        }
        Ok((rotated, applied))
    }
}

fn to_array(v: &Vec3) -> [f64; 3] {
    [v.x, v.y, v.z]
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn p(x: f64, y: f64, z: f64) -> Point3 {
        Point3::new(x, y, z)
    }

    fn bottom() -> Face {
        Face::from_polygon(&[p(0., 0., 0.), p(0., 1., 0.), p(1., 1., 0.), p(1., 0., 0.)])
    }

    fn left_side() -> Face {
        Face::from_polygon(&[p(0., 0., 0.), p(0., 0., 1.), p(0., 1., 1.), p(0., 1., 0.)])
    }

    fn assert_flat_outside(face: &Face) {
        for v in face.outer_vertices().unwrap() {
            assert_relative_eq!(v.z, 0.0, epsilon = 1e-12);
            assert!(v.x <= 1e-12, "vertex {v:?} folded back over the primary face");
        }
        assert_relative_eq!(face.normal().unwrap().z, -1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_calculate_bend() {
        let edge = Edge::line(p(0., 0., 0.), p(0., 1., 0.));
        let bend = calculate_bend(0, &bottom(), &edge, &left_side()).unwrap();
        assert_relative_eq!(bend.angle_deg, 90.0, epsilon = 1e-9);
        assert_eq!(bend.anchor, Point3::origin());
        assert_relative_eq!(bend.axis.y, -1.0);
        assert_relative_eq!(bend.expected_normal.z, -1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_zero_length_bend_edge() {
        let edge = Edge::line(p(0., 0., 0.), p(0., 0., 0.));
        assert!(matches!(
            calculate_bend(3, &bottom(), &edge, &left_side()),
            Err(UnfoldError::ZeroAxis { index: 3 })
        ));
    }

    #[test]
    fn test_signed_rotation_lands_outside() {
        for edge in [
            Edge::line(p(0., 0., 0.), p(0., 1., 0.)),
            Edge::line(p(0., 1., 0.), p(0., 0., 0.)),
        ] {
            let bend = calculate_bend(0, &bottom(), &edge, &left_side()).unwrap();
            let (flat, applied) = bend
                .apply(0, &left_side(), BendResolution::Signed, &Tolerance::NEAR)
                .unwrap();
            assert!(!applied.corrected);
            assert_relative_eq!(applied.angle_deg.abs(), 90.0, epsilon = 1e-9);
            assert_flat_outside(&flat);
        }
    }

    #[test]
    fn test_detect_and_correct_without_correction() {
        // axis (0,-1,0): +90 deg already maps -X onto -Z
        let edge = Edge::line(p(0., 0., 0.), p(0., 1., 0.));
        let bend = calculate_bend(0, &bottom(), &edge, &left_side()).unwrap();
        let (flat, applied) = bend
            .apply(0, &left_side(), BendResolution::DetectAndCorrect, &Tolerance::NEAR)
            .unwrap();
        assert!(!applied.corrected);
        assert_flat_outside(&flat);
    }

    #[test]
    fn test_detect_and_correct_counter_rotates_at_90_degrees() {
        // axis (0,1,0): +90 deg sends -X to +Z, so the correction must run
        let edge = Edge::line(p(0., 1., 0.), p(0., 0., 0.));
        let bend = calculate_bend(0, &bottom(), &edge, &left_side()).unwrap();
        let (flat, applied) = bend
            .apply(0, &left_side(), BendResolution::DetectAndCorrect, &Tolerance::NEAR)
            .unwrap();
        assert!(applied.corrected);
        assert_relative_eq!(applied.angle_deg, -90.0, epsilon = 1e-9);
        assert_flat_outside(&flat);
    }

    #[test]
    fn test_signed_reports_bend_edge_off_the_face() {
        // axis along X is not shared by the two faces, so no rotation about it
        // can lay the side face flat
        let edge = Edge::line(p(0., 0., 0.), p(1., 0., 0.));
        let bend = calculate_bend(2, &bottom(), &edge, &left_side()).unwrap();
        assert!(matches!(
            bend.apply(2, &left_side(), BendResolution::Signed, &Tolerance::NEAR),
            Err(UnfoldError::DidNotFlatten { index: 2, .. })
        ));
    }
}
