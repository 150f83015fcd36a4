//! Scaling a profile into a wing station.

use partkit_math::{Point3, Tolerance};
use partkit_shape::Face;
use serde::{Deserialize, Serialize};

use crate::{AirfoilError, AirfoilProfile};

/// How a profile is scaled and placed.
///
/// The chord runs along Y and the thickness along Z, in the plane
/// `x = station_x`. The profile's leading edge and lowest point land on
/// `y = 0` and `z = 0`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AirfoilImport {
    /// Chord length after scaling.
    pub target_span: f64,
    /// X of the station plane.
    pub station_x: f64,
    /// Extra thickness scale relative to the chord scale.
    pub thickness_ratio: f64,
}

impl Default for AirfoilImport {
    fn default() -> Self {
        Self {
            target_span: 260.0,
            station_x: 0.0,
            thickness_ratio: 35.0 / (27.34 + 11.99),
        }
    }
}

impl AirfoilImport {
    /// Scale every profile point into the station plane.
    pub fn scale(&self, profile: &AirfoilProfile) -> Result<Vec<Point3>, AirfoilError> {
        let (min_x, max_x) = profile.x_range();
        let chord = max_x - min_x;
        if chord <= 0.0 || !chord.is_finite() {
            return Err(AirfoilError::ZeroChord);
        }
        let factor = self.target_span / chord;
        let thickness = factor * self.thickness_ratio;
        let min_y = profile.min_y();

        Ok(profile
            .points
            .iter()
            .map(|p| {
                Point3::new(
                    self.station_x,
                    (p.x - min_x) * factor,
                    (p.y - min_y) * thickness,
                )
            })
            .collect())
    }

    /// Build the closed profile face.
    ///
    /// A last point repeating the first is dropped; the outline is closed
    /// with a straight edge.
    pub fn build_face(&self, profile: &AirfoilProfile) -> Result<Face, AirfoilError> {
        let mut points = self.scale(profile)?;
        if points.len() > 1 && Tolerance::NEAR.points_equal(&points[0], &points[points.len() - 1]) {
            points.pop();
        }
        if points.len() < 3 {
            return Err(AirfoilError::TooFewPoints {
                found: points.len(),
            });
        }
        log::info!(
            "airfoil {:?}: {} points, chord {}",
            profile.name,
            points.len(),
            self.target_span
        );
        Ok(Face::from_polygon(&points))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use partkit_math::Point2;

    fn foil() -> AirfoilProfile {
        AirfoilProfile::parse("TEST\n2.0 0.0\n1.5 0.1\n1.0 0.0\n1.5 -0.05\n2.0 0.0\n").unwrap()
    }

    #[test]
    fn test_scale_to_span() {
        let import = AirfoilImport {
            station_x: 12.0,
            ..Default::default()
        };
        let points = import.scale(&foil()).unwrap();
        let thickness = 260.0 * 35.0 / 39.33;

        assert_relative_eq!(points[0].y, 260.0);
        assert_relative_eq!(points[2].y, 0.0);
        assert_relative_eq!(points[1].z, 0.15 * thickness, epsilon = 1e-9);
        assert_relative_eq!(points[3].z, 0.0);
        assert!(points.iter().all(|p| p.x == 12.0));
    }

    #[test]
    fn test_face_drops_closing_duplicate() {
        let face = AirfoilImport::default().build_face(&foil()).unwrap();
        let vertices = face.outer_vertices().unwrap();
        assert_eq!(vertices.len(), 4);
        assert_eq!(face.outer.edges.len(), 4);
        // profile lies in the YZ plane
        assert_relative_eq!(face.normal().unwrap().x.abs(), 1.0);
    }

    #[test]
    fn test_zero_chord() {
        let profile = AirfoilProfile {
            name: "needle".into(),
            points: vec![Point2::new(1.0, 0.0), Point2::new(1.0, 1.0), Point2::new(1.0, 2.0)],
        };
        assert_eq!(
            AirfoilImport::default().build_face(&profile),
            Err(AirfoilError::ZeroChord)
        );
    }
}
