//! Parsing airfoil coordinate files.

use partkit_math::Point2;

use crate::AirfoilError;

/// Airfoil coordinates as read from a `.dat` file.
#[derive(Debug, Clone, PartialEq)]
pub struct AirfoilProfile {
    /// Name from the header line.
    pub name: String,
    /// Coordinates in file order, chord along X.
    pub points: Vec<Point2>,
}

impl AirfoilProfile {
    /// Parse `.dat` text: a header line, then `x y` pairs, one per line.
    ///
    /// Blank lines are skipped and columns past the second are ignored.
    pub fn parse(text: &str) -> Result<Self, AirfoilError> {
        let mut lines = text.lines().enumerate();
        let name = lines
            .next()
            .map(|(_, header)| header.trim().to_string())
            .unwrap_or_default();

        let mut points = Vec::new();
        for (i, line) in lines {
            let mut fields = line.split_whitespace();
            let Some(first) = fields.next() else {
                continue;
            };
            let bad_line = || AirfoilError::Parse {
                line: i + 1,
                content: line.to_string(),
            };
            let x: f64 = first.parse().map_err(|_| bad_line())?;
            let y: f64 = fields
                .next()
                .ok_or_else(bad_line)?
                .parse()
                .map_err(|_| bad_line())?;
            points.push(Point2::new(x, y));
        }

        if points.len() < 3 {
            return Err(AirfoilError::TooFewPoints {
                found: points.len(),
            });
        }
        log::debug!("read {} points for airfoil {name:?}", points.len());
        Ok(Self { name, points })
    }

    /// Smallest and largest X.
    pub fn x_range(&self) -> (f64, f64) {
        self.points
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), p| {
                (lo.min(p.x), hi.max(p.x))
            })
    }

    /// Smallest Y.
    pub fn min_y(&self) -> f64 {
        self.points.iter().map(|p| p.y).fold(f64::INFINITY, f64::min)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_dat() {
        let text = "E214 profile\n  1.00000  0.00000\n\n  0.50000  0.08000\n  0.00000  0.00000 extra\n  0.50000 -0.02000\n";
        let profile = AirfoilProfile::parse(text).unwrap();
        assert_eq!(profile.name, "E214 profile");
        assert_eq!(profile.points.len(), 4);
        assert_eq!(profile.points[3], Point2::new(0.5, -0.02));
        assert_eq!(profile.x_range(), (0.0, 1.0));
        assert_eq!(profile.min_y(), -0.02);
    }

    #[test]
    fn test_bad_lines() {
        let err = AirfoilProfile::parse("NACA\n1.0 0.0\n0.5 abc\n").unwrap_err();
        assert_eq!(
            err,
            AirfoilError::Parse {
                line: 3,
                content: "0.5 abc".into()
            }
        );
        let err = AirfoilProfile::parse("NACA\n1.0\n").unwrap_err();
        assert!(matches!(err, AirfoilError::Parse { line: 2, .. }));
    }

    #[test]
    fn test_too_few_points() {
        assert_eq!(
            AirfoilProfile::parse("NACA\n1.0 0.0\n0.0 0.0\n"),
            Err(AirfoilError::TooFewPoints { found: 2 })
        );
        assert_eq!(
            AirfoilProfile::parse(""),
            Err(AirfoilError::TooFewPoints { found: 0 })
        );
    }
}
