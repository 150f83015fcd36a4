//! Winding detection and the outer successor walk.

use partkit_math::{
    newell_normal, round_to, turning_angle_deg, Dir3, PlaneBasis, Point2, Point3, Tolerance,
};
use partkit_shape::Face;

use crate::SimplifyError;

/// Decimal digits kept when comparing turning angles.
const ANGLE_DECIMALS: i32 = 6;

/// Turning-angle sums closer to zero than this (degrees) have no winding.
const MIN_WINDING_SUM: f64 = 1e-9;

/// Direction an outline turns as it is walked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Winding {
    /// Turning angles sum to a positive value.
    CounterClockwise,
    /// Turning angles sum to a negative value.
    Clockwise,
}

impl Winding {
    fn sign(self) -> f64 {
        match self {
            Winding::CounterClockwise => 1.0,
            Winding::Clockwise => -1.0,
        }
    }
}

/// A closed planar outline, projected into its own plane.
#[derive(Debug, Clone)]
pub struct Outline {
    points: Vec<Point3>,
    flat: Vec<Point2>,
    winding: Winding,
    tol: Tolerance,
}

impl Outline {
    /// Project `points` into their plane and measure the winding.
    ///
    /// The plane normal is flipped so its largest component is positive,
    /// which keeps outlines drawn in the XY plane in XY coordinates.
    pub fn new(points: Vec<Point3>, tol: Tolerance) -> Result<Self, SimplifyError> {
        if points.len() < 3 {
            return Err(SimplifyError::TooFewVertices {
                found: points.len(),
            });
        }
        let normal = newell_normal(&points).ok_or(SimplifyError::DegenerateWinding)?;
        let basis = PlaneBasis::from_normal(points[0], canonical(normal));
        let flat: Vec<Point2> = points.iter().map(|p| basis.project(p)).collect();
        let winding = winding_of(&flat)?;
        Ok(Self {
            points,
            flat,
            winding,
            tol,
        })
    }

    /// The outline's winding direction.
    pub fn winding(&self) -> Winding {
        self.winding
    }

    /// Number of vertices.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Whether the outline has no vertices (never true once constructed).
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// The vertex to go to after vertex `index`.
    ///
    /// Arriving from the previous vertex in input order, every other vertex
    /// is scanned starting after `index`. The candidate with the smallest
    /// inward (or straight) turn wins; on ties the later candidate in scan
    /// order wins, which skips collinear and notch vertices.
    pub fn successor(&self, index: usize) -> Result<usize, SimplifyError> {
        let n = self.flat.len();
        let prev = (index + n - 1) % n;
        let (from, at) = (&self.flat[prev], &self.flat[index]);
        let sign = self.winding.sign();

        let mut best: Option<(usize, f64)> = None;
        for step in 1..n {
            let candidate = (index + step) % n;
            if candidate == prev || self.coincident(candidate, index) {
                continue;
            }
            let turn = sign * turning_angle_deg(from, at, &self.flat[candidate]);
            let turn = round_to(turn, ANGLE_DECIMALS);
            if !(0.0..180.0).contains(&turn) {
                continue;
            }
            if best.map_or(true, |(_, t)| turn <= t) {
                best = Some((candidate, turn));
            }
        }
        let (next, turn) = best.ok_or(SimplifyError::NoSuccessor { index })?;
        log::debug!("vertex {index}: successor {next} (turn {turn} deg)");
        Ok(next)
    }

    fn coincident(&self, a: usize, b: usize) -> bool {
        self.tol.points_equal(&self.points[a], &self.points[b])
    }

    /// The lowest projected vertex, leftmost among equals. It is always a
    /// corner of the outer hull, whatever the input rotation.
    fn hull_start(&self) -> usize {
        (1..self.flat.len()).fold(0, |best, i| {
            let (p, q) = (&self.flat[i], &self.flat[best]);
            if p.y < q.y || (p.y == q.y && p.x < q.x) {
                i
            } else {
                best
            }
        })
    }

    /// Follow successors from a hull corner until the walk closes,
    /// returning the visited vertex indices.
    pub fn trace(&self) -> Result<Vec<usize>, SimplifyError> {
        let n = self.points.len();
        let start = self.hull_start();
        let mut visited = vec![false; n];
        let mut path = Vec::new();
        let mut current = start;

        for _ in 0..n {
            visited[current] = true;
            path.push(current);
            let next = self.successor(current)?;
            if next == start {
                return Ok(path);
            }
            if visited[next] {
                return Err(SimplifyError::OpenPath {
                    path,
                    rejoined_at: next,
                });
            }
            current = next;
        }
        Err(SimplifyError::OpenPath {
            path,
            rejoined_at: current,
        })
    }

    /// The vertices of the traced outline.
    pub fn simplified(&self) -> Result<Vec<Point3>, SimplifyError> {
        Ok(self.trace()?.into_iter().map(|i| self.points[i]).collect())
    }
}

fn canonical(normal: Dir3) -> Dir3 {
    let n = normal.into_inner();
    let dominant = n
        .iter()
        .copied()
        .fold(0.0_f64, |acc, c| if c.abs() > acc.abs() { c } else { acc });
    if dominant < 0.0 {
        Dir3::new_unchecked(-n)
    } else {
        normal
    }
}

fn winding_of(flat: &[Point2]) -> Result<Winding, SimplifyError> {
    let n = flat.len();
    let sum: f64 = (0..n)
        .map(|i| turning_angle_deg(&flat[(i + n - 1) % n], &flat[i], &flat[(i + 1) % n]))
        .sum();
    if sum.abs() < MIN_WINDING_SUM {
        return Err(SimplifyError::DegenerateWinding);
    }
    Ok(if sum > 0.0 {
        Winding::CounterClockwise
    } else {
        Winding::Clockwise
    })
}

/// Winding direction of a closed outline.
pub fn detect_winding(points: &[Point3]) -> Result<Winding, SimplifyError> {
    Ok(Outline::new(points.to_vec(), Tolerance::NEAR)?.winding())
}

/// The outline with its cavities and collinear vertices removed.
pub fn remove_cavities(points: &[Point3]) -> Result<Vec<Point3>, SimplifyError> {
    let outline = Outline::new(points.to_vec(), Tolerance::NEAR)?;
    let kept = outline.simplified()?;
    log::info!(
        "kept {} of {} outline vertices ({:?})",
        kept.len(),
        outline.len(),
        outline.winding()
    );
    Ok(kept)
}

/// A new face bounded by the simplified outer boundary of `face`.
///
/// The new face has no holes and keeps the orientation of the input face.
pub fn simplify_face(face: &Face) -> Result<Face, SimplifyError> {
    let normal = face.normal()?;
    let simplified = Face::from_polygon(&remove_cavities(&face.outer_vertices()?)?);
    if simplified.normal()?.dot(normal.as_ref()) < 0.0 {
        return Ok(simplified.reversed());
    }
    Ok(simplified)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn xy(coords: &[(f64, f64)]) -> Vec<Point3> {
        coords.iter().map(|&(x, y)| Point3::new(x, y, 0.0)).collect()
    }

    /// 10x10 square with a 2x5 notch cut into its top edge, counter-clockwise.
    fn notched() -> Vec<Point3> {
        xy(&[
            (0., 0.),
            (10., 0.),
            (10., 10.),
            (6., 10.),
            (6., 5.),
            (4., 5.),
            (4., 10.),
            (0., 10.),
        ])
    }

    #[test]
    fn test_winding() {
        assert_eq!(detect_winding(&notched()).unwrap(), Winding::CounterClockwise);
        let mut cw = notched();
        cw.reverse();
        assert_eq!(detect_winding(&cw).unwrap(), Winding::Clockwise);
    }

    #[test]
    fn test_notch_removed() {
        let kept = remove_cavities(&notched()).unwrap();
        assert_eq!(kept, xy(&[(0., 0.), (10., 0.), (10., 10.), (0., 10.)]));
    }

    #[test]
    fn test_notch_removed_clockwise() {
        let mut cw = notched();
        cw.reverse();
        let kept = remove_cavities(&cw).unwrap();
        assert_eq!(kept, xy(&[(0., 0.), (0., 10.), (10., 10.), (10., 0.)]));
    }

    #[test]
    fn test_collinear_vertex_dropped() {
        let square = xy(&[(0., 0.), (5., 0.), (10., 0.), (10., 10.), (0., 10.)]);
        let kept = remove_cavities(&square).unwrap();
        assert_eq!(kept, xy(&[(0., 0.), (10., 0.), (10., 10.), (0., 10.)]));
    }

    #[test]
    fn test_two_notches_any_start_vertex() {
        // notches cut into both the bottom and the top edge
        let outline = xy(&[
            (0., 0.),
            (4., 0.),
            (4., 3.),
            (6., 3.),
            (6., 0.),
            (10., 0.),
            (10., 10.),
            (6., 10.),
            (6., 5.),
            (4., 5.),
            (4., 10.),
            (0., 10.),
        ]);
        let corners = xy(&[(0., 0.), (10., 0.), (10., 10.), (0., 10.)]);
        for reversed in [false, true] {
            let mut base = outline.clone();
            if reversed {
                base.reverse();
            }
            for r in 0..base.len() {
                let mut rotated = base.clone();
                rotated.rotate_left(r);
                let kept = remove_cavities(&rotated)
                    .unwrap_or_else(|e| panic!("rotation {r} (reversed {reversed}): {e}"));
                assert_eq!(kept.len(), 4, "rotation {r} (reversed {reversed})");
                assert!(corners.iter().all(|c| kept.contains(c)));
            }
        }
    }

    #[test]
    fn test_successor_prefers_later_on_tie() {
        let outline = Outline::new(notched(), Tolerance::NEAR).unwrap();
        // from (10,10), (6,10), (4,10) and (0,10) all turn 90 degrees
        assert_eq!(outline.successor(2).unwrap(), 7);
        assert_eq!(outline.successor(0).unwrap(), 1);
    }

    #[test]
    fn test_simplify_face_in_vertical_plane() {
        let points: Vec<Point3> = notched().iter().map(|p| Point3::new(p.x, 0.0, p.y)).collect();
        let face = Face::from_polygon(&points);
        let simple = simplify_face(&face).unwrap();

        let corners = simple.outer_vertices().unwrap();
        assert_eq!(corners.len(), 4);
        for c in [(0., 0.), (10., 0.), (10., 10.), (0., 10.)] {
            assert!(corners.contains(&Point3::new(c.0, 0.0, c.1)));
        }
        assert_relative_eq!(simple.area().unwrap(), 100.0, epsilon = 1e-9);
        assert!(simple.normal().unwrap().dot(face.normal().unwrap().as_ref()) > 0.0);
    }

    #[test]
    fn test_too_few_and_degenerate() {
        assert!(matches!(
            remove_cavities(&xy(&[(0., 0.), (1., 0.)])),
            Err(SimplifyError::TooFewVertices { found: 2 })
        ));
        assert!(matches!(
            detect_winding(&xy(&[(0., 0.), (1., 0.), (2., 0.)])),
            Err(SimplifyError::DegenerateWinding)
        ));
        // bow tie: the two lobes cancel
        assert!(matches!(
            detect_winding(&xy(&[(0., 0.), (1., 1.), (1., 0.), (0., 1.)])),
            Err(SimplifyError::DegenerateWinding)
        ));
    }
}
