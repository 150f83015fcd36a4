//! Wires: ordered sequences of edges.

use partkit_math::{Point3, Tolerance, Transform};
use serde::{Deserialize, Serialize};

use crate::pool::{closes_loop, walk_links, VertexPool};
use crate::{Edge, ShapeError};

/// An ordered sequence of edges.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Wire {
    /// The edges, in order.
    pub edges: Vec<Edge>,
}

impl Wire {
    /// Create a wire from edges.
    pub fn new(edges: Vec<Edge>) -> Self {
        Self { edges }
    }

    /// Closed polygon through `points`; the closing edge is added.
    pub fn polygon(points: &[Point3]) -> Self {
        let n = points.len();
        let edges = (0..n)
            .map(|i| Edge::line(points[i], points[(i + 1) % n]))
            .collect();
        Self { edges }
    }

    /// Open polyline through `points`.
    pub fn polyline(points: &[Point3]) -> Self {
        let edges = points
            .windows(2)
            .map(|w| Edge::line(w[0], w[1]))
            .collect();
        Self { edges }
    }

    /// Whether the wire has no edges.
    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    /// Every edge endpoint, in edge order (shared vertices repeat).
    pub fn endpoints(&self) -> impl Iterator<Item = Point3> + '_ {
        self.edges.iter().flat_map(|e| e.endpoints())
    }

    /// The distinct vertices of a closed wire in loop order.
    ///
    /// Edge order and edge direction in the wire do not matter: the loop is
    /// found by walking vertex adjacency, starting at the first edge's start
    /// and heading to that edge's end, so the result follows the first
    /// edge's direction.
    pub fn ordered_vertices(&self, tol: &Tolerance) -> Result<Vec<Point3>, ShapeError> {
        let first = self.edges.first().ok_or(ShapeError::EmptyWire)?;

        let mut pool = VertexPool::new(*tol);
        let links: Vec<(usize, usize)> = self
            .edges
            .iter()
            .map(|e| (pool.insert(e.start), pool.insert(e.end)))
            .collect();

        let start = pool.insert(first.start);
        let toward = pool.insert(first.end);
        let path = walk_links(&links, pool.len(), start, toward);

        if path.len() != pool.len() || !closes_loop(&links, &path) {
            return Err(ShapeError::OpenWire {
                visited: path.len(),
                total: pool.len(),
            });
        }
        Ok(path.into_iter().map(|i| pool.get(i)).collect())
    }

    /// The wire traversed in the opposite direction.
    pub fn reversed(&self) -> Self {
        Self {
            edges: self.edges.iter().rev().map(Edge::reversed).collect(),
        }
    }

    /// Apply a rigid transform to every edge.
    pub fn transformed(&self, t: &Transform) -> Self {
        Self {
            edges: self.edges.iter().map(|e| e.transformed(t)).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square() -> Vec<Point3> {
        vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(1.0, 1.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
        ]
    }

    #[test]
    fn test_polygon_closes() {
        let w = Wire::polygon(&square());
        assert_eq!(w.edges.len(), 4);
        assert_eq!(w.edges[3].end, Point3::origin());
    }

    #[test]
    fn test_ordered_vertices_ignores_edge_order_and_direction() {
        let p = square();
        let w = Wire::new(vec![
            Edge::line(p[0], p[1]),
            Edge::line(p[3], p[2]),
            Edge::line(p[0], p[3]),
            Edge::line(p[2], p[1]),
        ]);
        let ordered = w.ordered_vertices(&Tolerance::NEAR).unwrap();
        assert_eq!(ordered, p);
    }

    #[test]
    fn test_ordered_vertices_rejects_open_wire() {
        let w = Wire::polyline(&square());
        assert!(matches!(
            w.ordered_vertices(&Tolerance::NEAR),
            Err(ShapeError::OpenWire { .. })
        ));
        assert!(matches!(
            Wire::default().ordered_vertices(&Tolerance::NEAR),
            Err(ShapeError::EmptyWire)
        ));
    }

    #[test]
    fn test_reversed() {
        let w = Wire::polygon(&square()).reversed();
        let ordered = w.ordered_vertices(&Tolerance::NEAR).unwrap();
        assert_eq!(ordered[0], Point3::origin());
        assert_eq!(ordered[1], Point3::new(0.0, 1.0, 0.0));
    }
}
