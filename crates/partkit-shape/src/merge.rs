//! Edge counting and coplanar face merging.

use std::collections::HashMap;

use partkit_math::{Point3, Tolerance};

use crate::pool::{closes_loop, walk_links, VertexPool};
use crate::{Edge, Face, ShapeError};

/// An edge (as a pair of pooled vertex indices) and how many faces use it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CountedEdge {
    /// Start vertex index, as first seen.
    pub a: usize,
    /// End vertex index, as first seen.
    pub b: usize,
    /// Number of face boundaries using the edge.
    pub count: usize,
}

/// How often each edge occurs across a set of faces.
///
/// Edges are matched by their endpoints (after tolerance deduplication),
/// regardless of direction. An edge used once lies on the boundary of the
/// set; an edge used twice is shared between two faces.
#[derive(Debug, Clone)]
pub struct EdgeCensus {
    pool: VertexPool,
    edges: Vec<CountedEdge>,
}

impl EdgeCensus {
    /// Count every boundary edge of every face.
    pub fn from_faces(faces: &[Face], tol: &Tolerance) -> Self {
        let mut pool = VertexPool::new(*tol);
        let mut edges: Vec<CountedEdge> = Vec::new();
        let mut index: HashMap<(usize, usize), usize> = HashMap::new();

        for edge in faces.iter().flat_map(Face::edges) {
            let a = pool.insert(edge.start);
            let b = pool.insert(edge.end);
            let key = (a.min(b), a.max(b));
            match index.get(&key) {
                Some(&i) => edges[i].count += 1,
                None => {
                    index.insert(key, edges.len());
                    edges.push(CountedEdge { a, b, count: 1 });
                }
            }
        }
        Self { pool, edges }
    }

    /// Distinct vertices seen.
    pub fn vertices(&self) -> &[Point3] {
        self.pool.points()
    }

    /// All counted edges in first-seen order.
    pub fn edges(&self) -> &[CountedEdge] {
        &self.edges
    }

    /// Edges used by exactly one face.
    pub fn boundary(&self) -> Vec<CountedEdge> {
        self.with_count(|c| c == 1)
    }

    /// Edges shared by exactly two faces.
    pub fn internal(&self) -> Vec<CountedEdge> {
        self.with_count(|c| c == 2)
    }

    /// Edges shared by more than two faces.
    pub fn non_manifold(&self) -> Vec<CountedEdge> {
        self.with_count(|c| c > 2)
    }

    fn with_count(&self, keep: impl Fn(usize) -> bool) -> Vec<CountedEdge> {
        self.edges.iter().copied().filter(|e| keep(e.count)).collect()
    }

    /// The edge as geometry.
    pub fn edge(&self, e: &CountedEdge) -> Edge {
        Edge::line(self.pool.get(e.a), self.pool.get(e.b))
    }

    /// Thread the boundary edges into one ordered vertex loop.
    ///
    /// Threading starts at the last boundary edge and follows its direction.
    pub fn boundary_loop(&self) -> Result<Vec<Point3>, ShapeError> {
        let boundary = self.boundary();
        let links: Vec<(usize, usize)> = boundary.iter().map(|e| (e.a, e.b)).collect();
        let Some(&(start, toward)) = links.last() else {
            return Err(ShapeError::DisconnectedBoundary {
                threaded: 0,
                total: 0,
            });
        };

        let mut used = vec![false; self.pool.len()];
        for &(a, b) in &links {
            used[a] = true;
            used[b] = true;
        }
        let total = used.iter().filter(|&&u| u).count();

        let path = walk_links(&links, self.pool.len(), start, toward);
        if path.len() != total || !closes_loop(&links, &path) {
            return Err(ShapeError::DisconnectedBoundary {
                threaded: path.len(),
                total,
            });
        }
        log::debug!("threaded {} boundary vertices", path.len());
        Ok(path.into_iter().map(|i| self.pool.get(i)).collect())
    }
}

/// Merge coplanar faces into a single face.
///
/// Shared edges are dropped and the remaining boundary is rethreaded into
/// one loop. The result keeps the first face's normal direction.
pub fn merge_faces(faces: &[Face], tol: &Tolerance) -> Result<Face, ShapeError> {
    let first = faces.first().ok_or(ShapeError::NoFaces)?;
    let normal = first.normal()?;
    let origin = first.outer_vertices()?[0];

    for (index, face) in faces.iter().enumerate().skip(1) {
        let off_plane = face
            .edges()
            .flat_map(|e| e.endpoints())
            .any(|p| !tol.is_zero((p - origin).dot(normal.as_ref())));
        if off_plane {
            return Err(ShapeError::NotCoplanar { index });
        }
    }

    let census = EdgeCensus::from_faces(faces, tol);
    if let Some(e) = census.non_manifold().first() {
        return Err(ShapeError::NonManifold {
            edge: census.edge(e).to_string(),
            count: e.count,
        });
    }
    log::info!(
        "merging {} faces: {} boundary edges, {} internal edges",
        faces.len(),
        census.boundary().len(),
        census.internal().len()
    );

    let path = census.boundary_loop()?;
    let merged = Face::from_polygon(&path);
    if merged.normal()?.dot(normal.as_ref()) < 0.0 {
        return Ok(merged.reversed());
    }
    Ok(merged)
}
