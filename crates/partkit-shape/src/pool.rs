//! Tolerance-based vertex deduplication and loop walking.

use partkit_math::{Point3, Tolerance};

/// A set of distinct points, where "distinct" means not near any other.
///
/// Insertion order is preserved and indices are stable.
#[derive(Debug, Clone)]
pub struct VertexPool {
    tol: Tolerance,
    points: Vec<Point3>,
}

impl VertexPool {
    /// Create an empty pool.
    pub fn new(tol: Tolerance) -> Self {
        Self {
            tol,
            points: Vec::new(),
        }
    }

    /// Index of an existing point near `p`.
    pub fn find(&self, p: &Point3) -> Option<usize> {
        self.points
            .iter()
            .position(|q| self.tol.points_equal(p, q))
    }

    /// Insert `p` unless a near point exists; returns its index either way.
    pub fn insert(&mut self, p: Point3) -> usize {
        match self.find(&p) {
            Some(i) => i,
            None => {
                self.points.push(p);
                self.points.len() - 1
            }
        }
    }

    /// Point at index `i`.
    pub fn get(&self, i: usize) -> Point3 {
        self.points[i]
    }

    /// Number of distinct points.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Whether the pool is empty.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// All distinct points in insertion order.
    pub fn points(&self) -> &[Point3] {
        &self.points
    }
}

/// Walk an undirected graph given as index pairs, starting at `start`
/// and stepping first to `toward`.
///
/// At each vertex the first unvisited neighbour (in link order) is taken.
/// Stops when no unvisited neighbour remains; the returned path never
/// repeats a vertex.
pub(crate) fn walk_links(
    links: &[(usize, usize)],
    vertex_count: usize,
    start: usize,
    toward: usize,
) -> Vec<usize> {
    let mut adjacency: Vec<Vec<usize>> = vec![Vec::new(); vertex_count];
    for &(a, b) in links {
        adjacency[a].push(b);
        adjacency[b].push(a);
    }

    let mut visited = vec![false; vertex_count];
    let mut path = vec![start];
    visited[start] = true;
    let mut current = start;
    if start != toward {
        path.push(toward);
        visited[toward] = true;
        current = toward;
    }

    loop {
        let Some(next) = adjacency[current].iter().copied().find(|&n| !visited[n]) else {
            break;
        };
        visited[next] = true;
        path.push(next);
        current = next;
    }
    path
}

/// Whether a walked path returns to its start through one of `links`.
pub(crate) fn closes_loop(links: &[(usize, usize)], path: &[usize]) -> bool {
    let (Some(&first), Some(&last)) = (path.first(), path.last()) else {
        return false;
    };
    path.len() >= 3
        && links
            .iter()
            .any(|&(a, b)| (a == first && b == last) || (a == last && b == first))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pool_dedupes_near_points() {
        let mut pool = VertexPool::new(Tolerance::with_linear(1e-9));
        let a = pool.insert(Point3::new(1.0, 2.0, 3.0));
        let b = pool.insert(Point3::new(1.0, 2.0, 3.0 + 1e-12));
        let c = pool.insert(Point3::new(1.0, 2.0, 4.0));
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_eq!(pool.len(), 2);
    }

    #[test]
    fn test_walk_links_square() {
        // links listed out of order
        let links = [(2, 3), (0, 1), (3, 0), (1, 2)];
        let path = walk_links(&links, 4, 0, 1);
        assert_eq!(path, vec![0, 1, 2, 3]);
        assert!(closes_loop(&links, &path));
    }

    #[test]
    fn test_walk_links_open_chain() {
        let links = [(0, 1), (1, 2)];
        let path = walk_links(&links, 3, 0, 1);
        assert_eq!(path, vec![0, 1, 2]);
        assert!(!closes_loop(&links, &path));
    }
}
