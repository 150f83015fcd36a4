#![warn(missing_docs)]

//! Outline simplification for planar faces.
//!
//! Walks a face's outer boundary and keeps only the vertices of its
//! outermost turning path: concave notches and collinear midpoints are
//! skipped, leaving the outline a cutter or saw would follow.

mod outline;

pub use outline::{detect_winding, remove_cavities, simplify_face, Outline, Winding};

use partkit_shape::ShapeError;
use thiserror::Error;

/// Errors from outline simplification.
#[derive(Debug, Clone, Error)]
pub enum SimplifyError {
    /// Not enough vertices for a closed outline.
    #[error("outline needs at least 3 vertices, found {found}")]
    TooFewVertices {
        /// Vertices given.
        found: usize,
    },

    /// The turning angles cancel out, so the outline has no winding direction.
    #[error("outline has no winding direction (self-intersecting or degenerate)")]
    DegenerateWinding,

    /// No vertex is reachable from the given vertex without turning outward.
    #[error("no successor found for vertex {index}")]
    NoSuccessor {
        /// Vertex index in the input outline.
        index: usize,
    },

    /// The successor path closed onto a vertex other than its start.
    #[error("successor path rejoined at vertex {rejoined_at} instead of closing at vertex {}", .path.first().copied().unwrap_or_default())]
    OpenPath {
        /// Vertex indices visited, in order.
        path: Vec<usize>,
        /// Vertex the path ran back into.
        rejoined_at: usize,
    },

    /// The face boundary is malformed.
    #[error(transparent)]
    Shape(#[from] ShapeError),
}

impl SimplifyError {
    /// For [`SimplifyError::OpenPath`], the closed part of the path: the
    /// vertices from `rejoined_at` onward.
    pub fn cycle(&self) -> Option<&[usize]> {
        match self {
            SimplifyError::OpenPath { path, rejoined_at } => {
                let at = path.iter().position(|i| i == rejoined_at)?;
                Some(&path[at..])
            }
            _ => None,
        }
    }
}
