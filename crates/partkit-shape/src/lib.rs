#![warn(missing_docs)]

//! Shape data model for the partkit utilities.
//!
//! Provides the small boundary representation every utility works on
//! (edges, wires, planar faces, shells, solids), the serialized selection
//! document that stands in for a host application's selection, and the
//! assembly utilities that need nothing more than this model:
//!
//! - [`make_triangle_face`] - a face from exactly three selected vertices
//! - [`make_shell`] / [`make_solid`] - close a set of faces into a solid
//! - [`promote_selected`] - every selected sub-object as its own shape
//! - [`merge_faces`] - join coplanar faces into one face
//!
//! # Example
//!
//! ```
//! use partkit_math::{Point3, Tolerance};
//! use partkit_shape::{merge_faces, Face};
//!
//! let a = Face::from_polygon(&[
//!     Point3::new(0.0, 0.0, 0.0),
//!     Point3::new(1.0, 0.0, 0.0),
//!     Point3::new(1.0, 1.0, 0.0),
//! ]);
//! let b = Face::from_polygon(&[
//!     Point3::new(0.0, 0.0, 0.0),
//!     Point3::new(1.0, 1.0, 0.0),
//!     Point3::new(0.0, 1.0, 0.0),
//! ]);
//!
//! let square = merge_faces(&[a, b], &Tolerance::NEAR).unwrap();
//! assert_eq!(square.outer_vertices().unwrap().len(), 4);
//! ```

mod assemble;
mod edge;
mod face;
mod merge;
mod pool;
mod selection;
mod shape;
mod wire;

pub use assemble::{
    make_shell, make_solid, make_triangle_face, promote_selected, solid_faces_from_selection,
};
pub use edge::{Curve, Edge};
pub use face::{Face, Shell, Solid};
pub use merge::{merge_faces, CountedEdge, EdgeCensus};
pub use pool::VertexPool;
pub use selection::{SelectedObject, Selection, SubObject};
pub use shape::{NamedShape, Shape, ShapeDocument};
pub use wire::Wire;

use thiserror::Error;

/// Errors from building or inspecting shapes.
#[derive(Debug, Clone, Error)]
pub enum ShapeError {
    /// A wire has no edges.
    #[error("wire has no edges")]
    EmptyWire,

    /// A wire does not form a single closed loop.
    #[error("wire is not a single closed loop: walked {visited} of {total} vertices")]
    OpenWire {
        /// Vertices reached by walking the loop.
        visited: usize,
        /// Distinct vertices in the wire.
        total: usize,
    },

    /// The polygon has no area, so it has no normal.
    #[error("face is degenerate (zero area)")]
    DegenerateFace,

    /// Wrong number of unique vertices in a selection.
    #[error("selection must contain exactly {expected} unique vertices, found {found}")]
    VertexCount {
        /// Required vertex count.
        expected: usize,
        /// Vertices actually selected.
        found: usize,
    },

    /// No faces were given.
    #[error("no faces to build from")]
    NoFaces,

    /// A shell has edges not shared by exactly two faces.
    #[error("shell is not closed: {free_edges} free edges, {non_manifold_edges} non-manifold edges")]
    OpenShell {
        /// Edges used by a single face.
        free_edges: usize,
        /// Edges used by more than two faces.
        non_manifold_edges: usize,
    },

    /// An edge is shared by more than two faces.
    #[error("edge {edge} is shared by {count} faces")]
    NonManifold {
        /// The offending edge.
        edge: String,
        /// Number of faces using it.
        count: usize,
    },

    /// A face does not lie in the plane of the first face.
    #[error("face {index} is not coplanar with face 0")]
    NotCoplanar {
        /// Index of the offending face.
        index: usize,
    },

    /// Boundary edges do not thread into one loop.
    #[error("boundary edges do not form a single loop: threaded {threaded} of {total} vertices")]
    DisconnectedBoundary {
        /// Vertices reached by threading.
        threaded: usize,
        /// Distinct boundary vertices.
        total: usize,
    },

    /// Malformed selection document.
    #[error("invalid selection document: {0}")]
    Document(String),
}

impl From<serde_json::Error> for ShapeError {
    fn from(e: serde_json::Error) -> Self {
        ShapeError::Document(e.to_string())
    }
}
