#![warn(missing_docs)]

//! Unfolding of bent face chains.
//!
//! A chain starts at a reference ("primary") face and alternates bend
//! edges and faces: `primary, edge, face, edge, face, ...`. Each face is
//! joined to the previous one along its bend edge. Unfolding rotates the
//! outermost face about every bend, outermost first, until it lies in the
//! plane of the primary face, producing a flat pattern piece.
//!
//! # Example
//!
//! ```
//! use partkit_math::Point3;
//! use partkit_shape::{Edge, Face};
//! use partkit_unfold::{unfold, BendChain, UnfoldOptions};
//!
//! let p = Point3::new;
//! // bottom of a unit cube (normal -Z) and its x=0 side (normal -X)
//! let bottom = Face::from_polygon(&[p(0., 0., 0.), p(0., 1., 0.), p(1., 1., 0.), p(1., 0., 0.)]);
//! let side = Face::from_polygon(&[p(0., 0., 0.), p(0., 0., 1.), p(0., 1., 1.), p(0., 1., 0.)]);
//! let bend = Edge::line(p(0., 0., 0.), p(0., 1., 0.));
//!
//! let chain = BendChain::new(bottom, vec![(bend, side)]);
//! let report = unfold(&chain, &UnfoldOptions::default()).unwrap();
//! assert!((report.face.normal().unwrap().z + 1.0).abs() < 1e-12);
//! ```

mod bend;
mod chain;

pub use bend::{calculate_bend, AppliedBend, Bend, BendResolution};
pub use chain::{unfold, unfold_all, BendChain, UnfoldOptions, UnfoldReport};

use partkit_shape::ShapeError;
use thiserror::Error;

/// Errors from unfolding.
#[derive(Debug, Clone, Error)]
pub enum UnfoldError {
    /// The selection is empty.
    #[error("nothing selected: a chain needs at least the primary face")]
    EmptyChain,

    /// The selection does not alternate face, edge, face.
    #[error("malformed bend chain at position {index}: expected {expected}, found {found}")]
    MalformedChain {
        /// Position in the flattened selection.
        index: usize,
        /// What should be there.
        expected: &'static str,
        /// What was there.
        found: &'static str,
    },

    /// A bend edge has coincident endpoints, so it has no axis.
    #[error("bend edge {index} has zero length")]
    ZeroAxis {
        /// Bend index (0 = first bend after the primary face).
        index: usize,
    },

    /// After rotating, the face still does not match the expected normal.
    #[error("bend {index} did not flatten: normal {normal:?}, expected {expected:?}")]
    DidNotFlatten {
        /// Bend index.
        index: usize,
        /// Normal after rotation.
        normal: [f64; 3],
        /// Normal it should have.
        expected: [f64; 3],
    },

    /// A face in the chain is malformed.
    #[error(transparent)]
    Shape(#[from] ShapeError),
}
