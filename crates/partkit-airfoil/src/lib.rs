#![warn(missing_docs)]

//! Airfoil profiles as planar faces.
//!
//! Reads the common two-column `.dat` coordinate format (a name line, then
//! one `x y` pair per line), scales the profile to a target chord and lays
//! it into a YZ station plane, ready to be extruded or lofted into a wing.
//!
//! # Example
//!
//! ```
//! use partkit_airfoil::{AirfoilImport, AirfoilProfile};
//!
//! let text = "FLAT PLATE\n1.0 0.0\n0.0 0.01\n0.0 -0.01\n1.0 0.0\n";
//! let profile = AirfoilProfile::parse(text).unwrap();
//! let face = AirfoilImport::default().build_face(&profile).unwrap();
//! assert_eq!(face.outer.edges.len(), 3);
//! ```

mod import;
mod profile;

pub use import::AirfoilImport;
pub use profile::AirfoilProfile;

use thiserror::Error;

/// Errors from airfoil import.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AirfoilError {
    /// A coordinate line could not be read.
    #[error("line {line}: expected two numbers, found {content:?}")]
    Parse {
        /// 1-based line number.
        line: usize,
        /// The offending line.
        content: String,
    },

    /// Not enough points for a face.
    #[error("airfoil needs at least 3 distinct points, found {found}")]
    TooFewPoints {
        /// Points read.
        found: usize,
    },

    /// All points share one X coordinate, so the chord cannot be scaled.
    #[error("airfoil has zero chord length")]
    ZeroChord,
}
