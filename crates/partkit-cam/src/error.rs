//! Error types for toolpath generation.

use thiserror::Error;

/// Errors from tracing, planning or configuring a toolpath.
#[derive(Debug, Error)]
pub enum CamError {
    /// No edges were selected.
    #[error("no edges selected")]
    EmptyChain,

    /// An edge does not share an endpoint with the chain built so far.
    #[error("lines don't join at element {index}: edge {edge}, last edge {previous}")]
    ChainBreak {
        /// Position of the offending element in the selection.
        index: usize,
        /// The edge that does not join.
        edge: String,
        /// The last edge of the chain.
        previous: String,
    },

    /// The leading vertex is not an endpoint of the first edge.
    #[error("start vertex {vertex} is not on the first edge {edge}")]
    DetachedStart {
        /// The leading vertex.
        vertex: String,
        /// The first edge.
        edge: String,
    },

    /// A setting is out of range.
    #[error("invalid setting {field} = {value}: {reason}")]
    InvalidSettings {
        /// Setting name.
        field: &'static str,
        /// Offending value.
        value: f64,
        /// What is wrong with it.
        reason: &'static str,
    },

    /// The settings file could not be parsed.
    #[error("invalid settings file: {0}")]
    Config(#[from] toml::de::Error),
}
