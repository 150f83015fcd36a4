//! Machine-independent toolpath representation.

use serde::{Deserialize, Serialize};

/// Target of a straight move. Axes left as `None` keep their position.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Axes {
    /// X target.
    pub x: Option<f64>,
    /// Y target.
    pub y: Option<f64>,
    /// Z target.
    pub z: Option<f64>,
}

impl Axes {
    /// Move in Z only.
    pub fn z(z: f64) -> Self {
        Self {
            z: Some(z),
            ..Self::default()
        }
    }

    /// Move in X and Y only.
    pub fn xy(x: f64, y: f64) -> Self {
        Self {
            x: Some(x),
            y: Some(y),
            z: None,
        }
    }

    /// Whether the move changes X or Y.
    pub fn is_planar(&self) -> bool {
        self.x.is_some() || self.y.is_some()
    }
}

/// Arc direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ArcDir {
    /// Clockwise (G02).
    Cw,
    /// Counter-clockwise (G03).
    Ccw,
}

impl ArcDir {
    /// Direction for an arc's `ccw` flag.
    pub fn from_ccw(ccw: bool) -> Self {
        if ccw {
            ArcDir::Ccw
        } else {
            ArcDir::Cw
        }
    }
}

/// A single toolpath segment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ToolpathSegment {
    /// Operator comment.
    Comment {
        /// Comment text.
        text: String,
    },
    /// Rapid (non-cutting) move.
    Rapid {
        /// Target.
        to: Axes,
        /// Trailing comment.
        comment: Option<String>,
    },
    /// Straight cutting move.
    Linear {
        /// Target.
        to: Axes,
        /// Feed rate (mm/min).
        feed: f64,
        /// Trailing comment.
        comment: Option<String>,
    },
    /// Arc in the XY plane.
    Arc {
        /// End point X, Y.
        to: [f64; 2],
        /// Center relative to the arc start (I, J).
        center_offset: [f64; 2],
        /// Direction.
        dir: ArcDir,
    },
}

/// An ordered list of toolpath segments.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Toolpath {
    /// Segments in execution order.
    pub segments: Vec<ToolpathSegment>,
}

impl Toolpath {
    /// Empty toolpath.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a segment.
    pub fn push(&mut self, segment: ToolpathSegment) {
        self.segments.push(segment);
    }

    /// Append a comment.
    pub fn comment(&mut self, text: &str) {
        self.push(ToolpathSegment::Comment { text: text.into() });
    }

    /// Number of segments.
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Whether there are no segments.
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Number of cutting moves (straight or arc).
    pub fn cutting_moves(&self) -> usize {
        self.segments
            .iter()
            .filter(|s| matches!(s, ToolpathSegment::Linear { .. } | ToolpathSegment::Arc { .. }))
            .count()
    }
}
