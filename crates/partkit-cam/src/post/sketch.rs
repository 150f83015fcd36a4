//! Bare feed moves at a fixed depth, for pasting into another program.

use super::{format_coord, PostProcessor, PostState};
use crate::{ArcDir, Toolpath, ToolpathSegment};

/// Writes only cutting moves, each carrying the same Z.
///
/// The move to the start point is written as a feed, comments and rapids
/// are dropped, and the program ends with a feed to the final point.
#[derive(Debug, Clone, Copy)]
pub struct SketchPost {
    /// Z written on every line.
    pub z_cut: f64,
}

impl Default for SketchPost {
    fn default() -> Self {
        Self { z_cut: -3.0 }
    }
}

impl SketchPost {
    /// Post writing every move at `z_cut`.
    pub fn new(z_cut: f64) -> Self {
        Self { z_cut }
    }

    fn feed_to(&self, x: f64, y: f64) -> String {
        format!(
            "G01 X{} Y{} Z{}\n",
            format_coord(x),
            format_coord(y),
            format_coord(self.z_cut)
        )
    }
}

impl PostProcessor for SketchPost {
    fn header(&self, _toolpath: &Toolpath) -> String {
        String::new()
    }

    fn segment(&self, seg: &ToolpathSegment, state: &mut PostState) -> String {
        match seg {
            ToolpathSegment::Comment { .. } => String::new(),
            ToolpathSegment::Rapid { to, .. } | ToolpathSegment::Linear { to, .. } => {
                state.move_to(to);
                if to.is_planar() {
                    self.feed_to(state.x, state.y)
                } else {
                    String::new()
                }
            }
            ToolpathSegment::Arc {
                to,
                center_offset,
                dir,
            } => {
                state.x = to[0];
                state.y = to[1];
                let code = match dir {
                    ArcDir::Cw => "G02",
                    ArcDir::Ccw => "G03",
                };
                format!(
                    "{code} X{} Y{} Z{} I{} J{}\n",
                    format_coord(to[0]),
                    format_coord(to[1]),
                    format_coord(self.z_cut),
                    format_coord(center_offset[0]),
                    format_coord(center_offset[1])
                )
            }
        }
    }

    fn footer(&self, state: &PostState) -> String {
        self.feed_to(state.x, state.y)
    }
}
