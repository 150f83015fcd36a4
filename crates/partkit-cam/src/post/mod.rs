//! Post-processors for converting toolpaths to G-code text.

mod macro_post;
mod sketch;

pub use macro_post::MacroPost;
pub use sketch::SketchPost;

use partkit_math::round_to;

use crate::{Axes, Toolpath, ToolpathSegment};

/// Decimal places written for every coordinate.
pub const PRECISION: usize = 3;

/// Position tracked during post-processing.
#[derive(Debug, Clone, Copy, Default)]
pub struct PostState {
    /// Current X position.
    pub x: f64,
    /// Current Y position.
    pub y: f64,
    /// Current Z position.
    pub z: f64,
}

impl PostState {
    /// Record a move.
    pub fn move_to(&mut self, to: &Axes) {
        if let Some(x) = to.x {
            self.x = x;
        }
        if let Some(y) = to.y {
            self.y = y;
        }
        if let Some(z) = to.z {
            self.z = z;
        }
    }
}

/// Trait for post-processors that convert toolpaths to G-code.
pub trait PostProcessor {
    /// Text written before the first segment.
    fn header(&self, toolpath: &Toolpath) -> String;

    /// G-code for a single segment; may be empty.
    fn segment(&self, seg: &ToolpathSegment, state: &mut PostState) -> String;

    /// Text written after the last segment.
    fn footer(&self, state: &PostState) -> String;

    /// Generate the complete program.
    fn generate(&self, toolpath: &Toolpath) -> String {
        let mut output = self.header(toolpath);
        let mut state = PostState::default();
        for seg in &toolpath.segments {
            output.push_str(&self.segment(seg, &mut state));
        }
        output.push_str(&self.footer(&state));
        output
    }
}

/// Format a coordinate with three decimals, never as `-0.000`.
pub fn format_coord(value: f64) -> String {
    format!("{:.prec$}", round_to(value, PRECISION as i32), prec = PRECISION)
}

/// Address words (`X.. Y.. Z..`) for the axes a move sets.
pub fn axis_words(to: &Axes) -> String {
    [("X", to.x), ("Y", to.y), ("Z", to.z)]
        .into_iter()
        .filter_map(|(letter, value)| value.map(|v| format!("{letter}{}", format_coord(v))))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Feed rate word value: integral rates print without decimals.
pub fn format_feed(feed: f64) -> String {
    format!("{feed}")
}
