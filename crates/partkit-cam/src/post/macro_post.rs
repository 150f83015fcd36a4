//! The standard post: a framed program with comments, rapids and feeds.

use super::{axis_words, format_coord, format_feed, PostProcessor, PostState};
use crate::{ArcDir, Toolpath, ToolpathSegment};

/// Metric, absolute G-code in work offset G54, ending with `M30`.
#[derive(Debug, Clone, Copy, Default)]
pub struct MacroPost;

impl PostProcessor for MacroPost {
    fn header(&self, _toolpath: &Toolpath) -> String {
        "\n----------\n%\nG54 G21 G90 G40\n\n".into()
    }

    fn segment(&self, seg: &ToolpathSegment, state: &mut PostState) -> String {
        match seg {
            ToolpathSegment::Comment { text } => format!("({text})\n"),
            ToolpathSegment::Rapid { to, comment } => {
                state.move_to(to);
                line(format!("G00 {}", axis_words(to)), comment.as_deref())
            }
            ToolpathSegment::Linear { to, feed, comment } => {
                state.move_to(to);
                line(
                    format!("G01 {} F{}", axis_words(to), format_feed(*feed)),
                    comment.as_deref(),
                )
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
                    "{code} X{} Y{} I{} J{}\n",
                    format_coord(to[0]),
                    format_coord(to[1]),
                    format_coord(center_offset[0]),
                    format_coord(center_offset[1])
                )
            }
        }
    }

    fn footer(&self, _state: &PostState) -> String {
        "\nM30 (Program End)\n%\n".into()
    }
}

fn line(body: String, comment: Option<&str>) -> String {
    match comment {
        Some(c) => format!("{body} ({c})\n"),
        None => format!("{body}\n"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Axes;

    #[test]
    fn test_arc_words() {
        let mut state = PostState::default();
        let cw = ToolpathSegment::Arc {
            to: [0.0, 10.0],
            center_offset: [-10.0, 0.0],
            dir: ArcDir::Cw,
        };
        assert_eq!(
            MacroPost.segment(&cw, &mut state),
            "G02 X0.000 Y10.000 I-10.000 J0.000\n"
        );
        let ccw = ToolpathSegment::Arc {
            to: [10.0, 0.0],
            center_offset: [0.0, -10.0],
            dir: ArcDir::Ccw,
        };
        assert_eq!(
            MacroPost.segment(&ccw, &mut state),
            "G03 X10.000 Y0.000 I0.000 J-10.000\n"
        );
        assert_eq!((state.x, state.y), (10.0, 0.0));
    }

    #[test]
    fn test_comments_and_framing() {
        let mut toolpath = Toolpath::new();
        toolpath.comment("Program");
        toolpath.push(ToolpathSegment::Rapid {
            to: Axes::z(1.0),
            comment: Some("Retract".into()),
        });
        assert_eq!(
            MacroPost.generate(&toolpath),
            "\n----------\n%\nG54 G21 G90 G40\n\n(Program)\nG00 Z1.000 (Retract)\n\nM30 (Program End)\n%\n"
        );
    }
}
