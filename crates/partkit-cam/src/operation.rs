//! Planning a traced chain into a toolpath.

use partkit_math::Point3;
use partkit_shape::{Curve, Edge};

use crate::post::PostProcessor;
use crate::{
    trace_chain, ArcDir, Axes, CamError, CamSettings, ChainElement, DepthMode, Toolpath,
    ToolpathSegment, TracedChain,
};

/// Straight moves at least this many slow lengths long get a fast section.
const SPLIT_FACTOR: f64 = 2.5;

/// Plan the moves that cut along `chain`.
///
/// Geometry coordinates are shifted by the origin offset; the rapid height
/// is already in machine coordinates.
pub fn plan_toolpath(chain: &TracedChain, settings: &CamSettings) -> Result<Toolpath, CamError> {
    let first = chain.edges.first().ok_or(CamError::EmptyChain)?;
    let [ox, oy, oz] = settings.origin_offset;
    let start = first.start;
    let mut toolpath = Toolpath::new();

    toolpath.comment("Move to start");
    toolpath.push(ToolpathSegment::Rapid {
        to: Axes::z(settings.z_rapid),
        comment: None,
    });
    toolpath.push(ToolpathSegment::Rapid {
        to: Axes::xy(start.x - ox, start.y - oy),
        comment: None,
    });
    let z_cut = match settings.profile.depth {
        DepthMode::FromGeometry => start.z - oz,
        DepthMode::Fixed { z_cut } => z_cut,
    };
    toolpath.push(ToolpathSegment::Linear {
        to: Axes::z(z_cut),
        feed: settings.plunge_rate,
        comment: Some("Plunge".into()),
    });
    toolpath.comment("Program");

    for edge in &chain.edges {
        feed_along(&mut toolpath, edge, settings);
    }

    toolpath.push(ToolpathSegment::Rapid {
        to: Axes::z(settings.z_rapid),
        comment: Some("Retract".into()),
    });
    log::debug!(
        "planned {} cutting moves for {} edges",
        toolpath.cutting_moves(),
        chain.edges.len()
    );
    Ok(toolpath)
}

fn feed_along(toolpath: &mut Toolpath, edge: &Edge, settings: &CamSettings) {
    let [ox, oy, _] = settings.origin_offset;
    let to = |p: Point3| Axes::xy(p.x - ox, p.y - oy);

    match edge.curve {
        Curve::Line => {
            let profile = &settings.profile;
            let Some(slow) = profile.slow_corners else {
                toolpath.push(linear(to(edge.end), profile.feed_rate));
                return;
            };
            let length = edge.length();
            if length >= SPLIT_FACTOR * slow.slow_len {
                let back = (edge.start - edge.end) / length * slow.slow_len;
                toolpath.push(linear(to(edge.end + back), profile.feed_rate));
            }
            toolpath.push(linear(to(edge.end), slow.slow_rate));
        }
        Curve::Arc { center, ccw } => {
            toolpath.push(ToolpathSegment::Arc {
                to: [edge.end.x - ox, edge.end.y - oy],
                center_offset: [center.x - edge.start.x, center.y - edge.start.y],
                dir: ArcDir::from_ccw(ccw),
            });
        }
    }
}

fn linear(to: Axes, feed: f64) -> ToolpathSegment {
    ToolpathSegment::Linear {
        to,
        feed,
        comment: None,
    }
}

/// Trace, plan and post-process a selected chain into G-code text.
///
/// Nothing is produced when the chain does not join up.
pub fn emit_gcode(
    elements: &[ChainElement],
    settings: &CamSettings,
    post: &dyn PostProcessor,
) -> Result<String, CamError> {
    settings.validate()?;
    let chain = trace_chain(elements, &settings.join_tolerance)?;
    let toolpath = plan_toolpath(&chain, settings)?;
    log::info!(
        "{} profile: {} edges, {} toolpath segments",
        settings.profile.name,
        chain.edges.len(),
        toolpath.len()
    );
    Ok(post.generate(&toolpath))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::post::MacroPost;
    use crate::MachiningProfile;
    use approx::assert_relative_eq;

    fn p(x: f64, y: f64, z: f64) -> Point3 {
        Point3::new(x, y, z)
    }

    fn chain_of(edges: Vec<Edge>) -> TracedChain {
        TracedChain { edges }
    }

    fn feeds(toolpath: &Toolpath) -> Vec<(f64, f64, f64)> {
        toolpath
            .segments
            .iter()
            .filter_map(|s| match s {
                ToolpathSegment::Linear { to, feed, .. } if to.is_planar() => {
                    Some((to.x.unwrap_or(f64::NAN), to.y.unwrap_or(f64::NAN), *feed))
                }
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_long_line_gets_fast_and_slow_feed() {
        let chain = chain_of(vec![Edge::line(p(0., 0., 20.), p(20., 0., 20.))]);
        let toolpath = plan_toolpath(&chain, &CamSettings::default()).unwrap();
        let moves = feeds(&toolpath);
        assert_eq!(moves.len(), 2);
        assert_relative_eq!(moves[0].0, 16.0);
        assert_relative_eq!(moves[0].1, 3.0);
        assert_eq!(moves[0].2, 200.0);
        assert_relative_eq!(moves[1].0, 20.0);
        assert_eq!(moves[1].2, 100.0);
    }

    #[test]
    fn test_short_line_is_all_slow() {
        // 9.99 < 2.5 * 4
        let chain = chain_of(vec![Edge::line(p(0., 0., 20.), p(9.99, 0., 20.))]);
        let moves = feeds(&plan_toolpath(&chain, &CamSettings::default()).unwrap());
        assert_eq!(moves.len(), 1);
        assert_eq!(moves[0].2, 100.0);
    }

    #[test]
    fn test_split_threshold_is_inclusive() {
        // exactly 2.5 * 4
        let chain = chain_of(vec![Edge::line(p(0., 0., 20.), p(10., 0., 20.))]);
        let moves = feeds(&plan_toolpath(&chain, &CamSettings::default()).unwrap());
        assert_eq!(moves.len(), 2);
        assert_relative_eq!(moves[0].0, 6.0);
        assert_eq!(moves[0].2, 200.0);
        assert_relative_eq!(moves[1].0, 10.0);
        assert_eq!(moves[1].2, 100.0);
    }

    #[test]
    fn test_contour_profile_never_splits() {
        let settings = CamSettings::with_profile(MachiningProfile::contour());
        let chain = chain_of(vec![Edge::line(p(0., 0., 20.), p(50., 0., 20.))]);
        let moves = feeds(&plan_toolpath(&chain, &settings).unwrap());
        assert_eq!(moves.len(), 1);
        assert_eq!(moves[0].2, 200.0);
    }

    #[test]
    fn test_arc_offsets_relative_to_start() {
        let settings = CamSettings {
            origin_offset: [0.0; 3],
            ..CamSettings::default()
        };
        let chain = chain_of(vec![
            Edge::arc(p(10., 0., 0.), p(0., 10., 0.), p(0., 0., 0.), true),
            Edge::arc(p(0., 10., 0.), p(10., 0., 0.), p(0., 0., 0.), false),
        ]);
        let toolpath = plan_toolpath(&chain, &settings).unwrap();
        let arcs: Vec<_> = toolpath
            .segments
            .iter()
            .filter(|s| matches!(s, ToolpathSegment::Arc { .. }))
            .collect();
        assert_eq!(
            arcs[0],
            &ToolpathSegment::Arc {
                to: [0.0, 10.0],
                center_offset: [-10.0, 0.0],
                dir: ArcDir::Ccw,
            }
        );
        assert_eq!(
            arcs[1],
            &ToolpathSegment::Arc {
                to: [10.0, 0.0],
                center_offset: [0.0, -10.0],
                dir: ArcDir::Cw,
            }
        );
    }

    #[test]
    fn test_plunge_depth() {
        let chain = chain_of(vec![Edge::line(p(0., 0., 18.), p(1., 0., 18.))]);
        let plunge = |settings: &CamSettings| {
            plan_toolpath(&chain, settings)
                .unwrap()
                .segments
                .iter()
                .find_map(|s| match s {
                    ToolpathSegment::Linear { to, feed, .. } if !to.is_planar() => {
                        Some((to.z, *feed))
                    }
                    _ => None,
                })
        };
        assert_eq!(plunge(&CamSettings::default()), Some((Some(-2.0), 100.0)));
        assert_eq!(plunge(&CamSettings::sketch()), Some((Some(-3.0), 100.0)));
    }

    #[test]
    fn test_emit_gcode_macro() {
        let elements = vec![
            ChainElement::Edge(Edge::line(p(0., 0., 20.), p(10., 0., 20.))),
            ChainElement::Edge(Edge::line(p(10., 2., 20.), p(10., 0., 20.))),
        ];
        let gcode = emit_gcode(&elements, &CamSettings::default(), &MacroPost).unwrap();
        let expected = "\n----------\n%\nG54 G21 G90 G40\n\n\
                        (Move to start)\n\
                        G00 Z1.000\n\
                        G00 X0.000 Y3.000\n\
                        G01 Z0.000 F100 (Plunge)\n\
                        (Program)\n\
                        G01 X6.000 Y3.000 F200\n\
                        G01 X10.000 Y3.000 F100\n\
                        G01 X10.000 Y5.000 F100\n\
                        G00 Z1.000 (Retract)\n\
                        \n\
                        M30 (Program End)\n%\n";
        assert_eq!(gcode, expected);
    }

    #[test]
    fn test_broken_chain_emits_nothing() {
        let elements = vec![
            ChainElement::Edge(Edge::line(p(0., 0., 0.), p(1., 0., 0.))),
            ChainElement::Edge(Edge::line(p(3., 0., 0.), p(4., 0., 0.))),
        ];
        let result = emit_gcode(&elements, &CamSettings::default(), &MacroPost);
        assert!(matches!(result, Err(CamError::ChainBreak { index: 1, .. })));
    }

    #[test]
    fn test_emit_gcode_rejects_bad_settings() {
        let mut settings = CamSettings::default();
        settings.profile.feed_rate = f64::INFINITY;
        let elements = vec![ChainElement::Edge(Edge::line(p(0., 0., 0.), p(1., 0., 0.)))];
        assert!(matches!(
            emit_gcode(&elements, &settings, &MacroPost),
            Err(CamError::InvalidSettings { field: "feed_rate", .. })
        ));
    }
}
