//! Edge types.

use std::f64::consts::PI;
use std::fmt;

use partkit_math::{Point3, Tolerance, Transform};
use serde::{Deserialize, Serialize};

/// The curve an edge runs along.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Curve {
    /// Straight segment.
    #[default]
    Line,
    /// Circular arc in the XY plane around `center`.
    Arc {
        /// Arc center.
        center: Point3,
        /// If true, the arc runs counter-clockwise from start to end.
        #[serde(default)]
        ccw: bool,
    },
}

/// A bounded curve between two vertices.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    /// First vertex.
    pub start: Point3,
    /// Second vertex.
    pub end: Point3,
    /// Underlying curve (straight when omitted).
    #[serde(default)]
    pub curve: Curve,
}

impl Edge {
    /// Straight edge between two points.
    pub fn line(start: Point3, end: Point3) -> Self {
        Self {
            start,
            end,
            curve: Curve::Line,
        }
    }

    /// Circular arc from `start` to `end` around `center`.
    pub fn arc(start: Point3, end: Point3, center: Point3, ccw: bool) -> Self {
        Self {
            start,
            end,
            curve: Curve::Arc { center, ccw },
        }
    }

    /// Whether this edge is a straight segment.
    pub fn is_line(&self) -> bool {
        matches!(self.curve, Curve::Line)
    }

    /// Both endpoints, in stored order.
    pub fn endpoints(&self) -> [Point3; 2] {
        [self.start, self.end]
    }

    /// Length along the curve.
    pub fn length(&self) -> f64 {
        match self.curve {
            Curve::Line => (self.end - self.start).norm(),
            Curve::Arc { center, ccw } => {
                let radius = (self.start - center).xy().norm();
                radius * self.sweep(center, ccw).abs()
            }
        }
    }

    fn sweep(&self, center: Point3, ccw: bool) -> f64 {
        let d_start = self.start - center;
        let d_end = self.end - center;
        let mut angle = d_end.y.atan2(d_end.x) - d_start.y.atan2(d_start.x);
        if ccw {
            if angle <= 0.0 {
                angle += 2.0 * PI;
            }
        } else if angle >= 0.0 {
            angle -= 2.0 * PI;
        }
        angle
    }

    /// The same edge traversed the other way (arcs flip direction).
    pub fn reversed(&self) -> Self {
        let curve = match self.curve {
            Curve::Line => Curve::Line,
            Curve::Arc { center, ccw } => Curve::Arc { center, ccw: !ccw },
        };
        Self {
            start: self.end,
            end: self.start,
            curve,
        }
    }

    /// Whether `p` coincides with either endpoint.
    pub fn touches(&self, p: &Point3, tol: &Tolerance) -> bool {
        tol.points_equal(&self.start, p) || tol.points_equal(&self.end, p)
    }

    /// Apply a rigid transform to the edge (arc centers included).
    pub fn transformed(&self, t: &Transform) -> Self {
        let curve = match self.curve {
            Curve::Line => Curve::Line,
            Curve::Arc { center, ccw } => Curve::Arc {
                center: t.apply_point(&center),
                ccw,
            },
        };
        Self {
            start: t.apply_point(&self.start),
            end: t.apply_point(&self.end),
            curve,
        }
    }
}

fn fmt_point(p: &Point3) -> String {
    format!("{}|{}|{}", p.x, p.y, p.z)
}

impl fmt::Display for Edge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = match self.curve {
            Curve::Line => "Line",
            Curve::Arc { .. } => "Arc",
        };
        write!(
            f,
            "{kind} [{} -> {}]",
            fmt_point(&self.start),
            fmt_point(&self.end)
        )
    }
}
