//! Joining selected edges into one directed chain.

use partkit_math::{Point3, Tolerance};
use partkit_shape::{Edge, SubObject};
use serde::{Deserialize, Serialize};

use crate::CamError;

/// One selected element of a chain.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ChainElement {
    /// An edge to cut along.
    Edge(Edge),
    /// A vertex. Only meaningful as the first element, where it fixes the
    /// start point; skipped anywhere else.
    Vertex {
        /// Location.
        point: Point3,
    },
}

impl ChainElement {
    /// Convert a selected sub-object. Wires contribute their edges in
    /// order; faces are not chain elements.
    pub fn from_sub_object(sub: &SubObject) -> Vec<Self> {
        match sub {
            SubObject::Vertex { point } => vec![ChainElement::Vertex { point: *point }],
            SubObject::Edge(e) => vec![ChainElement::Edge(e.clone())],
            SubObject::Wire(w) => w.edges.iter().cloned().map(ChainElement::Edge).collect(),
            SubObject::Face(_) => {
                log::warn!("skipping face in edge chain");
                Vec::new()
            }
        }
    }
}

/// Edges oriented head to tail in cutting order.
#[derive(Debug, Clone, PartialEq)]
pub struct TracedChain {
    /// Edges, each running from the previous edge's end to its own end.
    pub edges: Vec<Edge>,
}

impl TracedChain {
    /// Where cutting starts.
    pub fn start(&self) -> Option<Point3> {
        self.edges.first().map(|e| e.start)
    }

    /// Where cutting ends.
    pub fn end(&self) -> Option<Point3> {
        self.edges.last().map(|e| e.end)
    }
}

/// Orient selected edges into one continuous chain.
///
/// Each edge is turned so that it starts at the end of the chain so far.
/// The first edge runs toward the endpoint it shares with the second edge,
/// or away from a leading vertex if one was given. A lone edge keeps its
/// stored direction.
pub fn trace_chain(elements: &[ChainElement], tol: &Tolerance) -> Result<TracedChain, CamError> {
    let mut lead = None;
    let mut edges: Vec<(usize, &Edge)> = Vec::new();
    for (index, element) in elements.iter().enumerate() {
        match element {
            ChainElement::Edge(e) => edges.push((index, e)),
            ChainElement::Vertex { point } if index == 0 => lead = Some(*point),
            ChainElement::Vertex { point } => {
                log::warn!(
                    "skipping vertex {}|{}|{} at element {index}",
                    point.x,
                    point.y,
                    point.z
                );
            }
        }
    }

    let Some(&(_, first)) = edges.first() else {
        return Err(CamError::EmptyChain);
    };
    let first = match (lead, edges.get(1)) {
        (Some(v), _) => start_at(first, &v, tol).ok_or_else(|| CamError::DetachedStart {
            vertex: format!("{}|{}|{}", v.x, v.y, v.z),
            edge: first.to_string(),
        })?,
        (None, Some(&(index, second))) => {
            if second.touches(&first.end, tol) {
                first.clone()
            } else if second.touches(&first.start, tol) {
                first.reversed()
            } else {
                return Err(break_at(index, second, first));
            }
        }
        (None, None) => first.clone(),
    };

    let mut traced = vec![first];
    for &(index, edge) in &edges[1..] {
        let previous = &traced[traced.len() - 1];
        let next = start_at(edge, &previous.end, tol)
            .ok_or_else(|| break_at(index, edge, previous))?;
        log::debug!("element {index}: {next}");
        traced.push(next);
    }

    log::info!("traced chain of {} edges", traced.len());
    Ok(TracedChain { edges: traced })
}

/// The edge oriented to start at `p`, if `p` is one of its endpoints.
fn start_at(edge: &Edge, p: &Point3, tol: &Tolerance) -> Option<Edge> {
    if tol.points_equal(&edge.start, p) {
        Some(edge.clone())
    } else if tol.points_equal(&edge.end, p) {
        Some(edge.reversed())
    } else {
        None
    }
}

fn break_at(index: usize, edge: &Edge, previous: &Edge) -> CamError {
    CamError::ChainBreak {
        index,
        edge: edge.to_string(),
        previous: previous.to_string(),
    }
}
