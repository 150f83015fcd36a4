//! Selection documents.
//!
//! A selection is what a user picked, in the order they picked it: a list
//! of objects, each with the sub-objects (faces, edges, vertices) chosen on
//! it. Utilities read selections; they never modify them.

use partkit_math::Point3;
use serde::{Deserialize, Serialize};

use crate::{Edge, Face, ShapeError, Wire};

/// A picked piece of an object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum SubObject {
    /// A vertex.
    Vertex {
        /// Location.
        point: Point3,
    },
    /// An edge.
    Edge(Edge),
    /// A wire.
    Wire(Wire),
    /// A face.
    Face(Face),
}

impl SubObject {
    /// Short name of the sub-object kind.
    pub fn kind(&self) -> &'static str {
        match self {
            SubObject::Vertex { .. } => "Vertex",
            SubObject::Edge(_) => "Edge",
            SubObject::Wire(_) => "Wire",
            SubObject::Face(_) => "Face",
        }
    }

    /// Every vertex of the sub-object (edge endpoints repeat).
    pub fn vertices(&self) -> Vec<Point3> {
        match self {
            SubObject::Vertex { point } => vec![*point],
            SubObject::Edge(e) => e.endpoints().to_vec(),
            SubObject::Wire(w) => w.endpoints().collect(),
            SubObject::Face(f) => f.edges().flat_map(|e| e.endpoints()).collect(),
        }
    }

    /// The face, if this is one.
    pub fn as_face(&self) -> Option<&Face> {
        match self {
            SubObject::Face(f) => Some(f),
            _ => None,
        }
    }

    /// The edge, if this is one.
    pub fn as_edge(&self) -> Option<&Edge> {
        match self {
            SubObject::Edge(e) => Some(e),
            _ => None,
        }
    }
}

/// One selected object.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SelectedObject {
    /// Object name.
    pub name: String,
    /// Every face of the object's shape (may be empty).
    #[serde(default)]
    pub faces: Vec<Face>,
    /// Sub-objects picked on this object, in pick order.
    #[serde(default)]
    pub sub_objects: Vec<SubObject>,
}

/// An ordered selection.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Selection {
    /// Selected objects, in pick order.
    pub objects: Vec<SelectedObject>,
}

impl Selection {
    /// Single-object selection holding the given sub-objects.
    pub fn of(sub_objects: Vec<SubObject>) -> Self {
        Self {
            objects: vec![SelectedObject {
                name: "Selection".into(),
                faces: Vec::new(),
                sub_objects,
            }],
        }
    }

    /// Parse a selection document from JSON.
    pub fn from_json(json: &str) -> Result<Self, ShapeError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serialize to pretty-printed JSON.
    pub fn to_json(&self) -> Result<String, ShapeError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// All sub-objects of all objects, flattened in pick order.
    pub fn sub_objects(&self) -> impl Iterator<Item = &SubObject> {
        self.objects.iter().flat_map(|o| o.sub_objects.iter())
    }

    /// Whether nothing is selected.
    pub fn is_empty(&self) -> bool {
        self.objects.iter().all(|o| o.sub_objects.is_empty() && o.faces.is_empty())
    }
}
