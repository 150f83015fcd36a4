//! Output shapes and the shape document.

use partkit_math::Point3;
use serde::{Deserialize, Serialize};

use crate::{Edge, Face, Shell, ShapeError, Solid, SubObject, Wire};

/// Any shape a utility can produce.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Shape {
    /// A single point.
    Vertex {
        /// Location.
        point: Point3,
    },
    /// A single edge.
    Edge(Edge),
    /// A wire.
    Wire(Wire),
    /// A planar face.
    Face(Face),
    /// A set of faces.
    Shell(Shell),
    /// A closed solid.
    Solid(Solid),
}

impl Shape {
    /// Short name of the shape kind.
    pub fn kind(&self) -> &'static str {
        match self {
            Shape::Vertex { .. } => "Vertex",
            Shape::Edge(_) => "Edge",
            Shape::Wire(_) => "Wire",
            Shape::Face(_) => "Face",
            Shape::Shell(_) => "Shell",
            Shape::Solid(_) => "Solid",
        }
    }
}

impl From<SubObject> for Shape {
    fn from(sub: SubObject) -> Self {
        match sub {
            SubObject::Vertex { point } => Shape::Vertex { point },
            SubObject::Edge(e) => Shape::Edge(e),
            SubObject::Wire(w) => Shape::Wire(w),
            SubObject::Face(f) => Shape::Face(f),
        }
    }
}

/// A shape with a display name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NamedShape {
    /// Display name.
    pub name: String,
    /// The shape.
    pub shape: Shape,
}

/// The result document written by the shape-producing utilities.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ShapeDocument {
    /// Produced shapes, in order.
    pub shapes: Vec<NamedShape>,
}

impl ShapeDocument {
    /// Document holding one shape.
    pub fn single(name: impl Into<String>, shape: Shape) -> Self {
        Self {
            shapes: vec![NamedShape {
                name: name.into(),
                shape,
            }],
        }
    }

    /// Append a shape.
    pub fn push(&mut self, name: impl Into<String>, shape: Shape) {
        self.shapes.push(NamedShape {
            name: name.into(),
            shape,
        });
    }

    /// Serialize to pretty-printed JSON.
    pub fn to_json(&self) -> Result<String, ShapeError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parse from JSON.
    pub fn from_json(json: &str) -> Result<Self, ShapeError> {
        Ok(serde_json::from_str(json)?)
    }
}
