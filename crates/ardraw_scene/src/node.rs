//! Scene nodes and their geometry.

use ardraw_math::{Mat4, Vec3};

/// Node identifier, stable for the lifetime of a [`Scene`](crate::Scene).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub u32);

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Node({})", self.0)
    }
}

/// Geometry carried by a node. Rendering is someone else's problem; the
/// scene only needs to copy it faithfully.
#[derive(Clone, Debug, PartialEq)]
pub enum Geometry {
    Empty,
    Box { width: f32, height: f32, length: f32 },
    Sphere { radius: f32 },
    Plane { width: f32, height: f32 },
    /// Model loaded from an asset catalog, referenced by name
    Model(String),
}

impl Geometry {
    pub fn name(&self) -> &str {
        match self {
            Geometry::Empty => "Empty",
            Geometry::Box { .. } => "Box",
            Geometry::Sphere { .. } => "Sphere",
            Geometry::Plane { .. } => "Plane",
            Geometry::Model(name) => name,
        }
    }
}

impl Default for Geometry {
    fn default() -> Self {
        Geometry::Empty
    }
}

/// A node in the scene tree.
///
/// Parent and children are maintained by the [`Scene`](crate::Scene) and
/// are read-only from the outside.
#[derive(Clone, Debug)]
pub struct Node {
    /// Display name
    pub name: String,
    /// Transform relative to the parent
    pub transform: Mat4,
    pub geometry: Geometry,
    /// RGBA diffuse color
    pub color: Option<[f32; 4]>,
    pub opacity: f32,
    pub hidden: bool,
    pub(crate) parent: Option<NodeId>,
    pub(crate) children: Vec<NodeId>,
}

impl Default for Node {
    fn default() -> Self {
        Self {
            name: "Node".to_string(),
            transform: Mat4::IDENTITY,
            geometry: Geometry::Empty,
            color: None,
            opacity: 1.0,
            hidden: false,
            parent: None,
            children: Vec::new(),
        }
    }
}

impl Node {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn with_geometry(mut self, geometry: Geometry) -> Self {
        self.geometry = geometry;
        self
    }

    pub fn with_transform(mut self, transform: Mat4) -> Self {
        self.transform = transform;
        self
    }

    pub fn with_position(mut self, position: Vec3) -> Self {
        self.transform = self.transform.with_translation(position);
        self
    }

    pub fn with_color(mut self, color: [f32; 4]) -> Self {
        self.color = Some(color);
        self
    }

    pub fn with_opacity(mut self, opacity: f32) -> Self {
        self.opacity = opacity;
        self
    }

    pub fn position(&self) -> Vec3 {
        self.transform.translation()
    }

    pub fn set_position(&mut self, position: Vec3) {
        self.transform = self.transform.with_translation(position);
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    /// Copy of this node's own properties with no tree links.
    pub(crate) fn detached_copy(&self) -> Self {
        Self {
            parent: None,
            children: Vec::new(),
            ..self.clone()
        }
    }
}
