//! # ardraw_scene - Scene Graph
//!
//! Node tree that placed objects are attached to. Nodes are addressed by
//! [`NodeId`] handles, so commands can refer to a container without
//! owning it.
//!
//! ```text
//! root
//! ├── placed object (from a PlaceNodeInFrontCommand)
//! └── anchor node
//!     ├── plane overlay
//!     └── placed object (from a PlaceNodeCommand)
//! ```

mod error;
mod graph;
mod node;
mod scene;

pub use error::{Result, SceneError};
pub use graph::SceneGraph;
pub use node::{Geometry, Node, NodeId};
pub use scene::Scene;
