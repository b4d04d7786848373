//! Error types for the scene graph

use thiserror::Error;

use crate::NodeId;

/// Scene graph errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SceneError {
    /// Handle does not refer to a node in this scene
    #[error("Node not found: {0}")]
    NodeNotFound(NodeId),

    /// Attaching would make a node its own ancestor
    #[error("Attaching {child} under {parent} would create a cycle")]
    CycleDetected { parent: NodeId, child: NodeId },

    /// The root node has no parent to be removed from
    #[error("The root node cannot be detached")]
    RootNotDetachable,

    #[error("The root node cannot be removed")]
    RootNotRemovable,
}

/// Result type for scene operations
pub type Result<T> = std::result::Result<T, SceneError>;
