//! The narrow scene interface that placement commands are written against.

use ardraw_math::{Mat4, Vec3};

use crate::{NodeId, Result};

/// Capabilities a placement command needs from a scene graph.
///
/// Mutators are infallible: an implementation that receives an unknown
/// handle leaves the scene untouched. Only duplication reports failure,
/// since a command cannot be built without its copy.
pub trait SceneGraph {
    /// Deep-copy `source` and its subtree. The copy starts detached and
    /// shares no mutable state with the original.
    fn duplicate(&mut self, source: NodeId) -> Result<NodeId>;

    /// Attach `child` as the last child of `parent`, moving it out of any
    /// previous parent.
    fn add_child(&mut self, parent: NodeId, child: NodeId);

    /// Detach `node` from its parent. Detached nodes are left alone.
    fn remove_from_parent(&mut self, node: NodeId);

    /// Drop a detached node the caller no longer needs, with its subtree.
    /// Attached nodes stay where they are.
    fn release(&mut self, node: NodeId);

    fn position(&self, node: NodeId) -> Option<Vec3>;

    fn set_position(&mut self, node: NodeId, position: Vec3);

    fn transform(&self, node: NodeId) -> Option<Mat4>;

    fn set_transform(&mut self, node: NodeId, transform: Mat4);
}
