//! Arena-backed scene tree.
//!
//! Every node lives in the scene's map for as long as the scene does.
//! Attaching and detaching only rewires parent/child links, so a detached
//! node keeps its properties and can be attached again later.

use std::collections::HashMap;

use ardraw_math::{Mat4, Vec3};

use crate::{Node, NodeId, Result, SceneError, SceneGraph};

/// Scene tree with a permanent root node.
pub struct Scene {
    nodes: HashMap<NodeId, Node>,
    root: NodeId,
    next_node_id: u32,
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

impl Scene {
    pub fn new() -> Self {
        let root = NodeId(0);
        let mut nodes = HashMap::new();
        nodes.insert(root, Node::new("root"));

        Self {
            nodes,
            root,
            next_node_id: 1,
        }
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Number of nodes in the arena, attached or not. Never zero: the
    /// root is always there.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains_key(&id)
    }

    fn next_node_id(&mut self) -> NodeId {
        let id = NodeId(self.next_node_id);
        self.next_node_id += 1;
        id
    }

    /// Add a node to the arena. It starts detached; any tree links the
    /// value carries are dropped.
    pub fn insert(&mut self, node: Node) -> NodeId {
        let id = self.next_node_id();
        self.nodes.insert(id, node.detached_copy());
        id
    }

    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(&id)
    }

    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(&id)
    }

    fn node(&self, id: NodeId) -> Result<&Node> {
        self.nodes.get(&id).ok_or(SceneError::NodeNotFound(id))
    }

    fn node_mut(&mut self, id: NodeId) -> Result<&mut Node> {
        self.nodes.get_mut(&id).ok_or(SceneError::NodeNotFound(id))
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes.get(&id).and_then(|n| n.parent)
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.nodes.get(&id).map(|n| n.children.as_slice()).unwrap_or(&[])
    }

    /// Whether `ancestor` appears on the parent chain of `id` (or is `id`).
    pub fn is_ancestor(&self, ancestor: NodeId, id: NodeId) -> bool {
        let mut current = Some(id);
        while let Some(node) = current {
            if node == ancestor {
                return true;
            }
            current = self.parent(node);
        }
        false
    }

    /// Whether the node is reachable from the root.
    pub fn is_attached(&self, id: NodeId) -> bool {
        self.contains(id) && self.is_ancestor(self.root, id)
    }

    /// Attach `child` as the last child of `parent`.
    pub fn attach(&mut self, parent: NodeId, child: NodeId) -> Result<()> {
        self.node(parent)?;
        self.node(child)?;
        if child == self.root || self.is_ancestor(child, parent) {
            return Err(SceneError::CycleDetected { parent, child });
        }

        self.detach(child)?;
        self.node_mut(child)?.parent = Some(parent);
        self.node_mut(parent)?.children.push(child);
        Ok(())
    }

    /// Detach `child` from its parent. Detaching a detached node is a no-op.
    pub fn detach(&mut self, child: NodeId) -> Result<()> {
        if child == self.root {
            return Err(SceneError::RootNotDetachable);
        }

        let Some(parent) = self.node_mut(child)?.parent.take() else {
            return Ok(());
        };
        if let Some(parent) = self.nodes.get_mut(&parent) {
            parent.children.retain(|&id| id != child);
        }
        Ok(())
    }

    /// Detach `id` and drop it together with its subtree. Handles into the
    /// removed subtree become unknown.
    pub fn remove(&mut self, id: NodeId) -> Result<()> {
        if id == self.root {
            return Err(SceneError::RootNotRemovable);
        }

        self.detach(id)?;
        for node in self.descendants(id) {
            self.nodes.remove(&node);
        }
        Ok(())
    }

    /// Deep-copy `source` and its descendants. The copy is detached.
    pub fn duplicate(&mut self, source: NodeId) -> Result<NodeId> {
        let copy = self.node(source)?.detached_copy();
        let children = self.node(source)?.children.clone();

        let id = self.insert(copy);
        for child in children {
            let child_copy = self.duplicate(child)?;
            self.attach(id, child_copy)?;
        }
        Ok(id)
    }

    /// Transform of the node in root space.
    pub fn world_transform(&self, id: NodeId) -> Option<Mat4> {
        let node = self.nodes.get(&id)?;
        match node.parent {
            Some(parent) => Some(self.world_transform(parent)? * node.transform),
            None => Some(node.transform),
        }
    }

    /// Ids of every node reachable from `id`, depth first, `id` included.
    pub fn descendants(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack = vec![id];
        while let Some(next) = stack.pop() {
            if !self.contains(next) {
                continue;
            }
            out.push(next);
            stack.extend(self.children(next).iter().rev());
        }
        out
    }
}

impl SceneGraph for Scene {
    fn duplicate(&mut self, source: NodeId) -> Result<NodeId> {
        Scene::duplicate(self, source)
    }

    fn add_child(&mut self, parent: NodeId, child: NodeId) {
        if let Err(e) = self.attach(parent, child) {
            log::warn!("Could not attach {} to {}: {}", child, parent, e);
        }
    }

    fn remove_from_parent(&mut self, node: NodeId) {
        if let Err(e) = self.detach(node) {
            log::warn!("Could not detach {}: {}", node, e);
        }
    }

    fn release(&mut self, node: NodeId) {
        if node == self.root || self.parent(node).is_some() {
            return;
        }
        if let Err(e) = self.remove(node) {
            log::warn!("Could not release {}: {}", node, e);
        }
    }

    fn position(&self, node: NodeId) -> Option<Vec3> {
        self.get(node).map(Node::position)
    }

    fn set_position(&mut self, node: NodeId, position: Vec3) {
        match self.get_mut(node) {
            Some(n) => n.set_position(position),
            None => log::warn!("Cannot move unknown {}", node),
        }
    }

    fn transform(&self, node: NodeId) -> Option<Mat4> {
        self.get(node).map(|n| n.transform)
    }

    fn set_transform(&mut self, node: NodeId, transform: Mat4) {
        match self.get_mut(node) {
            Some(n) => n.transform = transform,
            None => log::warn!("Cannot transform unknown {}", node),
        }
    }
}
