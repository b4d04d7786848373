//! Commands that place a copy of an object into a container node.
//!
//! All three share the same lifecycle: `execute` attaches the target to the
//! container, `undo` detaches it, `redo` attaches it again. They differ in
//! how the target is positioned before the first attach.
//!
//! The container is referenced by handle only and must stay alive in the
//! scene for as long as the command is in history.

use ardraw_math::{Mat4, Vec3};
use ardraw_scene::{NodeId, Result, SceneGraph};

use crate::Command;

/// Attach the target to the container wherever the target already sits.
pub struct PlaceNodeCommand {
    target: NodeId,
    container: NodeId,
    executed: bool,
}

impl PlaceNodeCommand {
    /// Build around a node that is already a private copy.
    pub fn new(target: NodeId, container: NodeId) -> Self {
        Self {
            target,
            container,
            executed: false,
        }
    }

    /// Copy `source` and build a command around the copy.
    pub fn from_source<G>(graph: &mut G, source: NodeId, container: NodeId) -> Result<Self>
    where
        G: SceneGraph + ?Sized,
    {
        let target = graph.duplicate(source)?;
        Ok(Self::new(target, container))
    }

    pub fn target(&self) -> NodeId {
        self.target
    }

}

impl Command<dyn SceneGraph> for PlaceNodeCommand {
    fn description(&self) -> &str {
        "Place Node"
    }

    fn is_executed(&self) -> bool {
        self.executed
    }

    fn execute(&mut self, graph: &mut (dyn SceneGraph + 'static)) {
        graph.add_child(self.container, self.target);
        self.executed = true;
    }

    fn undo(&mut self, graph: &mut (dyn SceneGraph + 'static)) {
        if !self.executed {
            return;
        }
        graph.remove_from_parent(self.target);
    }

    fn redo(&mut self, graph: &mut (dyn SceneGraph + 'static)) {
        if !self.executed {
            return;
        }
        graph.add_child(self.container, self.target);
    }

    fn discard(&mut self, graph: &mut (dyn SceneGraph + 'static)) {
        graph.release(self.target);
    }
}

/// Place the target `distance` in front of where the camera was when the
/// command was built.
pub struct PlaceNodeInFrontCommand {
    target: NodeId,
    container: NodeId,
    camera_transform: Mat4,
    distance: f32,
    executed: bool,
}

impl PlaceNodeInFrontCommand {
    pub fn new(target: NodeId, container: NodeId, camera_transform: Mat4, distance: f32) -> Self {
        Self {
            target,
            container,
            camera_transform,
            distance,
            executed: false,
        }
    }

    pub fn from_source<G>(
        graph: &mut G,
        source: NodeId,
        container: NodeId,
        camera_transform: Mat4,
        distance: f32,
    ) -> Result<Self>
    where
        G: SceneGraph + ?Sized,
    {
        let target = graph.duplicate(source)?;
        Ok(Self::new(target, container, camera_transform, distance))
    }

    pub fn target(&self) -> NodeId {
        self.target
    }

    /// Transform the target receives: the offset is taken along the
    /// camera's local -Z, then mapped by the camera transform.
    pub fn placement_transform(&self) -> Mat4 {
        let offset = Mat4::from_translation(Vec3::new(0.0, 0.0, -self.distance));
        self.camera_transform * offset
    }
}

impl Command<dyn SceneGraph> for PlaceNodeInFrontCommand {
    fn description(&self) -> &str {
        "Place Node In Front"
    }

    fn is_executed(&self) -> bool {
        self.executed
    }

    fn execute(&mut self, graph: &mut (dyn SceneGraph + 'static)) {
        graph.set_transform(self.target, self.placement_transform());
        graph.add_child(self.container, self.target);
        self.executed = true;
    }

    fn undo(&mut self, graph: &mut (dyn SceneGraph + 'static)) {
        if !self.executed {
            return;
        }
        graph.remove_from_parent(self.target);
    }

    fn redo(&mut self, graph: &mut (dyn SceneGraph + 'static)) {
        if !self.executed {
            return;
        }
        graph.add_child(self.container, self.target);
    }

    fn discard(&mut self, graph: &mut (dyn SceneGraph + 'static)) {
        graph.release(self.target);
    }
}

/// Place the target at the translation of a world transform (usually a
/// plane hit), but only if it lands more than `distance_threshold` away
/// from the previous placement of the same drag.
///
/// Unlike the other placement commands, `is_executed` is recomputed on
/// every `execute`. `redo` never re-checks the gate.
pub struct PlaceNodeInPlaneCommand {
    target: NodeId,
    container: NodeId,
    transform: Mat4,
    distance_threshold: f32,
    last_placed_position: Option<Vec3>,
    placed_position: Option<Vec3>,
    executed: bool,
}

impl PlaceNodeInPlaneCommand {
    pub fn new(
        target: NodeId,
        container: NodeId,
        transform: Mat4,
        distance_threshold: f32,
        last_placed_position: Option<Vec3>,
    ) -> Self {
        Self {
            target,
            container,
            transform,
            distance_threshold,
            last_placed_position,
            placed_position: None,
            executed: false,
        }
    }

    pub fn from_source<G>(
        graph: &mut G,
        source: NodeId,
        container: NodeId,
        transform: Mat4,
        distance_threshold: f32,
        last_placed_position: Option<Vec3>,
    ) -> Result<Self>
    where
        G: SceneGraph + ?Sized,
    {
        let target = graph.duplicate(source)?;
        Ok(Self::new(target, container, transform, distance_threshold, last_placed_position))
    }

    pub fn target(&self) -> NodeId {
        self.target
    }

    /// Where the target was put by the last accepted `execute`.
    pub fn placed_position(&self) -> Option<Vec3> {
        self.placed_position
    }

    /// Distance from the previous placement of the drag, if there was one.
    pub fn spacing(&self) -> Option<f32> {
        let position = self.transform.translation();
        self.last_placed_position.map(|last| position.distance(last))
    }

    /// The first placement of a drag always passes, whatever the threshold.
    fn passes_gate(&self) -> bool {
        self.spacing()
            .map_or(true, |distance| self.distance_threshold < distance)
    }
}

impl Command<dyn SceneGraph> for PlaceNodeInPlaneCommand {
    fn description(&self) -> &str {
        "Place Node In Plane"
    }

    fn is_executed(&self) -> bool {
        self.executed
    }

    fn execute(&mut self, graph: &mut (dyn SceneGraph + 'static)) {
        if self.passes_gate() {
            let position = self.transform.translation();
            graph.set_position(self.target, position);
            graph.add_child(self.container, self.target);
            self.placed_position = Some(position);
            self.executed = true;
        } else {
            log::trace!(
                "Placement rejected: {:?} within threshold {}",
                self.spacing(),
                self.distance_threshold
            );
            self.executed = false;
        }
    }

    fn undo(&mut self, graph: &mut (dyn SceneGraph + 'static)) {
        if !self.executed {
            return;
        }
        graph.remove_from_parent(self.target);
    }

    fn redo(&mut self, graph: &mut (dyn SceneGraph + 'static)) {
        if !self.executed {
            return;
        }
        graph.add_child(self.container, self.target);
    }

    fn discard(&mut self, graph: &mut (dyn SceneGraph + 'static)) {
        graph.release(self.target);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use ardraw_scene::{Geometry, Node, Scene};

    fn scene_with_source() -> (Scene, NodeId) {
        let mut scene = Scene::new();
        let source = scene.insert(
            Node::new("cube")
                .with_geometry(Geometry::Box { width: 0.1, height: 0.1, length: 0.1 })
                .with_position(Vec3::new(0.0, 0.3, 0.0)),
        );
        (scene, source)
    }

    fn hit_at(position: Vec3) -> Mat4 {
        Mat4::from_translation(position)
    }

    #[test]
    fn test_place_node_keeps_own_position() {
        let (mut scene, source) = scene_with_source();
        let root = scene.root();
        let mut cmd = PlaceNodeCommand::from_source(&mut scene, source, root).unwrap();

        cmd.execute(&mut scene);

        assert!(cmd.is_executed());
        assert_eq!(scene.children(root), &[cmd.target()]);
        assert_eq!(scene.get(cmd.target()).unwrap().position(), Vec3::new(0.0, 0.3, 0.0));
        assert!(!scene.is_attached(source));
    }

    #[test]
    fn test_place_node_undo_redo() {
        let (mut scene, source) = scene_with_source();
        let root = scene.root();
        let mut cmd = PlaceNodeCommand::from_source(&mut scene, source, root).unwrap();

        cmd.execute(&mut scene);
        cmd.undo(&mut scene);
        assert!(scene.children(root).is_empty());
        assert!(cmd.is_executed());

        cmd.redo(&mut scene);
        assert_eq!(scene.children(root), &[cmd.target()]);
    }

    #[test]
    fn test_undo_redo_before_execute_are_noops() {
        let (mut scene, source) = scene_with_source();
        let root = scene.root();
        let mut cmd = PlaceNodeCommand::from_source(&mut scene, source, root).unwrap();

        cmd.redo(&mut scene);
        assert!(scene.children(root).is_empty());
        cmd.undo(&mut scene);
        assert!(!cmd.is_executed());
    }

    #[test]
    fn test_from_source_unknown_node() {
        let mut scene = Scene::new();
        let root = scene.root();
        assert!(PlaceNodeCommand::from_source(&mut scene, NodeId(7), root).is_err());
    }

    #[test]
    fn test_in_front_uses_camera_snapshot() {
        let (mut scene, source) = scene_with_source();
        let root = scene.root();
        let camera = Mat4::from_translation(Vec3::new(1.0, 1.5, 2.0));
        let mut cmd =
            PlaceNodeInFrontCommand::from_source(&mut scene, source, root, camera, 0.2).unwrap();

        cmd.execute(&mut scene);

        let placed = scene.get(cmd.target()).unwrap().position();
        assert_relative_eq!(placed.x, 1.0, epsilon = 1e-6);
        assert_relative_eq!(placed.y, 1.5, epsilon = 1e-6);
        assert_relative_eq!(placed.z, 1.8, epsilon = 1e-6);
        assert!(cmd.is_executed());
    }

    #[test]
    fn test_in_front_follows_camera_orientation() {
        let (mut scene, source) = scene_with_source();
        let root = scene.root();
        // Turned to face -X
        let camera = Mat4::from_rotation_y(ardraw_math::consts::FRAC_PI_2);
        let mut cmd =
            PlaceNodeInFrontCommand::from_source(&mut scene, source, root, camera, 0.5).unwrap();

        cmd.execute(&mut scene);

        let transform = scene.get(cmd.target()).unwrap().transform;
        assert_relative_eq!(transform.translation().x, -0.5, epsilon = 1e-6);
        assert_relative_eq!(transform.translation().z, 0.0, epsilon = 1e-6);
        // The placed object takes the camera's orientation too
        assert_eq!(transform.cols[0], camera.cols[0]);
    }

    #[test]
    fn test_in_front_copies_are_independent() {
        let (mut scene, source) = scene_with_source();
        let root = scene.root();
        let camera = Mat4::IDENTITY;
        let mut first =
            PlaceNodeInFrontCommand::from_source(&mut scene, source, root, camera, 0.2).unwrap();
        let mut second =
            PlaceNodeInFrontCommand::from_source(&mut scene, source, root, camera, 0.4).unwrap();

        first.execute(&mut scene);
        second.execute(&mut scene);
        first.undo(&mut scene);

        assert_eq!(scene.children(root), &[second.target()]);
        assert_ne!(first.target(), second.target());
    }

    #[test]
    fn test_plane_first_placement_always_passes() {
        for threshold in [0.05, 1000.0, f32::MAX, f32::INFINITY, f32::NAN] {
            let (mut scene, source) = scene_with_source();
            let root = scene.root();
            let mut cmd = PlaceNodeInPlaneCommand::from_source(
                &mut scene, source, root, hit_at(Vec3::ZERO), threshold, None,
            )
            .unwrap();

            cmd.execute(&mut scene);

            assert!(cmd.is_executed(), "threshold {threshold} rejected a first placement");
            assert_eq!(cmd.spacing(), None);
            assert_eq!(cmd.placed_position(), Some(Vec3::ZERO));
            assert!(scene.is_attached(cmd.target()));
        }
    }

    #[test]
    fn test_discard_releases_only_detached_targets() {
        let (mut scene, source) = scene_with_source();
        let root = scene.root();
        let mut rejected = PlaceNodeInPlaneCommand::from_source(
            &mut scene,
            source,
            root,
            hit_at(Vec3::new(0.0, 0.0, 0.01)),
            0.05,
            Some(Vec3::ZERO),
        )
        .unwrap();
        let mut placed = PlaceNodeCommand::from_source(&mut scene, source, root).unwrap();

        rejected.execute(&mut scene);
        placed.execute(&mut scene);
        rejected.discard(&mut scene);
        placed.discard(&mut scene);

        assert!(!scene.contains(rejected.target()));
        assert!(scene.is_attached(placed.target()));
        assert!(scene.contains(source));
    }

    #[test]
    fn test_plane_rejects_close_placement() {
        let (mut scene, source) = scene_with_source();
        let root = scene.root();
        let mut cmd = PlaceNodeInPlaneCommand::from_source(
            &mut scene,
            source,
            root,
            hit_at(Vec3::new(0.0, 0.0, 0.03)),
            0.05,
            Some(Vec3::ZERO),
        )
        .unwrap();

        cmd.execute(&mut scene);

        assert!(!cmd.is_executed());
        assert_eq!(cmd.placed_position(), None);
        assert!(!scene.is_attached(cmd.target()));
    }

    #[test]
    fn test_plane_accepts_spaced_placement() {
        let (mut scene, source) = scene_with_source();
        let root = scene.root();
        let p1 = Vec3::new(0.0, 0.0, 0.10);
        let mut cmd = PlaceNodeInPlaneCommand::from_source(
            &mut scene, source, root, hit_at(p1), 0.05, Some(Vec3::ZERO),
        )
        .unwrap();

        cmd.execute(&mut scene);

        assert!(cmd.is_executed());
        assert_eq!(cmd.placed_position(), Some(p1));
        assert_eq!(scene.get(cmd.target()).unwrap().position(), p1);
        assert!(scene.is_attached(cmd.target()));
    }

    #[test]
    fn test_plane_spacing_equal_to_threshold_is_rejected() {
        let (mut scene, source) = scene_with_source();
        let root = scene.root();
        let mut cmd = PlaceNodeInPlaneCommand::from_source(
            &mut scene,
            source,
            root,
            hit_at(Vec3::new(0.0, 0.0, 0.5)),
            0.5,
            Some(Vec3::ZERO),
        )
        .unwrap();

        cmd.execute(&mut scene);
        assert!(!cmd.is_executed());
    }

    #[test]
    fn test_plane_redo_skips_gate() {
        let (mut scene, source) = scene_with_source();
        let root = scene.root();
        let mut cmd = PlaceNodeInPlaneCommand::from_source(
            &mut scene, source, root, hit_at(Vec3::new(1.0, 0.0, 0.0)), 0.05, None,
        )
        .unwrap();

        cmd.execute(&mut scene);
        cmd.undo(&mut scene);
        assert!(!scene.is_attached(cmd.target()));

        cmd.redo(&mut scene);
        assert!(scene.is_attached(cmd.target()));
        assert!(cmd.is_executed());
    }
}
