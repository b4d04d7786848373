//! Drawing session state - what the AR view does with touches and anchors.
//!
//! All scene edits made on the user's behalf go through the command
//! manager, so they can be undone, redone or reset as a whole.

use std::collections::HashMap;

use ardraw_commands::{
    CommandManager, PlaceNodeCommand, PlaceNodeInFrontCommand, PlaceNodeInPlaneCommand,
};
use ardraw_math::{Vec2, Vec3};
use ardraw_scene::{Node, NodeId, Scene, SceneGraph};
use serde::{Deserialize, Serialize};

use crate::floor::Floor;
use crate::tracking::{
    Anchor, AnchorId, AnchorKind, RunOptions, TrackingConfiguration, TrackingSession,
};
use crate::{Result, SessionConfig};

/// How a touch turns into a placement.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlacementMode {
    /// In front of the camera, one object per tap
    #[default]
    Freeform,
    /// On detected planes, continuously while dragging
    Plane,
    /// On recognized reference images, as they are found
    Image,
}

impl PlacementMode {
    /// Mode for a segmented-control index.
    pub fn from_segment(index: usize) -> Option<Self> {
        match index {
            0 => Some(PlacementMode::Freeform),
            1 => Some(PlacementMode::Plane),
            2 => Some(PlacementMode::Image),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            PlacementMode::Freeform => "freeform",
            PlacementMode::Plane => "plane",
            PlacementMode::Image => "image",
        }
    }
}

impl std::fmt::Display for PlacementMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// One AR drawing session.
pub struct DrawingSession<T: TrackingSession> {
    scene: Scene,
    commands: CommandManager<dyn SceneGraph>,
    tracker: T,
    config: SessionConfig,
    mode: PlacementMode,
    /// Detached template that placements copy
    selected: Option<NodeId>,
    plane_overlays: Vec<NodeId>,
    show_plane_overlay: bool,
    anchor_nodes: HashMap<AnchorId, NodeId>,
    /// Last accepted placement of the current drag
    last_placed_position: Option<Vec3>,
}

impl<T: TrackingSession> DrawingSession<T> {
    pub fn new(tracker: T, config: SessionConfig) -> Self {
        Self {
            scene: Scene::new(),
            commands: CommandManager::new(),
            tracker,
            config,
            mode: PlacementMode::default(),
            selected: None,
            plane_overlays: Vec::new(),
            show_plane_overlay: false,
            anchor_nodes: HashMap::new(),
            last_placed_position: None,
        }
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn commands(&self) -> &CommandManager<dyn SceneGraph> {
        &self.commands
    }

    pub fn tracker(&self) -> &T {
        &self.tracker
    }

    pub fn tracker_mut(&mut self) -> &mut T {
        &mut self.tracker
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn mode(&self) -> PlacementMode {
        self.mode
    }

    pub fn selected(&self) -> Option<NodeId> {
        self.selected
    }

    pub fn show_plane_overlay(&self) -> bool {
        self.show_plane_overlay
    }

    pub fn plane_overlays(&self) -> &[NodeId] {
        &self.plane_overlays
    }

    pub fn anchor_node(&self, id: AnchorId) -> Option<NodeId> {
        self.anchor_nodes.get(&id).copied()
    }

    pub fn last_placed_position(&self) -> Option<Vec3> {
        self.last_placed_position
    }

    /// Tracking configuration for the current mode.
    pub fn tracking_configuration(&self) -> TrackingConfiguration {
        TrackingConfiguration {
            plane_detection: self.config.plane_detection,
            detection_images: (self.mode == PlacementMode::Image)
                .then(|| self.config.reference_image_group.clone()),
        }
    }

    // ========================================================================
    // Lifecycle
    // ========================================================================

    /// Start tracking (the view became visible).
    pub fn start(&mut self) {
        self.reload_configuration(false);
    }

    /// Pause tracking (the view went away).
    pub fn pause(&mut self) {
        log::info!("Pausing tracking");
        self.tracker.pause();
    }

    fn reload_configuration(&mut self, remove_anchors: bool) {
        let configuration = self.tracking_configuration();

        if remove_anchors {
            self.reset_plane_nodes();
            self.commands.reset(&mut self.scene);
            self.reset_anchor_nodes();
        }

        log::info!(
            "Running tracker: mode={}, images={:?}, remove_anchors={}",
            self.mode,
            configuration.detection_images,
            remove_anchors
        );
        self.tracker.run(
            &configuration,
            RunOptions {
                remove_existing_anchors: remove_anchors,
            },
        );
    }

    fn reset_plane_nodes(&mut self) {
        for overlay in self.plane_overlays.drain(..) {
            if let Err(e) = self.scene.remove(overlay) {
                log::warn!("Could not remove plane overlay {}: {}", overlay, e);
            }
        }
    }

    fn reset_anchor_nodes(&mut self) {
        for (_, node) in self.anchor_nodes.drain() {
            if let Err(e) = self.scene.remove(node) {
                log::warn!("Could not remove anchor node {}: {}", node, e);
            }
        }
    }

    // ========================================================================
    // Options
    // ========================================================================

    pub fn set_mode(&mut self, mode: PlacementMode) {
        self.mode = mode;
        self.set_plane_overlay_visible(mode == PlacementMode::Plane);
        self.reload_configuration(false);
    }

    /// Switch mode from a segmented-control index. Unknown indices are ignored.
    pub fn select_segment(&mut self, index: usize) -> bool {
        match PlacementMode::from_segment(index) {
            Some(mode) => {
                self.set_mode(mode);
                true
            }
            None => false,
        }
    }

    /// Make `object` the template for future placements. The previous
    /// template is dropped; objects already placed are separate copies.
    pub fn select_object(&mut self, object: Node) -> NodeId {
        log::info!("Selected object: {}", object.name);
        let id = self.scene.insert(object);
        if let Some(previous) = self.selected.replace(id) {
            if let Err(e) = self.scene.remove(previous) {
                log::warn!("Could not drop previous template {}: {}", previous, e);
            }
        }
        id
    }

    pub fn toggle_plane_overlay(&mut self) {
        self.set_plane_overlay_visible(!self.show_plane_overlay);
    }

    pub fn set_plane_overlay_visible(&mut self, visible: bool) {
        self.show_plane_overlay = visible;
        for &overlay in &self.plane_overlays {
            if let Some(node) = self.scene.get_mut(overlay) {
                node.hidden = !visible;
            }
        }
    }

    /// Undo everything placed and start tracking from scratch.
    pub fn reset_scene(&mut self) {
        log::info!("Resetting scene");
        self.reload_configuration(true);
    }

    pub fn undo(&mut self) -> bool {
        self.commands.undo(&mut self.scene)
    }

    pub fn redo(&mut self) -> bool {
        self.commands.redo(&mut self.scene)
    }

    // ========================================================================
    // Touches
    // ========================================================================

    /// Returns whether an object was placed.
    pub fn touch_began(&mut self, point: Vec2) -> Result<bool> {
        let Some(source) = self.selected else {
            return Ok(false);
        };

        match self.mode {
            PlacementMode::Freeform => self.place_in_front(source),
            PlacementMode::Plane => self.place_on_plane(source, point),
            PlacementMode::Image => Ok(false),
        }
    }

    /// Returns whether an object was placed.
    pub fn touch_moved(&mut self, point: Vec2) -> Result<bool> {
        let Some(source) = self.selected else {
            return Ok(false);
        };
        if self.mode != PlacementMode::Plane {
            return Ok(false);
        }

        self.place_on_plane(source, point)
    }

    /// The drag is over; the next placement is not spacing-gated.
    pub fn touch_ended(&mut self) {
        self.last_placed_position = None;
    }

    fn place_in_front(&mut self, source: NodeId) -> Result<bool> {
        let Some(camera) = self.tracker.camera_transform() else {
            return Ok(false);
        };

        let root = self.scene.root();
        let command = PlaceNodeInFrontCommand::from_source(
            &mut self.scene,
            source,
            root,
            camera,
            self.config.front_placement_distance,
        )?;
        Ok(self.commands.execute_command(&mut self.scene, command))
    }

    fn place_on_plane(&mut self, source: NodeId, point: Vec2) -> Result<bool> {
        let Some(hit) = self.tracker.hit_test_existing_plane(point) else {
            return Ok(false);
        };

        let root = self.scene.root();
        let command = PlaceNodeInPlaneCommand::from_source(
            &mut self.scene,
            source,
            root,
            hit,
            self.config.distance_threshold,
            self.last_placed_position,
        )?;

        match self
            .commands
            .execute_command_with(&mut self.scene, command, |c| c.placed_position())
        {
            Some(position) => {
                self.last_placed_position = position;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    // ========================================================================
    // Anchors
    // ========================================================================

    /// The tracker found a new anchor. Returns the node that represents it.
    pub fn anchor_added(&mut self, anchor: &Anchor) -> Result<NodeId> {
        if let Some(existing) = self.anchor_node(anchor.id) {
            return Ok(existing);
        }

        let root = self.scene.root();
        let node = self.scene.insert(
            Node::new(format!("anchor-{}", anchor.id.0)).with_transform(anchor.transform),
        );
        self.scene.attach(root, node)?;
        self.anchor_nodes.insert(anchor.id, node);

        match &anchor.kind {
            AnchorKind::Plane { extent, .. } => {
                let mut overlay = Floor::node(*extent, &self.config);
                overlay.hidden = !self.show_plane_overlay;
                let overlay = self.scene.insert(overlay);
                self.scene.attach(node, overlay)?;
                self.plane_overlays.push(overlay);
            }
            AnchorKind::Image { name } => {
                if let Some(source) = self.selected {
                    log::info!("Placing on image '{}'", name);
                    let command = PlaceNodeCommand::from_source(&mut self.scene, source, node)?;
                    self.commands.execute_command(&mut self.scene, command);
                }
            }
        }

        Ok(node)
    }

    /// The tracker refined an anchor.
    pub fn anchor_updated(&mut self, anchor: &Anchor) {
        let Some(node) = self.anchor_node(anchor.id) else {
            return;
        };
        if let Some(anchor_node) = self.scene.get_mut(node) {
            anchor_node.transform = anchor.transform;
        }

        let AnchorKind::Plane { center, extent } = anchor.kind else {
            return;
        };
        let Some(&first) = self.scene.children(node).first() else {
            return;
        };
        if !self.plane_overlays.contains(&first) {
            return;
        }
        if let Some(overlay) = self.scene.get_mut(first) {
            Floor::update(overlay, center, extent);
        }
    }
}
