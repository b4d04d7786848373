//! Interface to the AR tracking collaborator.
//!
//! World tracking, plane detection, image recognition and hit-testing are
//! provided by the platform. The session only needs the handful of calls
//! below and the anchors the platform reports.

use ardraw_math::{Mat4, Vec2, Vec3};
use serde::{Deserialize, Serialize};

/// Which plane orientations to detect.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlaneDetection {
    #[default]
    Horizontal,
    Vertical,
}

/// Configuration the tracker is (re)started with.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TrackingConfiguration {
    pub plane_detection: PlaneDetection,
    /// Reference image group to recognize. `None` disables image detection.
    pub detection_images: Option<String>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RunOptions {
    /// Drop every anchor found so far
    pub remove_existing_anchors: bool,
}

/// AR tracking session as seen by the drawing session.
pub trait TrackingSession {
    fn run(&mut self, configuration: &TrackingConfiguration, options: RunOptions);

    fn pause(&mut self);

    /// Camera pose of the current frame, if a frame is available.
    fn camera_transform(&self) -> Option<Mat4>;

    /// World transform of the nearest detected plane under a screen point,
    /// limited to the plane's estimated extent.
    fn hit_test_existing_plane(&self, point: Vec2) -> Option<Mat4>;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AnchorId(pub u64);

impl std::fmt::Display for AnchorId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Anchor({})", self.0)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum AnchorKind {
    /// Detected plane. `center` is relative to the anchor, `extent` is the
    /// estimated size (x and z are used).
    Plane { center: Vec3, extent: Vec3 },
    /// Recognized reference image
    Image { name: String },
}

/// Anchor reported by the tracker.
#[derive(Clone, Debug, PartialEq)]
pub struct Anchor {
    pub id: AnchorId,
    pub transform: Mat4,
    pub kind: AnchorKind,
}

impl Anchor {
    pub fn plane(id: u64, transform: Mat4, center: Vec3, extent: Vec3) -> Self {
        Self {
            id: AnchorId(id),
            transform,
            kind: AnchorKind::Plane { center, extent },
        }
    }

    pub fn image(id: u64, transform: Mat4, name: impl Into<String>) -> Self {
        Self {
            id: AnchorId(id),
            transform,
            kind: AnchorKind::Image { name: name.into() },
        }
    }
}

/// Tracker driven by explicit state, for replays and tests.
#[derive(Clone, Debug, Default)]
pub struct ScriptedTracker {
    pub camera: Option<Mat4>,
    pub hit: Option<Mat4>,
    /// Every `run` call, in order
    pub runs: Vec<(TrackingConfiguration, RunOptions)>,
    pub paused: bool,
}

impl ScriptedTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last_run(&self) -> Option<&(TrackingConfiguration, RunOptions)> {
        self.runs.last()
    }
}

impl TrackingSession for ScriptedTracker {
    fn run(&mut self, configuration: &TrackingConfiguration, options: RunOptions) {
        self.runs.push((configuration.clone(), options));
        self.paused = false;
    }

    fn pause(&mut self) {
        self.paused = true;
    }

    fn camera_transform(&self) -> Option<Mat4> {
        self.camera
    }

    fn hit_test_existing_plane(&self, _point: Vec2) -> Option<Mat4> {
        self.hit
    }
}
