//! Scripted event replay
//!
//! Drives a [`DrawingSession`] from a TOML list of events instead of a
//! live AR view. Tracker state (camera pose, hit-test result) is part of
//! the script.
//!
//! ```toml
//! [[event]]
//! kind = "select"
//! name = "sphere"
//! shape = "sphere"
//! size = 0.02
//!
//! [[event]]
//! kind = "camera"
//! position = { x = 0.0, y = 1.5, z = 0.0 }
//!
//! [[event]]
//! kind = "touch_began"
//! ```

use std::fmt::Write as _;
use std::path::Path;

use ardraw_math::{Mat4, Vec2, Vec3};
use ardraw_scene::{Geometry, Node, NodeId, Scene};
use serde::Deserialize;

use crate::session::{DrawingSession, PlacementMode};
use crate::tracking::{Anchor, AnchorId, ScriptedTracker};
use crate::{Result, SessionError};

/// Shape of a selected object
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Shape {
    #[default]
    Sphere,
    Box,
    /// Model asset named after the object
    Model,
}

fn default_size() -> f32 {
    0.02
}

/// One step of a replay
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Event {
    Start,
    Pause,
    Select {
        name: String,
        #[serde(default)]
        shape: Shape,
        #[serde(default = "default_size")]
        size: f32,
    },
    Mode {
        mode: PlacementMode,
    },
    Segment {
        index: usize,
    },
    /// Camera pose of the current frame
    Camera {
        position: Vec3,
        /// Rotation about Y, radians
        #[serde(default)]
        yaw: f32,
    },
    /// Subsequent hit-tests land here
    Hit {
        position: Vec3,
    },
    /// Subsequent hit-tests find nothing
    Miss,
    TouchBegan {
        #[serde(default)]
        x: f32,
        #[serde(default)]
        y: f32,
    },
    TouchMoved {
        #[serde(default)]
        x: f32,
        #[serde(default)]
        y: f32,
    },
    TouchEnded,
    PlaneDetected {
        id: u64,
        #[serde(default)]
        position: Vec3,
        #[serde(default)]
        center: Vec3,
        extent: Vec3,
    },
    PlaneUpdated {
        id: u64,
        #[serde(default)]
        position: Vec3,
        #[serde(default)]
        center: Vec3,
        extent: Vec3,
    },
    ImageDetected {
        id: u64,
        name: String,
        #[serde(default)]
        position: Vec3,
    },
    Undo,
    Redo,
    Reset,
    ToggleOverlay,
}

impl Event {
    pub fn apply(&self, session: &mut DrawingSession<ScriptedTracker>) -> Result<()> {
        match self {
            Event::Start => session.start(),
            Event::Pause => session.pause(),
            Event::Select { name, shape, size } => {
                let geometry = match shape {
                    Shape::Sphere => Geometry::Sphere { radius: *size },
                    Shape::Box => Geometry::Box {
                        width: *size,
                        height: *size,
                        length: *size,
                    },
                    Shape::Model => Geometry::Model(name.clone()),
                };
                session.select_object(Node::new(name.as_str()).with_geometry(geometry));
            }
            Event::Mode { mode } => session.set_mode(*mode),
            Event::Segment { index } => {
                if !session.select_segment(*index) {
                    return Err(SessionError::Script(format!("no mode for segment {}", index)));
                }
            }
            Event::Camera { position, yaw } => {
                session.tracker_mut().camera =
                    Some(Mat4::from_translation(*position) * Mat4::from_rotation_y(*yaw));
            }
            Event::Hit { position } => {
                session.tracker_mut().hit = Some(Mat4::from_translation(*position));
            }
            Event::Miss => session.tracker_mut().hit = None,
            Event::TouchBegan { x, y } => {
                session.touch_began(Vec2::new(*x, *y))?;
            }
            Event::TouchMoved { x, y } => {
                session.touch_moved(Vec2::new(*x, *y))?;
            }
            Event::TouchEnded => session.touch_ended(),
            Event::PlaneDetected { id, position, center, extent } => {
                let anchor = Anchor::plane(*id, Mat4::from_translation(*position), *center, *extent);
                session.anchor_added(&anchor)?;
            }
            Event::PlaneUpdated { id, position, center, extent } => {
                if session.anchor_node(AnchorId(*id)).is_none() {
                    return Err(SessionError::Script(format!(
                        "plane_updated for unknown anchor {}",
                        id
                    )));
                }
                let anchor = Anchor::plane(*id, Mat4::from_translation(*position), *center, *extent);
                session.anchor_updated(&anchor);
            }
            Event::ImageDetected { id, name, position } => {
                let anchor = Anchor::image(*id, Mat4::from_translation(*position), name.as_str());
                session.anchor_added(&anchor)?;
            }
            Event::Undo => {
                session.undo();
            }
            Event::Redo => {
                session.redo();
            }
            Event::Reset => session.reset_scene(),
            Event::ToggleOverlay => session.toggle_plane_overlay(),
        }
        Ok(())
    }
}

/// Ordered list of events
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct Script {
    #[serde(rename = "event", default)]
    pub events: Vec<Event>,
}

impl Script {
    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        let script = Self::from_toml_str(&content)?;
        log::info!("Loaded {} events from {}", script.events.len(), path.display());
        Ok(script)
    }

    /// Apply every event in order, stopping at the first error.
    pub fn run(&self, session: &mut DrawingSession<ScriptedTracker>) -> Result<()> {
        for (index, event) in self.events.iter().enumerate() {
            log::debug!("Event {}: {:?}", index, event);
            event.apply(session).map_err(|e| match e {
                SessionError::Script(message) => {
                    SessionError::Script(format!("event {}: {}", index, message))
                }
                other => other,
            })?;
        }
        Ok(())
    }
}

/// Indented listing of the attached scene, one node per line.
pub fn render_tree(scene: &Scene) -> String {
    let mut out = String::new();
    render_node(scene, scene.root(), 0, &mut out);
    out
}

fn render_node(scene: &Scene, id: NodeId, depth: usize, out: &mut String) {
    let Some(node) = scene.get(id) else {
        return;
    };

    let position = node.position();
    let _ = write!(
        out,
        "{:indent$}{} [{}] ({:.3}, {:.3}, {:.3})",
        "",
        node.name,
        node.geometry.name(),
        position.x,
        position.y,
        position.z,
        indent = depth * 2
    );
    if node.hidden {
        out.push_str(" hidden");
    }
    out.push('\n');

    for &child in node.children() {
        render_node(scene, child, depth + 1, out);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SessionConfig;

    fn session() -> DrawingSession<ScriptedTracker> {
        DrawingSession::new(ScriptedTracker::new(), SessionConfig::default())
    }

    #[test]
    fn test_parse_events() {
        let script = Script::from_toml_str(
            r#"
            [[event]]
            kind = "select"
            name = "cube"
            shape = "box"

            [[event]]
            kind = "mode"
            mode = "plane"

            [[event]]
            kind = "hit"
            position = { x = 0.0, y = 0.0, z = -1.0 }

            [[event]]
            kind = "touch_ended"
            "#,
        )
        .unwrap();

        assert_eq!(
            script.events,
            vec![
                Event::Select {
                    name: "cube".to_string(),
                    shape: Shape::Box,
                    size: 0.02,
                },
                Event::Mode {
                    mode: PlacementMode::Plane,
                },
                Event::Hit {
                    position: Vec3::new(0.0, 0.0, -1.0),
                },
                Event::TouchEnded,
            ]
        );
    }

    #[test]
    fn test_empty_script() {
        let script = Script::from_toml_str("").unwrap();
        assert!(script.events.is_empty());
    }

    #[test]
    fn test_unknown_kind_is_parse_error() {
        let err = Script::from_toml_str("[[event]]\nkind = \"teleport\"\n").unwrap_err();
        assert!(matches!(err, SessionError::Parse(_)));
    }

    #[test]
    fn test_unknown_plane_update_is_script_error() {
        let script = Script::from_toml_str(
            r#"
            [[event]]
            kind = "plane_updated"
            id = 9
            extent = { x = 1.0, y = 0.0, z = 1.0 }
            "#,
        )
        .unwrap();

        let err = script.run(&mut session()).unwrap_err();
        match err {
            SessionError::Script(message) => assert!(message.starts_with("event 0")),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_render_tree() {
        let mut session = session();
        session.tracker_mut().camera = Some(Mat4::IDENTITY);
        Event::Select {
            name: "ball".to_string(),
            shape: Shape::Sphere,
            size: 0.1,
        }
        .apply(&mut session)
        .unwrap();
        Event::TouchBegan { x: 0.0, y: 0.0 }.apply(&mut session).unwrap();

        let tree = render_tree(session.scene());
        assert_eq!(
            tree,
            "root [Empty] (0.000, 0.000, 0.000)\n  ball [Sphere] (0.000, 0.000, -0.200)\n"
        );
    }
}
