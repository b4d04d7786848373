//! # ardraw_session - AR Drawing Session
//!
//! Headless model of the AR drawing view: placement modes, touch handling,
//! plane overlays and anchors, with every placement routed through a
//! [`CommandManager`](ardraw_commands::CommandManager) so it can be undone.
//!
//! The platform tracker sits behind [`TrackingSession`]. [`ScriptedTracker`]
//! stands in for it in tests and in the `ardraw-replay` binary.
//!
//! ```ignore
//! let mut session = DrawingSession::new(ScriptedTracker::new(), SessionConfig::default());
//! session.start();
//! session.select_object(Node::new("sphere").with_geometry(Geometry::Sphere { radius: 0.02 }));
//! session.set_mode(PlacementMode::Plane);
//! session.touch_began(Vec2::new(120.0, 300.0))?;
//! ```

mod config;
mod error;
pub mod floor;
pub mod replay;
mod session;
pub mod tracking;

pub use config::SessionConfig;
pub use error::{Result, SessionError};
pub use floor::Floor;
pub use replay::{render_tree, Event, Script};
pub use session::{DrawingSession, PlacementMode};
pub use tracking::{
    Anchor, AnchorId, AnchorKind, PlaneDetection, RunOptions, ScriptedTracker,
    TrackingConfiguration, TrackingSession,
};
