//! # ardraw_commands - Undo/Redo Commands
//!
//! Command pattern for reversible edits, plus the commands that place
//! objects into an AR scene.
//!
//! ```text
//! caller ──build──▶ PlaceNode*Command ──▶ CommandManager::execute_command
//!                                              │
//!                         is_executed()? ──no──┴──▶ discarded, history untouched
//!                               │ yes
//!                               ▼
//!                   undo stack (redo stack cleared)
//! ```
//!
//! A command is built with everything it needs (a private copy of the
//! object, the container handle, placement parameters) and is never
//! reconfigured afterwards. Placement commands act on a
//! `dyn SceneGraph`, so their history is a `CommandManager<dyn SceneGraph>`.
//! When the manager drops one for good (rejected, cut from the redo stack,
//! or reset) its detached copy is released from the scene.

mod command;
mod manager;
mod placement_commands;

pub use command::Command;
pub use manager::CommandManager;
pub use placement_commands::{PlaceNodeCommand, PlaceNodeInFrontCommand, PlaceNodeInPlaneCommand};
