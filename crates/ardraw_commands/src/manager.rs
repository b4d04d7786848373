//! Linear undo/redo history.
//!
//! Every successful command goes on the undo stack. Undo moves the top
//! command to the redo stack and redo moves it back. Executing anything new
//! invalidates the redo stack.

use crate::Command;

/// Undo/redo stacks for one editing session.
pub struct CommandManager<W: ?Sized> {
    /// Executed commands, oldest first
    undo_stack: Vec<Box<dyn Command<W>>>,
    /// Undone commands, oldest first
    redo_stack: Vec<Box<dyn Command<W>>>,
}

impl<W: ?Sized> Default for CommandManager<W> {
    fn default() -> Self {
        Self::new()
    }
}

impl<W: ?Sized> CommandManager<W> {
    pub fn new() -> Self {
        Self {
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
        }
    }

    /// Execute a command and record it if it took effect.
    ///
    /// Returns the command's `is_executed()`. A command that did not take
    /// effect is discarded and leaves the history untouched.
    pub fn execute_command<C>(&mut self, world: &mut W, command: C) -> bool
    where
        C: Command<W> + 'static,
    {
        self.execute_command_with(world, command, |_| ()).is_some()
    }

    /// Like [`execute_command`](Self::execute_command), but reads a result
    /// off the command once it took effect, before it enters history.
    /// Returns `None` when the command was rejected.
    pub fn execute_command_with<C, R>(
        &mut self,
        world: &mut W,
        mut command: C,
        inspect: impl FnOnce(&C) -> R,
    ) -> Option<R>
    where
        C: Command<W> + 'static,
    {
        command.execute(world);

        if !command.is_executed() {
            log::trace!("Not recorded: {}", command.description());
            command.discard(world);
            return None;
        }

        log::debug!("Execute: {}", command.description());
        let result = inspect(&command);
        for mut dropped in self.redo_stack.drain(..) {
            dropped.discard(world);
        }
        self.undo_stack.push(Box::new(command));
        Some(result)
    }

    /// Undo the most recent command. Returns false when there is nothing to undo.
    pub fn undo(&mut self, world: &mut W) -> bool {
        let Some(mut command) = self.undo_stack.pop() else {
            return false;
        };

        log::debug!("Undo: {}", command.description());
        command.undo(world);
        self.redo_stack.push(command);
        true
    }

    /// Redo the most recently undone command. Returns false when there is
    /// nothing to redo.
    pub fn redo(&mut self, world: &mut W) -> bool {
        let Some(mut command) = self.redo_stack.pop() else {
            return false;
        };

        log::debug!("Redo: {}", command.description());
        command.redo(world);
        self.undo_stack.push(command);
        true
    }

    /// Undo everything, newest first, then forget all history.
    ///
    /// Nothing is moved to the redo stack: a reset cannot be redone.
    pub fn reset(&mut self, world: &mut W) {
        if self.undo_stack.is_empty() {
            return;
        }

        log::debug!("Reset: undoing {} commands", self.undo_stack.len());
        while let Some(mut command) = self.undo_stack.pop() {
            command.undo(world);
            command.discard(world);
        }
        for mut command in self.redo_stack.drain(..) {
            command.discard(world);
        }
    }

    /// Forget all history without touching the world. Nothing is
    /// discarded, so whatever the dropped commands owned stays in the
    /// world.
    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    pub fn undo_count(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn redo_count(&self) -> usize {
        self.redo_stack.len()
    }

    /// Description of the command `undo` would reverse.
    pub fn undo_description(&self) -> Option<&str> {
        self.undo_stack.last().map(|c| c.description())
    }

    /// Description of the command `redo` would re-apply.
    pub fn redo_description(&self) -> Option<&str> {
        self.redo_stack.last().map(|c| c.description())
    }
}
