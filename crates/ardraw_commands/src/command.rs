//! Command trait.

/// A reversible unit of work applied to a world `W`.
///
/// The world is handed to every call instead of being captured, so a
/// command only stores what it needs to find its data again (node handles,
/// transforms). Everything a command needs is fixed when it is built.
///
/// Failure is not an error: a command that declines to apply its effect
/// reports `is_executed() == false` after [`execute`](Command::execute),
/// and the [`CommandManager`](crate::CommandManager) simply does not record
/// it.
///
/// # Example
///
/// ```ignore
/// struct Rename {
///     node: NodeId,
///     old: Option<String>,
///     new: String,
///     executed: bool,
/// }
///
/// impl Command<Scene> for Rename {
///     fn description(&self) -> &str { "Rename" }
///
///     fn is_executed(&self) -> bool { self.executed }
///
///     fn execute(&mut self, scene: &mut Scene) {
///         if let Some(node) = scene.get_mut(self.node) {
///             self.old = Some(std::mem::replace(&mut node.name, self.new.clone()));
///             self.executed = true;
///         }
///     }
///
///     fn undo(&mut self, scene: &mut Scene) { /* restore self.old */ }
///
///     fn redo(&mut self, scene: &mut Scene) { /* apply self.new again */ }
/// }
/// ```
pub trait Command<W: ?Sized> {
    /// Human-readable description for undo/redo menus.
    fn description(&self) -> &str;

    /// Whether the forward effect currently holds. Read right after
    /// `execute` to decide whether the command enters history.
    fn is_executed(&self) -> bool;

    /// Perform the forward effect.
    fn execute(&mut self, world: &mut W);

    /// Reverse the forward effect. No-op unless the command executed.
    fn undo(&mut self, world: &mut W);

    /// Re-apply the effect without re-running any validation `execute`
    /// performed. No-op unless the command executed.
    fn redo(&mut self, world: &mut W);

    /// Called once when the manager drops the command for good: after a
    /// rejected `execute`, when it is cut from the redo stack, and after a
    /// reset has undone it. Frees whatever the command still owns in the
    /// world. Never called by `clear`.
    fn discard(&mut self, _world: &mut W) {}
}
