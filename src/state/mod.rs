pub mod context;
mod editor_state;

pub use context::{EditorContext, SharedEditor};
pub use editor_state::GestureState;

/// Host-provided confirmation dialogs.
///
/// Destructive or free-form operations ask through this trait before doing
/// anything. Declining is always a complete no-op.
pub trait Confirm {
    /// Yes/no question
    fn confirm(&mut self, message: &str) -> bool;

    /// Free-text question pre-filled with `default`. `None` means cancelled.
    fn prompt(&mut self, message: &str, default: &str) -> Option<String>;
}
