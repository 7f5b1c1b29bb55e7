mod commands;
mod history;

use crate::error::EditorError;

pub use commands::Command;
pub use history::{HistoryEntry, SnapshotHistory};

/// Result type for command operations
pub type CommandResult = Result<(), EditorError>;
