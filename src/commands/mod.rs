//! CLI command implementations.
//!
//! Each command is implemented in its own module.
//! Commands orchestrate the various library components to perform user tasks.

pub mod replay;
pub mod utils;
pub mod watch;

// Re-export main command functions
pub use replay::{execute_replay, replay_frames, ReplayArgs, ReplayStats};
pub use utils::{display_schema, display_version};
pub use watch::{execute_watch, validate_args, WatchArgs};
