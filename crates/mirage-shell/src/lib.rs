//! Emulated Linux shell for the mirage browser terminal.
//!
//! The crate exposes three layers:
//! - [`interpreter`]: the `Command` trait and registry dispatch,
//! - [`predictor`]: suggestion lookup over partial input and history,
//! - [`session`]: the stateful loop binding both to a VFS and a clock.
//!
//! Commands are grouped by domain into `*_commands` modules, each with
//! its own `register_*` function.

pub mod archive_commands;
pub mod file_commands;
pub mod interpreter;
pub mod latency;
pub mod network_commands;
pub mod permission_commands;
pub mod predictor;
pub mod process_commands;
pub mod search_commands;
pub mod session;
pub mod system_commands;
pub mod text_commands;

pub use interpreter::{Command, CommandSet, ExecutionResult, ShellCtx};
pub use latency::{DelaySource, NoDelay, UniformDelay};
pub use predictor::Predictor;
pub use session::{Session, SubmitOutcome};

/// Register every built-in utility into `set`.
pub fn register_builtins(set: &mut CommandSet) {
    file_commands::register_file_commands(set);
    search_commands::register_search_commands(set);
    text_commands::register_text_commands(set);
    network_commands::register_network_commands(set);
    system_commands::register_system_commands(set);
    process_commands::register_process_commands(set);
    archive_commands::register_archive_commands(set);
    permission_commands::register_permission_commands(set);
}
