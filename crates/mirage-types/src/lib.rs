//! Foundation types for the mirage shell emulator.
//!
//! This crate contains the platform-agnostic core types shared by the
//! interpreter and VFS crates: error types, executed-command records,
//! catalog metadata, the injectable clock, and session configuration.

pub mod clock;
pub mod config;
pub mod error;
pub mod meta;
pub mod record;

pub use clock::{Clock, FixedClock, SystemClock};
pub use config::SessionConfig;
pub use error::{Result, ShellError};
pub use meta::{Category, CommandMeta};
pub use record::CommandRecord;
