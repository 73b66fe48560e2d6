// src/exec/mod.rs

//! Process-facing collaborators of the supervisor.
//!
//! - [`command`] turns the user's command string into a `tokio::process::Command`.
//! - [`drain`] reads one output stream into a channel of lines.
//! - [`snapshot`] describes a running process via `ps`.
//! - [`echo`] displays forwarded lines on the terminal.

pub mod command;
pub mod drain;
pub mod echo;
pub mod snapshot;

pub use command::Command;
pub use drain::{spawn_drain, DrainMessage};
pub use echo::{ConsoleEcho, OutputEcho};
pub use snapshot::{snapshot_or_error, ProcessSnapshot, PsSnapshot};
