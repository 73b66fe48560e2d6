// src/cli.rs

//! CLI argument parsing using `clap`.
//!
//! The help text is generated from the declarative `#[arg]` attributes below.

use std::path::PathBuf;

use clap::error::ErrorKind;
use clap::{Parser, ValueEnum};

/// Exit code for a successful run (and for `--help` / `--version`).
pub const EXIT_OK: i32 = 0;

/// Exit code for configuration, launch and command failures.
pub const EXIT_ERR: i32 = 1;

/// Command-line arguments for `runwatch`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "runwatch",
    version,
    about = "Run a command and report its progress to a chat webhook.",
    long_about = None
)]
pub struct CliArgs {
    /// Path to the configuration file (TOML).
    #[arg(short, long, value_name = "PATH")]
    pub config: PathBuf,

    /// Report interval in seconds.
    ///
    /// 0 means "use the `interval` from the config file".
    #[arg(short, long, value_name = "SECONDS", default_value_t = 0)]
    pub interval: u64,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `RUNWATCH_LOG` or a default level will be used.
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,

    /// Load + validate the config and print the resolved run, but don't
    /// execute the command.
    #[arg(long)]
    pub dry_run: bool,

    /// The command to supervise.
    ///
    /// Words are joined with single spaces and split again on whitespace
    /// before launching; quoting inside the command is not interpreted.
    #[arg(
        required = true,
        trailing_var_arg = true,
        allow_hyphen_values = true,
        value_name = "COMMAND"
    )]
    pub command: Vec<String>,
}

impl CliArgs {
    /// The command string as typed by the user.
    pub fn command_line(&self) -> String {
        self.command.join(" ")
    }
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Parse the process arguments, printing help/version/errors and exiting
/// when clap cannot produce a `CliArgs`.
pub fn parse() -> CliArgs {
    CliArgs::try_parse().unwrap_or_else(|err| {
        let code = exit_code_for(&err);
        let _ = err.print();
        std::process::exit(code);
    })
}

/// Help and version output are successes; every other parse error is a
/// plain failure (clap itself would use 2).
pub fn exit_code_for(err: &clap::Error) -> i32 {
    match err.kind() {
        ErrorKind::DisplayHelp
        | ErrorKind::DisplayVersion
        | ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand => EXIT_OK,
        _ => EXIT_ERR,
    }
}
