// src/lib.rs

pub mod cli;
pub mod config;
pub mod engine;
pub mod errors;
pub mod exec;
pub mod logging;
pub mod notify;
pub mod types;

use tracing::{debug, info};

use crate::cli::CliArgs;
use crate::config::loader::load_and_validate;
use crate::config::ConfigFile;
use crate::engine::{Outcome, Supervisor};
use crate::errors::Result;
use crate::exec::{Command, ConsoleEcho, PsSnapshot};
use crate::notify::{NotifyingSink, SlackWebhook};

/// High-level entry point used by `main.rs`.
///
/// This wires together:
/// - config loading and interval resolution
/// - the Slack webhook notifier
/// - console echo and `ps` snapshots
/// - the supervisor
///
/// Configuration problems are returned as errors; everything that happens
/// once the command is handed to the supervisor is reported via `Outcome`,
/// including a blank command, which becomes a notified `LaunchError`.
/// Under `--dry-run` a blank command is an `EmptyCommand` error instead.
pub async fn run(args: CliArgs) -> Result<Outcome> {
    let cfg = load_and_validate(&args.config)?;
    let interval = cfg.effective_interval(args.interval);
    let command_line = args.command_line();

    if args.dry_run {
        print_dry_run(&cfg, &command_line, interval)?;
        return Ok(Outcome::Success);
    }

    info!(
        channel = %cfg.channel,
        interval,
        command = %command_line,
        "supervising command"
    );

    let notifier = SlackWebhook::from_config(&cfg);
    let sink = NotifyingSink::new(command_line.clone(), notifier);
    let mut supervisor = Supervisor::new(sink, ConsoleEcho::detect(), PsSnapshot);

    Ok(supervisor.run(&command_line, interval).await)
}

/// Print the resolved run without executing anything.
fn print_dry_run(cfg: &ConfigFile, command_line: &str, interval: u64) -> Result<()> {
    let command = Command::parse(command_line)?;

    println!("runwatch dry-run");
    println!("  webhook = {}", cfg.url);
    println!("  channel = {}", cfg.channel);
    println!("  emoji = {}", cfg.emoji);
    if !cfg.mentions.is_empty() {
        println!("  mentions = {:?}", cfg.mentions);
    }
    if interval == 0 {
        println!("  interval = 0 (heartbeats disabled)");
    } else {
        println!("  interval = {interval}s");
    }
    println!();
    println!("command:");
    println!("  program: {}", command.program());
    if !command.args().is_empty() {
        println!("  args: {:?}", command.args());
    }

    debug!("dry-run complete (no execution)");
    Ok(())
}
