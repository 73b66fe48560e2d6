// src/exec/command.rs

use std::fmt;
use std::process::Stdio;

use crate::errors::{Result, RunwatchError};

/// An executable plus its ordered argument list.
///
/// Built from the user's command string by splitting on whitespace only.
/// There is no quoting or escaping: `echo "a b"` yields the arguments
/// `"a` and `b"`, and an argument containing a space cannot be expressed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Command {
    program: String,
    args: Vec<String>,
}

impl Command {
    /// Split `line` on runs of whitespace.
    pub fn parse(line: &str) -> Result<Self> {
        let mut words = line.split_whitespace().map(str::to_string);
        let program = words.next().ok_or(RunwatchError::EmptyCommand)?;
        Ok(Self {
            program,
            args: words.collect(),
        })
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn args(&self) -> &[String] {
        &self.args
    }

    /// Build a tokio process command with both output streams piped.
    ///
    /// stdin is inherited so interactive commands keep working.
    pub fn to_process(&self) -> tokio::process::Command {
        let mut cmd = tokio::process::Command::new(&self.program);
        cmd.args(&self.args)
            .stdin(Stdio::inherit())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);
        cmd
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.program)?;
        for arg in &self.args {
            write!(f, " {arg}")?;
        }
        Ok(())
    }
}
