// src/exec/echo.rs

use std::io::{self, Write};

use crate::types::{OutputLine, StreamOrigin};

const GREEN: &str = "\x1b[32m";
const RED: &str = "\x1b[31m";
const RESET: &str = "\x1b[0m";

/// Local display of child output lines.
pub trait OutputEcho: Send {
    fn echo(&mut self, line: &OutputLine);
}

/// Echo to the terminal: stdout lines in green, stderr lines in red.
///
/// Both go to our own stdout so the interleaving seen by the user matches the
/// order the supervisor forwarded them in.
#[derive(Debug, Clone, Copy)]
pub struct ConsoleEcho {
    color: bool,
}

impl ConsoleEcho {
    pub fn new(color: bool) -> Self {
        Self { color }
    }

    /// Colored only when stdout is a terminal.
    pub fn detect() -> Self {
        use std::io::IsTerminal;
        Self::new(io::stdout().is_terminal())
    }

    pub fn render(&self, line: &OutputLine) -> String {
        if !self.color {
            return line.text.clone();
        }
        let color = match line.origin {
            StreamOrigin::Stdout => GREEN,
            StreamOrigin::Stderr => RED,
        };
        format!("{color}{}{RESET}", line.text)
    }
}

impl OutputEcho for ConsoleEcho {
    fn echo(&mut self, line: &OutputLine) {
        let mut out = io::stdout().lock();
        // A closed stdout (e.g. `| head`) must not take the run down.
        let _ = writeln!(out, "{}", self.render(line));
    }
}
