use std::fmt;

/// Which of the child's output streams a line came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StreamOrigin {
    Stdout,
    Stderr,
}

impl fmt::Display for StreamOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StreamOrigin::Stdout => f.write_str("stdout"),
            StreamOrigin::Stderr => f.write_str("stderr"),
        }
    }
}

/// A single line of child output, without its line terminator.
///
/// Produced by a drain and handed straight to the echo; never stored by the
/// supervisor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputLine {
    pub origin: StreamOrigin,
    pub text: String,
}

impl OutputLine {
    pub fn new(origin: StreamOrigin, text: impl Into<String>) -> Self {
        Self {
            origin,
            text: text.into(),
        }
    }
}
