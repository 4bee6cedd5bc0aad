//! Line classification.
//!
//! A line selects its execution mode through the separator it contains. Lines are
//! expected to use at most one kind of separator; when several kinds are present the
//! first one in [`Separator::PRIORITY`] wins and the line is split on that marker only.

use crate::lexer::tokenize;
use std::fmt;
use tracing::{debug, warn};

/// The marker that selects how the commands of a line are executed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Separator {
    /// No marker: the line is one command.
    None,
    /// `##`: commands run one after another.
    Sequential,
    /// `&&`: commands run concurrently and the shell waits for all of them.
    Parallel,
    /// `>`: the first command runs with its output sent to the file named second.
    Redirect,
}

impl Separator {
    /// Order in which markers are checked. The first one present anywhere in a line wins.
    pub const PRIORITY: [Separator; 3] = [
        Separator::Parallel,
        Separator::Sequential,
        Separator::Redirect,
    ];

    /// The marker text, also used as the delimiter when splitting the line.
    pub fn marker(self) -> &'static str {
        match self {
            Separator::None => "",
            Separator::Sequential => "##",
            Separator::Parallel => "&&",
            Separator::Redirect => ">",
        }
    }

    /// Markers match by character, so a lone `&` or `#` is enough.
    fn occurs_in(self, line: &str) -> bool {
        let marker = self.marker();
        !marker.is_empty() && line.contains(|c: char| marker.contains(c))
    }
}

impl fmt::Display for Separator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Separator::None => f.write_str("none"),
            other => f.write_str(other.marker()),
        }
    }
}

/// Command units of one line, in input order and not yet split into arguments.
///
/// For [`Separator::Redirect`] a well-formed list has exactly two entries: the command
/// and the target path. [`Separator::None`] produces at most one entry.
pub type CommandList = Vec<String>;

/// Detects the separator of `line` and cuts it into command units.
///
/// A single trailing newline is ignored. A blank line yields an empty list.
pub fn classify(line: &str) -> (Separator, CommandList) {
    let line = line.strip_suffix('\n').unwrap_or(line);

    let mut present = Separator::PRIORITY
        .into_iter()
        .filter(|separator| separator.occurs_in(line));
    let separator = present.next().unwrap_or(Separator::None);
    let ignored: Vec<Separator> = present.collect();
    if !ignored.is_empty() {
        warn!(%separator, ?ignored, "line mixes separators, splitting on the first only");
    }

    let commands = tokenize(line, separator.marker());
    debug!(%separator, units = commands.len(), "classified line");
    (separator, commands)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parallel_line() {
        let (separator, commands) = classify("echo hi && echo bye");
        assert_eq!(separator, Separator::Parallel);
        assert_eq!(commands, vec!["echo hi", "echo bye"]);
    }

    #[test]
    fn test_sequential_line() {
        let (separator, commands) = classify("echo a ## echo b ## echo c\n");
        assert_eq!(separator, Separator::Sequential);
        assert_eq!(commands, vec!["echo a", "echo b", "echo c"]);
    }

    #[test]
    fn test_redirect_line() {
        let (separator, commands) = classify("ls -la > out.txt");
        assert_eq!(separator, Separator::Redirect);
        assert_eq!(commands, vec!["ls -la", "out.txt"]);
    }

    #[test]
    fn test_plain_line() {
        let (separator, commands) = classify("pwd\n");
        assert_eq!(separator, Separator::None);
        assert_eq!(commands, vec!["pwd"]);
    }

    #[test]
    fn test_blank_line_has_no_commands() {
        let (separator, commands) = classify("   \n");
        assert_eq!(separator, Separator::None);
        assert!(commands.is_empty());
    }

    #[test]
    fn test_mixed_markers_follow_priority() {
        let (separator, commands) = classify("a ## b && c");
        assert_eq!(separator, Separator::Parallel);
        assert_eq!(commands, vec!["a ## b", "c"]);

        let (separator, commands) = classify("a > f ## b");
        assert_eq!(separator, Separator::Sequential);
        assert_eq!(commands, vec!["a > f", "b"]);
    }

    #[test]
    fn test_single_marker_character_is_enough() {
        assert_eq!(classify("sleep 1 & ls").0, Separator::Parallel);
        assert_eq!(classify("ls # comment").0, Separator::Sequential);
    }
}
