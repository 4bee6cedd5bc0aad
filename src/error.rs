//! Errors raised while running a line.
//!
//! None of them ends the interactive loop: each is reported and control returns to
//! the prompt.

use std::io;
use std::path::PathBuf;
use thiserror::Error;
use tracing::debug;

/// Notice printed on standard output for malformed or unrunnable commands.
pub const INCORRECT_NOTICE: &str = "Shell: Incorrect command";

#[derive(Debug, Error)]
pub enum ShellError {
    /// The operating system refused to create a child process.
    #[error("fork(): couldn't launch {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },

    /// A child was created but its program image could not be replaced.
    #[error("{program}: {source}")]
    NotRunnable {
        program: String,
        #[source]
        source: io::Error,
    },

    /// No command factory recognised the name.
    #[error("{0}: command not found")]
    UnknownCommand(String),

    /// A command unit with no words in it.
    #[error("empty command")]
    EmptyCommand,

    #[error("wait(): {0}")]
    Wait(#[source] io::Error),

    #[error("cd: {}: {source}", .path.display())]
    ChangeDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("redirect: couldn't open file \"{}\": {source}", .path.display())]
    OpenTarget {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Standard output could not be swapped for the target file.
    #[error("redirect: {0}")]
    Redirect(#[source] io::Error),

    #[error("redirect: expected a command and one target, got {0} parts")]
    RedirectArity(usize),

    #[error("redirect: target path must be one word, got {0}")]
    InvalidTargetPath(usize),
}

impl ShellError {
    /// Whether the user sees [`INCORRECT_NOTICE`] on standard output for this error.
    pub fn shows_incorrect_notice(&self) -> bool {
        matches!(
            self,
            ShellError::NotRunnable { .. }
                | ShellError::UnknownCommand(_)
                | ShellError::EmptyCommand
                | ShellError::OpenTarget { .. }
                | ShellError::RedirectArity(_)
                | ShellError::InvalidTargetPath(_)
        )
    }

    /// Whether a diagnostic line goes to standard error.
    ///
    /// A program that cannot be run only gets the notice.
    fn has_diagnostic(&self) -> bool {
        !matches!(self, ShellError::NotRunnable { .. })
    }

    /// Reports the error to the user and lets the caller carry on.
    pub fn report(&self) {
        debug!(error = ?self, "reporting error");
        if self.shows_incorrect_notice() {
            println!("{INCORRECT_NOTICE}");
        }
        if self.has_diagnostic() {
            eprintln!("{self}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_errors_show_notice() {
        assert!(ShellError::RedirectArity(3).shows_incorrect_notice());
        assert!(ShellError::InvalidTargetPath(2).shows_incorrect_notice());
        assert!(ShellError::UnknownCommand("nope".into()).shows_incorrect_notice());
    }

    #[test]
    fn test_os_errors_are_diagnostics_only() {
        let err = ShellError::ChangeDir {
            path: PathBuf::from("/does/not/exist"),
            source: io::Error::from(io::ErrorKind::NotFound),
        };
        assert!(!err.shows_incorrect_notice());
        assert!(err.has_diagnostic());
        assert!(err.to_string().starts_with("cd: /does/not/exist: "));
    }

    #[test]
    fn test_unrunnable_program_has_no_diagnostic() {
        let err = ShellError::NotRunnable {
            program: "nope".into(),
            source: io::Error::from(io::ErrorKind::NotFound),
        };
        assert!(err.shows_incorrect_notice());
        assert!(!err.has_diagnostic());
    }
}
