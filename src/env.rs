use crate::error::ShellError;
use std::env as stdenv;
use std::io;
use std::path::{Path, PathBuf};

/// The state a line can leave behind for the next one.
///
/// The working directory belongs to the whole process: it is changed only through
/// [`Environment::change_dir`], and every child launched afterwards inherits it.
/// `should_exit` tells the interactive loop to stop.
#[derive(Debug, Default)]
pub struct Environment {
    /// When set to true, indicates that an interactive loop should exit.
    pub should_exit: bool,
}

impl Environment {
    pub fn new() -> Self {
        Self::default()
    }

    /// The process-wide working directory.
    pub fn current_dir(&self) -> io::Result<PathBuf> {
        stdenv::current_dir()
    }

    /// Changes the process-wide working directory.
    ///
    /// On failure the directory is left as it was.
    pub fn change_dir(&mut self, target: &Path) -> Result<(), ShellError> {
        stdenv::set_current_dir(target).map_err(|source| ShellError::ChangeDir {
            path: target.to_path_buf(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::lock_process_state;
    use std::fs;

    #[test]
    fn test_change_dir_is_visible_process_wide() {
        let _lock = lock_process_state();
        let orig = stdenv::current_dir().unwrap();
        let temp = tempfile::tempdir().unwrap();
        let canonical_temp = fs::canonicalize(temp.path()).unwrap();

        let mut env = Environment::new();
        env.change_dir(&canonical_temp).unwrap();

        assert_eq!(fs::canonicalize(stdenv::current_dir().unwrap()).unwrap(), canonical_temp);
        assert_eq!(
            fs::canonicalize(env.current_dir().unwrap()).unwrap(),
            canonical_temp
        );

        stdenv::set_current_dir(orig).expect("failed to restore cwd");
    }

    #[test]
    fn test_change_dir_failure_keeps_directory() {
        let _lock = lock_process_state();
        let orig = stdenv::current_dir().unwrap();

        let mut env = Environment::new();
        let res = env.change_dir(Path::new("/does/not/exist"));

        assert!(matches!(res, Err(ShellError::ChangeDir { .. })));
        assert_eq!(stdenv::current_dir().unwrap(), orig);
    }
}
