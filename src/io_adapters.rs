//! Pointing the shell's standard output at a file for the length of one command.

use crate::error::ShellError;
use nix::errno::Errno;
use nix::libc;
use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::os::fd::{AsFd, AsRawFd, BorrowedFd, OwnedFd};
use std::os::unix::fs::OpenOptionsExt;
use std::path::Path;
use tracing::{debug, error};

/// Opens a redirect target for writing: created owner read/write if absent,
/// truncated if present.
pub fn open_target(path: &Path) -> Result<File, ShellError> {
    OpenOptions::new()
        .read(true)
        .write(true)
        .create(true)
        .truncate(true)
        .mode(0o600)
        .open(path)
        .map_err(|source| ShellError::OpenTarget {
            path: path.to_path_buf(),
            source,
        })
}

/// Keeps file descriptor 1 pointed at a file until restored or dropped.
///
/// The current standard output is duplicated aside on creation. [`restore`] or
/// dropping the guard puts it back on fd 1 and closes the duplicate, on every exit
/// path.
///
/// [`restore`]: StdoutRedirect::restore
#[must_use = "standard output is restored as soon as the guard is dropped"]
#[derive(Debug)]
pub struct StdoutRedirect {
    saved: Option<OwnedFd>,
}

impl StdoutRedirect {
    /// Sends standard output to `file`. The file's own descriptor is closed once fd 1
    /// refers to it.
    pub fn to_file(file: File) -> Result<Self, ShellError> {
        let stdout = io::stdout();
        stdout.lock().flush().map_err(ShellError::Redirect)?;
        let saved = stdout
            .as_fd()
            .try_clone_to_owned()
            .map_err(ShellError::Redirect)?;
        point_stdout_at(file.as_fd()).map_err(ShellError::Redirect)?;
        drop(file);
        debug!(saved_fd = saved.as_raw_fd(), "stdout redirected");
        Ok(Self { saved: Some(saved) })
    }

    /// Puts standard output back.
    ///
    /// Output still buffered for the file is flushed first. fd 1 is restored even when
    /// that flush fails; the flush error is returned afterwards.
    pub fn restore(mut self) -> Result<(), ShellError> {
        self.put_back()
    }

    fn put_back(&mut self) -> Result<(), ShellError> {
        let Some(saved) = self.saved.take() else {
            return Ok(());
        };
        let flushed = io::stdout().flush();
        point_stdout_at(saved.as_fd()).map_err(ShellError::Redirect)?;
        debug!("stdout restored");
        flushed.map_err(ShellError::Redirect)
    }
}

impl Drop for StdoutRedirect {
    fn drop(&mut self) {
        if let Err(err) = self.put_back() {
            error!(%err, "redirected output was not restored cleanly");
            eprintln!("{err}");
        }
    }
}

fn point_stdout_at(fd: BorrowedFd<'_>) -> io::Result<()> {
    // SAFETY: dup2 only manipulates the descriptor table; `fd` is open for the
    // duration of the call.
    Errno::result(unsafe { libc::dup2(fd.as_raw_fd(), libc::STDOUT_FILENO) })?;
    Ok(())
}
