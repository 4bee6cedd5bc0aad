use crate::command::{CommandFactory, ExecutableCommand, ExitCode, ProcessOutcome};
use crate::env::Environment;
use crate::error::ShellError;
use crate::interpreter::Factory;
use nix::libc;
use nix::sys::signal::{SigHandler, Signal, signal};
use std::ffi::OsString;
use std::io;
use std::os::unix::process::{CommandExt, ExitStatusExt};
use std::process::{Child, ExitStatus};
use tracing::debug;

/// Signals the interactive shell ignores and its children must not.
const INTERACTIVE_SIGNALS: [Signal; 2] = [Signal::SIGINT, Signal::SIGTSTP];

/// Command that is not a builtin.
///
/// The program is looked up through `PATH` at launch time and runs in the shell's
/// working directory with the shell's environment and standard streams.
pub struct ExternalCommand {
    name: OsString,
    args: Vec<OsString>,
}

impl ExternalCommand {
    pub fn new(name: OsString, args: Vec<OsString>) -> Self {
        Self { name, args }
    }

    /// Builds a command from an argument vector whose first entry is the program.
    pub fn from_argv(argv: &[String]) -> Option<Self> {
        let (name, args) = argv.split_first()?;
        Some(Self::new(
            name.into(),
            args.iter().map(OsString::from).collect(),
        ))
    }

    /// Starts the program in a child process without waiting for it.
    pub fn launch(&self) -> Result<Child, ShellError> {
        let mut cmd = std::process::Command::new(&self.name);
        cmd.args(&self.args);
        // SAFETY: the hook runs between fork and exec and only calls signal(2),
        // which is async-signal-safe.
        unsafe {
            cmd.pre_exec(restore_default_signals);
        }
        let child = cmd.spawn().map_err(|source| self.launch_error(source))?;
        debug!(pid = child.id(), program = ?self.name, "launched child");
        Ok(child)
    }

    /// Errors about the program itself are the user's; anything else is the system
    /// running out of something.
    fn launch_error(&self, source: io::Error) -> ShellError {
        let program = self.name.to_string_lossy().into_owned();
        match source.raw_os_error() {
            None
            | Some(libc::ENOENT | libc::EACCES | libc::ENOEXEC | libc::ENOTDIR | libc::E2BIG) => {
                ShellError::NotRunnable { program, source }
            }
            Some(_) => ShellError::Spawn { program, source },
        }
    }
}

impl CommandFactory for Factory<ExternalCommand> {
    fn try_create(&self, name: &str, args: &[&str]) -> Option<Box<dyn ExecutableCommand>> {
        Some(Box::new(ExternalCommand::new(
            name.into(),
            args.iter().map(|x| x.into()).collect(),
        )))
    }
}

impl ExecutableCommand for ExternalCommand {
    fn execute(self: Box<Self>, _env: &mut Environment) -> Result<ProcessOutcome, ShellError> {
        let mut child = self.launch()?;
        let exit_status = child.wait().map_err(ShellError::Wait)?;
        let code = exit_code(exit_status);
        debug!(pid = child.id(), code, "reaped child");
        Ok(ProcessOutcome::Success(code))
    }
}

/// Puts the interactive signals back to their default disposition in a fresh child.
fn restore_default_signals() -> io::Result<()> {
    for sig in INTERACTIVE_SIGNALS {
        // SAFETY: SIG_DFL installs no handler code.
        unsafe { signal(sig, SigHandler::SigDfl) }?;
    }
    Ok(())
}

fn exit_code(exit_status: ExitStatus) -> ExitCode {
    match exit_status.code() {
        Some(x) => x,
        None => terminated_by_signal(exit_status),
    }
}

fn terminated_by_signal(exit_status: ExitStatus) -> ExitCode {
    if let Some(signal) = exit_status.signal() {
        128 + signal
    } else if exit_status.core_dumped() {
        255
    } else {
        -1
    }
}
