//! Execution modes: how the command units of one line are run.
//!
//! Each mode consumes the [`CommandList`](crate::parser::CommandList) produced by
//! [`classify`](crate::parser::classify). Sequential and redirected units go through a
//! [`CommandRunner`], so they get built-in handling; parallel units are always launched
//! as child processes.

use crate::command::{CommandRunner, ProcessOutcome};
use crate::error::ShellError;
use crate::external::ExternalCommand;
use crate::io_adapters::{StdoutRedirect, open_target};
use crate::lexer::split_arguments;
use nix::errno::Errno;
use nix::sys::wait::{WaitPidFlag, WaitStatus, waitpid};
use nix::unistd::Pid;
use std::collections::HashSet;
use std::path::PathBuf;
use tracing::{debug, warn};

/// Runs every unit in order, each one only after the previous has finished.
///
/// A unit that fails to launch does not stop the ones after it.
pub fn run_sequential<R>(runner: &mut R, commands: &[String]) -> Vec<ProcessOutcome>
where
    R: CommandRunner + ?Sized,
{
    commands.iter().map(|unit| runner.run(unit)).collect()
}

/// Tally of one parallel run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ParallelReport {
    /// Children that were started.
    pub launched: usize,
    /// Units that produced no child.
    pub failed: usize,
    /// Children that were waited for. Equals `launched` unless waiting itself failed.
    pub reaped: usize,
}

/// Launches every unit as a child process, then waits for all of them.
///
/// All launches happen before the first wait, and children are collected in whatever
/// order they finish. Only children that were actually started are waited for. A unit
/// naming `cd` gets no special treatment here and is launched like any other program.
///
/// A child stopped by a signal counts as finished, so the shell does not hang on it.
/// Such a child is not reaped: if it is resumed and exits later, it stays a zombie
/// until some later wait happens to collect it. This is the one case where a parallel
/// line can leave a child behind.
pub fn run_parallel(commands: &[String]) -> ParallelReport {
    let mut report = ParallelReport::default();
    let mut pending = HashSet::new();
    let mut os_failures = 0;

    for unit in commands {
        let launched = ExternalCommand::from_argv(&split_arguments(unit))
            .ok_or(ShellError::EmptyCommand)
            .and_then(|cmd| cmd.launch());
        match launched {
            Ok(child) => {
                pending.insert(child.id());
                report.launched += 1;
            }
            Err(err) => {
                if matches!(err, ShellError::Spawn { .. }) {
                    os_failures += 1;
                }
                err.report();
                report.failed += 1;
            }
        }
    }

    if os_failures > 0 {
        warn!(launched = report.launched, total = commands.len(), "parallel launch incomplete");
        eprintln!(
            "parallel: launched {} of {} commands, waiting only for those",
            report.launched,
            commands.len()
        );
    }

    while !pending.is_empty() {
        match waitpid(Pid::from_raw(-1), Some(WaitPidFlag::WUNTRACED)) {
            Ok(status) => {
                let Some(pid) = status.pid() else {
                    continue;
                };
                if !pending.remove(&(pid.as_raw() as u32)) {
                    warn!(%pid, "collected a child this line did not launch");
                    continue;
                }
                if let WaitStatus::Stopped(_, signal) = status {
                    warn!(%pid, ?signal, "child stopped, no longer waiting for it");
                }
                debug!(%pid, ?status, "reaped child");
                report.reaped += 1;
            }
            Err(Errno::EINTR) => continue,
            Err(errno) => {
                ShellError::Wait(errno.into()).report();
                break;
            }
        }
    }

    report
}

/// Runs `commands[0]` with standard output sent to the file named by `commands[1]`.
///
/// The list must have exactly two entries and the target must be a single word.
/// Nothing is opened or run when either check fails, or when the target cannot be
/// opened. Standard output is restored before returning, whatever the outcome.
pub fn run_redirect<R>(runner: &mut R, commands: &[String]) -> Result<ProcessOutcome, ShellError>
where
    R: CommandRunner + ?Sized,
{
    let [command, target] = commands else {
        return Err(ShellError::RedirectArity(commands.len()));
    };
    let path = match split_arguments(target).as_slice() {
        [path] => PathBuf::from(path),
        words => return Err(ShellError::InvalidTargetPath(words.len())),
    };

    let file = open_target(&path)?;
    let redirect = StdoutRedirect::to_file(file)?;
    let outcome = runner.run(command);
    redirect.restore()?;
    Ok(outcome)
}
