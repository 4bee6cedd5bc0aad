use crate::env::Environment;
use crate::error::ShellError;

/// Conventional process exit code type used by this crate.
///
/// A value of 0 indicates success; any non-zero value indicates failure.
/// Children killed by a signal report `128 + signal`, as POSIX shells do.
pub type ExitCode = i32;

/// What became of one command unit.
///
/// Created for every unit that runs and consumed by the caller right away.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcessOutcome {
    /// A child was launched and reaped. Carries its exit code, which may be non-zero.
    Success(ExitCode),
    /// The program could not be launched, or its child could not be waited for.
    LaunchFailure,
    /// A built-in handled the unit inside the shell process; no child was created.
    BuiltinHandled,
}

/// Object-safe trait for any command that can be executed by the shell.
///
/// This is implemented by built-ins via a blanket impl and by external commands.
pub trait ExecutableCommand {
    /// Executes the command, blocking until it is complete.
    fn execute(self: Box<Self>, env: &mut Environment) -> Result<ProcessOutcome, ShellError>;
}

/// Factory that tries to create a command from a name and its arguments.
///
/// Returns `None` when the factory doesn't recognize the invocation.
pub trait CommandFactory {
    /// Attempt to create a command instance for the provided name and arguments.
    fn try_create(&self, name: &str, args: &[&str]) -> Option<Box<dyn ExecutableCommand>>;
}

/// Runs one command unit to completion.
///
/// The execution modes drive a runner once per unit; [`crate::Interpreter`] is the
/// runner used by the shell.
pub trait CommandRunner {
    /// Splits `unit` into arguments and runs it, reporting any error on the way.
    fn run(&mut self, unit: &str) -> ProcessOutcome;
}
