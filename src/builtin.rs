use crate::command::{CommandFactory, ExecutableCommand, ProcessOutcome};
use crate::env::Environment;
use crate::error::ShellError;
use crate::interpreter::Factory;
use argh::{EarlyExit, FromArgs};
use std::path::Path;

/// Built-in commands known to the shell at compile time.
///
/// Builtins are parsed using the [`argh`] crate (`FromArgs`) and executed directly
/// in the shell process without spawning a child.
pub(crate) trait BuiltinCommand: Sized + FromArgs {
    /// Canonical name of the command, e.g. "cd".
    fn name() -> &'static str;

    /// Most arguments the built-in takes. Longer invocations are not treated as the
    /// built-in and fall through to the next factory.
    fn max_args() -> usize;

    /// Whether arguments go to the command as plain operands, never as flags.
    ///
    /// `cd -x` must enter a directory named `-x`, so argh sees the arguments only
    /// after a `--`.
    fn literal_operands() -> bool {
        false
    }

    fn execute(self, env: &mut Environment) -> Result<(), ShellError>;
}

impl<T: BuiltinCommand> ExecutableCommand for T {
    fn execute(self: Box<Self>, env: &mut Environment) -> Result<ProcessOutcome, ShellError> {
        if let Err(e) = <T as BuiltinCommand>::execute(*self, env) {
            e.report();
        }
        Ok(ProcessOutcome::BuiltinHandled)
    }
}

/// Help text or a usage error produced by argh instead of a command.
struct InvalidArgs {
    output: String,
    is_error: bool,
}

impl ExecutableCommand for InvalidArgs {
    fn execute(self: Box<Self>, _env: &mut Environment) -> Result<ProcessOutcome, ShellError> {
        if self.is_error {
            eprintln!("{}", self.output);
        } else {
            println!("{}", self.output);
        }
        Ok(ProcessOutcome::BuiltinHandled)
    }
}

impl<T: BuiltinCommand + 'static> CommandFactory for Factory<T> {
    fn try_create(&self, name: &str, args: &[&str]) -> Option<Box<dyn ExecutableCommand>> {
        if name != T::name() || args.len() > T::max_args() {
            return None;
        }
        let mut argv = Vec::with_capacity(args.len() + 1);
        if T::literal_operands() && !args.is_empty() {
            argv.push("--");
        }
        argv.extend_from_slice(args);
        Some(match T::from_args(&[name], &argv) {
            Ok(cmd) => Box::new(cmd),
            Err(EarlyExit { output, status }) => Box::new(InvalidArgs {
                output,
                is_error: status.is_err(),
            }),
        })
    }
}

#[derive(FromArgs)]
/// Change the working directory of the shell.
/// Without a target the directory stays where it is.
pub struct Cd {
    #[argh(positional)]
    /// directory to switch to; absolute or relative to the current directory.
    pub target: Option<String>,
}

impl BuiltinCommand for Cd {
    fn name() -> &'static str {
        "cd"
    }

    fn max_args() -> usize {
        1
    }

    fn literal_operands() -> bool {
        true
    }

    fn execute(self, env: &mut Environment) -> Result<(), ShellError> {
        let target = self.target.as_deref().unwrap_or(".");
        env.change_dir(Path::new(target))
    }
}
