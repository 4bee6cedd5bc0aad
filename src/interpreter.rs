use crate::command::{CommandFactory, CommandRunner, ProcessOutcome};
use crate::env::Environment;
use crate::error::ShellError;
use crate::lexer::split_arguments;
use crate::modes::{run_parallel, run_redirect, run_sequential};
use crate::parser::{Separator, classify};
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use tracing::debug;

/// First word of a line that ends the interactive loop.
pub const EXIT_KEYWORD: &str = "exit";

/// Printed once when the loop ends.
pub const EXIT_NOTICE: &str = "Exiting shell...";

/// Factory allows creating instances of ExecutableCommand.
///
/// Only supports commands defined in this crate: BuiltinCommand and ExternalCommand.
pub(crate) struct Factory<T> {
    _phantom: std::marker::PhantomData<T>,
}

impl<T> Default for Factory<T> {
    fn default() -> Self {
        Self {
            _phantom: std::marker::PhantomData,
        }
    }
}

/// Where the interactive loop gets its lines from.
pub trait LineSource {
    /// Shows `prompt` and reads one line. `Ok(None)` means there is no more input.
    fn read_line(&mut self, prompt: &str) -> anyhow::Result<Option<String>>;
}

/// Terminal line source with in-memory history.
pub struct RustylineSource {
    editor: DefaultEditor,
}

impl RustylineSource {
    pub fn new() -> anyhow::Result<Self> {
        Ok(Self {
            editor: DefaultEditor::new()?,
        })
    }
}

impl LineSource for RustylineSource {
    fn read_line(&mut self, prompt: &str) -> anyhow::Result<Option<String>> {
        match self.editor.readline(prompt) {
            Ok(line) => {
                if !line.trim().is_empty() {
                    self.editor.add_history_entry(line.as_str())?;
                }
                Ok(Some(line))
            }
            // The shell ignores Ctrl-C; at the prompt it just asks again.
            Err(ReadlineError::Interrupted) => Ok(Some(String::new())),
            Err(ReadlineError::Eof) => Ok(None),
            Err(err) => Err(err.into()),
        }
    }
}

/// A small shell that classifies lines and runs them in the matching execution mode.
///
/// The interpreter keeps an [`Environment`] and a list of [`CommandFactory`] objects
/// that are queried, in order, to turn a command unit into something runnable. See
/// [`Default`] for the factories included out of the box.
///
/// Example
/// ```
/// use shell_modes::Interpreter;
/// let mut sh = Interpreter::default();
/// sh.execute_line("true ## true");
/// assert!(!sh.should_exit());
/// sh.execute_line("exit");
/// assert!(sh.should_exit());
/// ```
pub struct Interpreter {
    env: Environment,
    commands: Vec<Box<dyn CommandFactory>>,
}

impl Interpreter {
    /// Create a new interpreter with a custom set of command factories.
    pub fn new(commands: Vec<Box<dyn CommandFactory>>) -> Self {
        Self {
            env: Environment::new(),
            commands,
        }
    }

    /// Whether an exit directive (or the end of input) has been seen.
    pub fn should_exit(&self) -> bool {
        self.env.should_exit
    }

    /// The prompt: the absolute working directory followed by `$`.
    pub fn prompt(&self) -> String {
        match self.env.current_dir() {
            Ok(dir) => format!("{}$", dir.display()),
            Err(err) => {
                eprintln!("getcwd(): {err}");
                String::new()
            }
        }
    }

    /// Classifies one line and runs it.
    ///
    /// Blank lines do nothing. A line whose first word is `exit` prints the exit
    /// notice and flags the loop to stop, whatever else the line contains.
    pub fn execute_line(&mut self, line: &str) {
        let (separator, commands) = classify(line);
        let Some(first) = commands.first() else {
            return;
        };

        if is_exit_directive(first) {
            println!("{EXIT_NOTICE}");
            self.env.should_exit = true;
            return;
        }

        match separator {
            Separator::Sequential => {
                run_sequential(self, &commands);
            }
            Separator::Parallel => {
                let report = run_parallel(&commands);
                debug!(?report, "parallel line finished");
            }
            Separator::Redirect => {
                if let Err(err) = run_redirect(self, &commands) {
                    err.report();
                }
            }
            Separator::None => {
                self.run(first);
            }
        }
    }

    /// Read-eval loop: prompt, read, run, until `exit` or the end of input.
    pub fn repl(&mut self, source: &mut dyn LineSource) -> anyhow::Result<()> {
        while !self.env.should_exit {
            let prompt = self.prompt();
            match source.read_line(&prompt)? {
                Some(line) => self.execute_line(&line),
                None => {
                    println!("{EXIT_NOTICE}");
                    self.env.should_exit = true;
                }
            }
        }
        Ok(())
    }
}

impl CommandRunner for Interpreter {
    fn run(&mut self, unit: &str) -> ProcessOutcome {
        let argv = split_arguments(unit);
        let Some((name, rest)) = argv.split_first() else {
            ShellError::EmptyCommand.report();
            return ProcessOutcome::LaunchFailure;
        };
        let args: Vec<&str> = rest.iter().map(String::as_str).collect();

        let created = self
            .commands
            .iter()
            .find_map(|factory| factory.try_create(name, &args));
        let Some(cmd) = created else {
            ShellError::UnknownCommand(name.clone()).report();
            return ProcessOutcome::LaunchFailure;
        };

        match cmd.execute(&mut self.env) {
            Ok(outcome) => outcome,
            Err(err) => {
                err.report();
                ProcessOutcome::LaunchFailure
            }
        }
    }
}

impl Default for Interpreter {
    /// Create an interpreter with the default set of commands:
    /// - built-in: `cd`
    /// - external command launcher
    fn default() -> Self {
        use crate::builtin::Cd;
        use crate::external::ExternalCommand;
        Self::new(vec![
            Box::new(Factory::<Cd>::default()),
            Box::new(Factory::<ExternalCommand>::default()),
        ])
    }
}

fn is_exit_directive(unit: &str) -> bool {
    split_arguments(unit)
        .first()
        .is_some_and(|word| word == EXIT_KEYWORD)
}
