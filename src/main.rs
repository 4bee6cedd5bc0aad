use anyhow::{Context, Result};
use argh::FromArgs;
use nix::sys::signal::{SigHandler, Signal, signal};
use shell_modes::{Interpreter, RustylineSource};
use tracing_subscriber::EnvFilter;

#[derive(FromArgs)]
/// Interactive shell running `&&`-parallel, `##`-sequential and `>`-redirected command lines.
struct Args {
    #[argh(option, short = 'c')]
    /// run a single line and exit instead of starting the interactive loop.
    command: Option<String>,

    #[argh(switch, short = 'v')]
    /// log debug diagnostics to stderr unless RUST_LOG says otherwise.
    verbose: bool,
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();
}

/// Ctrl-C and Ctrl-Z reach the children, not the shell.
fn ignore_interactive_signals() -> Result<()> {
    for sig in [Signal::SIGINT, Signal::SIGTSTP] {
        // SAFETY: SIG_IGN installs no handler code.
        unsafe { signal(sig, SigHandler::SigIgn) }
            .with_context(|| format!("failed to ignore {sig}"))?;
    }
    Ok(())
}

fn main() -> Result<()> {
    let args: Args = argh::from_env();
    init_logging(args.verbose);

    let mut sh = Interpreter::default();
    if let Some(line) = args.command {
        sh.execute_line(&line);
        return Ok(());
    }

    ignore_interactive_signals()?;
    let mut source = RustylineSource::new().context("failed to open the terminal")?;
    sh.repl(&mut source)
}
