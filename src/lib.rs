//! A small interactive shell that runs command lines in one of four modes.
//!
//! A line is classified by the separator it contains: `&&` runs its commands
//! concurrently and waits for all of them, `##` runs them one after another, `>`
//! sends the output of a single command to a file, and a line without a separator
//! is a single command. The only built-in is `cd`; everything else is launched as a
//! child process that inherits the shell's working directory and environment.
//!
//! The main entry point is [`Interpreter`], which classifies a line, dispatches it to
//! the matching execution mode in [`modes`], and drives the interactive loop over any
//! [`LineSource`].

mod builtin;
pub mod command;
pub mod env;
pub mod error;
mod external;
mod interpreter;
pub mod io_adapters;
pub mod lexer;
pub mod modes;
pub mod parser;

pub use command::CommandRunner;
pub use interpreter::{Interpreter, LineSource, RustylineSource};
