//! Command-line interface.
//!
//! - `Cli`, `Commands`: argument definitions via clap
//! - `Display`: console-styled status output

mod commands;
mod display;

pub use commands::{Cli, Commands, OutputFormat};
pub use display::Display;
