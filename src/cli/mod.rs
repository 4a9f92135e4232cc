//! Command-line interface module.

mod args;
pub mod assemble;
pub mod render;
pub mod serve;

pub use args::{AssembleArgs, Cli, Commands};
