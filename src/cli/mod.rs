//! Command-line interface module.

mod args;
pub mod common;
pub mod fetch;
pub mod list;
pub mod meta;
pub mod preview;
pub mod render;

pub use args::{Cli, Commands, InputArgs};
