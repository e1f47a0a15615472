//! Command-line surface: `landra serve` and `landra migrate <action>`.

pub mod args;

pub use args::{Cli, Commands};
