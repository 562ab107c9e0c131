//! Command-line interface module
//!
//! This module owns the declarative command tree, the recursive parser tree
//! builder that resolves a handler from `argv`, and output formatting. It
//! contains no control-plane logic - that belongs in the [`crate::api`]
//! module.

pub mod args;
pub mod commands;
pub mod dispatch;
pub mod output;
pub mod tree;
pub mod usage;

/// Section title for subcommand listings in help output
pub const COMMANDS_TITLE: &str = "Available Commands";

/// Section title for the required argument group in help output
pub const REQUIRED_TITLE: &str = "Required Arguments";

/// Section title for the optional argument group in help output
pub const OPTIONALS_TITLE: &str = "Optional Arguments";
