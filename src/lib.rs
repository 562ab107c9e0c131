//! Strato - A command line interface for StratoDB Cloud
//!
//! This library implements the `strato` command-line client: it resolves a
//! command from a declarative command tree, validates its options, and issues
//! GraphQL requests against the StratoDB Cloud control plane.
//!
//! # Architecture
//!
//! The crate is organized into several modules:
//!
//! - [`cli`] - Command tree, argument parsing, dispatch and output formatting
//! - [`api`] - GraphQL session and query execution over HTTP
//! - [`config`] - Persisted configuration (auth contexts and defaults)
//! - [`error`] - Error types and handling

pub mod api;
pub mod cli;
pub mod config;
pub mod error;
