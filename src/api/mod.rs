//! Control-plane API module
//!
//! GraphQL over HTTP against the StratoDB Cloud control plane: a cookie-
//! authenticated session, a query runner resolving defaults from the
//! persisted configuration, and the static query documents.

pub mod queries;
pub mod query;
pub mod session;
