//! `strato me`

use crate::api::{queries, query};
use crate::cli::dispatch::ParsedOptions;
use crate::cli::tree::HandlerFuture;

/// Show the currently authenticated user
pub fn me(options: ParsedOptions) -> HandlerFuture {
    Box::pin(async move { query::run_query(&options, queries::ME, "me").await })
}
