//! Query execution
//!
//! Bridges a resolved command to the HTTP session: env, region and output
//! format come from the parsed options when given, otherwise from the
//! persisted configuration, and the keyed response payload is printed.

use anyhow::Result;

use crate::api::session::HttpSession;
use crate::cli::dispatch::ParsedOptions;
use crate::cli::output;
use crate::config::Config;

/// Execute a GraphQL document and print the payload stored under `key`
pub async fn run_query(options: &ParsedOptions, query: &str, key: &str) -> Result<()> {
    let config = Config::load()?;
    let env = options.get_str("env").unwrap_or(&config.env);
    let region = options.get_str("region").unwrap_or(&config.region);
    let output_fmt = options.get_str("output-fmt").unwrap_or(&config.output_fmt);
    let token = config.token(env).unwrap_or_default();

    let session = HttpSession::new(env, region, token)?;
    let data = session.fetch(query).await?;
    output::print_response(&data, key, output_fmt)
}
