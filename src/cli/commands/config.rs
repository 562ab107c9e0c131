//! `strato config get` / `strato config set`

use crate::cli::dispatch::ParsedOptions;
use crate::cli::output;
use crate::cli::tree::HandlerFuture;
use crate::config::Config;

/// Print a single configuration setting.
///
/// The setting name arrives as the choice leaf's positional value, stored
/// under the command's own name.
pub fn get(options: ParsedOptions) -> HandlerFuture {
    Box::pin(async move {
        let setting = super::required(&options, "get")?;
        let config = Config::load()?;
        match config.get(setting) {
            Some(value) => println!("{value}"),
            None => anyhow::bail!("Unknown setting '{setting}'"),
        }
        Ok(())
    })
}

/// Persist any of the given settings
pub fn set(options: ParsedOptions) -> HandlerFuture {
    Box::pin(async move {
        let mut config = Config::load()?;
        if let Some(env) = options.get_str("env") {
            config.env = env.to_string();
        }
        if let Some(region) = options.get_str("region") {
            config.region = region.to_string();
        }
        if let Some(output_fmt) = options.get_str("output-fmt") {
            config.output_fmt = output_fmt.to_string();
        }
        config.save()?;
        output::print_info("Configuration updated.");
        Ok(())
    })
}
