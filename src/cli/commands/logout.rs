//! `strato logout`

use crate::cli::dispatch::ParsedOptions;
use crate::cli::output;
use crate::cli::tree::HandlerFuture;
use crate::config::Config;

pub fn logout(options: ParsedOptions) -> HandlerFuture {
    Box::pin(async move {
        let mut config = Config::load()?;
        let env = options.get_str("env").unwrap_or(&config.env).to_string();
        config.clear_token(&env);
        config.save()?;
        output::print_info("You have been logged out.");
        Ok(())
    })
}
