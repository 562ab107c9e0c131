//! `strato login`
//!
//! Thin token flow: print where a token can be generated, read it from
//! standard input and persist it for the selected auth context.

use std::io::{self, BufRead, Write};

use crate::api::session;
use crate::cli::dispatch::ParsedOptions;
use crate::cli::output;
use crate::cli::tree::HandlerFuture;
use crate::config::Config;

pub fn login(options: ParsedOptions) -> HandlerFuture {
    Box::pin(async move {
        let mut config = Config::load()?;
        let env = options
            .get_str("env")
            .unwrap_or(&config.env)
            .to_string();

        println!(
            "A session token can be generated at {}",
            session::login_page_url(&env)
        );
        print!("Enter your session token: ");
        io::stdout().flush()?;

        let mut token = String::new();
        io::stdin().lock().read_line(&mut token)?;
        let token = token.trim().to_string();
        if token.is_empty() {
            anyhow::bail!("No session token provided");
        }

        config.set_token(&env, token);
        // logging in also switches the current context
        config.env = env;
        config.save()?;
        output::print_info("Login successful.");
        Ok(())
    })
}
