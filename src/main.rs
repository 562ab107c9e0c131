//! Strato CLI - A command line interface for StratoDB Cloud
//!
//! Entry point: resolves the invocation into a single [`Outcome`] and
//! translates it into an exit code. This is the only place the process exits.
//!
//! Exit codes: 0 success/help/version, 1 unmatched command or handler
//! failure, 2 usage error.

use strato::cli::commands;
use strato::cli::dispatch::{self, Outcome};
use strato::cli::output::display_error;

#[tokio::main]
async fn main() {
    // Initialize tracing subscriber
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .init();

    let argv: Vec<String> = std::env::args().collect();
    let table = commands::command_table();

    let code = match dispatch::resolve(&argv, &table) {
        Outcome::Dispatch { handler, options } => match handler(options).await {
            Ok(()) => 0,
            Err(err) => {
                display_error(&err);
                1
            }
        },
        Outcome::Help { text } => {
            println!("{text}");
            0
        }
        Outcome::Version { text } => {
            print!("{text}");
            0
        }
        Outcome::Unmatched { help } => {
            eprintln!("{help}");
            1
        }
        Outcome::Usage { message, help } => {
            eprintln!("{message}\n\n{help}");
            2
        }
    };

    std::process::exit(code);
}
