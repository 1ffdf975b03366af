//! querychat CLI application
//!
//! An interactive command-line chat that answers plain-language questions
//! about a MySQL database. The model is restricted to read-only queries and
//! every result set is capped, so the session can never modify data.
//!
//! ```bash
//! querychat            # start a chat session
//! querychat --query    # also echo each executed SQL statement
//! ```

mod app;
mod args;
mod console;

use clap::Parser;
use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    // A missing .env file is fine; the environment may already be set.
    let _ = dotenvy::dotenv();

    // Set RUST_LOG=debug for verbose logging
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = args::Cli::parse();

    match app::run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err}");
            ExitCode::FAILURE
        }
    }
}
