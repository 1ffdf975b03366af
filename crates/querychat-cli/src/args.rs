//! CLI argument definitions using clap

use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "querychat")]
#[command(about = "Ask a MySQL database questions in plain language")]
#[command(
    long_about = r#"Ask a MySQL database questions in plain language.

Connection settings come from the environment (or a .env file):
  OPENAI_API_KEY, MYSQL_HOST, MYSQL_PORT, MYSQL_USER,
  MYSQL_PASSWORD, MYSQL_DATABASE are required;
  OPENAI_MODEL and OPENAI_BASE_URL are optional overrides.

Type 'quit', 'exit', or 'q' to leave the session."#
)]
#[command(version)]
pub struct Cli {
    /// Echo every SQL statement to stdout before it is executed
    #[arg(long = "query", short = 'q')]
    pub show_query: bool,

    /// Enable verbose output
    #[arg(long, short)]
    pub verbose: bool,
}
