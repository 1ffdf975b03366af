//! Environment variable-based configuration loading
//!
//! All connection settings come from the environment (optionally via a `.env`
//! file loaded by the CLI before this runs). Every MySQL variable and the
//! OpenAI API key are required; their absence is a startup-fatal error.

use crate::error::{AgentError, AgentResult};
use std::env;
use std::fmt;

/// Default model used when `OPENAI_MODEL` is not set
pub const DEFAULT_MODEL: &str = "gpt-4.1-nano";

/// Default API endpoint used when `OPENAI_BASE_URL` is not set
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// OpenAI provider settings
#[derive(Debug, Clone)]
pub struct OpenAiConfig {
    pub api_key: String,
    pub model: String,
    pub base_url: String,
}

/// MySQL connection settings
#[derive(Clone)]
pub struct MysqlConfig {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: String,
    pub database: String,
}

// Keep the password out of logs and error output.
impl fmt::Debug for MysqlConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MysqlConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("user", &self.user)
            .field("password", &"<redacted>")
            .field("database", &self.database)
            .finish()
    }
}

/// Complete application configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub openai: OpenAiConfig,
    pub mysql: MysqlConfig,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Required: `OPENAI_API_KEY`, `MYSQL_HOST`, `MYSQL_PORT`, `MYSQL_USER`,
    /// `MYSQL_PASSWORD`, `MYSQL_DATABASE`.
    /// Optional: `OPENAI_MODEL`, `OPENAI_BASE_URL`.
    pub fn from_env() -> AgentResult<Self> {
        let openai = OpenAiConfig {
            api_key: require("OPENAI_API_KEY")?,
            model: env::var("OPENAI_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string()),
            base_url: env::var("OPENAI_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string()),
        };

        let port_raw = require("MYSQL_PORT")?;
        let port = port_raw
            .parse::<u16>()
            .map_err(|_| AgentError::config(format!("invalid MYSQL_PORT value: {port_raw:?}")))?;

        let mysql = MysqlConfig {
            host: require("MYSQL_HOST")?,
            port,
            user: require("MYSQL_USER")?,
            password: require("MYSQL_PASSWORD")?,
            database: require("MYSQL_DATABASE")?,
        };

        Ok(Self { openai, mysql })
    }
}

fn require(var: &'static str) -> AgentResult<String> {
    env::var(var).map_err(|_| AgentError::MissingEnv(var))
}
