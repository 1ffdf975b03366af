//! Interactive chat loop

use crate::args::Cli;
use crate::console::Console;
use querychat_core::agent::prompts::build_system_prompt;
use querychat_core::agent::Agent;
use querychat_core::config::Config;
use querychat_core::error::{AgentError, AgentResult};
use querychat_core::history::ConversationHistory;
use querychat_core::llm::LlmClient;
use querychat_core::tools::ToolRegistry;
use querychat_tools::pool::Database;
use querychat_tools::tools::get_database_tools;
use std::sync::Arc;
use tracing::{error, info};

const QUIT_COMMANDS: &[&str] = &["quit", "exit", "q"];

/// Run the interactive session to completion.
///
/// Startup failures (missing configuration, unreachable database) are
/// returned to the caller; errors inside a conversation turn are reported to
/// the user and the loop continues.
pub async fn run(cli: Cli) -> AgentResult<()> {
    let console = Console::new(cli.verbose);

    let config = Config::from_env()?;
    info!(model = %config.openai.model, database = %config.mysql.database, "starting session");

    let db = Database::connect(&config.mysql, cli.show_query)
        .await
        .map_err(|e| {
            AgentError::config(format!(
                "cannot connect to MySQL at {}:{}: {e}",
                config.mysql.host, config.mysql.port
            ))
        })?;
    let db = Arc::new(db);
    console.info(&format!(
        "connected to {}:{} as {}",
        config.mysql.host, config.mysql.port, config.mysql.user
    ));

    let mut registry = ToolRegistry::new();
    for tool in get_database_tools(Arc::clone(&db)) {
        registry.register(tool);
    }

    let client = LlmClient::new(config.openai.clone())?;
    let agent = Agent::new(
        client,
        registry,
        build_system_prompt(&config.mysql.database),
    );

    console.banner(&config.mysql.database);

    let mut history = ConversationHistory::new();

    loop {
        let Some(question) = console.input()? else {
            break;
        };

        if question.is_empty() {
            continue;
        }

        if QUIT_COMMANDS.contains(&question.to_lowercase().as_str()) {
            break;
        }

        match agent.run_turn(&history, &question).await {
            Ok(answer) => {
                history.push_user(&question);
                history.push_assistant(&answer);
                console.answer(&answer);
            }
            Err(err) => {
                // Failed turns stay out of the history so a transient error
                // does not become part of the model's context.
                error!(%err, "conversation turn failed");
                console.error(&format!("Something went wrong: {err}"));
            }
        }
    }

    console.success("Goodbye!");
    db.close().await;
    Ok(())
}
