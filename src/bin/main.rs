use finance_bot::{
    chat::run_chat,
    config::BotConfig,
    llm::{GeminiClient, RetryPolicy, RetryingModel},
    Router,
};
use tokio::io::{stdin, stdout, BufReader};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = BotConfig::from_env()?;

    // Logs go to stderr so they never interleave with the chat on stdout
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    if config.llm.api_key.is_empty() {
        warn!("GEMINI_API_KEY not set; advice and free-form questions will be unavailable");
    }

    let client = GeminiClient::new(&config.llm)?;
    let model = RetryingModel::new(client, RetryPolicy::from_config(&config.llm));
    let router = Router::new(Box::new(model));

    info!(model = %config.llm.model, "Finance bot initialized");

    let final_state = run_chat(&router, BufReader::new(stdin()), stdout()).await?;

    info!(
        session_id = %final_state.session_id,
        expenses = final_state.expense_log().len(),
        "Session ended"
    );

    Ok(())
}
