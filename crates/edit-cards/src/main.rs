use std::sync::Arc;

use anyhow::Context;
use edit_cards::{Card, CardState, HttpProvider};
use edit_proto::config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let log_path = edit_proto::platform::log_path();
    if let Some(dir) = log_path.parent() {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create {}", dir.display()))?;
    }
    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
        .with_context(|| format!("Failed to open log file {}", log_path.display()))?;

    // Allow RUST_LOG override; suppress connection-level DEBUG from the HTTP client.
    let log_filter = std::env::var("RUST_LOG")
        .unwrap_or_else(|_| "info,hyper_util=warn,reqwest=warn,hyper=warn".to_string());
    tracing_subscriber::fmt()
        .with_writer(log_file)
        .with_env_filter(log_filter.as_str())
        .with_ansi(false)
        .init();

    eprintln!("edit-cards log: {}", log_path.display());

    let config = Config::load().unwrap_or_else(|e| {
        tracing::warn!("Falling back to default config: {:#}", e);
        Config::default()
    });
    let params = config.card.params();
    tracing::info!(
        "edit-cards starting: {} {}→{}",
        params.edit_type,
        params.lang_from,
        params.lang_to
    );

    let provider =
        Arc::new(HttpProvider::new(config.clone()).context("Failed to build HTTP client")?);
    let mut card = Card::new(provider, params);

    card.start();
    let mut retries_left = config.card.retry_attempts;
    loop {
        let retryable = match card.next_transition().await {
            CardState::Error(err) => {
                tracing::warn!("Card failed ({}), {} retries left", err, retries_left);
                err.is_retryable()
            }
            _ => false,
        };
        if !retryable || retries_left == 0 {
            break;
        }
        retries_left -= 1;
        card.retry();
    }

    let view = card.view();
    println!("{}", serde_json::to_string_pretty(&view)?);
    card.teardown();

    if let CardState::Error(err) = card.state() {
        anyhow::bail!("No card to show: {}", err);
    }
    Ok(())
}
