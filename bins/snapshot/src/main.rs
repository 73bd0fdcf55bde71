//! Procura budget snapshot tool.
//!
//! Computes the planned-vs-withdrawn budget snapshot for one project
//! against the configured record-store backend and prints it as JSON.
//! Intended for operators; the web UI consumes the same aggregation
//! through its own channels.

use std::sync::Arc;

use anyhow::Context;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use procura_core::budget::BudgetAggregator;
use procura_shared::AppConfig;
use procura_store::HttpStore;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "procura=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let project_id = std::env::args()
        .nth(1)
        .context("usage: procura-snapshot <project-id>")?;

    // Load configuration
    let config = AppConfig::load().context("failed to load configuration")?;

    let store = HttpStore::from_config(&config.backend)?;
    info!(base_url = %config.backend.base_url, "record store configured");

    let aggregator = BudgetAggregator::new(Arc::new(store));
    let snapshot = aggregator.snapshot(&project_id).await?;
    info!(
        planned_items = snapshot.planned_items.len(),
        sub_prs = snapshot.sub_prs.len(),
        "snapshot computed"
    );

    println!("{}", serde_json::to_string_pretty(&snapshot)?);

    Ok(())
}
