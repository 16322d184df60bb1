use admission::app;
use admission::modules::Modules;
use admission::utils::commands::scenario::Scenario;
use anyhow::Context;
use dotenv::dotenv;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> anyhow::Result<()> {
    dotenv().ok();
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "admission=debug".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let path = std::env::args()
        .nth(1)
        .context("Usage: admission <scenario.json>")?;

    let modules = Modules::load_from_settings()?;

    info!("Reading scenario from {path}");
    let raw = std::fs::read_to_string(&path).with_context(|| format!("Failed to read {path}"))?;
    let scenario: Scenario =
        serde_json::from_str(&raw).with_context(|| format!("Failed to parse {path}"))?;

    let report = app(&modules, &scenario).map_err(|e| {
        error!("Scenario failed: {}", e.user_message());
        e
    })?;

    let output = if modules.environment().is_dev() {
        serde_json::to_string_pretty(&report)?
    } else {
        serde_json::to_string(&report)?
    };
    println!("{output}");
    Ok(())
}
