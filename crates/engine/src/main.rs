//! graphwire engine - Main entry point.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use graphwire_engine::infrastructure::config::MappingSettings;
use graphwire_engine::App;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment from repo root (the binary may run from `crates/engine`).
    load_dotenv_from_repo_root();

    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "graphwire_engine=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting graphwire engine");

    let settings = MappingSettings::from_env()?;
    tracing::info!(
        node_strategy = %settings.node_type_strategy,
        relationship_strategy = %settings.relationship_type_strategy,
        "Loaded mapping settings"
    );

    let app = App::connect(&settings).await?;
    tracing::debug!(infrastructure = ?app.infrastructure, "Infrastructure ready");

    let indexes = app.ensure_indexes().await?;
    tracing::info!(count = indexes.len(), "Ensured indexes");

    if app.probe().await? {
        tracing::info!("Neo4j connectivity probe succeeded");
    } else {
        tracing::warn!("Neo4j connectivity probe returned an unexpected value");
    }

    Ok(())
}

fn load_dotenv_from_repo_root() {
    let repo_root = std::path::Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("..");

    // Prefer local overrides.
    for filename in [".env.local", ".env"] {
        let path = repo_root.join(filename);
        if path.exists() {
            let _ = dotenvy::from_path(path);
        }
    }
}
