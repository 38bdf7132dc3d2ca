use crate::config::{BootstrapSettings, DatabaseConnections};

/// Run database migrations
///
/// Connects to the database and applies pending migrations without
/// initializing secrets or the rest of AppData.
pub async fn run_migrations(settings: &BootstrapSettings) -> Result<(), Box<dyn std::error::Error>> {
    tracing::info!("Running database migrations...");

    let connections = DatabaseConnections::init(settings).await?;
    connections.migrate().await?;
    connections.close().await?;

    tracing::info!("All migrations completed successfully");
    Ok(())
}
