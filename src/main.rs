use std::sync::Arc;

use clap::Parser;
use poem::{Server, listener::TcpListener};

use storefront_backend::api::build_app;
use storefront_backend::app_data::AppData;
use storefront_backend::cli::{self, Cli, Commands};
use storefront_backend::config::{BootstrapSettings, DatabaseConnections, init_logging};
use storefront_backend::coordinators::UserCoordinator;
use storefront_backend::types::internal::context::RequestContext;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables from .env file
    dotenv::dotenv().ok();

    init_logging()?;

    let args = Cli::parse();
    let settings = BootstrapSettings::from_env()?;

    if let Some(Commands::Migrate) = args.command {
        return cli::migrate::run_migrations(&settings).await;
    }

    let connections = DatabaseConnections::init(&settings).await?;
    connections.migrate().await?;

    let app_data = Arc::new(AppData::init(connections, &settings)?);

    match args.command {
        Some(Commands::CreateManager { user_id, password }) => {
            cli::create_manager::create_manager(app_data, &user_id, &password).await
        }
        _ => serve(app_data, &settings).await,
    }
}

async fn serve(app_data: Arc<AppData>, settings: &BootstrapSettings) -> Result<(), Box<dyn std::error::Error>> {
    if let Some(seed) = settings.manager_seed() {
        let ctx = RequestContext::for_system("seed_manager");
        let coordinator = UserCoordinator::new(Arc::clone(&app_data));
        match coordinator.seed_manager(&ctx, &seed.user_id, &seed.password).await? {
            Some(uid) => tracing::info!(uid, user_id = %seed.user_id, "Seeded manager account"),
            None => tracing::info!(user_id = %seed.user_id, "Manager account already present"),
        }
    }

    let address = settings.server_address();
    let server_url = format!("http://{}", address);
    let app = build_app(Arc::clone(&app_data), &server_url);

    tracing::info!("Starting server on {}", server_url);
    tracing::info!("Swagger UI available at {}/swagger", server_url);

    Server::new(TcpListener::bind(address))
        .run_with_graceful_shutdown(
            app,
            async {
                let _ = tokio::signal::ctrl_c().await;
                tracing::info!("Shutdown signal received");
            },
            None,
        )
        .await?;

    // Coordinators hold clones of the connection; closing ours is enough
    app_data.connections.clone().close().await?;
    tracing::info!("Server stopped");
    Ok(())
}
