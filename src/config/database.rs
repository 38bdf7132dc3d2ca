use sea_orm::{Database, DatabaseConnection};
use migration::{MigratorTrait, StoreMigrator};
use crate::config::BootstrapSettings;
use crate::errors::internal::{DatabaseError, InternalError};

/// The single store handle shared by every request task
///
/// Connected once at start-up, migrated, handed to the stores through
/// `AppData` and closed after the server has stopped.
#[derive(Clone)]
pub struct DatabaseConnections {
    pub db: DatabaseConnection,
}

impl DatabaseConnections {
    /// Connect to the configured database
    ///
    /// Does NOT run migrations - call `migrate()` separately.
    pub async fn init(bootstrap_settings: &BootstrapSettings) -> Result<Self, InternalError> {
        let database_url = bootstrap_settings.database_url();

        let db = Database::connect(database_url)
            .await
            .map_err(|e| InternalError::database("connect_database", e))?;

        tracing::debug!("Connected to database: {}", database_url);

        Ok(Self { db })
    }

    /// Wrap an already open connection (used by tests with `sqlite::memory:`)
    pub fn from_connection(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Run all pending migrations
    pub async fn migrate(&self) -> Result<(), InternalError> {
        StoreMigrator::up(&self.db, None)
            .await
            .map_err(|source| InternalError::Database(DatabaseError::Migration { source }))?;

        tracing::debug!("Database migrations completed");

        Ok(())
    }

    pub async fn close(self) -> Result<(), InternalError> {
        self.db
            .close()
            .await
            .map_err(|e| InternalError::database("close_database", e))
    }
}
