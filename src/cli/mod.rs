// CLI module for administrative operations

pub mod create_manager;
pub mod migrate;

use clap::{Parser, Subcommand};

/// Storefront backend server and admin commands
#[derive(Parser)]
#[command(name = "storefront")]
#[command(about = "Storefront REST backend", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the HTTP server (default)
    Serve,

    /// Apply pending database migrations and exit
    Migrate,

    /// Create a manager account
    CreateManager {
        /// Login name of the new manager
        #[arg(long, env = "MANAGER_USER_ID")]
        user_id: String,

        /// Password of the new manager
        #[arg(long, env = "MANAGER_PASSWORD", hide_env_values = true)]
        password: String,
    },
}
