//! CLI command implementations

pub mod pr;
pub mod serve;
pub mod stats;
pub mod team;
pub mod user;

pub use pr::PrArgs;
pub use serve::ServeArgs;
pub use stats::StatsArgs;
pub use team::TeamArgs;
pub use user::UserArgs;

use std::sync::Arc;

use roster_core::{Config, Services, Store};
use roster_db::{Database, DatabaseConfig};
use serde::Serialize;

/// Open the configured database and wire the services to it
pub(crate) async fn open_services(config: &Config) -> anyhow::Result<(Database, Services)> {
    let db_config = DatabaseConfig::from_settings(&config.database);
    let db = Database::open(db_config)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to open database: {}", e))?;

    let store: Arc<dyn Store> = Arc::new(db.store());
    let services = Services::new(store, config.assignment.clone());
    Ok((db, services))
}

/// Pretty-print a result as JSON on stdout
pub(crate) fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
