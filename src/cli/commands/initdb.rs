use anyhow::{Context, Result};
use migration::{Migrator, MigratorTrait};
use sea_orm::{Database, DatabaseConnection};
use tracing::{debug, info, warn};

/// Apply all pending migrations on an open connection.
pub async fn run_migrations(db: &DatabaseConnection) -> Result<()> {
    let pending = Migrator::get_pending_migrations(db).await?;
    if pending.is_empty() {
        debug!("Schema is up to date");
        return Ok(());
    }

    info!("Applying {} pending migrations", pending.len());
    Migrator::up(db, None).await.map_err(|e| {
        warn!("Migration failed: {}", e);
        e
    })?;
    Ok(())
}

/// Create or upgrade the schema behind `database_url`.
pub async fn init_database(database_url: &str) -> Result<()> {
    let db = Database::connect(database_url)
        .await
        .with_context(|| format!("Failed to connect to database '{}'", database_url))?;

    run_migrations(&db).await?;
    db.close().await?;

    info!("Database ready at {}", database_url);
    Ok(())
}
