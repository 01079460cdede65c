use crate::client::Result;
use sqlx::{MySqlPool, migrate::Migrator};
use tracing::info;

pub static MIGRATOR: Migrator = sqlx::migrate!();

pub async fn run_migrations(pool: &MySqlPool) -> Result<()> {
    MIGRATOR.run(pool).await?;
    info!("Database migrations are up to date");
    Ok(())
}

/// Undoes every applied migration, which drops the `posts` table.
pub async fn revert_migrations(pool: &MySqlPool) -> Result<()> {
    MIGRATOR.undo(pool, 0).await?;
    info!("Database migrations reverted");
    Ok(())
}
