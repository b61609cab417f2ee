use sqlx::{PgPool, migrate::Migrator};

/// Compile-time discovered SQLx migrations for the `ryujin-database` crate.
pub static MIGRATOR: Migrator = sqlx::migrate!();

/// Shared database handle passed across crates.
#[derive(Clone)]
pub struct Database {
    pool: PgPool,
}

impl Database {
    /// Create a database handle from an existing pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Expose the underlying pool for query modules.
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Apply any pending migrations.
    pub async fn migrate(&self) -> anyhow::Result<()> {
        MIGRATOR.run(&self.pool).await?;
        Ok(())
    }
}

/// Users barred from running commands.
pub mod blacklist;
/// In-process stores for tests and database-less runs.
pub mod memory;
/// Per-guild warning history.
pub mod warnings;
