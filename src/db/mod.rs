pub mod queries;

use sqlx::migrate::Migrator;
use sqlx::sqlite::{SqlitePool, SqlitePoolOptions};

pub use queries::categories::Category;
pub use queries::questions::Question;

use sqlx::Error;

static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

pub async fn establish_connection(url: &str, max_connections: u32) -> Result<SqlitePool, Error> {
    SqlitePoolOptions::new()
        .max_connections(max_connections)
        .connect(url)
        .await
}

/// Creates the tables and seeds the fixed category set. Safe to run on every start.
pub async fn run_migrations(pool: &SqlitePool) -> Result<(), Error> {
    MIGRATOR.run(pool).await?;
    Ok(())
}

#[cfg(test)]
pub(crate) async fn test_pool() -> SqlitePool {
    let pool = establish_connection("sqlite::memory:", 1)
        .await
        .expect("in-memory database");
    run_migrations(&pool).await.expect("migrations");
    pool
}
