use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::str::FromStr;
use std::time::Duration;

use crate::config::DatabaseConfig;

#[derive(Clone)]
pub struct Db(pub SqlitePool);

impl Db {
    /// Opens the backend selected in the config and runs pending migrations.
    /// Any failure to open or migrate surfaces here, before the server
    /// starts taking requests.
    pub async fn connect_and_migrate(cfg: &DatabaseConfig) -> anyhow::Result<Self> {
        let pool = match cfg {
            DatabaseConfig::File { path } => {
                let opts = SqliteConnectOptions::from_str(&format!("sqlite://{}", path))?
                    .create_if_missing(true)
                    .foreign_keys(true)
                    .journal_mode(sqlx::sqlite::SqliteJournalMode::Wal)
                    .synchronous(sqlx::sqlite::SqliteSynchronous::Normal);

                SqlitePoolOptions::new()
                    .max_connections(8)
                    .acquire_timeout(Duration::from_secs(10))
                    .connect_with(opts)
                    .await?
            }
            DatabaseConfig::Memory => {
                // An in-memory database lives exactly as long as its
                // connection, so keep a single one and never recycle it.
                let opts =
                    SqliteConnectOptions::from_str("sqlite::memory:")?.foreign_keys(true);

                SqlitePoolOptions::new()
                    .max_connections(1)
                    .idle_timeout(None)
                    .max_lifetime(None)
                    .connect_with(opts)
                    .await?
            }
        };
        sqlx::migrate!("./migrations").run(&pool).await?;
        Ok(Db(pool))
    }

    /// Inserts a few sample users for local development. Safe to run more
    /// than once: rows are keyed on the unique email.
    pub async fn seed(&self) -> anyhow::Result<()> {
        for (name, email) in [
            ("John Doe", "john@example.com"),
            ("Jane Smith", "jane@example.com"),
            ("Bob Johnson", "bob@example.com"),
        ] {
            sqlx::query("INSERT OR IGNORE INTO users(name, email) VALUES (?, ?)")
                .bind(name)
                .bind(email)
                .execute(&self.0)
                .await?;
        }
        Ok(())
    }
}
