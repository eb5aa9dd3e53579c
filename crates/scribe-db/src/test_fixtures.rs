//! Test fixtures for database integration tests.
//!
//! Every [`TestDatabase`] gets its own PostgreSQL schema, and every pooled
//! connection has its `search_path` pinned to it, so tests running in
//! parallel never see each other's rows and ids always start at 1.
//!
//! ## Configuration
//!
//! The database URL comes from the `DATABASE_URL` environment variable.
//! When it is unset or the server cannot be reached, [`TestDatabase::try_new`]
//! returns `None` and callers skip.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use scribe_db::test_fixtures::TestDatabase;
//!
//! #[tokio::test]
//! async fn test_something() {
//!     let Some(test_db) = TestDatabase::try_new().await else { return };
//!
//!     // Run your tests against test_db.db ...
//!
//!     test_db.cleanup().await;
//! }
//! ```

use std::time::Duration;

use sqlx::{Executor, PgPool};
use uuid::Uuid;

use crate::{ensure_schema, Database, Error, PoolConfig, Result};

/// Isolated database for one test.
pub struct TestDatabase {
    pub pool: PgPool,
    pub db: Database,
    admin: PgPool,
    schema_name: String,
}

impl TestDatabase {
    /// Connect to `DATABASE_URL` and create a scratch schema with the note
    /// table. Returns `None` (after printing why) when no database is available.
    pub async fn try_new() -> Option<Self> {
        let Ok(database_url) = std::env::var("DATABASE_URL") else {
            eprintln!("Skipping: DATABASE_URL not set");
            return None;
        };

        match Self::connect(&database_url).await {
            Ok(test_db) => Some(test_db),
            Err(e) => {
                eprintln!("Skipping: test database unavailable at {database_url}: {e}");
                None
            }
        }
    }

    async fn connect(database_url: &str) -> Result<Self> {
        let schema_name = format!("test_{}", Uuid::new_v4().simple());

        let admin = PoolConfig::new()
            .max_connections(1)
            .connect_timeout(Duration::from_secs(5))
            .options()
            .connect(database_url)
            .await
            .map_err(Error::Database)?;

        sqlx::query(&format!("CREATE SCHEMA {schema_name}"))
            .execute(&admin)
            .await
            .map_err(Error::Database)?;

        let search_path = format!("SET search_path TO {schema_name}");
        let pool = PoolConfig::new()
            .max_connections(5)
            .connect_timeout(Duration::from_secs(5))
            .options()
            .after_connect(move |conn, _meta| {
                let sql = search_path.clone();
                Box::pin(async move {
                    conn.execute(sql.as_str()).await?;
                    Ok(())
                })
            })
            .connect(database_url)
            .await
            .map_err(Error::Database)?;

        ensure_schema(&pool).await?;

        Ok(Self {
            db: Database::new(pool.clone()),
            pool,
            admin,
            schema_name,
        })
    }

    /// Close the pool and drop the scratch schema with everything in it.
    pub async fn cleanup(self) {
        self.pool.close().await;
        let _ = sqlx::query(&format!(
            "DROP SCHEMA IF EXISTS {} CASCADE",
            self.schema_name
        ))
        .execute(&self.admin)
        .await;
        self.admin.close().await;
    }
}
