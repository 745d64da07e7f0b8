//! Postgres advisory lock serializing migrations across backend instances.

use sea_orm::{ConnectionTrait, DatabaseBackend, DatabaseConnection, Statement, Value};
use tracing::warn;
use xxhash_rust::xxh3::xxh3_64;

use crate::error::DbInfraError;

/// Stable 64-bit advisory lock id for a textual key.
pub fn pg_lock_id(key: &str) -> i64 {
    xxh3_64(key.as_bytes()) as i64
}

/// Session-level lock. The pool must hold exactly one connection.
pub struct MigrationLock {
    pool: DatabaseConnection,
    id: i64,
}

impl MigrationLock {
    pub fn new(pool: DatabaseConnection, key: &str) -> Self {
        Self {
            pool,
            id: pg_lock_id(key),
        }
    }

    /// `Ok(false)` when another session holds the lock.
    pub async fn try_acquire(&self) -> Result<bool, DbInfraError> {
        self.query_flag("SELECT pg_try_advisory_lock($1) AS flag")
            .await
            .map_err(|e| DbInfraError::config(format!("advisory lock failed: {e}")))
    }

    /// Best effort; the lock also disappears with the session.
    pub async fn release(&self) {
        match self.query_flag("SELECT pg_advisory_unlock($1) AS flag").await {
            Ok(true) => {}
            Ok(false) => warn!(lock_id = self.id, "advisory unlock returned false"),
            Err(e) => warn!(lock_id = self.id, error = %e, "advisory unlock failed"),
        }
    }

    async fn query_flag(&self, sql: &str) -> Result<bool, sea_orm::DbErr> {
        let stmt = Statement::from_sql_and_values(
            DatabaseBackend::Postgres,
            sql,
            vec![Value::from(self.id)],
        );
        match self.pool.query_one(stmt).await? {
            Some(row) => row.try_get("", "flag"),
            None => Ok(false),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::pg_lock_id;

    #[test]
    fn lock_id_is_stable_per_key() {
        assert_eq!(pg_lock_id("grigo:migrate:a"), pg_lock_id("grigo:migrate:a"));
        assert_ne!(pg_lock_id("grigo:migrate:a"), pg_lock_id("grigo:migrate:b"));
    }
}
