//! Business units are seeded by migration and never change at runtime, so
//! the list is cached per process.

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache;
use sea_orm::ConnectionTrait;

use crate::entities::business_units;
use crate::error::AppError;
use crate::repos::business_units as bu_repo;

const CACHE_TTL: Duration = Duration::from_secs(10 * 60);

#[derive(Clone)]
pub struct BuCache {
    inner: Cache<(), Arc<Vec<business_units::Model>>>,
}

impl BuCache {
    pub fn new() -> Self {
        Self {
            inner: Cache::builder()
                .max_capacity(1)
                .time_to_live(CACHE_TTL)
                .build(),
        }
    }
}

impl Default for BuCache {
    fn default() -> Self {
        Self::new()
    }
}

/// All business units ordered by id.
pub async fn list<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    cache: &BuCache,
) -> Result<Arc<Vec<business_units::Model>>, AppError> {
    cache
        .inner
        .try_get_with((), async {
            bu_repo::list_business_units(conn).await.map(Arc::new)
        })
        .await
        .map_err(|err| AppError::from((*err).clone()))
}
