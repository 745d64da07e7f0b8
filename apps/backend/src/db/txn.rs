use std::sync::Arc;

use actix_web::{HttpMessage, HttpRequest};
use futures_util::future::LocalBoxFuture;
use sea_orm::{DatabaseTransaction, TransactionTrait};
use tracing::warn;

use super::require_db;
use crate::error::AppError;
use crate::state::app_state::AppState;

/// Transaction injected into request extensions by tests; `with_txn` reuses
/// it instead of opening its own.
#[derive(Clone)]
pub struct SharedTxn(pub Arc<DatabaseTransaction>);

impl SharedTxn {
    pub fn transaction(&self) -> &DatabaseTransaction {
        &self.0
    }

    pub fn from_req(req: &HttpRequest) -> Option<Self> {
        req.extensions().get::<SharedTxn>().cloned()
    }
}

/// Run `f` inside one database transaction.
///
/// A `SharedTxn` found on the request is used as-is and left open. Otherwise a
/// fresh transaction is begun, committed on `Ok` and rolled back on `Err`.
///
/// Closures must move owned data in; the future may only borrow the
/// transaction.
pub async fn with_txn<R, F>(
    req: Option<&HttpRequest>,
    state: &AppState,
    f: F,
) -> Result<R, AppError>
where
    F: for<'c> FnOnce(&'c DatabaseTransaction) -> LocalBoxFuture<'c, Result<R, AppError>>,
{
    if let Some(shared) = req.and_then(SharedTxn::from_req) {
        return f(shared.transaction()).await;
    }

    let db = require_db(state)?;
    let txn = db.begin().await?;

    match f(&txn).await {
        Ok(val) => {
            txn.commit().await?;
            Ok(val)
        }
        Err(err) => {
            if let Err(rollback_err) = txn.rollback().await {
                warn!(error = %rollback_err, "rollback after failed transaction also failed");
            }
            Err(err)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ErrorCode;

    #[tokio::test]
    async fn without_db_fails_before_running_closure() {
        let state = AppState::for_tests_without_db();
        let result: Result<(), AppError> = with_txn(None, &state, |_txn| {
            Box::pin(async { Err(AppError::internal("closure must not run")) })
        })
        .await;
        let err = result.unwrap_err();
        assert_eq!(err.code(), ErrorCode::DbUnavailable);
    }
}
