use std::future::Future;
use std::ops::Deref;
use std::pin::Pin;

use actix_web::dev::Payload;
use actix_web::{web, FromRequest, HttpMessage, HttpRequest};

use crate::auth::jwt::Claims;
use crate::db::require_db;
use crate::db::txn::SharedTxn;
use crate::error::AppError;
use crate::repos::users::{self, User};
use crate::state::app_state::AppState;

/// The `app_users` row behind the bearer token.
///
/// Reads the `Claims` that `JwtExtract` stored in request extensions and
/// loads the user through the request's `SharedTxn` when one is present.
/// A valid token for a user that no longer exists is a 403.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub User);

impl CurrentUser {
    pub fn into_inner(self) -> User {
        self.0
    }
}

impl Deref for CurrentUser {
    type Target = User;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl FromRequest for CurrentUser {
    type Error = AppError;
    type Future = Pin<Box<dyn Future<Output = Result<Self, Self::Error>>>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let req = req.clone();

        Box::pin(async move {
            let claims = req
                .extensions()
                .get::<Claims>()
                .cloned()
                .ok_or_else(AppError::unauthorized_missing_bearer)?;
            let user_id = claims.user_id()?;

            let user = if let Some(shared) = SharedTxn::from_req(&req) {
                users::find_user_by_id(shared.transaction(), user_id).await?
            } else {
                let state = req
                    .app_data::<web::Data<AppState>>()
                    .ok_or_else(|| AppError::internal("AppState not available"))?;
                users::find_user_by_id(require_db(state)?, user_id).await?
            };

            user.map(CurrentUser)
                .ok_or_else(AppError::forbidden_user_not_found)
        })
    }
}
