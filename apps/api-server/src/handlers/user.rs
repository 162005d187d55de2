//! Account purge handler.

use actix_web::{HttpResponse, web};

use bites_shared::ApiResponse;

use crate::middleware::auth::Identity;
use crate::middleware::error::AppResult;
use crate::state::AppState;

/// DELETE /api/user
///
/// Removes everything the caller owns: reservations, posts (with their
/// reservations and images), profile, avatar. Sessions issued before the
/// purge stop validating.
pub async fn delete_account(
    state: web::Data<AppState>,
    identity: Identity,
) -> AppResult<HttpResponse> {
    state.purge.purge(identity.user_id).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok_with_message((), "Account deleted")))
}
