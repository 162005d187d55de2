//! Reservation ledger handlers.

use actix_web::{HttpResponse, web};
use serde::Deserialize;
use uuid::Uuid;

use bites_shared::dto::{
    CreateReservationRequest, ReservationListResponse, ReservationResponse,
    ReservationWithPostResponse,
};
use bites_shared::ApiResponse;

use crate::middleware::auth::Identity;
use crate::middleware::error::AppResult;
use crate::state::AppState;

use super::posts::to_response;

#[derive(Debug, Deserialize)]
pub struct ReservationIdQuery {
    pub id: Uuid,
}

/// POST /api/reservations
pub async fn create_reservation(
    state: web::Data<AppState>,
    identity: Identity,
    body: web::Json<CreateReservationRequest>,
) -> AppResult<HttpResponse> {
    let reservation = state
        .reservations
        .reserve(identity.user_id, body.post_id)
        .await?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok(ReservationResponse::from(reservation))))
}

/// GET /api/reservations
pub async fn list_reservations(
    state: web::Data<AppState>,
    identity: Identity,
) -> AppResult<HttpResponse> {
    let rows = state.reservations.list(identity.user_id).await?;

    let reservations = rows
        .into_iter()
        .map(|(reservation, post)| ReservationWithPostResponse {
            id: reservation.id,
            status: reservation.status.as_str().to_owned(),
            created_at: reservation.created_at,
            post: to_response(&state, post),
        })
        .collect();

    Ok(HttpResponse::Ok().json(ReservationListResponse { reservations }))
}

/// DELETE /api/reservations?id=
pub async fn cancel_reservation(
    state: web::Data<AppState>,
    identity: Identity,
    query: web::Query<ReservationIdQuery>,
) -> AppResult<HttpResponse> {
    state
        .reservations
        .cancel(identity.user_id, query.id)
        .await?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok_with_message((), "Reservation cancelled")))
}
