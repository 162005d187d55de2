//! Data Transfer Objects - request/response types for the API.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use bites_core::domain::{Post, Reservation};

/// A post as returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostResponse {
    pub id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    pub location: String,
    pub campus_location: String,
    pub description: String,
    pub start_time: Option<DateTime<Utc>>,
    pub end_time: DateTime<Utc>,
    pub total_quantity: i32,
    pub quantity_left: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    /// Whether the pickup window is still open.
    pub active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl PostResponse {
    /// Build from a domain post plus the resolved public image URL.
    pub fn from_post(post: Post, image_url: Option<String>) -> Self {
        let active = post.is_active(Utc::now());
        Self {
            id: post.id,
            user_id: post.user_id,
            title: post.title,
            location: post.location,
            campus_location: post.campus_location.as_str().to_owned(),
            description: post.description,
            start_time: post.start_time,
            end_time: post.end_time,
            total_quantity: post.total_quantity,
            quantity_left: post.quantity_left,
            image_url,
            active,
            created_at: post.created_at,
            updated_at: post.updated_at,
        }
    }
}

/// Request to reserve one unit of a post.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateReservationRequest {
    pub post_id: Uuid,
}

/// A reservation as returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReservationResponse {
    pub id: Uuid,
    pub user_id: Uuid,
    pub post_id: Uuid,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

impl From<Reservation> for ReservationResponse {
    fn from(reservation: Reservation) -> Self {
        Self {
            id: reservation.id,
            user_id: reservation.user_id,
            post_id: reservation.post_id,
            status: reservation.status.as_str().to_owned(),
            created_at: reservation.created_at,
        }
    }
}

/// A reservation joined with a snapshot of its post, as returned by
/// GET /api/reservations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReservationWithPostResponse {
    pub id: Uuid,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub post: PostResponse,
}

/// Envelope for the reservation list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReservationListResponse {
    pub reservations: Vec<ReservationWithPostResponse>,
}
