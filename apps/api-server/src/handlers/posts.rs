//! Post lifecycle handlers.

use actix_multipart::form::{MultipartForm, bytes::Bytes, text::Text};
use actix_web::{HttpResponse, web};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use uuid::Uuid;

use bites_core::domain::{CampusLocation, Post};
use bites_core::service::{ImageUpload, NewPostInput, UpdatePostInput};
use bites_shared::{ApiResponse, dto::PostResponse};

use crate::middleware::auth::Identity;
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

/// Multipart form for POST /api/posts.
#[derive(Debug, MultipartForm)]
pub struct CreatePostForm {
    pub title: Option<Text<String>>,
    pub location: Option<Text<String>>,
    pub campus_location: Option<Text<String>>,
    pub description: Option<Text<String>>,
    pub quantity: Option<Text<i32>>,
    pub start_time: Option<Text<String>>,
    pub end_time: Option<Text<String>>,
    #[multipart(limit = "10MB")]
    pub image: Option<Bytes>,
}

/// Multipart form for PUT /api/posts - same fields plus the target id and
/// the image-removal flag.
#[derive(Debug, MultipartForm)]
pub struct UpdatePostForm {
    pub id: Option<Text<Uuid>>,
    pub title: Option<Text<String>>,
    pub location: Option<Text<String>>,
    pub campus_location: Option<Text<String>>,
    pub description: Option<Text<String>>,
    pub quantity: Option<Text<i32>>,
    pub start_time: Option<Text<String>>,
    pub end_time: Option<Text<String>>,
    pub remove_image: Option<Text<bool>>,
    #[multipart(limit = "10MB")]
    pub image: Option<Bytes>,
}

#[derive(Debug, Deserialize)]
pub struct PostIdQuery {
    pub id: Uuid,
}

/// POST /api/posts
pub async fn create_post(
    state: web::Data<AppState>,
    identity: Identity,
    MultipartForm(form): MultipartForm<CreatePostForm>,
) -> AppResult<HttpResponse> {
    let input = NewPostInput {
        title: required(form.title)?,
        location: required(form.location)?,
        campus_location: parse_campus(required(form.campus_location)?)?,
        description: required(form.description)?,
        start_time: form
            .start_time
            .map(|t| parse_rfc3339(&t.0, "start_time"))
            .transpose()?,
        end_time: parse_rfc3339(&required(form.end_time)?, "end_time")?,
        quantity: form.quantity.map(|q| q.0),
    };
    let image = form.image.map(to_upload);

    let post = state.posts.create(identity.user_id, input, image).await?;

    publish_event(&state, "post.created", post.id).await;

    Ok(HttpResponse::Created().json(ApiResponse::ok(to_response(&state, post))))
}

/// PUT /api/posts
pub async fn update_post(
    state: web::Data<AppState>,
    identity: Identity,
    MultipartForm(form): MultipartForm<UpdatePostForm>,
) -> AppResult<HttpResponse> {
    let post_id = form
        .id
        .map(|id| id.0)
        .ok_or_else(|| AppError::BadRequest("Missing required fields".to_string()))?;

    let input = UpdatePostInput {
        title: required(form.title)?,
        location: required(form.location)?,
        campus_location: parse_campus(required(form.campus_location)?)?,
        description: required(form.description)?,
        start_time: form
            .start_time
            .map(|t| parse_rfc3339(&t.0, "start_time"))
            .transpose()?,
        end_time: parse_rfc3339(&required(form.end_time)?, "end_time")?,
        quantity: form.quantity.map(|q| q.0),
        remove_image: form.remove_image.map(|r| r.0).unwrap_or(false),
    };
    let image = form.image.map(to_upload);

    let post = state
        .posts
        .update(identity.actor(), post_id, input, image)
        .await?;

    publish_event(&state, "post.updated", post.id).await;

    Ok(HttpResponse::Ok().json(ApiResponse::ok(to_response(&state, post))))
}

/// DELETE /api/posts?id=
pub async fn delete_post(
    state: web::Data<AppState>,
    identity: Identity,
    query: web::Query<PostIdQuery>,
) -> AppResult<HttpResponse> {
    state.posts.delete(identity.actor(), query.id).await?;

    publish_event(&state, "post.deleted", query.id).await;

    Ok(HttpResponse::Ok().json(ApiResponse::ok_with_message((), "Post deleted")))
}

fn required(field: Option<Text<String>>) -> Result<String, AppError> {
    field
        .map(|t| t.0)
        .ok_or_else(|| AppError::BadRequest("Missing required fields".to_string()))
}

fn parse_campus(value: String) -> Result<CampusLocation, AppError> {
    CampusLocation::parse(&value)
        .ok_or_else(|| AppError::BadRequest(format!("Unknown campus location: {value}")))
}

fn parse_rfc3339(value: &str, field: &str) -> Result<DateTime<Utc>, AppError> {
    DateTime::parse_from_rfc3339(value)
        .map(|t| t.with_timezone(&Utc))
        .map_err(|_| AppError::BadRequest(format!("{field} must be an RFC 3339 timestamp")))
}

fn to_upload(bytes: Bytes) -> ImageUpload {
    ImageUpload {
        file_name: bytes
            .file_name
            .unwrap_or_else(|| "upload.jpg".to_string()),
        bytes: bytes.data.to_vec(),
    }
}

pub(crate) fn to_response(state: &AppState, post: Post) -> PostResponse {
    let image_url = post
        .image_path
        .as_deref()
        .map(|path| state.images.public_url(path));
    PostResponse::from_post(post, image_url)
}

async fn publish_event(state: &AppState, channel: &str, post_id: Uuid) {
    let payload = serde_json::json!({ "post_id": post_id }).to_string();
    if let Err(e) = state.events.publish(channel, &payload).await {
        tracing::warn!(%post_id, channel, "Failed to publish event: {}", e);
    }
}
