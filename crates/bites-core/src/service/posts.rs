//! Post lifecycle - create, update, delete.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::{CampusLocation, Post};
use crate::error::DomainError;
use crate::ports::{BaseRepository, BlobStore, PostRepository, ReservationRepository};

use super::{Actor, ImageUpload};

/// Fields accepted when creating a post.
#[derive(Debug, Clone)]
pub struct NewPostInput {
    pub title: String,
    pub location: String,
    pub campus_location: CampusLocation,
    pub description: String,
    pub start_time: Option<DateTime<Utc>>,
    pub end_time: DateTime<Utc>,
    /// Requested initial supply. Defaults to 1 when absent.
    pub quantity: Option<i32>,
}

/// Fields accepted when editing a post. `quantity` left unset keeps the
/// current total.
#[derive(Debug, Clone)]
pub struct UpdatePostInput {
    pub title: String,
    pub location: String,
    pub campus_location: CampusLocation,
    pub description: String,
    pub start_time: Option<DateTime<Utc>>,
    pub end_time: DateTime<Utc>,
    pub quantity: Option<i32>,
    pub remove_image: bool,
}

/// Post lifecycle manager - quantity bookkeeping and image-asset cleanup
/// for create/edit/delete.
pub struct PostService {
    posts: Arc<dyn PostRepository>,
    reservations: Arc<dyn ReservationRepository>,
    images: Arc<dyn BlobStore>,
}

impl PostService {
    pub fn new(
        posts: Arc<dyn PostRepository>,
        reservations: Arc<dyn ReservationRepository>,
        images: Arc<dyn BlobStore>,
    ) -> Self {
        Self {
            posts,
            reservations,
            images,
        }
    }

    /// Create a post. The image, if any, is uploaded first; an upload
    /// failure aborts the whole operation so no partial state is written.
    pub async fn create(
        &self,
        user_id: Uuid,
        input: NewPostInput,
        image: Option<ImageUpload>,
    ) -> Result<Post, DomainError> {
        let (title, location, description) = validate_text_fields(&input.title, &input.location, &input.description)?;
        let quantity = validate_quantity(input.quantity)?;

        let image_path = match image {
            Some(upload) => Some(self.upload_image(upload).await?),
            None => None,
        };

        let post = Post::new(
            user_id,
            title,
            location,
            input.campus_location,
            description,
            input.start_time,
            input.end_time,
            quantity,
            image_path,
        );

        let saved = self.posts.save(post).await?;
        tracing::info!(post_id = %saved.id, user_id = %user_id, quantity, "Post created");
        Ok(saved)
    }

    /// Update a post. Owner or admin only. Editing the total quantity
    /// shifts `quantity_left` by the same delta, floored at zero, so an
    /// edit never fabricates availability and never goes negative.
    pub async fn update(
        &self,
        actor: Actor,
        post_id: Uuid,
        input: UpdatePostInput,
        image: Option<ImageUpload>,
    ) -> Result<Post, DomainError> {
        let mut post = self.find_authorized(actor, post_id, "you can only edit your own posts").await?;

        let (title, location, description) = validate_text_fields(&input.title, &input.location, &input.description)?;
        if let Some(q) = input.quantity {
            if q < 1 {
                return Err(DomainError::Validation(
                    "quantity must be a positive integer".into(),
                ));
            }
        }

        if input.remove_image {
            if let Some(old) = post.image_path.take() {
                self.remove_image_best_effort(&old).await;
            }
        } else if let Some(upload) = image {
            if let Some(old) = post.image_path.take() {
                self.remove_image_best_effort(&old).await;
            }
            // Upload failure fails the whole update; nothing has been
            // written to the posts table yet.
            post.image_path = Some(self.upload_image(upload).await?);
        }

        let old_total = post.effective_total();
        let new_total = input.quantity.unwrap_or(old_total);
        let diff = new_total - old_total;
        post.total_quantity = new_total;
        post.quantity = new_total;

        post.title = title;
        post.location = location;
        post.campus_location = input.campus_location;
        post.description = description;
        post.start_time = input.start_time;
        post.end_time = input.end_time;
        post.updated_at = Utc::now();

        // `quantity_left` never goes through this write; the counter is
        // contended by concurrent reserves and cancels, so the total-change
        // delta is applied as its own atomic floored update.
        self.posts.update_details(post).await?;
        if diff != 0 && !self.posts.adjust_quantity_left(post_id, diff).await? {
            tracing::warn!(post_id = %post_id, "Post vanished before its quantity delta applied");
        }

        let saved = self
            .posts
            .find_by_id(post_id)
            .await?
            .ok_or(DomainError::NotFound {
                entity_type: "post",
                id: post_id,
            })?;
        tracing::info!(post_id = %saved.id, quantity_left = saved.quantity_left, "Post updated");
        Ok(saved)
    }

    /// Delete a post. Owner or admin only. Reservations are removed before
    /// the post row so no orphan reservations remain queryable.
    pub async fn delete(&self, actor: Actor, post_id: Uuid) -> Result<(), DomainError> {
        let post = self.find_authorized(actor, post_id, "you can only delete your own posts").await?;

        if let Some(path) = &post.image_path {
            self.remove_image_best_effort(path).await;
        }

        let cancelled = self.reservations.delete_by_post(post_id).await?;
        self.posts.delete(post_id).await?;

        tracing::info!(post_id = %post_id, cancelled, "Post deleted");
        Ok(())
    }

    async fn find_authorized(
        &self,
        actor: Actor,
        post_id: Uuid,
        denial: &'static str,
    ) -> Result<Post, DomainError> {
        let post = self
            .posts
            .find_by_id(post_id)
            .await?
            .ok_or(DomainError::NotFound {
                entity_type: "post",
                id: post_id,
            })?;

        if !actor.is_admin && post.user_id != actor.user_id {
            return Err(DomainError::Forbidden(denial));
        }

        Ok(post)
    }

    async fn upload_image(&self, upload: ImageUpload) -> Result<String, DomainError> {
        let path = image_object_name(&upload.file_name);
        self.images
            .upload(&path, upload.bytes)
            .await
            .map_err(|e| DomainError::Storage(format!("image upload failed: {e}")))?;
        Ok(path)
    }

    async fn remove_image_best_effort(&self, path: &str) {
        if let Err(e) = self.images.remove(path).await {
            tracing::warn!(path = %path, error = %e, "Failed to remove old image");
        }
    }
}

/// Collision-free object name for an uploaded image, preserving the
/// original extension.
fn image_object_name(file_name: &str) -> String {
    let ext = file_name.rsplit('.').next().filter(|e| !e.is_empty() && *e != file_name);
    format!("{}.{}", Uuid::new_v4(), ext.unwrap_or("jpg"))
}

fn validate_text_fields(
    title: &str,
    location: &str,
    description: &str,
) -> Result<(String, String, String), DomainError> {
    let title = title.trim();
    let location = location.trim();
    let description = description.trim();

    for (name, value) in [
        ("title", title),
        ("location", location),
        ("description", description),
    ] {
        if value.is_empty() {
            return Err(DomainError::Validation(format!("{name} is required")));
        }
    }

    Ok((title.to_owned(), location.to_owned(), description.to_owned()))
}

fn validate_quantity(quantity: Option<i32>) -> Result<i32, DomainError> {
    match quantity {
        None => Ok(1),
        Some(q) if q >= 1 => Ok(q),
        Some(_) => Err(DomainError::Validation(
            "quantity must be a positive integer".into(),
        )),
    }
}
