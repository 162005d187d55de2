//! Account purge - cascading removal of a user's data.

use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use crate::error::DomainError;
use crate::ports::{BlobStore, Cache, PostRepository, ReservationRepository, UserInfoRepository};

/// Cache key prefix for session revocation marks.
const REVOKED_PREFIX: &str = "session_revoked:";

/// Account purge service.
///
/// Steps run in an order where reservations never outlive the posts or the
/// user they reference. Blob cleanup is best-effort: a storage failure is
/// logged and the row deletions still complete.
pub struct PurgeService {
    posts: Arc<dyn PostRepository>,
    reservations: Arc<dyn ReservationRepository>,
    profiles: Arc<dyn UserInfoRepository>,
    images: Arc<dyn BlobStore>,
    avatars: Arc<dyn BlobStore>,
    sessions: Arc<dyn Cache>,
}

impl PurgeService {
    pub fn new(
        posts: Arc<dyn PostRepository>,
        reservations: Arc<dyn ReservationRepository>,
        profiles: Arc<dyn UserInfoRepository>,
        images: Arc<dyn BlobStore>,
        avatars: Arc<dyn BlobStore>,
        sessions: Arc<dyn Cache>,
    ) -> Self {
        Self {
            posts,
            reservations,
            profiles,
            images,
            avatars,
            sessions,
        }
    }

    pub async fn purge(&self, user_id: Uuid) -> Result<(), DomainError> {
        // 1. The user's own reservations.
        let own = self.reservations.delete_by_user(user_id).await?;

        // 2-5. The user's posts, plus reservations other users made against
        // them and their image blobs.
        let posts = self.posts.find_by_user_id(user_id).await?;
        if !posts.is_empty() {
            let post_ids: Vec<Uuid> = posts.iter().map(|p| p.id).collect();
            let against = self.reservations.delete_by_posts(&post_ids).await?;

            let image_paths: Vec<String> =
                posts.iter().filter_map(|p| p.image_path.clone()).collect();
            if !image_paths.is_empty() {
                if let Err(e) = self.images.remove_many(&image_paths).await {
                    tracing::warn!(user_id = %user_id, error = %e, "Failed to remove post images");
                }
            }

            let deleted = self.posts.delete_by_user_id(user_id).await?;
            tracing::info!(
                user_id = %user_id,
                posts = deleted,
                reservations_against = against,
                "Purged user posts"
            );
        }

        // 6-7. Avatar blob, then the profile row.
        if let Some(profile) = self.profiles.find_by_id(user_id).await? {
            if let Some(url) = &profile.avatar_url {
                if let Some(path) = extract_avatar_path(url, user_id) {
                    if let Err(e) = self.avatars.remove(&path).await {
                        tracing::warn!(user_id = %user_id, error = %e, "Failed to remove avatar");
                    }
                }
            }
        }
        self.profiles.delete(user_id).await?;

        // 8. Revoke the session: tokens issued before this mark stop
        // working. Losing the mark only leaves a token valid until expiry,
        // so a cache failure does not fail the purge.
        let key = revocation_key(user_id);
        if let Err(e) = self
            .sessions
            .set(&key, &Utc::now().timestamp().to_string(), None)
            .await
        {
            tracing::warn!(user_id = %user_id, error = %e, "Failed to write session revocation mark");
        }

        tracing::info!(user_id = %user_id, own_reservations = own, "Account purged");
        Ok(())
    }
}

/// Cache key holding the revocation mark for a user's sessions.
pub fn revocation_key(user_id: Uuid) -> String {
    format!("{REVOKED_PREFIX}{user_id}")
}

/// Resolve an avatar URL to its bucket-relative blob path. Avatars live at
/// `{user_id}/avatar.{ext}`; the stored value may be a full public URL or
/// an already-bare path.
fn extract_avatar_path(url: &str, user_id: Uuid) -> Option<String> {
    if let Some((_, rest)) = url.split_once("/avatars/") {
        let path = rest.split('?').next().unwrap_or(rest);
        return Some(path.to_owned());
    }
    if url.starts_with(&format!("{user_id}/")) {
        return Some(url.to_owned());
    }
    None
}
