use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{Post, Reservation, UserInfo};
use crate::error::RepoError;

/// Generic repository trait defining standard CRUD operations.
#[async_trait]
pub trait BaseRepository<T, ID>: Send + Sync {
    /// Find an entity by its unique ID.
    async fn find_by_id(&self, id: ID) -> Result<Option<T>, RepoError>;

    /// Save an entity (create or update).
    async fn save(&self, entity: T) -> Result<T, RepoError>;

    /// Delete an entity by its ID.
    async fn delete(&self, id: ID) -> Result<(), RepoError>;
}

/// A reservation joined with a snapshot of the post it claims.
#[derive(Debug, Clone)]
pub struct ReservationWithPost {
    pub reservation: Reservation,
    /// None when the post row vanished between the join and the read; the
    /// ledger filters these out rather than erroring.
    pub post: Option<Post>,
}

/// Post repository. `quantity_left` is the single shared counter contended
/// by concurrent reserve/cancel/edit, so its mutations are exposed only as
/// atomic conditional updates, never as read-modify-write.
#[async_trait]
pub trait PostRepository: BaseRepository<Post, Uuid> {
    async fn find_by_user_id(&self, user_id: Uuid) -> Result<Vec<Post>, RepoError>;

    /// Atomically claim one unit: `quantity_left -= 1` only where
    /// `quantity_left > 0`. Returns false when the post is missing or
    /// exhausted - the caller must not have written anything yet.
    async fn reserve_unit(&self, post_id: Uuid) -> Result<bool, RepoError>;

    /// Atomically return one unit: `quantity_left += 1` only where
    /// `quantity_left < total_quantity`. Returns false when the post is
    /// gone, which callers treat as a no-op (the delete cascade already
    /// released capacity).
    async fn release_unit(&self, post_id: Uuid) -> Result<bool, RepoError>;

    /// Persist every field of `post` except `quantity_left`. Owner edits go
    /// through this so a stale in-memory counter can never overwrite one a
    /// concurrent reserve or cancel already moved.
    async fn update_details(&self, post: Post) -> Result<(), RepoError>;

    /// Atomically apply a supply delta: `quantity_left = GREATEST(0,
    /// quantity_left + diff)` keyed by post id, floored in the statement
    /// itself. Returns false when the post is gone.
    async fn adjust_quantity_left(&self, post_id: Uuid, diff: i32) -> Result<bool, RepoError>;

    /// Delete every post owned by `user_id`. Returns the number of rows
    /// removed.
    async fn delete_by_user_id(&self, user_id: Uuid) -> Result<u64, RepoError>;
}

/// Reservation repository.
#[async_trait]
pub trait ReservationRepository: BaseRepository<Reservation, Uuid> {
    async fn find_by_user_and_post(
        &self,
        user_id: Uuid,
        post_id: Uuid,
    ) -> Result<Option<Reservation>, RepoError>;

    /// Every reservation owned by `user_id`, joined with its post snapshot,
    /// ordered by reservation `created_at` descending. A fresh query each
    /// call; no cursor state.
    async fn list_for_user_with_posts(
        &self,
        user_id: Uuid,
    ) -> Result<Vec<ReservationWithPost>, RepoError>;

    /// Delete the reservation only if both id and owner match, in a single
    /// statement. Returns the deleted row, or None when nothing matched -
    /// id guessing cannot cancel another user's reservation.
    async fn delete_owned(
        &self,
        id: Uuid,
        user_id: Uuid,
    ) -> Result<Option<Reservation>, RepoError>;

    async fn delete_by_post(&self, post_id: Uuid) -> Result<u64, RepoError>;

    async fn delete_by_posts(&self, post_ids: &[Uuid]) -> Result<u64, RepoError>;

    async fn delete_by_user(&self, user_id: Uuid) -> Result<u64, RepoError>;
}

/// Profile repository - only touched by the purge service.
#[async_trait]
pub trait UserInfoRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<UserInfo>, RepoError>;

    async fn delete(&self, id: Uuid) -> Result<(), RepoError>;
}
