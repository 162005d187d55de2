//! Reservation ledger - create, list, cancel.

use std::sync::Arc;

use uuid::Uuid;

use crate::domain::{Post, Reservation};
use crate::error::{DomainError, RepoError};
use crate::ports::{BaseRepository, PostRepository, ReservationRepository};

/// Reservation ledger - every live reservation corresponds to exactly one
/// unit deducted from its post's `quantity_left`.
pub struct ReservationService {
    reservations: Arc<dyn ReservationRepository>,
    posts: Arc<dyn PostRepository>,
}

impl ReservationService {
    pub fn new(
        reservations: Arc<dyn ReservationRepository>,
        posts: Arc<dyn PostRepository>,
    ) -> Self {
        Self {
            reservations,
            posts,
        }
    }

    /// Reserve one unit of a post.
    ///
    /// The availability check and the decrement are a single conditional
    /// update at the storage layer, so "a reservation exists only if
    /// `quantity_left > 0` held at creation" survives concurrent attempts on
    /// the same post. The reservation row is inserted after the unit is
    /// claimed; if that insert fails the claimed unit is released again, so
    /// neither write outlives the other.
    pub async fn reserve(&self, user_id: Uuid, post_id: Uuid) -> Result<Reservation, DomainError> {
        if self
            .reservations
            .find_by_user_and_post(user_id, post_id)
            .await?
            .is_some()
        {
            return Err(DomainError::Duplicate);
        }

        if self.posts.find_by_id(post_id).await?.is_none() {
            return Err(DomainError::NotFound {
                entity_type: "post",
                id: post_id,
            });
        }

        if !self.posts.reserve_unit(post_id).await? {
            return Err(DomainError::Exhausted);
        }

        let reservation = Reservation::new(user_id, post_id);
        match self.reservations.save(reservation).await {
            Ok(saved) => {
                tracing::info!(
                    reservation_id = %saved.id,
                    post_id = %post_id,
                    user_id = %user_id,
                    "Reservation created"
                );
                Ok(saved)
            }
            Err(e) => {
                // Compensate: the unit was already claimed, give it back
                // before surfacing the failure.
                if let Err(release_err) = self.posts.release_unit(post_id).await {
                    tracing::error!(
                        post_id = %post_id,
                        error = %release_err,
                        "Failed to release unit after reservation insert failure"
                    );
                }
                match e {
                    // Unique (user_id, post_id) index caught a concurrent
                    // duplicate that the pre-check missed.
                    RepoError::Constraint(_) => Err(DomainError::Duplicate),
                    other => Err(other.into()),
                }
            }
        }
    }

    /// All reservations owned by `user_id`, newest first, each with a
    /// snapshot of its post.
    pub async fn list(&self, user_id: Uuid) -> Result<Vec<(Reservation, Post)>, DomainError> {
        let rows = self.reservations.list_for_user_with_posts(user_id).await?;

        Ok(rows
            .into_iter()
            .filter_map(|row| match row.post {
                Some(post) => Some((row.reservation, post)),
                None => {
                    // Post vanished mid-query; its cascade removes the
                    // reservation, so just drop the row here.
                    tracing::debug!(
                        reservation_id = %row.reservation.id,
                        "Skipping reservation whose post is gone"
                    );
                    None
                }
            })
            .collect())
    }

    /// Cancel a reservation the caller owns, returning its unit to the
    /// post. Ownership is part of the delete predicate itself, so an id
    /// guess against another user's reservation is just "not found".
    pub async fn cancel(&self, user_id: Uuid, reservation_id: Uuid) -> Result<(), DomainError> {
        let reservation = self
            .reservations
            .delete_owned(reservation_id, user_id)
            .await?
            .ok_or(DomainError::NotFound {
                entity_type: "reservation",
                id: reservation_id,
            })?;

        // If the post was deleted concurrently its cascade already released
        // capacity, so a missing row is a no-op, not an error.
        match self.posts.release_unit(reservation.post_id).await {
            Ok(true) => {}
            Ok(false) => {
                tracing::debug!(post_id = %reservation.post_id, "Post gone, skipping unit release");
            }
            Err(e) => {
                tracing::warn!(
                    post_id = %reservation.post_id,
                    error = %e,
                    "Failed to release unit after cancellation"
                );
            }
        }

        tracing::info!(reservation_id = %reservation_id, user_id = %user_id, "Reservation cancelled");
        Ok(())
    }
}
