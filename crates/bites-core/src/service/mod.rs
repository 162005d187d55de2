//! Domain services - the reservation/quantity-consistency core.
//!
//! Each operation is an independent request-scoped unit of work; no state is
//! shared between requests in-process. Consistency of the contended
//! `quantity_left` counter is enforced at the storage boundary through the
//! atomic conditional updates on [`crate::ports::PostRepository`].

mod posts;
mod purge;
mod reservations;

pub use posts::{NewPostInput, PostService, UpdatePostInput};
pub use purge::{PurgeService, revocation_key};
pub use reservations::ReservationService;

use uuid::Uuid;

/// The authenticated caller of a mutation, as resolved by the identity
/// provider.
#[derive(Debug, Clone, Copy)]
pub struct Actor {
    pub user_id: Uuid,
    pub is_admin: bool,
}

impl Actor {
    pub fn user(user_id: Uuid) -> Self {
        Self {
            user_id,
            is_admin: false,
        }
    }

    pub fn admin(user_id: Uuid) -> Self {
        Self {
            user_id,
            is_admin: true,
        }
    }
}

/// An image file received with a post form.
#[derive(Debug, Clone)]
pub struct ImageUpload {
    /// Client-supplied name; only the extension is kept.
    pub file_name: String,
    pub bytes: Vec<u8>,
}

#[cfg(test)]
mod fakes;
