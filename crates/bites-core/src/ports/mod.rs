//! Ports - trait definitions for external dependencies.
//! These are the "interfaces" that infrastructure must implement.

mod auth;
mod cache;
mod pubsub;
mod repository;
mod storage;

pub use auth::{AuthError, TokenClaims, TokenService};
pub use cache::{Cache, CacheError};
pub use pubsub::{MessageHandler, PubSub, PubSubError, PubSubMessage};
pub use repository::{
    BaseRepository, PostRepository, ReservationRepository, ReservationWithPost, UserInfoRepository,
};
pub use storage::{BlobError, BlobStore};
