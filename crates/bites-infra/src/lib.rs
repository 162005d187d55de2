//! # Bites Infrastructure
//!
//! Concrete implementations of the ports defined in `bites-core`.
//! This crate contains the database, blob storage, cache, and token-service
//! integrations.
//!
//! ## Feature Flags
//!
//! - `full` (default) - All features enabled
//! - `minimal` - No external dependencies, in-memory only
//! - `postgres` - PostgreSQL database support via SeaORM
//! - `auth` - JWT token validation

pub mod cache;
pub mod database;
pub mod pubsub;
pub mod storage;

#[cfg(feature = "auth")]
pub mod auth;

// Re-exports - In-Memory
pub use cache::InMemoryCache;
pub use database::DatabaseConnections;
pub use pubsub::InMemoryPubSub;
pub use storage::InMemoryBlobStore;

pub use storage::FsBlobStore;

#[cfg(feature = "auth")]
pub use auth::JwtTokenService;

#[cfg(feature = "postgres")]
pub use database::{
    PostgresPostRepository, PostgresReservationRepository, PostgresUserInfoRepository,
};
