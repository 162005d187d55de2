//! Application state - shared across all handlers.

use std::sync::Arc;

use bites_core::domain::{Post, Reservation, UserInfo};
use bites_core::error::RepoError;
use bites_core::ports::{
    BaseRepository, BlobStore, Cache, PostRepository, PubSub, ReservationRepository,
    ReservationWithPost, TokenService, UserInfoRepository,
};
use bites_core::service::{PostService, PurgeService, ReservationService};
use bites_infra::cache::InMemoryCache;
use bites_infra::pubsub::InMemoryPubSub;
use bites_infra::storage::{FsBlobStore, InMemoryBlobStore};
use bites_infra::JwtTokenService;

use crate::config::AppConfig;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub posts: Arc<PostService>,
    pub reservations: Arc<ReservationService>,
    pub purge: Arc<PurgeService>,
    /// Food-picture bucket; used to resolve public image URLs.
    pub images: Arc<dyn BlobStore>,
    pub tokens: Arc<dyn TokenService>,
    pub sessions: Arc<dyn Cache>,
    pub events: Arc<dyn PubSub>,
}

/// Stub repositories for when the database is not configured: every lookup
/// warns and comes back empty so the server still boots for smoke testing.
struct UnconfiguredPosts;
struct UnconfiguredReservations;
struct UnconfiguredProfiles;

#[async_trait::async_trait]
impl BaseRepository<Post, uuid::Uuid> for UnconfiguredPosts {
    async fn find_by_id(&self, _id: uuid::Uuid) -> Result<Option<Post>, RepoError> {
        tracing::warn!("Database not configured - post lookups return nothing");
        Ok(None)
    }

    async fn save(&self, post: Post) -> Result<Post, RepoError> {
        Ok(post)
    }

    async fn delete(&self, _id: uuid::Uuid) -> Result<(), RepoError> {
        Ok(())
    }
}

#[async_trait::async_trait]
impl PostRepository for UnconfiguredPosts {
    async fn find_by_user_id(&self, _user_id: uuid::Uuid) -> Result<Vec<Post>, RepoError> {
        Ok(Vec::new())
    }

    async fn reserve_unit(&self, _post_id: uuid::Uuid) -> Result<bool, RepoError> {
        Ok(false)
    }

    async fn release_unit(&self, _post_id: uuid::Uuid) -> Result<bool, RepoError> {
        Ok(false)
    }

    async fn update_details(&self, _post: Post) -> Result<(), RepoError> {
        Ok(())
    }

    async fn adjust_quantity_left(&self, _post_id: uuid::Uuid, _diff: i32) -> Result<bool, RepoError> {
        Ok(false)
    }

    async fn delete_by_user_id(&self, _user_id: uuid::Uuid) -> Result<u64, RepoError> {
        Ok(0)
    }
}

#[async_trait::async_trait]
impl BaseRepository<Reservation, uuid::Uuid> for UnconfiguredReservations {
    async fn find_by_id(&self, _id: uuid::Uuid) -> Result<Option<Reservation>, RepoError> {
        Ok(None)
    }

    async fn save(&self, reservation: Reservation) -> Result<Reservation, RepoError> {
        Ok(reservation)
    }

    async fn delete(&self, _id: uuid::Uuid) -> Result<(), RepoError> {
        Ok(())
    }
}

#[async_trait::async_trait]
impl ReservationRepository for UnconfiguredReservations {
    async fn find_by_user_and_post(
        &self,
        _user_id: uuid::Uuid,
        _post_id: uuid::Uuid,
    ) -> Result<Option<Reservation>, RepoError> {
        Ok(None)
    }

    async fn list_for_user_with_posts(
        &self,
        _user_id: uuid::Uuid,
    ) -> Result<Vec<ReservationWithPost>, RepoError> {
        tracing::warn!("Database not configured - reservation lookups return nothing");
        Ok(Vec::new())
    }

    async fn delete_owned(
        &self,
        _id: uuid::Uuid,
        _user_id: uuid::Uuid,
    ) -> Result<Option<Reservation>, RepoError> {
        Ok(None)
    }

    async fn delete_by_post(&self, _post_id: uuid::Uuid) -> Result<u64, RepoError> {
        Ok(0)
    }

    async fn delete_by_posts(&self, _post_ids: &[uuid::Uuid]) -> Result<u64, RepoError> {
        Ok(0)
    }

    async fn delete_by_user(&self, _user_id: uuid::Uuid) -> Result<u64, RepoError> {
        Ok(0)
    }
}

#[async_trait::async_trait]
impl UserInfoRepository for UnconfiguredProfiles {
    async fn find_by_id(&self, _id: uuid::Uuid) -> Result<Option<UserInfo>, RepoError> {
        Ok(None)
    }

    async fn delete(&self, _id: uuid::Uuid) -> Result<(), RepoError> {
        Ok(())
    }
}

impl AppState {
    /// Build the application state with appropriate implementations.
    pub async fn new(config: &AppConfig) -> Self {
        let sessions: Arc<dyn Cache> = Arc::new(InMemoryCache::new());
        let events: Arc<dyn PubSub> = Arc::new(InMemoryPubSub::default());
        let tokens: Arc<dyn TokenService> = Arc::new(JwtTokenService::from_env());

        let (images, avatars): (Arc<dyn BlobStore>, Arc<dyn BlobStore>) = match &config.blob.root {
            Some(root) => {
                let base = &config.blob.public_base_url;
                (
                    Arc::new(FsBlobStore::new(
                        root.join("food_pictures"),
                        format!("{base}/food_pictures"),
                    )),
                    Arc::new(FsBlobStore::new(
                        root.join("avatars"),
                        format!("{base}/avatars"),
                    )),
                )
            }
            None => {
                tracing::warn!("BLOB_ROOT not set - storing blobs in memory");
                (
                    Arc::new(InMemoryBlobStore::new()),
                    Arc::new(InMemoryBlobStore::new()),
                )
            }
        };

        let (post_repo, reservation_repo, profile_repo) = Self::build_repos(config).await;

        let posts = Arc::new(PostService::new(
            post_repo.clone(),
            reservation_repo.clone(),
            images.clone(),
        ));
        let reservations = Arc::new(ReservationService::new(
            reservation_repo.clone(),
            post_repo.clone(),
        ));
        let purge = Arc::new(PurgeService::new(
            post_repo,
            reservation_repo,
            profile_repo,
            images.clone(),
            avatars,
            sessions.clone(),
        ));

        tracing::info!("Application state initialized");

        Self {
            posts,
            reservations,
            purge,
            images,
            tokens,
            sessions,
            events,
        }
    }

    #[cfg(feature = "postgres")]
    async fn build_repos(
        config: &AppConfig,
    ) -> (
        Arc<dyn PostRepository>,
        Arc<dyn ReservationRepository>,
        Arc<dyn UserInfoRepository>,
    ) {
        use bites_infra::database::{
            DatabaseConnections, PostgresPostRepository, PostgresReservationRepository,
            PostgresUserInfoRepository,
        };

        if let Some(db_config) = &config.database {
            match DatabaseConnections::init(db_config).await {
                Ok(connections) => {
                    let db = connections.main;
                    return (
                        Arc::new(PostgresPostRepository::new(db.clone())),
                        Arc::new(PostgresReservationRepository::new(db.clone())),
                        Arc::new(PostgresUserInfoRepository::new(db)),
                    );
                }
                Err(e) => {
                    tracing::error!(
                        "Failed to connect to database: {}. Using unconfigured fallback.",
                        e
                    );
                }
            }
        } else {
            tracing::warn!("DATABASE_URL not set. Running without database.");
        }

        (
            Arc::new(UnconfiguredPosts),
            Arc::new(UnconfiguredReservations),
            Arc::new(UnconfiguredProfiles),
        )
    }

    #[cfg(not(feature = "postgres"))]
    async fn build_repos(
        _config: &AppConfig,
    ) -> (
        Arc<dyn PostRepository>,
        Arc<dyn ReservationRepository>,
        Arc<dyn UserInfoRepository>,
    ) {
        tracing::info!("Running without postgres feature - using unconfigured repositories");
        (
            Arc::new(UnconfiguredPosts),
            Arc::new(UnconfiguredReservations),
            Arc::new(UnconfiguredProfiles),
        )
    }
}
