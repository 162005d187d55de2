//! In-memory port implementations backing the service tests.

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::{Post, Reservation, UserInfo};
use crate::error::RepoError;
use crate::ports::{
    BaseRepository, BlobError, BlobStore, Cache, CacheError, PostRepository,
    ReservationRepository, ReservationWithPost, UserInfoRepository,
};

#[derive(Default)]
pub struct InMemoryPosts {
    rows: RwLock<HashMap<Uuid, Post>>,
}

impl InMemoryPosts {
    pub async fn get(&self, id: Uuid) -> Option<Post> {
        self.rows.read().await.get(&id).cloned()
    }

    pub async fn quantity_left(&self, id: Uuid) -> i32 {
        self.get(id).await.map(|p| p.quantity_left).unwrap_or(-1)
    }
}

#[async_trait]
impl BaseRepository<Post, Uuid> for InMemoryPosts {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Post>, RepoError> {
        Ok(self.rows.read().await.get(&id).cloned())
    }

    async fn save(&self, post: Post) -> Result<Post, RepoError> {
        self.rows.write().await.insert(post.id, post.clone());
        Ok(post)
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        self.rows
            .write()
            .await
            .remove(&id)
            .map(|_| ())
            .ok_or(RepoError::NotFound)
    }
}

#[async_trait]
impl PostRepository for InMemoryPosts {
    async fn find_by_user_id(&self, user_id: Uuid) -> Result<Vec<Post>, RepoError> {
        Ok(self
            .rows
            .read()
            .await
            .values()
            .filter(|p| p.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn reserve_unit(&self, post_id: Uuid) -> Result<bool, RepoError> {
        let mut rows = self.rows.write().await;
        match rows.get_mut(&post_id) {
            Some(post) if post.quantity_left > 0 => {
                post.quantity_left -= 1;
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn release_unit(&self, post_id: Uuid) -> Result<bool, RepoError> {
        let mut rows = self.rows.write().await;
        match rows.get_mut(&post_id) {
            Some(post) => {
                if post.quantity_left < post.total_quantity {
                    post.quantity_left += 1;
                }
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn update_details(&self, post: Post) -> Result<(), RepoError> {
        let mut rows = self.rows.write().await;
        match rows.get_mut(&post.id) {
            Some(existing) => {
                let live_counter = existing.quantity_left;
                *existing = post;
                existing.quantity_left = live_counter;
                Ok(())
            }
            None => Err(RepoError::NotFound),
        }
    }

    async fn adjust_quantity_left(&self, post_id: Uuid, diff: i32) -> Result<bool, RepoError> {
        let mut rows = self.rows.write().await;
        match rows.get_mut(&post_id) {
            Some(post) => {
                post.quantity_left = (post.quantity_left + diff).max(0);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete_by_user_id(&self, user_id: Uuid) -> Result<u64, RepoError> {
        let mut rows = self.rows.write().await;
        let before = rows.len();
        rows.retain(|_, p| p.user_id != user_id);
        Ok((before - rows.len()) as u64)
    }
}

/// Delegates to an [`InMemoryPosts`], and while armed sneaks one
/// `reserve_unit` in after the caller has read the row but before its
/// field update lands - the interleaving an owner edit races against.
pub struct ReserveDuringUpdatePosts {
    inner: Arc<InMemoryPosts>,
    armed: AtomicBool,
}

impl ReserveDuringUpdatePosts {
    pub fn new(inner: Arc<InMemoryPosts>) -> Self {
        Self {
            inner,
            armed: AtomicBool::new(false),
        }
    }

    pub fn arm(&self) {
        self.armed.store(true, Ordering::SeqCst);
    }
}

#[async_trait]
impl BaseRepository<Post, Uuid> for ReserveDuringUpdatePosts {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Post>, RepoError> {
        self.inner.find_by_id(id).await
    }

    async fn save(&self, post: Post) -> Result<Post, RepoError> {
        self.inner.save(post).await
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        BaseRepository::delete(&*self.inner, id).await
    }
}

#[async_trait]
impl PostRepository for ReserveDuringUpdatePosts {
    async fn find_by_user_id(&self, user_id: Uuid) -> Result<Vec<Post>, RepoError> {
        self.inner.find_by_user_id(user_id).await
    }

    async fn reserve_unit(&self, post_id: Uuid) -> Result<bool, RepoError> {
        self.inner.reserve_unit(post_id).await
    }

    async fn release_unit(&self, post_id: Uuid) -> Result<bool, RepoError> {
        self.inner.release_unit(post_id).await
    }

    async fn update_details(&self, post: Post) -> Result<(), RepoError> {
        if self.armed.swap(false, Ordering::SeqCst) {
            self.inner.reserve_unit(post.id).await?;
        }
        self.inner.update_details(post).await
    }

    async fn adjust_quantity_left(&self, post_id: Uuid, diff: i32) -> Result<bool, RepoError> {
        self.inner.adjust_quantity_left(post_id, diff).await
    }

    async fn delete_by_user_id(&self, user_id: Uuid) -> Result<u64, RepoError> {
        self.inner.delete_by_user_id(user_id).await
    }
}

#[derive(Default)]
pub struct InMemoryReservations {
    rows: RwLock<HashMap<Uuid, Reservation>>,
    posts: Option<Arc<InMemoryPosts>>,
    /// When set, the next save fails with a query error (exercises the
    /// ledger's compensating release).
    pub fail_next_save: AtomicBool,
}

impl InMemoryReservations {
    pub fn joined_with(posts: Arc<InMemoryPosts>) -> Self {
        Self {
            posts: Some(posts),
            ..Self::default()
        }
    }

    pub async fn count(&self) -> usize {
        self.rows.read().await.len()
    }

    pub async fn count_for_post(&self, post_id: Uuid) -> usize {
        self.rows
            .read()
            .await
            .values()
            .filter(|r| r.post_id == post_id)
            .count()
    }
}

#[async_trait]
impl BaseRepository<Reservation, Uuid> for InMemoryReservations {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Reservation>, RepoError> {
        Ok(self.rows.read().await.get(&id).cloned())
    }

    async fn save(&self, reservation: Reservation) -> Result<Reservation, RepoError> {
        if self.fail_next_save.swap(false, Ordering::SeqCst) {
            return Err(RepoError::Query("injected save failure".into()));
        }

        let mut rows = self.rows.write().await;
        // Unique (user_id, post_id) index.
        if rows
            .values()
            .any(|r| r.user_id == reservation.user_id && r.post_id == reservation.post_id)
        {
            return Err(RepoError::Constraint(
                "duplicate key value violates unique constraint".into(),
            ));
        }
        rows.insert(reservation.id, reservation.clone());
        Ok(reservation)
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        self.rows
            .write()
            .await
            .remove(&id)
            .map(|_| ())
            .ok_or(RepoError::NotFound)
    }
}

#[async_trait]
impl ReservationRepository for InMemoryReservations {
    async fn find_by_user_and_post(
        &self,
        user_id: Uuid,
        post_id: Uuid,
    ) -> Result<Option<Reservation>, RepoError> {
        Ok(self
            .rows
            .read()
            .await
            .values()
            .find(|r| r.user_id == user_id && r.post_id == post_id)
            .cloned())
    }

    async fn list_for_user_with_posts(
        &self,
        user_id: Uuid,
    ) -> Result<Vec<ReservationWithPost>, RepoError> {
        let mut owned: Vec<Reservation> = self
            .rows
            .read()
            .await
            .values()
            .filter(|r| r.user_id == user_id)
            .cloned()
            .collect();
        owned.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        let mut out = Vec::with_capacity(owned.len());
        for reservation in owned {
            let post = match &self.posts {
                Some(posts) => posts.get(reservation.post_id).await,
                None => None,
            };
            out.push(ReservationWithPost { reservation, post });
        }
        Ok(out)
    }

    async fn delete_owned(
        &self,
        id: Uuid,
        user_id: Uuid,
    ) -> Result<Option<Reservation>, RepoError> {
        let mut rows = self.rows.write().await;
        match rows.get(&id) {
            Some(r) if r.user_id == user_id => Ok(rows.remove(&id)),
            _ => Ok(None),
        }
    }

    async fn delete_by_post(&self, post_id: Uuid) -> Result<u64, RepoError> {
        let mut rows = self.rows.write().await;
        let before = rows.len();
        rows.retain(|_, r| r.post_id != post_id);
        Ok((before - rows.len()) as u64)
    }

    async fn delete_by_posts(&self, post_ids: &[Uuid]) -> Result<u64, RepoError> {
        let mut rows = self.rows.write().await;
        let before = rows.len();
        rows.retain(|_, r| !post_ids.contains(&r.post_id));
        Ok((before - rows.len()) as u64)
    }

    async fn delete_by_user(&self, user_id: Uuid) -> Result<u64, RepoError> {
        let mut rows = self.rows.write().await;
        let before = rows.len();
        rows.retain(|_, r| r.user_id != user_id);
        Ok((before - rows.len()) as u64)
    }
}

#[derive(Default)]
pub struct InMemoryProfiles {
    rows: RwLock<HashMap<Uuid, UserInfo>>,
}

impl InMemoryProfiles {
    pub async fn insert(&self, profile: UserInfo) {
        self.rows.write().await.insert(profile.id, profile);
    }

    pub async fn contains(&self, id: Uuid) -> bool {
        self.rows.read().await.contains_key(&id)
    }
}

#[async_trait]
impl UserInfoRepository for InMemoryProfiles {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<UserInfo>, RepoError> {
        Ok(self.rows.read().await.get(&id).cloned())
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        self.rows.write().await.remove(&id);
        Ok(())
    }
}

#[derive(Default)]
pub struct InMemoryBlobs {
    blobs: RwLock<HashMap<String, Vec<u8>>>,
    pub fail_uploads: AtomicBool,
    pub fail_removes: AtomicBool,
}

impl InMemoryBlobs {
    pub async fn contains(&self, path: &str) -> bool {
        self.blobs.read().await.contains_key(path)
    }

    pub async fn len(&self) -> usize {
        self.blobs.read().await.len()
    }
}

#[async_trait]
impl BlobStore for InMemoryBlobs {
    async fn upload(&self, path: &str, bytes: Vec<u8>) -> Result<(), BlobError> {
        if self.fail_uploads.load(Ordering::SeqCst) {
            return Err(BlobError::Upload("injected upload failure".into()));
        }
        let mut blobs = self.blobs.write().await;
        if blobs.contains_key(path) {
            return Err(BlobError::AlreadyExists(path.to_owned()));
        }
        blobs.insert(path.to_owned(), bytes);
        Ok(())
    }

    async fn remove(&self, path: &str) -> Result<(), BlobError> {
        if self.fail_removes.load(Ordering::SeqCst) {
            return Err(BlobError::Remove("injected remove failure".into()));
        }
        self.blobs.write().await.remove(path);
        Ok(())
    }

    async fn remove_many(&self, paths: &[String]) -> Result<(), BlobError> {
        for path in paths {
            self.remove(path).await?;
        }
        Ok(())
    }

    fn public_url(&self, path: &str) -> String {
        format!("mem://{path}")
    }
}

#[derive(Default)]
pub struct InMemorySessionCache {
    entries: RwLock<HashMap<String, String>>,
}

impl InMemorySessionCache {
    pub async fn value(&self, key: &str) -> Option<String> {
        self.entries.read().await.get(key).cloned()
    }
}

#[async_trait]
impl Cache for InMemorySessionCache {
    async fn get(&self, key: &str) -> Option<String> {
        self.entries.read().await.get(key).cloned()
    }

    async fn set(&self, key: &str, value: &str, _ttl: Option<Duration>) -> Result<(), CacheError> {
        self.entries
            .write()
            .await
            .insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<(), CacheError> {
        self.entries.write().await.remove(key);
        Ok(())
    }

    async fn exists(&self, key: &str) -> bool {
        self.entries.read().await.contains_key(key)
    }
}
