//! PostgreSQL repository implementations.

use async_trait::async_trait;
use sea_orm::sea_query::Expr;
use sea_orm::{ColumnTrait, EntityTrait, NotSet, QueryFilter, QueryOrder};
use uuid::Uuid;

use bites_core::domain::{Post, Reservation, UserInfo};
use bites_core::error::RepoError;
use bites_core::ports::{
    PostRepository, ReservationRepository, ReservationWithPost, UserInfoRepository,
};

use super::entity::post::{self, Entity as PostEntity};
use super::entity::reservation::{self, Entity as ReservationEntity};
use super::entity::userinfo::{self, Entity as UserInfoEntity};
use super::postgres_base::{PostgresBaseRepository, map_db_err};

/// PostgreSQL post repository.
pub type PostgresPostRepository = PostgresBaseRepository<PostEntity>;

/// PostgreSQL reservation repository.
pub type PostgresReservationRepository = PostgresBaseRepository<ReservationEntity>;

/// PostgreSQL profile repository.
pub type PostgresUserInfoRepository = PostgresBaseRepository<UserInfoEntity>;

#[async_trait]
impl PostRepository for PostgresPostRepository {
    async fn find_by_user_id(&self, user_id: Uuid) -> Result<Vec<Post>, RepoError> {
        let result = PostEntity::find()
            .filter(post::Column::UserId.eq(user_id))
            .all(&self.db)
            .await
            .map_err(|e| RepoError::Query(e.to_string()))?;

        Ok(result.into_iter().map(Into::into).collect())
    }

    async fn reserve_unit(&self, post_id: Uuid) -> Result<bool, RepoError> {
        // The availability guard and the decrement are one conditional
        // UPDATE, so concurrent reservers can never drive the counter
        // below zero.
        let result = PostEntity::update_many()
            .col_expr(
                post::Column::QuantityLeft,
                Expr::col(post::Column::QuantityLeft).sub(1),
            )
            .filter(post::Column::Id.eq(post_id))
            .filter(post::Column::QuantityLeft.gt(0))
            .exec(&self.db)
            .await
            .map_err(|e| RepoError::Query(e.to_string()))?;

        Ok(result.rows_affected == 1)
    }

    async fn release_unit(&self, post_id: Uuid) -> Result<bool, RepoError> {
        // Symmetric guard: never raise the counter past the total.
        let result = PostEntity::update_many()
            .col_expr(
                post::Column::QuantityLeft,
                Expr::col(post::Column::QuantityLeft).add(1),
            )
            .filter(post::Column::Id.eq(post_id))
            .filter(
                Expr::col(post::Column::QuantityLeft)
                    .lt(Expr::col(post::Column::TotalQuantity)),
            )
            .exec(&self.db)
            .await
            .map_err(|e| RepoError::Query(e.to_string()))?;

        Ok(result.rows_affected == 1)
    }

    async fn update_details(&self, post: Post) -> Result<(), RepoError> {
        let mut active: post::ActiveModel = post.into();
        // The counter column belongs to reserve/cancel/adjust; an owner
        // edit must not write a value read before those landed.
        active.quantity_left = NotSet;

        PostEntity::update(active)
            .exec(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(())
    }

    async fn adjust_quantity_left(&self, post_id: Uuid, diff: i32) -> Result<bool, RepoError> {
        // Delta and floor in one statement, so a reservation claimed
        // between the owner's read and this write stays deducted.
        let result = PostEntity::update_many()
            .col_expr(
                post::Column::QuantityLeft,
                Expr::cust_with_exprs(
                    "GREATEST(0, $1)",
                    [Expr::col(post::Column::QuantityLeft).add(diff)],
                ),
            )
            .filter(post::Column::Id.eq(post_id))
            .exec(&self.db)
            .await
            .map_err(|e| RepoError::Query(e.to_string()))?;

        Ok(result.rows_affected == 1)
    }

    async fn delete_by_user_id(&self, user_id: Uuid) -> Result<u64, RepoError> {
        let result = PostEntity::delete_many()
            .filter(post::Column::UserId.eq(user_id))
            .exec(&self.db)
            .await
            .map_err(|e| RepoError::Query(e.to_string()))?;

        Ok(result.rows_affected)
    }
}

#[async_trait]
impl ReservationRepository for PostgresReservationRepository {
    async fn find_by_user_and_post(
        &self,
        user_id: Uuid,
        post_id: Uuid,
    ) -> Result<Option<Reservation>, RepoError> {
        let result = ReservationEntity::find()
            .filter(reservation::Column::UserId.eq(user_id))
            .filter(reservation::Column::PostId.eq(post_id))
            .one(&self.db)
            .await
            .map_err(|e| RepoError::Query(e.to_string()))?;

        Ok(result.map(Into::into))
    }

    async fn list_for_user_with_posts(
        &self,
        user_id: Uuid,
    ) -> Result<Vec<ReservationWithPost>, RepoError> {
        let rows = ReservationEntity::find()
            .filter(reservation::Column::UserId.eq(user_id))
            .order_by_desc(reservation::Column::CreatedAt)
            .find_also_related(PostEntity)
            .all(&self.db)
            .await
            .map_err(|e| RepoError::Query(e.to_string()))?;

        Ok(rows
            .into_iter()
            .map(|(reservation, post)| ReservationWithPost {
                reservation: reservation.into(),
                post: post.map(Into::into),
            })
            .collect())
    }

    async fn delete_owned(
        &self,
        id: Uuid,
        user_id: Uuid,
    ) -> Result<Option<Reservation>, RepoError> {
        // Ownership is part of the lookup predicate itself.
        let Some(row) = ReservationEntity::find()
            .filter(reservation::Column::Id.eq(id))
            .filter(reservation::Column::UserId.eq(user_id))
            .one(&self.db)
            .await
            .map_err(|e| RepoError::Query(e.to_string()))?
        else {
            return Ok(None);
        };

        let result = ReservationEntity::delete_many()
            .filter(reservation::Column::Id.eq(id))
            .filter(reservation::Column::UserId.eq(user_id))
            .exec(&self.db)
            .await
            .map_err(|e| RepoError::Query(e.to_string()))?;

        if result.rows_affected == 0 {
            // Lost a race with another delete of the same row.
            return Ok(None);
        }

        Ok(Some(row.into()))
    }

    async fn delete_by_post(&self, post_id: Uuid) -> Result<u64, RepoError> {
        let result = ReservationEntity::delete_many()
            .filter(reservation::Column::PostId.eq(post_id))
            .exec(&self.db)
            .await
            .map_err(|e| RepoError::Query(e.to_string()))?;

        Ok(result.rows_affected)
    }

    async fn delete_by_posts(&self, post_ids: &[Uuid]) -> Result<u64, RepoError> {
        if post_ids.is_empty() {
            return Ok(0);
        }

        let result = ReservationEntity::delete_many()
            .filter(reservation::Column::PostId.is_in(post_ids.iter().copied()))
            .exec(&self.db)
            .await
            .map_err(|e| RepoError::Query(e.to_string()))?;

        Ok(result.rows_affected)
    }

    async fn delete_by_user(&self, user_id: Uuid) -> Result<u64, RepoError> {
        let result = ReservationEntity::delete_many()
            .filter(reservation::Column::UserId.eq(user_id))
            .exec(&self.db)
            .await
            .map_err(|e| RepoError::Query(e.to_string()))?;

        Ok(result.rows_affected)
    }
}

#[async_trait]
impl UserInfoRepository for PostgresUserInfoRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<UserInfo>, RepoError> {
        let result = UserInfoEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| RepoError::Query(e.to_string()))?;

        Ok(result.map(Into::into))
    }

    /// Purge tolerates an absent profile, so a zero-row delete is fine.
    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        UserInfoEntity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(())
    }
}
