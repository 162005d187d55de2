#[cfg(test)]
mod tests {
    use crate::database::entity::{post, reservation};
    use crate::database::postgres_repo::{
        PostgresPostRepository, PostgresReservationRepository,
    };
    use bites_core::domain::{Post, Reservation};
    use bites_core::ports::{BaseRepository, PostRepository, ReservationRepository};
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};

    fn post_model(id: uuid::Uuid, quantity_left: i32) -> post::Model {
        let now = chrono::Utc::now();
        post::Model {
            id,
            user_id: uuid::Uuid::new_v4(),
            title: "Free dumplings".to_owned(),
            location: "Warren Towers".to_owned(),
            campus_location: post::CampusLocation::West,
            description: "Steamed, two trays".to_owned(),
            start_time: None,
            end_time: (now + chrono::TimeDelta::hours(1)).into(),
            total_quantity: 6,
            quantity: 6,
            quantity_left,
            image_path: None,
            created_at: now.into(),
            updated_at: now.into(),
        }
    }

    #[tokio::test]
    async fn test_find_post_by_id() {
        let post_id = uuid::Uuid::new_v4();

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![post_model(post_id, 6)]])
            .into_connection();

        let repo = PostgresPostRepository::new(db);

        let result: Option<Post> = repo.find_by_id(post_id).await.unwrap();

        let post = result.unwrap();
        assert_eq!(post.title, "Free dumplings");
        assert_eq!(post.id, post_id);
        assert_eq!(post.quantity_left, 6);
    }

    #[tokio::test]
    async fn test_reserve_unit_claims_a_row() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_results(vec![MockExecResult {
                last_insert_id: 0,
                rows_affected: 1,
            }])
            .into_connection();

        let repo = PostgresPostRepository::new(db);

        assert!(repo.reserve_unit(uuid::Uuid::new_v4()).await.unwrap());
    }

    #[tokio::test]
    async fn test_reserve_unit_reports_exhaustion() {
        // The conditional update matches no rows when quantity_left is 0
        // or the post is gone.
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_results(vec![MockExecResult {
                last_insert_id: 0,
                rows_affected: 0,
            }])
            .into_connection();

        let repo = PostgresPostRepository::new(db);

        assert!(!repo.reserve_unit(uuid::Uuid::new_v4()).await.unwrap());
    }

    #[tokio::test]
    async fn test_adjust_quantity_left_is_a_single_statement() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_results(vec![MockExecResult {
                last_insert_id: 0,
                rows_affected: 1,
            }])
            .into_connection();

        let repo = PostgresPostRepository::new(db);

        assert!(
            repo.adjust_quantity_left(uuid::Uuid::new_v4(), -2)
                .await
                .unwrap()
        );
    }

    #[tokio::test]
    async fn test_update_details_never_writes_the_counter_column() {
        let post_id = uuid::Uuid::new_v4();

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![post_model(post_id, 2)]])
            .into_connection();

        let repo = PostgresPostRepository::new(db);

        let mut post: Post = post_model(post_id, 2).into();
        post.title = "Half the trays left".to_owned();
        repo.update_details(post).await.unwrap();

        let log = repo.db.into_transaction_log();
        let update_sql = format!("{:?}", log[0]);
        assert!(update_sql.contains("UPDATE"));
        assert!(!update_sql.contains("quantity_left"));
    }

    #[tokio::test]
    async fn test_release_unit_noops_on_missing_post() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_results(vec![MockExecResult {
                last_insert_id: 0,
                rows_affected: 0,
            }])
            .into_connection();

        let repo = PostgresPostRepository::new(db);

        assert!(!repo.release_unit(uuid::Uuid::new_v4()).await.unwrap());
    }

    #[tokio::test]
    async fn test_delete_owned_misses_foreign_reservation() {
        // Both predicates go into the lookup, so someone else's id returns
        // an empty result set.
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![Vec::<reservation::Model>::new()])
            .into_connection();

        let repo = PostgresReservationRepository::new(db);

        let result = repo
            .delete_owned(uuid::Uuid::new_v4(), uuid::Uuid::new_v4())
            .await
            .unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_delete_owned_removes_matching_reservation() {
        let id = uuid::Uuid::new_v4();
        let user_id = uuid::Uuid::new_v4();
        let now = chrono::Utc::now();

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![reservation::Model {
                id,
                user_id,
                post_id: uuid::Uuid::new_v4(),
                status: reservation::ReservationStatus::Reserved,
                created_at: now.into(),
            }]])
            .append_exec_results(vec![MockExecResult {
                last_insert_id: 0,
                rows_affected: 1,
            }])
            .into_connection();

        let repo = PostgresReservationRepository::new(db);

        let deleted: Option<Reservation> = repo.delete_owned(id, user_id).await.unwrap();
        assert_eq!(deleted.unwrap().id, id);
    }

    #[tokio::test]
    async fn test_delete_by_posts_short_circuits_on_empty_input() {
        // No exec results registered; an issued statement would panic the
        // mock.
        let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();

        let repo = PostgresReservationRepository::new(db);

        assert_eq!(repo.delete_by_posts(&[]).await.unwrap(), 0);
    }
}
