#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use crate::database::entity::role;
    use crate::database::postgres_repo::{PostgresRoleRepository, substring_pattern};
    use sea_orm::{DatabaseBackend, DbErr, MockDatabase, MockExecResult, RuntimeErr, Value};
    use warden_core::domain::{Role, RoleDraft, RoleFilter};
    use warden_core::error::RepoError;
    use warden_core::ports::Repository;

    fn admin_model() -> role::Model {
        role::Model {
            id: 1,
            title: "admin".to_owned(),
            desc: "full access".to_owned(),
        }
    }

    #[tokio::test]
    async fn test_find_role_by_id() {
        // Mock the query expectation
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![admin_model()]])
            .into_connection();

        let repo = PostgresRoleRepository::new(db);

        let result: Option<Role> = repo.find_by_id(1).await.unwrap();

        let role = result.unwrap();
        assert_eq!(role.title, "admin");
        assert_eq!(role.desc, "full access");
    }

    #[tokio::test]
    async fn test_find_missing_role_is_none() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![Vec::<role::Model>::new()])
            .into_connection();

        let repo = PostgresRoleRepository::new(db);

        assert!(repo.find_by_id(9).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_list_returns_page_and_total() {
        let count_row = BTreeMap::from([("num_items", Value::BigInt(Some(25)))]);
        let page: Vec<role::Model> = (1..=10)
            .map(|id| role::Model {
                id,
                title: format!("role-{id}"),
                desc: String::new(),
            })
            .collect();

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![count_row]])
            .append_query_results(vec![page])
            .into_connection();

        let repo = PostgresRoleRepository::new(db);

        let (items, total) = repo.list(0, 10, &RoleFilter::default()).await.unwrap();
        assert_eq!(items.len(), 10);
        assert_eq!(total, 25);
        assert_eq!(items.first().map(|r| r.id), Some(1));
    }

    #[tokio::test]
    async fn test_insert_returns_assigned_id() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![admin_model()]])
            .into_connection();

        let repo = PostgresRoleRepository::new(db);

        let role = repo
            .insert(RoleDraft {
                title: "admin".to_owned(),
                desc: "full access".to_owned(),
            })
            .await
            .unwrap();

        assert_eq!(role.id, 1);
    }

    #[tokio::test]
    async fn test_update_missing_row_is_not_found() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![Vec::<role::Model>::new()])
            .into_connection();

        let repo = PostgresRoleRepository::new(db);

        let err = repo
            .update(Role {
                id: 4,
                title: "ghost".to_owned(),
                desc: String::new(),
            })
            .await
            .unwrap_err();

        assert!(matches!(err, RepoError::NotFound));
    }

    #[tokio::test]
    async fn test_delete_missing_row_is_not_found() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_results(vec![MockExecResult {
                last_insert_id: 0,
                rows_affected: 0,
            }])
            .into_connection();

        let repo = PostgresRoleRepository::new(db);

        assert!(matches!(repo.delete(3).await.unwrap_err(), RepoError::NotFound));
    }

    #[tokio::test]
    async fn test_query_failure_is_query_error() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_errors(vec![DbErr::Query(RuntimeErr::Internal(
                "relation \"roles\" does not exist".to_owned(),
            ))])
            .into_connection();

        let repo = PostgresRoleRepository::new(db);

        assert!(matches!(repo.find_by_id(1).await.unwrap_err(), RepoError::Query(_)));
    }

    #[test]
    fn test_substring_pattern_escapes_wildcards() {
        assert_eq!(substring_pattern("Adm"), "%adm%");
        assert_eq!(substring_pattern("a_c%"), "%a\\_c\\%%");
        assert_eq!(substring_pattern("x\\y"), "%x\\\\y%");
    }

    #[tokio::test]
    async fn test_list_filter_binds_escaped_pattern() {
        let count_row = BTreeMap::from([("num_items", Value::BigInt(Some(0)))]);
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![count_row]])
            .append_query_results(vec![Vec::<role::Model>::new()])
            .into_connection();

        let repo = PostgresRoleRepository::new(db);
        let filter = RoleFilter {
            title: Some("a_c%".to_owned()),
        };
        let (items, total) = repo.list(0, 10, &filter).await.unwrap();
        assert!(items.is_empty());
        assert_eq!(total, 0);

        let log = format!("{:?}", repo.db.into_transaction_log());
        assert!(log.contains("ESCAPE"), "{log}");
        // Debug output doubles each backslash
        assert!(log.contains("%a\\\\_c\\\\%%"), "{log}");
    }
}
