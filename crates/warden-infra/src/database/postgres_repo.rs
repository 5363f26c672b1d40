//! PostgreSQL repository implementations.

use async_trait::async_trait;
use sea_orm::sea_query::{Expr, Func, LikeExpr};
use sea_orm::{ColumnTrait, Condition, EntityTrait, QueryFilter};

use warden_core::domain::{Role, RoleFilter, User, UserFilter};
use warden_core::error::RepoError;
use warden_core::ports::UserRepository;

use super::entity::role::{self, Entity as RoleEntity};
use super::entity::user::{self, Entity as UserEntity};
use super::postgres_base::{Persisted, PostgresRepository, map_db_err};

/// PostgreSQL role repository.
pub type PostgresRoleRepository = PostgresRepository<Role>;

/// PostgreSQL user repository.
pub type PostgresUserRepository = PostgresRepository<User>;

/// `%needle%` with the needle lowercased and its LIKE metacharacters
/// escaped, so `%` and `_` match literally as they do in memory.
pub(crate) fn substring_pattern(needle: &str) -> String {
    let mut pattern = String::with_capacity(needle.len() + 2);
    pattern.push('%');
    for c in needle.to_lowercase().chars() {
        if matches!(c, '\\' | '%' | '_') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

/// Case-insensitive substring match on a text column.
fn contains_ci<C: ColumnTrait>(column: C, needle: &str) -> Condition {
    Condition::all().add(
        Expr::expr(Func::lower(Expr::col(column)))
            .like(LikeExpr::new(substring_pattern(needle)).escape('\\')),
    )
}

impl Persisted for Role {
    type Entity = RoleEntity;

    fn order_column() -> role::Column {
        role::Column::Id
    }

    fn condition(filter: &RoleFilter) -> Condition {
        match &filter.title {
            Some(title) => contains_ci(role::Column::Title, title),
            None => Condition::all(),
        }
    }
}

impl Persisted for User {
    type Entity = UserEntity;

    fn order_column() -> user::Column {
        user::Column::Id
    }

    fn condition(filter: &UserFilter) -> Condition {
        match &filter.username {
            Some(username) => contains_ci(user::Column::Username, username),
            None => Condition::all(),
        }
    }
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, RepoError> {
        tracing::debug!(%username, "Finding user by username");

        let result = UserEntity::find()
            .filter(user::Column::Username.eq(username))
            .one(&self.db)
            .await
            .map_err(|e| map_db_err("user", e))?;

        Ok(result.map(Into::into))
    }
}
