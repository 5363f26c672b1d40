use std::marker::PhantomData;

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, Condition, DbConn, DbErr, EntityTrait, IntoActiveModel, PaginatorTrait,
    PrimaryKeyTrait, QueryFilter, QueryOrder, QuerySelect, SqlErr,
};

use warden_core::domain::Resource;
use warden_core::error::RepoError;
use warden_core::ports::Repository;

/// Maps a domain resource onto its SeaORM entity.
pub trait Persisted: Resource {
    type Entity: EntityTrait;

    /// Column giving the stable list order (the primary key).
    fn order_column() -> <Self::Entity as EntityTrait>::Column;

    /// Translate a list filter into a WHERE condition.
    fn condition(filter: &Self::Filter) -> Condition;
}

/// Generic PostgreSQL repository implementation.
pub struct PostgresRepository<T> {
    pub(crate) db: DbConn,
    _resource: PhantomData<fn() -> T>,
}

impl<T> PostgresRepository<T> {
    pub fn new(db: DbConn) -> Self {
        Self {
            db,
            _resource: PhantomData,
        }
    }
}

pub(crate) fn map_db_err(entity: &'static str, err: DbErr) -> RepoError {
    if let Some(SqlErr::UniqueConstraintViolation(detail)) = err.sql_err() {
        tracing::debug!(entity, %detail, "Unique constraint violated");
        return RepoError::Constraint(format!("{entity} already exists"));
    }

    match err {
        DbErr::RecordNotFound(_) | DbErr::RecordNotUpdated => RepoError::NotFound,
        DbErr::Conn(_) | DbErr::ConnectionAcquire(_) => RepoError::Connection(err.to_string()),
        other => RepoError::Query(other.to_string()),
    }
}

#[async_trait]
impl<T, E> Repository<T> for PostgresRepository<T>
where
    T: Persisted<Entity = E> + From<E::Model>,
    E: EntityTrait,
    E::Model: IntoActiveModel<E::ActiveModel> + Sync + Send,
    E::ActiveModel: ActiveModelTrait<Entity = E> + From<T> + From<T::Draft> + Send + Sync,
    E::PrimaryKey: PrimaryKeyTrait<ValueType = T::Id>,
    T::Id: Into<sea_orm::Value>,
{
    async fn list(
        &self,
        offset: u64,
        limit: u64,
        filter: &T::Filter,
    ) -> Result<(Vec<T>, u64), RepoError> {
        let select = E::find()
            .filter(T::condition(filter))
            .order_by_asc(T::order_column());

        let total = select
            .clone()
            .count(&self.db)
            .await
            .map_err(|e| map_db_err(T::NAME, e))?;

        let models = select
            .offset(offset)
            .limit(limit)
            .all(&self.db)
            .await
            .map_err(|e| map_db_err(T::NAME, e))?;

        Ok((models.into_iter().map(Into::into).collect(), total))
    }

    async fn insert(&self, draft: T::Draft) -> Result<T, RepoError> {
        let active_model: E::ActiveModel = draft.into();
        let model = active_model
            .insert(&self.db)
            .await
            .map_err(|e| map_db_err(T::NAME, e))?;

        Ok(model.into())
    }

    async fn find_by_id(&self, id: T::Id) -> Result<Option<T>, RepoError> {
        let result = E::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| map_db_err(T::NAME, e))?;

        Ok(result.map(Into::into))
    }

    async fn update(&self, entity: T) -> Result<T, RepoError> {
        let active_model: E::ActiveModel = entity.into();
        let model = active_model
            .update(&self.db)
            .await
            .map_err(|e| map_db_err(T::NAME, e))?;

        Ok(model.into())
    }

    async fn delete(&self, id: T::Id) -> Result<(), RepoError> {
        let result = E::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| map_db_err(T::NAME, e))?;

        if result.rows_affected == 0 {
            return Err(RepoError::NotFound);
        }

        Ok(())
    }
}
