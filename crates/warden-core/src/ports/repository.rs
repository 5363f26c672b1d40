use async_trait::async_trait;

use crate::domain::Resource;
use crate::error::RepoError;

/// Generic repository trait defining standard CRUD operations.
///
/// Implementations list in ascending id order so that the same
/// offset/limit/filter always yields the same slice.
#[async_trait]
pub trait Repository<T: Resource>: Send + Sync {
    /// Return at most `limit` entities starting at `offset`, together with
    /// the number of entities matching `filter` regardless of paging.
    async fn list(&self, offset: u64, limit: u64, filter: &T::Filter)
    -> Result<(Vec<T>, u64), RepoError>;

    /// Persist a new entity, assigning its identity.
    async fn insert(&self, draft: T::Draft) -> Result<T, RepoError>;

    /// Find an entity by its unique ID.
    async fn find_by_id(&self, id: T::Id) -> Result<Option<T>, RepoError>;

    /// Overwrite an existing entity. Fails with `NotFound` if it is gone.
    async fn update(&self, entity: T) -> Result<T, RepoError>;

    /// Delete an entity by its ID.
    async fn delete(&self, id: T::Id) -> Result<(), RepoError>;
}

/// User lookups the login flow needs on top of plain CRUD.
#[async_trait]
pub trait UserRepository: Repository<crate::domain::User> {
    async fn find_by_username(
        &self,
        username: &str,
    ) -> Result<Option<crate::domain::User>, RepoError>;
}
