use std::sync::Arc;

use crate::domain::Resource;
use crate::error::{DomainError, from_repo};
use crate::pagination::Page;
use crate::ports::Repository;

/// Generic CRUD service over one entity type.
///
/// Holds nothing but the repository handle; every call goes straight to
/// storage.
pub struct ResourceService<T: Resource> {
    repo: Arc<dyn Repository<T>>,
}

impl<T: Resource> Clone for ResourceService<T> {
    fn clone(&self) -> Self {
        Self {
            repo: Arc::clone(&self.repo),
        }
    }
}

impl<T: Resource> ResourceService<T> {
    pub fn new(repo: Arc<dyn Repository<T>>) -> Self {
        Self { repo }
    }

    /// List a page of entities ordered by id, with the unpaged total.
    pub async fn list(
        &self,
        offset: u64,
        limit: u64,
        filter: &T::Filter,
    ) -> Result<Page<T>, DomainError> {
        let (items, total) = self.repo.list(offset, limit, filter).await?;
        Ok(Page { items, total })
    }

    pub async fn create(&self, draft: T::Draft) -> Result<T, DomainError> {
        let entity = self.repo.insert(draft).await?;
        tracing::info!(entity = T::NAME, id = %entity.id(), "Created");
        Ok(entity)
    }

    pub async fn retrieve(&self, id: T::Id) -> Result<T, DomainError> {
        self.repo
            .find_by_id(id)
            .await
            .map_err(|e| from_repo(T::NAME, id, e))?
            .ok_or_else(|| DomainError::not_found(T::NAME, id))
    }

    /// Replace every mutable field of an existing entity.
    pub async fn update(&self, id: T::Id, draft: T::Draft) -> Result<T, DomainError> {
        let mut entity = self.retrieve(id).await?;
        entity.replace(draft);
        self.save(entity).await
    }

    /// Overwrite only the fields present in `patch`.
    pub async fn partial_update(&self, id: T::Id, patch: T::Patch) -> Result<T, DomainError> {
        let mut entity = self.retrieve(id).await?;
        entity.merge(patch);
        self.save(entity).await
    }

    pub async fn delete(&self, id: T::Id) -> Result<(), DomainError> {
        self.repo
            .delete(id)
            .await
            .map_err(|e| from_repo(T::NAME, id, e))?;
        tracing::info!(entity = T::NAME, id = %id, "Deleted");
        Ok(())
    }

    async fn save(&self, entity: T) -> Result<T, DomainError> {
        let id = entity.id();
        self.repo
            .update(entity)
            .await
            .map_err(|e| from_repo(T::NAME, id, e))
    }
}
