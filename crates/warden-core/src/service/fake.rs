//! Test doubles for the repository ports.

use std::sync::Mutex;

use async_trait::async_trait;

use crate::domain::{FromDraft, Resource, User};
use crate::error::RepoError;
use crate::ports::{Repository, UserRepository};

/// Vec-backed repository with sequential ids.
pub struct FakeRepository<T> {
    rows: Mutex<(i32, Vec<T>)>,
}

impl<T> Default for FakeRepository<T> {
    fn default() -> Self {
        Self {
            rows: Mutex::new((0, Vec::new())),
        }
    }
}

#[async_trait]
impl<T> Repository<T> for FakeRepository<T>
where
    T: FromDraft<Id = i32>,
{
    async fn list(
        &self,
        offset: u64,
        limit: u64,
        filter: &T::Filter,
    ) -> Result<(Vec<T>, u64), RepoError> {
        let rows = self.rows.lock().unwrap();
        let matching: Vec<T> = rows.1.iter().filter(|r| r.matches(filter)).cloned().collect();
        let total = matching.len() as u64;
        let page = matching
            .into_iter()
            .skip(offset as usize)
            .take(limit as usize)
            .collect();
        Ok((page, total))
    }

    async fn insert(&self, draft: T::Draft) -> Result<T, RepoError> {
        let mut rows = self.rows.lock().unwrap();
        let entity = T::from_draft(rows.0 + 1, draft);
        if rows.1.iter().any(|r| r.conflicts_with(&entity)) {
            return Err(RepoError::Constraint(format!("{} already exists", T::NAME)));
        }
        rows.0 += 1;
        rows.1.push(entity.clone());
        Ok(entity)
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<T>, RepoError> {
        let rows = self.rows.lock().unwrap();
        Ok(rows.1.iter().find(|r| r.id() == id).cloned())
    }

    async fn update(&self, entity: T) -> Result<T, RepoError> {
        let mut rows = self.rows.lock().unwrap();
        let slot = rows
            .1
            .iter_mut()
            .find(|r| r.id() == entity.id())
            .ok_or(RepoError::NotFound)?;
        *slot = entity.clone();
        Ok(entity)
    }

    async fn delete(&self, id: i32) -> Result<(), RepoError> {
        let mut rows = self.rows.lock().unwrap();
        let before = rows.1.len();
        rows.1.retain(|r| r.id() != id);
        if rows.1.len() == before {
            return Err(RepoError::NotFound);
        }
        Ok(())
    }
}

#[async_trait]
impl UserRepository for FakeRepository<User> {
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, RepoError> {
        let rows = self.rows.lock().unwrap();
        Ok(rows.1.iter().find(|u| u.username == username).cloned())
    }
}

/// Repository whose every call fails as if the database were down.
pub struct FailingRepository;

#[async_trait]
impl<T: Resource> Repository<T> for FailingRepository {
    async fn list(&self, _: u64, _: u64, _: &T::Filter) -> Result<(Vec<T>, u64), RepoError> {
        Err(RepoError::Connection("connection refused".to_string()))
    }

    async fn insert(&self, _: T::Draft) -> Result<T, RepoError> {
        Err(RepoError::Connection("connection refused".to_string()))
    }

    async fn find_by_id(&self, _: T::Id) -> Result<Option<T>, RepoError> {
        Err(RepoError::Connection("connection refused".to_string()))
    }

    async fn update(&self, _: T) -> Result<T, RepoError> {
        Err(RepoError::Connection("connection refused".to_string()))
    }

    async fn delete(&self, _: T::Id) -> Result<(), RepoError> {
        Err(RepoError::Connection("connection refused".to_string()))
    }
}
