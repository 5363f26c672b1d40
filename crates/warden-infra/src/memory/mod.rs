//! In-memory repository implementation - used as fallback when no database
//! is configured.

use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use warden_core::domain::{FromDraft, User};
use warden_core::error::RepoError;
use warden_core::ports::{Repository, UserRepository};

struct Store<T> {
    next_id: i32,
    rows: BTreeMap<i32, T>,
}

/// In-memory repository keyed by sequential ids.
///
/// Rows are kept in a `BTreeMap`, so listing is ordered by id.
/// Note: Data is lost on process restart.
pub struct InMemoryRepository<T> {
    store: RwLock<Store<T>>,
}

impl<T> InMemoryRepository<T> {
    pub fn new() -> Self {
        Self {
            store: RwLock::new(Store {
                next_id: 1,
                rows: BTreeMap::new(),
            }),
        }
    }
}

impl<T> Default for InMemoryRepository<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: FromDraft<Id = i32>> Store<T> {
    fn ensure_unique(&self, entity: &T) -> Result<(), RepoError> {
        if self.rows.values().any(|row| row.conflicts_with(entity)) {
            return Err(RepoError::Constraint(format!("{} already exists", T::NAME)));
        }
        Ok(())
    }
}

#[async_trait]
impl<T> Repository<T> for InMemoryRepository<T>
where
    T: FromDraft<Id = i32>,
{
    async fn list(
        &self,
        offset: u64,
        limit: u64,
        filter: &T::Filter,
    ) -> Result<(Vec<T>, u64), RepoError> {
        let store = self.store.read().await;
        let matching = store.rows.values().filter(|row| row.matches(filter));

        let total = matching.clone().count() as u64;
        let page = matching
            .skip(usize::try_from(offset).unwrap_or(usize::MAX))
            .take(usize::try_from(limit).unwrap_or(usize::MAX))
            .cloned()
            .collect();

        Ok((page, total))
    }

    async fn insert(&self, draft: T::Draft) -> Result<T, RepoError> {
        let mut store = self.store.write().await;

        let entity = T::from_draft(store.next_id, draft);
        store.ensure_unique(&entity)?;

        store.next_id += 1;
        store.rows.insert(entity.id(), entity.clone());
        Ok(entity)
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<T>, RepoError> {
        let store = self.store.read().await;
        Ok(store.rows.get(&id).cloned())
    }

    async fn update(&self, entity: T) -> Result<T, RepoError> {
        let mut store = self.store.write().await;

        if !store.rows.contains_key(&entity.id()) {
            return Err(RepoError::NotFound);
        }
        store.ensure_unique(&entity)?;

        store.rows.insert(entity.id(), entity.clone());
        Ok(entity)
    }

    async fn delete(&self, id: i32) -> Result<(), RepoError> {
        let mut store = self.store.write().await;
        store
            .rows
            .remove(&id)
            .map(|_| ())
            .ok_or(RepoError::NotFound)
    }
}

#[async_trait]
impl UserRepository for InMemoryRepository<User> {
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, RepoError> {
        let store = self.store.read().await;
        Ok(store
            .rows
            .values()
            .find(|user| user.username == username)
            .cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use warden_core::domain::{Role, RoleDraft, RoleFilter, UserDraft};

    fn draft(title: &str) -> RoleDraft {
        RoleDraft {
            title: title.to_string(),
            desc: String::new(),
        }
    }

    #[tokio::test]
    async fn test_list_pages_in_id_order() {
        let repo = InMemoryRepository::<Role>::new();
        for i in 0..25 {
            repo.insert(draft(&format!("role-{i}"))).await.unwrap();
        }

        let (page, total) = repo.list(0, 10, &RoleFilter::default()).await.unwrap();
        assert_eq!(page.len(), 10);
        assert_eq!(total, 25);
        assert!(page.windows(2).all(|w| w[0].id < w[1].id));

        let (tail, _) = repo.list(20, 10, &RoleFilter::default()).await.unwrap();
        assert_eq!(tail.iter().map(|r| r.id).collect::<Vec<_>>(), vec![21, 22, 23, 24, 25]);

        let (past_end, total) = repo.list(100, 10, &RoleFilter::default()).await.unwrap();
        assert!(past_end.is_empty());
        assert_eq!(total, 25);
    }

    #[tokio::test]
    async fn test_ids_are_not_reused_after_delete() {
        let repo = InMemoryRepository::<Role>::new();
        let first = repo.insert(draft("a")).await.unwrap();
        repo.delete(first.id).await.unwrap();

        let second = repo.insert(draft("b")).await.unwrap();
        assert_eq!(second.id, 2);
    }

    #[tokio::test]
    async fn test_unique_title_on_insert_and_update() {
        let repo = InMemoryRepository::<Role>::new();
        repo.insert(draft("admin")).await.unwrap();
        let mut guest = repo.insert(draft("guest")).await.unwrap();

        assert!(matches!(
            repo.insert(draft("admin")).await.unwrap_err(),
            RepoError::Constraint(_)
        ));

        guest.title = "admin".to_string();
        assert!(matches!(
            repo.update(guest).await.unwrap_err(),
            RepoError::Constraint(_)
        ));
    }

    #[tokio::test]
    async fn test_update_and_delete_missing() {
        let repo = InMemoryRepository::<Role>::new();
        let ghost = Role {
            id: 7,
            title: "ghost".to_string(),
            desc: String::new(),
        };

        assert!(matches!(repo.update(ghost).await.unwrap_err(), RepoError::NotFound));
        assert!(matches!(repo.delete(7).await.unwrap_err(), RepoError::NotFound));
    }

    #[tokio::test]
    async fn test_find_user_by_username() {
        let repo = InMemoryRepository::<User>::new();
        repo.insert(UserDraft {
            username: "alice".to_string(),
            password_hash: "hash".to_string(),
            nickname: None,
            telephone: None,
            email: None,
            roles: vec![],
        })
        .await
        .unwrap();

        assert!(repo.find_by_username("alice").await.unwrap().is_some());
        assert!(repo.find_by_username("bob").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_filter_treats_wildcards_literally() {
        let repo = InMemoryRepository::<Role>::new();
        repo.insert(draft("abcd")).await.unwrap();
        repo.insert(draft("A_C%D")).await.unwrap();

        let filter = RoleFilter {
            title: Some("a_c%".to_string()),
        };
        let (page, total) = repo.list(0, 10, &filter).await.unwrap();
        assert_eq!(total, 1);
        assert_eq!(page[0].title, "A_C%D");
    }
}
