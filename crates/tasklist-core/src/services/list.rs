//! List operations over the relational store with a cache-aside read path.

use std::sync::Arc;
use std::time::Duration;

use super::cache::{EntityCache, LIST_NAMESPACE};
use crate::domain::{ListId, NewTodoList, TodoList, UpdateListInput, UserId};
use crate::error::DomainError;
use crate::ports::{Cache, TodoListRepository};

const ENTITY: &str = "todo list";

/// Cache-aside list service.
///
/// Reads try the cache first and populate it after a store hit. Writes commit
/// to the store and then invalidate the entry; they never write through.
///
/// Known race: a reader that misses between another request's store commit
/// and its cache invalidation can repopulate the cache with the pre-update
/// row. The stale entry lives until the next mutation or TTL expiry.
pub struct ListService {
    repo: Arc<dyn TodoListRepository>,
    cache: EntityCache<TodoList>,
}

impl ListService {
    pub fn new(repo: Arc<dyn TodoListRepository>, cache: Arc<dyn Cache>, ttl: Duration) -> Self {
        Self {
            repo,
            cache: EntityCache::new(cache, LIST_NAMESPACE, ttl),
        }
    }

    pub async fn create(&self, user_id: UserId, list: NewTodoList) -> Result<ListId, DomainError> {
        list.validate()?;

        let id = self
            .repo
            .create(user_id, list)
            .await
            .map_err(|e| DomainError::missing_parent(e, "user", user_id))?;
        tracing::debug!(user_id, list_id = id, "List created");
        Ok(id)
    }

    pub async fn get_all(&self, user_id: UserId) -> Result<Vec<TodoList>, DomainError> {
        Ok(self.repo.get_all(user_id).await?)
    }

    pub async fn get_by_id(
        &self,
        user_id: UserId,
        list_id: ListId,
    ) -> Result<TodoList, DomainError> {
        if let Some(list) = self.cache.get(user_id, list_id).await {
            return Ok(list);
        }

        let list = self
            .repo
            .get_by_id(user_id, list_id)
            .await?
            .ok_or(DomainError::NotFound {
                entity_type: ENTITY,
                id: list_id,
            })?;

        self.cache.set(user_id, list_id, &list).await;
        Ok(list)
    }

    pub async fn update(
        &self,
        user_id: UserId,
        list_id: ListId,
        input: UpdateListInput,
    ) -> Result<(), DomainError> {
        input.validate()?;

        let changes = input.into_changes();
        self.repo
            .update(user_id, list_id, &changes)
            .await
            .map_err(|e| DomainError::scoped(e, ENTITY, list_id))?;

        self.cache.delete(user_id, list_id).await;
        Ok(())
    }

    /// Delete an owned list. Cached items of the list are left to expire;
    /// the join-scoped item queries no longer reach them.
    pub async fn delete(&self, user_id: UserId, list_id: ListId) -> Result<(), DomainError> {
        self.repo
            .delete(user_id, list_id)
            .await
            .map_err(|e| DomainError::scoped(e, ENTITY, list_id))?;

        self.cache.delete(user_id, list_id).await;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::testing::{FakeLists, MapCache};

    const TTL: Duration = Duration::from_secs(600);

    fn setup() -> (ListService, Arc<FakeLists>, Arc<MapCache>) {
        let repo = Arc::new(FakeLists::default());
        let cache = Arc::new(MapCache::default());
        let service = ListService::new(repo.clone(), cache.clone(), TTL);
        (service, repo, cache)
    }

    #[tokio::test]
    async fn test_second_read_is_served_from_cache() {
        let (service, repo, _) = setup();
        let id = service
            .create(1, NewTodoList::new("Groceries", ""))
            .await
            .unwrap();

        let first = service.get_by_id(1, id).await.unwrap();
        let second = service.get_by_id(1, id).await.unwrap();

        assert_eq!(first, second);
        assert_eq!(repo.reads(), 1);
    }

    #[tokio::test]
    async fn test_update_invalidates_and_next_read_hits_store() {
        let (service, repo, cache) = setup();
        let id = service
            .create(1, NewTodoList::new("Groceries", ""))
            .await
            .unwrap();
        service.get_by_id(1, id).await.unwrap();
        assert!(cache.contains("todo_list:1:1"));

        service
            .update(
                1,
                id,
                UpdateListInput {
                    title: Some("Hardware store".to_string()),
                    description: None,
                },
            )
            .await
            .unwrap();
        assert!(!cache.contains("todo_list:1:1"));

        let list = service.get_by_id(1, id).await.unwrap();
        assert_eq!(list.title, "Hardware store");
        assert_eq!(repo.reads(), 2);
    }

    #[tokio::test]
    async fn test_invalid_patch_never_reaches_store() {
        let (service, repo, _) = setup();

        let err = service
            .update(1, 1, UpdateListInput::default())
            .await
            .unwrap_err();

        assert!(matches!(err, DomainError::InvalidInput(_)));
        assert_eq!(repo.writes(), 0);
    }

    #[tokio::test]
    async fn test_other_users_list_is_not_found() {
        let (service, _, cache) = setup();
        let id = service
            .create(1, NewTodoList::new("Groceries", ""))
            .await
            .unwrap();

        let err = service.get_by_id(2, id).await.unwrap_err();

        assert!(matches!(err, DomainError::NotFound { id: 1, .. }));
        assert!(!cache.contains("todo_list:2:1"));
    }

    #[tokio::test]
    async fn test_update_of_foreign_list_is_not_found() {
        let (service, _, _) = setup();
        let id = service
            .create(1, NewTodoList::new("Groceries", ""))
            .await
            .unwrap();

        let err = service
            .update(
                2,
                id,
                UpdateListInput {
                    title: Some("mine now".to_string()),
                    description: None,
                },
            )
            .await
            .unwrap_err();

        assert!(matches!(err, DomainError::NotFound { .. }));
        assert_eq!(service.get_by_id(1, id).await.unwrap().title, "Groceries");
    }

    #[tokio::test]
    async fn test_delete_invalidates_cache() {
        let (service, _, cache) = setup();
        let id = service
            .create(1, NewTodoList::new("Groceries", ""))
            .await
            .unwrap();
        service.get_by_id(1, id).await.unwrap();

        service.delete(1, id).await.unwrap();

        assert!(!cache.contains("todo_list:1:1"));
        assert!(matches!(
            service.get_by_id(1, id).await,
            Err(DomainError::NotFound { .. })
        ));
    }

    #[tokio::test]
    async fn test_create_rejects_blank_title() {
        let (service, repo, _) = setup();

        let err = service
            .create(1, NewTodoList::new("", "desc"))
            .await
            .unwrap_err();

        assert!(matches!(err, DomainError::InvalidInput(_)));
        assert_eq!(repo.writes(), 0);
    }

    #[tokio::test]
    async fn test_get_all_is_scoped_to_owner() {
        let (service, _, _) = setup();
        service.create(1, NewTodoList::new("A", "")).await.unwrap();
        service.create(2, NewTodoList::new("B", "")).await.unwrap();

        let lists = service.get_all(1).await.unwrap();

        assert_eq!(lists.len(), 1);
        assert_eq!(lists[0].title, "A");
    }
}
