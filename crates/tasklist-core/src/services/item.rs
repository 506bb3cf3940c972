//! Item operations. Same cache-aside protocol as lists, see
//! [`ListService`](super::ListService) for the consistency notes.

use std::sync::Arc;
use std::time::Duration;

use super::cache::{EntityCache, ITEM_NAMESPACE};
use crate::domain::{ItemId, ListId, NewTodoItem, TodoItem, UpdateItemInput, UserId};
use crate::error::DomainError;
use crate::ports::{Cache, TodoItemRepository, TodoListRepository};

const ENTITY: &str = "todo item";

pub struct ItemService {
    repo: Arc<dyn TodoItemRepository>,
    lists: Arc<dyn TodoListRepository>,
    cache: EntityCache<TodoItem>,
}

impl ItemService {
    pub fn new(
        repo: Arc<dyn TodoItemRepository>,
        lists: Arc<dyn TodoListRepository>,
        cache: Arc<dyn Cache>,
        ttl: Duration,
    ) -> Self {
        Self {
            repo,
            lists,
            cache: EntityCache::new(cache, ITEM_NAMESPACE, ttl),
        }
    }

    /// Create an item under an owned list.
    ///
    /// The parent list is read from the store first so an item is never
    /// created under a list the caller cannot see.
    pub async fn create(
        &self,
        user_id: UserId,
        list_id: ListId,
        item: NewTodoItem,
    ) -> Result<ItemId, DomainError> {
        item.validate()?;

        self.lists
            .get_by_id(user_id, list_id)
            .await?
            .ok_or(DomainError::NotFound {
                entity_type: "todo list",
                id: list_id,
            })?;

        // The list can still vanish between the check above and the insert.
        let id = self
            .repo
            .create(list_id, item)
            .await
            .map_err(|e| DomainError::missing_parent(e, "todo list", list_id))?;
        tracing::debug!(user_id, list_id, item_id = id, "Item created");
        Ok(id)
    }

    pub async fn get_all(
        &self,
        user_id: UserId,
        list_id: ListId,
    ) -> Result<Vec<TodoItem>, DomainError> {
        Ok(self.repo.get_all(user_id, list_id).await?)
    }

    pub async fn get_by_id(
        &self,
        user_id: UserId,
        item_id: ItemId,
    ) -> Result<TodoItem, DomainError> {
        if let Some(item) = self.cache.get(user_id, item_id).await {
            return Ok(item);
        }

        let item = self
            .repo
            .get_by_id(user_id, item_id)
            .await?
            .ok_or(DomainError::NotFound {
                entity_type: ENTITY,
                id: item_id,
            })?;

        self.cache.set(user_id, item_id, &item).await;
        Ok(item)
    }

    pub async fn update(
        &self,
        user_id: UserId,
        item_id: ItemId,
        input: UpdateItemInput,
    ) -> Result<(), DomainError> {
        input.validate()?;

        let changes = input.into_changes();
        self.repo
            .update(user_id, item_id, &changes)
            .await
            .map_err(|e| DomainError::scoped(e, ENTITY, item_id))?;

        self.cache.delete(user_id, item_id).await;
        Ok(())
    }

    pub async fn delete(&self, user_id: UserId, item_id: ItemId) -> Result<(), DomainError> {
        self.repo
            .delete(user_id, item_id)
            .await
            .map_err(|e| DomainError::scoped(e, ENTITY, item_id))?;

        self.cache.delete(user_id, item_id).await;
        Ok(())
    }
}
