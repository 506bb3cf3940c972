//! Storage ports. Every list and item query is scoped by the owning user
//! inside the store, so an id belonging to someone else reads as absent.

use async_trait::async_trait;

use crate::domain::{
    ItemChange, ItemId, ListChange, ListId, NewTodoItem, NewTodoList, NewUser, TodoItem, TodoList,
    User, UserId,
};
use crate::error::RepoError;

/// User storage.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a user. A taken username fails with [`RepoError::Constraint`].
    async fn create(&self, user: NewUser) -> Result<UserId, RepoError>;

    /// Find a user by username.
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, RepoError>;
}

/// List storage.
#[async_trait]
pub trait TodoListRepository: Send + Sync {
    /// Insert the list and its `users_lists` link in one transaction.
    async fn create(&self, user_id: UserId, list: NewTodoList) -> Result<ListId, RepoError>;

    async fn get_all(&self, user_id: UserId) -> Result<Vec<TodoList>, RepoError>;

    async fn get_by_id(&self, user_id: UserId, list_id: ListId)
    -> Result<Option<TodoList>, RepoError>;

    /// Fails with [`RepoError::NotFound`] when the user owns no such list.
    async fn delete(&self, user_id: UserId, list_id: ListId) -> Result<(), RepoError>;

    /// Apply `changes` to an owned list. `changes` is never empty.
    async fn update(
        &self,
        user_id: UserId,
        list_id: ListId,
        changes: &[ListChange],
    ) -> Result<(), RepoError>;
}

/// Item storage.
#[async_trait]
pub trait TodoItemRepository: Send + Sync {
    /// Insert the item and its `lists_items` link in one transaction.
    /// The caller has already checked that the list is owned.
    async fn create(&self, list_id: ListId, item: NewTodoItem) -> Result<ItemId, RepoError>;

    async fn get_all(&self, user_id: UserId, list_id: ListId) -> Result<Vec<TodoItem>, RepoError>;

    async fn get_by_id(&self, user_id: UserId, item_id: ItemId)
    -> Result<Option<TodoItem>, RepoError>;

    async fn delete(&self, user_id: UserId, item_id: ItemId) -> Result<(), RepoError>;

    async fn update(
        &self,
        user_id: UserId,
        item_id: ItemId,
        changes: &[ItemChange],
    ) -> Result<(), RepoError>;
}
