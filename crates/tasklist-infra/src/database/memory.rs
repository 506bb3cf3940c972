//! In-memory relational store, used when no `DATABASE_URL` is configured.
//!
//! Keeps the same tables and join rows as the Postgres schema and enforces
//! the same constraints: unique usernames, foreign keys on the link tables
//! and cascading deletes of link rows. All tables sit behind one lock, so
//! each operation is atomic.

use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use tasklist_core::domain::{
    ItemChange, ItemId, ListChange, ListId, NewTodoItem, NewTodoList, NewUser, TodoItem, TodoList,
    User, UserId,
};
use tasklist_core::error::RepoError;
use tasklist_core::ports::{TodoItemRepository, TodoListRepository, UserRepository};

/// Row counts, for tests and diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StoreStats {
    pub users: usize,
    pub lists: usize,
    pub items: usize,
}

#[derive(Default)]
struct Tables {
    users: BTreeMap<UserId, User>,
    lists: BTreeMap<ListId, TodoList>,
    items: BTreeMap<ItemId, TodoItem>,
    /// (user_id, list_id)
    users_lists: Vec<(UserId, ListId)>,
    /// (list_id, item_id)
    lists_items: Vec<(ListId, ItemId)>,
    next_user_id: i32,
    next_list_id: i32,
    next_item_id: i32,
}

impl Tables {
    fn owns_list(&self, user_id: UserId, list_id: ListId) -> bool {
        self.users_lists.contains(&(user_id, list_id))
    }

    fn list_of_item(&self, item_id: ItemId) -> Option<ListId> {
        self.lists_items
            .iter()
            .find(|(_, i)| *i == item_id)
            .map(|(l, _)| *l)
    }

    fn owns_item(&self, user_id: UserId, item_id: ItemId) -> bool {
        self.list_of_item(item_id)
            .is_some_and(|list_id| self.owns_list(user_id, list_id))
    }
}

fn next_id(counter: &mut i32) -> i32 {
    *counter += 1;
    *counter
}

/// Store implementing every repository port over shared in-process tables.
#[derive(Default)]
pub struct InMemoryStore {
    tables: RwLock<Tables>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn stats(&self) -> StoreStats {
        let tables = self.tables.read().await;
        StoreStats {
            users: tables.users.len(),
            lists: tables.lists.len(),
            items: tables.items.len(),
        }
    }
}

#[async_trait]
impl UserRepository for InMemoryStore {
    async fn create(&self, user: NewUser) -> Result<UserId, RepoError> {
        let mut tables = self.tables.write().await;

        if tables.users.values().any(|u| u.username == user.username) {
            return Err(RepoError::Constraint(
                "duplicate key value violates unique constraint \"users_username_key\"".to_string(),
            ));
        }

        let id = next_id(&mut tables.next_user_id);
        tables.users.insert(
            id,
            User {
                id,
                name: user.name,
                username: user.username,
                password_hash: user.password_hash,
            },
        );
        Ok(id)
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, RepoError> {
        let tables = self.tables.read().await;
        Ok(tables
            .users
            .values()
            .find(|u| u.username == username)
            .cloned())
    }
}

#[async_trait]
impl TodoListRepository for InMemoryStore {
    async fn create(&self, user_id: UserId, list: NewTodoList) -> Result<ListId, RepoError> {
        let mut tables = self.tables.write().await;

        // The link row is checked before anything is written, so a failed
        // create leaves no orphaned list behind.
        if !tables.users.contains_key(&user_id) {
            return Err(RepoError::Constraint(format!(
                "users_lists.user_id references missing user {user_id}"
            )));
        }

        let id = next_id(&mut tables.next_list_id);
        tables.lists.insert(
            id,
            TodoList {
                id,
                title: list.title,
                description: list.description,
            },
        );
        tables.users_lists.push((user_id, id));
        Ok(id)
    }

    async fn get_all(&self, user_id: UserId) -> Result<Vec<TodoList>, RepoError> {
        let tables = self.tables.read().await;
        Ok(tables
            .lists
            .values()
            .filter(|l| tables.owns_list(user_id, l.id))
            .cloned()
            .collect())
    }

    async fn get_by_id(
        &self,
        user_id: UserId,
        list_id: ListId,
    ) -> Result<Option<TodoList>, RepoError> {
        let tables = self.tables.read().await;
        if !tables.owns_list(user_id, list_id) {
            return Ok(None);
        }
        Ok(tables.lists.get(&list_id).cloned())
    }

    async fn delete(&self, user_id: UserId, list_id: ListId) -> Result<(), RepoError> {
        let mut tables = self.tables.write().await;
        if !tables.owns_list(user_id, list_id) || tables.lists.remove(&list_id).is_none() {
            return Err(RepoError::NotFound);
        }

        tables.users_lists.retain(|(_, l)| *l != list_id);
        tables.lists_items.retain(|(l, _)| *l != list_id);
        Ok(())
    }

    async fn update(
        &self,
        user_id: UserId,
        list_id: ListId,
        changes: &[ListChange],
    ) -> Result<(), RepoError> {
        let mut tables = self.tables.write().await;
        if !tables.owns_list(user_id, list_id) {
            return Err(RepoError::NotFound);
        }
        let list = tables.lists.get_mut(&list_id).ok_or(RepoError::NotFound)?;

        for change in changes {
            match change {
                ListChange::Title(v) => list.title = v.clone(),
                ListChange::Description(v) => list.description = v.clone(),
            }
        }
        Ok(())
    }
}

#[async_trait]
impl TodoItemRepository for InMemoryStore {
    async fn create(&self, list_id: ListId, item: NewTodoItem) -> Result<ItemId, RepoError> {
        let mut tables = self.tables.write().await;

        if !tables.lists.contains_key(&list_id) {
            return Err(RepoError::Constraint(format!(
                "lists_items.list_id references missing list {list_id}"
            )));
        }

        let id = next_id(&mut tables.next_item_id);
        tables.items.insert(
            id,
            TodoItem {
                id,
                title: item.title,
                description: item.description,
                done: item.done,
            },
        );
        tables.lists_items.push((list_id, id));
        Ok(id)
    }

    async fn get_all(&self, user_id: UserId, list_id: ListId) -> Result<Vec<TodoItem>, RepoError> {
        let tables = self.tables.read().await;
        if !tables.owns_list(user_id, list_id) {
            return Ok(Vec::new());
        }

        Ok(tables
            .items
            .values()
            .filter(|i| tables.lists_items.contains(&(list_id, i.id)))
            .cloned()
            .collect())
    }

    async fn get_by_id(
        &self,
        user_id: UserId,
        item_id: ItemId,
    ) -> Result<Option<TodoItem>, RepoError> {
        let tables = self.tables.read().await;
        if !tables.owns_item(user_id, item_id) {
            return Ok(None);
        }
        Ok(tables.items.get(&item_id).cloned())
    }

    async fn delete(&self, user_id: UserId, item_id: ItemId) -> Result<(), RepoError> {
        let mut tables = self.tables.write().await;
        if !tables.owns_item(user_id, item_id) || tables.items.remove(&item_id).is_none() {
            return Err(RepoError::NotFound);
        }

        tables.lists_items.retain(|(_, i)| *i != item_id);
        Ok(())
    }

    async fn update(
        &self,
        user_id: UserId,
        item_id: ItemId,
        changes: &[ItemChange],
    ) -> Result<(), RepoError> {
        let mut tables = self.tables.write().await;
        if !tables.owns_item(user_id, item_id) {
            return Err(RepoError::NotFound);
        }
        let item = tables.items.get_mut(&item_id).ok_or(RepoError::NotFound)?;

        for change in changes {
            match change {
                ItemChange::Title(v) => item.title = v.clone(),
                ItemChange::Description(v) => item.description = v.clone(),
                ItemChange::Done(v) => item.done = *v,
            }
        }
        Ok(())
    }
}
