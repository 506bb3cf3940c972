//! In-memory fakes of the ports, with call counters, for service tests.

use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;

use crate::domain::{
    ItemChange, ItemId, ListChange, ListId, NewTodoItem, NewTodoList, NewUser, TodoItem, TodoList,
    User, UserId,
};
use crate::error::RepoError;
use crate::ports::{
    AuthError, Cache, CacheError, PasswordService, TodoItemRepository, TodoListRepository,
    TokenClaims, TokenService, UserRepository,
};

/// Cache without expiry that remembers the TTL it was given.
#[derive(Default)]
pub struct MapCache {
    entries: Mutex<HashMap<String, (String, Option<Duration>)>>,
}

impl MapCache {
    pub fn ttl_of(&self, key: &str) -> Option<Duration> {
        self.entries.lock().unwrap().get(key).and_then(|(_, ttl)| *ttl)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.lock().unwrap().contains_key(key)
    }
}

#[async_trait]
impl Cache for MapCache {
    async fn get(&self, key: &str) -> Option<String> {
        self.entries
            .lock()
            .unwrap()
            .get(key)
            .map(|(value, _)| value.clone())
    }

    async fn set(&self, key: &str, value: &str, ttl: Option<Duration>) -> Result<(), CacheError> {
        self.entries
            .lock()
            .unwrap()
            .insert(key.to_string(), (value.to_string(), ttl));
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<(), CacheError> {
        self.entries.lock().unwrap().remove(key);
        Ok(())
    }
}

/// Cache whose backend is always down.
pub struct FailingCache;

#[async_trait]
impl Cache for FailingCache {
    async fn get(&self, _key: &str) -> Option<String> {
        None
    }

    async fn set(
        &self,
        _key: &str,
        _value: &str,
        _ttl: Option<Duration>,
    ) -> Result<(), CacheError> {
        Err(CacheError::Connection("connection refused".to_string()))
    }

    async fn delete(&self, _key: &str) -> Result<(), CacheError> {
        Err(CacheError::Connection("connection refused".to_string()))
    }
}

/// List store holding `(owner, list)` rows.
#[derive(Default)]
pub struct FakeLists {
    rows: Mutex<Vec<(UserId, TodoList)>>,
    next_id: AtomicUsize,
    pub get_by_id_calls: AtomicUsize,
    pub write_calls: AtomicUsize,
}

impl FakeLists {
    /// Insert a row with an explicit id.
    pub fn seed(&self, owner: UserId, list: TodoList) {
        self.rows.lock().unwrap().push((owner, list));
    }

    pub fn owner_of(&self, list_id: ListId) -> Vec<UserId> {
        self.rows
            .lock()
            .unwrap()
            .iter()
            .filter(|(_, l)| l.id == list_id)
            .map(|(owner, _)| *owner)
            .collect()
    }

    pub fn reads(&self) -> usize {
        self.get_by_id_calls.load(Ordering::SeqCst)
    }

    pub fn writes(&self) -> usize {
        self.write_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TodoListRepository for FakeLists {
    async fn create(&self, user_id: UserId, list: NewTodoList) -> Result<ListId, RepoError> {
        self.write_calls.fetch_add(1, Ordering::SeqCst);
        let id = self.next_id.fetch_add(1, Ordering::SeqCst) as ListId + 1;
        self.seed(
            user_id,
            TodoList {
                id,
                title: list.title,
                description: list.description,
            },
        );
        Ok(id)
    }

    async fn get_all(&self, user_id: UserId) -> Result<Vec<TodoList>, RepoError> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|(owner, _)| *owner == user_id)
            .map(|(_, l)| l.clone())
            .collect())
    }

    async fn get_by_id(
        &self,
        user_id: UserId,
        list_id: ListId,
    ) -> Result<Option<TodoList>, RepoError> {
        self.get_by_id_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .find(|(owner, l)| *owner == user_id && l.id == list_id)
            .map(|(_, l)| l.clone()))
    }

    async fn delete(&self, user_id: UserId, list_id: ListId) -> Result<(), RepoError> {
        self.write_calls.fetch_add(1, Ordering::SeqCst);
        let mut rows = self.rows.lock().unwrap();
        let before = rows.len();
        rows.retain(|(owner, l)| !(*owner == user_id && l.id == list_id));
        if rows.len() == before {
            return Err(RepoError::NotFound);
        }
        Ok(())
    }

    async fn update(
        &self,
        user_id: UserId,
        list_id: ListId,
        changes: &[ListChange],
    ) -> Result<(), RepoError> {
        self.write_calls.fetch_add(1, Ordering::SeqCst);
        let mut rows = self.rows.lock().unwrap();
        let (_, list) = rows
            .iter_mut()
            .find(|(owner, l)| *owner == user_id && l.id == list_id)
            .ok_or(RepoError::NotFound)?;
        for change in changes {
            match change {
                ListChange::Title(title) => list.title = title.clone(),
                ListChange::Description(description) => list.description = description.clone(),
            }
        }
        Ok(())
    }
}

/// Item store holding `(list, item)` rows. Ownership is resolved through the
/// `FakeLists` the items were created under.
pub struct FakeItems {
    lists: std::sync::Arc<FakeLists>,
    rows: Mutex<Vec<(ListId, TodoItem)>>,
    next_id: AtomicUsize,
    pub get_by_id_calls: AtomicUsize,
    pub write_calls: AtomicUsize,
}

impl FakeItems {
    pub fn new(lists: std::sync::Arc<FakeLists>) -> Self {
        Self {
            lists,
            rows: Mutex::new(Vec::new()),
            next_id: AtomicUsize::new(0),
            get_by_id_calls: AtomicUsize::new(0),
            write_calls: AtomicUsize::new(0),
        }
    }

    pub fn seed(&self, list_id: ListId, item: TodoItem) {
        self.rows.lock().unwrap().push((list_id, item));
    }

    pub fn reads(&self) -> usize {
        self.get_by_id_calls.load(Ordering::SeqCst)
    }

    pub fn writes(&self) -> usize {
        self.write_calls.load(Ordering::SeqCst)
    }

    fn owned_by(&self, user_id: UserId, list_id: ListId) -> bool {
        self.lists.owner_of(list_id).contains(&user_id)
    }
}

#[async_trait]
impl TodoItemRepository for FakeItems {
    async fn create(&self, list_id: ListId, item: NewTodoItem) -> Result<ItemId, RepoError> {
        self.write_calls.fetch_add(1, Ordering::SeqCst);
        if self.lists.owner_of(list_id).is_empty() {
            return Err(RepoError::Constraint(format!(
                "lists_items.list_id references missing list {list_id}"
            )));
        }
        let id = self.next_id.fetch_add(1, Ordering::SeqCst) as ItemId + 1;
        self.seed(
            list_id,
            TodoItem {
                id,
                title: item.title,
                description: item.description,
                done: item.done,
            },
        );
        Ok(id)
    }

    async fn get_all(&self, user_id: UserId, list_id: ListId) -> Result<Vec<TodoItem>, RepoError> {
        if !self.owned_by(user_id, list_id) {
            return Ok(Vec::new());
        }
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|(l, _)| *l == list_id)
            .map(|(_, i)| i.clone())
            .collect())
    }

    async fn get_by_id(
        &self,
        user_id: UserId,
        item_id: ItemId,
    ) -> Result<Option<TodoItem>, RepoError> {
        self.get_by_id_calls.fetch_add(1, Ordering::SeqCst);
        let rows = self.rows.lock().unwrap().clone();
        Ok(rows
            .into_iter()
            .find(|(list_id, i)| i.id == item_id && self.owned_by(user_id, *list_id))
            .map(|(_, i)| i))
    }

    async fn delete(&self, user_id: UserId, item_id: ItemId) -> Result<(), RepoError> {
        self.write_calls.fetch_add(1, Ordering::SeqCst);
        let rows = self.rows.lock().unwrap().clone();
        let position = rows
            .iter()
            .position(|(list_id, i)| i.id == item_id && self.owned_by(user_id, *list_id))
            .ok_or(RepoError::NotFound)?;
        self.rows.lock().unwrap().remove(position);
        Ok(())
    }

    async fn update(
        &self,
        user_id: UserId,
        item_id: ItemId,
        changes: &[ItemChange],
    ) -> Result<(), RepoError> {
        self.write_calls.fetch_add(1, Ordering::SeqCst);
        let snapshot = self.rows.lock().unwrap().clone();
        let position = snapshot
            .iter()
            .position(|(list_id, i)| i.id == item_id && self.owned_by(user_id, *list_id))
            .ok_or(RepoError::NotFound)?;

        let mut rows = self.rows.lock().unwrap();
        let item = &mut rows[position].1;
        for change in changes {
            match change {
                ItemChange::Title(title) => item.title = title.clone(),
                ItemChange::Description(description) => item.description = description.clone(),
                ItemChange::Done(done) => item.done = *done,
            }
        }
        Ok(())
    }
}

/// User store enforcing username uniqueness.
#[derive(Default)]
pub struct FakeUsers {
    rows: Mutex<Vec<User>>,
}

#[async_trait]
impl UserRepository for FakeUsers {
    async fn create(&self, user: NewUser) -> Result<UserId, RepoError> {
        let mut rows = self.rows.lock().unwrap();
        if rows.iter().any(|u| u.username == user.username) {
            return Err(RepoError::Constraint("users_username_key".to_string()));
        }
        let id = rows.len() as UserId + 1;
        rows.push(User {
            id,
            name: user.name,
            username: user.username,
            password_hash: user.password_hash,
        });
        Ok(id)
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, RepoError> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.username == username)
            .cloned())
    }
}

/// Reversible "hash" so tests can assert the stored digest is not the password.
pub struct ReversedPasswords;

impl PasswordService for ReversedPasswords {
    fn hash(&self, password: &str) -> Result<String, AuthError> {
        Ok(format!("rev${}", password.chars().rev().collect::<String>()))
    }

    fn verify(&self, password: &str, hash: &str) -> Result<bool, AuthError> {
        Ok(self.hash(password)? == hash)
    }
}

/// Unsigned `user:<id>` tokens.
pub struct PlainTokens;

impl TokenService for PlainTokens {
    fn generate_token(&self, user_id: UserId) -> Result<String, AuthError> {
        Ok(format!("user:{user_id}"))
    }

    fn validate_token(&self, token: &str) -> Result<TokenClaims, AuthError> {
        let user_id = token
            .strip_prefix("user:")
            .and_then(|id| id.parse().ok())
            .ok_or_else(|| AuthError::MalformedToken(token.to_string()))?;
        Ok(TokenClaims {
            user_id,
            issued_at: 0,
            expires_at: i64::MAX,
        })
    }

    fn expiration_seconds(&self) -> i64 {
        3600
    }
}
