//! Typed, per-user view over a [`Cache`] backend.

use std::marker::PhantomData;
use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::domain::UserId;
use crate::ports::Cache;

/// Cache namespace for lists.
pub const LIST_NAMESPACE: &str = "todo_list";
/// Cache namespace for items.
pub const ITEM_NAMESPACE: &str = "todo_item";

/// Side cache for one entity type, keyed by `(user_id, entity_id)`.
///
/// Every operation is best effort. Backend failures and undecodable entries
/// are logged and reported as a miss; they never reach the caller, and a
/// corrupt entry is overwritten by the next repopulation.
pub struct EntityCache<T> {
    cache: Arc<dyn Cache>,
    namespace: &'static str,
    ttl: Duration,
    _entity: PhantomData<fn() -> T>,
}

impl<T> EntityCache<T>
where
    T: Serialize + DeserializeOwned,
{
    pub fn new(cache: Arc<dyn Cache>, namespace: &'static str, ttl: Duration) -> Self {
        Self {
            cache,
            namespace,
            ttl,
            _entity: PhantomData,
        }
    }

    /// Entries are never shared between users, even for equal entity ids.
    pub fn key(&self, user_id: UserId, entity_id: i32) -> String {
        format!("{}:{}:{}", self.namespace, user_id, entity_id)
    }

    pub async fn get(&self, user_id: UserId, entity_id: i32) -> Option<T> {
        let key = self.key(user_id, entity_id);
        let Some(raw) = self.cache.get(&key).await else {
            tracing::debug!(key = %key, "Cache miss");
            return None;
        };

        match serde_json::from_str(&raw) {
            Ok(entity) => {
                tracing::debug!(key = %key, "Cache hit");
                Some(entity)
            }
            Err(e) => {
                tracing::warn!(key = %key, error = %e, "Discarding undecodable cache entry");
                None
            }
        }
    }

    pub async fn set(&self, user_id: UserId, entity_id: i32, entity: &T) {
        let key = self.key(user_id, entity_id);
        let raw = match serde_json::to_string(entity) {
            Ok(raw) => raw,
            Err(e) => {
                tracing::warn!(key = %key, error = %e, "Failed to serialize cache entry");
                return;
            }
        };

        if let Err(e) = self.cache.set(&key, &raw, Some(self.ttl)).await {
            tracing::warn!(key = %key, error = %e, "Cache SET failed");
        }
    }

    pub async fn delete(&self, user_id: UserId, entity_id: i32) {
        let key = self.key(user_id, entity_id);
        if let Err(e) = self.cache.delete(&key).await {
            tracing::warn!(key = %key, error = %e, "Cache invalidation failed");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::TodoList;
    use crate::services::testing::{FailingCache, MapCache};

    fn groceries() -> TodoList {
        TodoList {
            id: 1,
            title: "Groceries".to_string(),
            description: String::new(),
        }
    }

    #[test]
    fn test_keys_are_scoped_by_user_and_namespace() {
        let backend: Arc<dyn Cache> = Arc::new(MapCache::default());
        let lists = EntityCache::<TodoList>::new(backend.clone(), LIST_NAMESPACE, Duration::ZERO);
        let items = EntityCache::<TodoList>::new(backend, ITEM_NAMESPACE, Duration::ZERO);

        assert_eq!(lists.key(7, 1), "todo_list:7:1");
        assert_ne!(lists.key(7, 1), lists.key(8, 1));
        assert_ne!(lists.key(7, 1), items.key(7, 1));
    }

    #[tokio::test]
    async fn test_set_get_delete() {
        let backend = Arc::new(MapCache::default());
        let cache = EntityCache::new(backend.clone(), LIST_NAMESPACE, Duration::from_secs(60));

        cache.set(1, 1, &groceries()).await;
        assert_eq!(cache.get(1, 1).await, Some(groceries()));
        assert_eq!(backend.ttl_of("todo_list:1:1"), Some(Duration::from_secs(60)));

        cache.delete(1, 1).await;
        assert_eq!(cache.get(1, 1).await, None);

        // Deleting again is not an error.
        cache.delete(1, 1).await;
    }

    #[tokio::test]
    async fn test_corrupt_entry_is_a_miss() {
        let backend = Arc::new(MapCache::default());
        backend
            .set("todo_list:1:1", "{not json", None)
            .await
            .unwrap();
        let cache = EntityCache::<TodoList>::new(backend, LIST_NAMESPACE, Duration::from_secs(60));

        assert_eq!(cache.get(1, 1).await, None);
    }

    #[tokio::test]
    async fn test_backend_failures_are_absorbed() {
        let cache = EntityCache::new(
            Arc::new(FailingCache),
            LIST_NAMESPACE,
            Duration::from_secs(60),
        );

        cache.set(1, 1, &groceries()).await;
        cache.delete(1, 1).await;
        assert_eq!(cache.get(1, 1).await, None);
    }
}
