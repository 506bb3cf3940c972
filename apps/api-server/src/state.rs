//! Application state - shared across all handlers.

use std::sync::Arc;
use std::time::Duration;

use tasklist_core::ports::{Cache, TodoItemRepository, TodoListRepository, UserRepository};
use tasklist_core::services::{AuthService, ItemService, ListService};
use tasklist_infra::{
    Argon2PasswordService, InMemoryCache, InMemoryStore, JwtConfig, JwtTokenService,
};

use crate::config::AppConfig;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub auth: Arc<AuthService>,
    pub lists: Arc<ListService>,
    pub items: Arc<ItemService>,
    pub backends: Backends,
}

/// Which adapters ended up serving the store and the cache, after fallbacks.
#[derive(Debug, Clone, Copy)]
pub struct Backends {
    pub store: &'static str,
    pub cache: &'static str,
}

/// The three repositories, always backed by the same store.
pub struct Stores {
    pub users: Arc<dyn UserRepository>,
    pub lists: Arc<dyn TodoListRepository>,
    pub items: Arc<dyn TodoItemRepository>,
    pub backend: &'static str,
}

impl Stores {
    pub fn in_memory() -> Self {
        let store = Arc::new(InMemoryStore::new());
        Self {
            users: store.clone(),
            lists: store.clone(),
            items: store,
            backend: "memory",
        }
    }

    #[cfg(feature = "postgres")]
    async fn postgres(config: &tasklist_infra::DatabaseConfig) -> Option<Self> {
        use tasklist_infra::{
            PostgresTodoItemRepository, PostgresTodoListRepository, PostgresUserRepository,
        };

        match tasklist_infra::database::connect(config).await {
            Ok(conn) => Some(Self {
                users: Arc::new(PostgresUserRepository::new(conn.clone())),
                lists: Arc::new(PostgresTodoListRepository::new(conn.clone())),
                items: Arc::new(PostgresTodoItemRepository::new(conn)),
                backend: "postgres",
            }),
            Err(e) => {
                tracing::error!(
                    "Failed to connect to database: {}. Using in-memory fallback.",
                    e
                );
                None
            }
        }
    }
}

impl AppState {
    /// Build the application state from configuration, falling back to the
    /// in-memory store and cache where the external services are absent.
    pub async fn build(config: &AppConfig) -> std::io::Result<Self> {
        let stores = init_stores(config).await;
        let (cache, cache_backend) = init_cache(config).await?;

        let mut state = Self::from_parts(stores, cache, config.jwt.clone(), config.cache_ttl);
        state.backends.cache = cache_backend;

        tracing::info!(
            store = state.backends.store,
            cache = state.backends.cache,
            "Application state initialized"
        );
        Ok(state)
    }

    pub fn from_parts(
        stores: Stores,
        cache: Arc<dyn Cache>,
        jwt: JwtConfig,
        cache_ttl: Duration,
    ) -> Self {
        let backends = Backends {
            store: stores.backend,
            cache: "memory",
        };
        let auth = AuthService::new(
            stores.users,
            Arc::new(Argon2PasswordService::new()),
            Arc::new(JwtTokenService::new(jwt)),
        );
        let lists = ListService::new(stores.lists.clone(), cache.clone(), cache_ttl);
        let items = ItemService::new(stores.items, stores.lists, cache, cache_ttl);

        Self {
            auth: Arc::new(auth),
            lists: Arc::new(lists),
            items: Arc::new(items),
            backends,
        }
    }
}

async fn init_stores(config: &AppConfig) -> Stores {
    let Some(db_config) = config.database.as_ref() else {
        tracing::warn!("DATABASE_URL not set. Running without database (in-memory mode).");
        return Stores::in_memory();
    };

    #[cfg(feature = "postgres")]
    {
        if let Some(stores) = Stores::postgres(db_config).await {
            return stores;
        }
    }

    #[cfg(not(feature = "postgres"))]
    {
        let _ = db_config;
        tracing::warn!(
            "DATABASE_URL set but the postgres feature is disabled - using in-memory store"
        );
    }

    Stores::in_memory()
}

#[cfg(feature = "redis")]
async fn init_cache(config: &AppConfig) -> std::io::Result<(Arc<dyn Cache>, &'static str)> {
    use tasklist_infra::RedisCache;

    let Some(redis) = config.redis.as_ref() else {
        tracing::info!("REDIS_URL not set - using in-memory cache");
        return Ok((Arc::new(InMemoryCache::new()), "memory"));
    };

    match RedisCache::new(redis).await {
        Ok(cache) => Ok((Arc::new(cache), "redis")),
        Err(e) if redis.fallback_to_memory => {
            tracing::warn!(error = %e, "Redis unavailable - falling back to in-memory cache");
            Ok((Arc::new(InMemoryCache::new()), "memory"))
        }
        Err(e) => Err(std::io::Error::other(e.to_string())),
    }
}

#[cfg(not(feature = "redis"))]
async fn init_cache(_config: &AppConfig) -> std::io::Result<(Arc<dyn Cache>, &'static str)> {
    tracing::info!("Running without redis feature - using in-memory cache");
    Ok((Arc::new(InMemoryCache::new()), "memory"))
}
