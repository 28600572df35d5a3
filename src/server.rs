//! HTTP server initialization and runtime setup.
//!
//! Handles database connections, cache selection, frontend wiring and the
//! Axum server lifecycle.

use anyhow::{Context, Result};
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;

use crate::application::services::{
    CacheValue, FrontendCache, FrontendService, MiddlewareRegistry,
};
use crate::config::Config;
use crate::domain::repositories::Store;
use crate::infrastructure::block_renderer::HtmlBlockRenderer;
use crate::infrastructure::cache::{MemoryCache, NullCache, RedisCache};
use crate::infrastructure::persistence::PgStore;
use crate::routes::app_router;
use crate::state::AppState;

/// Opens the PostgreSQL pool using the configured limits.
///
/// # Errors
///
/// Returns an error if the database is unreachable.
pub async fn connect_pool(config: &Config) -> Result<PgPool> {
    let pool = PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .acquire_timeout(Duration::from_secs(config.db_connect_timeout))
        .idle_timeout(Duration::from_secs(config.db_idle_timeout))
        .max_lifetime(Duration::from_secs(config.db_max_lifetime))
        .connect(&config.database_url)
        .await
        .context("Failed to connect to database")?;

    tracing::info!("Connected to database");
    Ok(pool)
}

/// Selects the cache backend.
///
/// - `CACHE_ENABLED=false` - [`NullCache`]
/// - Redis configured and reachable - [`RedisCache`]
/// - otherwise - [`MemoryCache`], with a background sweeper unless the
///   sweep interval is 0
///
/// The returned handle belongs to the sweeper task, if one was spawned.
pub async fn build_cache(config: &Config) -> (Arc<FrontendCache>, Option<JoinHandle<()>>) {
    if !config.cache_enabled {
        tracing::info!("Cache disabled (NullCache)");
        let cache: Arc<FrontendCache> = Arc::new(NullCache::new());
        return (cache, None);
    }

    if let Some(redis_url) = &config.redis_url {
        match RedisCache::connect(redis_url, &config.cache_key_prefix).await {
            Ok(redis) => {
                tracing::info!("Cache enabled (Redis)");
                let cache: Arc<FrontendCache> = Arc::new(redis);
                return (cache, None);
            }
            Err(e) => {
                tracing::warn!("Failed to connect to Redis: {}. Using in-memory cache.", e);
            }
        }
    }

    let memory = Arc::new(MemoryCache::<CacheValue>::new());
    let sweeper = (config.cache_sweep_interval_seconds > 0).then(|| {
        memory.spawn_sweeper(Duration::from_secs(config.cache_sweep_interval_seconds))
    });
    tracing::info!(sweeper = sweeper.is_some(), "Cache enabled (in-memory)");

    let cache: Arc<FrontendCache> = memory;
    (cache, sweeper)
}

/// Wires the render orchestrator with the shipped extensions.
///
/// `translations` is optional; without it translation tokens pass through.
pub fn build_frontend(
    config: &Config,
    store: Arc<dyn Store>,
    translations: Option<Arc<PgStore>>,
    cache: Arc<FrontendCache>,
) -> FrontendService {
    let mut frontend = FrontendService::new(store, cache, config.cache_policy())
        .with_default_language(config.default_language.clone())
        .with_block_editor(Arc::new(HtmlBlockRenderer::new()))
        .with_middlewares(Arc::new(MiddlewareRegistry::new()));

    if let Some(translations) = translations {
        frontend = frontend.with_translations(translations);
    }

    frontend
}

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - PostgreSQL connection pool
/// - Migrations, when `DB_RUN_MIGRATIONS` is set
/// - Cache backend (Redis, in-memory or disabled)
/// - Render orchestrator
/// - Axum HTTP server with graceful shutdown
///
/// # Errors
///
/// Returns an error if:
/// - Database connection or migration fails
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    let pool = connect_pool(&config).await?;

    if config.db_run_migrations {
        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .context("Failed to migrate")?;
        tracing::info!("Migrations applied");
    }

    let (cache, sweeper) = build_cache(&config).await;

    let store = Arc::new(PgStore::new(Arc::new(pool)));
    let frontend = build_frontend(&config, store.clone(), Some(store), cache);

    let state = AppState::new(Arc::new(frontend))
        .with_render_timeout(config.render_timeout())
        .with_languages(config.languages.clone(), &config.default_language);

    let app = app_router(state);

    let addr: SocketAddr = config.listen_addr.parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    if let Some(sweeper) = sweeper {
        sweeper.abort();
    }

    tracing::info!("Server stopped");
    Ok(())
}

/// Resolves on Ctrl-C or, on Unix, SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl-C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
