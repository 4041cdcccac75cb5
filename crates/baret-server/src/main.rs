// SPDX-License-Identifier: Apache-2.0
#![forbid(unsafe_code)]

use baret_query::QueryLimits;
use baret_server::{
    build_router, parse_auth_tokens, validate_startup_config_contract, ApiConfig, AppState,
    SqliteStore,
};
use std::env;
use std::path::PathBuf;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

fn env_bool(name: &str, default: bool) -> bool {
    match env::var(name) {
        Ok(raw) => matches!(
            raw.trim().to_ascii_lowercase().as_str(),
            "1" | "true" | "yes" | "on"
        ),
        Err(_) => default,
    }
}

fn env_u64(name: &str, default: u64) -> u64 {
    env::var(name)
        .ok()
        .and_then(|raw| raw.trim().parse().ok())
        .unwrap_or(default)
}

fn env_usize(name: &str, default: usize) -> usize {
    env::var(name)
        .ok()
        .and_then(|raw| raw.trim().parse().ok())
        .unwrap_or(default)
}

fn env_duration_ms(name: &str, default_ms: u64) -> Duration {
    Duration::from_millis(env_u64(name, default_ms))
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env("BARET_LOG").unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);
    if env_bool("BARET_LOG_JSON", true) {
        registry
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

async fn wait_for_shutdown_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};
        let mut term = match signal(SignalKind::terminate()) {
            Ok(term) => term,
            Err(err) => {
                tracing::error!(error = %err, "failed to install SIGTERM handler");
                return;
            }
        };
        let mut int = match signal(SignalKind::interrupt()) {
            Ok(int) => int,
            Err(err) => {
                tracing::error!(error = %err, "failed to install SIGINT handler");
                return;
            }
        };
        tokio::select! {
            _ = term.recv() => {}
            _ = int.recv() => {}
        }
    }
    #[cfg(not(unix))]
    {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %err, "failed to install ctrl-c handler");
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), String> {
    init_tracing();

    let bind_addr = env::var("BARET_BIND").unwrap_or_else(|_| "0.0.0.0:8080".to_string());
    let db_path = PathBuf::from(
        env::var("BARET_DB_PATH").unwrap_or_else(|_| "artifacts/baret.sqlite".to_string()),
    );

    let api = ApiConfig {
        max_body_bytes: env_usize("BARET_MAX_BODY_BYTES", 16 * 1024),
        stats_cache_ttl: env_duration_ms("BARET_STATS_CACHE_TTL_MS", 30_000),
        slow_query_threshold: env_duration_ms("BARET_SLOW_QUERY_THRESHOLD_MS", 200),
        require_auth: env_bool("BARET_REQUIRE_AUTH", true),
        auth_tokens: parse_auth_tokens(&env::var("BARET_AUTH_TOKENS").unwrap_or_default()),
    };
    validate_startup_config_contract(&api)?;

    let limits = QueryLimits {
        max_limit: env_usize("BARET_MAX_LIMIT", 500),
        max_export_rows: env_usize("BARET_MAX_EXPORT_ROWS", 10_000),
    };

    if let Some(parent) = db_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .map_err(|err| format!("create {} failed: {err}", parent.display()))?;
        }
    }
    let store = SqliteStore::open(&db_path)
        .map_err(|err| format!("open store at {} failed: {err}", db_path.display()))?;

    let state = AppState::with_config(Arc::new(store), api, limits);
    let ready = state.ready.clone();
    let app = build_router(state);

    let listener = TcpListener::bind(&bind_addr)
        .await
        .map_err(|err| format!("bind {bind_addr} failed: {err}"))?;
    info!(addr = %bind_addr, db = %db_path.display(), "baret-server listening");

    let shutdown = async move {
        wait_for_shutdown_signal().await;
        ready.store(false, Ordering::Relaxed);
        info!("shutdown signal received, draining");
    };
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await
        .map_err(|err| format!("server failed: {err}"))
}
