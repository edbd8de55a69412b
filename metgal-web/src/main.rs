//! Met gallery (metgal-web) - Main entry point
//!
//! Server-rendered gallery over the Met collection API. Object titles,
//! cultures and dynasties are machine translated on the way to the page.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use tokio::signal;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use metgal_common::config::{resolve_config_path, GalleryConfig, CONFIG_ENV_VAR};
use metgal_web::services::{
    GoogleTranslator, MetCollectionClient, PassthroughTranslator, Translator,
};
use metgal_web::session::InMemorySessionStore;
use metgal_web::{build_router, AppState};

/// Command-line arguments for metgal-web
#[derive(Parser, Debug)]
#[command(name = "metgal-web")]
#[command(about = "Met collection gallery with translated object fields")]
#[command(version)]
struct Args {
    /// Path to TOML config file
    #[arg(short, long, env = CONFIG_ENV_VAR)]
    config: Option<PathBuf>,

    /// Address to bind (overrides config file)
    #[arg(long, env = "METGAL_HOST")]
    host: Option<String>,

    /// Port to listen on (overrides config file)
    #[arg(short, long, env = "METGAL_PORT")]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "metgal_web=info,metgal_common=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!(
        "Starting metgal-web v{} [{}] built {} ({})",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH"),
        env!("BUILD_TIMESTAMP"),
        env!("BUILD_PROFILE")
    );

    let args = Args::parse();

    // CLI > env > config file > compiled defaults
    let config_path = resolve_config_path(args.config.as_deref());
    let mut config = GalleryConfig::load(config_path.as_deref())
        .context("Failed to load configuration")?;

    if let Some(host) = args.host {
        config.host = host;
    }
    if let Some(port) = args.port {
        config.port = port;
    }

    let timeout = Duration::from_secs(config.request_timeout_secs);

    let collection = Arc::new(
        MetCollectionClient::new(&config.collection_base_url, timeout)
            .context("Failed to create collection API client")?,
    );
    info!("Collection API: {}", config.collection_base_url);

    let translator: Arc<dyn Translator> = if config.translation_enabled {
        info!(
            "Translating {} -> {} via {}",
            config.source_lang, config.target_lang, config.translate_base_url
        );
        Arc::new(
            GoogleTranslator::new(&config.translate_base_url, timeout)
                .context("Failed to create translation client")?,
        )
    } else {
        warn!("Translation disabled, showing source-language fields");
        Arc::new(PassthroughTranslator)
    };

    let sessions = Arc::new(InMemorySessionStore::new(Duration::from_secs(
        config.session_idle_secs,
    )));

    let bind_addr = config.bind_addr();
    let state = AppState::new(config, collection, translator, sessions);
    let app = build_router(state);

    info!("Starting HTTP server on {}", bind_addr);

    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("Failed to bind to {}", bind_addr))?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server shutdown complete");
    Ok(())
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                warn!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, shutting down");
        },
        _ = terminate => {
            info!("Received terminate signal, shutting down");
        },
    }
}
