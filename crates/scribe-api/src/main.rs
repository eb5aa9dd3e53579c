//! scribe-api - HTTP API server for the scribe notes service

use std::path::Path;

use tracing::{info, warn};
use tracing_appender::{non_blocking::WorkerGuard, rolling};
use tracing_subscriber::{
    fmt::{self, writer::BoxMakeWriter},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter,
};

use scribe_api::{config::Config, create_router, AppState};
use scribe_db::{log_pool_metrics, Database};

/// Default `RUST_LOG` directives when none are set.
const DEFAULT_LOG_FILTER: &str = "scribe_api=debug,scribe_db=info,tower_http=debug";

/// Install the global subscriber.
///
/// - `LOG_FORMAT`: `json` or `text` (default `text`)
/// - `LOG_FILE`: write to this file, rotated daily, instead of stdout
/// - `LOG_ANSI`: force ANSI colors on or off
/// - `RUST_LOG`: env filter, defaults to [`DEFAULT_LOG_FILTER`]
///
/// The returned guard flushes the file writer on drop and must live as long
/// as the process logs.
fn init_tracing() -> Option<WorkerGuard> {
    let json = std::env::var("LOG_FORMAT").is_ok_and(|f| f == "json");
    let log_file = std::env::var("LOG_FILE").ok();
    let ansi = std::env::var("LOG_ANSI")
        .ok()
        .map(|v| v == "true" || v == "1");

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| DEFAULT_LOG_FILTER.into());
    let registry = tracing_subscriber::registry().with(filter);

    let (writer, guard) = match log_file.as_deref().map(Path::new) {
        Some(path) => {
            let dir = path.parent().unwrap_or(Path::new("."));
            let name = path
                .file_name()
                .and_then(|f| f.to_str())
                .unwrap_or("scribe-api.log");
            let (writer, guard) = tracing_appender::non_blocking(rolling::daily(dir, name));
            (BoxMakeWriter::new(writer), Some(guard))
        }
        None => (BoxMakeWriter::new(std::io::stdout), None),
    };
    // Files get plain text unless colors are asked for.
    let ansi = ansi.unwrap_or(log_file.is_none());

    if json {
        registry
            .with(fmt::layer().json().with_writer(writer))
            .init();
    } else {
        registry
            .with(fmt::layer().with_writer(writer).with_ansi(ansi))
            .init();
    }

    info!(
        log_format = if json { "json" } else { "text" },
        log_file = log_file.as_deref().unwrap_or("(stdout)"),
        "Logging initialized"
    );
    guard
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let _log_guard = init_tracing();

    let config = Config::from_env()?;
    let addr = config.bind_addr()?;

    // Connect to database
    info!("Connecting to database...");
    let db = Database::connect_with_config(&config.database_url, config.pool.clone()).await?;
    info!("Database connected");

    // The table must exist before any request is served
    db.ensure_schema().await?;
    log_pool_metrics(db.pool());

    let app = create_router(AppState::from_database(&db));

    // Start server
    info!("Starting server on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    db.pool().close().await;
    info!("Server stopped");

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received SIGINT (Ctrl+C), shutting down"),
        _ = terminate => info!("Received SIGTERM, shutting down"),
    }
}
