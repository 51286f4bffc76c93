//! `deployhook-extractor` -- unpacks an uploaded vendor archive.
//!
//! Each request carrying the right `X-DEPLOY-TOKEN` extracts the archive at
//! `ARCHIVE_PATH` into `EXTRACT_DIR` and deletes it. The secret is read from
//! the env file at `DEPLOY_ENV_FILE` on every request.
//!
//! # Environment variables
//!
//! | Variable            | Required | Default          | Description                        |
//! |---------------------|----------|------------------|------------------------------------|
//! | `HOST`              | no       | `0.0.0.0`        | Bind address                       |
//! | `PORT`              | no       | `3001`           | Bind port                          |
//! | `DEPLOY_ENV_FILE`   | no       | `.env`           | File holding `DEPLOY_TOKEN`        |
//! | `ARCHIVE_PATH`      | no       | `api/vendor.zip` | Archive to extract                 |
//! | `EXTRACT_DIR`       | no       | `api/`           | Extraction target                  |
//! | `EXTRACT_OVERWRITE` | no       | `true`           | Replace files that already exist   |

use std::net::{IpAddr, SocketAddr};

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use deployhook_extractor::config::ExtractorConfig;
use deployhook_extractor::router::build_app_router;
use deployhook_extractor::state::AppState;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "deployhook_extractor=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ExtractorConfig::from_env().unwrap_or_else(|e| {
        tracing::error!(error = %e, "Invalid configuration");
        std::process::exit(1);
    });

    let cwd = std::env::current_dir()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|_| "<unknown>".into());
    tracing::info!(
        cwd = %cwd,
        env_file = %config.env_file.display(),
        archive = %config.archive_path.display(),
        target = %config.extract_dir.display(),
        overwrite = config.overwrite,
        "Loaded extractor configuration",
    );

    let host: IpAddr = config.host.parse().unwrap_or_else(|e| {
        tracing::error!(host = %config.host, error = %e, "Invalid HOST address");
        std::process::exit(1);
    });
    let addr = SocketAddr::new(host, config.port);

    let app = build_app_router(AppState::new(config));

    let listener = match tokio::net::TcpListener::bind(addr).await {
        Ok(listener) => listener,
        Err(e) => {
            tracing::error!(%addr, error = %e, "Failed to bind to address");
            std::process::exit(1);
        }
    };
    tracing::info!(%addr, "Starting extractor");

    if let Err(e) = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        tracing::error!(error = %e, "Server error");
        std::process::exit(1);
    }

    tracing::info!("Extractor stopped");
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if tokio::signal::ctrl_c().await.is_err() {
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(_) => std::future::pending::<()>().await,
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => tracing::info!("Received SIGINT (Ctrl-C), shutting down"),
        () = terminate => tracing::info!("Received SIGTERM, shutting down"),
    }
}
