//! `user-validate-server`: `UserService.CreateUser` over Connect JSON and REST.

use std::sync::Arc;

use anyhow::Context;
use tokio::signal;
use tracing::info;
use user_validate::config::Config;
use user_validate::{
    router, telemetry, UserServer, CONNECT_CREATE_USER_PATH, REST_CREATE_USER_PATH,
};
use user_validate_core::Validator;

const VERSION: &str = env!("CARGO_PKG_VERSION");

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::init()?;
    telemetry::init(config.level()?, config.json_logs)
        .context("failed to install tracing subscriber")?;

    let addr = config.socket_addr()?;
    info!(
        version = VERSION,
        address = %addr,
        fail_fast = config.fail_fast,
        pid = std::process::id(),
        "Starting user-validate-server"
    );

    let service = UserServer::new(Validator::with_config(config.validator_config()));
    let app = router(Arc::new(service));

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    info!(
        address = %addr,
        connect = CONNECT_CREATE_USER_PATH,
        rest = REST_CREATE_USER_PATH,
        "Server listening"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = signal::ctrl_c().await {
            tracing::error!(error = %err, "failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(err) => {
                tracing::error!(error = %err, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => info!("Received Ctrl+C, shutting down"),
        () = terminate => info!("Received SIGTERM, shutting down"),
    }
}
