use std::net::{Ipv4Addr, SocketAddr};

use tokio::signal;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

use earnboard_server::{
    config::AppConfig,
    database::client::{Database, DbConfig},
    init,
    middleware::{
        error::{AppError, AppResult},
        mw_ctx,
    },
};

#[tokio::main]
async fn main() -> AppResult<()> {
    fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = AppConfig::from_env();

    let db = Database::connect(DbConfig {
        url: &config.db_url,
        database: &config.db_database,
        namespace: &config.db_namespace,
        password: config.db_password.as_deref(),
        username: config.db_username.as_deref(),
    })
    .await?;

    db.run_migrations().await?;

    let ctx_state = mw_ctx::create_ctx_state(db, &config);
    init::bootstrap_admin(&ctx_state, &config).await;

    let routes_all = init::main_router(&ctx_state).await;

    let addr = SocketAddr::from((Ipv4Addr::UNSPECIFIED, config.port));
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::Generic {
            description: format!("bind {addr}: {e}"),
        })?;
    info!("listening on {addr}");

    axum::serve(listener, routes_all.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| AppError::Generic {
            description: e.to_string(),
        })?;

    info!("server shut down");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if signal::ctrl_c().await.is_ok() {
            info!("received Ctrl+C, shutting down");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
                info!("received terminate signal, shutting down");
            }
            Err(_) => std::future::pending::<()>().await,
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
