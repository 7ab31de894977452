use std::net::SocketAddr;
use std::sync::Arc;

use wordplay_backend::config::Config;
use wordplay_backend::db::DatabaseProxy;
use wordplay_backend::logging::{self, LogOptions};
use wordplay_backend::seed;
use wordplay_backend::state::AppState;

#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv();
    let config = Config::from_env();

    let _log_guard = logging::init_tracing(&LogOptions::from_env(&config.log_level));

    let proxy = match DatabaseProxy::connect(config.db.clone()).await {
        Ok(proxy) => proxy,
        Err(err) => {
            tracing::error!(error = %err, url = %config.db.url, "database initialization failed");
            std::process::exit(1);
        }
    };

    if config.seed_demo_data {
        match seed::seed_demo_data(&proxy).await {
            Ok(()) => tracing::info!("demo data seeded"),
            Err(err) => tracing::warn!(error = %err, "demo data seeding failed"),
        }
    }

    let state = AppState::from_store(Arc::new(proxy), Some(config.image_base.clone()));
    let app = wordplay_backend::create_app(state);

    let addr = config.bind_addr();
    let listener = match tokio::net::TcpListener::bind(addr).await {
        Ok(listener) => listener,
        Err(err) => {
            tracing::error!(error = %err, %addr, "bind listener failed");
            std::process::exit(1);
        }
    };
    tracing::info!(%addr, "wordplay backend listening");

    let server = axum::serve(listener, app.into_make_service_with_connect_info::<SocketAddr>())
        .with_graceful_shutdown(shutdown_signal());

    if let Err(err) = server.await {
        tracing::error!(error = %err, "server error");
    }

    tracing::info!("graceful shutdown complete");
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %err, "failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};
        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(err) => {
                tracing::error!(error = %err, "failed to install SIGTERM handler");
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
}
