// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use std::net::SocketAddr;
use std::time::Duration;

use relational_realty_server::{
    api::router,
    config::Config,
    state::AppState,
    storage::{DocumentStore, StoragePaths},
};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "info,relational_realty_server=debug"
                    .parse()
                    .expect("default filter parses")
            }),
        )
        .init();

    let config = Config::from_env();

    // Production refuses to run without a signing secret; development logs
    // loudly and continues with every gated route answering 401.
    if let Err(e) = config.ensure_auth_configured() {
        tracing::error!(error = %e, "Refusing to start");
        std::process::exit(1);
    }

    let mut storage = DocumentStore::new(StoragePaths::new(&config.data_dir));
    if let Err(e) = storage.initialize() {
        tracing::error!(error = %e, data_dir = %config.data_dir.display(), "Failed to initialize storage");
        std::process::exit(1);
    }

    let addr: SocketAddr = format!("{}:{}", config.host, config.port)
        .parse()
        .expect("Failed to parse bind address");
    let environment = config.environment;

    let state = AppState::new(config, storage);
    let app = router(state);

    let handle = axum_server::Handle::new();
    let shutdown_handle = handle.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::info!("Shutdown signal received, draining connections");
            shutdown_handle.graceful_shutdown(Some(Duration::from_secs(10)));
        }
    });

    tracing::info!(%addr, ?environment, "Relational Realty server listening (docs at /docs)");

    axum_server::bind(addr)
        .handle(handle)
        .serve(app.into_make_service())
        .await
        .expect("HTTP server failed");
}
