//! `eventdesk serve`: run the HTTP API until Ctrl-C.

use std::sync::Arc;

use tokio::net::TcpListener;
use tracing::{info, warn};

use eventdesk_adapters::{RemoteSessionVerifier, StaticSessionVerifier, sqlite};
use eventdesk_core::prelude::*;

use crate::{
    cli::ServeArgs,
    config::{AppConfig, AuthConfig},
    error::{ServerError, ServerResult},
    http::{self, AppState},
    output::OutputManager,
};

pub fn execute(args: ServeArgs, mut config: AppConfig, output: OutputManager) -> ServerResult<()> {
    // CLI flags sit on top of every other layer.
    if let Some(host) = args.host {
        config.server.host = host;
    }
    if let Some(port) = args.port {
        config.server.port = port;
    }
    if let Some(url) = args.database_url {
        config.database.url = url;
    }

    super::runtime()?.block_on(run(config, output))
}

async fn run(config: AppConfig, output: OutputManager) -> ServerResult<()> {
    let pool = sqlite::connect(&config.database.url, config.database.max_connections).await?;
    sqlite::migrate(&pool).await?;

    let registry = builtin_registry().map_err(DeskError::from)?;
    let sessions = session_verifier(&config.auth)?;
    if config.auth.url.is_none() && config.auth.tokens.is_empty() {
        output.warning(
            "No auth service or static tokens configured; event writes will be rejected",
        )?;
    }
    let state = AppState::sqlite(pool.clone(), registry, sessions);

    let address = config.bind_address();
    let listener = TcpListener::bind(&address)
        .await
        .map_err(|source| ServerError::Bind {
            address: address.clone(),
            source,
        })?;
    let local = listener.local_addr()?;

    info!(%local, database = %config.database.url, "Listening");
    output.success(&format!("EventDesk listening on http://{local}"))?;
    output.print("Press Ctrl-C to stop")?;

    axum::serve(listener, http::router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    pool.close().await;
    info!("Server stopped");
    Ok(())
}

/// The auth service when one is configured, otherwise the static tokens.
pub fn session_verifier(auth: &AuthConfig) -> ServerResult<Arc<dyn SessionVerifier>> {
    if let Some(url) = &auth.url {
        info!(%url, "Verifying sessions against the auth service");
        return Ok(Arc::new(RemoteSessionVerifier::new(url.clone())));
    }

    let verifier = StaticSessionVerifier::new();
    for entry in &auth.tokens {
        verifier.insert(entry.token.clone(), entry.session_user()?)?;
    }
    if verifier.is_empty() {
        warn!("No auth service or static tokens configured; event writes will be rejected");
    } else {
        info!(tokens = verifier.len(), "Verifying sessions against static tokens");
    }
    Ok(Arc::new(verifier))
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "Failed to listen for Ctrl-C");
        // Without a signal handler, keep serving.
        std::future::pending::<()>().await;
    }
    info!("Shutdown requested");
}
