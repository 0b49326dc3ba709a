//! Gateway HTTP server (single port).

use crate::config::Config;
use crate::gateway::error::PushError;
use crate::wechat::{self, InboundMessage};
use anyhow::{Context, Result};
use axum::{
    extract::{Request, State},
    http::{header, Method},
    response::{IntoResponse, Response},
    routing::{any, get},
    Json, Router,
};
use serde_json::json;
use std::sync::Arc;

/// Route the platform pushes messages to.
pub const MESSAGE_PUSH_PATH: &str = "/message-push";

const JSON_UTF8: &str = "application/json; charset=utf-8";

/// Shared state for the gateway. Read-only; requests never share mutable state.
#[derive(Clone)]
pub struct GatewayState {
    pub config: Arc<Config>,
}

/// Build the router: health probe on `/`, message push on [`MESSAGE_PUSH_PATH`].
///
/// The push route accepts every method so the handler can answer non-POST requests itself.
pub fn router(config: Config) -> Router {
    let state = GatewayState {
        config: Arc::new(config),
    };
    Router::new()
        .route("/", get(health_http))
        .route(MESSAGE_PUSH_PATH, any(message_push))
        .with_state(state)
}

/// Run the gateway server; binds to config.gateway.bind:config.gateway.port.
/// Blocks until shutdown (e.g. Ctrl+C).
pub async fn run_gateway(config: Config) -> Result<()> {
    let bind_addr = config.gateway.bind_addr();
    let app = router(config);

    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("binding to {}", bind_addr))?;
    log::info!("gateway listening on {}", bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("gateway server exited")?;
    log::info!("gateway stopped");
    Ok(())
}

/// Future that completes when the process should shut down (SIGINT or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    log::info!("shutdown signal received, draining connections");
}

/// `/message-push` — decode the pushed message, build the reply, answer with pretty JSON.
/// The request body is consumed (and released) before any parsing happens.
async fn message_push(
    State(state): State<GatewayState>,
    request: Request,
) -> Result<Response, PushError> {
    log::info!(
        "received message push request: {} {}",
        request.method(),
        request.uri().path()
    );
    if request.method() != Method::POST {
        return Err(PushError::MethodNotAllowed);
    }

    let body = axum::body::to_bytes(request.into_body(), state.config.gateway.max_body_bytes)
        .await
        .map_err(|e| {
            log::warn!("error reading request body: {}", e);
            PushError::ReadBody(e)
        })?;
    log::info!("received JSON body: {}", String::from_utf8_lossy(&body));

    let message = InboundMessage::from_slice(&body).map_err(|e| {
        log::warn!("error parsing JSON: {}", e);
        PushError::ParseJson(e)
    })?;
    log::info!(
        "parsed message - from: {}, to: {}, type: {}, content: {}",
        message.from_user_name,
        message.to_user_name,
        message.msg_type,
        message.content
    );

    let reply = wechat::process_message(&message);
    let reply_json = reply.to_json_pretty().map_err(|e| {
        log::error!("error generating reply JSON: {}", e);
        PushError::EncodeReply(e)
    })?;
    log::info!("sending reply: {}", String::from_utf8_lossy(&reply_json));

    Ok(([(header::CONTENT_TYPE, JSON_UTF8)], reply_json).into_response())
}

/// GET / returns a simple health JSON (for probes).
async fn health_http(State(state): State<GatewayState>) -> Json<serde_json::Value> {
    Json(json!({
        "runtime": "running",
        "route": MESSAGE_PUSH_PATH,
        "port": state.config.gateway.port,
    }))
}
