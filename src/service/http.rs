//! HTTP surface for the voting, leaderboard and admin collaborators
//!
//! Handlers translate coordinator results into `{success, message}`-shaped
//! JSON so a caller can distinguish "no pair available" from "server
//! error" from "vote accepted". Leaderboard sorting happens here, not in
//! the coordinator.

use crate::error::DuelError;
use crate::service::app::AppState;
use crate::types::{StatsOverwrite, VoteRequest};
use crate::utils::sort_leaderboard;
use anyhow::{Context, Result};
use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    routing::{get, post, put},
    Json, Router,
};
use serde_json::json;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{debug, info, warn};

/// Build the router with all public and admin endpoints
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(root_handler))
        .route("/health", get(health_handler))
        .route("/api/pair", get(pair_handler))
        .route("/api/vote", post(vote_handler))
        .route("/api/leaderboard", get(leaderboard_handler))
        .route("/api/communities/{id}", get(community_handler))
        .route("/api/admin/communities", get(admin_list_handler))
        .route("/api/admin/communities/{id}/stats", put(admin_stats_handler))
        .route("/api/admin/reset", post(admin_reset_handler))
        .with_state(state)
}

/// Serve the HTTP surface until ctrl-c
pub async fn serve(state: Arc<AppState>) -> Result<()> {
    let addr: SocketAddr = format!(
        "{}:{}",
        state.config().service.bind_address,
        state.config().service.http_port
    )
    .parse()
    .context("Invalid bind address")?;

    let app = router(state);
    let listener = TcpListener::bind(addr).await?;

    info!("Community duel service listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            info!("Shutdown signal received");
        })
        .await?;

    info!("HTTP server stopped");
    Ok(())
}

/// Map a coordinator failure onto a status code and a `{success, message}` body
fn failure_response(err: &anyhow::Error) -> (StatusCode, Json<serde_json::Value>) {
    let status = match err.downcast_ref::<DuelError>() {
        Some(DuelError::NotFound { .. }) => StatusCode::NOT_FOUND,
        Some(DuelError::InvalidArgument { .. }) => StatusCode::BAD_REQUEST,
        Some(DuelError::StoreUnavailable { .. }) => StatusCode::SERVICE_UNAVAILABLE,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    };

    (
        status,
        Json(json!({ "success": false, "message": err.to_string() })),
    )
}

/// Check the shared admin token; admin routes are disabled when none is set
fn authorize_admin(
    state: &AppState,
    headers: &HeaderMap,
) -> std::result::Result<(), (StatusCode, Json<serde_json::Value>)> {
    let expected = match &state.config().store.admin_token {
        Some(token) => token,
        None => {
            return Err((
                StatusCode::FORBIDDEN,
                Json(json!({ "success": false, "message": "Admin surface is disabled" })),
            ))
        }
    };

    let supplied = headers
        .get("x-admin-token")
        .and_then(|value| value.to_str().ok());

    if supplied == Some(expected.as_str()) {
        Ok(())
    } else {
        warn!("Rejected admin request with missing or wrong token");
        Err((
            StatusCode::UNAUTHORIZED,
            Json(json!({ "success": false, "message": "Not authorized" })),
        ))
    }
}

async fn root_handler() -> impl IntoResponse {
    Json(json!({
        "service": "community-duel",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": [
            "/health",
            "/api/pair",
            "/api/vote",
            "/api/leaderboard",
            "/api/communities/{id}"
        ]
    }))
}

async fn health_handler(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    debug!("Health check requested");

    match state.store().list_all().await {
        Ok(communities) => (
            StatusCode::OK,
            Json(json!({
                "status": "healthy",
                "service": state.config().service.name,
                "version": env!("CARGO_PKG_VERSION"),
                "communities": communities.len(),
                "uptime": state.uptime()
            })),
        ),
        Err(e) => (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({
                "status": "unhealthy",
                "service": state.config().service.name,
                "message": e.to_string()
            })),
        ),
    }
}

/// Voting surface: fetch the next random pair
async fn pair_handler(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    match state.store().pick_random_pair().await {
        Ok(Some((first, second))) => (
            StatusCode::OK,
            Json(json!({ "success": true, "pair": [first, second] })),
        ),
        // An expected steady-state condition, not a server error
        Ok(None) => (
            StatusCode::OK,
            Json(json!({
                "success": false,
                "message": "Not enough communities for a voting pair"
            })),
        ),
        Err(e) => failure_response(&e),
    }
}

/// Voting surface: submit a decided duel
async fn vote_handler(
    State(state): State<Arc<AppState>>,
    Json(vote): Json<VoteRequest>,
) -> impl IntoResponse {
    match state.store().record_vote(&vote.winner_id, &vote.loser_id).await {
        Ok(()) => (StatusCode::OK, Json(json!({ "success": true }))),
        Err(e) => failure_response(&e),
    }
}

/// Leaderboard surface: all communities, best rating first
async fn leaderboard_handler(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    match state.store().list_all().await {
        Ok(mut communities) => {
            sort_leaderboard(&mut communities);
            (StatusCode::OK, Json(json!(communities)))
        }
        Err(e) => failure_response(&e),
    }
}

async fn community_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    match state.store().get_by_id(&id).await {
        Ok(Some(community)) => (StatusCode::OK, Json(json!(community))),
        Ok(None) => failure_response(&DuelError::NotFound { id }.into()),
        Err(e) => failure_response(&e),
    }
}

async fn admin_list_handler(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> impl IntoResponse {
    if let Err(rejection) = authorize_admin(&state, &headers) {
        return rejection;
    }

    match state.store().list_all().await {
        Ok(communities) => (StatusCode::OK, Json(json!(communities))),
        Err(e) => failure_response(&e),
    }
}

async fn admin_stats_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    headers: HeaderMap,
    Json(stats): Json<StatsOverwrite>,
) -> impl IntoResponse {
    if let Err(rejection) = authorize_admin(&state, &headers) {
        return rejection;
    }

    match state
        .store()
        .overwrite_stats(&id, stats.elo, stats.wins, stats.losses, stats.games_played)
        .await
    {
        Ok(()) => (StatusCode::OK, Json(json!({ "success": true }))),
        Err(e) => failure_response(&e),
    }
}

async fn admin_reset_handler(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> impl IntoResponse {
    if let Err(rejection) = authorize_admin(&state, &headers) {
        return rejection;
    }

    match state.store().reset_all().await {
        Ok(()) => (StatusCode::OK, Json(json!({ "success": true }))),
        Err(e) => failure_response(&e),
    }
}
