use axum::{
    extract::{ConnectInfo, OriginalUri, Path, State},
    http::Method,
    routing::get,
    Json, Router,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tracing::info;

use crate::{
    api::error::{ApiError, RequestMeta},
    models::{AddressSummary, TransactionDetail},
    state::AppState,
};

// Create router with all routes
pub fn create_router(app_state: Arc<AppState>) -> Router {
    Router::new()
        .route("/address/{address}", get(get_address))
        .route("/transaction/{txhash}", get(get_transaction))
        .layer(CorsLayer::permissive())
        .with_state(app_state)
}

// GET /address/{address} handler
async fn get_address(
    State(state): State<Arc<AppState>>,
    Path(address): Path<String>,
    ConnectInfo(remote): ConnectInfo<SocketAddr>,
    OriginalUri(uri): OriginalUri,
    method: Method,
) -> Result<Json<AddressSummary>, ApiError> {
    info!("processing address lookup for {}", address);

    let meta = RequestMeta::new(&uri, &method, remote);
    let client = remote.ip().to_string();

    let summary = state
        .address_service
        .lookup(&address, &client)
        .await
        .map_err(|err| ApiError::from_lookup(err, meta, state.config.debug))?;

    Ok(Json(summary))
}

// GET /transaction/{txhash} handler
async fn get_transaction(
    State(state): State<Arc<AppState>>,
    Path(txhash): Path<String>,
    ConnectInfo(remote): ConnectInfo<SocketAddr>,
    OriginalUri(uri): OriginalUri,
    method: Method,
) -> Result<Json<TransactionDetail>, ApiError> {
    info!("processing transaction lookup for {}", txhash);

    let meta = RequestMeta::new(&uri, &method, remote);
    let client = remote.ip().to_string();

    let detail = state
        .transaction_service
        .lookup(&txhash, &client)
        .await
        .map_err(|err| ApiError::from_lookup(err, meta, state.config.debug))?;

    Ok(Json(detail))
}
