//! HTTP API
//!
//! Thin JSON layer over a [`SharedBiddingStore`]. Handlers parse ids,
//! validate incoming bids and map store errors to status codes; all
//! the bidding rules live in the store.
use crate::entity::{EntityId, SharedBid};
use crate::store::{SharedBiddingStore, StoreError};
use anyhow::{Context, Result};
use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::{future::Future, net::SocketAddr};
use thiserror::Error;
use tracing::{info, warn};

mod item;
mod user;

pub const API_PREFIX_V1: &str = "/api/v1";

pub const MALFORMED_URL_PARAMETER: &str = "Malformed URL parameter";
pub const BID_DECODE_FAILURE: &str = "Failed to decode a bid";

#[derive(Error, Debug, Clone, PartialEq)]
pub enum RestError {
    /// The request path or body could not be parsed
    #[error("{0}")]
    BadParameters(String),
    /// The bid decoded, but is not something that can be placed
    #[error("{0}")]
    InvalidBid(String),
    /// An item, user or winning bid does not exist
    #[error("{0}")]
    NotFound(String),
}

impl RestError {
    pub fn to_status_and_message(&self) -> (StatusCode, String) {
        match self {
            RestError::BadParameters(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            RestError::InvalidBid(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            RestError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
        }
    }
}

impl From<StoreError> for RestError {
    fn from(err: StoreError) -> Self {
        let msg = err.to_string();
        if err.is_not_found() {
            RestError::NotFound(msg)
        } else {
            RestError::BadParameters(msg)
        }
    }
}

impl From<JsonRejection> for RestError {
    fn from(rejection: JsonRejection) -> Self {
        RestError::BadParameters(rejection.body_text())
    }
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct ErrorBodyResponse {
    pub error: String,
}

impl IntoResponse for RestError {
    fn into_response(self) -> Response {
        let (status, msg) = self.to_status_and_message();
        warn!(%status, error = %msg, "request failed");
        (status, Json(ErrorBodyResponse { error: msg })).into_response()
    }
}

pub(crate) fn parse_id(raw: &str) -> Result<EntityId, RestError> {
    raw.parse()
        .map_err(|_| RestError::BadParameters(MALFORMED_URL_PARAMETER.to_owned()))
}

pub async fn live() -> Response {
    (StatusCode::OK, "OK").into_response()
}

async fn all_bids(State(store): State<SharedBiddingStore>) -> Json<Vec<SharedBid>> {
    Json(store.all_bids())
}

pub fn router(store: SharedBiddingStore) -> Router {
    let v1 = Router::new()
        .nest("/user", user::routes())
        .nest("/item", item::routes())
        .route("/bid", get(all_bids));

    Router::new()
        .route("/live", get(live))
        .nest(API_PREFIX_V1, v1)
        .with_state(store)
}

/// Serve the API on `addr` until `shutdown` resolves
pub async fn serve(
    addr: SocketAddr,
    store: SharedBiddingStore,
    shutdown: impl Future<Output = ()>,
) -> Result<()> {
    let server = axum::Server::try_bind(&addr)
        .with_context(|| format!("Could not listen on {addr}"))?;

    info!(%addr, "listening");
    server
        .serve(router(store).into_make_service())
        .with_graceful_shutdown(shutdown)
        .await
        .context("http server failed")?;
    info!("server has been shut down");

    Ok(())
}
