use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Json;
use stockflow_core::errors::CoreError;
use stockflow_core::models::payload::StockDataPayload;
use stockflow_core::services::validation_service::ValidationService;
use stockflow_core::storage::format;
use stockflow_core::storage::manager::StockStore;

use crate::error::ApiError;
use crate::http::types::{AppState, MessageBody};

pub const SAVE_SUCCESS_MESSAGE: &str = "Market data saved successfully!";

/// Run a blocking store call off the async workers.
async fn run_store<T, F>(state: &AppState, op: F) -> Result<T, CoreError>
where
    T: Send + 'static,
    F: FnOnce(&dyn StockStore) -> Result<T, CoreError> + Send + 'static,
{
    let store = state.store.clone();
    tokio::task::spawn_blocking(move || op(store.as_ref()))
        .await
        .map_err(|e| CoreError::StoreIo(format!("store task failed: {e}")))?
}

/// GET /api/stocks
///
/// The whole document, pretty-printed. Creates the data file on first use.
pub async fn get_stocks_handler(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, ApiError> {
    let payload = run_store(&state, |store| store.load())
        .await
        .map_err(ApiError::ReadFailed)?;
    let body = format::write_document(&payload).map_err(ApiError::ReadFailed)?;

    Ok((
        StatusCode::OK,
        [(header::CONTENT_TYPE, "application/json")],
        body,
    ))
}

/// POST /api/stocks
///
/// Replaces the whole document. Only the shape is enforced here; business
/// rules are checked by the client before it submits, so violations are
/// logged and the payload is stored anyway. Last writer wins.
pub async fn post_stocks_handler(
    State(state): State<AppState>,
    request: Result<Json<StockDataPayload>, JsonRejection>,
) -> Result<Json<MessageBody>, ApiError> {
    let Json(payload) = request.map_err(|e| ApiError::BadPayload(e.body_text()))?;

    if let Err(e) = ValidationService::new().validate_payload(&payload) {
        tracing::warn!(violations = %e, "storing stock data that fails validation");
    }

    let stocks = payload.stocks.len();
    run_store(&state, move |store| store.save(&payload))
        .await
        .map_err(ApiError::SaveFailed)?;
    tracing::info!(stocks, "stock data replaced");

    Ok(Json(MessageBody::new(SAVE_SUCCESS_MESSAGE)))
}

/// GET /health
pub async fn health_handler() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "ok" }))
}
