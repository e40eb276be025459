use axum::{
    extract::{Json, Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use serde_json::json;
use tracing::{error, info, warn};

use crate::{
    app_state::AppState,
    error::AdapterError,
    models::{NewProduct, Product},
    views::{AdvancedAnalysis, ProductList, SentimentAnalysis, WarningDetail, WarningList},
};

type ApiError = (StatusCode, Json<serde_json::Value>);

// --- Payloads de la API ---

#[derive(Deserialize)]
pub struct LegalAdvicePayload {
    topic_id: String,
}

// --- Router ---

pub fn create_router(app_state: AppState) -> Router {
    Router::new()
        .route("/api/products", get(list_products_handler).post(create_product_handler))
        .route("/api/products/:product_id/warnings", get(list_warnings_handler))
        .route("/api/warnings/:warning_id", get(warning_detail_handler))
        .route("/api/warnings/:warning_id/advanced", get(advanced_analysis_handler))
        .route("/api/warnings/:warning_id/sentiment", get(sentiment_analysis_handler))
        .route("/api/legal-advice", post(legal_advice_handler))
        .with_state(app_state)
}

/// Traduce los errores del adaptador a respuestas HTTP con cuerpo `{"error": ...}`.
fn error_response(err: AdapterError) -> ApiError {
    let status = match &err {
        AdapterError::NotFound { .. } => StatusCode::NOT_FOUND,
        AdapterError::InvalidWarningId(_) => StatusCode::BAD_REQUEST,
        AdapterError::Network(_) | AdapterError::Api { .. } | AdapterError::Decode(_) => {
            StatusCode::BAD_GATEWAY
        }
    };
    if err.is_transport() {
        error!("Error consultando el backend: {}", err);
    } else {
        warn!("Petición rechazada: {}", err);
    }
    (status, Json(json!({ "error": err.to_string() })))
}

// --- Handlers ---

#[axum::debug_handler]
async fn list_products_handler(
    State(state): State<AppState>,
) -> Result<Json<ProductList>, ApiError> {
    state.service.list_products().await.map(Json).map_err(error_response)
}

#[axum::debug_handler]
async fn create_product_handler(
    State(state): State<AppState>,
    Json(payload): Json<NewProduct>,
) -> Result<(StatusCode, Json<Product>), ApiError> {
    if payload.name.trim().is_empty() {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(json!({"error": "El nombre del producto es obligatorio."})),
        ));
    }
    let created = state
        .service
        .create_product(&payload)
        .await
        .map_err(error_response)?;
    Ok((StatusCode::CREATED, Json(created)))
}

#[axum::debug_handler]
async fn list_warnings_handler(
    State(state): State<AppState>,
    Path(product_id): Path<String>,
) -> Result<Json<WarningList>, ApiError> {
    state
        .service
        .list_warnings(&product_id)
        .await
        .map(Json)
        .map_err(error_response)
}

#[axum::debug_handler]
async fn warning_detail_handler(
    State(state): State<AppState>,
    Path(warning_id): Path<String>,
) -> Result<Json<WarningDetail>, ApiError> {
    state
        .service
        .warning_detail(&warning_id)
        .await
        .map(Json)
        .map_err(error_response)
}

#[axum::debug_handler]
async fn advanced_analysis_handler(
    State(state): State<AppState>,
    Path(warning_id): Path<String>,
) -> Result<Json<AdvancedAnalysis>, ApiError> {
    state
        .service
        .advanced_analysis(&warning_id)
        .await
        .map(Json)
        .map_err(error_response)
}

#[axum::debug_handler]
async fn sentiment_analysis_handler(
    State(state): State<AppState>,
    Path(warning_id): Path<String>,
) -> Result<Json<SentimentAnalysis>, ApiError> {
    state
        .service
        .sentiment_analysis(&warning_id)
        .await
        .map(Json)
        .map_err(error_response)
}

// La generación del dictamen es asíncrona en el backend: se responde 202 sin esperar.
#[axum::debug_handler]
async fn legal_advice_handler(
    State(state): State<AppState>,
    Json(payload): Json<LegalAdvicePayload>,
) -> Result<impl IntoResponse, ApiError> {
    let topic_id = payload.topic_id.trim();
    if topic_id.is_empty() {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(json!({"error": "Falta topic_id."})),
        ));
    }
    info!("Solicitando dictamen legal para el tema {}", topic_id);
    let _ = state.service.request_legal_advice(topic_id);
    Ok((
        StatusCode::ACCEPTED,
        Json(json!({ "message": "Solicitud de dictamen legal enviada." })),
    ))
}
