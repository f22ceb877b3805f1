//! services/api/src/web/rest.rs
//!
//! Contains the Axum handlers for the REST API endpoints and the master
//! definition for the OpenAPI specification.

use crate::web::protocol::{
    CategoryFootprint, ComparisonBody, ErrorResponse, EstimateRequest, EstimateResponse,
    FootprintRecordBody, SaveFootprintRequest, SaveFootprintResponse, TipsBody, TrendPointBody,
};
use crate::web::state::AppState;
use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use footprint_core::domain::NewFootprint;
use footprint_core::estimator::{compare_to_national_average, estimate, select_tips};
use footprint_core::history::trend;
use std::sync::Arc;
use tracing::{error, info, warn};
use utoipa::OpenApi;

//=========================================================================================
// OpenAPI Master Definition
//=========================================================================================

#[derive(OpenApi)]
#[openapi(
    paths(
        save_footprint_handler,
        history_handler,
        history_trend_handler,
        estimate_handler,
    ),
    components(
        schemas(
            SaveFootprintRequest,
            SaveFootprintResponse,
            FootprintRecordBody,
            ErrorResponse,
            EstimateRequest,
            EstimateResponse,
            CategoryFootprint,
            TipsBody,
            ComparisonBody,
            TrendPointBody,
        )
    ),
    tags(
        (name = "Carbon Footprint API", description = "Household footprint estimation and calculation history.")
    )
)]
pub struct ApiDoc;

const SAVE_FAILED: &str = "Failed to save footprint data.";
const HISTORY_FAILED: &str = "Failed to fetch history data.";
const ESTIMATE_FAILED: &str = "Invalid estimate request.";

type HandlerError = (StatusCode, Json<ErrorResponse>);

fn bad_request(message: &str) -> HandlerError {
    (
        StatusCode::BAD_REQUEST,
        Json(ErrorResponse {
            error: message.to_string(),
        }),
    )
}

//=========================================================================================
// REST API Handlers
//=========================================================================================

/// Health check endpoint.
pub async fn health_handler() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "service": "footprint-api"
    }))
}

/// Save a computed footprint to the ledger.
///
/// The server assigns the record's id and creation time.
#[utoipa::path(
    post,
    path = "/api/footprint",
    request_body = SaveFootprintRequest,
    responses(
        (status = 201, description = "Footprint saved", body = SaveFootprintResponse),
        (status = 400, description = "Malformed body or ledger failure", body = ErrorResponse)
    )
)]
pub async fn save_footprint_handler(
    State(app_state): State<Arc<AppState>>,
    payload: Result<Json<SaveFootprintRequest>, JsonRejection>,
) -> Result<impl IntoResponse, HandlerError> {
    let Json(req) = payload.map_err(|e| {
        warn!("Rejected footprint body: {}", e.body_text());
        bad_request(SAVE_FAILED)
    })?;

    let footprint = NewFootprint::from(req);
    let record = app_state
        .bounded(app_state.ledger.save(footprint))
        .await
        .map_err(|e| {
            error!("Failed to save footprint: {:?}", e);
            bad_request(SAVE_FAILED)
        })?;

    info!("Saved footprint {} ({:.2} t)", record.id, record.total_footprint);
    Ok((
        StatusCode::CREATED,
        Json(SaveFootprintResponse {
            message: "Footprint data saved successfully.".to_string(),
            data: record.into(),
        }),
    ))
}

/// List the most recent calculations, newest first.
#[utoipa::path(
    get,
    path = "/api/history",
    responses(
        (status = 200, description = "Recent calculations, newest first", body = [FootprintRecordBody]),
        (status = 400, description = "Ledger unavailable", body = ErrorResponse)
    )
)]
pub async fn history_handler(
    State(app_state): State<Arc<AppState>>,
) -> Result<Json<Vec<FootprintRecordBody>>, HandlerError> {
    let records = app_state
        .bounded(app_state.ledger.list_recent(app_state.config.history_limit))
        .await
        .map_err(|e| {
            error!("Failed to fetch history: {:?}", e);
            bad_request(HISTORY_FAILED)
        })?;

    Ok(Json(records.into_iter().map(Into::into).collect()))
}

/// The recent calculations as a chart series, oldest first.
#[utoipa::path(
    get,
    path = "/api/history/trend",
    responses(
        (status = 200, description = "Chart series, oldest first", body = [TrendPointBody]),
        (status = 400, description = "Ledger unavailable", body = ErrorResponse)
    )
)]
pub async fn history_trend_handler(
    State(app_state): State<Arc<AppState>>,
) -> Result<Json<Vec<TrendPointBody>>, HandlerError> {
    let records = app_state
        .bounded(app_state.ledger.list_recent(app_state.config.history_limit))
        .await
        .map_err(|e| {
            error!("Failed to fetch history trend: {:?}", e);
            bad_request(HISTORY_FAILED)
        })?;

    Ok(Json(
        trend(&records, app_state.config.display_offset)
            .into_iter()
            .map(Into::into)
            .collect(),
    ))
}

/// Estimate a household's annual footprint.
///
/// With `save` set, the result is also written to the ledger in the background;
/// the response never waits for that write or reports its outcome.
#[utoipa::path(
    post,
    path = "/api/estimate",
    request_body = EstimateRequest,
    responses(
        (status = 200, description = "Estimated footprint with advice", body = EstimateResponse),
        (status = 400, description = "Body is not a JSON object", body = ErrorResponse)
    )
)]
pub async fn estimate_handler(
    State(app_state): State<Arc<AppState>>,
    payload: Result<Json<EstimateRequest>, JsonRejection>,
) -> Result<Json<EstimateResponse>, HandlerError> {
    let Json(req) = payload.map_err(|e| {
        warn!("Rejected estimate body: {}", e.body_text());
        bad_request(ESTIMATE_FAILED)
    })?;

    let input = req.to_input();
    let breakdown = estimate(&input);

    if req.save {
        let footprint = breakdown.to_new_footprint(input);
        let state = app_state.clone();
        tokio::spawn(async move {
            if let Err(e) = state.bounded(state.ledger.save(footprint)).await {
                error!("Background save of estimate failed: {:?}", e);
            }
        });
    }

    Ok(Json(EstimateResponse::new(
        &breakdown,
        select_tips(&breakdown),
        compare_to_national_average(breakdown.total_footprint()),
    )))
}
