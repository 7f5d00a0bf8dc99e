use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tower_http::cors::{Any, CorsLayer};
use tracing::{info, warn};

use crate::catalog::{CatalogData, StaticCatalog};
use crate::config::Config;
use crate::error::{EngineError, LineItemIssue, OrphanReference};
use crate::lineitem::{LineItemKind, RawLineItem};
use crate::options::EngineOptions;
use crate::projection::{ProjectionEngine, ProjectionsResponse};
use crate::rollup::{GroupBy, GroupByParseError, RollupRow};

#[derive(Clone)]
struct ApiState {
    config: Arc<Config>,
    catalog: Arc<StaticCatalog>,
}

impl ApiState {
    fn engine(&self) -> ProjectionEngine<'_> {
        ProjectionEngine::new(
            self.catalog.as_ref(),
            &self.config.factors,
            &self.config.bottle_station,
        )
    }

    fn options(&self, requested: Option<EngineOptions>) -> EngineOptions {
        requested.unwrap_or_else(|| self.config.engine_options())
    }
}

#[derive(Debug, Serialize)]
struct ApiResponse<T: Serialize> {
    ok: bool,
    data: T,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ProjectionsEnvelope {
    ok: bool,
    generated_at: DateTime<Utc>,
    orphaned_references: Vec<OrphanReference>,
    data: ProjectionsResponse,
}

#[derive(Debug, Serialize)]
struct ApiErrorBody {
    ok: bool,
    error: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    issues: Vec<LineItemIssue>,
}

#[derive(Debug)]
struct ApiError {
    status: StatusCode,
    message: String,
    issues: Vec<LineItemIssue>,
}

impl ApiError {
    fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
            issues: Vec::new(),
        }
    }
}

impl From<EngineError> for ApiError {
    fn from(error: EngineError) -> Self {
        let EngineError::Validation(validation) = error;
        warn!(
            "rejected {} line item(s) with invalid fields",
            validation.offending_line_items().len()
        );
        Self {
            status: StatusCode::UNPROCESSABLE_ENTITY,
            message: format!("{} invalid line item field(s)", validation.issues.len()),
            issues: validation.issues,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(ApiErrorBody {
            ok: false,
            error: self.message,
            issues: self.issues,
        });
        (self.status, body).into_response()
    }
}

type ApiResult<T> = std::result::Result<Json<T>, ApiError>;

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ProjectionsRequest {
    line_items: Vec<RawLineItem>,
    #[serde(default)]
    options: Option<EngineOptions>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RollupRequest {
    line_items: Vec<RawLineItem>,
    group_by: String,
    #[serde(default)]
    kind: Option<LineItemKind>,
    #[serde(default)]
    active_only: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct RollupResponse {
    group_by: GroupBy,
    rows: Vec<RollupRow>,
}

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

fn router(state: ApiState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health))
        .route("/v1/config", get(show_config))
        .route("/v1/catalog", get(show_catalog))
        .route("/v1/projections", post(projections))
        .route("/v1/rollup", post(rollup))
        .layer(cors)
        .with_state(state)
}

pub async fn run_server(config: Config, catalog: StaticCatalog, bind: SocketAddr) -> Result<()> {
    let state = ApiState {
        config: Arc::new(config),
        catalog: Arc::new(catalog),
    };

    let listener = tokio::net::TcpListener::bind(bind).await?;
    info!("REST API listening on http://{bind}");
    axum::serve(listener, router(state)).await?;
    Ok(())
}

async fn health() -> Json<ApiResponse<HealthResponse>> {
    ok(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

async fn show_config(State(state): State<ApiState>) -> Json<ApiResponse<Config>> {
    ok(state.config.as_ref().clone())
}

async fn show_catalog(State(state): State<ApiState>) -> Json<ApiResponse<CatalogData>> {
    ok(state.catalog.data().clone())
}

async fn projections(
    State(state): State<ApiState>,
    Json(request): Json<ProjectionsRequest>,
) -> ApiResult<ProjectionsEnvelope> {
    let options = state.options(request.options);
    let run = state.engine().project(&request.line_items, &options)?;
    Ok(Json(ProjectionsEnvelope {
        ok: true,
        generated_at: Utc::now(),
        orphaned_references: run.orphans,
        data: run.response,
    }))
}

async fn rollup(
    State(state): State<ApiState>,
    Json(request): Json<RollupRequest>,
) -> ApiResult<ApiResponse<RollupResponse>> {
    let group_by: GroupBy = request
        .group_by
        .parse()
        .map_err(|err: GroupByParseError| ApiError::bad_request(err.to_string()))?;
    let options = EngineOptions {
        active_groups_only: request.active_only,
        ..state.config.engine_options()
    };
    let rows = state
        .engine()
        .rollup(&request.line_items, group_by, request.kind, &options)?;
    Ok(ok(RollupResponse { group_by, rows }))
}

fn ok<T: Serialize>(data: T) -> Json<ApiResponse<T>> {
    Json(ApiResponse { ok: true, data })
}
