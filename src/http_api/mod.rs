use std::{net::SocketAddr, sync::Arc};

use axum::{
    Json, Router,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, PathRejection, QueryRejection},
    },
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use chrono::NaiveDate;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use crate::allocation::parse_calendar_date;
use crate::calendar::{CalendarDay, build_month, next_month, prev_month};
use crate::{Allocation, ConfigError, ViewConfig, validate_allocations};

#[derive(Clone)]
pub struct AppState {
    allocations: Arc<RwLock<Vec<Allocation>>>,
    config: ViewConfig,
}

impl AppState {
    pub fn new(allocations: Vec<Allocation>, config: ViewConfig) -> Self {
        Self {
            allocations: Arc::new(RwLock::new(allocations)),
            config,
        }
    }

    pub fn with_shared(allocations: Arc<RwLock<Vec<Allocation>>>, config: ViewConfig) -> Self {
        Self {
            allocations,
            config,
        }
    }

    fn allocations(&self) -> Arc<RwLock<Vec<Allocation>>> {
        self.allocations.clone()
    }
}

#[derive(Debug, Serialize)]
struct ErrorBody<'a> {
    error: &'a str,
    message: String,
}

#[derive(Debug)]
enum ApiError {
    Invalid(String),
    Internal(String),
}

impl ApiError {
    fn invalid(message: impl Into<String>) -> Self {
        ApiError::Invalid(message.into())
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(value: serde_json::Error) -> Self {
        ApiError::Internal(value.to_string())
    }
}

impl From<JsonRejection> for ApiError {
    fn from(value: JsonRejection) -> Self {
        ApiError::Invalid(value.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(value: QueryRejection) -> Self {
        ApiError::Invalid(value.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(value: PathRejection) -> Self {
        ApiError::Invalid(value.body_text())
    }
}

impl From<ConfigError> for ApiError {
    fn from(value: ConfigError) -> Self {
        ApiError::Invalid(value.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Invalid(message) => {
                let body = Json(ErrorBody {
                    error: "invalid_request",
                    message,
                });
                (StatusCode::BAD_REQUEST, body).into_response()
            }
            ApiError::Internal(message) => {
                log::error!("internal error: {message}");
                let body = Json(ErrorBody {
                    error: "internal_error",
                    message,
                });
                (StatusCode::INTERNAL_SERVER_ERROR, body).into_response()
            }
        }
    }
}

#[derive(Debug, Deserialize)]
struct DateQuery {
    date: Option<String>,
}

#[derive(Debug, Deserialize)]
struct WeeksQuery {
    now: Option<String>,
    count: Option<i32>,
}

fn date_or_today(raw: Option<&str>) -> Result<NaiveDate, ApiError> {
    match raw {
        Some(raw) => parse_calendar_date(raw).map_err(ApiError::invalid),
        None => Ok(chrono::Local::now().date_naive()),
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/allocations", get(list_allocations).put(replace_allocations))
        .route("/days/:date", get(get_day))
        .route("/calendar", get(get_calendar))
        .route("/calendar/next", get(get_next_month))
        .route("/calendar/prev", get(get_prev_month))
        .route("/weeks", get(get_weeks))
        .with_state(state)
}

pub async fn serve(addr: SocketAddr, state: AppState) -> std::io::Result<()> {
    let app = router(state);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await
}

async fn health() -> impl IntoResponse {
    Json(json!({ "status": "ok" }))
}

async fn list_allocations(State(state): State<AppState>) -> Json<Vec<Allocation>> {
    let allocations = state.allocations();
    let snapshot = {
        let guard = allocations.read();
        guard.clone()
    };
    Json(snapshot)
}

async fn replace_allocations(
    State(state): State<AppState>,
    payload: Result<Json<Vec<Allocation>>, JsonRejection>,
) -> Result<Json<Value>, ApiError> {
    let Json(incoming) = payload?;
    let issues = validate_allocations(&incoming);
    for issue in &issues {
        log::warn!("PUT /allocations: {issue}");
    }
    let count = incoming.len();
    let allocations = state.allocations();
    {
        let mut guard = allocations.write();
        *guard = incoming;
    }
    Ok(Json(json!({ "count": count, "issues": serde_json::to_value(&issues)? })))
}

async fn get_day(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
) -> Result<Json<Value>, ApiError> {
    let Path(raw_date) = path?;
    let date = parse_calendar_date(&raw_date).map_err(ApiError::invalid)?;
    let allocations = state.allocations();
    let body = {
        let guard = allocations.read();
        serde_json::to_value(CalendarDay::build(&guard, date))?
    };
    Ok(Json(body))
}

async fn get_calendar(
    State(state): State<AppState>,
    query: Result<Query<DateQuery>, QueryRejection>,
) -> Result<Json<Value>, ApiError> {
    let Query(query) = query?;
    let reference = date_or_today(query.date.as_deref())?;
    let allocations = state.allocations();
    let body = {
        let guard = allocations.read();
        serde_json::to_value(build_month(&guard, reference))?
    };
    Ok(Json(body))
}

async fn get_next_month(
    query: Result<Query<DateQuery>, QueryRejection>,
) -> Result<Json<Value>, ApiError> {
    let Query(query) = query?;
    let reference = date_or_today(query.date.as_deref())?;
    let shifted = next_month(reference)
        .ok_or_else(|| ApiError::invalid(format!("no month after {reference}")))?;
    Ok(Json(json!({ "date": shifted })))
}

async fn get_prev_month(
    query: Result<Query<DateQuery>, QueryRejection>,
) -> Result<Json<Value>, ApiError> {
    let Query(query) = query?;
    let reference = date_or_today(query.date.as_deref())?;
    let shifted = prev_month(reference)
        .ok_or_else(|| ApiError::invalid(format!("no month before {reference}")))?;
    Ok(Json(json!({ "date": shifted })))
}

async fn get_weeks(
    State(state): State<AppState>,
    query: Result<Query<WeeksQuery>, QueryRejection>,
) -> Result<Json<Value>, ApiError> {
    let Query(query) = query?;
    let now = date_or_today(query.now.as_deref())?;
    let builder = state.config.week_builder(query.count)?;
    let allocations = state.allocations();
    let body = {
        let guard = allocations.read();
        serde_json::to_value(builder.build(&guard, now))?
    };
    Ok(Json(body))
}
