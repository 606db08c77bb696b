use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Serialize;
use serde_json::Value;

use prism_service::{
	Error as ServiceError, ListResponse, ProcessRequest, ProcessResponse, SearchRequest,
	SearchResponse, TopicResponse,
};

use crate::state::AppState;

pub fn router(state: AppState) -> Router {
	Router::new()
		.route("/health", get(health))
		.route("/search-topic", post(search_topic))
		.route("/process", post(process))
		.route("/topics", get(topics))
		.route("/topics/{id}", get(topic))
		.with_state(state)
}

async fn health() -> StatusCode {
	StatusCode::OK
}

async fn search_topic(
	State(state): State<AppState>,
	Json(payload): Json<Value>,
) -> Result<Json<SearchResponse>, ApiError> {
	let query = required_query(&payload)?;
	let response = state.service.search_topic(SearchRequest { query }).await?;

	Ok(Json(response))
}

async fn process(
	State(state): State<AppState>,
	Json(payload): Json<Value>,
) -> Result<Json<ProcessResponse>, ApiError> {
	let query = required_query(&payload)?;
	let response =
		state.service.process(ProcessRequest { query, force_new: true }).await?;

	Ok(Json(response))
}

async fn topics(State(state): State<AppState>) -> Result<Json<ListResponse>, ApiError> {
	let response = state.service.list_topics().await?;

	Ok(Json(response))
}

async fn topic(
	State(state): State<AppState>,
	Path(id): Path<String>,
) -> Result<Json<TopicResponse>, ApiError> {
	let topic = state.service.fetch_topic(&id).await?;

	Ok(Json(TopicResponse { topic }))
}

fn required_query(payload: &Value) -> Result<String, ApiError> {
	payload
		.get("query")
		.and_then(Value::as_str)
		.map(str::to_string)
		.ok_or_else(|| ApiError::new(StatusCode::BAD_REQUEST, "No query provided"))
}

#[derive(Debug, Serialize)]
struct ErrorBody {
	error: String,
}

#[derive(Debug)]
pub struct ApiError {
	status: StatusCode,
	message: String,
}

impl ApiError {
	fn new(status: StatusCode, message: impl Into<String>) -> Self {
		Self { status, message: message.into() }
	}
}

impl From<ServiceError> for ApiError {
	fn from(err: ServiceError) -> Self {
		match err {
			ServiceError::InvalidQuery { message } =>
				Self::new(StatusCode::BAD_REQUEST, message),
			ServiceError::NotFound { message } => Self::new(StatusCode::NOT_FOUND, message),
			ServiceError::InvalidTransition { message } =>
				Self::new(StatusCode::CONFLICT, message),
			ServiceError::Provider { message } =>
				Self::new(StatusCode::INTERNAL_SERVER_ERROR, message),
		}
	}
}

impl IntoResponse for ApiError {
	fn into_response(self) -> Response {
		(self.status, Json(ErrorBody { error: self.message })).into_response()
	}
}
