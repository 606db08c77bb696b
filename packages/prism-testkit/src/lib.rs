//! In-process stand-in for the analysis backend. Serves the same wire contract on a
//! loopback port with scriptable responses and per-endpoint call counters, so tests
//! need no external services.

use std::{
	future::IntoFuture,
	sync::{
		Arc, Mutex,
		atomic::{AtomicUsize, Ordering},
	},
	time::Duration,
};

use axum::{
	Json, Router,
	extract::{Path, State},
	http::StatusCode,
	response::{IntoResponse, Response},
	routing::{get, post},
};
use serde_json::{Value, json};
use tokio::{net::TcpListener, sync::oneshot};

#[derive(Clone, Debug)]
pub enum ProcessScript {
	Created { query_id: String },
	Fail { status: u16, message: String },
	Slow { delay_ms: u64, query_id: String },
}
impl Default for ProcessScript {
	fn default() -> Self {
		Self::Created { query_id: "stub-topic".to_string() }
	}
}

pub struct StubState {
	search_response: Mutex<Value>,
	process_script: Mutex<ProcessScript>,
	topics: Mutex<Vec<Value>>,
	search_calls: AtomicUsize,
	process_calls: AtomicUsize,
	topic_fetches: AtomicUsize,
}
impl Default for StubState {
	fn default() -> Self {
		Self {
			search_response: Mutex::new(json!({ "similar_topics": [] })),
			process_script: Mutex::new(ProcessScript::default()),
			topics: Mutex::new(Vec::new()),
			search_calls: AtomicUsize::new(0),
			process_calls: AtomicUsize::new(0),
			topic_fetches: AtomicUsize::new(0),
		}
	}
}

pub struct StubBackend {
	base_url: String,
	state: Arc<StubState>,
	shutdown: Option<oneshot::Sender<()>>,
}
impl StubBackend {
	pub async fn start() -> Self {
		let state = Arc::new(StubState::default());
		let app = Router::new()
			.route("/api/search-topic", post(search_topic))
			.route("/api/process", post(process))
			.route("/api/topics", get(topics))
			.route("/api/topics/{id}", get(topic))
			.with_state(state.clone());
		let listener =
			TcpListener::bind("127.0.0.1:0").await.expect("Failed to bind stub backend.");
		let addr = listener.local_addr().expect("Failed to read stub backend address.");
		let (tx, rx) = oneshot::channel();
		let server = axum::serve(listener, app).with_graceful_shutdown(async move {
			let _ = rx.await;
		});

		tokio::spawn(async move {
			let _ = server.into_future().await;
		});

		Self { base_url: format!("http://{addr}"), state, shutdown: Some(tx) }
	}

	pub fn base_url(&self) -> &str {
		&self.base_url
	}

	pub fn set_search_response(&self, value: Value) {
		*self.state.search_response.lock().unwrap_or_else(|err| err.into_inner()) = value;
	}

	pub fn set_process_script(&self, script: ProcessScript) {
		*self.state.process_script.lock().unwrap_or_else(|err| err.into_inner()) = script;
	}

	pub fn put_topic(&self, value: Value) {
		self.state.topics.lock().unwrap_or_else(|err| err.into_inner()).push(value);
	}

	pub fn search_calls(&self) -> usize {
		self.state.search_calls.load(Ordering::SeqCst)
	}

	pub fn process_calls(&self) -> usize {
		self.state.process_calls.load(Ordering::SeqCst)
	}

	pub fn topic_fetches(&self) -> usize {
		self.state.topic_fetches.load(Ordering::SeqCst)
	}
}
impl Drop for StubBackend {
	fn drop(&mut self) {
		if let Some(tx) = self.shutdown.take() {
			let _ = tx.send(());
		}
	}
}

/// A config pointing every client at the stub, with timeouts short enough for tests.
pub fn test_config(api_base: &str) -> prism_config::Config {
	prism_config::Config {
		service: prism_config::Service {
			http_bind: "127.0.0.1:0".to_string(),
			log_level: "info".to_string(),
			bind_localhost_only: true,
		},
		backend: prism_config::Backend {
			api_base: api_base.trim_end_matches('/').to_string(),
			search_path: "/api/search-topic".to_string(),
			process_path: "/api/process".to_string(),
			topics_path: "/api/topics".to_string(),
			timeout_ms: 2_000,
			process_timeout_ms: 2_000,
			default_headers: serde_json::Map::new(),
		},
		workflow: prism_config::Workflow { max_query_chars: 200, max_similar: 5 },
	}
}

fn missing_query(payload: &Value) -> bool {
	!payload.get("query").and_then(Value::as_str).is_some_and(|query| !query.is_empty())
}

async fn search_topic(State(state): State<Arc<StubState>>, Json(payload): Json<Value>) -> Response {
	state.search_calls.fetch_add(1, Ordering::SeqCst);

	if missing_query(&payload) {
		return (StatusCode::BAD_REQUEST, Json(json!({ "error": "No query provided" })))
			.into_response();
	}

	let body = state.search_response.lock().unwrap_or_else(|err| err.into_inner()).clone();

	Json(body).into_response()
}

async fn process(State(state): State<Arc<StubState>>, Json(payload): Json<Value>) -> Response {
	state.process_calls.fetch_add(1, Ordering::SeqCst);

	if missing_query(&payload) {
		return (StatusCode::BAD_REQUEST, Json(json!({ "error": "No query provided" })))
			.into_response();
	}

	let script = state.process_script.lock().unwrap_or_else(|err| err.into_inner()).clone();

	match script {
		ProcessScript::Created { query_id } =>
			Json(json!({ "query_id": query_id, "existing": false })).into_response(),
		ProcessScript::Fail { status, message } => (
			StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
			Json(json!({ "error": message })),
		)
			.into_response(),
		ProcessScript::Slow { delay_ms, query_id } => {
			tokio::time::sleep(Duration::from_millis(delay_ms)).await;

			Json(json!({ "query_id": query_id, "existing": false })).into_response()
		},
	}
}

async fn topics(State(state): State<Arc<StubState>>) -> Response {
	let topics = state.topics.lock().unwrap_or_else(|err| err.into_inner()).clone();

	Json(json!({ "topics": topics })).into_response()
}

async fn topic(State(state): State<Arc<StubState>>, Path(id): Path<String>) -> Response {
	state.topic_fetches.fetch_add(1, Ordering::SeqCst);

	let topics = state.topics.lock().unwrap_or_else(|err| err.into_inner()).clone();
	let found = topics
		.iter()
		.find(|topic| topic.get("_id").and_then(Value::as_str) == Some(id.as_str()))
		.cloned();

	match found {
		Some(topic) => Json(json!({ "topic": topic })).into_response(),
		None =>
			(StatusCode::NOT_FOUND, Json(json!({ "error": "Topic not found" }))).into_response(),
	}
}
