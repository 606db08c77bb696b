use axum::{
	body::{self, Body},
	http::{Request, StatusCode},
};
use serde_json::{Value, json};
use tower::util::ServiceExt;

use prism_api::{routes, state::AppState};
use prism_testkit::{ProcessScript, StubBackend};

async fn app_for(stub: &StubBackend) -> axum::Router {
	let config = prism_testkit::test_config(stub.base_url());

	routes::router(AppState::new(config))
}

async fn read_json(response: axum::response::Response) -> Value {
	let bytes = body::to_bytes(response.into_body(), usize::MAX)
		.await
		.expect("Failed to read response body.");

	serde_json::from_slice(&bytes).expect("Failed to parse response body.")
}

fn post_json(uri: &str, payload: Value) -> Request<Body> {
	Request::builder()
		.method("POST")
		.uri(uri)
		.header("content-type", "application/json")
		.body(Body::from(payload.to_string()))
		.expect("Failed to build request.")
}

fn get(uri: &str) -> Request<Body> {
	Request::builder().uri(uri).body(Body::empty()).expect("Failed to build request.")
}

#[tokio::test]
async fn health_ok() {
	let stub = StubBackend::start().await;
	let response =
		app_for(&stub).await.oneshot(get("/health")).await.expect("Failed to call /health.");

	assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn search_topic_requires_a_query() {
	let stub = StubBackend::start().await;
	let response = app_for(&stub)
		.await
		.oneshot(post_json("/search-topic", json!({})))
		.await
		.expect("Failed to call /search-topic.");

	assert_eq!(response.status(), StatusCode::BAD_REQUEST);

	let body = read_json(response).await;

	assert_eq!(body["error"], "No query provided");
	assert_eq!(stub.search_calls(), 0);
}

#[tokio::test]
async fn whitespace_query_is_rejected_locally() {
	let stub = StubBackend::start().await;
	let response = app_for(&stub)
		.await
		.oneshot(post_json("/search-topic", json!({ "query": "   " })))
		.await
		.expect("Failed to call /search-topic.");

	assert_eq!(response.status(), StatusCode::BAD_REQUEST);
	assert_eq!(stub.search_calls(), 0);
}

#[tokio::test]
async fn search_topic_passes_resolver_results_through() {
	let stub = StubBackend::start().await;

	stub.set_search_response(json!({
		"query_id": "66f0",
		"existing": true,
		"similar_topics": [{ "_id": "66f1", "query": "brexit deal" }]
	}));

	let response = app_for(&stub)
		.await
		.oneshot(post_json("/search-topic", json!({ "query": "brexit" })))
		.await
		.expect("Failed to call /search-topic.");

	assert_eq!(response.status(), StatusCode::OK);

	let body = read_json(response).await;

	assert_eq!(body["query_id"], "66f0");
	assert_eq!(body["existing"], true);
	assert_eq!(body["similar_topics"][0]["_id"], "66f1");
}

#[tokio::test]
async fn process_returns_the_created_id() {
	let stub = StubBackend::start().await;

	stub.set_process_script(ProcessScript::Created { query_id: "66f9".to_string() });

	let response = app_for(&stub)
		.await
		.oneshot(post_json("/process", json!({ "query": "farm bill", "forceNew": true })))
		.await
		.expect("Failed to call /process.");

	assert_eq!(response.status(), StatusCode::OK);

	let body = read_json(response).await;

	assert_eq!(body["query_id"], "66f9");
	assert_eq!(stub.process_calls(), 1);
}

#[tokio::test]
async fn process_surfaces_the_backend_error() {
	let stub = StubBackend::start().await;

	stub.set_process_script(ProcessScript::Fail {
		status: 500,
		message: "quota exceeded".to_string(),
	});

	let response = app_for(&stub)
		.await
		.oneshot(post_json("/process", json!({ "query": "farm bill" })))
		.await
		.expect("Failed to call /process.");

	assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

	let body = read_json(response).await;

	assert_eq!(body["error"], "quota exceeded");
}

#[tokio::test]
async fn topics_round_trip_through_the_store() {
	let stub = StubBackend::start().await;

	stub.put_topic(json!({
		"_id": "66f0",
		"query": "brexit",
		"created_at": "2024-10-02T08:30:00Z",
		"tweets": [{ "Content": "post", "leaning": "right" }]
	}));

	let response =
		app_for(&stub).await.oneshot(get("/topics")).await.expect("Failed to call /topics.");

	assert_eq!(response.status(), StatusCode::OK);

	let body = read_json(response).await;

	assert_eq!(body["topics"][0]["_id"], "66f0");
	assert_eq!(body["topics"][0]["tweets"][0]["leaning"], "right");

	let response = app_for(&stub)
		.await
		.oneshot(get("/topics/66f0"))
		.await
		.expect("Failed to call /topics/66f0.");

	assert_eq!(response.status(), StatusCode::OK);

	let body = read_json(response).await;

	assert_eq!(body["topic"]["query"], "brexit");
}

#[tokio::test]
async fn unknown_topic_is_a_404_with_an_error_body() {
	let stub = StubBackend::start().await;
	let response = app_for(&stub)
		.await
		.oneshot(get("/topics/missing"))
		.await
		.expect("Failed to call /topics/missing.");

	assert_eq!(response.status(), StatusCode::NOT_FOUND);

	let body = read_json(response).await;

	assert_eq!(body["error"], "Topic not found");
}
