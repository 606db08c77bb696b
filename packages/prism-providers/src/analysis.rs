use std::time::Duration;

use reqwest::Client;
use serde_json::Value;

use crate::{Error, Result};

/// Requests a forced-new analysis run for `query` and returns the created topic id.
///
/// Scraping plus classification is slow; the call uses the dedicated process timeout
/// and the caller is expected to stay in its busy state for the whole duration.
pub async fn create_topic(cfg: &prism_config::Backend, query: &str) -> Result<String> {
	let client =
		Client::builder().timeout(Duration::from_millis(cfg.process_timeout_ms)).build()?;
	let url = format!("{}{}", cfg.api_base, cfg.process_path);
	let body = serde_json::json!({ "query": query, "forceNew": true });
	let res = client
		.post(url)
		.headers(crate::default_headers(&cfg.default_headers)?)
		.json(&body)
		.send()
		.await?;
	let json = crate::decode_response(res).await?;

	parse_process_response(json)
}

fn parse_process_response(json: Value) -> Result<String> {
	json.get("query_id")
		.and_then(Value::as_str)
		.filter(|id| !id.trim().is_empty())
		.map(str::to_string)
		.ok_or_else(|| Error::InvalidResponse {
			message: "Process response is missing query_id.".to_string(),
		})
}
