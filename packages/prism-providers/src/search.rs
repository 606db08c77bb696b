use std::time::Duration;

use reqwest::Client;
use serde_json::Value;

use prism_domain::TopicMatch;

use crate::{Error, Result};

/// What the similarity resolver reported for one query. `similar` is duplicate-free and
/// relevance-ordered by the resolver; it is never re-sorted here.
#[derive(Clone, Debug, Default, serde::Serialize, serde::Deserialize)]
pub struct SearchOutcome {
	pub existing: bool,
	pub exact_id: Option<String>,
	pub similar: Vec<TopicMatch>,
}

pub async fn search_topic(cfg: &prism_config::Backend, query: &str) -> Result<SearchOutcome> {
	let client = Client::builder().timeout(Duration::from_millis(cfg.timeout_ms)).build()?;
	let url = format!("{}{}", cfg.api_base, cfg.search_path);
	let body = serde_json::json!({ "query": query });
	let res = client
		.post(url)
		.headers(crate::default_headers(&cfg.default_headers)?)
		.json(&body)
		.send()
		.await?;
	let json = crate::decode_response(res).await?;

	parse_search_response(json)
}

fn parse_search_response(json: Value) -> Result<SearchOutcome> {
	let existing = json.get("existing").and_then(Value::as_bool).unwrap_or(false);
	let exact_id = json.get("query_id").and_then(Value::as_str).map(str::to_string);

	if existing && exact_id.is_none() {
		return Err(Error::InvalidResponse {
			message: "Search response reports an exact match without a query_id.".to_string(),
		});
	}

	let similar = match json.get("similar_topics") {
		None | Some(Value::Null) => Vec::new(),
		Some(value) => serde_json::from_value(value.clone())?,
	};

	Ok(SearchOutcome { existing, exact_id, similar })
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn parses_exact_match_with_similar_list() {
		let json = serde_json::json!({
			"query_id": "66f0",
			"existing": true,
			"similar_topics": [
				{ "_id": "66f1", "query": "farm bill 2024" },
				{ "_id": "66f2", "query": "farm subsidies" }
			]
		});
		let outcome = parse_search_response(json).expect("parse failed");

		assert!(outcome.existing);
		assert_eq!(outcome.exact_id.as_deref(), Some("66f0"));
		assert_eq!(outcome.similar.len(), 2);
		assert_eq!(outcome.similar[0].id, "66f1");
	}

	#[test]
	fn missing_fields_default_to_no_match() {
		let json = serde_json::json!({ "similar_topics": [] });
		let outcome = parse_search_response(json).expect("parse failed");

		assert!(!outcome.existing);
		assert_eq!(outcome.exact_id, None);
		assert!(outcome.similar.is_empty());
	}

	#[test]
	fn rejects_exact_match_without_id() {
		let json = serde_json::json!({ "existing": true, "similar_topics": [] });

		assert!(parse_search_response(json).is_err());
	}
}
