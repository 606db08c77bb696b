// The topic store lives behind the backend; both reads are plain GETs and all writes
// happen inside the analysis pipeline.

use std::time::Duration;

use reqwest::Client;
use serde_json::Value;

use prism_domain::Topic;

use crate::{Error, Result};

pub async fn fetch_topics(cfg: &prism_config::Backend) -> Result<Vec<Topic>> {
	let client = Client::builder().timeout(Duration::from_millis(cfg.timeout_ms)).build()?;
	let url = format!("{}{}", cfg.api_base, cfg.topics_path);
	let res =
		client.get(url).headers(crate::default_headers(&cfg.default_headers)?).send().await?;
	let json = crate::decode_response(res).await?;

	parse_topics_response(json)
}

pub async fn fetch_topic(cfg: &prism_config::Backend, id: &str) -> Result<Topic> {
	let client = Client::builder().timeout(Duration::from_millis(cfg.timeout_ms)).build()?;
	let url = format!("{}{}/{}", cfg.api_base, cfg.topics_path, id);
	let res =
		client.get(url).headers(crate::default_headers(&cfg.default_headers)?).send().await?;
	let json = crate::decode_response(res).await?;

	parse_topic_response(json)
}

fn parse_topics_response(json: Value) -> Result<Vec<Topic>> {
	let topics = json.get("topics").cloned().ok_or_else(|| Error::InvalidResponse {
		message: "Topics response is missing the topics array.".to_string(),
	})?;

	Ok(serde_json::from_value(topics)?)
}

fn parse_topic_response(json: Value) -> Result<Topic> {
	let topic = json.get("topic").cloned().ok_or_else(|| Error::InvalidResponse {
		message: "Topic response is missing the topic object.".to_string(),
	})?;

	Ok(serde_json::from_value(topic)?)
}
