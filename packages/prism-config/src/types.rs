use serde::Deserialize;
use serde_json::{Map, Value};

#[derive(Debug, Deserialize)]
pub struct Config {
	pub service: Service,
	pub backend: Backend,
	pub workflow: Workflow,
}

#[derive(Debug, Deserialize)]
pub struct Service {
	pub http_bind: String,
	pub log_level: String,
	pub bind_localhost_only: bool,
}

#[derive(Debug, Deserialize)]
pub struct Backend {
	pub api_base: String,
	#[serde(default = "default_search_path")]
	pub search_path: String,
	#[serde(default = "default_process_path")]
	pub process_path: String,
	#[serde(default = "default_topics_path")]
	pub topics_path: String,
	/// Applied to searches and store reads.
	pub timeout_ms: u64,
	/// Applied to analysis runs; scraping plus classification takes minutes, not seconds.
	pub process_timeout_ms: u64,
	#[serde(default)]
	pub default_headers: Map<String, Value>,
}

#[derive(Debug, Deserialize)]
pub struct Workflow {
	pub max_query_chars: u32,
	pub max_similar: u32,
}

fn default_search_path() -> String {
	"/api/search-topic".to_string()
}

fn default_process_path() -> String {
	"/api/process".to_string()
}

fn default_topics_path() -> String {
	"/api/topics".to_string()
}
