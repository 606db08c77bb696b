use serde::{Deserialize, Serialize};

use prism_domain::{TopicMatch, querygate};

use crate::{PrismService, Result};

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SearchRequest {
	pub query: String,
}

/// Wire-shaped resolver verdict: `query_id` is present exactly when an already-analyzed
/// topic matches the query text, `similar_topics` is the resolver's ranked list.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SearchResponse {
	#[serde(default, rename = "query_id", skip_serializing_if = "Option::is_none")]
	pub exact_id: Option<String>,
	#[serde(default)]
	pub existing: bool,
	#[serde(default)]
	pub similar_topics: Vec<TopicMatch>,
}

impl PrismService {
	pub async fn search_topic(&self, req: SearchRequest) -> Result<SearchResponse> {
		let query = self.gate_query(&req.query)?;
		let outcome = self.providers.similarity.search(&self.cfg.backend, query).await?;
		let mut similar = outcome.similar;

		// Display cap only; the resolver already ranks and truncates on its side.
		similar.truncate(self.cfg.workflow.max_similar as usize);

		// The resolver matches on the backend's normalized storage key; logging the same
		// key keeps the two sides comparable when a match looks wrong.
		tracing::debug!(
			key = %querygate::normalize_key(query),
			existing = outcome.existing,
			similar = similar.len(),
			"Similarity search completed."
		);

		Ok(SearchResponse {
			exact_id: outcome.exact_id,
			existing: outcome.existing,
			similar_topics: similar,
		})
	}
}
