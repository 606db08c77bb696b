use serde::{Deserialize, Serialize};

use crate::{PrismService, Result};

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ProcessRequest {
	pub query: String,
	// Accepted for wire compatibility; only the forced mode exists here, since the
	// resolution workflow has already ruled out reuse by the time it calls this.
	#[serde(default = "default_force_new", rename = "forceNew")]
	pub force_new: bool,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ProcessResponse {
	pub query_id: String,
}

impl PrismService {
	/// Starts a forced-new analysis run and returns the created topic id. Slow: the
	/// backend scrapes and classifies before answering.
	pub async fn create_topic(&self, query: &str) -> Result<String> {
		let query = self.gate_query(query)?;

		tracing::info!(query, "Requesting a new analysis run.");

		Ok(self.providers.analysis.create_topic(&self.cfg.backend, query).await?)
	}

	pub async fn process(&self, req: ProcessRequest) -> Result<ProcessResponse> {
		let query_id = self.create_topic(&req.query).await?;

		Ok(ProcessResponse { query_id })
	}
}

fn default_force_new() -> bool {
	true
}
