use serde::{Deserialize, Serialize};

use prism_domain::Topic;

use crate::{Error, PrismService, Result};

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TopicResponse {
	pub topic: Topic,
}

impl PrismService {
	pub async fn fetch_topic(&self, id: &str) -> Result<Topic> {
		let id = id.trim();

		if id.is_empty() {
			return Err(Error::InvalidQuery { message: "Topic id must be non-empty.".to_string() });
		}

		Ok(self.providers.store.fetch(&self.cfg.backend, id).await?)
	}
}
