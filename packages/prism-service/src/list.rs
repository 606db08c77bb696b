use serde::{Deserialize, Serialize};

use prism_domain::Topic;

use crate::{PrismService, Result};

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ListResponse {
	pub topics: Vec<Topic>,
}

impl PrismService {
	pub async fn list_topics(&self) -> Result<ListResponse> {
		let topics = self.providers.store.fetch_all(&self.cfg.backend).await?;

		Ok(ListResponse { topics })
	}
}
