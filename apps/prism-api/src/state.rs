use std::sync::Arc;

use prism_service::PrismService;

// Clients are built here, once, at process startup; nothing module-level or implicit.
#[derive(Clone)]
pub struct AppState {
	pub service: Arc<PrismService>,
}
impl AppState {
	pub fn new(config: prism_config::Config) -> Self {
		Self { service: Arc::new(PrismService::new(config)) }
	}

	pub fn with_service(service: Arc<PrismService>) -> Self {
		Self { service }
	}
}
