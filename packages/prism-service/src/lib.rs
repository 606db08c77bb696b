pub mod create;
pub mod fetch;
pub mod list;
pub mod search;
pub mod workflow;

mod error;

pub use error::{Error, Result};

pub use create::{ProcessRequest, ProcessResponse};
pub use fetch::TopicResponse;
pub use list::ListResponse;
pub use search::{SearchRequest, SearchResponse};
pub use workflow::{
	Creation, Resolution, ResolutionKind, ResolutionState, ResolutionWorkflow, SubmitOutcome,
};

use std::{future::Future, pin::Pin, sync::Arc};

use prism_config::{Backend, Config};
use prism_domain::{Topic, querygate};
use prism_providers::{SearchOutcome, analysis, search as search_client, store};

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

pub trait SimilarityProvider
where
	Self: Send + Sync,
{
	fn search<'a>(
		&'a self,
		cfg: &'a Backend,
		query: &'a str,
	) -> BoxFuture<'a, prism_providers::Result<SearchOutcome>>;
}

pub trait AnalysisProvider
where
	Self: Send + Sync,
{
	fn create_topic<'a>(
		&'a self,
		cfg: &'a Backend,
		query: &'a str,
	) -> BoxFuture<'a, prism_providers::Result<String>>;
}

pub trait StoreProvider
where
	Self: Send + Sync,
{
	fn fetch_all<'a>(&'a self, cfg: &'a Backend)
	-> BoxFuture<'a, prism_providers::Result<Vec<Topic>>>;

	fn fetch<'a>(
		&'a self,
		cfg: &'a Backend,
		id: &'a str,
	) -> BoxFuture<'a, prism_providers::Result<Topic>>;
}

#[derive(Clone)]
pub struct Providers {
	pub similarity: Arc<dyn SimilarityProvider>,
	pub analysis: Arc<dyn AnalysisProvider>,
	pub store: Arc<dyn StoreProvider>,
}

pub struct PrismService {
	pub cfg: Config,
	pub providers: Providers,
}

struct DefaultProviders;

impl SimilarityProvider for DefaultProviders {
	fn search<'a>(
		&'a self,
		cfg: &'a Backend,
		query: &'a str,
	) -> BoxFuture<'a, prism_providers::Result<SearchOutcome>> {
		Box::pin(search_client::search_topic(cfg, query))
	}
}

impl AnalysisProvider for DefaultProviders {
	fn create_topic<'a>(
		&'a self,
		cfg: &'a Backend,
		query: &'a str,
	) -> BoxFuture<'a, prism_providers::Result<String>> {
		Box::pin(analysis::create_topic(cfg, query))
	}
}

impl StoreProvider for DefaultProviders {
	fn fetch_all<'a>(
		&'a self,
		cfg: &'a Backend,
	) -> BoxFuture<'a, prism_providers::Result<Vec<Topic>>> {
		Box::pin(store::fetch_topics(cfg))
	}

	fn fetch<'a>(
		&'a self,
		cfg: &'a Backend,
		id: &'a str,
	) -> BoxFuture<'a, prism_providers::Result<Topic>> {
		Box::pin(store::fetch_topic(cfg, id))
	}
}

impl Providers {
	pub fn new(
		similarity: Arc<dyn SimilarityProvider>,
		analysis: Arc<dyn AnalysisProvider>,
		store: Arc<dyn StoreProvider>,
	) -> Self {
		Self { similarity, analysis, store }
	}
}

impl Default for Providers {
	fn default() -> Self {
		let provider = Arc::new(DefaultProviders);

		Self { similarity: provider.clone(), analysis: provider.clone(), store: provider }
	}
}

impl PrismService {
	pub fn new(cfg: Config) -> Self {
		Self { cfg, providers: Providers::default() }
	}

	pub fn with_providers(cfg: Config, providers: Providers) -> Self {
		Self { cfg, providers }
	}

	pub(crate) fn gate_query<'a>(&self, raw: &'a str) -> Result<&'a str> {
		querygate::querygate(raw, &self.cfg).map_err(|code| Error::InvalidQuery {
			message: match code {
				querygate::RejectCode::RejectEmpty => "Query must be non-empty.".to_string(),
				querygate::RejectCode::RejectTooLong => format!(
					"Query exceeds {} characters.",
					self.cfg.workflow.max_query_chars
				),
			},
		})
	}
}
