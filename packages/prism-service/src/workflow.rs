//! The resolution state machine: decides, for one submitted query, whether to reuse an
//! already-analyzed topic, ask the user to choose, or start a new analysis run — and
//! guarantees at most one creation request per decision.

use std::sync::Arc;

use prism_domain::{Topic, TopicMatch, TopicSummary};

use crate::{Error, PrismService, Result, SearchRequest};

#[derive(Clone, Debug)]
pub enum ResolutionState {
	Idle,
	Searching,
	AwaitingDecision { exact: Option<TopicMatch>, similar: Vec<TopicMatch> },
	Creating,
	Resolved(Resolution),
	Failed { message: String },
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Resolution {
	pub id: String,
	pub kind: ResolutionKind,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ResolutionKind {
	Reused,
	Created,
	/// Creation succeeded but the detail fetch did not; the topic exists server-side
	/// and its content will load later.
	CreatedDetailUnavailable,
}

#[derive(Debug)]
pub enum SubmitOutcome {
	/// Candidates need a user decision before anything irreversible happens.
	Decision { exact: Option<TopicMatch>, similar: Vec<TopicMatch> },
	/// Nothing matched; a new analysis was started without asking.
	Created(Creation),
}

#[derive(Debug)]
pub enum Creation {
	Complete(Topic),
	DetailUnavailable { id: String, message: String },
}

/// One workflow instance per UI surface. Single-owner: suspension happens only at the
/// three provider-call boundaries, and the state enum itself is the busy-guard that
/// keeps overlapping submissions off the network.
pub struct ResolutionWorkflow {
	service: Arc<PrismService>,
	state: ResolutionState,
	query: String,
	topics: Vec<TopicSummary>,
}

impl ResolutionWorkflow {
	pub fn new(service: Arc<PrismService>) -> Self {
		Self { service, state: ResolutionState::Idle, query: String::new(), topics: Vec::new() }
	}

	pub fn state(&self) -> &ResolutionState {
		&self.state
	}

	/// The last gated query text. Survives failures and dismissals so the caller can
	/// offer a retry without retyping.
	pub fn query(&self) -> &str {
		&self.query
	}

	/// Known topics, most recent first. Freshly created topics are prepended.
	pub fn topics(&self) -> &[TopicSummary] {
		&self.topics
	}

	pub async fn refresh_topics(&mut self) -> Result<()> {
		let mut topics = self.service.list_topics().await?.topics;

		topics.sort_by(|a, b| b.created_at.cmp(&a.created_at));

		self.topics = topics.iter().map(Topic::summary).collect();

		Ok(())
	}

	pub async fn submit(&mut self, raw: &str) -> Result<SubmitOutcome> {
		match self.state {
			ResolutionState::Idle
			| ResolutionState::Resolved(_)
			| ResolutionState::Failed { .. } => {},
			_ =>
				return Err(Error::InvalidTransition {
					message: "A submission is already pending.".to_string(),
				}),
		}

		// Gate failures never reach the network and leave the machine restarted.
		let query = match self.service.gate_query(raw) {
			Ok(query) => query.to_string(),
			Err(err) => {
				self.state = ResolutionState::Idle;

				return Err(err);
			},
		};

		self.query = query;
		self.state = ResolutionState::Searching;

		let response =
			match self.service.search_topic(SearchRequest { query: self.query.clone() }).await {
				Ok(response) => response,
				Err(err) => {
					// Query text stays in place so the caller can retry the submission.
					self.state = ResolutionState::Failed { message: err.to_string() };

					return Err(err);
				},
			};
		let exact = match (response.existing, response.exact_id) {
			(true, Some(id)) => Some(TopicMatch { id, query: self.query.clone() }),
			_ => None,
		};

		if exact.is_some() || !response.similar_topics.is_empty() {
			self.state = ResolutionState::AwaitingDecision {
				exact: exact.clone(),
				similar: response.similar_topics.clone(),
			};

			return Ok(SubmitOutcome::Decision { exact, similar: response.similar_topics });
		}

		// No exact match, no similar topics: nothing to disambiguate, proceed.
		self.state = ResolutionState::Creating;

		self.run_creation().await.map(SubmitOutcome::Created)
	}

	/// Resolves the pending decision to an already-analyzed topic. No network call is
	/// made; the id must be one of the presented candidates.
	pub fn choose_existing(&mut self, id: &str) -> Result<Resolution> {
		let ResolutionState::AwaitingDecision { exact, similar } = &self.state else {
			return Err(Error::InvalidTransition {
				message: "No decision is pending.".to_string(),
			});
		};

		if !exact.iter().chain(similar.iter()).any(|candidate| candidate.id == id) {
			return Err(Error::InvalidTransition {
				message: format!("Topic {id:?} was not among the candidates."),
			});
		}

		let resolution = Resolution { id: id.to_string(), kind: ResolutionKind::Reused };

		self.state = ResolutionState::Resolved(resolution.clone());

		Ok(resolution)
	}

	/// Resolves the pending decision by starting a new analysis run anyway. The first
	/// trigger moves the machine to Creating; re-triggering while the run is in flight
	/// lands on the guard below and never reaches the network a second time.
	pub async fn create_new_anyway(&mut self) -> Result<Creation> {
		if !matches!(self.state, ResolutionState::AwaitingDecision { .. }) {
			return Err(Error::InvalidTransition {
				message: "No decision is pending.".to_string(),
			});
		}

		// Entering Creating drops the candidates; stale ones must never leak into a
		// later decision.
		self.state = ResolutionState::Creating;

		self.run_creation().await
	}

	/// Implicit cancel of a pending decision. Query text is preserved and no side
	/// effect has happened; in any other state this is a no-op.
	pub fn dismiss(&mut self) {
		if matches!(self.state, ResolutionState::AwaitingDecision { .. }) {
			self.state = ResolutionState::Idle;
		}
	}

	async fn run_creation(&mut self) -> Result<Creation> {
		debug_assert!(matches!(self.state, ResolutionState::Creating));

		let id = match self.service.create_topic(&self.query).await {
			Ok(id) => id,
			Err(err) => {
				self.state = ResolutionState::Failed { message: err.to_string() };

				return Err(err);
			},
		};

		match self.service.fetch_topic(&id).await {
			Ok(topic) => {
				self.topics.insert(0, topic.summary());
				self.state = ResolutionState::Resolved(Resolution {
					id: id.clone(),
					kind: ResolutionKind::Created,
				});

				Ok(Creation::Complete(topic))
			},
			Err(err) => {
				// The topic already exists server-side; nothing to roll back. Degraded
				// success, reported distinctly from a hard failure.
				let message = err.to_string();

				tracing::warn!(
					topic_id = %id,
					error = %message,
					"Created a topic but could not load its detail."
				);

				self.topics.insert(0, TopicSummary {
					id: id.clone(),
					query: self.query.clone(),
					item_count: 0,
				});
				self.state = ResolutionState::Resolved(Resolution {
					id: id.clone(),
					kind: ResolutionKind::CreatedDetailUnavailable,
				});

				Ok(Creation::DetailUnavailable { id, message })
			},
		}
	}
}
