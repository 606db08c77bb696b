pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("Invalid query: {message}")]
	InvalidQuery { message: String },
	#[error("Not found: {message}")]
	NotFound { message: String },
	#[error("Invalid transition: {message}")]
	InvalidTransition { message: String },
	// Displays the upstream message alone; server-reported errors pass through verbatim.
	#[error("{message}")]
	Provider { message: String },
}
impl From<prism_providers::Error> for Error {
	fn from(err: prism_providers::Error) -> Self {
		match err {
			prism_providers::Error::NotFound { message } => Self::NotFound { message },
			prism_providers::Error::Backend { message } => Self::Provider { message },
			other => Self::Provider { message: other.to_string() },
		}
	}
}
