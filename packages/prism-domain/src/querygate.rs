#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectCode {
	RejectEmpty,
	RejectTooLong,
}

/// Local gate in front of the similarity resolver: rejected queries never reach the
/// network.
pub fn querygate<'a>(raw: &'a str, cfg: &prism_config::Config) -> Result<&'a str, RejectCode> {
	let query = raw.trim();

	if query.is_empty() {
		return Err(RejectCode::RejectEmpty);
	}
	if query.chars().count() as u32 > cfg.workflow.max_query_chars {
		return Err(RejectCode::RejectTooLong);
	}

	Ok(query)
}

/// The backend's storage-key normalization. Exact-match detection compares normalized
/// keys, so diagnostics on this side must agree with it character for character.
pub fn normalize_key(query: &str) -> String {
	query.trim().to_lowercase().replace(' ', "_").replace(['(', ')'], "")
}

#[cfg(test)]
mod tests {
	use super::*;

	fn config() -> prism_config::Config {
		prism_config::Config {
			service: prism_config::Service {
				http_bind: "127.0.0.1:8080".to_string(),
				log_level: "info".to_string(),
				bind_localhost_only: true,
			},
			backend: prism_config::Backend {
				api_base: "http://127.0.0.1:5500".to_string(),
				search_path: "/api/search-topic".to_string(),
				process_path: "/api/process".to_string(),
				topics_path: "/api/topics".to_string(),
				timeout_ms: 1_000,
				process_timeout_ms: 1_000,
				default_headers: serde_json::Map::new(),
			},
			workflow: prism_config::Workflow { max_query_chars: 10, max_similar: 5 },
		}
	}

	#[test]
	fn rejects_empty_query() {
		let cfg = config();

		assert_eq!(querygate("", &cfg), Err(RejectCode::RejectEmpty));
	}

	#[test]
	fn rejects_whitespace_only_query() {
		let cfg = config();

		assert_eq!(querygate("   \t ", &cfg), Err(RejectCode::RejectEmpty));
	}

	#[test]
	fn rejects_over_length_query() {
		let cfg = config();

		assert_eq!(querygate("12345678901", &cfg), Err(RejectCode::RejectTooLong));
	}

	#[test]
	fn trims_accepted_query() {
		let cfg = config();

		assert_eq!(querygate("  farm bill ", &cfg), Ok("farm bill"));
	}

	#[test]
	fn normalizes_storage_keys_like_the_backend() {
		assert_eq!(normalize_key(" Climate Change (2024) "), "climate_change_2024");
		assert_eq!(normalize_key("brexit"), "brexit");
	}
}
