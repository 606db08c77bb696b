mod error;
mod types;

pub use error::{Error, Result};
pub use types::{Backend, Config, Service, Workflow};

use std::{fs, path::Path};

pub fn load(path: &Path) -> Result<Config> {
	let raw = fs::read_to_string(path)
		.map_err(|err| Error::ReadConfig { path: path.to_path_buf(), source: err })?;

	let mut cfg: Config = toml::from_str(&raw)
		.map_err(|err| Error::ParseConfig { path: path.to_path_buf(), source: err })?;

	normalize(&mut cfg);

	validate(&cfg)?;

	Ok(cfg)
}

pub fn validate(cfg: &Config) -> Result<()> {
	if cfg.service.http_bind.trim().is_empty() {
		return Err(Error::Validation {
			message: "service.http_bind must be non-empty.".to_string(),
		});
	}
	if cfg.service.log_level.trim().is_empty() {
		return Err(Error::Validation {
			message: "service.log_level must be non-empty.".to_string(),
		});
	}
	if cfg.backend.api_base.trim().is_empty() {
		return Err(Error::Validation { message: "backend.api_base must be non-empty.".to_string() });
	}

	for (label, path) in [
		("backend.search_path", &cfg.backend.search_path),
		("backend.process_path", &cfg.backend.process_path),
		("backend.topics_path", &cfg.backend.topics_path),
	] {
		if !path.starts_with('/') {
			return Err(Error::Validation { message: format!("{label} must start with '/'.") });
		}
	}

	if cfg.backend.timeout_ms == 0 {
		return Err(Error::Validation {
			message: "backend.timeout_ms must be greater than zero.".to_string(),
		});
	}
	if cfg.backend.process_timeout_ms == 0 {
		return Err(Error::Validation {
			message: "backend.process_timeout_ms must be greater than zero.".to_string(),
		});
	}

	for (key, value) in &cfg.backend.default_headers {
		if !value.is_string() {
			return Err(Error::Validation {
				message: format!("backend.default_headers[{key:?}] must be a string."),
			});
		}
	}

	if cfg.workflow.max_query_chars == 0 {
		return Err(Error::Validation {
			message: "workflow.max_query_chars must be greater than zero.".to_string(),
		});
	}
	if cfg.workflow.max_similar == 0 {
		return Err(Error::Validation {
			message: "workflow.max_similar must be greater than zero.".to_string(),
		});
	}

	Ok(())
}

fn normalize(cfg: &mut Config) {
	while cfg.backend.api_base.ends_with('/') {
		cfg.backend.api_base.pop();
	}
}
