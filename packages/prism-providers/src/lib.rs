pub mod analysis;
pub mod search;
pub mod store;

mod error;

pub use error::{Error, Result};
pub use search::SearchOutcome;

use reqwest::{
	StatusCode,
	header::{HeaderMap, HeaderName},
};
use serde_json::{Map, Value};

pub fn default_headers(headers: &Map<String, Value>) -> Result<HeaderMap> {
	let mut out = HeaderMap::new();

	for (key, value) in headers {
		let Some(raw) = value.as_str() else {
			return Err(Error::InvalidConfig {
				message: "Default header values must be strings.".to_string(),
			});
		};

		out.insert(HeaderName::from_bytes(key.as_bytes())?, raw.parse()?);
	}

	Ok(out)
}

// Shared decoding for every backend response: non-2xx or a 2xx payload carrying an
// `error` field signals failure, and the server-reported message wins over a
// status-derived one.
pub(crate) async fn decode_response(res: reqwest::Response) -> Result<Value> {
	let status = res.status();
	let body = res.bytes().await?;
	let json: Option<Value> = serde_json::from_slice(&body).ok();
	let server_message = json
		.as_ref()
		.and_then(|value| value.get("error"))
		.and_then(Value::as_str)
		.map(str::to_string);

	if status == StatusCode::NOT_FOUND {
		return Err(Error::NotFound {
			message: server_message.unwrap_or_else(|| "Not found.".to_string()),
		});
	}
	if !status.is_success() {
		return Err(Error::Backend {
			message: server_message.unwrap_or_else(|| format!("Backend returned status {status}.")),
		});
	}
	if let Some(message) = server_message {
		return Err(Error::Backend { message });
	}

	json.ok_or_else(|| Error::InvalidResponse {
		message: "Response body is not JSON.".to_string(),
	})
}
