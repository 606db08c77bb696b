use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use time::OffsetDateTime;

/// One stored analyzed query with its classified items and per-leaning summaries.
///
/// Created only by the analysis pipeline; read-only everywhere else. Wire field names
/// are the store's legacy names.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Topic {
	#[serde(rename = "_id")]
	pub id: String,
	pub query: String,
	#[serde(with = "crate::time_serde")]
	pub created_at: OffsetDateTime,
	#[serde(default, rename = "tweets")]
	pub items: Vec<ContentItem>,
	#[serde(default, rename = "ideological_summaries")]
	pub summaries: LeaningSummaries,
}
impl Topic {
	pub fn summary(&self) -> TopicSummary {
		TopicSummary {
			id: self.id.clone(),
			query: self.query.clone(),
			item_count: self.items.len(),
		}
	}
}

/// One classified social post. The capitalized wire names come from the scraper's CSV
/// columns and are preserved in the store verbatim.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ContentItem {
	#[serde(default, rename = "Name")]
	pub author: String,
	#[serde(default, rename = "Handle")]
	pub handle: String,
	#[serde(default, rename = "Timestamp", with = "crate::time_serde::lenient")]
	pub timestamp: Option<OffsetDateTime>,
	#[serde(default, rename = "Verified")]
	pub verified: bool,
	#[serde(default, rename = "Content")]
	pub content: String,
	#[serde(
		default = "zero_count",
		rename = "Comments",
		deserialize_with = "display_count"
	)]
	pub comments: String,
	#[serde(
		default = "zero_count",
		rename = "Retweets",
		deserialize_with = "display_count"
	)]
	pub retweets: String,
	#[serde(default = "zero_count", rename = "Likes", deserialize_with = "display_count")]
	pub likes: String,
	#[serde(
		default = "zero_count",
		rename = "Analytics",
		deserialize_with = "display_count"
	)]
	pub analytics: String,
	#[serde(default, rename = "Tags")]
	pub tags: Vec<String>,
	#[serde(default, rename = "Mentions")]
	pub mentions: Vec<String>,
	#[serde(default, rename = "Emojis")]
	pub emojis: Vec<String>,
	#[serde(default, rename = "Profile Image")]
	pub profile_image: String,
	#[serde(default, rename = "Tweet Link")]
	pub link: String,
	#[serde(default, rename = "Tweet ID")]
	pub source_id: String,
	#[serde(default, deserialize_with = "lenient_leaning")]
	pub leaning: Option<Leaning>,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Leaning {
	Left,
	Centre,
	Right,
}
impl Leaning {
	pub const ALL: [Self; 3] = [Self::Left, Self::Centre, Self::Right];

	pub fn label(self) -> &'static str {
		match self {
			Self::Left => "left",
			Self::Centre => "centre",
			Self::Right => "right",
		}
	}

	pub fn parse(raw: &str) -> Option<Self> {
		match raw.trim().to_lowercase().as_str() {
			"left" => Some(Self::Left),
			// The classifier emits British spelling; tolerate the other one.
			"centre" | "center" => Some(Self::Centre),
			"right" => Some(Self::Right),
			_ => None,
		}
	}
}

/// Per-leaning synopses. Any subset may be present while processing is pending; the
/// struct shape keeps the key set closed.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct LeaningSummaries {
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub left: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub centre: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub right: Option<String>,
}
impl LeaningSummaries {
	pub fn get(&self, leaning: Leaning) -> Option<&str> {
		match leaning {
			Leaning::Left => self.left.as_deref(),
			Leaning::Centre => self.centre.as_deref(),
			Leaning::Right => self.right.as_deref(),
		}
	}

	pub fn is_empty(&self) -> bool {
		self.left.is_none() && self.centre.is_none() && self.right.is_none()
	}
}

/// List-view projection of a [`Topic`].
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TopicSummary {
	#[serde(rename = "_id")]
	pub id: String,
	pub query: String,
	pub item_count: usize,
}

/// A resolver candidate: an already-analyzed topic judged related to a submitted query.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct TopicMatch {
	#[serde(rename = "_id")]
	pub id: String,
	pub query: String,
}

fn zero_count() -> String {
	"0".to_string()
}

// Engagement counters are display strings, not guaranteed numeric; the store holds
// whatever the scraper captured and some writers re-encode them as numbers.
fn display_count<'de, D>(deserializer: D) -> Result<String, D::Error>
where
	D: Deserializer<'de>,
{
	let value = Option::<Value>::deserialize(deserializer)?;

	Ok(match value {
		Some(Value::String(text)) => text,
		Some(Value::Number(number)) => number.to_string(),
		_ => zero_count(),
	})
}

fn lenient_leaning<'de, D>(deserializer: D) -> Result<Option<Leaning>, D::Error>
where
	D: Deserializer<'de>,
{
	let raw = Option::<String>::deserialize(deserializer)?;

	Ok(raw.as_deref().and_then(Leaning::parse))
}
