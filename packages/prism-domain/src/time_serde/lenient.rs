//! Scraped item timestamps arrive in whatever shape the scraper captured; anything
//! that is not RFC 3339 decodes as unset instead of failing the whole Topic.

use serde::{Deserialize as _, Deserializer, Serializer};
use time::{OffsetDateTime, format_description::well_known::Rfc3339};

pub fn serialize<S>(value: &Option<OffsetDateTime>, serializer: S) -> Result<S::Ok, S::Error>
where
	S: Serializer,
{
	crate::time_serde::option::serialize(value, serializer)
}

pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<OffsetDateTime>, D::Error>
where
	D: Deserializer<'de>,
{
	let raw = Option::<String>::deserialize(deserializer)?;

	Ok(raw.and_then(|value| OffsetDateTime::parse(&value, &Rfc3339).ok()))
}
