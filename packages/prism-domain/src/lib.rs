pub mod querygate;
pub mod time_serde;
pub mod topic;

pub use topic::{ContentItem, Leaning, LeaningSummaries, Topic, TopicMatch, TopicSummary};
