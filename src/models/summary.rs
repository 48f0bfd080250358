use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::batch::ClassifiedBatch;

/// How a single key ended up.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum KeyStatus {
    /// At least one URL was appended to a sink.
    Written {
        content: usize,
        directory: usize,
        image_novel: usize,
    },
    /// The response held nothing worth keeping.
    Empty,
    /// The fetch (or a strict parse) failed; the key was skipped.
    Skipped { reason: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyOutcome {
    pub key: String,
    #[serde(flatten)]
    pub status: KeyStatus,
    pub discarded: usize,
}

impl KeyOutcome {
    pub fn written(key: &str, batch: &ClassifiedBatch, discarded: usize) -> Self {
        Self {
            key: key.to_string(),
            status: KeyStatus::Written {
                content: batch.content.len(),
                directory: batch.directory.len(),
                image_novel: batch.image_novel.len(),
            },
            discarded,
        }
    }

    pub fn empty(key: &str, discarded: usize) -> Self {
        Self {
            key: key.to_string(),
            status: KeyStatus::Empty,
            discarded,
        }
    }

    pub fn skipped(key: &str, reason: impl Into<String>) -> Self {
        Self {
            key: key.to_string(),
            status: KeyStatus::Skipped {
                reason: reason.into(),
            },
            discarded: 0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunSummary {
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub outcomes: Vec<KeyOutcome>,
}

impl RunSummary {
    pub fn keys_processed(&self) -> usize {
        self.outcomes.len()
    }

    pub fn keys_written(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| matches!(o.status, KeyStatus::Written { .. }))
            .count()
    }

    pub fn keys_skipped(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| matches!(o.status, KeyStatus::Skipped { .. }))
            .count()
    }

    pub fn urls_written(&self) -> usize {
        self.outcomes
            .iter()
            .map(|o| match o.status {
                KeyStatus::Written {
                    content,
                    directory,
                    image_novel,
                } => content + directory + image_novel,
                _ => 0,
            })
            .sum()
    }
}
