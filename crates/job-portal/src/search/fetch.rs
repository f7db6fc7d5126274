use std::fmt::Display;

use serde_json::Value;

use crate::listings::JobPosting;

/// Lifecycle of the `/all-jobs` download that feeds the browse view.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum FetchState {
    #[default]
    Loading,
    Ready(Vec<Option<JobPosting>>),
    /// The feed could not be fetched; the view shows an empty list and is not retried.
    Failed { reason: String },
}

impl FetchState {
    /// Decode a feed payload. Non-array payloads yield an empty feed. Object entries
    /// decode leniently into postings; null and non-object entries are kept as `None`
    /// and dropped by the pipeline.
    pub fn from_payload(payload: Value) -> Self {
        match payload {
            Value::Array(entries) => Self::Ready(entries.into_iter().map(decode_entry).collect()),
            _ => Self::Ready(Vec::new()),
        }
    }

    pub fn from_result<E: Display>(result: Result<Value, E>) -> Self {
        match result {
            Ok(payload) => Self::from_payload(payload),
            Err(err) => Self::Failed {
                reason: err.to_string(),
            },
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    pub fn failure(&self) -> Option<&str> {
        match self {
            Self::Failed { reason } => Some(reason),
            _ => None,
        }
    }

    /// Fetched entries; empty while loading or after a failure.
    pub fn postings(&self) -> &[Option<JobPosting>] {
        match self {
            Self::Ready(postings) => postings,
            Self::Loading | Self::Failed { .. } => &[],
        }
    }
}

fn decode_entry(entry: Value) -> Option<JobPosting> {
    match entry {
        Value::Object(_) => serde_json::from_value(entry).ok(),
        _ => None,
    }
}
