use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Identifier assigned by the listing store.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JobId(pub String);

impl JobId {
    const PREFIX: &'static str = "job-";

    pub fn from_sequence(sequence: u64) -> Self {
        Self(format!("{}{sequence:06}", Self::PREFIX))
    }

    /// Numeric sequence embedded in store-assigned ids.
    pub fn sequence(&self) -> Option<u64> {
        self.0.strip_prefix(Self::PREFIX)?.parse().ok()
    }
}

impl fmt::Display for JobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Stored job posting as served by `/all-jobs`.
///
/// Decoding is lenient so feeds written by other clients still load: null or
/// non-string text fields read as empty, prices go through [`coerce_price`], and a
/// missing or unreadable `createdAt` falls back to the Unix epoch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobPosting {
    #[serde(rename = "_id", default, deserialize_with = "lenient_id")]
    pub id: JobId,
    #[serde(default, deserialize_with = "lenient_text")]
    pub job_title: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub company_name: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub job_location: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub employment_type: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub experience_level: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub salary_type: String,
    #[serde(default, deserialize_with = "lenient_price")]
    pub min_price: f64,
    #[serde(default, deserialize_with = "lenient_price")]
    pub max_price: f64,
    #[serde(default, deserialize_with = "lenient_text")]
    pub description: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub posted_by: String,
    #[serde(default, deserialize_with = "lenient_timestamp")]
    pub created_at: DateTime<Utc>,
}

impl JobPosting {
    pub fn from_draft(id: JobId, draft: JobDraft, created_at: DateTime<Utc>) -> Self {
        let JobDraft {
            job_title,
            company_name,
            job_location,
            employment_type,
            experience_level,
            salary_type,
            min_price,
            max_price,
            description,
            posted_by,
        } = draft;

        Self {
            id,
            job_title,
            company_name,
            job_location,
            employment_type,
            experience_level,
            salary_type,
            min_price,
            max_price,
            description,
            posted_by,
            created_at,
        }
    }
}

/// Raw `POST /post-job` payload. Every field is optional so validation can name what is missing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobSubmission {
    #[serde(default)]
    pub job_title: Option<String>,
    #[serde(default)]
    pub company_name: Option<String>,
    #[serde(default)]
    pub job_location: Option<String>,
    #[serde(default)]
    pub employment_type: Option<String>,
    #[serde(default)]
    pub experience_level: Option<String>,
    #[serde(default)]
    pub salary_type: Option<String>,
    #[serde(default)]
    pub min_price: Option<Value>,
    #[serde(default)]
    pub max_price: Option<Value>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub posted_by: Option<String>,
}

impl JobSubmission {
    /// Normalize free-text fields and coerce prices. Category fields are kept verbatim.
    pub fn sanitize(self) -> JobDraft {
        JobDraft {
            job_title: trimmed(self.job_title),
            company_name: trimmed(self.company_name),
            job_location: trimmed(self.job_location),
            employment_type: self.employment_type.unwrap_or_default(),
            experience_level: self.experience_level.unwrap_or_default(),
            salary_type: self.salary_type.unwrap_or_default(),
            min_price: coerce_price(self.min_price.as_ref()),
            max_price: coerce_price(self.max_price.as_ref()),
            description: trimmed(self.description),
            posted_by: normalize_poster(self.posted_by.as_deref().unwrap_or_default()),
        }
    }
}

/// Sanitized submission ready to be persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct JobDraft {
    pub job_title: String,
    pub company_name: String,
    pub job_location: String,
    pub employment_type: String,
    pub experience_level: String,
    pub salary_type: String,
    pub min_price: f64,
    pub max_price: f64,
    pub description: String,
    pub posted_by: String,
}

impl JobDraft {
    pub fn validate(&self) -> Result<(), ValidationError> {
        let mut missing = Vec::new();
        if self.job_title.is_empty() {
            missing.push(RequiredField::JobTitle);
        }
        if self.posted_by.is_empty() {
            missing.push(RequiredField::PostedBy);
        }

        if missing.is_empty() {
            Ok(())
        } else {
            Err(ValidationError { missing })
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequiredField {
    JobTitle,
    PostedBy,
}

impl RequiredField {
    pub fn name(self) -> &'static str {
        match self {
            RequiredField::JobTitle => "jobTitle",
            RequiredField::PostedBy => "postedBy",
        }
    }
}

/// Raised when a submission lacks a required field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub missing: Vec<RequiredField>,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "missing required field(s): {}",
            self.field_names().join(", ")
        )
    }
}

impl std::error::Error for ValidationError {}

impl ValidationError {
    pub fn field_names(&self) -> Vec<&'static str> {
        self.missing.iter().map(|field| field.name()).collect()
    }

    pub fn names(&self, field: RequiredField) -> bool {
        self.missing.contains(&field)
    }
}

/// Posters are matched case-insensitively, so they are stored lower-cased.
pub fn normalize_poster(raw: &str) -> String {
    raw.trim().to_lowercase()
}

fn value_text(value: Value) -> String {
    match value {
        Value::String(text) => text,
        Value::Number(number) => number.to_string(),
        Value::Bool(flag) => flag.to_string(),
        Value::Null | Value::Array(_) | Value::Object(_) => String::new(),
    }
}

fn lenient_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(value_text)
}

fn lenient_id<'de, D>(deserializer: D) -> Result<JobId, D::Error>
where
    D: Deserializer<'de>,
{
    lenient_text(deserializer).map(JobId)
}

fn lenient_price<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(coerce_price(Some(&value)))
}

fn lenient_timestamp<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(value
        .as_str()
        .and_then(|raw| DateTime::parse_from_rfc3339(raw).ok())
        .map(|timestamp| timestamp.with_timezone(&Utc))
        .unwrap_or_default())
}

fn trimmed(value: Option<String>) -> String {
    value
        .map(|raw| raw.trim().to_string())
        .unwrap_or_default()
}

/// Numbers and numeric strings pass through; anything else, including non-finite values, is 0.
pub fn coerce_price(value: Option<&Value>) -> f64 {
    let parsed = match value {
        Some(Value::Number(number)) => number.as_f64(),
        Some(Value::String(raw)) => {
            let raw = raw.trim();
            if raw.is_empty() {
                Some(0.0)
            } else {
                raw.parse::<f64>().ok()
            }
        }
        _ => None,
    };

    parsed.filter(|price| price.is_finite()).unwrap_or(0.0)
}
