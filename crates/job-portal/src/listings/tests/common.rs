use std::sync::Arc;

use axum::response::Response;
use chrono::{DateTime, Utc};
use serde_json::{json, Value};

use crate::listings::domain::{JobDraft, JobId, JobPosting, JobSubmission};
use crate::listings::store::{InMemoryJobRepository, JobRepository, RepositoryError};
use crate::listings::{listing_router, ListingService};

pub(super) fn submission(title: &str, poster: &str) -> JobSubmission {
    serde_json::from_value(json!({
        "jobTitle": title,
        "companyName": "Northwind",
        "jobLocation": "Pune",
        "employmentType": "Full-time",
        "experienceLevel": "Any experience",
        "salaryType": "Yearly",
        "minPrice": "20",
        "maxPrice": 45,
        "description": "Ship features.",
        "postedBy": poster,
    }))
    .expect("fixture decodes")
}

pub(super) fn build_service() -> (
    ListingService<InMemoryJobRepository>,
    Arc<InMemoryJobRepository>,
) {
    let repository = Arc::new(InMemoryJobRepository::default());
    let service = ListingService::new(repository.clone());
    (service, repository)
}

pub(super) fn router_with_service(service: ListingService<InMemoryJobRepository>) -> axum::Router {
    listing_router(Arc::new(service), 6)
}

pub(super) struct UnavailableRepository;

impl JobRepository for UnavailableRepository {
    fn insert(
        &self,
        _draft: JobDraft,
        _created_at: DateTime<Utc>,
    ) -> Result<JobPosting, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn all(&self) -> Result<Vec<JobPosting>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn by_poster(&self, _poster: &str) -> Result<Vec<JobPosting>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn fetch(&self, _id: &JobId) -> Result<Option<JobPosting>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
