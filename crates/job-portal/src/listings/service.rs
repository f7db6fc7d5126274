use std::sync::Arc;

use chrono::Utc;
use serde::Serialize;
use tracing::{debug, info, warn};

use super::domain::{normalize_poster, JobId, JobPosting, JobSubmission, ValidationError};
use super::store::{JobRepository, RepositoryError};

/// Acknowledgement returned by `POST /post-job`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatedJob {
    pub acknowledged: bool,
    pub inserted_id: JobId,
}

/// Listing store facade: sanitizes submissions and answers the read queries.
pub struct ListingService<R> {
    repository: Arc<R>,
}

impl<R> ListingService<R>
where
    R: JobRepository + 'static,
{
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// Validate and persist a submission, returning the stored record.
    pub fn create(&self, submission: JobSubmission) -> Result<JobPosting, ListingServiceError> {
        let draft = submission.sanitize();
        if let Err(error) = draft.validate() {
            warn!(missing = ?error.field_names(), "rejected job submission");
            return Err(error.into());
        }

        let posting = self.repository.insert(draft, Utc::now())?;
        info!(job_id = %posting.id, posted_by = %posting.posted_by, "job posting created");
        Ok(posting)
    }

    /// Every posting, newest first.
    pub fn list_all(&self) -> Result<Vec<JobPosting>, ListingServiceError> {
        let postings = self.repository.all()?;
        debug!(count = postings.len(), "listed all postings");
        Ok(postings)
    }

    /// Postings created by `poster_id`, compared case-insensitively.
    pub fn list_by_poster(&self, poster_id: &str) -> Result<Vec<JobPosting>, ListingServiceError> {
        let poster = normalize_poster(poster_id);
        let postings = self.repository.by_poster(&poster)?;
        debug!(%poster, count = postings.len(), "listed postings by poster");
        Ok(postings)
    }

    pub fn get(&self, id: &JobId) -> Result<JobPosting, ListingServiceError> {
        let posting = self
            .repository
            .fetch(id)?
            .ok_or(RepositoryError::NotFound)?;
        Ok(posting)
    }
}

impl CreatedJob {
    pub fn for_posting(posting: &JobPosting) -> Self {
        Self {
            acknowledged: true,
            inserted_id: posting.id.clone(),
        }
    }
}

/// Error raised by the listing service.
#[derive(Debug, thiserror::Error)]
pub enum ListingServiceError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
