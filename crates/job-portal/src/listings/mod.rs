//! Listing store: job posting records, their persistence, and the HTTP surface over them.

pub mod domain;
pub mod router;
pub mod service;
pub mod store;

#[cfg(test)]
mod tests;

pub use domain::{
    coerce_price, normalize_poster, JobDraft, JobId, JobPosting, JobSubmission, RequiredField,
    ValidationError,
};
pub use router::{listing_router, ListingState, SearchParams};
pub use service::{CreatedJob, ListingService, ListingServiceError};
pub use store::{InMemoryJobRepository, JobRepository, RepositoryError};
