use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde::Deserialize;

use super::domain::{JobId, JobSubmission};
use super::service::{CreatedJob, ListingService};
use super::store::JobRepository;
use crate::error::AppError;
use crate::search::{search, PageRequest, SearchCriteria};

/// Shared handler state: the listing service plus the default `/search` page size.
pub struct ListingState<R> {
    pub service: Arc<ListingService<R>>,
    pub page_size: usize,
}

impl<R> Clone for ListingState<R> {
    fn clone(&self) -> Self {
        Self {
            service: Arc::clone(&self.service),
            page_size: self.page_size,
        }
    }
}

/// Query string accepted by `GET /search`. Numbers are signed so that out-of-range
/// values clamp instead of failing extraction.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchParams {
    #[serde(default)]
    pub job_query: Option<String>,
    #[serde(default)]
    pub location_query: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub page: Option<i64>,
    #[serde(default)]
    pub page_size: Option<i64>,
}

/// Router builder exposing the listing store over HTTP.
pub fn listing_router<R>(service: Arc<ListingService<R>>, page_size: usize) -> Router
where
    R: JobRepository + 'static,
{
    Router::new()
        .route("/post-job", post(create_handler::<R>))
        .route("/all-jobs", get(all_jobs_handler::<R>))
        .route("/all-jobs/:id", get(job_handler::<R>))
        .route("/myJobs/:email", get(my_jobs_handler::<R>))
        .route("/search", get(search_handler::<R>))
        .with_state(ListingState {
            service,
            page_size: page_size.max(1),
        })
}

pub(crate) async fn create_handler<R>(
    State(state): State<ListingState<R>>,
    axum::Json(submission): axum::Json<JobSubmission>,
) -> Result<Response, AppError>
where
    R: JobRepository + 'static,
{
    let posting = state.service.create(submission)?;
    let created = CreatedJob::for_posting(&posting);
    Ok((StatusCode::CREATED, axum::Json(created)).into_response())
}

pub(crate) async fn all_jobs_handler<R>(
    State(state): State<ListingState<R>>,
) -> Result<Response, AppError>
where
    R: JobRepository + 'static,
{
    let postings = state.service.list_all()?;
    Ok((StatusCode::OK, axum::Json(postings)).into_response())
}

pub(crate) async fn job_handler<R>(
    State(state): State<ListingState<R>>,
    Path(id): Path<String>,
) -> Result<Response, AppError>
where
    R: JobRepository + 'static,
{
    let posting = state.service.get(&JobId(id))?;
    Ok((StatusCode::OK, axum::Json(posting)).into_response())
}

pub(crate) async fn my_jobs_handler<R>(
    State(state): State<ListingState<R>>,
    Path(email): Path<String>,
) -> Result<Response, AppError>
where
    R: JobRepository + 'static,
{
    let postings = state.service.list_by_poster(&email)?;
    Ok((StatusCode::OK, axum::Json(postings)).into_response())
}

pub(crate) async fn search_handler<R>(
    State(state): State<ListingState<R>>,
    Query(params): Query<SearchParams>,
) -> Result<Response, AppError>
where
    R: JobRepository + 'static,
{
    let postings = state.service.list_all()?;

    let criteria = SearchCriteria {
        job_query: params.job_query.unwrap_or_default(),
        location_query: params.location_query.unwrap_or_default(),
        category: params.category,
    };
    let page_size = params
        .page_size
        .map_or(state.page_size, |size| at_least_one(Some(size)));
    let request = PageRequest::new(at_least_one(params.page), page_size);

    let page = search(&postings, &criteria, request);
    Ok((StatusCode::OK, axum::Json(page)).into_response())
}

fn at_least_one(value: Option<i64>) -> usize {
    value
        .and_then(|value| usize::try_from(value).ok())
        .unwrap_or(1)
        .max(1)
}
