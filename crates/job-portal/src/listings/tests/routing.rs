use super::common::*;
use axum::body::Body;
use axum::extract::{Path, State};
use axum::http::{header, Request, StatusCode};
use axum::response::IntoResponse;
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

use crate::listings::router::{create_handler, job_handler, ListingState};
use crate::listings::ListingService;

fn post_job(payload: Value) -> Request<Body> {
    Request::post("/post-job")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(serde_json::to_vec(&payload).unwrap()))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::get(uri).body(Body::empty()).unwrap()
}

#[tokio::test]
async fn post_job_returns_created_with_inserted_id() {
    let (service, repository) = build_service();
    let router = router_with_service(service);

    let response = router
        .oneshot(post_job(json!({
            "jobTitle": "Platform Engineer",
            "postedBy": "Lead@Northwind.com",
            "maxPrice": "120",
        })))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::CREATED);
    let payload = read_json_body(response).await;
    assert_eq!(payload.get("acknowledged"), Some(&json!(true)));
    let inserted = payload
        .get("insertedId")
        .and_then(Value::as_str)
        .expect("inserted id");
    assert_eq!(repository.len().unwrap(), 1);
    assert!(inserted.starts_with("job-"));
}

#[tokio::test]
async fn post_job_rejects_missing_required_fields() {
    let (service, repository) = build_service();
    let router = router_with_service(service);

    let response = router
        .oneshot(post_job(json!({ "companyName": "Northwind" })))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let payload = read_json_body(response).await;
    let message = payload
        .get("message")
        .and_then(Value::as_str)
        .unwrap_or_default();
    assert!(message.contains("jobTitle"));
    assert!(message.contains("postedBy"));
    assert!(repository.is_empty().unwrap());
}

#[tokio::test]
async fn create_handler_returns_internal_error_on_store_failure() {
    let state = ListingState {
        service: Arc::new(ListingService::new(Arc::new(UnavailableRepository))),
        page_size: 6,
    };

    let response = create_handler::<UnavailableRepository>(
        State(state),
        axum::Json(submission("Ops", "ops@example.com")),
    )
    .await
    .into_response();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let payload = read_json_body(response).await;
    assert!(payload
        .get("message")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .contains("database offline"));
}

#[tokio::test]
async fn all_jobs_lists_newest_first() {
    let (service, _) = build_service();
    service.create(submission("Older", "a@b.com")).unwrap();
    service.create(submission("Newer", "a@b.com")).unwrap();
    let router = router_with_service(service);

    let response = router.oneshot(get("/all-jobs")).await.expect("route executes");
    assert_eq!(response.status(), StatusCode::OK);

    let payload = read_json_body(response).await;
    let titles: Vec<&str> = payload
        .as_array()
        .expect("array payload")
        .iter()
        .filter_map(|posting| posting.get("jobTitle").and_then(Value::as_str))
        .collect();
    assert_eq!(titles, vec!["Newer", "Older"]);
}

#[tokio::test]
async fn job_handler_returns_single_posting_or_not_found() {
    let (service, _) = build_service();
    let created = service.create(submission("Designer", "a@b.com")).unwrap();
    let state = ListingState {
        service: Arc::new(service),
        page_size: 6,
    };

    let found = job_handler(State(state.clone()), Path(created.id.0.clone()))
        .await
        .into_response();
    assert_eq!(found.status(), StatusCode::OK);
    let payload = read_json_body(found).await;
    assert_eq!(payload.get("_id"), Some(&json!(created.id.0)));
    assert_eq!(payload.get("jobTitle"), Some(&json!("Designer")));

    let missing = job_handler(State(state), Path("job-999999".to_string()))
        .await
        .into_response();
    assert_eq!(missing.status(), StatusCode::NOT_FOUND);
    let payload = read_json_body(missing).await;
    assert_eq!(payload.get("message"), Some(&json!("job not found")));
}

#[tokio::test]
async fn my_jobs_lowercases_the_path_email() {
    let (service, _) = build_service();
    service.create(submission("Mine", "owner@example.com")).unwrap();
    service.create(submission("Theirs", "other@example.com")).unwrap();
    let router = router_with_service(service);

    let response = router
        .oneshot(get("/myJobs/Owner@Example.COM"))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    let postings = payload.as_array().expect("array payload");
    assert_eq!(postings.len(), 1);
    assert_eq!(postings[0].get("jobTitle"), Some(&json!("Mine")));
}

#[tokio::test]
async fn search_route_filters_and_paginates() {
    let (service, _) = build_service();
    for n in 1..=8 {
        let title = if n % 2 == 0 {
            format!("React Developer {n}")
        } else {
            format!("Backend Engineer {n}")
        };
        service.create(submission(&title, "a@b.com")).unwrap();
    }
    let router = router_with_service(service);

    let response = router
        .oneshot(get("/search?jobQuery=REACT&page=2&pageSize=3"))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(payload.get("totalMatching"), Some(&json!(4)));
    assert_eq!(payload.get("totalPages"), Some(&json!(2)));
    assert_eq!(payload.get("page"), Some(&json!(2)));
    let items = payload
        .get("items")
        .and_then(Value::as_array)
        .expect("items array");
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].get("jobTitle"), Some(&json!("React Developer 2")));
}

#[tokio::test]
async fn search_route_clamps_pages_and_applies_category() {
    let (service, _) = build_service();
    service.create(submission("Cheap", "a@b.com")).unwrap();
    let mut pricey = submission("Pricey", "a@b.com");
    pricey.max_price = Some(json!(900));
    service.create(pricey).unwrap();
    let router = router_with_service(service);

    let response = router
        .oneshot(get("/search?category=50&page=40"))
        .await
        .expect("route executes");

    let payload = read_json_body(response).await;
    assert_eq!(payload.get("page"), Some(&json!(1)));
    assert_eq!(payload.get("pageSize"), Some(&json!(6)));
    let items = payload
        .get("items")
        .and_then(Value::as_array)
        .expect("items array");
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].get("jobTitle"), Some(&json!("Cheap")));
}

#[tokio::test]
async fn search_route_clamps_negative_page_and_size() {
    let (service, _) = build_service();
    for n in 1..=3 {
        service
            .create(submission(&format!("Role {n}"), "a@b.com"))
            .unwrap();
    }
    let router = router_with_service(service);

    let response = router
        .oneshot(get("/search?page=-1&pageSize=-4"))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(payload.get("page"), Some(&json!(1)));
    assert_eq!(payload.get("pageSize"), Some(&json!(1)));
    assert_eq!(payload.get("totalPages"), Some(&json!(3)));
}

