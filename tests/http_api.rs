//! HTTP contract tests for the quoting API.

use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use removals_quote::cache::QuoteCache;
use removals_quote::pricing::PricingConfig;
use removals_quote::{app, AppState};
use serde_json::{json, Value};
use tower::ServiceExt;

fn test_app() -> axum::Router {
    app(AppState::new(PricingConfig::standard(), QuoteCache::default()))
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn body_json(resp: axum::response::Response) -> Value {
    let bytes = resp.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn two_bed_facts() -> Value {
    json!({
        "service_type": "home",
        "job": { "kind": "home", "property_size": "two_bed", "slider_position": 3 },
        "distances": {
            "depot_to_from": "10",
            "from_to_to": "10",
            "to_to_depot": "10",
            "drive_time_hours": "1"
        }
    })
}

#[tokio::test]
async fn health_reports_ok() {
    let resp = test_app()
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(body_json(resp).await["status"], "ok");
}

#[tokio::test]
async fn quote_returns_price() {
    let resp = test_app()
        .oneshot(post_json("/api/quote", two_bed_facts()))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let body = body_json(resp).await;
    assert_eq!(body["cached"], false);
    assert_eq!(body["quote"]["total_price"], "510");
    assert_eq!(body["quote"]["cubic_feet"], 750);
    assert_eq!(body["quote"]["duration"]["label"], "Half Day");
    assert_eq!(body["quote"]["requires_callback"], false);
}

#[tokio::test]
async fn incomplete_facts_are_unprocessable() {
    let resp = test_app()
        .oneshot(post_json("/api/quote", json!({ "service_type": "home" })))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let body = body_json(resp).await;
    assert_eq!(body["error_type"], "incomplete");
    assert_eq!(body["missing"], json!(["job_details", "distances"]));
}

#[tokio::test]
async fn negative_distance_is_bad_request() {
    let mut facts = two_bed_facts();
    facts["distances"]["to_to_depot"] = json!("-3");

    let resp = test_app()
        .oneshot(post_json("/api/quote", facts))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(resp).await["error_type"], "invalid_facts");
}

#[tokio::test]
async fn submission_carries_facts_and_summary() {
    let resp = test_app()
        .oneshot(post_json("/api/quote/submission", two_bed_facts()))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let body = body_json(resp).await;
    assert!(body["reference"].is_string());
    assert_eq!(body["summary"]["total_price"], "510");
    assert_eq!(body["summary"]["men"], 3);
    assert_eq!(body["facts"]["job"]["property_size"], "two_bed");
}

#[tokio::test]
async fn override_validation() {
    let app = test_app();

    let resp = app
        .clone()
        .oneshot(post_json("/api/override/validate", json!({ "vans": 2, "crew": 1 })))
        .await
        .unwrap();
    let body = body_json(resp).await;
    assert_eq!(body["valid"], false);
    assert!(body["message"].as_str().unwrap().contains("at least 2"));

    let resp = app
        .oneshot(post_json("/api/override/validate", json!({ "vans": 2, "crew": 4 })))
        .await
        .unwrap();
    let body = body_json(resp).await;
    assert_eq!(body["valid"], true);
    assert!(body.get("message").is_none());
}

#[tokio::test]
async fn override_diff() {
    let resp = test_app()
        .oneshot(post_json(
            "/api/override/diff",
            json!({
                "recommended": { "men": 3, "vans": 2 },
                "manual": { "men": 4, "vans": 2 }
            }),
        ))
        .await
        .unwrap();
    let body = body_json(resp).await;
    assert_eq!(body["differs"], true);
    assert_eq!(
        body["message"],
        "You selected 4 movers and 2 vans; we recommend 3 movers and 2 vans."
    );
}

#[tokio::test]
async fn oversized_distance_is_bad_request() {
    let mut facts = two_bed_facts();
    facts["distances"]["depot_to_from"] = json!("79228162514264337593543950335");
    facts["distances"]["from_to_to"] = json!("79228162514264337593543950335");

    let resp = test_app()
        .oneshot(post_json("/api/quote", facts))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(resp).await["error_type"], "invalid_facts");
}

#[tokio::test]
async fn impossible_override_is_bad_request() {
    let mut facts = two_bed_facts();
    facts["manual_override"] = json!({ "men": 0, "vans": 0 });

    let resp = test_app()
        .oneshot(post_json("/api/quote", facts))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body = body_json(resp).await;
    assert_eq!(body["error_type"], "invalid_facts");
    assert!(body["message"].as_str().unwrap().contains("At least one van"));
}

#[tokio::test]
async fn override_validation_handles_huge_fleets() {
    let resp = test_app()
        .oneshot(post_json(
            "/api/override/validate",
            json!({ "vans": 1_431_655_766u32, "crew": 1_431_655_766u32 }),
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(body_json(resp).await["valid"], true);
}
