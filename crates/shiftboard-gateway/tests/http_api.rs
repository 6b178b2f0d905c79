mod common;

use axum::http::StatusCode;
use common::{app, get, post_json, read_json};
use serde_json::json;
use tower::ServiceExt;

async fn register(app: &axum::Router, first: &str, last: &str) -> i64 {
    let resp = app
        .clone()
        .oneshot(post_json(
            "/volunteers",
            json!({"first_name": first, "last_name": last, "role": "volunteer"}),
        ))
        .await
        .expect("register");
    assert_eq!(resp.status(), StatusCode::CREATED);
    read_json(resp).await["id"].as_i64().expect("id")
}

#[tokio::test]
async fn health_reports_ok() {
    let resp = app().oneshot(get("/health")).await.expect("health");
    assert_eq!(resp.status(), StatusCode::OK);
    let body = read_json(resp).await;
    assert_eq!(body["status"], "ok");
    assert!(body["version"].is_string());
}

#[tokio::test]
async fn register_then_lookup_is_case_insensitive() {
    let app = app();
    let id = register(&app, " Jane ", "DOE").await;

    let resp = app
        .clone()
        .oneshot(get("/volunteers?first=JANE&last=doe"))
        .await
        .expect("lookup");
    assert_eq!(resp.status(), StatusCode::OK);
    let body = read_json(resp).await;
    assert_eq!(
        body,
        json!([{"id": id, "first_name": "jane", "last_name": "doe", "role": "volunteer"}])
    );

    let resp = app
        .clone()
        .oneshot(get("/volunteers?first=john&last=doe"))
        .await
        .expect("lookup");
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(read_json(resp).await, json!([]));
}

#[tokio::test]
async fn volunteer_directory_and_half_query() {
    let app = app();
    register(&app, "amy", "young").await;
    register(&app, "zoe", "adams").await;

    let resp = app.clone().oneshot(get("/volunteers")).await.expect("list");
    let body = read_json(resp).await;
    let last: Vec<_> = body
        .as_array()
        .expect("array")
        .iter()
        .map(|v| v["last_name"].as_str().expect("last").to_string())
        .collect();
    assert_eq!(last, vec!["adams", "young"]);

    let resp = app
        .clone()
        .oneshot(get("/volunteers?first=amy"))
        .await
        .expect("half");
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert!(read_json(resp).await["error"].is_string());
}

#[tokio::test]
async fn register_rejects_blank_or_missing_fields() {
    let app = app();
    for body in [
        json!({"first_name": "jane", "last_name": "", "role": "volunteer"}),
        json!({"first_name": "jane", "last_name": "doe"}),
        json!({}),
    ] {
        let resp = app
            .clone()
            .oneshot(post_json("/volunteers", body))
            .await
            .expect("register");
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        assert!(read_json(resp).await["error"].is_string());
    }
}

#[tokio::test]
async fn claim_list_and_release() {
    let app = app();
    let id = register(&app, "jane", "doe").await;
    let slot = json!({"v_id": id, "date": "2024-06-10", "timeslot": "10:00 - 12:00"});

    let resp = app
        .clone()
        .oneshot(post_json("/timeslots", slot.clone()))
        .await
        .expect("claim");
    assert_eq!(resp.status(), StatusCode::CREATED);
    let record = read_json(resp).await;
    assert_eq!(record["date"], "2024-06-10");
    assert_eq!(record["v_name"], "Jane Doe");
    assert_eq!(record["role"], "volunteer");

    // Claiming again is accepted and does not duplicate the row.
    let resp = app
        .clone()
        .oneshot(post_json("/timeslots", slot.clone()))
        .await
        .expect("claim");
    assert_eq!(resp.status(), StatusCode::CREATED);

    let resp = app.clone().oneshot(get("/timeslots")).await.expect("list");
    let list = read_json(resp).await;
    assert_eq!(list.as_array().expect("array").len(), 1);
    assert_eq!(list[0]["timeslot"], "10:00 - 12:00");

    let resp = app
        .clone()
        .oneshot(post_json("/timeslots/delete", slot.clone()))
        .await
        .expect("delete");
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(read_json(resp).await["deleted"], 1);

    let resp = app
        .clone()
        .oneshot(post_json("/timeslots/delete", slot))
        .await
        .expect("delete");
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn claim_validation() {
    let app = app();
    let id = register(&app, "jane", "doe").await;

    let cases = [
        (json!({"date": "2024-06-10", "timeslot": "8:00 - 10:00"}), StatusCode::BAD_REQUEST),
        (json!({"v_id": id, "timeslot": "8:00 - 10:00"}), StatusCode::BAD_REQUEST),
        (json!({"v_id": id, "date": "2024-06-10"}), StatusCode::BAD_REQUEST),
        (
            json!({"v_id": id, "date": "2024-06-10T00:00:00.000Z", "timeslot": "8:00 - 10:00"}),
            StatusCode::BAD_REQUEST,
        ),
        (
            json!({"v_id": 999, "date": "2024-06-10", "timeslot": "8:00 - 10:00"}),
            StatusCode::NOT_FOUND,
        ),
    ];
    for (body, expected) in cases {
        let resp = app
            .clone()
            .oneshot(post_json("/timeslots", body.clone()))
            .await
            .expect("claim");
        assert_eq!(resp.status(), expected, "body {body}");
    }
}

#[tokio::test]
async fn malformed_json_is_a_bad_request() {
    let req = axum::http::Request::builder()
        .method("POST")
        .uri("/timeslots")
        .header("content-type", "application/json")
        .body(axum::body::Body::from("{not json"))
        .expect("request");
    let resp = app().oneshot(req).await.expect("claim");
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert!(read_json(resp).await["error"].is_string());
}

#[tokio::test]
async fn malformed_query_is_a_json_bad_request() {
    let resp = app()
        .oneshot(get("/volunteers?first=a&first=b&last=c"))
        .await
        .expect("lookup");
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body = read_json(resp).await;
    assert!(body["error"].as_str().expect("error").contains("first"));
}
