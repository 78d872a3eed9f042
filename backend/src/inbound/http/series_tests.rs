//! Tests for series HTTP handlers.

use actix_web::http::StatusCode;
use actix_web::test as actix_test;
use rstest::rstest;
use serde_json::{Value, json};

use super::*;
use crate::inbound::http::test_utils::{fixed_now, memory_state, test_app};

fn boiler() -> Value {
    json!({"name": "Boiler", "color": "#ff8800", "minValue": 10.0, "maxValue": 95.0})
}

#[rstest]
#[actix_web::test]
async fn create_then_get_round_trips_fields_and_audit() {
    let app = actix_test::init_service(test_app(memory_state())).await;

    let created = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/series")
            .set_json(boiler())
            .to_request(),
    )
    .await;
    assert_eq!(created.status(), StatusCode::CREATED);
    let created: SeriesResponse = actix_test::read_body_json(created).await;
    assert_eq!(created.created_by, "system");
    assert_eq!(created.created_at, fixed_now());

    let fetched: SeriesResponse = actix_test::call_and_read_body_json(
        &app,
        actix_test::TestRequest::get()
            .uri(&format!("/api/series/{}", created.id))
            .to_request(),
    )
    .await;
    assert_eq!(fetched, created);
}

#[rstest]
#[actix_web::test]
async fn created_by_is_taken_from_the_body() {
    let app = actix_test::init_service(test_app(memory_state())).await;
    let mut body = boiler();
    body["createdBy"] = json!("lab-7");

    let created: SeriesResponse = actix_test::call_and_read_body_json(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/series")
            .set_json(body)
            .to_request(),
    )
    .await;

    assert_eq!(created.created_by, "lab-7");
}

#[rstest]
#[case(json!({"color": "#000", "minValue": 0.0, "maxValue": 1.0}), "name", "missing_field")]
#[case(json!({"name": "  ", "color": "#000", "minValue": 0.0, "maxValue": 1.0}), "name", "invalid_value")]
#[case(json!({"name": "x", "color": "#000", "minValue": 0.0}), "maxValue", "missing_field")]
#[actix_web::test]
async fn invalid_bodies_are_rejected(
    #[case] body: Value,
    #[case] field: &str,
    #[case] code: &str,
) {
    let app = actix_test::init_service(test_app(memory_state())).await;

    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/series")
            .set_json(body)
            .to_request(),
    )
    .await;

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let payload: Value = actix_test::read_body_json(res).await;
    assert_eq!(payload["code"], "invalid_request");
    assert_eq!(payload["details"]["field"], field);
    assert_eq!(payload["details"]["code"], code);
}

#[rstest]
#[actix_web::test]
async fn update_replaces_every_mutable_field() {
    let app = actix_test::init_service(test_app(memory_state())).await;
    let created: SeriesResponse = actix_test::call_and_read_body_json(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/series")
            .set_json(boiler())
            .to_request(),
    )
    .await;

    let updated: SeriesResponse = actix_test::call_and_read_body_json(
        &app,
        actix_test::TestRequest::put()
            .uri(&format!("/api/series/{}", created.id))
            .set_json(json!({"name": "Return", "color": "#0000ff", "minValue": 5.0, "maxValue": 60.0}))
            .to_request(),
    )
    .await;

    assert_eq!(updated.name, "Return");
    assert_eq!(updated.color, "#0000ff");
    assert_eq!(updated.min_value, 5.0);
    assert_eq!(updated.max_value, 60.0);
    assert_eq!(updated.created_by, created.created_by);
    assert_eq!(updated.created_at, created.created_at);
}

#[rstest]
#[actix_web::test]
async fn update_of_unknown_series_is_404() {
    let app = actix_test::init_service(test_app(memory_state())).await;

    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::put()
            .uri(&format!("/api/series/{}", Uuid::new_v4()))
            .set_json(boiler())
            .to_request(),
    )
    .await;

    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    let list: Vec<SeriesResponse> = actix_test::call_and_read_body_json(
        &app,
        actix_test::TestRequest::get().uri("/api/series").to_request(),
    )
    .await;
    assert!(list.is_empty());
}

#[rstest]
#[actix_web::test]
async fn malformed_identifier_is_400() {
    let app = actix_test::init_service(test_app(memory_state())).await;

    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::get()
            .uri("/api/series/not-a-uuid")
            .to_request(),
    )
    .await;

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let payload: Value = actix_test::read_body_json(res).await;
    assert_eq!(payload["details"]["code"], "invalid_uuid");
}

#[rstest]
#[actix_web::test]
async fn delete_is_blocked_while_measurements_exist() {
    let app = actix_test::init_service(test_app(memory_state())).await;
    let series: SeriesResponse = actix_test::call_and_read_body_json(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/series")
            .set_json(boiler())
            .to_request(),
    )
    .await;
    let recorded = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/measurement")
            .set_json(json!({
                "seriesId": series.id,
                "value": 42.0,
                "timestamp": "2026-01-01T00:00:00Z"
            }))
            .to_request(),
    )
    .await;
    assert_eq!(recorded.status(), StatusCode::CREATED);

    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::delete()
            .uri(&format!("/api/series/{}", series.id))
            .to_request(),
    )
    .await;

    assert_eq!(res.status(), StatusCode::CONFLICT);
    let payload: Value = actix_test::read_body_json(res).await;
    assert_eq!(payload["details"]["code"], "series_in_use");
}

#[rstest]
#[actix_web::test]
async fn delete_of_unknown_series_is_204() {
    let app = actix_test::init_service(test_app(memory_state())).await;

    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::delete()
            .uri(&format!("/api/series/{}", Uuid::new_v4()))
            .to_request(),
    )
    .await;

    assert_eq!(res.status(), StatusCode::NO_CONTENT);
    assert!(res.headers().contains_key("trace-id"));
}
