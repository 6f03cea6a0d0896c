//! Endpoint tests for `/bookings`: the full lifecycle over the real route
//! table and the in-memory repositories.

mod common;

use actix_http::Request;
use actix_web::body::MessageBody;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::{http::StatusCode, test};
use chrono::{Duration, Utc};
use serde_json::json;

use lh_api::app::create_app;

use common::{test_state, SHARER_HEADER};

async fn create_user<S, B>(app: &S, name: &str, email: &str) -> i64
where
    S: Service<Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: MessageBody,
{
    let req = test::TestRequest::post()
        .uri("/users")
        .set_json(json!({"name": name, "email": email}))
        .to_request();
    let resp = test::call_service(app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: serde_json::Value = test::read_body_json(resp).await;
    body["id"].as_i64().unwrap()
}

async fn create_item<S, B>(app: &S, owner_id: i64, name: &str) -> i64
where
    S: Service<Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: MessageBody,
{
    let req = test::TestRequest::post()
        .uri("/items")
        .insert_header((SHARER_HEADER, owner_id.to_string()))
        .set_json(json!({"name": name, "description": "well used but solid", "available": true}))
        .to_request();
    let resp = test::call_service(app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: serde_json::Value = test::read_body_json(resp).await;
    body["id"].as_i64().unwrap()
}

fn hours_from_now(hours: i64) -> String {
    (Utc::now() + Duration::hours(hours)).to_rfc3339()
}

#[actix_web::test]
async fn test_booking_lifecycle() {
    let state = test_state();
    let app = test::init_service(create_app(state.clone())).await;

    let owner = create_user(&app, "Ada", "ada@example.com").await;
    let booker = create_user(&app, "Grace", "grace@example.com").await;
    let item = create_item(&app, owner, "Cordless drill").await;

    // Book for [now+1h, now+2h].
    let req = test::TestRequest::post()
        .uri("/bookings")
        .insert_header((SHARER_HEADER, booker.to_string()))
        .set_json(json!({
            "itemId": item,
            "start": hours_from_now(1),
            "end": hours_from_now(2),
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let booking: serde_json::Value = test::read_body_json(resp).await;
    let booking_id = booking["id"].as_i64().unwrap();
    assert_eq!(booking["status"], "WAITING");
    assert_eq!(booking["item"]["id"].as_i64().unwrap(), item);
    assert_eq!(booking["booker"]["id"].as_i64().unwrap(), booker);

    // Owner approves.
    let req = test::TestRequest::patch()
        .uri(&format!("/bookings/{booking_id}?approved=true"))
        .insert_header((SHARER_HEADER, owner.to_string()))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let decided: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(decided["status"], "APPROVED");

    // A second decision fails and the status stays APPROVED.
    let req = test::TestRequest::patch()
        .uri(&format!("/bookings/{booking_id}?approved=false"))
        .insert_header((SHARER_HEADER, owner.to_string()))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let req = test::TestRequest::get()
        .uri(&format!("/bookings/{booking_id}"))
        .insert_header((SHARER_HEADER, booker.to_string()))
        .to_request();
    let resp = test::call_service(&app, req).await;
    let fetched: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(fetched["status"], "APPROVED");
}

#[actix_web::test]
async fn test_owner_cannot_book_own_item() {
    let state = test_state();
    let app = test::init_service(create_app(state.clone())).await;

    let owner = create_user(&app, "Ada", "ada@example.com").await;
    let item = create_item(&app, owner, "Cordless drill").await;

    let req = test::TestRequest::post()
        .uri("/bookings")
        .insert_header((SHARER_HEADER, owner.to_string()))
        .set_json(json!({
            "itemId": item,
            "start": hours_from_now(1),
            "end": hours_from_now(2),
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn test_invalid_time_ranges_are_rejected() {
    let state = test_state();
    let app = test::init_service(create_app(state.clone())).await;

    let owner = create_user(&app, "Ada", "ada@example.com").await;
    let booker = create_user(&app, "Grace", "grace@example.com").await;
    let item = create_item(&app, owner, "Cordless drill").await;

    // Start in the past.
    let req = test::TestRequest::post()
        .uri("/bookings")
        .insert_header((SHARER_HEADER, booker.to_string()))
        .set_json(json!({
            "itemId": item,
            "start": hours_from_now(-1),
            "end": hours_from_now(2),
        }))
        .to_request();
    assert_eq!(
        test::call_service(&app, req).await.status(),
        StatusCode::BAD_REQUEST
    );

    // Start after end.
    let req = test::TestRequest::post()
        .uri("/bookings")
        .insert_header((SHARER_HEADER, booker.to_string()))
        .set_json(json!({
            "itemId": item,
            "start": hours_from_now(3),
            "end": hours_from_now(2),
        }))
        .to_request();
    assert_eq!(
        test::call_service(&app, req).await.status(),
        StatusCode::BAD_REQUEST
    );
}

#[actix_web::test]
async fn test_third_party_cannot_view_booking() {
    let state = test_state();
    let app = test::init_service(create_app(state.clone())).await;

    let owner = create_user(&app, "Ada", "ada@example.com").await;
    let booker = create_user(&app, "Grace", "grace@example.com").await;
    let outsider = create_user(&app, "Mallory", "mallory@example.com").await;
    let item = create_item(&app, owner, "Cordless drill").await;

    let req = test::TestRequest::post()
        .uri("/bookings")
        .insert_header((SHARER_HEADER, booker.to_string()))
        .set_json(json!({
            "itemId": item,
            "start": hours_from_now(1),
            "end": hours_from_now(2),
        }))
        .to_request();
    let booking: serde_json::Value =
        test::read_body_json(test::call_service(&app, req).await).await;
    let booking_id = booking["id"].as_i64().unwrap();

    let req = test::TestRequest::get()
        .uri(&format!("/bookings/{booking_id}"))
        .insert_header((SHARER_HEADER, outsider.to_string()))
        .to_request();
    assert_eq!(
        test::call_service(&app, req).await.status(),
        StatusCode::NOT_FOUND
    );
}

#[actix_web::test]
async fn test_unknown_state_is_a_bad_request() {
    let state = test_state();
    let app = test::init_service(create_app(state.clone())).await;

    let booker = create_user(&app, "Grace", "grace@example.com").await;

    let req = test::TestRequest::get()
        .uri("/bookings?state=UNSUPPORTED_STATUS")
        .insert_header((SHARER_HEADER, booker.to_string()))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "Unknown state: UNSUPPORTED_STATUS");
}

#[actix_web::test]
async fn test_list_filters_and_pagination() {
    let state = test_state();
    let app = test::init_service(create_app(state.clone())).await;

    let owner = create_user(&app, "Ada", "ada@example.com").await;
    let booker = create_user(&app, "Grace", "grace@example.com").await;
    let item = create_item(&app, owner, "Cordless drill").await;

    for h in 1..=3 {
        let req = test::TestRequest::post()
            .uri("/bookings")
            .insert_header((SHARER_HEADER, booker.to_string()))
            .set_json(json!({
                "itemId": item,
                "start": hours_from_now(h),
                "end": hours_from_now(h + 1),
            }))
            .to_request();
        assert_eq!(
            test::call_service(&app, req).await.status(),
            StatusCode::OK
        );
    }

    // All three are future and waiting; descending by start.
    let req = test::TestRequest::get()
        .uri("/bookings?state=FUTURE")
        .insert_header((SHARER_HEADER, booker.to_string()))
        .to_request();
    let listed: serde_json::Value =
        test::read_body_json(test::call_service(&app, req).await).await;
    let listed = listed.as_array().unwrap();
    assert_eq!(listed.len(), 3);
    let starts: Vec<&str> = listed.iter().map(|b| b["start"].as_str().unwrap()).collect();
    let mut sorted = starts.clone();
    sorted.sort_by(|a, b| b.cmp(a));
    assert_eq!(starts, sorted);

    // Raw offset pagination: skip 1, take 1.
    let req = test::TestRequest::get()
        .uri("/bookings?state=ALL&from=1&size=1")
        .insert_header((SHARER_HEADER, booker.to_string()))
        .to_request();
    let page: serde_json::Value =
        test::read_body_json(test::call_service(&app, req).await).await;
    assert_eq!(page.as_array().unwrap().len(), 1);
    assert_eq!(page[0]["start"].as_str().unwrap(), starts[1]);

    // Owner sees the same bookings through the owner endpoint.
    let req = test::TestRequest::get()
        .uri("/bookings/owner?state=WAITING")
        .insert_header((SHARER_HEADER, owner.to_string()))
        .to_request();
    let owned: serde_json::Value =
        test::read_body_json(test::call_service(&app, req).await).await;
    assert_eq!(owned.as_array().unwrap().len(), 3);

    // Non-positive page size is rejected.
    let req = test::TestRequest::get()
        .uri("/bookings?state=ALL&from=0&size=0")
        .insert_header((SHARER_HEADER, booker.to_string()))
        .to_request();
    assert_eq!(
        test::call_service(&app, req).await.status(),
        StatusCode::BAD_REQUEST
    );
}
