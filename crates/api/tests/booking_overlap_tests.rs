mod common;

use axum::http::StatusCode;
use common::*;
use serde_json::json;

#[tokio::test]
async fn overlapping_request_is_rejected_touching_is_accepted() {
    let app = spawn_app();
    let (_, owner) = app.owner_session("pitchco").await;
    let (user_id, user) = app.user_session("ana").await;
    let field_id = app.create_field(&owner).await;

    let first = app.book(&user, field_id, "09:00", "10:00").await;
    assert_eq!(first.status, StatusCode::CREATED);
    assert_eq!(first.body["status"], "pending");
    assert_eq!(first.body["user_id"], user_id.to_string());
    assert_eq!(first.body["booking_date"], at("09:00"));
    assert_eq!(first.body["total_price"], 2600);

    let clash = app.book(&user, field_id, "08:30", "09:30").await;
    assert_eq!(clash.status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(error_of(&clash.body), "Booking overlaps with another booking");

    let inside = app.book(&user, field_id, "09:15", "09:45").await;
    assert_eq!(inside.status, StatusCode::UNPROCESSABLE_ENTITY);

    let touching = app.book(&user, field_id, "10:00", "11:00").await;
    assert_eq!(touching.status, StatusCode::CREATED);
}

#[tokio::test]
async fn other_fields_do_not_conflict() {
    let app = spawn_app();
    let (_, owner) = app.owner_session("pitchco").await;
    let (_, user) = app.user_session("ana").await;
    let a = app.create_field(&owner).await;
    let b = app.create_field(&owner).await;

    assert_eq!(app.book(&user, a, "09:00", "10:00").await.status, StatusCode::CREATED);
    assert_eq!(app.book(&user, b, "09:00", "10:00").await.status, StatusCode::CREATED);
}

#[tokio::test]
async fn canceled_booking_frees_the_slot() {
    let app = spawn_app();
    let (_, owner) = app.owner_session("pitchco").await;
    let (_, user) = app.user_session("ana").await;
    let field_id = app.create_field(&owner).await;

    let first = app.book(&user, field_id, "18:00", "19:00").await;
    let booking_id = id_of(&first.body);

    assert_eq!(
        app.book(&user, field_id, "18:00", "19:00").await.status,
        StatusCode::UNPROCESSABLE_ENTITY
    );

    let canceled = app.set_status(&user, booking_id, "canceled").await;
    assert_eq!(canceled.status, StatusCode::OK);

    let again = app.book(&user, field_id, "18:00", "19:00").await;
    assert_eq!(again.status, StatusCode::CREATED);
}

#[tokio::test]
async fn empty_or_inverted_interval_is_rejected() {
    let app = spawn_app();
    let (_, owner) = app.owner_session("pitchco").await;
    let (_, user) = app.user_session("ana").await;
    let field_id = app.create_field(&owner).await;

    let empty = app.book(&user, field_id, "09:00", "09:00").await;
    assert_eq!(empty.status, StatusCode::UNPROCESSABLE_ENTITY);

    let inverted = app.book(&user, field_id, "10:00", "09:00").await;
    assert_eq!(inverted.status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn outside_operating_hours_is_rejected_when_enforced() {
    let app = spawn_app();
    let (_, owner) = app.owner_session("pitchco").await;
    let (_, user) = app.user_session("ana").await;
    let field_id = app.create_field(&owner).await;

    let early = app.book(&user, field_id, "07:00", "08:30").await;
    assert_eq!(early.status, StatusCode::UNPROCESSABLE_ENTITY);

    let overnight = app
        .post(
            "/bookings",
            Some(&user),
            json!({
                "field_id": field_id,
                "booking_date": at("21:00"),
                "booked_until": "2023-10-22T09:00:00"
            }),
        )
        .await;
    assert_eq!(overnight.status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn operating_hours_policy_can_be_disabled() {
    let app = spawn_app_with(api::config::AppConfig {
        enforce_operating_hours: false,
        ..test_config()
    });
    let (_, owner) = app.owner_session("pitchco").await;
    let (_, user) = app.user_session("ana").await;
    let field_id = app.create_field(&owner).await;

    let early = app.book(&user, field_id, "07:00", "08:30").await;
    assert_eq!(early.status, StatusCode::CREATED);
}

#[tokio::test]
async fn unknown_field_is_not_found_and_anonymous_is_unauthorized() {
    let app = spawn_app();
    let (_, user) = app.user_session("ana").await;

    let missing = app.book(&user, uuid::Uuid::new_v4(), "09:00", "10:00").await;
    assert_eq!(missing.status, StatusCode::NOT_FOUND);

    let anonymous = app
        .post(
            "/bookings",
            None,
            json!({
                "field_id": uuid::Uuid::new_v4(),
                "booking_date": at("09:00"),
                "booked_until": at("10:00")
            }),
        )
        .await;
    assert_eq!(anonymous.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn concurrent_requests_for_one_slot_create_exactly_one_booking() {
    let app = spawn_app();
    let (_, owner) = app.owner_session("pitchco").await;
    let field_id = app.create_field(&owner).await;

    let mut cookies = Vec::new();
    for i in 0..8 {
        let (_, cookie) = app.user_session(&format!("player{i}")).await;
        cookies.push(cookie);
    }

    let mut handles = Vec::new();
    for cookie in cookies {
        let router = app.router.clone();
        let store = app.store.clone();
        handles.push(tokio::spawn(async move {
            let app = TestApp { router, store };
            app.book(&cookie, field_id, "20:00", "21:00").await.status
        }));
    }

    let mut created = 0;
    for handle in handles {
        if handle.await.unwrap() == StatusCode::CREATED {
            created += 1;
        }
    }
    assert_eq!(created, 1);
}
