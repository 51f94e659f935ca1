mod common;

use axum::http::StatusCode;
use common::*;
use serde_json::json;

#[tokio::test]
async fn signup_login_me_logout() {
    let app = spawn_app();
    let (user_id, cookie) = app.user_session("ana").await;

    let me = app.get("/auth/me", Some(&cookie)).await;
    assert_eq!(me.status, StatusCode::OK);
    assert_eq!(id_of(&me.body), user_id);
    assert_eq!(me.body["username"], "ana");
    assert_eq!(me.body["role"], "user");
    assert!(me.body.get("password_hash").is_none());

    let out = app.post("/auth/logout", Some(&cookie), json!({})).await;
    assert_eq!(out.status, StatusCode::OK);
    assert!(out.set_cookie.unwrap().contains("Max-Age=0"));

    let after = app.get("/auth/me", Some(&cookie)).await;
    assert_eq!(after.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn login_cookie_is_http_only() {
    let app = spawn_app();
    app.signup("/users/signup", "ana").await;

    let res = app
        .post("/auth/login", None, json!({ "username": "ana", "password": PASSWORD }))
        .await;
    let cookie = res.set_cookie.unwrap();
    assert!(cookie.starts_with("session_id="));
    assert!(cookie.contains("HttpOnly"));
    assert!(!cookie.contains("Secure"));
}

#[tokio::test]
async fn wrong_password_and_unknown_user_are_unauthorized() {
    let app = spawn_app();
    app.signup("/users/signup", "ana").await;

    let wrong = app
        .post("/auth/login", None, json!({ "username": "ana", "password": "nope!" }))
        .await;
    assert_eq!(wrong.status, StatusCode::UNAUTHORIZED);
    assert!(wrong.set_cookie.is_none());

    let unknown = app
        .post("/auth/login", None, json!({ "username": "ghost", "password": PASSWORD }))
        .await;
    assert_eq!(unknown.status, StatusCode::UNAUTHORIZED);
    assert!(unknown.set_cookie.is_none());
    assert_eq!(error_of(&wrong.body), error_of(&unknown.body));
}

#[tokio::test]
async fn login_while_logged_in_is_refused() {
    let app = spawn_app();
    let (_, cookie) = app.user_session("ana").await;

    let again = app
        .post(
            "/auth/login",
            Some(&cookie),
            json!({ "username": "ana", "password": PASSWORD }),
        )
        .await;
    assert_eq!(again.status, StatusCode::UNAUTHORIZED);
    assert_eq!(error_of(&again.body), "Already logged in");
}

#[tokio::test]
async fn duplicate_username_is_rejected() {
    let app = spawn_app();
    app.signup("/users/signup", "ana").await;

    let dup = app
        .post(
            "/owners/signup",
            None,
            json!({ "username": "ana", "name": "Other", "password": PASSWORD }),
        )
        .await;
    assert_eq!(dup.status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn short_password_is_rejected() {
    let app = spawn_app();
    let res = app
        .post(
            "/users/signup",
            None,
            json!({ "username": "ana", "name": "Ana", "password": "abc" }),
        )
        .await;
    assert_eq!(res.status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn logout_without_cookie_is_unauthorized() {
    let app = spawn_app();
    let res = app.post("/auth/logout", None, json!({})).await;
    assert_eq!(res.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn garbage_session_cookie_is_ignored() {
    let app = spawn_app();

    let me = app.get("/auth/me", Some("session_id=not-a-real-token")).await;
    assert_eq!(me.status, StatusCode::UNAUTHORIZED);

    let public = app.get("/fields", Some("session_id=not-a-real-token")).await;
    assert_eq!(public.status, StatusCode::OK);
}

#[tokio::test]
async fn owners_are_public_and_users_are_admin_only() {
    let app = spawn_app();
    let res = app
        .post(
            "/owners/signup",
            None,
            json!({
                "username": "pitchco",
                "name": "Pitch Co",
                "password": PASSWORD,
                "email": "hello@pitch.example",
                "instagram": "@pitchco"
            }),
        )
        .await;
    assert_eq!(res.status, StatusCode::CREATED);
    assert_eq!(res.body["role"], "owner");

    let owners = app.get("/owners", None).await;
    assert_eq!(owners.status, StatusCode::OK);
    assert_eq!(owners.body[0]["email"], "hello@pitch.example");

    let (_, user_cookie) = app.user_session("ana").await;
    let denied = app.get("/users", Some(&user_cookie)).await;
    assert_eq!(denied.status, StatusCode::FORBIDDEN);

    let (_, admin_cookie) = app.user_session("root").await;
    let listed = app.get("/users", Some(&admin_cookie)).await;
    assert_eq!(listed.status, StatusCode::OK);
    assert_eq!(listed.body.as_array().unwrap().len(), 3);

    let me = app.get("/auth/me", Some(&admin_cookie)).await;
    assert_eq!(me.body["role"], "admin");
}

#[tokio::test]
async fn health_reports_ok() {
    let app = spawn_app();
    let res = app.get("/health", None).await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body, "ok");
}
