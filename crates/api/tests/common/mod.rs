#![allow(dead_code)]

use api::app::build_router;
use api::config::AppConfig;
use api::AppState;
use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use infra::store::MemoryStore;
use serde_json::{json, Value};
use tower::ServiceExt;
use uuid::Uuid;

pub const PASSWORD: &str = "secret1";
pub const DAY: &str = "2023-10-21";

pub fn test_config() -> AppConfig {
    AppConfig {
        cookie_secure: false,
        bcrypt_cost: 4,
        rate_limit_auth: false,
        admin_usernames: vec!["root".to_string()],
        ..AppConfig::default()
    }
}

pub struct TestApp {
    pub router: Router,
    pub store: MemoryStore,
}

pub struct TestResponse {
    pub status: StatusCode,
    pub body: Value,
    pub set_cookie: Option<String>,
}

pub fn spawn_app() -> TestApp {
    spawn_app_with(test_config())
}

pub fn spawn_app_with(config: AppConfig) -> TestApp {
    let store = MemoryStore::new();
    let router = build_router(AppState::new(store.clone(), config));
    TestApp { router, store }
}

/// `2023-10-21T{hh:mm}:00`
pub fn at(hh_mm: &str) -> String {
    format!("{DAY}T{hh_mm}:00")
}

impl TestApp {
    pub async fn send(
        &self,
        method: Method,
        uri: &str,
        cookie: Option<&str>,
        body: Option<Value>,
    ) -> TestResponse {
        self.send_raw(method, uri, cookie, body.map(|json| json.to_string()))
            .await
    }

    /// Like `send`, but the body goes out verbatim as `application/json`.
    pub async fn send_raw(
        &self,
        method: Method,
        uri: &str,
        cookie: Option<&str>,
        body: Option<String>,
    ) -> TestResponse {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        let request = match body {
            Some(text) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(text))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let set_cookie = response
            .headers()
            .get(header::SET_COOKIE)
            .map(|v| v.to_str().unwrap().to_string());
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            match serde_json::from_slice(&bytes) {
                Ok(json) => json,
                Err(_) => {
                    let text = String::from_utf8_lossy(&bytes).into_owned();
                    // Every error response carries a JSON body.
                    assert!(
                        !status.is_client_error() && !status.is_server_error(),
                        "{status} with a non-JSON body: {text}"
                    );
                    Value::String(text)
                }
            }
        };

        TestResponse {
            status,
            body,
            set_cookie,
        }
    }

    pub async fn get(&self, uri: &str, cookie: Option<&str>) -> TestResponse {
        self.send(Method::GET, uri, cookie, None).await
    }

    pub async fn post(&self, uri: &str, cookie: Option<&str>, body: Value) -> TestResponse {
        self.send(Method::POST, uri, cookie, Some(body)).await
    }

    pub async fn put(&self, uri: &str, cookie: Option<&str>, body: Value) -> TestResponse {
        self.send(Method::PUT, uri, cookie, Some(body)).await
    }

    pub async fn delete(&self, uri: &str, cookie: Option<&str>) -> TestResponse {
        self.send(Method::DELETE, uri, cookie, None).await
    }

    pub async fn signup(&self, path: &str, username: &str) -> Uuid {
        let res = self
            .post(
                path,
                None,
                json!({ "username": username, "name": username, "password": PASSWORD }),
            )
            .await;
        assert_eq!(res.status, StatusCode::CREATED, "signup failed: {}", res.body);
        id_of(&res.body)
    }

    /// Log in and return the `session_id=...` pair for the Cookie header.
    pub async fn login(&self, username: &str) -> String {
        let res = self
            .post(
                "/auth/login",
                None,
                json!({ "username": username, "password": PASSWORD }),
            )
            .await;
        assert_eq!(res.status, StatusCode::OK, "login failed: {}", res.body);
        session_pair(res.set_cookie.as_deref().expect("login sets a cookie"))
    }

    pub async fn user_session(&self, username: &str) -> (Uuid, String) {
        let id = self.signup("/users/signup", username).await;
        (id, self.login(username).await)
    }

    pub async fn owner_session(&self, username: &str) -> (Uuid, String) {
        let id = self.signup("/owners/signup", username).await;
        (id, self.login(username).await)
    }

    /// A field open 08:00-22:00 at 26.00 per hour.
    pub async fn create_field(&self, owner_cookie: &str) -> Uuid {
        let res = self
            .post(
                "/fields",
                Some(owner_cookie),
                json!({
                    "name": "Central",
                    "location": "Astana",
                    "surface_type": "artificial",
                    "width": 40.0,
                    "height": 20.0,
                    "hourly_rate": 2600,
                    "start_time": "08:00:00",
                    "end_time": "22:00:00"
                }),
            )
            .await;
        assert_eq!(res.status, StatusCode::CREATED, "field creation failed: {}", res.body);
        id_of(&res.body)
    }

    pub async fn book(&self, cookie: &str, field_id: Uuid, from: &str, to: &str) -> TestResponse {
        self.post(
            "/bookings",
            Some(cookie),
            json!({ "field_id": field_id, "booking_date": at(from), "booked_until": at(to) }),
        )
        .await
    }

    pub async fn set_status(&self, cookie: &str, booking_id: Uuid, status: &str) -> TestResponse {
        self.put(
            &format!("/bookings/{booking_id}"),
            Some(cookie),
            json!({ "status": status }),
        )
        .await
    }
}

pub fn id_of(body: &Value) -> Uuid {
    body["id"]
        .as_str()
        .and_then(|s| s.parse().ok())
        .unwrap_or_else(|| panic!("no id in {body}"))
}

pub fn session_pair(set_cookie: &str) -> String {
    set_cookie.split(';').next().unwrap().trim().to_string()
}

pub fn error_of(body: &Value) -> &str {
    body["error"].as_str().unwrap_or_default()
}
