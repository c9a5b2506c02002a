//! Shared harness: in-memory server driven through `oneshot`

#![allow(dead_code)]

use axum::Router;
use axum::body::Body;
use http::header::{CONTENT_TYPE, COOKIE, LOCATION, SET_COOKIE};
use http::{Method, Request, Response, StatusCode};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tempfile::TempDir;
use tower::ServiceExt;
use wermi_server::{Config, ServerState, build_app};

pub const PASSWORD: &str = "Abcdef1!";

pub struct TestApp {
    pub state: ServerState,
    app: Router,
    _dir: TempDir,
}

impl TestApp {
    pub async fn new() -> Self {
        Self::with_config(|_| {}).await
    }

    pub async fn with_config(adjust: impl FnOnce(&mut Config)) -> Self {
        let dir = tempfile::tempdir().unwrap();
        let mut config = Config::for_tests(dir.path().to_string_lossy().to_string());
        adjust(&mut config);
        let state = ServerState::in_memory(config).await.unwrap();
        let app = build_app(state.clone());
        Self {
            state,
            app,
            _dir: dir,
        }
    }

    /// Router handle for requests driven from spawned tasks
    pub fn router(&self) -> Router {
        self.app.clone()
    }

    pub async fn send(&self, request: Request<Body>) -> Response<Body> {
        self.app.clone().oneshot(request).await.unwrap()
    }

    pub async fn get(&self, path: &str, cookie: Option<&str>) -> Response<Body> {
        let mut builder = Request::builder().method(Method::GET).uri(path);
        if let Some(cookie) = cookie {
            builder = builder.header(COOKIE, cookie);
        }
        self.send(builder.body(Body::empty()).unwrap()).await
    }

    pub async fn post(&self, path: &str, body: Value, cookie: Option<&str>) -> Response<Body> {
        let mut request = json_post(path, &body);
        if let Some(cookie) = cookie {
            request
                .headers_mut()
                .insert(COOKIE, cookie.parse().unwrap());
        }
        self.send(request).await
    }

    /// Register a restaurant through the form endpoint
    pub async fn register(&self, business_name: &str, email: &str) {
        let response = self
            .post("/auth/register", register_body(business_name, email), None)
            .await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    /// Log in and return the `Cookie` header value plus the redirect target
    pub async fn login(&self, email: &str, password: &str) -> (String, String) {
        let response = self
            .post(
                "/auth/login",
                json!({ "email": email, "password": password }),
                None,
            )
            .await;
        assert_eq!(response.status(), StatusCode::OK);
        let cookie = session_cookie(&response).expect("login sets the session cookie");
        let body = body_json(response).await;
        let target = body["data"]["redirectUrl"].as_str().unwrap().to_string();
        (cookie, target)
    }

    /// Walk an owner through every setup step
    pub async fn complete_setup(&self, cookie: &str) {
        let steps = [
            ("/setup/basic-info", basic_info_body()),
            ("/setup/hours", json!({ "businessHours": week() })),
            ("/setup/menu/categories", json!({ "name": "Mains" })),
            (
                "/setup/menu/items",
                json!({ "name": "Margherita", "price": 12.5, "category": "Mains" }),
            ),
            ("/setup/complete", json!({})),
        ];
        for (path, body) in steps {
            let response = self.post(path, body, Some(cookie)).await;
            assert_eq!(response.status(), StatusCode::OK, "{path}");
        }
    }
}

pub fn json_post(path: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri(path)
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub fn register_body(business_name: &str, email: &str) -> Value {
    json!({
        "businessName": business_name,
        "ownerName": "Joe Smith",
        "email": email,
        "password": PASSWORD,
        "phoneNumber": "+250700000000",
        "address": "123 Main Street",
    })
}

pub fn basic_info_body() -> Value {
    json!({
        "cuisine": ["Italian"],
        "settings": {
            "currency": "USD",
            "timezone": "Africa/Kigali",
            "taxRate": 18,
            "serviceCharge": 5,
        }
    })
}

pub fn week() -> Value {
    let days: Vec<Value> = (0..7)
        .map(|day| json!({ "day": day, "open": "09:00", "close": "22:00" }))
        .collect();
    Value::Array(days)
}

/// `wermi_session=<token>` from a response, if it sets a non-empty one
pub fn session_cookie<B>(response: &Response<B>) -> Option<String> {
    response
        .headers()
        .get_all(SET_COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .filter_map(|v| v.split(';').next())
        .find(|pair| pair.starts_with("wermi_session=") && pair.len() > "wermi_session=".len())
        .map(str::to_string)
}

/// Whether the response removes the session cookie
pub fn clears_session<B>(response: &Response<B>) -> bool {
    response
        .headers()
        .get_all(SET_COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .any(|v| v.starts_with("wermi_session=;") && v.contains("Max-Age=0"))
}

pub fn location<B>(response: &Response<B>) -> Option<&str> {
    response
        .headers()
        .get(LOCATION)
        .and_then(|v| v.to_str().ok())
}

pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
