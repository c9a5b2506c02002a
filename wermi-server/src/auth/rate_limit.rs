//! Application-layer rate limiting for login and registration actions

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};
use shared::{AppError, ErrorCode};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;
use tokio::time::Instant;

use crate::core::ServerState;
use crate::security_log;

const WINDOW_SECS: u64 = 60;

struct IpEntry {
    count: u32,
    window_start: Instant,
}

#[derive(Clone, Default)]
pub struct RateLimiter {
    /// route name -> (IP -> entry)
    inner: Arc<Mutex<HashMap<&'static str, HashMap<String, IpEntry>>>>,
}

impl RateLimiter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` if the request is allowed, `false` if rate-limited.
    pub async fn check(
        &self,
        route: &'static str,
        ip: &str,
        max_requests: u32,
        window_secs: u64,
    ) -> bool {
        let mut map = self.inner.lock().await;
        let route_map = map.entry(route).or_default();
        let now = Instant::now();

        let entry = route_map.entry(ip.to_owned()).or_insert_with(|| IpEntry {
            count: 0,
            window_start: now,
        });

        if now.duration_since(entry.window_start).as_secs() >= window_secs {
            entry.count = 0;
            entry.window_start = now;
        }

        entry.count += 1;
        entry.count <= max_requests
    }

    /// Remove entries older than 5 minutes
    pub async fn cleanup(&self) {
        let mut map = self.inner.lock().await;
        let cutoff = std::time::Duration::from_secs(300);
        let now = Instant::now();

        for route_map in map.values_mut() {
            route_map.retain(|_, entry| now.duration_since(entry.window_start) < cutoff);
        }

        map.retain(|_, route_map| !route_map.is_empty());
    }
}

/// Client IP: X-Forwarded-For first, then peer address
fn extract_ip(request: &Request) -> String {
    if let Some(forwarded) = request.headers().get("x-forwarded-for")
        && let Ok(val) = forwarded.to_str()
        && let Some(first) = val.split(',').next()
    {
        let ip = first.trim();
        if !ip.is_empty() {
            return ip.to_owned();
        }
    }

    request
        .extensions()
        .get::<axum::extract::ConnectInfo<std::net::SocketAddr>>()
        .map(|ci| ci.0.ip().to_string())
        .unwrap_or_else(|| "unknown".to_owned())
}

async fn limit(
    state: &ServerState,
    route: &'static str,
    max_requests: u32,
    request: Request,
    next: Next,
) -> Response {
    // 只限制表单提交，页面本身可随意访问
    if request.method() != http::Method::POST {
        return next.run(request).await;
    }

    let ip = extract_ip(&request);
    if !state
        .rate_limiter
        .check(route, &ip, max_requests, WINDOW_SECS)
        .await
    {
        security_log!("WARN", "rate_limited", route = route, ip = ip.clone());
        return AppError::new(ErrorCode::TooManyRequests).into_response();
    }
    next.run(request).await
}

/// Login: `LOGIN_RATE_LIMIT` requests/minute per IP
pub async fn login_rate_limit(
    State(state): State<ServerState>,
    request: Request,
    next: Next,
) -> Response {
    let max = state.config.login_rate_limit;
    limit(&state, "login", max, request, next).await
}

/// Registration: `REGISTER_RATE_LIMIT` requests/minute per IP
pub async fn register_rate_limit(
    State(state): State<ServerState>,
    request: Request,
    next: Next,
) -> Response {
    let max = state.config.register_rate_limit;
    limit(&state, "register", max, request, next).await
}
