//! Page gate behaviour through the full router

mod common;

use axum::body::Body;
use common::{TestApp, body_json, clears_session, location, session_cookie};
use http::{Method, Request, StatusCode};
use serde_json::json;
use shared::{Role, Session};

#[tokio::test]
async fn public_pages_open_without_session() {
    let app = TestApp::new().await;
    for path in ["/", "/auth/login", "/auth/register", "/auth/forgot-password"] {
        let response = app.get(path, None).await;
        assert_eq!(response.status(), StatusCode::OK, "{path}");
    }
}

#[tokio::test]
async fn anonymous_requests_go_to_login() {
    let app = TestApp::new().await;
    for path in ["/dashboard", "/setup", "/setup/hours", "/setup/menu", "/dashboard/staff"] {
        let response = app.get(path, None).await;
        assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT, "{path}");
        assert_eq!(location(&response), Some("/auth/login"), "{path}");
    }

    // auth 前缀的页面放行，由处理函数自己要求会话
    let response = app.get("/auth/role", None).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn anonymous_form_post_is_redirected_with_see_other() {
    let app = TestApp::new().await;
    let response = app
        .post("/setup/hours", json!({ "businessHours": [] }), None)
        .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), Some("/auth/login"));
}

#[tokio::test]
async fn forged_identity_headers_are_ignored() {
    let app = TestApp::new().await;
    let request = Request::builder()
        .method(Method::GET)
        .uri("/dashboard")
        .header("x-user-id", "forged")
        .header("x-restaurant-id", "forged")
        .header("x-user-role", "OWNER")
        .body(Body::empty())
        .unwrap();
    let response = app.send(request).await;
    assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(location(&response), Some("/auth/login"));
}

#[tokio::test]
async fn tampered_cookie_is_anonymous_and_cleared() {
    let app = TestApp::new().await;
    let response = app
        .get("/dashboard", Some("wermi_session=not-a-token"))
        .await;
    assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(location(&response), Some("/auth/login"));
    assert!(clears_session(&response));

    // 公开页面同样清除
    let response = app.get("/", Some("wermi_session=not-a-token")).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(clears_session(&response));
}

#[tokio::test]
async fn session_for_deleted_restaurant_is_dropped_on_auth_pages() {
    let app = TestApp::new().await;
    let token = app
        .state
        .session_service
        .issue(&Session::owner("ghost-restaurant"))
        .unwrap();
    let cookie = format!("wermi_session={token}");

    let response = app.get("/auth/login", Some(&cookie)).await;
    assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(location(&response), Some("/auth/login"));
    assert!(clears_session(&response));
}

#[tokio::test]
async fn session_for_deleted_restaurant_is_dropped_on_dashboard() {
    let app = TestApp::new().await;
    let sessions = [
        Session::owner("ghost-restaurant"),
        Session::staff("ghost-restaurant", "ghost-waiter", Role::Waiter),
    ];

    for session in sessions {
        let token = app.state.session_service.issue(&session).unwrap();
        let cookie = format!("wermi_session={token}");

        let response = app.get("/dashboard", Some(&cookie)).await;
        assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT, "{session:?}");
        assert_eq!(location(&response), Some("/auth/login"));
        assert!(clears_session(&response));
    }
}

#[tokio::test]
async fn logged_in_owner_is_bounced_off_auth_pages() {
    let app = TestApp::new().await;
    app.register("Joe's", "joe@x.com").await;
    let (cookie, _) = app.login("joe@x.com", common::PASSWORD).await;

    for path in ["/auth/login", "/auth/register", "/auth/forgot-password"] {
        let response = app.get(path, Some(&cookie)).await;
        assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT, "{path}");
        assert_eq!(location(&response), Some("/setup"), "{path}");
    }

    app.complete_setup(&cookie).await;
    let response = app.get("/auth/login", Some(&cookie)).await;
    assert_eq!(location(&response), Some("/dashboard"));

    // 首页不属于 auth 前缀
    let response = app.get("/", Some(&cookie)).await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn logout_is_idempotent() {
    let app = TestApp::new().await;
    for _ in 0..2 {
        let response = app.post("/logout", json!({}), None).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert!(clears_session(&response));
    }

    app.register("Joe's", "joe@x.com").await;
    let (cookie, _) = app.login("joe@x.com", common::PASSWORD).await;
    let response = app.post("/logout", json!({}), Some(&cookie)).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(clears_session(&response));
    assert!(session_cookie(&response).is_none());

    // 登出后浏览器只剩空 Cookie，受保护页面与从未登录一致
    for path in ["/dashboard", "/setup/hours"] {
        let response = app.get(path, Some("wermi_session=")).await;
        assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT, "{path}");
        assert_eq!(location(&response), Some("/auth/login"), "{path}");
    }
}

#[tokio::test]
async fn profile_status_uses_bearer_or_cookie() {
    let app = TestApp::new().await;
    app.register("Joe's", "joe@x.com").await;
    let (cookie, _) = app.login("joe@x.com", common::PASSWORD).await;
    let token = cookie.trim_start_matches("wermi_session=").to_string();

    let response = app.get("/api/profile/status", None).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let request = Request::builder()
        .uri("/api/profile/status")
        .header("authorization", format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap();
    let response = app.send(request).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, json!({ "isComplete": false }));

    app.complete_setup(&cookie).await;
    let response = app.get("/api/profile/status", Some(&cookie)).await;
    assert_eq!(body_json(response).await, json!({ "isComplete": true }));

    let ghost = app
        .state
        .session_service
        .issue(&Session::owner("ghost-restaurant"))
        .unwrap();
    let request = Request::builder()
        .uri("/api/profile/status")
        .header("authorization", format!("Bearer {ghost}"))
        .body(Body::empty())
        .unwrap();
    let response = app.send(request).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let request = Request::builder()
        .uri("/api/profile/status")
        .header("authorization", "Bearer garbage")
        .body(Body::empty())
        .unwrap();
    assert_eq!(app.send(request).await.status(), StatusCode::UNAUTHORIZED);
}
