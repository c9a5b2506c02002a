//! 网关中间件
//!
//! 把 [`gate::evaluate`] 的判定接入 axum:
//! 1. 无条件删除客户端自带的身份头 (`x-user-id` 等)
//! 2. 从 `wermi_session` Cookie 还原会话 (无效 Cookie 视为未登录)
//! 3. 放行时注入身份头和 [`CurrentSession`] 扩展；重定向时返回 307/303

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use http::{HeaderMap, HeaderValue, Method, header::SET_COOKIE};
use shared::Session;

use crate::auth::cookie::{clear_session_cookie, session_token};
use crate::auth::extractor::CurrentSession;
use crate::auth::gate::{self, GateDecision};
use crate::core::ServerState;
use crate::security_log;

/// 页面网关中间件
pub async fn page_gate(State(state): State<ServerState>, mut req: Request, next: Next) -> Response {
    strip_identity_headers(req.headers_mut());

    let path = req.uri().path().to_string();
    if !gate::is_gated(&path) {
        return next.run(req).await;
    }

    let (session, stale_cookie) = match session_token(req.headers()) {
        Some(token) => match state.session_service.verify(token) {
            Ok(session) => (session, false),
            Err(e) => {
                security_log!(
                    "WARN",
                    "session_rejected",
                    error = format!("{}", e),
                    path = path.clone()
                );
                (Session::anonymous(), true)
            }
        },
        None => (Session::anonymous(), false),
    };

    let outcome = gate::evaluate(&path, &session, &state.onboarding()).await;
    tracing::debug!(path = %path, state = ?outcome.state, "Gate evaluated");

    let secure = state.config.is_production();
    let mut response = match outcome.decision {
        GateDecision::Allow { forward } => {
            if let Some(session) = forward {
                forward_identity(req.headers_mut(), &session);
                req.extensions_mut().insert(CurrentSession(session));
            }
            next.run(req).await
        }
        GateDecision::Redirect {
            location,
            clear_session,
        } => {
            if clear_session {
                security_log!(
                    "WARN",
                    "session_restaurant_missing",
                    restaurant_id = session.restaurant_id.clone(),
                    path = path.clone()
                );
            }
            let mut response = redirect(req.method(), location);
            if clear_session && !stale_cookie {
                append_clear_cookie(&mut response, secure);
            }
            response
        }
    };

    if stale_cookie {
        append_clear_cookie(&mut response, secure);
    }
    response
}

/// GET/HEAD 保持 307；表单提交改为 303，浏览器随后以 GET 访问目标页
fn redirect(method: &Method, location: &'static str) -> Response {
    if method == Method::GET || method == Method::HEAD {
        Redirect::temporary(location).into_response()
    } else {
        Redirect::to(location).into_response()
    }
}

fn append_clear_cookie(response: &mut Response, secure: bool) {
    if let Ok(value) = HeaderValue::from_str(&clear_session_cookie(secure)) {
        response.headers_mut().append(SET_COOKIE, value);
    }
}

/// 删除客户端伪造的身份头
pub fn strip_identity_headers(headers: &mut HeaderMap) {
    for name in gate::IDENTITY_HEADERS {
        headers.remove(name);
    }
}

/// 注入网关确认过的身份头
pub fn forward_identity(headers: &mut HeaderMap, session: &Session) {
    let mut set = |name: &'static str, value: &str| {
        if let Ok(value) = HeaderValue::from_str(value) {
            headers.insert(name, value);
        }
    };

    set(gate::HEADER_USER_ID, &session.user_id);
    set(gate::HEADER_RESTAURANT_ID, &session.restaurant_id);
    if let Some(staff_id) = &session.staff_id {
        set(gate::HEADER_STAFF_ID, staff_id);
    }
    if let Some(role) = session.role {
        set(gate::HEADER_USER_ROLE, role.as_str());
    }
}
