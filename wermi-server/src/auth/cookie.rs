//! Session cookie codec
//!
//! `wermi_session=<token>; HttpOnly; SameSite=Lax; Path=/` (+ `Secure` in
//! production).

use http::HeaderMap;
use http::header::COOKIE;

pub const SESSION_COOKIE: &str = "wermi_session";

/// Set-Cookie value carrying a session token
pub fn session_cookie(token: &str, max_age_seconds: i64, secure: bool) -> String {
    let mut cookie = format!(
        "{}={}; HttpOnly; SameSite=Lax; Path=/; Max-Age={}",
        SESSION_COOKIE, token, max_age_seconds
    );
    if secure {
        cookie.push_str("; Secure");
    }
    cookie
}

/// Set-Cookie value that removes the session cookie
pub fn clear_session_cookie(secure: bool) -> String {
    session_cookie("", 0, secure)
}

/// Read a cookie value from all `Cookie` headers
pub fn read_cookie<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| value.trim())
        .filter(|value| !value.is_empty())
}

/// Session token from the `wermi_session` cookie
pub fn session_token(headers: &HeaderMap) -> Option<&str> {
    read_cookie(headers, SESSION_COOKIE)
}
