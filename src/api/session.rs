use std::time::Duration;
use poem::web::cookie::Cookie;
use crate::types::internal::context::ACCESS_TOKEN_COOKIE;

/// `Set-Cookie` value carrying a fresh access token
pub fn session_cookie(token: &str, max_age_seconds: i64, domain: Option<&str>) -> String {
    let mut cookie = base_cookie(token, domain);
    cookie.set_max_age(Duration::from_secs(max_age_seconds.max(0) as u64));
    cookie.to_string()
}

/// `Set-Cookie` value that makes the client drop its access token
pub fn cleared_session_cookie(domain: Option<&str>) -> String {
    let mut cookie = base_cookie("", domain);
    cookie.set_max_age(Duration::ZERO);
    cookie.to_string()
}

fn base_cookie(value: &str, domain: Option<&str>) -> Cookie {
    let mut cookie = Cookie::new_with_str(ACCESS_TOKEN_COOKIE, value);
    cookie.set_path("/");
    cookie.set_http_only(true);
    if let Some(domain) = domain {
        cookie.set_domain(domain);
    }
    cookie
}
