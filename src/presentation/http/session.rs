use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum::http::{HeaderMap, HeaderValue, StatusCode, header};
use axum::response::{IntoResponse, Response};
use tracing::error;

use crate::application::use_cases::auth::current_user::CurrentUser;
use crate::bootstrap::app_context::AppContext;

pub const SESSION_COOKIE: &str = "session";
pub const FLASH_COOKIE: &str = "flash";

/// The raw session token from the `session` cookie. Handlers that allow
/// anonymous access take `Option<SessionToken>`.
pub struct SessionToken(pub String);

#[axum::async_trait]
impl<S> FromRequestParts<S> for SessionToken
where
    S: Send + Sync,
{
    type Rejection = StatusCode;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .headers
            .get(header::COOKIE)
            .and_then(|v| v.to_str().ok())
            .and_then(|hdr| get_cookie(hdr, SESSION_COOKIE))
            .map(SessionToken)
            .ok_or(StatusCode::UNAUTHORIZED)
    }
}

/// A one-shot notice carried across a redirect.
#[derive(Debug, Clone)]
pub struct Flash {
    pub category: String,
    pub message: String,
}

impl Flash {
    pub fn new(category: &str, message: impl Into<String>) -> Self {
        Self {
            category: category.to_string(),
            message: message.into(),
        }
    }
}

/// The pending flash notice, if the previous response set one.
pub struct IncomingFlash(pub Option<Flash>);

#[axum::async_trait]
impl<S> FromRequestParts<S> for IncomingFlash
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let flash = parts
            .headers
            .get(header::COOKIE)
            .and_then(|v| v.to_str().ok())
            .and_then(|hdr| get_cookie(hdr, FLASH_COOKIE))
            .and_then(|raw| decode_flash(&raw));
        Ok(IncomingFlash(flash))
    }
}

pub(crate) fn get_cookie(cookie_header: &str, name: &str) -> Option<String> {
    for part in cookie_header.split(';') {
        let kv = part.trim();
        if let Some((k, v)) = kv.split_once('=') {
            if k.trim() == name {
                return Some(v.trim().to_string());
            }
        }
    }
    None
}

pub fn session_cookie(token: &str, max_age_secs: i64, secure: bool) -> String {
    let secure_attr = if secure { "; Secure" } else { "" };
    format!(
        "{}={}; HttpOnly{}; Path=/; Max-Age={}; SameSite=Lax",
        SESSION_COOKIE,
        token,
        secure_attr,
        max_age_secs.max(0)
    )
}

pub fn clear_session_cookie(secure: bool) -> String {
    session_cookie("", 0, secure)
}

fn encode_flash(flash: &Flash) -> String {
    format!(
        "{}:{}",
        flash.category,
        urlencoding::encode(&flash.message)
    )
}

fn decode_flash(raw: &str) -> Option<Flash> {
    let (category, encoded) = raw.split_once(':')?;
    let message = urlencoding::decode(encoded).ok()?.into_owned();
    if message.is_empty() {
        return None;
    }
    Some(Flash {
        category: category.to_string(),
        message,
    })
}

fn flash_cookie(flash: &Flash, secure: bool) -> String {
    let secure_attr = if secure { "; Secure" } else { "" };
    format!(
        "{}={}; HttpOnly{}; Path=/; Max-Age=60; SameSite=Lax",
        FLASH_COOKIE,
        encode_flash(flash),
        secure_attr
    )
}

fn clear_flash_cookie(secure: bool) -> String {
    let secure_attr = if secure { "; Secure" } else { "" };
    format!(
        "{}=; HttpOnly{}; Path=/; Max-Age=0; SameSite=Lax",
        FLASH_COOKIE, secure_attr
    )
}

pub(crate) fn set_cookie(headers: &mut HeaderMap, cookie: &str) {
    if let Ok(value) = HeaderValue::from_str(cookie) {
        headers.append(header::SET_COOKIE, value);
    }
}

/// 303 redirect carrying a flash notice for the next page render.
pub fn redirect_with_flash(location: &str, flash: Flash, secure: bool) -> Response {
    let mut headers = HeaderMap::new();
    headers.insert(
        header::LOCATION,
        HeaderValue::from_str(location).unwrap_or(HeaderValue::from_static("/")),
    );
    set_cookie(&mut headers, &flash_cookie(&flash, secure));
    (StatusCode::SEE_OTHER, headers).into_response()
}

pub fn redirect(location: &str) -> Response {
    let mut headers = HeaderMap::new();
    headers.insert(
        header::LOCATION,
        HeaderValue::from_str(location).unwrap_or(HeaderValue::from_static("/")),
    );
    (StatusCode::SEE_OTHER, headers).into_response()
}

/// Renders an HTML page; when a flash notice was consumed its cookie is
/// cleared in the same response.
pub fn render(html: String, consumed_flash: &IncomingFlash, secure: bool) -> Response {
    let mut response = axum::response::Html(html).into_response();
    if consumed_flash.0.is_some() {
        set_cookie(response.headers_mut(), &clear_flash_cookie(secure));
    }
    response
}

/// Resolves the session cookie to the logged-in username, if any. Repository
/// failures are logged and treated as "not logged in".
pub async fn resolve_user(ctx: &AppContext, token: Option<&SessionToken>) -> Option<String> {
    let token = token?;
    let sessions = ctx.session_repo();
    let uc = CurrentUser {
        sessions: sessions.as_ref(),
    };
    match uc.execute(&token.0).await {
        Ok(user) => user,
        Err(e) => {
            error!(error = ?e, "session_lookup_failed");
            None
        }
    }
}

/// The auth gate: either the logged-in username, or a redirect to /login
/// with a notice.
pub async fn require_user(
    ctx: &AppContext,
    token: Option<&SessionToken>,
) -> Result<String, Response> {
    match resolve_user(ctx, token).await {
        Some(username) => Ok(username),
        None => Err(redirect_with_flash(
            "/login",
            Flash::new("danger", "Please log in first!"),
            ctx.cfg.secure_cookies(),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cookie_header_parsing() {
        let hdr = "flash=info%3Ahello; session=abc123; other=x";
        assert_eq!(get_cookie(hdr, SESSION_COOKIE).as_deref(), Some("abc123"));
        assert_eq!(get_cookie(hdr, "other").as_deref(), Some("x"));
        assert_eq!(get_cookie(hdr, "missing"), None);
    }

    #[test]
    fn flash_round_trips_through_cookie_encoding() {
        let flash = Flash::new("success", "You have successfully logged in! WELCOME alicem :)");
        let decoded = decode_flash(&encode_flash(&flash)).unwrap();
        assert_eq!(decoded.category, "success");
        assert_eq!(decoded.message, flash.message);
    }

    #[test]
    fn flash_decoding_rejects_garbage() {
        assert!(decode_flash("no-separator").is_none());
        assert!(decode_flash("info:").is_none());
    }

    #[test]
    fn session_cookie_attributes() {
        let cookie = session_cookie("tok", 3600, true);
        assert!(cookie.contains("HttpOnly"));
        assert!(cookie.contains("Secure"));
        assert!(cookie.contains("Max-Age=3600"));
        assert!(cookie.contains("SameSite=Lax"));

        let cleared = clear_session_cookie(false);
        assert!(cleared.contains("Max-Age=0"));
        assert!(!cleared.contains("Secure"));
    }
}
