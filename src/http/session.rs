//! Session helpers so handlers only deal with user ids, not cookie
//! mechanics. Sessions are stateless signed cookies; the store keeps no
//! session table.

use actix_session::{Session, SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::{Key, SameSite};
use sha2::{Digest, Sha512};

use crate::application::AppError;
use crate::domain::UserId;

const USER_ID_KEY: &str = "user_id";

/// Persist the authenticated user's id in the session cookie.
pub fn persist_user(session: &Session, user_id: UserId) -> Result<(), AppError> {
    session
        .insert(USER_ID_KEY, user_id)
        .map_err(|err| AppError::Internal(anyhow::anyhow!("failed to persist session: {err}")))
}

/// The current user id, if the caller is logged in.
pub fn user_id(session: &Session) -> Result<Option<UserId>, AppError> {
    session
        .get::<UserId>(USER_ID_KEY)
        .map_err(|err| AppError::Internal(anyhow::anyhow!("failed to read session: {err}")))
}

/// Require an authenticated caller or answer 401.
pub fn require_user(session: &Session) -> Result<UserId, AppError> {
    user_id(session)?.ok_or(AppError::Unauthorized)
}

/// Drop the session and its cookie.
pub fn clear(session: &Session) {
    session.purge();
}

/// Derive the cookie signing key from a configured secret.
pub fn derive_session_key(secret: &str) -> Key {
    Key::derive_from(Sha512::digest(secret.as_bytes()).as_slice())
}

/// Cookie-session middleware shared by the server and the HTTP tests.
pub fn session_middleware(
    key: Key,
    secure_cookies: bool,
) -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), key)
        .cookie_name("session".into())
        .cookie_path("/".into())
        .cookie_secure(secure_cookies)
        .cookie_http_only(true)
        .cookie_same_site(SameSite::Lax)
        .build()
}
