//! Registration, login, and session endpoints.

use actix_session::Session;
use actix_web::{HttpResponse, get, post, web};
use serde::Deserialize;

use crate::application::{AppError, TradingService};
use crate::domain::User;

use super::session;

#[derive(Debug, Deserialize)]
pub struct CredentialsBody {
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

impl CredentialsBody {
    fn into_parts(self) -> Result<(String, String), AppError> {
        match (self.username, self.password) {
            (Some(username), Some(password)) => Ok((username, password)),
            _ => Err(AppError::MissingFields),
        }
    }
}

/// `POST /api/register`: create an account and log it in.
#[post("/register")]
pub async fn register(
    service: web::Data<TradingService>,
    session: Session,
    payload: web::Json<CredentialsBody>,
) -> Result<HttpResponse, AppError> {
    let (username, password) = payload.into_inner().into_parts()?;
    let user = service.register(&username, &password).await?;
    session::persist_user(&session, user.id)?;
    Ok(HttpResponse::Created().json(user))
}

/// `POST /api/login`: verify credentials and establish a session.
#[post("/login")]
pub async fn login(
    service: web::Data<TradingService>,
    session: Session,
    payload: web::Json<CredentialsBody>,
) -> Result<HttpResponse, AppError> {
    let (username, password) = payload.into_inner().into_parts()?;
    let user = service.authenticate(&username, &password).await?;
    session::persist_user(&session, user.id)?;
    Ok(HttpResponse::Ok().json(user))
}

/// `POST /api/logout`: drop the session.
#[post("/logout")]
pub async fn logout(session: Session) -> HttpResponse {
    session::clear(&session);
    HttpResponse::Ok().finish()
}

/// `GET /api/user`: the authenticated caller's account.
#[get("/user")]
pub async fn current_user(
    service: web::Data<TradingService>,
    session: Session,
) -> Result<web::Json<User>, AppError> {
    let user_id = session::require_user(&session)?;
    let user = service.current_user(user_id).await?;
    Ok(web::Json(user))
}
