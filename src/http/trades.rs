//! Trade submission and ledger read endpoints.

use actix_session::Session;
use actix_web::{get, post, web};
use serde::Deserialize;

use crate::application::{AppError, TradingService};
use crate::domain::{Credit, Money, ProjectId, TradeRequest};

use super::session;

/// Raw trade body. Fields are optional so absence is answered with the
/// boundary's own message instead of a deserializer error.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TradeBody {
    #[serde(default)]
    pub project_id: Option<ProjectId>,
    #[serde(default)]
    pub amount: Option<Money>,
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
}

/// `GET /api/credits`: the caller's ledger records, in creation order.
#[get("/credits")]
pub async fn list_credits(
    service: web::Data<TradingService>,
    session: Session,
) -> Result<web::Json<Vec<Credit>>, AppError> {
    let user_id = session::require_user(&session)?;
    Ok(web::Json(service.user_credits(user_id).await))
}

/// `POST /api/trade`: settle a buy or sell against the listed price.
#[post("/trade")]
pub async fn trade(
    service: web::Data<TradingService>,
    session: Session,
    payload: web::Json<TradeBody>,
) -> Result<web::Json<Credit>, AppError> {
    let user_id = session::require_user(&session)?;
    let body = payload.into_inner();
    let request =
        TradeRequest::try_from_parts(body.project_id, body.amount, body.kind.as_deref())?;
    let credit = service.settle_trade(user_id, request).await?;
    Ok(web::Json(credit))
}
