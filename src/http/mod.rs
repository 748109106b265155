//! HTTP boundary: actix-web endpoints over the trading service, with
//! cookie-session authentication.

pub mod auth;
pub mod error;
pub mod projects;
pub mod session;
pub mod trades;

use actix_web::cookie::Key;
use actix_web::{App, HttpServer, web};
use tracing::info;

use crate::application::{AppError, TradingService};

/// Register the `/api` scope on an app. Shared between the server and the
/// HTTP tests so both exercise the same wiring.
pub fn configure(
    service: web::Data<TradingService>,
    key: Key,
    secure_cookies: bool,
) -> impl FnOnce(&mut web::ServiceConfig) {
    move |cfg| {
        cfg.service(
            web::scope("/api")
                .app_data(service)
                .app_data(json_config())
                .wrap(session::session_middleware(key, secure_cookies))
                .service(auth::register)
                .service(auth::login)
                .service(auth::logout)
                .service(auth::current_user)
                .service(projects::list_projects)
                .service(projects::get_project)
                .service(trades::list_credits)
                .service(trades::trade),
        );
    }
}

/// A body that fails to deserialize is answered like absent fields, the
/// way the original boundary treated anything it couldn't read.
fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|_err, _req| AppError::MissingFields.into())
}

/// Bind and run the server until shutdown.
pub async fn run_server(
    service: web::Data<TradingService>,
    host: &str,
    port: u16,
    key: Key,
    secure_cookies: bool,
) -> std::io::Result<()> {
    info!(host, port, "starting http server");
    HttpServer::new(move || {
        App::new().configure(configure(service.clone(), key.clone(), secure_cookies))
    })
    .bind((host, port))?
    .run()
    .await
}
