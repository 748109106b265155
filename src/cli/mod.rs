use std::env;
use std::fs::File;
use std::sync::Arc;

use actix_web::cookie::Key;
use actix_web::web;
use anyhow::{Context, Result};
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::application::TradingService;
use crate::http;
use crate::io::{Importer, default_projects};
use crate::storage::Repository;

/// Carbonledger - carbon-credit trading service
#[derive(Parser)]
#[command(name = "carbonledger")]
#[command(about = "A carbon-credit trading service with an in-memory ledger")]
#[command(version)]
pub struct Cli {
    /// Address to bind
    #[arg(long, default_value = "127.0.0.1")]
    pub host: String,

    /// Port to listen on
    #[arg(short, long, default_value_t = 5000)]
    pub port: u16,

    /// CSV file with the project catalogue
    /// (name,description,location,credits,price,image_url);
    /// a built-in default catalogue is seeded when omitted
    #[arg(long)]
    pub projects: Option<String>,

    /// Only send the session cookie over HTTPS
    #[arg(long)]
    pub secure_cookies: bool,
}

impl Cli {
    pub async fn run(self) -> Result<()> {
        tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
            )
            .init();

        let repo = Arc::new(Repository::new());
        let service = TradingService::new(repo);
        self.seed_catalogue(&service).await?;

        let key = session_key();
        http::run_server(
            web::Data::new(service),
            &self.host,
            self.port,
            key,
            self.secure_cookies,
        )
        .await
        .context("http server failed")
    }

    async fn seed_catalogue(&self, service: &TradingService) -> Result<()> {
        match &self.projects {
            Some(path) => {
                let file = File::open(path)
                    .with_context(|| format!("failed to open catalogue file {path}"))?;
                let result = Importer::new(service).import_projects_csv(file).await?;
                for error in &result.errors {
                    warn!(line = error.line, error = %error.error, "skipped catalogue row");
                }
                info!(imported = result.imported, path = %path, "catalogue imported");
            }
            None => {
                for project in default_projects() {
                    service.create_project(project).await;
                }
                info!("catalogue seeded with default projects");
            }
        }
        Ok(())
    }
}

/// Cookie signing key: derived from SESSION_SECRET when set, otherwise a
/// fresh random key. With a random key, sessions don't survive a restart.
fn session_key() -> Key {
    match env::var("SESSION_SECRET") {
        Ok(secret) if !secret.is_empty() => http::session::derive_session_key(&secret),
        _ => {
            warn!("SESSION_SECRET not set; using an ephemeral session key");
            Key::generate()
        }
    }
}
