// Allow dead_code because these helpers are used across different test files
// which are compiled separately
#![allow(dead_code)]

use std::sync::Arc;

use carbonledger::application::TradingService;
use carbonledger::domain::{NewProject, Project, User};
use carbonledger::io::default_projects;
use carbonledger::storage::Repository;
use rust_decimal::Decimal;

/// Helper to parse a decimal literal
pub fn dec(s: &str) -> Decimal {
    s.parse().unwrap()
}

/// Service over a fresh in-memory store with the default catalogue seeded
pub async fn test_service() -> TradingService {
    let service = TradingService::new(Arc::new(Repository::new()));
    for project in default_projects() {
        service.create_project(project).await;
    }
    service
}

/// Service over a fresh store with no projects at all
pub async fn empty_service() -> TradingService {
    TradingService::new(Arc::new(Repository::new()))
}

/// Register a user; every account starts with a 1000 balance
pub async fn register_user(service: &TradingService, username: &str) -> User {
    service.register(username, "hunter2").await.unwrap()
}

/// Add a catalogue project with the given per-credit price
pub async fn add_project(service: &TradingService, name: &str, price: &str) -> Project {
    service
        .create_project(NewProject {
            name: name.to_string(),
            description: "Test project".to_string(),
            location: "Testland".to_string(),
            credits: dec("1000"),
            price: dec(price),
            image_url: format!("https://example.com/{name}.jpg"),
        })
        .await
}
