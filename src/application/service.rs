use std::collections::HashMap;
use std::sync::Arc;

use chrono::Utc;
use tokio::sync::Mutex;
use tracing::{info, warn};

use crate::domain::{
    Credit, NewCredit, NewProject, Project, ProjectId, TradeKind, TradeRequest, User, UserId,
    total_cost,
};
use crate::storage::Repository;

use super::{AppError, auth};

/// Application service providing the trading operations. This is the
/// primary interface for any client of the core (HTTP today).
pub struct TradingService {
    repo: Arc<Repository>,
    /// One lock per user id, held across a settlement's validate-and-apply
    /// sequence. The store itself runs on a multi-threaded runtime, so
    /// without this two concurrent requests could both pass the balance
    /// check and spend the same funds twice.
    settlement_locks: Mutex<HashMap<UserId, Arc<Mutex<()>>>>,
}

impl TradingService {
    /// Create a new trading service on top of the given ledger store.
    pub fn new(repo: Arc<Repository>) -> Self {
        Self {
            repo,
            settlement_locks: Mutex::new(HashMap::new()),
        }
    }

    // ========================
    // Account operations
    // ========================

    /// Register a new user. Usernames are unique; the password is stored
    /// as an Argon2 hash.
    pub async fn register(&self, username: &str, password: &str) -> Result<User, AppError> {
        if username.trim().is_empty() || password.is_empty() {
            return Err(AppError::MissingFields);
        }
        if self.repo.get_user_by_username(username).await.is_some() {
            return Err(AppError::UsernameTaken);
        }

        let password_hash = auth::hash_password(password)?;
        let user = self.repo.create_user(username, &password_hash).await;
        info!(user_id = user.id, username, "user registered");
        Ok(user)
    }

    /// Verify credentials. Unknown usernames and wrong passwords yield the
    /// same error.
    pub async fn authenticate(&self, username: &str, password: &str) -> Result<User, AppError> {
        let Some(user) = self.repo.get_user_by_username(username).await else {
            return Err(AppError::InvalidCredentials);
        };
        if auth::verify_password(password, &user.password)? {
            Ok(user)
        } else {
            Err(AppError::InvalidCredentials)
        }
    }

    /// Resolve the user behind an authenticated session. A stale session
    /// id (store restarted, cookie survived) reads as unauthenticated.
    pub async fn current_user(&self, user_id: UserId) -> Result<User, AppError> {
        self.repo
            .get_user(user_id)
            .await
            .ok_or(AppError::Unauthorized)
    }

    // ========================
    // Catalogue operations
    // ========================

    pub async fn list_projects(&self) -> Vec<Project> {
        self.repo.get_projects().await
    }

    pub async fn get_project(&self, id: ProjectId) -> Result<Project, AppError> {
        self.repo
            .get_project(id)
            .await
            .ok_or(AppError::ProjectNotFound)
    }

    /// Seed a project into the catalogue.
    pub async fn create_project(&self, new: NewProject) -> Project {
        self.repo.create_project(new).await
    }

    // ========================
    // Trade operations
    // ========================

    /// All of the user's credit records, in creation order.
    pub async fn user_credits(&self, user_id: UserId) -> Vec<Credit> {
        self.repo.get_user_credits(user_id).await
    }

    /// Settle a trade: check the price and balance, then apply the balance
    /// change and ledger append atomically. A failed settlement leaves the
    /// store untouched.
    pub async fn settle_trade(
        &self,
        user_id: UserId,
        request: TradeRequest,
    ) -> Result<Credit, AppError> {
        let lock = self.settlement_lock(user_id).await;
        let _guard = lock.lock().await;

        let project = self
            .repo
            .get_project(request.project_id)
            .await
            .ok_or(AppError::ProjectNotFound)?;
        // Fresh read under the settlement lock: the balance cannot move
        // between this check and apply_trade.
        let user = self
            .repo
            .get_user(user_id)
            .await
            .ok_or(AppError::Unauthorized)?;

        let cost = total_cost(request.amount, project.price);
        if request.kind == TradeKind::Buy && cost > user.balance {
            warn!(
                user_id,
                project_id = project.id,
                required = %cost,
                balance = %user.balance,
                "trade rejected: insufficient balance"
            );
            return Err(AppError::InsufficientBalance {
                balance: user.balance,
                required: cost,
            });
        }

        let new_balance = match request.kind {
            TradeKind::Buy => user.balance - cost,
            TradeKind::Sell => user.balance + cost,
        };

        let credit = self
            .repo
            .apply_trade(
                user_id,
                new_balance,
                NewCredit {
                    project_id: project.id,
                    user_id,
                    amount: request.amount,
                    price: project.price,
                    kind: request.kind,
                    timestamp: Utc::now(),
                },
            )
            .await
            .ok_or_else(|| anyhow::anyhow!("user {user_id} disappeared during settlement"))?;

        info!(
            user_id,
            project_id = project.id,
            kind = %credit.kind,
            amount = %credit.amount,
            cost = %cost,
            balance = %new_balance,
            "trade settled"
        );
        Ok(credit)
    }

    async fn settlement_lock(&self, user_id: UserId) -> Arc<Mutex<()>> {
        self.settlement_locks
            .lock()
            .await
            .entry(user_id)
            .or_default()
            .clone()
    }
}
