use std::collections::HashMap;

use tokio::sync::RwLock;

use crate::domain::{Credit, Money, NewCredit, NewProject, Project, ProjectId, User, UserId};

/// In-memory state behind the repository lock.
///
/// Credits live in a Vec so ledger order is insertion order. A single
/// counter assigns identifiers to users, projects, and credit records,
/// mirroring an auto-increment primary key.
#[derive(Debug)]
struct StoreState {
    users: HashMap<UserId, User>,
    projects: HashMap<ProjectId, Project>,
    credits: Vec<Credit>,
    next_id: i64,
}

impl StoreState {
    fn new() -> Self {
        Self {
            users: HashMap::new(),
            projects: HashMap::new(),
            credits: Vec::new(),
            next_id: 1,
        }
    }

    fn alloc_id(&mut self) -> i64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    fn append_credit(&mut self, new: NewCredit) -> Credit {
        let credit = Credit {
            id: self.alloc_id(),
            project_id: new.project_id,
            user_id: new.user_id,
            amount: new.amount,
            price: new.price,
            kind: new.kind,
            timestamp: new.timestamp,
        };
        self.credits.push(credit.clone());
        credit
    }
}

/// The ledger store: users, projects, and the append-only credit ledger.
///
/// Constructed explicitly at startup and shared behind an `Arc`; there is
/// no process-global instance. All mutation goes through the write half of
/// one `RwLock`, so a reader never observes a half-applied trade.
#[derive(Debug)]
pub struct Repository {
    state: RwLock<StoreState>,
}

impl Repository {
    pub fn new() -> Self {
        Self {
            state: RwLock::new(StoreState::new()),
        }
    }

    // ========================
    // User operations
    // ========================

    pub async fn get_user(&self, id: UserId) -> Option<User> {
        self.state.read().await.users.get(&id).cloned()
    }

    /// Linear scan; usernames are unique by registration-time check.
    pub async fn get_user_by_username(&self, username: &str) -> Option<User> {
        self.state
            .read()
            .await
            .users
            .values()
            .find(|user| user.username == username)
            .cloned()
    }

    /// Create a user with a fresh id and the seeded initial balance.
    pub async fn create_user(&self, username: &str, password_hash: &str) -> User {
        let mut state = self.state.write().await;
        let id = state.alloc_id();
        let user = User::new(id, username.to_string(), password_hash.to_string());
        state.users.insert(id, user.clone());
        user
    }

    /// Replace a user's stored balance. No-op if the user is absent.
    pub async fn update_user_balance(&self, user_id: UserId, new_balance: Money) {
        let mut state = self.state.write().await;
        if let Some(user) = state.users.get_mut(&user_id) {
            user.balance = new_balance;
        }
    }

    // ========================
    // Project operations
    // ========================

    pub async fn get_projects(&self) -> Vec<Project> {
        self.state.read().await.projects.values().cloned().collect()
    }

    pub async fn get_project(&self, id: ProjectId) -> Option<Project> {
        self.state.read().await.projects.get(&id).cloned()
    }

    /// Add a project to the catalogue. Only used while seeding at startup.
    pub async fn create_project(&self, new: NewProject) -> Project {
        let mut state = self.state.write().await;
        let project = Project {
            id: state.alloc_id(),
            name: new.name,
            description: new.description,
            location: new.location,
            credits: new.credits,
            price: new.price,
            image_url: new.image_url,
        };
        state.projects.insert(project.id, project.clone());
        project
    }

    // ========================
    // Credit ledger operations
    // ========================

    /// Append a credit record with a fresh id.
    pub async fn create_credit(&self, new: NewCredit) -> Credit {
        self.state.write().await.append_credit(new)
    }

    /// All records for a user, in insertion order.
    pub async fn get_user_credits(&self, user_id: UserId) -> Vec<Credit> {
        self.state
            .read()
            .await
            .credits
            .iter()
            .filter(|credit| credit.user_id == user_id)
            .cloned()
            .collect()
    }

    /// Apply a settled trade: balance write and ledger append in one
    /// critical section, so concurrent readers observe both or neither.
    /// Returns `None` if the user no longer exists (nothing is applied).
    pub async fn apply_trade(
        &self,
        user_id: UserId,
        new_balance: Money,
        credit: NewCredit,
    ) -> Option<Credit> {
        let mut state = self.state.write().await;
        let user = state.users.get_mut(&user_id)?;
        user.balance = new_balance;
        Some(state.append_credit(credit))
    }
}

impl Default for Repository {
    fn default() -> Self {
        Self::new()
    }
}
