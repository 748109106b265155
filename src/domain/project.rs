use serde::{Deserialize, Serialize};

use super::Money;

pub type ProjectId = i64;

/// A conservation project listed in the catalogue. Projects are created at
/// seed/import time and immutable afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: ProjectId,
    pub name: String,
    pub description: String,
    pub location: String,
    /// Total credits the project has available. Informational only; the
    /// pool is not decremented by trades.
    pub credits: Money,
    /// Listed price per credit.
    pub price: Money,
    pub image_url: String,
}

/// A project listing before the repository has assigned it an id.
#[derive(Debug, Clone)]
pub struct NewProject {
    pub name: String,
    pub description: String,
    pub location: String,
    pub credits: Money,
    pub price: Money,
    pub image_url: String,
}
