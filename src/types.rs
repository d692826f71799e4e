use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Body of `GET /health`.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    #[serde(default)]
    pub participants_count: Option<u64>,
    #[serde(default)]
    pub uploads_directory: Option<bool>,
    #[serde(default)]
    pub environment: Option<String>,
}

impl HealthStatus {
    pub fn is_healthy(&self) -> bool {
        self.status == "healthy"
    }
}

/// Body of a successful `POST /login`.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct LoginResponse {
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub user: Option<String>,
}

/// A registered event participant.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Participant {
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub banner: Option<String>,
}

/// Entry of `GET /cms/sections`.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct SectionSummary {
    pub section: String,
    #[serde(default)]
    pub metadata: Value,
}

/// Body of `GET /cms/content/<section>`.
#[derive(Clone, Debug, PartialEq)]
pub struct SectionContent {
    pub section: String,
    pub content: String,
    pub metadata: Value,
    pub html: String,
}
