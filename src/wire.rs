use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{Participant, SectionSummary};

#[derive(Debug, Serialize)]
pub struct LoginRequest<'a> {
    pub username: &'a str,
    pub password: &'a str,
}

#[derive(Debug, Deserialize)]
pub struct BannersResponse {
    #[serde(default)]
    pub banners: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct ParticipantsResponse {
    #[serde(default)]
    pub participants: Vec<Participant>,
}

#[derive(Debug, Deserialize)]
pub struct AddParticipantResponse {
    pub participant: Participant,
}

#[derive(Debug, Deserialize)]
pub struct SectionsResponse {
    #[serde(default)]
    pub sections: Vec<SectionSummary>,
}

#[derive(Debug, Deserialize)]
pub struct ContentResponse {
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub metadata: Value,
    #[serde(default)]
    pub html: String,
}
