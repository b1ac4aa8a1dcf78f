//! Response models for the Bangumi v0 API.

use serde::{Deserialize, Serialize};

/// Numeric identifier of a subject (anime, book, music, game, real).
pub type SubjectId = u32;

/// A subject as returned by `GET /v0/subjects/{id}`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Subject {
    pub id: SubjectId,
    #[serde(rename = "type")]
    pub subject_type: u32,
    pub name: String,
    pub name_cn: String,
    pub summary: String,
    pub images: Images,
    pub collection: Collection,
    pub tags: Vec<Tag>,
    pub rating: Rating,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Images {
    pub small: String,
    pub medium: String,
    pub large: String,
}

/// Per-state collection counters for a subject.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Collection {
    pub wish: u32,
    pub collect: u32,
    pub doing: u32,
    pub on_hold: u32,
    pub dropped: u32,
}

impl Collection {
    /// Total number of users tracking the subject in any state.
    pub fn total(&self) -> u32 {
        self.wish + self.collect + self.doing + self.on_hold + self.dropped
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Tag {
    pub name: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Rating {
    pub rank: u32,
    pub score: f64,
}

/// One entry from `GET /v0/subjects/{id}/characters`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RelatedCharacter {
    pub actors: Vec<Person>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Person {
    pub id: u32,
    pub name: String,
}

/// Error body the API attaches to non-2xx responses.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ApiErrorBody {
    pub title: String,
    pub description: String,
}
