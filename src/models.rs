//! # Data Model
//!
//! In-memory shapes for the ranking engine.
//!
//! The engine consumes already-fetched rows from the hosted store and produces
//! derived, disposable metadata. Nothing here is persisted by the engine.
//!
//! ## Inputs
//! - Restaurant catalog rows (name: **string**, rating: **float**, created_at: **timestamp**, ...)
//! - Collection rows (restaurant_ids: **list of string**)
//! - Vote rows: every field optional since the upstream store does not enforce
//!   completeness or uniqueness. Rows normalize into [`Vote`] or are dropped.
//!
//! ## Outputs
//! - [`RankedRestaurantMeta`]: recomputed on every query, never a source of truth.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::VoteDefect;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Restaurant {
    pub id: String,
    pub name: String,
    pub cuisine: Option<String>,
    pub price_tier: Option<u8>,
    pub address: Option<String>,
    pub neighborhood: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub restaurant_code: Option<String>,
    pub rating: f32,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub image_urls: Vec<String>,
}

/// A shared plan of restaurants. Read-only input to the engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Collection {
    pub id: String,
    pub creator_id: String,
    pub restaurant_ids: Vec<String>,
    #[serde(default)]
    pub member_ids: Vec<String>,
    #[serde(default)]
    pub is_public: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VoteValue {
    Like,
    Dislike,
}

/// A vote row exactly as the store hands it over. Fields may be absent.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct VoteRecord {
    pub restaurant_id: Option<String>,
    pub user_id: Option<String>,
    pub collection_id: Option<String>,
    pub vote: Option<VoteValue>,
    pub timestamp: Option<DateTime<Utc>>,
}

/// A vote that passed normalization: all required fields present and scoped to
/// the collection being ranked.
#[derive(Debug, Clone, PartialEq)]
pub struct Vote {
    pub restaurant_id: String,
    pub user_id: String,
    pub value: VoteValue,
    pub timestamp: Option<DateTime<Utc>>,
}

impl VoteRecord {
    /// Checks the row against the collection being ranked. Defective rows are
    /// reported, not fatal: the engine drops them and keeps going.
    pub fn normalize(&self, collection_id: &str) -> Result<Vote, VoteDefect> {
        match self.collection_id.as_deref() {
            None => return Err(VoteDefect::MissingCollection),
            Some(id) if id != collection_id => {
                return Err(VoteDefect::ForeignCollection(id.to_string()));
            }
            Some(_) => {}
        }

        let restaurant_id = self
            .restaurant_id
            .clone()
            .ok_or(VoteDefect::MissingRestaurant)?;
        let user_id = self.user_id.clone().ok_or(VoteDefect::MissingUser)?;
        let value = self.vote.ok_or(VoteDefect::MissingValue)?;

        Ok(Vote {
            restaurant_id,
            user_id,
            value,
            timestamp: self.timestamp,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Consensus {
    Strong,
    Moderate,
    Mixed,
    Low,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Badge {
    TopChoice,
    GroupFavorite,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Rising,
    Falling,
    Steady,
}

/// Per-restaurant derived record. Recomputed on every query.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedRestaurantMeta {
    pub likes: u32,
    pub dislikes: u32,
    pub net_score: i32,
    pub like_ratio: f32,
    pub approval_percent: u8,
    pub consensus: Consensus,
    pub unanimous: bool,
    pub debated: bool,
    pub badge: Option<Badge>,
    pub trend: Option<Trend>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_record() -> VoteRecord {
        VoteRecord {
            restaurant_id: Some("r1".to_string()),
            user_id: Some("u1".to_string()),
            collection_id: Some("c1".to_string()),
            vote: Some(VoteValue::Like),
            timestamp: None,
        }
    }

    #[test]
    fn test_normalize_complete_row() {
        let vote = full_record().normalize("c1").unwrap();

        assert_eq!(vote.restaurant_id, "r1");
        assert_eq!(vote.user_id, "u1");
        assert_eq!(vote.value, VoteValue::Like);
    }

    #[test]
    fn test_normalize_missing_fields() {
        let mut record = full_record();
        record.user_id = None;
        assert_eq!(record.normalize("c1"), Err(VoteDefect::MissingUser));

        let mut record = full_record();
        record.vote = None;
        assert_eq!(record.normalize("c1"), Err(VoteDefect::MissingValue));

        let mut record = full_record();
        record.restaurant_id = None;
        assert_eq!(record.normalize("c1"), Err(VoteDefect::MissingRestaurant));
    }

    #[test]
    fn test_normalize_foreign_collection() {
        assert_eq!(
            full_record().normalize("other"),
            Err(VoteDefect::ForeignCollection("c1".to_string()))
        );
    }

    #[test]
    fn test_vote_row_from_json() {
        let row = r#"{
            "restaurant_id": "r9",
            "user_id": "u4",
            "collection_id": "c2",
            "vote": "dislike",
            "timestamp": "2025-06-01T12:00:00Z"
        }"#;

        let record: VoteRecord = serde_json::from_str(row).unwrap();

        assert_eq!(record.vote, Some(VoteValue::Dislike));
        assert!(record.timestamp.is_some());
    }
}
