//! # Ranking Engine
//!
//! Turns a collection's restaurants plus its members' votes into a
//! deterministic ranked list with per-restaurant metadata.
//!
//! ## Pipeline
//! 1. Resolve `collection.restaurant_ids` against the catalog. Orphaned ids
//!    are dropped, not errors: the hosted store accumulates stale references
//!    and the engine tolerates them instead of requiring repair sweeps.
//! 2. Deduplicate votes: one active vote per (user, restaurant), latest
//!    timestamp wins. Absent or equal timestamps fall back to input order,
//!    last row wins.
//! 3. Aggregate likes/dislikes and derive net score, like ratio, approval.
//! 4. Classify consensus against the [`RankingPolicy`] thresholds.
//! 5. Sort: net score desc, likes desc, rating desc, name asc, id asc.
//! 6. Assign badges. Badges are informational and never alter order.
//!
//! The whole computation is a pure function of its inputs: no internal state,
//! same inputs always produce the same output.

use std::collections::{hash_map::Entry, HashMap, HashSet};

use chrono::{DateTime, Utc};
use tracing::debug;

use crate::{
    models::{
        Badge, Collection, Consensus, RankedRestaurantMeta, Restaurant, Trend, Vote, VoteRecord,
        VoteValue,
    },
    policy::RankingPolicy,
};

/// One entry of the ranked output, ready for the presentation layer.
#[derive(Debug, Clone, PartialEq)]
pub struct RankedRestaurant {
    pub restaurant: Restaurant,
    pub meta: RankedRestaurantMeta,
}

pub fn rank_collection(
    collection: &Collection,
    catalog: &[Restaurant],
    votes: &[VoteRecord],
    policy: &RankingPolicy,
) -> Vec<RankedRestaurant> {
    let wanted: HashSet<&str> = collection
        .restaurant_ids
        .iter()
        .map(String::as_str)
        .collect();

    let resolved: Vec<&Restaurant> = catalog
        .iter()
        .filter(|restaurant| wanted.contains(restaurant.id.as_str()))
        .collect();

    let found: HashSet<&str> = resolved
        .iter()
        .map(|restaurant| restaurant.id.as_str())
        .collect();

    for orphan in wanted.difference(&found) {
        debug!("Dropping orphaned restaurant reference {orphan}");
    }

    let deduped = dedup_votes(votes, &collection.id);

    let mut tallies: HashMap<&str, Tally> = HashMap::new();
    for vote in &deduped {
        if !found.contains(vote.restaurant_id.as_str()) {
            continue;
        }

        tallies.entry(vote.restaurant_id.as_str()).or_default().add(vote);
    }

    let mut ranked: Vec<RankedRestaurant> = resolved
        .into_iter()
        .map(|restaurant| RankedRestaurant {
            meta: tallies
                .get(restaurant.id.as_str())
                .map(|tally| tally.to_meta(policy))
                .unwrap_or_else(empty_meta),
            restaurant: restaurant.clone(),
        })
        .collect();

    ranked.sort_by(|a, b| {
        b.meta
            .net_score
            .cmp(&a.meta.net_score)
            .then_with(|| b.meta.likes.cmp(&a.meta.likes))
            .then_with(|| b.restaurant.rating.total_cmp(&a.restaurant.rating))
            .then_with(|| a.restaurant.name.cmp(&b.restaurant.name))
            .then_with(|| a.restaurant.id.cmp(&b.restaurant.id))
    });

    assign_badges(&mut ranked);

    ranked
}

/// Collapses duplicate votes down to the active one per (user, restaurant).
///
/// The upstream store does not enforce uniqueness, so this runs on every
/// ranking as a safety net even when the store behaves.
fn dedup_votes(votes: &[VoteRecord], collection_id: &str) -> Vec<Vote> {
    let mut latest: HashMap<(String, String), Vote> = HashMap::new();

    for record in votes {
        let vote = match record.normalize(collection_id) {
            Ok(vote) => vote,
            Err(defect) => {
                debug!("Dropping vote row: {defect}");
                continue;
            }
        };

        let key = (vote.user_id.clone(), vote.restaurant_id.clone());
        match latest.entry(key) {
            Entry::Vacant(entry) => {
                entry.insert(vote);
            }
            Entry::Occupied(mut entry) => {
                // Keep the existing vote only when it is strictly newer;
                // otherwise the row seen later in the input wins.
                let keep_existing = matches!(
                    (entry.get().timestamp, vote.timestamp),
                    (Some(old), Some(new)) if new < old
                );

                if !keep_existing {
                    entry.insert(vote);
                }
            }
        }
    }

    latest.into_values().collect()
}

#[derive(Default)]
struct Tally {
    likes: u32,
    dislikes: u32,
    stamped: Vec<(DateTime<Utc>, String, VoteValue)>,
}

impl Tally {
    fn add(&mut self, vote: &Vote) {
        match vote.value {
            VoteValue::Like => self.likes += 1,
            VoteValue::Dislike => self.dislikes += 1,
        }

        if let Some(at) = vote.timestamp {
            self.stamped.push((at, vote.user_id.clone(), vote.value));
        }
    }

    fn to_meta(&self, policy: &RankingPolicy) -> RankedRestaurantMeta {
        let total = self.likes + self.dislikes;

        let like_ratio = if total == 0 {
            0.0
        } else {
            self.likes as f32 / total as f32
        };

        let (consensus, unanimous, debated) = classify(policy, self.likes, self.dislikes);

        RankedRestaurantMeta {
            likes: self.likes,
            dislikes: self.dislikes,
            net_score: self.likes as i32 - self.dislikes as i32,
            like_ratio,
            approval_percent: (like_ratio * 100.0).round() as u8,
            consensus,
            unanimous,
            debated,
            badge: None,
            trend: trend(&self.stamped),
        }
    }
}

fn empty_meta() -> RankedRestaurantMeta {
    RankedRestaurantMeta {
        likes: 0,
        dislikes: 0,
        net_score: 0,
        like_ratio: 0.0,
        approval_percent: 0,
        consensus: Consensus::Low,
        unanimous: false,
        debated: false,
        badge: None,
        trend: None,
    }
}

fn classify(policy: &RankingPolicy, likes: u32, dislikes: u32) -> (Consensus, bool, bool) {
    let total = likes + dislikes;

    if total == 0 {
        return (Consensus::Low, false, false);
    }

    let ratio = likes as f32 / total as f32;

    if ratio >= policy.strong_ratio && total >= policy.strong_min_votes {
        let unanimous = dislikes == 0 && likes >= policy.unanimous_min_likes;
        return (Consensus::Strong, unanimous, false);
    }

    if ratio >= policy.moderate_ratio {
        return (Consensus::Moderate, false, false);
    }

    let debated =
        total >= policy.debated_min_votes && likes.abs_diff(dislikes) <= policy.debated_max_margin;

    (Consensus::Mixed, false, debated)
}

/// Compares the like ratio of the newer half of timestamped votes against the
/// older half. Needs at least 4 timestamped votes to say anything.
fn trend(stamped: &[(DateTime<Utc>, String, VoteValue)]) -> Option<Trend> {
    if stamped.len() < 4 {
        return None;
    }

    let mut ordered = stamped.to_vec();
    ordered.sort_by(|a, b| a.0.cmp(&b.0).then_with(|| a.1.cmp(&b.1)));

    let mid = ordered.len() / 2;
    let (older, newer) = ordered.split_at(mid);

    let older_likes = older
        .iter()
        .filter(|(_, _, value)| *value == VoteValue::Like)
        .count() as u64;
    let newer_likes = newer
        .iter()
        .filter(|(_, _, value)| *value == VoteValue::Like)
        .count() as u64;

    // Cross-multiplied ratio comparison, keeps it in integers.
    let older_weighted = older_likes * newer.len() as u64;
    let newer_weighted = newer_likes * older.len() as u64;

    if newer_weighted > older_weighted {
        Some(Trend::Rising)
    } else if newer_weighted < older_weighted {
        Some(Trend::Falling)
    } else {
        Some(Trend::Steady)
    }
}

fn assign_badges(ranked: &mut [RankedRestaurant]) {
    let mut top_claimed = false;

    for entry in ranked.iter_mut() {
        if !top_claimed && entry.meta.likes + entry.meta.dislikes >= 1 {
            entry.meta.badge = Some(Badge::TopChoice);
            top_claimed = true;
            continue;
        }

        if entry.meta.unanimous {
            entry.meta.badge = Some(Badge::GroupFavorite);
        }
    }
}
