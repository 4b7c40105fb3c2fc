//! Consensus and badge thresholds.
//!
//! The numbers here are product policy, not a hard contract, so they can be
//! overridden per deployment through `DINE_*` environment variables.

use std::{env, fmt::Display, str::FromStr};

use tracing::{info, warn};

use crate::error::EngineError;

#[derive(Debug, Clone, PartialEq)]
pub struct RankingPolicy {
    /// Like ratio at or above which consensus is `strong`.
    pub strong_ratio: f32,
    /// Minimum total votes for `strong`.
    pub strong_min_votes: u32,
    /// Like ratio at or above which consensus is `moderate`.
    pub moderate_ratio: f32,
    /// Minimum likes (with zero dislikes) for the `unanimous` flag.
    pub unanimous_min_likes: u32,
    /// Minimum total votes for the `debated` flag.
    pub debated_min_votes: u32,
    /// Maximum likes/dislikes margin for the `debated` flag.
    pub debated_max_margin: u32,
}

impl Default for RankingPolicy {
    fn default() -> Self {
        Self {
            strong_ratio: 0.9,
            strong_min_votes: 3,
            moderate_ratio: 0.66,
            unanimous_min_likes: 3,
            debated_min_votes: 4,
            debated_max_margin: 1,
        }
    }
}

impl RankingPolicy {
    pub fn from_env() -> Self {
        Self {
            strong_ratio: try_load("DINE_STRONG_RATIO", "0.9"),
            strong_min_votes: try_load("DINE_STRONG_MIN_VOTES", "3"),
            moderate_ratio: try_load("DINE_MODERATE_RATIO", "0.66"),
            unanimous_min_likes: try_load("DINE_UNANIMOUS_MIN_LIKES", "3"),
            debated_min_votes: try_load("DINE_DEBATED_MIN_VOTES", "4"),
            debated_max_margin: try_load("DINE_DEBATED_MAX_MARGIN", "1"),
        }
    }

    pub fn validate(&self) -> Result<(), EngineError> {
        if !(0.0..=1.0).contains(&self.strong_ratio) {
            return Err(EngineError::InvalidPolicy(format!(
                "strong_ratio {} outside [0, 1]",
                self.strong_ratio
            )));
        }

        if !(0.0..=1.0).contains(&self.moderate_ratio) {
            return Err(EngineError::InvalidPolicy(format!(
                "moderate_ratio {} outside [0, 1]",
                self.moderate_ratio
            )));
        }

        if self.moderate_ratio > self.strong_ratio {
            return Err(EngineError::InvalidPolicy(format!(
                "moderate_ratio {} above strong_ratio {}",
                self.moderate_ratio, self.strong_ratio
            )));
        }

        Ok(())
    }
}

fn var(key: &str) -> Result<String, ()> {
    env::var(key).map_err(|_| {
        info!("Environment variable {key} not found, using default");
    })
}

fn try_load<T: FromStr>(key: &str, default: &str) -> T
where
    T::Err: Display,
{
    var(key)
        .unwrap_or_else(|_| default.to_string())
        .parse()
        .map_err(|e| {
            warn!("Invalid {key} value: {e}");
        })
        .expect("Policy misconfigured!")
}
