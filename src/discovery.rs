//! # Discovery Sections
//!
//! Catalog-wide "trending" and "new & notable" picks for the home screen.
//!
//! The two sections must never show the same restaurant. Instead of a
//! process-global set of used ids, both selectors take the claimed-id set as
//! an explicit caller-owned parameter: the caller threads one set through both
//! calls for a given view, which keeps the functions pure and safe when
//! several views are being computed at once.

use std::collections::HashSet;

use crate::{
    city::{classify_city, City},
    models::Restaurant,
};

const RATING_WEIGHT: f32 = 0.7;
const RECENCY_WEIGHT: f32 = 0.3;

const SECONDS_PER_DAY: f32 = 86_400.0;

/// Picks up to `limit` restaurants by trending score, skipping ids already in
/// `claimed` and claiming its own picks.
///
/// Score is `0.7 * rating + 0.3 * recency`, where recency is days-since-epoch
/// of `created_at` min-max normalized over the candidate pool.
pub fn trending(
    catalog: &[Restaurant],
    city: Option<City>,
    limit: usize,
    claimed: &mut HashSet<String>,
) -> Vec<Restaurant> {
    let pool = city_pool(catalog, city);

    let (min_days, max_days) = day_bounds(&pool);
    let span = max_days - min_days;

    let mut scored: Vec<(f32, &Restaurant)> = pool
        .into_iter()
        .map(|restaurant| {
            let recency = if span > 0.0 {
                (days_since_epoch(restaurant) - min_days) / span
            } else {
                0.0
            };

            (
                RATING_WEIGHT * restaurant.rating + RECENCY_WEIGHT * recency,
                restaurant,
            )
        })
        .collect();

    scored.sort_by(|a, b| {
        b.0.total_cmp(&a.0)
            .then_with(|| b.1.rating.total_cmp(&a.1.rating))
            .then_with(|| a.1.id.cmp(&b.1.id))
    });

    take_unclaimed(scored.into_iter().map(|(_, r)| r), limit, claimed)
}

/// Picks up to `limit` of the most recently added restaurants, skipping ids
/// already in `claimed` and claiming its own picks.
pub fn new_and_notable(
    catalog: &[Restaurant],
    city: Option<City>,
    limit: usize,
    claimed: &mut HashSet<String>,
) -> Vec<Restaurant> {
    let mut pool = city_pool(catalog, city);

    pool.sort_by(|a, b| {
        b.created_at
            .cmp(&a.created_at)
            .then_with(|| b.rating.total_cmp(&a.rating))
            .then_with(|| a.id.cmp(&b.id))
    });

    take_unclaimed(pool.into_iter(), limit, claimed)
}

fn city_pool(catalog: &[Restaurant], city: Option<City>) -> Vec<&Restaurant> {
    catalog
        .iter()
        .filter(|restaurant| match city {
            Some(wanted) => classify_city(restaurant) == Some(wanted),
            None => true,
        })
        .collect()
}

fn take_unclaimed<'a>(
    ordered: impl Iterator<Item = &'a Restaurant>,
    limit: usize,
    claimed: &mut HashSet<String>,
) -> Vec<Restaurant> {
    let mut picks = Vec::new();

    for restaurant in ordered {
        if picks.len() == limit {
            break;
        }

        if claimed.contains(&restaurant.id) {
            continue;
        }

        claimed.insert(restaurant.id.clone());
        picks.push(restaurant.clone());
    }

    picks
}

fn days_since_epoch(restaurant: &Restaurant) -> f32 {
    restaurant.created_at.timestamp() as f32 / SECONDS_PER_DAY
}

fn day_bounds(pool: &[&Restaurant]) -> (f32, f32) {
    let mut min_days = f32::MAX;
    let mut max_days = f32::MIN;

    for restaurant in pool {
        let days = days_since_epoch(restaurant);
        min_days = min_days.min(days);
        max_days = max_days.max(days);
    }

    if pool.is_empty() {
        (0.0, 0.0)
    } else {
        (min_days, max_days)
    }
}
