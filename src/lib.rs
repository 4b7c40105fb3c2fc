//! # Dine
//!
//! Ranking core for a restaurant-discovery app built around shared "plans":
//! groups collect restaurants into a plan, members vote like/dislike, and the
//! app shows a ranked list with consensus labels and badges.
//!
//!
//!
//! # Design
//!
//! Everything here is synchronous, in-memory computation. Persistence,
//! realtime transport, and rendering belong to the host app; it fetches rows,
//! hands them over, and displays the output.
//!
//! - `ranking` is the core: votes in, deterministic ranked list out. It is a
//!   pure function, so the host can recompute it on every realtime change
//!   event without coordination.
//! - `discovery` builds the catalog-wide trending and new-and-notable
//!   sections. The caller owns the claimed-id set that keeps the two sections
//!   disjoint, so concurrent views never bleed into each other.
//! - `city` classifies rows into the nyc/la views from whatever location
//!   fields the store happens to have filled in.
//!
//!
//!
//! # Data Quality
//!
//! The hosted store enforces neither vote uniqueness nor referential
//! integrity, so the engine treats both as expected input conditions rather
//! than errors:
//!
//! - Duplicate votes per (user, restaurant) collapse to the most recent one.
//! - Plan entries pointing at deleted restaurants are silently dropped.
//! - Vote rows with missing fields are logged at debug level and skipped.

pub mod city;
pub mod discovery;
pub mod error;
pub mod models;
pub mod policy;
pub mod ranking;
