//! Wayfarer - progression core for a travel-social client
//!
//! Travelers earn experience and points, unlock badges and complete
//! achievements. This crate holds the rules behind that:
//!
//! - [`progress`]: the level table, the experience queries derived from it,
//!   and the per-session [`progress::ProgressStore`] that applies updates.
//! - [`session`]: JSON session scripts replayed against a store.
//! - [`format`]: display helpers for points, distances and dates.
//! - [`config`]: TOML configuration for the level table and store guards.

pub mod config;
pub mod format;
pub mod progress;
pub mod session;
