//! Data models for a user's progress
//!
//! These structures are what display surfaces read and what session
//! scripts carry in and out as JSON.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::definitions::ACHIEVEMENTS;

/// Gamification state of the signed-in user
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProgress {
    /// 0 means below level 1
    #[serde(default)]
    pub level: u32,
    /// Cumulative lifetime experience
    #[serde(default)]
    pub experience: u64,
    #[serde(default)]
    pub points: u64,
    /// Insertion order is display order
    #[serde(default)]
    pub badges: Vec<Badge>,
    #[serde(default)]
    pub achievements: Vec<Achievement>,
    #[serde(default, alias = "travelsMiles")]
    pub travel_miles: u64,
    #[serde(default)]
    pub connections_count: u64,
}

impl UserProgress {
    /// Fresh user with every catalog achievement in its incomplete state
    pub fn with_catalog() -> Self {
        Self {
            achievements: ACHIEVEMENTS.iter().map(|t| t.instantiate()).collect(),
            ..Self::default()
        }
    }

    pub fn has_badge(&self, id: &str) -> bool {
        self.badges.iter().any(|b| b.id == id)
    }

    pub fn achievement(&self, id: &str) -> Option<&Achievement> {
        self.achievements.iter().find(|a| a.id == id)
    }

    pub fn completed_count(&self) -> usize {
        self.achievements.iter().filter(|a| a.completed).count()
    }
}

/// A permanently unlocked status marker
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Badge {
    pub id: String,
    pub name: String,
    pub description: String,
    pub icon: String,
    pub unlocked_at: DateTime<Utc>,
}

impl Badge {
    /// Create a badge unlocked now
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        description: impl Into<String>,
        icon: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: description.into(),
            icon: icon.into(),
            unlocked_at: Utc::now(),
        }
    }
}

/// A goal that grants `reward` points once completed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Achievement {
    pub id: String,
    pub title: String,
    pub description: String,
    pub reward: u64,
    #[serde(default)]
    pub completed: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<DateTime<Utc>>,
}

impl Achievement {
    /// Mark as completed. Completion is one-way.
    pub(crate) fn mark_completed(&mut self, at: DateTime<Utc>) {
        self.completed = true;
        self.completed_at = Some(at);
    }
}
