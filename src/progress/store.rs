//! Progress Store - state transitions for the signed-in user
//!
//! Owns the optional `UserProgress` of one session and applies
//! experience, points, badge and achievement updates to it.

use std::sync::Arc;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use super::levels::{LevelProgress, LevelTable};
use super::models::{Achievement, Badge, UserProgress};

/// Guards applied on top of the compatible store behavior
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorePolicy {
    /// Skip `unlock_badge` when a badge with the same id is already held
    #[serde(default)]
    pub reject_duplicate_badges: bool,

    /// Skip `complete_achievement` (and its reward) when the stored
    /// achievement is already completed
    #[serde(default)]
    pub idempotent_completion: bool,
}

impl StorePolicy {
    /// Both guards enabled
    pub fn hardened() -> Self {
        Self {
            reject_duplicate_badges: true,
            idempotent_completion: true,
        }
    }
}

/// A level up event
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LevelUp {
    pub old_level: u32,
    pub new_level: u32,
    /// Sum of the rewards of every level gained. Not granted automatically.
    pub reward: u64,
}

/// Events produced by an applied store operation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum ProgressEvent {
    UserSet { level: u32, experience: u64 },
    UserCleared,
    ExperienceGained { amount: u64, total: u64 },
    LevelUp(LevelUp),
    /// The recomputed level is below the stored one (a `set_user` snapshot
    /// whose level disagreed with its experience)
    LevelCorrected { old_level: u32, new_level: u32 },
    PointsAwarded { amount: u64, total: u64 },
    BadgeUnlocked { id: String },
    AchievementCompleted { id: String, reward: u64, matched: bool },
}

/// Why an operation left the state untouched
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    NoActiveUser,
    DuplicateBadge,
    AlreadyCompleted,
}

/// Result of a store operation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", content = "detail", rename_all = "snake_case")]
pub enum StoreOutcome {
    Applied(Vec<ProgressEvent>),
    Skipped(SkipReason),
}

impl StoreOutcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, Self::Applied(_))
    }

    pub fn events(&self) -> &[ProgressEvent] {
        match self {
            Self::Applied(events) => events,
            Self::Skipped(_) => &[],
        }
    }

    pub fn level_up(&self) -> Option<&LevelUp> {
        self.events().iter().find_map(|e| match e {
            ProgressEvent::LevelUp(level_up) => Some(level_up),
            _ => None,
        })
    }
}

/// Single-owner container for one session's progress
#[derive(Debug, Clone)]
pub struct ProgressStore {
    table: Arc<LevelTable>,
    policy: StorePolicy,
    user: Option<UserProgress>,
}

impl Default for ProgressStore {
    fn default() -> Self {
        Self::new(LevelTable::shared_default(), StorePolicy::default())
    }
}

impl ProgressStore {
    /// Create an empty store (no user loaded)
    pub fn new(table: Arc<LevelTable>, policy: StorePolicy) -> Self {
        Self {
            table,
            policy,
            user: None,
        }
    }

    pub fn table(&self) -> &LevelTable {
        &self.table
    }

    pub fn policy(&self) -> StorePolicy {
        self.policy
    }

    pub fn user(&self) -> Option<&UserProgress> {
        self.user.as_ref()
    }

    pub fn is_active(&self) -> bool {
        self.user.is_some()
    }

    /// Engine view of the current user's experience
    pub fn level_progress(&self) -> Option<LevelProgress> {
        self.user.as_ref().map(|u| self.table.progress(u.experience))
    }

    // ========================================
    // SESSION LIFECYCLE
    // ========================================

    /// Replace the whole state
    pub fn set_user(&mut self, progress: UserProgress) -> StoreOutcome {
        debug!(
            "Loaded user at level {} with {} exp",
            progress.level, progress.experience
        );
        let event = ProgressEvent::UserSet {
            level: progress.level,
            experience: progress.experience,
        };
        self.user = Some(progress);
        StoreOutcome::Applied(vec![event])
    }

    /// End the session, returning whatever was loaded
    pub fn clear_user(&mut self) -> Option<UserProgress> {
        let previous = self.user.take();
        if previous.is_some() {
            debug!("Cleared user progress");
        }
        previous
    }

    // ========================================
    // XP & POINTS
    // ========================================

    /// Grant experience and recompute the level from the new total
    pub fn add_experience(&mut self, amount: u64) -> StoreOutcome {
        let table = Arc::clone(&self.table);
        let Some(user) = self.user.as_mut() else {
            return skip("add_experience", SkipReason::NoActiveUser);
        };

        let old_level = user.level;
        user.experience = user.experience.saturating_add(amount);
        user.level = table.calculate_level(user.experience);

        let mut events = vec![ProgressEvent::ExperienceGained {
            amount,
            total: user.experience,
        }];

        if user.level > old_level {
            let level_up = LevelUp {
                old_level,
                new_level: user.level,
                reward: table.rewards_between(old_level, user.level),
            };
            info!(
                "Level up: {} -> {} ({} exp)",
                old_level, user.level, user.experience
            );
            events.push(ProgressEvent::LevelUp(level_up));
        } else if user.level < old_level {
            warn!(
                "Stored level {} disagrees with {} exp, corrected to {}",
                old_level, user.experience, user.level
            );
            events.push(ProgressEvent::LevelCorrected {
                old_level,
                new_level: user.level,
            });
        } else {
            debug!("Added {} exp, total {}", amount, user.experience);
        }

        StoreOutcome::Applied(events)
    }

    /// Grant points. Experience and level are untouched.
    pub fn add_points(&mut self, amount: u64) -> StoreOutcome {
        let Some(user) = self.user.as_mut() else {
            return skip("add_points", SkipReason::NoActiveUser);
        };

        user.points = user.points.saturating_add(amount);
        debug!("Added {} points, total {}", amount, user.points);

        StoreOutcome::Applied(vec![ProgressEvent::PointsAwarded {
            amount,
            total: user.points,
        }])
    }

    // ========================================
    // BADGES & ACHIEVEMENTS
    // ========================================

    /// Append a badge to the collection
    pub fn unlock_badge(&mut self, badge: Badge) -> StoreOutcome {
        let reject_duplicates = self.policy.reject_duplicate_badges;
        let Some(user) = self.user.as_mut() else {
            return skip("unlock_badge", SkipReason::NoActiveUser);
        };

        if reject_duplicates && user.has_badge(&badge.id) {
            return skip("unlock_badge", SkipReason::DuplicateBadge);
        }

        debug!("Unlocked badge '{}'", badge.id);
        let event = ProgressEvent::BadgeUnlocked {
            id: badge.id.clone(),
        };
        user.badges.push(badge);

        StoreOutcome::Applied(vec![event])
    }

    /// Grant the achievement's reward and mark every stored achievement
    /// with the same id as completed.
    ///
    /// Points are granted even when no stored achievement matches. Unless
    /// `idempotent_completion` is set, completing the same id twice grants
    /// the reward twice.
    pub fn complete_achievement(&mut self, achievement: &Achievement) -> StoreOutcome {
        let idempotent = self.policy.idempotent_completion;
        let Some(user) = self.user.as_mut() else {
            return skip("complete_achievement", SkipReason::NoActiveUser);
        };

        if idempotent
            && user
                .achievements
                .iter()
                .any(|a| a.id == achievement.id && a.completed)
        {
            return skip("complete_achievement", SkipReason::AlreadyCompleted);
        }

        user.points = user.points.saturating_add(achievement.reward);

        let now = Utc::now();
        let mut matched = false;
        for stored in user.achievements.iter_mut().filter(|a| a.id == achievement.id) {
            stored.mark_completed(now);
            matched = true;
        }

        debug!(
            "Completed achievement '{}' (+{} points, matched: {})",
            achievement.id, achievement.reward, matched
        );

        StoreOutcome::Applied(vec![
            ProgressEvent::AchievementCompleted {
                id: achievement.id.clone(),
                reward: achievement.reward,
                matched,
            },
            ProgressEvent::PointsAwarded {
                amount: achievement.reward,
                total: user.points,
            },
        ])
    }
}

fn skip(operation: &str, reason: SkipReason) -> StoreOutcome {
    debug!("Skipped {}: {:?}", operation, reason);
    StoreOutcome::Skipped(reason)
}
