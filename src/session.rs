//! Session scripts
//!
//! A session script is a JSON document describing a user and the progress
//! events that happen to them, in order:
//!
//! ```json
//! {
//!   "seed_catalog": true,
//!   "events": [
//!     { "op": "add_experience", "amount": 1000 },
//!     { "op": "complete_achievement", "id": "first_post" },
//!     { "op": "unlock_badge", "badge": { "id": "verified", "name": "Verified",
//!       "description": "Confirmed traveler", "icon": "✔",
//!       "unlockedAt": "2024-05-01T10:00:00Z" } }
//!   ]
//! }
//! ```
//!
//! Amounts are signed on the wire so that negative input is reported as an
//! invalid argument instead of failing to parse.

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::progress::{
    non_negative, Achievement, AchievementTemplate, Badge, ProgressError, ProgressEvent,
    ProgressStore, SkipReason, StoreOutcome, UserProgress,
};

/// A user plus the events to apply to them
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SessionScript {
    /// Initial user. Loaded before any event when present.
    #[serde(default)]
    pub user: Option<UserProgress>,

    /// Start from a fresh user seeded with the achievement catalog
    /// when no `user` is given
    #[serde(default)]
    pub seed_catalog: bool,

    #[serde(default)]
    pub events: Vec<SessionEvent>,
}

/// One store operation
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum SessionEvent {
    SetUser { user: UserProgress },
    ClearUser,
    AddExperience { amount: i64 },
    AddPoints { amount: i64 },
    UnlockBadge { badge: Badge },
    CompleteAchievement(AchievementRef),
}

/// An achievement given inline or by catalog id
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AchievementRef {
    Inline { achievement: Achievement },
    Catalog { id: String },
}

impl AchievementRef {
    fn resolve(&self) -> Result<Achievement, ProgressError> {
        match self {
            Self::Inline { achievement } => Ok(achievement.clone()),
            Self::Catalog { id } => AchievementTemplate::find(id)
                .map(AchievementTemplate::instantiate)
                .ok_or_else(|| ProgressError::UnknownAchievement(id.clone())),
        }
    }
}

/// Outcome of every applied event, in script order
#[derive(Debug, Clone, Default, Serialize)]
pub struct ReplayReport {
    pub outcomes: Vec<StoreOutcome>,
}

impl ReplayReport {
    pub fn applied_count(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_applied()).count()
    }

    pub fn skipped_count(&self) -> usize {
        self.outcomes.len() - self.applied_count()
    }

    /// All events across the replay, flattened
    pub fn events(&self) -> impl Iterator<Item = &ProgressEvent> {
        self.outcomes.iter().flat_map(|o| o.events())
    }
}

impl SessionScript {
    /// Load a session script from a JSON file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read session script: {}", path.display()))?;

        let script: SessionScript = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse session script: {}", path.display()))?;

        Ok(script)
    }
}

/// Apply a script to `store`.
///
/// Stops at the first invalid event; events before it stay applied.
pub fn replay(
    store: &mut ProgressStore,
    script: &SessionScript,
) -> Result<ReplayReport, ProgressError> {
    let mut report = ReplayReport::default();

    if let Some(user) = &script.user {
        store.set_user(user.clone());
    } else if script.seed_catalog {
        store.set_user(UserProgress::with_catalog());
    }

    for (index, event) in script.events.iter().enumerate() {
        let outcome = apply(store, event).map_err(|source| ProgressError::Replay {
            index,
            source: Box::new(source),
        })?;
        debug!("Event #{}: {:?}", index, outcome);
        report.outcomes.push(outcome);
    }

    Ok(report)
}

/// Apply a single event
pub fn apply(
    store: &mut ProgressStore,
    event: &SessionEvent,
) -> Result<StoreOutcome, ProgressError> {
    let outcome = match event {
        SessionEvent::SetUser { user } => store.set_user(user.clone()),
        SessionEvent::ClearUser => match store.clear_user() {
            Some(_) => StoreOutcome::Applied(vec![ProgressEvent::UserCleared]),
            None => StoreOutcome::Skipped(SkipReason::NoActiveUser),
        },
        SessionEvent::AddExperience { amount } => {
            store.add_experience(non_negative("amount", *amount)?)
        }
        SessionEvent::AddPoints { amount } => store.add_points(non_negative("amount", *amount)?),
        SessionEvent::UnlockBadge { badge } => store.unlock_badge(badge.clone()),
        SessionEvent::CompleteAchievement(reference) => {
            store.complete_achievement(&reference.resolve()?)
        }
    };

    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: &str) -> SessionScript {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_parse_event_variants() {
        let script = parse(
            r#"{
                "events": [
                    {"op": "add_experience", "amount": 10},
                    {"op": "add_points", "amount": 5},
                    {"op": "clear_user"},
                    {"op": "complete_achievement", "id": "level_5"},
                    {"op": "complete_achievement", "achievement": {
                        "id": "custom", "title": "Custom", "description": "", "reward": 7}}
                ]
            }"#,
        );

        assert_eq!(script.events.len(), 5);
        assert!(matches!(
            script.events[3],
            SessionEvent::CompleteAchievement(AchievementRef::Catalog { .. })
        ));
        assert!(matches!(
            script.events[4],
            SessionEvent::CompleteAchievement(AchievementRef::Inline { .. })
        ));
    }

    #[test]
    fn test_replay_without_user_skips() {
        let mut store = ProgressStore::default();
        let script = parse(r#"{"events": [{"op": "add_points", "amount": 5}]}"#);

        let report = replay(&mut store, &script).unwrap();
        assert_eq!(report.skipped_count(), 1);
        assert!(store.user().is_none());
    }

    #[test]
    fn test_replay_rejects_negative_amount() {
        let mut store = ProgressStore::default();
        let script = parse(
            r#"{"seed_catalog": true, "events": [
                {"op": "add_points", "amount": 5},
                {"op": "add_experience", "amount": -20}
            ]}"#,
        );

        let err = replay(&mut store, &script).unwrap_err();
        match err {
            ProgressError::Replay { index, source } => {
                assert_eq!(index, 1);
                assert!(matches!(
                    *source,
                    ProgressError::InvalidArgument { value: -20, .. }
                ));
            }
            other => panic!("unexpected error: {other}"),
        }

        // The first event stays applied
        assert_eq!(store.user().unwrap().points, 5);
    }

    #[test]
    fn test_replay_rejects_unknown_catalog_id() {
        let mut store = ProgressStore::default();
        let script = parse(
            r#"{"seed_catalog": true, "events": [
                {"op": "complete_achievement", "id": "moon_landing"}
            ]}"#,
        );

        let err = replay(&mut store, &script).unwrap_err();
        assert!(err.to_string().contains("moon_landing"));
    }

    #[test]
    fn test_clear_user_event() {
        let mut store = ProgressStore::default();
        let script = parse(
            r#"{"seed_catalog": true, "events": [{"op": "clear_user"}, {"op": "clear_user"}]}"#,
        );

        let report = replay(&mut store, &script).unwrap();
        assert_eq!(
            report.outcomes,
            vec![
                StoreOutcome::Applied(vec![ProgressEvent::UserCleared]),
                StoreOutcome::Skipped(SkipReason::NoActiveUser),
            ]
        );
    }
}
