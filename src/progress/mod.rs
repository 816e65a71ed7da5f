//! Gamification core: level table, experience queries and the progress store
//!
//! ```ignore
//! let mut store = ProgressStore::default();
//! store.set_user(UserProgress::with_catalog());
//!
//! if let Some(level_up) = store.add_experience(1200).level_up() {
//!     println!("Reached level {}", level_up.new_level);
//! }
//! ```

mod definitions;
mod levels;
mod models;
mod store;

pub use definitions::{AchievementId, AchievementTemplate, ACHIEVEMENTS};
pub use levels::{LevelDefinition, LevelProgress, LevelTable};
pub use models::{Achievement, Badge, UserProgress};
pub use store::{LevelUp, ProgressEvent, ProgressStore, SkipReason, StoreOutcome, StorePolicy};

/// Error type for progress operations
#[derive(Debug, thiserror::Error)]
pub enum ProgressError {
    #[error("Invalid argument '{name}': {value} must not be negative")]
    InvalidArgument { name: &'static str, value: i64 },

    #[error("Invalid level table: {0}")]
    InvalidTable(String),

    #[error("Unknown achievement: {0}")]
    UnknownAchievement(String),

    #[error("Event #{index} failed: {source}")]
    Replay {
        index: usize,
        #[source]
        source: Box<ProgressError>,
    },
}

/// Check a signed amount coming from outside the crate
pub fn non_negative(name: &'static str, value: i64) -> Result<u64, ProgressError> {
    u64::try_from(value).map_err(|_| ProgressError::InvalidArgument { name, value })
}
