//! XP and Level system
//!
//! Defines the level table and the experience queries built on it.
//! Each level carries its own *incremental* cost, so the current level is
//! found by walking the table and subtracting costs in order.

use std::sync::Arc;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use super::ProgressError;
use crate::config::LevelSettings;

/// Level definition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LevelDefinition {
    pub level: u32,
    /// Experience needed to go from `level - 1` to `level` (not cumulative)
    pub required_exp: u64,
    /// Bonus points tied to reaching this level (informational)
    pub reward: u64,
}

/// Table built from the default settings, shared by every session that
/// does not bring its own configuration.
static DEFAULT_TABLE: Lazy<Arc<LevelTable>> =
    Lazy::new(|| Arc::new(LevelTable::generate(&LevelSettings::default())));

/// Ordered, immutable list of levels starting at 1
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LevelTable {
    levels: Vec<LevelDefinition>,
}

/// Where a cumulative experience value lands in the table
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LevelProgress {
    pub total_exp: u64,
    pub level: u32,
    /// Experience left over after paying for every reached level
    pub exp_into_level: u64,
    /// Cost of the next level (0 at max level)
    pub exp_for_next_level: u64,
    /// 0.0 - 100.0
    pub percentage: f64,
}

impl LevelProgress {
    pub fn is_max_level(&self) -> bool {
        self.exp_for_next_level == 0 && self.level > 0
    }
}

impl LevelTable {
    /// Generate levels `1..=max_level` with linear cost and reward.
    ///
    /// Costs and rewards saturate at `u64::MAX`; `Config::validate` keeps
    /// configured tables well below that.
    pub fn generate(settings: &LevelSettings) -> Self {
        let levels = (1..=settings.max_level)
            .map(|level| LevelDefinition {
                level,
                required_exp: u64::from(level).saturating_mul(settings.exp_unit),
                reward: u64::from(level).saturating_mul(settings.reward_unit),
            })
            .collect();

        Self { levels }
    }

    /// Build a table from explicit definitions.
    ///
    /// Levels must be numbered `1, 2, 3, ...` in order with no gaps.
    pub fn from_definitions(levels: Vec<LevelDefinition>) -> Result<Self, ProgressError> {
        if levels.is_empty() {
            return Err(ProgressError::InvalidTable(
                "level table must contain at least one level".to_string(),
            ));
        }

        for (index, def) in levels.iter().enumerate() {
            let expected = index as u32 + 1;
            if def.level != expected {
                return Err(ProgressError::InvalidTable(format!(
                    "expected level {} at position {}, found level {}",
                    expected, index, def.level
                )));
            }
        }

        Ok(Self { levels })
    }

    /// The process-wide table generated from default settings
    pub fn shared_default() -> Arc<LevelTable> {
        Arc::clone(&DEFAULT_TABLE)
    }

    /// Look up a level definition (1-based)
    pub fn get(&self, level: u32) -> Option<&LevelDefinition> {
        let index = (level as usize).checked_sub(1)?;
        self.levels.get(index)
    }

    pub fn max_level(&self) -> u32 {
        self.levels.last().map(|l| l.level).unwrap_or(0)
    }

    pub fn len(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &LevelDefinition> {
        self.levels.iter()
    }

    /// Total experience needed to reach `level` from zero
    pub fn cumulative_exp(&self, level: u32) -> u64 {
        self.levels
            .iter()
            .take(level as usize)
            .fold(0u64, |acc, l| acc.saturating_add(l.required_exp))
    }

    /// Sum of rewards for levels in `(from, to]`
    pub fn rewards_between(&self, from: u32, to: u32) -> u64 {
        self.levels
            .iter()
            .filter(|l| l.level > from && l.level <= to)
            .fold(0u64, |acc, l| acc.saturating_add(l.reward))
    }

    /// Walk the table, paying each level's cost while the remainder covers it.
    ///
    /// Returns the highest level reached and the experience left over.
    pub fn walk(&self, total_exp: u64) -> (u32, u64) {
        let mut level = 0;
        let mut remaining = total_exp;

        for def in &self.levels {
            if remaining < def.required_exp {
                break;
            }
            remaining -= def.required_exp;
            level = def.level;
        }

        (level, remaining)
    }

    /// Current level for a cumulative experience value (0 = below level 1)
    pub fn calculate_level(&self, total_exp: u64) -> u32 {
        self.walk(total_exp).0
    }

    /// Cost of the level after the current one (0 if already at max level)
    pub fn exp_for_next_level(&self, current_exp: u64) -> u64 {
        let level = self.calculate_level(current_exp);
        self.get(level + 1).map(|l| l.required_exp).unwrap_or(0)
    }

    /// Progress through the current level as a percentage (0.0 - 100.0).
    ///
    /// Returns 0 below level 1 and at max level.
    pub fn exp_progress_percentage(&self, current_exp: u64) -> f64 {
        self.progress(current_exp).percentage
    }

    /// All derived values for `total_exp` from a single walk
    pub fn progress(&self, total_exp: u64) -> LevelProgress {
        let (level, remaining) = self.walk(total_exp);
        let next = self.get(level + 1).map(|l| l.required_exp).unwrap_or(0);

        // The walk stops only when `remaining < next`, so `next` is non-zero here.
        let percentage = if level == 0 || next == 0 {
            0.0
        } else {
            (remaining as f64 / next as f64) * 100.0
        };

        LevelProgress {
            total_exp,
            level,
            exp_into_level: remaining,
            exp_for_next_level: next,
            percentage,
        }
    }
}

impl Default for LevelTable {
    fn default() -> Self {
        Self::generate(&LevelSettings::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> LevelTable {
        LevelTable::default()
    }

    #[test]
    fn test_generate_defaults() {
        let table = table();
        assert_eq!(table.len(), 50);
        assert_eq!(table.max_level(), 50);

        let first = table.get(1).unwrap();
        assert_eq!(first.required_exp, 1000);
        assert_eq!(first.reward, 100);

        let last = table.get(50).unwrap();
        assert_eq!(last.required_exp, 50_000);
        assert_eq!(last.reward, 5000);

        assert!(table.get(0).is_none());
        assert!(table.get(51).is_none());
    }

    #[test]
    fn test_calculate_level_walks_incremental_costs() {
        let table = table();
        assert_eq!(table.calculate_level(0), 0);
        assert_eq!(table.calculate_level(999), 0);
        assert_eq!(table.calculate_level(1000), 1);
        assert_eq!(table.calculate_level(2999), 1);
        // 1000 + 2000 consumed, nothing left for level 3
        assert_eq!(table.calculate_level(3000), 2);
        assert_eq!(table.calculate_level(3500), 2);
        assert_eq!(table.calculate_level(6000), 3);
    }

    #[test]
    fn test_calculate_level_caps_at_max() {
        let table = table();
        let everything = table.cumulative_exp(50);
        assert_eq!(everything, 1_275_000);
        assert_eq!(table.calculate_level(everything), 50);
        assert_eq!(table.calculate_level(u64::MAX), 50);
    }

    #[test]
    fn test_calculate_level_is_monotonic() {
        let table = table();
        let mut previous = 0;
        for exp in (0..1_400_000u64).step_by(173) {
            let level = table.calculate_level(exp);
            assert!(level >= previous, "level dropped at {} exp", exp);
            previous = level;
        }
    }

    #[test]
    fn test_exp_for_next_level() {
        let table = table();
        assert_eq!(table.exp_for_next_level(0), 1000);
        assert_eq!(table.exp_for_next_level(1000), 2000);
        assert_eq!(table.exp_for_next_level(3500), 3000);
        assert_eq!(table.exp_for_next_level(table.cumulative_exp(50)), 0);
    }

    #[test]
    fn test_progress_percentage_bounds() {
        let table = table();
        assert_eq!(table.exp_progress_percentage(0), 0.0);
        assert_eq!(table.exp_progress_percentage(999), 0.0);
        assert_eq!(table.exp_progress_percentage(1000), 0.0);

        // Level 2 with 500 left over, level 3 costs 3000
        let pct = table.exp_progress_percentage(3500);
        assert!((pct - 16.666).abs() < 0.01);

        for exp in (0..1_400_000u64).step_by(311) {
            let pct = table.exp_progress_percentage(exp);
            assert!((0.0..=100.0).contains(&pct), "{} out of range at {}", pct, exp);
        }
    }

    #[test]
    fn test_progress_percentage_at_max_level_is_zero() {
        let table = table();
        let progress = table.progress(table.cumulative_exp(50) + 10);
        assert_eq!(progress.level, 50);
        assert_eq!(progress.exp_into_level, 10);
        assert_eq!(progress.percentage, 0.0);
        assert!(progress.is_max_level());
    }

    #[test]
    fn test_non_uniform_table() {
        let table = LevelTable::from_definitions(vec![
            LevelDefinition { level: 1, required_exp: 0, reward: 0 },
            LevelDefinition { level: 2, required_exp: 500, reward: 10 },
            LevelDefinition { level: 3, required_exp: 100, reward: 20 },
        ])
        .unwrap();

        assert_eq!(table.calculate_level(0), 1);
        assert_eq!(table.calculate_level(499), 1);
        assert_eq!(table.calculate_level(500), 2);
        assert_eq!(table.calculate_level(600), 3);
        assert_eq!(table.rewards_between(0, 3), 30);
        assert_eq!(table.rewards_between(1, 2), 10);

        let progress = table.progress(250);
        assert_eq!(progress.level, 1);
        assert!((progress.percentage - 50.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_huge_units_saturate() {
        let table = LevelTable::generate(&LevelSettings {
            max_level: 50,
            exp_unit: 400_000_000_000_000_000,
            reward_unit: 1_000_000_000_000_000_000,
        });

        assert_eq!(table.get(50).unwrap().required_exp, u64::MAX);
        assert_eq!(table.get(20).unwrap().reward, u64::MAX);
        assert_eq!(table.rewards_between(0, 50), u64::MAX);
        assert_eq!(table.cumulative_exp(50), u64::MAX);
        // Levels 1..=9 cost 45 * 4e17 = 1.8e19 in total
        assert_eq!(table.calculate_level(u64::MAX), 9);
    }

    #[test]
    fn test_from_definitions_rejects_gaps() {
        let err = LevelTable::from_definitions(vec![
            LevelDefinition { level: 1, required_exp: 10, reward: 0 },
            LevelDefinition { level: 3, required_exp: 20, reward: 0 },
        ])
        .unwrap_err();
        assert!(matches!(err, ProgressError::InvalidTable(_)));

        assert!(LevelTable::from_definitions(Vec::new()).is_err());
    }
}
