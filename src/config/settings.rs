//! Level table settings

use serde::{Deserialize, Serialize};

/// Largest accepted `max_level`
pub const MAX_LEVEL_LIMIT: u32 = 10_000;

/// Shape of the generated level table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelSettings {
    /// Number of levels in the table
    #[serde(default = "default_max_level")]
    pub max_level: u32,

    /// Per-level experience multiplier (level N costs N * exp_unit)
    #[serde(default = "default_exp_unit")]
    pub exp_unit: u64,

    /// Per-level reward multiplier (level N rewards N * reward_unit)
    #[serde(default = "default_reward_unit")]
    pub reward_unit: u64,
}

fn default_max_level() -> u32 {
    50
}

fn default_exp_unit() -> u64 {
    1000
}

fn default_reward_unit() -> u64 {
    100
}

impl LevelSettings {
    /// Experience needed to reach the top level, `None` on overflow
    pub fn total_exp(&self) -> Option<u64> {
        triangular(self.max_level).checked_mul(self.exp_unit)
    }

    /// Sum of every level's reward, `None` on overflow
    pub fn total_reward(&self) -> Option<u64> {
        triangular(self.max_level).checked_mul(self.reward_unit)
    }
}

/// 1 + 2 + ... + n
fn triangular(n: u32) -> u64 {
    let n = u64::from(n);
    n * (n + 1) / 2
}

impl Default for LevelSettings {
    fn default() -> Self {
        Self {
            max_level: default_max_level(),
            exp_unit: default_exp_unit(),
            reward_unit: default_reward_unit(),
        }
    }
}
