//! Achievement definitions and metadata
//!
//! The catalog of achievements shipped with the product, with their point rewards.

use super::models::Achievement;

/// Unique identifier for each catalog achievement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AchievementId {
    FirstPost,
    Level5,
    Level10,
    FiveCountries,
    HundredLikes,
    PhotographyPro,
}

impl AchievementId {
    /// Get the string ID used in progress snapshots
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::FirstPost => "first_post",
            Self::Level5 => "level_5",
            Self::Level10 => "level_10",
            Self::FiveCountries => "five_countries",
            Self::HundredLikes => "hundred_likes",
            Self::PhotographyPro => "photography_pro",
        }
    }

    /// Parse from snapshot string
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "first_post" => Some(Self::FirstPost),
            "level_5" => Some(Self::Level5),
            "level_10" => Some(Self::Level10),
            "five_countries" => Some(Self::FiveCountries),
            "hundred_likes" => Some(Self::HundredLikes),
            "photography_pro" => Some(Self::PhotographyPro),
            _ => None,
        }
    }

    /// Get all achievement IDs
    pub fn all() -> &'static [AchievementId] {
        &[
            Self::FirstPost,
            Self::Level5,
            Self::Level10,
            Self::FiveCountries,
            Self::HundredLikes,
            Self::PhotographyPro,
        ]
    }
}

/// Static achievement metadata
#[derive(Debug, Clone)]
pub struct AchievementTemplate {
    pub id: AchievementId,
    pub title: &'static str,
    pub description: &'static str,
    pub points: u64,
    pub icon: &'static str,
}

impl AchievementTemplate {
    /// Get template by ID (None if the catalog is missing an entry)
    pub fn get(id: AchievementId) -> Option<&'static AchievementTemplate> {
        ACHIEVEMENTS.iter().find(|a| a.id == id)
    }

    /// Look up a template by its string ID
    pub fn find(id: &str) -> Option<&'static AchievementTemplate> {
        AchievementId::from_str(id).and_then(Self::get)
    }

    /// A fresh, incomplete achievement for this template
    pub fn instantiate(&self) -> Achievement {
        Achievement {
            id: self.id.as_str().to_string(),
            title: self.title.to_string(),
            description: self.description.to_string(),
            reward: self.points,
            completed: false,
            completed_at: None,
        }
    }
}

/// All catalog achievements
pub static ACHIEVEMENTS: &[AchievementTemplate] = &[
    AchievementTemplate {
        id: AchievementId::FirstPost,
        title: "Debut Adventurer",
        description: "Share your first travel post",
        points: 50,
        icon: "🚀",
    },
    AchievementTemplate {
        id: AchievementId::Level5,
        title: "Rising Star",
        description: "Reach level 5",
        points: 200,
        icon: "⭐",
    },
    AchievementTemplate {
        id: AchievementId::Level10,
        title: "Legend",
        description: "Reach level 10",
        points: 500,
        icon: "👑",
    },
    AchievementTemplate {
        id: AchievementId::FiveCountries,
        title: "Globetrotter",
        description: "Visit 5 different countries",
        points: 300,
        icon: "🌍",
    },
    AchievementTemplate {
        id: AchievementId::HundredLikes,
        title: "Popular Explorer",
        description: "Receive 100 likes on posts",
        points: 250,
        icon: "❤️",
    },
    AchievementTemplate {
        id: AchievementId::PhotographyPro,
        title: "Photography Pro",
        description: "Share 20 travel photos",
        points: 350,
        icon: "📸",
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_id_has_a_template() {
        assert_eq!(AchievementId::all().len(), ACHIEVEMENTS.len());
        for id in AchievementId::all() {
            let template = AchievementTemplate::get(*id)
                .unwrap_or_else(|| panic!("{} has no catalog entry", id.as_str()));
            assert_eq!(template.id, *id);
            assert_eq!(AchievementId::from_str(id.as_str()), Some(*id));
        }
    }

    #[test]
    fn test_instantiate() {
        let achievement = AchievementTemplate::find("five_countries").unwrap().instantiate();
        assert_eq!(achievement.id, "five_countries");
        assert_eq!(achievement.reward, 300);
        assert!(!achievement.completed);
        assert!(AchievementTemplate::find("moon_landing").is_none());
        assert_eq!(AchievementTemplate::get(AchievementId::Level10).map(|t| t.points), Some(500));
    }
}
