//! Replay command implementation

use anyhow::{Context, Result};
use chrono::Utc;
use std::path::Path;

use wayfarer::config::Config;
use wayfarer::format::{format_distance, format_points, format_relative_date, truncate_text};
use wayfarer::progress::{ProgressEvent, ProgressStore, UserProgress};
use wayfarer::session::{replay, SessionScript};

/// Replay a session script and print the resulting progress
pub fn replay_command(config: &Config, script_path: &Path, json: bool) -> Result<()> {
    let script = SessionScript::from_file(script_path)?;
    let mut store = config.build_store();

    let report = replay(&mut store, &script)
        .with_context(|| format!("Failed to replay {}", script_path.display()))?;

    if json {
        let output = serde_json::json!({
            "user": store.user(),
            "progress": store.level_progress(),
            "outcomes": report.outcomes,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    println!(
        "Replayed {} events ({} applied, {} skipped)\n",
        report.outcomes.len(),
        report.applied_count(),
        report.skipped_count()
    );

    for event in report.events() {
        match event {
            ProgressEvent::LevelUp(level_up) => println!(
                "  Level up {} -> {} (+{} reward points available)",
                level_up.old_level,
                level_up.new_level,
                format_points(level_up.reward)
            ),
            ProgressEvent::LevelCorrected {
                old_level,
                new_level,
            } => println!("  Level corrected {} -> {}", old_level, new_level),
            _ => {}
        }
    }

    match store.user() {
        Some(user) => print_user(user, &store),
        None => println!("No active user at end of session."),
    }

    Ok(())
}

fn print_user(user: &UserProgress, store: &ProgressStore) {
    let now = Utc::now();

    println!(
        "\nLevel {} | {} exp | {} points",
        user.level,
        format_points(user.experience),
        format_points(user.points)
    );

    if let Some(progress) = store.level_progress() {
        if !progress.is_max_level() {
            println!(
                "  {:.1}% to level {} ({} exp to go)",
                progress.percentage,
                progress.level + 1,
                progress.exp_for_next_level - progress.exp_into_level
            );
        }
    }

    println!(
        "  {} traveled, {} connections",
        format_distance(user.travel_miles as f64),
        user.connections_count
    );

    if !user.badges.is_empty() {
        println!("\nBadges ({}):", user.badges.len());
        for badge in &user.badges {
            println!(
                "  {} {} - {} ({})",
                badge.icon,
                badge.name,
                truncate_text(&badge.description, 40),
                format_relative_date(badge.unlocked_at, now)
            );
        }
    }

    if !user.achievements.is_empty() {
        println!(
            "\nAchievements ({}/{} completed):",
            user.completed_count(),
            user.achievements.len()
        );
        for achievement in &user.achievements {
            let status = match achievement.completed_at {
                Some(at) if achievement.completed => format_relative_date(at, now),
                _ if achievement.completed => "done".to_string(),
                _ => "open".to_string(),
            };
            println!(
                "  [{}] {} (+{})",
                status,
                achievement.title,
                format_points(achievement.reward)
            );
        }
    }
}
