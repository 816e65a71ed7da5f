//! Level command implementation

use anyhow::Result;

use wayfarer::config::Config;
use wayfarer::format::format_points;
use wayfarer::progress::non_negative;

/// Show where a cumulative experience value lands in the level table
pub fn level_command(config: &Config, exp: i64) -> Result<()> {
    let exp = non_negative("exp", exp)?;
    let table = config.level_table();
    let progress = table.progress(exp);

    println!("Experience: {}", format_points(progress.total_exp));
    println!("Level:      {}", progress.level);

    if progress.is_max_level() {
        println!("Next level: max level reached");
    } else {
        println!(
            "Next level: {} / {} exp ({:.1}%)",
            progress.exp_into_level, progress.exp_for_next_level, progress.percentage
        );
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use wayfarer::progress::ProgressError;

    #[test]
    fn test_level_command_rejects_negative_exp() {
        let err = level_command(&Config::default(), -1).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ProgressError>(),
            Some(ProgressError::InvalidArgument { value: -1, .. })
        ));
    }

    #[test]
    fn test_level_command_accepts_any_total() {
        let config = Config::default();
        assert!(level_command(&config, 0).is_ok());
        assert!(level_command(&config, 3500).is_ok());
        assert!(level_command(&config, i64::MAX).is_ok());
    }
}
