//! Table command implementation

use anyhow::Result;

use wayfarer::config::Config;

/// Print the level table with cumulative totals
pub fn table_command(config: &Config, limit: Option<usize>) -> Result<()> {
    let table = config.level_table();
    let limit = limit.unwrap_or(table.len());

    println!("{:>5}  {:>10}  {:>12}  {:>8}", "LEVEL", "COST", "CUMULATIVE", "REWARD");

    let mut cumulative = 0u64;
    for def in table.iter().take(limit) {
        cumulative = cumulative.saturating_add(def.required_exp);
        println!(
            "{:>5}  {:>10}  {:>12}  {:>8}",
            def.level, def.required_exp, cumulative, def.reward
        );
    }

    if limit < table.len() {
        println!("... {} more levels", table.len() - limit);
    }

    Ok(())
}
