use anyhow::{Context, Result};
use chrono::Utc;
use console::style;

use crate::cli::CommonArgs;
use crate::model::{CommitRecord, CommitsOutput, DateRange, SCHEMA_VERSION};
use crate::util::resolve_window;

/// Commits within `window` ranked by net lines added, descending.
pub fn largest_commits(
    records: &[CommitRecord],
    window: &DateRange,
    limit: usize,
) -> Vec<CommitRecord> {
    let mut in_window: Vec<CommitRecord> = records
        .iter()
        .filter(|r| window.contains(r.timestamp))
        .cloned()
        .collect();
    in_window.sort_by(|a, b| b.net_lines().cmp(&a.net_lines()).then_with(|| a.hash.cmp(&b.hash)));
    in_window.truncate(limit);
    in_window
}

/// Commits within `window` that removed more than they added, most shrinking
/// first.
pub fn shrinking_commits(
    records: &[CommitRecord],
    window: &DateRange,
    limit: usize,
) -> Vec<CommitRecord> {
    let mut shrinking: Vec<CommitRecord> = records
        .iter()
        .filter(|r| window.contains(r.timestamp) && r.net_lines() < 0)
        .cloned()
        .collect();
    shrinking.sort_by(|a, b| a.net_lines().cmp(&b.net_lines()).then_with(|| a.hash.cmp(&b.hash)));
    shrinking.truncate(limit);
    shrinking
}

pub fn exec(common: CommonArgs, json: bool, ndjson: bool, limit: usize) -> Result<()> {
    let dataset = crate::cli::load_dataset(&common).context("Failed to load analysis report")?;

    let absolute = DateRange::from_records(&dataset.records);
    let window = resolve_window(&absolute, common.since.as_deref(), common.until.as_deref())
        .context("Failed to resolve date window")?;

    let largest = largest_commits(&dataset.records, &window, limit);
    let shrinking = shrinking_commits(&dataset.records, &window, limit);

    if json {
        let output = CommitsOutput {
            version: SCHEMA_VERSION,
            generated_at: Utc::now(),
            source: dataset.source,
            since: common.since.clone(),
            until: common.until.clone(),
            largest,
            shrinking,
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else if ndjson {
        for record in largest.iter().chain(shrinking.iter()) {
            println!("{}", serde_json::to_string(record)?);
        }
    } else {
        output_table(&largest, &shrinking)?;
    }

    Ok(())
}

fn output_table(largest: &[CommitRecord], shrinking: &[CommitRecord]) -> Result<()> {
    if largest.is_empty() && shrinking.is_empty() {
        println!("No data to display");
        return Ok(());
    }

    println!("{}", style("Largest Commits").bold());
    println!("{}", "─".repeat(72));
    for record in largest {
        print_commit(record);
    }

    if !shrinking.is_empty() {
        println!();
        println!("{}", style("Biggest Cleanups").bold());
        println!("{}", "─".repeat(72));
        for record in shrinking {
            print_commit(record);
        }
    }

    Ok(())
}

fn print_commit(record: &CommitRecord) {
    let net = record.net_lines();
    let net_styled = if net >= 0 {
        style(format!("{:>+8}", net)).green()
    } else {
        style(format!("{:>+8}", net)).red()
    };
    let message = record.message.replace('\n', " ");
    let message = if message.chars().count() > 48 {
        let cut: String = message.chars().take(45).collect();
        format!("{cut}...")
    } else {
        message
    };
    println!(
        "{} {} lines  {:<48} {} {}",
        style(record.short_hash()).cyan(),
        net_styled,
        message,
        style(&record.author).magenta(),
        style(record.timestamp.format("%Y-%m-%d")).dim(),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn record(hash: &str, day: u32, added: u32, removed: u32) -> CommitRecord {
        CommitRecord {
            hash: hash.into(),
            author: "ada".into(),
            timestamp: format!("2024-03-{day:02}T10:00:00Z").parse().unwrap(),
            lines_added: added,
            lines_removed: removed,
            message: format!("commit {hash}"),
            files_touched: 1,
        }
    }

    #[test]
    fn largest_ranked_by_net_descending() {
        let records = vec![
            record("small", 1, 10, 8),
            record("huge", 2, 5000, 100),
            record("medium", 3, 300, 50),
        ];
        let window = DateRange::from_records(&records);
        let largest = largest_commits(&records, &window, 2);
        assert_eq!(largest.len(), 2);
        assert_eq!(largest[0].hash, "huge");
        assert_eq!(largest[1].hash, "medium");
    }

    #[test]
    fn shrinking_only_includes_net_negative() {
        let records = vec![
            record("grow", 1, 10, 0),
            record("tidy", 2, 2, 50),
            record("purge", 3, 0, 5000),
        ];
        let window = DateRange::from_records(&records);
        let shrinking = shrinking_commits(&records, &window, 10);
        assert_eq!(shrinking.len(), 2);
        assert_eq!(shrinking[0].hash, "purge");
        assert_eq!(shrinking[1].hash, "tidy");
    }
}
