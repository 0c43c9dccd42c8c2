use std::collections::{HashMap, HashSet};

use anyhow::{Context, Result};
use chrono::{DateTime, Datelike, Duration, Utc};
use console::style;
use serde::{Deserialize, Serialize};

use crate::cli::CommonArgs;
use crate::model::{CommitRecord, DateRange, SCHEMA_VERSION};
use crate::util::{resolve_window, thousands};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Summary {
    pub version: u32,
    pub generated_at: DateTime<Utc>,
    pub source: String,
    pub total_commits: usize,
    pub total_added: u64,
    pub total_removed: u64,
    pub net_lines: i64,
    pub contributors: usize,
    pub busiest_week: Option<BusiestWeek>,
    pub first_commit: Option<DateTime<Utc>>,
    pub last_commit: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BusiestWeek {
    pub week_start: DateTime<Utc>,
    pub commit_count: u32,
}

pub fn compute(records: &[CommitRecord], window: &DateRange, source: &str) -> Summary {
    let mut total_added = 0u64;
    let mut total_removed = 0u64;
    let mut total_commits = 0usize;
    let mut authors: HashSet<&str> = HashSet::new();
    let mut weeks: HashMap<chrono::NaiveDate, u32> = HashMap::new();
    let mut first: Option<DateTime<Utc>> = None;
    let mut last: Option<DateTime<Utc>> = None;

    for record in records {
        if !window.contains(record.timestamp) {
            continue;
        }
        total_commits += 1;
        total_added += record.lines_added as u64;
        total_removed += record.lines_removed as u64;
        authors.insert(record.author.as_str());

        let date = record.timestamp.date_naive();
        let monday = date - Duration::days(date.weekday().num_days_from_monday() as i64);
        *weeks.entry(monday).or_insert(0) += 1;

        first = Some(first.map_or(record.timestamp, |f| f.min(record.timestamp)));
        last = Some(last.map_or(record.timestamp, |l| l.max(record.timestamp)));
    }

    let busiest_week = weeks
        .into_iter()
        .max_by(|a, b| a.1.cmp(&b.1).then_with(|| b.0.cmp(&a.0)))
        .and_then(|(monday, commit_count)| {
            let midnight = monday.and_hms_opt(0, 0, 0)?;
            Some(BusiestWeek {
                week_start: DateTime::from_naive_utc_and_offset(midnight, Utc),
                commit_count,
            })
        });

    Summary {
        version: SCHEMA_VERSION,
        generated_at: Utc::now(),
        source: source.to_string(),
        total_commits,
        total_added,
        total_removed,
        net_lines: total_added as i64 - total_removed as i64,
        contributors: authors.len(),
        busiest_week,
        first_commit: first,
        last_commit: last,
    }
}

pub fn exec(common: CommonArgs, json: bool) -> Result<()> {
    let dataset = crate::cli::load_dataset(&common).context("Failed to load analysis report")?;

    let absolute = DateRange::from_records(&dataset.records);
    let window = resolve_window(&absolute, common.since.as_deref(), common.until.as_deref())
        .context("Failed to resolve date window")?;

    let summary = compute(&dataset.records, &window, &dataset.source);

    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    println!("{}", style("Repository Summary").bold());
    println!("{}", "─".repeat(50));
    println!("Total commits: {}", style(thousands(summary.total_commits as i64)).cyan());
    println!("Lines added: {}", style(thousands(summary.total_added as i64)).green());
    println!("Lines removed: {}", style(thousands(summary.total_removed as i64)).red());
    println!("Net lines: {}", style(thousands(summary.net_lines)).cyan());
    println!("Contributors: {}", style(summary.contributors).yellow());

    if let Some(week) = &summary.busiest_week {
        println!(
            "Busiest week: {} ({} commits)",
            style(week.week_start.format("%Y-%m-%d")).cyan(),
            week.commit_count
        );
    }

    if let (Some(first), Some(last)) = (summary.first_commit, summary.last_commit) {
        println!(
            "Date range: {} to {}",
            style(first.format("%Y-%m-%d")).dim(),
            style(last.format("%Y-%m-%d")).dim()
        );
    }

    if dataset.skipped > 0 {
        println!(
            "{}",
            style(format!("{} entries skipped for invalid timestamps", dataset.skipped)).dim()
        );
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn record(author: &str, ts: &str, added: u32, removed: u32) -> CommitRecord {
        CommitRecord {
            hash: format!("{author}-{ts}"),
            author: author.into(),
            timestamp: ts.parse().unwrap(),
            lines_added: added,
            lines_removed: removed,
            message: String::new(),
            files_touched: 1,
        }
    }

    #[test]
    fn totals_and_contributors() {
        let records = vec![
            record("ada", "2024-03-04T10:00:00Z", 10, 2),
            record("ada", "2024-03-05T10:00:00Z", 5, 5),
            record("bob", "2024-03-12T10:00:00Z", 1, 4),
        ];
        let window = DateRange::from_records(&records);
        let summary = compute(&records, &window, "test");

        assert_eq!(summary.total_commits, 3);
        assert_eq!(summary.total_added, 16);
        assert_eq!(summary.total_removed, 11);
        assert_eq!(summary.net_lines, 5);
        assert_eq!(summary.contributors, 2);
    }

    #[test]
    fn busiest_week_is_monday_keyed() {
        let records = vec![
            // week of 2024-03-04
            record("ada", "2024-03-04T10:00:00Z", 1, 0),
            record("ada", "2024-03-06T10:00:00Z", 1, 0),
            // week of 2024-03-11
            record("ada", "2024-03-12T10:00:00Z", 1, 0),
        ];
        let window = DateRange::from_records(&records);
        let summary = compute(&records, &window, "test");
        let week = summary.busiest_week.unwrap();
        assert_eq!(week.week_start.format("%Y-%m-%d").to_string(), "2024-03-04");
        assert_eq!(week.commit_count, 2);
    }

    #[test]
    fn empty_window_has_no_busiest_week() {
        let summary = compute(&[], &DateRange::from_records(&[]), "test");
        assert_eq!(summary.total_commits, 0);
        assert!(summary.busiest_week.is_none());
        assert!(summary.first_commit.is_none());
    }
}
