use std::collections::HashMap;

use anyhow::{Context, Result};
use chrono::Utc;
use console::style;

use crate::cli::CommonArgs;
use crate::model::{CommitRecord, ContributorEntry, ContributorsOutput, DateRange, SCHEMA_VERSION};
use crate::util::{resolve_window, thousands};

/// Rank authors within `window` by commit count.
pub fn top_contributors(
    records: &[CommitRecord],
    window: &DateRange,
    limit: usize,
) -> Vec<ContributorEntry> {
    let mut by_author: HashMap<&str, ContributorEntry> = HashMap::new();

    for record in records {
        if !window.contains(record.timestamp) {
            continue;
        }
        let entry = by_author
            .entry(record.author.as_str())
            .or_insert_with(|| ContributorEntry {
                author: record.author.clone(),
                commit_count: 0,
                lines_added: 0,
                lines_removed: 0,
            });
        entry.commit_count += 1;
        entry.lines_added += record.lines_added as u64;
        entry.lines_removed += record.lines_removed as u64;
    }

    let mut ranked: Vec<ContributorEntry> = by_author.into_values().collect();
    ranked.sort_by(|a, b| {
        b.commit_count
            .cmp(&a.commit_count)
            .then_with(|| a.author.cmp(&b.author))
    });
    ranked.truncate(limit);
    ranked
}

pub fn exec(common: CommonArgs, json: bool, ndjson: bool, limit: usize) -> Result<()> {
    let dataset = crate::cli::load_dataset(&common).context("Failed to load analysis report")?;

    let absolute = DateRange::from_records(&dataset.records);
    let window = resolve_window(&absolute, common.since.as_deref(), common.until.as_deref())
        .context("Failed to resolve date window")?;

    let ranked = top_contributors(&dataset.records, &window, limit);

    if json {
        let output = ContributorsOutput {
            version: SCHEMA_VERSION,
            generated_at: Utc::now(),
            source: dataset.source,
            since: common.since.clone(),
            until: common.until.clone(),
            contributors: ranked,
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else if ndjson {
        for entry in &ranked {
            println!("{}", serde_json::to_string(entry)?);
        }
    } else {
        output_table(&ranked)?;
    }

    Ok(())
}

fn output_table(ranked: &[ContributorEntry]) -> Result<()> {
    if ranked.is_empty() {
        println!("No data to display");
        return Ok(());
    }

    println!("{}", style("Top Contributors").bold());
    println!("{}", "─".repeat(60));

    for (rank, entry) in ranked.iter().enumerate() {
        println!(
            "{:>3}. {:<28} {:>5} commits  {} {}",
            rank + 1,
            entry.author,
            entry.commit_count,
            style(format!("+{}", thousands(entry.lines_added as i64))).green(),
            style(format!("-{}", thousands(entry.lines_removed as i64))).red(),
        );
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn record(author: &str, day: u32, added: u32, removed: u32) -> CommitRecord {
        CommitRecord {
            hash: format!("{author}{day}"),
            author: author.into(),
            timestamp: format!("2024-03-{day:02}T10:00:00Z").parse().unwrap(),
            lines_added: added,
            lines_removed: removed,
            message: String::new(),
            files_touched: 1,
        }
    }

    #[test]
    fn ranks_by_commit_count_with_stable_ties() {
        let records = vec![
            record("bob", 1, 5, 0),
            record("ada", 2, 1, 1),
            record("ada", 3, 2, 0),
            record("cyd", 4, 9, 9),
        ];
        let window = DateRange::from_records(&records);
        let ranked = top_contributors(&records, &window, 10);

        assert_eq!(ranked.len(), 3);
        assert_eq!(ranked[0].author, "ada");
        assert_eq!(ranked[0].commit_count, 2);
        assert_eq!(ranked[0].lines_added, 3);
        // bob and cyd tie on count; alphabetical order breaks it
        assert_eq!(ranked[1].author, "bob");
        assert_eq!(ranked[2].author, "cyd");
    }

    #[test]
    fn respects_the_window_and_limit() {
        let records = vec![
            record("ada", 1, 1, 0),
            record("bob", 10, 1, 0),
            record("bob", 11, 1, 0),
            record("cyd", 20, 1, 0),
        ];
        let window = DateRange::new(
            "2024-03-09T00:00:00Z".parse().unwrap(),
            "2024-03-12T00:00:00Z".parse().unwrap(),
        )
        .unwrap();
        let ranked = top_contributors(&records, &window, 1);
        assert_eq!(ranked.len(), 1);
        assert_eq!(ranked[0].author, "bob");
        assert_eq!(ranked[0].commit_count, 2);
    }
}
