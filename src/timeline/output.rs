use anyhow::Result;
use chrono::Utc;
use console::style;

use crate::cli::CommonArgs;
use crate::model::{Bucket, TimelineOutput, SCHEMA_VERSION};
use crate::timeline::Granularity;
use crate::util::thousands;

pub fn output_json(
    buckets: &[Bucket],
    granularity: Granularity,
    source: &str,
    common: &CommonArgs,
) -> Result<()> {
    let output = TimelineOutput {
        version: SCHEMA_VERSION,
        generated_at: Utc::now(),
        source: source.to_string(),
        since: common.since.clone(),
        until: common.until.clone(),
        granularity: granularity.label().to_string(),
        buckets: buckets.to_vec(),
    };

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

pub fn output_ndjson(buckets: &[Bucket]) -> Result<()> {
    for bucket in buckets {
        println!("{}", serde_json::to_string(bucket)?);
    }
    Ok(())
}

pub fn output_table(buckets: &[Bucket], granularity: Granularity, common: &CommonArgs) -> Result<()> {
    if buckets.is_empty() {
        println!("No data to display");
        return Ok(());
    }

    if let (Some(since), Some(until)) = (&common.since, &common.until) {
        println!("Window: {} to {}", since, until);
    } else if let Some(since) = &common.since {
        println!("Window: since {}", since);
    } else if let Some(until) = &common.until {
        println!("Window: until {}", until);
    }

    let max_commits = buckets.iter().map(|b| b.commit_count).max().unwrap_or(1);

    println!(
        "{} ({} buckets)",
        style("Commit Timeline").bold(),
        granularity.label()
    );
    println!("{}", "─".repeat(72));

    for bucket in buckets {
        let intensity = if max_commits == 0 {
            0
        } else {
            ((bucket.commit_count as f64 / max_commits as f64) * 5.0) as u32
        };
        let commit_char = match intensity {
            0 => " ",
            1 => "▁",
            2 => "▃",
            3 => "▅",
            4 => "▇",
            _ => "█",
        };

        println!(
            "{:<10} {} commits: {:>4}  +{:>7} -{:>7}  net so far: {:>10}",
            bucket.key,
            style(commit_char).green(),
            bucket.commit_count,
            bucket.lines_added,
            bucket.lines_removed,
            thousands(bucket.cumulative_lines),
        );
    }

    let commits: u64 = buckets.iter().map(|b| b.commit_count as u64).sum();
    let added: u64 = buckets.iter().map(|b| b.lines_added).sum();
    let removed: u64 = buckets.iter().map(|b| b.lines_removed).sum();
    println!();
    println!(
        "{}: {} commits, {} added, {} removed",
        style("Totals").bold(),
        style(thousands(commits as i64)).cyan(),
        style(thousands(added as i64)).green(),
        style(thousands(removed as i64)).red(),
    );

    Ok(())
}
