use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use chrono::DateTime;
use log::{debug, warn};
use serde::Deserialize;

use crate::error::Result;
use crate::model::CommitRecord;

/// One commit entry as the analysis service encodes it on the wire. Counts,
/// message, and file count are omitted when empty.
#[derive(Debug, Deserialize)]
struct WireCommit {
    #[serde(rename = "h")]
    hash: String,
    #[serde(rename = "a", default)]
    author: String,
    #[serde(rename = "d", default)]
    timestamp: Option<i64>,
    #[serde(rename = "+", default)]
    added: u32,
    #[serde(rename = "-", default)]
    removed: u32,
    #[serde(rename = "m", default)]
    message: String,
    #[serde(rename = "f", default)]
    files_touched: u32,
}

/// The analysis service's report for one repository.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeReport {
    #[serde(default)]
    pub total_added: i64,
    #[serde(default)]
    pub total_removed: i64,
    #[serde(default)]
    pub total_contributors: u32,
    #[serde(default)]
    pub total_commits: u32,
    commits: Vec<WireCommit>,
}

/// Decoded dataset plus provenance for output envelopes.
#[derive(Debug)]
pub struct Dataset {
    pub source: String,
    pub records: Vec<CommitRecord>,
    pub skipped: usize,
}

/// Read and decode a report from `path`, or stdin when `None`.
pub fn load(path: Option<&Path>) -> Result<Dataset> {
    let (source, raw) = match path {
        Some(p) => {
            let mut buf = String::new();
            BufReader::new(File::open(p)?).read_to_string(&mut buf)?;
            (p.display().to_string(), buf)
        }
        None => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            ("stdin".to_string(), buf)
        }
    };

    let report: AnalyzeReport = serde_json::from_str(&raw)?;
    let (records, skipped) = decode_records(report);
    Ok(Dataset { source, records, skipped })
}

/// Convert wire commits into validated records, sorted chronologically.
/// Entries without a representable timestamp are skipped; a single bad
/// record must not take the whole series down.
fn decode_records(report: AnalyzeReport) -> (Vec<CommitRecord>, usize) {
    let total = report.commits.len();
    let mut records = Vec::with_capacity(total);
    let mut skipped = 0usize;

    for wire in report.commits {
        let timestamp = wire
            .timestamp
            .and_then(|secs| DateTime::from_timestamp(secs, 0));
        let Some(timestamp) = timestamp else {
            warn!(
                "skipping commit {} with missing or invalid timestamp {:?}",
                wire.hash, wire.timestamp
            );
            skipped += 1;
            continue;
        };

        records.push(CommitRecord {
            hash: wire.hash,
            author: wire.author,
            timestamp,
            lines_added: wire.added,
            lines_removed: wire.removed,
            message: wire.message,
            files_touched: wire.files_touched,
        });
    }

    records.sort_by_key(|r| r.timestamp);
    debug!("decoded {} commits ({} skipped) of {}", records.len(), skipped, total);
    (records, skipped)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn decode(json: &str) -> (Vec<CommitRecord>, usize) {
        let report: AnalyzeReport = serde_json::from_str(json).unwrap();
        decode_records(report)
    }

    #[test]
    fn decodes_compact_wire_keys() {
        let (records, skipped) = decode(
            r#"{
                "totalAdded": 15,
                "totalRemoved": 3,
                "totalContributors": 1,
                "totalCommits": 1,
                "commits": [
                    {"h": "abc123", "a": "ada", "d": 1704067200, "+": 15, "-": 3, "m": "init", "f": 2}
                ]
            }"#,
        );
        assert_eq!(skipped, 0);
        assert_eq!(records.len(), 1);
        let r = &records[0];
        assert_eq!(r.hash, "abc123");
        assert_eq!(r.author, "ada");
        assert_eq!(r.timestamp.to_rfc3339(), "2024-01-01T00:00:00+00:00");
        assert_eq!(r.lines_added, 15);
        assert_eq!(r.lines_removed, 3);
        assert_eq!(r.message, "init");
        assert_eq!(r.files_touched, 2);
    }

    #[test]
    fn omitted_fields_default_to_empty() {
        let (records, _) = decode(
            r#"{"commits": [{"h": "abc", "a": "ada", "d": 1704067200}]}"#,
        );
        assert_eq!(records[0].lines_added, 0);
        assert_eq!(records[0].lines_removed, 0);
        assert_eq!(records[0].message, "");
        assert_eq!(records[0].files_touched, 0);
    }

    #[test]
    fn bad_timestamps_are_skipped_not_fatal() {
        let (records, skipped) = decode(
            r#"{"commits": [
                {"h": "ok", "a": "ada", "d": 1704067200, "+": 1},
                {"h": "none", "a": "bob"},
                {"h": "overflow", "a": "cyd", "d": 99999999999999}
            ]}"#,
        );
        assert_eq!(records.len(), 1);
        assert_eq!(skipped, 2);
        assert_eq!(records[0].hash, "ok");
    }

    #[test]
    fn records_come_out_chronological() {
        let (records, _) = decode(
            r#"{"commits": [
                {"h": "new", "a": "ada", "d": 1706745600},
                {"h": "old", "a": "ada", "d": 1704067200}
            ]}"#,
        );
        assert_eq!(records[0].hash, "old");
        assert_eq!(records[1].hash, "new");
    }

    #[test]
    fn all_invalid_degrades_to_an_empty_dataset() {
        let (records, skipped) = decode(r#"{"commits": [{"h": "x", "a": "y"}]}"#);
        assert!(records.is_empty());
        assert_eq!(skipped, 1);
    }
}
