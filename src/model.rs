use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub const SCHEMA_VERSION: u32 = 1;

/// A single commit as delivered by the analysis service, decoded and validated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommitRecord {
    pub hash: String,
    pub author: String,
    pub timestamp: DateTime<Utc>,
    pub lines_added: u32,
    pub lines_removed: u32,
    pub message: String,
    pub files_touched: u32,
}

impl CommitRecord {
    pub fn short_hash(&self) -> &str {
        self.hash.get(..8).unwrap_or(&self.hash)
    }

    /// Net line delta of this commit.
    pub fn net_lines(&self) -> i64 {
        self.lines_added as i64 - self.lines_removed as i64
    }
}

/// A closed interval of instants. `start <= end` always holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
}

impl DateRange {
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> crate::error::Result<Self> {
        if start > end {
            return Err(crate::error::GitlineError::InvalidRange(format!(
                "start ({start}) is after end ({end})"
            )));
        }
        Ok(Self { start, end })
    }

    pub fn single(instant: DateTime<Utc>) -> Self {
        Self { start: instant, end: instant }
    }

    /// Absolute range of a dataset: min/max timestamp over all records.
    /// An empty dataset degrades to a zero-length range at the current time
    /// so downstream rendering can show "no data" instead of failing.
    pub fn from_records(records: &[CommitRecord]) -> Self {
        let mut it = records.iter().map(|r| r.timestamp);
        match it.next() {
            None => Self::single(Utc::now()),
            Some(first) => {
                let (mut min, mut max) = (first, first);
                for t in it {
                    if t < min {
                        min = t;
                    }
                    if t > max {
                        max = t;
                    }
                }
                Self { start: min, end: max }
            }
        }
    }

    pub fn start(&self) -> DateTime<Utc> {
        self.start
    }

    pub fn end(&self) -> DateTime<Utc> {
        self.end
    }

    /// Span in whole days.
    pub fn days(&self) -> i64 {
        (self.end - self.start).num_days()
    }

    /// Inclusive on both ends.
    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        instant >= self.start && instant <= self.end
    }

    pub fn clamp(&self, instant: DateTime<Utc>) -> DateTime<Utc> {
        instant.max(self.start).min(self.end)
    }
}

/// One aggregated time period of the commit timeline.
///
/// `cumulative_lines` is the running net line total through the end of this
/// bucket; its scope (full history vs visible window) is decided by the
/// aggregation's `CumulativeMode`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bucket {
    pub key: String,
    pub period_start: DateTime<Utc>,
    pub commit_count: u32,
    pub lines_added: u64,
    pub lines_removed: u64,
    pub cumulative_lines: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimelineOutput {
    pub version: u32,
    pub generated_at: DateTime<Utc>,
    pub source: String,
    pub since: Option<String>,
    pub until: Option<String>,
    pub granularity: String,
    pub buckets: Vec<Bucket>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContributorEntry {
    pub author: String,
    pub commit_count: u32,
    pub lines_added: u64,
    pub lines_removed: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContributorsOutput {
    pub version: u32,
    pub generated_at: DateTime<Utc>,
    pub source: String,
    pub since: Option<String>,
    pub until: Option<String>,
    pub contributors: Vec<ContributorEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommitsOutput {
    pub version: u32,
    pub generated_at: DateTime<Utc>,
    pub source: String,
    pub since: Option<String>,
    pub until: Option<String>,
    pub largest: Vec<CommitRecord>,
    pub shrinking: Vec<CommitRecord>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn instant(s: &str) -> DateTime<Utc> {
        s.parse().unwrap()
    }

    #[test]
    fn range_rejects_inverted_bounds() {
        let a = instant("2024-03-01T00:00:00Z");
        let b = instant("2024-03-02T00:00:00Z");
        assert!(DateRange::new(b, a).is_err());
        assert!(DateRange::new(a, b).is_ok());
        assert!(DateRange::new(a, a).is_ok());
    }

    #[test]
    fn range_contains_is_inclusive() {
        let a = instant("2024-03-01T00:00:00Z");
        let b = instant("2024-03-10T00:00:00Z");
        let range = DateRange::new(a, b).unwrap();
        assert!(range.contains(a));
        assert!(range.contains(b));
        assert!(!range.contains(instant("2024-03-10T00:00:01Z")));
    }

    #[test]
    fn absolute_range_from_unordered_records() {
        let mk = |ts: &str| CommitRecord {
            hash: "deadbeef".into(),
            author: "ada".into(),
            timestamp: instant(ts),
            lines_added: 1,
            lines_removed: 0,
            message: String::new(),
            files_touched: 1,
        };
        let records = vec![
            mk("2024-05-10T12:00:00Z"),
            mk("2024-05-01T08:00:00Z"),
            mk("2024-05-07T23:59:59Z"),
        ];
        let range = DateRange::from_records(&records);
        assert_eq!(range.start(), instant("2024-05-01T08:00:00Z"));
        assert_eq!(range.end(), instant("2024-05-10T12:00:00Z"));
    }

    #[test]
    fn empty_dataset_yields_zero_length_range() {
        let range = DateRange::from_records(&[]);
        assert_eq!(range.start(), range.end());
        assert_eq!(range.days(), 0);
    }
}
