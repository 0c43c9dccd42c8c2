use std::collections::BTreeMap;

use chrono::{DateTime, Datelike, Duration, NaiveDate, TimeZone, Utc};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::model::{Bucket, CommitRecord, DateRange};

/// Monday-aligned anchor for the fixed 14-day grid used by `TwoWeeks`.
fn fortnight_anchor() -> NaiveDate {
    NaiveDate::from_ymd_opt(1970, 1, 5).expect("1970-01-05 is a valid date")
}

/// Bucket width, a pure function of the selected window's span in days.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Granularity {
    Day,
    Week,
    TwoWeeks,
    Month,
}

impl Granularity {
    pub fn for_range(range: &DateRange) -> Self {
        match range.days() {
            i64::MIN..=90 => Granularity::Day,
            91..=365 => Granularity::Week,
            366..=730 => Granularity::TwoWeeks,
            _ => Granularity::Month,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Granularity::Day => "daily",
            Granularity::Week => "weekly",
            Granularity::TwoWeeks => "fortnightly",
            Granularity::Month => "monthly",
        }
    }

    /// Keyboard nudge step for the range brush, in days.
    pub fn step_days(&self) -> i64 {
        match self {
            Granularity::Day => 1,
            Granularity::Week => 7,
            Granularity::TwoWeeks => 14,
            Granularity::Month => 30,
        }
    }

    /// First day of the bucket containing `date`. Weeks start on Monday,
    /// two-week buckets sit on a Monday-aligned 14-day grid, months align
    /// to calendar months.
    pub fn period_start(&self, date: NaiveDate) -> NaiveDate {
        match self {
            Granularity::Day => date,
            Granularity::Week => {
                date - Duration::days(date.weekday().num_days_from_monday() as i64)
            }
            Granularity::TwoWeeks => {
                let anchor = fortnight_anchor();
                let offset = (date - anchor).num_days().div_euclid(14) * 14;
                anchor + Duration::days(offset)
            }
            Granularity::Month => date.with_day(1).unwrap_or(date),
        }
    }

    /// Unique, chronologically sortable key for the bucket starting at `start`.
    pub fn bucket_key(&self, start: NaiveDate) -> String {
        match self {
            Granularity::Month => start.format("%Y-%m").to_string(),
            _ => start.format("%Y-%m-%d").to_string(),
        }
    }
}

/// Scope of the running `cumulative_lines` total.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum CumulativeMode {
    /// Accumulate over the entire dataset; narrowing the window only hides
    /// buckets, it never changes their cumulative values.
    #[default]
    Full,
    /// Restart the total at the first visible bucket.
    Window,
}

#[derive(Debug, Clone)]
struct DayCell {
    date: NaiveDate,
    commit_count: u32,
    lines_added: u64,
    lines_removed: u64,
    cumulative_lines: i64,
}

/// Pre-grouped commit history. Grouping into per-day cells happens once per
/// dataset; windowing merges cells into coarser buckets, so a brush drag step
/// costs O(days), not O(commits).
#[derive(Debug, Clone, Default)]
pub struct Timeline {
    days: Vec<DayCell>,
}

impl Timeline {
    pub fn new(records: &[CommitRecord]) -> Self {
        let mut day_map: BTreeMap<NaiveDate, (u32, u64, u64)> = BTreeMap::new();

        for record in records {
            let entry = day_map.entry(record.timestamp.date_naive()).or_insert((0, 0, 0));
            entry.0 += 1;
            entry.1 += record.lines_added as u64;
            entry.2 += record.lines_removed as u64;
        }

        let mut running = 0i64;
        let days = day_map
            .into_iter()
            .map(|(date, (commit_count, lines_added, lines_removed))| {
                running += lines_added as i64 - lines_removed as i64;
                DayCell {
                    date,
                    commit_count,
                    lines_added,
                    lines_removed,
                    cumulative_lines: running,
                }
            })
            .collect();

        Self { days }
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    /// Absolute range covered by the dataset, at day resolution.
    pub fn absolute_range(&self) -> Option<DateRange> {
        let first = self.days.first()?;
        let last = self.days.last()?;
        DateRange::new(day_start(first.date), day_start(last.date)).ok()
    }

    /// Buckets visible in `range`, with full-history cumulative totals.
    pub fn window(&self, range: &DateRange) -> Vec<Bucket> {
        self.window_with(range, CumulativeMode::Full)
    }

    /// Merge day cells into buckets at the granularity implied by `range` and
    /// emit those whose period start falls within it, inclusive on both ends.
    /// Groups before the window still feed the running total, so panning the
    /// brush changes which buckets are visible without changing their values.
    pub fn window_with(&self, range: &DateRange, mode: CumulativeMode) -> Vec<Bucket> {
        let granularity = Granularity::for_range(range);
        // Period starts are day-resolution instants, so the visibility test
        // runs against the window's calendar days.
        let window = match DateRange::new(day_start(range.start().date_naive()), range.end()) {
            Ok(w) => w,
            Err(_) => *range,
        };
        let mut visible = Vec::new();
        let mut current: Option<Bucket> = None;
        let mut baseline: Option<i64> = None;

        for day in &self.days {
            let start = granularity.period_start(day.date);
            match current.as_mut() {
                Some(bucket) if bucket.period_start == day_start(start) => {
                    bucket.commit_count += day.commit_count;
                    bucket.lines_added += day.lines_added;
                    bucket.lines_removed += day.lines_removed;
                    bucket.cumulative_lines = day.cumulative_lines;
                }
                _ => {
                    if let Some(done) = current.take() {
                        Self::emit(&mut visible, &mut baseline, done, &window);
                    }
                    current = Some(Bucket {
                        key: granularity.bucket_key(start),
                        period_start: day_start(start),
                        commit_count: day.commit_count,
                        lines_added: day.lines_added,
                        lines_removed: day.lines_removed,
                        cumulative_lines: day.cumulative_lines,
                    });
                }
            }
        }
        if let Some(done) = current.take() {
            Self::emit(&mut visible, &mut baseline, done, &window);
        }

        if mode == CumulativeMode::Window {
            if let Some(base) = baseline {
                for bucket in &mut visible {
                    bucket.cumulative_lines -= base;
                }
            }
        }

        visible
    }

    fn emit(visible: &mut Vec<Bucket>, baseline: &mut Option<i64>, bucket: Bucket, range: &DateRange) {
        if range.contains(bucket.period_start) {
            if baseline.is_none() {
                // net total accumulated before the first visible bucket
                *baseline =
                    Some(bucket.cumulative_lines - (bucket.lines_added as i64 - bucket.lines_removed as i64));
            }
            visible.push(bucket);
        }
    }
}

/// One-shot aggregation: group `records`, then window them over `range` with
/// full-history cumulative totals. Pure and idempotent; `records` is never
/// mutated and identical inputs produce identical output.
pub fn aggregate(records: &[CommitRecord], range: &DateRange) -> Vec<Bucket> {
    Timeline::new(records).window(range)
}

fn day_start(date: NaiveDate) -> DateTime<Utc> {
    Utc.from_utc_datetime(&date.and_hms_opt(0, 0, 0).expect("midnight exists"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn record(date: &str, added: u32, removed: u32) -> CommitRecord {
        CommitRecord {
            hash: format!("{date}-{added}-{removed}"),
            author: "ada".into(),
            timestamp: format!("{date}T12:00:00Z").parse().unwrap(),
            lines_added: added,
            lines_removed: removed,
            message: "change".into(),
            files_touched: 1,
        }
    }

    fn range(start: &str, end: &str) -> DateRange {
        DateRange::new(
            format!("{start}T00:00:00Z").parse().unwrap(),
            format!("{end}T00:00:00Z").parse().unwrap(),
        )
        .unwrap()
    }

    fn span_of_days(days: i64) -> DateRange {
        let start: DateTime<Utc> = "2020-01-01T00:00:00Z".parse().unwrap();
        DateRange::new(start, start + Duration::days(days)).unwrap()
    }

    #[test]
    fn granularity_boundaries() {
        assert_eq!(Granularity::for_range(&span_of_days(0)), Granularity::Day);
        assert_eq!(Granularity::for_range(&span_of_days(90)), Granularity::Day);
        assert_eq!(Granularity::for_range(&span_of_days(91)), Granularity::Week);
        assert_eq!(Granularity::for_range(&span_of_days(365)), Granularity::Week);
        assert_eq!(Granularity::for_range(&span_of_days(366)), Granularity::TwoWeeks);
        assert_eq!(Granularity::for_range(&span_of_days(730)), Granularity::TwoWeeks);
        assert_eq!(Granularity::for_range(&span_of_days(731)), Granularity::Month);
    }

    #[test]
    fn week_periods_start_on_monday() {
        // 2024-06-13 is a Thursday
        let date = NaiveDate::from_ymd_opt(2024, 6, 13).unwrap();
        let start = Granularity::Week.period_start(date);
        assert_eq!(start, NaiveDate::from_ymd_opt(2024, 6, 10).unwrap());
        assert_eq!(start.weekday(), chrono::Weekday::Mon);
    }

    #[test]
    fn fortnight_grid_is_stable_and_monday_aligned() {
        let date = NaiveDate::from_ymd_opt(2024, 6, 13).unwrap();
        let start = Granularity::TwoWeeks.period_start(date);
        assert_eq!(start.weekday(), chrono::Weekday::Mon);
        // every day of the window maps to the same start
        for offset in 0..14 {
            assert_eq!(Granularity::TwoWeeks.period_start(start + Duration::days(offset)), start);
        }
        assert_ne!(Granularity::TwoWeeks.period_start(start + Duration::days(14)), start);
    }

    #[test]
    fn month_keys_use_calendar_months() {
        let date = NaiveDate::from_ymd_opt(2024, 2, 15).unwrap();
        let start = Granularity::Month.period_start(date);
        assert_eq!(start, NaiveDate::from_ymd_opt(2024, 2, 1).unwrap());
        assert_eq!(Granularity::Month.bucket_key(start), "2024-02");
    }

    #[test]
    fn aggregates_reference_scenario() {
        // 45-day span resolves to Day granularity; two visible buckets.
        let records = vec![
            record("2024-01-01", 10, 2),
            record("2024-01-01", 5, 1),
            record("2024-02-15", 3, 3),
        ];
        let full = DateRange::from_records(&records);
        assert_eq!(Granularity::for_range(&full), Granularity::Day);

        let buckets = aggregate(&records, &full);
        assert_eq!(buckets.len(), 2);

        assert_eq!(buckets[0].key, "2024-01-01");
        assert_eq!(buckets[0].commit_count, 2);
        assert_eq!(buckets[0].lines_added, 15);
        assert_eq!(buckets[0].lines_removed, 3);
        assert_eq!(buckets[0].cumulative_lines, 12);

        assert_eq!(buckets[1].key, "2024-02-15");
        assert_eq!(buckets[1].commit_count, 1);
        assert_eq!(buckets[1].lines_added, 3);
        assert_eq!(buckets[1].lines_removed, 3);
        assert_eq!(buckets[1].cumulative_lines, 12);
    }

    #[test]
    fn conserves_line_totals_over_absolute_range() {
        let records = vec![
            record("2024-01-01", 100, 40),
            record("2024-01-08", 7, 9),
            record("2024-02-20", 31, 5),
            record("2024-03-03", 0, 12),
        ];
        let full = DateRange::from_records(&records);
        let buckets = aggregate(&records, &full);

        let added: u64 = buckets.iter().map(|b| b.lines_added).sum();
        let removed: u64 = buckets.iter().map(|b| b.lines_removed).sum();
        assert_eq!(added, records.iter().map(|r| r.lines_added as u64).sum::<u64>());
        assert_eq!(removed, records.iter().map(|r| r.lines_removed as u64).sum::<u64>());

        let net: i64 = records.iter().map(|r| r.net_lines()).sum();
        assert_eq!(buckets.last().unwrap().cumulative_lines, net);
    }

    #[test]
    fn aggregate_is_idempotent() {
        let records = vec![
            record("2024-01-03", 4, 1),
            record("2024-01-01", 2, 2),
            record("2024-01-02", 8, 0),
        ];
        let full = DateRange::from_records(&records);
        assert_eq!(aggregate(&records, &full), aggregate(&records, &full));
    }

    #[test]
    fn buckets_are_ordered_ascending() {
        let records = vec![
            record("2024-04-09", 1, 0),
            record("2024-01-02", 1, 0),
            record("2024-03-30", 1, 0),
        ];
        let buckets = aggregate(&records, &DateRange::from_records(&records));
        for pair in buckets.windows(2) {
            assert!(pair[0].period_start < pair[1].period_start);
        }
    }

    #[test]
    fn narrowing_preserves_cumulative_values() {
        let records = vec![
            record("2024-01-01", 10, 0),
            record("2024-01-15", 20, 5),
            record("2024-02-01", 1, 30),
            record("2024-02-20", 6, 0),
        ];
        let timeline = Timeline::new(&records);
        let full = timeline.absolute_range().unwrap();
        let all = timeline.window(&full);

        let narrow = range("2024-02-01", "2024-02-20");
        let visible = timeline.window(&narrow);
        assert_eq!(visible.len(), 2);
        for bucket in &visible {
            let same = all.iter().find(|b| b.key == bucket.key).unwrap();
            assert_eq!(same.cumulative_lines, bucket.cumulative_lines);
        }
        // prior history still counts: 10 + 15 - 29 at 2024-02-01
        assert_eq!(visible[0].cumulative_lines, 10 + 15 - 29);
    }

    #[test]
    fn window_mode_restarts_the_running_total() {
        let records = vec![
            record("2024-01-01", 10, 0),
            record("2024-02-01", 5, 1),
            record("2024-02-10", 2, 0),
        ];
        let timeline = Timeline::new(&records);
        let narrow = range("2024-02-01", "2024-02-10");
        let visible = timeline.window_with(&narrow, CumulativeMode::Window);
        assert_eq!(visible[0].cumulative_lines, 4);
        assert_eq!(visible[1].cumulative_lines, 6);
    }

    #[test]
    fn empty_records_yield_empty_buckets() {
        let buckets = aggregate(&[], &DateRange::from_records(&[]));
        assert!(buckets.is_empty());
    }

    #[test]
    fn week_granularity_merges_days() {
        // 120-day span selects Week granularity
        let records = vec![
            record("2024-01-01", 1, 0), // Monday
            record("2024-01-03", 1, 0), // same week
            record("2024-01-08", 1, 0), // next week
            record("2024-04-30", 1, 0),
        ];
        let full = DateRange::from_records(&records);
        assert_eq!(Granularity::for_range(&full), Granularity::Week);

        let buckets = aggregate(&records, &full);
        assert_eq!(buckets.len(), 3);
        assert_eq!(buckets[0].key, "2024-01-01");
        assert_eq!(buckets[0].commit_count, 2);
        assert_eq!(buckets[1].key, "2024-01-08");
    }
}
