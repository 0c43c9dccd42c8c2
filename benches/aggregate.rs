use chrono::{DateTime, Duration, Utc};
use criterion::{black_box, criterion_group, criterion_main, Criterion};

use gitline::model::{CommitRecord, DateRange};
use gitline::timeline::{aggregate, Edge, Selection, Timeline};

/// Build a deterministic three-year history of `count` commits.
fn synthetic_records(count: usize) -> Vec<CommitRecord> {
    let start: DateTime<Utc> = "2021-01-01T00:00:00Z".parse().unwrap();
    (0..count)
        .map(|i| {
            let minutes = (i as i64 * 157) % (3 * 365 * 24 * 60);
            CommitRecord {
                hash: format!("{i:040x}"),
                author: format!("author-{}", i % 23),
                timestamp: start + Duration::minutes(minutes),
                lines_added: ((i * 37) % 400) as u32,
                lines_removed: ((i * 17) % 250) as u32,
                message: format!("change {i}"),
                files_touched: (i % 12) as u32 + 1,
            }
        })
        .collect()
}

fn bench_dataset_load(c: &mut Criterion) {
    let records = synthetic_records(10_000);
    c.bench_function("timeline_new_10k", |b| {
        b.iter(|| Timeline::new(black_box(&records)))
    });
}

fn bench_one_shot_aggregate(c: &mut Criterion) {
    let records = synthetic_records(10_000);
    let range = DateRange::from_records(&records);
    c.bench_function("aggregate_10k_full_range", |b| {
        b.iter(|| aggregate(black_box(&records), black_box(&range)))
    });
}

/// The per-frame cost of a brush drag: one edge update plus a re-window.
fn bench_drag_step(c: &mut Criterion) {
    let records = synthetic_records(10_000);
    let timeline = Timeline::new(&records);
    let absolute = DateRange::from_records(&records);

    c.bench_function("drag_step_rewindow_10k", |b| {
        let mut selection = Selection::new(absolute);
        let mut target = absolute.start() + Duration::days(30);
        b.iter(|| {
            selection.update(Edge::Start, target);
            target = target + Duration::days(1);
            if target >= absolute.end() {
                target = absolute.start();
                selection.reset();
            }
            timeline.window(black_box(selection.selected()))
        })
    });
}

criterion_group!(
    benches,
    bench_dataset_load,
    bench_one_shot_aggregate,
    bench_drag_step
);
criterion_main!(benches);
