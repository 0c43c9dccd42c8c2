use anyhow::Context;

use super::{aggregate::Timeline, output_json, output_ndjson, output_table, CumulativeMode, Granularity};
use crate::cli::CommonArgs;
use crate::model::DateRange;
use crate::util::resolve_window;

pub fn exec(
    common: CommonArgs,
    json: bool,
    ndjson: bool,
    cumulative: CumulativeMode,
) -> anyhow::Result<()> {
    let dataset = crate::cli::load_dataset(&common).context("Failed to load analysis report")?;

    let absolute = DateRange::from_records(&dataset.records);
    let window = resolve_window(&absolute, common.since.as_deref(), common.until.as_deref())
        .context("Failed to resolve date window")?;

    let timeline = Timeline::new(&dataset.records);
    let buckets = timeline.window_with(&window, cumulative);
    let granularity = Granularity::for_range(&window);

    if json {
        output_json(&buckets, granularity, &dataset.source, &common)?;
    } else if ndjson {
        output_ndjson(&buckets)?;
    } else {
        output_table(&buckets, granularity, &common)?;
    }

    Ok(())
}
