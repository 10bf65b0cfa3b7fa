use crate::domain::profile::{EnrichedRow, ReturnProfileRow};

/// Width of the plotted envelope in standard deviations, split evenly above and below the mean.
pub const STDDEV_BANDS: u32 = 2;

pub fn enrich_rows(rows: Vec<ReturnProfileRow>) -> Vec<EnrichedRow> {
    let half_width = f64::from(STDDEV_BANDS) / 2.0;
    rows.into_iter()
        .map(|row| EnrichedRow {
            upper: row.mean + half_width * row.stddev,
            lower: row.mean - half_width * row.stddev,
            returnperiod: row.returnperiod,
            n: row.n,
            mean: row.mean,
            stddev: row.stddev,
        })
        .collect()
}

/// Observation count reported by the first period. `None` for an empty profile.
pub fn observation_count(rows: &[ReturnProfileRow]) -> Option<i64> {
    rows.first().map(|row| row.n)
}
