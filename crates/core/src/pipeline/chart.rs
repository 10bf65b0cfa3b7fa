use crate::domain::chart::{ChartSpec, Series};
use crate::domain::profile::EnrichedRow;
use crate::pipeline::transform::STDDEV_BANDS;

pub const X_AXIS_LABEL: &str = "periods after event";
pub const Y_AXIS_LABEL: &str = "return";

pub fn present_chart(
    rows: &[EnrichedRow],
    observation_count: i64,
    condition: &str,
    symbol: &str,
) -> ChartSpec {
    let x: Vec<i64> = rows.iter().map(|r| r.returnperiod).collect();
    let column = |f: fn(&EnrichedRow) -> f64| rows.iter().map(f).collect::<Vec<f64>>();

    let series = vec![
        Series {
            x: x.clone(),
            y: column(|r| r.mean),
            label: "mean".to_string(),
        },
        Series {
            x: x.clone(),
            y: column(|r| r.upper),
            label: format!("{STDDEV_BANDS} stddev band upper"),
        },
        Series {
            x,
            y: column(|r| r.lower),
            label: format!("{STDDEV_BANDS} stddev band lower"),
        },
    ];

    ChartSpec {
        series,
        title: format!(
            "distribution of returns over {observation_count} obs for [{condition}] on {symbol}"
        ),
        x_axis_label: X_AXIS_LABEL.to_string(),
        y_axis_label: Y_AXIS_LABEL.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows() -> Vec<EnrichedRow> {
        (1..=5)
            .map(|p| {
                let mean = p as f64 * 0.01;
                let stddev = 0.02;
                EnrichedRow {
                    returnperiod: p,
                    n: 30,
                    mean,
                    stddev,
                    upper: mean + stddev,
                    lower: mean - stddev,
                }
            })
            .collect()
    }

    #[test]
    fn three_series_share_x_in_row_order() {
        let rows = rows();
        let spec = present_chart(&rows, 30, "cond", "SYM");

        assert_eq!(spec.series.len(), 3);
        let expected_x: Vec<i64> = rows.iter().map(|r| r.returnperiod).collect();
        for s in &spec.series {
            assert_eq!(s.x, expected_x);
            assert_eq!(s.y.len(), rows.len());
        }

        let labels: Vec<&str> = spec.series.iter().map(|s| s.label.as_str()).collect();
        assert_eq!(labels, vec!["mean", "2 stddev band upper", "2 stddev band lower"]);
        assert_eq!(spec.series[0].y[2], rows[2].mean);
        assert_eq!(spec.series[1].y[2], rows[2].upper);
        assert_eq!(spec.series[2].y[2], rows[2].lower);
    }

    #[test]
    fn title_has_count_then_condition_then_symbol() {
        let condition = "bollinger range(20,2) crosses below 0";
        let symbol = "BTC:USD:daily";
        let spec = present_chart(&rows(), 731, condition, symbol);

        assert_eq!(
            spec.title,
            "distribution of returns over 731 obs for [bollinger range(20,2) crosses below 0] on BTC:USD:daily"
        );
        let count_at = spec.title.find("731").unwrap();
        let cond_at = spec.title.find(condition).unwrap();
        let sym_at = spec.title.rfind(symbol).unwrap();
        assert!(count_at < cond_at && cond_at < sym_at);
        assert_eq!(spec.x_axis_label, "periods after event");
        assert_eq!(spec.y_axis_label, "return");
    }

    #[test]
    fn empty_rows_give_empty_series() {
        let spec = present_chart(&[], 0, "c", "s");
        assert_eq!(spec.series.len(), 3);
        assert!(spec.series.iter().all(|s| s.x.is_empty() && s.y.is_empty()));
    }
}
