use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Series {
    pub x: Vec<i64>,
    pub y: Vec<f64>,
    pub label: String,
}

/// Renderer-agnostic line chart: the page feeds it to Plotly, the CLI prints it as a table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSpec {
    pub series: Vec<Series>,
    pub title: String,
    pub x_axis_label: String,
    pub y_axis_label: String,
}

/// Content of the result region. Each submission replaces it wholesale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Panel {
    Chart(ChartSpec),
    ValidationErrors {
        heading: String,
        messages: Vec<String>,
    },
    Error {
        message: String,
    },
    Notice {
        message: String,
    },
}

impl Panel {
    pub fn is_chart(&self) -> bool {
        matches!(self, Panel::Chart(_))
    }

    /// Plain-text rendering, one entry per output line.
    pub fn lines(&self) -> Vec<String> {
        match self {
            Panel::Chart(spec) => {
                let mut out = Vec::with_capacity(spec.series.first().map_or(0, |s| s.x.len()) + 2);
                out.push(spec.title.clone());

                let labels: Vec<&str> = spec.series.iter().map(|s| s.label.as_str()).collect();
                out.push(format!("{}\t{}", spec.x_axis_label, labels.join("\t")));

                let Some(first) = spec.series.first() else {
                    return out;
                };
                for (idx, x) in first.x.iter().enumerate() {
                    let ys: Vec<String> = spec
                        .series
                        .iter()
                        .map(|s| s.y.get(idx).map_or_else(String::new, |y| format!("{y:.6}")))
                        .collect();
                    out.push(format!("{x}\t{}", ys.join("\t")));
                }
                out
            }
            Panel::ValidationErrors { heading, messages } => {
                let mut out = Vec::with_capacity(messages.len() + 1);
                out.push(heading.clone());
                out.extend(messages.iter().cloned());
                out
            }
            Panel::Error { message } | Panel::Notice { message } => vec![message.clone()],
        }
    }
}
