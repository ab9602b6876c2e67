//! Display payload for an analysis result: a headline keyed by the label, the
//! scores with two decimals, and a text bar chart of the scores.

use crate::config::*;

/// Width of the bars, in characters, for the whole declared range.
pub const CHART_WIDTH: usize = 40;
const NAME_WIDTH: usize = 12;

#[derive(Eq, PartialEq, Debug, Clone, Copy)]
pub enum LabelColor {
    Green,
    LightGreen,
    Gray,
    Orange,
    Red,
}

impl LabelColor {
    /// ANSI SGR parameters for terminals.
    pub fn ansi_code(&self) -> &'static str {
        match self {
            LabelColor::Green => "1;32",
            LabelColor::LightGreen => "32",
            LabelColor::Gray => "90",
            LabelColor::Orange => "33",
            LabelColor::Red => "1;31",
        }
    }
}

#[derive(PartialEq, Debug, Clone)]
pub struct FormattedScore {
    pub metric: Metric,
    pub value: f64,
    /// The value with two decimals.
    pub text: String,
}

#[derive(PartialEq, Debug, Clone)]
pub struct Presentation {
    pub label: SentimentLabel,
    pub icon: &'static str,
    pub color: LabelColor,
    pub headline: String,
    pub scores: Vec<FormattedScore>,
    /// One line per metric.
    pub chart: Vec<String>,
}

pub fn label_style(label: SentimentLabel) -> (&'static str, LabelColor) {
    match label {
        SentimentLabel::VeryPositive => ("😄", LabelColor::Green),
        SentimentLabel::Positive => ("🙂", LabelColor::Green),
        SentimentLabel::SlightlyPositive => ("🙂", LabelColor::LightGreen),
        SentimentLabel::Neutral => ("😐", LabelColor::Gray),
        SentimentLabel::SlightlyNegative => ("🙁", LabelColor::Orange),
        SentimentLabel::Negative => ("☹", LabelColor::Red),
        SentimentLabel::VeryNegative => ("😠", LabelColor::Red),
    }
}

pub fn present(result: &AnalysisResult) -> Presentation {
    present_scores(result.label, &result.scores)
}

pub fn present_scores(label: SentimentLabel, scores: &ScoreSet) -> Presentation {
    let (icon, color) = label_style(label);
    Presentation {
        label,
        icon,
        color,
        headline: format!("{} {} Sentiment", icon, label),
        scores: scores
            .iter()
            .map(|(metric, value)| FormattedScore {
                metric,
                value,
                text: format!("{:.2}", value),
            })
            .collect(),
        chart: scores
            .iter()
            .map(|(metric, value)| chart_row(metric, value))
            .collect(),
    }
}

/// One row of the chart: `name [bar] value`.
///
/// The bar spans the declared range of the metric. The reference line at zero
/// is drawn with `|`, the bar with `#` from zero to the value.
pub fn chart_row(metric: Metric, value: f64) -> String {
    format!(
        "{:<name$} [{}] {:>6.2}",
        metric.name(),
        bar(metric.range(), value, CHART_WIDTH),
        value,
        name = NAME_WIDTH
    )
}

fn bar((lo, hi): (f64, f64), value: f64, width: usize) -> String {
    let to_col = |x: f64| -> usize {
        let x = if x.is_nan() { 0.0 } else { x.clamp(lo, hi) };
        (((x - lo) / (hi - lo)) * width as f64).round() as usize
    };
    let zero = to_col(0.0).min(width);
    let pos = to_col(value).min(width);
    let (start, end) = if pos < zero { (pos, zero) } else { (zero, pos) };

    let mut cells: Vec<char> = vec![' '; width + 1];
    for cell in cells.iter_mut().take(end).skip(start) {
        *cell = '#';
    }
    if pos > zero {
        cells[pos] = '#';
    }
    cells[zero] = '|';
    cells.into_iter().collect()
}
