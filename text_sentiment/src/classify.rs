use crate::config::*;

/// Threshold of the compound score for a non-neutral label.
pub const COMPOUND_THRESHOLD: f64 = 0.05;
/// Polarity beyond which the five-way policy reports a strong sentiment.
pub const STRONG_POLARITY: f64 = 0.5;

/// Three-way label from a polarity.
pub fn classify_polarity(polarity: f64) -> SentimentLabel {
    if polarity > 0.0 {
        SentimentLabel::Positive
    } else if polarity < 0.0 {
        SentimentLabel::Negative
    } else {
        // Also reached by NaN.
        SentimentLabel::Neutral
    }
}

/// Three-way label from a compound score.
pub fn classify_compound(compound: f64) -> SentimentLabel {
    if compound >= COMPOUND_THRESHOLD {
        SentimentLabel::Positive
    } else if compound <= -COMPOUND_THRESHOLD {
        SentimentLabel::Negative
    } else {
        SentimentLabel::Neutral
    }
}

/// Five-way label from a polarity.
pub fn classify_polarity_fine(polarity: f64) -> SentimentLabel {
    if polarity > STRONG_POLARITY {
        SentimentLabel::VeryPositive
    } else if polarity > 0.0 {
        SentimentLabel::SlightlyPositive
    } else if polarity <= -STRONG_POLARITY {
        SentimentLabel::VeryNegative
    } else if polarity < 0.0 {
        SentimentLabel::SlightlyNegative
    } else {
        SentimentLabel::Neutral
    }
}

/// Applies the policy to the scores.
///
/// Returns the label and the value of the metric it was derived from.
pub fn classify(
    scores: &ScoreSet,
    policy: ClassificationPolicy,
) -> Result<(SentimentLabel, f64), SentimentError> {
    let metric = policy.metric();
    let value = scores
        .get(metric)
        .ok_or(SentimentError::MissingMetric { metric })?;
    let label = match policy {
        ClassificationPolicy::PolarityThreeWay => classify_polarity(value),
        ClassificationPolicy::CompoundThreeWay => classify_compound(value),
        ClassificationPolicy::PolarityFiveWay => classify_polarity_fine(value),
    };
    Ok((label, value))
}
