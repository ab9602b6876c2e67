use log::warn;

use crate::config::*;

/// A function mapping a non-empty text to a set of scores.
///
/// Implementations must be deterministic and should keep every value within
/// the declared range of its metric (see [`Metric::range`]). The pipeline
/// trusts the values as they are and only logs the ones out of range.
pub trait SentimentScorer {
    /// A short name for logging.
    fn name(&self) -> &str;

    /// The metrics that [`SentimentScorer::score`] always reports.
    fn metrics(&self) -> &[Metric];

    fn score(&self, text: &str) -> ScoreSet;
}

/// Runs all the scorers on the text and merges their scores.
pub(crate) fn score_all(scorers: &[Box<dyn SentimentScorer>], text: &str) -> ScoreSet {
    let mut res = ScoreSet::new();
    for scorer in scorers.iter() {
        let scores = scorer.score(text);
        for (metric, value) in scores.iter() {
            if !metric.in_range(value) {
                warn!(
                    "score_all: scorer {}: {} = {} is outside of {:?}",
                    scorer.name(),
                    metric,
                    value,
                    metric.range()
                );
            }
        }
        res.merge(&scores);
    }
    res
}

/// Splits the text into words, dropping the punctuation around them.
///
/// Apostrophes inside words are kept ("it's", "don't").
pub(crate) fn tokenize(text: &str) -> Vec<&str> {
    text.split_whitespace()
        .map(|w| w.trim_matches(|c: char| !c.is_alphanumeric()))
        .filter(|w| !w.is_empty())
        .collect()
}

/// The key used to look up negations: lower case, without apostrophes.
///
/// "isn't", "isn’t" and "isnt" share the key "isnt".
pub(crate) fn negation_key(word: &str) -> String {
    word.chars()
        .filter(|c| *c != '\'' && *c != '\u{2019}')
        .flat_map(|c| c.to_lowercase())
        .collect()
}
