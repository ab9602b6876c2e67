pub use crate::config::*;

use log::debug;

use crate::lexicon::LexiconScorer;
use crate::rule_based::RuleBasedScorer;
use crate::scoring::SentimentScorer;
use crate::Analyzer;

/// A builder for an [`Analyzer`].
///
/// By default, the scorers are chosen from the scoring method of the rules.
/// Custom scorers replace them all.
///
/// ```
/// pub use text_sentiment::builder::Builder;
/// pub use text_sentiment::{AnalysisRequest, AnalysisRules, SentimentLabel, Source};
/// # use text_sentiment::SentimentError;
///
/// let analyzer = Builder::new(&AnalysisRules::DEFAULT_RULES)?.build()?;
///
/// let res = analyzer.analyze(&AnalysisRequest {
///     raw_text: "I love this product, it's amazing!".to_string(),
///     source: Source::Typed,
/// })?;
/// assert_eq!(res.label, SentimentLabel::Positive);
///
/// # Ok::<(), SentimentError>(())
/// ```
pub struct Builder {
    pub(crate) _rules: AnalysisRules,
    pub(crate) _scorers: Vec<Box<dyn SentimentScorer>>,
}

impl Builder {
    /// Checks that the scoring method can feed the classification policy.
    pub fn new(rules: &AnalysisRules) -> Result<Builder, SentimentError> {
        let metric = rules.classification.metric();
        if !rules.scoring_method.produces(metric) {
            return Err(SentimentError::InvalidRules {
                message: format!(
                    "the classification policy {:?} needs the {} metric, which the scoring method {:?} does not produce",
                    rules.classification, metric, rules.scoring_method
                ),
            });
        }
        Ok(Builder {
            _rules: rules.clone(),
            _scorers: Vec::new(),
        })
    }

    /// Adds a custom scorer.
    pub fn scorer(mut self, scorer: Box<dyn SentimentScorer>) -> Builder {
        self._scorers.push(scorer);
        self
    }

    pub fn build(self) -> Result<Analyzer, SentimentError> {
        let scorers: Vec<Box<dyn SentimentScorer>> = if self._scorers.is_empty() {
            default_scorers(self._rules.scoring_method)
        } else {
            self._scorers
        };

        let metric = self._rules.classification.metric();
        if !scorers.iter().any(|s| s.metrics().contains(&metric)) {
            return Err(SentimentError::InvalidRules {
                message: format!("none of the scorers reports the {} metric", metric),
            });
        }
        debug!(
            "build: rules: {:?} scorers: {:?}",
            self._rules,
            scorers.iter().map(|s| s.name()).collect::<Vec<&str>>()
        );
        Ok(Analyzer {
            rules: self._rules,
            scorers,
        })
    }
}

fn default_scorers(method: ScoringMethod) -> Vec<Box<dyn SentimentScorer>> {
    match method {
        ScoringMethod::Lexicon => vec![Box::new(LexiconScorer::new())],
        ScoringMethod::RuleBased => vec![Box::new(RuleBasedScorer::new())],
        ScoringMethod::Both => vec![
            Box::new(LexiconScorer::new()),
            Box::new(RuleBasedScorer::new()),
        ],
    }
}
