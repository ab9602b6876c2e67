/*!
Turns a piece of text into a sentiment label.

The pipeline has the following stages, run in order for every user action:

1. [`collector::collect_input`] picks the text among an uploaded document, a
   voice capture and the text field, and updates the [`collector::SessionCache`].
2. [`normalize::normalize`] trims (and optionally cleans) the text.
3. The scorers ([`lexicon::LexiconScorer`], [`rule_based::RuleBasedScorer`] or
   any [`scoring::SentimentScorer`]) compute a [`ScoreSet`].
4. [`classify::classify`] maps the scores to a [`SentimentLabel`].
5. [`present::present`] prepares the headline, the formatted scores and a bar chart.

Stages 2 to 4 are run by [`Analyzer::analyze`]. See the [manual] for the
thresholds and the configuration options.
*/

mod config;

pub mod builder;
pub mod classify;
pub mod collector;
pub mod lexicon;
pub mod manual;
pub mod normalize;
pub mod present;
pub mod rule_based;
pub mod scoring;

use log::{debug, info};

pub use crate::config::*;
use crate::scoring::SentimentScorer;

/// A configured pipeline, from the raw text to the label.
///
/// Create it with [`builder::Builder`].
pub struct Analyzer {
    rules: AnalysisRules,
    scorers: Vec<Box<dyn SentimentScorer>>,
}

impl Analyzer {
    pub fn rules(&self) -> &AnalysisRules {
        &self.rules
    }

    /// Normalizes, scores and classifies the text of the request.
    ///
    /// Returns [`SentimentError::EmptyInput`] without running any scorer when
    /// there is nothing left to analyze after normalization.
    pub fn analyze(&self, request: &AnalysisRequest) -> Result<AnalysisResult, SentimentError> {
        info!(
            "analyze: {} chars from source {}",
            request.raw_text.chars().count(),
            request.source.name()
        );
        let text = normalize::normalize(&request.raw_text, self.rules.normalization);
        if text.is_empty() {
            info!("analyze: nothing to analyze");
            return Err(SentimentError::EmptyInput {});
        }

        let scores = scoring::score_all(&self.scorers, &text);
        debug!("analyze: scores: {:?}", scores);

        let (label, score) = classify::classify(&scores, self.rules.classification)?;
        info!(
            "analyze: {} = {:.4} -> {}",
            self.rules.classification.metric(),
            score,
            label
        );

        Ok(AnalysisResult {
            source: request.source,
            text,
            scores,
            label,
            score,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::builder::Builder;
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    fn init() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    fn typed(text: &str) -> AnalysisRequest {
        AnalysisRequest {
            raw_text: text.to_string(),
            source: Source::Typed,
        }
    }

    fn analyzer(scoring_method: ScoringMethod, classification: ClassificationPolicy) -> Analyzer {
        let rules = AnalysisRules {
            scoring_method,
            classification,
            normalization: NormalizeMode::Trim,
        };
        Builder::new(&rules).unwrap().build().unwrap()
    }

    struct Counting {
        calls: Rc<Cell<usize>>,
    }

    impl SentimentScorer for Counting {
        fn name(&self) -> &str {
            "counting"
        }
        fn metrics(&self) -> &[Metric] {
            &[Metric::Polarity]
        }
        fn score(&self, _text: &str) -> ScoreSet {
            self.calls.set(self.calls.get() + 1);
            ScoreSet::new().with(Metric::Polarity, 0.25)
        }
    }

    #[test]
    fn lexicon_examples() {
        init();
        let a = analyzer(ScoringMethod::Lexicon, ClassificationPolicy::PolarityThreeWay);
        let res = a.analyze(&typed("I love this product, it's amazing!")).unwrap();
        assert!(res.score > 0.0);
        assert_eq!(res.label, SentimentLabel::Positive);

        let res = a.analyze(&typed("This is the worst experience ever.")).unwrap();
        assert!(res.score < 0.0);
        assert_eq!(res.label, SentimentLabel::Negative);

        let res = a.analyze(&typed("The sky is blue.")).unwrap();
        assert_eq!(res.score, 0.0);
        assert_eq!(res.label, SentimentLabel::Neutral);
    }

    #[test]
    fn compound_example() {
        init();
        let a = analyzer(ScoringMethod::RuleBased, ClassificationPolicy::CompoundThreeWay);
        let res = a.analyze(&typed("okay, fine, whatever")).unwrap();
        assert!(res.score > -0.05 && res.score < 0.05);
        assert_eq!(res.label, SentimentLabel::Neutral);
        assert_eq!(res.scores.iter().count(), 4);
    }

    #[test]
    fn both_scorers_merge() {
        init();
        let a = analyzer(ScoringMethod::Both, ClassificationPolicy::PolarityFiveWay);
        let res = a.analyze(&typed("  This is absolutely perfect  ")).unwrap();
        assert_eq!(res.text, "This is absolutely perfect");
        assert_eq!(res.scores.iter().count(), 6);
        assert_eq!(res.label, SentimentLabel::VeryPositive);
    }

    #[test]
    fn empty_input_skips_scorers() {
        init();
        let calls = Rc::new(Cell::new(0));
        let a = Builder::new(&AnalysisRules::DEFAULT_RULES)
            .unwrap()
            .scorer(Box::new(Counting {
                calls: calls.clone(),
            }))
            .build()
            .unwrap();
        for text in ["", "   ", "\n\t  \r\n"] {
            let err = a.analyze(&typed(text)).unwrap_err();
            assert!(matches!(err, SentimentError::EmptyInput {}));
            assert_eq!(err.severity(), Severity::Warning);
        }
        assert_eq!(calls.get(), 0);

        let res = a.analyze(&typed("anything")).unwrap();
        assert_eq!(calls.get(), 1);
        assert_eq!(res.label, SentimentLabel::Positive);
    }

    #[test]
    fn negation_survives_cleaning() {
        init();
        for (scoring_method, classification) in [
            (ScoringMethod::Lexicon, ClassificationPolicy::PolarityThreeWay),
            (ScoringMethod::RuleBased, ClassificationPolicy::CompoundThreeWay),
            (ScoringMethod::Both, ClassificationPolicy::PolarityThreeWay),
            (ScoringMethod::Both, ClassificationPolicy::CompoundThreeWay),
        ] {
            for normalization in [NormalizeMode::Trim, NormalizeMode::Clean] {
                let rules = AnalysisRules {
                    scoring_method,
                    classification,
                    normalization,
                };
                let a = Builder::new(&rules).unwrap().build().unwrap();
                for text in ["This isn't good", "This isn’t good"] {
                    let res = a.analyze(&typed(text)).unwrap();
                    assert_eq!(res.label, SentimentLabel::Negative, "{:?} {:?}", rules, res);
                }
            }
        }
    }

    #[test]
    fn clean_mode_can_empty_the_text() {
        let rules = AnalysisRules {
            normalization: NormalizeMode::Clean,
            ..AnalysisRules::DEFAULT_RULES
        };
        let a = Builder::new(&rules).unwrap().build().unwrap();
        let err = a.analyze(&typed("https://example.com !!!")).unwrap_err();
        assert!(matches!(err, SentimentError::EmptyInput {}));
    }

    #[test]
    fn incompatible_rules_are_rejected() {
        let rules = AnalysisRules {
            scoring_method: ScoringMethod::Lexicon,
            classification: ClassificationPolicy::CompoundThreeWay,
            normalization: NormalizeMode::Trim,
        };
        assert!(matches!(
            Builder::new(&rules),
            Err(SentimentError::InvalidRules { .. })
        ));

        // Custom scorers must report the metric of the policy.
        let calls = Rc::new(Cell::new(0));
        let rules = AnalysisRules {
            scoring_method: ScoringMethod::RuleBased,
            classification: ClassificationPolicy::CompoundThreeWay,
            normalization: NormalizeMode::Trim,
        };
        let res = Builder::new(&rules)
            .unwrap()
            .scorer(Box::new(Counting { calls }))
            .build();
        assert!(matches!(res, Err(SentimentError::InvalidRules { .. })));
    }
}
