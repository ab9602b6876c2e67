//! Polarity and subjectivity from a word lexicon.
//!
//! Every sentiment word carries a polarity in [-1, 1] and a subjectivity in
//! [0, 1]. An intensifier ("very", "extremely") multiplies the scores of the
//! next sentiment word, a negation ("not", "never") flips its polarity and
//! halves it. The scores of the text are the averages over the sentiment words
//! found; a text without any of them is neutral and objective.

use std::collections::HashMap;

use log::debug;

use crate::config::{Metric, ScoreSet};
use crate::scoring::{negation_key, tokenize, SentimentScorer};

// (word, polarity, subjectivity)
const WORDS: &[(&str, f64, f64)] = &[
    ("amazing", 0.6, 0.9),
    ("awesome", 1.0, 1.0),
    ("beautiful", 0.85, 1.0),
    ("best", 1.0, 0.3),
    ("better", 0.5, 0.5),
    ("brilliant", 0.9, 1.0),
    ("delightful", 1.0, 1.0),
    ("easy", 0.43, 0.83),
    ("enjoy", 0.4, 0.5),
    ("excellent", 1.0, 1.0),
    ("fantastic", 0.4, 0.9),
    ("favorite", 0.5, 1.0),
    ("fun", 0.3, 0.2),
    ("glad", 0.5, 1.0),
    ("good", 0.7, 0.6),
    ("great", 0.8, 0.75),
    ("happy", 0.8, 1.0),
    ("helpful", 0.5, 0.5),
    ("impressive", 1.0, 1.0),
    ("incredible", 0.9, 0.9),
    ("interesting", 0.5, 0.5),
    ("love", 0.5, 0.6),
    ("loved", 0.7, 0.8),
    ("lovely", 0.5, 0.75),
    ("nice", 0.6, 1.0),
    ("perfect", 1.0, 1.0),
    ("pleasant", 0.73, 0.97),
    ("pleased", 0.5, 1.0),
    ("positive", 0.23, 0.55),
    ("recommend", 0.4, 0.4),
    ("superb", 1.0, 1.0),
    ("useful", 0.3, 0.0),
    ("wonderful", 1.0, 1.0),
    ("angry", -0.5, 1.0),
    ("annoying", -0.8, 0.9),
    ("awful", -1.0, 1.0),
    ("bad", -0.7, 0.67),
    ("boring", -1.0, 1.0),
    ("broken", -0.4, 0.4),
    ("disappointed", -0.75, 0.75),
    ("disappointing", -0.6, 0.7),
    ("disgusting", -1.0, 1.0),
    ("dull", -0.31, 0.56),
    ("hate", -0.8, 0.9),
    ("horrible", -1.0, 1.0),
    ("mediocre", -0.5, 0.7),
    ("negative", -0.3, 0.4),
    ("poor", -0.4, 0.6),
    ("sad", -0.5, 1.0),
    ("slow", -0.3, 0.39),
    ("terrible", -1.0, 1.0),
    ("ugly", -0.7, 1.0),
    ("unhappy", -0.6, 0.9),
    ("upset", -0.5, 0.7),
    ("useless", -0.5, 0.0),
    ("worse", -0.4, 0.6),
    ("worst", -1.0, 1.0),
    ("wrong", -0.5, 0.9),
];

// (word, multiplier)
const INTENSIFIERS: &[(&str, f64)] = &[
    ("absolutely", 1.5),
    ("extremely", 1.5),
    ("highly", 1.3),
    ("incredibly", 1.4),
    ("quite", 1.1),
    ("really", 1.3),
    ("so", 1.3),
    ("too", 1.3),
    ("totally", 1.3),
    ("very", 1.3),
    ("fairly", 0.8),
    ("pretty", 0.9),
    ("slightly", 0.5),
    ("somewhat", 0.7),
];

const NEGATIONS: &[&str] = &[
    "not", "no", "never", "neither", "nor", "cannot", "can't", "dont", "don't", "doesn't",
    "didn't", "isn't", "wasn't", "aren't", "weren't", "won't", "wouldn't", "shouldn't",
    "couldn't", "hardly",
];

const NEGATION_FACTOR: f64 = -0.5;

#[derive(PartialEq, Debug, Clone, Copy)]
struct Entry {
    polarity: f64,
    subjectivity: f64,
}

/// The polarity/subjectivity scorer.
pub struct LexiconScorer {
    words: HashMap<String, Entry>,
    intensifiers: HashMap<String, f64>,
    negations: Vec<String>,
}

impl Default for LexiconScorer {
    fn default() -> Self {
        Self::new()
    }
}

impl LexiconScorer {
    /// A scorer with the built-in English lexicon.
    pub fn new() -> LexiconScorer {
        LexiconScorer {
            words: WORDS
                .iter()
                .map(|(w, p, s)| {
                    (
                        w.to_string(),
                        Entry {
                            polarity: *p,
                            subjectivity: *s,
                        },
                    )
                })
                .collect(),
            intensifiers: INTENSIFIERS
                .iter()
                .map(|(w, m)| (w.to_string(), *m))
                .collect(),
            negations: NEGATIONS.iter().map(|w| negation_key(w)).collect(),
        }
    }

    /// Adds or replaces a sentiment word. The values are clamped to their ranges.
    pub fn add_word(&mut self, word: &str, polarity: f64, subjectivity: f64) {
        self.words.insert(
            word.to_lowercase(),
            Entry {
                polarity: polarity.clamp(-1.0, 1.0),
                subjectivity: subjectivity.clamp(0.0, 1.0),
            },
        );
    }

    /// Returns (polarity, subjectivity) for the text.
    pub fn polarity_subjectivity(&self, text: &str) -> (f64, f64) {
        let mut matched: Vec<(f64, f64)> = Vec::new();
        let mut negated = false;
        let mut intensity: f64 = 1.0;

        for token in tokenize(text) {
            let word = token.to_lowercase();
            if self.negations.contains(&negation_key(&word)) {
                negated = true;
                continue;
            }
            if let Some(mult) = self.intensifiers.get(&word) {
                intensity *= mult;
                continue;
            }
            if let Some(entry) = self.words.get(&word) {
                let mut polarity = entry.polarity * intensity;
                if negated {
                    polarity *= NEGATION_FACTOR;
                }
                let subjectivity = entry.subjectivity * intensity;
                debug!(
                    "polarity_subjectivity: {:?} -> ({:.3}, {:.3})",
                    word, polarity, subjectivity
                );
                matched.push((polarity.clamp(-1.0, 1.0), subjectivity.clamp(0.0, 1.0)));
            }
            // Modifiers only reach the next word.
            negated = false;
            intensity = 1.0;
        }

        if matched.is_empty() {
            return (0.0, 0.0);
        }
        let n = matched.len() as f64;
        let polarity: f64 = matched.iter().map(|(p, _)| p).sum::<f64>() / n;
        let subjectivity: f64 = matched.iter().map(|(_, s)| s).sum::<f64>() / n;
        (polarity.clamp(-1.0, 1.0), subjectivity.clamp(0.0, 1.0))
    }
}

impl SentimentScorer for LexiconScorer {
    fn name(&self) -> &str {
        "lexicon"
    }

    fn metrics(&self) -> &[Metric] {
        &[Metric::Polarity, Metric::Subjectivity]
    }

    fn score(&self, text: &str) -> ScoreSet {
        let (polarity, subjectivity) = self.polarity_subjectivity(text);
        ScoreSet::new()
            .with(Metric::Polarity, polarity)
            .with(Metric::Subjectivity, subjectivity)
    }
}
