//! Rule-based valence scoring, tuned for short social-media style text.
//!
//! Each word of the lexicon has a valence in [-4, 4]. The valence of a word is
//! adjusted by the words around it (boosters, negations, a contrastive "but"),
//! by capitalization and by exclamation marks. The sum of the valences is
//! squashed into the compound score in [-1, 1]. The positive, neutral and
//! negative proportions describe how much of the text carries each polarity.

use std::collections::HashMap;

use log::debug;

use crate::config::{Metric, ScoreSet};
use crate::scoring::{negation_key, tokenize, SentimentScorer};

const VALENCES: &[(&str, f64)] = &[
    ("amazing", 2.8),
    ("awesome", 3.1),
    ("beautiful", 2.9),
    ("best", 3.2),
    ("better", 1.9),
    ("brilliant", 2.8),
    ("enjoy", 2.2),
    ("excellent", 2.7),
    ("fantastic", 2.6),
    ("fun", 2.3),
    ("glad", 2.0),
    ("good", 1.9),
    ("great", 3.1),
    ("happy", 2.7),
    ("helpful", 1.7),
    ("love", 3.2),
    ("loved", 2.9),
    ("lovely", 2.8),
    ("nice", 1.8),
    ("perfect", 2.7),
    ("pleased", 1.9),
    ("recommend", 1.5),
    ("thanks", 1.9),
    ("win", 2.8),
    ("wonderful", 2.7),
    ("angry", -2.3),
    ("annoying", -1.7),
    ("awful", -2.0),
    ("bad", -2.5),
    ("boring", -1.3),
    ("broken", -1.9),
    ("cry", -2.1),
    ("disappointed", -1.9),
    ("disappointing", -2.2),
    ("fail", -2.5),
    ("failed", -2.3),
    ("fear", -2.2),
    ("hate", -2.7),
    ("horrible", -2.5),
    ("pain", -2.3),
    ("poor", -2.1),
    ("problem", -1.7),
    ("sad", -2.1),
    ("scared", -1.9),
    ("sucks", -1.5),
    ("terrible", -2.1),
    ("ugly", -2.3),
    ("upset", -1.6),
    ("useless", -1.8),
    ("waste", -1.8),
    ("worst", -3.1),
    ("wrong", -2.1),
];

const BOOST_INCREMENT: f64 = 0.293;
const BOOST_DECREMENT: f64 = -0.293;

const BOOSTERS: &[(&str, f64)] = &[
    ("absolutely", BOOST_INCREMENT),
    ("completely", BOOST_INCREMENT),
    ("extremely", BOOST_INCREMENT),
    ("highly", BOOST_INCREMENT),
    ("incredibly", BOOST_INCREMENT),
    ("really", BOOST_INCREMENT),
    ("so", BOOST_INCREMENT),
    ("totally", BOOST_INCREMENT),
    ("very", BOOST_INCREMENT),
    ("barely", BOOST_DECREMENT),
    ("kinda", BOOST_DECREMENT),
    ("marginally", BOOST_DECREMENT),
    ("slightly", BOOST_DECREMENT),
    ("somewhat", BOOST_DECREMENT),
];

const NEGATIONS: &[&str] = &[
    "not", "no", "never", "nothing", "nobody", "neither", "nor", "cannot", "can't", "dont",
    "don't", "doesn't", "didn't", "isn't", "wasn't", "aren't", "weren't", "won't", "wouldn't",
    "shouldn't", "couldn't", "without",
];

const NEGATION_SCALAR: f64 = -0.74;
const CAPS_INCREMENT: f64 = 0.733;
const EXCLAMATION_INCREMENT: f64 = 0.292;
const MAX_EXCLAMATIONS: usize = 4;
// How many preceding words can modify a sentiment word.
const WINDOW: usize = 3;
// Approximates the maximum expected sum of valences.
const ALPHA: f64 = 15.0;

/// The compound/proportions scorer.
pub struct RuleBasedScorer {
    valences: HashMap<String, f64>,
    boosters: HashMap<String, f64>,
    negations: Vec<String>,
}

/// The raw outcome of the rule-based scorer.
#[derive(PartialEq, Debug, Clone, Copy)]
pub struct Polarities {
    pub positive: f64,
    pub neutral: f64,
    pub negative: f64,
    pub compound: f64,
}

impl Default for RuleBasedScorer {
    fn default() -> Self {
        Self::new()
    }
}

impl RuleBasedScorer {
    pub fn new() -> RuleBasedScorer {
        RuleBasedScorer {
            valences: VALENCES.iter().map(|(w, v)| (w.to_string(), *v)).collect(),
            boosters: BOOSTERS.iter().map(|(w, v)| (w.to_string(), *v)).collect(),
            negations: NEGATIONS.iter().map(|w| negation_key(w)).collect(),
        }
    }

    /// Adds or replaces a word. The valence is clamped to [-4, 4].
    pub fn add_word(&mut self, word: &str, valence: f64) {
        self.valences
            .insert(word.to_lowercase(), valence.clamp(-4.0, 4.0));
    }

    pub fn polarity_scores(&self, text: &str) -> Polarities {
        let tokens = tokenize(text);
        let lowered: Vec<String> = tokens.iter().map(|t| t.to_lowercase()).collect();
        let caps_differ = caps_differential(&tokens);

        let mut valences: Vec<f64> = Vec::with_capacity(tokens.len());
        for (idx, word) in lowered.iter().enumerate() {
            let v = match self.valences.get(word) {
                Some(v) if !self.boosters.contains_key(word) => {
                    self.word_valence(*v, idx, &tokens, &lowered, caps_differ)
                }
                _ => 0.0,
            };
            valences.push(v);
        }

        apply_but_rule(&lowered, &mut valences);

        let exclamations = text.matches('!').count().min(MAX_EXCLAMATIONS);
        let emphasis = exclamations as f64 * EXCLAMATION_INCREMENT;

        let mut sum: f64 = valences.iter().sum();
        if sum > 0.0 {
            sum += emphasis;
        } else if sum < 0.0 {
            sum -= emphasis;
        }
        let compound = squash(sum);

        let mut pos_sum = 0.0;
        let mut neg_sum = 0.0;
        let mut neu_count = 0.0;
        for v in valences.iter() {
            if *v > 0.0 {
                // Words with some sentiment count at least as much as a neutral one.
                pos_sum += v + 1.0;
            } else if *v < 0.0 {
                neg_sum += v - 1.0;
            } else {
                neu_count += 1.0;
            }
        }
        if pos_sum > neg_sum.abs() {
            pos_sum += emphasis;
        } else if pos_sum < neg_sum.abs() {
            neg_sum -= emphasis;
        }

        let total = pos_sum + neg_sum.abs() + neu_count;
        let res = if total > 0.0 {
            Polarities {
                positive: pos_sum / total,
                neutral: neu_count / total,
                negative: neg_sum.abs() / total,
                compound,
            }
        } else {
            Polarities {
                positive: 0.0,
                neutral: 1.0,
                negative: 0.0,
                compound,
            }
        };
        debug!("polarity_scores: {:?} -> {:?}", text, res);
        res
    }

    fn word_valence(
        &self,
        base: f64,
        idx: usize,
        tokens: &[&str],
        lowered: &[String],
        caps_differ: bool,
    ) -> f64 {
        let mut v = base;
        if caps_differ && is_all_caps(tokens[idx]) {
            v += CAPS_INCREMENT * v.signum();
        }
        for dist in 1..=WINDOW.min(idx) {
            let prev = &lowered[idx - dist];
            if let Some(b) = self.boosters.get(prev) {
                let mut scalar = if v < 0.0 { -b } else { *b };
                if caps_differ && is_all_caps(tokens[idx - dist]) {
                    scalar += CAPS_INCREMENT * scalar.signum();
                }
                // Boosters further away count less.
                let decay = match dist {
                    1 => 1.0,
                    2 => 0.95,
                    _ => 0.9,
                };
                v += scalar * decay;
            }
        }
        let negated = (1..=WINDOW.min(idx))
            .any(|dist| self.negations.contains(&negation_key(&lowered[idx - dist])));
        if negated {
            v *= NEGATION_SCALAR;
        }
        v
    }
}

/// True if some words, but not all, are written in capitals.
fn caps_differential(tokens: &[&str]) -> bool {
    let caps = tokens.iter().filter(|t| is_all_caps(t)).count();
    caps > 0 && caps < tokens.len()
}

fn is_all_caps(token: &str) -> bool {
    let letters: Vec<char> = token.chars().filter(|c| c.is_alphabetic()).collect();
    letters.len() > 1 && letters.iter().all(|c| c.is_uppercase())
}

/// The clause after "but" dominates the one before.
fn apply_but_rule(lowered: &[String], valences: &mut [f64]) {
    if let Some(but_idx) = lowered.iter().position(|w| w == "but") {
        for (idx, v) in valences.iter_mut().enumerate() {
            if idx < but_idx {
                *v *= 0.5;
            } else if idx > but_idx {
                *v *= 1.5;
            }
        }
    }
}

fn squash(sum: f64) -> f64 {
    let res = sum / (sum * sum + ALPHA).sqrt();
    res.clamp(-1.0, 1.0)
}

impl SentimentScorer for RuleBasedScorer {
    fn name(&self) -> &str {
        "rule-based"
    }

    fn metrics(&self) -> &[Metric] {
        &[
            Metric::Positive,
            Metric::Neutral,
            Metric::Negative,
            Metric::Compound,
        ]
    }

    fn score(&self, text: &str) -> ScoreSet {
        let p = self.polarity_scores(text);
        ScoreSet::new()
            .with(Metric::Positive, p.positive)
            .with(Metric::Neutral, p.neutral)
            .with(Metric::Negative, p.negative)
            .with(Metric::Compound, p.compound)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn compound(text: &str) -> f64 {
        RuleBasedScorer::new().polarity_scores(text).compound
    }

    fn assert_proportions(p: &Polarities) {
        let total = p.positive + p.neutral + p.negative;
        assert!((total - 1.0).abs() < 1e-9, "{:?}", p);
        for v in [p.positive, p.neutral, p.negative] {
            assert!((0.0..=1.0).contains(&v), "{:?}", p);
        }
        assert!((-1.0..=1.0).contains(&p.compound), "{:?}", p);
    }

    #[test]
    fn noncommittal_text_is_neutral() {
        let p = RuleBasedScorer::new().polarity_scores("okay, fine, whatever");
        assert!(p.compound > -0.05 && p.compound < 0.05);
        assert_eq!(p.neutral, 1.0);
    }

    #[test]
    fn clear_sentiments() {
        assert!(compound("I love this product, it's amazing!") >= 0.05);
        assert!(compound("This is the worst experience ever.") <= -0.05);
    }

    #[test]
    fn negation_flips() {
        assert!(compound("this is good") > 0.0);
        assert!(compound("this is not good") < 0.0);
        assert!(compound("never really good") < 0.0);
        // Typographic and stripped apostrophes.
        assert!(compound("this isn’t good") < 0.0);
        assert!(compound("this isnt good") < 0.0);
        assert_eq!(compound("this isnt good"), compound("this isn't good"));
    }

    #[test]
    fn custom_words() {
        let mut scorer = RuleBasedScorer::new();
        assert_eq!(scorer.polarity_scores("the market is bullish").compound, 0.0);
        scorer.add_word("Bullish", 9.0);
        let p = scorer.polarity_scores("the market is bullish");
        // Clamped to the largest valence.
        assert_eq!(p.compound, squash(4.0));
        assert_proportions(&p);
    }

    #[test]
    fn boosters_caps_and_exclamations_amplify() {
        let plain = compound("the food is good");
        assert!(compound("the food is very good") > plain);
        assert!(compound("the food is GOOD") > plain);
        assert!(compound("the food is good!!") > plain);
        // More than four exclamation marks do not add anything.
        assert_eq!(compound("the food is good!!!!"), compound("the food is good!!!!!!!"));
    }

    #[test]
    fn but_favors_the_second_clause() {
        assert!(compound("the food is good but the service is terrible") < 0.0);
        assert!(compound("the service is terrible but the food is great") > 0.0);
    }

    #[test]
    fn proportions_sum_to_one() {
        let scorer = RuleBasedScorer::new();
        for text in [
            "okay, fine, whatever",
            "I love this product, it's amazing!",
            "good bad ugly",
            "!!!",
            "NOT GOOD at ALL but I LOVE it!!!!!",
            "extremely extremely extremely horrible terrible awful worst",
        ] {
            assert_proportions(&scorer.polarity_scores(text));
        }
    }

    #[test]
    fn squash_is_bounded() {
        assert_eq!(squash(0.0), 0.0);
        assert!(squash(1000.0) <= 1.0);
        assert!(squash(-1000.0) >= -1.0);
    }
}
