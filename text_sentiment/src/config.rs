// ********* Input data structures ***********

use std::fmt::Display;
use std::time::Duration;

use snafu::Snafu;

/// Where the text of an analysis request came from.
#[derive(Eq, PartialEq, Debug, Clone, Copy, Hash)]
pub enum Source {
    /// The text field, edited by hand or left over from a previous capture.
    Typed,
    /// Text extracted from an uploaded document.
    File,
    /// A successful speech transcription.
    Voice,
}

impl Source {
    pub fn name(&self) -> &'static str {
        match self {
            Source::Typed => "typed",
            Source::File => "file",
            Source::Voice => "voice",
        }
    }
}

/// The text selected by the input collector for one user action.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct AnalysisRequest {
    pub raw_text: String,
    pub source: Source,
}

// ******** Scores *********

/// The metrics a scorer may report.
#[derive(Eq, PartialEq, Debug, Clone, Copy, Hash, Ord, PartialOrd)]
pub enum Metric {
    Polarity,
    Subjectivity,
    Compound,
    Positive,
    Neutral,
    Negative,
}

impl Metric {
    pub fn name(&self) -> &'static str {
        match self {
            Metric::Polarity => "polarity",
            Metric::Subjectivity => "subjectivity",
            Metric::Compound => "compound",
            Metric::Positive => "positive",
            Metric::Neutral => "neutral",
            Metric::Negative => "negative",
        }
    }

    /// The declared (inclusive) range of values for this metric.
    pub fn range(&self) -> (f64, f64) {
        match self {
            Metric::Polarity | Metric::Compound => (-1.0, 1.0),
            _ => (0.0, 1.0),
        }
    }

    pub fn in_range(&self, value: f64) -> bool {
        let (lo, hi) = self.range();
        value >= lo && value <= hi
    }
}

impl Display for Metric {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Metric values produced by one or more scorers, in insertion order.
///
/// A metric appears at most once. Values are kept exactly as the scorer
/// reported them, even when they fall outside of the declared range.
#[derive(PartialEq, Debug, Clone, Default)]
pub struct ScoreSet {
    values: Vec<(Metric, f64)>,
}

impl ScoreSet {
    pub fn new() -> ScoreSet {
        ScoreSet { values: Vec::new() }
    }

    /// Sets the value of a metric, replacing a previous value if present.
    pub fn insert(&mut self, metric: Metric, value: f64) {
        if let Some(elt) = self.values.iter_mut().find(|(m, _)| *m == metric) {
            elt.1 = value;
        } else {
            self.values.push((metric, value));
        }
    }

    pub fn with(mut self, metric: Metric, value: f64) -> ScoreSet {
        self.insert(metric, value);
        self
    }

    pub fn get(&self, metric: Metric) -> Option<f64> {
        self.values
            .iter()
            .find(|(m, _)| *m == metric)
            .map(|(_, v)| *v)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Metric, f64)> + '_ {
        self.values.iter().cloned()
    }

    /// Adds all the values of the other set. Values of the other set win.
    pub fn merge(&mut self, other: &ScoreSet) {
        for (m, v) in other.iter() {
            self.insert(m, v);
        }
    }
}

// ******** Output data structures *********

/// The verdict of the classifier.
///
/// The three-way policies only produce `Positive`, `Neutral` and `Negative`.
/// The five-way policy produces the `Very*` and `Slightly*` variants and `Neutral`.
#[derive(Eq, PartialEq, Debug, Clone, Copy, Hash)]
pub enum SentimentLabel {
    VeryPositive,
    Positive,
    SlightlyPositive,
    Neutral,
    SlightlyNegative,
    Negative,
    VeryNegative,
}

impl SentimentLabel {
    pub fn name(&self) -> &'static str {
        match self {
            SentimentLabel::VeryPositive => "Very Positive",
            SentimentLabel::Positive => "Positive",
            SentimentLabel::SlightlyPositive => "Slightly Positive",
            SentimentLabel::Neutral => "Neutral",
            SentimentLabel::SlightlyNegative => "Slightly Negative",
            SentimentLabel::Negative => "Negative",
            SentimentLabel::VeryNegative => "Very Negative",
        }
    }
}

impl Display for SentimentLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[derive(PartialEq, Debug, Clone)]
pub struct AnalysisResult {
    pub source: Source,
    /// The normalized text that was scored.
    pub text: String,
    pub scores: ScoreSet,
    pub label: SentimentLabel,
    /// The value of the metric used by the classification policy.
    pub score: f64,
}

// ********* Errors **********

#[derive(Eq, PartialEq, Debug, Clone, Copy)]
pub enum Severity {
    Warning,
    Error,
}

/// Errors that stop one analysis action.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum SentimentError {
    #[snafu(display("Please enter some text."))]
    EmptyInput {},

    #[snafu(display("Could not extract text from {name}: {source}"))]
    Extraction {
        name: String,
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[snafu(display("The scores do not contain the metric {metric}"))]
    MissingMetric { metric: Metric },

    #[snafu(display("Invalid analysis rules: {message}"))]
    InvalidRules { message: String },
}

impl SentimentError {
    pub fn severity(&self) -> Severity {
        match self {
            SentimentError::EmptyInput {} => Severity::Warning,
            _ => Severity::Error,
        }
    }
}

/// The ways a speech capture can fail.
///
/// None of them stops the analysis action: the collector falls back to the
/// text field.
#[derive(Debug, Snafu, Clone, PartialEq, Eq)]
#[snafu(visibility(pub))]
pub enum CaptureError {
    #[snafu(display("Could not understand audio."))]
    Unintelligible {},

    #[snafu(display("Speech recognition service unavailable: {message}"))]
    ServiceUnavailable { message: String },

    #[snafu(display("No speech detected within {} seconds.", waited.as_secs_f64()))]
    Timeout { waited: Duration },
}

impl CaptureError {
    pub fn severity(&self) -> Severity {
        match self {
            CaptureError::ServiceUnavailable { .. } => Severity::Error,
            _ => Severity::Warning,
        }
    }
}

// ********* Configuration **********

/// Which scorers run on the normalized text.
#[derive(Eq, PartialEq, Debug, Clone, Copy)]
pub enum ScoringMethod {
    /// Polarity and subjectivity from the word lexicon.
    Lexicon,
    /// Positive, neutral, negative proportions and the compound score.
    RuleBased,
    /// Both scorers, merged into one score set.
    Both,
}

impl ScoringMethod {
    pub fn produces(&self, metric: Metric) -> bool {
        match self {
            ScoringMethod::Lexicon => matches!(metric, Metric::Polarity | Metric::Subjectivity),
            ScoringMethod::RuleBased => !matches!(metric, Metric::Polarity | Metric::Subjectivity),
            ScoringMethod::Both => true,
        }
    }
}

/// The threshold rules that map scores to a label.
#[derive(Eq, PartialEq, Debug, Clone, Copy)]
pub enum ClassificationPolicy {
    /// Positive if polarity > 0, negative if polarity < 0.
    PolarityThreeWay,
    /// Positive if compound >= 0.05, negative if compound <= -0.05.
    CompoundThreeWay,
    /// Five labels, split at 0 and +/-0.5 on the polarity.
    PolarityFiveWay,
}

impl ClassificationPolicy {
    /// The metric the policy reads.
    pub fn metric(&self) -> Metric {
        match self {
            ClassificationPolicy::PolarityThreeWay | ClassificationPolicy::PolarityFiveWay => {
                Metric::Polarity
            }
            ClassificationPolicy::CompoundThreeWay => Metric::Compound,
        }
    }
}

#[derive(Eq, PartialEq, Debug, Clone, Copy)]
pub enum NormalizeMode {
    /// Only trims the surrounding whitespace.
    Trim,
    /// Also removes URLs and any character that is not alphanumeric or whitespace.
    Clean,
}

#[derive(Eq, PartialEq, Debug, Clone)]
pub struct AnalysisRules {
    pub scoring_method: ScoringMethod,
    pub classification: ClassificationPolicy,
    pub normalization: NormalizeMode,
}

impl AnalysisRules {
    pub const DEFAULT_RULES: AnalysisRules = AnalysisRules {
        scoring_method: ScoringMethod::Lexicon,
        classification: ClassificationPolicy::PolarityThreeWay,
        normalization: NormalizeMode::Trim,
    };
}

/// Bounds of a speech capture session.
#[derive(Eq, PartialEq, Debug, Clone, Copy)]
pub struct CaptureSettings {
    /// How long to wait for speech to start.
    pub listen_timeout: Duration,
    /// The longest phrase accepted once speech started.
    pub phrase_time_limit: Duration,
}

impl CaptureSettings {
    pub const DEFAULT_SETTINGS: CaptureSettings = CaptureSettings {
        listen_timeout: Duration::from_secs(5),
        phrase_time_limit: Duration::from_secs(10),
    };

    /// The longest a capture may block.
    pub fn budget(&self) -> Duration {
        self.listen_timeout + self.phrase_time_limit
    }
}
