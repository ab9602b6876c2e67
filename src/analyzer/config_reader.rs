use crate::analyzer::*;
use crate::args::Args;

use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Eq, PartialEq, Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnalysisSettings {
    #[serde(rename = "scoringMethod")]
    pub scoring_method: Option<String>,
    #[serde(rename = "classificationPolicy")]
    pub classification_policy: Option<String>,
    #[serde(rename = "stripNoise")]
    pub strip_noise: Option<bool>,
}

#[derive(Eq, PartialEq, Debug, Clone, Default, Serialize, Deserialize)]
pub struct CaptureConfig {
    #[serde(rename = "listenTimeoutSeconds")]
    pub listen_timeout_seconds: Option<u64>,
    #[serde(rename = "phraseTimeLimitSeconds")]
    pub phrase_time_limit_seconds: Option<u64>,
}

#[derive(Eq, PartialEq, Debug, Clone, Default, Serialize, Deserialize)]
pub struct OutputSettings {
    #[serde(rename = "recordPath")]
    pub record_path: Option<String>,
    #[serde(rename = "summaryPath")]
    pub summary_path: Option<String>,
}

#[derive(Eq, PartialEq, Debug, Clone, Default, Serialize, Deserialize)]
pub struct SentimeterConfig {
    #[serde(rename = "analysisSettings", default)]
    pub analysis_settings: AnalysisSettings,
    #[serde(rename = "captureSettings", default)]
    pub capture_settings: CaptureConfig,
    #[serde(rename = "outputSettings", default)]
    pub output_settings: OutputSettings,
}

/// The settings of a run, once the configuration file and the command line are merged.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct Settings {
    pub rules: AnalysisRules,
    pub capture: CaptureSettings,
    pub record_path: Option<String>,
    pub summary_path: Option<String>,
}

pub fn read_config(path: &str) -> AppResult<SentimeterConfig> {
    let contents = fs::read_to_string(path).context(OpeningFileSnafu { path })?;
    let config: SentimeterConfig =
        serde_json::from_str(&contents).context(ParsingJsonSnafu { path })?;
    debug!("read_config: {:?}", config);
    Ok(config)
}

/// Merges the command line over the configuration file, then the defaults.
pub fn resolve_settings(config: Option<&SentimeterConfig>, args: &Args) -> AppResult<Settings> {
    let config = config.cloned().unwrap_or_default();
    let analysis = AnalysisSettings {
        scoring_method: args
            .scoring
            .clone()
            .or(config.analysis_settings.scoring_method),
        classification_policy: args
            .policy
            .clone()
            .or(config.analysis_settings.classification_policy),
        strip_noise: if args.strip_noise {
            Some(true)
        } else {
            config.analysis_settings.strip_noise
        },
    };
    let rules = validate_rules(&analysis)?;

    let defaults = CaptureSettings::DEFAULT_SETTINGS;
    let capture = CaptureSettings {
        listen_timeout: args
            .listen_timeout
            .or(config.capture_settings.listen_timeout_seconds)
            .map(Duration::from_secs)
            .unwrap_or(defaults.listen_timeout),
        phrase_time_limit: args
            .phrase_limit
            .or(config.capture_settings.phrase_time_limit_seconds)
            .map(Duration::from_secs)
            .unwrap_or(defaults.phrase_time_limit),
    };
    if capture.budget().is_zero() {
        whatever!("The listen timeout and the phrase time limit cannot both be zero")
    }

    let res = Settings {
        rules,
        capture,
        record_path: args.out.clone().or(config.output_settings.record_path),
        summary_path: args
            .summary
            .clone()
            .or(config.output_settings.summary_path),
    };
    info!("resolve_settings: {:?}", res);
    Ok(res)
}

pub fn validate_rules(settings: &AnalysisSettings) -> AppResult<AnalysisRules> {
    let defaults = AnalysisRules::DEFAULT_RULES;
    let scoring_method = match settings.scoring_method.as_deref() {
        None => defaults.scoring_method,
        Some("lexicon") => ScoringMethod::Lexicon,
        Some("ruleBased") => ScoringMethod::RuleBased,
        Some("both") => ScoringMethod::Both,
        Some(x) => {
            whatever!("Unknown scoring method {:?} (expected lexicon, ruleBased or both)", x)
        }
    };
    let classification = match settings.classification_policy.as_deref() {
        // The compound score is the only metric of the rule-based scorer.
        None if scoring_method == ScoringMethod::RuleBased => {
            ClassificationPolicy::CompoundThreeWay
        }
        None => defaults.classification,
        Some("polarityThreeWay") => ClassificationPolicy::PolarityThreeWay,
        Some("compoundThreeWay") => ClassificationPolicy::CompoundThreeWay,
        Some("polarityFiveWay") => ClassificationPolicy::PolarityFiveWay,
        Some(x) => {
            whatever!(
                "Unknown classification policy {:?} (expected polarityThreeWay, compoundThreeWay or polarityFiveWay)",
                x
            )
        }
    };
    let normalization = match settings.strip_noise {
        Some(true) => NormalizeMode::Clean,
        _ => defaults.normalization,
    };
    Ok(AnalysisRules {
        scoring_method,
        classification,
        normalization,
    })
}

pub fn scoring_method_name(method: ScoringMethod) -> &'static str {
    match method {
        ScoringMethod::Lexicon => "lexicon",
        ScoringMethod::RuleBased => "ruleBased",
        ScoringMethod::Both => "both",
    }
}

pub fn classification_policy_name(policy: ClassificationPolicy) -> &'static str {
    match policy {
        ClassificationPolicy::PolarityThreeWay => "polarityThreeWay",
        ClassificationPolicy::CompoundThreeWay => "compoundThreeWay",
        ClassificationPolicy::PolarityFiveWay => "polarityFiveWay",
    }
}

/// Reads a summary previously written in JSON format.
pub fn read_summary(path: &str) -> AppResult<JSValue> {
    let contents = fs::read_to_string(path).context(OpeningFileSnafu { path })?;
    let js: JSValue = serde_json::from_str(&contents).context(ParsingJsonSnafu { path })?;
    Ok(js)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    fn args(extra: &[&str]) -> Args {
        let mut v = vec!["sentimeter"];
        v.extend_from_slice(extra);
        Args::parse_from(v)
    }

    #[test]
    fn defaults() {
        let s = resolve_settings(None, &args(&[])).unwrap();
        assert_eq!(s.rules, AnalysisRules::DEFAULT_RULES);
        assert_eq!(s.capture, CaptureSettings::DEFAULT_SETTINGS);
        assert_eq!(s.record_path, None);
    }

    #[test]
    fn parses_the_configuration_file() {
        let js = r#"{
            "analysisSettings": {
                "scoringMethod": "both",
                "classificationPolicy": "polarityFiveWay",
                "stripNoise": true
            },
            "captureSettings": { "listenTimeoutSeconds": 3 },
            "outputSettings": { "recordPath": "results.csv" }
        }"#;
        let config: SentimeterConfig = serde_json::from_str(js).unwrap();
        let s = resolve_settings(Some(&config), &args(&[])).unwrap();
        assert_eq!(
            s.rules,
            AnalysisRules {
                scoring_method: ScoringMethod::Both,
                classification: ClassificationPolicy::PolarityFiveWay,
                normalization: NormalizeMode::Clean,
            }
        );
        assert_eq!(s.capture.listen_timeout, Duration::from_secs(3));
        assert_eq!(
            s.capture.phrase_time_limit,
            CaptureSettings::DEFAULT_SETTINGS.phrase_time_limit
        );
        assert_eq!(s.record_path, Some("results.csv".to_string()));
    }

    #[test]
    fn command_line_overrides_the_file() {
        let config: SentimeterConfig = serde_json::from_str(
            r#"{ "analysisSettings": { "scoringMethod": "lexicon" },
                 "outputSettings": { "recordPath": "a.csv" } }"#,
        )
        .unwrap();
        let s = resolve_settings(
            Some(&config),
            &args(&["--scoring", "ruleBased", "--out", "b.csv", "--phrase-limit", "2"]),
        )
        .unwrap();
        assert_eq!(s.rules.scoring_method, ScoringMethod::RuleBased);
        // Follows the scoring method when not given.
        assert_eq!(s.rules.classification, ClassificationPolicy::CompoundThreeWay);
        assert_eq!(s.record_path, Some("b.csv".to_string()));
        assert_eq!(s.capture.phrase_time_limit, Duration::from_secs(2));
    }

    #[test]
    fn empty_file_is_valid() {
        let config: SentimeterConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, SentimeterConfig::default());
    }

    #[test]
    fn unknown_options_are_rejected() {
        assert!(validate_rules(&AnalysisSettings {
            scoring_method: Some("neural".to_string()),
            ..Default::default()
        })
        .is_err());
        assert!(validate_rules(&AnalysisSettings {
            classification_policy: Some("sevenWay".to_string()),
            ..Default::default()
        })
        .is_err());
        assert!(resolve_settings(
            None,
            &args(&["--listen-timeout", "0", "--phrase-limit", "0"])
        )
        .is_err());
    }
}
