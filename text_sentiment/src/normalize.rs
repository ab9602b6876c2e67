//! Cleaning of the raw text before scoring.

use log::debug;
use regex::Regex;
use std::sync::OnceLock;

use crate::config::NormalizeMode;

fn url_regex() -> &'static Regex {
    static URL_RE: OnceLock<Regex> = OnceLock::new();
    URL_RE.get_or_init(|| {
        Regex::new(r"(?i)https?://\S+|www\.\S+").expect("URL pattern is a valid regex")
    })
}

/// Normalizes the raw text according to the mode.
///
/// The result is empty if and only if there is nothing to analyze. Normalizing
/// an already normalized text returns it unchanged.
pub fn normalize(raw_text: &str, mode: NormalizeMode) -> String {
    let res = match mode {
        NormalizeMode::Trim => raw_text.trim().to_string(),
        NormalizeMode::Clean => clean(raw_text),
    };
    debug!(
        "normalize: mode: {:?} {} chars -> {} chars",
        mode,
        raw_text.chars().count(),
        res.chars().count()
    );
    res
}

fn clean(raw_text: &str) -> String {
    let no_urls = url_regex().replace_all(raw_text, " ");
    let kept: String = no_urls
        .chars()
        .filter(|c| c.is_alphanumeric() || c.is_whitespace())
        .collect();
    kept.split_whitespace().collect::<Vec<&str>>().join(" ")
}
