//! Selection of the text to analyze among the document, the voice capture
//! and the text field.
//!
//! The precedence is fixed: a supplied document always wins, then a
//! successful voice capture, then the text field. A failed capture is not an
//! error for the action: it is reported as a notice and the text field is
//! used instead.

use log::{debug, info, warn};

use crate::config::*;

/// The text last captured, typed or extracted during a session.
///
/// This is the value shown in the text field when the user did not edit it.
#[derive(Eq, PartialEq, Debug, Clone, Default)]
pub struct SessionCache {
    text: String,
}

impl SessionCache {
    pub fn new() -> SessionCache {
        SessionCache::default()
    }

    pub fn with_text(text: &str) -> SessionCache {
        SessionCache {
            text: text.to_string(),
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Replaces the cached text.
    pub fn store(&mut self, text: &str) {
        self.text = text.to_string();
    }
}

/// An uploaded document that text can be extracted from.
pub trait DocumentSource {
    /// The name of the document, for messages.
    fn name(&self) -> String;

    /// The full text of the document, pages or lines in document order.
    fn extract_text(&self) -> Result<String, Box<dyn std::error::Error + Send + Sync>>;
}

/// A speech-to-text backend.
pub trait Transcriber {
    /// Listens for one phrase, blocking at most for the budget of the settings.
    fn transcribe(&self, settings: &CaptureSettings) -> Result<String, CaptureError>;
}

/// The candidate sources for one analysis action.
#[derive(Default)]
pub struct InputSelection<'a> {
    pub document: Option<&'a dyn DocumentSource>,
    /// Set when a capture was explicitly triggered.
    pub voice: Option<&'a dyn Transcriber>,
    /// The value of the text field if the user edited it. When `None`, the
    /// field shows the session text.
    pub typed: Option<String>,
}

/// The outcome of a successful collection.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct Collected {
    pub request: AnalysisRequest,
    /// Capture failures that happened on the way, to report to the user.
    pub notices: Vec<CaptureError>,
}

/// Picks the text for one action and updates the session.
///
/// The session is returned in all cases. It is left untouched if the
/// collection fails or if a capture fails.
pub fn collect_input(
    selection: InputSelection,
    settings: &CaptureSettings,
    session: SessionCache,
) -> (SessionCache, Result<Collected, SentimentError>) {
    let mut session = session;

    if let Some(doc) = selection.document {
        let name = doc.name();
        info!("collect_input: extracting text from {:?}", name);
        if selection.voice.is_some() {
            info!("collect_input: a document is provided, skipping voice capture");
        }
        return match doc.extract_text() {
            Ok(text) => {
                debug!(
                    "collect_input: extracted {} chars from {:?}",
                    text.chars().count(),
                    name
                );
                session.store(&text);
                let res = Collected {
                    request: AnalysisRequest {
                        raw_text: text,
                        source: Source::File,
                    },
                    notices: Vec::new(),
                };
                (session, Ok(res))
            }
            Err(source) => {
                warn!("collect_input: extraction failed for {:?}: {}", name, source);
                (session, Err(SentimentError::Extraction { name, source }))
            }
        };
    }

    let mut notices: Vec<CaptureError> = Vec::new();
    if let Some(transcriber) = selection.voice {
        info!(
            "collect_input: listening (timeout {:?}, phrase limit {:?})",
            settings.listen_timeout, settings.phrase_time_limit
        );
        match transcriber.transcribe(settings) {
            Ok(text) if !text.trim().is_empty() => {
                info!("collect_input: transcribed {:?}", text);
                session.store(&text);
                let res = Collected {
                    request: AnalysisRequest {
                        raw_text: text,
                        source: Source::Voice,
                    },
                    notices,
                };
                return (session, Ok(res));
            }
            Ok(_) => {
                warn!("collect_input: empty transcription");
                notices.push(CaptureError::Unintelligible {});
            }
            Err(e) => {
                warn!("collect_input: capture failed: {}", e);
                notices.push(e);
            }
        }
    }

    let text = match selection.typed {
        Some(t) => t,
        None => session.text().to_string(),
    };
    session.store(&text);
    let res = Collected {
        request: AnalysisRequest {
            raw_text: text,
            source: Source::Typed,
        },
        notices,
    };
    (session, Ok(res))
}
