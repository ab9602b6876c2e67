use log::{debug, info, warn};

use snafu::{prelude::*, Snafu};

use std::fs;
use std::io::IsTerminal;

use serde_json::json;
use serde_json::Map as JSMap;
use serde_json::Value as JSValue;
use text_diff::print_diff;

use text_sentiment::builder::Builder;
use text_sentiment::collector::*;
use text_sentiment::present::*;
use text_sentiment::*;

use crate::analyzer::config_reader::*;
use crate::analyzer::io_common::UploadedDocument;
use crate::analyzer::io_record::RecordWriter;
use crate::analyzer::io_voice::{ConsoleTranscriber, LineFeed};
use crate::args::Args;

pub mod config_reader;
pub mod io_common;
pub mod io_pdf;
pub mod io_record;
pub mod io_text;
pub mod io_voice;
pub mod session_loop;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum AppError {
    #[snafu(display("Error opening file {path}"))]
    OpeningFile {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Error parsing the JSON file {path}"))]
    ParsingJson {
        source: serde_json::Error,
        path: String,
    },
    #[snafu(display("Error serializing the summary"))]
    SerializingJson { source: serde_json::Error },
    #[snafu(display("Error loading the PDF document {name}"))]
    LoadingPdf { source: lopdf::Error, name: String },
    #[snafu(display("Error extracting the text of page {page} of {name}"))]
    ExtractingPdfPage {
        source: lopdf::Error,
        name: String,
        page: u32,
    },
    #[snafu(display("The document {name} is not valid UTF-8 text"))]
    DecodingText {
        source: std::string::FromUtf8Error,
        name: String,
    },
    #[snafu(display("Unsupported document {name} (type {kind:?}, expected txt or pdf)"))]
    UnsupportedDocument { name: String, kind: String },
    #[snafu(display("Error writing a record to {path}"))]
    WritingRecord { source: csv::Error, path: String },
    #[snafu(display("Error writing to {path}"))]
    WritingFile {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("{source}"))]
    Analysis { source: SentimentError },

    #[snafu(whatever, display("{message}"))]
    Whatever {
        message: String,
        #[snafu(source(from(Box<dyn std::error::Error + Send + Sync>, Some)))]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

pub type AppResult<T> = Result<T, AppError>;

fn notice_line(severity: Severity, message: &str) -> String {
    match severity {
        Severity::Warning => format!("⚠ {}", message),
        Severity::Error => format!("❌ {}", message),
    }
}

/// The headline, the scores and the chart, as printed after each analysis.
pub fn render_presentation(p: &Presentation, color: bool) -> String {
    let mut lines: Vec<String> = Vec::new();
    if color {
        lines.push(format!("\x1b[{}m{}\x1b[0m", p.color.ansi_code(), p.headline));
    } else {
        lines.push(p.headline.clone());
    }
    for score in p.scores.iter() {
        lines.push(format!("{} score: {}", score.metric, score.text));
    }
    lines.push(String::new());
    lines.extend(p.chart.iter().cloned());
    lines.join("\n")
}

/// The state kept between the actions of a run.
pub struct Session<'a> {
    analyzer: &'a Analyzer,
    capture: CaptureSettings,
    cache: SessionCache,
    record: Option<RecordWriter>,
    results: Vec<AnalysisResult>,
    failures: usize,
    color: bool,
}

impl<'a> Session<'a> {
    pub fn new(
        analyzer: &'a Analyzer,
        capture: CaptureSettings,
        record: Option<RecordWriter>,
    ) -> Session<'a> {
        Session {
            analyzer,
            capture,
            cache: SessionCache::new(),
            record,
            results: Vec::new(),
            failures: 0,
            color: std::io::stdout().is_terminal(),
        }
    }

    /// The content of the text field.
    #[cfg(test)]
    pub fn text(&self) -> &str {
        self.cache.text()
    }

    /// Replaces the content of the text field without analyzing it.
    pub fn fill_text(&mut self, text: &str) {
        self.cache.store(text);
    }

    pub fn results(&self) -> &[AnalysisResult] {
        &self.results
    }

    /// The number of actions that ended with an error.
    pub fn failures(&self) -> usize {
        self.failures
    }

    /// Collects the input, then analyzes and reports it.
    ///
    /// Capture and analysis failures are reported and counted, they do not stop
    /// the session. Only failing to write the record does.
    pub fn action(&mut self, selection: InputSelection) -> AppResult<Option<AnalysisResult>> {
        let (cache, collected) =
            collect_input(selection, &self.capture, std::mem::take(&mut self.cache));
        self.cache = cache;

        let collected = match collected {
            Ok(c) => c,
            Err(e) => {
                self.report_failure(&e);
                return Ok(None);
            }
        };
        for notice in collected.notices.iter() {
            println!("{}", notice_line(notice.severity(), &notice.to_string()));
        }
        if collected.request.source == Source::Voice {
            println!("✅ You said: {}", collected.request.raw_text);
        }

        let result = match self.analyzer.analyze(&collected.request) {
            Ok(r) => r,
            Err(e) => {
                self.report_failure(&e);
                return Ok(None);
            }
        };
        println!("{}", render_presentation(&present(&result), self.color));

        if let Some(record) = self.record.as_mut() {
            record.append(&result)?;
        }
        self.results.push(result.clone());
        Ok(Some(result))
    }

    fn report_failure(&mut self, e: &SentimentError) {
        println!("{}", notice_line(e.severity(), &e.to_string()));
        if e.severity() == Severity::Error {
            warn!("action failed: {}", e);
            self.failures += 1;
        }
    }
}

fn scores_to_json(scores: &ScoreSet) -> JSMap<String, JSValue> {
    let mut m: JSMap<String, JSValue> = JSMap::new();
    for (metric, value) in scores.iter() {
        m.insert(metric.name().to_string(), json!(format!("{:.4}", value)));
    }
    m
}

pub fn build_summary_js(rules: &AnalysisRules, results: &[AnalysisResult]) -> JSValue {
    let config = json!({
        "scoringMethod": scoring_method_name(rules.scoring_method),
        "classificationPolicy": classification_policy_name(rules.classification),
        "stripNoise": rules.normalization == NormalizeMode::Clean,
    });
    let js_results: Vec<JSValue> = results
        .iter()
        .map(|r| {
            json!({
                "source": r.source.name(),
                "text": r.text,
                "label": r.label.name(),
                "score": format!("{:.4}", r.score),
                "scores": scores_to_json(&r.scores),
            })
        })
        .collect();
    json!({
        "config": config,
        "results": js_results })
}

/// Compares the summary with a reference summary stored in a file.
fn check_reference(reference_path: &str, pretty_js_summary: &str) -> AppResult<()> {
    let summary_ref = read_summary(reference_path)?;
    debug!("check_reference: {:?}", summary_ref);
    let pretty_js_summary_ref =
        serde_json::to_string_pretty(&summary_ref).context(SerializingJsonSnafu {})?;
    if pretty_js_summary_ref != pretty_js_summary {
        warn!("Found differences with the reference summary");
        print_diff(pretty_js_summary_ref.as_str(), pretty_js_summary, "\n");
        whatever!("Difference detected between the summary and the reference summary")
    }
    Ok(())
}

/// Runs one action, or a session that starts with the document, the capture
/// or the text given on the command line.
fn run_actions(args: &Args, session: &mut Session, feed: Option<&LineFeed>) -> AppResult<()> {
    let document = args
        .input
        .as_deref()
        .map(|path| UploadedDocument::new(path, args.input_type.as_deref()));
    let transcriber = if args.voice {
        feed.map(ConsoleTranscriber::new)
    } else {
        None
    };
    let mut selection = InputSelection {
        document: document.as_ref().map(|d| d as &dyn DocumentSource),
        voice: transcriber.as_ref().map(|t| t as &dyn Transcriber),
        typed: None,
    };

    match (args.interactive, feed) {
        (true, Some(feed)) => {
            if let Some(text) = args.text.as_deref() {
                session.fill_text(text);
            }
            if selection.document.is_some() || selection.voice.is_some() {
                session.action(selection)?;
            }
            session_loop::run_session(session, feed)
        }
        _ => {
            selection.typed = args.text.clone();
            session.action(selection)?;
            Ok(())
        }
    }
}

pub fn run_analysis(args: &Args) -> AppResult<()> {
    let config = match args.config.as_deref() {
        Some(path) => Some(read_config(path)?),
        None => None,
    };
    let settings = resolve_settings(config.as_ref(), args)?;

    let analyzer = Builder::new(&settings.rules)
        .and_then(|b| b.build())
        .context(AnalysisSnafu {})?;
    let record = match settings.record_path.as_deref() {
        Some(path) => Some(RecordWriter::open(path)?),
        None => None,
    };
    let mut session = Session::new(&analyzer, settings.capture, record);

    // The standard input is only read when a capture or a session may need it.
    let feed = if args.voice || args.interactive {
        Some(LineFeed::stdin())
    } else {
        None
    };

    run_actions(args, &mut session, feed.as_ref())?;
    info!(
        "run_analysis: {} results, {} failures",
        session.results().len(),
        session.failures()
    );

    let result_js = build_summary_js(&settings.rules, session.results());
    let pretty_js_summary =
        serde_json::to_string_pretty(&result_js).context(SerializingJsonSnafu {})?;
    match settings.summary_path.as_deref() {
        Some("stdout") => println!("summary:{}", pretty_js_summary),
        Some(path) if !path.is_empty() => {
            fs::write(path, &pretty_js_summary).context(WritingFileSnafu { path })?;
            info!("run_analysis: summary written to {:?}", path);
        }
        _ => debug!("run_analysis: summary: {}", pretty_js_summary),
    }

    // The reference summary, if provided for comparison
    if let Some(reference_path) = args.reference.as_deref() {
        check_reference(reference_path, &pretty_js_summary)?;
    }

    if session.failures() > 0 {
        whatever!("{} analysis action(s) failed", session.failures())
    }
    Ok(())
}
