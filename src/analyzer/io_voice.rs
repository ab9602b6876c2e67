//! Console dictation: the phrases are read from the standard input, one line
//! per phrase.
//!
//! A single thread reads the standard input and forwards the lines over a
//! channel, so that the session commands and the captures share the same
//! stream and a capture can give up after its time budget.

use std::cell::Cell;
use std::io::{self, BufRead};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::thread;
use std::time::{Duration, Instant};

use crate::analyzer::*;

pub struct LineFeed {
    receiver: Receiver<io::Result<String>>,
    // Phrases owed to captures that timed out. They are dropped when they arrive.
    late_phrases: Cell<usize>,
}

impl LineFeed {
    pub fn stdin() -> LineFeed {
        let (sender, receiver) = mpsc::channel();
        thread::spawn(move || {
            let stdin = io::stdin();
            for line in stdin.lock().lines() {
                let failed = line.is_err();
                if sender.send(line).is_err() || failed {
                    break;
                }
            }
            debug!("LineFeed: standard input closed");
        });
        LineFeed::from_receiver(receiver)
    }

    pub fn from_receiver(receiver: Receiver<io::Result<String>>) -> LineFeed {
        LineFeed {
            receiver,
            late_phrases: Cell::new(0),
        }
    }

    /// Blocks until the next line. `None` once the input is closed.
    pub fn next_line(&self) -> Option<io::Result<String>> {
        loop {
            let line = self.receiver.recv().ok()?;
            if !self.skip_late_phrase(&line) {
                return Some(line);
            }
        }
    }

    pub fn next_line_within(
        &self,
        timeout: Duration,
    ) -> Result<io::Result<String>, RecvTimeoutError> {
        let deadline = Instant::now() + timeout;
        loop {
            let remaining = deadline.saturating_duration_since(Instant::now());
            let line = self.receiver.recv_timeout(remaining)?;
            if !self.skip_late_phrase(&line) {
                return Ok(line);
            }
        }
    }

    /// The next line answers a capture that already gave up.
    pub fn expect_late_phrase(&self) {
        self.late_phrases.set(self.late_phrases.get() + 1);
    }

    fn skip_late_phrase(&self, line: &io::Result<String>) -> bool {
        let pending = self.late_phrases.get();
        if pending == 0 {
            return false;
        }
        self.late_phrases.set(pending - 1);
        info!("LineFeed: discarding a late phrase: {:?}", line);
        true
    }
}

pub struct ConsoleTranscriber<'a> {
    feed: &'a LineFeed,
}

impl<'a> ConsoleTranscriber<'a> {
    pub fn new(feed: &'a LineFeed) -> ConsoleTranscriber<'a> {
        ConsoleTranscriber { feed }
    }
}

impl Transcriber for ConsoleTranscriber<'_> {
    fn transcribe(&self, settings: &CaptureSettings) -> Result<String, CaptureError> {
        let budget = settings.budget();
        println!("🎤 Listening... (type the phrase, then press Enter)");
        match self.feed.next_line_within(budget) {
            Ok(Ok(line)) if line.trim().is_empty() => Err(CaptureError::Unintelligible {}),
            Ok(Ok(line)) => Ok(line.trim().to_string()),
            Ok(Err(e)) => Err(CaptureError::ServiceUnavailable {
                message: e.to_string(),
            }),
            Err(RecvTimeoutError::Timeout) => {
                self.feed.expect_late_phrase();
                Err(CaptureError::Timeout { waited: budget })
            }
            Err(RecvTimeoutError::Disconnected) => Err(CaptureError::ServiceUnavailable {
                message: "the input stream is closed".to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn short_settings() -> CaptureSettings {
        CaptureSettings {
            listen_timeout: Duration::from_millis(20),
            phrase_time_limit: Duration::from_millis(30),
        }
    }

    #[test]
    fn next_line_is_the_phrase() {
        let (sender, receiver) = mpsc::channel();
        let feed = LineFeed::from_receiver(receiver);
        sender.send(Ok("  I really like it  ".to_string())).unwrap();
        sender.send(Ok("".to_string())).unwrap();

        let t = ConsoleTranscriber::new(&feed);
        assert_eq!(t.transcribe(&short_settings()).unwrap(), "I really like it");
        assert_eq!(
            t.transcribe(&short_settings()),
            Err(CaptureError::Unintelligible {})
        );
    }

    #[test]
    fn silence_times_out() {
        let (sender, receiver) = mpsc::channel();
        let feed = LineFeed::from_receiver(receiver);
        let t = ConsoleTranscriber::new(&feed);
        assert_eq!(
            t.transcribe(&short_settings()),
            Err(CaptureError::Timeout {
                waited: Duration::from_millis(50)
            })
        );

        // The phrase that arrives after the timeout is dropped.
        sender.send(Ok("too late".to_string())).unwrap();
        sender.send(Ok(":quit".to_string())).unwrap();
        assert_eq!(feed.next_line().unwrap().unwrap(), ":quit");
    }

    #[test]
    fn closed_input_is_unavailable() {
        let (sender, receiver) = mpsc::channel::<io::Result<String>>();
        drop(sender);
        let feed = LineFeed::from_receiver(receiver);
        let t = ConsoleTranscriber::new(&feed);
        let err = t.transcribe(&short_settings()).unwrap_err();
        assert!(matches!(err, CaptureError::ServiceUnavailable { .. }));
        assert_eq!(err.severity(), Severity::Error);
        assert!(feed.next_line().is_none());
    }

    #[test]
    fn read_errors_are_unavailable() {
        let (sender, receiver) = mpsc::channel();
        sender
            .send(Err(io::Error::new(io::ErrorKind::InvalidData, "not utf-8")))
            .unwrap();
        let feed = LineFeed::from_receiver(receiver);
        let t = ConsoleTranscriber::new(&feed);
        assert!(matches!(
            t.transcribe(&short_settings()),
            Err(CaptureError::ServiceUnavailable { .. })
        ));
    }
}
