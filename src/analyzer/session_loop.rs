// The interactive session: one command per line of the standard input.

use std::io::Write;

use crate::analyzer::*;

const HELP: &str = "Type some text to analyze it, or one of the commands:
  :voice         listen for one phrase and analyze it
  :file <path>   analyze a .txt or .pdf document
  :analyze       analyze the content of the text field again
  :help          show this message
  :quit          end the session";

#[derive(Eq, PartialEq, Debug, Clone)]
pub enum Command {
    /// A line typed in the text field.
    Text(String),
    Voice,
    File(String),
    Analyze,
    Help,
    Quit,
}

pub fn parse_command(line: &str) -> AppResult<Command> {
    let trimmed = line.trim();
    if !trimmed.starts_with(':') {
        return Ok(Command::Text(line.to_string()));
    }
    let (name, rest) = match trimmed.split_once(char::is_whitespace) {
        Some((name, rest)) => (name, rest.trim()),
        None => (trimmed, ""),
    };
    match (name, rest) {
        (":voice", "") => Ok(Command::Voice),
        (":analyze", "") => Ok(Command::Analyze),
        (":help", "") => Ok(Command::Help),
        (":quit", "") | (":q", "") => Ok(Command::Quit),
        (":file", "") => whatever!("Missing path: expected :file <path>"),
        (":file", path) => Ok(Command::File(path.to_string())),
        (x, _) => whatever!("Unknown command {:?} (type :help for the list)", x),
    }
}

fn prompt() -> AppResult<()> {
    print!("> ");
    std::io::stdout()
        .flush()
        .context(WritingFileSnafu { path: "stdout" })
}

/// Runs the commands until `:quit` or the end of the input.
pub fn run_session(session: &mut Session, feed: &LineFeed) -> AppResult<()> {
    println!("{}", HELP);
    let transcriber = ConsoleTranscriber::new(feed);
    loop {
        prompt()?;
        let line = match feed.next_line() {
            Some(Ok(line)) => line,
            Some(Err(e)) => {
                warn!("run_session: failed to read the input: {}", e);
                break;
            }
            None => break,
        };
        let command = match parse_command(&line) {
            Ok(c) => c,
            Err(e) => {
                println!("⚠ {}", e);
                continue;
            }
        };
        debug!("run_session: {:?}", command);
        match command {
            Command::Quit => break,
            Command::Help => println!("{}", HELP),
            Command::Text(text) => {
                session.action(InputSelection {
                    typed: Some(text),
                    ..Default::default()
                })?;
            }
            Command::Analyze => {
                session.action(InputSelection::default())?;
            }
            Command::Voice => {
                session.action(InputSelection {
                    voice: Some(&transcriber),
                    ..Default::default()
                })?;
            }
            Command::File(path) => {
                // The type always comes from the extension here.
                let doc = UploadedDocument::new(&path, None);
                session.action(InputSelection {
                    document: Some(&doc),
                    ..Default::default()
                })?;
            }
        }
    }
    info!("run_session: session ended");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::mpsc;
    use std::thread;
    use std::time::Duration;
    use text_sentiment::builder::Builder;

    fn default_analyzer() -> Analyzer {
        Builder::new(&AnalysisRules::DEFAULT_RULES)
            .unwrap()
            .build()
            .unwrap()
    }

    #[test]
    fn commands() {
        assert_eq!(parse_command(":voice").unwrap(), Command::Voice);
        assert_eq!(parse_command("  :analyze ").unwrap(), Command::Analyze);
        assert_eq!(parse_command(":q").unwrap(), Command::Quit);
        assert_eq!(
            parse_command(":file  docs/my review.pdf ").unwrap(),
            Command::File("docs/my review.pdf".to_string())
        );
        assert_eq!(
            parse_command("not a command: really").unwrap(),
            Command::Text("not a command: really".to_string())
        );
        assert!(parse_command(":file").is_err());
        assert!(parse_command(":dance").is_err());
        assert!(parse_command(":voice now").is_err());
    }

    #[test]
    fn scripted_session() {
        let analyzer = default_analyzer();
        let mut session = Session::new(&analyzer, CaptureSettings::DEFAULT_SETTINGS, None);

        let (sender, receiver) = mpsc::channel();
        for line in [
            "I love this product, it's amazing!",
            ":voice",
            "This is the worst experience ever.",
            ":voice",
            "",
            ":analyze",
            ":bogus",
            ":quit",
            "The sky is blue.",
        ] {
            sender.send(Ok(line.to_string())).unwrap();
        }
        let feed = LineFeed::from_receiver(receiver);
        run_session(&mut session, &feed).unwrap();

        let labels: Vec<(Source, SentimentLabel)> = session
            .results()
            .iter()
            .map(|r| (r.source, r.label))
            .collect();
        // The blank phrase falls back to the text field, then it is analyzed again.
        assert_eq!(
            labels,
            vec![
                (Source::Typed, SentimentLabel::Positive),
                (Source::Voice, SentimentLabel::Negative),
                (Source::Typed, SentimentLabel::Negative),
                (Source::Typed, SentimentLabel::Negative),
            ]
        );
        assert_eq!(session.text(), "This is the worst experience ever.");
        // The line after :quit is not consumed.
        assert_eq!(feed.next_line().unwrap().unwrap(), "The sky is blue.");
    }

    #[test]
    fn file_command_reads_the_document() {
        let mut p = std::env::temp_dir();
        p.push(format!("sentimeter_{}_session_file.txt", std::process::id()));
        fs::write(&p, "I love this product, it's amazing!").unwrap();

        let analyzer = default_analyzer();
        let mut session = Session::new(&analyzer, CaptureSettings::DEFAULT_SETTINGS, None);
        let (sender, receiver) = mpsc::channel();
        for line in [
            format!(":file {}", p.display()),
            ":file /definitely/not/here.txt".to_string(),
            ":analyze".to_string(),
        ] {
            sender.send(Ok(line)).unwrap();
        }
        drop(sender);
        let feed = LineFeed::from_receiver(receiver);
        run_session(&mut session, &feed).unwrap();

        let labels: Vec<(Source, SentimentLabel)> = session
            .results()
            .iter()
            .map(|r| (r.source, r.label))
            .collect();
        assert_eq!(
            labels,
            vec![
                (Source::File, SentimentLabel::Positive),
                (Source::Typed, SentimentLabel::Positive),
            ]
        );
        assert_eq!(session.failures(), 1);
        let _ = fs::remove_file(&p);
    }

    #[test]
    fn late_phrase_does_not_reach_the_field() {
        let analyzer = default_analyzer();
        let capture = CaptureSettings {
            listen_timeout: Duration::from_millis(20),
            phrase_time_limit: Duration::from_millis(30),
        };
        let mut session = Session::new(&analyzer, capture, None);

        let (sender, receiver) = mpsc::channel();
        let typist = thread::spawn(move || {
            sender
                .send(Ok("I love this product, it's amazing!".to_string()))
                .unwrap();
            sender.send(Ok(":voice".to_string())).unwrap();
            // Well after the capture gave up.
            thread::sleep(Duration::from_millis(500));
            sender.send(Ok("I hate this".to_string())).unwrap();
            sender.send(Ok(":analyze".to_string())).unwrap();
            sender.send(Ok(":quit".to_string())).unwrap();
        });
        let feed = LineFeed::from_receiver(receiver);
        run_session(&mut session, &feed).unwrap();
        typist.join().unwrap();

        for r in session.results() {
            assert_eq!(r.source, Source::Typed);
            assert_eq!(r.text, "I love this product, it's amazing!");
            assert_eq!(r.label, SentimentLabel::Positive);
        }
        // Typed text, the fallback of the timed out capture, then :analyze.
        assert_eq!(session.results().len(), 3);
        assert_eq!(session.text(), "I love this product, it's amazing!");
    }
}
