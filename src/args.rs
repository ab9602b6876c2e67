use clap::Parser;

/// This is a sentiment analysis program for text, documents and dictated speech.
#[derive(Parser, Debug, Clone)]
#[clap(author, version, about, long_about = None)]
pub struct Args {
    /// (file path, optional) A JSON file with the analysis, capture and output settings.
    /// See the manual of the text_sentiment crate for the format.
    #[clap(short, long, value_parser)]
    pub config: Option<String>,

    /// (text, optional) The content of the text field to analyze.
    #[clap(short, long, value_parser)]
    pub text: Option<String>,

    /// (file path, optional) A .txt or .pdf document to analyze. A document takes precedence
    /// over the voice input and the text field.
    #[clap(short, long, value_parser)]
    pub input: Option<String>,

    /// (txt or pdf) The type of the --input document. By default, it is guessed from the file
    /// extension. The documents of the interactive :file command always use their extension.
    #[clap(long, value_parser)]
    pub input_type: Option<String>,

    /// If passed as an argument, listens for one phrase before analyzing. The phrase is read
    /// from the standard input, one line per phrase.
    #[clap(long, takes_value = false)]
    pub voice: bool,

    /// (lexicon, ruleBased or both) The scorers to run. Overrides the configuration file.
    #[clap(long, value_parser)]
    pub scoring: Option<String>,

    /// (polarityThreeWay, compoundThreeWay or polarityFiveWay) The thresholds that map the
    /// scores to a label. Overrides the configuration file.
    #[clap(long, value_parser)]
    pub policy: Option<String>,

    /// If passed as an argument, removes URLs and symbols from the text before scoring.
    #[clap(long, takes_value = false)]
    pub strip_noise: bool,

    /// (seconds) How long to wait for speech to start.
    #[clap(long, value_parser)]
    pub listen_timeout: Option<u64>,

    /// (seconds) The longest phrase accepted once speech started.
    #[clap(long, value_parser)]
    pub phrase_limit: Option<u64>,

    /// (file path, optional) If specified, one row (Text, Score) per analysis is appended to
    /// this CSV file. Setting this option overrides the path of the configuration file.
    #[clap(short, long, value_parser)]
    pub out: Option<String>,

    /// (file path, 'stdout' or empty) If specified, the summary of the session will be written
    /// in JSON format to the given location.
    #[clap(short, long, value_parser)]
    pub summary: Option<String>,

    /// (file path) A reference file containing a summary in JSON format. If provided, sentimeter
    /// will check that the summary of the session matches the reference.
    #[clap(short, long, value_parser)]
    pub reference: Option<String>,

    /// If passed as an argument, starts a session reading commands from the standard input.
    #[clap(long, takes_value = false)]
    pub interactive: bool,

    // Other arguments
    /// If passed as an argument, will turn on verbose logging to the standard output.
    #[clap(long, takes_value = false)]
    pub verbose: bool,
}
