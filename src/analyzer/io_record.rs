// The output record: one CSV row per analysis.

use std::fs::{File, OpenOptions};

use crate::analyzer::*;

pub struct RecordWriter {
    path: String,
    writer: csv::Writer<File>,
}

impl RecordWriter {
    /// Opens the file for appending. The header is only written to a new or
    /// empty file.
    pub fn open(path: &str) -> AppResult<RecordWriter> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .context(WritingFileSnafu { path })?;
        let is_new = file.metadata().context(WritingFileSnafu { path })?.len() == 0;
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(file);
        if is_new {
            debug!("RecordWriter: writing header to {:?}", path);
            writer
                .write_record(["Text", "Score"])
                .context(WritingRecordSnafu { path })?;
            writer.flush().context(WritingFileSnafu { path })?;
        }
        Ok(RecordWriter {
            path: path.to_string(),
            writer,
        })
    }

    pub fn append(&mut self, result: &AnalysisResult) -> AppResult<()> {
        let score = result.score.to_string();
        self.writer
            .write_record([result.text.as_str(), score.as_str()])
            .context(WritingRecordSnafu {
                path: self.path.clone(),
            })?;
        // Rows are visible right away, even if the session is interrupted.
        self.writer.flush().context(WritingFileSnafu {
            path: self.path.clone(),
        })?;
        Ok(())
    }
}
