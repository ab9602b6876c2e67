use std::path::Path;

use crate::analyzer::*;

pub fn simplify_file_name(path: &str) -> String {
    Path::new(path)
        .file_name()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| path.to_string())
}

/// The document formats that can be uploaded.
#[derive(Eq, PartialEq, Debug, Clone, Copy)]
pub enum DocumentKind {
    Text,
    Pdf,
}

/// Uses the explicit input type if given, the file extension otherwise.
pub fn document_kind(path: &str, input_type: Option<&str>) -> AppResult<DocumentKind> {
    let kind = match input_type {
        Some(t) => t.to_lowercase(),
        None => Path::new(path)
            .extension()
            .map(|e| e.to_string_lossy().to_lowercase())
            .unwrap_or_default(),
    };
    match kind.as_str() {
        "txt" | "text" => Ok(DocumentKind::Text),
        "pdf" => Ok(DocumentKind::Pdf),
        _ => UnsupportedDocumentSnafu {
            name: simplify_file_name(path),
            kind,
        }
        .fail(),
    }
}

/// A document given on the command line or in the session.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct UploadedDocument {
    pub path: String,
    pub input_type: Option<String>,
}

impl UploadedDocument {
    pub fn new(path: &str, input_type: Option<&str>) -> UploadedDocument {
        UploadedDocument {
            path: path.to_string(),
            input_type: input_type.map(|s| s.to_string()),
        }
    }

    pub fn read(&self) -> AppResult<String> {
        let kind = document_kind(&self.path, self.input_type.as_deref())?;
        info!("Attempting to read {:?} document {:?}", kind, self.path);
        match kind {
            DocumentKind::Text => io_text::read_text_document(&self.path),
            DocumentKind::Pdf => io_pdf::read_pdf_document(&self.path),
        }
    }
}

impl DocumentSource for UploadedDocument {
    fn name(&self) -> String {
        simplify_file_name(&self.path)
    }

    fn extract_text(&self) -> Result<String, Box<dyn std::error::Error + Send + Sync>> {
        self.read().map_err(|e| e.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_from_extension_or_type() {
        assert_eq!(document_kind("a/b/notes.TXT", None).unwrap(), DocumentKind::Text);
        assert_eq!(document_kind("report.pdf", None).unwrap(), DocumentKind::Pdf);
        assert_eq!(
            document_kind("download.bin", Some("pdf")).unwrap(),
            DocumentKind::Pdf
        );
        assert!(matches!(
            document_kind("sheet.xlsx", None),
            Err(AppError::UnsupportedDocument { .. })
        ));
        assert!(document_kind("no_extension", None).is_err());
    }

    #[test]
    fn unreadable_document_is_an_extraction_error() {
        let doc = UploadedDocument::new("/definitely/not/here.txt", None);
        assert_eq!(doc.name(), "here.txt");
        assert!(doc.extract_text().is_err());
    }
}
