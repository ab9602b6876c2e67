// Primitives for reading plain text documents.

use crate::analyzer::{io_common::simplify_file_name, *};

pub fn read_text_document(path: &str) -> AppResult<String> {
    let bytes = fs::read(path).context(OpeningFileSnafu { path })?;
    decode_text(bytes, &simplify_file_name(path))
}

/// The whole content, which must be valid UTF-8.
pub fn decode_text(bytes: Vec<u8>, name: &str) -> AppResult<String> {
    let text = String::from_utf8(bytes).context(DecodingTextSnafu { name })?;
    // A leading byte order mark is not part of the text.
    let text = match text.strip_prefix('\u{feff}') {
        Some(rest) => rest.to_string(),
        None => text,
    };
    debug!("decode_text: {}: {} chars", name, text.chars().count());
    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_utf8_in_full() {
        let text = "first line\nsecond line — ünïcödé\n";
        assert_eq!(decode_text(text.as_bytes().to_vec(), "a.txt").unwrap(), text);
    }

    #[test]
    fn drops_the_byte_order_mark() {
        let mut bytes = vec![0xef, 0xbb, 0xbf];
        bytes.extend_from_slice(b"hello");
        assert_eq!(decode_text(bytes, "bom.txt").unwrap(), "hello");
    }

    #[test]
    fn rejects_invalid_utf8() {
        let err = decode_text(vec![0x68, 0x69, 0xff, 0xfe], "latin1.txt").unwrap_err();
        assert!(matches!(err, AppError::DecodingText { .. }));
        assert!(err.to_string().contains("latin1.txt"));
    }
}
