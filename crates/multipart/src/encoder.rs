use std::io;
use std::path::PathBuf;

use tokio::io::{AsyncWrite, AsyncWriteExt};

use crate::mime::mime_for_file_name;
use crate::progress::copy_file_with_progress;

const CRLF: &str = "\r\n";

/// Generate a boundary that is unique per request.
pub fn generate_boundary() -> String {
    format!("----CascadeBoundary{}", uuid::Uuid::new_v4().simple())
}

/// The file part of a multipart body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilePart {
    /// Form field name (e.g. `"image"` or `"file"`).
    pub field_name: String,
    /// Local file to stream.
    pub path: PathBuf,
    /// File name announced in `Content-Disposition`.
    pub file_name: String,
    /// `Content-Type` of the part.
    pub content_type: String,
}

impl FilePart {
    /// Create a file part whose content type is inferred from `file_name`.
    pub fn new(
        field_name: impl Into<String>,
        path: impl Into<PathBuf>,
        file_name: impl Into<String>,
    ) -> Self {
        let file_name = file_name.into();
        Self {
            field_name: field_name.into(),
            path: path.into(),
            content_type: mime_for_file_name(&file_name),
            file_name,
        }
    }

    /// Override the inferred content type.
    #[must_use]
    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = content_type.into();
        self
    }
}

/// Writes a `multipart/form-data` body: scalar fields first, then at most one
/// file part, then the closing boundary.
#[derive(Debug, Clone)]
pub struct MultipartEncoder {
    boundary: String,
    fields: Vec<(String, String)>,
    file: Option<FilePart>,
}

impl MultipartEncoder {
    /// Create an encoder with an explicit boundary.
    pub fn new(boundary: impl Into<String>) -> Self {
        Self {
            boundary: boundary.into(),
            fields: Vec::new(),
            file: None,
        }
    }

    /// Create an encoder with a freshly generated boundary.
    pub fn with_random_boundary() -> Self {
        Self::new(generate_boundary())
    }

    /// Add a scalar form field.
    #[must_use]
    pub fn text(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.push((name.into(), value.into()));
        self
    }

    /// Set the file part.
    #[must_use]
    pub fn file(mut self, part: FilePart) -> Self {
        self.file = Some(part);
        self
    }

    /// The boundary separating parts.
    pub fn boundary(&self) -> &str {
        &self.boundary
    }

    /// The file part, if one was set.
    pub fn file_part(&self) -> Option<&FilePart> {
        self.file.as_ref()
    }

    /// Value for the request's `Content-Type` header.
    pub fn content_type(&self) -> String {
        format!("multipart/form-data; boundary={}", self.boundary)
    }

    /// Exact size of the encoded body for a file of `file_len` bytes.
    pub fn content_length(&self, file_len: u64) -> u64 {
        let file_len = if self.file.is_some() { file_len } else { 0 };
        self.preamble().len() as u64 + file_len + self.epilogue().len() as u64
    }

    /// Everything before the file bytes: all scalar fields and the file part
    /// headers.
    fn preamble(&self) -> String {
        let mut out = String::new();
        for (name, value) in &self.fields {
            out.push_str(&format!("--{}{CRLF}", self.boundary));
            out.push_str(&format!(
                "Content-Disposition: form-data; name=\"{}\"{CRLF}{CRLF}",
                escape_quoted(name)
            ));
            out.push_str(value);
            out.push_str(CRLF);
        }
        if let Some(file) = &self.file {
            out.push_str(&format!("--{}{CRLF}", self.boundary));
            out.push_str(&format!(
                "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"{CRLF}",
                escape_quoted(&file.field_name),
                escape_quoted(&file.file_name)
            ));
            out.push_str(&format!("Content-Type: {}{CRLF}{CRLF}", file.content_type));
        }
        out
    }

    /// Everything after the file bytes: the part terminator and the closing
    /// boundary.
    fn epilogue(&self) -> String {
        let mut out = String::new();
        if self.file.is_some() {
            out.push_str(CRLF);
        }
        out.push_str(&format!("--{}--{CRLF}", self.boundary));
        out
    }

    /// Write the full body into `writer`, reporting file progress through
    /// `on_progress`.
    ///
    /// Returns the number of body bytes written. The writer is flushed but
    /// not shut down.
    pub async fn encode<W, F>(&self, writer: &mut W, on_progress: F) -> io::Result<u64>
    where
        W: AsyncWrite + Unpin + ?Sized,
        F: FnMut(u8),
    {
        let preamble = self.preamble();
        writer.write_all(preamble.as_bytes()).await?;

        let file_bytes = match &self.file {
            Some(file) => copy_file_with_progress(&file.path, writer, on_progress).await?,
            None => 0,
        };

        let epilogue = self.epilogue();
        writer.write_all(epilogue.as_bytes()).await?;
        writer.flush().await?;

        Ok(preamble.len() as u64 + file_bytes + epilogue.len() as u64)
    }
}

/// Make a value safe inside a quoted header parameter.
fn escape_quoted(value: &str) -> String {
    value
        .replace('"', "%22")
        .replace('\r', "%0D")
        .replace('\n', "%0A")
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;
    use crate::CHUNK_SIZE;

    fn temp_file(contents: &[u8]) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents).unwrap();
        file
    }

    #[tokio::test]
    async fn encodes_fields_then_file_then_terminator() {
        let file = temp_file(b"PNGDATA");
        let encoder = MultipartEncoder::new("XYZ")
            .text("key", "secret-key")
            .file(FilePart::new("image", file.path(), "photo.png"));

        let mut out = Vec::new();
        let written = encoder.encode(&mut out, |_| {}).await.unwrap();

        let expected = "--XYZ\r\n\
            Content-Disposition: form-data; name=\"key\"\r\n\r\n\
            secret-key\r\n\
            --XYZ\r\n\
            Content-Disposition: form-data; name=\"image\"; filename=\"photo.png\"\r\n\
            Content-Type: image/png\r\n\r\n\
            PNGDATA\r\n\
            --XYZ--\r\n";
        assert_eq!(String::from_utf8(out).unwrap(), expected);
        assert_eq!(written, expected.len() as u64);
    }

    #[tokio::test]
    async fn content_length_matches_encoded_size() {
        let data = vec![0xABu8; CHUNK_SIZE + 17];
        let file = temp_file(&data);
        let encoder = MultipartEncoder::with_random_boundary()
            .text("api_key", "k")
            .text("timestamp", "1700000000")
            .file(
                FilePart::new("file", file.path(), "clip.mp4")
                    .with_content_type("application/octet-stream"),
            );

        let mut out = Vec::new();
        let written = encoder.encode(&mut out, |_| {}).await.unwrap();

        assert_eq!(written, out.len() as u64);
        assert_eq!(encoder.content_length(data.len() as u64), written);
    }

    #[tokio::test]
    async fn file_bytes_are_binary_safe() {
        let data: Vec<u8> = (0..=255u8).cycle().take(1000).collect();
        let file = temp_file(&data);
        let encoder =
            MultipartEncoder::new("B").file(FilePart::new("image", file.path(), "raw.bin"));

        let mut out = Vec::new();
        encoder.encode(&mut out, |_| {}).await.unwrap();

        let header_end = out.windows(4).position(|w| w == b"\r\n\r\n").unwrap() + 4;
        assert_eq!(&out[header_end..header_end + data.len()], data.as_slice());
    }

    #[tokio::test]
    async fn progress_is_non_decreasing_and_ends_at_100() {
        let file = temp_file(&vec![1u8; CHUNK_SIZE * 5 + 1]);
        let encoder =
            MultipartEncoder::new("B").file(FilePart::new("image", file.path(), "big.jpg"));

        let mut seen = Vec::new();
        let mut out = Vec::new();
        encoder.encode(&mut out, |p| seen.push(p)).await.unwrap();

        assert_eq!(seen.len(), 6);
        assert!(seen.windows(2).all(|w| w[0] <= w[1]));
        assert_eq!(seen.last(), Some(&100));
    }

    #[tokio::test]
    async fn zero_byte_file_reports_100() {
        let file = temp_file(b"");
        let encoder =
            MultipartEncoder::new("B").file(FilePart::new("image", file.path(), "empty.jpg"));

        let mut seen = Vec::new();
        let mut out = Vec::new();
        let written = encoder.encode(&mut out, |p| seen.push(p)).await.unwrap();

        assert_eq!(seen, vec![100]);
        assert_eq!(written, encoder.content_length(0));
    }

    #[tokio::test]
    async fn closed_destination_surfaces_io_error() {
        let file = temp_file(&vec![9u8; CHUNK_SIZE * 4]);
        let encoder =
            MultipartEncoder::new("B").file(FilePart::new("image", file.path(), "a.jpg"));

        let (mut writer, reader) = tokio::io::duplex(1024);
        drop(reader);

        let err = encoder.encode(&mut writer, |_| {}).await.unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::BrokenPipe);
    }

    #[test]
    fn content_type_header_carries_boundary() {
        let encoder = MultipartEncoder::new("abc");
        assert_eq!(encoder.content_type(), "multipart/form-data; boundary=abc");
    }

    #[test]
    fn generated_boundaries_are_unique() {
        assert_ne!(generate_boundary(), generate_boundary());
    }

    #[test]
    fn quotes_in_file_names_are_escaped() {
        let encoder = MultipartEncoder::new("B").file(FilePart::new(
            "image",
            "/tmp/x",
            "evil\"name.jpg",
        ));
        assert!(encoder.preamble().contains("filename=\"evil%22name.jpg\""));
    }
}
