/// Content type used when nothing better is known.
pub const OCTET_STREAM: &str = "application/octet-stream";

/// Infer a MIME type from the extension of `file_name`.
pub fn mime_for_file_name(file_name: &str) -> String {
    mime_guess::from_path(file_name)
        .first_raw()
        .unwrap_or(OCTET_STREAM)
        .to_owned()
}
