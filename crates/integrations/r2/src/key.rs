/// Replace every character outside `[A-Za-z0-9._-]` with `_`.
pub fn safe_key(name: &str) -> String {
    name.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') {
                c
            } else {
                '_'
            }
        })
        .collect()
}

/// Object key for an upload of `file_name` started at `unix_millis`:
/// `<prefix><unix_millis>_<safe name>`.
pub fn object_key(prefix: &str, unix_millis: i64, file_name: &str) -> String {
    format!("{prefix}{unix_millis}_{}", safe_key(file_name))
}
