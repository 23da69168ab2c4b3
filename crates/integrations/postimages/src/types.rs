use serde::Deserialize;

/// The JSON shapes Postimages has been seen to answer with.
#[derive(Debug, Default, Deserialize)]
pub struct PostImagesResponse {
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub image: Option<PostImagesImage>,
}

#[derive(Debug, Default, Deserialize)]
pub struct PostImagesImage {
    #[serde(default)]
    pub url: Option<String>,
}

/// Find the image URL in a response body.
///
/// Tries the top-level `url`, then `image.url`, then falls back to the first
/// `http` substring of the raw body up to the next `"` (or the end).
pub fn extract_url(body: &str) -> Option<String> {
    let parsed = serde_json::from_str::<PostImagesResponse>(body).unwrap_or_default();
    parsed
        .url
        .or_else(|| parsed.image.and_then(|image| image.url))
        .filter(|url| !url.is_empty())
        .or_else(|| first_url(body))
}

fn first_url(text: &str) -> Option<String> {
    let start = text.find("http")?;
    let rest = &text[start..];
    let end = rest.find('"').unwrap_or(rest.len());
    Some(rest[..end].to_owned())
}
