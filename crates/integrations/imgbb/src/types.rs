use serde::Deserialize;

/// Body of a successful ImgBB upload response.
///
/// Only the fields the provider reads are modelled.
#[derive(Debug, Deserialize)]
pub struct ImgBbResponse {
    #[serde(default)]
    pub data: Option<ImgBbImage>,
    #[serde(default)]
    pub success: Option<bool>,
}

/// The `data` object of an upload response.
#[derive(Debug, Deserialize)]
pub struct ImgBbImage {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub display_url: Option<String>,
}

impl ImgBbResponse {
    /// The public URL of the uploaded image, if present and non-empty.
    pub fn url(&self) -> Option<&str> {
        self.data
            .as_ref()
            .and_then(|d| d.url.as_deref())
            .filter(|u| !u.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_data_url() {
        let body = r#"{"data":{"id":"abc","url":"https://i.ibb.co/abc/x.jpg","display_url":"https://ibb.co/abc"},"success":true,"status":200}"#;
        let resp: ImgBbResponse = serde_json::from_str(body).unwrap();
        assert_eq!(resp.url(), Some("https://i.ibb.co/abc/x.jpg"));
        assert_eq!(resp.success, Some(true));
    }

    #[test]
    fn empty_url_is_missing() {
        let resp: ImgBbResponse = serde_json::from_str(r#"{"data":{"url":""}}"#).unwrap();
        assert!(resp.url().is_none());
    }
}
