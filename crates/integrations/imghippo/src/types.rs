use serde::Deserialize;

/// Body of an ImgHippo upload response.
#[derive(Debug, Deserialize)]
pub struct ImgHippoResponse {
    #[serde(default)]
    pub success: Option<bool>,
    #[serde(default)]
    pub data: Option<ImgHippoData>,
    #[serde(default)]
    pub url: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ImgHippoData {
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub view_url: Option<String>,
}

impl ImgHippoResponse {
    /// `data.url` when a `data` object is present, otherwise the top-level
    /// `url`.
    pub fn url(&self) -> Option<&str> {
        match &self.data {
            Some(data) => data.url.as_deref(),
            None => self.url.as_deref(),
        }
        .filter(|url| !url.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn data_url_wins() {
        let resp: ImgHippoResponse = serde_json::from_str(
            r#"{"success":true,"data":{"url":"https://i.imghippo.com/a.jpg"},"url":"https://other"}"#,
        )
        .unwrap();
        assert_eq!(resp.url(), Some("https://i.imghippo.com/a.jpg"));
    }

    #[test]
    fn top_level_url() {
        let resp: ImgHippoResponse =
            serde_json::from_str(r#"{"url":"https://i.imghippo.com/b.jpg"}"#).unwrap();
        assert_eq!(resp.url(), Some("https://i.imghippo.com/b.jpg"));
    }

    #[test]
    fn data_without_url() {
        let resp: ImgHippoResponse =
            serde_json::from_str(r#"{"data":{},"url":"https://ignored"}"#).unwrap();
        assert_eq!(resp.url(), None);
    }
}
