use serde::Deserialize;

/// Fields of an upload response the provider reads.
#[derive(Debug, Deserialize)]
pub struct UploadResponse {
    #[serde(default)]
    pub secure_url: Option<String>,
    #[serde(default)]
    pub public_id: Option<String>,
    #[serde(default)]
    pub resource_type: Option<String>,
}

/// Response of the `destroy` API.
#[derive(Debug, Deserialize)]
pub struct DestroyResponse {
    #[serde(default)]
    pub result: String,
}

impl DestroyResponse {
    /// `ok`, or `not found` for an object that is already gone.
    pub fn is_deleted(&self) -> bool {
        matches!(self.result.as_str(), "ok" | "not found")
    }
}
