use serde::{Deserialize, Serialize};

use crate::ProviderTag;

/// Terminal result of one upload request.
///
/// Exactly one outcome is produced per request; intermediate provider
/// failures are folded into [`Failure::message`](UploadOutcome::Failure) only
/// when every provider in the chain has failed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum UploadOutcome {
    /// A provider accepted the file.
    Success {
        /// Public URL of the uploaded file.
        url: String,
        /// Tag to keep for a later delete.
        tag: ProviderTag,
    },
    /// No provider accepted the file.
    Failure {
        /// Every provider's diagnostic, in attempt order.
        message: String,
    },
}

impl UploadOutcome {
    /// Build a failure outcome.
    pub fn failure(message: impl Into<String>) -> Self {
        Self::Failure {
            message: message.into(),
        }
    }

    /// Returns `true` for [`UploadOutcome::Success`].
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }
}

/// Result of deleting a previously uploaded file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum DeleteOutcome {
    /// The file is gone, was already gone, or the provider keeps no state to
    /// remove.
    Success,
    /// The provider refused or could not be reached.
    Failure { message: String },
}

impl DeleteOutcome {
    /// Build a failure outcome.
    pub fn failure(message: impl Into<String>) -> Self {
        Self::Failure {
            message: message.into(),
        }
    }

    /// Returns `true` for [`DeleteOutcome::Success`].
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success)
    }
}

/// Signal emitted while an upload runs in the background.
///
/// A stream of events for one request contains any number of
/// [`Progress`](Self::Progress) events followed by exactly one terminal
/// event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum UploadEvent {
    /// Percentage of the current attempt's file bytes sent, `0..=100`.
    Progress { percent: u8 },
    /// Terminal: a provider accepted the file.
    Succeeded { url: String, tag: ProviderTag },
    /// Terminal: every provider failed.
    Failed { message: String },
}

impl UploadEvent {
    /// Returns `true` for the two terminal events.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Self::Progress { .. })
    }
}

impl From<UploadOutcome> for UploadEvent {
    fn from(outcome: UploadOutcome) -> Self {
        match outcome {
            UploadOutcome::Success { url, tag } => Self::Succeeded { url, tag },
            UploadOutcome::Failure { message } => Self::Failed { message },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_serializes_tag_as_string() {
        let outcome = UploadOutcome::Success {
            url: "https://host/x.jpg".into(),
            tag: ProviderTag::ImgBb {
                url: "https://host/x.jpg".into(),
            },
        };
        let json = serde_json::to_value(&outcome).unwrap();
        assert_eq!(json["status"], "success");
        assert_eq!(json["tag"], "imgbb|https://host/x.jpg");
    }

    #[test]
    fn outcome_converts_to_terminal_event() {
        let event: UploadEvent = UploadOutcome::failure("imgbb: HTTP 500").into();
        assert!(event.is_terminal());
        assert_eq!(
            event,
            UploadEvent::Failed {
                message: "imgbb: HTTP 500".into()
            }
        );
        assert!(!UploadEvent::Progress { percent: 40 }.is_terminal());
    }

    #[test]
    fn delete_outcome_helpers() {
        assert!(DeleteOutcome::Success.is_success());
        assert!(!DeleteOutcome::failure("HTTP 401").is_success());
    }
}
