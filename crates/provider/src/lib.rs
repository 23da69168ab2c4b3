pub mod context;
pub mod error;
pub mod http;
pub mod provider;
pub mod transport;

#[cfg(any(test, feature = "testing"))]
pub mod testing;

pub use context::AttemptContext;
pub use error::ProviderError;
pub use http::HttpSettings;
pub use provider::{DynUploadProvider, SourceFile, UploadProvider, UploadedFile};
pub use transport::{RequestBody, read_success_body, send, send_streaming};
