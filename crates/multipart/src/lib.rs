//! Streaming `multipart/form-data` encoder.
//!
//! The encoder writes scalar form fields and a single file part into any
//! [`AsyncWrite`](tokio::io::AsyncWrite). File content is streamed in
//! [`CHUNK_SIZE`] chunks so memory use does not grow with the file, and a
//! progress callback receives `floor(sent * 100 / total)` after every chunk.
//!
//! ```rust,no_run
//! # async fn demo() -> std::io::Result<()> {
//! use cascade_multipart::{FilePart, MultipartEncoder};
//!
//! let encoder = MultipartEncoder::with_random_boundary()
//!     .text("key", "api-key")
//!     .file(FilePart::new("image", "/tmp/photo.jpg", "photo.jpg"));
//! let mut body = Vec::new();
//! encoder.encode(&mut body, |percent| println!("{percent}%")).await?;
//! # Ok(())
//! # }
//! ```

pub mod encoder;
pub mod mime;
pub mod progress;

pub use encoder::{FilePart, MultipartEncoder, generate_boundary};
pub use mime::{OCTET_STREAM, mime_for_file_name};
pub use progress::{CHUNK_SIZE, copy_file_with_progress, percent};
