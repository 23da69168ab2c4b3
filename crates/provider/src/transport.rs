//! Streaming request bodies with progress and cancellation.
//!
//! Bodies are produced by writing into one end of an in-memory pipe while
//! `reqwest` reads the other end, so a file is never held in memory. If the
//! request is cancelled the in-flight request is dropped, which closes the
//! connection and makes the pending body write fail like any other network
//! error.

use std::io;
use std::path::PathBuf;

use cascade_multipart::{CHUNK_SIZE, MultipartEncoder, copy_file_with_progress};
use reqwest::header::CONTENT_LENGTH;
use reqwest::{RequestBuilder, Response};
use tokio::io::AsyncWriteExt;
use tokio_util::io::ReaderStream;
use tracing::debug;

use crate::context::AttemptContext;
use crate::error::ProviderError;

/// The body of an upload request.
#[derive(Debug, Clone)]
pub enum RequestBody {
    /// A `multipart/form-data` body.
    Multipart(MultipartEncoder),
    /// The raw bytes of a file.
    RawFile(PathBuf),
}

impl RequestBody {
    /// Exact encoded size for a file of `file_len` bytes.
    pub fn content_length(&self, file_len: u64) -> u64 {
        match self {
            Self::Multipart(encoder) => encoder.content_length(file_len),
            Self::RawFile(_) => file_len,
        }
    }

    async fn write_to<W>(&self, writer: &mut W, ctx: &AttemptContext) -> io::Result<()>
    where
        W: tokio::io::AsyncWrite + Unpin,
    {
        let progress = |percent| ctx.report_progress(percent);
        match self {
            Self::Multipart(encoder) => {
                encoder.encode(writer, progress).await?;
            }
            Self::RawFile(path) => {
                copy_file_with_progress(path, writer, progress).await?;
                writer.flush().await?;
            }
        }
        writer.shutdown().await
    }
}

/// Send `request` with `body` streamed from disk.
///
/// `file_len` is the size of the file inside the body; the request carries
/// the exact `Content-Length`. Progress is reported through `ctx` as the file
/// is written. Cancelling `ctx` aborts the request with
/// [`ProviderError::Network`].
pub async fn send_streaming(
    request: RequestBuilder,
    body: RequestBody,
    file_len: u64,
    ctx: &AttemptContext,
) -> Result<Response, ProviderError> {
    let (mut writer, reader) = tokio::io::duplex(CHUNK_SIZE);
    let content_length = body.content_length(file_len);
    let request = request
        .header(CONTENT_LENGTH, content_length)
        .body(reqwest::Body::wrap_stream(ReaderStream::with_capacity(
            reader, CHUNK_SIZE,
        )));

    debug!(content_length, "streaming request body");

    let produce = async {
        body.write_to(&mut writer, ctx)
            .await
            .map_err(|e| ProviderError::from_body_io(&e))
    };

    let exchange = async {
        tokio::select! {
            biased;
            () = ctx.cancellation().cancelled() => {
                Err(ProviderError::Network("connection aborted".into()))
            }
            result = request.send() => result.map_err(|e| ProviderError::from_reqwest(&e)),
        }
    };

    let ((), response) = tokio::try_join!(produce, exchange)?;
    Ok(response)
}

/// Send a request without a streamed body, honouring cancellation.
pub async fn send(request: RequestBuilder, ctx: &AttemptContext) -> Result<Response, ProviderError> {
    tokio::select! {
        biased;
        () = ctx.cancellation().cancelled() => {
            Err(ProviderError::Network("connection aborted".into()))
        }
        result = request.send() => result.map_err(|e| ProviderError::from_reqwest(&e)),
    }
}

/// Read the body of a response, failing with [`ProviderError::Server`] for
/// non-2xx statuses.
pub async fn read_success_body(response: Response) -> Result<String, ProviderError> {
    let status = response.status();
    let body = response
        .text()
        .await
        .map_err(|e| ProviderError::from_reqwest(&e));

    if !status.is_success() {
        return Err(ProviderError::Server {
            status: status.as_u16(),
            body: body.unwrap_or_default(),
        });
    }
    body
}

#[cfg(test)]
mod tests {
    use std::io::Write;
    use std::sync::{Arc, Mutex};

    use cascade_multipart::FilePart;
    use tokio_util::sync::CancellationToken;

    use super::*;
    use crate::testing::MockHttpServer;

    fn temp_file(contents: &[u8]) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents).unwrap();
        file
    }

    #[tokio::test]
    async fn multipart_body_arrives_with_exact_length() {
        let file = temp_file(b"hello world");
        let server = MockHttpServer::start().await;
        let url = format!("{}/upload", server.base_url());
        let handle = tokio::spawn(async move { server.respond_once(200, r#"{"ok":true}"#).await });

        let encoder = MultipartEncoder::new("BOUNDARY")
            .text("key", "k1")
            .file(FilePart::new("image", file.path(), "hello.txt"));
        let expected_len = encoder.content_length(11);
        let client = reqwest::Client::new();
        let response = send_streaming(
            client.post(&url).header("content-type", encoder.content_type()),
            RequestBody::Multipart(encoder),
            11,
            &AttemptContext::detached(),
        )
        .await
        .unwrap();

        assert_eq!(read_success_body(response).await.unwrap(), r#"{"ok":true}"#);

        let recorded = handle.await.unwrap();
        assert_eq!(recorded.method, "POST");
        assert_eq!(recorded.path, "/upload");
        assert_eq!(recorded.body.len() as u64, expected_len);
        assert_eq!(
            recorded.header("content-length"),
            Some(expected_len.to_string().as_str())
        );
        assert!(recorded.body_text().contains("hello world"));
        assert!(recorded.body_text().ends_with("--BOUNDARY--\r\n"));
    }

    #[tokio::test]
    async fn raw_body_reports_progress_to_100() {
        let data = vec![5u8; CHUNK_SIZE * 2 + 10];
        let file = temp_file(&data);
        let server = MockHttpServer::start().await;
        let url = server.base_url().to_owned();
        let handle = tokio::spawn(async move { server.respond_once(201, "").await });

        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let ctx = AttemptContext::new(CancellationToken::new(), move |p| {
            sink.lock().unwrap().push(p);
        });

        let response = send_streaming(
            reqwest::Client::new().put(&url),
            RequestBody::RawFile(file.path().to_path_buf()),
            data.len() as u64,
            &ctx,
        )
        .await
        .unwrap();
        assert_eq!(response.status().as_u16(), 201);

        let recorded = handle.await.unwrap();
        assert_eq!(recorded.body, data);

        let seen = seen.lock().unwrap();
        assert!(seen.windows(2).all(|w| w[0] <= w[1]));
        assert_eq!(seen.last(), Some(&100));
    }

    #[tokio::test]
    async fn server_error_carries_status_and_body() {
        let server = MockHttpServer::start().await;
        let url = server.base_url().to_owned();
        let handle = tokio::spawn(async move { server.respond_once(503, "maintenance").await });

        let response = reqwest::Client::new().get(&url).send().await.unwrap();
        let err = read_success_body(response).await.unwrap_err();
        handle.await.unwrap();

        match err {
            ProviderError::Server { status, body } => {
                assert_eq!(status, 503);
                assert_eq!(body, "maintenance");
            }
            other => panic!("expected Server error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn cancellation_aborts_transfer() {
        let file = temp_file(&vec![0u8; 32 * 1024 * 1024]);
        let server = MockHttpServer::start().await;
        let url = server.base_url().to_owned();
        let stall = tokio::spawn(async move { server.stall().await });

        let token = CancellationToken::new();
        let trigger = token.clone();
        let ctx = AttemptContext::new(token, move |p| {
            if p > 0 {
                trigger.cancel();
            }
        });

        let err = send_streaming(
            reqwest::Client::new().put(&url),
            RequestBody::RawFile(file.path().to_path_buf()),
            32 * 1024 * 1024,
            &ctx,
        )
        .await
        .unwrap_err();

        assert!(matches!(err, ProviderError::Network(_)), "got {err:?}");
        stall.abort();
    }

    #[tokio::test]
    async fn connection_refused_is_network_error() {
        let file = temp_file(b"x");
        let err = send_streaming(
            reqwest::Client::new().put("http://127.0.0.1:1/"),
            RequestBody::RawFile(file.path().to_path_buf()),
            1,
            &AttemptContext::detached(),
        )
        .await
        .unwrap_err();
        assert!(matches!(err, ProviderError::Network(_)), "got {err:?}");
    }
}
