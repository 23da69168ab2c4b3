use std::io;
use std::path::Path;

use tokio::fs::File;
use tokio::io::{AsyncReadExt, AsyncWrite, AsyncWriteExt};

/// Size of each file read and write: 64 KiB.
pub const CHUNK_SIZE: usize = 64 * 1024;

/// `floor(sent * 100 / total)`, clamped to `100`.
///
/// A zero `total` is complete by definition and yields `100`.
pub fn percent(sent: u64, total: u64) -> u8 {
    if total == 0 {
        return 100;
    }
    let value = (u128::from(sent) * 100) / u128::from(total);
    u8::try_from(value.min(100)).unwrap_or(100)
}

/// Stream the file at `path` into `writer` in [`CHUNK_SIZE`] chunks.
///
/// `on_progress` is called after each chunk has been written. An empty file
/// reports `100` once without writing anything. Returns the number of file
/// bytes written.
///
/// A failing write (for example because the connection behind `writer` was
/// closed) aborts the copy with that I/O error.
pub async fn copy_file_with_progress<W, F>(
    path: &Path,
    writer: &mut W,
    mut on_progress: F,
) -> io::Result<u64>
where
    W: AsyncWrite + Unpin + ?Sized,
    F: FnMut(u8),
{
    let mut file = File::open(path).await?;
    let total = file.metadata().await?.len();

    if total == 0 {
        on_progress(100);
        return Ok(0);
    }

    let mut buf = vec![0u8; CHUNK_SIZE];
    let mut sent: u64 = 0;
    loop {
        let read = fill_chunk(&mut file, &mut buf).await?;
        if read == 0 {
            break;
        }
        writer.write_all(&buf[..read]).await?;
        sent += read as u64;
        on_progress(percent(sent, total));
    }

    Ok(sent)
}

/// Read until `buf` is full or the file ends; returns the bytes read.
async fn fill_chunk(file: &mut File, buf: &mut [u8]) -> io::Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        let read = file.read(&mut buf[filled..]).await?;
        if read == 0 {
            break;
        }
        filled += read;
    }
    Ok(filled)
}
