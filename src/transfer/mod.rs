//! Streaming downloads.
//!
//! [`stream_download`] is the single primitive every artifact goes through:
//! mod jars, server jars and loader installers alike.
//!
//! ```rust,no_run
//! use mcprov::http::{create_http_client, HttpClientConfig};
//! use mcprov::transfer::stream_download;
//! use indicatif::ProgressBar;
//! use std::path::Path;
//!
//! # async fn example() -> mcprov::Result<()> {
//! let client = create_http_client(HttpClientConfig::default())?;
//! let written = stream_download(
//!     &client,
//!     "https://cdn.modrinth.com/data/AANobbMI/versions/u1OEbNKx/sodium-fabric-0.6.0.jar",
//!     Path::new("mods/sodium.jar"),
//!     &ProgressBar::hidden(),
//! )
//! .await?;
//! # Ok(())
//! # }
//! ```

pub mod content_length;

pub use content_length::content_length;

use crate::error::{Error, Result};

use futures::StreamExt;
use indicatif::ProgressBar;
use reqwest::Url;
use reqwest_middleware::ClientWithMiddleware;
use std::path::Path;
use tokio::{fs::File, io::AsyncWriteExt};
use tracing::debug;

/// Size of the writes issued to the destination file.
pub const CHUNK_SIZE: usize = 8 * 1024;

/// Download `url` into `destination`, returning the number of bytes written.
///
/// The destination is created or truncated before the first byte is written,
/// so repeating the call overwrites the previous file. The progress bar
/// length is set from the `Content-Length` header when the server sends one
/// and left at zero otherwise; it advances once per chunk written.
///
/// On failure the bytes already written stay on disk. Callers must not assume
/// the destination is either complete or absent.
pub async fn stream_download(
    client: &ClientWithMiddleware,
    url: &str,
    destination: &Path,
    progress: &ProgressBar,
) -> Result<u64> {
    debug!("Fetching {} into {:?}", url, destination);

    let parsed = Url::parse(url).map_err(|e| Error::InvalidUrl(format!("{}: {}", url, e)))?;
    let res = client
        .get(parsed)
        .send()
        .await
        .map_err(|e| Error::transport(format!("Request to {} failed", url), e))?;
    let res = res
        .error_for_status()
        .map_err(|e| Error::transport(format!("Server refused {}", url), e))?;

    let total = content_length(&res).unwrap_or(0);
    progress.set_length(total);

    let mut file = File::create(destination).await?;
    let mut written: u64 = 0;

    let mut stream = res.bytes_stream();
    while let Some(item) = stream.next().await {
        let chunk = match item {
            Ok(chunk) => chunk,
            Err(e) => {
                // Keep what arrived so far on disk.
                file.flush().await?;
                debug!("Transfer of {} stopped after {} bytes", url, written);
                return Err(Error::transport(format!("Transfer of {} interrupted", url), e));
            }
        };
        for piece in chunk.chunks(CHUNK_SIZE) {
            file.write_all(piece).await?;
            written += piece.len() as u64;
            progress.inc(piece.len() as u64);
        }
    }
    file.flush().await?;

    debug!("Wrote {} bytes to {:?}", written, destination);
    Ok(written)
}
