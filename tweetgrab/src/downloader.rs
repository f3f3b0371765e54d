use crate::error::{Error, Result};
use bytes::Bytes;
use futures::{Stream, StreamExt};
use indicatif::{ProgressBar, ProgressStyle};
use reqwest::Client;
use std::path::Path;
use tokio::fs::File;
use tokio::io::{AsyncWrite, AsyncWriteExt};
use tracing::{debug, info};

const BAR_TEMPLATE: &str =
    "{spinner:.green} [{elapsed_precise}] [{wide_bar:.cyan/blue}] {bytes}/{total_bytes} ({bytes_per_sec}, {eta})";
const SPINNER_TEMPLATE: &str = "{spinner:.green} [{elapsed_precise}] {bytes} ({bytes_per_sec})";

/// Streams `url` into `dest`, overwriting whatever is there. Returns the byte count written.
pub async fn download_video(client: &Client, url: &str, dest: &Path) -> Result<u64> {
    info!("Downloading {} to {:?}", url, dest);
    let response = client.get(url).send().await?;
    let status = response.status();
    if !status.is_success() {
        return Err(Error::Status {
            url: url.to_string(),
            status,
        });
    }

    // no content-length means we just count bytes
    let total_size = response.content_length().unwrap_or(0);
    debug!("content length: {}", total_size);
    let progress = progress_bar(total_size);

    let mut file = File::create(dest).await?;
    let written = write_stream(response.bytes_stream(), &mut file, &progress).await;
    let written = match written {
        Ok(n) => n,
        Err(e) => {
            progress.abandon();
            return Err(e);
        }
    };
    file.sync_all().await?;
    progress.finish();

    info!("Video downloaded successfully! ({} bytes)", written);
    Ok(written)
}

pub async fn write_stream<S, E, W>(stream: S, out: &mut W, progress: &ProgressBar) -> Result<u64>
where
    S: Stream<Item = std::result::Result<Bytes, E>>,
    E: Into<Error>,
    W: AsyncWrite + Unpin,
{
    let mut stream = std::pin::pin!(stream);
    let mut written: u64 = 0;
    while let Some(chunk) = stream.next().await {
        let chunk = chunk.map_err(Into::into)?;
        out.write_all(&chunk).await?;
        written += chunk.len() as u64;
        progress.set_position(written);
    }
    out.flush().await?;
    Ok(written)
}

pub fn progress_bar(total: u64) -> ProgressBar {
    if total == 0 {
        let pb = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::with_template(SPINNER_TEMPLATE) {
            pb.set_style(style);
        }
        return pb;
    }
    let pb = ProgressBar::new(total);
    if let Ok(style) = ProgressStyle::with_template(BAR_TEMPLATE) {
        pb.set_style(style.progress_chars("#>-"));
    }
    pb
}
