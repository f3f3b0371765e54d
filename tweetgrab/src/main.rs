use anyhow::Context;
use clap::Parser;
use reqwest::Url;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

mod config;
mod downloader;
mod error;
mod extractor;
mod helpers;
#[cfg(test)]
mod test_support;

use config::Settings;
use error::Error;

/// Grab the video out of a twitter post and drop it in your downloads folder.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Cli {
    /// Link to the post, e.g. https://x.com/someone/status/123
    url: String,

    /// Where to save the video (defaults to your downloads folder)
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Save under this name instead of the post text
    #[arg(short = 'n', long)]
    file_name: Option<String>,

    /// Only print the video link and file name, don't download
    #[arg(long)]
    info: bool,

    /// Print --info output as json
    #[arg(long, requires = "info")]
    json: bool,

    /// Config file to use instead of the default one
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// More logging, repeat for even more
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let post_url = validate_post_url(&cli.url)?;

    let mut settings = Settings::load(cli.config.as_deref())
        .await
        .context("Failed to load config")?;
    if let Some(dir) = cli.output_dir {
        settings.download_dir = Some(dir);
    }
    let client = settings.build_client()?;

    let mut video_info = extractor::fetch_video_info(&client, &settings, &post_url)
        .await
        .context("Failed to extract video info")?;
    if let Some(name) = cli.file_name.as_deref() {
        video_info.file_name = helpers::override_file_name(name);
    }

    if cli.info {
        if cli.json {
            println!("{}", serde_json::to_string_pretty(&video_info)?);
        } else {
            println!("{}\n{}", video_info.video_url, video_info.file_name);
        }
        return Ok(());
    }

    let dir = helpers::resolve_download_dir(&settings)?;
    helpers::ensure_directory(&dir).await?;
    let dest = dir.join(&video_info.file_name);

    downloader::download_video(&client, &video_info.video_url, &dest)
        .await
        .context("Failed to download video")?;
    info!("Saved to {}", dest.display());
    Ok(())
}

fn validate_post_url(raw: &str) -> Result<String, Error> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(Error::InvalidUrl(raw.to_string()));
    }
    match Url::parse(trimmed) {
        Ok(url) if matches!(url.scheme(), "http" | "https") && url.host().is_some() => {
            Ok(trimmed.to_string())
        }
        _ => Err(Error::InvalidUrl(raw.to_string())),
    }
}
