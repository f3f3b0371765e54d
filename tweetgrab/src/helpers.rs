use crate::config::Settings;
use crate::error::{Error, Result};
use dirs::{download_dir, home_dir};
use regex::Regex;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;
use tokio::fs;

const FALLBACK_NAME: &str = "video";
const VIDEO_EXTENSION: &str = ".mp4";

static NOT_ALNUM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^a-zA-Z0-9]+").expect("static regex"));

// tweet text is whatever people typed so strip it down to something every fs accepts
pub fn sanitize_file_name(text: &str) -> String {
    let cleaned = NOT_ALNUM.replace_all(text, " ");
    let cleaned = cleaned.trim();
    if cleaned.is_empty() {
        return format!("{}{}", FALLBACK_NAME, VIDEO_EXTENSION);
    }
    format!("{}{}", cleaned, VIDEO_EXTENSION)
}

/// A name given on the command line, minus any `.mp4` the user already typed.
pub fn override_file_name(name: &str) -> String {
    let mut stem = name.trim();
    while let Some(rest) = strip_extension(stem) {
        stem = rest;
    }
    sanitize_file_name(stem)
}

fn strip_extension(name: &str) -> Option<&str> {
    let split = name.len().checked_sub(VIDEO_EXTENSION.len())?;
    let ext = name.get(split..)?;
    ext.eq_ignore_ascii_case(VIDEO_EXTENSION).then(|| &name[..split])
}

pub fn resolve_download_dir(settings: &Settings) -> Result<PathBuf> {
    if let Some(dir) = &settings.download_dir {
        return Ok(dir.clone());
    }
    download_dir()
        .or_else(|| home_dir().map(|home| home.join("Downloads")))
        .ok_or(Error::NoDownloadDir)
}

pub async fn ensure_directory(path: &Path) -> Result<()> {
    if !fs::try_exists(path).await? {
        fs::create_dir_all(path).await?;
    }
    Ok(())
}
