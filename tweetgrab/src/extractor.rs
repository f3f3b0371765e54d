use crate::config::Settings;
use crate::error::{Error, Result};
use crate::helpers;
use reqwest::{Client, Request, Url};
use scraper::{Html, Selector};
use serde::Serialize;
use tracing::{debug, info};

// twitsave lists the qualities highest first inside this dropdown
const DOWNLOAD_MENU: &str = "div.origin-top-right";
const TITLE_BLOCK: &str = "div.leading-tight";
const TITLE_TEXT: &str = "p.m-2";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VideoInfo {
    pub video_url: String,
    pub file_name: String,
}

pub async fn fetch_video_info(
    client: &Client,
    settings: &Settings,
    post_url: &str,
) -> Result<VideoInfo> {
    let base = extractor_base(settings)?;
    info!("Asking {} about {}", base, post_url);

    let request = info_request(client, settings, post_url)?;
    let response = client.execute(request).await?;
    let status = response.status();
    if !status.is_success() {
        return Err(Error::Status {
            url: response.url().to_string(),
            status,
        });
    }
    let html = response.text().await?;
    debug!("extractor page is {} bytes", html.len());

    let video_info = parse_info_page(&html, &base)?;
    info!("Found video: {}", video_info.video_url);
    Ok(video_info)
}

/// The post link goes in as a single encoded `url` parameter, its own query string included.
pub fn info_request(client: &Client, settings: &Settings, post_url: &str) -> Result<Request> {
    Ok(client
        .get(extractor_base(settings)?)
        .query(&[("url", post_url)])
        .build()?)
}

fn extractor_base(settings: &Settings) -> Result<Url> {
    Url::parse(&settings.extractor_url)
        .map_err(|_| Error::InvalidUrl(settings.extractor_url.clone()))
}

pub fn parse_info_page(html: &str, base: &Url) -> Result<VideoInfo> {
    let document = Html::parse_document(html);

    let menu_selector = selector(DOWNLOAD_MENU)?;
    let anchor_selector = selector("a")?;
    let block_selector = selector(TITLE_BLOCK)?;
    let text_selector = selector(TITLE_TEXT)?;

    let download_menu = document
        .select(&menu_selector)
        .next()
        .ok_or_else(|| Error::Parse("no download menu on the page".into()))?;

    let href = download_menu
        .select(&anchor_selector)
        .next()
        .ok_or_else(|| Error::Parse("download menu has no links".into()))?
        .value()
        .attr("href")
        .map(str::trim)
        .filter(|href| !href.is_empty())
        .ok_or_else(|| Error::Parse("first download link has no href".into()))?;

    let video_url = base
        .join(href)
        .map_err(|e| Error::Parse(format!("bad video link {:?}: {}", href, e)))?;

    let title = document
        .select(&block_selector)
        .next()
        .and_then(|block| block.select(&text_selector).next())
        .map(|p| p.text().collect::<String>());
    if title.is_none() {
        debug!("no title text on the page, naming it after the fallback");
    }

    Ok(VideoInfo {
        video_url: video_url.to_string(),
        file_name: helpers::sanitize_file_name(title.as_deref().unwrap_or("video")),
    })
}

fn selector(css: &str) -> Result<Selector> {
    Selector::parse(css).map_err(|e| Error::Parse(format!("selector {:?}: {}", css, e)))
}
