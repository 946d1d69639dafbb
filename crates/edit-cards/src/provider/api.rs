//! Wikimedia REST / action API client

use std::collections::HashMap;
use std::time::Duration;

use chrono::{DateTime, Utc};
use edit_proto::config::Config;
use edit_proto::{ImageMetadata, Summary};
use reqwest::Url;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::debug;

use super::ItemProvider;
use crate::error::ProviderError;

/// Candidate from `description/addition/{lang}`
#[derive(Debug, Deserialize)]
pub struct RecommendedArticle {
    pub title: String,
}

/// Candidate from `description/translation/from/{from}/to/{to}`
#[derive(Debug, Deserialize)]
pub struct RecommendedTranslation {
    pub source: RecommendedArticle,
    pub target: RecommendedArticle,
}

/// Candidate from `caption/translation/from/{from}/to/{to}`
#[derive(Debug, Deserialize)]
pub struct RecommendedImage {
    pub title: String,
    #[serde(default)]
    pub structured: StructuredData,
}

#[derive(Debug, Default, Deserialize)]
pub struct StructuredData {
    #[serde(default)]
    pub captions: HashMap<String, String>,
}

/// REST `page/summary/{title}` response
#[derive(Debug, Deserialize)]
pub struct PageSummary {
    pub title: String,
    pub lang: Option<String>,
    pub description: Option<String>,
    pub extract_html: Option<String>,
    pub thumbnail: Option<Thumbnail>,
    pub timestamp: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize)]
pub struct Thumbnail {
    pub source: String,
}

impl PageSummary {
    fn into_summary(self, fallback_lang: &str) -> Summary {
        let lang = self.lang.unwrap_or_else(|| fallback_lang.to_string());
        let mut summary = Summary::new(self.title, lang);
        summary.description = self.description;
        summary.extract_html = self.extract_html;
        summary.thumbnail_url = self.thumbnail.map(|t| t.source);
        summary.timestamp = self.timestamp;
        summary
    }
}

/// Action API `prop=imageinfo` response (formatversion=2)
#[derive(Debug, Deserialize)]
pub struct QueryResponse {
    pub query: Option<QueryPages>,
}

#[derive(Debug, Deserialize)]
pub struct QueryPages {
    #[serde(default)]
    pub pages: Vec<QueryPage>,
}

#[derive(Debug, Deserialize)]
pub struct QueryPage {
    pub title: String,
    #[serde(default)]
    pub imageinfo: Vec<ImageInfo>,
}

#[derive(Debug, Deserialize)]
pub struct ImageInfo {
    pub timestamp: Option<DateTime<Utc>>,
    pub user: Option<String>,
    pub thumburl: Option<String>,
    pub url: Option<String>,
    pub extmetadata: Option<ImageMetadata>,
}

impl QueryResponse {
    fn first_page(self) -> Option<QueryPage> {
        self.query.and_then(|q| q.pages.into_iter().next())
    }
}

/// [`ItemProvider`] backed by the public Wikimedia APIs.
pub struct HttpProvider {
    client: reqwest::Client,
    config: Config,
}

impl HttpProvider {
    pub fn new(config: Config) -> Result<Self, ProviderError> {
        let client = reqwest::Client::builder()
            .user_agent(config.api.user_agent.clone())
            .timeout(Duration::from_secs(config.api.timeout_secs))
            .build()?;
        Ok(Self { client, config })
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        service: &'static str,
        url: Url,
        query: &[(&str, &str)],
    ) -> Result<T, ProviderError> {
        debug!("GET {} ({})", url, service);
        let response = self
            .client
            .get(url)
            .query(query)
            .header("Accept", "application/json")
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(ProviderError::Status {
                service,
                status: response.status().as_u16(),
            });
        }

        let body = response.bytes().await?;
        serde_json::from_slice(&body).map_err(|e| ProviderError::decode(format!("{}: {}", service, e)))
    }

    async fn page_summary(&self, lang: &str, title: &str) -> Result<Summary, ProviderError> {
        let host = self.config.wikipedia_host(lang);
        let url = endpoint(&host, &["api", "rest_v1", "page", "summary", title])?;
        let page: PageSummary = self.get_json("page summary", url, &[]).await?;
        Ok(page.into_summary(lang))
    }

    fn recommendation_url(&self, segments: &[&str]) -> Result<Url, ProviderError> {
        endpoint(&self.config.api.recommendation_base_url, segments)
    }
}

impl ItemProvider for HttpProvider {
    async fn next_missing_description(&self, lang: &str) -> Result<Summary, ProviderError> {
        let url = self.recommendation_url(&["description", "addition", lang])?;
        let candidates: Vec<RecommendedArticle> =
            self.get_json("recommendation API", url, &[]).await?;
        let first = candidates.into_iter().next().ok_or_else(|| {
            ProviderError::no_item(format!("no article without a description in {}", lang))
        })?;
        self.page_summary(lang, &first.title).await
    }

    async fn next_missing_description_pair(
        &self,
        lang_from: &str,
        lang_to: &str,
    ) -> Result<(Summary, Summary), ProviderError> {
        let url = self.recommendation_url(&[
            "description",
            "translation",
            "from",
            lang_from,
            "to",
            lang_to,
        ])?;
        let candidates: Vec<RecommendedTranslation> =
            self.get_json("recommendation API", url, &[]).await?;
        let first = candidates.into_iter().next().ok_or_else(|| {
            ProviderError::no_item(format!(
                "no article to translate from {} to {}",
                lang_from, lang_to
            ))
        })?;

        let (target, source) = futures_util::future::try_join(
            self.page_summary(lang_to, &first.target.title),
            self.page_summary(lang_from, &first.source.title),
        )
        .await?;
        Ok((target, source))
    }

    async fn next_missing_caption(
        &self,
        lang_from: &str,
        lang_to: &str,
    ) -> Result<(Summary, String), ProviderError> {
        let url = self.recommendation_url(&[
            "caption",
            "translation",
            "from",
            lang_from,
            "to",
            lang_to,
        ])?;
        let candidates: Vec<RecommendedImage> =
            self.get_json("recommendation API", url, &[]).await?;
        let (title, caption) = candidates
            .into_iter()
            .find_map(|mut img| {
                let caption = img.structured.captions.remove(lang_from)?;
                Some((img.title, caption))
            })
            .ok_or_else(|| {
                ProviderError::no_item(format!(
                    "no image to caption from {} to {}",
                    lang_from, lang_to
                ))
            })?;

        let url = endpoint(&self.config.api.commons_api_url, &[])?;
        let width = self.config.api.thumbnail_width.to_string();
        let response: QueryResponse = self
            .get_json(
                "Commons API",
                url,
                &[
                    ("action", "query"),
                    ("format", "json"),
                    ("formatversion", "2"),
                    ("prop", "imageinfo"),
                    ("iiprop", "timestamp|user|url"),
                    ("iiurlwidth", &width),
                    ("titles", &title),
                ],
            )
            .await?;

        let page = response
            .first_page()
            .ok_or_else(|| ProviderError::decode(format!("no page for {}", title)))?;
        let mut image = Summary::new(page.title, lang_from);
        if let Some(info) = page.imageinfo.into_iter().next() {
            image.thumbnail_url = info.thumburl.or(info.url);
            image.timestamp = info.timestamp;
            image.attribution_user = info.user;
        }
        Ok((image, caption))
    }

    async fn image_extended_metadata(
        &self,
        lang: &str,
        image_title: &str,
    ) -> Result<Option<ImageMetadata>, ProviderError> {
        let host = self.config.wikipedia_host(lang);
        let url = endpoint(&host, &["w", "api.php"])?;
        let response: QueryResponse = self
            .get_json(
                "image metadata",
                url,
                &[
                    ("action", "query"),
                    ("format", "json"),
                    ("formatversion", "2"),
                    ("prop", "imageinfo"),
                    ("iiprop", "extmetadata"),
                    ("iiextmetadatalanguage", lang),
                    ("titles", image_title),
                ],
            )
            .await?;

        Ok(response
            .first_page()
            .and_then(|page| page.imageinfo.into_iter().next())
            .and_then(|info| info.extmetadata))
    }
}

/// Append percent-encoded path segments to `base`.
fn endpoint(base: &str, segments: &[&str]) -> Result<Url, ProviderError> {
    let mut url =
        Url::parse(base).map_err(|e| ProviderError::Endpoint(format!("{}: {}", base, e)))?;
    if !segments.is_empty() {
        url.path_segments_mut()
            .map_err(|_| ProviderError::Endpoint(format!("{}: not a base URL", base)))?
            .pop_if_empty()
            .extend(segments);
    }
    Ok(url)
}
