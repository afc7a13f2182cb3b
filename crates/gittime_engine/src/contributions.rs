use std::sync::Arc;

use gittime_core::ContributionInfo;
use gittime_logging::{gittime_info, gittime_warn};

use crate::fetch::{endpoint, FetchSettings, HttpClient};
use crate::scrape::{ContributionParser, GraphMarkupParser};
use crate::{FailureKind, FetchError};

#[async_trait::async_trait]
pub trait ContributionSource: Send + Sync {
    async fn fetch_summary(&self, user_name: &str) -> Result<ContributionInfo, FetchError>;
}

/// Primary source: downloads the graph markup and runs a [`ContributionParser`].
pub struct ScrapedContributionSource {
    http: HttpClient,
    graph_base_url: String,
    parser: Box<dyn ContributionParser>,
}

impl ScrapedContributionSource {
    pub fn new(http: HttpClient, settings: &FetchSettings) -> Self {
        Self::with_parser(http, settings, Box::new(GraphMarkupParser::default()))
    }

    pub fn with_parser(
        http: HttpClient,
        settings: &FetchSettings,
        parser: Box<dyn ContributionParser>,
    ) -> Self {
        Self {
            http,
            graph_base_url: settings.graph_base_url.clone(),
            parser,
        }
    }
}

#[async_trait::async_trait]
impl ContributionSource for ScrapedContributionSource {
    async fn fetch_summary(&self, user_name: &str) -> Result<ContributionInfo, FetchError> {
        let url = endpoint(&self.graph_base_url, &["users", user_name, "contributions"])?;
        let body = self.http.get(url, "text/html").await?;
        let html = body.text()?;
        self.parser.parse(&html)
    }
}

/// Fallback source that already serves a structured summary as JSON.
#[derive(Debug, Clone)]
pub struct StructuredContributionSource {
    http: HttpClient,
    base_url: String,
}

impl StructuredContributionSource {
    pub fn new(http: HttpClient, base_url: impl Into<String>) -> Self {
        Self {
            http,
            base_url: base_url.into(),
        }
    }
}

#[async_trait::async_trait]
impl ContributionSource for StructuredContributionSource {
    async fn fetch_summary(&self, user_name: &str) -> Result<ContributionInfo, FetchError> {
        let url = endpoint(&self.base_url, &["contributions", user_name])?;
        let body = self.http.get(url, "application/json").await?;
        serde_json::from_slice(&body.bytes)
            .map_err(|err| FetchError::new(FailureKind::Decode, err.to_string()))
    }
}

/// Scrapes first and falls back once to the structured source on any failure.
#[derive(Clone)]
pub struct ContributionScraper {
    primary: Arc<dyn ContributionSource>,
    fallback: Option<Arc<dyn ContributionSource>>,
}

impl ContributionScraper {
    pub fn new(
        primary: Arc<dyn ContributionSource>,
        fallback: Option<Arc<dyn ContributionSource>>,
    ) -> Self {
        Self { primary, fallback }
    }

    pub fn from_settings(http: HttpClient, settings: &FetchSettings) -> Self {
        let primary: Arc<dyn ContributionSource> =
            Arc::new(ScrapedContributionSource::new(http.clone(), settings));
        let fallback = settings.fallback_base_url.as_ref().map(|base| {
            Arc::new(StructuredContributionSource::new(http, base.clone()))
                as Arc<dyn ContributionSource>
        });
        Self::new(primary, fallback)
    }
}

#[async_trait::async_trait]
impl ContributionSource for ContributionScraper {
    async fn fetch_summary(&self, user_name: &str) -> Result<ContributionInfo, FetchError> {
        let primary_err = match self.primary.fetch_summary(user_name).await {
            Ok(info) => return Ok(info),
            Err(err) => err,
        };
        gittime_warn!("contribution graph for {user_name} failed: {primary_err}");

        let Some(fallback) = &self.fallback else {
            return Err(primary_err);
        };
        let info = fallback.fetch_summary(user_name).await?;
        gittime_info!(
            "contribution summary for {user_name} served by fallback ({} days)",
            info.contributions.len()
        );
        Ok(info)
    }
}
