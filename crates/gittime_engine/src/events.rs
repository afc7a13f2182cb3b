use gittime_core::{Event, EventKind};
use serde::Deserialize;
use serde_json::Value;

use crate::fetch::{endpoint, FetchSettings, HttpClient};
use crate::{FailureKind, FetchError};

const EVENTS_ACCEPT: &str = "application/vnd.github+json";

/// One page of a user's public activity.
#[async_trait::async_trait]
pub trait EventSource: Send + Sync {
    async fn fetch_page(
        &self,
        user_name: &str,
        page: u32,
        per_page: u32,
    ) -> Result<Vec<Event>, FetchError>;
}

/// `GET /users/{user}/events?page=..&per_page=..` against the REST API.
#[derive(Debug, Clone)]
pub struct GithubEventSource {
    http: HttpClient,
    api_base_url: String,
}

impl GithubEventSource {
    pub fn new(http: HttpClient, settings: &FetchSettings) -> Self {
        Self {
            http,
            api_base_url: settings.api_base_url.clone(),
        }
    }
}

#[async_trait::async_trait]
impl EventSource for GithubEventSource {
    async fn fetch_page(
        &self,
        user_name: &str,
        page: u32,
        per_page: u32,
    ) -> Result<Vec<Event>, FetchError> {
        let mut url = endpoint(&self.api_base_url, &["users", user_name, "events"])?;
        url.query_pairs_mut()
            .append_pair("page", &page.to_string())
            .append_pair("per_page", &per_page.to_string());

        let body = self.http.get(url, EVENTS_ACCEPT).await?;
        parse_events(&body.bytes)
    }
}

#[derive(Debug, Deserialize)]
struct WireEvent {
    #[serde(default)]
    id: String,
    #[serde(rename = "type", default)]
    kind: Option<String>,
    #[serde(default)]
    actor: Option<WireActor>,
    #[serde(default)]
    repo: Option<WireRepo>,
    #[serde(default)]
    created_at: String,
    #[serde(default)]
    payload: Value,
}

#[derive(Debug, Deserialize)]
struct WireActor {
    login: String,
}

#[derive(Debug, Deserialize)]
struct WireRepo {
    name: String,
}

impl WireEvent {
    fn into_event(self) -> Event {
        Event {
            kind: self.kind.as_deref().and_then(EventKind::from_type_name),
            id: self.id,
            actor: self.actor.map(|a| a.login).unwrap_or_default(),
            repo: self.repo.map(|r| r.name).unwrap_or_default(),
            created_at: self.created_at,
            payload: self.payload,
        }
    }
}

/// Decodes an events response body. Unknown types are kept with `kind: None`.
pub fn parse_events(bytes: &[u8]) -> Result<Vec<Event>, FetchError> {
    let wire: Vec<WireEvent> = serde_json::from_slice(bytes)
        .map_err(|err| FetchError::new(FailureKind::Decode, err.to_string()))?;
    Ok(wire.into_iter().map(WireEvent::into_event).collect())
}
