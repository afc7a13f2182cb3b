//! GitTime engine: network sources, contribution scraping and async fetch execution.
mod contributions;
mod engine;
mod events;
mod fetch;
mod scrape;
mod trial;
mod types;

pub use contributions::{
    ContributionScraper, ContributionSource, ScrapedContributionSource,
    StructuredContributionSource,
};
pub use engine::{EngineError, EngineHandle, Sources};
pub use events::{parse_events, EventSource, GithubEventSource};
pub use fetch::{endpoint, FetchSettings, FetchedBody, HttpClient};
pub use scrape::{ContributionParser, GraphMarkupParser};
pub use trial::{trial_contributions, trial_page};
pub use types::{EngineEvent, FailureKind, FetchError};
