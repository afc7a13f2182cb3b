//! Bundled demo data served when no live identity is available.

use gittime_core::{ActivityPage, ContributionInfo};

use crate::events::parse_events;
use crate::{FailureKind, FetchError};

const TRIAL_EVENTS: &str = include_str!("../assets/trial_events.json");
const TRIAL_CONTRIBUTIONS: &str = include_str!("../assets/trial_contributions.json");

/// The canned activity page. Always exhaustive, so paging stops after it.
pub fn trial_page() -> Result<ActivityPage, FetchError> {
    parse_events(TRIAL_EVENTS.as_bytes()).map(ActivityPage::exhaustive)
}

pub fn trial_contributions() -> Result<ContributionInfo, FetchError> {
    serde_json::from_str(TRIAL_CONTRIBUTIONS)
        .map_err(|err| FetchError::new(FailureKind::Decode, err.to_string()))
}
