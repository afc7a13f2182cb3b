use crate::{ActivitySectionItem, ContributionInfo, Viewer};

/// Read-only snapshot handed to the presentation layer.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ActivityViewModel {
    pub viewer: Viewer,
    pub page: u32,
    pub can_load_more: bool,
    pub is_loading: bool,
    pub is_refreshing: bool,
    /// Pagination stopped because a fetch failed; `Msg::Retry` resumes it.
    pub stalled: bool,
    pub last_failure: Option<String>,
    pub contribution: Option<ContributionInfo>,
    pub items: Vec<ActivitySectionItem>,
    /// Number of real (non-placeholder) items.
    pub activity_count: usize,
    pub dirty: bool,
}

impl ActivityViewModel {
    pub fn shows_placeholder(&self) -> bool {
        self.items
            .iter()
            .any(ActivitySectionItem::is_empty_placeholder)
    }
}
