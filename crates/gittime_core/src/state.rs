use gittime_logging::{gittime_debug, gittime_warn};

use crate::classify::append_items;
use crate::view_model::ActivityViewModel;
use crate::{
    classify, ActivityPage, ActivitySectionItem, ContributionInfo, Effect, FetchFailure,
    FetchTarget, PaginationState, RequestId, SessionId, Ticket, PAGE_SIZE,
};

/// Who the feed is for, as reported by the current-user provider.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Viewer {
    /// No signed-in user and trial mode off: nothing is fetched.
    #[default]
    Nobody,
    /// Demo mode: every fetch is served from bundled data.
    Trial,
    User { name: String },
}

impl Viewer {
    pub fn user(name: impl Into<String>) -> Self {
        Viewer::User { name: name.into() }
    }

    pub fn target(&self) -> Option<FetchTarget> {
        match self {
            Viewer::Nobody => None,
            Viewer::Trial => Some(FetchTarget::Trial),
            Viewer::User { name } => Some(FetchTarget::Live {
                user_name: name.clone(),
            }),
        }
    }

    pub fn user_name(&self) -> Option<&str> {
        match self {
            Viewer::User { name } => Some(name),
            Viewer::Nobody | Viewer::Trial => None,
        }
    }
}

/// How an arriving activity page is merged into the list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ListMode {
    Replace,
    Append,
}

/// Session state for one activity view. Owned by the reducer.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ActivityState {
    viewer: Viewer,
    pagination: PaginationState,
    contribution_info: Option<ContributionInfo>,
    activities: Vec<ActivitySectionItem>,
    last_failure: Option<FetchFailure>,
    session: SessionId,
    next_request: RequestId,
    awaiting_contributions: Option<RequestId>,
    awaiting_activities: Option<(RequestId, ListMode)>,
    dirty: bool,
}

impl ActivityState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn view(&self) -> ActivityViewModel {
        ActivityViewModel {
            viewer: self.viewer.clone(),
            page: self.pagination.page,
            can_load_more: self.pagination.can_load_more,
            is_loading: self.pagination.is_loading,
            is_refreshing: self.pagination.is_refreshing,
            stalled: self.pagination.stalled,
            last_failure: self.last_failure.as_ref().map(ToString::to_string),
            contribution: self.contribution_info.clone(),
            items: self.activities.clone(),
            activity_count: self
                .activities
                .iter()
                .filter(|item| !item.is_empty_placeholder())
                .count(),
            dirty: self.dirty,
        }
    }

    pub fn viewer(&self) -> &Viewer {
        &self.viewer
    }

    pub fn pagination(&self) -> &PaginationState {
        &self.pagination
    }

    pub fn contribution_info(&self) -> Option<&ContributionInfo> {
        self.contribution_info.as_ref()
    }

    pub fn activities(&self) -> &[ActivitySectionItem] {
        &self.activities
    }

    pub fn last_failure(&self) -> Option<&FetchFailure> {
        self.last_failure.as_ref()
    }

    /// True when no fetch of the current session is outstanding.
    pub fn is_settled(&self) -> bool {
        self.awaiting_contributions.is_none() && self.awaiting_activities.is_none()
    }

    pub(crate) fn awaiting_summary(&self) -> bool {
        self.awaiting_contributions.is_some()
    }

    /// Returns whether anything changed since the last call, clearing the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    fn next_ticket(&mut self) -> Ticket {
        self.next_request += 1;
        Ticket {
            session: self.session,
            request: self.next_request,
        }
    }

    /// Starts a new session. Returns the old one when it still had fetches in flight.
    fn supersede_session(&mut self) -> Option<SessionId> {
        let in_flight = !self.is_settled();
        let previous = self.session;
        self.session += 1;
        self.awaiting_contributions = None;
        self.awaiting_activities = None;
        self.pagination.is_loading = false;
        in_flight.then_some(previous)
    }

    pub(crate) fn switch_viewer(&mut self, viewer: Viewer) -> Option<SessionId> {
        let cancelled = self.supersede_session();
        *self = ActivityState {
            viewer,
            session: self.session,
            next_request: self.next_request,
            dirty: true,
            ..ActivityState::default()
        };
        cancelled
    }

    /// First load and refresh: new session, reset paging, then contributions.
    pub(crate) fn start_chain(&mut self, refreshing: bool) -> Vec<Effect> {
        let mut effects = Vec::new();
        if let Some(session) = self.supersede_session() {
            effects.push(Effect::CancelSession { session });
        }
        self.pagination.reset();
        self.pagination.is_refreshing = refreshing;
        self.last_failure = None;
        self.dirty = true;

        match self.viewer.target() {
            Some(target) => {
                let ticket = self.next_ticket();
                self.awaiting_contributions = Some(ticket.request);
                effects.push(Effect::FetchContributions { ticket, target });
            }
            None => {
                gittime_debug!("no viewer; chain ends after paging reset");
                self.pagination.is_refreshing = false;
            }
        }
        effects
    }

    pub(crate) fn request_more(&mut self) -> Vec<Effect> {
        self.pagination.can_load_more = false;
        self.dirty = true;
        self.request_page(ListMode::Append)
    }

    pub(crate) fn retry(&mut self) -> Vec<Effect> {
        self.pagination.stalled = false;
        self.last_failure = None;
        self.dirty = true;
        let has_items = self
            .activities
            .iter()
            .any(|item| !item.is_empty_placeholder());
        let mode = if has_items {
            ListMode::Append
        } else {
            ListMode::Replace
        };
        self.request_page(mode)
    }

    fn request_page(&mut self, mode: ListMode) -> Vec<Effect> {
        let Some(target) = self.viewer.target() else {
            return Vec::new();
        };
        let ticket = self.next_ticket();
        self.pagination.is_loading = true;
        self.awaiting_activities = Some((ticket.request, mode));
        self.dirty = true;
        vec![Effect::FetchActivities {
            ticket,
            target,
            page: self.pagination.page,
            per_page: PAGE_SIZE,
        }]
    }

    pub(crate) fn accepts_contributions(&self, ticket: Ticket) -> bool {
        ticket.session == self.session && self.awaiting_contributions == Some(ticket.request)
    }

    /// Records a contribution result and moves the chain on to page one.
    pub(crate) fn apply_contributions(
        &mut self,
        result: Result<ContributionInfo, FetchFailure>,
    ) -> Vec<Effect> {
        self.awaiting_contributions = None;
        match result {
            Ok(info) => {
                self.contribution_info = Some(info);
                self.dirty = true;
            }
            Err(failure) => {
                gittime_warn!("contribution summary unavailable, keeping previous: {failure}");
            }
        }
        self.request_page(ListMode::Replace)
    }

    /// Claims the awaited activity request if `ticket` matches it.
    pub(crate) fn take_activity_request(&mut self, ticket: Ticket) -> Option<ListMode> {
        if ticket.session != self.session {
            return None;
        }
        match self.awaiting_activities {
            Some((request, mode)) if request == ticket.request => {
                self.awaiting_activities = None;
                Some(mode)
            }
            _ => None,
        }
    }

    pub(crate) fn apply_activities(
        &mut self,
        mode: ListMode,
        result: Result<ActivityPage, FetchFailure>,
    ) {
        self.pagination.is_loading = false;
        match result {
            Ok(page) => {
                self.pagination.advance(page.events.len(), page.exhaustive);
                self.last_failure = None;
                let items = classify(&page.events);
                match mode {
                    ListMode::Replace => {
                        self.activities = items;
                        if self.activities.is_empty() {
                            self.activities.push(ActivitySectionItem::Empty);
                        }
                    }
                    ListMode::Append => append_items(&mut self.activities, items),
                }
            }
            Err(failure) => {
                gittime_warn!(
                    "activity page {} failed, pagination stalled: {failure}",
                    self.pagination.page
                );
                self.pagination.stall();
                self.last_failure = Some(failure);
                if mode == ListMode::Replace {
                    self.activities = vec![ActivitySectionItem::Empty];
                }
            }
        }
        if mode == ListMode::Replace {
            self.pagination.is_refreshing = false;
        }
        self.dirty = true;
    }

    pub(crate) fn restore_contributions(&mut self, info: ContributionInfo) {
        if self.contribution_info.is_none() {
            self.contribution_info = Some(info);
            self.dirty = true;
        }
    }
}
