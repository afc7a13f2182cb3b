use crate::{ActivityPage, ContributionInfo, FetchFailure, Ticket, Viewer};

#[derive(Debug, Clone, PartialEq)]
pub enum Msg {
    /// The current-user provider reported a new identity (or trial mode).
    ViewerChanged(Viewer),
    /// View appeared: reset paging, load contributions then page one.
    FirstLoad,
    /// User scrolled to the end of the list.
    LoadMore,
    /// Pull-to-refresh.
    Refresh,
    /// Re-request the current page after a failed activity fetch.
    Retry,
    /// Engine completion for a contribution summary fetch.
    ContributionsLoaded {
        ticket: Ticket,
        result: Result<ContributionInfo, FetchFailure>,
    },
    /// Engine completion for an activity page fetch.
    ActivitiesLoaded {
        ticket: Ticket,
        result: Result<ActivityPage, FetchFailure>,
    },
    /// Show a previously cached summary until a fresh one arrives.
    RestoreContributions(ContributionInfo),
    /// Fallback for placeholder wiring.
    NoOp,
}
