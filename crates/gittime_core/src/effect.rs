pub type SessionId = u64;
pub type RequestId = u64;

/// Identity attached to every fetch so late results from a superseded
/// session or request can be recognised and dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Ticket {
    pub session: SessionId,
    pub request: RequestId,
}

/// Where a fetch goes: the live endpoints for a user, or bundled demo data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchTarget {
    Live { user_name: String },
    Trial,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    FetchContributions {
        ticket: Ticket,
        target: FetchTarget,
    },
    FetchActivities {
        ticket: Ticket,
        target: FetchTarget,
        page: u32,
        per_page: u32,
    },
    /// Abort whatever is still in flight for `session`.
    CancelSession { session: SessionId },
}
