use serde_json::Value;

/// The closed set of upstream event kinds the activity feed knows how to show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    Create,
    Watch,
    PullRequest,
    Push,
    Fork,
    Issues,
    IssueComment,
    Release,
    PullRequestReviewComment,
    Public,
}

impl EventKind {
    pub const ALL: [EventKind; 10] = [
        EventKind::Create,
        EventKind::Watch,
        EventKind::PullRequest,
        EventKind::Push,
        EventKind::Fork,
        EventKind::Issues,
        EventKind::IssueComment,
        EventKind::Release,
        EventKind::PullRequestReviewComment,
        EventKind::Public,
    ];

    /// Maps an upstream `type` string (e.g. `"PushEvent"`) to a kind.
    /// Anything outside the closed set is `None`.
    pub fn from_type_name(name: &str) -> Option<Self> {
        let kind = match name {
            "CreateEvent" => EventKind::Create,
            "WatchEvent" => EventKind::Watch,
            "PullRequestEvent" => EventKind::PullRequest,
            "PushEvent" => EventKind::Push,
            "ForkEvent" => EventKind::Fork,
            "IssuesEvent" => EventKind::Issues,
            "IssueCommentEvent" => EventKind::IssueComment,
            "ReleaseEvent" => EventKind::Release,
            "PullRequestReviewCommentEvent" => EventKind::PullRequestReviewComment,
            "PublicEvent" => EventKind::Public,
            _ => return None,
        };
        Some(kind)
    }

    pub fn type_name(self) -> &'static str {
        match self {
            EventKind::Create => "CreateEvent",
            EventKind::Watch => "WatchEvent",
            EventKind::PullRequest => "PullRequestEvent",
            EventKind::Push => "PushEvent",
            EventKind::Fork => "ForkEvent",
            EventKind::Issues => "IssuesEvent",
            EventKind::IssueComment => "IssueCommentEvent",
            EventKind::Release => "ReleaseEvent",
            EventKind::PullRequestReviewComment => "PullRequestReviewCommentEvent",
            EventKind::Public => "PublicEvent",
        }
    }

    /// Short human label used by text renderers.
    pub fn label(self) -> &'static str {
        match self {
            EventKind::Create => "created",
            EventKind::Watch => "starred",
            EventKind::PullRequest => "pull request",
            EventKind::Push => "pushed",
            EventKind::Fork => "forked",
            EventKind::Issues => "issue",
            EventKind::IssueComment => "commented on issue",
            EventKind::Release => "released",
            EventKind::PullRequestReviewComment => "reviewed",
            EventKind::Public => "made public",
        }
    }
}

/// One raw activity event as delivered by the events endpoint.
#[derive(Debug, Clone, PartialEq)]
pub struct Event {
    /// `None` when the upstream type is missing or outside [`EventKind`].
    pub kind: Option<EventKind>,
    pub id: String,
    pub actor: String,
    pub repo: String,
    pub created_at: String,
    pub payload: Value,
}

impl Event {
    /// Convenience constructor for an event without payload details.
    pub fn new(kind: Option<EventKind>, id: impl Into<String>) -> Self {
        Self {
            kind,
            id: id.into(),
            actor: String::new(),
            repo: String::new(),
            created_at: String::new(),
            payload: Value::Null,
        }
    }
}

/// One fetched page of events.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ActivityPage {
    pub events: Vec<Event>,
    /// Set by sources that never have a further page (trial data).
    pub exhaustive: bool,
}

impl ActivityPage {
    pub fn new(events: Vec<Event>) -> Self {
        Self {
            events,
            exhaustive: false,
        }
    }

    pub fn exhaustive(events: Vec<Event>) -> Self {
        Self {
            events,
            exhaustive: true,
        }
    }
}
