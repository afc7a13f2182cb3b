use crate::{Event, EventKind};

/// A display-ready row of the activity section.
#[derive(Debug, Clone, PartialEq)]
pub enum ActivitySectionItem {
    /// Placeholder shown when a fetch produced no events at all.
    Empty,
    Create(Event),
    Watch(Event),
    PullRequest(Event),
    Push(Event),
    Fork(Event),
    Issues(Event),
    IssueComment(Event),
    Release(Event),
    PullRequestReviewComment(Event),
    Public(Event),
}

impl ActivitySectionItem {
    fn from_kind(kind: EventKind, event: Event) -> Self {
        match kind {
            EventKind::Create => ActivitySectionItem::Create(event),
            EventKind::Watch => ActivitySectionItem::Watch(event),
            EventKind::PullRequest => ActivitySectionItem::PullRequest(event),
            EventKind::Push => ActivitySectionItem::Push(event),
            EventKind::Fork => ActivitySectionItem::Fork(event),
            EventKind::Issues => ActivitySectionItem::Issues(event),
            EventKind::IssueComment => ActivitySectionItem::IssueComment(event),
            EventKind::Release => ActivitySectionItem::Release(event),
            EventKind::PullRequestReviewComment => {
                ActivitySectionItem::PullRequestReviewComment(event)
            }
            EventKind::Public => ActivitySectionItem::Public(event),
        }
    }

    pub fn kind(&self) -> Option<EventKind> {
        let kind = match self {
            ActivitySectionItem::Empty => return None,
            ActivitySectionItem::Create(_) => EventKind::Create,
            ActivitySectionItem::Watch(_) => EventKind::Watch,
            ActivitySectionItem::PullRequest(_) => EventKind::PullRequest,
            ActivitySectionItem::Push(_) => EventKind::Push,
            ActivitySectionItem::Fork(_) => EventKind::Fork,
            ActivitySectionItem::Issues(_) => EventKind::Issues,
            ActivitySectionItem::IssueComment(_) => EventKind::IssueComment,
            ActivitySectionItem::Release(_) => EventKind::Release,
            ActivitySectionItem::PullRequestReviewComment(_) => {
                EventKind::PullRequestReviewComment
            }
            ActivitySectionItem::Public(_) => EventKind::Public,
        };
        Some(kind)
    }

    pub fn event(&self) -> Option<&Event> {
        match self {
            ActivitySectionItem::Empty => None,
            ActivitySectionItem::Create(event)
            | ActivitySectionItem::Watch(event)
            | ActivitySectionItem::PullRequest(event)
            | ActivitySectionItem::Push(event)
            | ActivitySectionItem::Fork(event)
            | ActivitySectionItem::Issues(event)
            | ActivitySectionItem::IssueComment(event)
            | ActivitySectionItem::Release(event)
            | ActivitySectionItem::PullRequestReviewComment(event)
            | ActivitySectionItem::Public(event) => Some(event),
        }
    }

    pub fn is_empty_placeholder(&self) -> bool {
        matches!(self, ActivitySectionItem::Empty)
    }
}

/// Turns fetched events into section items.
///
/// An empty input yields a single [`ActivitySectionItem::Empty`]. Otherwise events
/// without a known kind are dropped and the rest keep their relative order.
pub fn classify(events: &[Event]) -> Vec<ActivitySectionItem> {
    if events.is_empty() {
        return vec![ActivitySectionItem::Empty];
    }
    events
        .iter()
        .filter_map(|event| {
            event
                .kind
                .map(|kind| ActivitySectionItem::from_kind(kind, event.clone()))
        })
        .collect()
}

/// Appends `incoming` to `existing`, dropping placeholders from both sides.
/// The merged list falls back to a single placeholder only when nothing real remains.
pub(crate) fn append_items(
    existing: &mut Vec<ActivitySectionItem>,
    incoming: Vec<ActivitySectionItem>,
) {
    existing.retain(|item| !item.is_empty_placeholder());
    existing.extend(
        incoming
            .into_iter()
            .filter(|item| !item.is_empty_placeholder()),
    );
    if existing.is_empty() {
        existing.push(ActivitySectionItem::Empty);
    }
}
