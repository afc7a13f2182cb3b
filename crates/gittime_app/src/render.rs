use std::fmt::Write;

use gittime_core::{ActivitySectionItem, ActivityViewModel, Viewer};

/// Plain-text report of one view model.
pub fn render(view: &ActivityViewModel) -> String {
    let mut out = String::new();

    let who = match &view.viewer {
        Viewer::Nobody => {
            out.push_str("No user configured. Pass --user NAME or --trial.\n");
            return out;
        }
        Viewer::Trial => "trial",
        Viewer::User { name } => name.as_str(),
    };

    match &view.contribution {
        Some(info) => {
            let _ = writeln!(
                out,
                "{who}: {} contributions in the last year ({} days recorded)",
                info.total_count,
                info.contributions.len()
            );
        }
        None => {
            let _ = writeln!(out, "{who}: contribution summary unavailable");
        }
    }

    let more = if view.can_load_more {
        "more available"
    } else {
        "no more pages"
    };
    let _ = writeln!(
        out,
        "Recent activity: {} items, page {}, {more}",
        view.activity_count, view.page
    );
    if view.stalled {
        let failure = view.last_failure.as_deref().unwrap_or("unknown error");
        let _ = writeln!(out, "Loading stopped: {failure}");
    }

    for item in &view.items {
        out.push_str(&render_item(item));
        out.push('\n');
    }
    out
}

fn render_item(item: &ActivitySectionItem) -> String {
    match (item.kind(), item.event()) {
        (Some(kind), Some(event)) => {
            let mut line = format!("  {:<14} {}", kind.label(), event.repo);
            if !event.created_at.is_empty() {
                let _ = write!(line, "  {}", event.created_at);
            }
            line
        }
        _ => "  (no recent activity)".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use gittime_core::{ContributionInfo, Event, EventKind};

    use super::*;

    fn event(kind: EventKind, repo: &str) -> Event {
        let mut event = Event::new(Some(kind), "1");
        event.repo = repo.to_string();
        event.created_at = "2024-01-01T00:00:00Z".to_string();
        event
    }

    #[test]
    fn report_lists_summary_and_items() {
        let view = ActivityViewModel {
            viewer: Viewer::user("octocat"),
            page: 2,
            can_load_more: true,
            contribution: Some(ContributionInfo::new(42, Vec::new())),
            items: vec![ActivitySectionItem::Push(event(EventKind::Push, "octocat/hello"))],
            activity_count: 1,
            ..ActivityViewModel::default()
        };

        let text = render(&view);
        assert!(text.starts_with("octocat: 42 contributions in the last year"));
        assert!(text.contains("1 items, page 2, more available"));
        assert!(text.contains("octocat/hello  2024-01-01T00:00:00Z"));
    }

    #[test]
    fn stalled_view_shows_failure_and_placeholder() {
        let view = ActivityViewModel {
            viewer: Viewer::Trial,
            stalled: true,
            last_failure: Some("network error: http status 502".to_string()),
            items: vec![ActivitySectionItem::Empty],
            ..ActivityViewModel::default()
        };

        let text = render(&view);
        assert!(text.contains("trial: contribution summary unavailable"));
        assert!(text.contains("Loading stopped: network error: http status 502"));
        assert!(text.contains("(no recent activity)"));
    }

    #[test]
    fn nobody_gets_a_hint() {
        let text = render(&ActivityViewModel::default());
        assert!(text.contains("--trial"));
    }
}
