use std::sync::Once;

use gittime_core::{
    update, ActivityPage, ActivitySectionItem, ActivityState, Contribution, ContributionInfo,
    Effect, Event, EventKind, FetchFailure, FetchTarget, Msg, Ticket, Viewer, PAGE_SIZE,
};
use pretty_assertions::assert_eq;

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(gittime_logging::initialize_for_tests);
}

fn push_events(prefix: &str, count: usize) -> Vec<Event> {
    (0..count)
        .map(|i| Event::new(Some(EventKind::Push), format!("{prefix}{i}")))
        .collect()
}

fn item_ids(state: &ActivityState) -> Vec<String> {
    state
        .activities()
        .iter()
        .filter_map(ActivitySectionItem::event)
        .map(|event| event.id.clone())
        .collect()
}

fn contributions_ticket(effects: &[Effect]) -> Ticket {
    effects
        .iter()
        .find_map(|effect| match effect {
            Effect::FetchContributions { ticket, .. } => Some(*ticket),
            _ => None,
        })
        .expect("contribution fetch effect")
}

fn activities_request(effects: &[Effect]) -> (Ticket, u32) {
    effects
        .iter()
        .find_map(|effect| match effect {
            Effect::FetchActivities { ticket, page, .. } => Some((*ticket, *page)),
            _ => None,
        })
        .expect("activity fetch effect")
}

fn sample_info(total: u64) -> ContributionInfo {
    ContributionInfo::new(
        total,
        vec![Contribution {
            date: "20230101".to_string(),
            count: 1,
            color_hex: "#9be9a8".to_string(),
        }],
    )
}

fn signed_in(name: &str) -> ActivityState {
    let (state, effects) = update(ActivityState::new(), Msg::ViewerChanged(Viewer::user(name)));
    assert!(effects.is_empty());
    state
}

/// Runs FirstLoad through both fetches and returns the settled state.
fn first_load_with(
    state: ActivityState,
    contributions: Result<ContributionInfo, FetchFailure>,
    page: Result<ActivityPage, FetchFailure>,
) -> ActivityState {
    let (state, effects) = update(state, Msg::FirstLoad);
    let ticket = contributions_ticket(&effects);
    let (state, effects) = update(
        state,
        Msg::ContributionsLoaded {
            ticket,
            result: contributions,
        },
    );
    let (ticket, requested) = activities_request(&effects);
    assert_eq!(requested, 1);
    let (state, effects) = update(state, Msg::ActivitiesLoaded { ticket, result: page });
    assert!(effects.is_empty());
    state
}

#[test]
fn first_load_fetches_contributions_before_activities() {
    init_logging();
    let state = signed_in("octocat");

    let (state, effects) = update(state, Msg::FirstLoad);
    let ticket = contributions_ticket(&effects);
    assert_eq!(
        effects,
        vec![Effect::FetchContributions {
            ticket,
            target: FetchTarget::Live {
                user_name: "octocat".to_string()
            },
        }]
    );
    // Loading only brackets the activity fetch.
    assert!(!state.pagination().is_loading);
    assert_eq!(state.pagination().page, 1);
    assert!(state.pagination().can_load_more);

    let (state, effects) = update(
        state,
        Msg::ContributionsLoaded {
            ticket,
            result: Ok(sample_info(42)),
        },
    );
    assert_eq!(state.contribution_info(), Some(&sample_info(42)));
    assert!(state.pagination().is_loading);
    let (activity_ticket, page) = activities_request(&effects);
    assert_eq!(page, 1);
    assert_eq!(activity_ticket.session, ticket.session);
    assert!(matches!(
        effects[0],
        Effect::FetchActivities {
            per_page: PAGE_SIZE,
            ..
        }
    ));
}

#[test]
fn full_page_then_short_page_scenario() {
    init_logging();
    let state = first_load_with(
        signed_in("octocat"),
        Ok(sample_info(42)),
        Ok(ActivityPage::new(push_events("a", 30))),
    );
    assert_eq!(state.pagination().page, 2);
    assert!(state.pagination().can_load_more);
    assert!(!state.pagination().is_loading);
    assert_eq!(state.activities().len(), 30);
    let first_ids = item_ids(&state);

    let (state, effects) = update(state, Msg::LoadMore);
    assert!(!state.pagination().can_load_more);
    assert!(state.pagination().is_loading);
    let (ticket, page) = activities_request(&effects);
    assert_eq!(page, 2);

    let (state, _) = update(
        state,
        Msg::ActivitiesLoaded {
            ticket,
            result: Ok(ActivityPage::new(push_events("b", 10))),
        },
    );
    assert_eq!(state.pagination().page, 2);
    assert!(!state.pagination().can_load_more);
    assert_eq!(state.activities().len(), 40);
    let ids = item_ids(&state);
    assert_eq!(&ids[..30], first_ids.as_slice());
    assert_eq!(ids[30], "b0");
    assert_eq!(ids[39], "b9");
}

#[test]
fn load_more_is_noop_without_more_pages() {
    init_logging();
    let state = first_load_with(
        signed_in("octocat"),
        Ok(sample_info(1)),
        Ok(ActivityPage::new(push_events("a", 3))),
    );
    assert!(!state.pagination().can_load_more);

    let (next, effects) = update(state.clone(), Msg::LoadMore);
    assert_eq!(next, state);
    assert!(effects.is_empty());
}

#[test]
fn actions_are_noop_while_loading() {
    init_logging();
    let state = first_load_with(
        signed_in("octocat"),
        Ok(sample_info(1)),
        Ok(ActivityPage::new(push_events("a", 30))),
    );
    let (state, _) = update(state, Msg::LoadMore);
    assert!(state.pagination().is_loading);

    for msg in [Msg::LoadMore, Msg::FirstLoad, Msg::Refresh, Msg::Retry] {
        let (next, effects) = update(state.clone(), msg);
        assert_eq!(next, state);
        assert!(effects.is_empty());
    }
}

#[test]
fn load_more_waits_for_first_page_behind_summary() {
    init_logging();
    let state = first_load_with(
        signed_in("octocat"),
        Ok(sample_info(1)),
        Ok(ActivityPage::new(push_events("old", 30))),
    );

    for restart in [Msg::FirstLoad, Msg::Refresh] {
        let (state, effects) = update(state.clone(), restart);
        let ticket = contributions_ticket(&effects);
        assert!(state.pagination().can_load_more);

        let (next, effects) = update(state.clone(), Msg::LoadMore);
        assert_eq!(next, state);
        assert!(effects.is_empty());

        let (state, effects) = update(
            state,
            Msg::ContributionsLoaded {
                ticket,
                result: Ok(sample_info(2)),
            },
        );
        let (ticket, page) = activities_request(&effects);
        assert_eq!(page, 1);

        let (state, _) = update(
            state,
            Msg::ActivitiesLoaded {
                ticket,
                result: Ok(ActivityPage::new(push_events("p1_", 30))),
            },
        );
        assert_eq!(state.pagination().page, 2);
        let ids = item_ids(&state);
        assert_eq!(ids.len(), 30);
        assert_eq!(ids[0], "p1_0");
    }
}

#[test]
fn refresh_resets_page_and_toggles_refreshing() {
    init_logging();
    let state = first_load_with(
        signed_in("octocat"),
        Ok(sample_info(1)),
        Ok(ActivityPage::new(push_events("a", 30))),
    );
    let (state, effects) = update(state, Msg::LoadMore);
    let (ticket, _) = activities_request(&effects);
    let (state, _) = update(
        state,
        Msg::ActivitiesLoaded {
            ticket,
            result: Ok(ActivityPage::new(push_events("b", 30))),
        },
    );
    assert_eq!(state.pagination().page, 3);

    let (state, effects) = update(state, Msg::Refresh);
    assert!(state.pagination().is_refreshing);
    assert_eq!(state.pagination().page, 1);

    let (next, no_effects) = update(state.clone(), Msg::Refresh);
    assert_eq!(next, state);
    assert!(no_effects.is_empty());

    let ticket = contributions_ticket(&effects);
    let (state, effects) = update(
        state,
        Msg::ContributionsLoaded {
            ticket,
            result: Ok(sample_info(7)),
        },
    );
    let (ticket, page) = activities_request(&effects);
    assert_eq!(page, 1);
    assert!(state.pagination().is_refreshing);

    let (state, _) = update(
        state,
        Msg::ActivitiesLoaded {
            ticket,
            result: Ok(ActivityPage::new(push_events("c", 5))),
        },
    );
    assert!(!state.pagination().is_refreshing);
    assert_eq!(state.pagination().page, 1);
    assert_eq!(item_ids(&state), vec!["c0", "c1", "c2", "c3", "c4"]);
    assert_eq!(state.contribution_info(), Some(&sample_info(7)));
}

#[test]
fn failed_contribution_fetch_keeps_previous_summary() {
    init_logging();
    let state = first_load_with(
        signed_in("octocat"),
        Ok(sample_info(42)),
        Ok(ActivityPage::new(push_events("a", 2))),
    );

    let (state, effects) = update(state, Msg::Refresh);
    let ticket = contributions_ticket(&effects);
    let (state, effects) = update(
        state,
        Msg::ContributionsLoaded {
            ticket,
            result: Err(FetchFailure::Network("blocked".to_string())),
        },
    );
    assert_eq!(state.contribution_info(), Some(&sample_info(42)));
    // The chain still continues with the activity page.
    let (_, page) = activities_request(&effects);
    assert_eq!(page, 1);
}

#[test]
fn fallback_summary_is_taken_verbatim() {
    init_logging();
    let fallback = ContributionInfo::new(10, Vec::new());
    let state = first_load_with(
        signed_in("octocat"),
        Ok(fallback.clone()),
        Ok(ActivityPage::new(push_events("a", 1))),
    );
    assert_eq!(state.contribution_info(), Some(&fallback));
}

#[test]
fn failed_first_page_shows_placeholder_and_stalls() {
    init_logging();
    let state = first_load_with(
        signed_in("octocat"),
        Ok(sample_info(1)),
        Err(FetchFailure::Network("http status 502".to_string())),
    );
    assert_eq!(state.activities(), &[ActivitySectionItem::Empty]);
    assert!(!state.pagination().can_load_more);
    assert!(state.pagination().stalled);
    assert_eq!(state.pagination().page, 1);

    let view = state.view();
    assert!(view.stalled);
    assert!(view.shows_placeholder());
    assert_eq!(view.activity_count, 0);
    assert_eq!(
        view.last_failure.as_deref(),
        Some("network error: http status 502")
    );
}

#[test]
fn failed_load_more_keeps_items_and_retry_resumes_same_page() {
    init_logging();
    let state = first_load_with(
        signed_in("octocat"),
        Ok(sample_info(1)),
        Ok(ActivityPage::new(push_events("a", 30))),
    );
    let (state, effects) = update(state, Msg::LoadMore);
    let (ticket, _) = activities_request(&effects);
    let (state, _) = update(
        state,
        Msg::ActivitiesLoaded {
            ticket,
            result: Err(FetchFailure::Network("timeout".to_string())),
        },
    );
    assert_eq!(state.activities().len(), 30);
    assert_eq!(state.pagination().page, 2);
    assert!(state.pagination().stalled);
    assert!(!state.pagination().can_load_more);

    let (state, effects) = update(state, Msg::Retry);
    assert!(!state.pagination().stalled);
    let (ticket, page) = activities_request(&effects);
    assert_eq!(page, 2);

    let (state, _) = update(
        state,
        Msg::ActivitiesLoaded {
            ticket,
            result: Ok(ActivityPage::new(push_events("b", 4))),
        },
    );
    assert_eq!(state.activities().len(), 34);
    assert!(state.last_failure().is_none());
}

#[test]
fn retry_without_stall_is_noop() {
    init_logging();
    let state = signed_in("octocat");
    let (next, effects) = update(state.clone(), Msg::Retry);
    assert_eq!(next, state);
    assert!(effects.is_empty());
}

#[test]
fn unknown_events_are_dropped_but_count_towards_paging() {
    init_logging();
    let mut events = push_events("a", 29);
    events.insert(5, Event::new(None, "unknown"));
    let state = first_load_with(
        signed_in("octocat"),
        Ok(sample_info(1)),
        Ok(ActivityPage::new(events)),
    );
    assert_eq!(state.activities().len(), 29);
    assert!(state
        .activities()
        .iter()
        .all(|item| item.kind() == Some(EventKind::Push)));
    assert!(state.pagination().can_load_more);
    assert_eq!(state.pagination().page, 2);
}

#[test]
fn empty_first_page_shows_single_placeholder() {
    init_logging();
    let state = first_load_with(
        signed_in("octocat"),
        Ok(sample_info(0)),
        Ok(ActivityPage::new(Vec::new())),
    );
    assert_eq!(state.activities(), &[ActivitySectionItem::Empty]);
    assert!(!state.pagination().can_load_more);
}

#[test]
fn trial_viewer_uses_bundled_data_and_stops_paging() {
    init_logging();
    let (state, _) = update(ActivityState::new(), Msg::ViewerChanged(Viewer::Trial));
    let (state, effects) = update(state, Msg::FirstLoad);
    assert!(matches!(
        effects[0],
        Effect::FetchContributions {
            target: FetchTarget::Trial,
            ..
        }
    ));
    let ticket = contributions_ticket(&effects);
    let (state, effects) = update(
        state,
        Msg::ContributionsLoaded {
            ticket,
            result: Ok(sample_info(3)),
        },
    );
    let (ticket, _) = activities_request(&effects);
    let (state, _) = update(
        state,
        Msg::ActivitiesLoaded {
            ticket,
            result: Ok(ActivityPage::exhaustive(push_events("t", 30))),
        },
    );
    assert_eq!(state.activities().len(), 30);
    assert_eq!(state.pagination().page, 1);
    assert!(!state.pagination().can_load_more);
}

#[test]
fn nobody_signed_in_fetches_nothing() {
    init_logging();
    let state = ActivityState::new();

    let (state, effects) = update(state, Msg::FirstLoad);
    assert!(effects.is_empty());
    assert!(state.is_settled());

    let (state, effects) = update(state, Msg::Refresh);
    assert!(effects.is_empty());
    assert!(!state.pagination().is_refreshing);

    let (state, effects) = update(state, Msg::LoadMore);
    assert!(effects.is_empty());
    assert!(!state.pagination().can_load_more);
}

#[test]
fn restored_summary_never_overwrites_fresh_data() {
    init_logging();
    let (state, _) = update(
        signed_in("octocat"),
        Msg::RestoreContributions(sample_info(5)),
    );
    assert_eq!(state.contribution_info(), Some(&sample_info(5)));

    let state = first_load_with(
        state,
        Ok(sample_info(9)),
        Ok(ActivityPage::new(push_events("a", 1))),
    );
    let (state, _) = update(state, Msg::RestoreContributions(sample_info(5)));
    assert_eq!(state.contribution_info(), Some(&sample_info(9)));
}
