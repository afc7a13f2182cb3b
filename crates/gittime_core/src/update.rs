use gittime_logging::gittime_debug;

use crate::{ActivityState, Effect, Msg, PaginationState, StateConflict};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: ActivityState, msg: Msg) -> (ActivityState, Vec<Effect>) {
    if let Err(conflict) = guard(&msg, &state) {
        gittime_debug!("{msg:?} ignored: {conflict}");
        return (state, Vec::new());
    }

    let effects = match msg {
        Msg::ViewerChanged(viewer) => {
            if *state.viewer() == viewer {
                return (state, Vec::new());
            }
            state
                .switch_viewer(viewer)
                .map(|session| Effect::CancelSession { session })
                .into_iter()
                .collect()
        }
        Msg::FirstLoad => state.start_chain(false),
        Msg::Refresh => state.start_chain(true),
        Msg::LoadMore => state.request_more(),
        Msg::Retry => state.retry(),
        Msg::ContributionsLoaded { ticket, result } => {
            if !state.accepts_contributions(ticket) {
                gittime_debug!("dropping stale contribution result {ticket:?}");
                return (state, Vec::new());
            }
            state.apply_contributions(result)
        }
        Msg::ActivitiesLoaded { ticket, result } => {
            match state.take_activity_request(ticket) {
                Some(mode) => state.apply_activities(mode, result),
                None => {
                    gittime_debug!("dropping stale activity result {ticket:?}");
                }
            }
            Vec::new()
        }
        Msg::RestoreContributions(info) => {
            state.restore_contributions(info);
            Vec::new()
        }
        Msg::NoOp => Vec::new(),
    };

    (state, effects)
}

/// Mutual-exclusion rules for user actions. Engine results are never guarded here.
fn guard(msg: &Msg, state: &ActivityState) -> Result<(), StateConflict> {
    let pagination = state.pagination();
    match msg {
        Msg::FirstLoad => not_loading(pagination),
        Msg::LoadMore => {
            not_loading(pagination)?;
            // Page one of a first load or refresh is still pending behind the summary.
            if state.awaiting_summary() {
                return Err(StateConflict::AlreadyLoading);
            }
            if pagination.can_load_more {
                Ok(())
            } else {
                Err(StateConflict::NoMorePages)
            }
        }
        Msg::Refresh => {
            not_loading(pagination)?;
            if pagination.is_refreshing {
                Err(StateConflict::AlreadyRefreshing)
            } else {
                Ok(())
            }
        }
        Msg::Retry => {
            not_loading(pagination)?;
            if pagination.stalled {
                Ok(())
            } else {
                Err(StateConflict::NotStalled)
            }
        }
        _ => Ok(()),
    }
}

fn not_loading(pagination: &PaginationState) -> Result<(), StateConflict> {
    if pagination.is_loading {
        Err(StateConflict::AlreadyLoading)
    } else {
        Ok(())
    }
}
