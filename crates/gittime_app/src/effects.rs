use std::time::Duration;

use gittime_core::{Effect, FetchFailure, Msg};
use gittime_engine::{EngineEvent, EngineHandle};
use gittime_logging::{gittime_debug, gittime_warn};

/// Turns reducer effects into engine commands and engine events back into messages.
pub struct EffectRunner {
    engine: EngineHandle,
}

impl EffectRunner {
    pub fn new(engine: EngineHandle) -> Self {
        Self { engine }
    }

    pub fn run(&self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::FetchContributions { ticket, target } => {
                    gittime_debug!("FetchContributions ticket={:?} target={:?}", ticket, target);
                    self.engine.fetch_contributions(ticket, target);
                }
                Effect::FetchActivities {
                    ticket,
                    target,
                    page,
                    per_page,
                } => {
                    gittime_debug!(
                        "FetchActivities ticket={:?} target={:?} page={} per_page={}",
                        ticket,
                        target,
                        page,
                        per_page
                    );
                    self.engine.fetch_activities(ticket, target, page, per_page);
                }
                Effect::CancelSession { session } => {
                    self.engine.cancel_session(session);
                }
            }
        }
    }

    /// Waits up to `wait` for the next completed fetch.
    pub fn next_msg(&self, wait: Duration) -> Option<Msg> {
        self.engine.recv_timeout(wait).map(to_msg)
    }
}

fn to_msg(event: EngineEvent) -> Msg {
    match event {
        EngineEvent::ContributionsFetched { ticket, result } => Msg::ContributionsLoaded {
            ticket,
            result: result.map_err(|err| {
                gittime_warn!("Contribution fetch {:?} failed: {}", ticket, err);
                FetchFailure::from(err)
            }),
        },
        EngineEvent::ActivitiesFetched { ticket, result } => Msg::ActivitiesLoaded {
            ticket,
            result: result.map_err(|err| {
                gittime_warn!("Activity fetch {:?} failed: {}", ticket, err);
                FetchFailure::from(err)
            }),
        },
    }
}
