use std::collections::HashMap;
use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

use gittime_core::{ActivityPage, FetchTarget, SessionId, Ticket};
use gittime_logging::{gittime_debug, gittime_info};
use tokio::runtime::Runtime;
use tokio_util::sync::CancellationToken;

use crate::contributions::{ContributionScraper, ContributionSource};
use crate::events::{EventSource, GithubEventSource};
use crate::fetch::{FetchSettings, HttpClient};
use crate::{trial, EngineEvent, FetchError};

#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("failed to start engine runtime: {0}")]
    Runtime(#[from] std::io::Error),
    #[error("failed to build http client: {0}")]
    Client(#[from] FetchError),
}

/// The live sources an engine talks to. Trial targets never reach them.
#[derive(Clone)]
pub struct Sources {
    pub events: Arc<dyn EventSource>,
    pub contributions: Arc<dyn ContributionSource>,
}

impl Sources {
    pub fn live(settings: &FetchSettings) -> Result<Self, FetchError> {
        let http = HttpClient::new(settings)?;
        Ok(Self {
            events: Arc::new(GithubEventSource::new(http.clone(), settings)),
            contributions: Arc::new(ContributionScraper::from_settings(http, settings)),
        })
    }
}

enum FetchJob {
    Contributions {
        ticket: Ticket,
        target: FetchTarget,
    },
    Activities {
        ticket: Ticket,
        target: FetchTarget,
        page: u32,
        per_page: u32,
    },
}

impl FetchJob {
    fn session(&self) -> SessionId {
        match self {
            FetchJob::Contributions { ticket, .. } | FetchJob::Activities { ticket, .. } => {
                ticket.session
            }
        }
    }
}

enum EngineCommand {
    Fetch(FetchJob),
    Cancel { session: SessionId },
}

/// Runs fetches on a private tokio runtime and reports results over a channel.
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
    event_rx: mpsc::Receiver<EngineEvent>,
}

impl EngineHandle {
    pub fn new(settings: &FetchSettings) -> Result<Self, EngineError> {
        Self::with_sources(Sources::live(settings)?)
    }

    pub fn with_sources(sources: Sources) -> Result<Self, EngineError> {
        let runtime = Runtime::new()?;
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();

        thread::Builder::new()
            .name("gittime-engine".to_string())
            .spawn(move || run_commands(runtime, sources, cmd_rx, event_tx))?;

        Ok(Self { cmd_tx, event_rx })
    }

    pub fn fetch_contributions(&self, ticket: Ticket, target: FetchTarget) {
        self.send(EngineCommand::Fetch(FetchJob::Contributions { ticket, target }));
    }

    pub fn fetch_activities(&self, ticket: Ticket, target: FetchTarget, page: u32, per_page: u32) {
        self.send(EngineCommand::Fetch(FetchJob::Activities {
            ticket,
            target,
            page,
            per_page,
        }));
    }

    /// In-flight fetches of `session` finish silently without reporting.
    pub fn cancel_session(&self, session: SessionId) {
        self.send(EngineCommand::Cancel { session });
    }

    pub fn recv_timeout(&self, wait: Duration) -> Option<EngineEvent> {
        self.event_rx.recv_timeout(wait).ok()
    }

    fn send(&self, command: EngineCommand) {
        let _ = self.cmd_tx.send(command);
    }
}

fn run_commands(
    runtime: Runtime,
    sources: Sources,
    cmd_rx: mpsc::Receiver<EngineCommand>,
    event_tx: mpsc::Sender<EngineEvent>,
) {
    let mut sessions: HashMap<SessionId, CancellationToken> = HashMap::new();

    while let Ok(command) = cmd_rx.recv() {
        match command {
            EngineCommand::Cancel { session } => {
                if let Some(token) = sessions.remove(&session) {
                    gittime_debug!("cancelling fetches of session {session}");
                    token.cancel();
                }
            }
            EngineCommand::Fetch(job) => {
                let session = job.session();
                // Only the newest session may have work in flight.
                sessions.retain(|&older, token| {
                    let keep = older >= session;
                    if !keep {
                        token.cancel();
                    }
                    keep
                });
                let token = sessions
                    .entry(session)
                    .or_insert_with(CancellationToken::new)
                    .clone();
                let sources = sources.clone();
                let event_tx = event_tx.clone();
                runtime.spawn(async move {
                    tokio::select! {
                        _ = token.cancelled() => {
                            gittime_debug!("dropped fetch of cancelled session {session}");
                        }
                        event = run_job(&sources, job) => {
                            let _ = event_tx.send(event);
                        }
                    }
                });
            }
        }
    }
    gittime_info!("engine command channel closed; shutting down");
}

async fn run_job(sources: &Sources, job: FetchJob) -> EngineEvent {
    match job {
        FetchJob::Contributions { ticket, target } => {
            let result = match target {
                FetchTarget::Trial => trial::trial_contributions(),
                FetchTarget::Live { user_name } => {
                    sources.contributions.fetch_summary(&user_name).await
                }
            };
            EngineEvent::ContributionsFetched { ticket, result }
        }
        FetchJob::Activities {
            ticket,
            target,
            page,
            per_page,
        } => {
            let result = match target {
                FetchTarget::Trial => trial::trial_page(),
                FetchTarget::Live { user_name } => {
                    gittime_debug!("fetching events of {user_name}, page {page}");
                    sources
                        .events
                        .fetch_page(&user_name, page, per_page)
                        .await
                        .map(ActivityPage::new)
                }
            };
            EngineEvent::ActivitiesFetched { ticket, result }
        }
    }
}
