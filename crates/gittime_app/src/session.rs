use std::sync::mpsc;
use std::time::{Duration, Instant};

use gittime_core::{update, ActivityState, ActivityViewModel, Msg};

use crate::effects::EffectRunner;

const POLL: Duration = Duration::from_millis(50);

/// Owns the reducer state and feeds it messages from the caller and the engine.
///
/// State is readable on demand through [`SessionDriver::current`] and pushed to every
/// [`SessionDriver::subscribe`] receiver whenever a message changes it.
pub struct SessionDriver {
    state: ActivityState,
    runner: EffectRunner,
    subscribers: Vec<mpsc::Sender<ActivityViewModel>>,
}

impl SessionDriver {
    pub fn new(runner: EffectRunner) -> Self {
        Self {
            state: ActivityState::new(),
            runner,
            subscribers: Vec::new(),
        }
    }

    pub fn dispatch(&mut self, msg: Msg) {
        let state = std::mem::take(&mut self.state);
        let (mut state, effects) = update(state, msg);
        let view = state.view();
        let was_dirty = state.consume_dirty();
        self.state = state;

        self.runner.run(effects);
        if was_dirty {
            self.publish(view);
        }
    }

    pub fn current(&self) -> ActivityViewModel {
        self.state.view()
    }

    pub fn subscribe(&mut self) -> mpsc::Receiver<ActivityViewModel> {
        let (tx, rx) = mpsc::channel();
        self.subscribers.push(tx);
        rx
    }

    /// Dispatches at most one engine result. Returns whether one arrived.
    pub fn pump(&mut self, wait: Duration) -> bool {
        match self.runner.next_msg(wait) {
            Some(msg) => {
                self.dispatch(msg);
                true
            }
            None => false,
        }
    }

    /// Pumps until no fetch of the current session is outstanding.
    /// Returns false if `timeout` elapsed first.
    pub fn settle(&mut self, timeout: Duration) -> bool {
        let deadline = Instant::now() + timeout;
        while !self.state.is_settled() {
            let now = Instant::now();
            if now >= deadline {
                return false;
            }
            self.pump(POLL.min(deadline - now));
        }
        true
    }

    fn publish(&mut self, view: ActivityViewModel) {
        self.subscribers.retain(|tx| tx.send(view.clone()).is_ok());
    }
}
