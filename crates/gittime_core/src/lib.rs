//! GitTime core: pure activity state machine, classifier and view-model helpers.
mod classify;
mod contribution;
mod effect;
mod error;
mod event;
mod msg;
mod pagination;
mod state;
mod update;
mod view_model;

pub use classify::{classify, ActivitySectionItem};
pub use contribution::{Contribution, ContributionInfo};
pub use effect::{Effect, FetchTarget, RequestId, SessionId, Ticket};
pub use error::{FetchFailure, StateConflict};
pub use event::{ActivityPage, Event, EventKind};
pub use msg::Msg;
pub use pagination::{PaginationState, INITIAL_PAGE, PAGE_SIZE};
pub use state::{ActivityState, Viewer};
pub use update::update;
pub use view_model::ActivityViewModel;
