use super::event::AppEvent;
use super::model::AppState;
use thiserror::Error;

pub type StateResult<T> = std::result::Result<T, StateError>;

#[derive(Debug, Error)]
pub enum StateError {
    #[error("launcher cannot handle {event:?} while {from:?}")]
    InvalidStateTransition { from: AppState, event: AppEvent },
}
