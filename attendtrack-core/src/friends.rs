use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The stored state of a friend request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FriendStatus {
    Pending,
    Accepted,
}

/// Something that can happen to a friend request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FriendAction {
    Add,
    Accept,
    Reject,
}

/// What should happen to the stored friend record after an action
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FriendOutcome {
    Store(FriendStatus),
    Remove,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum FriendError {
    #[error("Cannot {action:?} a friend request in state {state:?}")]
    InvalidTransition {
        state: Option<FriendStatus>,
        action: FriendAction,
    },
}

/// Applies an action to a friend request.
///
/// `None` is the state of not being friends at all.
/// Adding an existing friend is allowed and yields a new pending request, since duplicates are not reconciled.
pub fn transition(
    state: Option<FriendStatus>,
    action: FriendAction,
) -> Result<FriendOutcome, FriendError> {
    match (state, action) {
        (_, FriendAction::Add) => Ok(FriendOutcome::Store(FriendStatus::Pending)),
        (Some(FriendStatus::Pending), FriendAction::Accept) => {
            Ok(FriendOutcome::Store(FriendStatus::Accepted))
        }
        (Some(FriendStatus::Pending), FriendAction::Reject) => Ok(FriendOutcome::Remove),
        (state, action) => Err(FriendError::InvalidTransition { state, action }),
    }
}
