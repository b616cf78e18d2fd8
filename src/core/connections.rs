use thiserror::Error;

use crate::models::{ConnectionStatus, Direction};

/// Maximum stored message length; longer input is silently truncated.
pub const MAX_MESSAGE_LEN: usize = 500;

/// Connection state-machine violations, mapped to HTTP statuses at the
/// route layer.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConnectionError {
    #[error("Cannot send request to yourself")]
    SelfRequest,

    #[error("Connection request already sent")]
    AlreadyPending,

    #[error("Already connected")]
    AlreadyConnected,

    #[error("Request already handled")]
    AlreadyHandled,

    #[error("status must be accepted or rejected")]
    InvalidDecision,
}

impl ConnectionError {
    pub fn status_code(&self) -> u16 {
        match self {
            ConnectionError::AlreadyPending | ConnectionError::AlreadyConnected => 409,
            ConnectionError::SelfRequest
            | ConnectionError::AlreadyHandled
            | ConnectionError::InvalidDecision => 400,
        }
    }
}

/// The two valid responses to a pending request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Accepted,
    Rejected,
}

impl Decision {
    /// Parse a wire value. Anything other than accepted/rejected is
    /// rejected before any record lookup happens.
    pub fn parse(s: &str) -> Result<Decision, ConnectionError> {
        match s {
            "accepted" => Ok(Decision::Accepted),
            "rejected" => Ok(Decision::Rejected),
            _ => Err(ConnectionError::InvalidDecision),
        }
    }

    pub fn as_status(&self) -> ConnectionStatus {
        match self {
            Decision::Accepted => ConnectionStatus::Accepted,
            Decision::Rejected => ConnectionStatus::Rejected,
        }
    }
}

/// Trim and truncate a request message to the storage limit.
/// Truncation is silent; the request is never rejected for length.
pub fn normalize_message(raw: &str) -> String {
    raw.trim().chars().take(MAX_MESSAGE_LEN).collect()
}

/// Gate a new (from, to) request.
///
/// `active` is the status of an existing active request for the exact
/// ordered pair, if any. Only pending/accepted block; a prior rejection
/// never does, so retries after rejection stay allowed.
pub fn validate_new_request(
    from_user_id: &str,
    to_user_id: &str,
    active: Option<ConnectionStatus>,
) -> Result<(), ConnectionError> {
    if from_user_id == to_user_id {
        return Err(ConnectionError::SelfRequest);
    }
    match active {
        Some(ConnectionStatus::Pending) => Err(ConnectionError::AlreadyPending),
        Some(ConnectionStatus::Accepted) => Err(ConnectionError::AlreadyConnected),
        Some(ConnectionStatus::Rejected) | None => Ok(()),
    }
}

/// Apply a decision to a request's current status.
/// Transitions are valid only from `Pending` and happen exactly once.
pub fn apply_decision(
    current: ConnectionStatus,
    decision: Decision,
) -> Result<ConnectionStatus, ConnectionError> {
    if current != ConnectionStatus::Pending {
        return Err(ConnectionError::AlreadyHandled);
    }
    Ok(decision.as_status())
}

/// Direction of a request relative to the listing user
#[inline]
pub fn direction_for(user_id: &str, from_user_id: &str) -> Direction {
    if from_user_id == user_id {
        Direction::Sent
    } else {
        Direction::Received
    }
}
