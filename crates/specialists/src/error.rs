//! Specialist error types.

use thiserror::Error;

use crate::kind::SpecialistKind;

/// Ways a single specialist call can fail.
#[derive(Debug, Clone, Error)]
pub enum SpecialistError {
    /// The request never produced a response (connection refused, DNS, TLS...).
    #[error("{specialist} request failed: {message}")]
    Transport {
        specialist: SpecialistKind,
        message: String,
    },

    /// The service answered with a non-success status code.
    #[error("{specialist} returned status {status}")]
    Status {
        specialist: SpecialistKind,
        status: u16,
    },

    /// The response body could not be decoded into the expected shape.
    #[error("{specialist} returned an unreadable payload: {message}")]
    Decode {
        specialist: SpecialistKind,
        message: String,
    },

    /// No answer arrived within the per-call bound.
    #[error("{specialist} did not answer within {timeout_ms} ms")]
    Timeout {
        specialist: SpecialistKind,
        timeout_ms: u64,
    },

    /// The orchestration run was cancelled before the call completed.
    #[error("{specialist} call cancelled")]
    Cancelled { specialist: SpecialistKind },

    /// The service refused to serve the request.
    #[error("{specialist} unavailable: {reason}")]
    Unavailable {
        specialist: SpecialistKind,
        reason: String,
    },
}

impl SpecialistError {
    /// Returns the capability that failed.
    pub fn specialist(&self) -> SpecialistKind {
        match self {
            SpecialistError::Transport { specialist, .. }
            | SpecialistError::Status { specialist, .. }
            | SpecialistError::Decode { specialist, .. }
            | SpecialistError::Timeout { specialist, .. }
            | SpecialistError::Cancelled { specialist }
            | SpecialistError::Unavailable { specialist, .. } => *specialist,
        }
    }

    /// Short failure class, used as a metric label.
    pub fn reason(&self) -> &'static str {
        match self {
            SpecialistError::Transport { .. } => "transport",
            SpecialistError::Status { .. } => "status",
            SpecialistError::Decode { .. } => "decode",
            SpecialistError::Timeout { .. } => "timeout",
            SpecialistError::Cancelled { .. } => "cancelled",
            SpecialistError::Unavailable { .. } => "unavailable",
        }
    }
}

/// Convenience type alias for specialist results.
pub type Result<T> = std::result::Result<T, SpecialistError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_specialist_and_reason() {
        let err = SpecialistError::Timeout {
            specialist: SpecialistKind::Location,
            timeout_ms: 250,
        };
        assert_eq!(err.specialist(), SpecialistKind::Location);
        assert_eq!(err.reason(), "timeout");
        assert_eq!(err.to_string(), "location did not answer within 250 ms");
    }

    #[test]
    fn test_status_display() {
        let err = SpecialistError::Status {
            specialist: SpecialistKind::Search,
            status: 503,
        };
        assert_eq!(err.to_string(), "search returned status 503");
    }
}
