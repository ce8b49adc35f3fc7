#![allow(dead_code)]

use std::fmt;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// ErrorType is the category of an [Error].
///
/// Callers above the data channel transport usually only care about the
/// category of a failure, e.g. to decide whether a send may be retried after
/// the buffered amount goes low.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum ErrorType {
    /// Operation is illegal in the current lifecycle state
    InvalidState,
    /// An argument is out of bounds
    InvalidRange,
    /// Transient send-buffer pressure
    ResourceExhausted,
    /// Unrecoverable association or transport failure
    NetworkError,
    /// Anything else
    OperationError,
}

impl fmt::Display for ErrorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match *self {
            ErrorType::InvalidState => "INVALID_STATE",
            ErrorType::InvalidRange => "INVALID_RANGE",
            ErrorType::ResourceExhausted => "RESOURCE_EXHAUSTED",
            ErrorType::NetworkError => "NETWORK_ERROR",
            ErrorType::OperationError => "OPERATION_ERROR",
        };
        write!(f, "{s}")
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum Error {
    //Lifecycle errors
    #[error("SCTP transport is not started")]
    ErrSctpNotStarted,
    #[error("SCTP transport is closed")]
    ErrSctpTransportClosed,
    #[error("can't change SCTP ports on an already started transport")]
    ErrSctpPortsChanged,
    #[error("stream {0} is not open")]
    ErrStreamNotOpen(u16),
    #[error("stream {0} is closing")]
    ErrStreamClosing(u16),

    //Argument errors
    #[error("SCTP port must not be zero")]
    ErrInvalidSctpPort,
    #[error("message of {size} bytes exceeds the max message size of {max} bytes")]
    ErrMessageTooLarge { size: usize, max: usize },

    //Flow control errors
    #[error("send buffer is full")]
    ErrResourceExhausted,

    //Network errors
    #[error("network error: {0}")]
    ErrNetwork(String),
    #[error("SCTP failure: {message}")]
    ErrSctpFailure {
        message: String,
        /// SCTP error cause code, RFC 4960 section 3.3.10
        cause_code: Option<u16>,
    },
    #[error("lower transport is closed")]
    ErrTransportClosed,
    #[error("lower transport failed: {0}")]
    ErrTransportFailed(String),

    #[error("{0}")]
    Other(String),
}

impl Error {
    /// kind returns the category of the error
    pub fn kind(&self) -> ErrorType {
        match self {
            Error::ErrSctpNotStarted
            | Error::ErrSctpTransportClosed
            | Error::ErrSctpPortsChanged
            | Error::ErrStreamNotOpen(_)
            | Error::ErrStreamClosing(_) => ErrorType::InvalidState,
            Error::ErrInvalidSctpPort | Error::ErrMessageTooLarge { .. } => {
                ErrorType::InvalidRange
            }
            Error::ErrResourceExhausted => ErrorType::ResourceExhausted,
            Error::ErrNetwork(_)
            | Error::ErrSctpFailure { .. }
            | Error::ErrTransportClosed
            | Error::ErrTransportFailed(_) => ErrorType::NetworkError,
            Error::Other(_) => ErrorType::OperationError,
        }
    }

    /// sctp_cause_code returns the SCTP error cause code attached to an
    /// association failure, if any
    pub fn sctp_cause_code(&self) -> Option<u16> {
        if let Error::ErrSctpFailure { cause_code, .. } = self {
            *cause_code
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kind() {
        let tests = vec![
            (Error::ErrStreamNotOpen(1), ErrorType::InvalidState),
            (Error::ErrStreamClosing(1), ErrorType::InvalidState),
            (Error::ErrSctpPortsChanged, ErrorType::InvalidState),
            (Error::ErrSctpTransportClosed, ErrorType::InvalidState),
            (Error::ErrSctpNotStarted, ErrorType::InvalidState),
            (Error::ErrInvalidSctpPort, ErrorType::InvalidRange),
            (
                Error::ErrMessageTooLarge { size: 2, max: 1 },
                ErrorType::InvalidRange,
            ),
            (Error::ErrResourceExhausted, ErrorType::ResourceExhausted),
            (
                Error::ErrNetwork("closed".to_owned()),
                ErrorType::NetworkError,
            ),
            (Error::ErrTransportClosed, ErrorType::NetworkError),
            (Error::Other("other".to_owned()), ErrorType::OperationError),
        ];

        for (err, expected) in tests {
            assert_eq!(err.kind(), expected, "unexpected kind for {err}");
        }
    }

    #[test]
    fn test_sctp_cause_code() {
        let err = Error::ErrSctpFailure {
            message: "peer aborted".to_owned(),
            cause_code: Some(12),
        };
        assert_eq!(err.sctp_cause_code(), Some(12));
        assert_eq!(err.to_string(), "SCTP failure: peer aborted");
        assert_eq!(Error::ErrTransportClosed.sctp_cause_code(), None);
    }
}
