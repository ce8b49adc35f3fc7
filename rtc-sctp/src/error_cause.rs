use crate::socket::ErrorKind;

use std::fmt;

/// ErrorCauseCode is a cause code that appears in either a ERROR or ABORT chunk
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default)]
pub struct ErrorCauseCode(pub u16);

impl ErrorCauseCode {
    pub const INVALID_STREAM_IDENTIFIER: ErrorCauseCode = ErrorCauseCode(1);
    pub const MISSING_MANDATORY_PARAMETER: ErrorCauseCode = ErrorCauseCode(2);
    pub const STALE_COOKIE_ERROR: ErrorCauseCode = ErrorCauseCode(3);
    pub const OUT_OF_RESOURCE: ErrorCauseCode = ErrorCauseCode(4);
    pub const UNRESOLVABLE_ADDRESS: ErrorCauseCode = ErrorCauseCode(5);
    pub const UNRECOGNIZED_CHUNK_TYPE: ErrorCauseCode = ErrorCauseCode(6);
    pub const INVALID_MANDATORY_PARAMETER: ErrorCauseCode = ErrorCauseCode(7);
    pub const UNRECOGNIZED_PARAMETERS: ErrorCauseCode = ErrorCauseCode(8);
    pub const NO_USER_DATA: ErrorCauseCode = ErrorCauseCode(9);
    pub const COOKIE_RECEIVED_WHILE_SHUTTING_DOWN: ErrorCauseCode = ErrorCauseCode(10);
    pub const RESTART_OF_AN_ASSOCIATION_WITH_NEW_ADDRESSES: ErrorCauseCode = ErrorCauseCode(11);
    pub const USER_INITIATED_ABORT: ErrorCauseCode = ErrorCauseCode(12);
    pub const PROTOCOL_VIOLATION: ErrorCauseCode = ErrorCauseCode(13);

    /// from_error_kind returns the cause code matching a socket error kind.
    /// Not every kind has a matching cause code.
    pub fn from_error_kind(kind: ErrorKind) -> Option<Self> {
        match kind {
            ErrorKind::ParseFailed => Some(Self::UNRECOGNIZED_PARAMETERS),
            ErrorKind::PeerReported => Some(Self::USER_INITIATED_ABORT),
            ErrorKind::WrongSequence | ErrorKind::ProtocolViolation => {
                Some(Self::PROTOCOL_VIOLATION)
            }
            ErrorKind::ResourceExhaustion => Some(Self::OUT_OF_RESOURCE),
            ErrorKind::TooManyRetries
            | ErrorKind::UnsupportedOperation
            | ErrorKind::NoError
            | ErrorKind::NotConnected => None,
        }
    }
}

impl fmt::Display for ErrorCauseCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let others = format!("Unknown CauseCode: {}", self.0);
        let s = match *self {
            Self::INVALID_STREAM_IDENTIFIER => "Invalid Stream Identifier",
            Self::MISSING_MANDATORY_PARAMETER => "Missing Mandatory Parameter",
            Self::STALE_COOKIE_ERROR => "Stale Cookie Error",
            Self::OUT_OF_RESOURCE => "Out Of Resource",
            Self::UNRESOLVABLE_ADDRESS => "Unresolvable IP",
            Self::UNRECOGNIZED_CHUNK_TYPE => "Unrecognized Chunk Type",
            Self::INVALID_MANDATORY_PARAMETER => "Invalid Mandatory Parameter",
            Self::UNRECOGNIZED_PARAMETERS => "Unrecognized Parameters",
            Self::NO_USER_DATA => "No User Data",
            Self::COOKIE_RECEIVED_WHILE_SHUTTING_DOWN => "Cookie Received While Shutting Down",
            Self::RESTART_OF_AN_ASSOCIATION_WITH_NEW_ADDRESSES => {
                "Restart Of An Association With New Addresses"
            }
            Self::USER_INITIATED_ABORT => "User Initiated Abort",
            Self::PROTOCOL_VIOLATION => "Protocol Violation",
            _ => others.as_str(),
        };
        write!(f, "{s}")
    }
}
