use crate::message::DataMessageType;

use sctp::PpId;
use std::fmt;

/// PayloadProtocolIdentifier is an enum for DataChannel payload types
/// https://www.iana.org/assignments/sctp-parameters/sctp-parameters.xhtml#sctp-parameters-25
#[derive(Default, Debug, Copy, Clone, PartialEq, Eq)]
#[repr(C)]
pub enum PayloadProtocolIdentifier {
    Dcep = 50,
    String = 51,
    /// Deprecated, only accepted on receive
    BinaryPartial = 52,
    Binary = 53,
    /// Deprecated, only accepted on receive
    StringPartial = 54,
    StringEmpty = 56,
    BinaryEmpty = 57,
    #[default]
    Unknown,
}

impl fmt::Display for PayloadProtocolIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match *self {
            PayloadProtocolIdentifier::Dcep => "WebRTC DCEP",
            PayloadProtocolIdentifier::String => "WebRTC String",
            PayloadProtocolIdentifier::BinaryPartial => "WebRTC Binary Partial (Deprecated)",
            PayloadProtocolIdentifier::Binary => "WebRTC Binary",
            PayloadProtocolIdentifier::StringPartial => "WebRTC String Partial (Deprecated)",
            PayloadProtocolIdentifier::StringEmpty => "WebRTC String (Empty)",
            PayloadProtocolIdentifier::BinaryEmpty => "WebRTC Binary (Empty)",
            _ => "Unknown Payload Protocol Identifier",
        };
        write!(f, "{s}")
    }
}

impl From<u32> for PayloadProtocolIdentifier {
    fn from(v: u32) -> PayloadProtocolIdentifier {
        match v {
            50 => PayloadProtocolIdentifier::Dcep,
            51 => PayloadProtocolIdentifier::String,
            52 => PayloadProtocolIdentifier::BinaryPartial,
            53 => PayloadProtocolIdentifier::Binary,
            54 => PayloadProtocolIdentifier::StringPartial,
            56 => PayloadProtocolIdentifier::StringEmpty,
            57 => PayloadProtocolIdentifier::BinaryEmpty,
            _ => PayloadProtocolIdentifier::Unknown,
        }
    }
}

impl From<PpId> for PayloadProtocolIdentifier {
    fn from(ppid: PpId) -> PayloadProtocolIdentifier {
        PayloadProtocolIdentifier::from(ppid.0)
    }
}

impl PayloadProtocolIdentifier {
    /// is_empty reports whether the identifier marks a zero-length message
    /// whose single padding byte must be stripped on receive
    pub fn is_empty(&self) -> bool {
        matches!(
            self,
            PayloadProtocolIdentifier::StringEmpty | PayloadProtocolIdentifier::BinaryEmpty
        )
    }
}

/// to_ppid returns the identifier a message of `message_type` and `length`
/// bytes is sent with
pub fn to_ppid(message_type: DataMessageType, length: usize) -> PpId {
    let ppid = match message_type {
        DataMessageType::Text => {
            if length > 0 {
                PayloadProtocolIdentifier::String
            } else {
                PayloadProtocolIdentifier::StringEmpty
            }
        }
        DataMessageType::Binary => {
            if length > 0 {
                PayloadProtocolIdentifier::Binary
            } else {
                PayloadProtocolIdentifier::BinaryEmpty
            }
        }
        DataMessageType::Control => PayloadProtocolIdentifier::Dcep,
    };
    PpId(ppid as u32)
}

/// to_data_message_type returns the message type carried by `ppid`, or None
/// if the identifier is not a data channel one
pub fn to_data_message_type(ppid: PpId) -> Option<DataMessageType> {
    match PayloadProtocolIdentifier::from(ppid) {
        PayloadProtocolIdentifier::Dcep => Some(DataMessageType::Control),
        PayloadProtocolIdentifier::String
        | PayloadProtocolIdentifier::StringPartial
        | PayloadProtocolIdentifier::StringEmpty => Some(DataMessageType::Text),
        PayloadProtocolIdentifier::Binary
        | PayloadProtocolIdentifier::BinaryPartial
        | PayloadProtocolIdentifier::BinaryEmpty => Some(DataMessageType::Binary),
        PayloadProtocolIdentifier::Unknown => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_ppid() {
        let tests = vec![
            (DataMessageType::Control, 10, 50),
            (DataMessageType::Control, 0, 50),
            (DataMessageType::Text, 10, 51),
            (DataMessageType::Text, 0, 56),
            (DataMessageType::Binary, 10, 53),
            (DataMessageType::Binary, 0, 57),
        ];

        for (message_type, length, expected) in tests {
            assert_eq!(
                to_ppid(message_type, length),
                PpId(expected),
                "{message_type:?} with {length} bytes"
            );
        }
    }

    #[test]
    fn test_to_data_message_type() {
        let tests = vec![
            (50, Some(DataMessageType::Control)),
            (51, Some(DataMessageType::Text)),
            (52, Some(DataMessageType::Binary)),
            (53, Some(DataMessageType::Binary)),
            (54, Some(DataMessageType::Text)),
            (55, None),
            (56, Some(DataMessageType::Text)),
            (57, Some(DataMessageType::Binary)),
            (1337, None),
        ];

        for (ppid, expected) in tests {
            assert_eq!(to_data_message_type(PpId(ppid)), expected, "ppid {ppid}");
        }
    }

    #[test]
    fn test_empty_ppid() {
        assert!(PayloadProtocolIdentifier::from(56).is_empty());
        assert!(PayloadProtocolIdentifier::from(57).is_empty());
        assert!(!PayloadProtocolIdentifier::from(50).is_empty());
        assert!(!PayloadProtocolIdentifier::from(53).is_empty());
        assert_eq!(
            PayloadProtocolIdentifier::from(1337),
            PayloadProtocolIdentifier::Unknown
        );
    }
}
