//! Wire messages exchanged between client and server
//!
//! The protocol is unframed ASCII text: a position update is three
//! whitespace-separated decimal integers (`"<x> <y> <shots_received>"`),
//! a shoot command is the literal string `"shoot"`. There is no length
//! prefix and no type tag; the receiver tells the two shapes apart by
//! content alone.

use crate::MAX_MESSAGE_LEN;
use thiserror::Error;

/// Literal text of the shoot command.
pub const SHOOT_COMMAND: &str = "shoot";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ProtocolError {
    #[error("empty message")]
    Empty,
    #[error("message exceeds {MAX_MESSAGE_LEN} bytes (got {0})")]
    TooLong(usize),
    #[error("message is not null-free ASCII text")]
    NotText,
    #[error("malformed message: {0:?}")]
    Malformed(String),
}

/// A decoded wire message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    /// A player's coordinates and hit count.
    Position {
        x: i32,
        y: i32,
        shots_received: u32,
    },
    /// A fire action, distinguished only by literal content.
    Shoot,
}

impl Message {
    /// Encodes the message as newline-free ASCII bytes.
    pub fn encode(&self) -> Vec<u8> {
        match self {
            Message::Position {
                x,
                y,
                shots_received,
            } => format!("{} {} {}", x, y, shots_received).into_bytes(),
            Message::Shoot => SHOOT_COMMAND.as_bytes().to_vec(),
        }
    }

    /// Decodes a received buffer by content sniffing.
    ///
    /// The exact literal `"shoot"` is a shoot command; exactly three
    /// decimal integers are a position update; everything else is an
    /// error. A position update can therefore never be mistaken for a
    /// shoot command or vice versa.
    pub fn parse(bytes: &[u8]) -> Result<Message, ProtocolError> {
        if bytes.is_empty() {
            return Err(ProtocolError::Empty);
        }
        if bytes.len() > MAX_MESSAGE_LEN {
            return Err(ProtocolError::TooLong(bytes.len()));
        }
        if bytes.iter().any(|b| *b == 0 || !b.is_ascii()) {
            return Err(ProtocolError::NotText);
        }

        // Null-free ASCII was just checked, so this cannot fail.
        let text = std::str::from_utf8(bytes).map_err(|_| ProtocolError::NotText)?;

        if text == SHOOT_COMMAND {
            return Ok(Message::Shoot);
        }

        let fields: Vec<&str> = text.split_whitespace().collect();
        if fields.len() != 3 {
            return Err(ProtocolError::Malformed(text.to_string()));
        }

        let x = fields[0]
            .parse::<i32>()
            .map_err(|_| ProtocolError::Malformed(text.to_string()))?;
        let y = fields[1]
            .parse::<i32>()
            .map_err(|_| ProtocolError::Malformed(text.to_string()))?;
        let shots_received = fields[2]
            .parse::<u32>()
            .map_err(|_| ProtocolError::Malformed(text.to_string()))?;

        Ok(Message::Position {
            x,
            y,
            shots_received,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_encoding() {
        let msg = Message::Position {
            x: 100,
            y: 200,
            shots_received: 0,
        };
        assert_eq!(msg.encode(), b"100 200 0".to_vec());
    }

    #[test]
    fn test_shoot_encoding() {
        assert_eq!(Message::Shoot.encode(), b"shoot".to_vec());
    }

    #[test]
    fn test_position_parse_exact_roundtrip() {
        let parsed = Message::parse(b"100 200 0").unwrap();
        match parsed {
            Message::Position {
                x,
                y,
                shots_received,
            } => {
                assert_eq!(x, 100);
                assert_eq!(y, 200);
                assert_eq!(shots_received, 0);
            }
            _ => panic!("Position update parsed as wrong message type"),
        }
    }

    #[test]
    fn test_negative_coordinates_roundtrip() {
        let msg = Message::Position {
            x: -15,
            y: 599,
            shots_received: 7,
        };
        assert_eq!(Message::parse(&msg.encode()).unwrap(), msg);
    }

    #[test]
    fn test_shoot_parse() {
        assert_eq!(Message::parse(b"shoot").unwrap(), Message::Shoot);
    }

    #[test]
    fn test_shapes_never_cross_parse() {
        // A position-shaped message must never become a shoot command.
        match Message::parse(b"0 0 0").unwrap() {
            Message::Position { .. } => {}
            Message::Shoot => panic!("position update misparsed as shoot"),
        }

        // Anything shoot-like but not the exact literal is rejected,
        // never silently treated as a position update.
        assert!(Message::parse(b"shoot ").is_err());
        assert!(Message::parse(b"Shoot").is_err());
        assert!(Message::parse(b"shoot 1 2").is_err());
    }

    #[test]
    fn test_empty_message_rejected() {
        assert_eq!(Message::parse(b""), Err(ProtocolError::Empty));
    }

    #[test]
    fn test_wrong_field_count_rejected() {
        assert!(matches!(
            Message::parse(b"100 200"),
            Err(ProtocolError::Malformed(_))
        ));
        assert!(matches!(
            Message::parse(b"1 2 3 4"),
            Err(ProtocolError::Malformed(_))
        ));
    }

    #[test]
    fn test_non_numeric_fields_rejected() {
        assert!(matches!(
            Message::parse(b"abc def ghi"),
            Err(ProtocolError::Malformed(_))
        ));
        // shots_received is unsigned
        assert!(matches!(
            Message::parse(b"100 200 -1"),
            Err(ProtocolError::Malformed(_))
        ));
    }

    #[test]
    fn test_non_ascii_rejected() {
        assert_eq!(
            Message::parse("100 200 \u{2603}".as_bytes()),
            Err(ProtocolError::NotText)
        );
        assert_eq!(Message::parse(b"100\0200 0"), Err(ProtocolError::NotText));
    }

    #[test]
    fn test_oversized_message_rejected() {
        let big = vec![b'1'; MAX_MESSAGE_LEN + 1];
        assert_eq!(
            Message::parse(&big),
            Err(ProtocolError::TooLong(MAX_MESSAGE_LEN + 1))
        );
    }

    #[test]
    fn test_extremes_roundtrip() {
        let msg = Message::Position {
            x: i32::MIN,
            y: i32::MAX,
            shots_received: u32::MAX,
        };
        let encoded = msg.encode();
        assert!(encoded.len() <= MAX_MESSAGE_LEN);
        assert_eq!(Message::parse(&encoded).unwrap(), msg);
    }
}
