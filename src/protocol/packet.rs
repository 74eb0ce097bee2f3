//! Wire framing of update packets.
//!
//! ```text
//! byte 0   (PROTOCOL_TAG << 3) | opcode
//! byte 1   sleep minutes
//! NoOp     (empty)
//! Full     packed frame
//! Partial  u16 BE x, y, w, h, previous_len
//!          previous_len bytes of the previous packed frame
//!          ceil(w*h/8) bytes of the new frame restricted to (x, y, w, h)
//! ```

use crate::util::Rect;

use super::types::{Opcode, PROTOCOL_TAG, ProtocolError};

/// Bytes before any payload.
pub const HEADER_LEN: usize = 2;
/// Bytes of the partial sub-header.
pub const PARTIAL_HEADER_LEN: usize = 10;

/// Opcode-specific packet body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Payload {
    NoOp,
    Full(Vec<u8>),
    Partial {
        /// Byte-aligned changed region
        bounds: Rect,
        /// The complete previously cached frame
        previous: Vec<u8>,
        /// New pixels inside `bounds`, packed region-locally
        region: Vec<u8>,
    },
}

/// One message to a display client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdatePacket {
    pub sleep_minutes: u8,
    pub payload: Payload,
}

fn field(name: &'static str, value: i64) -> Result<[u8; 2], ProtocolError> {
    u16::try_from(value)
        .map(u16::to_be_bytes)
        .map_err(|_| ProtocolError::FieldOverflow { field: name, value })
}

fn read_u16(bytes: &[u8], at: usize) -> u16 {
    u16::from_be_bytes([bytes[at], bytes[at + 1]])
}

impl UpdatePacket {
    pub fn opcode(&self) -> Opcode {
        match self.payload {
            Payload::NoOp => Opcode::NoOp,
            Payload::Full(_) => Opcode::Full,
            Payload::Partial { .. } => Opcode::Partial,
        }
    }

    /// Serializes the packet.
    ///
    /// Fails if a partial header value does not fit its 16-bit field.
    pub fn encode(&self) -> Result<Vec<u8>, ProtocolError> {
        let mut out = vec![self.opcode().header_byte(), self.sleep_minutes];
        match &self.payload {
            Payload::NoOp => {}
            Payload::Full(frame) => out.extend_from_slice(frame),
            Payload::Partial {
                bounds,
                previous,
                region,
            } => {
                out.reserve(PARTIAL_HEADER_LEN + previous.len() + region.len());
                out.extend(field("x", bounds.x as i64)?);
                out.extend(field("y", bounds.y as i64)?);
                out.extend(field("width", bounds.width as i64)?);
                out.extend(field("height", bounds.height as i64)?);
                out.extend(field("previous_len", previous.len() as i64)?);
                out.extend_from_slice(previous);
                out.extend_from_slice(region);
            }
        }
        Ok(out)
    }

    /// Parses a serialized packet.
    pub fn decode(bytes: &[u8]) -> Result<Self, ProtocolError> {
        if bytes.len() < HEADER_LEN {
            return Err(ProtocolError::Truncated {
                needed: HEADER_LEN,
                actual: bytes.len(),
            });
        }
        if bytes[0] >> 3 != PROTOCOL_TAG {
            return Err(ProtocolError::BadTag(bytes[0] >> 3));
        }
        let opcode =
            Opcode::from_bits(bytes[0] & 0b111).ok_or(ProtocolError::UnknownOpcode(bytes[0] & 0b111))?;
        let sleep_minutes = bytes[1];
        let body = &bytes[HEADER_LEN..];

        let payload = match opcode {
            Opcode::NoOp => Payload::NoOp,
            Opcode::Full => Payload::Full(body.to_vec()),
            Opcode::Partial => {
                if body.len() < PARTIAL_HEADER_LEN {
                    return Err(ProtocolError::Truncated {
                        needed: HEADER_LEN + PARTIAL_HEADER_LEN,
                        actual: bytes.len(),
                    });
                }
                let x = read_u16(body, 0) as i32;
                let y = read_u16(body, 2) as i32;
                let width = read_u16(body, 4) as i32;
                let height = read_u16(body, 6) as i32;
                let previous_len = read_u16(body, 8) as usize;
                let bounds = Rect::new(x, y, width, height)
                    .ok_or(ProtocolError::InvalidBounds { width, height })?;

                let region_len = (width as usize * height as usize).div_ceil(8);
                let needed = HEADER_LEN + PARTIAL_HEADER_LEN + previous_len + region_len;
                if bytes.len() < needed {
                    return Err(ProtocolError::Truncated {
                        needed,
                        actual: bytes.len(),
                    });
                }
                let rest = &body[PARTIAL_HEADER_LEN..];
                Payload::Partial {
                    bounds,
                    previous: rest[..previous_len].to_vec(),
                    region: rest[previous_len..previous_len + region_len].to_vec(),
                }
            }
        };

        Ok(Self {
            sleep_minutes,
            payload,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn noop_is_two_bytes() {
        let packet = UpdatePacket {
            sleep_minutes: 42,
            payload: Payload::NoOp,
        };
        assert_eq!(packet.encode().unwrap(), vec![0b1010_1000, 42]);
    }

    #[test]
    fn partial_layout_is_big_endian_with_previous_frame() {
        let packet = UpdatePacket {
            sleep_minutes: 15,
            payload: Payload::Partial {
                bounds: Rect::new(48, 256, 8, 8).unwrap(),
                previous: vec![0xAA; 3],
                region: vec![0x01; 8],
            },
        };
        let bytes = packet.encode().unwrap();
        assert_eq!(bytes[0], 0b1010_1010);
        assert_eq!(&bytes[2..12], &[0, 48, 1, 0, 0, 8, 0, 8, 0, 3]);
        assert_eq!(&bytes[12..15], &[0xAA; 3]);
        assert_eq!(&bytes[15..], &[0x01; 8]);
        assert_eq!(UpdatePacket::decode(&bytes).unwrap(), packet);
    }

    #[test]
    fn oversized_field_is_rejected() {
        let packet = UpdatePacket {
            sleep_minutes: 15,
            payload: Payload::Partial {
                bounds: Rect::new(70_000, 0, 8, 8).unwrap(),
                previous: Vec::new(),
                region: vec![0; 8],
            },
        };
        assert_eq!(
            packet.encode(),
            Err(ProtocolError::FieldOverflow {
                field: "x",
                value: 70_000
            })
        );
    }

    #[test]
    fn decode_rejects_foreign_and_short_packets() {
        assert_eq!(
            UpdatePacket::decode(&[0x01]),
            Err(ProtocolError::Truncated {
                needed: 2,
                actual: 1
            })
        );
        assert_eq!(UpdatePacket::decode(&[0x01, 0]), Err(ProtocolError::BadTag(0)));
        assert_eq!(
            UpdatePacket::decode(&[0b1010_1111, 0]),
            Err(ProtocolError::UnknownOpcode(7))
        );
        let truncated = [0b1010_1010, 15, 0, 0, 0, 0, 0, 8, 0, 8, 0, 4];
        assert!(matches!(
            UpdatePacket::decode(&truncated),
            Err(ProtocolError::Truncated { needed: 24, .. })
        ));
    }
}
