//! Shared protocol types: opcodes, settings and errors.

use thiserror::Error;

/// Fixed 5-bit tag stored in the upper bits of every packet's first byte.
pub const PROTOCOL_TAG: u8 = 0b1_0101;

/// Operation selector stored in the low 3 bits of the first byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Opcode {
    /// Nothing changed; no payload
    NoOp = 0,
    /// Complete packed frame follows
    Full = 1,
    /// Header, previous frame, then the changed region
    Partial = 2,
}

impl Opcode {
    pub fn from_bits(bits: u8) -> Option<Self> {
        match bits {
            0 => Some(Opcode::NoOp),
            1 => Some(Opcode::Full),
            2 => Some(Opcode::Partial),
            _ => None,
        }
    }

    /// First packet byte: tag in bits 3-7, opcode in bits 0-2.
    pub fn header_byte(self) -> u8 {
        (PROTOCOL_TAG << 3) | self as u8
    }
}

/// Display geometry and update thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProtocolSettings {
    pub width: usize,
    pub height: usize,
    /// Largest aligned changed area still sent as a partial update
    pub max_partial_pixels: i64,
    /// Length of a refresh slot; every slot starts with a full update
    pub full_refresh_minutes: u32,
}

impl Default for ProtocolSettings {
    fn default() -> Self {
        Self {
            width: 800,
            height: 480,
            max_partial_pixels: 70_000,
            full_refresh_minutes: 60,
        }
    }
}

impl ProtocolSettings {
    /// Byte length of one packed frame.
    pub fn frame_len(&self) -> usize {
        (self.width * self.height).div_ceil(8)
    }
}

/// Errors that can occur while building or parsing update packets.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ProtocolError {
    #[error("Frame is {actual} bytes, expected {expected} for the configured resolution")]
    FrameLength { expected: usize, actual: usize },

    #[error("Header field {field} = {value} does not fit in 16 bits")]
    FieldOverflow { field: &'static str, value: i64 },

    #[error("Packet truncated: need {needed} bytes, got {actual}")]
    Truncated { needed: usize, actual: usize },

    #[error("Unknown protocol tag {0:#04x}")]
    BadTag(u8),

    #[error("Unknown opcode {0}")]
    UnknownOpcode(u8),

    #[error("Invalid partial bounds {width}x{height}")]
    InvalidBounds { width: i32, height: i32 },
}
