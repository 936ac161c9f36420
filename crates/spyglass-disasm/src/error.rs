//! Decode error types.

use thiserror::Error;

/// Error type for instruction decoding.
///
/// Every error is scoped to exactly one instruction; the caller decides
/// whether to retry at the next byte, skip a stride, or stop a dump.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    /// The byte source could not supply requested bytes. Nothing is
    /// consumed.
    #[error("byte fetch fault at {address:#x}")]
    Fetch { address: u64 },

    /// The opcode maps to no table entry, or a fixup could not resolve its
    /// trailing byte. `consumed` is the resynchronization length: the
    /// distance to just past the offending opcode byte(s).
    #[error("bad opcode at {address:#x}: {bytes:02x?}")]
    BadOpcode {
        address: u64,
        bytes: Vec<u8>,
        consumed: usize,
    },

    /// Defensive case that should be unreachable.
    #[error("internal decoder error: {reason}")]
    Internal { reason: &'static str },
}

impl DecodeError {
    /// Creates a new BadOpcode error.
    pub fn bad_opcode(address: u64, bytes: &[u8], consumed: usize) -> Self {
        Self::BadOpcode {
            address,
            bytes: bytes.to_vec(),
            consumed,
        }
    }

    /// Text the caller should print in place of the instruction.
    pub fn placeholder(&self) -> &'static str {
        match self {
            Self::Internal { .. } => "(internal error)",
            _ => "(bad)",
        }
    }

    /// Bytes to skip before resuming a multi-instruction dump.
    pub fn consumed(&self) -> usize {
        match self {
            Self::BadOpcode { consumed, .. } => *consumed,
            _ => 0,
        }
    }
}
