//! Raw byte access for the decoder.

use thiserror::Error;

/// The byte source could not supply the requested range.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("byte source fault at {address:#x} ({length} bytes)")]
pub struct ReadFault {
    /// First address that could not be read.
    pub address: u64,
    /// Number of bytes requested.
    pub length: usize,
}

/// Supplies raw instruction bytes to the decoder.
///
/// Implementations must be pure reads: a decode call may fetch the same
/// range more than once and must observe identical bytes each time. No
/// alignment or validity may be assumed beyond what the caller checked.
pub trait ByteSource {
    /// Fill `buf` with the bytes starting at `address`.
    fn read(&self, address: u64, buf: &mut [u8]) -> Result<(), ReadFault>;
}

/// Byte source over an in-memory slice mapped at a base address.
///
/// Mostly useful for tests and for disassembling buffers the debugger has
/// already copied out of the target.
pub struct SliceSource<'a> {
    base: u64,
    bytes: &'a [u8],
}

impl<'a> SliceSource<'a> {
    /// Maps `bytes` at `base`.
    pub fn new(base: u64, bytes: &'a [u8]) -> Self {
        Self { base, bytes }
    }
}

impl ByteSource for SliceSource<'_> {
    fn read(&self, address: u64, buf: &mut [u8]) -> Result<(), ReadFault> {
        let fault = ReadFault {
            address,
            length: buf.len(),
        };
        let start = address.checked_sub(self.base).ok_or(fault)? as usize;
        let end = start.checked_add(buf.len()).ok_or(fault)?;
        if end > self.bytes.len() {
            return Err(fault);
        }
        buf.copy_from_slice(&self.bytes[start..end]);
        Ok(())
    }
}
