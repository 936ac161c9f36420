//! Bounded instruction-byte lookahead.

use crate::DecodeError;
use spyglass_core::ByteSource;

/// Architectural ceiling on x86 instruction length.
pub const MAX_INSN_LEN: usize = 15;

/// Lookahead cache over the external byte source.
///
/// Bytes are pulled in one source call per gap and kept for the lifetime of
/// the decode, so the source sees each range at most a handful of times and
/// never past the 15-byte cap.
pub struct ByteFetcher<'a> {
    source: &'a dyn ByteSource,
    start: u64,
    buf: [u8; MAX_INSN_LEN],
    valid: usize,
}

impl<'a> ByteFetcher<'a> {
    /// Creates a fetcher for the instruction starting at `start`.
    pub fn new(source: &'a dyn ByteSource, start: u64) -> Self {
        Self {
            source,
            start,
            buf: [0; MAX_INSN_LEN],
            valid: 0,
        }
    }

    /// Instruction start address.
    pub fn start(&self) -> u64 {
        self.start
    }

    /// Bytes fetched so far, up to `len`.
    pub fn fetched(&self, len: usize) -> &[u8] {
        &self.buf[..len.min(self.valid)]
    }

    /// Ensures all bytes in `[0, end)` are cached.
    fn fill_to(&mut self, end: usize) -> Result<(), DecodeError> {
        if end <= self.valid {
            return Ok(());
        }
        if end > MAX_INSN_LEN {
            // No valid encoding is longer than 15 bytes.
            return Err(DecodeError::bad_opcode(
                self.start,
                &self.buf[..self.valid],
                self.valid,
            ));
        }
        let address = self.start + self.valid as u64;
        let valid = self.valid;
        self.source
            .read(address, &mut self.buf[valid..end])
            .map_err(|fault| DecodeError::Fetch {
                address: fault.address,
            })?;
        self.valid = end;
        Ok(())
    }

    /// Returns the byte at `offset` from the instruction start.
    pub fn byte(&mut self, offset: usize) -> Result<u8, DecodeError> {
        self.fill_to(offset + 1)?;
        Ok(self.buf[offset])
    }

    /// Little-endian u16 at `offset`.
    pub fn u16_at(&mut self, offset: usize) -> Result<u16, DecodeError> {
        self.fill_to(offset + 2)?;
        Ok(u16::from_le_bytes([self.buf[offset], self.buf[offset + 1]]))
    }

    /// Little-endian u32 at `offset`.
    pub fn u32_at(&mut self, offset: usize) -> Result<u32, DecodeError> {
        self.fill_to(offset + 4)?;
        let mut raw = [0u8; 4];
        raw.copy_from_slice(&self.buf[offset..offset + 4]);
        Ok(u32::from_le_bytes(raw))
    }

    /// Little-endian u64 at `offset`.
    pub fn u64_at(&mut self, offset: usize) -> Result<u64, DecodeError> {
        self.fill_to(offset + 8)?;
        let mut raw = [0u8; 8];
        raw.copy_from_slice(&self.buf[offset..offset + 8]);
        Ok(u64::from_le_bytes(raw))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use spyglass_core::SliceSource;

    #[test]
    fn caches_and_caps() {
        let bytes: Vec<u8> = (0u8..32).collect();
        let source = SliceSource::new(0x1000, &bytes);
        let mut fetch = ByteFetcher::new(&source, 0x1000);

        assert_eq!(fetch.byte(0).unwrap(), 0);
        assert_eq!(fetch.byte(14).unwrap(), 14);
        // Offset 15 would make the instruction 16 bytes long.
        assert!(matches!(
            fetch.byte(15),
            Err(DecodeError::BadOpcode { .. })
        ));
    }

    #[test]
    fn fault_propagates() {
        let bytes = [0x90u8; 2];
        let source = SliceSource::new(0x1000, &bytes);
        let mut fetch = ByteFetcher::new(&source, 0x1000);
        assert_eq!(fetch.byte(1).unwrap(), 0x90);
        assert!(matches!(fetch.byte(2), Err(DecodeError::Fetch { .. })));
    }
}
