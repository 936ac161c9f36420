//! Decoder traits.

use crate::DecodeError;
use spyglass_core::{ByteSource, SymbolResolver};

/// One decoded instruction, rendered as text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedLine {
    /// Virtual address of the first byte.
    pub address: u64,
    /// Number of bytes consumed (1..=15).
    pub length: usize,
    /// Formatted mnemonic and operands.
    pub text: String,
    /// Resolved branch/call or RIP-relative target, when the instruction
    /// has one.
    pub target: Option<u64>,
}

/// Trait for instruction decoders that render text directly.
pub trait InstructionDecoder {
    /// Decode a single instruction starting at `address`.
    ///
    /// Bytes come from `source`; `symbols` is consulted only to annotate
    /// resolved targets. Each call owns its decode state exclusively.
    fn decode_instruction(
        &self,
        address: u64,
        source: &dyn ByteSource,
        symbols: &dyn SymbolResolver,
    ) -> Result<DecodedLine, DecodeError>;

    /// Maximum instruction length in bytes.
    fn max_instruction_size(&self) -> usize;

    /// Disassemble `[start, end)`, resynchronizing after errors.
    ///
    /// Undecodable bytes produce a placeholder line covering the error's
    /// resynchronization span (at least one byte) so the dump can continue
    /// at the next instruction boundary.
    fn disassemble_range(
        &self,
        start: u64,
        end: u64,
        source: &dyn ByteSource,
        symbols: &dyn SymbolResolver,
    ) -> Vec<DecodedLine> {
        let mut lines = Vec::new();
        let mut address = start;

        while address < end {
            match self.decode_instruction(address, source, symbols) {
                Ok(line) => {
                    let len = line.length as u64;
                    lines.push(line);
                    address += len;
                }
                Err(err) => {
                    let skip = err.consumed().max(1);
                    lines.push(DecodedLine {
                        address,
                        length: skip,
                        text: err.placeholder().to_string(),
                        target: None,
                    });
                    address += skip as u64;
                }
            }
        }

        lines
    }
}
