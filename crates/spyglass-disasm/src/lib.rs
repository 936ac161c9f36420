//! # spyglass-disasm
//!
//! Table-driven x86/x86-64 machine-code disassembler for the spyglass
//! debugger. Decodes a raw byte stream at a given address into a
//! mnemonic-and-operands line, for 16-, 32- and 64-bit execution modes,
//! in both the AT&T and Intel dialects.
//!
//! The decoder pulls bytes through a caller-supplied [`ByteSource`] and
//! annotates branch targets through a caller-supplied
//! [`SymbolResolver`]; it holds no state between calls.
//!
//! [`ByteSource`]: spyglass_core::ByteSource
//! [`SymbolResolver`]: spyglass_core::SymbolResolver

pub mod error;
pub mod traits;
pub mod x86;

pub use error::DecodeError;
pub use traits::{DecodedLine, InstructionDecoder};
pub use x86::Disassembler;

use spyglass_core::{ByteSource, ExecutionMode, SymbolResolver, Syntax};

/// Decode one instruction at `address`.
///
/// Convenience wrapper over [`Disassembler`] for one-shot calls.
pub fn decode_instruction(
    address: u64,
    mode: ExecutionMode,
    syntax: Syntax,
    source: &dyn ByteSource,
    symbols: &dyn SymbolResolver,
) -> Result<DecodedLine, DecodeError> {
    Disassembler::new(mode, syntax).decode_instruction(address, source, symbols)
}
