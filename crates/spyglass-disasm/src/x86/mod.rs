//! x86/x86-64 instruction decoder.
//!
//! A table-driven decoder covering 16-, 32- and 64-bit execution modes.
//! It handles:
//! - Legacy prefixes (REP, LOCK, segment overrides, operand/address size,
//!   the x87 wait pseudo-prefix)
//! - REX prefixes for 64-bit operands and extended registers
//! - ModR/M and SIB byte decoding, including RIP-relative and 16-bit forms
//! - One-byte and two-byte opcode maps with group, mandatory-prefix,
//!   mode-dependent and x87 sub-tables
//! - AT&T and Intel text rendering with symbolized branch targets

mod context;
mod decoder;
mod fetch;
mod fixup;
mod modrm;
mod opcodes;
mod operand;
mod prefix;
mod regs;
mod template;
mod x87;

pub use decoder::Disassembler;
pub use fetch::MAX_INSN_LEN;
