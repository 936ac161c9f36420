//! # spyglass-core
//!
//! Core abstractions for the spyglass low-level debugger tools. This crate
//! defines the execution-mode and syntax-dialect enums and the two callback
//! traits the disassembler decodes through: a byte source for raw
//! instruction bytes and a symbol resolver for annotating branch targets.

pub mod arch;
pub mod source;
pub mod symbol;

pub use arch::{ExecutionMode, Syntax};
pub use source::{ByteSource, ReadFault, SliceSource};
pub use symbol::{NoSymbols, SymbolInfo, SymbolResolver};
