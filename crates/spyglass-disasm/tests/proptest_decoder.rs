//! Property-based tests for the x86 decoder.
//!
//! These verify invariants that should hold for all inputs:
//! - Decoding never panics on arbitrary bytes
//! - Decoded instruction length is within architectural bounds
//! - Deterministic decoding (same input, same output)
//! - Prefix-handling properties from the decoder contract

use proptest::prelude::*;

use spyglass_core::{ExecutionMode, NoSymbols, SliceSource, Syntax};
use spyglass_disasm::{DecodeError, DecodedLine, Disassembler, InstructionDecoder};

const BASE: u64 = 0x1000;

fn decode(mode: ExecutionMode, syntax: Syntax, bytes: &[u8]) -> Result<DecodedLine, DecodeError> {
    let source = SliceSource::new(BASE, bytes);
    Disassembler::new(mode, syntax).decode_instruction(BASE, &source, &NoSymbols)
}

fn modes() -> impl Strategy<Value = ExecutionMode> {
    prop_oneof![
        Just(ExecutionMode::Bits16),
        Just(ExecutionMode::Bits32),
        Just(ExecutionMode::Bits64),
    ]
}

fn syntaxes() -> impl Strategy<Value = Syntax> {
    prop_oneof![Just(Syntax::Att), Just(Syntax::Intel)]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(10000))]

    /// Decoding arbitrary bytes should never panic.
    #[test]
    fn decode_never_panics(
        bytes in prop::collection::vec(any::<u8>(), 0..32),
        mode in modes(),
        syntax in syntaxes(),
    ) {
        let _ = decode(mode, syntax, &bytes);
    }

    /// Successful decodes stay within the 15-byte architectural cap and
    /// never claim bytes the source did not provide.
    #[test]
    fn decoded_length_is_valid(
        bytes in prop::collection::vec(any::<u8>(), 1..32),
        mode in modes(),
        syntax in syntaxes(),
    ) {
        if let Ok(line) = decode(mode, syntax, &bytes) {
            prop_assert!(line.length >= 1);
            prop_assert!(line.length <= 15);
            prop_assert!(line.length <= bytes.len());
            prop_assert!(!line.text.is_empty());
        }
    }

    /// Decoding is deterministic: no state leaks between calls.
    #[test]
    fn decode_is_deterministic(
        bytes in prop::collection::vec(any::<u8>(), 1..32),
        mode in modes(),
        syntax in syntaxes(),
    ) {
        let first = decode(mode, syntax, &bytes);
        let second = decode(mode, syntax, &bytes);
        match (&first, &second) {
            (Ok(a), Ok(b)) => prop_assert_eq!(a, b),
            (Err(_), Err(_)) => {}
            _ => prop_assert!(false, "inconsistent results: {:?} vs {:?}", first, second),
        }
    }

    /// BadOpcode errors report a resynchronization length that stays
    /// within the bytes actually consumed.
    #[test]
    fn bad_opcode_resync_is_bounded(
        bytes in prop::collection::vec(any::<u8>(), 1..32),
        mode in modes(),
    ) {
        if let Err(DecodeError::BadOpcode { consumed, .. }) = decode(mode, Syntax::Att, &bytes) {
            prop_assert!(consumed >= 1);
            prop_assert!(consumed <= 15);
            prop_assert!(consumed <= bytes.len());
        }
    }

    /// A REX byte immediately followed by another prefix byte is
    /// discarded: REX.W must not widen the following instruction.
    #[test]
    fn displaced_rex_has_no_effect(rex in 0x48u8..=0x4F, imm in any::<u16>()) {
        let [lo, hi] = imm.to_le_bytes();
        let with_rex = decode(ExecutionMode::Bits64, Syntax::Att, &[rex, 0x66, 0xb8, lo, hi]).unwrap();
        let without = decode(ExecutionMode::Bits64, Syntax::Att, &[0x66, 0xb8, lo, hi]).unwrap();
        // Identical apart from the leading token for the dropped REX.
        prop_assert!(with_rex.text.ends_with(&without.text));
        prop_assert!(with_rex.text.starts_with("rex"));
        prop_assert_eq!(with_rex.length, without.length + 1);
        prop_assert!(with_rex.text.ends_with("%ax"));
    }

    /// mod=11 never consumes a SIB byte or displacement: a register-form
    /// mov is always exactly two bytes plus prefixes.
    #[test]
    fn register_form_consumes_no_extra_bytes(modrm in 0xC0u8..=0xFF, trailer in any::<u8>()) {
        let line = decode(ExecutionMode::Bits64, Syntax::Att, &[0x89, modrm, trailer]).unwrap();
        prop_assert_eq!(line.length, 2);
    }

    /// Sequential disassembly of a range covers every byte exactly once.
    #[test]
    fn range_covers_all_bytes(bytes in prop::collection::vec(any::<u8>(), 16..96)) {
        let source = SliceSource::new(BASE, &bytes);
        let disasm = Disassembler::new(ExecutionMode::Bits64, Syntax::Att);
        let lines = disasm.disassemble_range(BASE, BASE + bytes.len() as u64, &source, &NoSymbols);

        let mut expected = BASE;
        for line in &lines {
            prop_assert_eq!(line.address, expected);
            prop_assert!(line.length >= 1);
            expected += line.length as u64;
        }
        prop_assert!(expected >= BASE + bytes.len() as u64);
    }
}
