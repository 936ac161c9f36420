//! Mnemonic template expansion.
//!
//! Templates are literal text plus:
//! - macro letters: `S` (size suffix from the instruction's data width,
//!   byte ops included), `D` (size suffix from the effective operand
//!   width, for widening moves whose source is narrower), `B` (fixed byte
//!   suffix). `S` and `B` emit only when no register operand pins the
//!   size; all three emit only in the AT&T dialect unless preceded by the
//!   `I` modifier, which applies the rule in the suppressing dialect too.
//! - alternation groups `{a|b|c|d}` picking one fragment by
//!   `dialect * 2 + (64-bit ? 1 : 0)`, clamped to the last fragment.
//!
//! Expansion is a pure function; which prefixes were consulted is reported
//! back to the caller instead of being flagged through shared state.

use spyglass_core::{ExecutionMode, Syntax};

/// Inputs the templater may consult.
pub struct TemplateCtx {
    pub syntax: Syntax,
    pub mode: ExecutionMode,
    /// Width of the data the instruction moves: 8 for byte forms,
    /// otherwise the effective operand width.
    pub data_bits: u16,
    /// Effective operand width (REX.W and 0x66 applied), never
    /// byte-downgraded.
    pub operand_bits: u16,
    /// True when no register operand disambiguates the operand size.
    pub suffix_always: bool,
}

/// Prefixes consulted during expansion.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Consulted {
    /// The operand-size machinery (0x66 / REX.W) was read.
    pub operand_size: bool,
}

fn size_suffix(bits: u16) -> char {
    match bits {
        8 => 'b',
        16 => 'w',
        64 => 'q',
        _ => 'l',
    }
}

/// Expands `template` into the final mnemonic text.
pub fn expand(template: &str, ctx: &TemplateCtx) -> (String, Consulted) {
    let mut out = String::with_capacity(template.len());
    let mut consulted = Consulted::default();
    let mut force = false;

    let mut chars = template.chars();
    while let Some(c) = chars.next() {
        match c {
            '{' => {
                let mut group = String::new();
                for g in chars.by_ref() {
                    if g == '}' {
                        break;
                    }
                    group.push(g);
                }
                let parts: Vec<&str> = group.split('|').collect();
                let base = if ctx.syntax.is_att() { 0 } else { 2 };
                let mut index = base + usize::from(ctx.mode.is_64bit());
                if index >= parts.len() {
                    index = parts.len() - 1;
                }
                out.push_str(parts[index]);
                force = false;
            }
            'I' => force = true,
            'S' => {
                if ctx.suffix_always && (ctx.syntax.is_att() || force) {
                    if ctx.data_bits != 8 {
                        consulted.operand_size = true;
                    }
                    out.push(size_suffix(ctx.data_bits));
                }
                force = false;
            }
            'D' => {
                if ctx.syntax.is_att() || force {
                    consulted.operand_size = true;
                    out.push(size_suffix(ctx.operand_bits));
                }
                force = false;
            }
            'B' => {
                if ctx.suffix_always && (ctx.syntax.is_att() || force) {
                    out.push('b');
                }
                force = false;
            }
            _ => {
                out.push(c);
                force = false;
            }
        }
    }

    (out, consulted)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx(syntax: Syntax, mode: ExecutionMode, bits: u16, suffix_always: bool) -> TemplateCtx {
        TemplateCtx {
            syntax,
            mode,
            data_bits: bits,
            operand_bits: if bits == 8 { 32 } else { bits },
            suffix_always,
        }
    }

    #[test]
    fn plain_text_passes_through() {
        let (text, consulted) = expand("ret", &ctx(Syntax::Att, ExecutionMode::Bits64, 32, true));
        assert_eq!(text, "ret");
        assert!(!consulted.operand_size);
    }

    #[test]
    fn size_suffix_tracks_data_width() {
        for (bits, expected) in [(8, "nopb"), (16, "nopw"), (32, "nopl"), (64, "nopq")] {
            let (text, _) = expand("nopS", &ctx(Syntax::Att, ExecutionMode::Bits64, bits, true));
            assert_eq!(text, expected);
        }
    }

    #[test]
    fn byte_suffix_does_not_consult_operand_size() {
        let (_, consulted) = expand("movS", &ctx(Syntax::Att, ExecutionMode::Bits64, 8, true));
        assert!(!consulted.operand_size);
        let (_, consulted) = expand("movS", &ctx(Syntax::Att, ExecutionMode::Bits64, 32, true));
        assert!(consulted.operand_size);
    }

    #[test]
    fn suffix_suppressed_by_register_operand_and_by_intel() {
        let (text, _) = expand("nopS", &ctx(Syntax::Att, ExecutionMode::Bits64, 32, false));
        assert_eq!(text, "nop");
        let (text, _) = expand("nopS", &ctx(Syntax::Intel, ExecutionMode::Bits64, 32, true));
        assert_eq!(text, "nop");
    }

    #[test]
    fn dest_suffix_ignores_byte_sources() {
        // movzbl: the data width is byte, the destination suffix is not.
        let tctx = TemplateCtx {
            syntax: Syntax::Att,
            mode: ExecutionMode::Bits64,
            data_bits: 8,
            operand_bits: 32,
            suffix_always: false,
        };
        let (text, consulted) = expand("{movzb|movzb|movzx|movzx}D", &tctx);
        assert_eq!(text, "movzbl");
        assert!(consulted.operand_size);
    }

    #[test]
    fn modifier_applies_suffix_in_intel() {
        let (text, _) = expand("cvtIS", &ctx(Syntax::Intel, ExecutionMode::Bits64, 64, true));
        assert_eq!(text, "cvtq");
    }

    #[test]
    fn alternation_selects_by_dialect_and_mode() {
        let template = "{pushf|pushfq|pushf|pushfq}";
        let (att32, _) = expand(template, &ctx(Syntax::Att, ExecutionMode::Bits32, 32, true));
        let (att64, _) = expand(template, &ctx(Syntax::Att, ExecutionMode::Bits64, 64, true));
        let (intel64, _) = expand(template, &ctx(Syntax::Intel, ExecutionMode::Bits64, 64, true));
        assert_eq!(att32, "pushf");
        assert_eq!(att64, "pushfq");
        assert_eq!(intel64, "pushfq");
    }

    #[test]
    fn alternation_clamps_to_last_fragment() {
        let (text, _) = expand(
            "{lret|lret|retf|retf}",
            &ctx(Syntax::Intel, ExecutionMode::Bits64, 32, true),
        );
        assert_eq!(text, "retf");
        let (text, _) = expand(
            "{movslq|movslq|movsxd}",
            &ctx(Syntax::Intel, ExecutionMode::Bits64, 32, true),
        );
        assert_eq!(text, "movsxd");
    }
}
