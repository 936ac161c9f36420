//! Post-hoc mnemonic fixups.
//!
//! A handful of encodings cannot be expressed in the static tables: the
//! final text depends on a trailing byte or on a ModR/M reg/rm combination
//! that overrides the generic group mnemonic. Fixups run in two places:
//! before operand decode when they replace the instruction outright
//! (group 7/15 register forms), and after it when they rewrite the
//! mnemonic or fold an immediate away.

use super::context::DecodeContext;
use super::opcodes::{i0, Fixup, Inst};
use crate::DecodeError;

/// 3DNow! mnemonics selected by the trailing suffix byte.
fn amd3dnow(suffix: u8) -> Option<&'static str> {
    Some(match suffix {
        0x0C => "pi2fw",
        0x0D => "pi2fd",
        0x1C => "pf2iw",
        0x1D => "pf2id",
        0x8A => "pfnacc",
        0x8E => "pfpnacc",
        0x90 => "pfcmpge",
        0x94 => "pfmin",
        0x96 => "pfrcp",
        0x97 => "pfrsqrt",
        0x9A => "pfsub",
        0x9E => "pfadd",
        0xA0 => "pfcmpgt",
        0xA4 => "pfmax",
        0xA6 => "pfrcpit1",
        0xA7 => "pfrsqit1",
        0xAA => "pfsubr",
        0xAE => "pfacc",
        0xB0 => "pfcmpeq",
        0xB4 => "pfmul",
        0xB6 => "pfrcpit2",
        0xB7 => "pmulhrw",
        0xBB => "pswapd",
        0xBF => "pavgusb",
        _ => return None,
    })
}

/// SSE compare predicates, by immediate value.
static SSE_CMP: [&str; 8] = ["eq", "lt", "le", "unord", "neq", "nlt", "nle", "ord"];

/// Fixups that replace the instruction before any operand is decoded:
/// the register forms of groups 7 and 15 are unrelated to the memory
/// instructions sharing their table rows.
pub fn pre_resolve(
    ctx: &mut DecodeContext<'_>,
    inst: &Inst,
) -> Result<Option<Inst>, DecodeError> {
    match inst.fixup {
        Fixup::SysGroup => {
            let modrm = ctx.modrm()?;
            if !modrm.is_register() {
                return Ok(None);
            }
            let name = match (modrm.reg & 0x7, modrm.rm & 0x7) {
                (0, 1) => "vmcall",
                (0, 2) => "vmlaunch",
                (0, 3) => "vmresume",
                (0, 4) => "vmxoff",
                (1, 0) => "monitor",
                (1, 1) => "mwait",
                (2, 0) => "xgetbv",
                (2, 1) => "xsetbv",
                (7, 0) => "swapgs",
                (7, 1) => "rdtscp",
                _ => return Err(ctx.bad_opcode()),
            };
            Ok(Some(i0(name)))
        }
        Fixup::Fence => {
            let modrm = ctx.modrm()?;
            if !modrm.is_register() {
                return Ok(None);
            }
            let name = match modrm.reg & 0x7 {
                5 => "lfence",
                6 => "mfence",
                7 => "sfence",
                _ => return Err(ctx.bad_opcode()),
            };
            Ok(Some(i0(name)))
        }
        _ => Ok(None),
    }
}

/// Fixups that run after the generic decode: they may consume one more
/// byte, rewrite the mnemonic, or drop an already-rendered operand.
pub fn post_apply(
    ctx: &mut DecodeContext<'_>,
    fixup: Fixup,
    opcode: u8,
    mnemonic: &mut String,
    count: &mut usize,
) -> Result<(), DecodeError> {
    match fixup {
        Fixup::SizeConvert => {
            let bits = ctx.operand_bits();
            let att = ctx.syntax.is_att();
            *mnemonic = match (opcode, bits, att) {
                (0x98, 16, true) => "cbtw",
                (0x98, 16, false) => "cbw",
                (0x98, 32, true) => "cwtl",
                (0x98, 32, false) => "cwde",
                (0x98, _, true) => "cltq",
                (0x98, _, false) => "cdqe",
                (_, 16, true) => "cwtd",
                (_, 16, false) => "cwd",
                (_, 32, true) => "cltd",
                (_, 32, false) => "cdq",
                (_, _, true) => "cqto",
                (_, _, false) => "cqo",
            }
            .to_string();
        }

        Fixup::LoopWidth => {
            *mnemonic = match ctx.address_bits() {
                16 => "jcxz",
                32 => "jecxz",
                _ => "jrcxz",
            }
            .to_string();
        }

        Fixup::Amd3dNow => {
            let suffix = ctx.read_byte()?;
            match amd3dnow(suffix) {
                Some(name) => *mnemonic = name.to_string(),
                None => return Err(ctx.bad_opcode()),
            }
        }

        Fixup::SseCompare => {
            if let Some(imm) = ctx.op_imm[2] {
                if let Some(pred) = SSE_CMP.get(imm as usize) {
                    // "cmpps" + predicate 1 -> "cmpltps".
                    let tail = mnemonic.split_off(3);
                    mnemonic.push_str(pred);
                    mnemonic.push_str(&tail);
                    ctx.operands[2].clear();
                    *count = 2;
                }
            }
        }

        Fixup::CmpxchgWide => {
            if ctx.prefixes.rex_w() {
                *mnemonic = "cmpxchg16b".to_string();
            }
        }

        Fixup::None | Fixup::SysGroup | Fixup::Fence => {}
    }
    Ok(())
}
