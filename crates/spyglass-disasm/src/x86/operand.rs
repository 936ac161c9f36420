//! Operand descriptors and their decoders.
//!
//! Each table slot names an addressing method (the Intel-manual letters:
//! E/G for ModR/M, I/J for immediates and branch displacements, and so on)
//! plus a width code. Decoding an operand reads any bytes it needs through
//! the context cursor and appends rendered text to that operand's buffer.

use super::context::DecodeContext;
use super::modrm::resolve_mem;
use super::prefix::SegReg;
use super::regs;
use crate::DecodeError;
use spyglass_core::ExecutionMode;

/// Operand width codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Width {
    /// Byte.
    B,
    /// Word (16-bit).
    W,
    /// Doubleword (32-bit).
    D,
    /// Quadword (64-bit).
    Q,
    /// Effective operand size (16/32/64).
    V,
    /// Effective operand size capped at 32 (16 or 32).
    Z,
    /// Double quadword (XMM).
    Dq,
    /// Far pointer in memory; no size annotation.
    Ptr,
    /// Opaque region (descriptor tables, save areas); no annotation.
    Opaque,
}

/// Implicit register operands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImpReg {
    Al,
    Cl,
    Dx,
    /// Accumulator at the effective operand size.
    AccV,
    Seg(SegReg),
}

/// One operand descriptor slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Op {
    None,
    /// ModR/M r/m: general register or memory.
    E(Width),
    /// ModR/M reg: general register.
    G(Width),
    /// ModR/M r/m, memory forms only.
    M(Width),
    /// ModR/M r/m, register forms only.
    R(Width),
    /// Immediate.
    I(Width),
    /// Sign-extended 8-bit immediate, displayed at the operand size.
    SxI8,
    /// The constant 1 (shift forms).
    One,
    /// Relative branch displacement.
    J(Width),
    /// Memory offset (moffs), sized by the address width.
    O(Width),
    /// Far pointer immediate (selector:offset).
    A,
    /// Segment register from ModR/M reg.
    Seg,
    /// Control register from ModR/M reg.
    Ctl,
    /// Debug register from ModR/M reg.
    Dbg,
    /// MMX register from ModR/M reg (XMM when 0x66-promoted).
    P(Width),
    /// MMX register or memory from ModR/M r/m (XMM when promoted).
    Q(Width),
    /// XMM register from ModR/M reg.
    V(Width),
    /// XMM register or memory from ModR/M r/m.
    W(Width),
    /// String source, seg:(r)SI.
    X(Width),
    /// String destination, es:(r)DI.
    Y(Width),
    /// General register embedded in the opcode, at the operand size.
    RegV(u8),
    /// Byte register embedded in the opcode.
    RegB(u8),
    /// Fixed implicit register.
    Imp(ImpReg),
}

/// Does this descriptor require the ModR/M byte?
pub fn needs_modrm(op: Op) -> bool {
    matches!(
        op,
        Op::E(_)
            | Op::G(_)
            | Op::M(_)
            | Op::R(_)
            | Op::Seg
            | Op::Ctl
            | Op::Dbg
            | Op::P(_)
            | Op::Q(_)
            | Op::V(_)
            | Op::W(_)
    )
}

/// Does this descriptor name a general-purpose register (and thereby pin
/// the operand size, suppressing suffixes and size annotations)?
pub fn fixes_gpr_size(op: Op, modrm_is_reg: bool) -> bool {
    match op {
        Op::G(_) | Op::R(_) | Op::RegV(_) | Op::RegB(_) => true,
        Op::Imp(ImpReg::Al | ImpReg::Cl | ImpReg::Dx | ImpReg::AccV) => true,
        Op::E(_) => modrm_is_reg,
        _ => false,
    }
}

fn width_bits(ctx: &mut DecodeContext<'_>, width: Width) -> u16 {
    match width {
        Width::B => 8,
        Width::W => 16,
        Width::D => 32,
        Width::Q => 64,
        Width::V => ctx.operand_bits(),
        Width::Z => {
            if ctx.operand_bits() == 16 {
                16
            } else {
                32
            }
        }
        Width::Dq => 128,
        Width::Ptr | Width::Opaque => 0,
    }
}

fn annotation(ctx: &mut DecodeContext<'_>, width: Width) -> Option<&'static str> {
    match width_bits(ctx, width) {
        8 => Some("byte ptr"),
        16 => Some("word ptr"),
        32 => Some("dword ptr"),
        64 => Some("qword ptr"),
        128 => Some("xmmword ptr"),
        _ => None,
    }
}

fn gpr_text(ctx: &mut DecodeContext<'_>, index: u8, width: Width) -> String {
    let bits = width_bits(ctx, width);
    let name = regs::gpr(index, bits, ctx.prefixes.rex_present());
    format!("{}{}", ctx.sigil(), name)
}

fn imm_text(ctx: &DecodeContext<'_>, value: u64) -> String {
    if ctx.syntax.is_att() {
        format!("$0x{:x}", value)
    } else {
        format!("0x{:x}", value)
    }
}

fn vector_reg(ctx: &DecodeContext<'_>, index: u8, promotable: bool) -> String {
    let name = if promotable && ctx.promoted {
        regs::XMM[(index & 0xF) as usize]
    } else {
        regs::MMX[(index & 0x7) as usize]
    };
    format!("{}{}", ctx.sigil(), name)
}

/// Renders the memory form of the current ModR/M operand, with an Intel
/// size annotation when nothing else pins the width.
fn mem_text(ctx: &mut DecodeContext<'_>, width: Width) -> Result<String, DecodeError> {
    let mem = resolve_mem(ctx)?;
    let mut out = String::new();
    if !ctx.syntax.is_att() && ctx.suffix_always {
        if let Some(note) = annotation(ctx, width) {
            out.push_str(note);
            out.push(' ');
        }
    }
    out.push_str(&mem.render(ctx.syntax));
    Ok(out)
}

fn string_ptr(
    ctx: &mut DecodeContext<'_>,
    width: Width,
    reg16: &str,
    reg32: &str,
    reg64: &str,
    seg: SegReg,
) -> String {
    let reg = match ctx.address_bits() {
        16 => reg16,
        32 => reg32,
        _ => reg64,
    };
    let mut out = String::new();
    if !ctx.syntax.is_att() && ctx.suffix_always {
        if let Some(note) = annotation(ctx, width) {
            out.push_str(note);
            out.push(' ');
        }
    }
    if ctx.syntax.is_att() {
        out.push_str(&format!("%{}:(%{})", seg.name(), reg));
    } else {
        out.push_str(&format!("{}:[{}]", seg.name(), reg));
    }
    out
}

fn branch_mask(mode: ExecutionMode, target: u64) -> u64 {
    match mode {
        ExecutionMode::Bits16 => target & 0xFFFF,
        ExecutionMode::Bits32 => target & 0xFFFF_FFFF,
        ExecutionMode::Bits64 => target,
    }
}

/// Decodes one operand into its buffer.
pub fn decode_operand(
    ctx: &mut DecodeContext<'_>,
    op: Op,
    index: usize,
) -> Result<(), DecodeError> {
    let text = match op {
        Op::None => String::new(),

        Op::E(width) => {
            let modrm = ctx.modrm()?;
            if modrm.is_register() {
                gpr_text(ctx, modrm.rm, width)
            } else {
                mem_text(ctx, width)?
            }
        }

        Op::G(width) => {
            let modrm = ctx.modrm()?;
            gpr_text(ctx, modrm.reg, width)
        }

        Op::M(width) => {
            if ctx.modrm()?.is_register() {
                return Err(ctx.bad_opcode());
            }
            mem_text(ctx, width)?
        }

        Op::R(width) => {
            let modrm = ctx.modrm()?;
            if !modrm.is_register() {
                return Err(ctx.bad_opcode());
            }
            gpr_text(ctx, modrm.rm, width)
        }

        Op::I(width) => {
            let value = match width {
                Width::B => ctx.read_byte()? as u64,
                Width::W => ctx.read_u16()? as u64,
                Width::Z => {
                    if ctx.operand_bits() == 16 {
                        ctx.read_u16()? as u64
                    } else {
                        let raw = ctx.read_u32()?;
                        if ctx.operand_bits() == 64 {
                            // Immediates stay 32 bits and sign-extend.
                            raw as i32 as i64 as u64
                        } else {
                            raw as u64
                        }
                    }
                }
                Width::V => match ctx.operand_bits() {
                    16 => ctx.read_u16()? as u64,
                    64 => ctx.read_u64()?,
                    _ => ctx.read_u32()? as u64,
                },
                _ => {
                    return Err(DecodeError::Internal {
                        reason: "unsupported immediate width",
                    })
                }
            };
            ctx.op_imm[index] = Some(value);
            imm_text(ctx, value)
        }

        Op::SxI8 => {
            let raw = ctx.read_byte()? as i8 as i64;
            let value = match ctx.operand_bits() {
                16 => raw as u16 as u64,
                32 => raw as u32 as u64,
                _ => raw as u64,
            };
            ctx.op_imm[index] = Some(value);
            imm_text(ctx, value)
        }

        Op::One => {
            if ctx.syntax.is_att() {
                "$1".to_string()
            } else {
                "1".to_string()
            }
        }

        Op::J(width) => {
            let rel = match width {
                Width::B => ctx.read_byte()? as i8 as i64,
                _ => {
                    if ctx.operand_bits() == 16 {
                        ctx.read_u16()? as i16 as i64
                    } else {
                        ctx.read_u32()? as i32 as i64
                    }
                }
            };
            let next = ctx.start().wrapping_add(ctx.cursor as u64);
            let target = branch_mask(ctx.mode, next.wrapping_add(rel as u64));
            ctx.branch_target = Some(target);
            format!("{:#x}", target)
        }

        Op::O(width) => {
            let offset = match ctx.address_bits() {
                16 => ctx.read_u16()? as u64,
                32 => ctx.read_u32()? as u64,
                _ => ctx.read_u64()?,
            };
            let seg = ctx.prefixes.seg;
            if seg.is_some() {
                ctx.prefixes.used_seg = true;
            }
            let mut out = String::new();
            if ctx.syntax.is_att() {
                if let Some(seg) = seg {
                    out.push_str(&format!("%{}:", seg.name()));
                }
                out.push_str(&format!("0x{:x}", offset));
            } else {
                if ctx.suffix_always {
                    if let Some(note) = annotation(ctx, width) {
                        out.push_str(note);
                        out.push(' ');
                    }
                }
                if let Some(seg) = seg {
                    out.push_str(&format!("{}:", seg.name()));
                }
                out.push_str(&format!("[0x{:x}]", offset));
            }
            out
        }

        Op::A => {
            let offset = if ctx.operand_bits() == 16 {
                ctx.read_u16()? as u64
            } else {
                ctx.read_u32()? as u64
            };
            let selector = ctx.read_u16()?;
            if ctx.syntax.is_att() {
                format!("$0x{:x},$0x{:x}", selector, offset)
            } else {
                format!("0x{:x}:0x{:x}", selector, offset)
            }
        }

        Op::Seg => {
            let modrm = ctx.modrm()?;
            let seg = SegReg::from_index(modrm.reg).ok_or_else(|| ctx.bad_opcode())?;
            format!("{}{}", ctx.sigil(), seg.name())
        }

        Op::Ctl => {
            let modrm = ctx.modrm()?;
            format!("{}{}", ctx.sigil(), regs::control(modrm.reg))
        }

        Op::Dbg => {
            let modrm = ctx.modrm()?;
            format!("{}{}", ctx.sigil(), regs::debug(modrm.reg))
        }

        Op::P(_) => {
            let modrm = ctx.modrm()?;
            vector_reg(ctx, modrm.reg, true)
        }

        Op::Q(width) => {
            let modrm = ctx.modrm()?;
            if modrm.is_register() {
                vector_reg(ctx, modrm.rm, true)
            } else {
                let width = if ctx.promoted { Width::Dq } else { width };
                mem_text(ctx, width)?
            }
        }

        Op::V(_) => {
            let modrm = ctx.modrm()?;
            format!("{}{}", ctx.sigil(), regs::XMM[(modrm.reg & 0xF) as usize])
        }

        Op::W(width) => {
            let modrm = ctx.modrm()?;
            if modrm.is_register() {
                format!("{}{}", ctx.sigil(), regs::XMM[(modrm.rm & 0xF) as usize])
            } else {
                mem_text(ctx, width)?
            }
        }

        Op::X(width) => {
            let seg = ctx.prefixes.seg.unwrap_or(SegReg::Ds);
            if ctx.prefixes.seg.is_some() {
                ctx.prefixes.used_seg = true;
            }
            string_ptr(ctx, width, "si", "esi", "rsi", seg)
        }

        // The destination segment of string ops is not overridable.
        Op::Y(width) => string_ptr(ctx, width, "di", "edi", "rdi", SegReg::Es),

        Op::RegV(n) => {
            let index = n | ((ctx.prefixes.rex_b() as u8) << 3);
            gpr_text(ctx, index, Width::V)
        }

        Op::RegB(n) => {
            let index = n | ((ctx.prefixes.rex_b() as u8) << 3);
            gpr_text(ctx, index, Width::B)
        }

        Op::Imp(reg) => match reg {
            ImpReg::Al => format!("{}al", ctx.sigil()),
            ImpReg::Cl => format!("{}cl", ctx.sigil()),
            ImpReg::Dx => format!("{}dx", ctx.sigil()),
            ImpReg::AccV => gpr_text(ctx, 0, Width::V),
            ImpReg::Seg(seg) => format!("{}{}", ctx.sigil(), seg.name()),
        },
    };

    ctx.operands[index] = text;
    Ok(())
}
