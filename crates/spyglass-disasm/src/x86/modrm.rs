//! ModR/M and SIB decoding and memory-operand address resolution.

use super::context::DecodeContext;
use super::prefix::{Rex, SegReg};
use super::regs;
use crate::DecodeError;
use spyglass_core::Syntax;

/// Decoded ModR/M byte.
#[derive(Debug, Clone, Copy)]
pub struct ModRm {
    /// Mod field (2 bits)
    pub mod_: u8,
    /// Reg field (3 bits, extended by REX.R)
    pub reg: u8,
    /// R/M field (3 bits, extended by REX.B)
    pub rm: u8,
}

impl ModRm {
    /// Parse a ModR/M byte with REX extension.
    pub fn parse(byte: u8, rex: Option<Rex>) -> Self {
        let rex = rex.unwrap_or_default();
        Self {
            mod_: (byte >> 6) & 0x3,
            reg: ((byte >> 3) & 0x7) | ((rex.r as u8) << 3),
            rm: (byte & 0x7) | ((rex.b as u8) << 3),
        }
    }

    /// Returns true if this ModR/M encodes a register operand (mod=11).
    pub fn is_register(&self) -> bool {
        self.mod_ == 0b11
    }
}

/// Decoded SIB byte.
#[derive(Debug, Clone, Copy)]
pub struct Sib {
    /// Scale (2 bits) - actual scale is 1 << scale
    pub scale: u8,
    /// Index register (3 bits, extended by REX.X)
    pub index: u8,
    /// Base register (3 bits, extended by REX.B)
    pub base: u8,
}

impl Sib {
    /// Parse a SIB byte with REX extension.
    pub fn parse(byte: u8, rex: Option<Rex>) -> Self {
        let rex = rex.unwrap_or_default();
        Self {
            scale: (byte >> 6) & 0x3,
            index: ((byte >> 3) & 0x7) | ((rex.x as u8) << 3),
            base: (byte & 0x7) | ((rex.b as u8) << 3),
        }
    }

    /// Returns the actual scale factor (1, 2, 4, or 8).
    pub fn scale_factor(&self) -> u8 {
        1 << self.scale
    }
}

/// A resolved memory reference, ready to render in either dialect.
#[derive(Debug, Clone, Default)]
pub struct MemRef {
    pub seg: Option<SegReg>,
    pub base: Option<&'static str>,
    pub index: Option<&'static str>,
    pub scale: u8,
    pub disp: i64,
    /// Print the displacement even when zero (an explicit disp field was
    /// present in the encoding).
    pub has_disp: bool,
    /// RIP-relative: `disp` is added to the end of the instruction.
    pub rip: bool,
}

/// Formats a signed value as `0x..` / `-0x..`.
///
/// The most negative value cannot be negated; it is spelled out so the
/// rendering never depends on wrapping behavior.
pub fn fmt_signed_hex(value: i64) -> String {
    if value == i64::MIN {
        "-0x8000000000000000".to_string()
    } else if value < 0 {
        format!("-{:#x}", -value)
    } else {
        format!("{:#x}", value)
    }
}

/// Same as [`fmt_signed_hex`] but with an explicit `+` for the Intel
/// `[base+disp]` form.
fn fmt_signed_term(value: i64) -> String {
    if value < 0 {
        fmt_signed_hex(value)
    } else {
        format!("+{:#x}", value)
    }
}

/// 16-bit addressing register pairs, indexed by ModR/M rm.
static RM16: [(Option<&str>, Option<&str>); 8] = [
    (Some("bx"), Some("si")),
    (Some("bx"), Some("di")),
    (Some("bp"), Some("si")),
    (Some("bp"), Some("di")),
    (Some("si"), None),
    (Some("di"), None),
    (Some("bp"), None),
    (Some("bx"), None),
];

/// Resolves the memory form of the current ModR/M byte, consuming any SIB
/// byte and displacement. The caller has already ruled out mod=11.
pub fn resolve_mem(ctx: &mut DecodeContext<'_>) -> Result<MemRef, DecodeError> {
    let modrm = ctx.modrm()?;
    if modrm.is_register() {
        return Err(DecodeError::Internal {
            reason: "memory resolution entered with mod=11",
        });
    }

    let address_bits = ctx.address_bits();
    let mut mem = MemRef {
        seg: ctx.prefixes.seg,
        scale: 1,
        ..MemRef::default()
    };
    if mem.seg.is_some() {
        ctx.prefixes.used_seg = true;
    }

    if address_bits == 16 {
        let rm = (modrm.rm & 0x7) as usize;
        if modrm.mod_ == 0 && rm == 6 {
            // Special case: disp16 with no base register.
            mem.disp = ctx.read_u16()? as i16 as i64;
            mem.has_disp = true;
        } else {
            let (base, index) = RM16[rm];
            mem.base = base;
            mem.index = index;
            // Register pairs carry no scale field.
            mem.scale = 0;
            match modrm.mod_ {
                1 => {
                    mem.disp = ctx.read_byte()? as i8 as i64;
                    mem.has_disp = true;
                }
                2 => {
                    mem.disp = ctx.read_u16()? as i16 as i64;
                    mem.has_disp = true;
                }
                _ => {}
            }
        }
        return Ok(mem);
    }

    let names: &[&'static str; 16] = if address_bits == 64 {
        &regs::REG64
    } else {
        &regs::REG32
    };

    let rm_low = modrm.rm & 0x7;
    if rm_low == 4 {
        // SIB byte follows.
        let sib = Sib::parse(ctx.read_byte()?, ctx.prefixes.rex);
        // Index encoding 4 with no REX.X extension means "no index".
        if sib.index != 4 {
            mem.index = Some(names[sib.index as usize]);
            mem.scale = sib.scale_factor();
        }
        if (sib.base & 0x7) == 5 && modrm.mod_ == 0 {
            // No base register, but a disp32 is present.
            mem.disp = ctx.read_u32()? as i32 as i64;
            mem.has_disp = true;
        } else {
            mem.base = Some(names[sib.base as usize]);
        }
    } else if modrm.mod_ == 0 && rm_low == 5 {
        let disp = ctx.read_u32()? as i32 as i64;
        mem.disp = disp;
        mem.has_disp = true;
        if ctx.mode.is_64bit() {
            // RIP-relative: displacement is taken from the address just
            // past the instruction, resolved once the length is known.
            mem.rip = true;
            ctx.rip_disp = Some(disp);
        }
        return Ok(mem);
    } else {
        mem.base = Some(names[modrm.rm as usize]);
    }

    match modrm.mod_ {
        1 => {
            mem.disp = ctx.read_byte()? as i8 as i64;
            mem.has_disp = true;
        }
        2 => {
            mem.disp = ctx.read_u32()? as i32 as i64;
            mem.has_disp = true;
        }
        _ => {}
    }

    Ok(mem)
}

impl MemRef {
    /// Renders the reference in the given dialect (without any size
    /// annotation; the operand decoder adds that).
    pub fn render(&self, syntax: Syntax) -> String {
        let mut out = String::new();
        match syntax {
            Syntax::Att => {
                if let Some(seg) = self.seg {
                    out.push('%');
                    out.push_str(seg.name());
                    out.push(':');
                }
                if self.rip {
                    out.push_str(&fmt_signed_hex(self.disp));
                    out.push_str("(%rip)");
                    return out;
                }
                if self.has_disp || (self.base.is_none() && self.index.is_none()) {
                    out.push_str(&fmt_signed_hex(self.disp));
                }
                if self.base.is_some() || self.index.is_some() {
                    out.push('(');
                    if let Some(base) = self.base {
                        out.push('%');
                        out.push_str(base);
                    }
                    if let Some(index) = self.index {
                        out.push_str(",%");
                        out.push_str(index);
                        if self.scale != 0 {
                            out.push_str(&format!(",{}", self.scale));
                        }
                    }
                    out.push(')');
                }
            }
            Syntax::Intel => {
                if let Some(seg) = self.seg {
                    out.push_str(seg.name());
                    out.push(':');
                }
                out.push('[');
                if self.rip {
                    out.push_str("rip");
                    out.push_str(&fmt_signed_term(self.disp));
                    out.push(']');
                    return out;
                }
                let mut have_part = false;
                if let Some(base) = self.base {
                    out.push_str(base);
                    have_part = true;
                }
                if let Some(index) = self.index {
                    if have_part {
                        out.push('+');
                    }
                    out.push_str(index);
                    if self.scale != 0 {
                        out.push_str(&format!("*{}", self.scale));
                    }
                    have_part = true;
                }
                if self.has_disp {
                    if have_part {
                        out.push_str(&fmt_signed_term(self.disp));
                    } else {
                        out.push_str(&fmt_signed_hex(self.disp));
                    }
                }
                out.push(']');
            }
        }
        out
    }

}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn signed_formatting() {
        assert_eq!(fmt_signed_hex(0x10), "0x10");
        assert_eq!(fmt_signed_hex(-8), "-0x8");
        assert_eq!(fmt_signed_hex(0), "0x0");
        // The most negative value must come out literally, not via negation.
        assert_eq!(fmt_signed_hex(i64::MIN), "-0x8000000000000000");
    }

    #[test]
    fn render_base_index_scale() {
        let mem = MemRef {
            base: Some("rax"),
            index: Some("rbx"),
            scale: 4,
            disp: -8,
            has_disp: true,
            ..MemRef::default()
        };
        assert_eq!(mem.render(Syntax::Att), "-0x8(%rax,%rbx,4)");
        assert_eq!(mem.render(Syntax::Intel), "[rax+rbx*4-0x8]");
    }

    #[test]
    fn render_rip_relative() {
        let mem = MemRef {
            disp: 0x10,
            has_disp: true,
            rip: true,
            ..MemRef::default()
        };
        assert_eq!(mem.render(Syntax::Att), "0x10(%rip)");
        assert_eq!(mem.render(Syntax::Intel), "[rip+0x10]");
    }
}
