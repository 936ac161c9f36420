//! x87 FPU decoding (escape opcodes 0xD8-0xDF).
//!
//! The encoding depends on both the escape byte and the ModR/M byte:
//! - mod != 11: memory operand; reg selects from an 8-entry table per
//!   escape byte, which also fixes the memory width.
//! - mod == 11: stack-register operand; reg selects a row that is either a
//!   direct ST(i) instruction or a named-constant sub-table indexed by rm
//!   (control ops, load-constant ops, transcendentals).

use super::context::DecodeContext;
use super::modrm;
use crate::DecodeError;

/// Memory operand width tags for x87 instructions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FloatWidth {
    /// Environment or state area; no suffix or annotation.
    Area,
    F32,
    F64,
    F80,
    I16,
    I32,
    I64,
    /// 2-byte control/status word; annotated but never suffixed.
    W16,
}

impl FloatWidth {
    fn att_suffix(&self) -> Option<char> {
        match self {
            Self::F32 => Some('s'),
            Self::F64 => Some('l'),
            Self::F80 => Some('t'),
            Self::I16 => Some('w'),
            Self::I32 => Some('l'),
            Self::I64 => Some('q'),
            Self::Area | Self::W16 => None,
        }
    }

    fn annotation(&self) -> Option<&'static str> {
        match self {
            Self::F32 | Self::I32 => Some("dword ptr"),
            Self::F64 | Self::I64 => Some("qword ptr"),
            Self::F80 => Some("tbyte ptr"),
            Self::I16 | Self::W16 => Some("word ptr"),
            Self::Area => None,
        }
    }
}

/// Memory-form table entry. An empty template marks a reserved encoding.
#[derive(Clone, Copy)]
pub struct FloatMem {
    pub template: &'static str,
    pub width: FloatWidth,
}

const fn fm(template: &'static str, width: FloatWidth) -> FloatMem {
    FloatMem { template, width }
}

const FM_BAD: FloatMem = fm("", FloatWidth::Area);

use FloatWidth::{Area, F32, F64, F80, I16, I32, I64, W16};

/// Memory forms, indexed by `(escape - 0xD8) * 8 + reg`.
pub static FLOAT_MEM: [FloatMem; 64] = [
    // D8: single-precision arithmetic.
    fm("fadd", F32),
    fm("fmul", F32),
    fm("fcom", F32),
    fm("fcomp", F32),
    fm("fsub", F32),
    fm("fsubr", F32),
    fm("fdiv", F32),
    fm("fdivr", F32),
    // D9: load/store and control.
    fm("fld", F32),
    FM_BAD,
    fm("fst", F32),
    fm("fstp", F32),
    fm("fldenv", Area),
    fm("fldcw", W16),
    fm("fnstenv", Area),
    fm("fnstcw", W16),
    // DA: 32-bit integer arithmetic.
    fm("fiadd", I32),
    fm("fimul", I32),
    fm("ficom", I32),
    fm("ficomp", I32),
    fm("fisub", I32),
    fm("fisubr", I32),
    fm("fidiv", I32),
    fm("fidivr", I32),
    // DB: 32-bit integer load/store, extended-precision load/store.
    fm("fild", I32),
    fm("fisttp", I32),
    fm("fist", I32),
    fm("fistp", I32),
    FM_BAD,
    fm("fld", F80),
    FM_BAD,
    fm("fstp", F80),
    // DC: double-precision arithmetic.
    fm("fadd", F64),
    fm("fmul", F64),
    fm("fcom", F64),
    fm("fcomp", F64),
    fm("fsub", F64),
    fm("fsubr", F64),
    fm("fdiv", F64),
    fm("fdivr", F64),
    // DD: double-precision load/store and state.
    fm("fld", F64),
    fm("fisttp", I64),
    fm("fst", F64),
    fm("fstp", F64),
    fm("frstor", Area),
    FM_BAD,
    fm("fnsave", Area),
    fm("fnstsw", W16),
    // DE: 16-bit integer arithmetic.
    fm("fiadd", I16),
    fm("fimul", I16),
    fm("ficom", I16),
    fm("ficomp", I16),
    fm("fisub", I16),
    fm("fisubr", I16),
    fm("fidiv", I16),
    fm("fidivr", I16),
    // DF: 16/64-bit integer and BCD forms.
    fm("fild", I16),
    fm("fisttp", I16),
    fm("fist", I16),
    fm("fistp", I16),
    fm("fbld", F80),
    fm("fild", I64),
    fm("fbstp", F80),
    fm("fistp", I64),
];

/// Operand shapes for register-form instructions (table order is the
/// Intel order; the composer reverses for AT&T).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StOps {
    None,
    /// `fnstsw %ax`.
    Ax,
    /// ST(i) alone.
    Sti,
    /// ST(0), ST(i).
    St0Sti,
    /// ST(i), ST(0).
    StiSt0,
}

#[derive(Clone, Copy)]
pub struct FloatInsn {
    pub template: &'static str,
    pub ops: StOps,
}

const fn fi(template: &'static str, ops: StOps) -> FloatInsn {
    FloatInsn { template, ops }
}

const FI_BAD: FloatInsn = fi("", StOps::None);

/// Register-form row: a direct instruction, or a named-constant sub-table
/// indexed by ModR/M.rm.
#[derive(Clone, Copy)]
pub enum FloatRegRow {
    Invalid,
    Insn(FloatInsn),
    Sub(&'static [FloatInsn; 8]),
}

use FloatRegRow::{Insn, Sub};
use StOps::{Ax, St0Sti, Sti, StiSt0};

static D9_NOP: [FloatInsn; 8] = [
    FI_BAD,
    FI_BAD,
    fi("fnop", StOps::None),
    FI_BAD,
    FI_BAD,
    FI_BAD,
    FI_BAD,
    FI_BAD,
];

static D9_TEST: [FloatInsn; 8] = [
    fi("fchs", StOps::None),
    fi("fabs", StOps::None),
    FI_BAD,
    FI_BAD,
    fi("ftst", StOps::None),
    fi("fxam", StOps::None),
    FI_BAD,
    FI_BAD,
];

static D9_CONST: [FloatInsn; 8] = [
    fi("fld1", StOps::None),
    fi("fldl2t", StOps::None),
    fi("fldl2e", StOps::None),
    fi("fldpi", StOps::None),
    fi("fldlg2", StOps::None),
    fi("fldln2", StOps::None),
    fi("fldz", StOps::None),
    FI_BAD,
];

static D9_TRIG: [FloatInsn; 8] = [
    fi("f2xm1", StOps::None),
    fi("fyl2x", StOps::None),
    fi("fptan", StOps::None),
    fi("fpatan", StOps::None),
    fi("fxtract", StOps::None),
    fi("fprem1", StOps::None),
    fi("fdecstp", StOps::None),
    fi("fincstp", StOps::None),
];

static D9_MISC: [FloatInsn; 8] = [
    fi("fprem", StOps::None),
    fi("fyl2xp1", StOps::None),
    fi("fsqrt", StOps::None),
    fi("fsincos", StOps::None),
    fi("frndint", StOps::None),
    fi("fscale", StOps::None),
    fi("fsin", StOps::None),
    fi("fcos", StOps::None),
];

static DA_UCOMPP: [FloatInsn; 8] = [
    FI_BAD,
    fi("fucompp", StOps::None),
    FI_BAD,
    FI_BAD,
    FI_BAD,
    FI_BAD,
    FI_BAD,
    FI_BAD,
];

static DB_CTRL: [FloatInsn; 8] = [
    FI_BAD,
    FI_BAD,
    fi("fnclex", StOps::None),
    fi("fninit", StOps::None),
    FI_BAD,
    FI_BAD,
    FI_BAD,
    FI_BAD,
];

static DE_COMPP: [FloatInsn; 8] = [
    FI_BAD,
    fi("fcompp", StOps::None),
    FI_BAD,
    FI_BAD,
    FI_BAD,
    FI_BAD,
    FI_BAD,
    FI_BAD,
];

static DF_STSW: [FloatInsn; 8] = [
    fi("fnstsw", Ax),
    FI_BAD,
    FI_BAD,
    FI_BAD,
    FI_BAD,
    FI_BAD,
    FI_BAD,
    FI_BAD,
];

/// Register forms, indexed by `[escape - 0xD8][reg]`.
pub static FLOAT_REG: [[FloatRegRow; 8]; 8] = [
    // D8: ST(0) op= ST(i).
    [
        Insn(fi("fadd", St0Sti)),
        Insn(fi("fmul", St0Sti)),
        Insn(fi("fcom", Sti)),
        Insn(fi("fcomp", Sti)),
        Insn(fi("fsub", St0Sti)),
        Insn(fi("fsubr", St0Sti)),
        Insn(fi("fdiv", St0Sti)),
        Insn(fi("fdivr", St0Sti)),
    ],
    // D9: exchange, constants, transcendentals.
    [
        Insn(fi("fld", Sti)),
        Insn(fi("fxch", Sti)),
        Sub(&D9_NOP),
        Insn(fi("fstp", Sti)),
        Sub(&D9_TEST),
        Sub(&D9_CONST),
        Sub(&D9_TRIG),
        Sub(&D9_MISC),
    ],
    // DA: conditional moves.
    [
        Insn(fi("fcmovb", St0Sti)),
        Insn(fi("fcmove", St0Sti)),
        Insn(fi("fcmovbe", St0Sti)),
        Insn(fi("fcmovu", St0Sti)),
        FloatRegRow::Invalid,
        Sub(&DA_UCOMPP),
        FloatRegRow::Invalid,
        FloatRegRow::Invalid,
    ],
    // DB: conditional moves and flag-setting compares.
    [
        Insn(fi("fcmovnb", St0Sti)),
        Insn(fi("fcmovne", St0Sti)),
        Insn(fi("fcmovnbe", St0Sti)),
        Insn(fi("fcmovnu", St0Sti)),
        Sub(&DB_CTRL),
        Insn(fi("fucomi", St0Sti)),
        Insn(fi("fcomi", St0Sti)),
        FloatRegRow::Invalid,
    ],
    // DC: ST(i) op= ST(0); subtraction and division swap direction.
    [
        Insn(fi("fadd", StiSt0)),
        Insn(fi("fmul", StiSt0)),
        Insn(fi("fcom", Sti)),
        Insn(fi("fcomp", Sti)),
        Insn(fi("fsubr", StiSt0)),
        Insn(fi("fsub", StiSt0)),
        Insn(fi("fdivr", StiSt0)),
        Insn(fi("fdiv", StiSt0)),
    ],
    // DD: free/store/compare.
    [
        Insn(fi("ffree", Sti)),
        FloatRegRow::Invalid,
        Insn(fi("fst", Sti)),
        Insn(fi("fstp", Sti)),
        Insn(fi("fucom", Sti)),
        Insn(fi("fucomp", Sti)),
        FloatRegRow::Invalid,
        FloatRegRow::Invalid,
    ],
    // DE: arithmetic with pop.
    [
        Insn(fi("faddp", StiSt0)),
        Insn(fi("fmulp", StiSt0)),
        FloatRegRow::Invalid,
        Sub(&DE_COMPP),
        Insn(fi("fsubrp", StiSt0)),
        Insn(fi("fsubp", StiSt0)),
        Insn(fi("fdivrp", StiSt0)),
        Insn(fi("fdivp", StiSt0)),
    ],
    // DF: free-with-pop, status word, flag-setting compares with pop.
    [
        Insn(fi("ffreep", Sti)),
        FloatRegRow::Invalid,
        FloatRegRow::Invalid,
        FloatRegRow::Invalid,
        Sub(&DF_STSW),
        Insn(fi("fucomip", St0Sti)),
        Insn(fi("fcomip", St0Sti)),
        FloatRegRow::Invalid,
    ],
];

fn st0(ctx: &DecodeContext<'_>) -> String {
    format!("{}st", ctx.sigil())
}

fn sti(ctx: &DecodeContext<'_>, i: u8) -> String {
    format!("{}st({})", ctx.sigil(), i)
}

/// The wait pseudo-prefix folds no-wait mnemonics into their waiting
/// forms (`fnstcw` -> `fstcw`).
fn fold_wait(ctx: &mut DecodeContext<'_>, mnemonic: &mut String) {
    if ctx.prefixes.wait && mnemonic.starts_with("fn") {
        mnemonic.remove(1);
        ctx.prefixes.used_wait = true;
    }
}

/// Decodes an x87 instruction for `escape` in 0xD8-0xDF.
/// Returns the mnemonic and the number of operands rendered.
pub fn decode(ctx: &mut DecodeContext<'_>, escape: u8) -> Result<(String, usize), DecodeError> {
    let modrm = ctx.load_modrm()?;
    let table = (escape - 0xD8) as usize;
    let reg = (modrm.reg & 0x7) as usize;

    if !modrm.is_register() {
        let entry = &FLOAT_MEM[table * 8 + reg];
        if entry.template.is_empty() {
            return Err(ctx.bad_opcode());
        }
        let mem = modrm::resolve_mem(ctx)?;
        let mut text = String::new();
        if !ctx.syntax.is_att() {
            if let Some(note) = entry.width.annotation() {
                text.push_str(note);
                text.push(' ');
            }
        }
        text.push_str(&mem.render(ctx.syntax));
        ctx.operands[0] = text;

        let mut mnemonic = entry.template.to_string();
        if ctx.syntax.is_att() {
            if let Some(suffix) = entry.width.att_suffix() {
                mnemonic.push(suffix);
            }
        }
        fold_wait(ctx, &mut mnemonic);
        return Ok((mnemonic, 1));
    }

    let rm = modrm.rm & 0x7;
    let insn = match &FLOAT_REG[table][reg] {
        FloatRegRow::Invalid => return Err(ctx.bad_opcode()),
        Insn(insn) => *insn,
        Sub(rows) => {
            let insn = rows[rm as usize];
            if insn.template.is_empty() {
                return Err(ctx.bad_opcode());
            }
            insn
        }
    };

    let (first, second) = match insn.ops {
        StOps::None => (None, None),
        Ax => (Some(format!("{}ax", ctx.sigil())), None),
        Sti => (Some(sti(ctx, rm)), None),
        St0Sti => (Some(st0(ctx)), Some(sti(ctx, rm))),
        StiSt0 => (Some(sti(ctx, rm)), Some(st0(ctx))),
    };
    let mut count = 0;
    if let Some(text) = first {
        ctx.operands[0] = text;
        count = 1;
    }
    if let Some(text) = second {
        ctx.operands[1] = text;
        count = 2;
    }

    let mut mnemonic = insn.template.to_string();
    fold_wait(ctx, &mut mnemonic);
    Ok((mnemonic, count))
}
