//! Opcode tables: one-byte and two-byte maps plus the group,
//! mandatory-prefix and mode-dependent sub-tables they redirect into.
//!
//! Templates use the macros documented in `template.rs`; operand slots use
//! the addressing-method letters from `operand.rs`.

#![allow(dead_code)]

use super::operand::ImpReg::{AccV, Al, Cl, Dx, Seg as ISeg};
use super::operand::Op::{self, Ctl, Dbg, Imp, One, RegB, RegV, Seg, SxI8, A, E, G, I, J, M, O, P, Q, R, V, W, X, Y};
use super::operand::Width::{B as Wb, D as Wd, Dq, Opaque, Ptr, Q as Wq, V as Wv, W as Ww, Z as Wz};
use super::prefix::SegReg;

/// Post-hoc mnemonic fixups (see `fixup.rs`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fixup {
    None,
    /// 0x98/0x99: mnemonic keyed by operand size and dialect.
    SizeConvert,
    /// 0xE3: jcxz/jecxz/jrcxz keyed by address size.
    LoopWidth,
    /// 0x0F0F: 3DNow! trailing suffix byte selects the mnemonic.
    Amd3dNow,
    /// 0x0FC2: compare-predicate immediate folds into the mnemonic.
    SseCompare,
    /// 0x0F01 register forms: monitor/mwait, vmcall family, swapgs...
    SysGroup,
    /// 0x0FAE register forms: lfence/mfence/sfence.
    Fence,
    /// 0x0FC7/1: cmpxchg8b widens to cmpxchg16b under REX.W.
    CmpxchgWide,
}

/// Instruction flags.
pub mod flags {
    /// Operand size defaults to 64 bits in long mode (push/pop/call...).
    pub const DEFAULT64: u16 = 1 << 0;
    /// Always apply the size suffix / memory annotation, even when a
    /// register operand is present (string ops).
    pub const SUFFIX: u16 = 1 << 1;
    /// 0xF3 renders as `rep` rather than `repz` on this instruction.
    pub const REP: u16 = 1 << 2;
    /// AT&T marks the operand with `*` (indirect call/jmp).
    pub const INDIRECT: u16 = 1 << 3;
    /// 0x66 promotes this MMX encoding to XMM registers.
    pub const PROMOTE: u16 = 1 << 4;
    /// Operands render in table order in both dialects (enter, bound).
    pub const KEEP_ORDER: u16 = 1 << 5;
}

/// A fully-resolved instruction pattern: mnemonic template plus up to
/// three operand descriptors.
#[derive(Debug, Clone, Copy)]
pub struct Inst {
    pub template: &'static str,
    pub ops: [Op; 3],
    pub flags: u16,
    pub fixup: Fixup,
}

impl Inst {
    pub const fn flag(mut self, flag: u16) -> Self {
        self.flags |= flag;
        self
    }

    pub const fn fix(mut self, fixup: Fixup) -> Self {
        self.fixup = fixup;
        self
    }

    pub const fn has_flag(&self, flag: u16) -> bool {
        self.flags & flag != 0
    }
}

/// One opcode-table slot. Redirect variants are resolved by secondary
/// dispatch before any operand is decoded.
#[derive(Debug, Clone, Copy)]
pub enum Entry {
    /// No instruction; decoding reports BadOpcode.
    Invalid,
    /// Directly decodable.
    Direct(Inst),
    /// Re-dispatch on ModR/M.reg; the site's operand slots apply to rows
    /// that do not carry their own.
    Group { table: u8, ops: [Op; 3] },
    /// Re-dispatch on the active mandatory prefix (none/F3/66/F2).
    Prefixed(u8),
    /// Re-dispatch on execution mode (legacy row 0, long-mode row 1).
    Mode64(u8),
    /// x87 escape; handed to the floating-point dispatcher.
    Float,
}

use Entry::{Float, Invalid};

const NOP: [Op; 3] = [Op::None, Op::None, Op::None];

pub const fn i0(template: &'static str) -> Inst {
    Inst {
        template,
        ops: NOP,
        flags: 0,
        fixup: Fixup::None,
    }
}

pub const fn i1(template: &'static str, a: Op) -> Inst {
    Inst {
        template,
        ops: [a, Op::None, Op::None],
        flags: 0,
        fixup: Fixup::None,
    }
}

pub const fn i2(template: &'static str, a: Op, b: Op) -> Inst {
    Inst {
        template,
        ops: [a, b, Op::None],
        flags: 0,
        fixup: Fixup::None,
    }
}

pub const fn i3(template: &'static str, a: Op, b: Op, c: Op) -> Inst {
    Inst {
        template,
        ops: [a, b, c],
        flags: 0,
        fixup: Fixup::None,
    }
}

const fn d0(template: &'static str) -> Entry {
    Entry::Direct(i0(template))
}

const fn d1(template: &'static str, a: Op) -> Entry {
    Entry::Direct(i1(template, a))
}

const fn d2(template: &'static str, a: Op, b: Op) -> Entry {
    Entry::Direct(i2(template, a, b))
}

const fn d3(template: &'static str, a: Op, b: Op, c: Op) -> Entry {
    Entry::Direct(i3(template, a, b, c))
}

const fn e(inst: Inst) -> Entry {
    Entry::Direct(inst)
}

const fn grp0(table: u8) -> Entry {
    Entry::Group { table, ops: NOP }
}

const fn grp1(table: u8, a: Op) -> Entry {
    Entry::Group {
        table,
        ops: [a, Op::None, Op::None],
    }
}

const fn grp2(table: u8, a: Op, b: Op) -> Entry {
    Entry::Group {
        table,
        ops: [a, b, Op::None],
    }
}

/// MMX op that 0x66 promotes to the XMM form.
const fn mmx(template: &'static str) -> Entry {
    e(i2(template, P(Wq), Q(Wq)).flag(flags::PROMOTE))
}

// ---------------------------------------------------------------------------
// Group tables (selected by ModR/M.reg)
// ---------------------------------------------------------------------------

pub const G_1: u8 = 0;
pub const G_1A: u8 = 1;
pub const G_2: u8 = 2;
pub const G_3B: u8 = 3;
pub const G_3V: u8 = 4;
pub const G_4: u8 = 5;
pub const G_5: u8 = 6;
pub const G_6: u8 = 7;
pub const G_7: u8 = 8;
pub const G_8: u8 = 9;
pub const G_9: u8 = 10;
pub const G_12: u8 = 11;
pub const G_13: u8 = 12;
pub const G_14: u8 = 13;
pub const G_15: u8 = 14;
pub const G_16: u8 = 15;
pub const G_PF: u8 = 16;
pub const G_11: u8 = 17;

pub static GROUPS: [[Entry; 8]; 18] = [
    // Group 1: 0x80/0x81/0x83 immediate ALU ops.
    [
        d0("addS"),
        d0("orS"),
        d0("adcS"),
        d0("sbbS"),
        d0("andS"),
        d0("subS"),
        d0("xorS"),
        d0("cmpS"),
    ],
    // Group 1A: 0x8F.
    [
        e(i0("popS").flag(flags::DEFAULT64)),
        Invalid,
        Invalid,
        Invalid,
        Invalid,
        Invalid,
        Invalid,
        Invalid,
    ],
    // Group 2: shifts and rotates.
    [
        d0("rolS"),
        d0("rorS"),
        d0("rclS"),
        d0("rcrS"),
        d0("shlS"),
        d0("shrS"),
        d0("shlS"),
        d0("sarS"),
    ],
    // Group 3, byte forms: 0xF6.
    [
        d2("testS", E(Wb), I(Wb)),
        Invalid,
        d1("notS", E(Wb)),
        d1("negS", E(Wb)),
        d1("mulS", E(Wb)),
        d1("imulS", E(Wb)),
        d1("divS", E(Wb)),
        d1("idivS", E(Wb)),
    ],
    // Group 3, full-size forms: 0xF7.
    [
        d2("testS", E(Wv), I(Wz)),
        Invalid,
        d1("notS", E(Wv)),
        d1("negS", E(Wv)),
        d1("mulS", E(Wv)),
        d1("imulS", E(Wv)),
        d1("divS", E(Wv)),
        d1("idivS", E(Wv)),
    ],
    // Group 4: 0xFE.
    [
        d0("incS"),
        d0("decS"),
        Invalid,
        Invalid,
        Invalid,
        Invalid,
        Invalid,
        Invalid,
    ],
    // Group 5: 0xFF.
    [
        d0("incS"),
        d0("decS"),
        e(i0("callS").flag(flags::DEFAULT64 | flags::INDIRECT)),
        e(i1("{lcall|lcall|call|call}", M(Ptr))),
        e(i0("jmpS").flag(flags::DEFAULT64 | flags::INDIRECT)),
        e(i1("{ljmp|ljmp|jmp|jmp}", M(Ptr))),
        e(i0("pushS").flag(flags::DEFAULT64)),
        Invalid,
    ],
    // Group 6: 0x0F00 segment/descriptor ops.
    [
        d1("sldt", E(Ww)),
        d1("str", E(Ww)),
        d1("lldt", E(Ww)),
        d1("ltr", E(Ww)),
        d1("verr", E(Ww)),
        d1("verw", E(Ww)),
        Invalid,
        Invalid,
    ],
    // Group 7: 0x0F01 system ops; register forms resolve via fixup.
    [
        e(i1("sgdt", M(Opaque)).fix(Fixup::SysGroup)),
        e(i1("sidt", M(Opaque)).fix(Fixup::SysGroup)),
        e(i1("lgdt", M(Opaque)).fix(Fixup::SysGroup)),
        d1("lidt", M(Opaque)),
        d1("smsw", E(Wv)),
        Invalid,
        d1("lmsw", E(Ww)),
        e(i1("invlpg", M(Opaque)).fix(Fixup::SysGroup)),
    ],
    // Group 8: 0x0FBA immediate bit tests.
    [
        Invalid,
        Invalid,
        Invalid,
        Invalid,
        d0("btS"),
        d0("btsS"),
        d0("btrS"),
        d0("btcS"),
    ],
    // Group 9: 0x0FC7.
    [
        Invalid,
        e(i1("cmpxchg8b", M(Wq)).fix(Fixup::CmpxchgWide)),
        Invalid,
        Invalid,
        Invalid,
        Invalid,
        d1("rdrand", R(Wv)),
        d1("rdseed", R(Wv)),
    ],
    // Group 12: 0x0F71 packed word shifts by immediate.
    [
        Invalid,
        Invalid,
        e(i2("psrlw", Q(Wq), I(Wb)).flag(flags::PROMOTE)),
        Invalid,
        e(i2("psraw", Q(Wq), I(Wb)).flag(flags::PROMOTE)),
        Invalid,
        e(i2("psllw", Q(Wq), I(Wb)).flag(flags::PROMOTE)),
        Invalid,
    ],
    // Group 13: 0x0F72 packed dword shifts by immediate.
    [
        Invalid,
        Invalid,
        e(i2("psrld", Q(Wq), I(Wb)).flag(flags::PROMOTE)),
        Invalid,
        e(i2("psrad", Q(Wq), I(Wb)).flag(flags::PROMOTE)),
        Invalid,
        e(i2("pslld", Q(Wq), I(Wb)).flag(flags::PROMOTE)),
        Invalid,
    ],
    // Group 14: 0x0F73 packed qword shifts by immediate.
    [
        Invalid,
        Invalid,
        e(i2("psrlq", Q(Wq), I(Wb)).flag(flags::PROMOTE)),
        Entry::Prefixed(P_PSRLDQ),
        Invalid,
        Invalid,
        e(i2("psllq", Q(Wq), I(Wb)).flag(flags::PROMOTE)),
        Entry::Prefixed(P_PSLLDQ),
    ],
    // Group 15: 0x0FAE; register forms are the fences, via fixup.
    [
        d1("fxsave", M(Opaque)),
        d1("fxrstor", M(Opaque)),
        d1("ldmxcsr", M(Wd)),
        d1("stmxcsr", M(Wd)),
        d1("xsave", M(Opaque)),
        e(i1("xrstor", M(Opaque)).fix(Fixup::Fence)),
        e(i1("xsaveopt", M(Opaque)).fix(Fixup::Fence)),
        e(i1("clflush", M(Wb)).fix(Fixup::Fence)),
    ],
    // Group 16: 0x0F18 prefetch hints.
    [
        d1("prefetchnta", M(Wb)),
        d1("prefetcht0", M(Wb)),
        d1("prefetcht1", M(Wb)),
        d1("prefetcht2", M(Wb)),
        Invalid,
        Invalid,
        Invalid,
        Invalid,
    ],
    // 3DNow! prefetch group: 0x0F0D.
    [
        d1("prefetch", M(Wb)),
        d1("prefetchw", M(Wb)),
        Invalid,
        Invalid,
        Invalid,
        Invalid,
        Invalid,
        Invalid,
    ],
    // Group 11: 0xC6/0xC7 immediate moves.
    [
        d0("movS"),
        Invalid,
        Invalid,
        Invalid,
        Invalid,
        Invalid,
        Invalid,
        Invalid,
    ],
];

// ---------------------------------------------------------------------------
// Mandatory-prefix tables (rows: none, F3, 66, F2)
// ---------------------------------------------------------------------------

pub const P_90: u8 = 0;
pub const P_10: u8 = 1;
pub const P_11: u8 = 2;
pub const P_12: u8 = 3;
pub const P_13: u8 = 4;
pub const P_14: u8 = 5;
pub const P_15: u8 = 6;
pub const P_16: u8 = 7;
pub const P_17: u8 = 8;
pub const P_28: u8 = 9;
pub const P_29: u8 = 10;
pub const P_2A: u8 = 11;
pub const P_2B: u8 = 12;
pub const P_2C: u8 = 13;
pub const P_2D: u8 = 14;
pub const P_2E: u8 = 15;
pub const P_2F: u8 = 16;
pub const P_50: u8 = 17;
pub const P_51: u8 = 18;
pub const P_52: u8 = 19;
pub const P_53: u8 = 20;
pub const P_54: u8 = 21;
pub const P_55: u8 = 22;
pub const P_56: u8 = 23;
pub const P_57: u8 = 24;
pub const P_58: u8 = 25;
pub const P_59: u8 = 26;
pub const P_5A: u8 = 27;
pub const P_5B: u8 = 28;
pub const P_5C: u8 = 29;
pub const P_5D: u8 = 30;
pub const P_5E: u8 = 31;
pub const P_5F: u8 = 32;
pub const P_6C: u8 = 33;
pub const P_6D: u8 = 34;
pub const P_6F: u8 = 35;
pub const P_70: u8 = 36;
pub const P_7E: u8 = 37;
pub const P_7F: u8 = 38;
pub const P_B8: u8 = 39;
pub const P_BC: u8 = 40;
pub const P_BD: u8 = 41;
pub const P_C2: u8 = 42;
pub const P_C6: u8 = 43;
pub const P_D6: u8 = 44;
pub const P_E6: u8 = 45;
pub const P_E7: u8 = 46;
pub const P_F7: u8 = 47;
pub const P_PSRLDQ: u8 = 48;
pub const P_PSLLDQ: u8 = 49;

pub static PREFIXED: [[Entry; 4]; 50] = [
    // 0x90: nop / pause / xchg ax,ax.
    [
        d0("nop"),
        d0("pause"),
        e(i2("xchg", RegV(0), Imp(AccV))),
        Invalid,
    ],
    // 0x0F10.
    [
        d2("movups", V(Dq), W(Dq)),
        d2("movss", V(Dq), W(Wd)),
        d2("movupd", V(Dq), W(Dq)),
        d2("movsd", V(Dq), W(Wq)),
    ],
    // 0x0F11.
    [
        d2("movups", W(Dq), V(Dq)),
        d2("movss", W(Wd), V(Dq)),
        d2("movupd", W(Dq), V(Dq)),
        d2("movsd", W(Wq), V(Dq)),
    ],
    // 0x0F12.
    [
        d2("movlps", V(Dq), W(Wq)),
        d2("movsldup", V(Dq), W(Dq)),
        d2("movlpd", V(Dq), W(Wq)),
        d2("movddup", V(Dq), W(Wq)),
    ],
    // 0x0F13.
    [
        d2("movlps", M(Wq), V(Dq)),
        Invalid,
        d2("movlpd", M(Wq), V(Dq)),
        Invalid,
    ],
    // 0x0F14.
    [
        d2("unpcklps", V(Dq), W(Dq)),
        Invalid,
        d2("unpcklpd", V(Dq), W(Dq)),
        Invalid,
    ],
    // 0x0F15.
    [
        d2("unpckhps", V(Dq), W(Dq)),
        Invalid,
        d2("unpckhpd", V(Dq), W(Dq)),
        Invalid,
    ],
    // 0x0F16.
    [
        d2("movhps", V(Dq), W(Wq)),
        d2("movshdup", V(Dq), W(Dq)),
        d2("movhpd", V(Dq), W(Wq)),
        Invalid,
    ],
    // 0x0F17.
    [
        d2("movhps", M(Wq), V(Dq)),
        Invalid,
        d2("movhpd", M(Wq), V(Dq)),
        Invalid,
    ],
    // 0x0F28.
    [
        d2("movaps", V(Dq), W(Dq)),
        Invalid,
        d2("movapd", V(Dq), W(Dq)),
        Invalid,
    ],
    // 0x0F29.
    [
        d2("movaps", W(Dq), V(Dq)),
        Invalid,
        d2("movapd", W(Dq), V(Dq)),
        Invalid,
    ],
    // 0x0F2A.
    [
        d2("cvtpi2ps", V(Dq), Q(Wq)),
        d2("cvtsi2ssS", V(Dq), E(Wv)),
        d2("cvtpi2pd", V(Dq), Q(Wq)),
        d2("cvtsi2sdS", V(Dq), E(Wv)),
    ],
    // 0x0F2B.
    [
        d2("movntps", M(Dq), V(Dq)),
        Invalid,
        d2("movntpd", M(Dq), V(Dq)),
        Invalid,
    ],
    // 0x0F2C.
    [
        d2("cvttps2pi", P(Wq), W(Dq)),
        d2("cvttss2si", G(Wv), W(Wd)),
        d2("cvttpd2pi", P(Wq), W(Dq)),
        d2("cvttsd2si", G(Wv), W(Wq)),
    ],
    // 0x0F2D.
    [
        d2("cvtps2pi", P(Wq), W(Dq)),
        d2("cvtss2si", G(Wv), W(Wd)),
        d2("cvtpd2pi", P(Wq), W(Dq)),
        d2("cvtsd2si", G(Wv), W(Wq)),
    ],
    // 0x0F2E.
    [
        d2("ucomiss", V(Dq), W(Wd)),
        Invalid,
        d2("ucomisd", V(Dq), W(Wq)),
        Invalid,
    ],
    // 0x0F2F.
    [
        d2("comiss", V(Dq), W(Wd)),
        Invalid,
        d2("comisd", V(Dq), W(Wq)),
        Invalid,
    ],
    // 0x0F50.
    [
        d2("movmskps", G(Wd), W(Dq)),
        Invalid,
        d2("movmskpd", G(Wd), W(Dq)),
        Invalid,
    ],
    // 0x0F51.
    [
        d2("sqrtps", V(Dq), W(Dq)),
        d2("sqrtss", V(Dq), W(Wd)),
        d2("sqrtpd", V(Dq), W(Dq)),
        d2("sqrtsd", V(Dq), W(Wq)),
    ],
    // 0x0F52.
    [
        d2("rsqrtps", V(Dq), W(Dq)),
        d2("rsqrtss", V(Dq), W(Wd)),
        Invalid,
        Invalid,
    ],
    // 0x0F53.
    [
        d2("rcpps", V(Dq), W(Dq)),
        d2("rcpss", V(Dq), W(Wd)),
        Invalid,
        Invalid,
    ],
    // 0x0F54.
    [
        d2("andps", V(Dq), W(Dq)),
        Invalid,
        d2("andpd", V(Dq), W(Dq)),
        Invalid,
    ],
    // 0x0F55.
    [
        d2("andnps", V(Dq), W(Dq)),
        Invalid,
        d2("andnpd", V(Dq), W(Dq)),
        Invalid,
    ],
    // 0x0F56.
    [
        d2("orps", V(Dq), W(Dq)),
        Invalid,
        d2("orpd", V(Dq), W(Dq)),
        Invalid,
    ],
    // 0x0F57.
    [
        d2("xorps", V(Dq), W(Dq)),
        Invalid,
        d2("xorpd", V(Dq), W(Dq)),
        Invalid,
    ],
    // 0x0F58.
    [
        d2("addps", V(Dq), W(Dq)),
        d2("addss", V(Dq), W(Wd)),
        d2("addpd", V(Dq), W(Dq)),
        d2("addsd", V(Dq), W(Wq)),
    ],
    // 0x0F59.
    [
        d2("mulps", V(Dq), W(Dq)),
        d2("mulss", V(Dq), W(Wd)),
        d2("mulpd", V(Dq), W(Dq)),
        d2("mulsd", V(Dq), W(Wq)),
    ],
    // 0x0F5A.
    [
        d2("cvtps2pd", V(Dq), W(Wq)),
        d2("cvtss2sd", V(Dq), W(Wd)),
        d2("cvtpd2ps", V(Dq), W(Dq)),
        d2("cvtsd2ss", V(Dq), W(Wq)),
    ],
    // 0x0F5B.
    [
        d2("cvtdq2ps", V(Dq), W(Dq)),
        d2("cvttps2dq", V(Dq), W(Dq)),
        d2("cvtps2dq", V(Dq), W(Dq)),
        Invalid,
    ],
    // 0x0F5C.
    [
        d2("subps", V(Dq), W(Dq)),
        d2("subss", V(Dq), W(Wd)),
        d2("subpd", V(Dq), W(Dq)),
        d2("subsd", V(Dq), W(Wq)),
    ],
    // 0x0F5D.
    [
        d2("minps", V(Dq), W(Dq)),
        d2("minss", V(Dq), W(Wd)),
        d2("minpd", V(Dq), W(Dq)),
        d2("minsd", V(Dq), W(Wq)),
    ],
    // 0x0F5E.
    [
        d2("divps", V(Dq), W(Dq)),
        d2("divss", V(Dq), W(Wd)),
        d2("divpd", V(Dq), W(Dq)),
        d2("divsd", V(Dq), W(Wq)),
    ],
    // 0x0F5F.
    [
        d2("maxps", V(Dq), W(Dq)),
        d2("maxss", V(Dq), W(Wd)),
        d2("maxpd", V(Dq), W(Dq)),
        d2("maxsd", V(Dq), W(Wq)),
    ],
    // 0x0F6C.
    [
        Invalid,
        Invalid,
        d2("punpcklqdq", V(Dq), W(Dq)),
        Invalid,
    ],
    // 0x0F6D.
    [
        Invalid,
        Invalid,
        d2("punpckhqdq", V(Dq), W(Dq)),
        Invalid,
    ],
    // 0x0F6F.
    [
        d2("movq", P(Wq), Q(Wq)),
        d2("movdqu", V(Dq), W(Dq)),
        d2("movdqa", V(Dq), W(Dq)),
        Invalid,
    ],
    // 0x0F70.
    [
        d3("pshufw", P(Wq), Q(Wq), I(Wb)),
        d3("pshufhw", V(Dq), W(Dq), I(Wb)),
        d3("pshufd", V(Dq), W(Dq), I(Wb)),
        d3("pshuflw", V(Dq), W(Dq), I(Wb)),
    ],
    // 0x0F7E.
    [
        d2("movd", E(Wd), P(Wq)),
        d2("movq", V(Dq), W(Wq)),
        d2("movd", E(Wd), V(Dq)),
        Invalid,
    ],
    // 0x0F7F.
    [
        d2("movq", Q(Wq), P(Wq)),
        d2("movdqu", W(Dq), V(Dq)),
        d2("movdqa", W(Dq), V(Dq)),
        Invalid,
    ],
    // 0x0FB8.
    [Invalid, d2("popcnt", G(Wv), E(Wv)), Invalid, Invalid],
    // 0x0FBC.
    [
        d2("bsf", G(Wv), E(Wv)),
        d2("tzcnt", G(Wv), E(Wv)),
        Invalid,
        Invalid,
    ],
    // 0x0FBD.
    [
        d2("bsr", G(Wv), E(Wv)),
        d2("lzcnt", G(Wv), E(Wv)),
        Invalid,
        Invalid,
    ],
    // 0x0FC2.
    [
        e(i3("cmpps", V(Dq), W(Dq), I(Wb)).fix(Fixup::SseCompare)),
        e(i3("cmpss", V(Dq), W(Wd), I(Wb)).fix(Fixup::SseCompare)),
        e(i3("cmppd", V(Dq), W(Dq), I(Wb)).fix(Fixup::SseCompare)),
        e(i3("cmpsd", V(Dq), W(Wq), I(Wb)).fix(Fixup::SseCompare)),
    ],
    // 0x0FC6.
    [
        d3("shufps", V(Dq), W(Dq), I(Wb)),
        Invalid,
        d3("shufpd", V(Dq), W(Dq), I(Wb)),
        Invalid,
    ],
    // 0x0FD6.
    [
        Invalid,
        d2("movq2dq", V(Dq), Q(Wq)),
        d2("movq", W(Wq), V(Dq)),
        d2("movdq2q", P(Wq), W(Dq)),
    ],
    // 0x0FE6.
    [
        Invalid,
        d2("cvtdq2pd", V(Dq), W(Wq)),
        d2("cvttpd2dq", V(Dq), W(Dq)),
        d2("cvtpd2dq", V(Dq), W(Dq)),
    ],
    // 0x0FE7.
    [
        d2("movntq", M(Wq), P(Wq)),
        Invalid,
        d2("movntdq", M(Dq), V(Dq)),
        Invalid,
    ],
    // 0x0FF7.
    [
        d2("maskmovq", P(Wq), Q(Wq)),
        Invalid,
        d2("maskmovdqu", V(Dq), W(Dq)),
        Invalid,
    ],
    // 0x0F73 /3.
    [
        Invalid,
        Invalid,
        d2("psrldq", W(Dq), I(Wb)),
        Invalid,
    ],
    // 0x0F73 /7.
    [
        Invalid,
        Invalid,
        d2("pslldq", W(Dq), I(Wb)),
        Invalid,
    ],
];

// ---------------------------------------------------------------------------
// Mode-dependent tables (row 0: 16/32-bit, row 1: 64-bit)
// ---------------------------------------------------------------------------

pub const M_06: u8 = 0;
pub const M_07: u8 = 1;
pub const M_0E: u8 = 2;
pub const M_16: u8 = 3;
pub const M_17: u8 = 4;
pub const M_1E: u8 = 5;
pub const M_1F: u8 = 6;
pub const M_27: u8 = 7;
pub const M_2F: u8 = 8;
pub const M_37: u8 = 9;
pub const M_3F: u8 = 10;
pub const M_60: u8 = 11;
pub const M_61: u8 = 12;
pub const M_62: u8 = 13;
pub const M_63: u8 = 14;
pub const M_82: u8 = 15;
pub const M_9A: u8 = 16;
pub const M_C4: u8 = 17;
pub const M_C5: u8 = 18;
pub const M_CE: u8 = 19;
pub const M_D4: u8 = 20;
pub const M_D5: u8 = 21;
pub const M_EA: u8 = 22;

pub static MODE64: [[Entry; 2]; 23] = [
    [d1("push", Imp(ISeg(SegReg::Es))), Invalid],
    [d1("pop", Imp(ISeg(SegReg::Es))), Invalid],
    [d1("push", Imp(ISeg(SegReg::Cs))), Invalid],
    [d1("push", Imp(ISeg(SegReg::Ss))), Invalid],
    [d1("pop", Imp(ISeg(SegReg::Ss))), Invalid],
    [d1("push", Imp(ISeg(SegReg::Ds))), Invalid],
    [d1("pop", Imp(ISeg(SegReg::Ds))), Invalid],
    [d0("daa"), Invalid],
    [d0("das"), Invalid],
    [d0("aaa"), Invalid],
    [d0("aas"), Invalid],
    [d0("pusha"), Invalid],
    [d0("popa"), Invalid],
    [
        e(i2("bound", G(Wv), M(Opaque)).flag(flags::KEEP_ORDER)),
        Invalid,
    ],
    [
        d2("arpl", E(Ww), G(Ww)),
        d2("{movslq|movslq|movsxd|movsxd}", G(Wv), E(Wd)),
    ],
    [grp2(G_1, E(Wb), I(Wb)), Invalid],
    [d1("{lcall|lcall|call|call}", A), Invalid],
    [d2("les", G(Wz), M(Ptr)), Invalid],
    [d2("lds", G(Wz), M(Ptr)), Invalid],
    [d0("into"), Invalid],
    [d1("aam", I(Wb)), Invalid],
    [d1("aad", I(Wb)), Invalid],
    [d1("{ljmp|ljmp|jmp|jmp}", A), Invalid],
];

// ---------------------------------------------------------------------------
// One-byte opcode map
// ---------------------------------------------------------------------------

pub static ONE_BYTE: [Entry; 256] = {
    let mut t = [Invalid; 256];

    // ALU families: r/m,r - r,r/m - acc,imm.
    t[0x00] = d2("addS", E(Wb), G(Wb));
    t[0x01] = d2("addS", E(Wv), G(Wv));
    t[0x02] = d2("addS", G(Wb), E(Wb));
    t[0x03] = d2("addS", G(Wv), E(Wv));
    t[0x04] = d2("add", Imp(Al), I(Wb));
    t[0x05] = d2("add", Imp(AccV), I(Wz));
    t[0x06] = Entry::Mode64(M_06);
    t[0x07] = Entry::Mode64(M_07);
    t[0x08] = d2("orS", E(Wb), G(Wb));
    t[0x09] = d2("orS", E(Wv), G(Wv));
    t[0x0A] = d2("orS", G(Wb), E(Wb));
    t[0x0B] = d2("orS", G(Wv), E(Wv));
    t[0x0C] = d2("or", Imp(Al), I(Wb));
    t[0x0D] = d2("or", Imp(AccV), I(Wz));
    t[0x0E] = Entry::Mode64(M_0E);
    // 0x0F: two-byte escape, handled by the driver.

    t[0x10] = d2("adcS", E(Wb), G(Wb));
    t[0x11] = d2("adcS", E(Wv), G(Wv));
    t[0x12] = d2("adcS", G(Wb), E(Wb));
    t[0x13] = d2("adcS", G(Wv), E(Wv));
    t[0x14] = d2("adc", Imp(Al), I(Wb));
    t[0x15] = d2("adc", Imp(AccV), I(Wz));
    t[0x16] = Entry::Mode64(M_16);
    t[0x17] = Entry::Mode64(M_17);
    t[0x18] = d2("sbbS", E(Wb), G(Wb));
    t[0x19] = d2("sbbS", E(Wv), G(Wv));
    t[0x1A] = d2("sbbS", G(Wb), E(Wb));
    t[0x1B] = d2("sbbS", G(Wv), E(Wv));
    t[0x1C] = d2("sbb", Imp(Al), I(Wb));
    t[0x1D] = d2("sbb", Imp(AccV), I(Wz));
    t[0x1E] = Entry::Mode64(M_1E);
    t[0x1F] = Entry::Mode64(M_1F);

    t[0x20] = d2("andS", E(Wb), G(Wb));
    t[0x21] = d2("andS", E(Wv), G(Wv));
    t[0x22] = d2("andS", G(Wb), E(Wb));
    t[0x23] = d2("andS", G(Wv), E(Wv));
    t[0x24] = d2("and", Imp(Al), I(Wb));
    t[0x25] = d2("and", Imp(AccV), I(Wz));
    // 0x26: ES override prefix.
    t[0x27] = Entry::Mode64(M_27);
    t[0x28] = d2("subS", E(Wb), G(Wb));
    t[0x29] = d2("subS", E(Wv), G(Wv));
    t[0x2A] = d2("subS", G(Wb), E(Wb));
    t[0x2B] = d2("subS", G(Wv), E(Wv));
    t[0x2C] = d2("sub", Imp(Al), I(Wb));
    t[0x2D] = d2("sub", Imp(AccV), I(Wz));
    // 0x2E: CS override prefix.
    t[0x2F] = Entry::Mode64(M_2F);

    t[0x30] = d2("xorS", E(Wb), G(Wb));
    t[0x31] = d2("xorS", E(Wv), G(Wv));
    t[0x32] = d2("xorS", G(Wb), E(Wb));
    t[0x33] = d2("xorS", G(Wv), E(Wv));
    t[0x34] = d2("xor", Imp(Al), I(Wb));
    t[0x35] = d2("xor", Imp(AccV), I(Wz));
    // 0x36: SS override prefix.
    t[0x37] = Entry::Mode64(M_37);
    t[0x38] = d2("cmpS", E(Wb), G(Wb));
    t[0x39] = d2("cmpS", E(Wv), G(Wv));
    t[0x3A] = d2("cmpS", G(Wb), E(Wb));
    t[0x3B] = d2("cmpS", G(Wv), E(Wv));
    t[0x3C] = d2("cmp", Imp(Al), I(Wb));
    t[0x3D] = d2("cmp", Imp(AccV), I(Wz));
    // 0x3E: DS override prefix.
    t[0x3F] = Entry::Mode64(M_3F);

    // 0x40-0x4F: inc/dec in legacy modes; REX prefixes in long mode (the
    // prefix scanner consumes them there, so these rows never fire).
    let mut r = 0;
    while r < 8 {
        t[0x40 + r] = d1("inc", RegV(r as u8));
        t[0x48 + r] = d1("dec", RegV(r as u8));
        t[0x50 + r] = e(i1("pushS", RegV(r as u8)).flag(flags::DEFAULT64));
        t[0x58 + r] = e(i1("popS", RegV(r as u8)).flag(flags::DEFAULT64));
        r += 1;
    }

    t[0x60] = Entry::Mode64(M_60);
    t[0x61] = Entry::Mode64(M_61);
    t[0x62] = Entry::Mode64(M_62);
    t[0x63] = Entry::Mode64(M_63);
    // 0x64-0x67: FS/GS overrides, operand/address size prefixes.
    t[0x68] = e(i1("pushS", I(Wz)).flag(flags::DEFAULT64));
    t[0x69] = d3("imul", G(Wv), E(Wv), I(Wz));
    t[0x6A] = e(i1("pushS", SxI8).flag(flags::DEFAULT64));
    t[0x6B] = d3("imul", G(Wv), E(Wv), SxI8);
    t[0x6C] = e(i2("insS", Y(Wb), Imp(Dx)).flag(flags::REP | flags::SUFFIX));
    t[0x6D] = e(i2("insS", Y(Wz), Imp(Dx)).flag(flags::REP | flags::SUFFIX));
    t[0x6E] = e(i2("outsS", Imp(Dx), X(Wb)).flag(flags::REP | flags::SUFFIX));
    t[0x6F] = e(i2("outsS", Imp(Dx), X(Wz)).flag(flags::REP | flags::SUFFIX));

    // Short conditional jumps.
    t[0x70] = d1("jo", J(Wb));
    t[0x71] = d1("jno", J(Wb));
    t[0x72] = d1("jb", J(Wb));
    t[0x73] = d1("jae", J(Wb));
    t[0x74] = d1("je", J(Wb));
    t[0x75] = d1("jne", J(Wb));
    t[0x76] = d1("jbe", J(Wb));
    t[0x77] = d1("ja", J(Wb));
    t[0x78] = d1("js", J(Wb));
    t[0x79] = d1("jns", J(Wb));
    t[0x7A] = d1("jp", J(Wb));
    t[0x7B] = d1("jnp", J(Wb));
    t[0x7C] = d1("jl", J(Wb));
    t[0x7D] = d1("jge", J(Wb));
    t[0x7E] = d1("jle", J(Wb));
    t[0x7F] = d1("jg", J(Wb));

    t[0x80] = grp2(G_1, E(Wb), I(Wb));
    t[0x81] = grp2(G_1, E(Wv), I(Wz));
    t[0x82] = Entry::Mode64(M_82);
    t[0x83] = grp2(G_1, E(Wv), SxI8);
    t[0x84] = d2("testS", E(Wb), G(Wb));
    t[0x85] = d2("testS", E(Wv), G(Wv));
    t[0x86] = d2("xchg", E(Wb), G(Wb));
    t[0x87] = d2("xchg", E(Wv), G(Wv));
    t[0x88] = d2("movS", E(Wb), G(Wb));
    t[0x89] = d2("movS", E(Wv), G(Wv));
    t[0x8A] = d2("movS", G(Wb), E(Wb));
    t[0x8B] = d2("movS", G(Wv), E(Wv));
    t[0x8C] = d2("mov", E(Wv), Seg);
    t[0x8D] = d2("lea", G(Wv), M(Opaque));
    t[0x8E] = d2("mov", Seg, E(Ww));
    t[0x8F] = grp1(G_1A, E(Wv));

    t[0x90] = Entry::Prefixed(P_90);
    let mut r = 1;
    while r < 8 {
        t[0x90 + r] = d2("xchg", RegV(r as u8), Imp(AccV));
        r += 1;
    }
    t[0x98] = e(i0("cbtw").fix(Fixup::SizeConvert));
    t[0x99] = e(i0("cwtd").fix(Fixup::SizeConvert));
    t[0x9A] = Entry::Mode64(M_9A);
    // 0x9B: wait pseudo-prefix, consumed by the scanner.
    t[0x9C] = e(i0("{pushf|pushfq|pushf|pushfq}").flag(flags::DEFAULT64));
    t[0x9D] = e(i0("{popf|popfq|popf|popfq}").flag(flags::DEFAULT64));
    t[0x9E] = d0("sahf");
    t[0x9F] = d0("lahf");

    t[0xA0] = d2("mov", Imp(Al), O(Wb));
    t[0xA1] = d2("mov", Imp(AccV), O(Wv));
    t[0xA2] = d2("mov", O(Wb), Imp(Al));
    t[0xA3] = d2("mov", O(Wv), Imp(AccV));
    t[0xA4] = e(i2("movsS", Y(Wb), X(Wb)).flag(flags::REP | flags::SUFFIX));
    t[0xA5] = e(i2("movsS", Y(Wv), X(Wv)).flag(flags::REP | flags::SUFFIX));
    t[0xA6] = e(i2("cmpsS", X(Wb), Y(Wb)).flag(flags::SUFFIX));
    t[0xA7] = e(i2("cmpsS", X(Wv), Y(Wv)).flag(flags::SUFFIX));
    t[0xA8] = d2("test", Imp(Al), I(Wb));
    t[0xA9] = d2("test", Imp(AccV), I(Wz));
    t[0xAA] = e(i2("stosS", Y(Wb), Imp(Al)).flag(flags::REP | flags::SUFFIX));
    t[0xAB] = e(i2("stosS", Y(Wv), Imp(AccV)).flag(flags::REP | flags::SUFFIX));
    t[0xAC] = e(i2("lodsS", Imp(Al), X(Wb)).flag(flags::REP | flags::SUFFIX));
    t[0xAD] = e(i2("lodsS", Imp(AccV), X(Wv)).flag(flags::REP | flags::SUFFIX));
    t[0xAE] = e(i2("scasS", Imp(Al), Y(Wb)).flag(flags::SUFFIX));
    t[0xAF] = e(i2("scasS", Imp(AccV), Y(Wv)).flag(flags::SUFFIX));

    let mut r = 0;
    while r < 8 {
        t[0xB0 + r] = d2("mov", RegB(r as u8), I(Wb));
        t[0xB8 + r] = d2("mov", RegV(r as u8), I(Wv));
        r += 1;
    }

    t[0xC0] = grp2(G_2, E(Wb), I(Wb));
    t[0xC1] = grp2(G_2, E(Wv), I(Wb));
    t[0xC2] = e(i1("ret", I(Ww)).flag(flags::DEFAULT64));
    t[0xC3] = e(i0("ret").flag(flags::DEFAULT64));
    t[0xC4] = Entry::Mode64(M_C4);
    t[0xC5] = Entry::Mode64(M_C5);
    t[0xC6] = grp2(G_11, E(Wb), I(Wb));
    t[0xC7] = grp2(G_11, E(Wv), I(Wz));
    t[0xC8] = e(i2("enter", I(Ww), I(Wb)).flag(flags::KEEP_ORDER));
    t[0xC9] = e(i0("leave").flag(flags::DEFAULT64));
    t[0xCA] = d1("{lret|lret|retf|retf}", I(Ww));
    t[0xCB] = d0("{lret|lret|retf|retf}");
    t[0xCC] = d0("int3");
    t[0xCD] = d1("int", I(Wb));
    t[0xCE] = Entry::Mode64(M_CE);
    t[0xCF] = d0("iret");

    t[0xD0] = grp2(G_2, E(Wb), One);
    t[0xD1] = grp2(G_2, E(Wv), One);
    t[0xD2] = grp2(G_2, E(Wb), Imp(Cl));
    t[0xD3] = grp2(G_2, E(Wv), Imp(Cl));
    t[0xD4] = Entry::Mode64(M_D4);
    t[0xD5] = Entry::Mode64(M_D5);
    t[0xD7] = d0("xlatb");
    t[0xD8] = Float;
    t[0xD9] = Float;
    t[0xDA] = Float;
    t[0xDB] = Float;
    t[0xDC] = Float;
    t[0xDD] = Float;
    t[0xDE] = Float;
    t[0xDF] = Float;

    t[0xE0] = d1("loopne", J(Wb));
    t[0xE1] = d1("loope", J(Wb));
    t[0xE2] = d1("loop", J(Wb));
    t[0xE3] = e(i1("jcxz", J(Wb)).fix(Fixup::LoopWidth));
    t[0xE4] = d2("in", Imp(Al), I(Wb));
    t[0xE5] = d2("in", Imp(AccV), I(Wb));
    t[0xE6] = d2("out", I(Wb), Imp(Al));
    t[0xE7] = d2("out", I(Wb), Imp(AccV));
    t[0xE8] = e(i1("call", J(Wz)).flag(flags::DEFAULT64));
    t[0xE9] = e(i1("jmp", J(Wz)).flag(flags::DEFAULT64));
    t[0xEA] = Entry::Mode64(M_EA);
    t[0xEB] = e(i1("jmp", J(Wb)).flag(flags::DEFAULT64));
    t[0xEC] = d2("in", Imp(Al), Imp(Dx));
    t[0xED] = d2("in", Imp(AccV), Imp(Dx));
    t[0xEE] = d2("out", Imp(Dx), Imp(Al));
    t[0xEF] = d2("out", Imp(Dx), Imp(AccV));

    // 0xF0/0xF2/0xF3: lock and repeat prefixes.
    t[0xF1] = d0("int1");
    t[0xF4] = d0("hlt");
    t[0xF5] = d0("cmc");
    t[0xF6] = grp0(G_3B);
    t[0xF7] = grp0(G_3V);
    t[0xF8] = d0("clc");
    t[0xF9] = d0("stc");
    t[0xFA] = d0("cli");
    t[0xFB] = d0("sti");
    t[0xFC] = d0("cld");
    t[0xFD] = d0("std");
    t[0xFE] = grp1(G_4, E(Wb));
    t[0xFF] = grp1(G_5, E(Wv));

    t
};

// ---------------------------------------------------------------------------
// Two-byte (0x0F) opcode map
// ---------------------------------------------------------------------------

pub static TWO_BYTE: [Entry; 256] = {
    let mut t = [Invalid; 256];

    t[0x00] = grp0(G_6);
    t[0x01] = grp0(G_7);
    t[0x02] = d2("lar", G(Wv), E(Ww));
    t[0x03] = d2("lsl", G(Wv), E(Ww));
    t[0x05] = d0("syscall");
    t[0x06] = d0("clts");
    t[0x07] = d0("sysret");
    t[0x08] = d0("invd");
    t[0x09] = d0("wbinvd");
    t[0x0B] = d0("ud2");
    t[0x0D] = grp0(G_PF);
    t[0x0E] = d0("femms");
    t[0x0F] = e(i2("", P(Wq), Q(Wq)).fix(Fixup::Amd3dNow));

    t[0x10] = Entry::Prefixed(P_10);
    t[0x11] = Entry::Prefixed(P_11);
    t[0x12] = Entry::Prefixed(P_12);
    t[0x13] = Entry::Prefixed(P_13);
    t[0x14] = Entry::Prefixed(P_14);
    t[0x15] = Entry::Prefixed(P_15);
    t[0x16] = Entry::Prefixed(P_16);
    t[0x17] = Entry::Prefixed(P_17);
    t[0x18] = grp0(G_16);
    t[0x1F] = d1("nopS", E(Wv));

    t[0x20] = e(i2("mov", R(Wv), Ctl).flag(flags::DEFAULT64));
    t[0x21] = e(i2("mov", R(Wv), Dbg).flag(flags::DEFAULT64));
    t[0x22] = e(i2("mov", Ctl, R(Wv)).flag(flags::DEFAULT64));
    t[0x23] = e(i2("mov", Dbg, R(Wv)).flag(flags::DEFAULT64));
    t[0x28] = Entry::Prefixed(P_28);
    t[0x29] = Entry::Prefixed(P_29);
    t[0x2A] = Entry::Prefixed(P_2A);
    t[0x2B] = Entry::Prefixed(P_2B);
    t[0x2C] = Entry::Prefixed(P_2C);
    t[0x2D] = Entry::Prefixed(P_2D);
    t[0x2E] = Entry::Prefixed(P_2E);
    t[0x2F] = Entry::Prefixed(P_2F);

    t[0x30] = d0("wrmsr");
    t[0x31] = d0("rdtsc");
    t[0x32] = d0("rdmsr");
    t[0x33] = d0("rdpmc");
    t[0x34] = d0("sysenter");
    t[0x35] = d0("sysexit");

    // Conditional moves.
    t[0x40] = d2("cmovo", G(Wv), E(Wv));
    t[0x41] = d2("cmovno", G(Wv), E(Wv));
    t[0x42] = d2("cmovb", G(Wv), E(Wv));
    t[0x43] = d2("cmovae", G(Wv), E(Wv));
    t[0x44] = d2("cmove", G(Wv), E(Wv));
    t[0x45] = d2("cmovne", G(Wv), E(Wv));
    t[0x46] = d2("cmovbe", G(Wv), E(Wv));
    t[0x47] = d2("cmova", G(Wv), E(Wv));
    t[0x48] = d2("cmovs", G(Wv), E(Wv));
    t[0x49] = d2("cmovns", G(Wv), E(Wv));
    t[0x4A] = d2("cmovp", G(Wv), E(Wv));
    t[0x4B] = d2("cmovnp", G(Wv), E(Wv));
    t[0x4C] = d2("cmovl", G(Wv), E(Wv));
    t[0x4D] = d2("cmovge", G(Wv), E(Wv));
    t[0x4E] = d2("cmovle", G(Wv), E(Wv));
    t[0x4F] = d2("cmovg", G(Wv), E(Wv));

    t[0x50] = Entry::Prefixed(P_50);
    t[0x51] = Entry::Prefixed(P_51);
    t[0x52] = Entry::Prefixed(P_52);
    t[0x53] = Entry::Prefixed(P_53);
    t[0x54] = Entry::Prefixed(P_54);
    t[0x55] = Entry::Prefixed(P_55);
    t[0x56] = Entry::Prefixed(P_56);
    t[0x57] = Entry::Prefixed(P_57);
    t[0x58] = Entry::Prefixed(P_58);
    t[0x59] = Entry::Prefixed(P_59);
    t[0x5A] = Entry::Prefixed(P_5A);
    t[0x5B] = Entry::Prefixed(P_5B);
    t[0x5C] = Entry::Prefixed(P_5C);
    t[0x5D] = Entry::Prefixed(P_5D);
    t[0x5E] = Entry::Prefixed(P_5E);
    t[0x5F] = Entry::Prefixed(P_5F);

    t[0x60] = mmx("punpcklbw");
    t[0x61] = mmx("punpcklwd");
    t[0x62] = mmx("punpckldq");
    t[0x63] = mmx("packsswb");
    t[0x64] = mmx("pcmpgtb");
    t[0x65] = mmx("pcmpgtw");
    t[0x66] = mmx("pcmpgtd");
    t[0x67] = mmx("packuswb");
    t[0x68] = mmx("punpckhbw");
    t[0x69] = mmx("punpckhwd");
    t[0x6A] = mmx("punpckhdq");
    t[0x6B] = mmx("packssdw");
    t[0x6C] = Entry::Prefixed(P_6C);
    t[0x6D] = Entry::Prefixed(P_6D);
    t[0x6E] = e(i2("movd", P(Wq), E(Wd)).flag(flags::PROMOTE));
    t[0x6F] = Entry::Prefixed(P_6F);

    t[0x70] = Entry::Prefixed(P_70);
    t[0x71] = grp0(G_12);
    t[0x72] = grp0(G_13);
    t[0x73] = grp0(G_14);
    t[0x74] = mmx("pcmpeqb");
    t[0x75] = mmx("pcmpeqw");
    t[0x76] = mmx("pcmpeqd");
    t[0x77] = d0("emms");
    t[0x7E] = Entry::Prefixed(P_7E);
    t[0x7F] = Entry::Prefixed(P_7F);

    // Long conditional jumps.
    t[0x80] = d1("jo", J(Wz));
    t[0x81] = d1("jno", J(Wz));
    t[0x82] = d1("jb", J(Wz));
    t[0x83] = d1("jae", J(Wz));
    t[0x84] = d1("je", J(Wz));
    t[0x85] = d1("jne", J(Wz));
    t[0x86] = d1("jbe", J(Wz));
    t[0x87] = d1("ja", J(Wz));
    t[0x88] = d1("js", J(Wz));
    t[0x89] = d1("jns", J(Wz));
    t[0x8A] = d1("jp", J(Wz));
    t[0x8B] = d1("jnp", J(Wz));
    t[0x8C] = d1("jl", J(Wz));
    t[0x8D] = d1("jge", J(Wz));
    t[0x8E] = d1("jle", J(Wz));
    t[0x8F] = d1("jg", J(Wz));

    // Byte sets on condition.
    t[0x90] = d1("seto", E(Wb));
    t[0x91] = d1("setno", E(Wb));
    t[0x92] = d1("setb", E(Wb));
    t[0x93] = d1("setae", E(Wb));
    t[0x94] = d1("sete", E(Wb));
    t[0x95] = d1("setne", E(Wb));
    t[0x96] = d1("setbe", E(Wb));
    t[0x97] = d1("seta", E(Wb));
    t[0x98] = d1("sets", E(Wb));
    t[0x99] = d1("setns", E(Wb));
    t[0x9A] = d1("setp", E(Wb));
    t[0x9B] = d1("setnp", E(Wb));
    t[0x9C] = d1("setl", E(Wb));
    t[0x9D] = d1("setge", E(Wb));
    t[0x9E] = d1("setle", E(Wb));
    t[0x9F] = d1("setg", E(Wb));

    t[0xA0] = e(i1("push", Imp(ISeg(SegReg::Fs))).flag(flags::DEFAULT64));
    t[0xA1] = e(i1("pop", Imp(ISeg(SegReg::Fs))).flag(flags::DEFAULT64));
    t[0xA2] = d0("cpuid");
    t[0xA3] = d2("btS", E(Wv), G(Wv));
    t[0xA4] = d3("shldS", E(Wv), G(Wv), I(Wb));
    t[0xA5] = d3("shldS", E(Wv), G(Wv), Imp(Cl));
    t[0xA8] = e(i1("push", Imp(ISeg(SegReg::Gs))).flag(flags::DEFAULT64));
    t[0xA9] = e(i1("pop", Imp(ISeg(SegReg::Gs))).flag(flags::DEFAULT64));
    t[0xAA] = d0("rsm");
    t[0xAB] = d2("btsS", E(Wv), G(Wv));
    t[0xAC] = d3("shrdS", E(Wv), G(Wv), I(Wb));
    t[0xAD] = d3("shrdS", E(Wv), G(Wv), Imp(Cl));
    t[0xAE] = grp0(G_15);
    t[0xAF] = d2("imul", G(Wv), E(Wv));

    t[0xB0] = d2("cmpxchg", E(Wb), G(Wb));
    t[0xB1] = d2("cmpxchg", E(Wv), G(Wv));
    t[0xB2] = d2("lss", G(Wz), M(Ptr));
    t[0xB3] = d2("btrS", E(Wv), G(Wv));
    t[0xB4] = d2("lfs", G(Wz), M(Ptr));
    t[0xB5] = d2("lgs", G(Wz), M(Ptr));
    t[0xB6] = d2("{movzb|movzb|movzx|movzx}D", G(Wv), E(Wb));
    t[0xB7] = d2("{movzw|movzw|movzx|movzx}D", G(Wv), E(Ww));
    t[0xB8] = Entry::Prefixed(P_B8);
    t[0xB9] = d2("ud1", G(Wv), E(Wv));
    t[0xBA] = grp2(G_8, E(Wv), I(Wb));
    t[0xBB] = d2("btcS", E(Wv), G(Wv));
    t[0xBC] = Entry::Prefixed(P_BC);
    t[0xBD] = Entry::Prefixed(P_BD);
    t[0xBE] = d2("{movsb|movsb|movsx|movsx}D", G(Wv), E(Wb));
    t[0xBF] = d2("{movsw|movsw|movsx|movsx}D", G(Wv), E(Ww));

    t[0xC0] = d2("xadd", E(Wb), G(Wb));
    t[0xC1] = d2("xadd", E(Wv), G(Wv));
    t[0xC2] = Entry::Prefixed(P_C2);
    t[0xC3] = d2("movnti", M(Wv), G(Wv));
    t[0xC4] = e(i3("pinsrw", P(Wq), E(Wd), I(Wb)).flag(flags::PROMOTE));
    t[0xC5] = e(i3("pextrw", G(Wd), Q(Wq), I(Wb)).flag(flags::PROMOTE));
    t[0xC6] = Entry::Prefixed(P_C6);
    t[0xC7] = grp0(G_9);
    let mut r = 0;
    while r < 8 {
        t[0xC8 + r] = d1("bswap", RegV(r as u8));
        r += 1;
    }

    t[0xD1] = mmx("psrlw");
    t[0xD2] = mmx("psrld");
    t[0xD3] = mmx("psrlq");
    t[0xD4] = mmx("paddq");
    t[0xD5] = mmx("pmullw");
    t[0xD6] = Entry::Prefixed(P_D6);
    t[0xD7] = e(i2("pmovmskb", G(Wd), Q(Wq)).flag(flags::PROMOTE));
    t[0xD8] = mmx("psubusb");
    t[0xD9] = mmx("psubusw");
    t[0xDA] = mmx("pminub");
    t[0xDB] = mmx("pand");
    t[0xDC] = mmx("paddusb");
    t[0xDD] = mmx("paddusw");
    t[0xDE] = mmx("pmaxub");
    t[0xDF] = mmx("pandn");

    t[0xE0] = mmx("pavgb");
    t[0xE1] = mmx("psraw");
    t[0xE2] = mmx("psrad");
    t[0xE3] = mmx("pavgw");
    t[0xE4] = mmx("pmulhuw");
    t[0xE5] = mmx("pmulhw");
    t[0xE6] = Entry::Prefixed(P_E6);
    t[0xE7] = Entry::Prefixed(P_E7);
    t[0xE8] = mmx("psubsb");
    t[0xE9] = mmx("psubsw");
    t[0xEA] = mmx("pminsw");
    t[0xEB] = mmx("por");
    t[0xEC] = mmx("paddsb");
    t[0xED] = mmx("paddsw");
    t[0xEE] = mmx("pmaxsw");
    t[0xEF] = mmx("pxor");

    t[0xF1] = mmx("psllw");
    t[0xF2] = mmx("pslld");
    t[0xF3] = mmx("psllq");
    t[0xF4] = mmx("pmuludq");
    t[0xF5] = mmx("pmaddwd");
    t[0xF6] = mmx("psadbw");
    t[0xF7] = Entry::Prefixed(P_F7);
    t[0xF8] = mmx("psubb");
    t[0xF9] = mmx("psubw");
    t[0xFA] = mmx("psubd");
    t[0xFB] = mmx("psubq");
    t[0xFC] = mmx("paddb");
    t[0xFD] = mmx("paddw");
    t[0xFE] = mmx("paddd");
    // 0xFF (ud0) stays invalid.

    t
};
