//! Register name tables.
//!
//! Names are selected by (effective width, REX presence); the dialect only
//! decides whether a `%` sigil is prepended, which the renderer handles.

pub static REG64: [&str; 16] = [
    "rax", "rcx", "rdx", "rbx", "rsp", "rbp", "rsi", "rdi", "r8", "r9", "r10", "r11", "r12",
    "r13", "r14", "r15",
];

pub static REG32: [&str; 16] = [
    "eax", "ecx", "edx", "ebx", "esp", "ebp", "esi", "edi", "r8d", "r9d", "r10d", "r11d", "r12d",
    "r13d", "r14d", "r15d",
];

pub static REG16: [&str; 16] = [
    "ax", "cx", "dx", "bx", "sp", "bp", "si", "di", "r8w", "r9w", "r10w", "r11w", "r12w", "r13w",
    "r14w", "r15w",
];

/// 8-bit names without any REX prefix: encodings 4-7 are the high-byte
/// registers.
pub static REG8_LEGACY: [&str; 8] = ["al", "cl", "dl", "bl", "ah", "ch", "dh", "bh"];

/// 8-bit names when a REX prefix is present (even 0x40): encodings 4-7
/// become the low bytes of rsp/rbp/rsi/rdi.
pub static REG8_REX: [&str; 16] = [
    "al", "cl", "dl", "bl", "spl", "bpl", "sil", "dil", "r8b", "r9b", "r10b", "r11b", "r12b",
    "r13b", "r14b", "r15b",
];

pub static SEG: [&str; 6] = ["es", "cs", "ss", "ds", "fs", "gs"];

pub static MMX: [&str; 8] = ["mm0", "mm1", "mm2", "mm3", "mm4", "mm5", "mm6", "mm7"];

pub static XMM: [&str; 16] = [
    "xmm0", "xmm1", "xmm2", "xmm3", "xmm4", "xmm5", "xmm6", "xmm7", "xmm8", "xmm9", "xmm10",
    "xmm11", "xmm12", "xmm13", "xmm14", "xmm15",
];

/// General-purpose register name for `index` at `bits` width.
///
/// `rex_present` selects the 8-bit table: with any REX byte the old
/// high-byte encodings name spl/bpl/sil/dil instead of ah/ch/dh/bh.
pub fn gpr(index: u8, bits: u16, rex_present: bool) -> &'static str {
    let i = (index & 0xF) as usize;
    match bits {
        8 => {
            if rex_present {
                REG8_REX[i]
            } else {
                REG8_LEGACY[i & 0x7]
            }
        }
        16 => REG16[i],
        64 => REG64[i],
        _ => REG32[i],
    }
}

/// Control register name (cr0-cr15).
pub fn control(index: u8) -> String {
    format!("cr{}", index & 0xF)
}

/// Debug register name (dr0-dr15).
pub fn debug(index: u8) -> String {
    format!("dr{}", index & 0xF)
}
