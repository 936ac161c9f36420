//! Per-call decode state.

use super::fetch::ByteFetcher;
use super::modrm::ModRm;
use super::prefix::Prefixes;
use crate::DecodeError;
use spyglass_core::{ExecutionMode, Syntax};

/// Everything one decode call owns: prefix state, the byte cursor and
/// fetch cache, the (at most one) ModR/M byte, and the per-operand output
/// buffers. Built fresh for every instruction and discarded with it;
/// nothing here is shared across calls.
pub struct DecodeContext<'a> {
    pub fetch: ByteFetcher<'a>,
    pub mode: ExecutionMode,
    pub syntax: Syntax,
    pub prefixes: Prefixes,
    /// Offset of the next byte to consume.
    pub cursor: usize,
    modrm: Option<ModRm>,
    /// Rendered text per operand slot.
    pub operands: [String; 3],
    /// Raw immediate values, for fixups that re-interpret them.
    pub op_imm: [Option<u64>; 3],
    /// Resolved branch/call target.
    pub branch_target: Option<u64>,
    /// Displacement of a RIP-relative memory operand, resolved against the
    /// instruction end once the total length is known.
    pub rip_disp: Option<i64>,
    /// No register operand pins the operand size.
    pub suffix_always: bool,
    /// Instruction defaults to 64-bit operands in long mode.
    pub default64: bool,
    /// 0x66 promotes this MMX encoding to XMM registers.
    pub promoted: bool,
    /// AT&T renders the first operand with a `*` marker (indirect jump or
    /// call through a register or memory operand).
    pub indirect: bool,
}

impl<'a> DecodeContext<'a> {
    pub fn new(fetch: ByteFetcher<'a>, mode: ExecutionMode, syntax: Syntax) -> Self {
        Self {
            fetch,
            mode,
            syntax,
            prefixes: Prefixes::default(),
            cursor: 0,
            modrm: None,
            operands: [String::new(), String::new(), String::new()],
            op_imm: [None; 3],
            branch_target: None,
            rip_disp: None,
            suffix_always: false,
            default64: false,
            promoted: false,
            indirect: false,
        }
    }

    pub fn start(&self) -> u64 {
        self.fetch.start()
    }

    /// Consumes one byte at the cursor.
    pub fn read_byte(&mut self) -> Result<u8, DecodeError> {
        let byte = self.fetch.byte(self.cursor)?;
        self.cursor += 1;
        Ok(byte)
    }

    pub fn read_u16(&mut self) -> Result<u16, DecodeError> {
        let value = self.fetch.u16_at(self.cursor)?;
        self.cursor += 2;
        Ok(value)
    }

    pub fn read_u32(&mut self) -> Result<u32, DecodeError> {
        let value = self.fetch.u32_at(self.cursor)?;
        self.cursor += 4;
        Ok(value)
    }

    pub fn read_u64(&mut self) -> Result<u64, DecodeError> {
        let value = self.fetch.u64_at(self.cursor)?;
        self.cursor += 8;
        Ok(value)
    }

    /// Consumes the ModR/M byte on first use; later calls return the cached
    /// value so the byte is never consumed twice.
    pub fn load_modrm(&mut self) -> Result<ModRm, DecodeError> {
        if let Some(modrm) = self.modrm {
            return Ok(modrm);
        }
        let byte = self.read_byte()?;
        let modrm = ModRm::parse(byte, self.prefixes.rex);
        self.modrm = Some(modrm);
        Ok(modrm)
    }

    /// The already-fetched ModR/M byte.
    pub fn modrm(&self) -> Result<ModRm, DecodeError> {
        self.modrm.ok_or(DecodeError::Internal {
            reason: "ModR/M accessed before being fetched",
        })
    }

    pub fn modrm_loaded(&self) -> bool {
        self.modrm.is_some()
    }

    /// Effective operand width in bits. Marks the 0x66 prefix consumed
    /// when `mark` is set and the prefix participated in the choice.
    pub fn operand_bits_with(&mut self, mark: bool) -> u16 {
        if mark && self.prefixes.opsize {
            self.prefixes.used_opsize = true;
        }
        match self.mode {
            ExecutionMode::Bits64 => {
                if self.prefixes.rex_w() {
                    64
                } else if self.prefixes.opsize {
                    16
                } else if self.default64 {
                    64
                } else {
                    32
                }
            }
            ExecutionMode::Bits32 => {
                if self.prefixes.opsize {
                    16
                } else {
                    32
                }
            }
            ExecutionMode::Bits16 => {
                if self.prefixes.opsize {
                    32
                } else {
                    16
                }
            }
        }
    }

    /// Effective operand width, marking 0x66 consumed.
    pub fn operand_bits(&mut self) -> u16 {
        self.operand_bits_with(true)
    }

    /// Effective address width in bits; marks the 0x67 prefix consumed.
    pub fn address_bits(&mut self) -> u16 {
        if self.prefixes.addrsize {
            self.prefixes.used_addrsize = true;
        }
        match self.mode {
            ExecutionMode::Bits64 => {
                if self.prefixes.addrsize {
                    32
                } else {
                    64
                }
            }
            ExecutionMode::Bits32 => {
                if self.prefixes.addrsize {
                    16
                } else {
                    32
                }
            }
            ExecutionMode::Bits16 => {
                if self.prefixes.addrsize {
                    32
                } else {
                    16
                }
            }
        }
    }

    /// Register sigil for the active dialect.
    pub fn sigil(&self) -> &'static str {
        if self.syntax.is_att() {
            "%"
        } else {
            ""
        }
    }

    /// Bad-opcode error covering everything consumed so far.
    pub fn bad_opcode(&self) -> DecodeError {
        DecodeError::bad_opcode(
            self.start(),
            self.fetch.fetched(self.cursor),
            self.cursor,
        )
    }
}
