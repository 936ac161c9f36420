//! Decode driver: prefix scan, table dispatch, operand decode, mnemonic
//! expansion, and final line composition.

use super::context::DecodeContext;
use super::fetch::{ByteFetcher, MAX_INSN_LEN};
use super::fixup;
use super::opcodes::{self, flags, Entry, Inst};
use super::operand::{self, Op, Width};
use super::prefix::{Prefixes, Rex};
use super::template::{self, TemplateCtx};
use super::x87;
use crate::error::DecodeError;
use crate::traits::{DecodedLine, InstructionDecoder};
use spyglass_core::{ByteSource, ExecutionMode, SymbolInfo, SymbolResolver, Syntax};

/// x86/x86-64 disassembler for one execution mode and output dialect.
pub struct Disassembler {
    mode: ExecutionMode,
    syntax: Syntax,
}

impl Disassembler {
    /// Creates a disassembler for `mode` rendering in `syntax`.
    pub fn new(mode: ExecutionMode, syntax: Syntax) -> Self {
        Self { mode, syntax }
    }

    pub fn mode(&self) -> ExecutionMode {
        self.mode
    }

    pub fn syntax(&self) -> Syntax {
        self.syntax
    }
}

impl InstructionDecoder for Disassembler {
    fn decode_instruction(
        &self,
        address: u64,
        source: &dyn ByteSource,
        symbols: &dyn SymbolResolver,
    ) -> Result<DecodedLine, DecodeError> {
        let fetch = ByteFetcher::new(source, address);
        let mut ctx = DecodeContext::new(fetch, self.mode, self.syntax);

        let (prefixes, offset) = Prefixes::scan(&mut ctx.fetch, self.mode)?;
        ctx.prefixes = prefixes;
        ctx.cursor = offset;

        let opcode = ctx.read_byte()?;
        let mut entry = if opcode == 0x0F {
            let second = ctx.read_byte()?;
            opcodes::TWO_BYTE[second as usize]
        } else {
            opcodes::ONE_BYTE[opcode as usize]
        };

        // Resolve redirects down to a concrete instruction pattern.
        let mut site_ops: [Op; 3] = [Op::None; 3];
        let inst: Inst = loop {
            match entry {
                Entry::Invalid => return Err(ctx.bad_opcode()),

                Entry::Direct(inst) => {
                    let mut inst = inst;
                    // Rows without their own operand slots inherit the
                    // redirect site's.
                    if matches!(inst.ops[0], Op::None) && !matches!(site_ops[0], Op::None) {
                        inst.ops = site_ops;
                    }
                    break inst;
                }

                Entry::Group { table, ops } => {
                    if !matches!(ops[0], Op::None) {
                        site_ops = ops;
                    }
                    let modrm = ctx.load_modrm()?;
                    entry = opcodes::GROUPS[table as usize][(modrm.reg & 0x7) as usize];
                }

                Entry::Prefixed(id) => {
                    entry = pick_prefixed(&mut ctx, id);
                }

                Entry::Mode64(id) => {
                    entry = opcodes::MODE64[id as usize][usize::from(self.mode.is_64bit())];
                }

                Entry::Float => {
                    let (mnemonic, count) = x87::decode(&mut ctx, opcode)?;
                    let (text, target) = compose(&ctx, &mnemonic, count, 0, symbols);
                    return Ok(DecodedLine {
                        address,
                        length: ctx.cursor,
                        text,
                        target,
                    });
                }
            }
        };

        ctx.default64 = inst.has_flag(flags::DEFAULT64) && self.mode.is_64bit();
        if inst.has_flag(flags::PROMOTE) && ctx.prefixes.opsize {
            ctx.promoted = true;
            ctx.prefixes.used_opsize = true;
        }
        ctx.indirect = inst.has_flag(flags::INDIRECT);

        // A few system encodings replace the whole pattern for mod=11.
        let inst = match fixup::pre_resolve(&mut ctx, &inst)? {
            Some(replacement) => replacement,
            None => inst,
        };

        if inst.ops.iter().any(|&op| operand::needs_modrm(op)) {
            ctx.load_modrm()?;
        }
        let modrm_is_reg = ctx.modrm_loaded() && ctx.modrm()?.is_register();
        let has_gpr = inst
            .ops
            .iter()
            .any(|&op| operand::fixes_gpr_size(op, modrm_is_reg));
        ctx.suffix_always = inst.has_flag(flags::SUFFIX) || !has_gpr;

        let mut count = 0;
        for (index, &op) in inst.ops.iter().enumerate() {
            if matches!(op, Op::None) {
                break;
            }
            operand::decode_operand(&mut ctx, op, index)?;
            count += 1;
        }

        let data_bits = data_bits(&mut ctx, &inst);
        let tctx = TemplateCtx {
            syntax: self.syntax,
            mode: self.mode,
            data_bits,
            operand_bits: ctx.operand_bits_with(false),
            suffix_always: ctx.suffix_always,
        };
        let (mut mnemonic, consulted) = template::expand(inst.template, &tctx);
        if consulted.operand_size {
            let _ = ctx.operand_bits();
        }

        fixup::post_apply(&mut ctx, inst.fixup, opcode, &mut mnemonic, &mut count)?;

        let (text, target) = compose(&ctx, &mnemonic, count, inst.flags, symbols);
        Ok(DecodedLine {
            address,
            length: ctx.cursor,
            text,
            target,
        })
    }

    fn max_instruction_size(&self) -> usize {
        MAX_INSN_LEN
    }
}

/// Width of the data the instruction moves, for the suffix macro: byte
/// forms say so in their operand slots, everything else follows the
/// effective operand size.
fn data_bits(ctx: &mut DecodeContext<'_>, inst: &Inst) -> u16 {
    let byte_data = inst.ops.iter().any(|&op| {
        matches!(
            op,
            Op::E(Width::B)
                | Op::G(Width::B)
                | Op::M(Width::B)
                | Op::X(Width::B)
                | Op::Y(Width::B)
                | Op::RegB(_)
                | Op::Imp(operand::ImpReg::Al)
        )
    });
    if byte_data {
        8
    } else {
        ctx.operand_bits_with(false)
    }
}

/// Selects a mandatory-prefix table row. Priority is repeat-equal,
/// operand-size, repeat-not-equal, none; a row with no instruction falls
/// back to the no-prefix row and leaves the prefix to render as a token.
fn pick_prefixed(ctx: &mut DecodeContext<'_>, id: u8) -> Entry {
    let rows = &opcodes::PREFIXED[id as usize];
    let row = if ctx.prefixes.repe {
        1
    } else if ctx.prefixes.opsize {
        2
    } else if ctx.prefixes.repne {
        3
    } else {
        0
    };
    if row != 0 && matches!(rows[row], Entry::Invalid) {
        return rows[0];
    }
    match row {
        1 => ctx.prefixes.used_repe = true,
        2 => ctx.prefixes.used_opsize = true,
        3 => ctx.prefixes.used_repne = true,
        _ => {}
    }
    rows[row]
}

fn sym_text(sym: &SymbolInfo) -> String {
    let mut text = String::new();
    if !sym.module.is_empty() {
        text.push_str(&sym.module);
        text.push('!');
    }
    text.push_str(&sym.name);
    if sym.offset != 0 {
        text.push_str(&format!("+{:#x}", sym.offset));
    }
    text
}

/// Assembles the final line: leading prefix tokens, mnemonic, operands in
/// dialect order, and target annotation.
fn compose(
    ctx: &DecodeContext<'_>,
    mnemonic: &str,
    count: usize,
    inst_flags: u16,
    symbols: &dyn SymbolResolver,
) -> (String, Option<u64>) {
    let mut line = String::new();

    for &raw in &ctx.prefixes.dropped_rex {
        line.push_str(&Rex::token(raw));
        line.push(' ');
    }
    if ctx.prefixes.wait && !ctx.prefixes.used_wait {
        line.push_str("fwait ");
    }
    if ctx.prefixes.lock {
        line.push_str("lock ");
    }
    if ctx.prefixes.repe && !ctx.prefixes.used_repe {
        line.push_str(if inst_flags & flags::REP != 0 {
            "rep "
        } else {
            "repz "
        });
    }
    if ctx.prefixes.repne && !ctx.prefixes.used_repne {
        line.push_str("repnz ");
    }
    if ctx.prefixes.opsize && !ctx.prefixes.used_opsize {
        line.push_str("data16 ");
    }
    if ctx.prefixes.addrsize && !ctx.prefixes.used_addrsize {
        line.push_str(match ctx.mode {
            ExecutionMode::Bits32 => "addr16 ",
            _ => "addr32 ",
        });
    }
    if let Some(seg) = ctx.prefixes.seg {
        if !ctx.prefixes.used_seg {
            line.push_str(seg.name());
            line.push(' ');
        }
    }

    line.push_str(mnemonic);

    if count > 0 {
        line.push(' ');
        let att = ctx.syntax.is_att();
        let reverse = att && inst_flags & flags::KEEP_ORDER == 0;
        let sep = if att { "," } else { ", " };
        let mut first = true;
        let slots: Vec<usize> = if reverse {
            (0..count).rev().collect()
        } else {
            (0..count).collect()
        };
        for slot in slots {
            if !first {
                line.push_str(sep);
            }
            first = false;
            if slot == 0 && ctx.indirect && att {
                line.push('*');
            }
            line.push_str(&ctx.operands[slot]);
        }
    }

    let mut target = ctx.branch_target;
    if let Some(resolved) = target {
        if let Some(sym) = symbols.resolve(resolved) {
            line.push_str(&format!(" <{}>", sym_text(&sym)));
        }
    } else if let Some(disp) = ctx.rip_disp {
        let resolved = ctx
            .start()
            .wrapping_add(ctx.cursor as u64)
            .wrapping_add(disp as u64);
        target = Some(resolved);
        line.push_str(&format!(" # {:#x}", resolved));
        if let Some(sym) = symbols.resolve(resolved) {
            line.push_str(&format!(" <{}>", sym_text(&sym)));
        }
    }

    (line, target)
}

#[cfg(test)]
mod tests {
    use super::*;
    use spyglass_core::{NoSymbols, SliceSource};

    fn decode(bytes: &[u8], mode: ExecutionMode, syntax: Syntax) -> DecodedLine {
        let source = SliceSource::new(0x1000, bytes);
        Disassembler::new(mode, syntax)
            .decode_instruction(0x1000, &source, &NoSymbols)
            .unwrap()
    }

    fn att64(bytes: &[u8]) -> DecodedLine {
        decode(bytes, ExecutionMode::Bits64, Syntax::Att)
    }

    fn intel64(bytes: &[u8]) -> DecodedLine {
        decode(bytes, ExecutionMode::Bits64, Syntax::Intel)
    }

    #[test]
    fn test_nop() {
        let line = att64(&[0x90]);
        assert_eq!(line.text, "nop");
        assert_eq!(line.length, 1);
    }

    #[test]
    fn test_push_rbp() {
        assert_eq!(att64(&[0x55]).text, "push %rbp");
        assert_eq!(intel64(&[0x55]).text, "push rbp");
    }

    #[test]
    fn test_mov_rbp_rsp() {
        // mov rbp, rsp (48 89 e5): AT&T is source-first.
        let line = att64(&[0x48, 0x89, 0xe5]);
        assert_eq!(line.text, "mov %rsp,%rbp");
        assert_eq!(line.length, 3);
        assert_eq!(intel64(&[0x48, 0x89, 0xe5]).text, "mov rbp, rsp");
    }

    #[test]
    fn test_ret() {
        assert_eq!(att64(&[0xc3]).text, "ret");
    }

    #[test]
    fn test_call_rel32() {
        let line = att64(&[0xe8, 0x00, 0x01, 0x00, 0x00]);
        assert_eq!(line.text, "call 0x1105");
        assert_eq!(line.target, Some(0x1105));
    }

    #[test]
    fn test_jne_rel8() {
        let line = att64(&[0x75, 0x10]);
        assert_eq!(line.text, "jne 0x1012");
        assert_eq!(line.target, Some(0x1012));
    }

    #[test]
    fn test_group3_neg() {
        assert_eq!(att64(&[0xf7, 0xd8]).text, "neg %eax");
        assert_eq!(intel64(&[0xf7, 0xd8]).text, "neg eax");
    }

    #[test]
    fn test_multibyte_nop() {
        assert_eq!(att64(&[0x0f, 0x1f, 0x00]).text, "nopl (%rax)");
        assert_eq!(intel64(&[0x0f, 0x1f, 0x00]).text, "nop dword ptr [rax]");
    }

    #[test]
    fn test_bad_opcode_resync() {
        let source = SliceSource::new(0x1000, &[0x0f, 0xff, 0x90]);
        let err = Disassembler::new(ExecutionMode::Bits64, Syntax::Att)
            .decode_instruction(0x1000, &source, &NoSymbols)
            .unwrap_err();
        assert_eq!(err.consumed(), 2);
        assert_eq!(err.placeholder(), "(bad)");
    }

    #[test]
    fn test_rex_discarded_before_another_prefix() {
        // REX.W followed by 0x66: the REX byte demotes to a token and has
        // no effect on the immediate width.
        let line = att64(&[0x48, 0x66, 0xb8, 0x34, 0x12]);
        assert_eq!(line.text, "rex.W mov $0x1234,%ax");
        assert_eq!(line.length, 5);
    }

    #[test]
    fn test_mod3_consumes_no_extra_bytes() {
        // mod=11 never takes a SIB byte or displacement.
        let line = att64(&[0x48, 0x89, 0xe5, 0x12, 0x34]);
        assert_eq!(line.length, 3);
    }

    #[test]
    fn test_rip_relative_lea() {
        let line = att64(&[0x48, 0x8d, 0x05, 0x10, 0x00, 0x00, 0x00]);
        assert_eq!(line.text, "lea 0x10(%rip),%rax # 0x1017");
        assert_eq!(line.target, Some(0x1017));

        let line = intel64(&[0x48, 0x8d, 0x05, 0x10, 0x00, 0x00, 0x00]);
        assert_eq!(line.text, "lea rax, [rip+0x10] # 0x1017");
    }

    #[test]
    fn test_symbolized_call_target() {
        struct OneSym;
        impl SymbolResolver for OneSym {
            fn resolve(&self, address: u64) -> Option<SymbolInfo> {
                (address == 0x1105).then(|| SymbolInfo::new("init", 5))
            }
        }
        let source = SliceSource::new(0x1000, &[0xe8, 0x00, 0x01, 0x00, 0x00]);
        let line = Disassembler::new(ExecutionMode::Bits64, Syntax::Att)
            .decode_instruction(0x1000, &source, &OneSym)
            .unwrap();
        assert_eq!(line.text, "call 0x1105 <init+0x5>");
    }

    #[test]
    fn test_idempotent_decode() {
        let bytes = [0x48, 0x8b, 0x45, 0xf8];
        assert_eq!(att64(&bytes), att64(&bytes));
    }
}
