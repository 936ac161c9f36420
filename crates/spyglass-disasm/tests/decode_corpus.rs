//! Exact-text decode corpus across execution modes and dialects.
//!
//! Each case pins the full rendered line, so regressions in prefix
//! handling, operand order, suffixes or annotations show up as text
//! diffs rather than silent drift.

use spyglass_core::{ExecutionMode, NoSymbols, SliceSource, Syntax};
use spyglass_disasm::{DecodedLine, Disassembler, InstructionDecoder};

const BASE: u64 = 0x1000;

fn decode(mode: ExecutionMode, syntax: Syntax, bytes: &[u8]) -> DecodedLine {
    let source = SliceSource::new(BASE, bytes);
    Disassembler::new(mode, syntax)
        .decode_instruction(BASE, &source, &NoSymbols)
        .unwrap_or_else(|err| panic!("decode failed for {bytes:02x?}: {err}"))
}

fn check(mode: ExecutionMode, syntax: Syntax, cases: &[(&[u8], &str)]) {
    for &(bytes, expected) in cases {
        let line = decode(mode, syntax, bytes);
        assert_eq!(
            line.text, expected,
            "bytes {bytes:02x?} rendered {:?}, expected {expected:?}",
            line.text
        );
        assert_eq!(
            line.length,
            bytes.len(),
            "bytes {bytes:02x?} consumed {} of {}",
            line.length,
            bytes.len()
        );
    }
}

#[test]
fn att_64bit() {
    check(
        ExecutionMode::Bits64,
        Syntax::Att,
        &[
            (&[0x90], "nop"),
            (&[0x55], "push %rbp"),
            (&[0x48, 0x89, 0xe5], "mov %rsp,%rbp"),
            (&[0xc3], "ret"),
            (&[0x0f, 0x1f, 0x00], "nopl (%rax)"),
            (&[0xf7, 0xd8], "neg %eax"),
            (&[0x48, 0x83, 0xec, 0x20], "sub $0x20,%rsp"),
            (&[0x48, 0x8b, 0x45, 0xf8], "mov -0x8(%rbp),%rax"),
            (&[0xb8, 0x34, 0x12, 0x00, 0x00], "mov $0x1234,%eax"),
            (&[0x66, 0xb8, 0x34, 0x12], "mov $0x1234,%ax"),
            (&[0x6a, 0xff], "pushq $0xffffffffffffffff"),
            (&[0x68, 0x10, 0x00, 0x00, 0x00], "pushq $0x10"),
            (&[0xff, 0xd0], "call *%rax"),
            (
                &[0xff, 0x25, 0x00, 0x00, 0x00, 0x00],
                "jmpq *0x0(%rip) # 0x1006",
            ),
            (&[0xf3, 0xa5], "rep movsl %ds:(%rsi),%es:(%rdi)"),
            (&[0xf3, 0x48, 0xab], "rep stosq %rax,%es:(%rdi)"),
            (&[0x0f, 0x05], "syscall"),
            (&[0xcc], "int3"),
            (&[0xcd, 0x80], "int $0x80"),
            (&[0xc2, 0x08, 0x00], "ret $0x8"),
            (&[0xe2, 0xfe], "loop 0x1000"),
            (&[0xeb, 0x05], "jmp 0x1007"),
            (&[0xe4, 0x60], "in $0x60,%al"),
            (&[0xc8, 0x10, 0x00, 0x01], "enter $0x10,$0x1"),
            (&[0xf6, 0xc0, 0x01], "test $0x1,%al"),
            (&[0x8f, 0xc0], "pop %rax"),
            (&[0x6b, 0xc0, 0x05], "imul $0x5,%eax,%eax"),
            (&[0x0f, 0xa4, 0xd0, 0x02], "shld $0x2,%edx,%eax"),
            (&[0x86, 0xe0], "xchg %ah,%al"),
            (&[0x40, 0x88, 0xe0], "mov %spl,%al"),
            (&[0x91], "xchg %eax,%ecx"),
            (&[0x66, 0x90], "xchg %ax,%ax"),
            (&[0xf3, 0x90], "pause"),
            (&[0x98], "cwtl"),
            (&[0x48, 0x98], "cltq"),
            (&[0x66, 0x99], "cwtd"),
            (&[0x48, 0x99], "cqto"),
            (&[0x0f, 0x94, 0xc0], "sete %al"),
            (&[0x48, 0x0f, 0x44, 0xc1], "cmove %rcx,%rax"),
            (&[0x0f, 0xc8], "bswap %eax"),
            (&[0x48, 0x0f, 0xc8], "bswap %rax"),
            (&[0x0f, 0xb6, 0xc0], "movzbl %al,%eax"),
            (&[0x48, 0x0f, 0xbf, 0xc8], "movswq %ax,%rcx"),
            (&[0x48, 0x63, 0xc8], "movslq %eax,%rcx"),
            (&[0xf0, 0x48, 0x0f, 0xb1, 0x0a], "lock cmpxchg %rcx,(%rdx)"),
            (&[0x66, 0xc3], "data16 ret"),
            (&[0x48, 0x66, 0xb8, 0x34, 0x12], "rex.W mov $0x1234,%ax"),
            (
                &[0x64, 0x48, 0x8b, 0x04, 0x25, 0x28, 0x00, 0x00, 0x00],
                "mov %fs:0x28,%rax",
            ),
            (&[0x48, 0x8d, 0x04, 0x8b], "lea (%rbx,%rcx,4),%rax"),
            (&[0xe3, 0x05], "jrcxz 0x1007"),
            (&[0x67, 0xe3, 0x05], "jecxz 0x1008"),
            (&[0x0f, 0x01, 0xf8], "swapgs"),
            (&[0x0f, 0x01, 0xc9], "mwait"),
            (&[0x0f, 0xae, 0xe8], "lfence"),
            (&[0x0f, 0xae, 0xf0], "mfence"),
            (&[0x48, 0x0f, 0xc7, 0x08], "cmpxchg16b (%rax)"),
            (&[0x0f, 0xc7, 0x08], "cmpxchg8b (%rax)"),
            (&[0x0f, 0x0f, 0xc1, 0xb4], "pfmul %mm1,%mm0"),
            (&[0x0f, 0xc2, 0xc1, 0x00], "cmpeqps %xmm1,%xmm0"),
            (&[0xf2, 0x0f, 0xc2, 0xc1, 0x01], "cmpltsd %xmm1,%xmm0"),
            (&[0x66, 0x0f, 0x6f, 0x00], "movdqa (%rax),%xmm0"),
            (&[0xf3, 0x0f, 0x10, 0xc1], "movss %xmm1,%xmm0"),
            (&[0x0f, 0x58, 0xc1], "addps %xmm1,%xmm0"),
            (&[0x0f, 0xef, 0xc1], "pxor %mm1,%mm0"),
            (&[0x66, 0x0f, 0xef, 0xc1], "pxor %xmm1,%xmm0"),
            (&[0xd9, 0xe8], "fld1"),
            (&[0xd8, 0xc1], "fadd %st(1),%st"),
            (&[0xde, 0xc1], "faddp %st,%st(1)"),
            (&[0xd8, 0x00], "fadds (%rax)"),
            (&[0xdd, 0x00], "fldl (%rax)"),
            (&[0xdf, 0x28], "fildq (%rax)"),
            (&[0xd9, 0x38], "fnstcw (%rax)"),
            (&[0x9b, 0xd9, 0x38], "fstcw (%rax)"),
            (&[0xdf, 0xe0], "fnstsw %ax"),
            (&[0x9b, 0xdf, 0xe0], "fstsw %ax"),
        ],
    );
}

#[test]
fn intel_64bit() {
    check(
        ExecutionMode::Bits64,
        Syntax::Intel,
        &[
            (&[0x55], "push rbp"),
            (&[0x48, 0x89, 0xe5], "mov rbp, rsp"),
            (&[0xc3], "ret"),
            (&[0x0f, 0x1f, 0x00], "nop dword ptr [rax]"),
            (&[0xf7, 0xd8], "neg eax"),
            (&[0x48, 0x83, 0xec, 0x20], "sub rsp, 0x20"),
            (&[0x48, 0x8b, 0x45, 0xf8], "mov rax, [rbp-0x8]"),
            (&[0xb8, 0x34, 0x12, 0x00, 0x00], "mov eax, 0x1234"),
            (&[0x6a, 0xff], "push 0xffffffffffffffff"),
            (&[0xff, 0xd0], "call rax"),
            (
                &[0xff, 0x25, 0x00, 0x00, 0x00, 0x00],
                "jmp qword ptr [rip+0x0] # 0x1006",
            ),
            (&[0xe8, 0x00, 0x01, 0x00, 0x00], "call 0x1105"),
            (&[0x98], "cwde"),
            (&[0x48, 0x98], "cdqe"),
            (&[0x0f, 0xb6, 0xc0], "movzx eax, al"),
            (&[0x48, 0x63, 0xc8], "movsxd rcx, eax"),
            (
                &[0x64, 0x48, 0x8b, 0x04, 0x25, 0x28, 0x00, 0x00, 0x00],
                "mov rax, fs:[0x28]",
            ),
            (&[0x48, 0x8d, 0x04, 0x8b], "lea rax, [rbx+rcx*4]"),
            (
                &[0x48, 0x8d, 0x05, 0x10, 0x00, 0x00, 0x00],
                "lea rax, [rip+0x10] # 0x1017",
            ),
            (&[0x66, 0x0f, 0x6f, 0x00], "movdqa xmm0, xmmword ptr [rax]"),
            (&[0xf3, 0xa5], "rep movs dword ptr es:[rdi], dword ptr ds:[rsi]"),
            (&[0xd8, 0x00], "fadd dword ptr [rax]"),
            (&[0xd8, 0xc1], "fadd st, st(1)"),
            (&[0xca, 0x08, 0x00], "retf 0x8"),
        ],
    );
}

#[test]
fn att_32bit() {
    check(
        ExecutionMode::Bits32,
        Syntax::Att,
        &[
            (&[0x60], "pusha"),
            (&[0x40], "inc %eax"),
            (&[0x48], "dec %eax"),
            (&[0x66, 0x50], "push %ax"),
            (&[0x55], "push %ebp"),
            (&[0x63, 0xc8], "arpl %cx,%ax"),
            (&[0xc4, 0x18], "les (%eax),%ebx"),
            (
                &[0x9a, 0x78, 0x56, 0x34, 0x12, 0x07, 0x00],
                "lcall $0x7,$0x12345678",
            ),
            (
                &[0xea, 0x78, 0x56, 0x34, 0x12, 0x07, 0x00],
                "ljmp $0x7,$0x12345678",
            ),
            (&[0xcf], "iret"),
            (&[0x67, 0x8b, 0x07], "mov (%bx),%eax"),
            (&[0x8b, 0x45, 0xfc], "mov -0x4(%ebp),%eax"),
            (&[0x0f, 0x34], "sysenter"),
            (&[0xd4, 0x0a], "aam $0xa"),
            (&[0x07], "pop %es"),
        ],
    );
}

#[test]
fn att_16bit() {
    check(
        ExecutionMode::Bits16,
        Syntax::Att,
        &[
            (&[0xb8, 0x34, 0x12], "mov $0x1234,%ax"),
            (&[0x66, 0xb8, 0x78, 0x56, 0x34, 0x12], "mov $0x12345678,%eax"),
            (&[0x8b, 0x47, 0x04], "mov 0x4(%bx),%ax"),
            (&[0x8b, 0x02], "mov (%bp,%si),%ax"),
            (&[0x8b, 0x06, 0x34, 0x12], "mov 0x1234,%ax"),
            (&[0xe8, 0x10, 0x00], "call 0x1013"),
            (&[0xcd, 0x21], "int $0x21"),
        ],
    );
}

#[test]
fn branch_targets_are_reported() {
    let line = decode(
        ExecutionMode::Bits64,
        Syntax::Att,
        &[0xe8, 0x00, 0x01, 0x00, 0x00],
    );
    assert_eq!(line.target, Some(0x1105));

    let line = decode(
        ExecutionMode::Bits64,
        Syntax::Att,
        &[0x48, 0x8d, 0x05, 0x10, 0x00, 0x00, 0x00],
    );
    assert_eq!(line.target, Some(0x1017));
}

#[test]
fn range_resynchronizes_past_bad_opcodes() {
    // ret, an invalid two-byte opcode, then nop.
    let bytes = [0xc3, 0x0f, 0xff, 0x90];
    let source = SliceSource::new(BASE, &bytes);
    let disasm = Disassembler::new(ExecutionMode::Bits64, Syntax::Att);
    let lines = disasm.disassemble_range(BASE, BASE + bytes.len() as u64, &source, &NoSymbols);

    let texts: Vec<&str> = lines.iter().map(|line| line.text.as_str()).collect();
    assert_eq!(texts, ["ret", "(bad)", "nop"]);
    assert_eq!(lines[1].length, 2);
    assert_eq!(lines[2].address, BASE + 3);
}
