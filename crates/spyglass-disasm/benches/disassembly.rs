//! Benchmarks for decode throughput.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use spyglass_core::{ExecutionMode, NoSymbols, SliceSource, Syntax};
use spyglass_disasm::{Disassembler, InstructionDecoder};

/// Sample x86-64 code: a small function with a realistic mix of moves,
/// arithmetic, memory operands and control flow.
const X86_64_CODE: &[u8] = &[
    // Function prologue
    0x55, // push rbp
    0x48, 0x89, 0xe5, // mov rbp, rsp
    0x48, 0x83, 0xec, 0x20, // sub rsp, 0x20
    // Some arithmetic
    0x48, 0x89, 0x7d, 0xf8, // mov [rbp-8], rdi
    0x48, 0x8b, 0x45, 0xf8, // mov rax, [rbp-8]
    0x48, 0x83, 0xc0, 0x01, // add rax, 1
    0x48, 0x89, 0x45, 0xf0, // mov [rbp-16], rax
    // Conditional
    0x48, 0x83, 0x7d, 0xf0, 0x0a, // cmp qword [rbp-16], 10
    0x7e, 0x07, // jle .L1
    0xb8, 0x01, 0x00, 0x00, 0x00, // mov eax, 1
    0xeb, 0x05, // jmp .L2
    // .L1:
    0xb8, 0x00, 0x00, 0x00, 0x00, // mov eax, 0
    // .L2: epilogue
    0x48, 0x83, 0xc4, 0x20, // add rsp, 0x20
    0x5d, // pop rbp
    0xc3, // ret
];

/// Larger block for throughput testing (repeated pattern).
fn generate_block(size: usize) -> Vec<u8> {
    let mut block = Vec::with_capacity(size);
    while block.len() < size {
        let remaining = size - block.len();
        let take = remaining.min(X86_64_CODE.len());
        block.extend_from_slice(&X86_64_CODE[..take]);
    }
    block
}

fn bench_disassembly(c: &mut Criterion) {
    let mut group = c.benchmark_group("x86_64_disassembly");

    for (name, syntax) in [("att", Syntax::Att), ("intel", Syntax::Intel)] {
        let disasm = Disassembler::new(ExecutionMode::Bits64, syntax);

        group.bench_function(format!("single_instruction_{name}"), |b| {
            let source = SliceSource::new(0x1000, &X86_64_CODE[1..4]);
            b.iter(|| {
                let _ = disasm.decode_instruction(black_box(0x1000), &source, &NoSymbols);
            })
        });

        group.bench_function(format!("small_function_{name}"), |b| {
            let source = SliceSource::new(0x1000, X86_64_CODE);
            b.iter(|| {
                let _ = disasm.disassemble_range(
                    black_box(0x1000),
                    0x1000 + X86_64_CODE.len() as u64,
                    &source,
                    &NoSymbols,
                );
            })
        });
    }

    let disasm = Disassembler::new(ExecutionMode::Bits64, Syntax::Att);
    for size in [1024usize, 4096, 16384, 65536] {
        let code = generate_block(size);
        group.throughput(Throughput::Bytes(size as u64));
        group.bench_with_input(BenchmarkId::new("throughput", size), &code, |b, code| {
            let source = SliceSource::new(0x1000, code);
            b.iter(|| {
                let _ = disasm.disassemble_range(
                    black_box(0x1000),
                    0x1000 + code.len() as u64,
                    &source,
                    &NoSymbols,
                );
            })
        });
    }

    group.finish();
}

criterion_group!(benches, bench_disassembly);
criterion_main!(benches);
