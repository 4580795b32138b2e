use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use dmg_core::cpu::{Bus, Cpu};

struct BenchMemory {
    ram: Vec<u8>,
}

impl BenchMemory {
    fn new() -> Self {
        let mut ram = vec![0u8; 0x10000];
        // A tight loop over a handful of common instruction shapes:
        // INC B; DEC C; LD D,E; ADD A,H; JR -6 (loop back to the start)
        let program = [0x04, 0x0D, 0x53, 0x84, 0x18, 0xFA];
        ram[0x0100..0x0100 + program.len()].copy_from_slice(&program);
        Self { ram }
    }
}

impl Bus for BenchMemory {
    fn read(&self, addr: u16) -> u8 {
        self.ram[addr as usize]
    }

    fn write(&mut self, addr: u16, val: u8) {
        self.ram[addr as usize] = val;
    }

    fn pending_interrupt(&self) -> Option<u8> {
        None
    }

    fn ack_interrupt(&mut self, _bit: u8) {}
}

fn bench_cpu_step(c: &mut Criterion) {
    let mut group = c.benchmark_group("cpu_step");

    group.bench_function("single_instruction", |b| {
        b.iter(|| {
            let mut cpu = Cpu::new(BenchMemory::new());
            cpu.reset();
            let cycles = cpu.step();
            black_box(cycles);
        });
    });

    group.finish();
}

fn bench_cpu_multiple_steps(c: &mut Criterion) {
    let mut group = c.benchmark_group("cpu_multiple_steps");

    for step_count in [10, 100, 1000].iter() {
        group.bench_with_input(BenchmarkId::from_parameter(step_count), step_count, |b, &count| {
            b.iter(|| {
                let mut cpu = Cpu::new(BenchMemory::new());
                cpu.reset();
                for _ in 0..count {
                    cpu.step();
                }
                black_box(cpu.pc);
            });
        });
    }

    group.finish();
}

fn bench_cpu_reset(c: &mut Criterion) {
    c.bench_function("cpu_reset", |b| {
        let mut cpu = Cpu::new(BenchMemory::new());
        b.iter(|| {
            cpu.reset();
            black_box(cpu.pc);
        });
    });
}

criterion_group!(benches, bench_cpu_step, bench_cpu_multiple_steps, bench_cpu_reset);
criterion_main!(benches);
