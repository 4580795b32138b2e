//! Top-level driver: owns the CPU and MMU, and exposes the host-facing API.
//!
//! Grounded on the teacher's `GbSystem` (`lib.rs`), which wired a `CpuLr35902`
//! against `GbBus` behind a shared `System` trait implemented by every
//! emulated machine in that workspace. This crate hosts exactly one system,
//! so the polymorphic trait is dropped in favor of a single concrete
//! `Emulator`, but the lifecycle shape (`new`/`reset`/`step`/save-state) and
//! the "peripherals step in a fixed order after the CPU returns its cycle
//! count" driver loop are carried over directly.

use serde::{Deserialize, Serialize};

use crate::cartridge::Cartridge;
use crate::cpu::{Bus, Cpu};
use crate::error::GbError;
use crate::joypad::Button;
use crate::mmu::Mmu;
use crate::ppu::Mode;
use dmg_support::types::Frame;

const SAVE_STATE_VERSION: u32 = 1;

#[derive(Debug, Clone, Serialize, Deserialize)]
struct CpuState {
    a: u8,
    f: u8,
    b: u8,
    c: u8,
    d: u8,
    e: u8,
    h: u8,
    l: u8,
    sp: u16,
    pc: u16,
    ime: bool,
    halted: bool,
    stopped: bool,
}

#[derive(Debug, Serialize, Deserialize)]
struct SaveState {
    version: u32,
    cpu: CpuState,
    mmu: Mmu,
}

pub struct Emulator {
    cpu: Cpu<Mmu>,
}

impl Emulator {
    pub fn new(rom_bytes: Vec<u8>) -> Result<Self, GbError> {
        let cartridge = Cartridge::load(rom_bytes)?;
        let mmu = Mmu::new(cartridge);
        let mut cpu = Cpu::new(mmu);
        cpu.reset();
        Ok(Self { cpu })
    }

    pub fn reset(&mut self) {
        let cartridge = self.cpu.bus.cartridge.clone();
        self.cpu.bus = Mmu::new(cartridge);
        self.cpu.reset();
    }

    /// Run one CPU instruction (or interrupt service), stepping every other
    /// peripheral by the same cycle count afterward, in the contracted
    /// order: timer, DMA, PPU, APU, joypad (joypad has no per-cycle work of
    /// its own; it reacts to `set_button` instead of a `step`).
    pub fn step_instruction(&mut self) -> u32 {
        let cycles = self.cpu.step();
        self.cpu.bus.step(cycles);
        cycles
    }

    /// Advance until the PPU transitions from LY=143 mode 0 into LY=144
    /// mode 1 (vblank entry), returning the cycle count consumed.
    pub fn run_until_vblank(&mut self) -> u32 {
        let mut total = 0;
        loop {
            total += self.step_instruction();
            if self.cpu.bus.ppu.take_vblank_entered() {
                break;
            }
        }
        total
    }

    pub fn set_button(&mut self, button: Button, pressed: bool) {
        self.cpu.bus.joypad.set_button(button, pressed, &mut self.cpu.bus.interrupts);
    }

    pub fn framebuffer(&self) -> &Frame {
        self.cpu.bus.ppu.frame()
    }

    pub fn pull_audio(&mut self, n_samples: usize) -> Vec<(f32, f32)> {
        self.cpu.bus.apu.pull_audio(n_samples)
    }

    pub fn battery_ram(&self) -> Option<&[u8]> {
        self.cpu.bus.cartridge.battery_ram()
    }

    pub fn load_battery_ram(&mut self, data: &[u8]) -> Result<(), GbError> {
        self.cpu.bus.cartridge.load_battery_ram(data)
    }

    /// Advance the cartridge's real-time clock (MBC3 only; a no-op on every
    /// other mapper) by the given number of wall-clock seconds. The core has
    /// no notion of wall-clock time on its own, so a host that wants the RTC
    /// to track real time drives it from here between steps.
    pub fn tick_rtc(&mut self, seconds: u64) {
        self.cpu.bus.cartridge.tick_rtc(seconds);
    }

    pub fn save_state(&self) -> Vec<u8> {
        let state = SaveState {
            version: SAVE_STATE_VERSION,
            cpu: CpuState {
                a: self.cpu.a,
                f: self.cpu.f,
                b: self.cpu.b,
                c: self.cpu.c,
                d: self.cpu.d,
                e: self.cpu.e,
                h: self.cpu.h,
                l: self.cpu.l,
                sp: self.cpu.sp,
                pc: self.cpu.pc,
                ime: self.cpu.ime,
                halted: self.cpu.halted,
                stopped: self.cpu.stopped,
            },
            mmu: self.cpu.bus.clone(),
        };
        serde_json::to_vec(&state).expect("save state is always representable as JSON")
    }

    pub fn load_state(&mut self, data: &[u8]) -> Result<(), GbError> {
        let state: SaveState =
            serde_json::from_slice(data).map_err(|e| GbError::BadSaveState(e.to_string()))?;
        if state.version != SAVE_STATE_VERSION {
            return Err(GbError::BadSaveState(format!(
                "unsupported save state version {} (expected {SAVE_STATE_VERSION})",
                state.version
            )));
        }

        self.cpu.a = state.cpu.a;
        self.cpu.f = state.cpu.f;
        self.cpu.b = state.cpu.b;
        self.cpu.c = state.cpu.c;
        self.cpu.d = state.cpu.d;
        self.cpu.e = state.cpu.e;
        self.cpu.h = state.cpu.h;
        self.cpu.l = state.cpu.l;
        self.cpu.sp = state.cpu.sp;
        self.cpu.pc = state.cpu.pc;
        self.cpu.ime = state.cpu.ime;
        self.cpu.halted = state.cpu.halted;
        self.cpu.stopped = state.cpu.stopped;
        self.cpu.bus = state.mmu;
        Ok(())
    }

    #[cfg(test)]
    fn ppu_mode(&self) -> Mode {
        self.cpu.bus.ppu.mode()
    }
}
