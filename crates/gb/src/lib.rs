//! A cycle-accurate Nintendo Game Boy (DMG) emulation core.
//!
//! Grounded on the teacher's `GbSystem` (`lib.rs`), which wired a stub CPU
//! against a flat bus and a polymorphic `System` trait shared across every
//! machine in that workspace. This crate hosts exactly one machine, so the
//! module list below replaces that trait with a single concrete
//! [`Emulator`], built from real CPU/MMU/PPU/APU/Timer/InterruptController
//! components instead of the teacher's frame-based stand-ins.
//!
//! # Memory map
//! - `$0000-$3FFF`: ROM Bank 0
//! - `$4000-$7FFF`: ROM Bank 1-N (switchable via MBC)
//! - `$8000-$9FFF`: VRAM
//! - `$A000-$BFFF`: External RAM (switchable via MBC)
//! - `$C000-$DFFF`: Work RAM
//! - `$E000-$FDFF`: Echo RAM (mirror of $C000-$DDFF)
//! - `$FE00-$FE9F`: OAM
//! - `$FF00-$FF7F`: I/O registers
//! - `$FF80-$FFFE`: High RAM
//! - `$FFFF`: Interrupt Enable register

pub mod apu;
pub mod cartridge;
pub mod cpu;
pub mod dma;
pub mod emulator;
pub mod error;
pub mod interrupts;
pub mod joypad;
pub mod mappers;
pub mod mmu;
pub mod ppu;
pub mod serial;
pub mod timer;

pub use emulator::Emulator;
pub use error::GbError;
pub use joypad::Button;
