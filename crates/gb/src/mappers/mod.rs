//! Game Boy Memory Bank Controllers (MBCs)
//!
//! This module contains implementations of the cartridge mappers in scope
//! for this engine: no-MBC, MBC1, MBC3 (with RTC), and MBC5.

mod mbc0;
mod mbc1;
mod mbc3;
mod mbc5;

pub use mbc0::Mbc0;
pub use mbc1::Mbc1;
pub use mbc3::Mbc3;
pub use mbc5::Mbc5;

use serde::{Deserialize, Serialize};

use crate::error::GbError;

/// Unified mapper enum that dispatches to specific implementations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Mapper {
    Mbc0(Mbc0),
    Mbc1(Mbc1),
    Mbc3(Mbc3),
    Mbc5(Mbc5),
}

impl Mapper {
    /// Create a mapper from ROM data and the cartridge type byte at 0x0147.
    pub fn from_cart(rom: Vec<u8>, ram: Vec<u8>, cart_type: u8) -> Result<Self, GbError> {
        match cart_type {
            0x00 | 0x08 | 0x09 => Ok(Mapper::Mbc0(Mbc0::new(rom, ram))),
            0x01 | 0x02 | 0x03 => Ok(Mapper::Mbc1(Mbc1::new(rom, ram))),
            0x0F | 0x10 | 0x11 | 0x12 | 0x13 => Ok(Mapper::Mbc3(Mbc3::new(rom, ram))),
            0x19 | 0x1A | 0x1B | 0x1C | 0x1D | 0x1E => Ok(Mapper::Mbc5(Mbc5::new(rom, ram))),
            _ => Err(GbError::UnsupportedMbc(cart_type)),
        }
    }

    pub fn read_rom(&self, addr: u16) -> u8 {
        match self {
            Mapper::Mbc0(m) => m.read_rom(addr),
            Mapper::Mbc1(m) => m.read_rom(addr),
            Mapper::Mbc3(m) => m.read_rom(addr),
            Mapper::Mbc5(m) => m.read_rom(addr),
        }
    }

    pub fn write_rom(&mut self, addr: u16, val: u8) {
        match self {
            Mapper::Mbc0(m) => m.write_rom(addr, val),
            Mapper::Mbc1(m) => m.write_rom(addr, val),
            Mapper::Mbc3(m) => m.write_rom(addr, val),
            Mapper::Mbc5(m) => m.write_rom(addr, val),
        }
    }

    pub fn read_ram(&self, addr: u16) -> u8 {
        match self {
            Mapper::Mbc0(m) => m.read_ram(addr),
            Mapper::Mbc1(m) => m.read_ram(addr),
            Mapper::Mbc3(m) => m.read_ram(addr),
            Mapper::Mbc5(m) => m.read_ram(addr),
        }
    }

    pub fn write_ram(&mut self, addr: u16, val: u8) {
        match self {
            Mapper::Mbc0(m) => m.write_ram(addr, val),
            Mapper::Mbc1(m) => m.write_ram(addr, val),
            Mapper::Mbc3(m) => m.write_ram(addr, val),
            Mapper::Mbc5(m) => m.write_ram(addr, val),
        }
    }

    /// Advance the real-time clock, if this mapper has one.
    pub fn tick_rtc(&mut self, seconds: u64) {
        if let Mapper::Mbc3(m) = self {
            m.tick_seconds(seconds);
        }
    }

    /// The opaque battery-backed save RAM blob, for persistence hosts.
    pub fn battery_ram(&self) -> &[u8] {
        match self {
            Mapper::Mbc0(m) => m.ram(),
            Mapper::Mbc1(m) => m.ram(),
            Mapper::Mbc3(m) => m.ram(),
            Mapper::Mbc5(m) => m.ram(),
        }
    }

    pub fn load_battery_ram(&mut self, data: &[u8]) {
        match self {
            Mapper::Mbc0(m) => m.load_ram(data),
            Mapper::Mbc1(m) => m.load_ram(data),
            Mapper::Mbc3(m) => m.load_ram(data),
            Mapper::Mbc5(m) => m.load_ram(data),
        }
    }

    #[cfg(test)]
    pub fn name(&self) -> &str {
        match self {
            Mapper::Mbc0(_) => "MBC0",
            Mapper::Mbc1(_) => "MBC1",
            Mapper::Mbc3(_) => "MBC3",
            Mapper::Mbc5(_) => "MBC5",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cart_type_selects_mapper() {
        assert_eq!(Mapper::from_cart(vec![0; 0x8000], vec![], 0x00).unwrap().name(), "MBC0");
        assert_eq!(Mapper::from_cart(vec![0; 0x8000], vec![], 0x02).unwrap().name(), "MBC1");
        assert_eq!(Mapper::from_cart(vec![0; 0x8000], vec![], 0x11).unwrap().name(), "MBC3");
        assert_eq!(Mapper::from_cart(vec![0; 0x8000], vec![], 0x1A).unwrap().name(), "MBC5");
    }

    #[test]
    fn unknown_cart_type_is_unsupported() {
        assert_eq!(
            Mapper::from_cart(vec![0; 0x8000], vec![], 0xFF).unwrap_err(),
            GbError::UnsupportedMbc(0xFF)
        );
    }

    #[test]
    fn rom_reads_delegate() {
        let mut rom = vec![0; 0x8000];
        rom[0] = 0xAA;
        rom[0x4000] = 0xBB;
        let mapper = Mapper::from_cart(rom, vec![], 0x00).unwrap();
        assert_eq!(mapper.read_rom(0x0000), 0xAA);
        assert_eq!(mapper.read_rom(0x4000), 0xBB);
    }
}
