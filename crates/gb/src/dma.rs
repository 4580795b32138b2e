//! OAM DMA engine.
//!
//! Simplified per spec §4.7: the 160-byte copy happens atomically the
//! instant 0xFF46 is written, and only a countdown is stepped afterward to
//! shield OAM from CPU reads for the nominal 640-cycle transfer duration.

use serde::{Deserialize, Serialize};

pub const TRANSFER_CYCLES: u32 = 640;
pub const TRANSFER_LEN: u16 = 0xA0;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OamDma {
    cycles_remaining: u32,
}

impl Default for OamDma {
    fn default() -> Self {
        Self::new()
    }
}

impl OamDma {
    pub fn new() -> Self {
        Self {
            cycles_remaining: 0,
        }
    }

    pub fn reset(&mut self) {
        self.cycles_remaining = 0;
    }

    pub fn start(&mut self) {
        self.cycles_remaining = TRANSFER_CYCLES;
    }

    pub fn is_active(&self) -> bool {
        self.cycles_remaining > 0
    }

    pub fn step(&mut self, cycles: u32) {
        self.cycles_remaining = self.cycles_remaining.saturating_sub(cycles);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn active_for_nominal_duration() {
        let mut dma = OamDma::new();
        dma.start();
        dma.step(639);
        assert!(dma.is_active());
        dma.step(1);
        assert!(!dma.is_active());
    }

    #[test]
    fn inactive_by_default() {
        let dma = OamDma::new();
        assert!(!dma.is_active());
    }
}
