//! Error types surfaced by the core's public API.

use thiserror::Error;

/// Errors the core can report back to a host.
#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum GbError {
    #[error("invalid cartridge header: {0}")]
    InvalidHeader(String),

    #[error("unsupported MBC type byte: {0:#04x}")]
    UnsupportedMbc(u8),

    #[error("illegal opcode {opcode:#04x} fetched at {address:#06x}")]
    IllegalOpcode { opcode: u8, address: u16 },

    #[error("bad save state: {0}")]
    BadSaveState(String),
}
