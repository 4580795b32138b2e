//! Centralized logging configuration for the emulator core.
//!
//! Each hardware component logs through a category so that a host can
//! turn on CPU tracing without being flooded by PPU scanline chatter, or
//! vice versa. Levels are stored in atomics so any component can check
//! `should_log` without needing a `&mut` reference or a lock.
//!
//! # Usage
//!
//! ```rust
//! use dmg_support::logging::{LogConfig, LogLevel, LogCategory};
//!
//! LogConfig::global().set_level(LogCategory::Cpu, LogLevel::Debug);
//!
//! if LogConfig::global().should_log(LogCategory::Cpu, LogLevel::Info) {
//!     eprintln!("cpu: something happened");
//! }
//! ```

use std::sync::atomic::{AtomicU8, Ordering};

/// Log level for controlling verbosity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[repr(u8)]
pub enum LogLevel {
    Off = 0,
    Error = 1,
    Warn = 2,
    Info = 3,
    Debug = 4,
    Trace = 5,
}

impl LogLevel {
    /// Parse a log level from a string (case-insensitive).
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "off" | "0" => Some(LogLevel::Off),
            "error" | "err" | "1" => Some(LogLevel::Error),
            "warn" | "warning" | "2" => Some(LogLevel::Warn),
            "info" | "3" => Some(LogLevel::Info),
            "debug" | "4" => Some(LogLevel::Debug),
            "trace" | "5" => Some(LogLevel::Trace),
            _ => None,
        }
    }

    fn to_u8(self) -> u8 {
        self as u8
    }

    fn from_u8(val: u8) -> Self {
        match val {
            0 => LogLevel::Off,
            1 => LogLevel::Error,
            2 => LogLevel::Warn,
            3 => LogLevel::Info,
            4 => LogLevel::Debug,
            5 => LogLevel::Trace,
            _ => LogLevel::Off,
        }
    }
}

/// Log category, one per major hardware component.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogCategory {
    /// CPU instruction dispatch and interrupt servicing.
    Cpu,
    /// MMU routing and cartridge/MBC bank switches.
    Mmu,
    /// PPU mode transitions and register writes.
    Ppu,
    /// APU register writes and frame sequencer ticks.
    Apu,
    /// Timer overflow and TAC changes.
    Timer,
    /// Unimplemented or stubbed behavior (serial port, etc).
    Stubs,
}

const CATEGORY_COUNT: usize = 6;

fn category_index(category: LogCategory) -> usize {
    match category {
        LogCategory::Cpu => 0,
        LogCategory::Mmu => 1,
        LogCategory::Ppu => 2,
        LogCategory::Apu => 3,
        LogCategory::Timer => 4,
        LogCategory::Stubs => 5,
    }
}

/// Global logging configuration, one atomic level per category plus a
/// global fallback.
pub struct LogConfig {
    global_level: AtomicU8,
    levels: [AtomicU8; CATEGORY_COUNT],
}

impl LogConfig {
    const fn new() -> Self {
        Self {
            global_level: AtomicU8::new(LogLevel::Off as u8),
            levels: [
                AtomicU8::new(LogLevel::Off as u8),
                AtomicU8::new(LogLevel::Off as u8),
                AtomicU8::new(LogLevel::Off as u8),
                AtomicU8::new(LogLevel::Off as u8),
                AtomicU8::new(LogLevel::Off as u8),
                AtomicU8::new(LogLevel::Off as u8),
            ],
        }
    }

    /// Get the global singleton instance.
    pub fn global() -> &'static Self {
        static INSTANCE: LogConfig = LogConfig::new();
        &INSTANCE
    }

    pub fn set_global_level(&self, level: LogLevel) {
        self.global_level.store(level.to_u8(), Ordering::Relaxed);
    }

    pub fn get_global_level(&self) -> LogLevel {
        LogLevel::from_u8(self.global_level.load(Ordering::Relaxed))
    }

    pub fn set_level(&self, category: LogCategory, level: LogLevel) {
        self.levels[category_index(category)].store(level.to_u8(), Ordering::Relaxed);
    }

    pub fn get_level(&self, category: LogCategory) -> LogLevel {
        LogLevel::from_u8(self.levels[category_index(category)].load(Ordering::Relaxed))
    }

    /// True if a message at `level` for `category` should be emitted.
    ///
    /// A category-specific level, once set, overrides the global level
    /// entirely; otherwise the global level applies.
    pub fn should_log(&self, category: LogCategory, level: LogLevel) -> bool {
        let category_level = self.get_level(category);
        if category_level != LogLevel::Off {
            level <= category_level
        } else {
            level <= self.get_global_level()
        }
    }

    /// Reset every category and the global level back to `Off`.
    pub fn reset(&self) {
        self.set_global_level(LogLevel::Off);
        for category in [
            LogCategory::Cpu,
            LogCategory::Mmu,
            LogCategory::Ppu,
            LogCategory::Apu,
            LogCategory::Timer,
            LogCategory::Stubs,
        ] {
            self.set_level(category, LogLevel::Off);
        }
    }
}

/// Convenience macro for categorized logging.
#[macro_export]
macro_rules! emu_log {
    ($category:expr, $level:expr, $($arg:tt)*) => {
        if $crate::logging::LogConfig::global().should_log($category, $level) {
            eprintln!($($arg)*);
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn log_level_parsing() {
        assert_eq!(LogLevel::from_str("off"), Some(LogLevel::Off));
        assert_eq!(LogLevel::from_str("DEBUG"), Some(LogLevel::Debug));
        assert_eq!(LogLevel::from_str("5"), Some(LogLevel::Trace));
        assert_eq!(LogLevel::from_str("nonsense"), None);
    }

    #[test]
    fn log_level_ordering() {
        assert!(LogLevel::Off < LogLevel::Error);
        assert!(LogLevel::Debug < LogLevel::Trace);
    }

    #[test]
    fn category_level_overrides_global() {
        let config = LogConfig::new();
        config.set_global_level(LogLevel::Error);
        config.set_level(LogCategory::Cpu, LogLevel::Debug);

        assert!(config.should_log(LogCategory::Cpu, LogLevel::Debug));
        assert!(!config.should_log(LogCategory::Ppu, LogLevel::Warn));
        assert!(config.should_log(LogCategory::Ppu, LogLevel::Error));
    }

    #[test]
    fn reset_clears_everything() {
        let config = LogConfig::new();
        config.set_global_level(LogLevel::Trace);
        config.set_level(LogCategory::Cpu, LogLevel::Debug);

        config.reset();

        assert_eq!(config.get_global_level(), LogLevel::Off);
        assert_eq!(config.get_level(LogCategory::Cpu), LogLevel::Off);
    }
}
