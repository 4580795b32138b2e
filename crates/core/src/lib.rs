//! Shared primitives used by the DMG emulator core.
//!
//! This crate holds the pieces that don't carry any Game Boy-specific
//! behavior: the framebuffer type handed back to the host, and a
//! categorized logging facility used throughout the engine to avoid
//! paying for `format!()` on hot paths when a category is silenced.

pub mod logging;

pub mod types {
    use serde::{Deserialize, Serialize};

    /// RGBA8888 framebuffer produced once per frame by the PPU.
    ///
    /// Pixels are stored row-major, top-to-bottom, left-to-right, matching
    /// the Game Boy's 160x144 visible area.
    #[derive(Debug, Clone, Serialize, Deserialize)]
    pub struct Frame {
        pub width: u32,
        pub height: u32,
        pub pixels: Vec<u32>,
    }

    impl Frame {
        pub fn new(width: u32, height: u32) -> Self {
            Self {
                width,
                height,
                pixels: vec![0xFF00_0000; (width * height) as usize],
            }
        }
    }

    /// A single interleaved stereo audio sample pair, in `[-1.0, 1.0]`.
    pub type StereoSample = (f32, f32);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frame_initialization_is_opaque_black() {
        let f = types::Frame::new(10, 10);
        assert_eq!(f.pixels.len(), 100);
        assert_eq!(f.width, 10);
        assert_eq!(f.height, 10);
        assert!(f.pixels.iter().all(|&p| p == 0xFF00_0000));
    }
}
