//! Synthetic frame source for tests and demos.

use anyhow::{anyhow, Result};

use super::FrameSource;
use crate::frame::{CameraFrame, PixelFormat};

const DEFAULT_WIDTH: u32 = 640;
const DEFAULT_HEIGHT: u32 = 480;

/// Produces a moving synthetic gradient so consecutive frames differ.
pub struct StubSource {
    name: String,
    width: u32,
    height: u32,
    frame_count: u64,
    connected: bool,
}

impl StubSource {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            frame_count: 0,
            connected: false,
        }
    }

    pub fn with_dimensions(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }
}

impl FrameSource for StubSource {
    fn connect(&mut self) -> Result<()> {
        self.connected = true;
        log::info!("StubSource: connected to {} (synthetic)", self.name);
        Ok(())
    }

    fn next_frame(&mut self) -> Result<CameraFrame> {
        if !self.connected {
            return Err(anyhow!("stub source not connected; call connect() first"));
        }
        self.frame_count += 1;

        let pixel_count = self.width as usize * self.height as usize * 3;
        let mut pixels = vec![0u8; pixel_count];
        for (i, pixel) in pixels.iter_mut().enumerate() {
            *pixel = ((i as u64 + self.frame_count * 7) % 256) as u8;
        }

        CameraFrame::new(PixelFormat::Rgb8, self.width, self.height, pixels)
    }

    fn frames_captured(&self) -> u64 {
        self.frame_count
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn capture_before_connect_is_rejected() {
        let mut source = StubSource::new("front");
        assert!(source.next_frame().is_err());
    }

    #[test]
    fn frames_carry_configured_dimensions() {
        let mut source = StubSource::new("front").with_dimensions(320, 240);
        source.connect().unwrap();
        let frame = source.next_frame().unwrap();
        assert_eq!((frame.width, frame.height), (320, 240));
        assert_eq!(source.frames_captured(), 1);
    }
}
