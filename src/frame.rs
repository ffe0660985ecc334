//! Captured frame model.
//!
//! A `CameraFrame` is a transient pixel buffer tagged with its layout.
//! It lives for one capture cycle: the pipeline encodes it to JPEG for
//! the prediction calls, reads its dimensions for the coordinate
//! mapper, then drops it.

use anyhow::{anyhow, Result};
use image::codecs::jpeg::JpegEncoder;
use image::ExtendedColorType;

use crate::error::PredictError;

const JPEG_QUALITY: u8 = 85;

/// Pixel layout of a captured buffer.
///
/// Capture devices commonly hand out BGRA; the stub and file sources
/// produce RGB.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PixelFormat {
    Rgb8,
    Bgra8,
}

impl PixelFormat {
    pub fn bytes_per_pixel(self) -> usize {
        match self {
            PixelFormat::Rgb8 => 3,
            PixelFormat::Bgra8 => 4,
        }
    }
}

/// One captured frame: raw pixels plus their layout and dimensions.
pub struct CameraFrame {
    data: Vec<u8>,
    format: PixelFormat,
    pub width: u32,
    pub height: u32,
}

impl CameraFrame {
    /// Wrap a pixel buffer. The buffer length must match
    /// `width * height * bytes_per_pixel` for the given format.
    pub fn new(format: PixelFormat, width: u32, height: u32, data: Vec<u8>) -> Result<Self> {
        let expected = width as usize * height as usize * format.bytes_per_pixel();
        if data.len() != expected {
            return Err(anyhow!(
                "frame buffer length {} does not match {}x{} {:?} (expected {})",
                data.len(),
                width,
                height,
                format,
                expected
            ));
        }
        Ok(Self {
            data,
            format,
            width,
            height,
        })
    }

    pub fn format(&self) -> PixelFormat {
        self.format
    }

    /// Encode the frame as JPEG for the prediction request.
    ///
    /// Encoding failures belong to the transport error class: they are
    /// surfaced per cycle like a network failure, not treated as fatal.
    pub fn encode_jpeg(&self) -> Result<Vec<u8>, PredictError> {
        let mut out = Vec::new();
        let mut encoder = JpegEncoder::new_with_quality(&mut out, JPEG_QUALITY);
        match self.format {
            PixelFormat::Rgb8 => {
                encoder.encode(&self.data, self.width, self.height, ExtendedColorType::Rgb8)?;
            }
            PixelFormat::Bgra8 => {
                let rgb = bgra_to_rgb(&self.data);
                encoder.encode(&rgb, self.width, self.height, ExtendedColorType::Rgb8)?;
            }
        }
        Ok(out)
    }
}

fn bgra_to_rgb(bgra: &[u8]) -> Vec<u8> {
    let mut rgb = Vec::with_capacity(bgra.len() / 4 * 3);
    for pixel in bgra.chunks_exact(4) {
        rgb.extend_from_slice(&[pixel[2], pixel[1], pixel[0]]);
    }
    rgb
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_mismatched_buffer_length() {
        let result = CameraFrame::new(PixelFormat::Rgb8, 4, 4, vec![0u8; 10]);
        assert!(result.is_err());
    }

    #[test]
    fn encodes_rgb_frame_to_jpeg() {
        let frame = CameraFrame::new(PixelFormat::Rgb8, 8, 8, vec![128u8; 8 * 8 * 3]).unwrap();
        let bytes = frame.encode_jpeg().unwrap();
        // JPEG SOI marker
        assert_eq!(&bytes[..2], &[0xFF, 0xD8]);
    }

    #[test]
    fn encodes_bgra_frame_with_channel_swap() {
        // Solid blue in BGRA; decode and check it stays blue in RGB.
        let mut data = Vec::new();
        for _ in 0..(8 * 8) {
            data.extend_from_slice(&[255, 0, 0, 255]);
        }
        let frame = CameraFrame::new(PixelFormat::Bgra8, 8, 8, data).unwrap();
        let bytes = frame.encode_jpeg().unwrap();

        let decoded = image::load_from_memory(&bytes).unwrap().into_rgb8();
        let pixel = decoded.get_pixel(4, 4);
        assert!(pixel[2] > 200, "blue channel lost: {:?}", pixel);
        assert!(pixel[0] < 50, "red channel leaked: {:?}", pixel);
    }

    #[test]
    fn bgra_conversion_drops_alpha() {
        let rgb = bgra_to_rgb(&[10, 20, 30, 40, 50, 60, 70, 80]);
        assert_eq!(rgb, vec![30, 20, 10, 70, 60, 50]);
    }
}
