//! Local directory frame source.
//!
//! Cycles over the JPEG files of a directory in name order, decoding
//! each in-memory. Lets the daemon run against stored captures when no
//! live device is wired up.

use std::fs;
use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};
use image::GenericImageView;

use super::FrameSource;
use crate::frame::{CameraFrame, PixelFormat};

pub struct DirectorySource {
    dir: PathBuf,
    files: Vec<PathBuf>,
    cursor: usize,
    frame_count: u64,
}

impl DirectorySource {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            files: Vec::new(),
            cursor: 0,
            frame_count: 0,
        }
    }
}

impl FrameSource for DirectorySource {
    fn connect(&mut self) -> Result<()> {
        let entries = fs::read_dir(&self.dir)
            .with_context(|| format!("read capture directory {}", self.dir.display()))?;

        let mut files: Vec<PathBuf> = entries
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|path| {
                matches!(
                    path.extension()
                        .and_then(|ext| ext.to_str())
                        .map(str::to_ascii_lowercase)
                        .as_deref(),
                    Some("jpg" | "jpeg")
                )
            })
            .collect();
        files.sort();

        if files.is_empty() {
            return Err(anyhow!("no jpeg captures in {}", self.dir.display()));
        }

        log::info!(
            "DirectorySource: {} captures in {}",
            files.len(),
            self.dir.display()
        );
        self.files = files;
        self.cursor = 0;
        Ok(())
    }

    fn next_frame(&mut self) -> Result<CameraFrame> {
        if self.files.is_empty() {
            return Err(anyhow!(
                "directory source not connected; call connect() first"
            ));
        }

        let path = self.files[self.cursor].clone();
        self.cursor = (self.cursor + 1) % self.files.len();

        let bytes =
            fs::read(&path).with_context(|| format!("read capture {}", path.display()))?;
        let decoded = image::load_from_memory(&bytes)
            .with_context(|| format!("decode capture {}", path.display()))?;
        let (width, height) = decoded.dimensions();
        let rgb = decoded.into_rgb8();

        self.frame_count += 1;
        CameraFrame::new(PixelFormat::Rgb8, width, height, rgb.into_raw())
    }

    fn frames_captured(&self) -> u64 {
        self.frame_count
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::codecs::jpeg::JpegEncoder;
    use image::ExtendedColorType;

    fn write_jpeg(path: &std::path::Path, width: u32, height: u32) {
        let pixels = vec![200u8; width as usize * height as usize * 3];
        let mut out = Vec::new();
        let mut encoder = JpegEncoder::new_with_quality(&mut out, 85);
        encoder
            .encode(&pixels, width, height, ExtendedColorType::Rgb8)
            .expect("encode fixture");
        fs::write(path, out).expect("write fixture");
    }

    #[test]
    fn empty_directory_fails_to_connect() {
        let dir = tempfile::tempdir().expect("temp dir");
        let mut source = DirectorySource::new(dir.path());
        assert!(source.connect().is_err());
    }

    #[test]
    fn cycles_over_captures_in_name_order() {
        let dir = tempfile::tempdir().expect("temp dir");
        write_jpeg(&dir.path().join("b.jpg"), 32, 24);
        write_jpeg(&dir.path().join("a.jpg"), 16, 12);
        fs::write(dir.path().join("notes.txt"), b"ignored").unwrap();

        let mut source = DirectorySource::new(dir.path());
        source.connect().unwrap();

        let first = source.next_frame().unwrap();
        assert_eq!((first.width, first.height), (16, 12));
        let second = source.next_frame().unwrap();
        assert_eq!((second.width, second.height), (32, 24));
        // Wraps around.
        let third = source.next_frame().unwrap();
        assert_eq!((third.width, third.height), (16, 12));
        assert_eq!(source.frames_captured(), 3);
    }
}
