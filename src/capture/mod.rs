//! Frame sources.
//!
//! The camera is an external collaborator behind the `FrameSource`
//! trait: the pipeline acquires it once, then pulls one frame per
//! cycle. The sources here stand in for a real device:
//! - `StubSource` produces synthetic frames for tests and demos
//! - `DirectorySource` cycles over stored JPEG captures
//!
//! `connect` failures mean the device cannot be acquired; the pipeline
//! treats them as fatal and never starts the loop.

mod directory;
mod stub;

pub use directory::DirectorySource;
pub use stub::StubSource;

use anyhow::{anyhow, Result};
use url::Url;

use crate::frame::CameraFrame;

pub trait FrameSource {
    /// Acquire the device. Called once before the loop starts.
    fn connect(&mut self) -> Result<()>;

    /// Capture the next frame.
    fn next_frame(&mut self) -> Result<CameraFrame>;

    /// Frames captured so far.
    fn frames_captured(&self) -> u64;
}

impl<T: FrameSource + ?Sized> FrameSource for Box<T> {
    fn connect(&mut self) -> Result<()> {
        (**self).connect()
    }

    fn next_frame(&mut self) -> Result<CameraFrame> {
        (**self).next_frame()
    }

    fn frames_captured(&self) -> u64 {
        (**self).frames_captured()
    }
}

/// Build a source from a config spec: `stub://<name>` for the synthetic
/// source, or a plain local directory path of JPEG captures.
pub fn source_from_spec(spec: &str) -> Result<Box<dyn FrameSource>> {
    match Url::parse(spec) {
        Ok(url) if url.scheme() == "stub" => {
            Ok(Box::new(StubSource::new(url.host_str().unwrap_or("camera"))))
        }
        Ok(url) => Err(anyhow!(
            "unsupported source scheme '{}'; expected stub:// or a directory path",
            url.scheme()
        )),
        // Not a URL: treat as a local directory path.
        Err(_) => Ok(Box::new(DirectorySource::new(spec))),
    }
}
