//! predict-overlay
//!
//! Camera-frame-to-prediction pipeline with letterbox-aware overlay
//! mapping. Frames are captured from a source, sent to a remote
//! image-recognition service for concept tagging and face detection,
//! and the normalized face boxes are mapped back into viewport pixel
//! coordinates for overlay rendering.
//!
//! # Module Structure
//!
//! - `geometry`: pure coordinate mapper (effective area, crop → rect,
//!   letterbox margins)
//! - `frame`: captured frame model and JPEG encoding
//! - `predict`: remote prediction client (concepts + faces) and its
//!   wire format
//! - `capture`: frame sources behind the `FrameSource` seam
//! - `render`: overlay renderer seam
//! - `pipeline`: the capture-predict-render loop
//! - `config`: daemon configuration (file + env)
//!
//! The camera device and the preview pane are external collaborators:
//! they appear only as the `FrameSource` and `OverlayRenderer` traits.
//! No recognition happens locally — this crate formats requests,
//! parses responses, and maps coordinates.

pub mod capture;
pub mod config;
pub mod error;
pub mod frame;
pub mod geometry;
pub mod pipeline;
pub mod predict;
pub mod render;

pub use capture::{source_from_spec, DirectorySource, FrameSource, StubSource};
pub use error::{GeometryError, PipelineError, PredictError};
pub use frame::{CameraFrame, PixelFormat};
pub use geometry::{map_crop, place_in_viewport, EffectiveArea, NormalizedCrop, Rect};
pub use pipeline::{ModelSelection, OverlayPipeline, RunSummary, StopFlag};
pub use predict::{Concept, ModelKind, PredictionClient, Predictor};
pub use render::{ConsoleRenderer, OverlayRenderer};
