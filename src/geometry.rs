//! Letterbox-aware coordinate mapping.
//!
//! The prediction service returns face boxes in a normalized 0..1 space
//! relative to the full camera frame. The preview pane usually has a
//! different aspect ratio than the camera, so the displayed frame is
//! letterboxed or pillarboxed inside it. This module computes the
//! effective displayed camera area and maps normalized crops into pixel
//! rectangles relative to that area.
//!
//! Everything here is pure and deterministic; safe to call from any
//! thread.

use crate::error::GeometryError;

/// Pixel-space rectangle for overlay rendering.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rect {
    pub top: f64,
    pub left: f64,
    pub width: f64,
    pub height: f64,
}

/// Normalized face bounding box, each edge in 0..1 relative to the full
/// frame.
///
/// Values outside 0..1 are a service-contract violation and are not
/// validated here.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NormalizedCrop {
    pub top: f64,
    pub left: f64,
    pub bottom: f64,
    pub right: f64,
}

/// The camera area actually visible inside the viewport once the frame
/// is scaled with its aspect ratio preserved.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EffectiveArea {
    pub width: f64,
    pub height: f64,
}

impl EffectiveArea {
    /// Compute the displayed camera area inside a viewport.
    ///
    /// A camera relatively narrower than the viewport is pillarboxed
    /// (full height, reduced width); a relatively wider camera is
    /// letterboxed (full width, reduced height).
    pub fn compute(
        camera_width: f64,
        camera_height: f64,
        viewport_width: f64,
        viewport_height: f64,
    ) -> Result<Self, GeometryError> {
        for dim in [camera_width, camera_height, viewport_width, viewport_height] {
            if !dim.is_finite() || dim <= 0.0 {
                return Err(GeometryError::DegenerateDimensions);
            }
        }

        let camera_ratio = camera_width / camera_height;
        let viewport_ratio = viewport_width / viewport_height;

        let area = if camera_ratio <= viewport_ratio {
            EffectiveArea {
                width: viewport_height * camera_ratio,
                height: viewport_height,
            }
        } else {
            EffectiveArea {
                width: viewport_width,
                height: viewport_width / camera_ratio,
            }
        };
        Ok(area)
    }

    /// Letterbox margins between this area and the viewport, split
    /// evenly per axis: `(viewport - effective) / 2`.
    pub fn margins(&self, viewport_width: f64, viewport_height: f64) -> (f64, f64) {
        (
            (viewport_width - self.width) / 2.0,
            (viewport_height - self.height) / 2.0,
        )
    }
}

/// Map a normalized crop into a pixel rectangle relative to the
/// effective displayed area.
pub fn map_crop(crop: NormalizedCrop, area: EffectiveArea) -> Rect {
    let top = crop.top * area.height;
    let left = crop.left * area.width;
    let bottom = crop.bottom * area.height;
    let right = crop.right * area.width;

    Rect {
        top,
        left,
        width: right - left,
        height: bottom - top,
    }
}

/// Shift a mapped rectangle by the letterbox margins so it lands in
/// viewport coordinates.
pub fn place_in_viewport(rect: Rect, margins: (f64, f64)) -> Rect {
    Rect {
        top: rect.top + margins.1,
        left: rect.left + margins.0,
        ..rect
    }
}
