//! Rendering seam.
//!
//! The preview pane is an external collaborator: it knows its own
//! displayed size and draws whatever the pipeline hands it. The
//! pipeline pushes one complete overlay state per cycle; face
//! rectangles arrive already placed in viewport coordinates.

use crate::geometry::Rect;
use crate::predict::Concept;

pub trait OverlayRenderer {
    /// Displayed size of the preview pane, in pixels.
    fn viewport(&self) -> (f64, f64);

    /// Draw one cycle's overlay. Concepts keep service order; faces are
    /// in viewport coordinates.
    fn render(&mut self, concepts: &[Concept], faces: &[Rect]);

    /// Surface a user-visible status line (prediction errors land
    /// here).
    fn show_message(&mut self, message: &str);
}

/// Renderer for headless runs: writes the overlay state to the log.
pub struct ConsoleRenderer {
    viewport: (f64, f64),
}

impl ConsoleRenderer {
    pub fn new(viewport_width: f64, viewport_height: f64) -> Self {
        Self {
            viewport: (viewport_width, viewport_height),
        }
    }
}

impl OverlayRenderer for ConsoleRenderer {
    fn viewport(&self) -> (f64, f64) {
        self.viewport
    }

    fn render(&mut self, concepts: &[Concept], faces: &[Rect]) {
        if concepts.is_empty() {
            log::info!("concepts: none");
        } else {
            let labels: Vec<String> = concepts
                .iter()
                .map(|concept| format!("{} ({:.2}%)", concept.name, concept.value * 100.0))
                .collect();
            log::info!("concepts: {}", labels.join(", "));
        }
        for face in faces {
            log::info!(
                "face: left={:.0} top={:.0} size={:.0}x{:.0}",
                face.left,
                face.top,
                face.width,
                face.height
            );
        }
    }

    fn show_message(&mut self, message: &str) {
        log::warn!("{message}");
    }
}
