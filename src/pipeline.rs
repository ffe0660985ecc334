//! Capture-predict-render loop.
//!
//! One cycle at a time: capture a frame, encode it, run both prediction
//! tasks, map face crops into the viewport, render. A fixed delay
//! between cycles is the only backpressure against the remote service.
//! Prediction failures become renderer messages and never abort the
//! loop; the next cycle is the implicit retry.
//!
//! The source, predictor and renderer are single-owner: only the loop
//! touches them. The stop flag and model selection are the two shared
//! handles; a selection change takes effect on the next cycle.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::{Duration, Instant};

use crate::capture::FrameSource;
use crate::error::{PipelineError, PredictError};
use crate::geometry::{map_crop, place_in_viewport, EffectiveArea, Rect};
use crate::predict::{Concept, Predictor};
use crate::render::OverlayRenderer;

const DEFAULT_CYCLE_DELAY: Duration = Duration::from_millis(2_000);
const STOP_POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Shared stop signal. Stopping prevents any new cycle from starting;
/// the in-flight cycle settles normally (no request is aborted).
#[derive(Clone, Debug, Default)]
pub struct StopFlag(Arc<AtomicBool>);

impl StopFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stop(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_stopped(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Shared concept-model selection, read once at the start of each
/// cycle. Callers may switch it between cycles; eventual consistency
/// across cycles is all that is promised.
#[derive(Clone, Debug)]
pub struct ModelSelection(Arc<Mutex<String>>);

impl ModelSelection {
    pub fn new(model_name: impl Into<String>) -> Self {
        Self(Arc::new(Mutex::new(model_name.into())))
    }

    pub fn set(&self, model_name: impl Into<String>) {
        if let Ok(mut guard) = self.0.lock() {
            *guard = model_name.into();
        }
    }

    pub fn get(&self) -> String {
        self.0
            .lock()
            .map(|guard| guard.clone())
            .unwrap_or_default()
    }
}

/// Counters reported when the loop exits.
#[derive(Clone, Copy, Debug, Default)]
pub struct RunSummary {
    pub cycles: u64,
    pub predictions_ok: u64,
    pub predictions_failed: u64,
}

pub struct OverlayPipeline<S, P, R> {
    source: S,
    predictor: P,
    renderer: R,
    selection: ModelSelection,
    stop: StopFlag,
    cycle_delay: Duration,
}

impl<S, P, R> OverlayPipeline<S, P, R>
where
    S: FrameSource,
    P: Predictor,
    R: OverlayRenderer,
{
    pub fn new(
        source: S,
        predictor: P,
        renderer: R,
        selection: ModelSelection,
        stop: StopFlag,
    ) -> Self {
        Self {
            source,
            predictor,
            renderer,
            selection,
            stop,
            cycle_delay: DEFAULT_CYCLE_DELAY,
        }
    }

    pub fn with_cycle_delay(mut self, delay: Duration) -> Self {
        self.cycle_delay = delay;
        self
    }

    /// Handle for switching the concept model between cycles.
    pub fn selection(&self) -> ModelSelection {
        self.selection.clone()
    }

    /// Handle for stopping the loop.
    pub fn stop_flag(&self) -> StopFlag {
        self.stop.clone()
    }

    /// Acquire the device and run cycles until stopped.
    ///
    /// A `connect` failure is fatal: the loop never starts and
    /// `DeviceUnavailable` is returned.
    pub fn run(&mut self) -> Result<RunSummary, PipelineError> {
        self.source
            .connect()
            .map_err(|err| PipelineError::DeviceUnavailable(err.to_string()))?;

        let mut summary = RunSummary::default();
        while !self.stop.is_stopped() {
            self.run_cycle(&mut summary);
            summary.cycles += 1;
            self.wait_for_next_cycle();
        }

        log::info!(
            "capture loop stopped after {} cycles ({} frames captured)",
            summary.cycles,
            self.source.frames_captured()
        );
        Ok(summary)
    }

    fn run_cycle(&mut self, summary: &mut RunSummary) {
        let model_name = self.selection.get();

        let frame = match self.source.next_frame() {
            Ok(frame) => frame,
            Err(err) => {
                self.renderer.show_message(&format!("Error: {err}"));
                return;
            }
        };
        let camera_width = f64::from(frame.width);
        let camera_height = f64::from(frame.height);

        let encoded = match frame.encode_jpeg() {
            Ok(bytes) => bytes,
            Err(err) => {
                self.renderer.show_message(&format!("Error: {err}"));
                return;
            }
        };

        // Both predictions are independent; run them concurrently and
        // join both before rendering.
        let predictor = &self.predictor;
        let (concepts_result, faces_result) = thread::scope(|scope| {
            let concepts = scope.spawn(|| predictor.predict_concepts(&encoded, &model_name));
            let faces = scope.spawn(|| predictor.predict_faces(&encoded));
            (join_prediction(concepts), join_prediction(faces))
        });

        let concepts: Vec<Concept> = match concepts_result {
            Ok(concepts) => {
                summary.predictions_ok += 1;
                concepts
            }
            Err(err) => {
                summary.predictions_failed += 1;
                self.renderer.show_message(&format!("Error: {err}"));
                Vec::new()
            }
        };

        let mut faces: Vec<Rect> = Vec::new();
        match faces_result {
            Ok(crops) => {
                summary.predictions_ok += 1;
                let (viewport_width, viewport_height) = self.renderer.viewport();
                match EffectiveArea::compute(
                    camera_width,
                    camera_height,
                    viewport_width,
                    viewport_height,
                ) {
                    Ok(area) => {
                        let margins = area.margins(viewport_width, viewport_height);
                        faces = crops
                            .into_iter()
                            .map(|crop| place_in_viewport(map_crop(crop, area), margins))
                            .collect();
                    }
                    Err(err) => self.renderer.show_message(&format!("Error: {err}")),
                }
            }
            Err(err) => {
                summary.predictions_failed += 1;
                self.renderer.show_message(&format!("Error: {err}"));
            }
        }

        self.renderer.render(&concepts, &faces);
    }

    /// Sleep out the cycle delay, waking early when stopped.
    fn wait_for_next_cycle(&self) {
        let deadline = Instant::now() + self.cycle_delay;
        while !self.stop.is_stopped() {
            let now = Instant::now();
            if now >= deadline {
                break;
            }
            thread::sleep((deadline - now).min(STOP_POLL_INTERVAL));
        }
    }
}

fn join_prediction<T>(
    handle: thread::ScopedJoinHandle<'_, Result<T, PredictError>>,
) -> Result<T, PredictError> {
    match handle.join() {
        Ok(result) => result,
        Err(_) => Err(PredictError::Transport(
            "prediction task panicked".to_string(),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stop_flag_is_visible_across_clones() {
        let flag = StopFlag::new();
        let clone = flag.clone();
        assert!(!clone.is_stopped());
        flag.stop();
        assert!(clone.is_stopped());
    }

    #[test]
    fn selection_change_is_visible_across_clones() {
        let selection = ModelSelection::new("GeneralModel");
        let clone = selection.clone();
        clone.set("FoodModel");
        assert_eq!(selection.get(), "FoodModel");
    }
}
