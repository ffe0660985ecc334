//! overlayd - live prediction overlay daemon
//!
//! This daemon:
//! 1. Loads configuration (JSON file via OVERLAY_CONFIG + env overrides)
//! 2. Builds the prediction client and a frame source
//! 3. Runs the capture-predict-render loop, one cycle at a time
//! 4. Stops cleanly on Ctrl-C: no new cycle starts, the in-flight
//!    cycle settles

use anyhow::{Context, Result};

use predict_overlay::{
    config::OverlaydConfig, source_from_spec, ConsoleRenderer, ModelSelection, OverlayPipeline,
    PredictionClient, StopFlag,
};

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cfg = OverlaydConfig::load().context("load overlayd configuration")?;

    let client = PredictionClient::with_base_url(&cfg.api_key, &cfg.base_url);
    let source = source_from_spec(&cfg.source)?;
    let renderer = ConsoleRenderer::new(cfg.viewport.width, cfg.viewport.height);

    let selection = ModelSelection::new(&cfg.model);
    let stop = StopFlag::new();
    {
        let stop = stop.clone();
        ctrlc::set_handler(move || {
            log::info!("stop requested");
            stop.stop();
        })
        .context("install ctrl-c handler")?;
    }

    let mut pipeline = OverlayPipeline::new(source, client, renderer, selection, stop)
        .with_cycle_delay(cfg.cycle_delay);

    log::info!(
        "overlayd running. source={} model={} viewport={}x{} cycle={}ms",
        cfg.source,
        cfg.model,
        cfg.viewport.width,
        cfg.viewport.height,
        cfg.cycle_delay.as_millis()
    );

    let summary = pipeline.run()?;
    log::info!(
        "overlayd stopped: {} cycles, {} predictions ok, {} failed",
        summary.cycles,
        summary.predictions_ok,
        summary.predictions_failed
    );
    Ok(())
}
