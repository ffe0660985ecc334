use anyhow::{anyhow, Result};
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

use crate::predict::ModelKind;

const DEFAULT_BASE_URL: &str = "https://api.clarifai.com";
const DEFAULT_MODEL: &str = "GeneralModel";
const DEFAULT_SOURCE: &str = "stub://front_camera";
const DEFAULT_CYCLE_MS: u64 = 2_000;
const DEFAULT_VIEWPORT_WIDTH: f64 = 800.0;
const DEFAULT_VIEWPORT_HEIGHT: f64 = 800.0;

#[derive(Debug, Deserialize, Default)]
struct OverlaydConfigFile {
    api_key: Option<String>,
    base_url: Option<String>,
    model: Option<String>,
    source: Option<String>,
    cycle_ms: Option<u64>,
    viewport: Option<ViewportConfigFile>,
}

#[derive(Debug, Deserialize, Default)]
struct ViewportConfigFile {
    width: Option<f64>,
    height: Option<f64>,
}

#[derive(Debug, Clone)]
pub struct OverlaydConfig {
    pub api_key: String,
    pub base_url: String,
    pub model: String,
    pub source: String,
    pub cycle_delay: Duration,
    pub viewport: ViewportSettings,
}

#[derive(Debug, Clone, Copy)]
pub struct ViewportSettings {
    pub width: f64,
    pub height: f64,
}

impl OverlaydConfig {
    pub fn load() -> Result<Self> {
        let config_path = std::env::var("OVERLAY_CONFIG").ok();
        let file_cfg = match config_path.as_deref() {
            Some(path) => Some(read_config_file(Path::new(path))?),
            None => None,
        };
        let mut cfg = Self::from_file(file_cfg.unwrap_or_default());
        cfg.apply_env()?;
        cfg.validate()?;
        Ok(cfg)
    }

    fn from_file(file: OverlaydConfigFile) -> Self {
        let viewport = ViewportSettings {
            width: file
                .viewport
                .as_ref()
                .and_then(|viewport| viewport.width)
                .unwrap_or(DEFAULT_VIEWPORT_WIDTH),
            height: file
                .viewport
                .as_ref()
                .and_then(|viewport| viewport.height)
                .unwrap_or(DEFAULT_VIEWPORT_HEIGHT),
        };
        Self {
            api_key: file.api_key.unwrap_or_default(),
            base_url: file.base_url.unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            model: file.model.unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            source: file.source.unwrap_or_else(|| DEFAULT_SOURCE.to_string()),
            cycle_delay: Duration::from_millis(file.cycle_ms.unwrap_or(DEFAULT_CYCLE_MS)),
            viewport,
        }
    }

    fn apply_env(&mut self) -> Result<()> {
        if let Ok(key) = std::env::var("CLARIFAI_API_KEY") {
            if !key.trim().is_empty() {
                self.api_key = key;
            }
        }
        if let Ok(base_url) = std::env::var("OVERLAY_BASE_URL") {
            if !base_url.trim().is_empty() {
                self.base_url = base_url;
            }
        }
        if let Ok(model) = std::env::var("OVERLAY_MODEL") {
            if !model.trim().is_empty() {
                self.model = model;
            }
        }
        if let Ok(source) = std::env::var("OVERLAY_SOURCE") {
            if !source.trim().is_empty() {
                self.source = source;
            }
        }
        if let Ok(cycle_ms) = std::env::var("OVERLAY_CYCLE_MS") {
            let millis: u64 = cycle_ms
                .parse()
                .map_err(|_| anyhow!("OVERLAY_CYCLE_MS must be an integer number of milliseconds"))?;
            self.cycle_delay = Duration::from_millis(millis);
        }
        if let Ok(viewport) = std::env::var("OVERLAY_VIEWPORT") {
            let (width, height) = parse_viewport(&viewport)?;
            self.viewport = ViewportSettings { width, height };
        }
        Ok(())
    }

    fn validate(&self) -> Result<()> {
        if self.api_key.trim().is_empty() {
            return Err(anyhow!(
                "api key must be set (config file api_key or CLARIFAI_API_KEY)"
            ));
        }
        if ModelKind::from_name(&self.model).is_none() {
            return Err(anyhow!(
                "unknown model '{}'; known models: {}",
                self.model,
                known_model_names()
            ));
        }
        if self.cycle_delay.as_millis() == 0 {
            return Err(anyhow!("cycle delay must be greater than zero"));
        }
        for dim in [self.viewport.width, self.viewport.height] {
            if !dim.is_finite() || dim <= 0.0 {
                return Err(anyhow!("viewport dimensions must be positive"));
            }
        }
        Ok(())
    }
}

fn known_model_names() -> String {
    ModelKind::ALL
        .iter()
        .map(|model| model.name())
        .collect::<Vec<_>>()
        .join(", ")
}

fn read_config_file(path: &Path) -> Result<OverlaydConfigFile> {
    let raw = std::fs::read_to_string(path)
        .map_err(|e| anyhow!("failed to read config file {}: {}", path.display(), e))?;
    let cfg = serde_json::from_str(&raw)
        .map_err(|e| anyhow!("invalid config file {}: {}", path.display(), e))?;
    Ok(cfg)
}

/// Parse a `WIDTHxHEIGHT` viewport spec, e.g. `800x800`.
fn parse_viewport(value: &str) -> Result<(f64, f64)> {
    let (width, height) = value
        .split_once('x')
        .ok_or_else(|| anyhow!("OVERLAY_VIEWPORT must look like 800x800"))?;
    let width: f64 = width
        .trim()
        .parse()
        .map_err(|_| anyhow!("invalid viewport width '{}'", width))?;
    let height: f64 = height
        .trim()
        .parse()
        .map_err(|_| anyhow!("invalid viewport height '{}'", height))?;
    Ok((width, height))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn viewport_spec_parses() {
        assert_eq!(parse_viewport("800x450").unwrap(), (800.0, 450.0));
        assert_eq!(parse_viewport("1024 x 768").unwrap(), (1024.0, 768.0));
        assert!(parse_viewport("800").is_err());
        assert!(parse_viewport("axb").is_err());
    }

    #[test]
    fn defaults_fail_validation_without_api_key() {
        let cfg = OverlaydConfig::from_file(OverlaydConfigFile::default());
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn unknown_model_is_rejected_at_load() {
        let mut cfg = OverlaydConfig::from_file(OverlaydConfigFile::default());
        cfg.api_key = "key".to_string();
        cfg.model = "TreeModel".to_string();
        let err = cfg.validate().unwrap_err().to_string();
        assert!(err.contains("TreeModel"));
        assert!(err.contains("GeneralModel"));
    }
}
