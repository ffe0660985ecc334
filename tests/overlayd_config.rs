use std::sync::Mutex;

use tempfile::NamedTempFile;

use predict_overlay::config::OverlaydConfig;

static ENV_LOCK: Mutex<()> = Mutex::new(());

fn clear_env() {
    for key in [
        "OVERLAY_CONFIG",
        "CLARIFAI_API_KEY",
        "OVERLAY_BASE_URL",
        "OVERLAY_MODEL",
        "OVERLAY_SOURCE",
        "OVERLAY_CYCLE_MS",
        "OVERLAY_VIEWPORT",
    ] {
        std::env::remove_var(key);
    }
}

#[test]
fn loads_config_from_file_and_env_overrides() {
    let _guard = ENV_LOCK.lock().unwrap();
    clear_env();

    let mut file = NamedTempFile::new().expect("temp config");
    let json = r#"{
        "api_key": "file-key",
        "base_url": "https://gateway.internal",
        "model": "FoodModel",
        "source": "stub://garden",
        "cycle_ms": 500,
        "viewport": {
            "width": 1024,
            "height": 768
        }
    }"#;
    std::io::Write::write_all(&mut file, json.as_bytes()).expect("write config");

    std::env::set_var("OVERLAY_CONFIG", file.path());
    std::env::set_var("OVERLAY_MODEL", "WeddingModel");
    std::env::set_var("OVERLAY_CYCLE_MS", "750");

    let cfg = OverlaydConfig::load().expect("load config");

    assert_eq!(cfg.api_key, "file-key");
    assert_eq!(cfg.base_url, "https://gateway.internal");
    assert_eq!(cfg.model, "WeddingModel");
    assert_eq!(cfg.source, "stub://garden");
    assert_eq!(cfg.cycle_delay.as_millis(), 750);
    assert_eq!(cfg.viewport.width, 1024.0);
    assert_eq!(cfg.viewport.height, 768.0);

    clear_env();
}

#[test]
fn missing_api_key_fails_load() {
    let _guard = ENV_LOCK.lock().unwrap();
    clear_env();

    let err = OverlaydConfig::load().unwrap_err().to_string();
    assert!(err.contains("api key"), "unexpected error: {err}");

    clear_env();
}

#[test]
fn unknown_model_from_env_fails_load() {
    let _guard = ENV_LOCK.lock().unwrap();
    clear_env();

    std::env::set_var("CLARIFAI_API_KEY", "key");
    std::env::set_var("OVERLAY_MODEL", "TreeModel");

    let err = OverlaydConfig::load().unwrap_err().to_string();
    assert!(err.contains("unknown model"), "unexpected error: {err}");

    clear_env();
}

#[test]
fn env_only_config_uses_defaults() {
    let _guard = ENV_LOCK.lock().unwrap();
    clear_env();

    std::env::set_var("CLARIFAI_API_KEY", "env-key");

    let cfg = OverlaydConfig::load().expect("load config");
    assert_eq!(cfg.api_key, "env-key");
    assert_eq!(cfg.base_url, "https://api.clarifai.com");
    assert_eq!(cfg.model, "GeneralModel");
    assert_eq!(cfg.source, "stub://front_camera");
    assert_eq!(cfg.cycle_delay.as_millis(), 2000);

    clear_env();
}
