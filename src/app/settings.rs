use serde::{Deserialize, Serialize};

#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub(super) struct AppSettings {
    pub areas_path: String,
    pub start_lat: f64,
    pub start_lng: f64,
    pub start_zoom: f64,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            areas_path: "areas.json".to_string(),
            start_lat: -2.9562390384905846,
            start_lng: -59.92733001708985,
            start_zoom: 13.0,
        }
    }
}

pub(super) fn load_settings(path: &str) -> Option<AppSettings> {
    let s = std::fs::read_to_string(path).ok()?;
    if path.ends_with(".toml") {
        toml::from_str::<AppSettings>(&s)
            .ok()
            .or_else(|| serde_json::from_str::<AppSettings>(&s).ok())
    } else {
        serde_json::from_str::<AppSettings>(&s)
            .ok()
            .or_else(|| toml::from_str::<AppSettings>(&s).ok())
    }
}

pub(super) fn save_settings(path: &str, settings: &AppSettings) -> Result<(), String> {
    if path.ends_with(".toml") {
        let toml = toml::to_string_pretty(settings).map_err(|e| e.to_string())?;
        std::fs::write(path, toml).map_err(|e| e.to_string())
    } else {
        let json = serde_json::to_string_pretty(settings).map_err(|e| e.to_string())?;
        std::fs::write(path, json).map_err(|e| e.to_string())
    }
}
