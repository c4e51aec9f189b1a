use std::{collections::HashMap, env, fs};

use anyhow::Context;

#[derive(Debug)]
pub struct Settings {
    pub server_bind: String,
    pub api_key: Option<String>,
    pub openweather_base_url: String,
    pub upstream_timeout_seconds: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            server_bind: "127.0.0.1:5000".into(),
            api_key: None,
            openweather_base_url: openweather::DEFAULT_BASE_URL.into(),
            upstream_timeout_seconds: openweather::DEFAULT_TIMEOUT.as_secs(),
        }
    }
}

/// Defaults, then `clima.toml` if present, then environment variables.
pub fn load_settings() -> Settings {
    let mut settings = Settings::default();

    if let Ok(raw) = fs::read_to_string("clima.toml") {
        apply_file_overrides(&mut settings, &raw);
    }

    if let Ok(v) = env::var("SERVER_BIND") {
        settings.server_bind = v;
    } else {
        let host = env::var("HOST").ok();
        let port = env::var("PORT").ok();
        if host.is_some() || port.is_some() {
            settings.server_bind = compose_bind(host.as_deref(), port.as_deref());
        }
    }

    if let Ok(v) = env::var("API_KEY") {
        settings.api_key = Some(v);
    }

    if let Ok(v) = env::var("OPENWEATHER_BASE_URL") {
        settings.openweather_base_url = v;
    }

    if let Ok(v) = env::var("UPSTREAM_TIMEOUT_SECONDS") {
        if let Ok(parsed) = v.parse::<u64>() {
            settings.upstream_timeout_seconds = parsed;
        }
    }

    settings
}

fn apply_file_overrides(settings: &mut Settings, raw: &str) {
    let Ok(file_cfg) = toml::from_str::<HashMap<String, String>>(raw) else {
        return;
    };
    if let Some(v) = file_cfg.get("bind_addr") {
        settings.server_bind = v.clone();
    }
    if let Some(v) = file_cfg.get("api_key") {
        settings.api_key = Some(v.clone());
    }
    if let Some(v) = file_cfg.get("openweather_base_url") {
        settings.openweather_base_url = v.clone();
    }
    if let Some(v) = file_cfg.get("upstream_timeout_seconds") {
        if let Ok(parsed) = v.parse::<u64>() {
            settings.upstream_timeout_seconds = parsed;
        }
    }
}

fn compose_bind(host: Option<&str>, port: Option<&str>) -> String {
    let host = host.filter(|h| !h.trim().is_empty()).unwrap_or("127.0.0.1");
    let port = port.filter(|p| !p.trim().is_empty()).unwrap_or("5000");
    format!("{host}:{port}")
}

/// The upstream credential is mandatory; starting without it only produces
/// auth failures on every lookup.
pub fn require_api_key(settings: &Settings) -> anyhow::Result<String> {
    settings
        .api_key
        .clone()
        .context("La variable de entorno API_KEY no está definida")
}
