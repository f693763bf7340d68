use std::{collections::HashMap, fs, path::PathBuf};

use anyhow::Context;
use serde::Deserialize;
use shared::template::BUILTIN_WORD_TEMPLATE;

#[derive(Debug, Deserialize)]
pub struct Settings {
    pub server_bind: String,
    pub template_path: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            server_bind: "127.0.0.1:5000".into(),
            template_path: None,
        }
    }
}

pub fn load_settings() -> Settings {
    let mut settings = Settings::default();

    if let Ok(raw) = fs::read_to_string("server.toml") {
        apply_file_settings(&mut settings, &raw);
    }
    apply_env_settings(&mut settings, |key| std::env::var(key).ok());

    settings
}

fn apply_file_settings(settings: &mut Settings, raw: &str) {
    let Ok(file_cfg) = toml::from_str::<HashMap<String, String>>(raw) else {
        tracing::warn!("ignoring unreadable server.toml");
        return;
    };
    if let Some(v) = file_cfg.get("bind_addr") {
        settings.server_bind = v.clone();
    }
    if let Some(v) = file_cfg.get("template_path") {
        settings.template_path = Some(PathBuf::from(v));
    }
}

fn apply_env_settings(settings: &mut Settings, env: impl Fn(&str) -> Option<String>) {
    if let Some(v) = env("SERVER_BIND") {
        settings.server_bind = v;
    }
    if let Some(v) = env("APP__BIND_ADDR") {
        settings.server_bind = v;
    }
    if let Some(v) = env("APP__TEMPLATE_PATH") {
        settings.template_path = Some(PathBuf::from(v));
    }
}

pub fn load_word_template(settings: &Settings) -> anyhow::Result<String> {
    let Some(path) = &settings.template_path else {
        return Ok(BUILTIN_WORD_TEMPLATE.to_string());
    };
    fs::read_to_string(path)
        .with_context(|| format!("failed to read word template '{}'", path.display()))
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
