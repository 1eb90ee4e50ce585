// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::period::WeekStart;

static APP: Lazy<(&str, &str, &str)> =
    Lazy::new(|| ("com.alphavelocity", "Famledger", "famledger"));

pub const ENV_BACKEND: &str = "FAMLEDGER_BACKEND";
pub const ENV_REMOTE_URL: &str = "FAMLEDGER_REMOTE_URL";
pub const ENV_WEEK_START: &str = "FAMLEDGER_WEEK_START";
pub const ENV_CURRENCY_SUFFIX: &str = "FAMLEDGER_CURRENCY_SUFFIX";

pub fn project_dirs() -> Result<ProjectDirs> {
    ProjectDirs::from(APP.0, APP.1, APP.2)
        .context("Could not determine platform-specific data dir")
}

pub fn config_path() -> Result<PathBuf> {
    let proj = project_dirs()?;
    Ok(proj.config_dir().join("config.json"))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    #[default]
    Local,
    Remote,
}

impl std::str::FromStr for Backend {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "local" => Ok(Backend::Local),
            "remote" => Ok(Backend::Remote),
            other => Err(anyhow!("Invalid backend '{}', expected local|remote", other)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub backend: Backend,
    pub remote_url: Option<String>,
    pub week_start: WeekStart,
    pub currency_suffix: String,
    pub timeout_secs: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            backend: Backend::Local,
            remote_url: None,
            week_start: WeekStart::Sunday,
            currency_suffix: "원".to_string(),
            timeout_secs: 15,
        }
    }
}

impl Settings {
    /// Config file (if any) plus environment overrides.
    pub fn load() -> Result<Settings> {
        let mut s = Settings::from_file(&config_path()?)?;
        s.apply_overrides(|k| std::env::var(k).ok())?;
        Ok(s)
    }

    pub fn from_file(path: &Path) -> Result<Settings> {
        if !path.exists() {
            return Ok(Settings::default());
        }
        let raw = fs::read_to_string(path)
            .with_context(|| format!("Read config {}", path.display()))?;
        serde_json::from_str(&raw).with_context(|| format!("Invalid config {}", path.display()))
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir).context("Failed to create config dir")?;
        }
        fs::write(path, serde_json::to_string_pretty(self)?)
            .with_context(|| format!("Write config {}", path.display()))?;
        Ok(())
    }

    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        for key in [ENV_BACKEND, ENV_REMOTE_URL, ENV_WEEK_START, ENV_CURRENCY_SUFFIX] {
            if let Some(v) = lookup(key) {
                self.set_from_env(key, &v)
                    .with_context(|| format!("Invalid value in {}", key))?;
            }
        }
        Ok(())
    }

    fn set_from_env(&mut self, env_key: &str, value: &str) -> Result<()> {
        let key = match env_key {
            ENV_BACKEND => "backend",
            ENV_REMOTE_URL => "remote_url",
            ENV_WEEK_START => "week_start",
            _ => "currency_suffix",
        };
        self.set(key, value)
    }

    /// Sets one key by its config-file name.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key.trim().replace('-', "_").as_str() {
            "backend" => self.backend = value.parse()?,
            "remote_url" => {
                let v = value.trim();
                self.remote_url = (!v.is_empty()).then(|| v.to_string());
            }
            "week_start" => self.week_start = value.parse()?,
            "currency_suffix" => self.currency_suffix = value.to_string(),
            "timeout_secs" => {
                self.timeout_secs = value
                    .trim()
                    .parse()
                    .with_context(|| format!("Invalid timeout '{}'", value))?
            }
            other => return Err(anyhow!("Unknown config key '{}'", other)),
        }
        Ok(())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn rows(&self) -> Vec<Vec<String>> {
        vec![
            vec!["backend".into(), format!("{:?}", self.backend).to_lowercase()],
            vec![
                "remote_url".into(),
                self.remote_url.clone().unwrap_or_default(),
            ],
            vec!["week_start".into(), self.week_start.to_string()],
            vec!["currency_suffix".into(), self.currency_suffix.clone()],
            vec!["timeout_secs".into(), self.timeout_secs.to_string()],
        ]
    }
}
