use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

use crate::error::SettingsError;

pub const API_KEY_VAR: &str = "OPENROUTER_API_KEY";
pub const WEBHOOK_URL_VAR: &str = "N8N_WEBHOOK_URL";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub api_key: String,
    pub webhook_url: Option<String>,
}

impl Settings {
    pub fn new(api_key: impl Into<String>, webhook_url: Option<String>) -> Self {
        Self {
            api_key: api_key.into(),
            webhook_url,
        }
    }

    // blank values count as missing
    pub fn from_lookup<F>(lookup: F) -> Result<Self, SettingsError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |name: &'static str| {
            lookup(name)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .ok_or(SettingsError::Missing(name))
        };

        Ok(Self {
            api_key: read(API_KEY_VAR)?,
            webhook_url: Some(read(WEBHOOK_URL_VAR)?),
        })
    }

    // env file values win over the process environment
    pub fn load(env_file: &Path) -> Result<Self, SettingsError> {
        let file_vars = read_env_file(env_file)?;
        Self::from_lookup(|name| {
            file_vars
                .get(name)
                .cloned()
                .or_else(|| std::env::var(name).ok())
        })
    }

    pub fn key_hint(&self) -> String {
        let chars: Vec<char> = self.api_key.chars().collect();
        let start = chars.len().saturating_sub(5);
        chars[start..].iter().collect()
    }
}

fn read_env_file(path: &Path) -> Result<HashMap<String, String>, SettingsError> {
    let iter = match dotenvy::from_path_iter(path) {
        Ok(iter) => iter,
        Err(dotenvy::Error::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!("No env file at {}, using process environment", path.display());
            return Ok(HashMap::new());
        }
        Err(e) => return Err(SettingsError::EnvFile(e)),
    };

    iter.collect::<Result<HashMap<_, _>, _>>()
        .map_err(SettingsError::EnvFile)
}

// Process-wide holder; readers take an Arc snapshot so the key and URL
// always come from the same load.
#[derive(Debug, Clone)]
pub struct SettingsHandle {
    current: Arc<RwLock<Arc<Settings>>>,
    env_file: PathBuf,
}

impl SettingsHandle {
    pub fn new(settings: Settings, env_file: impl Into<PathBuf>) -> Self {
        Self {
            current: Arc::new(RwLock::new(Arc::new(settings))),
            env_file: env_file.into(),
        }
    }

    pub fn snapshot(&self) -> Arc<Settings> {
        let guard = self.current.read().unwrap_or_else(|e| e.into_inner());
        Arc::clone(&guard)
    }

    pub fn replace(&self, settings: Settings) {
        let mut guard = self.current.write().unwrap_or_else(|e| e.into_inner());
        *guard = Arc::new(settings);
    }

    // on error the previous settings stay in place
    pub fn reload(&self) -> Result<Arc<Settings>, SettingsError> {
        let settings = Settings::load(&self.env_file)?;
        self.replace(settings);
        Ok(self.snapshot())
    }

    pub fn env_file(&self) -> &Path {
        &self.env_file
    }
}
