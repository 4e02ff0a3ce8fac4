use std::{env, fs, io};

use serde::Deserialize;
use thiserror::Error;

use crate::user_add_request::UserAddRequest;

pub const SETTINGS_FILENAME: &str = "settings.json";

#[derive(Debug, Deserialize)]
pub struct Settings {
    pub tcp_socket_binding: String,
    pub tcp_socket_port: u16,
    /// Connection string of the store: the redb file path.
    pub database_path: String,
    /// Users created on first boot, when the store is empty.
    #[serde(default)]
    pub seed_users: Vec<UserAddRequest>,
}

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("cannot read settings file {path}: {source}")]
    Read { path: String, source: io::Error },
    #[error("cannot parse settings file {path}: {source}")]
    Parse {
        path: String,
        source: serde_json::Error,
    },
    #[error("PORT must be a TCP port number, got {0:?}")]
    InvalidPort(String),
}

impl Settings {
    /// Reads `settings.json` from the working directory, then applies
    /// `PORT` and `DATABASE_PATH` from the environment.
    pub fn load() -> Result<Settings, SettingsError> {
        Self::load_from(SETTINGS_FILENAME)?.with_overrides(|key| env::var(key).ok())
    }

    pub fn load_from(path: &str) -> Result<Settings, SettingsError> {
        let content = fs::read_to_string(path).map_err(|source| SettingsError::Read {
            path: path.to_string(),
            source,
        })?;
        serde_json::from_str(&content).map_err(|source| SettingsError::Parse {
            path: path.to_string(),
            source,
        })
    }

    pub fn with_overrides(
        mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Settings, SettingsError> {
        if let Some(port) = lookup("PORT") {
            self.tcp_socket_port = port
                .trim()
                .parse()
                .map_err(|_| SettingsError::InvalidPort(port))?;
        }
        if let Some(path) = lookup("DATABASE_PATH") {
            self.database_path = path;
        }
        Ok(self)
    }

    pub fn socket_address(&self) -> String {
        format!("{}:{}", self.tcp_socket_binding, self.tcp_socket_port)
    }
}
