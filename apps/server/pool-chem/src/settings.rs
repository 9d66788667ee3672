//! Process-level settings: listen address, static files, logging.
//!
//! Upstream settings live in [`report_core::config`]; this module only covers
//! what the HTTP server itself needs, plus `.env` discovery.

use crate::error::ServerError;

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::{Path, PathBuf};
use std::str::FromStr;

use log::LevelFilter;

pub const HOST_ENV: &str = "HOST";
pub const PORT_ENV: &str = "PORT";
pub const STATIC_DIR_ENV: &str = "STATIC_DIR";
pub const LOG_DIR_ENV: &str = "LOG_DIR";
pub const LOG_LEVEL_ENV: &str = "LOG_LEVEL";

pub const ENV_FILE_NAME: &str = ".env";

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_STATIC_DIR: &str = "public";
pub const DEFAULT_LOG_DIR: &str = "logs";

/// Default log level for debug builds.
#[cfg(debug_assertions)]
pub const DEFAULT_LOG_LEVEL: LevelFilter = LevelFilter::Debug;

/// Default log level for release builds.
#[cfg(not(debug_assertions))]
pub const DEFAULT_LOG_LEVEL: LevelFilter = LevelFilter::Info;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerSettings {
    pub host: IpAddr,
    pub port: u16,
    pub static_dir: PathBuf,
    pub log_dir: PathBuf,
    pub log_level: LevelFilter,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: DEFAULT_PORT,
            static_dir: PathBuf::from(DEFAULT_STATIC_DIR),
            log_dir: PathBuf::from(DEFAULT_LOG_DIR),
            log_level: DEFAULT_LOG_LEVEL,
        }
    }
}

impl ServerSettings {
    /// Build settings from named values; unset or blank values keep their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ServerError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let value = |name: &str| {
            lookup(name)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let mut settings = Self::default();

        if let Some(host) = value(HOST_ENV) {
            settings.host = parse_setting(HOST_ENV, &host)?;
        }
        if let Some(port) = value(PORT_ENV) {
            settings.port = parse_setting(PORT_ENV, &port)?;
        }
        if let Some(static_dir) = value(STATIC_DIR_ENV) {
            settings.static_dir = PathBuf::from(static_dir);
        }
        if let Some(log_dir) = value(LOG_DIR_ENV) {
            settings.log_dir = PathBuf::from(log_dir);
        }
        if let Some(level) = value(LOG_LEVEL_ENV) {
            settings.log_level = parse_setting(LOG_LEVEL_ENV, &level)?;
        }

        Ok(settings)
    }

    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

#[track_caller]
fn parse_setting<T>(name: &str, raw: &str) -> Result<T, ServerError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    raw.parse::<T>()
        .map_err(|e| ServerError::settings(format!("{name}='{raw}': {e}")))
}

/// Reads the real process environment.
pub fn env_lookup(name: &str) -> Option<String> {
    std::env::var(name).ok()
}

/// Result of attempting to load a .env file.
#[derive(Debug)]
pub struct EnvLoadResult {
    /// Path to the loaded .env file, if found.
    pub path: Option<PathBuf>,
    /// Parse failure for a .env that exists but could not be read.
    pub error: Option<String>,
}

/// Load `.env` from the working directory, else from beside the executable.
///
/// Missing files are not an error. Runs before the logger exists, so the
/// outcome is returned for the caller to log.
pub fn load_dotenv() -> EnvLoadResult {
    let candidates = [
        std::env::current_dir().ok(),
        std::env::current_exe()
            .ok()
            .and_then(|exe| exe.parent().map(Path::to_path_buf)),
    ];
    load_dotenv_from(candidates.iter().flatten().map(PathBuf::as_path))
}

/// Load the first `.env` found in `dirs`.
///
/// A file that exists but does not parse stops the search and is reported,
/// rather than being skipped in favour of a later directory.
pub fn load_dotenv_from<'a>(dirs: impl IntoIterator<Item = &'a Path>) -> EnvLoadResult {
    for dir in dirs {
        let env_path = dir.join(ENV_FILE_NAME);
        match dotenvy::from_path(&env_path) {
            Ok(()) => {
                return EnvLoadResult {
                    path: Some(env_path),
                    error: None,
                };
            }
            Err(e) if e.not_found() => continue,
            Err(e) => {
                return EnvLoadResult {
                    path: None,
                    error: Some(format!("{}: {e}", env_path.display())),
                };
            }
        }
    }

    EnvLoadResult {
        path: None,
        error: None,
    }
}
