use std::{
    env,
    path::{Path, PathBuf},
};

use log::LevelFilter;
use mts_gamma_derive::{Keyword, KvDisplay, With};

use crate::{Error, Result};

const ENV_LOG_TIMESTAMP: &str = "MTS_GAMMA_LOG_TIMESTAMP";
const ENV_LOG_OUTPUT: &str = "MTS_GAMMA_LOG_OUTPUT";

/// Logger settings consumed by [`crate::logging::init_logger`].
#[derive(Clone, Debug, PartialEq, With, KvDisplay)]
pub struct LogOptions {
    pub level: LogLevel,
    pub format: LogFormat,
    /// Prefix each line with a millisecond timestamp.
    pub timestamp: bool,
    /// Write log lines to this file instead of stderr.
    #[kv(fmt = "opt_path")]
    pub output: Option<PathBuf>,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Keyword)]
#[keyword(env = "MTS_GAMMA_LOG_LEVEL")]
pub enum LogLevel {
    Error,
    #[keyword(alias = "warning")]
    Warn,
    Info,
    Debug,
    Trace,
    Off,
}

impl LogLevel {
    pub fn to_filter(self) -> LevelFilter {
        match self {
            Self::Error => LevelFilter::Error,
            Self::Warn => LevelFilter::Warn,
            Self::Info => LevelFilter::Info,
            Self::Debug => LevelFilter::Debug,
            Self::Trace => LevelFilter::Trace,
            Self::Off => LevelFilter::Off,
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Keyword)]
#[keyword(env = "MTS_GAMMA_LOG_FORMAT")]
pub enum LogFormat {
    Compact,
    Pretty,
}

impl Default for LogOptions {
    fn default() -> Self {
        Self {
            level: LogLevel::Warn,
            format: LogFormat::Compact,
            timestamp: true,
            output: None,
        }
    }
}

impl LogOptions {
    /// Reads `MTS_GAMMA_LOG_LEVEL`, `MTS_GAMMA_LOG_FORMAT`,
    /// `MTS_GAMMA_LOG_TIMESTAMP` and `MTS_GAMMA_LOG_OUTPUT`, keeping the
    /// default for any variable that is unset.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut options = Self::default();
        if let Some(raw) = lookup(LogLevel::ENV) {
            options.level = raw.parse()?;
        }
        if let Some(raw) = lookup(LogFormat::ENV) {
            options.format = raw.parse()?;
        }
        if let Some(raw) = lookup(ENV_LOG_TIMESTAMP) {
            options.timestamp = parse_bool(ENV_LOG_TIMESTAMP, &raw)?;
        }
        if let Some(raw) = lookup(ENV_LOG_OUTPUT) {
            let raw = raw.trim();
            options.output = if raw.is_empty() || raw == "-" {
                None
            } else {
                Some(PathBuf::from(raw))
            };
        }
        Ok(options)
    }

    pub fn output_path(&self) -> Option<&Path> {
        self.output.as_deref()
    }
}

fn parse_bool(name: &str, value: &str) -> Result<bool> {
    match value.trim() {
        "1" | "true" | "TRUE" | "True" | "yes" | "YES" | "on" | "ON" => Ok(true),
        "0" | "false" | "FALSE" | "False" | "no" | "NO" | "off" | "OFF" => Ok(false),
        _ => Err(Error::invalid_config(format!(
            "invalid boolean for {name}: {value} (expected true/false)"
        ))),
    }
}
