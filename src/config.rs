/* ************************************************************************ **
** This file is part of geomx, and is licensed under EITHER the MIT license **
** or the Apache 2.0 license, at your option.                               **
**                                                                          **
**     http://www.apache.org/licenses/LICENSE-2.0                           **
**     http://opensource.org/licenses/MIT                                   **
** ************************************************************************ */

//! YAML configuration for applications embedding the engine.
//!
//! ```yaml
//! tolerances:
//!   strict-lu: true
//!   max-jacobi-sweeps: 200
//! log:
//!   level: info
//!   engine-level: warn
//!   file: geomx.log
//! ```
//!
//! Every key is optional. Unrecognized keys are reported through `warn!`
//! rather than rejected.

#![allow(non_snake_case)]

use crate::FailResult;
use crate::logging::GlobalLogger;
use geomx_linalg::Tolerances;

use std::io::Read;
use std::path::{Path, PathBuf};

/// Reading from YAML, with warnings on unused keys (via `serde_ignored`).
pub trait YamlRead: for<'de> serde::Deserialize<'de> {
    fn from_reader(mut r: impl Read) -> FailResult<Self>
    { YamlRead::from_dyn_reader(&mut r) }

    fn from_path(path: impl AsRef<Path>) -> FailResult<Self>
    {
        let path = path.as_ref();
        let file = std::fs::File::open(path)
            .map_err(|e| format_err!("{}: {}", path.display(), e))?;
        YamlRead::from_reader(file)
    }

    fn from_dyn_reader(r: &mut dyn Read) -> FailResult<Self>
    {
        let mut s = String::new();
        r.read_to_string(&mut s)?;
        Self::from_yaml_str(&s)
    }

    fn from_yaml_str(s: &str) -> FailResult<Self>
    {
        let value: serde_yaml::Value = serde_yaml::from_str(s)?;
        match Self::__serde_ignored__from_value(value) {
            Ok(out) => Ok(out),
            Err(_) => {
                // errors through serde_ignored lose their location;
                // parse again from the string for a useful message
                Self::__serde_yaml__from_str(s)?;
                unreachable!();
            },
        }
    }

    #[doc(hidden)]
    fn __serde_ignored__from_value(value: serde_yaml::Value) -> FailResult<Self>;
    #[doc(hidden)]
    fn __serde_yaml__from_str(s: &str) -> FailResult<Self>;
}

macro_rules! derive_yaml_read {
    ($Type:ty) => {
        impl YamlRead for $Type {
            fn __serde_ignored__from_value(value: serde_yaml::Value) -> FailResult<$Type> {
                serde_ignored::deserialize(
                    value,
                    |path| warn!("Unused config item (possible typo?): {}", path),
                ).map_err(Into::into)
            }

            fn __serde_yaml__from_str(s: &str) -> FailResult<$Type> {
                serde_yaml::from_str(s).map_err(Into::into)
            }
        }
    };
}

/// Root of a configuration file.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct EngineConfig {
    /// Numerical tolerances; see `geomx_linalg::tol` for the defaults.
    pub tolerances: Tolerances,
    pub log: LogConfig,
}
derive_yaml_read!{EngineConfig}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct LogConfig {
    pub level: LogLevel,
    /// Overrides `level` for messages from the matrix engine.
    pub engine_level: Option<LogLevel>,
    /// Also log to this file.
    pub file: Option<PathBuf>,
}

impl Default for LogConfig {
    fn default() -> Self
    {
        LogConfig {
            level: LogLevel::Info,
            engine_level: None,
            file: None,
        }
    }
}

impl LogConfig {
    /// Build (but do not install) the logger this describes.
    pub fn logger(&self) -> GlobalLogger
    {
        let mut logger = GlobalLogger::default();
        logger.level(self.level.into());
        logger.engine_level(self.engine_level.unwrap_or(self.level).into());
        if let Some(file) = &self.file {
            logger.path(file);
        }
        logger
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LogLevel { Off, Error, Warn, Info, Debug, Trace }

impl From<LogLevel> for log::LevelFilter {
    fn from(level: LogLevel) -> Self
    {
        match level {
            LogLevel::Off => log::LevelFilter::Off,
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

#[cfg(test)]
#[deny(unused)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn empty_document_is_default() {
        let config = EngineConfig::from_yaml_str("{}").unwrap();
        assert_eq!(config, EngineConfig::default());
        assert_eq!(config.tolerances, Tolerances::DEFAULT);
    }

    #[test]
    fn partial_tolerances() {
        let config = EngineConfig::from_yaml_str("
tolerances:
  strict-lu: true
  symmetry: 1.0e-4
log:
  level: debug
").unwrap();
        assert_eq!(config.tolerances, Tolerances {
            strict_lu: true,
            symmetry: 1e-4,
            ..Tolerances::DEFAULT
        });
        assert_eq!(config.log.level, LogLevel::Debug);
        assert_eq!(config.log.engine_level, None);
    }

    #[test]
    fn unknown_keys_are_tolerated() {
        let config = EngineConfig::from_yaml_str("
tolerances:
  simmetry: 3
").unwrap();
        assert_eq!(config.tolerances, Tolerances::DEFAULT);
    }

    #[test]
    fn bad_values_are_errors() {
        assert!(EngineConfig::from_yaml_str("log: {level: loud}").is_err());
        assert!(EngineConfig::from_yaml_str("tolerances: {max-jacobi-sweeps: -1}").is_err());
    }

    #[test]
    fn level_conversion() {
        let filter: log::LevelFilter = LogLevel::Warn.into();
        assert_eq!(filter, log::LevelFilter::Warn);
    }
}
