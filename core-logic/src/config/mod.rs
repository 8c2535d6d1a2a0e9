use crate::error::ConfigError;
use serde::{Deserialize, Serialize};

/// Inclusive `[min, max]` range. Deserializes from a two element array,
/// e.g. `delay = [3, 10]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "(T, T)", into = "(T, T)")]
pub struct Bounds<T: Copy> {
    pub min: T,
    pub max: T,
}

impl<T: Copy> From<(T, T)> for Bounds<T> {
    fn from((min, max): (T, T)) -> Self {
        Self { min, max }
    }
}

impl<T: Copy> From<Bounds<T>> for (T, T) {
    fn from(b: Bounds<T>) -> Self {
        (b.min, b.max)
    }
}

impl<T: Copy + PartialOrd> Bounds<T> {
    pub fn new(min: T, max: T) -> Self {
        Self { min, max }
    }

    pub fn fixed(value: T) -> Self {
        Self {
            min: value,
            max: value,
        }
    }

    pub fn contains(&self, value: T) -> bool {
        self.min <= value && value <= self.max
    }

    pub fn is_ordered(&self) -> bool {
        self.min <= self.max
    }

    /// Fails with `InvalidValue` when `min > max`.
    pub fn validate(&self, field: &str) -> Result<(), ConfigError>
    where
        T: std::fmt::Debug,
    {
        if self.is_ordered() {
            Ok(())
        } else {
            Err(ConfigError::InvalidValue {
                field: field.to_string(),
                reason: format!("min {:?} is greater than max {:?}", self.min, self.max),
            })
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProxyConfig {
    pub url: String,
    pub username: Option<String>,
    pub password: Option<String>,
}

/// Logger settings. `level` is a `tracing` directive such as `info` or
/// `pharos_bot=debug`; `RUST_LOG` takes precedence when set.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    pub level: String,
    pub directory: String,
    pub file: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            directory: "logs".to_string(),
            file: true,
        }
    }
}
