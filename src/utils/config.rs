use crate::core::{
    DEFAULT_ALIGNMENT_TOLERANCE_DEG, DEFAULT_MOTION_INTERVAL_MS, DEFAULT_SURFACE_SIZE_PX, DEFAULT_TILT_GAIN,
};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

/// Application tunables
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Half-width of the alignment cone (degrees)
    pub alignment_tolerance_deg: f64,
    /// Highlight shift per degree of tilt (surface units)
    pub tilt_gain: f64,
    /// Rendering surface width (pixels)
    pub surface_width: f64,
    /// Rendering surface height (pixels)
    pub surface_height: f64,
    /// Slots in the sensor update channel
    pub channel_capacity: usize,
    /// Motion sampling interval (milliseconds)
    pub motion_interval_ms: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            alignment_tolerance_deg: DEFAULT_ALIGNMENT_TOLERANCE_DEG,
            tilt_gain: DEFAULT_TILT_GAIN,
            surface_width: DEFAULT_SURFACE_SIZE_PX,
            surface_height: DEFAULT_SURFACE_SIZE_PX,
            channel_capacity: 64,
            motion_interval_ms: DEFAULT_MOTION_INTERVAL_MS,
        }
    }
}

impl AppConfig {
    pub fn motion_interval(&self) -> Duration {
        Duration::from_millis(self.motion_interval_ms)
    }

    /// Check every parameter; returns the first violation
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.alignment_tolerance_deg > 0.0 && self.alignment_tolerance_deg <= 180.0) {
            return Err(ConfigError::invalid(
                "alignment_tolerance_deg",
                self.alignment_tolerance_deg,
                "Tolerance must be in (0, 180] degrees",
            ));
        }

        if !(self.tilt_gain >= 0.0 && self.tilt_gain <= 0.05) {
            return Err(ConfigError::invalid(
                "tilt_gain",
                self.tilt_gain,
                "Tilt gain must be in [0, 0.05]",
            ));
        }

        if !(self.surface_width > 0.0
            && self.surface_height > 0.0
            && self.surface_width.is_finite()
            && self.surface_height.is_finite())
        {
            return Err(ConfigError::invalid(
                "surface",
                format!("{}x{}", self.surface_width, self.surface_height),
                "Surface dimensions must be positive and finite",
            ));
        }

        if self.channel_capacity == 0 || self.channel_capacity > 65_536 {
            return Err(ConfigError::invalid(
                "channel_capacity",
                self.channel_capacity,
                "Channel capacity must be between 1 and 65536",
            ));
        }

        if self.motion_interval_ms < 10 || self.motion_interval_ms > 10_000 {
            return Err(ConfigError::invalid(
                "motion_interval_ms",
                self.motion_interval_ms,
                "Motion interval must be between 10 and 10000 ms",
            ));
        }

        Ok(())
    }
}

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid parameter '{parameter}' = '{value}': {reason}")]
    InvalidParameter {
        parameter: String,
        value: String,
        reason: String,
    },
    #[error("Config file I/O error for '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Config serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("No file path set for saving configuration")]
    NoPath,
}

impl ConfigError {
    fn invalid(parameter: &str, value: impl ToString, reason: &str) -> Self {
        ConfigError::InvalidParameter {
            parameter: parameter.to_string(),
            value: value.to_string(),
            reason: reason.to_string(),
        }
    }
}

/// Holds the active configuration and its backing file
#[derive(Debug, Clone, Default)]
pub struct ConfigurationManager {
    config: AppConfig,
    config_file_path: Option<PathBuf>,
    is_modified: bool,
}

impl ConfigurationManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create configuration manager and load from file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let mut manager = Self::new();
        manager.load_from_file(path)?;
        Ok(manager)
    }

    pub fn get_config(&self) -> &AppConfig {
        &self.config
    }

    /// Replace the configuration after validating it
    pub fn update_config(&mut self, config: AppConfig) -> Result<(), ConfigError> {
        config.validate()?;
        self.config = config;
        self.is_modified = true;
        Ok(())
    }

    /// Load configuration from a JSON file; missing fields take defaults
    pub fn load_from_file<P: AsRef<Path>>(&mut self, path: P) -> Result<(), ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let config: AppConfig = serde_json::from_str(&content)?;
        config.validate()?;

        log::debug!("Loaded configuration from {}", path.display());
        self.config = config;
        self.config_file_path = Some(path.to_path_buf());
        self.is_modified = false;
        Ok(())
    }

    /// Save configuration to a JSON file
    pub fn save_to_file<P: AsRef<Path>>(&mut self, path: P) -> Result<(), ConfigError> {
        let path = path.as_ref();
        let content = serde_json::to_string_pretty(&self.config)?;

        fs::write(path, content).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        self.config_file_path = Some(path.to_path_buf());
        self.is_modified = false;
        Ok(())
    }

    /// Save to the currently loaded file path
    pub fn save(&mut self) -> Result<(), ConfigError> {
        match self.config_file_path.clone() {
            Some(path) => self.save_to_file(path),
            None => Err(ConfigError::NoPath),
        }
    }

    /// Check if configuration has been modified since last save
    pub fn is_modified(&self) -> bool {
        self.is_modified
    }

    /// Update the alignment tolerance; returns the previous value
    pub fn set_alignment_tolerance(&mut self, tolerance_deg: f64) -> Result<f64, ConfigError> {
        let updated = AppConfig {
            alignment_tolerance_deg: tolerance_deg,
            ..self.config.clone()
        };
        let old_value = self.config.alignment_tolerance_deg;
        self.update_config(updated)?;
        Ok(old_value)
    }

    /// Update the tilt gain; returns the previous value
    pub fn set_tilt_gain(&mut self, gain: f64) -> Result<f64, ConfigError> {
        let updated = AppConfig {
            tilt_gain: gain,
            ..self.config.clone()
        };
        let old_value = self.config.tilt_gain;
        self.update_config(updated)?;
        Ok(old_value)
    }
}

/// Builder for [`AppConfig`]
#[derive(Debug, Clone, Default)]
pub struct AppConfigBuilder {
    config: AppConfig,
}

impl AppConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_alignment_tolerance(mut self, tolerance_deg: f64) -> Self {
        self.config.alignment_tolerance_deg = tolerance_deg;
        self
    }

    pub fn with_tilt_gain(mut self, gain: f64) -> Self {
        self.config.tilt_gain = gain;
        self
    }

    pub fn with_surface(mut self, width: f64, height: f64) -> Self {
        self.config.surface_width = width;
        self.config.surface_height = height;
        self
    }

    pub fn with_channel_capacity(mut self, capacity: usize) -> Self {
        self.config.channel_capacity = capacity;
        self
    }

    pub fn with_motion_interval(mut self, interval_ms: u64) -> Self {
        self.config.motion_interval_ms = interval_ms;
        self
    }

    pub fn build(self) -> Result<AppConfig, ConfigError> {
        self.config.validate()?;
        Ok(self.config)
    }
}
