//! Meter configuration loaded from TOML.
//!
//! Every key is optional; anything missing keeps its default. A minimal file
//! might only override the tariff:
//!
//! ```toml
//! tick_interval_ms = 1000
//!
//! [tariff]
//! initial_fare = "3.25"
//! per_km_rate = "0.47"
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use meter_core::ports::WatchOptions;
use meter_core::{ClockSettings, DEFAULT_ZOOM, GeoPoint, SearchSettings, TariffConfig, TipOptionSet};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config file '{path}': {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("tick_interval_ms must be greater than zero")]
    ZeroTickInterval,

    #[error("{key} must not be negative (got {value})")]
    Negative { key: &'static str, value: Decimal },
}

/// Shortest tick period the runtime will schedule, whatever the time scale.
pub const MIN_TICK_PERIOD: Duration = Duration::from_millis(1);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MeterConfig {
    pub tick_interval_ms: u64,
    pub distance_per_tick_km: Decimal,
    pub tariff: TariffConfig,
    pub tip_options: TipOptionSet,
    /// Used when the device cannot report where it is.
    pub fallback_location: GeoPoint,
    /// Simulated device position. Absent means no fix is available.
    pub device_location: Option<GeoPoint>,
    pub watch: WatchOptions,
    pub search: SearchSettings,
    /// Base URL of the geocoding service (builds with `nominatim` only).
    pub search_endpoint: Option<String>,
    pub map_zoom: u8,
    /// Log filter applied once the file is loaded, unless one was given on
    /// the command line or through `RUST_LOG`.
    pub log_level: Option<String>,
}

impl Default for MeterConfig {
    fn default() -> Self {
        Self {
            tick_interval_ms: 1_000,
            distance_per_tick_km: Decimal::new(1, 2),
            tariff: TariffConfig::default(),
            tip_options: TipOptionSet::default(),
            fallback_location: GeoPoint::FALLBACK,
            device_location: None,
            watch: WatchOptions::default(),
            search: SearchSettings::default(),
            search_endpoint: None,
            map_zoom: DEFAULT_ZOOM,
            log_level: None,
        }
    }
}

impl MeterConfig {
    pub fn from_toml_str(input: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(input)?;
        config.validate()?;
        Ok(config)
    }

    /// Rejects values that would make the meter run backwards.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.tick_interval_ms == 0 {
            return Err(ConfigError::ZeroTickInterval);
        }

        let tariff = &self.tariff;
        let amounts = [
            ("distance_per_tick_km", self.distance_per_tick_km),
            ("tariff.initial_fare", tariff.initial_fare),
            ("tariff.per_km_rate", tariff.per_km_rate),
            ("tariff.per_minute_rate", tariff.per_minute_rate),
            ("tariff.night_surcharge", tariff.night_surcharge),
        ];
        match amounts.into_iter().find(|(_, value)| value.is_sign_negative() && !value.is_zero()) {
            Some((key, value)) => Err(ConfigError::Negative { key, value }),
            None => Ok(()),
        }
    }

    /// Reads `path`, or returns the defaults when no path is given.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let Some(path) = path else {
            debug!("no config file given, using defaults");
            return Ok(Self::default());
        };

        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(path = %path.display(), "loaded config file");
        Self::from_toml_str(&contents)
    }

    /// Clock settings with the tick period compressed by `time_scale`
    /// (2.0 runs meter time twice as fast as wall time). The period never
    /// drops below [`MIN_TICK_PERIOD`].
    pub fn clock_settings(
        &self,
        time_scale: f64,
    ) -> ClockSettings {
        let scale = if time_scale.is_finite() && time_scale > 0.0 {
            time_scale
        } else {
            1.0
        };
        ClockSettings {
            tick_period: Duration::from_millis(self.tick_interval_ms)
                .div_f64(scale)
                .max(MIN_TICK_PERIOD),
            distance_per_tick_km: self.distance_per_tick_km,
            watch: self.watch.clone(),
        }
    }
}
