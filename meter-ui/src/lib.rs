pub mod adapters;
pub mod app;
pub mod config;
pub mod csv_loader;
pub mod logging;
pub mod runtime;
pub mod state;
pub mod utils;
pub mod views;

pub use app::MeterApp;
pub use config::{ConfigError, MeterConfig};
