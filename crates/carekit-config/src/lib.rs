//! Clinic settings for carekit measures.
//!
//! Everything the original deployment hard-coded at module level (clinic
//! timezone, risk windows, task labels, questionnaire codes) is an explicit
//! configuration value handed to each measure at construction time.

mod settings;

pub use settings::{ClinicSettings, ConfigError, RiskWindows};
