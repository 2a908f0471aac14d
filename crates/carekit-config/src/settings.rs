use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read settings file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse settings: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid settings: {0}")]
    Invalid(String),
}

/// Follow-up window per risk stratification level, in days.
///
/// Each default is the clinical window plus a 10% grace margin
/// (30 -> 33, 60 -> 66, 180 -> 198).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskWindows {
    #[serde(default = "default_six_month_window")]
    pub low: u32,
    #[serde(default = "default_six_month_window")]
    pub medium: u32,
    #[serde(default = "default_two_month_window")]
    pub high_risk: u32,
    #[serde(default = "default_next_month_window")]
    pub high_risk_unstable: u32,
    /// Window applied to any level missing from the table.
    #[serde(default = "default_six_month_window")]
    pub fallback: u32,
}

impl Default for RiskWindows {
    fn default() -> Self {
        Self {
            low: default_six_month_window(),
            medium: default_six_month_window(),
            high_risk: default_two_month_window(),
            high_risk_unstable: default_next_month_window(),
            fallback: default_six_month_window(),
        }
    }
}

/// Per-clinic configuration shared by all measures.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClinicSettings {
    /// Clinic timezone as a whole-hour UTC offset.
    #[serde(default = "default_clinic_utc_offset")]
    pub clinic_utc_offset_hours: i8,

    #[serde(default)]
    pub risk_windows: RiskWindows,

    /// Risk level assumed when no usable stratification interview exists.
    #[serde(default = "default_risk")]
    pub default_risk: String,

    /// How far back a stratification interview may be and still count.
    #[serde(default = "default_risk_interview_max_age_days")]
    pub risk_interview_max_age_days: u32,

    /// Questionnaire code of the phone-call disposition interview.
    #[serde(default = "default_phone_call_questionnaire_code")]
    pub phone_call_questionnaire_code: String,

    /// Questionnaire code of the risk stratification interview.
    #[serde(default = "default_risk_questionnaire_code")]
    pub risk_questionnaire_code: String,

    /// Question code whose answer carries the risk level.
    #[serde(default = "default_risk_question_code")]
    pub risk_question_code: String,

    /// A patient-directed call within this many days satisfies the
    /// overdue-followup numerator.
    #[serde(default = "default_contact_lookback_days")]
    pub contact_lookback_days: u32,

    /// Task labels that mark engagement work.
    #[serde(default = "default_engagement_task_labels")]
    pub engagement_task_labels: Vec<String>,
}

impl Default for ClinicSettings {
    fn default() -> Self {
        Self {
            clinic_utc_offset_hours: default_clinic_utc_offset(),
            risk_windows: RiskWindows::default(),
            default_risk: default_risk(),
            risk_interview_max_age_days: default_risk_interview_max_age_days(),
            phone_call_questionnaire_code: default_phone_call_questionnaire_code(),
            risk_questionnaire_code: default_risk_questionnaire_code(),
            risk_question_code: default_risk_question_code(),
            contact_lookback_days: default_contact_lookback_days(),
            engagement_task_labels: default_engagement_task_labels(),
        }
    }
}

impl ClinicSettings {
    /// Load settings from a TOML file; missing keys fall back to defaults.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path.as_ref())?;
        let settings: Self = toml::from_str(&raw)?;
        settings.validate()?;
        tracing::debug!(path = %path.as_ref().display(), "Loaded clinic settings");
        Ok(settings)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(-12..=14).contains(&self.clinic_utc_offset_hours) {
            return Err(ConfigError::Invalid(format!(
                "clinic_utc_offset_hours {} is outside -12..=14",
                self.clinic_utc_offset_hours
            )));
        }
        if self.contact_lookback_days == 0 {
            return Err(ConfigError::Invalid(
                "contact_lookback_days must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

fn default_clinic_utc_offset() -> i8 {
    // America/Phoenix, no DST
    -7
}

fn default_six_month_window() -> u32 {
    198
}

fn default_two_month_window() -> u32 {
    66
}

fn default_next_month_window() -> u32 {
    33
}

fn default_risk() -> String {
    "Low".to_string()
}

fn default_risk_interview_max_age_days() -> u32 {
    3650
}

fn default_phone_call_questionnaire_code() -> String {
    "QUES_PHONE_01".to_string()
}

fn default_risk_questionnaire_code() -> String {
    "DUO_QUES_RISK_STRAT_01".to_string()
}

fn default_risk_question_code() -> String {
    "DUO_QUES_RISK_STRAT_02".to_string()
}

fn default_contact_lookback_days() -> u32 {
    7
}

fn default_engagement_task_labels() -> Vec<String> {
    vec!["Engagement".to_string()]
}
