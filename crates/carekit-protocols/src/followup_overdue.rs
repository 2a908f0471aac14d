//! Overdue-followup measure.
//!
//! A patient is in scope when they have no upcoming appointment inside
//! their risk-stratification window and nobody has contacted them since
//! their last checked-in visit. The care action is a phone call directed
//! to the patient within the recent-contact lookback.

use carekit_config::{ClinicSettings, RiskWindows};
use carekit_core::records::{Appointment, AppointmentState, AppointmentStatus, InterviewStatus};
use carekit_core::{
    ChangeType, ClinicalQualityMeasure, Clock, CodeSystem, Interview, Message, PatientRecord,
    ProtocolMeta, ProtocolResult, RecordDateTime, RecordSet, Status, ValueSet,
};
use time::Duration;

/// Coded answers on the phone-call disposition questionnaire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhoneResponse {
    Reached,
    ReachedNotInterested,
    NoAnswerMessage,
    NoAnswerNoMessage,
    CallBackRequested,
    CallToPatient,
    CallToOther,
    FreeText,
}

impl PhoneResponse {
    pub fn code(&self) -> &'static str {
        match self {
            Self::Reached => "QUES_PHONE_03",
            Self::ReachedNotInterested => "QUES_PHONE_04",
            Self::NoAnswerMessage => "QUES_PHONE_05",
            Self::NoAnswerNoMessage => "QUES_PHONE_06",
            Self::CallBackRequested => "QUES_PHONE_08",
            Self::CallToPatient => "QUES_PHONE_10",
            Self::CallToOther => "QUES_PHONE_11",
            Self::FreeText => "QUES_PHONE_16",
        }
    }
}

/// Risk stratification level taken from the most recent stratification
/// interview. Codes outside the known table are preserved so they can
/// resolve to the fallback window instead of failing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RiskLevel {
    Low,
    Medium,
    HighRisk,
    HighRiskUnstable,
    Other(String),
}

impl RiskLevel {
    pub fn from_code(code: &str) -> Self {
        match code {
            "Low" => Self::Low,
            "Medium" => Self::Medium,
            "High Risk" => Self::HighRisk,
            "High Risk - Unstable" => Self::HighRiskUnstable,
            other => Self::Other(other.to_string()),
        }
    }

    /// Follow-up window for this level. Levels outside the table get the
    /// fallback window.
    pub fn window(&self, windows: &RiskWindows) -> Duration {
        let days = match self {
            Self::Low => windows.low,
            Self::Medium => windows.medium,
            Self::HighRisk => windows.high_risk,
            Self::HighRiskUnstable => windows.high_risk_unstable,
            Self::Other(_) => windows.fallback,
        };
        Duration::days(i64::from(days))
    }
}

/// Follow-ups: Follow-up Overdue.
pub struct FollowupOverdue<'a> {
    patient: &'a PatientRecord,
    settings: &'a ClinicSettings,
    clock: &'a dyn Clock,
}

impl<'a> FollowupOverdue<'a> {
    pub fn new(
        patient: &'a PatientRecord,
        settings: &'a ClinicSettings,
        clock: &'a dyn Clock,
    ) -> Self {
        Self {
            patient,
            settings,
            clock,
        }
    }

    pub fn metadata() -> ProtocolMeta {
        ProtocolMeta::new("Follow-ups: Follow-up Overdue", "1.0.0")
            .with_information("https://carekit-rs.github.io/protocols")
            .with_types(["DUO"])
            .with_change_types(vec![ChangeType::Interview, ChangeType::Appointment])
    }

    fn phone_call_questionnaire(&self) -> ValueSet {
        ValueSet::new("Phone Call Disposition Questionnaire").with_codes(
            CodeSystem::Internal,
            [self.settings.phone_call_questionnaire_code.as_str()],
        )
    }

    fn risk_questionnaire(&self) -> ValueSet {
        ValueSet::new("Risk Stratification Questionnaire").with_codes(
            CodeSystem::Internal,
            [self.settings.risk_questionnaire_code.as_str()],
        )
    }

    /// Most recent risk stratification, from the latest stratification
    /// interview no older than the configured maximum age. Falls back to
    /// the configured default level.
    fn risk_stratification(&self) -> RiskLevel {
        let stale_before = self
            .clock
            .now()
            .shift(-Duration::days(i64::from(self.settings.risk_interview_max_age_days)));

        let latest = self
            .patient
            .interviews()
            .find(&self.risk_questionnaire())
            .last();

        match latest {
            Some(interview) if interview.note_timestamp > stale_before => interview
                .response_value(&self.settings.risk_question_code)
                .map(RiskLevel::from_code)
                .unwrap_or_else(|| RiskLevel::from_code(&self.settings.default_risk)),
            _ => RiskLevel::from_code(&self.settings.default_risk),
        }
    }

    fn risk_window(&self) -> Duration {
        self.risk_stratification().window(&self.settings.risk_windows)
    }

    /// True if `date` falls before the end of the upcoming risk window.
    fn is_before_risk_period(&self, date: RecordDateTime) -> bool {
        date < self.clock.now().shift(self.risk_window())
    }

    /// True if `date` falls after the end of the upcoming risk window.
    pub fn is_after_risk_period(&self, date: RecordDateTime) -> bool {
        date > self.clock.now().shift(self.risk_window())
    }

    /// Completed phone-call interviews where the call was directed to the
    /// patient.
    fn phone_calls_to_patient(&self) -> RecordSet<'a, Interview> {
        self.patient
            .interviews()
            .find(&self.phone_call_questionnaire())
            .filter(|call| call.status == InterviewStatus::Active)
            .filter(|call| call.has_response_code(PhoneResponse::CallToPatient.code()))
    }

    /// Staff-originated messages strictly after `start`.
    fn staff_messages_after(&self, start: RecordDateTime) -> RecordSet<'a, Message> {
        self.patient
            .messages()
            .filter(Message::from_staff)
            .after(start)
    }

    /// Past appointments whose state history shows a check-in.
    fn checked_in_appointments(&self) -> RecordSet<'a, Appointment> {
        self.patient
            .appointments()
            .filter(|a| a.reached_state(AppointmentState::CheckedIn))
    }

    /// Instant of the most recent check-in across all past appointments.
    fn most_recent_checkin(&self) -> Option<RecordDateTime> {
        self.checked_in_appointments()
            .iter()
            .filter_map(|a| a.last_transition_to(AppointmentState::CheckedIn))
            .max()
    }

    /// Upcoming appointments that have not been cancelled.
    fn upcoming_uncancelled(&self) -> RecordSet<'a, Appointment> {
        self.patient
            .upcoming_appointments()
            .filter(|a| a.status != AppointmentStatus::Cancelled)
    }

    /// True when no upcoming appointment lands inside the risk window.
    fn no_followup_within_window(&self) -> bool {
        let upcoming = self.upcoming_uncancelled();
        if upcoming.is_empty() {
            return true;
        }
        !upcoming.any(|a| self.is_before_risk_period(a.start_time))
    }

    /// True when neither a staff message nor a patient-directed call has
    /// happened since the most recent check-in. With no check-in on file
    /// there is nothing to suppress.
    fn no_recent_contact(&self) -> bool {
        let Some(checkin) = self.most_recent_checkin() else {
            return true;
        };
        let messaged = !self.staff_messages_after(checkin).is_empty();
        let called = !self.phone_calls_to_patient().after(checkin).is_empty();
        !(messaged || called)
    }
}

impl ClinicalQualityMeasure for FollowupOverdue<'_> {
    fn meta(&self) -> ProtocolMeta {
        Self::metadata()
    }

    fn in_denominator(&self) -> bool {
        self.no_followup_within_window() && self.no_recent_contact()
    }

    fn in_numerator(&self) -> bool {
        let cutoff = self
            .clock
            .now()
            .shift(-Duration::days(i64::from(self.settings.contact_lookback_days)));
        self.phone_calls_to_patient()
            .any(|call| call.note_timestamp >= cutoff)
    }

    fn compute_results(&self) -> ProtocolResult {
        let mut result = ProtocolResult::new();

        if self.in_denominator() {
            if self.in_numerator() {
                result.status = Status::Satisfied;
                result.add_narrative("Patient has been contacted in the past week.");
            } else {
                result.due_in = Some(-1);
                result.status = Status::Due;
                result.add_narrative(
                    "Patient has no follow-up appointment within their risk stratification \
                     period and has not been contacted over the past period.",
                );
            }
        } else {
            result.status = Status::NotApplicable;
            result.add_narrative(
                "Patient has an appointment within their risk period or has been contacted.",
            );
        }

        tracing::debug!(status = ?result.status, "Evaluated overdue-followup measure");
        result
    }
}
