//! Typed, read-only patient snapshot.
//!
//! Records arrive from the host as JSON and are deserialized once at the
//! snapshot boundary. Status fields keep their wire codes on the wire but
//! are closed enums in memory, so rules never compare raw strings.

use crate::recordset::{Coded, RecordSet, Timestamped};
use crate::time::RecordDateTime;
use crate::vocabulary::Coding;
use serde::{Deserialize, Serialize};

/// Interview lifecycle state (wire code in parens).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum InterviewStatus {
    /// Committed and active ("AC").
    #[serde(rename = "AC")]
    Active,
    /// Deleted ("DEL").
    #[serde(rename = "DEL")]
    Deleted,
    #[serde(other)]
    #[default]
    Unknown,
}

/// One answer inside an interview.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InterviewResponse {
    pub code: String,
    pub value: String,
}

/// A completed questionnaire (phone-call disposition, risk stratification, ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Interview {
    /// Codes of the questionnaires this interview answered.
    #[serde(default)]
    pub questionnaires: Vec<Coding>,
    #[serde(rename = "noteTimestamp")]
    pub note_timestamp: RecordDateTime,
    #[serde(default)]
    pub status: InterviewStatus,
    #[serde(default)]
    pub responses: Vec<InterviewResponse>,
}

impl Interview {
    /// Value of the response to the given question code, if answered.
    pub fn response_value(&self, question_code: &str) -> Option<&str> {
        self.responses
            .iter()
            .find(|r| r.code == question_code)
            .map(|r| r.value.as_str())
    }

    /// True if any response carries the given code.
    pub fn has_response_code(&self, code: &str) -> bool {
        self.responses.iter().any(|r| r.code == code)
    }
}

impl Coded for Interview {
    fn codings(&self) -> &[Coding] {
        &self.questionnaires
    }
}

impl Timestamped for Interview {
    fn recorded_at(&self) -> RecordDateTime {
        self.note_timestamp
    }
}

/// Scheduling state recorded in an appointment's state history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum AppointmentState {
    /// Patient checked in / visit confirmed done ("CVD").
    #[serde(rename = "CVD")]
    CheckedIn,
    /// No-show ("NSW").
    #[serde(rename = "NSW")]
    NoShow,
    /// Cancelled ("CLD").
    #[serde(rename = "CLD")]
    Cancelled,
    #[serde(other)]
    #[default]
    Unknown,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppointmentStateChange {
    pub state: AppointmentState,
    #[serde(rename = "created")]
    pub recorded_at: RecordDateTime,
}

/// Booking status on upcoming appointments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum AppointmentStatus {
    #[serde(rename = "confirmed")]
    Confirmed,
    #[serde(rename = "cancelled")]
    Cancelled,
    #[serde(other)]
    #[default]
    Unconfirmed,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Appointment {
    #[serde(rename = "startTime")]
    pub start_time: RecordDateTime,
    #[serde(default)]
    pub status: AppointmentStatus,
    #[serde(rename = "stateHistory", default)]
    pub state_history: Vec<AppointmentStateChange>,
}

impl Appointment {
    /// True if the state history ever reached the given state.
    pub fn reached_state(&self, state: AppointmentState) -> bool {
        self.state_history.iter().any(|s| s.state == state)
    }

    /// Instant of the most recent transition into the given state.
    pub fn last_transition_to(&self, state: AppointmentState) -> Option<RecordDateTime> {
        self.state_history
            .iter()
            .filter(|s| s.state == state)
            .map(|s| s.recorded_at)
            .max()
    }
}

impl Timestamped for Appointment {
    fn recorded_at(&self) -> RecordDateTime {
        self.start_time
    }
}

/// Who sent a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum SenderKind {
    #[serde(rename = "Staff")]
    Staff,
    #[serde(rename = "Patient")]
    Patient,
    #[serde(other)]
    #[default]
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageSender {
    #[serde(rename = "type")]
    pub kind: SenderKind,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub created: RecordDateTime,
    #[serde(rename = "sender", default)]
    pub senders: Vec<MessageSender>,
}

impl Message {
    pub fn from_staff(&self) -> bool {
        self.senders.iter().any(|s| s.kind == SenderKind::Staff)
    }
}

impl Timestamped for Message {
    fn recorded_at(&self) -> RecordDateTime {
        self.created
    }
}

/// Task lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum TaskStatus {
    #[serde(rename = "OPEN")]
    Open,
    #[serde(rename = "COMPLETED")]
    Completed,
    #[serde(rename = "CLOSED")]
    Closed,
    #[serde(other)]
    #[default]
    Unknown,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    #[serde(default)]
    pub status: TaskStatus,
    #[serde(default)]
    pub labels: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due: Option<RecordDateTime>,
}

impl Task {
    pub fn has_any_label<S: AsRef<str>>(&self, labels: &[S]) -> bool {
        self.labels
            .iter()
            .any(|l| labels.iter().any(|wanted| wanted.as_ref() == l))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Condition {
    #[serde(rename = "coding", default)]
    pub codings: Vec<Coding>,
}

impl Coded for Condition {
    fn codings(&self) -> &[Coding] {
        &self.codings
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Medication {
    #[serde(rename = "coding", default)]
    pub codings: Vec<Coding>,
}

impl Coded for Medication {
    fn codings(&self) -> &[Coding] {
        &self.codings
    }
}

/// Immutable snapshot of one patient's collections, as materialized by the
/// host at evaluation time. Host record order is preserved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct PatientRecord {
    #[serde(default)]
    pub appointments: Vec<Appointment>,
    #[serde(rename = "upcomingAppointments", default)]
    pub upcoming_appointments: Vec<Appointment>,
    #[serde(default)]
    pub interviews: Vec<Interview>,
    #[serde(default)]
    pub messages: Vec<Message>,
    #[serde(default)]
    pub tasks: Vec<Task>,
    #[serde(default)]
    pub conditions: Vec<Condition>,
    #[serde(default)]
    pub medications: Vec<Medication>,
}

impl PatientRecord {
    pub fn appointments(&self) -> RecordSet<'_, Appointment> {
        RecordSet::from_slice(&self.appointments)
    }

    pub fn upcoming_appointments(&self) -> RecordSet<'_, Appointment> {
        RecordSet::from_slice(&self.upcoming_appointments)
    }

    pub fn interviews(&self) -> RecordSet<'_, Interview> {
        RecordSet::from_slice(&self.interviews)
    }

    pub fn messages(&self) -> RecordSet<'_, Message> {
        RecordSet::from_slice(&self.messages)
    }

    pub fn tasks(&self) -> RecordSet<'_, Task> {
        RecordSet::from_slice(&self.tasks)
    }

    pub fn conditions(&self) -> RecordSet<'_, Condition> {
        RecordSet::from_slice(&self.conditions)
    }

    pub fn medications(&self) -> RecordSet<'_, Medication> {
        RecordSet::from_slice(&self.medications)
    }
}
