//! Protocol surface shared by every measure: result types, recommendations,
//! change triggers, and the measure trait the host invokes.

use crate::vocabulary::ValueSet;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Outcome of one measure evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Status {
    #[serde(rename = "due")]
    Due,
    #[serde(rename = "satisfied")]
    Satisfied,
    #[serde(rename = "not_applicable")]
    #[default]
    NotApplicable,
}

/// Record-change events the host scheduler can re-invoke a measure on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChangeType {
    Appointment,
    Condition,
    Interview,
    Medication,
    Message,
    Patient,
    Task,
}

/// What kind of action a recommendation asks the host to surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecommendationKind {
    Instruction,
    Prescribe,
}

/// An actionable suggestion attached to a result, rendered by the host.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub key: String,
    pub kind: RecommendationKind,
    pub rank: u32,
    pub button: String,
    pub title: String,
    /// Value set the recommended order should draw from.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value_set: Option<ValueSet>,
    #[serde(default, skip_serializing_if = "Value::is_null")]
    pub context: Value,
}

impl Recommendation {
    pub fn prescribe(
        key: impl Into<String>,
        rank: u32,
        title: impl Into<String>,
        prescription: ValueSet,
    ) -> Self {
        Self {
            key: key.into(),
            kind: RecommendationKind::Prescribe,
            rank,
            button: "Prescribe".to_string(),
            title: title.into(),
            value_set: Some(prescription),
            context: Value::Null,
        }
    }

    pub fn instruction(
        key: impl Into<String>,
        rank: u32,
        title: impl Into<String>,
        instruction: ValueSet,
    ) -> Self {
        Self {
            key: key.into(),
            kind: RecommendationKind::Instruction,
            rank,
            button: "Instruct".to_string(),
            title: title.into(),
            value_set: Some(instruction),
            context: Value::Null,
        }
    }

    pub fn with_context(mut self, context: Value) -> Self {
        self.context = context;
        self
    }
}

/// Structured result returned to the host. Created fresh per evaluation;
/// the host owns persistence and display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct ProtocolResult {
    pub status: Status,
    /// Days until due; -1 means overdue now.
    #[serde(rename = "dueIn", skip_serializing_if = "Option::is_none")]
    pub due_in: Option<i32>,
    #[serde(default)]
    pub narratives: Vec<String>,
    #[serde(default)]
    pub recommendations: Vec<Recommendation>,
}

impl ProtocolResult {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_narrative(&mut self, narrative: impl Into<String>) {
        self.narratives.push(narrative.into());
    }

    pub fn add_recommendation(&mut self, recommendation: Recommendation) {
        self.recommendations.push(recommendation);
    }
}

/// Static measure metadata, read by the host scheduler.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProtocolMeta {
    pub title: String,
    pub description: String,
    pub version: String,
    pub information: String,
    #[serde(default)]
    pub identifiers: Vec<String>,
    #[serde(default)]
    pub types: Vec<String>,
    #[serde(rename = "computeOnChangeTypes")]
    pub compute_on_change_types: Vec<ChangeType>,
    #[serde(default)]
    pub references: Vec<String>,
}

impl ProtocolMeta {
    pub fn new(title: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: String::new(),
            version: version.into(),
            information: String::new(),
            identifiers: Vec::new(),
            types: Vec::new(),
            compute_on_change_types: Vec::new(),
            references: Vec::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_information(mut self, information: impl Into<String>) -> Self {
        self.information = information.into();
        self
    }

    pub fn with_identifiers<I, S>(mut self, identifiers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.identifiers = identifiers.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_types<I, S>(mut self, types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.types = types.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_change_types(mut self, change_types: Vec<ChangeType>) -> Self {
        self.compute_on_change_types = change_types;
        self
    }

    pub fn with_references<I, S>(mut self, references: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.references = references.into_iter().map(Into::into).collect();
        self
    }
}

/// A clinical quality measure bound to one patient snapshot.
///
/// `in_denominator` answers "does this measure apply to the patient",
/// `in_numerator` answers "has the care action already happened", and
/// `compute_results` combines the two into a [`ProtocolResult`]. All three
/// are pure reads of the snapshot.
pub trait ClinicalQualityMeasure {
    fn meta(&self) -> ProtocolMeta;

    fn in_denominator(&self) -> bool;

    fn in_numerator(&self) -> bool;

    fn compute_results(&self) -> ProtocolResult;
}
