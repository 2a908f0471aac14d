use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// Code systems used across patient records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum CodeSystem {
    #[serde(rename = "ICD10CM")]
    Icd10Cm,
    #[serde(rename = "SNOMEDCT")]
    SnomedCt,
    #[serde(rename = "LOINC")]
    Loinc,
    #[serde(rename = "RXNORM")]
    RxNorm,
    /// Clinic-internal identifiers (questionnaires, questions, responses).
    #[serde(rename = "INTERNAL")]
    Internal,
}

impl fmt::Display for CodeSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Icd10Cm => write!(f, "ICD10CM"),
            Self::SnomedCt => write!(f, "SNOMEDCT"),
            Self::Loinc => write!(f, "LOINC"),
            Self::RxNorm => write!(f, "RXNORM"),
            Self::Internal => write!(f, "INTERNAL"),
        }
    }
}

/// A single coded concept on a record.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Coding {
    pub system: CodeSystem,
    pub code: String,
}

impl Coding {
    pub fn new(system: CodeSystem, code: impl Into<String>) -> Self {
        Self {
            system,
            code: code.into(),
        }
    }
}

/// A named set of codes a record can be matched against.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValueSet {
    pub name: String,
    pub codes: BTreeSet<Coding>,
}

impl ValueSet {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            codes: BTreeSet::new(),
        }
    }

    pub fn with_codes<I, S>(mut self, system: CodeSystem, codes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.codes
            .extend(codes.into_iter().map(|c| Coding::new(system, c)));
        self
    }

    pub fn contains(&self, coding: &Coding) -> bool {
        self.codes.contains(coding)
    }

    /// True if any of the given codings belongs to this set.
    pub fn matches_any<'a>(&self, codings: impl IntoIterator<Item = &'a Coding>) -> bool {
        codings.into_iter().any(|c| self.contains(c))
    }
}
