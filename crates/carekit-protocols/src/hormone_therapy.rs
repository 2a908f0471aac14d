//! Postmenopausal hormone-therapy measure.
//!
//! Applies to patients with a postmenopausal-state diagnosis. The expected
//! regimen depends on surgical history: estrogen alone after a
//! hysterectomy, combined estrogen and progestin with an intact uterus.
//! When the expected regimen is absent the measure recommends prescribing
//! it.

use carekit_core::{
    ChangeType, ClinicalQualityMeasure, CodeSystem, PatientRecord, ProtocolMeta, ProtocolResult,
    Recommendation, Status, ValueSet,
};

pub fn postmenopausal_state() -> ValueSet {
    ValueSet::new("Postmenopausal State").with_codes(CodeSystem::Icd10Cm, ["N95.0", "N95.1"])
}

pub fn hysterectomy() -> ValueSet {
    ValueSet::new("Hysterectomy")
        .with_codes(CodeSystem::Icd10Cm, ["Z90.710"])
        .with_codes(CodeSystem::SnomedCt, ["236886002"])
}

pub fn estrogen_therapy() -> ValueSet {
    ValueSet::new("Estrogen therapy").with_codes(CodeSystem::Loinc, ["2254-1"])
}

pub fn progestin_therapy() -> ValueSet {
    ValueSet::new("Progestin therapy").with_codes(CodeSystem::Loinc, ["2839-9"])
}

pub fn estrogen_and_progestin_therapy() -> ValueSet {
    ValueSet::new("Estrogen and progestin therapy")
        .with_codes(CodeSystem::Loinc, ["2254-1", "2839-9"])
}

/// Hormone Therapy Protocol.
pub struct HormoneTherapy<'a> {
    patient: &'a PatientRecord,
}

impl<'a> HormoneTherapy<'a> {
    pub fn new(patient: &'a PatientRecord) -> Self {
        Self { patient }
    }

    pub fn metadata() -> ProtocolMeta {
        ProtocolMeta::new("Hormone Therapy Protocol", "2022-11-01v2")
            .with_description("Hormone therapy in postmenopausal persons")
            .with_information("https://carekit-rs.github.io/protocols")
            .with_identifiers(["CMS12345v1"])
            .with_types(["CQM"])
            .with_change_types(vec![
                ChangeType::Condition,
                ChangeType::Medication,
                ChangeType::Patient,
            ])
            .with_references([
                "https://www.uspreventiveservicestaskforce.org/uspstf/recommendation/\
                 menopausal-hormone-therapy-preventive-medication",
            ])
    }

    fn had_hysterectomy(&self) -> bool {
        !self.patient.conditions().find(&hysterectomy()).is_empty()
    }

    fn on_estrogen(&self) -> bool {
        !self.patient.medications().find(&estrogen_therapy()).is_empty()
    }

    fn on_progestin(&self) -> bool {
        !self.patient.medications().find(&progestin_therapy()).is_empty()
    }
}

impl ClinicalQualityMeasure for HormoneTherapy<'_> {
    fn meta(&self) -> ProtocolMeta {
        Self::metadata()
    }

    fn in_denominator(&self) -> bool {
        !self
            .patient
            .conditions()
            .find(&postmenopausal_state())
            .is_empty()
    }

    /// Estrogen alone after a hysterectomy; combined estrogen and
    /// progestin otherwise.
    fn in_numerator(&self) -> bool {
        if self.had_hysterectomy() {
            self.on_estrogen() && !self.on_progestin()
        } else {
            self.on_estrogen() && self.on_progestin()
        }
    }

    fn compute_results(&self) -> ProtocolResult {
        let mut result = ProtocolResult::new();

        if self.in_denominator() {
            if self.in_numerator() {
                result.status = Status::Satisfied;
                result.add_narrative("Patient is on the expected hormone therapy regimen.");
            } else {
                result.status = Status::Due;
                if self.had_hysterectomy() {
                    result.add_narrative(
                        "Postmenopausal patient with hysterectomy is not on estrogen-only \
                         therapy.",
                    );
                    result.add_recommendation(Recommendation::prescribe(
                        "RECOMMEND_ESTROGEN_THERAPY",
                        1,
                        "Recommendation of Estrogen Therapy.",
                        estrogen_therapy(),
                    ));
                } else {
                    result.add_narrative(
                        "Postmenopausal patient is not on combined estrogen and progestin \
                         therapy.",
                    );
                    result.add_recommendation(Recommendation::prescribe(
                        "RECOMMEND_ESTROGEN_AND_PROGESTIN_THERAPY",
                        1,
                        "Recommendation of Estrogen and Progestin Therapy.",
                        estrogen_and_progestin_therapy(),
                    ));
                }
            }
        } else {
            result.status = Status::NotApplicable;
            result.add_narrative("Patient is not in a postmenopausal state.");
        }

        tracing::debug!(status = ?result.status, "Evaluated hormone-therapy measure");
        result
    }
}
