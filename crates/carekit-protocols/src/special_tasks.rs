//! Engagement special-tasks measure.
//!
//! Applies to patients with open tasks carrying an engagement label;
//! satisfied while at least one of those tasks is still due in the future.

use carekit_config::ClinicSettings;
use carekit_core::records::TaskStatus;
use carekit_core::{
    ChangeType, ClinicalQualityMeasure, Clock, PatientRecord, ProtocolMeta, ProtocolResult,
    RecordSet, Status, Task,
};

/// Engagement: Special Tasks.
pub struct SpecialTasks<'a> {
    patient: &'a PatientRecord,
    settings: &'a ClinicSettings,
    clock: &'a dyn Clock,
}

impl<'a> SpecialTasks<'a> {
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
        ProtocolMeta::new("Engagement: Special Tasks", "1.0.0")
            .with_information("https://carekit-rs.github.io/protocols")
            .with_types(["DUO"])
            .with_change_types(vec![ChangeType::Task])
    }

    /// Open tasks carrying any of the configured engagement labels.
    fn engagement_tasks(&self) -> RecordSet<'a, Task> {
        self.patient
            .tasks()
            .filter(|task| task.status == TaskStatus::Open)
            .filter(|task| task.has_any_label(&self.settings.engagement_task_labels))
    }
}

impl ClinicalQualityMeasure for SpecialTasks<'_> {
    fn meta(&self) -> ProtocolMeta {
        Self::metadata()
    }

    fn in_denominator(&self) -> bool {
        !self.engagement_tasks().is_empty()
    }

    fn in_numerator(&self) -> bool {
        let now = self.clock.now();
        self.engagement_tasks()
            .any(|task| task.due.is_some_and(|due| due > now))
    }

    fn compute_results(&self) -> ProtocolResult {
        let mut result = ProtocolResult::new();

        if self.in_denominator() {
            if self.in_numerator() {
                result.status = Status::Satisfied;
                result.add_narrative("Special tasks are in the future.");
            } else {
                result.due_in = Some(-1);
                result.status = Status::Due;
                result.add_narrative("Patient has past due special tasks to be addressed.");
            }
        } else {
            result.status = Status::NotApplicable;
            result.add_narrative("Patient does not have any special tasks.");
        }

        tracing::debug!(status = ?result.status, "Evaluated special-tasks measure");
        result
    }
}
