//! Clinical quality measure protocols.
//!
//! Each measure binds a patient snapshot, clinic settings, and a clock, and
//! answers [`compute_results`](carekit_core::ClinicalQualityMeasure::compute_results)
//! with a fresh [`ProtocolResult`](carekit_core::ProtocolResult).

pub mod followup_overdue;
pub mod hormone_therapy;
pub mod special_tasks;

pub use followup_overdue::{FollowupOverdue, PhoneResponse, RiskLevel};
pub use hormone_therapy::HormoneTherapy;
pub use special_tasks::SpecialTasks;

use carekit_core::ProtocolMeta;

/// Metadata for every measure in this crate, read by the host scheduler to
/// decide which change events re-trigger which evaluations.
pub fn protocol_catalog() -> Vec<ProtocolMeta> {
    vec![
        FollowupOverdue::metadata(),
        SpecialTasks::metadata(),
        HormoneTherapy::metadata(),
    ]
}
