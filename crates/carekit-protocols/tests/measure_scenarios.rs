//! End-to-end scenarios: host-shaped JSON snapshot in, protocol results out.

use carekit_config::ClinicSettings;
use carekit_core::{ClinicalQualityMeasure, FixedClock, PatientRecord, Status};
use carekit_protocols::{FollowupOverdue, HormoneTherapy, SpecialTasks};
use time::macros::datetime;

fn snapshot(json: serde_json::Value) -> PatientRecord {
    serde_json::from_value(json).expect("snapshot should deserialize")
}

fn clock() -> FixedClock {
    FixedClock::at(datetime!(2024-06-01 12:00:00 UTC))
}

#[test]
fn overdue_patient_with_no_contact_is_due() {
    let patient = snapshot(serde_json::json!({
        "appointments": [{
            "startTime": "2023-11-14T10:00:00Z",
            "status": "confirmed",
            "stateHistory": [{"state": "CVD", "created": "2023-11-14T10:05:00Z"}]
        }],
        "interviews": [{
            "questionnaires": [{"system": "INTERNAL", "code": "DUO_QUES_RISK_STRAT_01"}],
            "noteTimestamp": "2024-01-10T09:00:00Z",
            "status": "AC",
            "responses": [{"code": "DUO_QUES_RISK_STRAT_02", "value": "Low"}]
        }]
    }));
    let settings = ClinicSettings::default();
    let clock = clock();

    let result = FollowupOverdue::new(&patient, &settings, &clock).compute_results();
    assert_eq!(result.status, Status::Due);
    assert_eq!(result.due_in, Some(-1));
}

#[test]
fn upcoming_appointment_within_window_is_not_applicable() {
    let patient = snapshot(serde_json::json!({
        "upcomingAppointments": [{
            "startTime": "2024-06-11T12:00:00Z",
            "status": "confirmed"
        }]
    }));
    let settings = ClinicSettings::default();
    let clock = clock();

    let result = FollowupOverdue::new(&patient, &settings, &clock).compute_results();
    assert_eq!(result.status, Status::NotApplicable);
}

#[test]
fn high_risk_patient_with_distant_appointment_is_due() {
    // High Risk window is 66 days; the only upcoming appointment is at
    // +100 days, and the last check-in was never contacted after.
    let patient = snapshot(serde_json::json!({
        "appointments": [{
            "startTime": "2024-01-05T10:00:00Z",
            "status": "confirmed",
            "stateHistory": [{"state": "CVD", "created": "2024-01-05T10:05:00Z"}]
        }],
        "upcomingAppointments": [{
            "startTime": "2024-09-09T12:00:00Z",
            "status": "confirmed"
        }],
        "interviews": [{
            "questionnaires": [{"system": "INTERNAL", "code": "DUO_QUES_RISK_STRAT_01"}],
            "noteTimestamp": "2024-05-01T09:00:00Z",
            "status": "AC",
            "responses": [{"code": "DUO_QUES_RISK_STRAT_02", "value": "High Risk"}]
        }]
    }));
    let settings = ClinicSettings::default();
    let clock = clock();

    let result = FollowupOverdue::new(&patient, &settings, &clock).compute_results();
    assert_eq!(result.status, Status::Due);
}

#[test]
fn engagement_task_lifecycle() {
    let settings = ClinicSettings::default();
    let clock = clock();

    let future = snapshot(serde_json::json!({
        "tasks": [{"status": "OPEN", "labels": ["Engagement"], "due": "2024-07-01T00:00:00Z"}]
    }));
    assert_eq!(
        SpecialTasks::new(&future, &settings, &clock).compute_results().status,
        Status::Satisfied
    );

    let past = snapshot(serde_json::json!({
        "tasks": [{"status": "OPEN", "labels": ["Engagement"], "due": "2024-05-01T00:00:00Z"}]
    }));
    assert_eq!(
        SpecialTasks::new(&past, &settings, &clock).compute_results().status,
        Status::Due
    );

    let none = snapshot(serde_json::json!({"tasks": []}));
    assert_eq!(
        SpecialTasks::new(&none, &settings, &clock).compute_results().status,
        Status::NotApplicable
    );
}

#[test]
fn hormone_therapy_recommends_missing_regimen() {
    let patient = snapshot(serde_json::json!({
        "conditions": [
            {"coding": [{"system": "ICD10CM", "code": "N95.1"}]},
            {"coding": [{"system": "SNOMEDCT", "code": "236886002"}]}
        ],
        "medications": []
    }));

    let result = HormoneTherapy::new(&patient).compute_results();
    assert_eq!(result.status, Status::Due);
    assert_eq!(result.recommendations[0].key, "RECOMMEND_ESTROGEN_THERAPY");

    let json = serde_json::to_value(&result).unwrap();
    assert_eq!(json["status"], "due");
    assert_eq!(json["recommendations"][0]["button"], "Prescribe");
}

#[test]
fn results_are_pure_reads_of_the_snapshot() {
    let patient = snapshot(serde_json::json!({
        "tasks": [{"status": "OPEN", "labels": ["Engagement"], "due": "2024-07-01T00:00:00Z"}]
    }));
    let settings = ClinicSettings::default();
    let clock = clock();
    let measure = SpecialTasks::new(&patient, &settings, &clock);

    let first = measure.compute_results();
    let second = measure.compute_results();
    assert_eq!(first, second);
}
