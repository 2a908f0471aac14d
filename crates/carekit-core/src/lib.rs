pub mod error;
pub mod protocol;
pub mod records;
pub mod recordset;
pub mod time;
pub mod vocabulary;

pub use error::{CoreError, Result};
pub use protocol::{
    ChangeType, ClinicalQualityMeasure, ProtocolMeta, ProtocolResult, Recommendation,
    RecommendationKind, Status,
};
pub use records::{
    Appointment, AppointmentState, AppointmentStateChange, AppointmentStatus, Condition,
    Interview, InterviewResponse, InterviewStatus, Medication, Message, MessageSender,
    PatientRecord, SenderKind, Task, TaskStatus,
};
pub use recordset::{Coded, RecordSet, Timestamped};
pub use time::{Clock, FixedClock, RecordDateTime, SystemClock, now_utc};
pub use vocabulary::{CodeSystem, Coding, ValueSet};
