use crate::error::{CoreError, Result};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use time::{Duration, OffsetDateTime, UtcOffset};

/// Timestamp attached to a patient record, parsed once at the snapshot
/// boundary so the rule evaluators never see raw strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RecordDateTime(pub OffsetDateTime);

impl RecordDateTime {
    pub fn new(datetime: OffsetDateTime) -> Self {
        Self(datetime)
    }

    pub fn inner(&self) -> &OffsetDateTime {
        &self.0
    }

    pub fn into_inner(self) -> OffsetDateTime {
        self.0
    }

    pub fn timestamp(&self) -> i64 {
        self.0.unix_timestamp()
    }

    /// This instant shifted forward by `duration` (negative shifts back).
    pub fn shift(&self, duration: Duration) -> Self {
        Self(self.0 + duration)
    }
}

impl fmt::Display for RecordDateTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let formatted = self
            .0
            .format(&time::format_description::well_known::Rfc3339)
            .map_err(|_| fmt::Error)?;
        write!(f, "{formatted}")
    }
}

impl FromStr for RecordDateTime {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self> {
        let datetime = OffsetDateTime::parse(s, &time::format_description::well_known::Rfc3339)
            .map_err(|e| {
                CoreError::invalid_date_time(format!("Failed to parse record DateTime '{s}': {e}"))
            })?;
        Ok(RecordDateTime(datetime))
    }
}

impl Serialize for RecordDateTime {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let formatted = self
            .0
            .format(&time::format_description::well_known::Rfc3339)
            .map_err(serde::ser::Error::custom)?;
        serializer.serialize_str(&formatted)
    }
}

impl<'de> Deserialize<'de> for RecordDateTime {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        RecordDateTime::from_str(&s).map_err(serde::de::Error::custom)
    }
}

pub fn now_utc() -> RecordDateTime {
    RecordDateTime(OffsetDateTime::now_utc())
}

/// Time source injected into every measure so evaluations are deterministic
/// under test and honor the clinic's timezone in production.
pub trait Clock: fmt::Debug {
    fn now(&self) -> RecordDateTime;
}

/// Wall-clock time expressed in the clinic's UTC offset.
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    offset: UtcOffset,
}

impl SystemClock {
    pub fn new(offset: UtcOffset) -> Self {
        Self { offset }
    }

    pub fn from_offset_hours(hours: i8) -> Result<Self> {
        let offset = UtcOffset::from_hms(hours, 0, 0).map_err(|e| {
            CoreError::invalid_date_time(format!("Invalid clinic UTC offset {hours}: {e}"))
        })?;
        Ok(Self { offset })
    }
}

impl Clock for SystemClock {
    fn now(&self) -> RecordDateTime {
        RecordDateTime(OffsetDateTime::now_utc().to_offset(self.offset))
    }
}

/// Deterministic clock for tests.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub RecordDateTime);

impl FixedClock {
    pub fn at(datetime: OffsetDateTime) -> Self {
        Self(RecordDateTime(datetime))
    }
}

impl Clock for FixedClock {
    fn now(&self) -> RecordDateTime {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    #[test]
    fn test_record_datetime_display() {
        let dt = RecordDateTime::new(datetime!(2023-05-15 14:30:00 UTC));
        assert_eq!(dt.to_string(), "2023-05-15T14:30:00Z");
    }

    #[test]
    fn test_record_datetime_from_str() {
        let dt = RecordDateTime::from_str("2023-05-15T14:30:00Z").unwrap();
        assert_eq!(dt.0, datetime!(2023-05-15 14:30:00 UTC));
    }

    #[test]
    fn test_record_datetime_from_str_with_offset() {
        let dt = RecordDateTime::from_str("2023-05-15T14:30:00-07:00").unwrap();
        assert_eq!(
            dt.0.to_offset(UtcOffset::UTC),
            datetime!(2023-05-15 21:30:00 UTC)
        );
    }

    #[test]
    fn test_record_datetime_from_str_invalid() {
        assert!(RecordDateTime::from_str("invalid-date").is_err());
        assert!(RecordDateTime::from_str("2023-13-01T00:00:00Z").is_err());
        assert!(RecordDateTime::from_str("").is_err());
    }

    #[test]
    fn test_record_datetime_shift() {
        let dt = RecordDateTime::new(datetime!(2023-05-15 00:00:00 UTC));
        assert_eq!(
            dt.shift(Duration::days(7)).0,
            datetime!(2023-05-22 00:00:00 UTC)
        );
        assert_eq!(
            dt.shift(Duration::days(-7)).0,
            datetime!(2023-05-08 00:00:00 UTC)
        );
    }

    #[test]
    fn test_record_datetime_ordering() {
        let dt1 = RecordDateTime::new(datetime!(2023-05-15 14:30:00 UTC));
        let dt2 = RecordDateTime::new(datetime!(2023-05-15 14:30:01 UTC));
        assert!(dt1 < dt2);
    }

    #[test]
    fn test_record_datetime_serde_roundtrip() {
        let dt = RecordDateTime::new(datetime!(2024-02-29 23:59:59 UTC));
        let json = serde_json::to_string(&dt).unwrap();
        assert_eq!(json, "\"2024-02-29T23:59:59Z\"");
        let back: RecordDateTime = serde_json::from_str(&json).unwrap();
        assert_eq!(dt, back);
    }

    #[test]
    fn test_record_datetime_deserialization_invalid() {
        assert!(serde_json::from_str::<RecordDateTime>("\"not-a-date\"").is_err());
    }

    #[test]
    fn test_system_clock_offset() {
        let clock = SystemClock::from_offset_hours(-7).unwrap();
        let now = clock.now();
        assert_eq!(now.0.offset(), UtcOffset::from_hms(-7, 0, 0).unwrap());
    }

    #[test]
    fn test_system_clock_invalid_offset() {
        assert!(SystemClock::from_offset_hours(30).is_err());
    }

    #[test]
    fn test_fixed_clock() {
        let clock = FixedClock::at(datetime!(2023-05-15 14:30:00 UTC));
        assert_eq!(clock.now().0, datetime!(2023-05-15 14:30:00 UTC));
        assert_eq!(clock.now(), clock.now());
    }
}
