use chrono::{DateTime, Duration, NaiveDateTime, Utc};

use crate::clinic::appointment::{Appointment, EventCategory};

/// The backend does not model appointment length, so every event gets a fixed
/// 30-minute span for display purposes.
pub const EVENT_SPAN_MINUTES: i64 = 30;

/// Calendar-ready projection of one appointment.
#[derive(Debug, Clone, PartialEq)]
pub struct CalendarEvent {
    pub id: String,
    pub title: String,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub all_day: bool,
    pub category: EventCategory,
}

impl CalendarEvent {
    pub fn color(&self) -> &'static str {
        self.category.color()
    }
}

/// Projects the full appointment list into the ordered event sequence to
/// render, applying both case-insensitive name filters.
///
/// This is a pure function: the output is determined entirely by the record
/// list and the two filter strings, and input order is preserved. A record
/// whose date cannot be parsed is dropped with a warning instead of failing
/// the whole projection.
pub fn project(
    records: &[Appointment],
    patient_filter: &str,
    professional_filter: &str,
) -> Vec<CalendarEvent> {
    records
        .iter()
        .filter(|r| r.matches_filters(patient_filter, professional_filter))
        .filter_map(|r| match parse_scheduled_at(&r.scheduled_at) {
            Some(start) => Some(CalendarEvent {
                id: r.id.to_string(),
                title: format!("{} - {}", r.patient_name, r.professional_name),
                start,
                end: start + Duration::minutes(EVENT_SPAN_MINUTES),
                all_day: false,
                category: EventCategory::from_status(&r.status),
            }),
            None => {
                tracing::warn!(
                    "Dropping appointment {}: unparseable date '{}'",
                    r.id,
                    r.scheduled_at
                );
                None
            }
        })
        .collect()
}

/// Accepts RFC 3339 timestamps as well as the offset-less form some backend
/// views return; the latter is taken as UTC.
pub fn parse_scheduled_at(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S")
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f"))
        .map(|naive| naive.and_utc())
        .ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clinic::appointment::STATUS_SCHEDULED;
    use chrono::TimeZone;

    fn record(id: i64, patient: &str, professional: &str, when: &str, status: &str) -> Appointment {
        Appointment {
            id,
            patient_name: patient.to_string(),
            professional_name: professional.to_string(),
            scheduled_at: when.to_string(),
            status: status.to_string(),
        }
    }

    fn sample() -> Vec<Appointment> {
        vec![
            record(1, "Ana", "Dr. Silva", "2024-05-01T09:00:00Z", STATUS_SCHEDULED),
            record(2, "Bruno", "Dra. Costa", "2024-05-01T10:00:00Z", "Confirmado"),
            record(3, "Carla Anes", "Dr. Silva", "2024-05-02T14:30:00Z", "Cancelado"),
        ]
    }

    #[test]
    fn unfiltered_projection_is_one_to_one_and_ordered() {
        let records = sample();
        let events = project(&records, "", "");

        assert_eq!(events.len(), records.len());
        let ids: Vec<&str> = events.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "2", "3"]);
    }

    #[test]
    fn projects_all_fields_for_single_record() {
        let records = vec![record(
            1,
            "Ana",
            "Dr. Silva",
            "2024-05-01T09:00:00Z",
            STATUS_SCHEDULED,
        )];

        let events = project(&records, "", "");

        assert_eq!(events.len(), 1);
        let event = &events[0];
        assert_eq!(event.id, "1");
        assert_eq!(event.title, "Ana - Dr. Silva");
        assert_eq!(event.start, Utc.with_ymd_and_hms(2024, 5, 1, 9, 0, 0).unwrap());
        assert_eq!(event.end, Utc.with_ymd_and_hms(2024, 5, 1, 9, 30, 0).unwrap());
        assert!(!event.all_day);
        assert_eq!(event.color(), "#0d6efd");
    }

    #[test]
    fn patient_filter_keeps_case_insensitive_matches() {
        let events = project(&sample(), "an", "");

        // "Ana" and "Carla Anes" both contain "an" case-insensitively.
        let ids: Vec<&str> = events.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "3"]);
    }

    #[test]
    fn non_matching_filter_gives_empty_projection() {
        let events = project(&sample(), "xyz", "");
        assert!(events.is_empty());
    }

    #[test]
    fn professional_filter_combines_with_patient_filter() {
        let events = project(&sample(), "an", "silva");
        assert_eq!(events.len(), 2);

        let events = project(&sample(), "bruno", "silva");
        assert!(events.is_empty());
    }

    #[test]
    fn cancelled_appointment_gets_danger_color() {
        let events = project(&sample(), "carla", "");

        assert_eq!(events.len(), 1);
        assert_eq!(events[0].category, crate::clinic::EventCategory::Danger);
        assert_eq!(events[0].color(), "#dc3545");
    }

    #[test]
    fn projection_is_idempotent() {
        let records = sample();
        let first = project(&records, "a", "dr");
        let second = project(&records, "a", "dr");
        assert_eq!(first, second);
    }

    #[test]
    fn malformed_date_drops_only_that_record() {
        let records = vec![
            record(1, "Ana", "Dr. Silva", "not-a-date", STATUS_SCHEDULED),
            record(2, "Bruno", "Dra. Costa", "2024-05-01T10:00:00Z", STATUS_SCHEDULED),
        ];

        let events = project(&records, "", "");

        assert_eq!(events.len(), 1);
        assert_eq!(events[0].id, "2");
    }

    #[test]
    fn offsetless_timestamps_are_taken_as_utc() {
        let start = parse_scheduled_at("2024-05-01T09:00:00").unwrap();
        assert_eq!(start, Utc.with_ymd_and_hms(2024, 5, 1, 9, 0, 0).unwrap());

        let with_millis = parse_scheduled_at("2024-05-01T09:00:00.000").unwrap();
        assert_eq!(with_millis, start);
    }

    #[test]
    fn filters_do_not_consider_status() {
        let mut records = sample();
        for r in &mut records {
            r.status = "Cancelado".to_string();
        }

        let events = project(&records, "", "");
        assert_eq!(events.len(), records.len());
    }
}
