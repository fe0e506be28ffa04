use serde::{Deserialize, Serialize};

/// Status labels used by the OdontoSys backend. The backend stores these as
/// free-form Portuguese strings, so unknown values must be tolerated.
pub const STATUS_SCHEDULED: &str = "Agendado";
pub const STATUS_CONFIRMED: &str = "Confirmado";
pub const STATUS_COMPLETED: &str = "Concluído";
pub const STATUS_CANCELLED: &str = "Cancelado";

pub const STATUS_LABELS: [&str; 4] = [
    STATUS_SCHEDULED,
    STATUS_CONFIRMED,
    STATUS_COMPLETED,
    STATUS_CANCELLED,
];

/// One appointment as returned by `GET /consultas/vwcompleta`.
///
/// `scheduled_at` is kept as the raw ISO-8601 string from the backend; it is
/// parsed during projection so that one malformed record cannot poison the
/// rest of the list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Appointment {
    pub id: i64,
    pub patient_name: String,
    pub professional_name: String,
    pub scheduled_at: String,
    pub status: String,
}

impl Appointment {
    pub fn matches_filters(&self, patient_filter: &str, professional_filter: &str) -> bool {
        let patient_ok = patient_filter.is_empty()
            || self
                .patient_name
                .to_lowercase()
                .contains(&patient_filter.to_lowercase());
        let professional_ok = professional_filter.is_empty()
            || self
                .professional_name
                .to_lowercase()
                .contains(&professional_filter.to_lowercase());
        patient_ok && professional_ok
    }
}

/// Display category derived from the status label. Matching is exact and
/// case-sensitive; anything the table does not know falls back to `Primary`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EventCategory {
    Danger,
    Success,
    Warning,
    Primary,
}

impl EventCategory {
    pub fn from_status(status: &str) -> Self {
        match status {
            STATUS_CANCELLED => EventCategory::Danger,
            STATUS_COMPLETED => EventCategory::Success,
            STATUS_CONFIRMED => EventCategory::Warning,
            _ => EventCategory::Primary,
        }
    }

    /// Hex color used for this category across every rendering surface.
    pub fn color(&self) -> &'static str {
        match self {
            EventCategory::Danger => "#dc3545",
            EventCategory::Success => "#198754",
            EventCategory::Warning => "#ffc107",
            EventCategory::Primary => "#0d6efd",
        }
    }
}
