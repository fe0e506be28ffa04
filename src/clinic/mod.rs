pub mod appointment;
pub mod projection;

pub use appointment::{Appointment, EventCategory, STATUS_LABELS};
pub use projection::{CalendarEvent, EVENT_SPAN_MINUTES, project};
