pub mod api;
pub mod app;
pub mod clinic;
pub mod input;
pub mod storage;
pub mod ui;

pub use app::{AppState, FetchStatus, Mode, ViewType};
pub use clinic::{Appointment, CalendarEvent, EventCategory, project};
