use chrono::{Local, NaiveDate};

use crate::clinic::{Appointment, CalendarEvent, STATUS_LABELS, project};
use crate::ui::theme::Theme;

#[derive(Debug, Clone, PartialEq)]
pub enum Mode {
    Normal,
    FilterPatient,
    FilterProfessional,
    Form,
    Command,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ViewType {
    Month,
    Day,
}

#[derive(Debug, Clone, PartialEq)]
pub enum FetchStatus {
    Idle,
    Loading,
    Loaded,
    Error(String),
}

pub struct AppState {
    pub mode: Mode,
    pub view: ViewType,
    pub selected_date: NaiveDate,
    appointments: Vec<Appointment>,
    patient_filter: String,
    professional_filter: String,
    /// Derived event list; always `project(appointments, filters)`.
    pub events: Vec<CalendarEvent>,
    pub fetch_status: FetchStatus,
    pub command_buffer: String,
    pub show_help: bool,
    pub help_scroll: usize,
    pub theme: Theme,
    pub date_format: String,
    pub appointment_form: Option<AppointmentForm>,
    pub selected_event_index: usize,
    pub delete_confirmation_id: Option<i64>,
}

impl AppState {
    pub fn new() -> Self {
        Self {
            mode: Mode::Normal,
            view: ViewType::Month,
            selected_date: Local::now().date_naive(),
            appointments: Vec::new(),
            patient_filter: String::new(),
            professional_filter: String::new(),
            events: Vec::new(),
            fetch_status: FetchStatus::Idle,
            command_buffer: String::new(),
            show_help: false,
            help_scroll: 0,
            theme: Theme::default(),
            date_format: "%d/%m/%Y".to_string(),
            appointment_form: None,
            selected_event_index: 0,
            delete_confirmation_id: None,
        }
    }

    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    pub fn with_date_format(mut self, format: String) -> Self {
        self.date_format = format;
        self
    }

    /// Replaces the full appointment list wholesale and recomputes the
    /// projection. The list is never patched in place.
    pub fn set_appointments(&mut self, appointments: Vec<Appointment>) {
        self.appointments = appointments;
        self.refresh_events();
    }

    pub fn appointments(&self) -> &[Appointment] {
        &self.appointments
    }

    pub fn patient_filter(&self) -> &str {
        &self.patient_filter
    }

    pub fn professional_filter(&self) -> &str {
        &self.professional_filter
    }

    pub fn set_patient_filter(&mut self, filter: String) {
        self.patient_filter = filter;
        self.refresh_events();
    }

    pub fn set_professional_filter(&mut self, filter: String) {
        self.professional_filter = filter;
        self.refresh_events();
    }

    pub fn clear_filters(&mut self) {
        self.patient_filter.clear();
        self.professional_filter.clear();
        self.refresh_events();
    }

    /// Appends to whichever filter the current mode is editing.
    pub fn push_filter_char(&mut self, c: char) {
        match self.mode {
            Mode::FilterPatient => self.patient_filter.push(c),
            Mode::FilterProfessional => self.professional_filter.push(c),
            _ => return,
        }
        self.refresh_events();
    }

    pub fn pop_filter_char(&mut self) {
        match self.mode {
            Mode::FilterPatient => {
                self.patient_filter.pop();
            }
            Mode::FilterProfessional => {
                self.professional_filter.pop();
            }
            _ => return,
        }
        self.refresh_events();
    }

    /// Recomputes the derived event list from the held appointments and the
    /// active filters. Synchronous; never touches the network.
    pub fn refresh_events(&mut self) {
        self.events = project(
            &self.appointments,
            &self.patient_filter,
            &self.professional_filter,
        );
        let event_count = self.events.len();
        if self.selected_event_index >= event_count {
            self.selected_event_index = event_count.saturating_sub(1);
        }
    }

    pub fn events_for_date(&self, date: NaiveDate) -> Vec<&CalendarEvent> {
        let mut events: Vec<&CalendarEvent> = self
            .events
            .iter()
            .filter(|event| event.start.date_naive() == date)
            .collect();
        events.sort_by_key(|e| e.start);
        events
    }

    pub fn get_selected_event(&self) -> Option<&CalendarEvent> {
        let events = self.events_for_date(self.selected_date);
        events.get(self.selected_event_index).copied()
    }

    pub fn move_event_selection_down(&mut self) {
        let event_count = self.events_for_date(self.selected_date).len();
        if event_count > 0 && self.selected_event_index < event_count - 1 {
            self.selected_event_index += 1;
        }
    }

    pub fn move_event_selection_up(&mut self) {
        if self.selected_event_index > 0 {
            self.selected_event_index -= 1;
        }
    }

    pub fn reset_event_selection(&mut self) {
        self.selected_event_index = 0;
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum FormField {
    PatientId,
    ProfessionalId,
    StartTime,
    Status,
    Notes,
}

/// Editable state of the new/edit appointment dialog.
#[derive(Debug, Clone)]
pub struct AppointmentForm {
    pub patient_id_input: String,
    pub professional_id_input: String,
    pub date: NaiveDate,
    pub start_hour: u32,
    pub start_minute: u32,
    pub time_input_buffer: String,
    pub time_buffer_touched: bool,
    pub status_index: usize,
    pub notes: String,
    pub active_field: FormField,
    pub appointment_id: Option<i64>,
    pub error: Option<String>,
}

impl AppointmentForm {
    pub fn new(date: NaiveDate) -> Self {
        Self {
            patient_id_input: String::new(),
            professional_id_input: String::new(),
            date,
            start_hour: 9,
            start_minute: 0,
            time_input_buffer: "09:00".to_string(),
            time_buffer_touched: false,
            status_index: 0,
            notes: String::new(),
            active_field: FormField::PatientId,
            appointment_id: None,
            error: None,
        }
    }

    /// Prefills date, time and status for editing an existing appointment.
    /// The view row does not carry patient/professional ids, so those stay
    /// blank and must be re-entered.
    pub fn for_appointment(appointment: &Appointment) -> Self {
        let mut form = match crate::clinic::projection::parse_scheduled_at(&appointment.scheduled_at)
        {
            Some(start) => {
                use chrono::Timelike;
                let mut form = Self::new(start.date_naive());
                form.start_hour = start.hour();
                form.start_minute = start.minute();
                form.time_input_buffer = format!("{:02}:{:02}", start.hour(), start.minute());
                form
            }
            None => Self::new(Local::now().date_naive()),
        };
        form.status_index = STATUS_LABELS
            .iter()
            .position(|label| *label == appointment.status)
            .unwrap_or(0);
        form.appointment_id = Some(appointment.id);
        form
    }

    pub fn is_editing(&self) -> bool {
        self.appointment_id.is_some()
    }

    pub fn status_label(&self) -> &'static str {
        STATUS_LABELS[self.status_index % STATUS_LABELS.len()]
    }

    pub fn cycle_status(&mut self) {
        self.status_index = (self.status_index + 1) % STATUS_LABELS.len();
    }

    pub fn next_field(&mut self) {
        self.active_field = match self.active_field {
            FormField::PatientId => FormField::ProfessionalId,
            FormField::ProfessionalId => FormField::StartTime,
            FormField::StartTime => FormField::Status,
            FormField::Status => FormField::Notes,
            FormField::Notes => FormField::PatientId,
        };
    }

    pub fn prev_field(&mut self) {
        self.active_field = match self.active_field {
            FormField::PatientId => FormField::Notes,
            FormField::ProfessionalId => FormField::PatientId,
            FormField::StartTime => FormField::ProfessionalId,
            FormField::Status => FormField::StartTime,
            FormField::Notes => FormField::Status,
        };
    }

    pub fn parse_time_input(&mut self) {
        let input = self.time_input_buffer.replace(':', "");
        if let Ok(num) = input.parse::<u32>() {
            if input.len() == 3 || input.len() == 4 {
                self.start_hour = (num / 100).min(23);
                self.start_minute = (num % 100).min(59);
            } else if input.len() <= 2 {
                self.start_hour = num.min(23);
                self.start_minute = 0;
            }
            self.time_input_buffer = format!("{:02}:{:02}", self.start_hour, self.start_minute);
        }
    }

    /// Validates the form and builds the backend payload. The scheduled
    /// instant is sent as UTC, matching what the backend stores.
    pub fn to_payload(&mut self) -> Result<crate::api::NewAppointment, String> {
        self.parse_time_input();

        let patient_id: i64 = self
            .patient_id_input
            .parse()
            .map_err(|_| "Informe o ID do paciente".to_string())?;
        let professional_id: i64 = self
            .professional_id_input
            .parse()
            .map_err(|_| "Informe o ID do profissional".to_string())?;

        let scheduled_at = format!(
            "{}T{:02}:{:02}:00.000Z",
            self.date.format("%Y-%m-%d"),
            self.start_hour,
            self.start_minute
        );

        Ok(crate::api::NewAppointment {
            patient_id,
            professional_id,
            scheduled_at,
            status: self.status_label().to_string(),
            notes: self.notes.clone(),
        })
    }
}
