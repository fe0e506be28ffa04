use crossterm::event::KeyCode;

use crate::app::{AppState, FormField};

/// Field editing for the appointment form. Enter (submit) and Esc (cancel)
/// are handled by the event loop, which owns the API client.
pub fn handle_key(key: KeyCode, state: &mut AppState) {
    let Some(form) = state.appointment_form.as_mut() else {
        return;
    };

    match key {
        KeyCode::Tab => {
            if form.active_field == FormField::StartTime {
                form.parse_time_input();
            }
            form.next_field();
        }
        KeyCode::BackTab => {
            if form.active_field == FormField::StartTime {
                form.parse_time_input();
            }
            form.prev_field();
        }
        KeyCode::Backspace => match form.active_field {
            FormField::PatientId => {
                form.patient_id_input.pop();
            }
            FormField::ProfessionalId => {
                form.professional_id_input.pop();
            }
            FormField::StartTime => {
                form.time_input_buffer.pop();
                form.time_buffer_touched = true;
            }
            FormField::Status => {}
            FormField::Notes => {
                form.notes.pop();
            }
        },
        KeyCode::Char(' ') if form.active_field == FormField::Status => {
            form.cycle_status();
        }
        KeyCode::Char(c) => match form.active_field {
            FormField::PatientId => {
                if c.is_ascii_digit() {
                    form.patient_id_input.push(c);
                }
            }
            FormField::ProfessionalId => {
                if c.is_ascii_digit() {
                    form.professional_id_input.push(c);
                }
            }
            FormField::StartTime => {
                if c.is_ascii_digit() || c == ':' {
                    if !form.time_buffer_touched {
                        form.time_input_buffer.clear();
                        form.time_buffer_touched = true;
                    }
                    if form.time_input_buffer.len() < 5 {
                        form.time_input_buffer.push(c);
                    }
                }
            }
            FormField::Status => {}
            FormField::Notes => {
                form.notes.push(c);
            }
        },
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::AppointmentForm;
    use chrono::NaiveDate;

    fn setup_state_with_form() -> AppState {
        let mut state = AppState::new();
        state.appointment_form = Some(AppointmentForm::new(
            NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
        ));
        state
    }

    #[test]
    fn tab_cycles_through_fields() {
        let mut state = setup_state_with_form();
        assert_eq!(
            state.appointment_form.as_ref().unwrap().active_field,
            FormField::PatientId
        );

        handle_key(KeyCode::Tab, &mut state);
        assert_eq!(
            state.appointment_form.as_ref().unwrap().active_field,
            FormField::ProfessionalId
        );

        handle_key(KeyCode::BackTab, &mut state);
        assert_eq!(
            state.appointment_form.as_ref().unwrap().active_field,
            FormField::PatientId
        );
    }

    #[test]
    fn patient_id_accepts_only_digits() {
        let mut state = setup_state_with_form();

        handle_key(KeyCode::Char('1'), &mut state);
        handle_key(KeyCode::Char('a'), &mut state);
        handle_key(KeyCode::Char('2'), &mut state);

        assert_eq!(state.appointment_form.as_ref().unwrap().patient_id_input, "12");
    }

    #[test]
    fn space_cycles_status_when_status_field_active() {
        let mut state = setup_state_with_form();
        state.appointment_form.as_mut().unwrap().active_field = FormField::Status;

        handle_key(KeyCode::Char(' '), &mut state);

        assert_eq!(
            state.appointment_form.as_ref().unwrap().status_label(),
            "Confirmado"
        );
    }

    #[test]
    fn first_digit_replaces_default_time_buffer() {
        let mut state = setup_state_with_form();
        state.appointment_form.as_mut().unwrap().active_field = FormField::StartTime;

        handle_key(KeyCode::Char('1'), &mut state);
        handle_key(KeyCode::Char('4'), &mut state);
        handle_key(KeyCode::Char('3'), &mut state);
        handle_key(KeyCode::Char('0'), &mut state);

        assert_eq!(
            state.appointment_form.as_ref().unwrap().time_input_buffer,
            "1430"
        );
    }

    #[test]
    fn notes_accept_free_text() {
        let mut state = setup_state_with_form();
        state.appointment_form.as_mut().unwrap().active_field = FormField::Notes;

        for c in "retorno".chars() {
            handle_key(KeyCode::Char(c), &mut state);
        }

        assert_eq!(state.appointment_form.as_ref().unwrap().notes, "retorno");
    }
}
