use crossterm::event::KeyCode;

use crate::app::{AppState, Mode};

/// Incremental filter entry. Every keystroke re-projects against the list
/// already in memory; leaving the mode never triggers a fetch.
pub fn handle_key(key: KeyCode, state: &mut AppState) {
    match key {
        KeyCode::Esc | KeyCode::Enter => {
            state.mode = Mode::Normal;
        }
        KeyCode::Backspace => {
            state.pop_filter_char();
        }
        KeyCode::Char(c) => {
            state.push_filter_char(c);
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clinic::Appointment;

    fn state_with_appointments() -> AppState {
        let mut state = AppState::new();
        state.set_appointments(vec![
            Appointment {
                id: 1,
                patient_name: "Ana".to_string(),
                professional_name: "Dr. Silva".to_string(),
                scheduled_at: "2024-05-01T09:00:00Z".to_string(),
                status: "Agendado".to_string(),
            },
            Appointment {
                id: 2,
                patient_name: "Bruno".to_string(),
                professional_name: "Dra. Costa".to_string(),
                scheduled_at: "2024-05-01T10:00:00Z".to_string(),
                status: "Agendado".to_string(),
            },
        ]);
        state
    }

    #[test]
    fn typing_narrows_projection_immediately() {
        let mut state = state_with_appointments();
        state.mode = Mode::FilterPatient;

        handle_key(KeyCode::Char('b'), &mut state);

        assert_eq!(state.patient_filter(), "b");
        assert_eq!(state.events.len(), 1);
        assert_eq!(state.events[0].id, "2");
    }

    #[test]
    fn backspace_widens_projection() {
        let mut state = state_with_appointments();
        state.mode = Mode::FilterPatient;
        handle_key(KeyCode::Char('b'), &mut state);

        handle_key(KeyCode::Backspace, &mut state);

        assert_eq!(state.patient_filter(), "");
        assert_eq!(state.events.len(), 2);
    }

    #[test]
    fn enter_returns_to_normal_mode_keeping_filter() {
        let mut state = state_with_appointments();
        state.mode = Mode::FilterProfessional;
        handle_key(KeyCode::Char('c'), &mut state);

        handle_key(KeyCode::Enter, &mut state);

        assert_eq!(state.mode, Mode::Normal);
        assert_eq!(state.professional_filter(), "c");
        assert_eq!(state.events.len(), 1);
    }

    #[test]
    fn esc_returns_to_normal_mode() {
        let mut state = state_with_appointments();
        state.mode = Mode::FilterPatient;

        handle_key(KeyCode::Esc, &mut state);

        assert_eq!(state.mode, Mode::Normal);
    }
}
