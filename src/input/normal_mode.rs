use chrono::{Datelike, Days, NaiveDate};
use crossterm::event::KeyCode;

use crate::app::{AppState, AppointmentForm, Mode, ViewType};

pub fn handle_key(key: KeyCode, state: &mut AppState) {
    match key {
        KeyCode::Char('h') => move_previous_day(state),
        KeyCode::Char('j') => {
            if state.view == ViewType::Day || has_events_on_selected_date(state) {
                state.move_event_selection_down();
            } else {
                move_down_week(state);
            }
        }
        KeyCode::Char('k') => {
            if state.view == ViewType::Day || has_events_on_selected_date(state) {
                state.move_event_selection_up();
            } else {
                move_up_week(state);
            }
        }
        KeyCode::Char('l') => move_next_day(state),
        KeyCode::Char('t') => jump_to_today(state),
        KeyCode::Char('m') => switch_to_month_view(state),
        KeyCode::Char('d') => switch_to_day_view(state),
        KeyCode::Char('a') => open_new_appointment_form(state),
        KeyCode::Char('E') => open_edit_form(state),
        KeyCode::Char('x') => confirm_delete_selected(state),
        KeyCode::Char('p') => enter_patient_filter(state),
        KeyCode::Char('f') => enter_professional_filter(state),
        KeyCode::Char('c') => state.clear_filters(),
        KeyCode::Enter => handle_enter_key(state),
        KeyCode::Char(':') => enter_command_mode(state),
        KeyCode::Char('?') => show_help(state),
        KeyCode::Char('g') => move_to_start_of_month(state),
        KeyCode::Char('G') => move_to_end_of_month(state),
        KeyCode::Char('{') => move_previous_month(state),
        KeyCode::Char('}') => move_next_month(state),
        _ => {}
    }
}

fn has_events_on_selected_date(state: &AppState) -> bool {
    !state.events_for_date(state.selected_date).is_empty()
}

fn move_previous_day(state: &mut AppState) {
    if let Some(new_date) = state.selected_date.checked_sub_days(Days::new(1)) {
        state.selected_date = new_date;
        state.reset_event_selection();
    }
}

fn move_next_day(state: &mut AppState) {
    if let Some(new_date) = state.selected_date.checked_add_days(Days::new(1)) {
        state.selected_date = new_date;
        state.reset_event_selection();
    }
}

fn move_down_week(state: &mut AppState) {
    if let Some(new_date) = state.selected_date.checked_add_days(Days::new(7)) {
        state.selected_date = new_date;
    }
}

fn move_up_week(state: &mut AppState) {
    if let Some(new_date) = state.selected_date.checked_sub_days(Days::new(7)) {
        state.selected_date = new_date;
    }
}

fn jump_to_today(state: &mut AppState) {
    state.selected_date = chrono::Local::now().date_naive();
    state.reset_event_selection();
}

fn switch_to_month_view(state: &mut AppState) {
    state.view = ViewType::Month;
}

fn switch_to_day_view(state: &mut AppState) {
    state.view = ViewType::Day;
}

fn open_new_appointment_form(state: &mut AppState) {
    state.appointment_form = Some(AppointmentForm::new(state.selected_date));
    state.mode = Mode::Form;
}

fn open_edit_form(state: &mut AppState) {
    let Some(event) = state.get_selected_event() else {
        return;
    };
    let Ok(id) = event.id.parse::<i64>() else {
        return;
    };
    if let Some(appointment) = state.appointments().iter().find(|a| a.id == id) {
        state.appointment_form = Some(AppointmentForm::for_appointment(appointment));
        state.mode = Mode::Form;
    }
}

fn confirm_delete_selected(state: &mut AppState) {
    if let Some(event) = state.get_selected_event()
        && let Ok(id) = event.id.parse::<i64>()
    {
        state.delete_confirmation_id = Some(id);
    }
}

fn enter_patient_filter(state: &mut AppState) {
    state.mode = Mode::FilterPatient;
}

fn enter_professional_filter(state: &mut AppState) {
    state.mode = Mode::FilterProfessional;
}

fn handle_enter_key(state: &mut AppState) {
    match state.view {
        ViewType::Month => {
            state.view = ViewType::Day;
        }
        ViewType::Day => {
            if state.get_selected_event().is_some() {
                open_edit_form(state);
            }
        }
    }
}

fn enter_command_mode(state: &mut AppState) {
    state.mode = Mode::Command;
    state.command_buffer = ":".to_string();
}

fn show_help(state: &mut AppState) {
    state.show_help = true;
}

fn move_to_start_of_month(state: &mut AppState) {
    let year = state.selected_date.year();
    let month = state.selected_date.month();
    if let Some(first) = NaiveDate::from_ymd_opt(year, month, 1) {
        state.selected_date = first;
    }
}

fn move_to_end_of_month(state: &mut AppState) {
    let year = state.selected_date.year();
    let month = state.selected_date.month();

    let next_month_first = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)
    };

    if let Some(first) = next_month_first
        && let Some(last_day) = first.checked_sub_days(Days::new(1))
    {
        state.selected_date = last_day;
    }
}

fn move_previous_month(state: &mut AppState) {
    let year = state.selected_date.year();
    let month = state.selected_date.month();
    let day = state.selected_date.day();

    let (new_year, new_month) = if month == 1 {
        (year - 1, 12)
    } else {
        (year, month - 1)
    };

    shift_to_month(state, new_year, new_month, day);
}

fn move_next_month(state: &mut AppState) {
    let year = state.selected_date.year();
    let month = state.selected_date.month();
    let day = state.selected_date.day();

    let (new_year, new_month) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };

    shift_to_month(state, new_year, new_month, day);
}

fn shift_to_month(state: &mut AppState, year: i32, month: u32, day: u32) {
    let next_month_first = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)
    };

    let Some(first) = next_month_first else { return };
    let Some(last) = first.checked_sub_days(Days::new(1)) else { return };

    let new_day = day.min(last.day());
    if let Some(new_date) = NaiveDate::from_ymd_opt(year, month, new_day) {
        state.selected_date = new_date;
    }
}
