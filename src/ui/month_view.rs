use chrono::{Datelike, NaiveDate, Weekday};

use crate::app::AppState;

/// Grid model for the month view. Weeks run Sunday through Saturday, the
/// convention the clinic's paper agenda uses.
#[derive(Debug, Clone, PartialEq)]
pub struct MonthLayout {
    pub year: i32,
    pub month: u32,
    pub weeks: Vec<Week>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Week {
    pub days: Vec<DayCell>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DayCell {
    pub date: Option<NaiveDate>,
    pub is_selected: bool,
    pub is_today: bool,
    pub event_count: usize,
    pub is_current_month: bool,
}

impl DayCell {
    pub fn new(date: Option<NaiveDate>) -> Self {
        Self {
            date,
            is_selected: false,
            is_today: false,
            event_count: 0,
            is_current_month: true,
        }
    }

    pub fn with_selected(mut self, selected: bool) -> Self {
        self.is_selected = selected;
        self
    }

    pub fn with_today(mut self, today: bool) -> Self {
        self.is_today = today;
        self
    }

    pub fn with_event_count(mut self, count: usize) -> Self {
        self.event_count = count;
        self
    }

    pub fn with_current_month(mut self, current_month: bool) -> Self {
        self.is_current_month = current_month;
        self
    }
}

pub fn calculate_layout(state: &AppState) -> MonthLayout {
    let year = state.selected_date.year();
    let month = state.selected_date.month();
    let today = chrono::Local::now().date_naive();

    let Some(first_day) = NaiveDate::from_ymd_opt(year, month, 1) else {
        return MonthLayout { year, month, weeks: Vec::new() };
    };

    let next_month_first = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)
    };

    let Some(last_day) = next_month_first.and_then(|d| d.pred_opt()) else {
        return MonthLayout { year, month, weeks: Vec::new() };
    };

    let mut weeks = Vec::new();
    let mut current_week = Week { days: Vec::new() };

    let start_weekday = first_day.weekday();
    let days_before = start_weekday.num_days_from_sunday() as i64;

    for i in 0..days_before {
        let prev_date = first_day.pred_opt()
            .and_then(|d| d.checked_sub_days(chrono::Days::new((days_before - i - 1) as u64)));

        current_week.days.push(
            DayCell::new(prev_date)
                .with_current_month(false)
        );
    }

    let mut current_date = first_day;
    while current_date <= last_day {
        let event_count = state.events_for_date(current_date).len();

        let cell = DayCell::new(Some(current_date))
            .with_selected(current_date == state.selected_date)
            .with_today(current_date == today)
            .with_event_count(event_count)
            .with_current_month(true);

        current_week.days.push(cell);

        if current_date.weekday() == Weekday::Sat {
            weeks.push(current_week);
            current_week = Week { days: Vec::new() };
        }

        let Some(next) = current_date.succ_opt() else { break };
        current_date = next;
    }

    if !current_week.days.is_empty() {
        while current_week.days.len() < 7 {
            let next_date = current_date;
            current_week.days.push(
                DayCell::new(Some(next_date))
                    .with_current_month(false)
            );
            let Some(next) = current_date.succ_opt() else { break };
            current_date = next;
        }
        weeks.push(current_week);
    }

    MonthLayout { year, month, weeks }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clinic::Appointment;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    fn appointment_on(id: i64, when: &str) -> Appointment {
        Appointment {
            id,
            patient_name: "Ana".to_string(),
            professional_name: "Dr. Silva".to_string(),
            scheduled_at: when.to_string(),
            status: "Agendado".to_string(),
        }
    }

    #[test]
    fn month_layout_has_correct_year_and_month() {
        let mut state = AppState::new();
        state.selected_date = date(2024, 5, 15);

        let layout = calculate_layout(&state);

        assert_eq!(layout.year, 2024);
        assert_eq!(layout.month, 5);
    }

    #[test]
    fn each_week_has_seven_days() {
        let mut state = AppState::new();
        state.selected_date = date(2024, 5, 15);

        let layout = calculate_layout(&state);

        assert!(!layout.weeks.is_empty());
        for week in &layout.weeks {
            assert_eq!(week.days.len(), 7);
        }
    }

    #[test]
    fn weeks_start_on_sunday() {
        let mut state = AppState::new();
        // May 2024 starts on a Wednesday, so the first week has three
        // leading out-of-month cells (Sun, Mon, Tue).
        state.selected_date = date(2024, 5, 15);

        let layout = calculate_layout(&state);

        let first_week = &layout.weeks[0];
        let leading: Vec<_> = first_week.days.iter()
            .take_while(|c| !c.is_current_month)
            .collect();
        assert_eq!(leading.len(), 3);
        assert_eq!(first_week.days[3].date, Some(date(2024, 5, 1)));
    }

    #[test]
    fn selected_date_is_marked_once() {
        let mut state = AppState::new();
        state.selected_date = date(2024, 5, 15);

        let layout = calculate_layout(&state);

        let selected_cells: Vec<_> = layout.weeks.iter()
            .flat_map(|w| &w.days)
            .filter(|c| c.is_selected)
            .collect();

        assert_eq!(selected_cells.len(), 1);
        assert_eq!(selected_cells[0].date, Some(date(2024, 5, 15)));
    }

    #[test]
    fn cells_carry_projected_event_counts() {
        let mut state = AppState::new();
        state.selected_date = date(2024, 5, 15);
        state.set_appointments(vec![
            appointment_on(1, "2024-05-10T09:00:00Z"),
            appointment_on(2, "2024-05-10T10:00:00Z"),
        ]);

        let layout = calculate_layout(&state);

        let cell = layout.weeks.iter()
            .flat_map(|w| &w.days)
            .find(|c| c.date == Some(date(2024, 5, 10)))
            .unwrap();
        assert_eq!(cell.event_count, 2);
    }

    #[test]
    fn filtered_out_appointments_leave_no_marker() {
        let mut state = AppState::new();
        state.selected_date = date(2024, 5, 15);
        state.set_appointments(vec![appointment_on(1, "2024-05-10T09:00:00Z")]);
        state.set_patient_filter("xyz".to_string());

        let layout = calculate_layout(&state);

        let cell = layout.weeks.iter()
            .flat_map(|w| &w.days)
            .find(|c| c.date == Some(date(2024, 5, 10)))
            .unwrap();
        assert_eq!(cell.event_count, 0);
    }
}
