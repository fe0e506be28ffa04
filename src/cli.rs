use std::{
    env,
    io::{self, Write},
    process::{Command, Stdio},
};

use chrono::{Local, NaiveDate};

use odonto_agenda::{
    api::{ClinicApi, ClinicClient, SessionStore},
    clinic::{CalendarEvent, project},
    storage::config::Config,
};

#[derive(Clone)]
pub enum CliMode {
    Tui,
    AgendaDate {
        date: NaiveDate,
        patient_filter: String,
        professional_filter: String,
    },
}

pub fn parse_cli_mode() -> Result<CliMode, String> {
    let mut agenda_date = None;
    let mut patient_filter = String::new();
    let mut professional_filter = String::new();
    let mut args = env::args().skip(1).peekable();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--agenda" => {
                let target_date = if let Some(next) = args.peek() {
                    if !next.starts_with("--") {
                        let date_str = args.next().ok_or("peeked value must exist")?;
                        NaiveDate::parse_from_str(&date_str, "%Y/%m/%d")
                            .map_err(|_| format!("Invalid date '{}'. Use YYYY/MM/DD.", date_str))?
                    } else {
                        Local::now().date_naive()
                    }
                } else {
                    Local::now().date_naive()
                };
                agenda_date = Some(target_date);
            }
            "--paciente" => {
                patient_filter = args
                    .next()
                    .ok_or("--paciente requires a search term".to_string())?;
            }
            "--profissional" => {
                professional_filter = args
                    .next()
                    .ok_or("--profissional requires a search term".to_string())?;
            }
            "--help" => {
                println!(
                    "Usage: odonto-agenda [--agenda [YYYY/MM/DD]] [--paciente TERM] [--profissional TERM]"
                );
                std::process::exit(0);
            }
            _ => return Err(format!("Unknown argument: {}", arg)),
        }
    }

    if let Some(date) = agenda_date {
        Ok(CliMode::AgendaDate {
            date,
            patient_filter,
            professional_filter,
        })
    } else {
        Ok(CliMode::Tui)
    }
}

pub async fn run_agenda_mode(
    date: NaiveDate,
    patient_filter: &str,
    professional_filter: &str,
) -> Result<(), io::Error> {
    let config = Config::load_or_create()
        .map_err(|e| io::Error::other(e.to_string()))?;
    let session = SessionStore::new(config.api.token_cache.clone());
    let client = ClinicClient::new(config.api.base_url.clone(), session);

    let appointments = match client.fetch_appointments().await {
        Ok(list) => list,
        Err(e) => {
            eprintln!("Falha ao carregar consultas: {}", e);
            Vec::new()
        }
    };

    let mut events: Vec<CalendarEvent> = project(&appointments, patient_filter, professional_filter)
        .into_iter()
        .filter(|event| event.start.date_naive() == date)
        .collect();
    events.sort_by_key(|event| event.start);

    let agenda = format_agenda_text(date, &events);
    display_with_pager(&agenda)
}

fn format_agenda_text(date: NaiveDate, events: &[CalendarEvent]) -> String {
    let mut lines = Vec::new();
    lines.push(format!("Agenda – {}", date.format("%d/%m/%Y")));
    lines.push(String::new());

    if events.is_empty() {
        lines.push("Nenhuma consulta agendada.".to_string());
    } else {
        for event in events {
            lines.push(format!("- {}", build_agenda_line(event)));
        }
    }

    lines.join("\n")
}

fn build_agenda_line(event: &CalendarEvent) -> String {
    format!(
        "{}-{}  {}",
        event.start.format("%H:%M"),
        event.end.format("%H:%M"),
        event.title
    )
}

fn display_with_pager(text: &str) -> Result<(), io::Error> {
    let pager_value = env::var("PAGER").unwrap_or_else(|_| "less".to_string());
    let mut parts = pager_value.split_whitespace();
    let cmd = match parts.next() {
        Some(c) => c,
        None => {
            print!("{text}");
            return Ok(());
        }
    };
    let args: Vec<&str> = parts.collect();

    match Command::new(cmd)
        .args(&args)
        .stdin(Stdio::piped())
        .spawn()
    {
        Ok(mut child) => {
            if let Some(stdin) = child.stdin.as_mut() {
                stdin.write_all(text.as_bytes())?;
            }
            let _ = child.wait();
        }
        Err(_) => {
            print!("{text}");
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use odonto_agenda::clinic::EventCategory;
    use pretty_assertions::assert_eq;

    fn event(title: &str, hour: u32) -> CalendarEvent {
        let start = Utc.with_ymd_and_hms(2026, 8, 25, hour, 0, 0).unwrap();
        CalendarEvent {
            id: "1".to_string(),
            title: title.to_string(),
            start,
            end: start + chrono::Duration::minutes(30),
            all_day: false,
            category: EventCategory::Primary,
        }
    }

    #[test]
    fn agenda_line_shows_time_range_and_title() {
        let line = build_agenda_line(&event("Ana - Dr. Silva", 9));
        assert_eq!(line, "09:00-09:30  Ana - Dr. Silva");
    }

    #[test]
    fn agenda_text_for_empty_day() {
        let date = NaiveDate::from_ymd_opt(2026, 8, 25).unwrap();
        let text = format_agenda_text(date, &[]);
        assert!(text.contains("Agenda – 25/08/2026"));
        assert!(text.contains("Nenhuma consulta agendada."));
    }

    #[test]
    fn agenda_text_lists_each_event() {
        let date = NaiveDate::from_ymd_opt(2026, 8, 25).unwrap();
        let events = vec![event("Ana - Dr. Silva", 9), event("Bruno - Dra. Costa", 14)];
        let text = format_agenda_text(date, &events);
        assert!(text.contains("- 09:00-09:30  Ana - Dr. Silva"));
        assert!(text.contains("- 14:00-14:30  Bruno - Dra. Costa"));
    }
}
