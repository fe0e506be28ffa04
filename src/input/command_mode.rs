use chrono::NaiveDate;

#[derive(Debug, PartialEq)]
pub enum Command {
    Quit,
    Reload,
    Goto(NaiveDate),
    FilterPatient(String),
    FilterProfessional(String),
    ClearFilters,
    Theme(String),
    Help,
    Error(String),
}

pub fn parse_command(input: &str) -> Command {
    let trimmed = input.trim();

    if !trimmed.starts_with(':') {
        return Command::Error("Commands must start with ':'".to_string());
    }

    let command_text = &trimmed[1..];
    let parts: Vec<&str> = command_text.split_whitespace().collect();

    if parts.is_empty() {
        return Command::Error("Empty command".to_string());
    }

    match parts[0] {
        "q" | "quit" => Command::Quit,
        "r" | "reload" => Command::Reload,
        "help" => Command::Help,
        "goto" => {
            if parts.len() < 2 {
                Command::Error("goto requires a date argument".to_string())
            } else if let Ok(date) = NaiveDate::parse_from_str(parts[1], "%Y-%m-%d") {
                Command::Goto(date)
            } else {
                Command::Error(format!("Invalid date format: {}", parts[1]))
            }
        }
        "paciente" => Command::FilterPatient(parts[1..].join(" ")),
        "profissional" => Command::FilterProfessional(parts[1..].join(" ")),
        "clear" => Command::ClearFilters,
        "theme" => {
            if parts.len() < 2 {
                Command::Error("theme requires a theme name".to_string())
            } else {
                Command::Theme(parts[1].to_string())
            }
        }
        _ => Command::Error(format!("Unknown command: {}", parts[0])),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_quit_command() {
        assert_eq!(parse_command(":q"), Command::Quit);
        assert_eq!(parse_command(":quit"), Command::Quit);
    }

    #[test]
    fn parse_reload_command() {
        assert_eq!(parse_command(":r"), Command::Reload);
        assert_eq!(parse_command(":reload"), Command::Reload);
    }

    #[test]
    fn parse_goto_command_with_date() {
        let expected_date = NaiveDate::from_ymd_opt(2024, 5, 15).unwrap();
        assert_eq!(parse_command(":goto 2024-05-15"), Command::Goto(expected_date));
    }

    #[test]
    fn parse_goto_with_invalid_date_returns_error() {
        assert!(matches!(parse_command(":goto invalid"), Command::Error(_)));
        assert!(matches!(parse_command(":goto"), Command::Error(_)));
    }

    #[test]
    fn parse_patient_filter_command() {
        assert_eq!(
            parse_command(":paciente ana maria"),
            Command::FilterPatient("ana maria".to_string())
        );
    }

    #[test]
    fn parse_patient_filter_without_term_clears_it() {
        assert_eq!(parse_command(":paciente"), Command::FilterPatient(String::new()));
    }

    #[test]
    fn parse_professional_filter_command() {
        assert_eq!(
            parse_command(":profissional silva"),
            Command::FilterProfessional("silva".to_string())
        );
    }

    #[test]
    fn parse_clear_command() {
        assert_eq!(parse_command(":clear"), Command::ClearFilters);
    }

    #[test]
    fn parse_theme_command() {
        assert_eq!(parse_command(":theme nord"), Command::Theme("nord".to_string()));
        assert!(matches!(parse_command(":theme"), Command::Error(_)));
    }

    #[test]
    fn parse_unknown_command_returns_error() {
        assert!(matches!(parse_command(":frobnicate"), Command::Error(_)));
    }

    #[test]
    fn parse_command_without_colon_returns_error() {
        assert!(matches!(parse_command("quit"), Command::Error(_)));
    }

    #[test]
    fn parse_empty_command_returns_error() {
        assert!(matches!(parse_command(":"), Command::Error(_)));
    }
}
