use std::io;

mod cli;
use cli::{CliMode, parse_cli_mode, run_agenda_mode};
mod tui;
use tui::run_tui;

#[tokio::main]
async fn main() -> Result<(), io::Error> {
    setup_logging();

    let cli_mode = match parse_cli_mode() {
        Ok(mode) => mode,
        Err(err) => {
            eprintln!("Error: {}", err);
            println!(
                "Usage: odonto-agenda [--agenda [YYYY/MM/DD]] [--paciente TERM] [--profissional TERM]"
            );
            return Ok(());
        }
    };

    match cli_mode {
        CliMode::AgendaDate {
            date,
            patient_filter,
            professional_filter,
        } => run_agenda_mode(date, &patient_filter, &professional_filter).await,
        CliMode::Tui => run_tui().await,
    }
}

fn setup_logging() {
    let log_dir = dirs::config_dir()
        .map(|d| d.join("odonto-agenda"))
        .unwrap_or_else(|| std::path::PathBuf::from("."));

    std::fs::create_dir_all(&log_dir).ok();

    let file_appender = tracing_appender::rolling::daily(log_dir, "odonto-agenda.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_ansi(false)
        .with_target(false)
        .init();

    std::mem::forget(_guard);

    tracing::info!("odonto-agenda started");
}
