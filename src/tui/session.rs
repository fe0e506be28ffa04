use std::io;

use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event as TermEvent, KeyCode, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};

use odonto_agenda::{
    api::{ClinicApi, ClinicClient, SessionStore},
    app::{AppState, FetchStatus, Mode, ViewType},
    input::{command_mode, filter_mode, form_mode, normal_mode},
    storage::config::Config,
    ui::theme::Theme,
};

use crate::tui::presentation::ui;

pub async fn run_tui() -> Result<(), io::Error> {
    let config = Config::load_or_create()
        .map_err(|e| io::Error::other(e.to_string()))?;

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let theme = Theme::get_by_name(&config.ui.theme);
    let mut app = AppState::new()
        .with_theme(theme)
        .with_date_format(config.ui.date_format.clone());
    if config.ui.default_view.eq_ignore_ascii_case("day") {
        app.view = ViewType::Day;
    }

    let session = SessionStore::new(config.api.token_cache.clone());
    let client = ClinicClient::new(config.api.base_url.clone(), session);

    app.fetch_status = FetchStatus::Loading;
    terminal.draw(|f| ui(f, &app)).ok();
    reload(&mut app, &client).await;

    let res = run_app(&mut terminal, &mut app, &client).await;

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        println!("Error: {:?}", err);
    }

    Ok(())
}

/// Full reload protocol: re-fetch the whole list and re-project it with the
/// filters currently in effect. On failure the previous list and events are
/// left untouched.
async fn reload(app: &mut AppState, client: &ClinicClient) {
    match client.fetch_appointments().await {
        Ok(appointments) => {
            app.set_appointments(appointments);
            app.fetch_status = FetchStatus::Loaded;
        }
        Err(e) => {
            tracing::error!("Failed to load appointments: {}", e);
            app.fetch_status = FetchStatus::Error(format!("Falha ao carregar consultas: {}", e));
        }
    }
}

async fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut AppState,
    client: &ClinicClient,
) -> io::Result<()> {
    loop {
        terminal.draw(|f| ui(f, app))?;

        if let TermEvent::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press
        {
            match app.mode {
                Mode::Normal => {
                    if app.show_help {
                        handle_help_keys(key.code, app);
                    } else if app.delete_confirmation_id.is_some() {
                        handle_delete_confirmation(key.code, app, terminal, client).await?;
                    } else {
                        match key.code {
                            KeyCode::Char('q') => return Ok(()),
                            _ => normal_mode::handle_key(key.code, app),
                        }
                    }
                }
                Mode::FilterPatient | Mode::FilterProfessional => {
                    filter_mode::handle_key(key.code, app);
                }
                Mode::Form => {
                    handle_form_mode(key.code, app, terminal, client).await?;
                }
                Mode::Command => {
                    if handle_command_mode(key.code, app, terminal, client).await? {
                        return Ok(());
                    }
                }
            }
        }
    }
}

fn handle_help_keys(code: KeyCode, app: &mut AppState) {
    match code {
        KeyCode::Char('j') => {
            app.help_scroll = app.help_scroll.saturating_add(1);
        }
        KeyCode::Char('k') => {
            app.help_scroll = app.help_scroll.saturating_sub(1);
        }
        KeyCode::Char('q') | KeyCode::Esc => {
            app.show_help = false;
            app.help_scroll = 0;
        }
        _ => {}
    }
}

async fn handle_form_mode<B: ratatui::backend::Backend>(
    code: KeyCode,
    app: &mut AppState,
    terminal: &mut Terminal<B>,
    client: &ClinicClient,
) -> io::Result<()> {
    match code {
        KeyCode::Esc => {
            app.appointment_form = None;
            app.mode = Mode::Normal;
        }
        KeyCode::Enter => {
            let Some(mut form) = app.appointment_form.take() else {
                app.mode = Mode::Normal;
                return Ok(());
            };

            let payload = match form.to_payload() {
                Ok(payload) => payload,
                Err(message) => {
                    form.error = Some(message);
                    app.appointment_form = Some(form);
                    return Ok(());
                }
            };

            app.fetch_status = FetchStatus::Loading;
            terminal.draw(|f| ui(f, app))?;

            let result = match form.appointment_id {
                Some(id) => client.update_appointment(id, &payload).await,
                None => client.create_appointment(&payload).await,
            };

            match result {
                Ok(()) => {
                    app.mode = Mode::Normal;
                    reload(app, client).await;
                }
                Err(e) => {
                    // Save failed: keep the form open so the user can retry,
                    // and do not reload the list.
                    tracing::error!("Failed to save appointment: {}", e);
                    form.error = Some(format!("Falha ao salvar consulta: {}", e));
                    app.appointment_form = Some(form);
                    app.fetch_status = FetchStatus::Loaded;
                }
            }
        }
        _ => {
            form_mode::handle_key(code, app);
        }
    }
    Ok(())
}

async fn handle_command_mode<B: ratatui::backend::Backend>(
    code: KeyCode,
    app: &mut AppState,
    terminal: &mut Terminal<B>,
    client: &ClinicClient,
) -> io::Result<bool> {
    match code {
        KeyCode::Enter => {
            let command_text = app.command_buffer.clone();
            app.command_buffer.clear();
            app.mode = Mode::Normal;

            match command_mode::parse_command(&command_text) {
                command_mode::Command::Quit => return Ok(true),
                command_mode::Command::Reload => {
                    app.fetch_status = FetchStatus::Loading;
                    terminal.draw(|f| ui(f, app))?;
                    reload(app, client).await;
                }
                command_mode::Command::Goto(date) => {
                    app.selected_date = date;
                    app.reset_event_selection();
                }
                command_mode::Command::FilterPatient(term) => {
                    app.set_patient_filter(term);
                }
                command_mode::Command::FilterProfessional(term) => {
                    app.set_professional_filter(term);
                }
                command_mode::Command::ClearFilters => {
                    app.clear_filters();
                }
                command_mode::Command::Theme(theme_name) => {
                    app.theme = Theme::get_by_name(&theme_name);
                }
                command_mode::Command::Help => {
                    app.show_help = true;
                }
                command_mode::Command::Error(message) => {
                    tracing::warn!("Rejected command '{}': {}", command_text, message);
                }
            }
            Ok(false)
        }
        KeyCode::Esc => {
            app.command_buffer.clear();
            app.mode = Mode::Normal;
            Ok(false)
        }
        KeyCode::Backspace => {
            app.command_buffer.pop();
            Ok(false)
        }
        KeyCode::Char(c) => {
            app.command_buffer.push(c);
            Ok(false)
        }
        _ => Ok(false),
    }
}

async fn handle_delete_confirmation<B: ratatui::backend::Backend>(
    code: KeyCode,
    app: &mut AppState,
    terminal: &mut Terminal<B>,
    client: &ClinicClient,
) -> io::Result<()> {
    match code {
        KeyCode::Char('s') | KeyCode::Char('S') | KeyCode::Char('y') | KeyCode::Char('Y') => {
            if let Some(id) = app.delete_confirmation_id.take() {
                tracing::info!("Deleting appointment {}", id);
                app.fetch_status = FetchStatus::Loading;
                terminal.draw(|f| ui(f, app))?;

                match client.delete_appointment(id).await {
                    Ok(()) => {
                        reload(app, client).await;
                        if app.selected_event_index > 0 {
                            app.selected_event_index -= 1;
                        }
                    }
                    Err(e) => {
                        tracing::error!("Failed to delete appointment {}: {}", id, e);
                        app.fetch_status =
                            FetchStatus::Error(format!("Falha ao excluir consulta: {}", e));
                    }
                }
            }
        }
        KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
            app.delete_confirmation_id = None;
        }
        _ => {}
    }
    Ok(())
}
