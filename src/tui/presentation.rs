use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use odonto_agenda::app::{AppState, FetchStatus, Mode, ViewType};

use crate::tui::{dialogs, views};

pub fn ui(f: &mut Frame, app: &AppState) {
    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(3),
        ])
        .split(f.size());

    let content_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(60),
            Constraint::Percentage(40),
        ])
        .split(main_chunks[2]);

    let title_text = format!(
        "OdontoSys Agenda - {}",
        match app.view {
            ViewType::Month => "Mês",
            ViewType::Day => "Dia",
        }
    );

    let title = Paragraph::new(title_text)
        .style(Style::default().fg(app.theme.title).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(title, main_chunks[0]);

    render_filter_bar(f, app, main_chunks[1]);

    match app.view {
        ViewType::Month => views::month::render(f, app, content_chunks[0]),
        ViewType::Day => views::agenda::render_day(f, app, content_chunks[0]),
    }

    views::agenda::render(f, app, content_chunks[1]);

    render_status_bar(f, app, main_chunks[3]);

    if app.show_help {
        dialogs::help::render(f, app);
    }

    if app.appointment_form.is_some() {
        dialogs::appointment_form::render(f, app);
    }

    if app.delete_confirmation_id.is_some() {
        dialogs::delete_confirmation::render(f, app);
    }
}

fn render_filter_bar(f: &mut Frame, app: &AppState, area: ratatui::layout::Rect) {
    let patient_style = if app.mode == Mode::FilterPatient {
        Style::default().fg(app.theme.filter_active).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(app.theme.status_bar)
    };
    let professional_style = if app.mode == Mode::FilterProfessional {
        Style::default().fg(app.theme.filter_active).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(app.theme.status_bar)
    };

    let line = Line::from(vec![
        Span::styled("Paciente: ", patient_style),
        Span::styled(app.patient_filter().to_string(), patient_style),
        Span::raw("   "),
        Span::styled("Profissional: ", professional_style),
        Span::styled(app.professional_filter().to_string(), professional_style),
    ]);

    let filters = Paragraph::new(line)
        .block(Block::default().borders(Borders::ALL).title(" Filtros "));
    f.render_widget(filters, area);
}

fn render_status_bar(f: &mut Frame, app: &AppState, area: ratatui::layout::Rect) {
    let (status_text, status_color, alignment) = if matches!(app.mode, Mode::Command) {
        (app.command_buffer.clone(), app.theme.command_mode, Alignment::Left)
    } else {
        let fetch_label = match &app.fetch_status {
            FetchStatus::Idle => "parado".to_string(),
            FetchStatus::Loading => "carregando...".to_string(),
            FetchStatus::Loaded => "ok".to_string(),
            FetchStatus::Error(message) => message.clone(),
        };
        let color = if matches!(app.fetch_status, FetchStatus::Error(_)) {
            app.theme.error
        } else {
            app.theme.status_bar
        };
        (
            format!(
                "Consultas: {} | {} | 'q' sair, '?' ajuda",
                app.events.len(),
                fetch_label
            ),
            color,
            Alignment::Center,
        )
    };

    let status = Paragraph::new(status_text)
        .style(Style::default().fg(status_color))
        .alignment(alignment)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(status, area);
}
