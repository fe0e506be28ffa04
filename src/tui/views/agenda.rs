use ratatui::{
    Frame,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use odonto_agenda::{app::AppState, ui::theme::category_color};

/// Side pane: the projected events for the selected date, in status colors.
pub fn render(f: &mut Frame, app: &AppState, area: ratatui::layout::Rect) {
    let events = app.events_for_date(app.selected_date);

    let title = format!("Consultas em {}", app.selected_date.format(&app.date_format));

    let mut lines = vec![
        Line::from(vec![
            Span::styled(title, Style::default().fg(app.theme.title).add_modifier(Modifier::BOLD)),
        ]),
        Line::from(""),
    ];

    if events.is_empty() {
        lines.push(Line::from(vec![
            Span::styled("Nenhuma consulta", Style::default().fg(Color::DarkGray)),
        ]));
    } else {
        let selected_base = Style::default().bg(app.theme.selected_bg).add_modifier(Modifier::BOLD);

        for (idx, event) in events.iter().enumerate() {
            let time_str = event.start.format("%H:%M").to_string();
            let is_selected = idx == app.selected_event_index;

            let (time_style, title_style) = if is_selected {
                (selected_base.fg(app.theme.selected_fg), selected_base.fg(app.theme.selected_fg))
            } else {
                (
                    Style::default().fg(Color::Green),
                    Style::default().fg(category_color(event.category)),
                )
            };

            let cursor = if is_selected { ">" } else { " " };

            lines.push(Line::from(vec![
                Span::styled(cursor, Style::default().fg(app.theme.selected_bg)),
                Span::styled(time_str, time_style),
                Span::raw(" "),
                Span::styled("●", Style::default().fg(category_color(event.category))),
                Span::raw(" "),
                Span::styled(event.title.clone(), title_style),
            ]));
            lines.push(Line::from(""));
        }

        lines.push(Line::from(vec![
            Span::styled("j/k", Style::default().fg(Color::Cyan)),
            Span::raw(" = Navegar | "),
            Span::styled("E", Style::default().fg(Color::Green)),
            Span::raw(" = Editar | "),
            Span::styled("x", Style::default().fg(Color::Red)),
            Span::raw(" = Excluir"),
        ]));
    }

    let content = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(content, area);
}

/// Main-area day view: same events with the full title and status label.
pub fn render_day(f: &mut Frame, app: &AppState, area: ratatui::layout::Rect) {
    let events = app.events_for_date(app.selected_date);

    let title = app.selected_date.format("%A, %d de %B de %Y").to_string();

    let mut lines = vec![
        Line::from(vec![
            Span::styled(title, Style::default().fg(app.theme.title).add_modifier(Modifier::BOLD)),
        ]),
        Line::from(""),
    ];

    if events.is_empty() {
        lines.push(Line::from(vec![
            Span::styled("Nenhuma consulta para este dia", Style::default().fg(Color::DarkGray)),
        ]));
    } else {
        for (idx, event) in events.iter().enumerate() {
            let is_selected = idx == app.selected_event_index;
            let marker = if is_selected { "> " } else { "  " };

            lines.push(Line::from(vec![
                Span::raw(marker),
                Span::styled(
                    format!("{} - {}", event.start.format("%H:%M"), event.end.format("%H:%M")),
                    Style::default().fg(Color::Green),
                ),
                Span::raw("  "),
                Span::styled(
                    event.title.clone(),
                    Style::default().fg(category_color(event.category)),
                ),
            ]));
        }
    }

    let content = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(content, area);
}
