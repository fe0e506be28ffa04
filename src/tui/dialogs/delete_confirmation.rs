use ratatui::{
    Frame,
    layout::Alignment,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
};

use odonto_agenda::app::AppState;

pub fn render(f: &mut Frame, app: &AppState) {
    let Some(appointment_id) = app.delete_confirmation_id else {
        return;
    };

    let id_str = appointment_id.to_string();
    let title = app
        .events
        .iter()
        .find(|e| e.id == id_str)
        .map(|e| e.title.as_str())
        .unwrap_or("esta consulta");

    let area = f.size();
    let dialog_width = 60;
    let dialog_height = 10;
    let x = (area.width.saturating_sub(dialog_width)) / 2;
    let y = (area.height.saturating_sub(dialog_height)) / 2;

    let dialog_area = ratatui::layout::Rect {
        x,
        y,
        width: dialog_width,
        height: dialog_height,
    };

    f.render_widget(Clear, dialog_area);

    let dialog_text = vec![
        Line::from(vec![Span::styled(
            "Excluir Consulta?",
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        )]),
        Line::from(""),
        Line::from(vec![
            Span::raw("Tem certeza que deseja excluir "),
            Span::styled(title, Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)),
            Span::raw("?"),
        ]),
        Line::from(""),
        Line::from("Esta ação não pode ser desfeita."),
        Line::from(""),
        Line::from(vec![
            Span::styled("S", Style::default().fg(Color::Green)),
            Span::raw(" = Sim, excluir | "),
            Span::styled("N", Style::default().fg(Color::Red)),
            Span::raw(" = Não, cancelar"),
        ]),
    ];

    let dialog_paragraph = Paragraph::new(dialog_text)
        .block(Block::default()
            .borders(Borders::ALL)
            .title(" Confirmar Exclusão ")
            .style(Style::default().bg(Color::Black)))
        .alignment(Alignment::Center);

    f.render_widget(dialog_paragraph, dialog_area);
}
