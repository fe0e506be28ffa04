use ratatui::{
    Frame,
    layout::Alignment,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
};

use odonto_agenda::app::{AppState, FormField};

pub fn render(f: &mut Frame, app: &AppState) {
    let Some(form) = &app.appointment_form else {
        return;
    };

    let area = f.size();
    let form_width = 70;
    let form_height = 18;
    let x = (area.width.saturating_sub(form_width)) / 2;
    let y = (area.height.saturating_sub(form_height)) / 2;

    let form_area = ratatui::layout::Rect {
        x,
        y,
        width: form_width,
        height: form_height,
    };

    f.render_widget(Clear, form_area);

    let active_color = app.theme.selected_bg;
    let inactive_color = Color::DarkGray;
    let field_color = |field: FormField| {
        if form.active_field == field {
            active_color
        } else {
            inactive_color
        }
    };

    let form_title = if form.is_editing() { "Editar Consulta" } else { "Nova Consulta" };

    let mut form_text = vec![
        Line::from(vec![Span::styled(
            form_title,
            Style::default().fg(app.theme.title).add_modifier(Modifier::BOLD),
        )]),
        Line::from(""),
        Line::from(vec![
            Span::styled("Paciente (ID): ", Style::default().fg(field_color(FormField::PatientId))),
            Span::raw(&form.patient_id_input),
        ]),
        Line::from(""),
        Line::from(vec![
            Span::styled(
                "Profissional (ID): ",
                Style::default().fg(field_color(FormField::ProfessionalId)),
            ),
            Span::raw(&form.professional_id_input),
        ]),
        Line::from(""),
        Line::from(vec![
            Span::styled("Data: ", Style::default().fg(inactive_color)),
            Span::raw(form.date.format("%d/%m/%Y").to_string()),
        ]),
        Line::from(""),
        Line::from(vec![
            Span::styled("Horário: ", Style::default().fg(field_color(FormField::StartTime))),
            Span::raw(&form.time_input_buffer),
            Span::styled(
                if form.active_field == FormField::StartTime {
                    " (HH:MM ou HHMM)"
                } else {
                    ""
                },
                Style::default().fg(Color::DarkGray),
            ),
        ]),
        Line::from(""),
        Line::from(vec![
            Span::styled("Status: ", Style::default().fg(field_color(FormField::Status))),
            Span::raw(form.status_label()),
            Span::styled(
                if form.active_field == FormField::Status {
                    " [espaço alterna]"
                } else {
                    ""
                },
                Style::default().fg(Color::DarkGray),
            ),
        ]),
        Line::from(""),
        Line::from(vec![
            Span::styled("Observações: ", Style::default().fg(field_color(FormField::Notes))),
            Span::raw(&form.notes),
        ]),
        Line::from(""),
    ];

    if let Some(error) = &form.error {
        form_text.push(Line::from(vec![
            Span::styled(error.clone(), Style::default().fg(app.theme.error)),
        ]));
        form_text.push(Line::from(""));
    }

    form_text.push(Line::from(vec![
        Span::styled("Tab", Style::default().fg(Color::Cyan)),
        Span::raw(" = Próximo campo | "),
        Span::styled("Enter", Style::default().fg(Color::Green)),
        Span::raw(" = Salvar | "),
        Span::styled("Esc", Style::default().fg(Color::Red)),
        Span::raw(" = Cancelar"),
    ]));

    let block_title = if form.is_editing() { " Editar Consulta " } else { " Nova Consulta " };

    let form_paragraph = Paragraph::new(form_text)
        .block(Block::default()
            .borders(Borders::ALL)
            .title(block_title)
            .style(Style::default().bg(Color::Black)))
        .alignment(Alignment::Left);

    f.render_widget(form_paragraph, form_area);
}
