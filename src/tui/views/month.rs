use chrono::NaiveDate;
use ratatui::{
    Frame,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use odonto_agenda::{app::AppState, ui::month_view};

const WEEKDAY_HEADERS: [&str; 7] = ["Dom", "Seg", "Ter", "Qua", "Qui", "Sex", "Sáb"];

pub fn render(f: &mut Frame, app: &AppState, area: ratatui::layout::Rect) {
    let layout = month_view::calculate_layout(app);

    let month_name = NaiveDate::from_ymd_opt(layout.year, layout.month, 1)
        .map(|d| d.format("%B %Y").to_string())
        .unwrap_or_else(|| format!("{}-{:02}", layout.year, layout.month));

    let header_spans: Vec<Span> = WEEKDAY_HEADERS
        .iter()
        .map(|day| Span::styled(format!(" {} ", day), Style::default().fg(app.theme.weekday_header)))
        .collect();

    let mut lines = vec![
        Line::from(vec![
            Span::styled(month_name, Style::default().fg(app.theme.title).add_modifier(Modifier::BOLD)),
        ]),
        Line::from(""),
        Line::from(header_spans),
    ];

    for week in &layout.weeks {
        let mut day_spans = Vec::new();

        for day_cell in &week.days {
            let day_text = if let Some(date) = day_cell.date {
                format!(" {:>2}  ", chrono::Datelike::day(&date))
            } else {
                "     ".to_string()
            };

            let mut style = Style::default();

            if !day_cell.is_current_month {
                style = style.fg(app.theme.inactive_day);
            } else if day_cell.is_selected {
                style = style
                    .bg(app.theme.selected_bg)
                    .fg(app.theme.selected_fg)
                    .add_modifier(Modifier::BOLD);
            } else if day_cell.is_today {
                style = style.fg(app.theme.today).add_modifier(Modifier::BOLD);
            }

            if day_cell.event_count > 0 {
                style = style.add_modifier(Modifier::UNDERLINED);
            }

            day_spans.push(Span::styled(day_text, style));
        }

        lines.push(Line::from(day_spans));
    }

    lines.push(Line::from(""));
    lines.push(Line::from(vec![
        Span::styled("hjkl", Style::default().fg(Color::Cyan)),
        Span::raw(" = Navegar | "),
        Span::styled("a", Style::default().fg(Color::Green)),
        Span::raw(" = Nova consulta | "),
        Span::styled("p/f", Style::default().fg(Color::Magenta)),
        Span::raw(" = Filtros | "),
        Span::styled("Enter", Style::default().fg(Color::Green)),
        Span::raw(" = Dia"),
    ]));

    let content = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(content, area);
}
