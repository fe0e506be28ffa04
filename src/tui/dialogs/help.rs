use ratatui::{
    Frame,
    layout::Alignment,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
};

use odonto_agenda::{app::AppState, ui::theme::Theme};

pub fn render(f: &mut Frame, app: &AppState) {
    let area = f.size();
    let help_width = 62;
    let help_height = 24;
    let x = (area.width.saturating_sub(help_width)) / 2;
    let y = (area.height.saturating_sub(help_height)) / 2;

    let help_area = ratatui::layout::Rect {
        x,
        y,
        width: help_width,
        height: help_height,
    };

    f.render_widget(Clear, help_area);

    let section = Style::default().fg(Color::Cyan);

    let help_text = vec![
        Line::from(vec![Span::styled(
            "OdontoSys Agenda - Ajuda",
            Style::default().fg(app.theme.title).add_modifier(Modifier::BOLD),
        )]),
        Line::from(""),
        Line::from(vec![Span::styled("Navegação:", section)]),
        Line::from("  h/l      - Dia anterior/próximo"),
        Line::from("  j/k      - Navegar consultas (ou semana se vazio)"),
        Line::from("  t        - Ir para hoje"),
        Line::from("  g/G      - Primeiro/último dia do mês"),
        Line::from("  { / }    - Mês anterior/próximo"),
        Line::from(""),
        Line::from(vec![Span::styled("Visualizações:", section)]),
        Line::from("  m/d      - Visão mensal / diária"),
        Line::from("  Enter    - Abrir dia (mês) / Editar (dia)"),
        Line::from(""),
        Line::from(vec![Span::styled("Consultas:", section)]),
        Line::from("  a        - Nova consulta"),
        Line::from("  E        - Editar consulta selecionada"),
        Line::from("  x        - Excluir consulta selecionada"),
        Line::from(""),
        Line::from(vec![Span::styled("Filtros:", section)]),
        Line::from("  p        - Filtrar por paciente"),
        Line::from("  f        - Filtrar por profissional"),
        Line::from("  c        - Limpar filtros"),
        Line::from(""),
        Line::from(vec![Span::styled("Comandos:", section)]),
        Line::from("  :q       - Sair"),
        Line::from("  :r       - Recarregar consultas"),
        Line::from("  :goto    - Ir para data (:goto 2026-08-25)"),
        Line::from("  :paciente / :profissional - Filtrar (sem termo = limpa)"),
        Line::from("  :clear   - Limpar filtros"),
        Line::from(format!(
            "  :theme   - Trocar tema ({})",
            Theme::available_themes().join(", ")
        )),
        Line::from("  :help    - Mostrar esta ajuda"),
        Line::from(""),
    ];

    let visible_lines = help_height.saturating_sub(3) as usize;
    let total_lines = help_text.len();
    let max_scroll = total_lines.saturating_sub(visible_lines);
    let scroll = app.help_scroll.min(max_scroll);

    let scrolled_text: Vec<Line> = help_text
        .into_iter()
        .skip(scroll)
        .take(visible_lines)
        .collect();

    let help_paragraph = Paragraph::new(scrolled_text)
        .block(Block::default()
            .borders(Borders::ALL)
            .title(format!(" Ajuda (j/k rola, q fecha) [{}/{}] ", scroll + 1, total_lines))
            .style(Style::default().bg(Color::Black)))
        .alignment(Alignment::Left);

    f.render_widget(help_paragraph, help_area);
}
