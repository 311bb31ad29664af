use super::centered_rect;
use ratatui::{
    Frame,
    layout::Alignment,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
};

fn help_section(title: &str) -> Line<'static> {
    Line::from(vec![
        Span::styled(
            format!("─── {} ", title),
            Style::default().fg(Color::Yellow),
        ),
        Span::styled(
            "───────────────────────────",
            Style::default().fg(Color::DarkGray),
        ),
    ])
}

fn help_binding(key: &str, desc: &str) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("  {:12}", key), Style::default().fg(Color::Cyan)),
        Span::raw(desc.to_string()),
    ])
}

fn help_content() -> Vec<Line<'static>> {
    vec![
        help_section("General"),
        help_binding("q", "Quit"),
        help_binding("r", "Reload current window"),
        help_binding("?", "Show this help"),
        Line::from(""),
        help_section("Time window"),
        help_binding("1 / t", "Today"),
        help_binding("2 / w", "This week"),
        help_binding("3 / m", "This month"),
        help_binding("4 / y", "This year"),
        help_binding("h / ←", "Previous window"),
        help_binding("l / →", "Next window"),
        Line::from(""),
        help_section("Articles"),
        help_binding("k / ↑", "Move selection up"),
        help_binding("j / ↓", "Move selection down"),
        help_binding("Enter / o", "Open article in browser"),
        help_binding("s", "Cycle sort column"),
        help_binding("S", "Toggle sort direction"),
        help_binding("/", "Search headlines and sections"),
        help_binding("Esc", "Clear search"),
        Line::from(""),
        Line::from(Span::styled(
            "  [?/Enter/Esc] Close",
            Style::default().fg(Color::DarkGray),
        )),
    ]
}

pub fn draw_help(frame: &mut Frame) {
    let area = centered_rect(50, 70, frame.area());
    frame.render_widget(Clear, area);

    let outer_block = Block::default()
        .title(" Help - Keyboard Shortcuts ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow))
        .style(Style::default().bg(Color::Black));

    let inner_area = outer_block.inner(area);
    frame.render_widget(outer_block, area);

    frame.render_widget(
        Paragraph::new(help_content()).alignment(Alignment::Left),
        inner_area,
    );
}
