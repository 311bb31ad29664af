pub mod formatters;
mod modals;
mod news;
mod tables;

use crate::api::TimeWindow;
use crate::app::{App, InputMode};
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

pub(super) fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

pub fn draw(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(10),
            Constraint::Length(3),
        ])
        .split(frame.area());

    draw_header(frame, chunks[0], app);
    news::draw_news(frame, chunks[1], app);
    draw_footer(frame, chunks[2], app);

    if app.input_mode == InputMode::Help {
        modals::draw_help(frame);
    }
}

fn window_tab(window: TimeWindow, selected: TimeWindow) -> Span<'static> {
    let label = format!(" {} ", window.label());
    if window == selected {
        Span::styled(
            label,
            Style::default()
                .fg(Color::Black)
                .bg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
    } else {
        Span::styled(label, Style::default().fg(Color::Yellow))
    }
}

fn draw_header(frame: &mut Frame, area: Rect, app: &App) {
    let current_time = chrono::Local::now().format("%H:%M:%S").to_string();
    let status = if app.is_loading() {
        "[Loading...]".to_string()
    } else {
        format!("[{}]", current_time)
    };

    let selected = app.selected_window();
    let mut spans = vec![
        Span::styled(" World News ", Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)),
        Span::styled("| ", Style::default().fg(Color::DarkGray)),
    ];
    for window in TimeWindow::ALL {
        spans.push(window_tab(window, selected));
        spans.push(Span::raw(" "));
    }
    if app.search_active {
        spans.push(Span::styled(
            format!("(filtered: {}) ", app.search_query),
            Style::default().fg(Color::Cyan),
        ));
    }
    spans.push(Span::styled(status, Style::default().fg(Color::DarkGray)));

    let header = Paragraph::new(Line::from(spans)).block(Block::default().borders(Borders::ALL));
    frame.render_widget(header, area);
}

fn draw_footer(frame: &mut Frame, area: Rect, app: &App) {
    let content = match app.input_mode {
        InputMode::Normal => {
            let help = " [1-4/←→] Window [r] Reload [Enter] Open [s] Sort [/] Search [↑↓] Nav [?] Help [q] Quit ";
            if let Some(msg) = &app.status_message {
                Line::from(vec![
                    Span::styled(msg, Style::default().fg(Color::Yellow)),
                    Span::raw(" | "),
                    Span::styled(help, Style::default().fg(Color::DarkGray)),
                ])
            } else {
                Line::from(Span::styled(help, Style::default().fg(Color::DarkGray)))
            }
        }
        InputMode::Help => Line::from(Span::styled(
            " [?/Enter/Esc] Close help ",
            Style::default().fg(Color::DarkGray),
        )),
        InputMode::Search => Line::from(vec![
            Span::raw(" Search: /"),
            Span::styled(&app.input_buffer, Style::default().fg(Color::Cyan)),
            Span::styled("█", Style::default().fg(Color::Cyan)),
            Span::raw(" | [Enter] Apply | [Esc] Cancel"),
        ]),
    };

    let footer = Paragraph::new(content).block(Block::default().borders(Borders::ALL));
    frame.render_widget(footer, area);
}
