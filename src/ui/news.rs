use super::formatters::*;
use super::tables::{ColumnDef, column_constraints, sort_header_row, visible_columns};
use crate::api::Article;
use crate::app::{App, LoadResult};
use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState, Wrap},
};

const ARTICLE_COLUMNS: &[ColumnDef] = &[
    ColumnDef { name: "Published", width: 14, priority: 1 },
    ColumnDef { name: "Section",   width: 16, priority: 2 },
    ColumnDef { name: "Headline",  width: 40, priority: 1 },
];

fn article_row(i: usize, article: &Article, vis: &[usize], selected: usize) -> Row<'static> {
    let is_selected = i == selected;
    let text_style = if is_selected {
        Style::default().fg(Color::White)
    } else {
        Style::default()
    };
    let bold_text = if is_selected {
        text_style.add_modifier(Modifier::BOLD)
    } else {
        text_style
    };

    let cells: Vec<Cell> = vis
        .iter()
        .map(|&col| match col {
            0 => Cell::from(format_publication_date(article)).style(text_style),
            1 => Cell::from(truncate_str(&article.section, 14)).style(text_style),
            2 => Cell::from(article.title.clone()).style(bold_text),
            _ => Cell::from(""),
        })
        .collect();

    let row_style = if is_selected {
        Style::default().bg(Color::Rgb(40, 60, 100))
    } else {
        Style::default()
    };
    Row::new(cells).style(row_style)
}

fn draw_message(frame: &mut Frame, area: Rect, title: String, message: &str, color: Color) {
    let paragraph = Paragraph::new(message.to_string())
        .style(Style::default().fg(color))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL).title(title));
    frame.render_widget(paragraph, area);
}

pub fn draw_news(frame: &mut Frame, area: Rect, app: &App) {
    let window = app.selected_window();
    match &app.result {
        LoadResult::Empty => {
            draw_message(frame, area, format!(" {} ", window), "No news loaded.", Color::DarkGray);
            return;
        }
        LoadResult::Loading => {
            draw_message(frame, area, format!(" {} [Loading...] ", window), "Loading news...", Color::DarkGray);
            return;
        }
        LoadResult::Failure(err) => {
            draw_message(frame, area, format!(" {} ", window), &err.user_message(), Color::Red);
            return;
        }
        LoadResult::Success(_) => {}
    }

    let filtered = app.get_filtered_articles();
    if filtered.is_empty() {
        let message = if app.search_active {
            "No news matches the filter."
        } else {
            "No news found."
        };
        draw_message(frame, area, format!(" {} (0 articles) ", window), message, Color::DarkGray);
        return;
    }

    let available_width = area.width.saturating_sub(2);
    let vis = visible_columns(ARTICLE_COLUMNS, available_width);
    let header = sort_header_row(
        ARTICLE_COLUMNS,
        &vis,
        app.sort_column,
        &app.sort_direction,
        Color::Blue,
    );

    let rows: Vec<Row> = filtered
        .iter()
        .enumerate()
        .map(|(i, article)| article_row(i, article, &vis, app.selected_index))
        .collect();

    let title = format!(" {} ({} articles) ", window, filtered.len());
    let constraints = column_constraints(ARTICLE_COLUMNS, &vis, Some(2), available_width);
    let table = Table::new(rows, constraints)
        .header(header)
        .block(Block::default().borders(Borders::ALL).title(title));

    let mut state = TableState::default();
    state.select(Some(app.selected_index));
    frame.render_stateful_widget(table, area, &mut state);
}
