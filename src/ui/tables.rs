use crate::app::SortDirection;
use ratatui::{
    layout::Constraint,
    style::{Color, Modifier, Style},
    widgets::{Cell, Row},
};

pub(super) struct ColumnDef {
    pub name: &'static str,
    pub width: u16,
    pub priority: u8,
}

pub(super) fn visible_columns(columns: &[ColumnDef], available_width: u16) -> Vec<usize> {
    let max_priority = columns.iter().map(|c| c.priority).max().unwrap_or(1);
    let mut visible: Vec<usize> = Vec::new();
    for priority_cutoff in 1..=max_priority {
        let candidate: Vec<usize> = columns
            .iter()
            .enumerate()
            .filter(|(_, c)| c.priority <= priority_cutoff)
            .map(|(i, _)| i)
            .collect();
        let total_width: u16 = candidate.iter().map(|&i| columns[i].width).sum();
        if total_width <= available_width {
            visible = candidate;
        } else {
            break;
        }
    }
    if visible.is_empty() {
        visible = columns
            .iter()
            .enumerate()
            .filter(|(_, c)| c.priority == 1)
            .map(|(i, _)| i)
            .collect();
    }
    visible
}

pub(super) fn sort_header_row(
    columns: &[ColumnDef],
    vis: &[usize],
    sort_col: Option<usize>,
    sort_dir: &SortDirection,
    color: Color,
) -> Row<'static> {
    let cells: Vec<Cell> = vis
        .iter()
        .map(|&i| {
            let name = columns[i].name;
            let label = if sort_col == Some(i) {
                format!("{} {}", name, sort_dir.indicator())
            } else {
                name.to_string()
            };
            Cell::from(label).style(Style::default().fg(color).add_modifier(Modifier::BOLD))
        })
        .collect();
    Row::new(cells).height(1)
}

pub(super) fn column_constraints(
    columns: &[ColumnDef],
    vis: &[usize],
    stretch_col: Option<usize>,
    available_width: u16,
) -> Vec<Constraint> {
    let total_vis_width: u16 = vis.iter().map(|&i| columns[i].width).sum();
    let extra = available_width.saturating_sub(total_vis_width);

    match stretch_col {
        // Single stretch column absorbs all extra space (the headline)
        Some(sc) if extra > 0 => vis
            .iter()
            .map(|&i| {
                if i == sc {
                    Constraint::Min(columns[i].width)
                } else {
                    Constraint::Length(columns[i].width)
                }
            })
            .collect(),
        _ => {
            let mut constraints: Vec<Constraint> = vis
                .iter()
                .map(|&i| Constraint::Length(columns[i].width))
                .collect();
            if extra > 0 {
                constraints.push(Constraint::Min(0));
            }
            constraints
        }
    }
}
