//! UI rendering for the planner grid.
//!
//! Renders programmer lanes as stacked tracks of task pills across the
//! 12-month course window, using ratatui. Pills are colored by status,
//! the grabbed pill renders dimmed, and the candidate drop cell is
//! highlighted while a gesture is in flight.

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
};

use gantry_db::Month;

use crate::app::{App, AssignPicker};
use crate::palette::{contrast_color, status_hex, terminal_color};
use crate::planner::{CourseWindow, PlacedTask, ProgrammerLane, WINDOW_MONTHS, month_label};

/// Legend text for keyboard shortcuts.
const LEGEND: &str =
    " [hjkl] Move  [m/s/e] Grab/resize  [Enter] Drop  [a] Assign  [[/]] Course  [r] Refresh  [q] Quit ";

/// Horizontal metrics of the planner grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct GridConfig {
    /// Width of the lane label column.
    label_width: u16,
    /// Width of one month cell.
    cell_width: u16,
}

impl GridConfig {
    /// Compute grid metrics for a terminal width.
    fn for_width(width: u16) -> Self {
        let label_width = 20u16.min(width / 4);
        let cell_width = (width.saturating_sub(label_width) / WINDOW_MONTHS as u16).max(3);
        Self {
            label_width,
            cell_width,
        }
    }
}

/// Everything lane rendering needs to know about interaction state.
struct LaneRender<'a> {
    is_cursor_lane: bool,
    cursor_month: usize,
    grab_active: bool,
    grabbed_task: Option<&'a str>,
}

/// Draw the entire UI.
pub fn draw(frame: &mut Frame, app: &App) {
    let area = frame.area();
    let chunks = create_main_layout(area);
    let config = GridConfig::for_width(area.width);

    draw_title(frame, chunks[0], app.window());
    frame.render_widget(
        Paragraph::new(build_month_header(
            &app.window(),
            app.current_month(),
            &config,
        )),
        chunks[1],
    );
    frame.render_widget(Paragraph::new(build_separator(&config)), chunks[2]);

    draw_grid(frame, chunks[3], app, &config);
    draw_footer(frame, chunks[4], app);

    if let Some(picker) = app.picker() {
        draw_picker(frame, area, picker);
    }
}

/// Create the five-row layout: title, month header, separator, grid,
/// footer.
fn create_main_layout(area: Rect) -> Vec<Rect> {
    Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Title
            Constraint::Length(1), // Month header
            Constraint::Length(1), // Separator
            Constraint::Min(0),    // Lane grid
            Constraint::Length(1), // Footer / status line
        ])
        .split(area)
        .to_vec()
}

/// Draw the title bar with the course window.
fn draw_title(frame: &mut Frame, area: Rect, window: CourseWindow) {
    let title = Paragraph::new(format!(" Gantry Planner  \u{2014}  {}", window.title())).style(
        Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::BOLD),
    );
    frame.render_widget(title, area);
}

/// Build the month header line with one centered label per column.
///
/// Months already past render dimmed; the current month is emphasized.
fn build_month_header(
    window: &CourseWindow,
    current_month: Month,
    config: &GridConfig,
) -> Line<'static> {
    let mut spans = vec![Span::raw(" ".repeat(config.label_width as usize))];

    for month in window.months() {
        let style = if month < current_month {
            Style::default().fg(Color::DarkGray)
        } else if month == current_month {
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Gray)
        };
        spans.push(Span::styled(
            center(&month_label(month), config.cell_width as usize),
            style,
        ));
    }

    Line::from(spans)
}

/// Build a separator line with vertical grid markers at column
/// boundaries.
fn build_separator(config: &GridConfig) -> Line<'static> {
    let width = config.label_width as usize + config.cell_width as usize * WINDOW_MONTHS;
    let mut chars = vec!['\u{2500}'; width];

    for column in 0..WINDOW_MONTHS {
        let position = config.label_width as usize + column * config.cell_width as usize;
        if position < width {
            chars[position] = if column == 0 { '\u{251C}' } else { '\u{253C}' };
        }
    }

    Line::from(Span::styled(
        chars.iter().collect::<String>(),
        Style::default().fg(Color::DarkGray),
    ))
}

/// Draw all programmer lanes.
fn draw_grid(frame: &mut Frame, area: Rect, app: &App, config: &GridConfig) {
    if app.lanes().is_empty() {
        let message = Paragraph::new("No programmers found")
            .block(Block::default().borders(Borders::NONE))
            .style(Style::default().fg(Color::DarkGray));
        frame.render_widget(message, area);
        return;
    }

    let (cursor_lane, cursor_month) = app.cursor();
    let mut lines = Vec::new();
    for (lane_index, lane) in app.lanes().iter().enumerate() {
        let state = LaneRender {
            is_cursor_lane: lane_index == cursor_lane,
            cursor_month,
            grab_active: app.grab_active(),
            grabbed_task: app.grabbed_task_id(),
        };
        lines.extend(build_lane_lines(lane, config, &state));
    }

    frame.render_widget(Paragraph::new(lines), area);
}

/// Build one line per track row of a lane (at least one).
fn build_lane_lines(
    lane: &ProgrammerLane,
    config: &GridConfig,
    state: &LaneRender<'_>,
) -> Vec<Line<'static>> {
    let mut lines = Vec::with_capacity(lane.height());

    for row in 0..lane.height() {
        let mut spans = Vec::new();

        if row == 0 {
            spans.push(Span::styled(
                " \u{25CF} ".to_string(),
                Style::default().fg(terminal_color(&lane.color)),
            ));
            let name_width = (config.label_width as usize).saturating_sub(3);
            let name_style = if state.is_cursor_lane {
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::White)
            };
            spans.push(Span::styled(fit(&lane.name, name_width), name_style));
        } else {
            spans.push(Span::raw(" ".repeat(config.label_width as usize)));
        }

        match lane.tracks.get(row) {
            Some(track) => build_track_spans(track, config, state, &mut spans),
            None => {
                for column in 0..WINDOW_MONTHS {
                    spans.push(gap_cell(column, config, state));
                }
            }
        }

        lines.push(Line::from(spans));
    }

    lines
}

/// Append the cell and pill spans of one track row.
fn build_track_spans(
    track: &[PlacedTask],
    config: &GridConfig,
    state: &LaneRender<'_>,
    spans: &mut Vec<Span<'static>>,
) {
    let mut column = 0usize;

    for placed in track {
        while column < placed.start_index {
            spans.push(gap_cell(column, config, state));
            column += 1;
        }

        let width = placed.duration * config.cell_width as usize;
        let background = status_hex(&placed.task.status);
        let mut style = Style::default()
            .bg(terminal_color(background))
            .fg(contrast_color(background));
        if state.grabbed_task == Some(placed.task.id.as_str()) {
            // The source pill of an in-flight gesture renders dimmed.
            style = style.add_modifier(Modifier::DIM);
        } else if state.is_cursor_lane && placed.covers(state.cursor_month) {
            style = style.add_modifier(Modifier::REVERSED);
        }

        let text = format!(" {} \u{00B7} {}", placed.task.module, placed.task.requirement);
        spans.push(Span::styled(fit(&text, width), style));
        column = placed.end_index() + 1;
    }

    while column < WINDOW_MONTHS {
        spans.push(gap_cell(column, config, state));
        column += 1;
    }
}

/// An empty grid cell, highlighted when it is the candidate drop cell.
fn gap_cell(column: usize, config: &GridConfig, state: &LaneRender<'_>) -> Span<'static> {
    let blank = " ".repeat(config.cell_width as usize);
    if state.is_cursor_lane && column == state.cursor_month {
        let style = if state.grab_active {
            Style::default().bg(Color::LightBlue)
        } else {
            Style::default().bg(Color::DarkGray)
        };
        Span::styled(blank, style)
    } else {
        Span::raw(blank)
    }
}

/// Draw the footer: a transient status message when present, the key
/// legend otherwise.
fn draw_footer(frame: &mut Frame, area: Rect, app: &App) {
    let footer = match app.status_message() {
        Some(message) => Paragraph::new(format!(" {message} "))
            .style(Style::default().fg(Color::Black).bg(Color::Yellow)),
        None => Paragraph::new(LEGEND).style(Style::default().fg(Color::Black).bg(Color::Cyan)),
    };
    frame.render_widget(footer, area);
}

/// Draw the assignment picker as a centered overlay.
fn draw_picker(frame: &mut Frame, area: Rect, picker: &AssignPicker) {
    let popup = centered_rect(60, 50, area);
    frame.render_widget(Clear, popup);

    let title = format!(
        " Assign to {} \u{00B7} {} ",
        picker.programmer_name,
        month_label(picker.month)
    );
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow));

    let lines: Vec<Line> = picker
        .choices
        .iter()
        .enumerate()
        .map(|(index, choice)| {
            if index == picker.selected {
                Line::from(Span::styled(
                    format!("> {}", choice.requirement),
                    Style::default()
                        .fg(Color::Yellow)
                        .add_modifier(Modifier::BOLD),
                ))
            } else {
                Line::from(format!("  {}", choice.requirement))
            }
        })
        .collect();

    frame.render_widget(Paragraph::new(lines).block(block), popup);
}

/// A rectangle centered in `area` taking the given percentages.
fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
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
        .split(vertical[1])[1]
}

/// Truncate or pad text to an exact character width.
fn fit(text: &str, width: usize) -> String {
    let mut out: String = text.chars().take(width).collect();
    let used = out.chars().count();
    out.extend(std::iter::repeat_n(' ', width - used));
    out
}

/// Center text within a character width, truncating when it cannot fit.
fn center(text: &str, width: usize) -> String {
    let len = text.chars().count();
    if len >= width {
        return fit(text, width);
    }
    let left = (width - len) / 2;
    let mut out = " ".repeat(left);
    out.push_str(text);
    out.extend(std::iter::repeat_n(' ', width - left - len));
    out
}
