//! Admin dashboard: section sidebar and a filterable table.

use ratatui::{
  Frame,
  layout::{Constraint, Direction, Layout, Rect},
  style::{Color, Modifier, Style},
  text::{Line, Span},
  widgets::{Cell, Paragraph, Row, Table, TableState},
};
use strum::IntoEnumIterator;

use super::{cursor_style, dim, draw_placeholder, pane, settled};
use crate::{app::App, prefs::AdminSection};

pub fn draw(f: &mut Frame, area: Rect, app: &App) {
  let sidebar = if app.prefs.sidebar_collapsed { 3 } else { 16 };
  let cols = Layout::default()
    .direction(Direction::Horizontal)
    .constraints([Constraint::Length(sidebar), Constraint::Min(0)])
    .split(area);

  draw_sidebar(f, cols[0], app);

  let rows = Layout::default()
    .direction(Direction::Vertical)
    .constraints([Constraint::Length(1), Constraint::Min(0)])
    .split(cols[1]);
  draw_filter(f, rows[0], app);
  draw_table(f, rows[1], app);
}

fn draw_sidebar(f: &mut Frame, area: Rect, app: &App) {
  let collapsed = app.prefs.sidebar_collapsed;
  let lines: Vec<Line> = AdminSection::iter()
    .map(|section| {
      let name = section.to_string();
      let label = if collapsed {
        name.chars().next().map(|c| c.to_ascii_uppercase().to_string()).unwrap_or_default()
      } else {
        name
      };
      let style = if section == app.prefs.admin_menu {
        cursor_style()
      } else {
        Style::default().fg(Color::Gray)
      };
      Line::from(Span::styled(format!(" {label} "), style))
    })
    .collect();
  let block = pane(if collapsed { "" } else { "Admin" });
  let inner = block.inner(area);
  f.render_widget(block, area);
  f.render_widget(Paragraph::new(lines), inner);
}

fn draw_filter(f: &mut Frame, area: Rect, app: &App) {
  let (text, style) = if app.filter_active {
    (format!(" filter: {}_", app.filter), Style::default().fg(Color::Yellow))
  } else if !app.filter.is_empty() {
    (format!(" filter: {}", app.filter), Style::default().fg(Color::Yellow))
  } else {
    (" / to filter".to_string(), dim())
  };
  f.render_widget(Paragraph::new(text).style(style), area);
}

fn draw_table(f: &mut Frame, area: Rect, app: &App) {
  let section = app.prefs.admin_menu;
  let title = section.to_string();
  if settled(f, area, &title, &app.admin_rows, app).is_none() {
    return;
  }
  let rows = app.filtered_rows();
  if rows.is_empty() {
    draw_placeholder(f, area, &title, "Nothing here.");
    return;
  }

  let (first, second) = match section {
    AdminSection::Users => ("Name", "Email"),
    AdminSection::Courses => ("Code", "Title"),
    AdminSection::Schools => ("School", "Majors"),
    AdminSection::Comments => ("Comment", "Author"),
    AdminSection::Suggestions => ("Suggestion", "From"),
  };
  let header = Row::new([first, second, "Role", ""]).style(
    Style::default()
      .fg(Color::Cyan)
      .add_modifier(Modifier::BOLD),
  );

  let body: Vec<Row> = rows
    .iter()
    .map(|r| {
      let role = r.role.map(|role| role.to_string()).unwrap_or_default();
      let state = if r.deactivated {
        Cell::from(Span::styled("deactivated", Style::default().fg(Color::Red)))
      } else {
        Cell::from("")
      };
      Row::new(vec![
        Cell::from(r.title.clone()),
        Cell::from(Span::styled(r.detail.clone(), dim())),
        Cell::from(role),
        state,
      ])
    })
    .collect();

  let widths = [
    Constraint::Percentage(40),
    Constraint::Percentage(35),
    Constraint::Length(11),
    Constraint::Length(12),
  ];
  let mut state = TableState::default();
  state.select(Some(app.cursor.min(rows.len() - 1)));

  let block = pane(&format!("{title} ({})", rows.len()));
  f.render_stateful_widget(
    Table::new(body, widths)
      .header(header)
      .block(block)
      .row_highlight_style(cursor_style()),
    area,
    &mut state,
  );
}
