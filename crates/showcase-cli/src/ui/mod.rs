//! TUI rendering: header, page body, status bar.

pub mod account;
pub mod admin;
pub mod projects;

use chrono::Local;
use ratatui::{
  Frame,
  layout::{Constraint, Direction, Layout, Rect},
  style::{Color, Modifier, Style},
  text::{Line, Span},
  widgets::{Block, Borders, Paragraph},
};
use showcase_core::{ClientError, i18n::Message};
use showcase_guard::{GuardState, Level};
use showcase_query::QueryState;

use crate::{app::App, route::Route};

// ─── Root draw ────────────────────────────────────────────────────────────────

/// Main draw function called each frame.
pub fn draw(f: &mut Frame, app: &App) {
  let rows = Layout::default()
    .direction(Direction::Vertical)
    .constraints([
      Constraint::Length(1), // header
      Constraint::Min(0),    // body
      Constraint::Length(1), // status bar
    ])
    .split(f.area());

  draw_header(f, rows[0], app);
  draw_body(f, rows[1], app);
  draw_status(f, rows[2], app);
}

// ─── Header ───────────────────────────────────────────────────────────────────

fn draw_header(f: &mut Frame, area: Rect, app: &App) {
  let mut spans = vec![Span::styled(
    " showcase ",
    Style::default()
      .fg(Color::White)
      .add_modifier(Modifier::BOLD),
  )];
  for (i, tab) in Route::TABS.iter().enumerate() {
    let active = *tab == app.route
      || (*tab == Route::Projects && matches!(app.route, Route::ProjectDetail(_)));
    let style = if active {
      Style::default().fg(Color::Black).bg(Color::Cyan)
    } else {
      Style::default().fg(Color::Gray)
    };
    spans.push(Span::styled(format!(" {} {} ", i + 1, tab.title()), style));
  }

  let who = match app.signed_in() {
    Some(user) => format!("{} ({}) ", user.full_name(), user.role),
    None => "guest ".to_string(),
  };
  let date = Local::now().format("%Y-%m-%d").to_string();
  let right = Span::styled(
    format!("{who}{} {date} ", app.language()),
    Style::default().fg(Color::Gray),
  );

  let used: usize = spans.iter().map(|s| s.content.chars().count()).sum();
  let pad = (area.width as usize)
    .saturating_sub(used)
    .saturating_sub(right.content.chars().count());
  spans.push(Span::raw(" ".repeat(pad)));
  spans.push(right);

  let block = Block::default().style(Style::default().bg(Color::DarkGray));
  let inner = block.inner(area);
  f.render_widget(block, area);
  f.render_widget(Paragraph::new(Line::from(spans)), inner);
}

// ─── Body ─────────────────────────────────────────────────────────────────────

fn draw_body(f: &mut Frame, area: Rect, app: &App) {
  match app.access {
    GuardState::Authorized => {}
    _ if app.route.guards().is_open() => {}
    GuardState::Checking => {
      return draw_placeholder(f, area, app.route.title(), app.text(Message::Loading));
    }
    GuardState::Unauthorized => {
      let text = app.text(Message::InsufficientPermissions);
      return draw_placeholder(f, area, app.route.title(), text);
    }
  }

  match &app.route {
    Route::Projects | Route::Starred | Route::MyProjects | Route::Review => {
      projects::draw_list(f, area, app)
    }
    Route::ProjectDetail(_) => projects::draw_detail(f, area, app),
    Route::Admin => admin::draw(f, area, app),
    Route::Profile => account::draw_profile(f, area, app),
    Route::Login => account::draw_login(f, area, app),
    Route::CompleteProfile => account::draw_complete_profile(f, area, app),
  }
}

/// A bordered pane with one dim line of text.
pub fn draw_placeholder(f: &mut Frame, area: Rect, title: &str, text: &str) {
  let block = pane(title);
  let inner = block.inner(area);
  f.render_widget(block, area);
  f.render_widget(
    Paragraph::new(Line::from(Span::styled(text.to_string(), dim()))),
    inner,
  );
}

/// Render a query that has not succeeded. Returns the data when it has.
pub fn settled<'a, T>(
  f: &mut Frame,
  area: Rect,
  title: &str,
  state: &'a QueryState<T>,
  app: &App,
) -> Option<&'a T> {
  match state {
    QueryState::Success(data) => Some(data.as_ref()),
    QueryState::Idle | QueryState::Loading => {
      draw_placeholder(f, area, title, app.text(Message::Loading));
      None
    }
    QueryState::Error(e) => {
      draw_error(f, area, title, e);
      None
    }
  }
}

fn draw_error(f: &mut Frame, area: Rect, title: &str, err: &ClientError) {
  let block = pane(title);
  let inner = block.inner(area);
  f.render_widget(block, area);
  f.render_widget(
    Paragraph::new(Line::from(Span::styled(
      format!("Error: {err}"),
      Style::default().fg(Color::Red),
    ))),
    inner,
  );
}

pub fn pane(title: &str) -> Block<'static> {
  Block::default()
    .title(format!(" {title} "))
    .borders(Borders::ALL)
    .border_style(Style::default().fg(Color::DarkGray))
}

pub fn dim() -> Style { Style::default().fg(Color::DarkGray) }

pub fn cursor_style() -> Style {
  Style::default()
    .bg(Color::Blue)
    .fg(Color::White)
    .add_modifier(Modifier::BOLD)
}

// ─── Status bar ───────────────────────────────────────────────────────────────

fn draw_status(f: &mut Frame, area: Rect, app: &App) {
  if let Some(prompt) = &app.prompt {
    let line = Line::from(vec![
      Span::styled(
        format!(" {} ", prompt.kind.label()),
        Style::default()
          .fg(Color::Black)
          .bg(Color::Yellow)
          .add_modifier(Modifier::BOLD),
      ),
      Span::raw(format!(" {}_", prompt.input)),
    ]);
    f.render_widget(Paragraph::new(line).style(Style::default().bg(Color::Black)), area);
    return;
  }

  let (mode_label, hints) = match &app.route {
    Route::Projects if app.search_active => ("SEARCH", "Type to search  Enter apply  Esc clear"),
    Route::Admin if app.filter_active => ("FILTER", "Type to filter  Enter keep  Esc clear"),
    Route::Projects => ("PROJECTS", "jk move  Enter open  / search  n/p page  R reload  ! report  q quit"),
    Route::ProjectDetail(_) => ("PROJECT", "s star  c comment  jk scroll  Esc back"),
    Route::Starred => ("STARRED", "jk move  Enter open"),
    Route::MyProjects => ("MINE", "jk move  Enter open  x delete"),
    Route::Review => ("REVIEW", "a accept  x reject  Enter open  n/p page"),
    Route::Admin => (
      "ADMIN",
      "Tab section  [ sidebar  / filter  n new  r role  d (de)activate  x delete",
    ),
    Route::Profile => ("PROFILE", "e edit  o sign out  T language"),
    Route::Login => ("LOGIN", "R recheck after signing in"),
    Route::CompleteProfile => ("PROFILE", "Enter fill next field"),
  };

  let (status, color) = match app.toasts.current() {
    Some(toast) => (toast.text.clone(), level_color(toast.level)),
    None => (hints.to_string(), Color::DarkGray),
  };

  let line = Line::from(vec![
    Span::styled(
      format!(" {mode_label} "),
      Style::default()
        .fg(Color::Black)
        .bg(Color::Cyan)
        .add_modifier(Modifier::BOLD),
    ),
    Span::styled(format!("  {status}"), Style::default().fg(color)),
  ]);
  f.render_widget(Paragraph::new(line).style(Style::default().bg(Color::Black)), area);
}

fn level_color(level: Level) -> Color {
  match level {
    Level::Info => Color::Cyan,
    Level::Success => Color::Green,
    Level::Warning => Color::Yellow,
    Level::Error => Color::Red,
  }
}
