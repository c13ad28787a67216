//! Project lists and the project detail page.

use ratatui::{
  Frame,
  layout::{Constraint, Direction, Layout, Rect},
  style::{Color, Modifier, Style},
  text::{Line, Span},
  widgets::{List, ListItem, ListState, Paragraph, Wrap},
};
use showcase_core::{
  Pagination,
  project::{Project, ProjectStatus},
};
use showcase_query::QueryState;

use super::{cursor_style, dim, draw_placeholder, pane, settled};
use crate::{app::App, route::Route};

fn status_color(status: ProjectStatus) -> Color {
  match status {
    ProjectStatus::PendingTa => Color::Yellow,
    ProjectStatus::Accepted => Color::Green,
    ProjectStatus::Rejected => Color::Red,
  }
}

fn project_line(project: &Project) -> Line<'static> {
  Line::from(vec![
    Span::styled(format!("★{:<4}", project.stars), Style::default().fg(Color::Yellow)),
    Span::raw(project.title.clone()),
    Span::styled(
      format!("  {}", project.technologies.join(", ")),
      dim(),
    ),
    Span::styled(
      format!("  [{}]", project.status),
      Style::default().fg(status_color(project.status)),
    ),
  ])
}

// ─── Lists ────────────────────────────────────────────────────────────────────

/// Any of the project list pages.
pub fn draw_list(f: &mut Frame, area: Rect, app: &App) {
  let (title, pagination) = match &app.route {
    Route::Projects => ("Projects", app.listing.data().map(|p| p.pagination)),
    Route::Review => ("Awaiting review", app.review.data().map(|p| p.pagination)),
    other => (other.title(), None),
  };

  let mut area = area;
  if app.route == Route::Projects {
    let rows = Layout::default()
      .direction(Direction::Vertical)
      .constraints([Constraint::Length(1), Constraint::Length(1), Constraint::Min(0)])
      .split(area);
    draw_search(f, rows[0], app);
    draw_featured(f, rows[1], app);
    area = rows[2];
  }

  let loaded = match &app.route {
    Route::Projects => settled(f, area, title, &app.listing, app).map(|_| ()),
    Route::Review => settled(f, area, title, &app.review, app).map(|_| ()),
    _ => settled(f, area, title, &app.collection, app).map(|_| ()),
  };
  if loaded.is_none() {
    return;
  }

  let projects = app.visible_projects();
  if projects.is_empty() {
    draw_placeholder(f, area, title, "No projects.");
    return;
  }

  let block = pane(&match pagination {
    Some(p) => format!("{title} ({} total, page {}/{})", p.total, p.page, p.total_pages.max(1)),
    None => format!("{title} ({})", projects.len()),
  });
  let inner = block.inner(area);
  f.render_widget(block, area);

  let items: Vec<ListItem> = projects.iter().map(|p| ListItem::new(project_line(p))).collect();
  let mut state = ListState::default();
  state.select(Some(app.cursor.min(projects.len() - 1)));
  f.render_stateful_widget(
    List::new(items).highlight_style(cursor_style()),
    inner,
    &mut state,
  );

  if let Some(p) = pagination {
    draw_pager(f, inner, p);
  }
}

fn draw_search(f: &mut Frame, area: Rect, app: &App) {
  let text = if app.search_pending() {
    format!(" /{}_ …", app.search)
  } else if app.search_active {
    format!(" /{}_", app.search)
  } else if app.search.is_empty() {
    " / to search by title".to_string()
  } else {
    format!(" /{}", app.search)
  };
  let style = if app.search_active || !app.search.is_empty() {
    Style::default().fg(Color::Yellow)
  } else {
    dim()
  };
  f.render_widget(Paragraph::new(text).style(style), area);
}

fn draw_featured(f: &mut Frame, area: Rect, app: &App) {
  let mut spans = vec![Span::styled(
    " Featured: ",
    Style::default()
      .fg(Color::Magenta)
      .add_modifier(Modifier::BOLD),
  )];
  match &app.featured {
    QueryState::Success(list) if !list.is_empty() => {
      let titles: Vec<&str> = list.iter().map(|p| p.title.as_str()).collect();
      spans.push(Span::raw(titles.join(" · ")));
    }
    QueryState::Success(_) => spans.push(Span::styled("none yet", dim())),
    QueryState::Error(e) => spans.push(Span::styled(e.to_string(), Style::default().fg(Color::Red))),
    QueryState::Idle | QueryState::Loading => spans.push(Span::styled("…", dim())),
  }
  f.render_widget(Paragraph::new(Line::from(spans)), area);
}

/// Prev/next hints on the last line of `inner`.
fn draw_pager(f: &mut Frame, inner: Rect, pagination: Pagination) {
  if inner.height < 2 {
    return;
  }
  let line = Rect { y: inner.y + inner.height - 1, height: 1, ..inner };
  let mut hints = Vec::new();
  if pagination.has_prev() {
    hints.push("p ← prev");
  }
  if pagination.has_next() {
    hints.push("n next →");
  }
  f.render_widget(
    Paragraph::new(hints.join("   ")).style(dim()).right_aligned(),
    line,
  );
}

// ─── Detail ───────────────────────────────────────────────────────────────────

pub fn draw_detail(f: &mut Frame, area: Rect, app: &App) {
  let Some(project) = settled(f, area, "Project", &app.project, app) else {
    return;
  };
  let cols = Layout::default()
    .direction(Direction::Horizontal)
    .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
    .split(area);

  let starred = app.signed_in().is_some_and(|u| u.has_starred(&project.id));
  let label = |name: &str| {
    Span::styled(
      format!("{name:<14}"),
      Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::BOLD),
    )
  };
  let field = |name: &str, value: String| Line::from(vec![label(name), Span::raw(value)]);

  let mut lines = vec![
    Line::from(vec![
      Span::styled(
        project.title.clone(),
        Style::default().add_modifier(Modifier::BOLD),
      ),
      Span::styled(
        format!("  ★ {}{}", project.stars, if starred { " (starred)" } else { "" }),
        Style::default().fg(Color::Yellow),
      ),
    ]),
    Line::from(""),
    Line::from(project.description.clone()),
    Line::from(""),
    field("status", project.status.to_string()),
    field("technologies", project.technologies.join(", ")),
  ];
  if !project.tags.is_empty() {
    lines.push(field("tags", project.tags.join(", ")));
  }
  for (name, value) in [
    ("course", &project.course),
    ("supervisor", &project.supervisor),
    ("github", &project.github_url),
    ("live", &project.live_url),
    ("video", &project.video_url),
  ] {
    if let Some(value) = value {
      lines.push(field(name, value.clone()));
    }
  }
  if let Some(leader) = &project.team_leader {
    lines.push(field("leader", format!("{} <{}>", leader.name, leader.email)));
  }
  for member in &project.team_members {
    lines.push(field("member", format!("{} <{}>", member.name, member.email)));
  }
  if !project.images.is_empty() {
    lines.push(field("images", project.images.len().to_string()));
  }

  let block = pane("Project");
  let inner = block.inner(cols[0]);
  f.render_widget(block, cols[0]);
  f.render_widget(
    Paragraph::new(lines)
      .wrap(Wrap { trim: false })
      .scroll((app.detail_scroll as u16, 0)),
    inner,
  );

  draw_comments(f, cols[1], app);
}

fn draw_comments(f: &mut Frame, area: Rect, app: &App) {
  let Some(comments) = settled(f, area, "Comments", &app.comments, app) else {
    return;
  };
  if comments.is_empty() {
    draw_placeholder(f, area, "Comments", "No comments yet. Press c to add one.");
    return;
  }
  let mut lines = Vec::new();
  for comment in comments {
    let when = comment
      .created_at
      .map(|t| t.format("%Y-%m-%d").to_string())
      .unwrap_or_default();
    lines.push(Line::from(vec![
      Span::styled(
        format!("{} {}", comment.user.first_name, comment.user.last_name),
        Style::default().fg(Color::Cyan),
      ),
      Span::styled(format!("  {when}"), dim()),
    ]));
    lines.push(Line::from(comment.content.clone()));
    lines.push(Line::from(""));
  }
  let block = pane(&format!("Comments ({})", comments.len()));
  let inner = block.inner(area);
  f.render_widget(block, area);
  f.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), inner);
}
