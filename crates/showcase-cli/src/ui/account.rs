//! Profile, sign-in and profile-completion pages.

use ratatui::{
  Frame,
  layout::Rect,
  style::{Color, Modifier, Style},
  text::{Line, Span},
  widgets::{Paragraph, Wrap},
};
use showcase_core::{i18n::Message, user::User};

use super::{dim, draw_placeholder, pane};
use crate::app::App;

fn field(name: &str, value: Option<&str>) -> Line<'static> {
  let value = match value.filter(|v| !v.trim().is_empty()) {
    Some(v) => Span::raw(v.to_string()),
    None => Span::styled("not set", dim()),
  };
  Line::from(vec![
    Span::styled(
      format!("{name:<14}"),
      Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::BOLD),
    ),
    value,
  ])
}

fn render(f: &mut Frame, area: Rect, title: &str, lines: Vec<Line<'static>>) {
  let block = pane(title);
  let inner = block.inner(area);
  f.render_widget(block, area);
  f.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), inner);
}

pub fn draw_profile(f: &mut Frame, area: Rect, app: &App) {
  let Some(user) = app.signed_in() else {
    return draw_placeholder(f, area, "Profile", app.text(Message::LoginRequired));
  };
  let mut lines = vec![
    Line::from(Span::styled(
      user.full_name(),
      Style::default().add_modifier(Modifier::BOLD),
    )),
    Line::from(""),
    field("email", Some(user.email.as_str())),
    field("role", Some(user.role.to_string().as_str())),
    field("university id", user.university_id.as_deref()),
    field("school", user.school.as_deref()),
    field("major", user.major.as_deref()),
    field("linkedin", user.linkedin_url.as_deref()),
    field("github", user.github_url.as_deref()),
    field("starred", Some(user.starred_projects.len().to_string().as_str())),
  ];
  if user.is_deactivated {
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
      app.text(Message::AccountDeactivated),
      Style::default().fg(Color::Red),
    )));
  }
  if !user.is_profile_complete() {
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
      app.text(Message::CompleteProfile),
      Style::default().fg(Color::Yellow),
    )));
  }
  render(f, area, "Profile", lines);
}

pub fn draw_login(f: &mut Frame, area: Rect, app: &App) {
  let lines = match app.signed_in() {
    Some(user) => vec![Line::from(format!("Signed in as {} <{}>.", user.full_name(), user.email))],
    None => vec![
      Line::from("Sign in with your university account in a browser:"),
      Line::from(""),
      Line::from(Span::styled(
        app.login_url.clone(),
        Style::default()
          .fg(Color::Cyan)
          .add_modifier(Modifier::UNDERLINED),
      )),
      Line::from(""),
      Line::from("Then restart with the session cookie, e.g."),
      Line::from(Span::styled("  showcase --session <cookie>", dim())),
      Line::from("or set SHOWCASE_SESSION, and press R."),
    ],
  };
  render(f, area, "Sign in", lines);
}

pub fn draw_complete_profile(f: &mut Frame, area: Rect, app: &App) {
  let Some(user) = app.signed_in() else {
    return draw_placeholder(f, area, "Complete profile", app.text(Message::Loading));
  };
  render(f, area, "Complete profile", completion_lines(user, app));
}

fn completion_lines(user: &User, app: &App) -> Vec<Line<'static>> {
  let missing = user.missing_profile_fields();
  if missing.is_empty() {
    return vec![Line::from("Your profile is complete.")];
  }
  let mut lines = vec![
    Line::from(Span::styled(
      app.text(Message::CompleteProfile),
      Style::default().fg(Color::Yellow),
    )),
    Line::from(""),
  ];
  for (i, name) in missing.iter().enumerate() {
    let marker = if i == 0 { "> " } else { "  " };
    lines.push(Line::from(format!("{marker}{name}")));
  }
  lines.push(Line::from(""));
  lines.push(Line::from(Span::styled("Enter to fill in the next field.", dim())));
  lines
}
