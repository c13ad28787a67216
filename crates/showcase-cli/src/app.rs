//! Application state machine and event dispatcher.

use std::{collections::VecDeque, path::PathBuf, sync::Arc, time::Instant};

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use fuzzy_matcher::{FuzzyMatcher, skim::SkimMatcherV2};
use showcase_client::{
  comments::CommentFilters, projects::ProjectFilters, users::UserFilters,
};
use showcase_core::{
  ClientError, Page, PageRequest,
  catalog::{Comment, CourseInput, NewSuggestion, SchoolInput, StatusNotice},
  i18n::{Language, Message},
  project::{Project, ProjectStatus, StarAction},
  user::{ProfileUpdate, Role, User},
};
use showcase_guard::{GuardRunner, GuardState, Level, Navigator, Notice, Notifier};
use showcase_query::{CacheEvent, Hooks, QueryState};
use tokio::sync::broadcast::{Receiver, error::TryRecvError};

use crate::{
  debounce::Debouncer,
  prefs::{AdminSection, Preferences},
  route::Route,
};

/// How long a toast stays in the status bar.
const TOAST_TTL: std::time::Duration = std::time::Duration::from_secs(4);

/// Rows fetched for each admin table.
const ADMIN_PAGE: PageRequest = PageRequest { page: 1, limit: 100 };

/// Redirects followed in one navigation before giving up.
const MAX_REDIRECTS: usize = 4;

// ─── Toasts ───────────────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct Toast {
  pub level: Level,
  pub text:  String,
  pub at:    Instant,
}

/// Transient status-bar messages, newest last.
#[derive(Debug, Default)]
pub struct Toasts {
  pub language: Language,
  items:        VecDeque<Toast>,
}

impl Toasts {
  pub fn push(&mut self, level: Level, text: impl Into<String>) {
    if self.items.len() >= 16 {
      self.items.pop_front();
    }
    self.items.push_back(Toast { level, text: text.into(), at: Instant::now() });
  }

  pub fn message(&mut self, level: Level, message: Message) {
    let text = message.text(self.language);
    self.push(level, text);
  }

  pub fn error(&mut self, err: &ClientError) {
    tracing::warn!(error = %err, "action failed");
    self.push(Level::Error, err.to_string());
  }

  /// The newest toast, while it is still on screen.
  pub fn current(&self) -> Option<&Toast> {
    self.items.back().filter(|t| t.at.elapsed() < TOAST_TTL)
  }

  #[cfg(test)]
  pub fn history(&self) -> impl Iterator<Item = &Toast> { self.items.iter() }
}

impl Notifier for Toasts {
  fn notify(&mut self, notice: Notice) { self.message(notice.level, notice.message); }
}

/// Captures the guard's redirect so the app can follow it after the check.
#[derive(Default)]
struct Redirect(Option<String>);

impl Navigator for Redirect {
  fn redirect(&mut self, path: &str) { self.0 = Some(path.to_string()); }
}

// ─── Prompts ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromptKind {
  Comment,
  BugReport,
  /// `CODE Title`
  NewCourse,
  /// `Name: major, major`
  NewSchool,
  /// One missing profile field, by wire name.
  ProfileField(&'static str),
}

impl PromptKind {
  pub fn label(&self) -> &'static str {
    match self {
      Self::Comment => "Comment",
      Self::BugReport => "Report a problem",
      Self::NewCourse => "New course (CODE Title)",
      Self::NewSchool => "New school (Name: major, major)",
      Self::ProfileField(field) => field,
    }
  }
}

#[derive(Debug, Clone)]
pub struct Prompt {
  pub kind:  PromptKind,
  pub input: String,
}

// ─── Admin rows ───────────────────────────────────────────────────────────────

/// One line of an admin table, whatever the section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminRow {
  pub id:          String,
  pub title:       String,
  pub detail:      String,
  pub role:        Option<Role>,
  pub deactivated: bool,
}

impl AdminRow {
  fn new(id: &str, title: impl Into<String>, detail: impl Into<String>) -> Self {
    Self {
      id:          id.to_string(),
      title:       title.into(),
      detail:      detail.into(),
      role:        None,
      deactivated: false,
    }
  }
}

fn map_state<T, U>(state: QueryState<T>, f: impl FnOnce(&T) -> U) -> QueryState<U> {
  match state {
    QueryState::Idle => QueryState::Idle,
    QueryState::Loading => QueryState::Loading,
    QueryState::Success(data) => QueryState::Success(Arc::new(f(&data))),
    QueryState::Error(e) => QueryState::Error(e),
  }
}

// ─── App ──────────────────────────────────────────────────────────────────────

/// Top-level application state.
pub struct App {
  pub hooks:      Hooks,
  pub prefs:      Preferences,
  prefs_path:     PathBuf,
  pub route:      Route,
  /// Where `Esc` goes from a project detail page.
  back:           Route,
  guard:          GuardRunner,
  pub access:     GuardState,
  pub user:       QueryState<User>,
  pub toasts:     Toasts,
  pub prompt:     Option<Prompt>,
  pub login_url:  String,
  /// Invalidations made anywhere through the shared cache.
  events:         Receiver<CacheEvent>,

  // ── Project lists ─────────────────────────────────────────────────────────
  pub search:        String,
  pub search_active: bool,
  debouncer:         Debouncer,
  pub page:          PageRequest,
  pub listing:       QueryState<Page<Project>>,
  pub featured:      QueryState<Vec<Project>>,
  /// Starred or own projects, depending on the route.
  pub collection:    QueryState<Vec<Project>>,
  pub review_page:   PageRequest,
  pub review:        QueryState<Page<Project>>,
  pub cursor:        usize,

  // ── Detail ────────────────────────────────────────────────────────────────
  pub project:       QueryState<Project>,
  pub comments:      QueryState<Vec<Comment>>,
  pub detail_scroll: usize,

  // ── Admin ─────────────────────────────────────────────────────────────────
  pub admin_rows:    QueryState<Vec<AdminRow>>,
  pub filter:        String,
  pub filter_active: bool,
}

impl App {
  pub fn new(hooks: Hooks, prefs: Preferences, prefs_path: PathBuf) -> Self {
    let login_url = hooks.client().auth().login_url();
    let toasts = Toasts { language: prefs.language, ..Default::default() };
    let events = hooks.cache().subscribe();
    Self {
      hooks,
      prefs,
      prefs_path,
      route: Route::Projects,
      back: Route::Projects,
      guard: GuardRunner::new(Route::Projects.guards()),
      access: GuardState::Checking,
      user: QueryState::Loading,
      toasts,
      prompt: None,
      login_url,
      events,
      search: String::new(),
      search_active: false,
      debouncer: Debouncer::default(),
      page: PageRequest::first(),
      listing: QueryState::Loading,
      featured: QueryState::Idle,
      collection: QueryState::Idle,
      review_page: PageRequest::first(),
      review: QueryState::Idle,
      cursor: 0,
      project: QueryState::Idle,
      comments: QueryState::Idle,
      detail_scroll: 0,
      admin_rows: QueryState::Idle,
      filter: String::new(),
      filter_active: false,
    }
  }

  pub fn language(&self) -> Language { self.prefs.language }

  pub fn text(&self, message: Message) -> &'static str { message.text(self.prefs.language) }

  pub fn signed_in(&self) -> Option<&User> { self.user.data() }

  fn save_prefs(&mut self) {
    if let Err(e) = self.prefs.save(&self.prefs_path) {
      tracing::warn!(error = %e, "could not save preferences");
      self.toasts.push(Level::Warning, format!("Preferences not saved: {e}"));
    }
  }

  // ── Navigation ────────────────────────────────────────────────────────────

  /// Switch to `route`, run its guards (following any redirect), then load
  /// the page's data.
  pub async fn navigate(&mut self, route: Route) {
    if !matches!(route, Route::ProjectDetail(_)) {
      self.back = route.clone();
    }
    let mut next = route;
    for _ in 0..MAX_REDIRECTS {
      tracing::debug!(route = %next, "navigating");
      self.enter(next);
      match self.authorize().await {
        Some(redirect) => next = redirect,
        None => break,
      }
    }
    if self.access != GuardState::Unauthorized {
      self.load().await;
    }
  }

  fn enter(&mut self, route: Route) {
    self.guard.replace(route.guards());
    self.route = route;
    self.cursor = 0;
    self.detail_scroll = 0;
    self.prompt = None;
    self.search_active = false;
    self.filter_active = false;
    self.filter.clear();
  }

  /// Refresh the principal and evaluate the current route's guards. Returns
  /// the redirect to follow, if access was just denied.
  async fn authorize(&mut self) -> Option<Route> {
    self.user = self.hooks.current_user().await;
    let mut redirect = Redirect::default();
    self.access = self.guard.check(&self.user, &mut redirect, &mut self.toasts);
    let path = redirect.0?;
    let target = Route::parse(&path);
    if target.is_none() {
      tracing::warn!(%path, "guard redirected to an unknown route");
    }
    target
  }

  /// Fetch whatever the current page shows.
  pub async fn load(&mut self) {
    match self.route.clone() {
      Route::Projects => {
        self.load_listing().await;
        self.featured = self.hooks.featured_projects().await;
      }
      Route::ProjectDetail(id) => {
        self.project = self.hooks.project(&id).await;
        self.comments = self.hooks.project_comments(&id).await;
      }
      Route::Starred => self.collection = self.hooks.starred_projects().await,
      Route::MyProjects => self.collection = self.hooks.my_projects().await,
      Route::Review => self.review = self.hooks.review_queue(self.review_page).await,
      Route::Admin => self.load_admin().await,
      Route::Profile | Route::Login | Route::CompleteProfile => {}
    }
  }

  fn filters(&self) -> ProjectFilters { ProjectFilters::with_title(self.search.clone()) }

  async fn load_listing(&mut self) {
    let filters = self.filters();
    self.listing = self.hooks.projects(self.page, &filters).await;
  }

  async fn load_admin(&mut self) {
    let hooks = &self.hooks;
    self.admin_rows = match self.prefs.admin_menu {
      AdminSection::Users => map_state(
        hooks.users(ADMIN_PAGE, &UserFilters::default()).await,
        |page| {
          page
            .data
            .iter()
            .map(|u| AdminRow {
              role: Some(u.role),
              deactivated: u.is_deactivated,
              ..AdminRow::new(&u.id, u.full_name(), u.email.clone())
            })
            .collect()
        },
      ),
      AdminSection::Courses => map_state(hooks.all_courses().await, |courses| {
        courses
          .iter()
          .map(|c| AdminRow::new(&c.id, c.code.clone(), c.title.clone()))
          .collect()
      }),
      AdminSection::Schools => map_state(hooks.schools().await, |schools| {
        schools
          .iter()
          .map(|s| AdminRow::new(&s.id, s.name.clone(), s.majors.join(", ")))
          .collect()
      }),
      AdminSection::Comments => map_state(
        hooks.comments(ADMIN_PAGE, &CommentFilters::default()).await,
        |page| {
          page
            .data
            .iter()
            .map(|c| {
              let author = format!("{} {}", c.user.first_name, c.user.last_name);
              AdminRow::new(&c.id, c.content.clone(), author.trim())
            })
            .collect()
        },
      ),
      AdminSection::Suggestions => map_state(hooks.suggestions(ADMIN_PAGE).await, |page| {
        page
          .data
          .iter()
          .map(|s| {
            let author = s.user.as_ref().map(|u| u.email.clone()).unwrap_or_default();
            AdminRow::new(&s.id, s.content.clone(), author)
          })
          .collect()
      }),
    };
  }

  /// Drop every cached entry and reload the current route.
  pub async fn reload(&mut self) {
    self.hooks.cache().clear();
    self.navigate(self.route.clone()).await;
  }

  /// Run the live search once the input has been quiet long enough.
  pub async fn tick(&mut self) {
    if self.debouncer.poll(Instant::now()) {
      self.page = PageRequest::first();
      self.cursor = 0;
      self.load_listing().await;
    }
    if self.cache_went_stale() {
      tracing::debug!(route = %self.route.path(), "cache invalidated, reloading page");
      self.load().await;
    }
  }

  /// Drain pending cache events; true if any invalidated or removed entries.
  fn cache_went_stale(&mut self) -> bool {
    let mut stale = false;
    loop {
      match self.events.try_recv() {
        Ok(CacheEvent::Updated(_)) => {}
        Ok(CacheEvent::Invalidated { entries, .. } | CacheEvent::Removed { entries, .. }) => {
          stale |= entries > 0;
        }
        // Missed events; assume the worst.
        Err(TryRecvError::Lagged(_)) => stale = true,
        Err(TryRecvError::Empty | TryRecvError::Closed) => return stale,
      }
    }
  }

  /// Whether a typed search is waiting for its quiet period.
  pub fn search_pending(&self) -> bool { self.debouncer.is_pending() }

  /// The signed-in user, or a sign-in prompt and a trip to the login page.
  async fn require_user(&mut self) -> Option<Arc<User>> {
    if let QueryState::Success(user) = &self.user {
      return Some(user.clone());
    }
    self.toasts.message(Level::Warning, Message::LoginRequired);
    self.navigate(Route::Login).await;
    None
  }

  // ── Lists ─────────────────────────────────────────────────────────────────

  /// Projects shown by the current list page.
  pub fn visible_projects(&self) -> &[Project] {
    let list = match self.route {
      Route::Projects => self.listing.data().map(|p| p.data.as_slice()),
      Route::Starred | Route::MyProjects => self.collection.data().map(Vec::as_slice),
      Route::Review => self.review.data().map(|p| p.data.as_slice()),
      _ => None,
    };
    list.unwrap_or_default()
  }

  pub fn cursor_project(&self) -> Option<&Project> { self.visible_projects().get(self.cursor) }

  /// Admin rows matching the local filter.
  pub fn filtered_rows(&self) -> Vec<&AdminRow> {
    let Some(rows) = self.admin_rows.data() else {
      return Vec::new();
    };
    if self.filter.is_empty() {
      return rows.iter().collect();
    }
    let matcher = SkimMatcherV2::default();
    rows
      .iter()
      .filter(|r| {
        matcher.fuzzy_match(&r.title, &self.filter).is_some()
          || matcher.fuzzy_match(&r.detail, &self.filter).is_some()
      })
      .collect()
  }

  pub fn cursor_row(&self) -> Option<&AdminRow> { self.filtered_rows().get(self.cursor).copied() }

  fn list_len(&self) -> usize {
    match self.route {
      Route::Admin => self.filtered_rows().len(),
      _ => self.visible_projects().len(),
    }
  }

  fn move_cursor(&mut self, down: bool) {
    let len = self.list_len();
    if down && self.cursor + 1 < len {
      self.cursor += 1;
    } else if !down && self.cursor > 0 {
      self.cursor -= 1;
    }
  }

  // ── Key handling ──────────────────────────────────────────────────────────

  /// Process a key event. Returns `true` to continue, `false` to quit.
  pub async fn handle_key(&mut self, key: KeyEvent) -> bool {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
      return false;
    }

    if self.prompt.is_some() {
      self.handle_prompt_key(key).await;
      return true;
    }
    if self.search_active {
      self.handle_search_key(key).await;
      return true;
    }
    if self.filter_active {
      self.handle_filter_key(key);
      return true;
    }

    match key.code {
      KeyCode::Char('q') => return false,
      KeyCode::Char(c @ '1'..='7') => {
        let index = c as usize - '1' as usize;
        self.navigate(Route::TABS[index].clone()).await;
        return true;
      }
      KeyCode::Char('!') => {
        self.prompt = Some(Prompt { kind: PromptKind::BugReport, input: String::new() });
        return true;
      }
      KeyCode::Char('T') => {
        self.prefs.language = self.prefs.language.toggled();
        self.toasts.language = self.prefs.language;
        self.save_prefs();
        return true;
      }
      KeyCode::Char('R') => {
        self.reload().await;
        return true;
      }
      _ => {}
    }

    if self.access != GuardState::Authorized && !self.route.guards().is_open() {
      return true;
    }

    match self.route.clone() {
      Route::Projects => self.handle_projects_key(key).await,
      Route::ProjectDetail(id) => self.handle_detail_key(key, &id).await,
      Route::Starred | Route::MyProjects => self.handle_collection_key(key).await,
      Route::Review => self.handle_review_key(key).await,
      Route::Admin => self.handle_admin_key(key).await,
      Route::Profile => self.handle_profile_key(key).await,
      Route::CompleteProfile => self.handle_complete_profile_key(key),
      Route::Login => {}
    }
    true
  }

  async fn open_cursor_project(&mut self) {
    if let Some(id) = self.cursor_project().map(|p| p.id.clone()) {
      self.navigate(Route::ProjectDetail(id)).await;
    }
  }

  async fn handle_projects_key(&mut self, key: KeyEvent) {
    match key.code {
      KeyCode::Down | KeyCode::Char('j') => self.move_cursor(true),
      KeyCode::Up | KeyCode::Char('k') => self.move_cursor(false),
      KeyCode::Enter | KeyCode::Right | KeyCode::Char('l') => self.open_cursor_project().await,
      KeyCode::Char('/') => self.search_active = true,
      KeyCode::Char('n') | KeyCode::PageDown => {
        if self.listing.data().is_some_and(|p| p.pagination.has_next()) {
          self.page = self.page.next();
          self.cursor = 0;
          self.load_listing().await;
        }
      }
      KeyCode::Char('p') | KeyCode::PageUp => {
        if self.page.page > 1 {
          self.page = self.page.prev();
          self.cursor = 0;
          self.load_listing().await;
        }
      }
      _ => {}
    }
  }

  async fn handle_search_key(&mut self, key: KeyEvent) {
    match key.code {
      KeyCode::Esc => {
        self.search_active = false;
        self.debouncer.cancel();
        if !self.search.is_empty() {
          self.search.clear();
          self.page = PageRequest::first();
          self.load_listing().await;
        }
      }
      KeyCode::Enter => {
        self.search_active = false;
        self.debouncer.cancel();
        self.page = PageRequest::first();
        self.cursor = 0;
        self.load_listing().await;
      }
      KeyCode::Backspace => {
        self.search.pop();
        self.debouncer.reset(Instant::now());
      }
      KeyCode::Char(c) => {
        self.search.push(c);
        self.debouncer.reset(Instant::now());
      }
      _ => {}
    }
  }

  async fn handle_detail_key(&mut self, key: KeyEvent, id: &str) {
    match key.code {
      KeyCode::Esc | KeyCode::Left | KeyCode::Char('h') => {
        let back = self.back.clone();
        self.navigate(back).await;
      }
      KeyCode::Down | KeyCode::Char('j') => self.detail_scroll += 1,
      KeyCode::Up | KeyCode::Char('k') => self.detail_scroll = self.detail_scroll.saturating_sub(1),
      KeyCode::Char('s') => self.toggle_star(id).await,
      KeyCode::Char('c') => {
        if self.require_user().await.is_some() {
          self.prompt = Some(Prompt { kind: PromptKind::Comment, input: String::new() });
        }
      }
      _ => {}
    }
  }

  async fn toggle_star(&mut self, id: &str) {
    let Some(user) = self.require_user().await else {
      return;
    };
    let action = StarAction::toggle(user.has_starred(id));
    match self.hooks.star_project(id, action).await {
      Ok(text) => {
        let fallback = match action {
          StarAction::Add => Message::ProjectStarred,
          StarAction::Remove => Message::ProjectUnstarred,
        };
        if text.trim().is_empty() {
          self.toasts.message(Level::Success, fallback);
        } else {
          self.toasts.push(Level::Success, text);
        }
        self.user = self.hooks.current_user().await;
        self.project = self.hooks.project(id).await;
      }
      Err(e) => self.toasts.error(&e),
    }
  }

  async fn handle_collection_key(&mut self, key: KeyEvent) {
    match key.code {
      KeyCode::Down | KeyCode::Char('j') => self.move_cursor(true),
      KeyCode::Up | KeyCode::Char('k') => self.move_cursor(false),
      KeyCode::Enter | KeyCode::Right | KeyCode::Char('l') => self.open_cursor_project().await,
      KeyCode::Char('x') if self.route == Route::MyProjects => {
        let Some(id) = self.cursor_project().map(|p| p.id.clone()) else {
          return;
        };
        match self.hooks.delete_project(&id).await {
          Ok(_) => {
            self.toasts.message(Level::Success, Message::Deleted);
            self.cursor = self.cursor.saturating_sub(1);
            self.load().await;
          }
          Err(e) => self.toasts.error(&e),
        }
      }
      _ => {}
    }
  }

  async fn handle_review_key(&mut self, key: KeyEvent) {
    match key.code {
      KeyCode::Down | KeyCode::Char('j') => self.move_cursor(true),
      KeyCode::Up | KeyCode::Char('k') => self.move_cursor(false),
      KeyCode::Enter | KeyCode::Right | KeyCode::Char('l') => self.open_cursor_project().await,
      KeyCode::Char('a') => self.decide(ProjectStatus::Accepted).await,
      KeyCode::Char('x') => self.decide(ProjectStatus::Rejected).await,
      KeyCode::Char('n') | KeyCode::PageDown => {
        if self.review.data().is_some_and(|p| p.pagination.has_next()) {
          self.review_page = self.review_page.next();
          self.cursor = 0;
          self.load().await;
        }
      }
      KeyCode::Char('p') | KeyCode::PageUp => {
        if self.review_page.page > 1 {
          self.review_page = self.review_page.prev();
          self.cursor = 0;
          self.load().await;
        }
      }
      _ => {}
    }
  }

  /// Record a review decision, then tell the team.
  async fn decide(&mut self, status: ProjectStatus) {
    let Some(id) = self.cursor_project().map(|p| p.id.clone()) else {
      return;
    };
    if let Err(e) = self.hooks.set_project_status(&id, status).await {
      self.toasts.error(&e);
      return;
    }
    self.toasts.message(Level::Success, Message::StatusUpdated);
    let notice = StatusNotice { project_id: id, status, message: None };
    if let Err(e) = self.hooks.notify_project_status(notice).await {
      self.toasts.error(&e);
    }
    self.cursor = self.cursor.saturating_sub(1);
    self.load().await;
  }

  async fn handle_admin_key(&mut self, key: KeyEvent) {
    match key.code {
      KeyCode::Down | KeyCode::Char('j') => self.move_cursor(true),
      KeyCode::Up | KeyCode::Char('k') => self.move_cursor(false),
      KeyCode::Tab | KeyCode::Right => self.switch_section(self.prefs.admin_menu.next()).await,
      KeyCode::BackTab | KeyCode::Left => self.switch_section(self.prefs.admin_menu.prev()).await,
      KeyCode::Char('[') => {
        self.prefs.sidebar_collapsed = !self.prefs.sidebar_collapsed;
        self.save_prefs();
      }
      KeyCode::Char('/') => {
        self.filter_active = true;
        self.filter.clear();
        self.cursor = 0;
      }
      KeyCode::Char('n') => {
        let kind = match self.prefs.admin_menu {
          AdminSection::Courses => PromptKind::NewCourse,
          AdminSection::Schools => PromptKind::NewSchool,
          _ => return,
        };
        self.prompt = Some(Prompt { kind, input: String::new() });
      }
      KeyCode::Char('r') => self.cycle_role().await,
      KeyCode::Char('d') => self.toggle_deactivated().await,
      KeyCode::Char('x') => self.delete_row().await,
      _ => {}
    }
  }

  async fn switch_section(&mut self, section: AdminSection) {
    self.prefs.admin_menu = section;
    self.save_prefs();
    self.cursor = 0;
    self.filter.clear();
    self.load_admin().await;
  }

  fn handle_filter_key(&mut self, key: KeyEvent) {
    match key.code {
      KeyCode::Esc => {
        self.filter_active = false;
        self.filter.clear();
        self.cursor = 0;
      }
      KeyCode::Enter => {
        self.filter_active = false;
        self.cursor = 0;
      }
      KeyCode::Backspace => {
        self.filter.pop();
        self.cursor = 0;
      }
      KeyCode::Char(c) => {
        self.filter.push(c);
        self.cursor = 0;
      }
      _ => {}
    }
  }

  async fn cycle_role(&mut self) {
    if self.prefs.admin_menu != AdminSection::Users {
      return;
    }
    let Some((id, role)) = self.cursor_row().and_then(|r| Some((r.id.clone(), r.role?))) else {
      return;
    };
    let next = match role {
      Role::Student => Role::Supervisor,
      Role::Supervisor => Role::Admin,
      Role::Admin => Role::Student,
    };
    match self.hooks.set_user_role(&id, next).await {
      Ok(_) => {
        self.toasts.message(Level::Success, Message::RoleUpdated);
        self.load_admin().await;
      }
      Err(e) => self.toasts.error(&e),
    }
  }

  async fn toggle_deactivated(&mut self) {
    if self.prefs.admin_menu != AdminSection::Users {
      return;
    }
    let Some((id, deactivated)) = self.cursor_row().map(|r| (r.id.clone(), r.deactivated)) else {
      return;
    };
    match self.hooks.set_user_deactivated(&id, !deactivated).await {
      Ok(_) => {
        let message =
          if deactivated { Message::UserReactivated } else { Message::UserDeactivated };
        self.toasts.message(Level::Success, message);
        self.load_admin().await;
      }
      Err(e) => self.toasts.error(&e),
    }
  }

  async fn delete_row(&mut self) {
    let Some(id) = self.cursor_row().map(|r| r.id.clone()) else {
      return;
    };
    let (result, message) = match self.prefs.admin_menu {
      AdminSection::Users => return,
      AdminSection::Courses => (self.hooks.delete_course(&id).await, Message::Deleted),
      AdminSection::Schools => (self.hooks.delete_school(&id).await, Message::Deleted),
      AdminSection::Comments => (self.hooks.delete_comment(&id).await, Message::CommentDeleted),
      AdminSection::Suggestions => (self.hooks.delete_suggestion(&id).await, Message::Deleted),
    };
    match result {
      Ok(_) => {
        self.toasts.message(Level::Success, message);
        self.cursor = self.cursor.saturating_sub(1);
        self.load_admin().await;
      }
      Err(e) => self.toasts.error(&e),
    }
  }

  async fn handle_profile_key(&mut self, key: KeyEvent) {
    match key.code {
      KeyCode::Char('e') => self.navigate(Route::CompleteProfile).await,
      KeyCode::Char('o') => match self.hooks.logout().await {
        Ok(_) => {
          self.toasts.message(Level::Info, Message::LoggedOut);
          self.navigate(Route::Projects).await;
        }
        Err(e) => self.toasts.error(&e),
      },
      _ => {}
    }
  }

  fn handle_complete_profile_key(&mut self, key: KeyEvent) {
    if key.code != KeyCode::Enter {
      return;
    }
    let field = self
      .signed_in()
      .and_then(|u| u.missing_profile_fields().first().copied());
    if let Some(field) = field {
      self.prompt = Some(Prompt { kind: PromptKind::ProfileField(field), input: String::new() });
    }
  }

  // ── Prompts ───────────────────────────────────────────────────────────────

  async fn handle_prompt_key(&mut self, key: KeyEvent) {
    let Some(prompt) = self.prompt.as_mut() else {
      return;
    };
    match key.code {
      KeyCode::Esc => self.prompt = None,
      KeyCode::Backspace => {
        prompt.input.pop();
      }
      KeyCode::Char(c) => prompt.input.push(c),
      KeyCode::Enter => {
        if let Some(prompt) = self.prompt.take() {
          self.submit(prompt).await;
        }
      }
      _ => {}
    }
  }

  async fn submit(&mut self, prompt: Prompt) {
    let input = prompt.input.trim().to_string();
    match prompt.kind {
      PromptKind::Comment => {
        let Route::ProjectDetail(id) = self.route.clone() else {
          return;
        };
        match self.hooks.create_comment(&id, &input).await {
          Ok(_) => {
            self.toasts.message(Level::Success, Message::CommentAdded);
            self.comments = self.hooks.project_comments(&id).await;
          }
          Err(e) => self.toasts.error(&e),
        }
      }
      PromptKind::BugReport => {
        let suggestion = NewSuggestion { content: input, image: None };
        match self.hooks.create_suggestion(suggestion).await {
          Ok(_) => self.toasts.message(Level::Success, Message::SuggestionSent),
          Err(e) => self.toasts.error(&e),
        }
      }
      PromptKind::NewCourse => {
        let (code, title) = input.split_once(' ').unwrap_or((input.as_str(), ""));
        let course = CourseInput { code: code.to_string(), title: title.trim().to_string() };
        match self.hooks.create_course(course).await {
          Ok(_) => self.load_admin().await,
          Err(e) => self.toasts.error(&e),
        }
      }
      PromptKind::NewSchool => {
        let (name, majors) = input.split_once(':').unwrap_or((input.as_str(), ""));
        let school = SchoolInput {
          name:   name.trim().to_string(),
          majors: majors.split(',').map(str::to_string).collect(),
        };
        match self.hooks.create_school(school.normalized()).await {
          Ok(_) => self.load_admin().await,
          Err(e) => self.toasts.error(&e),
        }
      }
      PromptKind::ProfileField(field) => self.save_profile_field(field, input).await,
    }
  }

  async fn save_profile_field(&mut self, field: &'static str, value: String) {
    let value = Some(value);
    let mut update = ProfileUpdate::default();
    match field {
      "linkedInUrl" => update.linkedin_url = value,
      "githubUrl" => update.github_url = value,
      "universityId" => update.university_id = value,
      "school" => update.school = value,
      "major" => update.major = value,
      _ => return,
    }
    match self.hooks.update_profile(update).await {
      Ok(_) => {
        self.user = self.hooks.current_user().await;
        if self.signed_in().is_some_and(User::is_profile_complete) {
          self.navigate(Route::Profile).await;
        }
      }
      Err(e) => self.toasts.error(&e),
    }
  }
}
