//! App-level navigation tests against an in-process axum backend.

use std::{
  collections::HashMap,
  sync::{Arc, Mutex},
  time::Duration,
};

use axum::{
  Json, Router,
  extract::State,
  http::{Method, StatusCode, Uri},
  response::{IntoResponse, Response},
};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use serde_json::{Value, json};
use showcase_client::{ApiConfig, ShowcaseClient};
use showcase_core::i18n::{Language, Message};
use showcase_guard::{GuardState, Level};
use showcase_query::{Hooks, QueryCache, QueryOptions, keys};
use tempfile::TempDir;

use crate::{app::App, prefs::Preferences, route::Route};

// ─── Fake backend ────────────────────────────────────────────────────────────

#[derive(Clone, Default)]
struct Backend {
  routes: Arc<HashMap<String, (StatusCode, Value)>>,
  hits:   Arc<Mutex<HashMap<String, usize>>>,
}

async fn handle(State(backend): State<Backend>, method: Method, uri: Uri) -> Response {
  let path = uri.path().strip_prefix("/api").unwrap_or(uri.path());
  let route = format!("{method} {path}");
  *backend.hits.lock().unwrap().entry(route.clone()).or_default() += 1;
  match backend.routes.get(&route) {
    Some((status, body)) => (*status, Json(body.clone())).into_response(),
    None => (StatusCode::NOT_IMPLEMENTED, "no route").into_response(),
  }
}

struct Fixture {
  app:  App,
  hits: Arc<Mutex<HashMap<String, usize>>>,
  dir:  TempDir,
}

impl Fixture {
  fn hits(&self, route: &str) -> usize {
    self.hits.lock().unwrap().get(route).copied().unwrap_or(0)
  }

  fn toasts_saying(&self, message: Message) -> usize {
    let text = message.text(Language::En);
    self.app.toasts.history().filter(|t| t.text == text).count()
  }
}

async fn spawn(me: (StatusCode, Value), routes: Vec<(&str, Value)>) -> Fixture {
  let mut table: HashMap<String, (StatusCode, Value)> = routes
    .into_iter()
    .map(|(r, body)| (r.to_string(), (StatusCode::OK, body)))
    .collect();
  table.insert("GET /auth/me".into(), me);
  table.entry("GET /project".into()).or_insert((StatusCode::OK, empty_page()));
  table.entry("GET /project/featured".into()).or_insert((StatusCode::OK, json!([])));

  let backend = Backend { routes: Arc::new(table), ..Default::default() };
  let hits = backend.hits.clone();
  let router = Router::new().fallback(handle).with_state(backend);

  let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
  let addr = listener.local_addr().unwrap();
  tokio::spawn(async move { axum::serve(listener, router).await.unwrap() });

  let client = ShowcaseClient::new(ApiConfig {
    base_url: format!("http://{addr}/api"),
    ..Default::default()
  })
  .unwrap();
  let hooks = Hooks::new(client, QueryCache::new())
    .with_defaults(QueryOptions { retry_delay: Duration::ZERO, ..Default::default() });

  let dir = TempDir::new().unwrap();
  let app = App::new(hooks, Preferences::default(), dir.path().join("preferences.toml"));
  Fixture { app, hits, dir }
}

fn user(role: &str) -> (StatusCode, Value) {
  (
    StatusCode::OK,
    json!({
      "_id": "u1",
      "firstName": "Sara",
      "lastName": "Ali",
      "email": "sara@uni.edu",
      "role": role,
      "linkedInUrl": "https://linkedin.com/in/sara",
      "githubUrl": "https://github.com/sara",
      "universityId": "2020123",
      "school": "Engineering",
      "major": "Computer Science"
    }),
  )
}

fn anonymous() -> (StatusCode, Value) {
  (StatusCode::UNAUTHORIZED, json!({ "message": "Not authenticated" }))
}

fn empty_page() -> Value {
  json!({
    "projects": [],
    "pagination": { "page": 1, "limit": 10, "total": 0, "totalPages": 0 }
  })
}

fn key(code: KeyCode) -> KeyEvent { KeyEvent::new(code, KeyModifiers::NONE) }

// ─── Guards ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn student_is_turned_away_from_admin_once() {
  let mut fx = spawn(user("student"), vec![]).await;

  fx.app.navigate(Route::Admin).await;

  assert_eq!(fx.app.route, Route::Projects);
  assert_eq!(fx.app.access, GuardState::Authorized);
  assert_eq!(fx.toasts_saying(Message::InsufficientPermissions), 1);
  assert_eq!(fx.app.toasts.current().map(|t| t.level), Some(Level::Warning));
  assert_eq!(fx.hits("GET /user"), 0, "admin data must not load");
}

#[tokio::test]
async fn anonymous_visitor_is_sent_to_sign_in() {
  let mut fx = spawn(anonymous(), vec![]).await;

  fx.app.navigate(Route::Starred).await;

  assert_eq!(fx.app.route, Route::Login);
  assert_eq!(fx.toasts_saying(Message::LoginRequired), 1);
  assert_eq!(fx.hits("GET /project/starred"), 0);
}

#[tokio::test]
async fn deactivated_account_cannot_reach_own_projects() {
  let (status, mut body) = user("student");
  body["isDeactivated"] = json!(true);
  let mut fx = spawn((status, body), vec![]).await;

  fx.app.navigate(Route::MyProjects).await;

  assert_eq!(fx.app.route, Route::Projects);
  assert_eq!(fx.toasts_saying(Message::AccountDeactivated), 1);
  assert_eq!(fx.hits("GET /project/mine"), 0);
}

#[tokio::test]
async fn incomplete_profile_is_sent_to_completion() {
  let (status, mut body) = user("student");
  body["major"] = Value::Null;
  let mut fx = spawn((status, body), vec![]).await;

  fx.app.navigate(Route::MyProjects).await;

  assert_eq!(fx.app.route, Route::CompleteProfile);
  assert_eq!(fx.toasts_saying(Message::CompleteProfile), 1);
}

#[tokio::test]
async fn admin_sees_the_user_table() {
  let page = json!({
    "data": [{ "_id": "u2", "firstName": "Omar", "email": "omar@uni.edu", "role": "supervisor" }],
    "pagination": { "page": 1, "limit": 100, "total": 1, "totalPages": 1 }
  });
  let mut fx = spawn(user("admin"), vec![("GET /user", page)]).await;

  fx.app.navigate(Route::Admin).await;

  assert_eq!(fx.app.route, Route::Admin);
  assert_eq!(fx.app.access, GuardState::Authorized);
  let rows = fx.app.filtered_rows();
  assert_eq!(rows.len(), 1);
  assert_eq!(rows[0].detail, "omar@uni.edu");
  assert_eq!(fx.app.toasts.history().count(), 0);
}

#[tokio::test]
async fn admin_also_passes_the_review_guard() {
  let mut fx = spawn(user("admin"), vec![("GET /project/ta", empty_page())]).await;

  fx.app.navigate(Route::Review).await;

  assert_eq!(fx.app.route, Route::Review);
  assert_eq!(fx.hits("GET /project/ta"), 1);
}

// ─── Cache ───────────────────────────────────────────────────────────────────

#[tokio::test]
async fn invalidation_elsewhere_reloads_the_open_page() {
  let mut fx = spawn(anonymous(), vec![]).await;
  fx.app.navigate(Route::Projects).await;
  let before = fx.hits("GET /project");

  // Nothing pending: a tick serves from cache.
  fx.app.tick().await;
  assert_eq!(fx.hits("GET /project"), before);

  assert_eq!(fx.app.hooks.cache().invalidate(&keys::projects::root()), 1);
  fx.app.tick().await;
  assert_eq!(fx.hits("GET /project"), before + 1);

  // The refetch only produced updates, so the next tick is quiet.
  fx.app.tick().await;
  assert_eq!(fx.hits("GET /project"), before + 1);
}

// ─── Keys ────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn tab_keys_navigate_and_q_quits() {
  let mut fx = spawn(user("student"), vec![("GET /project/starred", json!([]))]).await;
  fx.app.navigate(Route::Projects).await;

  assert!(fx.app.handle_key(key(KeyCode::Char('2'))).await);
  assert_eq!(fx.app.route, Route::Starred);
  assert_eq!(fx.hits("GET /project/starred"), 1);

  assert!(!fx.app.handle_key(key(KeyCode::Char('q'))).await);
}

#[tokio::test]
async fn search_submits_on_enter() {
  let mut fx = spawn(anonymous(), vec![]).await;
  fx.app.navigate(Route::Projects).await;
  let before = fx.hits("GET /project");

  fx.app.handle_key(key(KeyCode::Char('/'))).await;
  assert!(fx.app.search_active);
  for c in "drone".chars() {
    fx.app.handle_key(key(KeyCode::Char(c))).await;
  }
  // Typing only arms the debouncer.
  assert_eq!(fx.hits("GET /project"), before);

  fx.app.handle_key(key(KeyCode::Enter)).await;
  assert!(!fx.app.search_active);
  assert_eq!(fx.app.search, "drone");
  assert_eq!(fx.hits("GET /project"), before + 1);
}

#[tokio::test]
async fn language_toggle_is_persisted() {
  let mut fx = spawn(anonymous(), vec![]).await;
  let path = fx.dir.path().join("preferences.toml");

  fx.app.handle_key(key(KeyCode::Char('T'))).await;

  assert_eq!(fx.app.language(), Language::Ar);
  assert_eq!(Preferences::load(&path).language, Language::Ar);
}
