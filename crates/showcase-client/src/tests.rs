//! Integration tests for the resource clients against an in-process axum
//! backend that records every request it receives.

use std::sync::{Arc, Mutex};

use axum::{
  Json, Router,
  body::Bytes,
  extract::State,
  http::{HeaderMap, Method, StatusCode, Uri, header},
  response::{IntoResponse, Response},
};
use serde_json::{Value, json};
use showcase_core::{
  ClientError, PageRequest, Resource,
  catalog::{CourseInput, NewSuggestion, SchoolInput, StatusNotice},
  project::{Member, NewProject, ProjectStatus, ProjectUpdate, StarAction},
  user::{Role, UserUpdate},
};

use crate::{
  ApiConfig, ShowcaseClient, projects::ProjectFilters, uploads::UploadFile,
  users::UserFilters,
};

// ─── Fake backend ────────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
struct Recorded {
  method: Method,
  path:   String,
  query:  String,
  body:   String,
  cookie: Option<String>,
  ctype:  Option<String>,
}

impl Recorded {
  fn params(&self) -> Vec<&str> {
    self.query.split('&').filter(|p| !p.is_empty()).collect()
  }

  fn json(&self) -> Value { serde_json::from_str(&self.body).unwrap() }
}

#[derive(Clone)]
enum Reply {
  Json(StatusCode, Value),
  Text(StatusCode, &'static str),
}

#[derive(Clone, Default)]
struct Backend {
  routes: Arc<Vec<(Method, &'static str, Reply)>>,
  log:    Arc<Mutex<Vec<Recorded>>>,
}

async fn handle(
  State(backend): State<Backend>,
  method: Method,
  uri: Uri,
  headers: HeaderMap,
  body: Bytes,
) -> Response {
  let path = uri.path().strip_prefix("/api").unwrap_or(uri.path()).to_string();
  let header_str = |name: header::HeaderName| {
    headers
      .get(name)
      .and_then(|v| v.to_str().ok())
      .map(str::to_string)
  };
  backend.log.lock().unwrap().push(Recorded {
    method: method.clone(),
    path:   path.clone(),
    query:  uri.query().unwrap_or_default().to_string(),
    body:   String::from_utf8_lossy(&body).into_owned(),
    cookie: header_str(header::COOKIE),
    ctype:  header_str(header::CONTENT_TYPE),
  });

  match backend
    .routes
    .iter()
    .find(|(m, p, _)| *m == method && *p == path)
  {
    Some((_, _, Reply::Json(status, value))) => (*status, Json(value.clone())).into_response(),
    Some((_, _, Reply::Text(status, text))) => (*status, *text).into_response(),
    None => (StatusCode::NOT_IMPLEMENTED, "no route").into_response(),
  }
}

struct Mock {
  client: ShowcaseClient,
  log:    Arc<Mutex<Vec<Recorded>>>,
}

impl Mock {
  fn requests(&self) -> Vec<Recorded> { self.log.lock().unwrap().clone() }

  fn last(&self) -> Recorded { self.requests().pop().expect("no request recorded") }
}

async fn spawn_with(
  routes: Vec<(Method, &'static str, Reply)>,
  session_cookie: Option<&str>,
) -> Mock {
  let backend = Backend { routes: Arc::new(routes), ..Default::default() };
  let log = backend.log.clone();
  let app = Router::new().fallback(handle).with_state(backend);

  let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
  let addr = listener.local_addr().unwrap();
  tokio::spawn(async move { axum::serve(listener, app).await.unwrap() });

  let client = ShowcaseClient::new(ApiConfig {
    base_url: format!("http://{addr}/api"),
    session_cookie: session_cookie.map(str::to_string),
    ..Default::default()
  })
  .unwrap();
  Mock { client, log }
}

async fn spawn(routes: Vec<(Method, &'static str, Reply)>) -> Mock { spawn_with(routes, None).await }

fn ok(value: Value) -> Reply { Reply::Json(StatusCode::OK, value) }

fn project_json(id: &str, title: &str) -> Value {
  json!({
    "_id": id,
    "title": title,
    "description": "desc",
    "technologies": ["Rust"],
    "status": "accepted",
    "stars": 3
  })
}

// ─── Projects ────────────────────────────────────────────────────────────────

#[tokio::test]
async fn list_projects_sends_page_limit_and_title_only() {
  let mock = spawn(vec![(
    Method::GET,
    "/project",
    ok(json!({
      "projects": [project_json("p1", "Test")],
      "pagination": { "page": 1, "limit": 10, "total": 1, "totalPages": 1 }
    })),
  )])
  .await;

  let page = mock
    .client
    .projects()
    .list(PageRequest::new(1, 10), &ProjectFilters::with_title("Test"))
    .await
    .unwrap();

  assert_eq!(page.data.len(), 1);
  assert_eq!(page.data[0].title, "Test");
  assert_eq!(page.pagination.total, 1);
  assert_eq!(page.pagination.total_pages, 1);

  let req = mock.last();
  let params = req.params();
  assert!(params.contains(&"page=1"), "query: {}", req.query);
  assert!(params.contains(&"limit=10"));
  assert!(params.contains(&"title=Test"));
  assert_eq!(params.len(), 3, "unexpected params: {}", req.query);
  assert!(!req.query.contains("status="));
}

#[tokio::test]
async fn blank_filters_never_reach_the_query_string() {
  let mock = spawn(vec![(
    Method::GET,
    "/project",
    ok(json!({
      "projects": [],
      "pagination": { "page": 2, "limit": 5, "total": 0, "totalPages": 0 }
    })),
  )])
  .await;

  let filters = ProjectFilters {
    title: Some(String::new()),
    course: Some("  ".into()),
    status: Some(ProjectStatus::PendingTa),
    ..Default::default()
  };
  mock.client.projects().list(PageRequest::new(2, 5), &filters).await.unwrap();

  let req = mock.last();
  assert!(!req.query.contains("title"), "query: {}", req.query);
  assert!(!req.query.contains("course"));
  assert!(req.params().contains(&"status=pending-ta"));
}

#[tokio::test]
async fn not_found_overrides_backend_message_for_targeted_operations() {
  let missing = Reply::Json(StatusCode::NOT_FOUND, json!({ "message": "Cast to ObjectId failed" }));
  let mock = spawn(vec![
    (Method::GET, "/project/zzz", missing.clone()),
    (Method::PUT, "/project/zzz", missing.clone()),
    (Method::DELETE, "/project/zzz", missing.clone()),
    (Method::POST, "/project/zzz/star", missing),
  ])
  .await;
  let projects = mock.client.projects();

  let expected = ClientError::NotFound(Resource::Project);
  assert_eq!(projects.get("zzz").await.unwrap_err(), expected);
  assert_eq!(
    projects.update("zzz", ProjectUpdate::default()).await.unwrap_err(),
    expected
  );
  assert_eq!(projects.delete("zzz").await.unwrap_err(), expected);
  assert_eq!(projects.star("zzz", StarAction::Add).await.unwrap_err(), expected);
  assert_eq!(expected.to_string(), "Project not found");
}

#[tokio::test]
async fn ids_are_sent_as_single_path_segments() {
  let mock = spawn(vec![(
    Method::GET,
    "/project/a%2Fb%3Fc%23d",
    ok(project_json("a/b?c#d", "Odd id")),
  )])
  .await;

  let project = mock.client.projects().get(" a/b?c#d ").await.unwrap();
  assert_eq!(project.title, "Odd id");
  let req = mock.last();
  assert_eq!(req.path, "/project/a%2Fb%3Fc%23d");
  assert!(req.query.is_empty());
}

#[tokio::test]
async fn create_project_omits_unset_optional_fields() {
  let mock = spawn(vec![(Method::POST, "/project", ok(project_json("p9", "Drone")))]).await;

  let created = mock
    .client
    .projects()
    .create(NewProject {
      title: "Drone".into(),
      description: "Flies".into(),
      team_leader: Member { name: "Sara".into(), email: "sara@uni.edu".into() },
      teaching_assistant: "ta@uni.edu".into(),
      course: "CS400".into(),
      github_url: Some("https://github.com/sara/drone".into()),
      live_url: Some(String::new()),
      ..Default::default()
    })
    .await
    .unwrap();
  assert_eq!(created.id, "p9");

  let body = mock.last().json();
  let obj = body.as_object().unwrap();
  assert!(!obj.contains_key("liveUrl"), "payload: {body}");
  assert!(!obj.contains_key("videoUrl"));
  assert_eq!(obj["githubUrl"], "https://github.com/sara/drone");
  assert_eq!(obj["teamLeader"]["email"], "sara@uni.edu");
}

#[tokio::test]
async fn star_returns_literal_success_string() {
  let mock = spawn(vec![(
    Method::POST,
    "/project/p1/star",
    ok(json!({ "message": "Project starred successfully" })),
  )])
  .await;

  let msg = mock.client.projects().star("p1", StarAction::Add).await.unwrap();
  assert_eq!(msg, "Project starred successfully");
  let req = mock.last();
  assert_eq!(req.method, Method::POST);
  assert_eq!(req.json(), json!({ "action": "add" }));
}

#[tokio::test]
async fn plain_text_success_message_is_accepted() {
  let mock = spawn(vec![(
    Method::DELETE,
    "/project/p1",
    Reply::Text(StatusCode::OK, "Project deleted"),
  )])
  .await;
  assert_eq!(mock.client.projects().delete("p1").await.unwrap(), "Project deleted");
}

#[tokio::test]
async fn status_change_sends_kebab_case_status() {
  let mock = spawn(vec![(
    Method::PUT,
    "/project/p1/status",
    ok(project_json("p1", "Test")),
  )])
  .await;
  mock.client.projects().set_status("p1", ProjectStatus::PendingTa).await.unwrap();
  assert_eq!(mock.last().json(), json!({ "status": "pending-ta" }));
}

// ─── Error normalisation ─────────────────────────────────────────────────────

#[tokio::test]
async fn backend_message_is_surfaced_verbatim() {
  let mock = spawn(vec![(
    Method::POST,
    "/course",
    Reply::Json(StatusCode::CONFLICT, json!({ "message": "Course code already exists" })),
  )])
  .await;

  let err = mock
    .client
    .courses()
    .create(showcase_core::catalog::CourseInput { code: "cs101".into(), title: "Intro".into() })
    .await
    .unwrap_err();
  assert_eq!(
    err,
    ClientError::Backend { status: 409, message: "Course code already exists".into() }
  );
  assert_eq!(mock.last().json(), json!({ "code": "CS101", "title": "Intro" }));
}

#[tokio::test]
async fn missing_backend_message_uses_resource_default() {
  let mock = spawn(vec![(
    Method::GET,
    "/course",
    Reply::Json(StatusCode::INTERNAL_SERVER_ERROR, json!({})),
  )])
  .await;

  let err = mock
    .client
    .courses()
    .list(PageRequest::first(), &Default::default())
    .await
    .unwrap_err();
  assert_eq!(err.to_string(), "Failed to fetch courses");
  assert_eq!(err.status(), Some(500));
}

#[tokio::test]
async fn blank_id_fails_before_any_request() {
  let mock = spawn(vec![]).await;

  let err = mock.client.projects().get("  ").await.unwrap_err();
  assert_eq!(err, ClientError::Precondition("Project id is required".into()));
  let err = mock.client.comments().delete("").await.unwrap_err();
  assert!(matches!(err, ClientError::Precondition(_)));
  let err = mock.client.comments().create("p1", "   ").await.unwrap_err();
  assert!(matches!(err, ClientError::Precondition(_)));

  assert!(mock.requests().is_empty());
}

#[tokio::test]
async fn unexpected_body_is_a_decode_error() {
  let mock = spawn(vec![(Method::GET, "/project/p1", ok(json!({ "unexpected": true })))]).await;
  let err = mock.client.projects().get("p1").await.unwrap_err();
  assert!(matches!(err, ClientError::Decode(_)), "got {err:?}");
}

#[tokio::test]
async fn unreachable_backend_is_a_network_error() {
  let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
  let addr = listener.local_addr().unwrap();
  drop(listener);

  let client = ShowcaseClient::new(ApiConfig {
    base_url: format!("http://{addr}/api"),
    ..Default::default()
  })
  .unwrap();
  let err = client.schools().list().await.unwrap_err();
  assert!(matches!(err, ClientError::Network(_)), "got {err:?}");
}

#[test]
fn invalid_base_url_is_rejected() {
  let err = ShowcaseClient::new(ApiConfig {
    base_url: "not a url".into(),
    ..Default::default()
  })
  .err()
  .unwrap();
  assert!(matches!(err, ClientError::Precondition(_)));
}

// ─── Session & users ─────────────────────────────────────────────────────────

#[tokio::test]
async fn session_cookie_is_sent_with_requests() {
  let mock = spawn_with(
    vec![(
      Method::GET,
      "/auth/me",
      ok(json!({ "_id": "u1", "email": "a@uni.edu", "role": "admin" })),
    )],
    Some("connect.sid=s%3Aabc"),
  )
  .await;

  let me = mock.client.auth().current_user().await.unwrap();
  assert_eq!(me.role, Role::Admin);
  let req = mock.last();
  assert_eq!(req.path, "/auth/me");
  assert_eq!(req.cookie.as_deref(), Some("connect.sid=s%3Aabc"));
}

#[tokio::test]
async fn anonymous_session_surfaces_401() {
  let mock = spawn(vec![(
    Method::GET,
    "/auth/me",
    Reply::Json(StatusCode::UNAUTHORIZED, json!({ "message": "Not authenticated" })),
  )])
  .await;
  let err = mock.client.auth().current_user().await.unwrap_err();
  assert!(err.is_unauthorized());
  assert_eq!(err.to_string(), "Not authenticated");
}

#[tokio::test]
async fn user_filters_serialise_booleans_and_roles() {
  let mock = spawn(vec![(
    Method::GET,
    "/user",
    ok(json!({
      "data": [],
      "pagination": { "page": 1, "limit": 20, "total": 0, "totalPages": 0 }
    })),
  )])
  .await;

  let filters = UserFilters {
    role: Some(Role::Supervisor),
    is_deactivated: Some(false),
    search: None,
  };
  mock.client.users().list(PageRequest::new(1, 20), &filters).await.unwrap();

  let params = mock.last().params().iter().map(|s| s.to_string()).collect::<Vec<_>>();
  assert!(params.contains(&"role=supervisor".to_string()));
  assert!(params.contains(&"isDeactivated=false".to_string()));
  assert!(!params.iter().any(|p| p.starts_with("search")));
}

#[tokio::test]
async fn every_targeted_resource_reports_not_found() {
  let missing = Reply::Json(StatusCode::NOT_FOUND, json!({}));
  let mock = spawn(vec![
    (Method::PUT, "/course/c404", missing.clone()),
    (Method::DELETE, "/course/c404", missing.clone()),
    (Method::GET, "/school/s404", missing.clone()),
    (Method::PUT, "/school/s404", missing.clone()),
    (Method::DELETE, "/school/s404", missing.clone()),
    (Method::DELETE, "/comment/m404", missing.clone()),
    (Method::DELETE, "/suggestion/g404", missing.clone()),
    (Method::GET, "/user/u404", missing.clone()),
    (Method::PUT, "/user/u404", missing.clone()),
    (Method::PUT, "/user/u404/role", missing.clone()),
    (Method::PUT, "/user/u404/deactivate", missing),
  ])
  .await;
  let c = &mock.client;

  let cases: Vec<(&str, Resource, Result<(), ClientError>)> = vec![
    ("update course", Resource::Course, c.courses().update("c404", CourseInput::default()).await.map(drop)),
    ("delete course", Resource::Course, c.courses().delete("c404").await.map(drop)),
    ("get school", Resource::School, c.schools().get("s404").await.map(drop)),
    ("update school", Resource::School, c.schools().update("s404", SchoolInput::default()).await.map(drop)),
    ("delete school", Resource::School, c.schools().delete("s404").await.map(drop)),
    ("delete comment", Resource::Comment, c.comments().delete("m404").await.map(drop)),
    ("delete suggestion", Resource::Suggestion, c.suggestions().delete("g404").await.map(drop)),
    ("get user", Resource::User, c.users().get("u404").await.map(drop)),
    ("update user", Resource::User, c.users().update("u404", UserUpdate::default()).await.map(drop)),
    ("set role", Resource::User, c.users().set_role("u404", Role::Admin).await.map(drop)),
    ("deactivate", Resource::User, c.users().set_deactivated("u404", true).await.map(drop)),
  ];

  for (case, resource, result) in cases {
    let err = result.unwrap_err();
    assert_eq!(err, ClientError::NotFound(resource), "{case}");
    assert_eq!(err.to_string(), format!("{} not found", resource.label()), "{case}");
  }
  assert_eq!(mock.requests().len(), 11);
}

#[tokio::test]
async fn status_notice_sends_trimmed_project_id() {
  let mock = spawn(vec![(
    Method::POST,
    "/notify/project-status",
    ok(json!({ "message": "Notification sent" })),
  )])
  .await;

  let message = mock
    .client
    .notify()
    .project_status(StatusNotice {
      project_id: "  p1  ".into(),
      status:     ProjectStatus::Accepted,
      message:    Some("  ".into()),
    })
    .await
    .unwrap();
  assert_eq!(message, "Notification sent");
  assert_eq!(mock.last().json(), json!({ "projectId": "p1", "status": "accepted" }));
}

// ─── Suggestions & uploads ───────────────────────────────────────────────────

#[tokio::test]
async fn suggestion_without_image_has_no_image_key() {
  let mock = spawn(vec![(
    Method::POST,
    "/suggestion",
    ok(json!({ "_id": "s1", "content": "Broken link" })),
  )])
  .await;

  mock
    .client
    .suggestions()
    .create(NewSuggestion { content: " Broken link ".into(), image: Some(" ".into()) })
    .await
    .unwrap();
  assert_eq!(mock.last().json(), json!({ "content": "Broken link" }));
}

#[tokio::test]
async fn image_upload_is_multipart() {
  let mock = spawn(vec![(
    Method::POST,
    "/upload/image",
    ok(json!({ "url": "https://cdn.uni.edu/a.png" })),
  )])
  .await;

  let url = mock
    .client
    .uploads()
    .image(UploadFile::new("a.png", b"fake-png-bytes".to_vec()))
    .await
    .unwrap();
  assert_eq!(url, "https://cdn.uni.edu/a.png");

  let req = mock.last();
  assert!(req.ctype.as_deref().unwrap_or_default().starts_with("multipart/form-data"));
  assert!(req.body.contains("name=\"image\""));
  assert!(req.body.contains("filename=\"a.png\""));
  assert!(req.body.contains("image/png"));
  assert!(req.body.contains("fake-png-bytes"));
}

#[tokio::test]
async fn multiple_upload_requires_files() {
  let mock = spawn(vec![]).await;
  let err = mock.client.uploads().images(vec![]).await.unwrap_err();
  assert!(matches!(err, ClientError::Precondition(_)));
  assert!(mock.requests().is_empty());
}

#[test]
fn login_url_is_under_auth() {
  let client = ShowcaseClient::new(ApiConfig {
    base_url: "https://showcase.uni.edu/api/".into(),
    ..Default::default()
  })
  .unwrap();
  assert_eq!(client.auth().login_url(), "https://showcase.uni.edu/api/auth/google");
}
