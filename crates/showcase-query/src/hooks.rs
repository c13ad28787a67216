//! Cached reads and invalidating writes over one [`ShowcaseClient`].
//!
//! Every read goes through [`fetch_query`] under a key from [`crate::keys`];
//! every write goes through [`Hooks::mutate`], which invalidates the
//! [`Mutation`]'s prefixes once the backend has accepted it. A failed write
//! leaves the cache untouched and returns the error unchanged.

use std::future::Future;

use showcase_client::{
  ShowcaseClient, comments::CommentFilters, courses::CourseFilters, projects::ProjectFilters,
  uploads::UploadFile, users::UserFilters,
};
use showcase_core::{
  Page, PageRequest, Result,
  catalog::{
    Comment, Course, CourseInput, NewSuggestion, School, SchoolInput, StatusNotice, Suggestion,
  },
  project::{NewProject, Project, ProjectStatus, ProjectUpdate, StarAction},
  user::{ProfileUpdate, Role, User, UserUpdate},
};

use crate::{
  cache::QueryCache,
  keys,
  mutation::Mutation,
  query::{QueryOptions, QueryState, fetch_query},
};

/// The hook layer: a client, the shared cache, and default query options.
#[derive(Clone)]
pub struct Hooks {
  client:   ShowcaseClient,
  cache:    QueryCache,
  defaults: QueryOptions,
}

impl Hooks {
  pub fn new(client: ShowcaseClient, cache: QueryCache) -> Self {
    Self { client, cache, defaults: QueryOptions::default() }
  }

  pub fn with_defaults(self, defaults: QueryOptions) -> Self { Self { defaults, ..self } }

  pub fn client(&self) -> &ShowcaseClient { &self.client }

  pub fn cache(&self) -> &QueryCache { &self.cache }

  pub fn defaults(&self) -> QueryOptions { self.defaults }

  /// Options for a query that depends on `id`: disabled while it is blank.
  fn needs_id(&self, id: &str) -> QueryOptions { self.defaults.enabled(!id.trim().is_empty()) }

  /// Run `write`; on success, invalidate everything `mutation` touches.
  pub async fn mutate<T, Fut>(&self, mutation: Mutation, write: Fut) -> Result<T>
  where
    Fut: Future<Output = Result<T>>,
  {
    let value = write.await?;
    let prefixes = mutation.invalidates();
    let mut marked = 0;
    for prefix in &prefixes {
      marked += self.cache.invalidate(prefix);
    }
    tracing::debug!(?mutation, prefixes = prefixes.len(), marked, "mutation succeeded");
    Ok(value)
  }

  // ─── Auth ──────────────────────────────────────────────────────────────────

  /// The signed-in user. Never retried: a 401 is an answer, not a fault.
  pub async fn current_user(&self) -> QueryState<User> {
    fetch_query(&self.cache, keys::auth::current_user(), self.defaults.no_retry(), || async {
      self.client.auth().current_user().await
    })
    .await
  }

  pub async fn logout(&self) -> Result<String> {
    self.mutate(Mutation::Logout, self.client.auth().logout()).await
  }

  // ─── Projects ──────────────────────────────────────────────────────────────

  pub async fn projects(
    &self,
    page: PageRequest,
    filters: &ProjectFilters,
  ) -> QueryState<Page<Project>> {
    fetch_query(&self.cache, keys::projects::list(page, filters), self.defaults, || async {
      self.client.projects().list(page, filters).await
    })
    .await
  }

  /// Idle until `id` is non-blank.
  pub async fn project(&self, id: &str) -> QueryState<Project> {
    fetch_query(&self.cache, keys::projects::detail(id), self.needs_id(id), || async {
      self.client.projects().get(id).await
    })
    .await
  }

  pub async fn featured_projects(&self) -> QueryState<Vec<Project>> {
    fetch_query(&self.cache, keys::projects::featured(), self.defaults, || async {
      self.client.projects().featured().await
    })
    .await
  }

  pub async fn starred_projects(&self) -> QueryState<Vec<Project>> {
    fetch_query(&self.cache, keys::projects::starred(), self.defaults, || async {
      self.client.projects().starred().await
    })
    .await
  }

  pub async fn my_projects(&self) -> QueryState<Vec<Project>> {
    fetch_query(&self.cache, keys::projects::mine(), self.defaults, || async {
      self.client.projects().mine().await
    })
    .await
  }

  pub async fn review_queue(&self, page: PageRequest) -> QueryState<Page<Project>> {
    fetch_query(&self.cache, keys::projects::review_queue(page), self.defaults, || async {
      self.client.projects().review_queue(page).await
    })
    .await
  }

  pub async fn create_project(&self, project: NewProject) -> Result<Project> {
    self.mutate(Mutation::CreateProject, self.client.projects().create(project)).await
  }

  pub async fn update_project(&self, id: &str, update: ProjectUpdate) -> Result<Project> {
    self
      .mutate(Mutation::UpdateProject { id: id.into() }, self.client.projects().update(id, update))
      .await
  }

  pub async fn delete_project(&self, id: &str) -> Result<String> {
    self
      .mutate(Mutation::DeleteProject { id: id.into() }, self.client.projects().delete(id))
      .await
  }

  pub async fn set_project_status(&self, id: &str, status: ProjectStatus) -> Result<Project> {
    self
      .mutate(
        Mutation::SetProjectStatus { id: id.into() },
        self.client.projects().set_status(id, status),
      )
      .await
  }

  /// Returns the backend's confirmation text.
  pub async fn star_project(&self, id: &str, action: StarAction) -> Result<String> {
    self
      .mutate(Mutation::StarProject { id: id.into() }, self.client.projects().star(id, action))
      .await
  }

  // ─── Users ─────────────────────────────────────────────────────────────────

  pub async fn users(&self, page: PageRequest, filters: &UserFilters) -> QueryState<Page<User>> {
    fetch_query(&self.cache, keys::users::list(page, filters), self.defaults, || async {
      self.client.users().list(page, filters).await
    })
    .await
  }

  pub async fn supervisors(&self) -> QueryState<Vec<User>> {
    fetch_query(&self.cache, keys::users::supervisors(), self.defaults, || async {
      self.client.users().supervisors().await
    })
    .await
  }

  pub async fn user(&self, id: &str) -> QueryState<User> {
    fetch_query(&self.cache, keys::users::detail(id), self.needs_id(id), || async {
      self.client.users().get(id).await
    })
    .await
  }

  pub async fn update_profile(&self, update: ProfileUpdate) -> Result<User> {
    self.mutate(Mutation::UpdateProfile, self.client.users().update_profile(update)).await
  }

  pub async fn update_user(&self, id: &str, update: UserUpdate) -> Result<User> {
    self
      .mutate(Mutation::UpdateUser { id: id.into() }, self.client.users().update(id, update))
      .await
  }

  pub async fn set_user_role(&self, id: &str, role: Role) -> Result<User> {
    self
      .mutate(Mutation::SetUserRole { id: id.into() }, self.client.users().set_role(id, role))
      .await
  }

  pub async fn set_user_deactivated(&self, id: &str, deactivated: bool) -> Result<User> {
    self
      .mutate(
        Mutation::SetUserDeactivated { id: id.into() },
        self.client.users().set_deactivated(id, deactivated),
      )
      .await
  }

  // ─── Comments ──────────────────────────────────────────────────────────────

  pub async fn project_comments(&self, project_id: &str) -> QueryState<Vec<Comment>> {
    let key = keys::comments::for_project(project_id);
    fetch_query(&self.cache, key, self.needs_id(project_id), || async {
      self.client.comments().for_project(project_id).await
    })
    .await
  }

  pub async fn comments(
    &self,
    page: PageRequest,
    filters: &CommentFilters,
  ) -> QueryState<Page<Comment>> {
    fetch_query(&self.cache, keys::comments::list(page, filters), self.defaults, || async {
      self.client.comments().list(page, filters).await
    })
    .await
  }

  pub async fn create_comment(&self, project_id: &str, content: &str) -> Result<Comment> {
    self
      .mutate(
        Mutation::CreateComment { project_id: project_id.into() },
        self.client.comments().create(project_id, content),
      )
      .await
  }

  pub async fn delete_comment(&self, id: &str) -> Result<String> {
    self
      .mutate(Mutation::DeleteComment { id: id.into() }, self.client.comments().delete(id))
      .await
  }

  // ─── Courses ───────────────────────────────────────────────────────────────

  pub async fn courses(
    &self,
    page: PageRequest,
    filters: &CourseFilters,
  ) -> QueryState<Page<Course>> {
    fetch_query(&self.cache, keys::courses::list(page, filters), self.defaults, || async {
      self.client.courses().list(page, filters).await
    })
    .await
  }

  pub async fn all_courses(&self) -> QueryState<Vec<Course>> {
    fetch_query(&self.cache, keys::courses::everything(), self.defaults, || async {
      self.client.courses().all().await
    })
    .await
  }

  pub async fn create_course(&self, input: CourseInput) -> Result<Course> {
    self.mutate(Mutation::CreateCourse, self.client.courses().create(input)).await
  }

  pub async fn update_course(&self, id: &str, input: CourseInput) -> Result<Course> {
    self
      .mutate(Mutation::UpdateCourse { id: id.into() }, self.client.courses().update(id, input))
      .await
  }

  pub async fn delete_course(&self, id: &str) -> Result<String> {
    self
      .mutate(Mutation::DeleteCourse { id: id.into() }, self.client.courses().delete(id))
      .await
  }

  // ─── Schools ───────────────────────────────────────────────────────────────

  pub async fn schools(&self) -> QueryState<Vec<School>> {
    fetch_query(&self.cache, keys::schools::lists(), self.defaults, || async {
      self.client.schools().list().await
    })
    .await
  }

  pub async fn school(&self, id: &str) -> QueryState<School> {
    fetch_query(&self.cache, keys::schools::detail(id), self.needs_id(id), || async {
      self.client.schools().get(id).await
    })
    .await
  }

  pub async fn create_school(&self, input: SchoolInput) -> Result<School> {
    self.mutate(Mutation::CreateSchool, self.client.schools().create(input)).await
  }

  pub async fn update_school(&self, id: &str, input: SchoolInput) -> Result<School> {
    self
      .mutate(Mutation::UpdateSchool { id: id.into() }, self.client.schools().update(id, input))
      .await
  }

  pub async fn delete_school(&self, id: &str) -> Result<String> {
    self
      .mutate(Mutation::DeleteSchool { id: id.into() }, self.client.schools().delete(id))
      .await
  }

  // ─── Suggestions ───────────────────────────────────────────────────────────

  pub async fn suggestions(&self, page: PageRequest) -> QueryState<Page<Suggestion>> {
    fetch_query(&self.cache, keys::suggestions::list(page), self.defaults, || async {
      self.client.suggestions().list(page).await
    })
    .await
  }

  pub async fn create_suggestion(&self, suggestion: NewSuggestion) -> Result<Suggestion> {
    self.mutate(Mutation::CreateSuggestion, self.client.suggestions().create(suggestion)).await
  }

  pub async fn delete_suggestion(&self, id: &str) -> Result<String> {
    self
      .mutate(Mutation::DeleteSuggestion { id: id.into() }, self.client.suggestions().delete(id))
      .await
  }

  // ─── Side channels ─────────────────────────────────────────────────────────

  pub async fn upload_image(&self, file: UploadFile) -> Result<String> {
    self.mutate(Mutation::Upload, self.client.uploads().image(file)).await
  }

  pub async fn upload_images(&self, files: Vec<UploadFile>) -> Result<Vec<String>> {
    self.mutate(Mutation::Upload, self.client.uploads().images(files)).await
  }

  pub async fn notify_project_status(&self, notice: StatusNotice) -> Result<String> {
    self.mutate(Mutation::NotifyStatus, self.client.notify().project_status(notice)).await
  }
}
