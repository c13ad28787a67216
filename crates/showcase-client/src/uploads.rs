//! `/upload` endpoints (multipart/form-data).

use std::path::Path;

use reqwest::multipart::{Form, Part};
use showcase_core::{
  ClientError, Resource, Result,
  page::{UploadedFile, UploadedFiles},
};

use crate::{
  ShowcaseClient,
  transport::{Action, Op},
};

/// A file ready to be sent as one multipart part.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadFile {
  pub file_name:    String,
  pub content_type: String,
  pub bytes:        Vec<u8>,
}

impl UploadFile {
  pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
    let file_name = file_name.into();
    let content_type = mime_guess::from_path(&file_name)
      .first_or_octet_stream()
      .essence_str()
      .to_string();
    Self { file_name, content_type, bytes }
  }

  /// Read `path` from disk; the content type is guessed from its extension.
  pub async fn from_path(path: &Path) -> Result<Self> {
    let bytes = tokio::fs::read(path).await.map_err(|e| {
      ClientError::Precondition(format!("cannot read {}: {e}", path.display()))
    })?;
    let name = path
      .file_name()
      .map(|n| n.to_string_lossy().into_owned())
      .unwrap_or_else(|| "upload".to_string());
    Ok(Self::new(name, bytes))
  }

  fn into_part(self) -> Result<Part> {
    Part::bytes(self.bytes)
      .file_name(self.file_name)
      .mime_str(&self.content_type)
      .map_err(|e| ClientError::Precondition(format!("invalid content type: {e}")))
  }
}

const R: Resource = Resource::Upload;

pub struct UploadClient<'a> {
  client: &'a ShowcaseClient,
}

impl<'a> UploadClient<'a> {
  pub(crate) fn new(client: &'a ShowcaseClient) -> Self { Self { client } }

  /// `POST /upload/image`, field `image`, returns the stored URL.
  pub async fn image(&self, file: UploadFile) -> Result<String> {
    let form = Form::new().part("image", file.into_part()?);
    let req = self.client.post(&["upload", "image"]).multipart(form);
    let uploaded: UploadedFile = self
      .client
      .send_json(req, Op::new(R, Action::Call("upload image")))
      .await?;
    Ok(uploaded.url)
  }

  /// `POST /upload/images`, repeated field `images`, returns URLs in order.
  pub async fn images(&self, files: Vec<UploadFile>) -> Result<Vec<String>> {
    if files.is_empty() {
      return Err(ClientError::Precondition("No files selected".into()));
    }
    let mut form = Form::new();
    for file in files {
      form = form.part("images", file.into_part()?);
    }
    let req = self.client.post(&["upload", "images"]).multipart(form);
    let uploaded: UploadedFiles = self
      .client
      .send_json(req, Op::new(R, Action::Call("upload images")))
      .await?;
    Ok(uploaded.urls)
  }
}
