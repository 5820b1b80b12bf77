//! The upload pipeline: folder-path resolution, object upload, record
//! insert — strictly in that order.

use tracing::info;
use uuid::Uuid;

use crate::db::{ImageStore, ProfileStore};
use crate::error::ServiceError;
use crate::sanitize;
use crate::storage::StorageApi;

/// A validated, already-compressed file ready for the pipeline.
#[derive(Debug, Clone)]
pub struct UploadRequest {
    pub profile_id: Uuid,
    pub profile_name: String,
    pub file_name: String,
    pub content_type: String,
    pub data: Vec<u8>,
}

/// Run one upload. Side effects happen sequentially, each awaited before the
/// next:
///
/// 1. If the profile has no folder path yet, derive
///    `actors/<NameWithoutWhitespace>/images` and persist it. This happens
///    before the object upload, so a crash in between leaves a folder
///    reference with no objects — listing code treats that as an empty
///    folder, and no repair is attempted here.
/// 2. Upload the object to `<folderPath>/<fileName>` (same-name overwrite).
/// 3. Insert the image record with the object's public URL.
///
/// There is no cross-invocation ordering: two concurrent first uploads race
/// on step 1 and the last writer wins. No rollback on failure.
pub async fn run_upload<P, I, S>(
    profiles: &P,
    images: &I,
    storage: &S,
    request: UploadRequest,
) -> Result<String, ServiceError>
where
    P: ProfileStore,
    I: ImageStore,
    S: StorageApi,
{
    let folder = match profiles
        .folder_path(request.profile_id)
        .await
        .map_err(|e| match e {
            sea_orm::DbErr::RecordNotFound(_) => ServiceError::ProfileNotFound(request.profile_id),
            other => ServiceError::Db(other),
        })? {
        Some(path) if !path.is_empty() => path,
        _ => {
            let path = format!(
                "actors/{}/images",
                sanitize::folder_key(&request.profile_name)
            );
            profiles.set_folder_path(request.profile_id, &path).await?;
            path
        }
    };

    let object_path = format!("{folder}/{}", request.file_name);
    storage
        .put_object(&object_path, request.data, &request.content_type)
        .await?;

    let file_url = storage.object_url(&object_path);
    images.insert_image(request.profile_id, &file_url).await?;

    info!(profile_id = %request.profile_id, path = %object_path, "uploaded image");
    Ok(file_url)
}
