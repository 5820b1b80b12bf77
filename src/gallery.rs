//! Image-URL resolution for a profile's gallery.

use uuid::Uuid;

use crate::db::ImageStore;
use crate::error::ServiceError;
use crate::sanitize;
use crate::storage::StorageApi;

/// Ordered public image URLs for one profile.
///
/// Strategy (a): read the image-record table — authoritative when any rows
/// exist. Strategy (b): with no records, derive the folder from the
/// diacritic-stripped profile name and list the bucket directly; a missing
/// folder lists as empty, not as an error. Either way the result is sorted,
/// so repeated calls over unchanged storage return the same sequence and a
/// carousel can index into it.
pub async fn gallery_urls<I, S>(
    images: &I,
    storage: &S,
    profile_id: Uuid,
    profile_name: &str,
) -> Result<Vec<String>, ServiceError>
where
    I: ImageStore,
    S: StorageApi,
{
    let mut urls = images.images_for(profile_id).await?;
    if !urls.is_empty() {
        urls.sort();
        return Ok(urls);
    }

    let folder = format!("actors/{}/images", sanitize::strict_key(profile_name));
    let mut urls: Vec<String> = storage
        .list_folder(&folder)
        .await?
        .iter()
        .filter(|entry| !entry.is_folder())
        .map(|entry| storage.object_url(&format!("{folder}/{}", entry.name)))
        .collect();
    urls.sort();
    Ok(urls)
}
