//! One-shot backfill: turn existing bucket folders into image records.
//!
//! Runs out of band via the `migrate-images` binary, never as part of
//! request serving. The backfill does not deduplicate: re-running it against
//! an unchanged bucket inserts every record again. That is a documented
//! limitation of the design, not a bug to fix here.

use tracing::{info, warn};

use crate::db::{ImageStore, ProfileStore};
use crate::error::ServiceError;
use crate::sanitize;
use crate::storage::StorageApi;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct BackfillReport {
    pub folders_seen: usize,
    pub folders_matched: usize,
    pub records_inserted: usize,
}

/// Walk every top-level folder under `actors/`, match each folder name to a
/// profile (whitespace-insensitive, case-insensitive, exact otherwise), and
/// insert one image record per file found under `<folder>/images`. Folders
/// with no matching profile are logged and skipped whole — no partial
/// inserts for them.
pub async fn backfill<P, I, S>(
    profiles: &P,
    images: &I,
    storage: &S,
) -> Result<BackfillReport, ServiceError>
where
    P: ProfileStore,
    I: ImageStore,
    S: StorageApi,
{
    let mut report = BackfillReport::default();

    let folders = storage.list_folder("actors").await?;
    for folder in folders.iter().filter(|entry| entry.is_folder()) {
        report.folders_seen += 1;

        // Full profile list per folder, matching how the original job runs;
        // this is a one-shot tool and the list is small.
        let all_profiles = profiles.profile_names().await?;
        let matched = all_profiles
            .iter()
            .find(|(_, name)| sanitize::matches_folder(name, &folder.name));

        let Some((profile_id, profile_name)) = matched else {
            warn!(folder = %folder.name, "no matching profile for folder, skipping");
            continue;
        };

        let images_path = format!("actors/{}/images", folder.name);
        let files = storage.list_folder(&images_path).await?;
        for file in files.iter().filter(|entry| !entry.is_folder()) {
            let file_url = storage.object_url(&format!("{images_path}/{}", file.name));
            images.insert_image(*profile_id, &file_url).await?;
            report.records_inserted += 1;
            info!(profile = %profile_name, file = %file.name, "inserted image record");
        }
        report.folders_matched += 1;
    }

    Ok(report)
}
