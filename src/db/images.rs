use sea_orm::*;
use uuid::Uuid;

use crate::models::images;

/// Insert one image record. Duplicates are allowed — the migration backfill
/// relies on this when it is re-run.
pub async fn insert_image(
    db: &DatabaseConnection,
    profile_id: Uuid,
    file_url: &str,
) -> Result<images::Model, DbErr> {
    let record = images::ActiveModel {
        id: Set(Uuid::new_v4()),
        profile_id: Set(profile_id),
        file_url: Set(file_url.to_string()),
        created_at: Set(chrono::Utc::now()),
    };
    record.insert(db).await
}

/// All recorded file URLs for a profile.
pub async fn images_for(db: &DatabaseConnection, profile_id: Uuid) -> Result<Vec<String>, DbErr> {
    images::Entity::find()
        .filter(images::Column::ProfileId.eq(profile_id))
        .select_only()
        .column(images::Column::FileUrl)
        .into_tuple::<String>()
        .all(db)
        .await
}

/// Delete the record(s) for one URL under a profile.
pub async fn delete_image(
    db: &DatabaseConnection,
    profile_id: Uuid,
    file_url: &str,
) -> Result<u64, DbErr> {
    let result = images::Entity::delete_many()
        .filter(images::Column::ProfileId.eq(profile_id))
        .filter(images::Column::FileUrl.eq(file_url))
        .exec(db)
        .await?;
    Ok(result.rows_affected)
}
