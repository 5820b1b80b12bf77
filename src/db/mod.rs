pub mod images;
pub mod profiles;

use async_trait::async_trait;
use sea_orm::{Database, DatabaseConnection, DbErr};
use std::env;
use uuid::Uuid;

/// Create a SeaORM database connection pool from the `DATABASE_URL` env var.
pub async fn create_pool() -> DatabaseConnection {
    let database_url = env::var("DATABASE_URL").expect("DATABASE_URL must be set");
    Database::connect(&database_url)
        .await
        .expect("Failed to connect to database")
}

/// Profile-table operations the upload pipeline and migration backfill need.
/// Implemented by [`DatabaseConnection`]; tests substitute in-memory fakes.
#[async_trait]
pub trait ProfileStore: Sync {
    /// The profile's recorded folder path (`images` column), if set.
    /// Errors with `RecordNotFound` when the profile does not exist.
    async fn folder_path(&self, id: Uuid) -> Result<Option<String>, DbErr>;

    /// Persist a newly derived folder path onto the profile.
    async fn set_folder_path(&self, id: Uuid, path: &str) -> Result<(), DbErr>;

    /// `(id, name)` of every profile.
    async fn profile_names(&self) -> Result<Vec<(Uuid, String)>, DbErr>;
}

/// Image-record operations shared by the handlers, gallery fetcher and
/// migration backfill.
#[async_trait]
pub trait ImageStore: Sync {
    async fn insert_image(&self, profile_id: Uuid, file_url: &str) -> Result<(), DbErr>;

    /// File URLs recorded for a profile, in whatever order the table returns.
    async fn images_for(&self, profile_id: Uuid) -> Result<Vec<String>, DbErr>;

    /// Remove the record for one URL; returns the number of rows removed.
    async fn delete_image(&self, profile_id: Uuid, file_url: &str) -> Result<u64, DbErr>;
}

#[async_trait]
impl ProfileStore for DatabaseConnection {
    async fn folder_path(&self, id: Uuid) -> Result<Option<String>, DbErr> {
        profiles::folder_path(self, id).await
    }

    async fn set_folder_path(&self, id: Uuid, path: &str) -> Result<(), DbErr> {
        profiles::set_folder_path(self, id, path).await
    }

    async fn profile_names(&self) -> Result<Vec<(Uuid, String)>, DbErr> {
        profiles::profile_names(self).await
    }
}

#[async_trait]
impl ImageStore for DatabaseConnection {
    async fn insert_image(&self, profile_id: Uuid, file_url: &str) -> Result<(), DbErr> {
        images::insert_image(self, profile_id, file_url).await.map(|_| ())
    }

    async fn images_for(&self, profile_id: Uuid) -> Result<Vec<String>, DbErr> {
        images::images_for(self, profile_id).await
    }

    async fn delete_image(&self, profile_id: Uuid, file_url: &str) -> Result<u64, DbErr> {
        images::delete_image(self, profile_id, file_url).await
    }
}
