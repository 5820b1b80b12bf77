use actix_web::{HttpResponse, Responder, web};
use sea_orm::DatabaseConnection;
use serde::Deserialize;
use uuid::Uuid;

use crate::auth::session::AdminSession;
use crate::db::images as image_db;
use crate::db::profiles as profile_db;
use crate::models::images::{DeleteImageRequest, ImageItem};
use crate::storage::{self, StorageApi, SupabaseStorage};

#[derive(Debug, Deserialize)]
pub struct GetImagesQuery {
    pub profile_id: Uuid,
}

/// GET /api/getImages?profile_id=... — recorded image URLs for a profile.
pub async fn get_images(
    db: web::Data<DatabaseConnection>,
    query: web::Query<GetImagesQuery>,
) -> impl Responder {
    match image_db::images_for(db.get_ref(), query.profile_id).await {
        Ok(urls) => {
            let images: Vec<ImageItem> = urls
                .into_iter()
                .map(|file_url| ImageItem { file_url })
                .collect();
            HttpResponse::Ok().json(serde_json::json!({ "images": images }))
        }
        Err(e) => {
            tracing::error!(error = %e, profile_id = %query.profile_id, "image query failed");
            HttpResponse::InternalServerError().json(serde_json::json!({
                "error": "Database query failed",
            }))
        }
    }
}

/// POST /api/deleteImages — remove one image from the bucket and drop its
/// record. The target URL must resolve inside the profile's recorded folder
/// before any storage call is made.
pub async fn delete_image(
    _session: AdminSession,
    db: web::Data<DatabaseConnection>,
    storage: web::Data<SupabaseStorage>,
    body: web::Json<DeleteImageRequest>,
) -> impl Responder {
    let request = body.into_inner();

    let folder_path = match profile_db::folder_path(db.get_ref(), request.profile_id).await {
        Ok(Some(path)) if !path.is_empty() => path,
        Ok(_) => {
            return HttpResponse::BadRequest().json(serde_json::json!({
                "error": "Profile has no recorded image folder",
            }));
        }
        Err(e) => {
            tracing::error!(error = %e, profile_id = %request.profile_id, "profile lookup failed");
            return HttpResponse::InternalServerError().json(serde_json::json!({
                "error": "Database query failed",
            }));
        }
    };

    let relative_path =
        match storage::delete_target(&request.file_url, &storage.url_prefix(), &folder_path) {
            Ok(path) => path,
            Err(e) => {
                return HttpResponse::BadRequest().json(serde_json::json!({
                    "error": e.to_string(),
                }));
            }
        };

    if let Err(e) = storage.remove_object(&relative_path).await {
        tracing::error!(error = %e, path = %relative_path, "storage removal failed");
        return HttpResponse::InternalServerError().json(serde_json::json!({
            "error": "Failed to delete file",
        }));
    }

    if let Err(e) = image_db::delete_image(db.get_ref(), request.profile_id, &request.file_url).await
    {
        tracing::error!(error = %e, url = %request.file_url, "image record removal failed");
        return HttpResponse::InternalServerError().json(serde_json::json!({
            "error": "Failed to delete file",
        }));
    }

    HttpResponse::Ok().json(serde_json::json!({
        "message": "File deleted successfully",
    }))
}
