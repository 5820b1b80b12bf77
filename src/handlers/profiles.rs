use actix_web::{HttpResponse, Responder, web};
use sea_orm::DatabaseConnection;
use uuid::Uuid;

use crate::auth::session::AdminSession;
use crate::db::profiles as profile_db;
use crate::gallery;
use crate::models::profiles::{ProfileDetail, UpsertProfile};
use crate::storage::SupabaseStorage;

/// GET /api/profiles — every profile, raw rows (admin editor seed list).
pub async fn get_profiles(db: web::Data<DatabaseConnection>) -> impl Responder {
    match profile_db::get_all_profiles(db.get_ref()).await {
        Ok(profiles) => HttpResponse::Ok().json(profiles),
        Err(e) => {
            tracing::error!(error = %e, "profile list failed");
            HttpResponse::InternalServerError().json(serde_json::json!({
                "error": "Failed to fetch profiles",
            }))
        }
    }
}

/// GET /api/profiles/{id} — one profile with legacy JSON columns resolved.
pub async fn get_profile(
    db: web::Data<DatabaseConnection>,
    path: web::Path<Uuid>,
) -> impl Responder {
    let id = path.into_inner();
    match profile_db::get_profile_by_id(db.get_ref(), id).await {
        Ok(Some(profile)) => HttpResponse::Ok().json(ProfileDetail::from_model(&profile)),
        Ok(None) => HttpResponse::NotFound().json(serde_json::json!({
            "error": format!("Profile {id} not found"),
        })),
        Err(e) => {
            tracing::error!(error = %e, profile_id = %id, "profile fetch failed");
            HttpResponse::InternalServerError().json(serde_json::json!({
                "error": "Database query failed",
            }))
        }
    }
}

/// POST /api/profiles — upsert from the admin editor (admin session
/// required). Created rows come back with their generated identifier.
pub async fn upsert_profile(
    _session: AdminSession,
    db: web::Data<DatabaseConnection>,
    body: web::Json<UpsertProfile>,
) -> impl Responder {
    let input = body.into_inner();
    let creating = input.id.is_none();
    match profile_db::upsert_profile(db.get_ref(), input).await {
        Ok(profile) if creating => HttpResponse::Created().json(profile),
        Ok(profile) => HttpResponse::Ok().json(profile),
        Err(e) => {
            let not_found = matches!(e, sea_orm::DbErr::RecordNotFound(_));
            tracing::error!(error = %e, "profile upsert failed");
            let mut status = if not_found {
                HttpResponse::NotFound()
            } else {
                HttpResponse::InternalServerError()
            };
            status.json(serde_json::json!({
                "error": "Failed to save profile",
            }))
        }
    }
}

/// GET /api/profiles/{id}/gallery — ordered public image URLs.
pub async fn get_gallery(
    db: web::Data<DatabaseConnection>,
    storage: web::Data<SupabaseStorage>,
    path: web::Path<Uuid>,
) -> impl Responder {
    let id = path.into_inner();
    let profile = match profile_db::get_profile_by_id(db.get_ref(), id).await {
        Ok(Some(profile)) => profile,
        Ok(None) => {
            return HttpResponse::NotFound().json(serde_json::json!({
                "error": format!("Profile {id} not found"),
            }));
        }
        Err(e) => {
            tracing::error!(error = %e, profile_id = %id, "profile fetch failed");
            return HttpResponse::InternalServerError().json(serde_json::json!({
                "error": "Database query failed",
            }));
        }
    };

    match gallery::gallery_urls(db.get_ref(), storage.get_ref(), id, &profile.name).await {
        Ok(images) => HttpResponse::Ok().json(serde_json::json!({ "images": images })),
        Err(e) => {
            tracing::error!(error = %e, profile_id = %id, "gallery fetch failed");
            HttpResponse::InternalServerError().json(serde_json::json!({
                "error": "Failed to fetch images",
            }))
        }
    }
}

fn today() -> chrono::NaiveDate {
    chrono::Utc::now().date_naive()
}

/// GET /api/listings/actors — adults, gender pinned to "Male".
pub async fn list_actors(db: web::Data<DatabaseConnection>) -> impl Responder {
    listing(
        profile_db::list_adults(db.get_ref(), profile_db::age_cutoff(today()), Some("Male")).await,
    )
}

/// GET /api/listings/actresses — adults, gender pinned to "Female".
pub async fn list_actresses(db: web::Data<DatabaseConnection>) -> impl Responder {
    listing(
        profile_db::list_adults(db.get_ref(), profile_db::age_cutoff(today()), Some("Female"))
            .await,
    )
}

/// GET /api/listings/young-actors — minors, no gender filter.
pub async fn list_young_actors(db: web::Data<DatabaseConnection>) -> impl Responder {
    listing(profile_db::list_minors(db.get_ref(), profile_db::age_cutoff(today())).await)
}

fn listing(
    result: Result<Vec<crate::models::profiles::Model>, sea_orm::DbErr>,
) -> HttpResponse {
    match result {
        Ok(profiles) => HttpResponse::Ok().json(profiles),
        Err(e) => {
            tracing::error!(error = %e, "listing query failed");
            HttpResponse::InternalServerError().json(serde_json::json!({
                "error": "Error fetching profiles",
            }))
        }
    }
}
