use actix_multipart::Multipart;
use actix_web::{HttpResponse, Responder, web};
use futures_util::TryStreamExt;
use sea_orm::DatabaseConnection;
use uuid::Uuid;

use crate::auth::session::AdminSession;
use crate::imaging::{self, CompressionOptions, MAX_UPLOAD_BYTES};
use crate::storage::SupabaseStorage;
use crate::upload::{UploadRequest, run_upload};

/// The parsed multipart form of `POST /api/upload`.
#[derive(Debug, Default)]
struct UploadForm {
    file_name: Option<String>,
    content_type: Option<String>,
    data: Vec<u8>,
    profile_id: Option<String>,
    name: Option<String>,
}

/// Read the multipart body. The 5 MB input cap is enforced while the file
/// streams in, before compression and before any backend call.
async fn read_form(mut payload: Multipart) -> Result<UploadForm, String> {
    let mut form = UploadForm::default();

    while let Some(mut field) = payload
        .try_next()
        .await
        .map_err(|e| format!("Malformed multipart body: {e}"))?
    {
        let disposition = field.content_disposition();
        let field_name = disposition.get_name().unwrap_or_default().to_string();
        match field_name.as_str() {
            "file" => {
                form.file_name = disposition.get_filename().map(str::to_string);
                form.content_type = field.content_type().map(|m| m.to_string());
                while let Some(chunk) = field
                    .try_next()
                    .await
                    .map_err(|e| format!("Failed to read file: {e}"))?
                {
                    if form.data.len() + chunk.len() > MAX_UPLOAD_BYTES {
                        return Err(format!(
                            "File exceeds the {} MB limit",
                            MAX_UPLOAD_BYTES / (1024 * 1024)
                        ));
                    }
                    form.data.extend_from_slice(&chunk);
                }
            }
            "profile_id" => form.profile_id = Some(read_text(&mut field).await?),
            "name" => form.name = Some(read_text(&mut field).await?),
            _ => {}
        }
    }

    Ok(form)
}

async fn read_text(field: &mut actix_multipart::Field) -> Result<String, String> {
    let mut bytes = Vec::new();
    while let Some(chunk) = field
        .try_next()
        .await
        .map_err(|e| format!("Failed to read field: {e}"))?
    {
        bytes.extend_from_slice(&chunk);
    }
    String::from_utf8(bytes).map_err(|_| "Field is not valid UTF-8".to_string())
}

/// Reject the request before any compression or backend call: all three
/// fields must be present, the file must be an image by MIME-type prefix,
/// and the input must fit the size cap.
fn validate(form: &UploadForm) -> Result<(String, Uuid, String), String> {
    let (Some(file_name), Some(profile_id), Some(name)) =
        (&form.file_name, &form.profile_id, &form.name)
    else {
        return Err("Missing fields".to_string());
    };
    if form.data.is_empty() || file_name.is_empty() || name.is_empty() {
        return Err("Missing fields".to_string());
    }
    if form.data.len() > MAX_UPLOAD_BYTES {
        return Err(format!(
            "File exceeds the {} MB limit",
            MAX_UPLOAD_BYTES / (1024 * 1024)
        ));
    }
    let content_type = form.content_type.as_deref().unwrap_or_default();
    if !content_type.starts_with("image/") {
        return Err("Please select an image file".to_string());
    }
    let profile_id =
        Uuid::parse_str(profile_id).map_err(|_| "Invalid profile_id".to_string())?;
    Ok((file_name.clone(), profile_id, name.clone()))
}

/// POST /api/upload — multipart `file`, `profile_id`, `name`.
///
/// Validation (missing fields, MIME type, size cap) rejects before any side
/// effect; backend failures collapse to one generic message with the detail
/// logged.
pub async fn upload_image(
    _session: AdminSession,
    db: web::Data<DatabaseConnection>,
    storage: web::Data<SupabaseStorage>,
    payload: Multipart,
) -> impl Responder {
    let form = match read_form(payload).await {
        Ok(form) => form,
        Err(message) => {
            return HttpResponse::BadRequest().json(serde_json::json!({ "error": message }));
        }
    };

    let (file_name, profile_id, name) = match validate(&form) {
        Ok(parts) => parts,
        Err(message) => {
            return HttpResponse::BadRequest().json(serde_json::json!({ "error": message }));
        }
    };

    let compressed = match imaging::compress(&form.data, &file_name, CompressionOptions::default())
    {
        Ok(compressed) => compressed,
        Err(e) => {
            tracing::warn!(error = %e, file = %file_name, "image compression failed");
            return HttpResponse::BadRequest().json(serde_json::json!({
                "error": "Could not process image",
            }));
        }
    };

    let request = UploadRequest {
        profile_id,
        profile_name: name,
        file_name: compressed.file_name,
        content_type: "image/jpeg".to_string(),
        data: compressed.data,
    };

    match run_upload(db.get_ref(), db.get_ref(), storage.get_ref(), request).await {
        Ok(file_url) => HttpResponse::Ok().json(serde_json::json!({
            "message": "File uploaded successfully",
            "fileUrl": file_url,
        })),
        Err(e) if e.is_client_error() => {
            tracing::warn!(error = %e, profile_id = %profile_id, "upload rejected");
            HttpResponse::BadRequest().json(serde_json::json!({
                "error": e.to_string(),
            }))
        }
        Err(e) => {
            tracing::error!(error = %e, profile_id = %profile_id, "upload failed");
            HttpResponse::InternalServerError().json(serde_json::json!({
                "error": "Upload failed",
            }))
        }
    }
}
