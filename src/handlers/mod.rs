pub mod images;
pub mod profiles;
pub mod upload;

use actix_web::web;

pub fn init_routes(cfg: &mut web::ServiceConfig) {
    // ── Image routes (upload/delete require an admin session) ──
    cfg.service(web::resource("/upload").route(web::post().to(upload::upload_image)));
    cfg.service(web::resource("/getImages").route(web::get().to(images::get_images)));
    cfg.service(web::resource("/deleteImages").route(web::post().to(images::delete_image)));

    // ── Profile routes (reads are public, writes require a session) ──
    cfg.service(
        web::scope("/profiles")
            .route("", web::get().to(profiles::get_profiles))
            .route("", web::post().to(profiles::upsert_profile))
            .route("/{id}", web::get().to(profiles::get_profile))
            .route("/{id}/gallery", web::get().to(profiles::get_gallery)),
    );

    // ── Public listing routes (age/gender filters applied in the query) ──
    cfg.service(
        web::scope("/listings")
            .route("/actors", web::get().to(profiles::list_actors))
            .route("/actresses", web::get().to(profiles::list_actresses))
            .route("/young-actors", web::get().to(profiles::list_young_actors)),
    );
}
