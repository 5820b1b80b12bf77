//! One-shot backfill of `profile_images` records from existing bucket
//! folders. Run out of band:
//!
//! ```sh
//! cargo run --bin migrate-images
//! ```
//!
//! Re-running against an unchanged bucket inserts duplicate records — the
//! job does not deduplicate.

use dotenv::dotenv;
use talent_backend::migrate;
use talent_backend::storage::SupabaseStorage;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()))
        .init();

    let db = talent_backend::create_pool().await;

    let supabase_url = std::env::var("SUPABASE_URL").expect("SUPABASE_URL must be set");
    let supabase_anon_key =
        std::env::var("SUPABASE_ANON_KEY").expect("SUPABASE_ANON_KEY must be set");
    let storage = SupabaseStorage::new(&supabase_url, &supabase_anon_key);

    match migrate::backfill(&db, &db, &storage).await {
        Ok(report) => {
            tracing::info!(
                folders_seen = report.folders_seen,
                folders_matched = report.folders_matched,
                records_inserted = report.records_inserted,
                "migration complete"
            );
        }
        Err(e) => {
            tracing::error!(error = %e, "migration failed");
            std::process::exit(1);
        }
    }
}
