//! Side-effect ordering and matching tests for the upload pipeline, gallery
//! fetcher and migration backfill, run against in-memory fakes that record
//! every call. No database or bucket is needed.
//!
//! Run with: `cargo test --test pipeline_test`

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use sea_orm::DbErr;
use uuid::Uuid;

use talent_backend::db::{ImageStore, ProfileStore};
use talent_backend::gallery::gallery_urls;
use talent_backend::migrate::backfill;
use talent_backend::storage::{StorageApi, StorageEntry, StorageError};
use talent_backend::upload::{UploadRequest, run_upload};

const BASE: &str = "https://example.supabase.co/storage/v1/object/public/assets/";

#[derive(Debug, Clone, PartialEq, Eq)]
enum Event {
    SetFolderPath(String),
    PutObject(String),
    InsertImage(String),
    ListFolder(String),
    RemoveObject(String),
}

type EventLog = Arc<Mutex<Vec<Event>>>;

struct FakeDb {
    profiles: Vec<(Uuid, String)>,
    folder: Mutex<Option<String>>,
    records: Mutex<Vec<(Uuid, String)>>,
    events: EventLog,
}

impl FakeDb {
    fn new(profiles: Vec<(Uuid, String)>, folder: Option<&str>, events: EventLog) -> Self {
        Self {
            profiles,
            folder: Mutex::new(folder.map(str::to_string)),
            records: Mutex::new(Vec::new()),
            events,
        }
    }
}

#[async_trait]
impl ProfileStore for FakeDb {
    async fn folder_path(&self, _id: Uuid) -> Result<Option<String>, DbErr> {
        Ok(self.folder.lock().unwrap().clone())
    }

    async fn set_folder_path(&self, _id: Uuid, path: &str) -> Result<(), DbErr> {
        *self.folder.lock().unwrap() = Some(path.to_string());
        self.events
            .lock()
            .unwrap()
            .push(Event::SetFolderPath(path.to_string()));
        Ok(())
    }

    async fn profile_names(&self) -> Result<Vec<(Uuid, String)>, DbErr> {
        Ok(self.profiles.clone())
    }
}

#[async_trait]
impl ImageStore for FakeDb {
    async fn insert_image(&self, profile_id: Uuid, file_url: &str) -> Result<(), DbErr> {
        self.records
            .lock()
            .unwrap()
            .push((profile_id, file_url.to_string()));
        self.events
            .lock()
            .unwrap()
            .push(Event::InsertImage(file_url.to_string()));
        Ok(())
    }

    async fn images_for(&self, profile_id: Uuid) -> Result<Vec<String>, DbErr> {
        Ok(self
            .records
            .lock()
            .unwrap()
            .iter()
            .filter(|(id, _)| *id == profile_id)
            .map(|(_, url)| url.clone())
            .collect())
    }

    async fn delete_image(&self, profile_id: Uuid, file_url: &str) -> Result<u64, DbErr> {
        let mut records = self.records.lock().unwrap();
        let before = records.len();
        records.retain(|(id, url)| !(*id == profile_id && url == file_url));
        Ok((before - records.len()) as u64)
    }
}

struct FakeStorage {
    folders: HashMap<String, Vec<StorageEntry>>,
    events: EventLog,
}

fn folder(name: &str) -> StorageEntry {
    StorageEntry {
        name: name.to_string(),
        id: None,
        metadata: None,
    }
}

fn file(name: &str) -> StorageEntry {
    StorageEntry {
        name: name.to_string(),
        id: Some(Uuid::new_v4().to_string()),
        metadata: None,
    }
}

#[async_trait]
impl StorageApi for FakeStorage {
    async fn put_object(
        &self,
        path: &str,
        _bytes: Vec<u8>,
        _content_type: &str,
    ) -> Result<(), StorageError> {
        self.events
            .lock()
            .unwrap()
            .push(Event::PutObject(path.to_string()));
        Ok(())
    }

    async fn list_folder(&self, prefix: &str) -> Result<Vec<StorageEntry>, StorageError> {
        self.events
            .lock()
            .unwrap()
            .push(Event::ListFolder(prefix.to_string()));
        Ok(self.folders.get(prefix).cloned().unwrap_or_default())
    }

    async fn remove_object(&self, path: &str) -> Result<(), StorageError> {
        self.events
            .lock()
            .unwrap()
            .push(Event::RemoveObject(path.to_string()));
        Ok(())
    }

    fn object_url(&self, path: &str) -> String {
        format!("{BASE}{path}")
    }

    fn url_prefix(&self) -> String {
        BASE.to_string()
    }
}

fn request(profile_id: Uuid, name: &str, file_name: &str) -> UploadRequest {
    UploadRequest {
        profile_id,
        profile_name: name.to_string(),
        file_name: file_name.to_string(),
        content_type: "image/jpeg".to_string(),
        data: vec![1, 2, 3],
    }
}

#[tokio::test]
async fn first_upload_persists_folder_path_before_object_upload() {
    let events: EventLog = Arc::default();
    let id = Uuid::new_v4();
    let db = FakeDb::new(vec![(id, "Fabio Levy".to_string())], None, events.clone());
    let storage = FakeStorage {
        folders: HashMap::new(),
        events: events.clone(),
    };

    let url = run_upload(&db, &db, &storage, request(id, "Fabio Levy", "a.jpg"))
        .await
        .unwrap();
    assert_eq!(url, format!("{BASE}actors/FabioLevy/images/a.jpg"));

    let events = events.lock().unwrap();
    assert_eq!(
        *events,
        vec![
            Event::SetFolderPath("actors/FabioLevy/images".to_string()),
            Event::PutObject("actors/FabioLevy/images/a.jpg".to_string()),
            Event::InsertImage(format!("{BASE}actors/FabioLevy/images/a.jpg")),
        ]
    );
}

#[tokio::test]
async fn recorded_folder_path_is_never_re_derived() {
    let events: EventLog = Arc::default();
    let id = Uuid::new_v4();
    // The profile was renamed after its folder was created; uploads keep
    // using the recorded path.
    let db = FakeDb::new(
        vec![(id, "New Name".to_string())],
        Some("actors/OldName/images"),
        events.clone(),
    );
    let storage = FakeStorage {
        folders: HashMap::new(),
        events: events.clone(),
    };

    run_upload(&db, &db, &storage, request(id, "New Name", "b.jpg"))
        .await
        .unwrap();

    let events = events.lock().unwrap();
    assert!(!events.iter().any(|e| matches!(e, Event::SetFolderPath(_))));
    assert!(events.contains(&Event::PutObject("actors/OldName/images/b.jpg".to_string())));
}

#[tokio::test]
async fn gallery_prefers_recorded_images_and_sorts_them() {
    let events: EventLog = Arc::default();
    let id = Uuid::new_v4();
    let db = FakeDb::new(vec![(id, "Ana Ruiz".to_string())], None, events.clone());
    db.insert_image(id, &format!("{BASE}actors/AnaRuiz/images/z.jpg"))
        .await
        .unwrap();
    db.insert_image(id, &format!("{BASE}actors/AnaRuiz/images/a.jpg"))
        .await
        .unwrap();
    let storage = FakeStorage {
        folders: HashMap::new(),
        events: events.clone(),
    };

    let urls = gallery_urls(&db, &storage, id, "Ana Ruiz").await.unwrap();
    assert_eq!(
        urls,
        vec![
            format!("{BASE}actors/AnaRuiz/images/a.jpg"),
            format!("{BASE}actors/AnaRuiz/images/z.jpg"),
        ]
    );
    // Authoritative strategy: the bucket is never consulted.
    assert!(
        !events
            .lock()
            .unwrap()
            .iter()
            .any(|e| matches!(e, Event::ListFolder(_)))
    );
}

#[tokio::test]
async fn gallery_falls_back_to_the_sanitized_bucket_folder() {
    let events: EventLog = Arc::default();
    let id = Uuid::new_v4();
    let db = FakeDb::new(vec![(id, "José Pérez".to_string())], None, events.clone());
    let mut folders = HashMap::new();
    folders.insert(
        "actors/JosePerez/images".to_string(),
        vec![file("b.jpg"), file("a.jpg")],
    );
    let storage = FakeStorage {
        folders,
        events: events.clone(),
    };

    let urls = gallery_urls(&db, &storage, id, "José Pérez").await.unwrap();
    assert_eq!(
        urls,
        vec![
            format!("{BASE}actors/JosePerez/images/a.jpg"),
            format!("{BASE}actors/JosePerez/images/b.jpg"),
        ]
    );
}

#[tokio::test]
async fn gallery_treats_a_missing_folder_as_empty() {
    let events: EventLog = Arc::default();
    let id = Uuid::new_v4();
    let db = FakeDb::new(vec![(id, "Nadie Nuevo".to_string())], None, events.clone());
    let storage = FakeStorage {
        folders: HashMap::new(),
        events,
    };

    let urls = gallery_urls(&db, &storage, id, "Nadie Nuevo").await.unwrap();
    assert!(urls.is_empty());
}

fn backfill_storage(events: EventLog) -> FakeStorage {
    let mut folders = HashMap::new();
    folders.insert(
        "actors".to_string(),
        vec![folder("fabiolevy"), folder("NoSuchProfile")],
    );
    folders.insert(
        "actors/fabiolevy/images".to_string(),
        vec![file("a.jpg"), file("b.jpg"), folder("thumbs")],
    );
    folders.insert(
        "actors/NoSuchProfile/images".to_string(),
        vec![file("stray.jpg")],
    );
    FakeStorage { folders, events }
}

#[tokio::test]
async fn backfill_matches_folders_case_insensitively() {
    let events: EventLog = Arc::default();
    let id = Uuid::new_v4();
    let db = FakeDb::new(vec![(id, "Fabio Levy".to_string())], None, events.clone());
    let storage = backfill_storage(events.clone());

    let report = backfill(&db, &db, &storage).await.unwrap();
    assert_eq!(report.folders_seen, 2);
    assert_eq!(report.folders_matched, 1);
    // Two files; the nested "thumbs" folder entry is skipped.
    assert_eq!(report.records_inserted, 2);

    let records = db.images_for(id).await.unwrap();
    assert_eq!(records.len(), 2);
    assert!(records.contains(&format!("{BASE}actors/fabiolevy/images/a.jpg")));

    // Unmatched folders are skipped whole: their files are never listed.
    assert!(
        !events
            .lock()
            .unwrap()
            .contains(&Event::ListFolder("actors/NoSuchProfile/images".to_string()))
    );
}

#[tokio::test]
async fn colliding_sanitized_names_stay_partitioned_by_profile_id() {
    // "Fabio Levy" and "FabioLevy" sanitize to the same folder name. The
    // record strategy keys by profile id, so each gallery only sees its
    // own rows even though both point into the same bucket folder.
    let events: EventLog = Arc::default();
    let with_space = Uuid::new_v4();
    let without_space = Uuid::new_v4();
    let db = FakeDb::new(
        vec![
            (with_space, "Fabio Levy".to_string()),
            (without_space, "FabioLevy".to_string()),
        ],
        None,
        events.clone(),
    );
    db.insert_image(with_space, &format!("{BASE}actors/FabioLevy/images/a.jpg"))
        .await
        .unwrap();
    db.insert_image(without_space, &format!("{BASE}actors/FabioLevy/images/b.jpg"))
        .await
        .unwrap();
    let storage = FakeStorage {
        folders: HashMap::new(),
        events,
    };

    let first = gallery_urls(&db, &storage, with_space, "Fabio Levy")
        .await
        .unwrap();
    assert_eq!(first, vec![format!("{BASE}actors/FabioLevy/images/a.jpg")]);

    let second = gallery_urls(&db, &storage, without_space, "FabioLevy")
        .await
        .unwrap();
    assert_eq!(second, vec![format!("{BASE}actors/FabioLevy/images/b.jpg")]);
}

#[tokio::test]
async fn backfill_assigns_a_shared_folder_to_one_profile_only() {
    // Two profiles match the same folder name; the first match in the
    // profile list takes every record, the other gets none.
    let events: EventLog = Arc::default();
    let with_space = Uuid::new_v4();
    let without_space = Uuid::new_v4();
    let db = FakeDb::new(
        vec![
            (with_space, "Fabio Levy".to_string()),
            (without_space, "FabioLevy".to_string()),
        ],
        None,
        events.clone(),
    );
    let mut folders = HashMap::new();
    folders.insert("actors".to_string(), vec![folder("FabioLevy")]);
    folders.insert(
        "actors/FabioLevy/images".to_string(),
        vec![file("a.jpg"), file("b.jpg")],
    );
    let storage = FakeStorage { folders, events };

    let report = backfill(&db, &db, &storage).await.unwrap();
    assert_eq!(report.folders_seen, 1);
    assert_eq!(report.folders_matched, 1);
    assert_eq!(report.records_inserted, 2);

    assert_eq!(db.images_for(with_space).await.unwrap().len(), 2);
    assert!(db.images_for(without_space).await.unwrap().is_empty());
}

#[tokio::test]
async fn rerunning_the_backfill_duplicates_every_record() {
    let events: EventLog = Arc::default();
    let id = Uuid::new_v4();
    let db = FakeDb::new(vec![(id, "Fabio Levy".to_string())], None, events.clone());
    let storage = backfill_storage(events);

    let first = backfill(&db, &db, &storage).await.unwrap();
    let second = backfill(&db, &db, &storage).await.unwrap();
    assert_eq!(first.records_inserted, second.records_inserted);

    // No dedup by design: an unchanged bucket yields exactly 2x the rows.
    let records = db.images_for(id).await.unwrap();
    assert_eq!(records.len(), first.records_inserted * 2);
}
