//! Tests for the media storage middleware.

mod test_utils;

use async_trait::async_trait;
use mediastash_error::{
    MediaErrorKind, MediaStashError, MediaStashErrorKind, MediaStashResult, StorageErrorKind,
};
use mediastash_interface::{
    AutoPkType, Filter, MediaObjectInfo, Next, Operation, OperationResult, Record, StorageBackend,
    StorageMiddleware, UnsavedMediaObject, Value,
};
use mediastash_storage::{MediaReference, MediaStorageMiddleware};
use std::sync::{Arc, Mutex};
use test_utils::{
    RecordingStore, setup_failing, setup_test, setup_without_middleware, test_picture,
};

const TEST_URL: &str = "data:text/plain;base64,dGVzdA==";

fn media_error_kind(err: &MediaStashError) -> &MediaErrorKind {
    match err.kind() {
        MediaStashErrorKind::Media(media_err) => media_err.kind(),
        other => panic!("expected media error, got {:?}", other),
    }
}

fn invalid_reference(collection: &str, field: &str) -> MediaErrorKind {
    MediaErrorKind::InvalidReference {
        collection: collection.to_string(),
        field: field.to_string(),
    }
}

#[tokio::test]
async fn test_create_writes_media_objects() {
    let harness = setup_test(AutoPkType::Int);

    harness
        .storage
        .collection("user")
        .create_object(Record::new().with("picture", test_picture()))
        .await
        .unwrap();

    let media_objects = harness
        .storage
        .collection("mediaObject")
        .find_objects(Filter::all())
        .await
        .unwrap();
    assert_eq!(
        media_objects,
        vec![
            Record::new()
                .with("id", 1_i64)
                .with("mimetype", "text/plain")
                .with("data", b"test".to_vec())
        ]
    );
}

#[tokio::test]
async fn test_persisted_record_holds_reference_not_blob() {
    let harness = setup_test(AutoPkType::Int);

    let created = harness
        .storage
        .collection("user")
        .create_object(Record::new().with("name", "Ada").with("picture", test_picture()))
        .await
        .unwrap();

    // The create result is the next handler's, unmodified
    assert_eq!(created.get("picture"), Some(&Value::from("media:1")));
    assert_eq!(created.get("name"), Some(&Value::from("Ada")));

    let rows = harness.backend.rows("user").await;
    assert_eq!(rows.len(), 1);
    let stored = rows[0].get("picture").and_then(Value::as_text).unwrap();
    assert!(stored.parse::<MediaReference>().is_ok());
    assert!(stored.starts_with("media:"));
}

#[tokio::test]
async fn test_find_object_resolves_media_urls() {
    let harness = setup_test(AutoPkType::Int);
    let users = harness.storage.collection("user");

    let stored = users
        .create_object(Record::new().with("picture", test_picture()))
        .await
        .unwrap();

    let retrieved = users
        .find_object(Filter::by_id(stored.id().unwrap()))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(
        retrieved.get("picture"),
        Some(&Value::MediaInfo(MediaObjectInfo::new(TEST_URL)))
    );
}

#[tokio::test]
async fn test_find_object_with_string_keys() {
    let harness = setup_test(AutoPkType::String);
    let users = harness.storage.collection("user");

    let stored = users
        .create_object(Record::new().with("picture", test_picture()))
        .await
        .unwrap();

    let retrieved = users
        .find_object(Filter::all())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(retrieved.id(), stored.id());
    assert_eq!(
        retrieved.get("picture"),
        Some(&Value::MediaInfo(MediaObjectInfo::new(TEST_URL)))
    );
}

#[tokio::test]
async fn test_find_object_absent_skips_resolution() {
    let harness = setup_test(AutoPkType::Int);

    let found = harness
        .storage
        .collection("user")
        .find_object(Filter::by_id(7_i64))
        .await
        .unwrap();
    assert!(found.is_none());
}

#[tokio::test]
async fn test_find_objects_resolves_every_record() {
    let harness = setup_test(AutoPkType::Int);
    let users = harness.storage.collection("user");

    users
        .create_object(Record::new().with("picture", test_picture()))
        .await
        .unwrap();
    users
        .create_object(
            Record::new().with("picture", UnsavedMediaObject::new("image/gif", b"GIF".to_vec())),
        )
        .await
        .unwrap();

    let found = users.find_objects(Filter::all()).await.unwrap();
    let urls: Vec<_> = found
        .iter()
        .map(|user| user.get("picture").cloned())
        .collect();
    assert_eq!(
        urls,
        vec![
            Some(Value::MediaInfo(MediaObjectInfo::new(TEST_URL))),
            Some(Value::MediaInfo(MediaObjectInfo::new(
                "data:image/gif;base64,R0lG"
            ))),
        ]
    );
}

#[tokio::test]
async fn test_dangling_reference_resolves_to_null() {
    let harness = setup_test(AutoPkType::Int);
    let users = harness.storage.collection("user");

    users
        .create_object(Record::new().with("picture", test_picture()))
        .await
        .unwrap();
    harness
        .storage
        .collection("mediaObject")
        .delete_objects(Filter::all())
        .await
        .unwrap();

    let found = users.find_object(Filter::all()).await.unwrap().unwrap();
    assert_eq!(found.get("picture"), Some(&Value::Null));
}

#[tokio::test]
async fn test_invalid_reference_fails_find_object() {
    let harness = setup_test(AutoPkType::Int);
    let users = harness.storage.collection("user");

    // Write straight to the backend so the middleware never sees the payload
    harness
        .storage
        .backend()
        .execute(Operation::CreateObject {
            collection: "user".to_string(),
            object: Record::new().with("picture", "http://example.com/a.png"),
        })
        .await
        .unwrap();

    let err = users.find_object(Filter::all()).await.unwrap_err();
    assert_eq!(media_error_kind(&err), &invalid_reference("user", "picture"));
    assert!(err
        .to_string()
        .contains("Found 'user' object with invalid media reference stored in field 'picture'"));
}

#[tokio::test]
async fn test_invalid_reference_fails_whole_batch() {
    let harness = setup_test(AutoPkType::Int);
    let users = harness.storage.collection("user");

    users
        .create_object(Record::new().with("picture", test_picture()))
        .await
        .unwrap();
    harness
        .storage
        .backend()
        .execute(Operation::CreateObject {
            collection: "user".to_string(),
            object: Record::new().with("picture", 12_i64),
        })
        .await
        .unwrap();

    let err = users.find_objects(Filter::all()).await.unwrap_err();
    assert_eq!(media_error_kind(&err), &invalid_reference("user", "picture"));
}

#[tokio::test]
async fn test_missing_required_reference_is_invalid() {
    let harness = setup_test(AutoPkType::Int);
    harness
        .storage
        .backend()
        .execute(Operation::CreateObject {
            collection: "user".to_string(),
            object: Record::new().with("name", "no picture"),
        })
        .await
        .unwrap();

    let err = harness
        .storage
        .collection("user")
        .find_object(Filter::all())
        .await
        .unwrap_err();
    assert_eq!(media_error_kind(&err), &invalid_reference("user", "picture"));
}

#[tokio::test]
async fn test_two_media_fields_are_stored_independently() {
    let harness = setup_test(AutoPkType::Int);
    let profiles = harness.storage.collection("profile");

    let created = profiles
        .create_object(
            Record::new()
                .with("avatar", UnsavedMediaObject::new("text/plain", b"avatar".to_vec()))
                .with("banner", UnsavedMediaObject::new("text/plain", b"banner".to_vec())),
        )
        .await
        .unwrap();

    let avatar_ref = created.get("avatar").and_then(Value::as_text).unwrap();
    let banner_ref = created.get("banner").and_then(Value::as_text).unwrap();
    assert_ne!(avatar_ref, banner_ref);
    assert_eq!(harness.backend.rows("mediaObject").await.len(), 2);

    let found = profiles.find_object(Filter::all()).await.unwrap().unwrap();
    assert_eq!(
        found.get("avatar"),
        Some(&Value::MediaInfo(MediaObjectInfo::new(
            "data:text/plain;base64,YXZhdGFy"
        )))
    );
    assert_eq!(
        found.get("banner"),
        Some(&Value::MediaInfo(MediaObjectInfo::new(
            "data:text/plain;base64,YmFubmVy"
        )))
    );
}

#[tokio::test]
async fn test_optional_media_field_may_be_absent() {
    let harness = setup_test(AutoPkType::Int);
    let profiles = harness.storage.collection("profile");

    let created = profiles
        .create_object(
            Record::new()
                .with("avatar", test_picture())
                .with("banner", test_picture())
                .with("cover", Value::Null),
        )
        .await
        .unwrap();
    assert_eq!(created.get("cover"), Some(&Value::Null));
    assert_eq!(harness.backend.rows("mediaObject").await.len(), 2);

    let found = profiles.find_object(Filter::all()).await.unwrap().unwrap();
    assert_eq!(found.get("cover"), Some(&Value::Null));
}

#[tokio::test]
async fn test_create_rejects_non_media_payload() {
    let harness = setup_test(AutoPkType::Int);
    let users = harness.storage.collection("user");

    let err = users
        .create_object(Record::new().with("picture", b"raw bytes".to_vec()))
        .await
        .unwrap_err();
    assert_eq!(
        media_error_kind(&err),
        &MediaErrorKind::InvalidMediaObject {
            collection: "user".to_string(),
            field: "picture".to_string(),
        }
    );

    let missing = users
        .create_object(Record::new().with("name", "no picture"))
        .await
        .unwrap_err();
    assert!(matches!(
        media_error_kind(&missing),
        MediaErrorKind::InvalidMediaObject { .. }
    ));

    assert!(harness.backend.rows("user").await.is_empty());
    assert!(harness.backend.rows("mediaObject").await.is_empty());
}

#[tokio::test]
async fn test_collections_without_media_are_untouched() {
    let plain = setup_without_middleware(AutoPkType::Int);
    let wrapped = setup_test(AutoPkType::Int);

    for harness in [&plain, &wrapped] {
        let notes = harness.storage.collection("note");
        notes
            .create_object(
                Record::new()
                    .with("title", "first")
                    .with("attachment", b"bytes".to_vec()),
            )
            .await
            .unwrap();
        notes
            .update_objects(Filter::by_id(1_i64), Record::new().with("title", "renamed"))
            .await
            .unwrap();
    }

    let plain_notes = plain.storage.collection("note");
    let wrapped_notes = wrapped.storage.collection("note");
    assert_eq!(
        plain_notes.find_objects(Filter::all()).await.unwrap(),
        wrapped_notes.find_objects(Filter::all()).await.unwrap()
    );
    assert_eq!(
        plain_notes.find_object(Filter::by_id(1_i64)).await.unwrap(),
        wrapped_notes.find_object(Filter::by_id(1_i64)).await.unwrap()
    );
    assert_eq!(
        plain_notes.count_objects(Filter::all()).await.unwrap(),
        wrapped_notes.count_objects(Filter::all()).await.unwrap()
    );
}

#[tokio::test]
async fn test_store_receives_field_context() {
    let harness = setup_without_middleware(AutoPkType::Int);
    let recording = Arc::new(RecordingStore {
        inner: harness.media_store.clone(),
        contexts: Mutex::new(Vec::new()),
    });
    let mut storage = harness.storage;
    let middleware = MediaStorageMiddleware::new(recording.clone(), storage.registry());
    storage.set_middleware(vec![Arc::new(middleware)]);

    storage
        .collection("profile")
        .create_object(
            Record::new()
                .with("avatar", test_picture())
                .with("banner", test_picture()),
        )
        .await
        .unwrap();

    let mut contexts = recording.contexts.lock().unwrap().clone();
    contexts.sort();
    assert_eq!(
        contexts,
        vec![
            ("profile".to_string(), "avatar".to_string(), true),
            ("profile".to_string(), "banner".to_string(), true),
        ]
    );
}

#[test]
fn test_collection_info_is_derived_at_construction() {
    let harness = setup_without_middleware(AutoPkType::Int);
    let middleware =
        MediaStorageMiddleware::new(harness.media_store.clone(), harness.storage.registry());

    let info = middleware.collection_info();
    assert_eq!(info.len(), 2);
    assert!(info.get("user").is_some());
    assert!(info.get("profile").is_some());
    assert!(info.get("note").is_none());
    assert!(info.get("mediaObject").is_none());
    assert_eq!(
        info.get("user").unwrap().media_fields()[0].name(),
        "picture"
    );
}

fn storage_error_kind(err: &MediaStashError) -> &StorageErrorKind {
    match err.kind() {
        MediaStashErrorKind::Storage(storage_err) => &storage_err.kind,
        other => panic!("expected storage error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_failed_media_store_aborts_create() {
    let harness = setup_failing(Some("banner"), false);

    let err = harness
        .storage
        .collection("profile")
        .create_object(
            Record::new()
                .with("avatar", test_picture())
                .with("banner", test_picture()),
        )
        .await
        .unwrap_err();

    assert_eq!(
        storage_error_kind(&err),
        &StorageErrorKind::Backend("media store unavailable".to_string())
    );
    assert!(harness.backend.rows("profile").await.is_empty());
    // The avatar may already have been written before the banner failed
    assert!(harness.backend.rows("mediaObject").await.len() <= 1);
}

#[tokio::test]
async fn test_failed_media_lookup_fails_find() {
    let harness = setup_failing(None, true);
    let users = harness.storage.collection("user");

    let created = users
        .create_object(Record::new().with("picture", test_picture()))
        .await
        .unwrap();

    let err = users
        .find_object(Filter::by_id(created.id().unwrap()))
        .await
        .unwrap_err();
    assert_eq!(
        storage_error_kind(&err),
        &StorageErrorKind::Backend("media store unavailable".to_string())
    );

    let err = users.find_objects(Filter::all()).await.unwrap_err();
    assert!(matches!(
        storage_error_kind(&err),
        StorageErrorKind::Backend(_)
    ));
}

/// Records the collection of every operation it forwards.
struct AuditTrail(Mutex<Vec<String>>);

#[async_trait]
impl StorageMiddleware for AuditTrail {
    async fn process(
        &self,
        operation: Operation,
        next: Next<'_>,
    ) -> MediaStashResult<OperationResult> {
        self.0.lock().unwrap().push(operation.collection().to_string());
        next.run(operation).await
    }
}

#[tokio::test]
async fn test_media_objects_bypass_other_middleware() {
    let mut harness = setup_without_middleware(AutoPkType::Int);
    let audit = Arc::new(AuditTrail(Mutex::new(Vec::new())));
    let media =
        MediaStorageMiddleware::new(harness.media_store.clone(), harness.storage.registry());
    harness
        .storage
        .set_middleware(vec![Arc::new(media) as Arc<dyn StorageMiddleware>, audit.clone()]);

    let users = harness.storage.collection("user");
    let created = users
        .create_object(Record::new().with("picture", test_picture()))
        .await
        .unwrap();
    users
        .find_object(Filter::by_id(created.id().unwrap()))
        .await
        .unwrap();

    assert_eq!(*audit.0.lock().unwrap(), vec!["user", "user"]);
    assert_eq!(harness.backend.rows("mediaObject").await.len(), 1);
}
