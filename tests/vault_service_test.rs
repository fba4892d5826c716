mod common;

use std::sync::Arc;

use codent_vault::{
    application::{error::ApplicationError, services::FileVault},
    domain::models::file::FileData,
};
use common::MemoryStorage;

fn vault() -> (FileVault, Arc<MemoryStorage>) {
    let storage = Arc::new(MemoryStorage::new());
    (FileVault::new(storage.clone(), "uploads"), storage)
}

fn text_file(name: &str, text: &str) -> FileData {
    FileData::new(text.as_bytes().to_vec(), name.to_string(), None)
}

#[tokio::test]
async fn upload_then_list_includes_the_record() {
    let (vault, _) = vault();

    let record = vault
        .upload(text_file("notes.txt", "hello"), None)
        .await
        .unwrap();

    assert_eq!(record.name, "notes.txt");
    assert_eq!(record.size, 5);
    assert_eq!(record.content_type, "text/plain");
    assert!(record.location.path().starts_with("uploads/"));

    let listed = vault.list(None).await.unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].id, record.id);
}

#[tokio::test]
async fn folders_are_listed_separately() {
    let (vault, _) = vault();

    vault
        .upload(text_file("a.txt", "a"), Some("/docs/"))
        .await
        .unwrap();
    vault.upload(text_file("b.txt", "b"), None).await.unwrap();

    let docs = vault.list(Some("docs")).await.unwrap();
    assert_eq!(docs.len(), 1);
    assert_eq!(docs[0].name, "a.txt");

    let defaults = vault.list(Some("  ")).await.unwrap();
    assert_eq!(defaults.len(), 1);
    assert_eq!(defaults[0].name, "b.txt");
}

#[tokio::test]
async fn delete_then_list_excludes_the_record() {
    let (vault, _) = vault();

    let kept = vault.upload(text_file("keep.txt", "k"), None).await.unwrap();
    let dropped = vault.upload(text_file("drop.txt", "d"), None).await.unwrap();

    vault.delete(&dropped).await.unwrap();

    let listed = vault.list(None).await.unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].id, kept.id);
    assert_eq!(
        vault.find(&dropped.id, None).await.unwrap_err(),
        ApplicationError::NotFound
    );
}

#[tokio::test]
async fn empty_file_name_is_rejected() {
    let (vault, storage) = vault();

    let err = vault
        .upload(text_file("  ", "content"), None)
        .await
        .unwrap_err();

    assert!(matches!(err, ApplicationError::BadRequest(_)));
    assert_eq!(storage.len(), 0);
}

#[tokio::test]
async fn content_is_returned_for_text_only() {
    let (vault, _) = vault();

    let source = "fn main() {\n    println!(\"hi\");\n}\n";
    let text = vault
        .upload(text_file("main.rs", source), None)
        .await
        .unwrap();
    let image = vault
        .upload(
            FileData::new(vec![0x89, 0x50, 0x4e, 0x47], "logo.png".to_string(), None),
            None,
        )
        .await
        .unwrap();

    assert_eq!(vault.get_content(&text).await.unwrap().as_deref(), Some(source));
    assert_eq!(vault.get_content(&image).await.unwrap(), None);
    assert_eq!(vault.download(&image).await.unwrap(), vec![0x89, 0x50, 0x4e, 0x47]);
}

#[tokio::test]
async fn delete_all_counts_failures_without_stopping() {
    let (vault, storage) = vault();

    vault.upload(text_file("one.txt", "1"), None).await.unwrap();
    let stuck = vault.upload(text_file("two.txt", "2"), None).await.unwrap();
    vault.upload(text_file("three.txt", "3"), None).await.unwrap();
    vault
        .upload(text_file("elsewhere.txt", "x"), Some("other"))
        .await
        .unwrap();
    storage.fail_delete_of(&stuck.id);

    let report = vault.delete_all(None).await.unwrap();

    assert_eq!(report.deleted, 2);
    assert_eq!(report.failed, 1);
    let remaining = vault.list(None).await.unwrap();
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].id, stuck.id);
    assert_eq!(vault.list(Some("other")).await.unwrap().len(), 1);
}
