//! Integration tests for uploads, downloads and metadata.

mod common;

use std::fs;
use std::io::Cursor;

use common::{assert_fs_error, drive, DriveFixture};
use drivepath::config::Settings;
use drivepath::remote::memory::CallKind;
use drivepath::{DriveFs, ErrorKind};
use tempfile::TempDir;

#[test]
fn test_upload_creates_parents_and_guesses_type() {
    let store = DriveFixture::new().build();
    let fs = drive(&store);

    let record = fs
        .upload("/reports/2020/q1.csv", Cursor::new(b"a,b\n1,2\n".to_vec()), None)
        .unwrap();
    assert_eq!(record.mime_type, "text/csv");
    assert_eq!(store.count(CallKind::Create), 3);
    assert_eq!(fs.size("/reports/2020/q1.csv").unwrap(), 8);
}

#[test]
fn test_upload_collision() {
    let store = DriveFixture::new().file("/taken.txt", b"old").build();
    let fs = drive(&store);

    assert_fs_error(
        fs.upload("/taken.txt", Cursor::new(b"new".to_vec()), None),
        ErrorKind::AlreadyExists,
        "/taken.txt",
    );
    assert_eq!(fs.download("/taken.txt").unwrap(), b"old");
}

#[test]
fn test_large_download_in_many_chunks() {
    let content: Vec<u8> = (0..10_000u32).map(|i| (i % 251) as u8).collect();
    let store = DriveFixture::new().build();
    let settings = Settings {
        download_chunk_size: 1024,
        ..Settings::default()
    };
    let fs = DriveFs::with_settings(&store, settings);

    fs.upload("/big.bin", Cursor::new(content.clone()), None).unwrap();
    assert_eq!(fs.download("/big.bin").unwrap(), content);
}

#[test]
fn test_local_file_round_trip() {
    let temp = TempDir::new().unwrap();
    let source = temp.path().join("photo.png");
    fs::write(&source, [0x89, b'P', b'N', b'G']).unwrap();

    let store = DriveFixture::new().build();
    let drive_fs = drive(&store);
    let record = drive_fs
        .upload_from_file("/pictures/photo", &source, None)
        .unwrap();
    assert_eq!(record.mime_type, "image/png");

    let target = temp.path().join("copy.png");
    let written = drive_fs.download_to_file("/pictures/photo", &target).unwrap();
    assert_eq!(written, 4);
    assert_eq!(fs::read(&target).unwrap(), [0x89, b'P', b'N', b'G']);
}

#[test]
fn test_failed_download_leaves_existing_local_file() {
    use drivepath::remote::RemoteError;

    let temp = TempDir::new().unwrap();
    let local = temp.path().join("precious.txt");
    fs::write(&local, b"precious local data").unwrap();

    let store = DriveFixture::new()
        .folder("/dir")
        .file("/broken.bin", b"remote")
        .build();
    let drive_fs = drive(&store);

    assert_fs_error(
        drive_fs.download_to_file("/dir", &local),
        ErrorKind::PermissionDenied,
        "/dir",
    );
    assert_eq!(fs::read(&local).unwrap(), b"precious local data");

    store.fail_next(CallKind::Download, RemoteError::new(500, "backend error"));
    let err = drive_fs.download_to_file("/broken.bin", &local).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Unmapped);
    assert_eq!(fs::read(&local).unwrap(), b"precious local data");

    // No staging files are left next to the target.
    assert_eq!(fs::read_dir(temp.path()).unwrap().count(), 1);

    assert_eq!(drive_fs.download_to_file("/broken.bin", &local).unwrap(), 6);
    assert_eq!(fs::read(&local).unwrap(), b"remote");
}

#[test]
fn test_download_to_writer() {
    let store = DriveFixture::new().file("/notes.txt", b"remember").build();
    let fs = drive(&store);

    let mut sink = Cursor::new(Vec::new());
    assert_eq!(fs.download_to("/notes.txt", &mut sink).unwrap(), 8);
    assert_eq!(sink.into_inner(), b"remember");
}

#[test]
fn test_download_missing() {
    let store = DriveFixture::new().build();
    let fs = drive(&store);

    assert_fs_error(fs.download("/missing"), ErrorKind::NotFound, "/missing");
    assert_eq!(store.count(CallKind::Download), 0);
}

#[test]
fn test_metadata_accessors() {
    let store = DriveFixture::new()
        .file("/dir/f.txt", b"hello")
        .build();
    let fs = drive(&store);

    assert_eq!(fs.size("/dir/f.txt").unwrap(), 5);
    assert_eq!(fs.size("/dir").unwrap(), 0);
    assert!(!fs.url("/dir/f.txt").unwrap().is_empty());
    assert_eq!(fs.url("/dir").unwrap(), "");

    let created = fs.created_time("/dir/f.txt").unwrap();
    let modified = fs.modified_time("/dir/f.txt").unwrap();
    assert!(created.is_some());
    assert!(modified >= created);
    assert_eq!(fs.accessed_time("/dir/f.txt").unwrap(), modified);
}

#[test]
fn test_permissions_by_path() {
    let store = DriveFixture::new().file("team/brief.doc", b"").build();
    let fs = drive(&store);

    let granted = fs
        .create_permission("team/brief.doc", "writer", "user", Some("editor@example.com"))
        .unwrap();
    assert_eq!(granted.role, "writer");

    let roles: Vec<String> = fs
        .list_permissions("team/brief.doc")
        .unwrap()
        .into_iter()
        .map(|p| p.role)
        .collect();
    assert!(roles.contains(&"writer".to_string()));

    fs.delete_permission("team/brief.doc", &granted.id).unwrap();
    assert_fs_error(
        fs.delete_permission("team/brief.doc", &granted.id),
        ErrorKind::NotFound,
        "team/brief.doc",
    );
}
