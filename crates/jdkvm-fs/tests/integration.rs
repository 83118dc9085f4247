use jdkvm_fs::{
    AtomicWriteOptions, Error, RenameOptions, Workspace, atomic_write, rename_dir,
};
use tempfile::tempdir;

#[test]
fn test_publish_from_workspace() {
    let dir = tempdir().unwrap();
    let store = dir.path().join("store");
    std::fs::create_dir_all(&store).unwrap();

    let ws = Workspace::new(dir.path().join("download/17_temp")).unwrap();
    std::fs::create_dir_all(ws.path().join("jdk-17/bin")).unwrap();
    std::fs::write(ws.path().join("jdk-17/bin/java"), "#!/bin/sh").unwrap();

    let payload = ws.payload_root().unwrap();
    rename_dir(&payload, store.join("17"), RenameOptions::new()).unwrap();
    let root = ws.path().to_path_buf();
    drop(ws);

    assert!(store.join("17/bin/java").is_file());
    assert!(!root.exists());
}

#[test]
fn test_failed_publish_keeps_destination_intact() {
    let dir = tempdir().unwrap();
    let dest = dir.path().join("store/17");
    std::fs::create_dir_all(&dest).unwrap();
    std::fs::write(dest.join("release"), "old").unwrap();

    let ws = Workspace::new(dir.path().join("17_temp")).unwrap();
    std::fs::write(ws.path().join("release"), "new").unwrap();

    let err = rename_dir(ws.path(), &dest, RenameOptions::new()).unwrap_err();
    assert!(matches!(err, Error::AlreadyExists { .. }));
    assert_eq!(std::fs::read_to_string(dest.join("release")).unwrap(), "old");
}

#[test]
fn test_atomic_write_roundtrip() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("config/jdkvm.json");
    atomic_write(&path, br#"{"proxy":null}"#, AtomicWriteOptions::new()).unwrap();
    assert_eq!(std::fs::read(&path).unwrap(), br#"{"proxy":null}"#);
}

#[cfg(unix)]
#[test]
fn test_link_lifecycle() {
    use jdkvm_fs::{create_dir_link, read_dir_link, remove_dir_link};

    let dir = tempdir().unwrap();
    let v17 = dir.path().join("store/17");
    let v21 = dir.path().join("store/21");
    let link = dir.path().join("current");
    std::fs::create_dir_all(&v17).unwrap();
    std::fs::create_dir_all(&v21).unwrap();

    create_dir_link(&v17, &link).unwrap();
    assert_eq!(read_dir_link(&link).unwrap(), Some(v17));

    remove_dir_link(&link).unwrap();
    create_dir_link(&v21, &link).unwrap();
    assert_eq!(read_dir_link(&link).unwrap(), Some(v21));
}
