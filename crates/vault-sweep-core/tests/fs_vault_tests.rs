use std::fs;
use std::path::Path;

use vault_sweep_core::config::{DeletePolicy, SweepConfig};
use vault_sweep_core::engine::{ScanOutcome, SweepEngine};
use vault_sweep_core::progress::SilentReporter;
use vault_sweep_core::vault::{FsVault, Vault};

fn write_file(root: &Path, relative: &str, content: &str) {
    let path = root.join(relative);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, content).unwrap();
}

#[test]
fn test_listing_skips_directories_and_hidden_entries() {
    let tmp = tempfile::tempdir().unwrap();
    write_file(tmp.path(), "note.md", "hello");
    write_file(tmp.path(), "Media/pic.png", "");
    write_file(tmp.path(), ".obsidian/cache.png", "");
    write_file(tmp.path(), ".trash/old.png", "");

    let vault = FsVault::new(tmp.path());
    let files = vault.list_all_files().unwrap();
    let paths: Vec<&str> = files.iter().map(|f| f.path.as_str()).collect();
    assert_eq!(paths, vec!["Media/pic.png", "note.md"]);
}

#[test]
fn test_listing_fields_and_ignore_patterns() {
    let tmp = tempfile::tempdir().unwrap();
    write_file(tmp.path(), "Media/Photos/Trip.JPG", "");
    write_file(tmp.path(), "Media/scratch.tmp", "");
    write_file(tmp.path(), "root.md", "");

    let vault = FsVault::new(tmp.path())
        .with_ignore_patterns(&["Media/*.tmp".to_string()]);
    let files = vault.list_all_files().unwrap();
    let paths: Vec<&str> = files.iter().map(|f| f.path.as_str()).collect();
    assert_eq!(paths, vec!["Media/Photos/Trip.JPG", "root.md"]);

    let trip = &files[0];
    assert_eq!(trip.name, "Trip.JPG");
    assert_eq!(trip.extension, "jpg");
    assert_eq!(trip.parent_path, "Media/Photos");
    assert!(!trip.is_markup);

    let root = &files[1];
    assert_eq!(root.parent_path, "/");
    assert!(root.is_markup);
}

#[test]
fn test_read_text_content() {
    let tmp = tempfile::tempdir().unwrap();
    write_file(tmp.path(), "note.md", "[[pic.png]]");

    let vault = FsVault::new(tmp.path());
    let files = vault.list_all_files().unwrap();
    assert_eq!(vault.read_text_content(&files[0]).unwrap(), "[[pic.png]]");
}

#[test]
fn test_end_to_end_sweep_and_undo() {
    let tmp = tempfile::tempdir().unwrap();
    write_file(tmp.path(), "note.md", "here is ![[used.png]]");
    write_file(tmp.path(), "Media/used.png", "used");
    write_file(tmp.path(), "Media/orphan.png", "orphan");

    let config = SweepConfig {
        root_path: tmp.path().to_string_lossy().into_owned(),
        ..SweepConfig::default()
    };
    let vault = FsVault::new(tmp.path());
    let mut engine = SweepEngine::new(vault, config);

    let stats = match engine.scan(&SilentReporter).unwrap() {
        ScanOutcome::Completed(stats) => stats,
        ScanOutcome::AlreadyRunning => panic!("scan unexpectedly dropped"),
    };
    assert_eq!(stats.documents_scanned, 1);
    assert_eq!(stats.orphans_found, 1);
    assert_eq!(engine.candidates()[0].path, "Media/orphan.png");

    let outcome = engine.delete_selected(DeletePolicy::SoftTrash);
    assert_eq!(outcome.succeeded, 1);
    assert!(outcome.failed.is_empty());
    assert!(!tmp.path().join("Media/orphan.png").exists());
    assert!(tmp.path().join(".trash/orphan.png").exists());

    for path in engine.last_batch().to_vec() {
        engine.set_selected(&path, true);
    }
    let undo = engine.undo_selected();
    assert_eq!(undo.restored, 1);
    assert_eq!(undo.not_found, 0);
    assert!(tmp.path().join("Media/orphan.png").exists());
    assert!(!tmp.path().join(".trash/orphan.png").exists());
    assert_eq!(
        fs::read_to_string(tmp.path().join("Media/orphan.png")).unwrap(),
        "orphan"
    );
}

#[test]
fn test_permanent_delete_removes_from_disk() {
    let tmp = tempfile::tempdir().unwrap();
    write_file(tmp.path(), "loose.png", "");

    let config = SweepConfig {
        root_path: tmp.path().to_string_lossy().into_owned(),
        ..SweepConfig::default()
    };
    let mut engine = SweepEngine::new(FsVault::new(tmp.path()), config);
    match engine.scan(&SilentReporter).unwrap() {
        ScanOutcome::Completed(_) => {}
        ScanOutcome::AlreadyRunning => panic!("scan unexpectedly dropped"),
    }

    let outcome = engine.delete_selected(DeletePolicy::Permanent);
    assert_eq!(outcome.succeeded, 1);
    assert!(!tmp.path().join("loose.png").exists());
    assert!(!tmp.path().join(".trash/loose.png").exists());
}
