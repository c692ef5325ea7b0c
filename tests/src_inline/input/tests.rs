use super::*;
use std::sync::atomic::{AtomicUsize, Ordering};

static DIR_COUNTER: AtomicUsize = AtomicUsize::new(0);

fn make_temp_dir() -> PathBuf {
    let mut dir = std::env::temp_dir();
    let id = DIR_COUNTER.fetch_add(1, Ordering::SeqCst);
    dir.push(format!("kira_cogrisk_input_test_{}_{}", std::process::id(), id));
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

#[test]
fn test_directory_scans_sorted_and_filtered() {
    let dir = make_temp_dir();
    for name in ["b.png", "a.JPG", "notes.txt", "c.tiff"] {
        std::fs::write(dir.join(name), b"x").unwrap();
    }
    std::fs::create_dir_all(dir.join("nested.png")).unwrap();

    let scans = discover_scans(&dir).unwrap();
    let ids: Vec<_> = scans.iter().map(|s| s.id.as_str()).collect();
    assert_eq!(ids, vec!["a.JPG", "b.png", "c.tiff"]);
    assert_eq!(scans[1].path, dir.join("b.png"));
}

#[test]
fn test_single_file_input() {
    let dir = make_temp_dir();
    let path = dir.join("scan.bin");
    std::fs::write(&path, b"x").unwrap();
    let scans = discover_scans(&path).unwrap();
    assert_eq!(
        scans,
        vec![ScanPath {
            id: "scan.bin".to_string(),
            path
        }]
    );
}

#[test]
fn test_empty_directory_is_error() {
    let dir = make_temp_dir();
    std::fs::write(dir.join("readme.md"), b"x").unwrap();
    assert!(matches!(
        discover_scans(&dir),
        Err(InputError::MissingInput(_))
    ));
}

#[test]
fn test_missing_path_is_error() {
    let dir = make_temp_dir();
    assert!(matches!(
        discover_scans(&dir.join("absent")),
        Err(InputError::MissingInput(_))
    ));
}
