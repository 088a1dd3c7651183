use std::fs;

use grader_engine::{ensure_report_dir, AtomicFileWriter};
use tempfile::TempDir;

#[test]
fn creates_missing_report_dir() {
    let temp = TempDir::new().unwrap();
    let new_dir = temp.path().join("reports");
    assert!(!new_dir.exists());
    ensure_report_dir(&new_dir).unwrap();
    assert!(new_dir.is_dir());
}

#[test]
fn atomic_write_replaces_existing_report() {
    let temp = TempDir::new().unwrap();
    let writer = AtomicFileWriter::new(temp.path().to_path_buf());

    let first = writer.write("report.xlsx", b"first").unwrap();
    assert_eq!(first.file_name().unwrap(), "report.xlsx");
    assert_eq!(fs::read(&first).unwrap(), b"first");

    let second = writer.write("report.xlsx", b"second").unwrap();
    assert_eq!(first, second);
    assert_eq!(fs::read(&second).unwrap(), b"second");

    let leftovers: Vec<_> = fs::read_dir(temp.path()).unwrap().collect();
    assert_eq!(leftovers.len(), 1);
}

#[test]
fn no_partial_file_when_dir_is_a_file() {
    let temp = TempDir::new().unwrap();
    let file_path = temp.path().join("not_a_dir");
    fs::write(&file_path, "x").unwrap();

    let writer = AtomicFileWriter::new(file_path.clone());
    let result = writer.write("report.xlsx", b"data");
    assert!(result.is_err());
    assert!(!file_path.with_file_name("report.xlsx").exists());
}
