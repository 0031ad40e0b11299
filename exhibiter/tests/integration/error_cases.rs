//! Integration tests for error handling.

use exhibiter::ExhibitError;
use exhibiter::config::{ListOptions, Party, RunOptions};
use exhibiter::index::ExhibitIndex;
use exhibiter::io::{ListWriter, PdfWriter};
use exhibiter::list::{ExhibitList, ExhibitRow};
use tempfile::TempDir;

use crate::common::{assemble, folder, write_pdf};

fn run(root: &std::path::Path) -> exhibiter::Result<exhibiter::assemble::Assembly> {
    assemble(root, &RunOptions::default(), &ListOptions::default())
}

#[test]
fn test_no_exhibits_found() {
    let temp_dir = TempDir::new().unwrap();
    folder(temp_dir.path(), "Drafts");
    std::fs::write(temp_dir.path().join("notes.txt"), "todo").unwrap();

    let err = run(temp_dir.path()).unwrap_err();

    assert!(matches!(err, ExhibitError::NoExhibitsFound { .. }));
    assert_eq!(err.exit_code(), 1);
}

#[test]
fn test_only_excluded_exhibits() {
    let temp_dir = TempDir::new().unwrap();
    let exhibit = folder(temp_dir.path(), "101 (UNUSED)");
    write_pdf(&exhibit, "Lease.pdf", 1);

    let err = run(temp_dir.path()).unwrap_err();
    assert!(matches!(err, ExhibitError::NoExhibitsFound { .. }));
}

#[test]
fn test_single_file_exhibit_without_title() {
    let temp_dir = TempDir::new().unwrap();
    write_pdf(temp_dir.path(), "5.pdf", 1);

    let err = run(temp_dir.path()).unwrap_err();

    match err {
        ExhibitError::MissingExhibitTitle { path } => {
            assert_eq!(path, temp_dir.path().join("5.pdf"));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_corrupt_pdf() {
    let temp_dir = TempDir::new().unwrap();
    let exhibit = folder(temp_dir.path(), "101");
    std::fs::write(exhibit.join("Lease.pdf"), b"not a pdf").unwrap();

    let err = run(temp_dir.path()).unwrap_err();

    assert!(matches!(err, ExhibitError::FailedToLoadPdf { .. }));
    assert_eq!(err.exit_code(), 3);
}

#[test]
fn test_corrupt_image() {
    let temp_dir = TempDir::new().unwrap();
    let exhibit = folder(temp_dir.path(), "A");
    std::fs::write(exhibit.join("scan.jpg"), b"not a jpeg").unwrap();

    let err = run(temp_dir.path()).unwrap_err();
    assert!(matches!(err, ExhibitError::FailedToLoadImage { .. }));
}

#[test]
fn test_missing_root() {
    let temp_dir = TempDir::new().unwrap();

    let err = run(&temp_dir.path().join("missing")).unwrap_err();

    assert!(matches!(err, ExhibitError::FileNotFound { .. }));
    assert_eq!(err.exit_code(), 2);
}

#[test]
fn test_root_is_a_file() {
    let temp_dir = TempDir::new().unwrap();
    let file = write_pdf(temp_dir.path(), "101. Lease.pdf", 1);

    let err = run(&file).unwrap_err();
    assert!(matches!(err, ExhibitError::NotADirectory { .. }));
}

#[test]
fn test_no_successor_for_rebuttal() {
    let mut list = ExhibitList::new(4, Party::Defense);
    list.push(ExhibitRow::new(
        ExhibitIndex::Letter('Z'),
        vec!["Photos".to_string()],
        "",
    ));

    let err = list.reserve_rebuttal().unwrap_err();

    assert!(matches!(err, ExhibitError::NoSuccessorIndex { .. }));
    assert_eq!(list.len(), 1);
}

#[tokio::test]
async fn test_write_into_missing_directory() {
    let temp_dir = TempDir::new().unwrap();
    let missing = temp_dir.path().join("missing");

    let err = ListWriter::new()
        .save("| 101 |\n", &missing.join("list.md"))
        .await
        .unwrap_err();
    assert!(matches!(err, ExhibitError::FailedToCreateOutput { .. }));

    let document = lopdf::Document::with_version("1.5");
    let err = PdfWriter::new()
        .save(document, &missing.join("evidence.pdf"))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        ExhibitError::FailedToCreateOutput { .. } | ExhibitError::FailedToWrite { .. }
    ));
}
