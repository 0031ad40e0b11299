//! Integration tests for assembling a case folder.

use exhibiter::config::{ListOptions, RunOptions};
use exhibiter::list::ExhibitRow;

use crate::common::{assemble, case_folder, folder, write_pdf, write_photo};

fn descriptions(rows: &[ExhibitRow]) -> Vec<(String, Vec<String>)> {
    rows.iter()
        .map(|row| (row.index.to_string(), row.description.clone()))
        .collect()
}

#[test]
fn test_assemble_case_folder() {
    let case = case_folder();

    let assembly = assemble(case.path(), &RunOptions::default(), &ListOptions::default()).unwrap();

    assert_eq!(assembly.exhibits.len(), 3);
    assert_eq!(
        descriptions(assembly.list.rows()),
        vec![
            ("101".to_string(), vec!["Lease:".to_string(), "Signature Page".to_string()]),
            (
                "102".to_string(),
                vec![
                    "Photos:".to_string(),
                    "Photo 1/15/22".to_string(),
                    "Porch (p.2)".to_string(),
                ]
            ),
            ("103".to_string(), vec!["Invoice".to_string()]),
            ("104".to_string(), vec!["Reserved for Rebuttal".to_string()]),
        ]
    );

    // Three cover sheets plus 1 + 3 + 3 document pages
    assert_eq!(assembly.page_count(), 10);
    assert_eq!(assembly.pages.as_ref().unwrap().len(), 10);
}

#[test]
fn test_lease_with_exclusions_respected() {
    let case = case_folder();

    let assembly = assemble(case.path(), &RunOptions::default(), &ListOptions::default()).unwrap();

    let lease = &assembly.exhibits[0];
    assert_eq!(lease.documents().len(), 1);
    assert_eq!(lease.documents()[0].name(), "Signature Page");
    assert_eq!(lease.documents()[0].page_span(), (1, 1));
    assert_eq!(lease.description(true).join(" "), "Lease: Signature Page");
}

#[test]
fn test_lease_with_exclusions_disabled() {
    let case = case_folder();
    let run = RunOptions {
        respect_exclusions: false,
        ..RunOptions::default()
    };

    let assembly = assemble(case.path(), &run, &ListOptions::default()).unwrap();

    let lease = &assembly.exhibits[0];
    assert_eq!(lease.documents().len(), 2);
    assert_eq!(lease.documents()[1].name(), "Addendum");
    assert_eq!(lease.documents()[1].page_span(), (2, 3));
    assert_eq!(lease.page_count(), 3);
}

#[test]
fn test_page_spans_add_up() {
    let case = case_folder();

    let assembly = assemble(case.path(), &RunOptions::default(), &ListOptions::default()).unwrap();

    for exhibit in &assembly.exhibits {
        let mut expected_start = 1;
        for document in exhibit.documents() {
            let (start, end) = document.page_span();
            assert_eq!(start, expected_start);
            assert_eq!(end + 1 - start, document.page_count());
            expected_start = end + 1;
        }
        assert_eq!(exhibit.page_count(), expected_start - 1);
    }
}

#[test]
fn test_disputes_and_blank_columns() {
    let case = case_folder();

    let assembly = assemble(case.path(), &RunOptions::default(), &ListOptions::default()).unwrap();
    let rows = assembly.list.rows();

    assert_eq!(rows[0].disputes, "Plaintiff objects: hearsay.");
    assert_eq!(rows[1].disputes, "");
    assert!(rows.iter().all(|row| row.id_mark == "X" && row.evidence.is_empty()));
}

#[test]
fn test_rebuttal_after_twelve() {
    let temp_dir = tempfile::TempDir::new().unwrap();
    for name in ["11", "12. Emails"] {
        let exhibit = folder(temp_dir.path(), name);
        write_pdf(&exhibit, "Message.pdf", 1);
    }

    let assembly = assemble(temp_dir.path(), &RunOptions::default(), &ListOptions::default())
        .unwrap();

    let last = assembly.list.rows().last().unwrap();
    assert_eq!(last.index.to_string(), "13");
    assert_eq!(last.description, vec!["Reserved for Rebuttal"]);
    // Two cover sheets and two pages; nothing for the reserved exhibit
    assert_eq!(assembly.pages.unwrap().len(), 4);
}

#[test]
fn test_letter_exhibits() {
    let temp_dir = tempfile::TempDir::new().unwrap();
    for name in ["A (Contract)", "B"] {
        let exhibit = folder(temp_dir.path(), name);
        write_photo(&exhibit, "scan.jpg", 20, 30);
    }

    let assembly = assemble(temp_dir.path(), &RunOptions::default(), &ListOptions::default())
        .unwrap();

    let indices: Vec<_> = assembly
        .list
        .rows()
        .iter()
        .map(|row| row.index.to_string())
        .collect();
    assert_eq!(indices, vec!["A", "B", "C"]);
}

#[test]
fn test_keep_leading_digits_and_page_counts() {
    let case = case_folder();
    let run = RunOptions {
        strip_leading_digits: false,
        annotate_page_counts: true,
        ..RunOptions::default()
    };

    let assembly = assemble(case.path(), &run, &ListOptions::default()).unwrap();

    assert_eq!(
        assembly.exhibits[0].documents()[0].name(),
        "1. Signature Page"
    );
    assert_eq!(assembly.exhibits[1].documents()[1].name(), "Porch (2)");
    assert_eq!(assembly.exhibits[2].documents()[0].name(), "Invoice (3)");
}

#[test]
fn test_list_without_page_references() {
    let case = case_folder();
    let list = ListOptions {
        show_page_numbers: false,
        reserve_rebuttal: false,
        ..ListOptions::default()
    };

    let assembly = assemble(case.path(), &RunOptions::default(), &list).unwrap();

    assert_eq!(assembly.list.len(), 3);
    assert_eq!(
        assembly.list.rows()[1].description,
        vec!["Photos:", "Photo 1/15/22", "Porch"]
    );
}

#[test]
fn test_rows_identical_across_runs() {
    let case = case_folder();
    let run = RunOptions::default();
    let list = ListOptions::default();

    let first = assemble(case.path(), &run, &list).unwrap();
    let second = assemble(case.path(), &run, &list).unwrap();

    assert_eq!(first.list, second.list);
}
