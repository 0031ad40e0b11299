//! Integration tests for writing the evidence PDF and exhibit list.

use exhibiter::config::{CompressionLevel, ListFormat, ListOptions, Party, RunOptions};
use exhibiter::io::{ListWriter, PdfWriter};
use exhibiter::merge::{BookmarkManager, DocumentInfo, MetadataManager};
use tempfile::TempDir;

use crate::common::{assemble, case_folder};

#[tokio::test]
async fn test_write_evidence_pdf() {
    let case = case_folder();
    let out_dir = TempDir::new().unwrap();
    let output = out_dir.path().join("Defense Exhibits.pdf");

    let assembly = assemble(case.path(), &RunOptions::default(), &ListOptions::default()).unwrap();
    let pages = assembly.pages.unwrap();

    let titles: Vec<_> = pages.outline().iter().map(|entry| entry.title.clone()).collect();
    assert_eq!(
        titles,
        vec!["EXHIBIT 101: Lease", "EXHIBIT 102: Photos", "EXHIBIT 103"]
    );

    let document = pages
        .finish(&DocumentInfo::new("Defense Exhibits"), true)
        .unwrap();
    let stats = PdfWriter::with_compression(CompressionLevel::Standard)
        .save(document, &output)
        .await
        .unwrap();

    assert!(stats.file_size > 0);
    assert_eq!(stats.output_path, output);

    let written = lopdf::Document::load(&output).unwrap();
    assert_eq!(written.get_pages().len(), 10);
    assert!(BookmarkManager::new().has_bookmarks(&written));
    assert_eq!(
        MetadataManager::new().title(&written).as_deref(),
        Some("Defense Exhibits")
    );
}

#[tokio::test]
async fn test_write_pdf_without_bookmarks() {
    let case = case_folder();
    let out_dir = TempDir::new().unwrap();
    let output = out_dir.path().join("evidence.pdf");

    let assembly = assemble(case.path(), &RunOptions::default(), &ListOptions::default()).unwrap();
    let document = assembly
        .pages
        .unwrap()
        .finish(&DocumentInfo::new("Defense Exhibits"), false)
        .unwrap();
    PdfWriter::new().save(document, &output).await.unwrap();

    let written = lopdf::Document::load(&output).unwrap();
    assert_eq!(written.get_pages().len(), 10);
    assert!(!BookmarkManager::new().has_bookmarks(&written));
}

#[tokio::test]
async fn test_write_markdown_list() {
    let case = case_folder();
    let out_dir = TempDir::new().unwrap();
    let output = out_dir.path().join("Defense Exhibit List.md");

    let assembly = assemble(case.path(), &RunOptions::default(), &ListOptions::default()).unwrap();
    let contents = assembly.list.render(ListFormat::Markdown).unwrap();
    let stats = ListWriter::new().save(&contents, &output).await.unwrap();

    let written = std::fs::read_to_string(&output).unwrap();
    assert_eq!(written, contents);
    assert_eq!(stats.file_size, contents.len() as u64);
    assert!(written.starts_with("**Attachment 4: Defense Exhibit List**"));
    assert!(written.contains("### DEFENSE EXHIBITS"));
    assert!(written.contains("Lease:<br>Signature Page"));
    assert!(written.contains("Plaintiff objects: hearsay."));
    assert!(written.contains("Reserved for Rebuttal"));
}

#[tokio::test]
async fn test_write_json_list() {
    let case = case_folder();
    let out_dir = TempDir::new().unwrap();
    let output = out_dir.path().join("Plaintiff Exhibit List.json");
    let list_options = ListOptions {
        attachment_no: 3,
        party: Party::Plaintiff,
        ..ListOptions::default()
    };

    let assembly = assemble(case.path(), &RunOptions::default(), &list_options).unwrap();
    let contents = assembly.list.render(ListFormat::Json).unwrap();
    ListWriter::new().save(&contents, &output).await.unwrap();

    let written: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&output).unwrap()).unwrap();
    assert_eq!(written["title"], "Attachment 3: Plaintiff Exhibit List");
    assert_eq!(written["party"], "Plaintiff");
    assert_eq!(written["rows"].as_array().unwrap().len(), 4);
    assert_eq!(written["rows"][1]["index"], "102");
    assert_eq!(written["rows"][1]["description"][2], "Porch (p.2)");
    assert_eq!(written["rows"][3]["index"], "104");
}

#[tokio::test]
async fn test_list_only_run_keeps_no_pages() {
    let case = case_folder();
    let run = RunOptions {
        include_pages: false,
        ..RunOptions::default()
    };

    let assembly = assemble(case.path(), &run, &ListOptions::default()).unwrap();

    assert!(assembly.pages.is_none());
    assert_eq!(assembly.list.len(), 4);
    assert_eq!(assembly.exhibits[1].documents()[1].page_span(), (2, 3));
    assert!(
        assembly
            .exhibits
            .iter()
            .all(|exhibit| exhibit.cover_page().is_none())
    );
}
