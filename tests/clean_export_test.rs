//! 整形シート出力の統合テスト

use checklist_scorer::error::ChecklistError;
use checklist_scorer::export::clean_batch;
use checklist_scorer::pipeline::parse_file;
use checklist_scorer::reader::{load_sheet, SheetLayout, SheetNames};
use rust_xlsxwriter::Workbook;
use std::path::Path;
use tempfile::tempdir;

fn write_raw_checklist(path: &Path) {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name("Teams").unwrap();

    let rows = [
        ["Gold Auto /10", "Anthony Edwards", "wolves"],
        ["Base", "Victor Wembanyama", "spurs"],
        ["Stained Glass", "Nikola Jokic", "Denver Nuggets"],
        ["Base", "Gary Payton II,,", "warriors"],
    ];
    for (r, row) in rows.iter().enumerate() {
        for (c, value) in row.iter().enumerate() {
            worksheet.write_string(r as u32, c as u16, *value).unwrap();
        }
    }
    workbook.save(path).unwrap();
}

#[test]
fn test_clean_output_reads_back_as_precleaned() {
    let input_dir = tempdir().expect("Failed to create temp dir");
    let output_dir = tempdir().expect("Failed to create temp dir");
    let source = input_dir.path().join("2025-26-Select.xlsx");
    write_raw_checklist(&source);

    let sheets = SheetNames::default();
    let summary = clean_batch(&[source.clone()], output_dir.path(), &sheets, |_| {}).unwrap();
    assert_eq!(summary.files.len(), 1);
    assert_eq!(summary.total_rows(), 4);
    assert!(summary.errors.is_empty());

    let output = &summary.files[0].output;
    assert_eq!(output, &output_dir.path().join("2025-26-Select.xlsx"));

    let sheet = load_sheet(output, &sheets).unwrap();
    assert_eq!(sheet.layout, SheetLayout::PreCleaned);

    let from_raw = parse_file(&source, &sheets).unwrap();
    let reread = parse_file(output, &sheets).unwrap();
    assert_eq!(from_raw, reread);
    assert_eq!(reread[0].team(), "Minnesota Timberwolves");
    assert_eq!(reread[0].numbering(), Some(10));
    // one trailing comma removed on the raw read, none on the re-read
    assert_eq!(from_raw[3].player(), "Gary Payton II,");
    assert_eq!(reread[3].player(), "Gary Payton II,");
}

#[test]
fn test_clean_refuses_to_overwrite_input() {
    let dir = tempdir().expect("Failed to create temp dir");
    let source = dir.path().join("2025-26-Select.xlsx");
    write_raw_checklist(&source);

    let result = clean_batch(&[source], dir.path(), &SheetNames::default(), |_| {});
    match result {
        Err(ChecklistError::NoValidRecords(errors)) => {
            assert_eq!(errors.len(), 1);
            assert_eq!(errors[0].file_name, "2025-26-Select.xlsx");
        }
        _ => panic!("expected NoValidRecords"),
    }
}

#[test]
fn test_error_messages() {
    let err = ChecklistError::MissingWorksheet {
        file: "a.xlsx".into(),
        sheet: "Teams".into(),
    };
    assert!(err.to_string().contains("Teams"));
    assert!(err.to_string().contains("a.xlsx"));

    let err = ChecklistError::NoValidRecords(Vec::new());
    assert!(err.to_string().contains("0"));

    let err: ChecklistError = checklist_common::Error::MissingPlayer.into();
    assert_eq!(err.to_string(), checklist_common::Error::MissingPlayer.to_string());
}
