use lstcodec::{Cell, Document, Workbook, WriteOptions, read_sheet, write_workbook};
use std::fs;
use std::process::Command;
use tempfile::TempDir;

fn lstcodec_cmd() -> Command {
    Command::new(assert_cmd::cargo::cargo_bin!("lstcodec"))
}

#[test]
fn test_no_arguments_prints_usage() {
    let output = lstcodec_cmd().output().expect("Failed to execute command");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Usage"), "stdout: {}", stdout);
}

#[test]
fn test_lst_files_to_workbook() {
    let temp_dir = TempDir::new().unwrap();
    let a = temp_dir.path().join("A.lst");
    let b = temp_dir.path().join("B.lst");
    let output_file = temp_dir.path().join("All.xlsx");
    fs::write(&a, "One\nEins\nTwo\nZwei\nThree\nDrei\n").unwrap();
    fs::write(&b, "::VOICE::Only\n::VOICE::Einzig\n").unwrap();

    let output = lstcodec_cmd()
        .args([
            a.to_str().unwrap(),
            b.to_str().unwrap(),
            "-o",
            output_file.to_str().unwrap(),
        ])
        .output()
        .expect("Failed to execute command");

    assert!(
        output.status.success(),
        "Command failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let workbook = Workbook::read_from(&output_file).unwrap();
    let names = workbook
        .sheets()
        .iter()
        .map(|s| s.name.as_str())
        .collect::<Vec<_>>();
    assert_eq!(names, vec!["A", "B"]);
    assert_eq!(read_sheet(workbook.sheet("A").unwrap()).unwrap().len(), 3);
    assert_eq!(
        workbook.sheet("B").unwrap().cell(1, 1),
        Some(&Cell::text("::VOICE::Einzig"))
    );
}

#[test]
fn test_single_lst_defaults_to_sibling_workbook() {
    let temp_dir = TempDir::new().unwrap();
    let input = temp_dir.path().join("Menu.lst");
    fs::write(&input, "Start\nBeginnen\n").unwrap();

    let output = lstcodec_cmd()
        .arg(input.to_str().unwrap())
        .output()
        .expect("Failed to execute command");

    assert!(
        output.status.success(),
        "Command failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    assert!(temp_dir.path().join("Menu.xlsx").exists());
}

#[test]
fn test_workbook_to_lst_directory() {
    let temp_dir = TempDir::new().unwrap();
    let input = temp_dir.path().join("Book.xlsx");
    let documents = vec![
        Document::parse("Menu", "Start\nBeginnen\n").unwrap(),
        Document::parse("Dialog", "Hi::BREAKLINE::there\nHallo::BREAKLINE::du\n").unwrap(),
    ];
    write_workbook(&documents, &input, &WriteOptions::default()).unwrap();

    let output = lstcodec_cmd()
        .args([input.to_str().unwrap(), "--crlf"])
        .output()
        .expect("Failed to execute command");

    assert!(
        output.status.success(),
        "Command failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let out_dir = temp_dir.path().join("Book.xlsx~");
    assert_eq!(
        fs::read_to_string(out_dir.join("Strings-Menu.lst")).unwrap(),
        "Start\r\nBeginnen\r\n"
    );
    assert_eq!(
        fs::read_to_string(out_dir.join("Strings-Dialog.lst")).unwrap(),
        "Hi::BREAKLINE::there\r\nHallo::BREAKLINE::du\r\n"
    );

    // A second run must not overwrite the first export.
    let output = lstcodec_cmd()
        .arg(input.to_str().unwrap())
        .output()
        .expect("Failed to execute command");
    assert!(output.status.success());
    assert!(temp_dir.path().join("Book.xlsx.0~").join("Strings-Menu.lst").exists());
}

#[test]
fn test_malformed_lst_fails_with_context() {
    let temp_dir = TempDir::new().unwrap();
    let input = temp_dir.path().join("Broken.lst");
    let output_file = temp_dir.path().join("Broken.xlsx");
    fs::write(&input, "Hello\nHallo\nOrphan\n").unwrap();

    let output = lstcodec_cmd()
        .args([input.to_str().unwrap(), "-o", output_file.to_str().unwrap()])
        .output()
        .expect("Failed to execute command");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Broken"), "stderr: {}", stderr);
    assert!(stderr.contains("line 3"), "stderr: {}", stderr);
    assert!(!output_file.exists());
}
