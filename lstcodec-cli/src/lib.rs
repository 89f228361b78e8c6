//! CLI library for testing purposes

use std::{
    ffi::OsString,
    path::{Path, PathBuf},
};

use lstcodec::{Document, Error, WriteOptions, workbook_to_lst, write_workbook};
use rayon::prelude::*;
use tracing::debug;

/// Conversion direction picked from the inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// LST files into one workbook.
    ToTable,
    /// One workbook into LST files.
    ToLst,
}

/// Several inputs, or a single `.lst` input, mean LST to table; anything
/// else is a workbook to split.
pub fn detect_mode(inputs: &[PathBuf]) -> Mode {
    let single_lst = inputs.first().is_some_and(|input| {
        input
            .to_string_lossy()
            .to_ascii_lowercase()
            .ends_with(".lst")
    });
    if inputs.len() > 1 || single_lst {
        Mode::ToTable
    } else {
        Mode::ToLst
    }
}

/// `<stem>.xlsx` next to a single input, `Strings.xlsx` next to the first of several.
pub fn default_workbook_path(inputs: &[PathBuf]) -> PathBuf {
    match inputs {
        [single] => single.with_extension("xlsx"),
        [first, ..] => first
            .parent()
            .map(|dir| dir.join("Strings.xlsx"))
            .unwrap_or_else(|| PathBuf::from("Strings.xlsx")),
        [] => PathBuf::from("Strings.xlsx"),
    }
}

fn with_suffix(path: &Path, suffix: &str) -> PathBuf {
    let mut name = OsString::from(path.as_os_str());
    name.push(suffix);
    PathBuf::from(name)
}

/// First of `<input>~`, `<input>.0~`, `<input>.1~`, ... that does not exist yet.
pub fn default_output_dir(input: &Path) -> PathBuf {
    let mut candidate = with_suffix(input, "~");
    let mut attempt = 0;
    while candidate.exists() {
        candidate = with_suffix(input, &format!(".{}~", attempt));
        attempt += 1;
    }
    candidate
}

/// Options for a single CLI run.
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    pub inputs: Vec<PathBuf>,
    pub output: Option<PathBuf>,
    pub write_options: WriteOptions,
}

/// Runs a conversion in the detected direction.
pub fn run(options: &RunOptions) -> Result<(), Error> {
    match detect_mode(&options.inputs) {
        Mode::ToTable => run_to_table(options),
        Mode::ToLst => run_to_lst(options),
    }
}

fn run_to_table(options: &RunOptions) -> Result<(), Error> {
    // Parsed in parallel; collecting keeps input order, so sheet order is stable.
    let documents = options
        .inputs
        .par_iter()
        .map(|input| {
            debug!("Reading {}", input.display());
            Document::read_from(input)
        })
        .collect::<Result<Vec<_>, _>>()?;
    println!("{} LST(s) imported.", documents.len());

    let output = options
        .output
        .clone()
        .unwrap_or_else(|| default_workbook_path(&options.inputs));
    println!("Exporting {}...", output.display());
    write_workbook(&documents, &output, &options.write_options)?;
    println!("✅ Exported.");
    Ok(())
}

fn run_to_lst(options: &RunOptions) -> Result<(), Error> {
    let [input] = options.inputs.as_slice() else {
        return Err(Error::InvalidData(
            "expected exactly one workbook to export".to_string(),
        ));
    };
    let out_dir = options
        .output
        .clone()
        .unwrap_or_else(|| default_output_dir(input));
    println!("Exporting to: {}", out_dir.display());

    let written = workbook_to_lst(input, &out_dir, &options.write_options)?;
    for path in &written {
        println!("  {}", path.display());
    }
    println!("✅ Exported {} LST file(s).", written.len());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_detect_mode() {
        assert_eq!(detect_mode(&[PathBuf::from("Menu.lst")]), Mode::ToTable);
        assert_eq!(detect_mode(&[PathBuf::from("MENU.LST")]), Mode::ToTable);
        assert_eq!(
            detect_mode(&[PathBuf::from("a.xlsx"), PathBuf::from("b.xlsx")]),
            Mode::ToTable
        );
        assert_eq!(detect_mode(&[PathBuf::from("Book.xlsx")]), Mode::ToLst);
        assert_eq!(detect_mode(&[PathBuf::from("table.csv")]), Mode::ToLst);
    }

    #[test]
    fn test_default_workbook_path() {
        assert_eq!(
            default_workbook_path(&[PathBuf::from("dir/Menu.lst")]),
            PathBuf::from("dir/Menu.xlsx")
        );
        assert_eq!(
            default_workbook_path(&[PathBuf::from("dir/A.lst"), PathBuf::from("other/B.lst")]),
            PathBuf::from("dir/Strings.xlsx")
        );
    }

    #[test]
    fn test_default_output_dir_skips_existing() {
        let temp_dir = TempDir::new().unwrap();
        let input = temp_dir.path().join("Book.xlsx");

        assert_eq!(
            default_output_dir(&input),
            temp_dir.path().join("Book.xlsx~")
        );

        fs::create_dir(temp_dir.path().join("Book.xlsx~")).unwrap();
        assert_eq!(
            default_output_dir(&input),
            temp_dir.path().join("Book.xlsx.0~")
        );

        fs::create_dir(temp_dir.path().join("Book.xlsx.0~")).unwrap();
        assert_eq!(
            default_output_dir(&input),
            temp_dir.path().join("Book.xlsx.1~")
        );
    }
}
