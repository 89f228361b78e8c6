//! End-to-end conversions between LST files and translation tables.
//!
//! Every conversion reads and validates all of its input before the output is
//! written, so a malformed document never leaves a partial workbook behind.

use std::{
    fs,
    path::{Path, PathBuf},
};

use tracing::{debug, info};

use crate::{
    error::Error,
    formats::{FormatType, infer_format_from_extension, lst_file_name},
    options::WriteOptions,
    table::Workbook,
    types::Document,
};

/// Builds a workbook with one sheet per document, in order.
pub fn documents_to_workbook(
    documents: &[Document],
    options: &WriteOptions,
) -> Result<Workbook, Error> {
    let mut workbook = Workbook::new();
    for document in documents {
        debug!("Generating sheet {}", document.name);
        workbook.push_document(document, options)?;
    }
    Ok(workbook)
}

/// Converts LST files into one workbook with a sheet per file, named after
/// the file stem.
pub fn lst_to_workbook<P, Q>(inputs: &[P], output: Q, options: &WriteOptions) -> Result<(), Error>
where
    P: AsRef<Path>,
    Q: AsRef<Path>,
{
    let documents = inputs
        .iter()
        .map(Document::read_from)
        .collect::<Result<Vec<_>, _>>()?;
    write_workbook(&documents, output, options)
}

/// Writes documents as a workbook file (`.xlsx`, or `.csv` for one document).
pub fn write_workbook<Q: AsRef<Path>>(
    documents: &[Document],
    output: Q,
    options: &WriteOptions,
) -> Result<(), Error> {
    let workbook = documents_to_workbook(documents, options)?;
    workbook.write_to(output.as_ref())?;
    info!(
        "Wrote {} sheet(s) to {}",
        workbook.sheets().len(),
        output.as_ref().display()
    );
    Ok(())
}

/// Converts every sheet of a workbook into `Strings-<SheetName>.lst` inside
/// `out_dir`, creating the directory if needed. Returns the written paths in
/// sheet order.
pub fn workbook_to_lst<P, Q>(input: P, out_dir: Q, options: &WriteOptions) -> Result<Vec<PathBuf>, Error>
where
    P: AsRef<Path>,
    Q: AsRef<Path>,
{
    let workbook = Workbook::read_from(input)?;
    let documents = workbook.documents()?;
    write_lst_files(&documents, out_dir, options)
}

/// Writes each document to `Strings-<name>.lst` inside `out_dir`.
pub fn write_lst_files<Q: AsRef<Path>>(
    documents: &[Document],
    out_dir: Q,
    options: &WriteOptions,
) -> Result<Vec<PathBuf>, Error> {
    let out_dir = out_dir.as_ref();
    fs::create_dir_all(out_dir)?;

    let mut written = Vec::with_capacity(documents.len());
    for document in documents {
        let path = out_dir.join(lst_file_name(&document.name));
        document.write_to(&path, options)?;
        info!("Exported {} entries to {}", document.len(), path.display());
        written.push(path);
    }
    Ok(written)
}

/// Converts a single file, inferring both formats from the extensions.
///
/// A table converted to one `.lst` file must contain exactly one sheet;
/// use [`workbook_to_lst`] for multi-sheet workbooks.
pub fn convert_auto<P, Q>(input: P, output: Q) -> Result<(), Error>
where
    P: AsRef<Path>,
    Q: AsRef<Path>,
{
    let (input, output) = (input.as_ref(), output.as_ref());
    let input_format = infer_format_from_extension(input).ok_or_else(|| {
        Error::UnsupportedFormat(format!("cannot infer format of `{}`", input.display()))
    })?;
    let output_format = infer_format_from_extension(output).ok_or_else(|| {
        Error::UnsupportedFormat(format!("cannot infer format of `{}`", output.display()))
    })?;
    let options = WriteOptions::default();

    match (input_format, output_format) {
        (FormatType::Lst, FormatType::Lst) => Document::read_from(input)?.write_to(output, &options),
        (FormatType::Lst, _) => lst_to_workbook(&[input], output, &options),
        (_, FormatType::Lst) => {
            let mut documents = Workbook::read_from(input)?.documents()?;
            if documents.len() != 1 {
                return Err(Error::InvalidData(format!(
                    "`{}` has {} sheets; convert it to a directory instead",
                    input.display(),
                    documents.len()
                )));
            }
            documents.remove(0).write_to(output, &options)
        }
        _ => Workbook::read_from(input)?.write_to(output),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lst_to_workbook_rejects_duplicate_stems() {
        let dir = tempfile::tempdir().unwrap();
        let first = dir.path().join("a");
        let second = dir.path().join("b");
        fs::create_dir_all(&first).unwrap();
        fs::create_dir_all(&second).unwrap();
        fs::write(first.join("Menu.lst"), "a\nb\n").unwrap();
        fs::write(second.join("Menu.lst"), "c\nd\n").unwrap();

        let output = dir.path().join("out.xlsx");
        let err = lst_to_workbook(
            &[first.join("Menu.lst"), second.join("Menu.lst")],
            &output,
            &WriteOptions::default(),
        )
        .unwrap_err();
        assert!(matches!(err, Error::InvalidData(_)));
        assert!(!output.exists());
    }

    #[test]
    fn test_bad_input_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("Good.lst"), "a\nb\n").unwrap();
        fs::write(dir.path().join("Bad.lst"), "a\nb\nc\n").unwrap();

        let output = dir.path().join("out.xlsx");
        let err = lst_to_workbook(
            &[dir.path().join("Good.lst"), dir.path().join("Bad.lst")],
            &output,
            &WriteOptions::default(),
        )
        .unwrap_err();
        assert!(err.to_string().contains("`Bad`"), "{}", err);
        assert!(!output.exists());
    }

    #[test]
    fn test_convert_auto_lst_to_csv_and_back() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("Menu.lst");
        let table = dir.path().join("Menu.csv");
        let output = dir.path().join("Copy.lst");
        let content = "::A::Start::BREAKLINE::now\nBeginnen\nQuit\n\n";
        fs::write(&input, content).unwrap();

        convert_auto(&input, &table).unwrap();
        convert_auto(&table, &output).unwrap();
        assert_eq!(fs::read_to_string(&output).unwrap(), content);
    }

    #[test]
    fn test_convert_auto_unknown_extension() {
        let err = convert_auto("a.txt", "b.xlsx").unwrap_err();
        assert!(matches!(err, Error::UnsupportedFormat(_)));
    }
}
