//! Input validation: check the user-supplied path before pdfium opens it.
//!
//! pdfium reports a missing file, a permission problem and a non-PDF file
//! with the same opaque load error. Checking existence, readability and the
//! `%PDF` magic bytes up front gives callers a precise error, and it happens
//! before the pdfium library is bound, so a bad path fails fast even on a
//! machine without libpdfium.

use crate::error::Pdf2DocxError;
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Validate that `path` names a readable file starting with `%PDF`.
pub fn resolve_local(path: impl AsRef<Path>) -> Result<PathBuf, Pdf2DocxError> {
    let path = path.as_ref().to_path_buf();

    if !path.is_file() {
        return Err(Pdf2DocxError::FileNotFound { path });
    }

    let mut file = match std::fs::File::open(&path) {
        Ok(f) => f,
        Err(e) if e.kind() == std::io::ErrorKind::PermissionDenied => {
            return Err(Pdf2DocxError::PermissionDenied { path });
        }
        Err(_) => return Err(Pdf2DocxError::FileNotFound { path }),
    };

    let mut magic = [0u8; 4];
    let mut filled = 0;
    while filled < magic.len() {
        match file.read(&mut magic[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == std::io::ErrorKind::Interrupted => continue,
            Err(e) if e.kind() == std::io::ErrorKind::PermissionDenied => {
                return Err(Pdf2DocxError::PermissionDenied { path });
            }
            Err(e) => {
                return Err(Pdf2DocxError::CorruptPdf {
                    path,
                    detail: e.to_string(),
                })
            }
        }
    }
    if &magic != b"%PDF" {
        return Err(Pdf2DocxError::NotAPdf { path, magic });
    }

    debug!("Resolved local PDF: {}", path.display());
    Ok(path)
}

/// Normalise a PDF path typed at the interactive prompt.
///
/// Drops the line terminator, then every leading and trailing `"`, which is
/// what a "Copy as path" from a file manager wraps around the path. Inner
/// whitespace and quotes are left alone.
pub fn clean_pdf_path(line: &str) -> String {
    strip_line_ending(line).trim_matches('"').to_string()
}

/// Normalise the output name typed at the interactive prompt.
///
/// Only the line terminator is removed; the name is otherwise used verbatim,
/// without extension checks.
pub fn clean_output_path(line: &str) -> String {
    strip_line_ending(line).to_string()
}

fn strip_line_ending(line: &str) -> &str {
    line.strip_suffix('\n')
        .map(|l| l.strip_suffix('\r').unwrap_or(l))
        .unwrap_or(line)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_clean_pdf_path_strips_quotes() {
        assert_eq!(clean_pdf_path("\"C:\\docs\\a.pdf\"\n"), "C:\\docs\\a.pdf");
        assert_eq!(clean_pdf_path("\"\"report.pdf\"\r\n"), "report.pdf");
        assert_eq!(clean_pdf_path("plain.pdf"), "plain.pdf");
    }

    #[test]
    fn test_clean_pdf_path_keeps_spaces() {
        assert_eq!(clean_pdf_path(" my file.pdf \n"), " my file.pdf ");
        assert_eq!(clean_pdf_path("\"a \"b\" c\""), "a \"b\" c");
    }

    #[test]
    fn test_clean_output_path_is_verbatim() {
        assert_eq!(clean_output_path("\"out.docx\"\n"), "\"out.docx\"");
        assert_eq!(clean_output_path("notes.txt\r\n"), "notes.txt");
        assert_eq!(clean_output_path("out"), "out");
    }

    #[test]
    fn test_missing_file() {
        let err = resolve_local("/definitely/not/a/real/file.pdf").unwrap_err();
        assert!(matches!(err, Pdf2DocxError::FileNotFound { .. }));
    }

    #[test]
    fn test_directory_is_not_a_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = resolve_local(dir.path()).unwrap_err();
        assert!(matches!(err, Pdf2DocxError::FileNotFound { .. }));
    }

    #[test]
    fn test_not_a_pdf() {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        f.write_all(b"PK\x03\x04 this is a zip").unwrap();
        let err = resolve_local(f.path()).unwrap_err();
        match err {
            Pdf2DocxError::NotAPdf { magic, .. } => assert_eq!(&magic, b"PK\x03\x04"),
            other => panic!("expected NotAPdf, got {other:?}"),
        }
    }

    #[test]
    fn test_short_file_is_not_a_pdf() {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        f.write_all(b"%P").unwrap();
        assert!(matches!(
            resolve_local(f.path()).unwrap_err(),
            Pdf2DocxError::NotAPdf { .. }
        ));
    }

    #[test]
    fn test_pdf_magic_accepted() {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        f.write_all(b"%PDF-1.7\n%\xe2\xe3\xcf\xd3\n").unwrap();
        assert_eq!(resolve_local(f.path()).unwrap(), f.path());
    }
}
