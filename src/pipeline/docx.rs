//! DOCX output: one default-styled `w:p` per paragraph, saved atomically.
//!
//! ## Atomic save
//!
//! The archive is packed into a temp file created next to the destination
//! and then renamed over it. A failure while packing therefore never leaves
//! a truncated `.docx` at the output path, and an existing file is only
//! replaced once the new one is complete. The parent directory is never
//! created; if it is missing the save fails with
//! [`Pdf2DocxError::OutputWriteFailed`].

use crate::error::Pdf2DocxError;
use docx_rs::{
    read_docx, BreakType, Docx, DocumentChild, Paragraph, ParagraphChild, Run, RunChild,
};
use std::io::Cursor;
use std::path::Path;
use tracing::{debug, info};

/// Build an in-memory document with one paragraph per entry.
pub fn build_document(paragraphs: &[String]) -> Docx {
    paragraphs
        .iter()
        .fold(Docx::new(), |docx, text| docx.add_paragraph(paragraph(text)))
}

/// Encode one paragraph as a single run.
///
/// Line breaks (`\n` or `\r`, each one counting) become `w:br` and tabs
/// become `w:tab`, so multi-line fragments keep their line structure inside
/// the paragraph. Characters that XML 1.0 cannot carry are dropped.
fn paragraph(text: &str) -> Paragraph {
    let mut run = Run::new();
    let mut pending = String::new();

    for ch in text.chars() {
        match ch {
            '\n' | '\r' | '\t' => {
                if !pending.is_empty() {
                    run = run.add_text(std::mem::take(&mut pending));
                }
                run = if ch == '\t' {
                    run.add_tab()
                } else {
                    run.add_break(BreakType::TextWrapping)
                };
            }
            c if is_xml_char(c) => pending.push(c),
            c => debug!("Dropping non-XML character U+{:04X}", c as u32),
        }
    }
    if !pending.is_empty() {
        run = run.add_text(pending);
    }

    Paragraph::new().add_run(run)
}

fn is_xml_char(c: char) -> bool {
    matches!(c,
        '\u{20}'..='\u{D7FF}' | '\u{E000}'..='\u{FFFD}' | '\u{10000}'..='\u{10FFFF}')
}

/// Whether `c` survives [`build_document`]: XML text, a line break or a tab.
pub(crate) fn is_encodable(c: char) -> bool {
    matches!(c, '\n' | '\r' | '\t') || is_xml_char(c)
}

/// Pack the paragraphs into DOCX bytes.
pub fn to_bytes(paragraphs: &[String]) -> Result<Vec<u8>, Pdf2DocxError> {
    let mut buf = Cursor::new(Vec::new());
    build_document(paragraphs)
        .build()
        .pack(&mut buf)
        .map_err(|e| Pdf2DocxError::DocxPackFailed {
            path: "<memory>".into(),
            detail: e.to_string(),
        })?;
    Ok(buf.into_inner())
}

/// Write the paragraphs as a new DOCX at `output_path`, replacing any file there.
pub fn save_document(paragraphs: &[String], output_path: &Path) -> Result<(), Pdf2DocxError> {
    let write_failed = |source: std::io::Error| Pdf2DocxError::OutputWriteFailed {
        path: output_path.to_path_buf(),
        source,
    };

    let parent = match output_path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };

    // A replaced file keeps its mode; a new one gets the umask default.
    let existing_permissions = std::fs::metadata(output_path)
        .ok()
        .map(|m| m.permissions());

    let mut builder = tempfile::Builder::new();
    builder.prefix(".pdf2docx-").suffix(".tmp");
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        builder.permissions(std::fs::Permissions::from_mode(0o666));
    }
    let mut tmp = builder.tempfile_in(parent).map_err(write_failed)?;

    build_document(paragraphs)
        .build()
        .pack(tmp.as_file_mut())
        .map_err(|e| Pdf2DocxError::DocxPackFailed {
            path: output_path.to_path_buf(),
            detail: e.to_string(),
        })?;

    if let Some(permissions) = existing_permissions {
        tmp.as_file()
            .set_permissions(permissions)
            .map_err(write_failed)?;
    }

    tmp.persist(output_path).map_err(|e| write_failed(e.error))?;

    info!(
        "Saved {} paragraphs to {}",
        paragraphs.len(),
        output_path.display()
    );
    Ok(())
}

/// Read a DOCX back into its ordered paragraph texts.
///
/// Line breaks read back as `\n` and tabs as `\t`, mirroring [`build_document`].
pub fn read_paragraphs(bytes: &[u8]) -> Result<Vec<String>, Pdf2DocxError> {
    let docx = read_docx(bytes).map_err(|e| Pdf2DocxError::DocxReadFailed(e.to_string()))?;
    Ok(docx
        .document
        .children
        .iter()
        .filter_map(|child| match child {
            DocumentChild::Paragraph(p) => Some(paragraph_text(p)),
            _ => None,
        })
        .collect())
}

fn paragraph_text(paragraph: &Paragraph) -> String {
    let mut text = String::new();
    for child in &paragraph.children {
        if let ParagraphChild::Run(run) = child {
            for rc in &run.children {
                match rc {
                    RunChild::Text(t) => text.push_str(&t.text),
                    RunChild::Break(_) => text.push('\n'),
                    RunChild::Tab(_) => text.push('\t'),
                    _ => {}
                }
            }
        }
    }
    text
}
