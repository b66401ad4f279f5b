//! Pipeline stages for PDF-to-DOCX conversion.
//!
//! Each submodule implements exactly one transformation step so that any of
//! them can be swapped (a different text backend, a smarter sentence
//! splitter) without touching the others.
//!
//! ## Data Flow
//!
//! ```text
//! input ──▶ extract ──▶ paragraphs ──▶ docx
//! (path)    (pdfium)    (split/trim)   (pack + atomic save)
//! ```
//!
//! 1. [`input`]     : validate the user-supplied path before pdfium sees it
//! 2. [`extract`]   : read each selected page's text layer and join them
//! 3. [`paragraphs`]: split after `.`, `!`, `?` + spaces and drop blanks
//! 4. [`docx`]      : build one `w:p` per paragraph and save atomically

pub mod docx;
pub mod extract;
pub mod input;
pub mod paragraphs;
