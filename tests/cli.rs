//! CLI behaviour that does not need a pdfium library: prompts, argument
//! handling and failure exits all happen before pdfium is bound.

use std::io::Write;
use std::process::{Command, Stdio};

fn pdf2docx() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_pdf2docx"));
    cmd.env_remove("RUST_LOG")
        .env_remove("PDFIUM_LIB_PATH")
        .env_remove("PDF2DOCX_QUIET");
    cmd
}

#[test]
fn prompts_in_order_and_fails_on_missing_pdf() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("missing.pdf");
    let out_path = dir.path().join("output.docx");

    let mut child = pdf2docx()
        .current_dir(dir.path())
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .unwrap();

    // Quoted, as pasted from a file manager.
    write!(
        child.stdin.take().unwrap(),
        "\"{}\"\n{}\n",
        missing.display(),
        out_path.display()
    )
    .unwrap();

    let output = child.wait_with_output().unwrap();
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);

    assert!(!output.status.success());
    let pdf_prompt = stdout
        .find("Enter the path of the PDF file: ")
        .expect("missing PDF prompt");
    let out_prompt = stdout
        .find("Enter the name for the output DOCX file (e.g., output.docx): ")
        .expect("missing output prompt");
    assert!(pdf_prompt < out_prompt);

    // Quotes were stripped before the path was used.
    assert!(stderr.contains("PDF file not found"), "stderr: {stderr}");
    assert!(stderr.contains(&missing.display().to_string()), "stderr: {stderr}");
    assert!(!out_path.exists());
}

#[test]
fn positional_args_skip_prompts() {
    let dir = tempfile::tempdir().unwrap();
    let out_path = dir.path().join("output.docx");

    let output = pdf2docx()
        .arg(dir.path().join("missing.pdf"))
        .arg(&out_path)
        .stdin(Stdio::null())
        .output()
        .unwrap();

    assert!(!output.status.success());
    assert!(!String::from_utf8_lossy(&output.stdout).contains("Enter the"));
    assert!(!out_path.exists());
}

#[test]
fn closed_stdin_is_an_error() {
    let output = pdf2docx().stdin(Stdio::null()).output().unwrap();

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("No input received"));
}

#[test]
fn invalid_page_selection_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let pdf = dir.path().join("input.pdf");
    std::fs::write(&pdf, b"%PDF-1.4\n").unwrap();

    let output = pdf2docx()
        .args(["--pages", "5-2"])
        .arg(&pdf)
        .arg(dir.path().join("out.docx"))
        .stdin(Stdio::null())
        .output()
        .unwrap();

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("--pages"));
}

#[test]
fn json_mode_keeps_prompts_off_stdout() {
    let dir = tempfile::tempdir().unwrap();
    let out_path = dir.path().join("output.docx");

    let mut child = pdf2docx()
        .arg("--json")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .unwrap();

    write!(
        child.stdin.take().unwrap(),
        "{}\n{}\n",
        dir.path().join("missing.pdf").display(),
        out_path.display()
    )
    .unwrap();

    let output = child.wait_with_output().unwrap();
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);

    assert!(!output.status.success());
    assert!(!stdout.contains("Enter the"), "stdout: {stdout}");
    assert!(stderr.contains("Enter the path of the PDF file: "));
    assert!(stderr.contains("Enter the name for the output DOCX file"));
    assert!(!out_path.exists());
}
