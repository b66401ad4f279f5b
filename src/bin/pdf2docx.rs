//! CLI binary for edgequake-pdf2docx.
//!
//! Run with no arguments it behaves as an interactive tool: it asks for the
//! PDF path, then for the output name, converts, and reports where the file
//! was saved. Positional arguments and flags skip the prompts for scripted use.

use anyhow::{bail, Context, Result};
use clap::Parser;
use edgequake_pdf2docx::pipeline::input::{clean_output_path, clean_pdf_path};
use edgequake_pdf2docx::{
    convert_to_file, inspect, ConversionConfig, ConversionProgressCallback, PageSelection,
    PageSeparator, ProgressCallback,
};
use indicatif::{ProgressBar, ProgressStyle};
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

const PDF_PROMPT: &str = "Enter the path of the PDF file: ";
const OUTPUT_PROMPT: &str = "Enter the name for the output DOCX file (e.g., output.docx): ";

// ── ANSI colour helpers (no extra deps) ──────────────────────────────────────

fn green(s: &str) -> String {
    format!("\x1b[32m{s}\x1b[0m")
}
fn dim(s: &str) -> String {
    format!("\x1b[2m{s}\x1b[0m")
}
fn bold(s: &str) -> String {
    format!("\x1b[1m{s}\x1b[0m")
}

// ── Progress callbacks ───────────────────────────────────────────────────────

/// Prints every page's raw text to stdout as it is extracted.
struct EchoPagesCallback;

impl ConversionProgressCallback for EchoPagesCallback {
    fn on_page_extracted(&self, page_num: usize, _total_pages: usize, text: &str) {
        println!("{}", page_echo(page_num, text));
    }
}

fn page_echo(page_num: usize, text: &str) -> String {
    format!("Page {page_num} text:\n {text}")
}

fn saved_message(output: &Path) -> String {
    format!("PDF content has been saved as {}", output.display())
}

/// Terminal progress bar on stderr, used instead of the page dump.
struct BarProgressCallback {
    bar: ProgressBar,
}

impl BarProgressCallback {
    fn new() -> Arc<Self> {
        let bar = ProgressBar::new(0);
        bar.set_style(
            ProgressStyle::with_template("{spinner:.cyan} {prefix:.bold}  {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner())
                .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏", "⠿"]),
        );
        bar.set_prefix("Preparing");
        bar.set_message("Opening PDF…");
        bar.enable_steady_tick(Duration::from_millis(80));
        Arc::new(Self { bar })
    }
}

impl ConversionProgressCallback for BarProgressCallback {
    fn on_conversion_start(&self, total_pages: usize) {
        self.bar.set_length(total_pages as u64);
        self.bar.set_style(
            ProgressStyle::with_template(
                "{spinner:.cyan} {prefix:.bold}  [{bar:42.green/238}] {pos:>3}/{len} pages  ⏱ {elapsed_precise}",
            )
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("█▉▊▋▌▍▎▏  "),
        );
        self.bar.set_prefix("Extracting");
    }

    fn on_page_extracted(&self, page_num: usize, _total_pages: usize, text: &str) {
        self.bar.set_message(format!("page {page_num}"));
        if text.is_empty() {
            self.bar
                .println(format!("  {} Page {page_num:>3}  no text layer", dim("·")));
        }
        self.bar.inc(1);
    }

    fn on_paragraphs_built(&self, paragraph_count: usize) {
        self.bar.set_prefix("Writing");
        self.bar.set_message(format!("{paragraph_count} paragraphs"));
    }

    fn on_document_saved(&self, _output_path: &Path, _paragraph_count: usize) {
        self.bar.finish_and_clear();
    }
}

// ── CLI definition ───────────────────────────────────────────────────────────

const AFTER_HELP: &str = r#"EXAMPLES:
  # Interactive: prompts for the PDF path and the output name
  pdf2docx

  # Non-interactive
  pdf2docx report.pdf report.docx

  # Pages 2 to 5, keep words from running across page boundaries
  pdf2docx --pages 2-5 --separator space report.pdf excerpt.docx

  # Progress bar instead of dumping page text, stats as JSON
  pdf2docx --no-echo --json report.pdf report.docx

  # Inspect PDF metadata only
  pdf2docx --inspect-only report.pdf

ENVIRONMENT VARIABLES:
  PDFIUM_LIB_PATH   Path to libpdfium (otherwise the system library is used)
  RUST_LOG          Log filter, e.g. RUST_LOG=edgequake_pdf2docx=debug
"#;

/// Convert the text of a PDF into a paragraph-split DOCX file.
#[derive(Parser, Debug)]
#[command(
    name = "pdf2docx",
    version,
    about = "Convert the text of a PDF into a paragraph-split DOCX file",
    color = clap::ColorChoice::Auto,
    after_long_help = AFTER_HELP
)]
struct Cli {
    /// PDF file to convert. Prompted for when omitted.
    input: Option<String>,

    /// Output DOCX path. Prompted for when omitted.
    output: Option<PathBuf>,

    /// Page selection: all, 5, 3-15, or 1,3,5,7.
    #[arg(long, env = "PDF2DOCX_PAGES", default_value = "all")]
    pages: String,

    /// Text between pages: none, space, newline, or a custom string.
    #[arg(long, env = "PDF2DOCX_SEPARATOR", default_value = "none")]
    separator: String,

    /// Show a progress bar instead of printing each page's text.
    #[arg(long, env = "PDF2DOCX_NO_ECHO")]
    no_echo: bool,

    /// Print conversion statistics as JSON on stdout.
    #[arg(long, env = "PDF2DOCX_JSON")]
    json: bool,

    /// Print PDF metadata only, no conversion.
    #[arg(long)]
    inspect_only: bool,

    /// Path to the pdfium shared library.
    #[arg(long, env = "PDFIUM_LIB_PATH")]
    pdfium_lib: Option<PathBuf>,

    /// Enable DEBUG-level tracing logs.
    #[arg(short, long, env = "PDF2DOCX_VERBOSE")]
    verbose: bool,

    /// Suppress all output except errors.
    #[arg(short, long, env = "PDF2DOCX_QUIET")]
    quiet: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // ── Logging setup ────────────────────────────────────────────────────
    let filter = if cli.verbose {
        "debug"
    } else if cli.quiet {
        "error"
    } else {
        "warn"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(io::stderr)
        .init();

    let stdin = io::stdin();
    let mut stdin = stdin.lock();
    // stdout carries the JSON document in --json mode.
    let mut prompt_out: Box<dyn Write> = if cli.json {
        Box::new(io::stderr())
    } else {
        Box::new(io::stdout())
    };

    // ── Collect paths ────────────────────────────────────────────────────
    let input = match cli.input.clone() {
        Some(input) => input,
        None => clean_pdf_path(&prompt(&mut stdin, &mut prompt_out, PDF_PROMPT)?),
    };

    // ── Inspect-only mode ────────────────────────────────────────────────
    if cli.inspect_only {
        let config = base_config(&cli, None)?;
        let meta = inspect(&input, &config).context("Failed to inspect PDF")?;

        if cli.json {
            println!(
                "{}",
                serde_json::to_string_pretty(&meta).context("Failed to serialize metadata")?
            );
        } else {
            println!("File:         {}", input);
            if let Some(ref t) = meta.title {
                println!("Title:        {}", t);
            }
            if let Some(ref a) = meta.author {
                println!("Author:       {}", a);
            }
            if let Some(ref s) = meta.subject {
                println!("Subject:      {}", s);
            }
            println!("Pages:        {}", meta.page_count);
            println!("PDF Version:  {}", meta.pdf_version);
            if let Some(ref p) = meta.producer {
                println!("Producer:     {}", p);
            }
            if let Some(ref c) = meta.creator {
                println!("Creator:      {}", c);
            }
        }
        return Ok(());
    }

    let output = match cli.output.clone() {
        Some(output) => output,
        None => PathBuf::from(clean_output_path(&prompt(
            &mut stdin,
            &mut prompt_out,
            OUTPUT_PROMPT,
        )?)),
    };

    // ── Build config ─────────────────────────────────────────────────────
    // Page text goes to stdout, so it is only echoed when stdout is not
    // reserved for JSON.
    let progress: Option<ProgressCallback> = if cli.quiet {
        None
    } else if cli.no_echo || cli.json {
        Some(BarProgressCallback::new() as ProgressCallback)
    } else {
        Some(Arc::new(EchoPagesCallback) as ProgressCallback)
    };
    let config = base_config(&cli, progress)?;

    // ── Run conversion ───────────────────────────────────────────────────
    let stats = convert_to_file(&input, &output, &config).context("Conversion failed")?;

    if cli.json {
        println!(
            "{}",
            serde_json::to_string_pretty(&stats).context("Failed to serialise stats")?
        );
    }

    if !cli.quiet {
        let message = saved_message(&output);
        if cli.json {
            eprintln!("{message}");
        } else {
            println!("{message}");
        }
        if cli.no_echo || cli.json {
            eprintln!(
                "{}  {} pages → {} paragraphs  {}",
                green("✔"),
                bold(&stats.extracted_pages.to_string()),
                bold(&stats.paragraphs.to_string()),
                dim(&format!("{}ms", stats.total_duration_ms)),
            );
        }
    }

    Ok(())
}

/// Map CLI flags to `ConversionConfig`.
fn base_config(cli: &Cli, progress: Option<ProgressCallback>) -> Result<ConversionConfig> {
    let pages: PageSelection = cli.pages.parse().context("Invalid --pages value")?;
    let separator: PageSeparator = cli
        .separator
        .parse()
        .unwrap_or(PageSeparator::None);

    let mut builder = ConversionConfig::builder()
        .pages(pages)
        .page_separator(separator);

    if let Some(ref lib) = cli.pdfium_lib {
        builder = builder.pdfium_library_path(lib);
    }
    if let Some(cb) = progress {
        builder = builder.progress_callback(cb);
    }

    builder.build().context("Invalid configuration")
}

/// Show `message` on `out` and read one line from `input`.
fn prompt(input: &mut impl BufRead, out: &mut dyn Write, message: &str) -> Result<String> {
    write!(out, "{message}").context("Failed to write prompt")?;
    out.flush().context("Failed to flush prompt")?;

    let mut line = String::new();
    let read = input
        .read_line(&mut line)
        .context("Failed to read from stdin")?;
    if read == 0 {
        bail!("No input received (stdin closed)");
    }
    Ok(line)
}
