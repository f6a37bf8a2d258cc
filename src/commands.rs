use crate::cli::{Command, InputArgs, ListArgs, ToHtmlArgs, ToJsonArgs};
use crate::error::{ErrorKind, Result};
use exn::{OptionExt, ResultExt};
use klipbook_config::Config;
use klipbook_extract::Extractor;
use klipbook_library::Library;
use klipbook_render::{HtmlPrinter, JsonPrinter};
use klipbook_storage::backend::{LocalBackend, ReadOnlyBackend};
use klipbook_storage::BackendHandle;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use time::macros::format_description;
use tracing::instrument;

pub fn run(command: &Command, config: &Config, out: &mut impl Write) -> Result<()> {
    match command {
        Command::ToJson(args) => to_json(args, config),
        Command::ToHtml(args) => to_html(args, config, out),
        Command::List(args) => list(args, config, out),
    }
}

/// Reads and parses the whole export before anything is written, so a
/// malformed export never leaves partial output behind.
#[instrument(skip_all, fields(input = %args.input.display()))]
fn load_library(args: &InputArgs, config: &Config) -> Result<Library> {
    let bytes = std::fs::read(&args.input).or_raise(|| ErrorKind::Input(args.input.clone()))?;
    let text = String::from_utf8_lossy(&bytes);
    let extraction = Extractor::new(&text)
        .with_policy(args.policy(config))
        .extract()
        .or_raise(|| ErrorKind::Parse(args.input.clone()))?;
    if extraction.skipped > 0 {
        tracing::warn!(skipped = extraction.skipped, "Skipped malformed records");
    }
    let library = Library::new(extraction.entries, args.books(config));
    tracing::info!(books = library.len(), "Library built");
    Ok(library)
}

fn absolute(path: &Path) -> Result<PathBuf> {
    std::path::absolute(path).or_raise(|| ErrorKind::Output(path.to_path_buf()))
}

fn to_json(args: &ToJsonArgs, config: &Config) -> Result<()> {
    let library = load_library(&args.input, config)?;
    let output = absolute(&args.output)?;
    let invalid = || ErrorKind::Output(output.clone());
    let dir = output.parent().ok_or_raise(invalid)?;
    let name = output.file_name().ok_or_raise(invalid)?;
    let backend = LocalBackend::new(dir).or_raise(invalid)?;
    JsonPrinter::new()
        .print(library.books(), &backend, name, args.force || config.force)
        .or_raise(|| ErrorKind::Render)?;
    Ok(())
}

fn to_html(args: &ToHtmlArgs, config: &Config, out: &mut impl Write) -> Result<()> {
    let library = load_library(&args.input, config)?;
    let printer = match &config.filename {
        Some(template) => HtmlPrinter::with_filename_template(template),
        None => HtmlPrinter::new(),
    }
    .or_raise(|| ErrorKind::Render)?;
    let output = absolute(&args.output)?;
    writeln!(out, "Using output directory: {}", output.display()).or_raise(|| ErrorKind::Terminal)?;
    let invalid = || ErrorKind::Output(output.clone());
    let backend: BackendHandle = if args.dry_run {
        let local = LocalBackend::open(&output).or_raise(invalid)?;
        Arc::new(ReadOnlyBackend::new(Arc::new(local)))
    } else {
        Arc::new(LocalBackend::new(&output).or_raise(invalid)?)
    };
    let written = printer
        .print(library.books(), backend.as_ref(), args.force || config.force)
        .or_raise(|| ErrorKind::Render)?;
    tracing::info!(pages = written.len(), dry_run = args.dry_run, "HTML export finished");
    Ok(())
}

fn list(args: &ListArgs, config: &Config, out: &mut impl Write) -> Result<()> {
    let library = load_library(&args.input, config)?;
    let format = format_description!("[year]-[month]-[day] [hour]:[minute]");
    for (position, book) in library.iter().enumerate() {
        let updated = book.last_update().format(format).or_raise(|| ErrorKind::Render)?;
        let author = match book.author() {
            "" => String::new(),
            author => format!(" by {author}"),
        };
        writeln!(
            out,
            "{:>3}. {}{author} ({} clipping{}, last updated {updated})",
            position + 1,
            book.title(),
            book.clippings().len(),
            if book.clippings().len() == 1 { "" } else { "s" },
        )
        .or_raise(|| ErrorKind::Terminal)?;
    }
    Ok(())
}
