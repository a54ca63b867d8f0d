use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use source_tasks::loader::{LoadOptions, SheetSelection, SourceFormat, TracingObserver};
use source_tasks::{Outcome, Session, TaskError};

const EXIT_WORDS: &[&str] = &["exit", "quit"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FormatArg {
    Csv,
    Json,
    Parquet,
    Excel,
    Pdf,
    Text,
}

impl From<FormatArg> for SourceFormat {
    fn from(f: FormatArg) -> Self {
        match f {
            FormatArg::Csv => SourceFormat::Csv,
            FormatArg::Json => SourceFormat::Json,
            FormatArg::Parquet => SourceFormat::Parquet,
            FormatArg::Excel => SourceFormat::Excel,
            FormatArg::Pdf => SourceFormat::Pdf,
            FormatArg::Text => SourceFormat::PlainText,
        }
    }
}

#[derive(Debug, Parser, Clone)]
#[command(
    name = "source-tasks",
    version,
    about = "Load a table or document, then run free-text tasks against it"
)]
pub struct Cli {
    /// File to load (csv, json, parquet, xlsx, pdf, txt). Prompts for one when omitted
    pub path: Option<PathBuf>,

    /// Force the source format instead of inferring it from the extension
    #[arg(long, value_enum)]
    pub format: Option<FormatArg>,

    /// Workbook sheet to load; repeat to concatenate several sheets
    #[arg(long = "sheet")]
    pub sheets: Vec<String>,

    /// Load every sheet of a workbook
    #[arg(long, conflicts_with = "sheets")]
    pub all_sheets: bool,

    /// Run these tasks in order and exit instead of prompting
    #[arg(long = "task")]
    pub tasks: Vec<String>,

    /// Print each outcome as one JSON object per line
    #[arg(long)]
    pub json: bool,

    /// Log filter directive (e.g. `debug`, `source_tasks=trace`)
    #[arg(long, env = "SOURCE_TASKS_LOG", default_value = "warn")]
    pub log_level: String,
}

impl Cli {
    fn load_options(&self) -> LoadOptions {
        let sheets = match (self.all_sheets, self.sheets.as_slice()) {
            (true, _) => SheetSelection::AllSheets,
            (false, []) => SheetSelection::First,
            (false, [one]) => SheetSelection::Sheet(one.clone()),
            (false, many) => SheetSelection::Sheets(many.to_vec()),
        };
        LoadOptions {
            format: self.format.map(SourceFormat::from),
            sheets,
            observer: Some(Arc::new(TracingObserver)),
            ..Default::default()
        }
    }
}

pub fn run(args: Cli) -> Result<()> {
    let options = args.load_options();
    let stdin = io::stdin();
    let mut input = stdin.lock();
    let stdout = io::stdout();
    let mut out = stdout.lock();

    let session = match &args.path {
        Some(path) => Session::open(path, &options)
            .with_context(|| format!("failed to load {}", path.display()))?,
        None => match prompt_for_session(&mut input, &mut out, &options)? {
            Some(session) => session,
            None => return Ok(()),
        },
    };

    if !args.json {
        writeln!(out, "{}", session.source().summary())?;
    }

    if !args.tasks.is_empty() {
        for task in &args.tasks {
            report(&mut out, session.dispatch(task), args.json)?;
        }
        return Ok(());
    }

    task_loop(&session, &mut input, &mut out, args.json)?;
    Ok(())
}

/// Ask for a path until one loads. `None` when the user exits or input ends.
fn prompt_for_session<R: BufRead, W: Write>(
    input: &mut R,
    out: &mut W,
    options: &LoadOptions,
) -> io::Result<Option<Session>> {
    loop {
        let Some(line) = prompt(input, out, "Enter file path (CSV or PDF) or 'exit': ")? else {
            return Ok(None);
        };
        if line.eq_ignore_ascii_case("exit") {
            writeln!(out, "Goodbye!")?;
            return Ok(None);
        }
        match Session::open(&line, options) {
            Ok(session) => return Ok(Some(session)),
            Err(e) => writeln!(out, "{e}. Try again.")?,
        }
    }
}

/// Dispatch instructions read from `input` until an exit word or end of input.
fn task_loop<R: BufRead, W: Write>(
    session: &Session,
    input: &mut R,
    out: &mut W,
    json: bool,
) -> io::Result<()> {
    while let Some(task) = prompt(input, out, "\nEnter task (or type 'exit' to quit): ")? {
        if EXIT_WORDS.iter().any(|w| task.eq_ignore_ascii_case(w)) {
            writeln!(out, "Exiting tasks. Goodbye!")?;
            break;
        }
        report(out, session.dispatch(&task), json)?;
    }
    Ok(())
}

fn prompt<R: BufRead, W: Write>(input: &mut R, out: &mut W, message: &str) -> io::Result<Option<String>> {
    write!(out, "{message}")?;
    out.flush()?;
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

fn report<W: Write>(out: &mut W, result: Result<Outcome, TaskError>, json: bool) -> io::Result<()> {
    match (result, json) {
        (Ok(outcome), false) => writeln!(out, "\n{outcome}"),
        (Ok(outcome), true) => {
            let line = serde_json::to_string(&outcome).map_err(io::Error::other)?;
            writeln!(out, "{line}")
        }
        (Err(e), false) => writeln!(out, "\nError: {e}"),
        (Err(e), true) => writeln!(
            out,
            "{}",
            serde_json::json!({ "kind": "error", "message": e.to_string() })
        ),
    }
}
