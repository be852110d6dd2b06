//! File-to-file conversion driven through the engine's correction protocol.

use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};
use prepaid_engine::{ConversionEngine, RunHandle, RunStatus, SubmitOutcome};
use prepaid_ingest::{
    SourceEncoding, read_input_file, read_names_file, write_output_file, write_pending_file,
};
use prepaid_model::{
    ColumnLayout, ConversionOptions, CorrectionKey, PendingCorrection, ValidationWarning,
};
use tracing::{info, info_span, trace, warn};

use crate::logging::redact_value;

/// Everything a conversion needs besides the interactive prompt.
#[derive(Debug, Clone)]
pub struct ConvertPlan {
    pub input: PathBuf,
    pub output: PathBuf,
    /// Where the names template goes when names are still missing.
    pub pending_out: PathBuf,
    /// Previously filled names template, applied before prompting.
    pub names: Option<PathBuf>,
    pub encoding: SourceEncoding,
    pub options: ConversionOptions,
}

impl ConvertPlan {
    /// Plan with the default output and template paths next to `input`.
    pub fn new(input: impl Into<PathBuf>, options: ConversionOptions) -> Self {
        let input = input.into();
        Self {
            output: default_output_path(&input),
            pending_out: default_pending_path(&input),
            input,
            names: None,
            encoding: SourceEncoding::default(),
            options,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConvertOutcome {
    /// The converted table was written.
    Written { output: PathBuf, orders: usize },
    /// Names are still missing; a template listing them was written.
    NeedsNames {
        template: PathBuf,
        pending: Vec<PendingCorrection>,
    },
}

#[derive(Debug, Clone)]
pub struct ConvertReport {
    pub rows: usize,
    pub columns: usize,
    pub warnings: Vec<ValidationWarning>,
    pub outcome: ConvertOutcome,
}

#[derive(Debug, Clone)]
pub struct InspectReport {
    pub rows: usize,
    pub columns: usize,
    pub status: RunStatus,
    pub warnings: Vec<ValidationWarning>,
    pub pending: Vec<PendingCorrection>,
}

/// `<stem>_prepaid.csv` next to the input.
pub fn default_output_path(input: &Path) -> PathBuf {
    sibling_with_suffix(input, "_prepaid.csv")
}

/// `<stem>_names.csv` next to the input.
pub fn default_pending_path(input: &Path) -> PathBuf {
    sibling_with_suffix(input, "_names.csv")
}

fn sibling_with_suffix(input: &Path, suffix: &str) -> PathBuf {
    let stem = input
        .file_stem()
        .map_or_else(|| "orders".into(), |stem| stem.to_string_lossy());
    input.with_file_name(format!("{stem}{suffix}"))
}

/// Reads a column layout from JSON. Missing keys keep their defaults.
pub fn load_layout(path: &Path) -> Result<ColumnLayout> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("read layout {}", path.display()))?;
    let layout: ColumnLayout = serde_json::from_str(&text)
        .with_context(|| format!("parse layout {}", path.display()))?;
    info!(path = %path.display(), "loaded column layout");
    Ok(layout)
}

/// Asks for each missing name in turn. A blank answer leaves the name
/// missing and end of input stops early.
pub fn prompt_names<R, W>(
    pending: &[PendingCorrection],
    mut input: R,
    mut output: W,
) -> io::Result<Vec<(CorrectionKey, String)>>
where
    R: BufRead,
    W: Write,
{
    let mut names = Vec::new();
    for correction in pending.iter().filter(|c| c.name.is_empty()) {
        write!(
            output,
            "{} [line {}, {}]\nproduct name: ",
            correction.key, correction.line, correction.address
        )?;
        output.flush()?;
        let mut answer = String::new();
        if input.read_line(&mut answer)? == 0 {
            break;
        }
        let answer = answer.trim();
        if !answer.is_empty() {
            trace!(key = %correction.key, name = redact_value(answer), "name entered");
            names.push((correction.key.clone(), answer.to_string()));
        }
    }
    Ok(names)
}

fn ingest_file(
    engine: &mut ConversionEngine,
    input: &Path,
    encoding: SourceEncoding,
) -> Result<RunHandle> {
    let rows = read_input_file(input, encoding)?;
    engine
        .ingest(rows)
        .with_context(|| format!("ingest {}", input.display()))
}

/// Converts one export. `prompt` is asked for missing names until it
/// returns nothing or every name is known.
pub fn convert<P>(plan: &ConvertPlan, mut prompt: P) -> Result<ConvertReport>
where
    P: FnMut(&[PendingCorrection]) -> io::Result<Vec<(CorrectionKey, String)>>,
{
    let span = info_span!("convert", input = %plan.input.display());
    let _guard = span.enter();

    let mut engine = ConversionEngine::new(plan.options.clone());
    let run = ingest_file(&mut engine, &plan.input, plan.encoding)?;
    let (rows, columns) = engine.shape(run)?;
    let warnings = engine.warnings(run)?.to_vec();

    if let RunStatus::Failed(error) = engine.status(run)? {
        engine.reset(run);
        return Err(anyhow!(error)).with_context(|| format!("convert {}", plan.input.display()));
    }

    let mut ready = matches!(engine.status(run)?, RunStatus::Ready { .. });
    if !ready && let Some(path) = &plan.names {
        let names = read_names_file(path, plan.encoding)?;
        ready = submit(&mut engine, run, names)?;
    }
    while !ready {
        let pending = engine.pending_corrections(run)?;
        let names = prompt(&pending).context("read product names")?;
        if names.is_empty() {
            break;
        }
        ready = submit(&mut engine, run, names)?;
    }

    if !ready {
        let pending = engine.pending_corrections(run)?;
        write_pending_file(&plan.pending_out, &pending, plan.encoding)?;
        engine.reset(run);
        warn!(
            missing = pending.iter().filter(|c| c.name.is_empty()).count(),
            template = %plan.pending_out.display(),
            "product names required"
        );
        return Ok(ConvertReport {
            rows,
            columns,
            warnings,
            outcome: ConvertOutcome::NeedsNames {
                template: plan.pending_out.clone(),
                pending,
            },
        });
    }

    let table = engine.finalize(run)?;
    write_output_file(&plan.output, &table, plan.encoding)?;
    Ok(ConvertReport {
        rows,
        columns,
        warnings,
        outcome: ConvertOutcome::Written {
            output: plan.output.clone(),
            orders: table.orders().len(),
        },
    })
}

fn submit(
    engine: &mut ConversionEngine,
    run: RunHandle,
    names: Vec<(CorrectionKey, String)>,
) -> Result<bool> {
    match engine.submit_corrections(run, names)? {
        SubmitOutcome::Ready => Ok(true),
        SubmitOutcome::Collecting { unresolved } => {
            info!(unresolved = unresolved.len(), "product names still missing");
            Ok(false)
        }
    }
}

/// Reports what a conversion would do without writing anything.
pub fn inspect(
    input: &Path,
    encoding: SourceEncoding,
    options: ConversionOptions,
) -> Result<InspectReport> {
    let span = info_span!("inspect", input = %input.display());
    let _guard = span.enter();

    let mut engine = ConversionEngine::new(options);
    let run = ingest_file(&mut engine, input, encoding)?;
    let (rows, columns) = engine.shape(run)?;
    let status = engine.status(run)?;
    let pending = match status {
        RunStatus::Collecting { .. } => engine.pending_corrections(run)?,
        _ => Vec::new(),
    };
    let report = InspectReport {
        rows,
        columns,
        warnings: engine.warnings(run)?.to_vec(),
        status,
        pending,
    };
    engine.reset(run);
    Ok(report)
}
