//! Conversion runs and the entry points that drive them.
//!
//! A run is created from the rows of one input file and kept in the engine
//! until it is finalized or reset. All validation happens at ingest; a fatal
//! finding is stored in the run and reported by the later entry points so no
//! partial output ever escapes.

use std::collections::HashMap;
use std::fmt;

use prepaid_model::{
    ConversionOptions, CorrectionKey, OutputRecord, OutputTable, PendingCorrection, RawLine,
    ValidationWarning,
};
use tracing::{debug, info, info_span, warn};

use crate::correction::CorrectionBook;
use crate::error::{ConversionError, EngineError, Result};
use crate::group::group_lines;
use crate::merge::merge_group;
use crate::shape::shape_output;
use crate::validate::{GroupStatus, validate_group};

/// Caller-held reference to a conversion run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RunHandle(u64);

impl RunHandle {
    pub fn id(self) -> u64 {
        self.0
    }
}

impl fmt::Display for RunHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Where a run stands in the correction protocol.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunStatus {
    /// Waiting for product names; `pending` counts the missing names.
    Collecting { pending: usize },
    /// Every order is resolved; `finalize` will succeed unless no orders exist.
    Ready { orders: usize },
    /// Validation failed; the run produces no output.
    Failed(ConversionError),
}

/// Result of supplying names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    Ready,
    Collecting { unresolved: Vec<CorrectionKey> },
}

#[derive(Debug)]
struct ConversionRun {
    lines: Vec<RawLine>,
    width: usize,
    records: Vec<OutputRecord>,
    corrections: CorrectionBook,
    warnings: Vec<ValidationWarning>,
    failure: Option<ConversionError>,
}

impl ConversionRun {
    fn check_failed(&self) -> Result<()> {
        match &self.failure {
            Some(error) => Err(error.clone().into()),
            None => Ok(()),
        }
    }

    fn status(&self) -> RunStatus {
        if let Some(error) = &self.failure {
            RunStatus::Failed(error.clone())
        } else if !self.corrections.is_empty() {
            RunStatus::Collecting {
                pending: self.corrections.len(),
            }
        } else {
            RunStatus::Ready {
                orders: self.records.len(),
            }
        }
    }
}

/// Holds conversion runs keyed by handle.
#[derive(Debug, Default)]
pub struct ConversionEngine {
    options: ConversionOptions,
    runs: HashMap<RunHandle, ConversionRun>,
    next_id: u64,
}

impl ConversionEngine {
    pub fn new(options: ConversionOptions) -> Self {
        Self {
            options,
            runs: HashMap::new(),
            next_id: 1,
        }
    }

    /// Active options, including the item-limit and empty-order policies.
    pub fn options(&self) -> &ConversionOptions {
        &self.options
    }

    /// Starts a run from the rows of one input file.
    ///
    /// Rejects empty, ragged or too-narrow input outright. Validation
    /// failures of individual orders are kept in the run and surface from
    /// [`ConversionEngine::finalize`].
    pub fn ingest<R, F, S>(&mut self, rows: R) -> Result<RunHandle>
    where
        R: IntoIterator<Item = F>,
        F: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let lines: Vec<RawLine> = rows
            .into_iter()
            .enumerate()
            .map(|(idx, fields)| RawLine::new(idx + 1, fields))
            .collect();
        let width = lines.first().map(RawLine::width).ok_or(EngineError::NoRows)?;
        if let Some(line) = lines.iter().find(|line| line.width() != width) {
            return Err(EngineError::RaggedInput {
                line: line.line(),
                expected: width,
                found: line.width(),
            });
        }
        self.options.layout.check_width(width)?;

        let handle = RunHandle(self.next_id.max(1));
        self.next_id = handle.0 + 1;

        let span = info_span!("ingest", run = %handle, lines = lines.len(), columns = width);
        let _guard = span.enter();

        let mut run = ConversionRun {
            lines,
            width,
            records: Vec::new(),
            corrections: CorrectionBook::new(),
            warnings: Vec::new(),
            failure: None,
        };
        if let Err(error) = self.evaluate(&mut run) {
            warn!(%error, "conversion run failed validation");
            run.records.clear();
            run.corrections = CorrectionBook::new();
            run.failure = Some(error);
        }
        info!(
            ready = run.records.len(),
            pending = run.corrections.len(),
            warnings = run.warnings.len(),
            "ingest complete"
        );
        self.runs.insert(handle, run);
        Ok(handle)
    }

    fn evaluate(&self, run: &mut ConversionRun) -> std::result::Result<(), ConversionError> {
        let layout = &self.options.layout;
        let groups = group_lines(&run.lines, layout);
        debug!(orders = groups.len(), "grouped lines by order");
        for group in &groups {
            let mut warnings = Vec::new();
            let validated = validate_group(group, &self.options, &mut warnings);
            for warning in &warnings {
                warn!(order_id = %warning.order_id(), "{}", warning.message());
            }
            run.warnings.append(&mut warnings);
            let validated = validated?;
            let record = merge_group(&validated, layout);
            match validated.status() {
                GroupStatus::Ready => run.records.push(record),
                GroupStatus::Pending => run.corrections.hold(&validated, record, layout),
            }
        }
        Ok(())
    }

    fn run(&self, handle: RunHandle) -> Result<&ConversionRun> {
        self.runs
            .get(&handle)
            .ok_or(EngineError::UnknownRun(handle.0))
    }

    fn run_mut(&mut self, handle: RunHandle) -> Result<&mut ConversionRun> {
        self.runs
            .get_mut(&handle)
            .ok_or(EngineError::UnknownRun(handle.0))
    }

    pub fn status(&self, handle: RunHandle) -> Result<RunStatus> {
        Ok(self.run(handle)?.status())
    }

    /// Non-fatal findings collected at ingest.
    pub fn warnings(&self, handle: RunHandle) -> Result<&[ValidationWarning]> {
        Ok(&self.run(handle)?.warnings)
    }

    /// Number of input lines and columns.
    pub fn shape(&self, handle: RunHandle) -> Result<(usize, usize)> {
        let run = self.run(handle)?;
        Ok((run.lines.len(), run.width))
    }

    /// Product names the caller still has to supply.
    pub fn pending_corrections(&self, handle: RunHandle) -> Result<Vec<PendingCorrection>> {
        let run = self.run(handle)?;
        run.check_failed()?;
        Ok(run.corrections.pending())
    }

    /// Supplies product names. The run becomes ready only once every
    /// outstanding request has a non-empty name.
    pub fn submit_corrections<I>(&mut self, handle: RunHandle, names: I) -> Result<SubmitOutcome>
    where
        I: IntoIterator<Item = (CorrectionKey, String)>,
    {
        let layout = self.options.layout.clone();
        let run = self.run_mut(handle)?;
        run.check_failed()?;
        run.corrections.supply(names)?;
        match run.corrections.resolve(&layout) {
            Some(records) => {
                info!(run = %handle, orders = records.len(), "corrections applied");
                run.records.extend(records);
                Ok(SubmitOutcome::Ready)
            }
            None => {
                let unresolved = run.corrections.unresolved();
                debug!(run = %handle, unresolved = unresolved.len(), "still collecting names");
                Ok(SubmitOutcome::Collecting { unresolved })
            }
        }
    }

    /// Produces the output table and discards the run.
    pub fn finalize(&mut self, handle: RunHandle) -> Result<OutputTable> {
        let run = self.run(handle)?;
        run.check_failed()?;
        if !run.corrections.is_empty() {
            return Err(EngineError::StillCollecting {
                unresolved: run.corrections.unresolved(),
            });
        }
        let run = self
            .runs
            .remove(&handle)
            .ok_or(EngineError::UnknownRun(handle.0))?;
        let table = shape_output(run.records, run.width)?;
        info!(run = %handle, rows = table.len(), "conversion finalized");
        Ok(table)
    }

    /// Discards a run. Returns whether it existed.
    pub fn reset(&mut self, handle: RunHandle) -> bool {
        let existed = self.runs.remove(&handle).is_some();
        if existed {
            debug!(run = %handle, "run reset");
        }
        existed
    }
}
