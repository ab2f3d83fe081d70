//! Batch conversion of help pages to JSON files.
//!
//! Each [`BatchJob`] is independent: one input page, one kind, one output
//! file. Jobs share nothing, so they run in parallel on the rayon pool
//! unless [`ConvertOptions::parallel`] is off.
//!
//! # Example
//!
//! ```no_run
//! use slimhelp::convert::{discover_jobs, run_batch, ConvertOptions};
//!
//! fn main() -> slimhelp::Result<()> {
//!     let jobs = discover_jobs("reference_docs", "docs")?;
//!     for result in run_batch(&jobs, &ConvertOptions::default()) {
//!         let result = result?;
//!         println!("{} -> {}", result.job.input.display(), result.job.output.display());
//!     }
//!     Ok(())
//! }
//! ```

use crate::detect::{detect_page_from_path, is_help_page};
use crate::error::Result;
use crate::model::DocKind;
use crate::parser::{ClassPreset, ExtractionReport, ParseOptions};
use crate::render::{self, JsonFormat};
use rayon::prelude::*;
use std::path::{Path, PathBuf};

/// Options for batch conversion.
#[derive(Debug, Clone)]
pub struct ConvertOptions {
    /// Convert jobs concurrently
    pub parallel: bool,

    /// Output JSON format
    pub format: JsonFormat,

    /// Parse options shared by every job
    pub options: ParseOptions,

    /// Apply each job's class preset over `options`
    pub apply_presets: bool,
}

impl ConvertOptions {
    /// Create new conversion options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Convert one job at a time.
    pub fn sequential(mut self) -> Self {
        self.parallel = false;
        self
    }

    /// Set output format.
    pub fn with_format(mut self, format: JsonFormat) -> Self {
        self.format = format;
        self
    }

    /// Set parse options. Job presets are no longer applied, so the class
    /// table in `options` is used as given.
    pub fn with_parse_options(mut self, options: ParseOptions) -> Self {
        self.options = options;
        self.apply_presets = false;
        self
    }
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            parallel: true,
            format: JsonFormat::Pretty,
            options: ParseOptions::default(),
            apply_presets: true,
        }
    }
}

/// One page to convert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchJob {
    pub input: PathBuf,
    pub output: PathBuf,
    pub kind: DocKind,
    pub preset: ClassPreset,
}

impl BatchJob {
    /// Create a job with explicit kind and preset.
    pub fn new(
        input: impl Into<PathBuf>,
        output: impl Into<PathBuf>,
        kind: DocKind,
        preset: ClassPreset,
    ) -> Self {
        Self {
            input: input.into(),
            output: output.into(),
            kind,
            preset,
        }
    }

    /// Create a job for a recognized help page, writing its conventional
    /// output name (e.g. `eidos_classes.json`) into `output_dir`.
    pub fn detect<P: AsRef<Path>, Q: AsRef<Path>>(input: P, output_dir: Q) -> Result<Self> {
        let input = input.as_ref();
        let page = detect_page_from_path(input)?;
        Ok(Self::new(
            input,
            output_dir.as_ref().join(page.output_file_name()),
            page.kind,
            page.preset(),
        ))
    }

    fn parse_options(&self, options: &ConvertOptions) -> ParseOptions {
        if options.apply_presets {
            options.options.clone().with_class_preset(self.preset)
        } else {
            options.options.clone()
        }
    }
}

/// Result of converting one job.
#[derive(Debug, Clone)]
pub struct ConvertResult {
    /// The job that produced this result
    pub job: BatchJob,

    /// Statistics and diagnostics for the page
    pub report: ExtractionReport,

    /// Number of top-level entries written
    pub entry_count: usize,

    /// Size of the written file in bytes
    pub bytes_written: usize,
}

/// Find every recognized help page directly inside `dir`, sorted by path.
pub fn discover_jobs<P: AsRef<Path>, Q: AsRef<Path>>(
    dir: P,
    output_dir: Q,
) -> Result<Vec<BatchJob>> {
    let mut paths = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_file() && is_help_page(&path) {
            paths.push(path);
        }
    }
    paths.sort();

    paths
        .into_iter()
        .map(|path| BatchJob::detect(path, output_dir.as_ref()))
        .collect()
}

/// Convert one job and write its output file.
pub fn convert_job(job: &BatchJob, options: &ConvertOptions) -> Result<ConvertResult> {
    let extraction =
        crate::parse_file_with_options(&job.input, job.kind, &job.parse_options(options))?;
    let json = render::to_json(&extraction.document, options.format)?;

    if let Some(parent) = job.output.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    std::fs::write(&job.output, &json)?;

    log::info!(
        "Wrote {} {} entries to {}",
        extraction.document.len(),
        job.kind,
        job.output.display()
    );

    Ok(ConvertResult {
        job: job.clone(),
        entry_count: extraction.document.len(),
        report: extraction.report,
        bytes_written: json.len(),
    })
}

/// Convert every job. Results come back in job order; one failing job
/// does not stop the others.
pub fn run_batch(jobs: &[BatchJob], options: &ConvertOptions) -> Vec<Result<ConvertResult>> {
    run_batch_with_progress(jobs, options, |_, _| {})
}

/// Like [`run_batch`], calling `on_done` as each job finishes.
pub fn run_batch_with_progress<F>(
    jobs: &[BatchJob],
    options: &ConvertOptions,
    on_done: F,
) -> Vec<Result<ConvertResult>>
where
    F: Fn(&BatchJob, &Result<ConvertResult>) + Sync,
{
    let convert = |job: &BatchJob| {
        let result = convert_job(job, options);
        if let Err(e) = &result {
            log::warn!("Failed to convert {}: {}", job.input.display(), e);
        }
        on_done(job, &result);
        result
    };

    if options.parallel {
        jobs.par_iter().map(convert).collect()
    } else {
        jobs.iter().map(convert).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_convert_options_builder() {
        let options = ConvertOptions::new()
            .sequential()
            .with_format(JsonFormat::Compact);
        assert!(!options.parallel);
        assert_eq!(options.format, JsonFormat::Compact);
        assert!(options.apply_presets);

        let options = options.with_parse_options(ParseOptions::new().keep_empty());
        assert!(!options.apply_presets);
        assert!(!options.options.skip_empty);
    }

    #[test]
    fn test_job_detect() {
        let job = BatchJob::detect("in/SLiMHelpClasses.html", "out").unwrap();
        assert_eq!(job.kind, DocKind::Classes);
        assert_eq!(job.preset, ClassPreset::Slim);
        assert_eq!(job.output, Path::new("out").join("slim_classes.json"));
    }

    #[test]
    fn test_job_preset_applied() {
        let job = BatchJob::new("a.html", "a.json", DocKind::Classes, ClassPreset::Slim);
        let parse = job.parse_options(&ConvertOptions::default());
        assert_eq!(
            parse.styles.classes,
            crate::parser::ClassStyles::preset(ClassPreset::Slim)
        );
    }
}
