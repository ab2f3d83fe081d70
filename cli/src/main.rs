//! slimhelp CLI - Eidos/SLiM help page extraction tool

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use slimhelp::convert::{discover_jobs, run_batch_with_progress, ConvertOptions};
use slimhelp::{
    detect_kind_from_path, detect_page_from_path, ClassPreset, Diagnostic, DocKind, Extraction,
    Extractor, ExtractionReport, HtmlSource, JsonFormat, StyleTables,
};

#[derive(Parser)]
#[command(name = "slimhelp")]
#[command(version)]
#[command(about = "Extract Eidos/SLiM help pages to JSON", long_about = None)]
struct Cli {
    /// Input help page (kind detected from the file name)
    #[arg(value_name = "FILE")]
    input: Option<PathBuf>,

    /// Output JSON file
    #[arg(value_name = "OUTPUT")]
    output: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract one help page to JSON
    Extract {
        /// Input HTML file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Document kind (detected from the file name if omitted)
        #[arg(short, long, value_enum)]
        kind: Option<KindArg>,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Class page convention
        #[arg(long, value_enum)]
        preset: Option<PresetArg>,

        /// JSON file overriding the style tables
        #[arg(long, value_name = "FILE", env = "SLIMHELP_STYLES")]
        styles: Option<PathBuf>,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,

        /// Print the extraction report to stderr
        #[arg(long)]
        report: bool,
    },

    /// Extract every recognized help page in a directory
    Batch {
        /// Directory holding the HTML exports
        #[arg(value_name = "DIR")]
        input: PathBuf,

        /// Output directory
        #[arg(short, long, value_name = "DIR")]
        output: Option<PathBuf>,

        /// Convert one page at a time
        #[arg(long)]
        sequential: bool,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,
    },

    /// Print the paragraph stream with style tags
    Paragraphs {
        /// Input HTML file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Only show paragraphs with this style
        #[arg(short, long)]
        style: Option<String>,

        /// One JSON object per line
        #[arg(long)]
        json: bool,
    },

    /// Print the default style tables
    Styles {
        /// Only this kind's table
        #[arg(short, long, value_enum)]
        kind: Option<KindArg>,

        /// Class page convention
        #[arg(long, value_enum)]
        preset: Option<PresetArg>,
    },

    /// Show version information
    Version,
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum KindArg {
    Classes,
    Functions,
    Operators,
    Types,
    Callbacks,
}

impl From<KindArg> for DocKind {
    fn from(kind: KindArg) -> Self {
        match kind {
            KindArg::Classes => DocKind::Classes,
            KindArg::Functions => DocKind::Functions,
            KindArg::Operators => DocKind::Operators,
            KindArg::Types => DocKind::Types,
            KindArg::Callbacks => DocKind::Callbacks,
        }
    }
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum PresetArg {
    /// Eidos class pages (p5 is example code)
    Eidos,
    /// SLiM class pages (p5 is a declaration)
    Slim,
}

impl From<PresetArg> for ClassPreset {
    fn from(preset: PresetArg) -> Self {
        match preset {
            PresetArg::Eidos => ClassPreset::Eidos,
            PresetArg::Slim => ClassPreset::Slim,
        }
    }
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Some(Commands::Extract {
            input,
            kind,
            output,
            preset,
            styles,
            compact,
            report,
        }) => cmd_extract(
            &input,
            kind,
            output.as_deref(),
            preset,
            styles.as_deref(),
            compact,
            report,
        ),
        Some(Commands::Batch {
            input,
            output,
            sequential,
            compact,
        }) => cmd_batch(&input, output.as_deref(), sequential, compact),
        Some(Commands::Paragraphs { input, style, json }) => {
            cmd_paragraphs(&input, style.as_deref(), json)
        }
        Some(Commands::Styles { kind, preset }) => cmd_styles(kind, preset),
        Some(Commands::Version) => {
            cmd_version();
            Ok(())
        }
        None => {
            // Default behavior: extract if input is provided
            if let Some(input) = cli.input {
                cmd_convert(&input, cli.output.as_deref())
            } else {
                println!("{}", "Usage: slimhelp <FILE> [OUTPUT]".yellow());
                println!("       slimhelp --help for more information");
                Ok(())
            }
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn json_format(compact: bool) -> JsonFormat {
    if compact {
        JsonFormat::Compact
    } else {
        JsonFormat::Pretty
    }
}

fn cmd_convert(input: &Path, output: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    let page = detect_page_from_path(input)?;
    let output = output
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from(page.output_file_name()));

    let extraction = Extractor::new(page.kind)
        .with_preset(page.preset())
        .parse(input)?;
    write_output(&extraction.to_json(JsonFormat::Pretty)?, Some(&output))?;
    print_summary(&extraction.report);

    Ok(())
}

fn cmd_extract(
    input: &Path,
    kind: Option<KindArg>,
    output: Option<&Path>,
    preset: Option<PresetArg>,
    styles: Option<&Path>,
    compact: bool,
    report: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let extractor = build_extractor(input, kind, preset, styles)?;
    let extraction = extractor.parse(input)?;
    write_output(&extraction.to_json(json_format(compact))?, output)?;

    if report {
        print_report(&extraction);
    }

    Ok(())
}

/// Resolve kind, class preset and style overrides for one input page. The
/// preset (given, else detected) fills the class table unless the override
/// file defines one.
fn build_extractor(
    input: &Path,
    kind: Option<KindArg>,
    preset: Option<PresetArg>,
    styles: Option<&Path>,
) -> Result<Extractor, Box<dyn std::error::Error>> {
    let extractor = match kind {
        Some(kind) => Extractor::new(kind.into()),
        None => Extractor::for_path(input)?,
    };
    let preset = preset
        .map(ClassPreset::from)
        .or_else(|| detect_kind_from_path(input).ok().map(|(_, preset)| preset))
        .unwrap_or_default();

    Ok(match styles {
        Some(path) => {
            extractor.with_styles(StyleTables::from_json_file_with_preset(path, preset)?)
        }
        None => extractor.with_preset(preset),
    })
}

fn cmd_batch(
    input: &Path,
    output: Option<&Path>,
    sequential: bool,
    compact: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let output_dir = output
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("."));
    let jobs = discover_jobs(input, &output_dir)?;

    if jobs.is_empty() {
        println!("{} {}", "No help pages found in".yellow(), input.display());
        return Ok(());
    }

    let mut options = ConvertOptions::new().with_format(json_format(compact));
    if sequential {
        options = options.sequential();
    }

    let pb = ProgressBar::new(jobs.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap()
            .progress_chars("#>-"),
    );

    let results = run_batch_with_progress(&jobs, &options, |job, _| {
        pb.set_message(job.kind.to_string());
        pb.inc(1);
    });
    pb.finish_with_message("Done!");

    println!("\n{}", "Output files:".green().bold());
    let mut failed = 0;
    for (job, result) in jobs.iter().zip(&results) {
        match result {
            Ok(converted) => println!(
                "  {} {} ({} entries, {} diagnostics)",
                "├─".dimmed(),
                job.output.display(),
                converted.entry_count,
                converted.report.diagnostics.len()
            ),
            Err(e) => {
                failed += 1;
                println!(
                    "  {} {} {}",
                    "├─".dimmed(),
                    job.input.display(),
                    e.to_string().red()
                );
            }
        }
    }

    if failed > 0 {
        return Err(format!("{} of {} pages failed", failed, jobs.len()).into());
    }

    Ok(())
}

fn cmd_paragraphs(
    input: &Path,
    style: Option<&str>,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let html = fs::read_to_string(input)?;
    let source = HtmlSource::parse(&html);

    for (index, paragraph) in source.paragraphs().enumerate() {
        if style.is_some_and(|s| s != paragraph.style) {
            continue;
        }
        if json {
            println!("{}", serde_json::to_string(&paragraph)?);
        } else {
            println!(
                "{:>5} {:<4} {}",
                index.to_string().dimmed(),
                paragraph.style.cyan(),
                paragraph.text.replace('\n', " ⏎ ")
            );
        }
    }

    Ok(())
}

fn cmd_styles(
    kind: Option<KindArg>,
    preset: Option<PresetArg>,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut tables = StyleTables::default();
    if let Some(preset) = preset {
        tables.classes = slimhelp::parser::ClassStyles::preset(preset.into());
    }
    println!("{}", tables.to_json(kind.map(Into::into))?);
    Ok(())
}

fn cmd_version() {
    println!("{} {}", "slimhelp".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("Eidos/SLiM help page extraction tool");
    println!();
    println!("License: MIT");
}

fn write_output(content: &str, output: Option<&Path>) -> std::io::Result<()> {
    match output {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                fs::create_dir_all(parent)?;
            }
            fs::write(path, content)?;
            println!("{} {}", "Saved to".green(), path.display());
        }
        None => println!("{}", content),
    }
    Ok(())
}

fn print_summary(report: &ExtractionReport) {
    eprintln!(
        "{} {} paragraphs, {} declarations, {} warnings, {} unmatched headings",
        report.kind.to_string().cyan().bold(),
        report.paragraph_count,
        report.declaration_count,
        report.warning_count(),
        report.unmatched_count()
    );
}

fn print_report(extraction: &Extraction) {
    let report = &extraction.report;
    eprintln!("{}", "Extraction Report".cyan().bold());
    eprintln!("{}", "─".repeat(40).dimmed());
    eprintln!("{}: {}", "Kind".bold(), report.kind);
    eprintln!("{}: {}", "Entries".bold(), extraction.document.len());
    eprintln!("{}: {}", "Paragraphs".bold(), report.paragraph_count);
    eprintln!("{}: {}", "Owners".bold(), report.owner_count);
    eprintln!("{}: {}", "Declarations".bold(), report.declaration_count);
    eprintln!("{}: {}", "Descriptions".bold(), report.description_count);
    eprintln!("{}: {}", "Skipped".bold(), report.skipped_count);

    if report.diagnostics.is_empty() {
        return;
    }

    eprintln!();
    eprintln!("{}", "Diagnostics".cyan().bold());
    eprintln!("{}", "─".repeat(40).dimmed());
    for diagnostic in &report.diagnostics {
        eprintln!("{}", format_diagnostic(diagnostic));
    }
}

fn format_diagnostic(diagnostic: &Diagnostic) -> String {
    if diagnostic.is_warning() {
        format!("{} {}", "warning:".yellow().bold(), diagnostic)
    } else {
        format!("{} {}", "note:".dimmed(), diagnostic)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use slimhelp::parser::ClassStyles;

    #[test]
    fn test_write_output_creates_parent_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("docs").join("eidos_types.json");
        write_output("{}", Some(&path)).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "{}");
    }

    #[test]
    fn test_kind_arg_conversion() {
        assert_eq!(DocKind::from(KindArg::Callbacks), DocKind::Callbacks);
        assert_eq!(ClassPreset::from(PresetArg::Slim), ClassPreset::Slim);
    }

    #[test]
    fn test_styles_override_keeps_detected_preset() {
        let dir = tempfile::tempdir().unwrap();
        let styles = dir.path().join("types_only.json");
        fs::write(
            &styles,
            r#"{"types": {"declaration": ["h2"], "description": ["*"]}}"#,
        )
        .unwrap();

        let extractor =
            build_extractor(Path::new("SLiMHelpClasses.html"), None, None, Some(&styles)).unwrap();
        assert_eq!(
            extractor.options().styles.classes,
            ClassStyles::preset(ClassPreset::Slim)
        );
        assert!(extractor.options().styles.types.declaration.contains("h2"));

        let extractor = build_extractor(
            Path::new("page.html"),
            Some(KindArg::Classes),
            Some(PresetArg::Slim),
            Some(&styles),
        )
        .unwrap();
        assert_eq!(
            extractor.options().styles.classes,
            ClassStyles::preset(ClassPreset::Slim)
        );
    }

    #[test]
    fn test_preset_without_styles_file() {
        let extractor = build_extractor(
            Path::new("EidosHelpClasses.html"),
            None,
            Some(PresetArg::Slim),
            None,
        )
        .unwrap();
        assert_eq!(
            extractor.options().styles.classes,
            ClassStyles::preset(ClassPreset::Slim)
        );
    }

    #[test]
    fn test_cli_parses_extract() {
        let cli = Cli::try_parse_from([
            "slimhelp",
            "extract",
            "EidosHelpTypes.html",
            "--kind",
            "types",
            "--compact",
        ])
        .unwrap();
        assert!(matches!(
            cli.command,
            Some(Commands::Extract {
                kind: Some(KindArg::Types),
                compact: true,
                ..
            })
        ));
    }
}
