//! Integration tests for batch conversion.

use std::fs;
use std::path::Path;

use slimhelp::convert::{convert_job, discover_jobs, run_batch, BatchJob, ConvertOptions};
use slimhelp::{ClassPreset, DocKind, Error, JsonFormat};

const TYPES_PAGE: &str = r#"<html><body>
<p class="p1">ITEM: 1. type integer</p>
<p class="p2">Whole numbers.</p>
<p class="p1">ITEM: 2. type float</p>
<p class="p2">Real numbers.</p>
</body></html>"#;

const SLIM_CLASSES_PAGE: &str = r#"<html><body>
<p class="p1">Class Mutation</p>
<p class="p2">Mutation methods</p>
<p class="p5">– (void)setValue(numeric value)</p>
<p class="p4">Sets the value.</p>
</body></html>"#;

const CALLBACKS_PAGE: &str = r#"<html><body>
<p class="p1">ITEM: 1. initialize() callbacks</p>
<p class="p3">Called at startup.</p>
</body></html>"#;

fn write_pages(dir: &Path) {
    fs::write(dir.join("EidosHelpTypes.html"), TYPES_PAGE).unwrap();
    fs::write(dir.join("SLiMHelpClasses.html"), SLIM_CLASSES_PAGE).unwrap();
    fs::write(dir.join("SLiMHelpCallbacks.html"), CALLBACKS_PAGE).unwrap();
    fs::write(dir.join("README.txt"), "not a help page").unwrap();
    fs::write(dir.join("index.html"), "<p>not a help page</p>").unwrap();
}

#[test]
fn test_discover_jobs() {
    let input = tempfile::tempdir().unwrap();
    write_pages(input.path());

    let jobs = discover_jobs(input.path(), "out").unwrap();
    assert_eq!(jobs.len(), 3);

    let names: Vec<_> = jobs
        .iter()
        .map(|job| job.output.file_name().unwrap().to_string_lossy().to_string())
        .collect();
    assert_eq!(
        names,
        vec!["eidos_types.json", "slim_callbacks.json", "slim_classes.json"]
    );

    let classes = jobs.iter().find(|j| j.kind == DocKind::Classes).unwrap();
    assert_eq!(classes.preset, ClassPreset::Slim);
}

#[test]
fn test_run_batch_parallel_and_sequential_agree() {
    let input = tempfile::tempdir().unwrap();
    write_pages(input.path());

    let parallel_out = tempfile::tempdir().unwrap();
    let sequential_out = tempfile::tempdir().unwrap();

    let jobs = discover_jobs(input.path(), parallel_out.path()).unwrap();
    let results = run_batch(&jobs, &ConvertOptions::default());
    assert!(results.iter().all(|r| r.is_ok()));

    let jobs = discover_jobs(input.path(), sequential_out.path()).unwrap();
    let results = run_batch(&jobs, &ConvertOptions::new().sequential());
    assert!(results.iter().all(|r| r.is_ok()));

    for name in ["eidos_types.json", "slim_callbacks.json", "slim_classes.json"] {
        let a = fs::read_to_string(parallel_out.path().join(name)).unwrap();
        let b = fs::read_to_string(sequential_out.path().join(name)).unwrap();
        assert_eq!(a, b, "{name}");
    }
}

#[test]
fn test_batch_output_content() {
    let input = tempfile::tempdir().unwrap();
    let output = tempfile::tempdir().unwrap();
    write_pages(input.path());

    let jobs = discover_jobs(input.path(), output.path()).unwrap();
    let results = run_batch(&jobs, &ConvertOptions::new().with_format(JsonFormat::Compact));

    let types = results
        .iter()
        .filter_map(|r| r.as_ref().ok())
        .find(|r| r.job.kind == DocKind::Types)
        .unwrap();
    assert_eq!(types.entry_count, 2);

    let json = fs::read_to_string(output.path().join("eidos_types.json")).unwrap();
    assert_eq!(types.bytes_written, json.len());
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["integer"]["description"], "Whole numbers.");

    // The SLiM preset makes p5 a method declaration.
    let json = fs::read_to_string(output.path().join("slim_classes.json")).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(
        value["Mutation"]["methods"]["setValue"]["description"],
        "Sets the value."
    );
}

#[test]
fn test_missing_input_fails_only_its_job() {
    let input = tempfile::tempdir().unwrap();
    let output = tempfile::tempdir().unwrap();
    fs::write(input.path().join("EidosHelpTypes.html"), TYPES_PAGE).unwrap();

    let jobs = vec![
        BatchJob::new(
            input.path().join("EidosHelpOperators.html"),
            output.path().join("eidos_operators.json"),
            DocKind::Operators,
            ClassPreset::Eidos,
        ),
        BatchJob::detect(input.path().join("EidosHelpTypes.html"), output.path()).unwrap(),
    ];

    let results = run_batch(&jobs, &ConvertOptions::default());
    assert!(matches!(results[0], Err(Error::Io(_))));
    assert!(results[1].is_ok());
    assert!(!output.path().join("eidos_operators.json").exists());
    assert!(output.path().join("eidos_types.json").exists());
}

#[test]
fn test_convert_job_creates_output_dir() {
    let input = tempfile::tempdir().unwrap();
    let output = tempfile::tempdir().unwrap();
    let page = input.path().join("EidosHelpTypes.html");
    fs::write(&page, TYPES_PAGE).unwrap();

    let job = BatchJob::detect(&page, output.path().join("nested").join("docs")).unwrap();
    let result = convert_job(&job, &ConvertOptions::default()).unwrap();

    assert!(job.output.exists());
    assert!(result.report.is_clean());
}
