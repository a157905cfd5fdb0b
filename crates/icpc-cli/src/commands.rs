use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use chrono::Local;
use comfy_table::Table;
use icpc_cli::loader::{LoadOutcome, check_header, load_source};
use icpc_cli::sink::JsonLinesSink;
use icpc_derive::{DeriveOptions, PostProcessor};
use icpc_ingest::{SheetLayout, read_csv_sheet};
use icpc_map::{MemorySink, RecordSink};
use icpc_registry::FieldRegistry;
use tracing::{info, info_span};

use crate::cli::{FieldsArgs, LoadArgs, SheetArgs};
use crate::summary::{apply_table_style, header_cell};
use crate::types::{CheckResult, LoadResult};

const TIMESTAMP_FORMAT: &str = "%Y%m%d-%H%M";

pub fn run_fields(args: &FieldsArgs) -> Result<()> {
    let registry = load_registry(args.fields.as_deref())?;
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Key"),
        header_cell("Label"),
        header_cell("Validator"),
        header_cell("Required"),
        header_cell("Reportable"),
    ]);
    apply_table_style(&mut table);
    let fields: Vec<_> = if args.reportable {
        registry.reportable_fields().collect()
    } else {
        registry.all_fields().iter().collect()
    };
    for field in fields {
        table.add_row(vec![
            field.key.clone(),
            field.label.clone(),
            field.validator.tag(),
            flag(field.required).to_string(),
            flag(field.reportable).to_string(),
        ]);
    }
    println!("{table}");
    Ok(())
}

pub fn run_load(args: &LoadArgs) -> Result<LoadResult> {
    let sheet = &args.sheet;
    if args.dry_run {
        return run_dry_run(sheet);
    }
    let output = args
        .output
        .clone()
        .unwrap_or_else(|| default_output(&sheet.file));
    let mut sink = JsonLinesSink::new(&output);
    let outcome = load_with(sheet, &mut sink)?;
    Ok(LoadResult {
        input: sheet.file.clone(),
        output: Some(output),
        outcome,
    })
}

/// Resolve the header only; no row is mapped.
pub fn run_check(sheet: &SheetArgs) -> Result<CheckResult> {
    let span = info_span!("check", file = %sheet.file.display());
    let _guard = span.enter();

    let registry = load_registry(sheet.fields.as_deref())?;
    let layout = SheetLayout::new(sheet.header_row, sheet.first_data_row).context("sheet layout")?;
    let source = read_csv_sheet(&sheet.file)
        .with_context(|| format!("read {}", sheet.file.display()))?;
    let header = check_header(&registry, &source, layout)?;
    info!(
        columns = header.columns,
        problems = header.problems.len(),
        "header checked"
    );
    Ok(CheckResult {
        input: sheet.file.clone(),
        header,
    })
}

fn run_dry_run(sheet: &SheetArgs) -> Result<LoadResult> {
    let mut sink = MemorySink::new();
    let outcome = load_with(sheet, &mut sink)?;
    Ok(LoadResult {
        input: sheet.file.clone(),
        output: None,
        outcome,
    })
}

fn load_with<K>(sheet: &SheetArgs, sink: &mut K) -> Result<LoadOutcome>
where
    K: RecordSink,
    K::Error: std::error::Error + Send + Sync + 'static,
{
    let span = info_span!("load", file = %sheet.file.display());
    let _guard = span.enter();
    let start = Instant::now();

    let registry = load_registry(sheet.fields.as_deref())?;
    let layout = SheetLayout::new(sheet.header_row, sheet.first_data_row).context("sheet layout")?;
    let processor = PostProcessor::standard(derive_options(sheet));
    let source = read_csv_sheet(&sheet.file)
        .with_context(|| format!("read {}", sheet.file.display()))?;

    let outcome = load_source(&registry, &source, layout, &processor, sink)?;
    info!(
        file = %sheet.file.display(),
        records = outcome.records,
        duration_ms = start.elapsed().as_millis(),
        "load complete"
    );
    Ok(outcome)
}

fn load_registry(path: Option<&Path>) -> Result<FieldRegistry> {
    match path {
        Some(path) => FieldRegistry::from_path(path)
            .with_context(|| format!("load field table {}", path.display())),
        None => FieldRegistry::builtin().context("load built-in field table"),
    }
}

fn derive_options(sheet: &SheetArgs) -> DeriveOptions {
    if sheet.creatinine_umol_projects.is_empty() {
        DeriveOptions::default()
    } else {
        DeriveOptions::default()
            .with_bad_creatinine_projects(sheet.creatinine_umol_projects.iter().copied())
    }
}

/// `subjects-<yyyyMMdd-HHmm>.jsonl` in the input's directory.
fn default_output(input: &Path) -> PathBuf {
    let name = format!("subjects-{}.jsonl", Local::now().format(TIMESTAMP_FORMAT));
    input
        .parent()
        .map_or_else(|| PathBuf::from(&name), |dir| dir.join(&name))
}

fn flag(value: bool) -> &'static str {
    if value { "yes" } else { "-" }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_output_sits_next_to_input() {
        let output = default_output(Path::new("/data/icpc/site.csv"));
        assert_eq!(output.parent(), Some(Path::new("/data/icpc")));
        let name = output.file_name().and_then(|n| n.to_str()).unwrap();
        assert!(name.starts_with("subjects-"));
        assert!(name.ends_with(".jsonl"));
        // subjects-YYYYMMDD-HHMM.jsonl
        assert_eq!(name.len(), "subjects-".len() + 13 + ".jsonl".len());
    }
}
