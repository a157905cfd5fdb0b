use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use icpc_map::ColumnProblem;
use icpc_model::{Diagnostic, Severity, column_letters};

use crate::types::{CheckResult, LoadResult};

/// Findings listed individually before the issue table is truncated.
const MAX_LISTED_FINDINGS: usize = 50;

pub fn print_summary(result: &LoadResult) {
    let outcome = &result.outcome;
    println!("Input: {}", result.input.display());
    match &result.output {
        Some(path) => println!("Output: {}", path.display()),
        None => println!("Output: not written"),
    }

    let summary = outcome.summary();
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Columns"),
        header_cell("Rows"),
        header_cell("Records"),
        header_cell("Rejected"),
        header_cell("Subjects"),
        header_cell("Errors"),
        header_cell("Warnings"),
    ]);
    apply_summary_table_style(&mut table);
    for index in 0..7 {
        align_column(&mut table, index, CellAlignment::Right);
    }
    table.add_row(vec![
        Cell::new(outcome.columns),
        Cell::new(outcome.rows),
        Cell::new(outcome.records),
        count_cell(outcome.rejected, Color::Red),
        Cell::new(outcome.stored).add_attribute(Attribute::Bold),
        count_cell(summary.errors, Color::Red),
        count_cell(summary.warnings, Color::Yellow),
    ]);
    println!("{table}");

    if !summary.by_field.is_empty() {
        let mut fields = Table::new();
        fields.set_header(vec![header_cell("Field"), header_cell("Findings")]);
        apply_table_style(&mut fields);
        align_column(&mut fields, 1, CellAlignment::Right);
        let mut counts: Vec<_> = summary.by_field.iter().collect();
        counts.sort_by(|a, b| b.1.cmp(a.1).then_with(|| a.0.cmp(b.0)));
        for (field, count) in counts {
            fields.add_row(vec![Cell::new(field), Cell::new(count)]);
        }
        println!();
        println!("Findings by field:");
        println!("{fields}");
    }
    print_issue_table(&outcome.diagnostics);
}

pub fn print_header_check(result: &CheckResult) {
    let header = &result.header;
    println!("Input: {}", result.input.display());
    println!("Mapped columns: {}", header.columns);
    if header.is_clean() {
        println!("Header OK");
        return;
    }

    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Column"),
        header_cell("Problem"),
        header_cell("Detail"),
    ]);
    apply_issue_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Center);
    for problem in &header.problems {
        let (kind, detail) = match problem {
            ColumnProblem::Unmapped { text, .. } => ("unmapped", format!("{text:?} matches no field")),
            ColumnProblem::Duplicate {
                key, first_column, ..
            } => (
                "duplicate",
                format!("{key} already mapped by column {}", column_letters(*first_column)),
            ),
        };
        table.add_row(vec![
            Cell::new(column_letters(problem.column())),
            Cell::new(kind).fg(Color::Red),
            Cell::new(detail),
        ]);
    }
    println!();
    println!("Header problems:");
    println!("{table}");
}

fn print_issue_table(diagnostics: &[Diagnostic]) {
    if diagnostics.is_empty() {
        return;
    }
    let mut ordered: Vec<&Diagnostic> = diagnostics.iter().collect();
    ordered.sort_by_key(|d| severity_rank(d.severity));

    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Severity"),
        header_cell("Subject"),
        header_cell("Field"),
        header_cell("Cell"),
        header_cell("Kind"),
        header_cell("Message"),
        header_cell("Value"),
    ]);
    apply_issue_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Center);
    align_column(&mut table, 3, CellAlignment::Center);
    for diagnostic in ordered.iter().take(MAX_LISTED_FINDINGS) {
        table.add_row(vec![
            severity_cell(diagnostic.severity),
            optional_cell(diagnostic.subject.as_deref()),
            optional_cell(diagnostic.field.as_deref()),
            optional_cell(diagnostic.cell.map(|cell| cell.to_string()).as_deref()),
            Cell::new(diagnostic.kind.as_str()),
            Cell::new(&diagnostic.message),
            optional_cell(diagnostic.value.as_deref()),
        ]);
    }
    println!();
    println!("Issues:");
    println!("{table}");
    if ordered.len() > MAX_LISTED_FINDINGS {
        println!("... and {} more", ordered.len() - MAX_LISTED_FINDINGS);
    }
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn apply_summary_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(100);
}

fn apply_issue_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::DynamicFullWidth)
        .set_width(160);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn count_cell(count: usize, color: Color) -> Cell {
    if count > 0 {
        Cell::new(count).fg(color).add_attribute(Attribute::Bold)
    } else {
        dim_cell(count)
    }
}

fn optional_cell(value: Option<&str>) -> Cell {
    match value {
        Some(value) => Cell::new(value),
        None => dim_cell("-"),
    }
}

fn severity_rank(severity: Severity) -> u8 {
    match severity {
        Severity::Error => 0,
        Severity::Warning => 1,
    }
}

fn severity_cell(severity: Severity) -> Cell {
    match severity {
        Severity::Error => Cell::new("ERROR").fg(Color::Red),
        Severity::Warning => Cell::new("WARN").fg(Color::Yellow),
    }
}

pub fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
