use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{
    Attribute, Cell, CellAlignment, Color, ColumnConstraint, ContentArrangement, Table, Width,
};

use define_cli::overview::{DocumentOverview, code_list_kind_label};
use define_cli::script::StepReport;
use define_model::Oid;
use define_store::IntegrityIssue;

use crate::types::{ApplyResult, CheckResult, ReconcileResult, SessionStatus};

pub fn print_overview(overview: &DocumentOverview) {
    println!(
        "Study: {} (protocol {}, define {})",
        overview.study_name,
        if overview.protocol_name.is_empty() {
            "-"
        } else {
            &overview.protocol_name
        },
        overview.define_version
    );

    let mut datasets = Table::new();
    datasets.set_header(vec![
        header_cell("#"),
        header_cell("Dataset"),
        header_cell("OID"),
        header_cell("Class"),
        header_cell("Standard"),
        header_cell("Variables"),
    ]);
    apply_table_style(&mut datasets);
    align_column(&mut datasets, 0, CellAlignment::Right);
    align_column(&mut datasets, 5, CellAlignment::Right);
    for (index, row) in overview.item_groups.iter().enumerate() {
        datasets.add_row(vec![
            dim_cell(index + 1),
            Cell::new(&row.name)
                .fg(Color::Blue)
                .add_attribute(Attribute::Bold),
            Cell::new(row.oid.as_str()),
            optional_cell(row.class.as_deref()),
            optional_cell(row.standard.as_deref()),
            Cell::new(row.variables),
        ]);
    }
    println!();
    println!("Datasets:");
    println!("{datasets}");

    let mut code_lists = Table::new();
    code_lists.set_header(vec![
        header_cell("#"),
        header_cell("Code List"),
        header_cell("OID"),
        header_cell("Kind"),
        header_cell("NCI Code"),
        header_cell("Items"),
    ]);
    apply_table_style(&mut code_lists);
    align_column(&mut code_lists, 0, CellAlignment::Right);
    align_column(&mut code_lists, 5, CellAlignment::Right);
    for (index, row) in overview.code_lists.iter().enumerate() {
        code_lists.add_row(vec![
            dim_cell(index + 1),
            Cell::new(&row.name),
            Cell::new(row.oid.as_str()),
            Cell::new(code_list_kind_label(row.kind)),
            optional_cell(row.nci_code.as_deref()),
            Cell::new(row.items),
        ]);
    }
    println!();
    println!("Code lists:");
    println!("{code_lists}");

    let mut counts = Table::new();
    counts.set_header(vec![header_cell("Entity"), header_cell("Count")]);
    apply_summary_table_style(&mut counts);
    align_column(&mut counts, 1, CellAlignment::Right);
    for (label, count) in &overview.counts {
        counts.add_row(vec![Cell::new(label), count_cell(*count, Color::Green)]);
    }
    println!();
    println!("{counts}");
}

pub fn print_check(result: &CheckResult) {
    if result.report.is_empty() {
        println!("{}: no integrity issues", result.document.display());
    } else {
        let mut table = Table::new();
        table.set_header(vec![
            header_cell("Check"),
            header_cell("Entity"),
            header_cell("Message"),
        ]);
        apply_table_style(&mut table);
        for issue in &result.report.issues {
            table.add_row(vec![
                Cell::new(issue_code(issue)).fg(Color::Red),
                Cell::new(issue_subject(issue)),
                Cell::new(issue.to_string()),
            ]);
        }
        println!("{}: {} issue(s)", result.document.display(), result.report.len());
        println!("{table}");
    }

    match &result.session {
        Some(SessionStatus::Matches { frames, cursor }) => println!(
            "Session: matches (frame {} of {frames})",
            cursor + 1
        ),
        Some(SessionStatus::Stale { reason }) => {
            println!("Session: stale - {reason}");
        }
        None => {}
    }
}

pub fn print_apply(result: &ApplyResult) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Step"),
        header_cell("Action"),
        header_cell("Outcome"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Right);
    for step in &result.steps {
        table.add_row(vec![
            dim_cell(step.step),
            Cell::new(step.action),
            outcome_cell(step),
        ]);
    }
    println!("{table}");
    println!(
        "History: {} frame(s), at frame {}",
        result.frames,
        result.cursor + 1
    );
    match &result.output {
        Some(path) => println!("Wrote {}", path.display()),
        None => println!("Dry run: nothing written"),
    }
    if let Some((path, stats)) = &result.session {
        println!(
            "Session {} (saved {}, skipped {}, failed {})",
            path.display(),
            stats.saved,
            stats.skipped,
            stats.failed
        );
    }
}

pub fn print_reconcile(result: &ReconcileResult) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Collection"),
        header_cell("Unchanged"),
        header_cell("Renamed"),
        header_cell("New"),
        header_cell("Conflicts"),
    ]);
    apply_table_style(&mut table);
    for column in 1..=3 {
        align_column(&mut table, column, CellAlignment::Right);
    }
    for row in result.report.rows() {
        let conflicts = if row.conflicts.is_empty() {
            dim_cell("-")
        } else {
            let oids: Vec<&str> = row.conflicts.iter().map(Oid::as_str).collect();
            Cell::new(oids.join(", ")).fg(Color::Yellow)
        };
        table.add_row(vec![
            Cell::new(row.collection),
            count_cell(row.unchanged, Color::DarkGrey),
            count_cell(row.renamed, Color::Cyan),
            count_cell(row.new, Color::Green),
            conflicts,
        ]);
    }
    println!("{table}");
    if let Some(path) = &result.written {
        println!("Wrote {}", path.display());
    } else if result.report.is_noop() {
        println!("Nothing to import");
    }
}

fn issue_code(issue: &IntegrityIssue) -> &'static str {
    match issue {
        IntegrityIssue::MissingFromOrder { .. } => "order-missing",
        IntegrityIssue::UnknownInOrder { .. } => "order-unknown",
        IntegrityIssue::DuplicateInOrder { .. } => "order-duplicate",
        IntegrityIssue::KeyMismatch { .. } => "key-mismatch",
        IntegrityIssue::DuplicateOid { .. } => "duplicate-oid",
        IntegrityIssue::DanglingReference { .. } => "dangling-ref",
        IntegrityIssue::UnknownDatasetClass { .. } => "dataset-class",
    }
}

fn issue_subject(issue: &IntegrityIssue) -> &str {
    match issue {
        IntegrityIssue::MissingFromOrder { oid, .. }
        | IntegrityIssue::UnknownInOrder { oid, .. }
        | IntegrityIssue::DuplicateInOrder { oid, .. }
        | IntegrityIssue::KeyMismatch { oid, .. }
        | IntegrityIssue::DuplicateOid { oid } => oid.as_str(),
        IntegrityIssue::DanglingReference { source, .. } => source.as_str(),
        IntegrityIssue::UnknownDatasetClass { item_group, .. } => item_group.as_str(),
    }
}

fn outcome_cell(step: &StepReport) -> Cell {
    let cell = Cell::new(&step.outcome);
    match step.outcome.as_str() {
        "applied" => cell.fg(Color::Green),
        "undone" | "redone" => cell.fg(Color::Cyan),
        "unchanged" | "view only" => cell.fg(Color::DarkGrey),
        _ if step.is_rejected() => cell.fg(Color::Red).add_attribute(Attribute::Bold),
        _ => cell,
    }
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
    if table.column_count() >= 6 {
        table.set_constraints(vec![
            ColumnConstraint::LowerBoundary(Width::Fixed(3)),
            ColumnConstraint::UpperBoundary(Width::Percentage(30)),
            ColumnConstraint::UpperBoundary(Width::Percentage(30)),
            ColumnConstraint::LowerBoundary(Width::Fixed(8)),
            ColumnConstraint::LowerBoundary(Width::Fixed(8)),
            ColumnConstraint::LowerBoundary(Width::Fixed(5)),
        ]);
    }
}

fn apply_summary_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
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

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
