//! Console tables for audit runs, checked names, and the rule table.

use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{
    Attribute, Cell, CellAlignment, Color, ColumnConstraint, ContentArrangement, Table, Width,
};

use cta_model::{AuditTally, BatchSummary, Decision};
use cta_standards::RuleTable;

use crate::types::{AuditRun, CheckedName};

pub fn print_audit_summary(run: &AuditRun) {
    println!("Sheet: {}", run.sheet.display());
    println!("Ruleset: {}", run.ruleset);
    println!("Analyzed sheet: {}", run.analyzed.display());
    if let Some(path) = &run.json {
        println!("JSON report: {}", path.display());
    }
    if !run.layout_detected {
        println!("No file-name header found; used the default column.");
    }
    println!("{}", totals_table(&run.summary.overall));
    if !run.summary.by_group.is_empty() {
        println!();
        println!("By group:");
        println!("{}", group_table(&run.summary));
    }
}

/// One row per decision, shares relative to processed rows.
pub fn totals_table(tally: &AuditTally) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Decision"),
        header_cell("Rows"),
        header_cell("Share"),
    ]);
    apply_summary_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    align_column(&mut table, 2, CellAlignment::Right);

    let processed = tally.processed();
    let judged = [
        (Decision::Compliant, tally.compliant, Color::Green),
        (Decision::NeedsChanges, tally.needs_changes, Color::Yellow),
        (Decision::NonCompliant, tally.non_compliant, Color::Red),
    ];
    for (decision, count, color) in judged {
        table.add_row(vec![
            decision_cell(decision),
            count_cell(count, color),
            Cell::new(percent(count, processed)),
        ]);
    }
    for (decision, count) in [(Decision::Empty, tally.empty), (Decision::Skip, tally.skipped)] {
        table.add_row(vec![
            decision_cell(decision),
            count_cell(count, Color::Yellow),
            dim_cell("-"),
        ]);
    }
    table.add_row(vec![
        Cell::new("PROCESSED")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        Cell::new(processed).add_attribute(Attribute::Bold),
        Cell::new(format!("{:.1}% flagged", tally.flagged_rate())).add_attribute(Attribute::Bold),
    ]);
    table
}

/// Groups ranked by flagged count, worst first.
pub fn group_table(summary: &BatchSummary) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Group"),
        header_cell("Processed"),
        header_cell("Compliant"),
        header_cell("Flagged"),
        header_cell("Flagged %"),
        header_cell("Empty"),
        header_cell("Skipped"),
    ]);
    apply_summary_table_style(&mut table);
    for index in 1..7 {
        align_column(&mut table, index, CellAlignment::Right);
    }
    for (group, tally) in summary.ranked_groups() {
        table.add_row(tally_row(Cell::new(group), tally));
    }
    table.add_row(tally_row(
        Cell::new("TOTAL")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        &summary.overall,
    ));
    table
}

fn tally_row(label: Cell, tally: &AuditTally) -> Vec<Cell> {
    vec![
        label,
        Cell::new(tally.processed()),
        count_cell(tally.compliant, Color::Green),
        count_cell(tally.flagged(), Color::Red),
        Cell::new(format!("{:.1}%", tally.flagged_rate())),
        count_cell(tally.empty, Color::Yellow),
        dim_cell(tally.skipped),
    ]
}

pub fn check_table(checked: &[CheckedName]) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("File name"),
        header_cell("Decision"),
        header_cell("Suggestion"),
        header_cell("Notes"),
    ]);
    apply_table_style(&mut table);
    for entry in checked {
        let suggestion = match entry.outcome.replacement_for(entry.name.trim()) {
            Some(replacement) => Cell::new(replacement),
            None => dim_cell("-"),
        };
        let notes = if entry.outcome.notes.is_empty() {
            dim_cell("-")
        } else {
            Cell::new(
                entry
                    .outcome
                    .notes
                    .iter()
                    .map(|note| note.message.as_str())
                    .collect::<Vec<_>>()
                    .join("\n"),
            )
        };
        table.add_row(vec![
            Cell::new(&entry.name),
            decision_cell(entry.outcome.decision),
            suggestion,
            notes,
        ]);
    }
    table
}

pub fn print_rules(rules: &RuleTable) {
    println!("Ruleset: {}", rules.ruleset());
    println!("Convention: {}", rules.convention());
    println!("Source: {}", rules.origin().display());
    println!("Maximum stem length: {}", rules.max_stem_len());
    println!("Exempt prefixes: {}", rules.exempt_prefixes().join(", "));
    println!("{}", rules_table(rules));
}

pub fn rules_table(rules: &RuleTable) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Prefix"),
        header_cell("Family"),
        header_cell("Expected shape"),
    ]);
    apply_table_style(&mut table);
    for (prefix, family) in rules.prefixes() {
        table.add_row(vec![
            Cell::new(prefix).add_attribute(Attribute::Bold),
            dim_cell(family),
            Cell::new(family.pattern(prefix, rules.id_label(prefix))),
        ]);
    }
    table
}

fn percent(count: usize, of: usize) -> String {
    if of == 0 {
        return "-".to_string();
    }
    format!("{:.1}%", count as f64 / of as f64 * 100.0)
}

fn decision_cell(decision: Decision) -> Cell {
    let (label, color) = match decision {
        Decision::Compliant => ("Compliant", Color::Green),
        Decision::NeedsChanges => ("Needs changes", Color::Yellow),
        Decision::NonCompliant => ("Non-compliant", Color::Red),
        Decision::Empty => ("Empty", Color::Yellow),
        Decision::Skip => ("Skipped", Color::DarkGrey),
    };
    Cell::new(label).fg(color)
}

fn count_cell(count: usize, color: Color) -> Cell {
    if count > 0 {
        Cell::new(count).fg(color).add_attribute(Attribute::Bold)
    } else {
        dim_cell(count)
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label).add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value.to_string()).add_attribute(Attribute::Dim)
}

fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(140);
    if table.column_count() == 4 {
        table.set_constraints(vec![
            ColumnConstraint::UpperBoundary(Width::Percentage(30)),
            ColumnConstraint::LowerBoundary(Width::Fixed(9)),
            ColumnConstraint::UpperBoundary(Width::Percentage(30)),
            ColumnConstraint::UpperBoundary(Width::Percentage(40)),
        ]);
    }
}

fn apply_summary_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shares_are_relative_to_processed_rows() {
        assert_eq!(percent(1, 4), "25.0%");
        assert_eq!(percent(0, 0), "-");
    }

    #[test]
    fn group_table_lists_worst_group_first() {
        let mut summary = BatchSummary::default();
        summary.record("Birch", Decision::Compliant);
        summary.record("Acme", Decision::NonCompliant);
        summary.record("Acme", Decision::NeedsChanges);
        summary.record("", Decision::Empty);

        let rendered = group_table(&summary).to_string();
        let acme = rendered.find("Acme").expect("acme row");
        let birch = rendered.find("Birch").expect("birch row");
        assert!(acme < birch, "{rendered}");
        assert!(rendered.contains("Unknown"));
        assert!(rendered.contains("TOTAL"));
        assert!(rendered.contains("66.7%"));
    }
}
