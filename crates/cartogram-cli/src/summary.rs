use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use cartogram_cli::types::{RunResult, StageStatus, StageSummary};

pub fn print_summary(result: &RunResult) {
    println!("Dataset: {}", result.dataset.display());
    println!("Policy: {}", result.policy);
    if let Some(join) = &result.join {
        println!(
            "Joined: {} rows, {} mapped regions -> {}",
            join.rows,
            join.mapped_regions,
            result.paths.processed_csv.display()
        );
    }
    println!("{}", stage_table(&result.stages));
    if !result.warnings.is_empty() {
        eprintln!("Warnings:");
        for warning in &result.warnings {
            eprintln!("- {warning}");
        }
    }
    if result.halted {
        eprintln!("Halted after a failed invocation (--on-failure halt).");
    }
}

pub fn stage_table(stages: &[StageSummary]) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Stage"),
        header_cell("Status"),
        header_cell("Detail"),
        header_cell("ms"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Center);
    align_column(&mut table, 3, CellAlignment::Right);
    for summary in stages {
        table.add_row(vec![
            Cell::new(summary.stage)
                .fg(Color::Blue)
                .add_attribute(Attribute::Bold),
            status_cell(summary.status),
            Cell::new(&summary.detail),
            match summary.status {
                StageStatus::Skipped | StageStatus::NotRun => dim_cell("-"),
                _ => Cell::new(summary.duration_ms),
            },
        ]);
    }
    table
}

fn apply_table_style(table: &mut Table) {
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

fn status_cell(status: StageStatus) -> Cell {
    match status {
        StageStatus::Done => Cell::new(status.as_str()).fg(Color::Green),
        StageStatus::Failed => Cell::new(status.as_str())
            .fg(Color::Red)
            .add_attribute(Attribute::Bold),
        StageStatus::Skipped | StageStatus::NotRun => dim_cell(status.as_str()),
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
