use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use nhanes_cli::pipeline::PreparationRun;
use nhanes_ingest::SourceStatus;
use nhanes_transform::{ConsumerReadiness, DatasetSummary};

pub fn print_preparation(run: &PreparationRun) {
    let preparation = &run.preparation;
    println!("Prepared dataset: {}", run.output_path.display());
    println!("Report: {}", run.report_path.display());

    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Source"),
        header_cell("Format"),
        header_cell("Rows"),
        header_cell("Columns"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 2, CellAlignment::Right);
    align_column(&mut table, 3, CellAlignment::Right);
    for source in &preparation.sources {
        table.add_row(vec![
            Cell::new(source.topic.file_stem())
                .fg(Color::Blue)
                .add_attribute(Attribute::Bold),
            Cell::new(source.format),
            Cell::new(source.rows),
            Cell::new(source.columns),
        ]);
    }
    for stage in &preparation.stages {
        table.add_row(vec![
            Cell::new(stage.stage)
                .fg(Color::Cyan)
                .add_attribute(Attribute::Bold),
            dim_cell("-"),
            Cell::new(stage.rows),
            Cell::new(stage.columns),
        ]);
    }
    println!("{table}");
    println!(
        "Sentinel codes recoded: {} in raw tables, {} after merge",
        preparation.recoded_raw, preparation.recoded_merged
    );
    if !preparation.absent_columns.is_empty() {
        eprintln!(
            "Analysis variables not found: {}",
            preparation.absent_columns.join(", ")
        );
    }
}

pub fn print_dataset_summary(summary: &DatasetSummary) {
    println!("Rows: {}  Columns: {}", summary.rows, summary.columns);

    if summary.missing.is_empty() {
        println!("No missing values.");
    } else {
        let mut table = Table::new();
        table.set_header(vec![
            header_cell("Variable"),
            header_cell("Missing"),
            header_cell("Percent"),
        ]);
        apply_table_style(&mut table);
        align_column(&mut table, 1, CellAlignment::Right);
        align_column(&mut table, 2, CellAlignment::Right);
        for share in &summary.missing {
            table.add_row(vec![
                Cell::new(&share.column),
                Cell::new(share.missing),
                percent_cell(share.percent),
            ]);
        }
        println!();
        println!("Missing data:");
        println!("{table}");
    }

    if summary.statistics.is_empty() {
        return;
    }
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Variable"),
        header_cell("Count"),
        header_cell("Mean"),
        header_cell("Std"),
        header_cell("Min"),
        header_cell("25%"),
        header_cell("50%"),
        header_cell("75%"),
        header_cell("Max"),
    ]);
    apply_table_style(&mut table);
    for index in 1..9 {
        align_column(&mut table, index, CellAlignment::Right);
    }
    for stats in &summary.statistics {
        table.add_row(vec![
            Cell::new(&stats.column)
                .fg(Color::Blue)
                .add_attribute(Attribute::Bold),
            Cell::new(stats.count),
            number_cell(stats.mean),
            number_cell(stats.std),
            number_cell(stats.min),
            number_cell(stats.q25),
            number_cell(stats.median),
            number_cell(stats.q75),
            number_cell(stats.max),
        ]);
    }
    println!();
    println!("Key variables:");
    println!("{table}");
}

pub fn print_consumers(report: &[ConsumerReadiness]) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Model"),
        header_cell("Complete cases"),
        header_cell("Missing columns"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    for readiness in report {
        let cases = if readiness.complete_cases > 0 {
            Cell::new(readiness.complete_cases).fg(Color::Green)
        } else {
            Cell::new(readiness.complete_cases)
                .fg(Color::Red)
                .add_attribute(Attribute::Bold)
        };
        let missing = if readiness.missing_columns.is_empty() {
            dim_cell("-")
        } else {
            Cell::new(readiness.missing_columns.join(", ")).fg(Color::Red)
        };
        table.add_row(vec![
            Cell::new(readiness.consumer.name())
                .fg(Color::Blue)
                .add_attribute(Attribute::Bold),
            cases,
            missing,
        ]);
    }
    println!("{table}");
}

pub fn print_sources(statuses: &[SourceStatus]) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("File"),
        header_cell("Topic"),
        header_cell("Status"),
        header_cell("Path"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 2, CellAlignment::Center);
    for status in statuses {
        let state = match status.format {
            Some(format) => Cell::new(format!("✓ {format}"))
                .fg(Color::Green)
                .add_attribute(Attribute::Bold),
            None => Cell::new("missing")
                .fg(Color::Red)
                .add_attribute(Attribute::Bold),
        };
        table.add_row(vec![
            Cell::new(status.topic.file_stem())
                .fg(Color::Blue)
                .add_attribute(Attribute::Bold),
            Cell::new(status.topic.description()),
            state,
            dim_cell(status.path.display()),
        ]);
    }
    println!("{table}");
}

fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(140);
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

fn number_cell(value: Option<f64>) -> Cell {
    match value {
        Some(value) => Cell::new(format!("{value:.3}")),
        None => dim_cell("-"),
    }
}

fn percent_cell(percent: f64) -> Cell {
    let cell = Cell::new(format!("{percent:.1}%"));
    if percent > 50.0 {
        cell.fg(Color::Red)
    } else if percent > 10.0 {
        cell.fg(Color::Yellow)
    } else {
        cell
    }
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
