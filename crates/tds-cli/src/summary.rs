use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use tds_cli::pipeline::{DecodedSheet, PipelineSummary};

use crate::commands::Inspection;

pub fn print_summary(summary: &PipelineSummary) {
    println!("Input: {}", summary.input.display());
    if let Some(sheet) = &summary.sheet {
        println!("Sheet: {sheet}");
    }
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Stage"),
        header_cell("Detail"),
        header_cell("Count"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 2, CellAlignment::Right);

    table.add_row(vec![
        stage_cell("Decode"),
        Cell::new(format!("{} columns", summary.columns)),
        Cell::new(summary.rows),
    ]);
    let keys = if summary.metadata_keys.is_empty() {
        dim_cell("none matched")
    } else {
        Cell::new(summary.metadata_keys.join(", "))
    };
    table.add_row(vec![
        stage_cell("Metadata"),
        keys,
        Cell::new(summary.metadata_keys.len()),
    ]);
    table.add_row(vec![
        stage_cell("Categories"),
        Cell::new(format!("policy {}", summary.policy)),
        Cell::new(summary.categories),
    ]);
    table.add_row(vec![
        stage_cell("Records"),
        dim_cell("-"),
        count_cell(summary.records),
    ]);
    table.add_row(vec![
        stage_cell("Written"),
        Cell::new(&summary.destination),
        count_cell(summary.written),
    ]);
    println!("{table}");
}

pub fn print_inspection(inspection: &Inspection) {
    match inspection {
        Inspection::Sheets { input, sheets } => {
            println!("Sheets in {}:", input.display());
            for sheet in sheets {
                println!("- {sheet}");
            }
        }
        Inspection::Header(decoded) => print_header(decoded),
    }
}

fn print_header(decoded: &DecodedSheet) {
    let DecodedSheet { table: raw, header } = decoded;
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("#"),
        header_cell("Level 0"),
        header_cell("Level 1"),
        header_cell("Level 2"),
        header_cell("Role"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Right);

    for (position, label) in raw.labels().iter().enumerate() {
        let metadata = header
            .metadata
            .iter()
            .find(|column| raw.position(&column.label) == Some(position));
        let role = if let Some(column) = metadata {
            Cell::new(format!("metadata {}", column.key))
                .fg(Color::Blue)
                .add_attribute(Attribute::Bold)
        } else if let Some(column) = header
            .measurements
            .iter()
            .find(|column| column.position == position)
        {
            Cell::new(column.kind.label()).fg(Color::Green)
        } else {
            dim_cell("ignored")
        };
        table.add_row(vec![
            Cell::new(position),
            Cell::new(&label.level0),
            Cell::new(&label.level1),
            Cell::new(&label.level2),
            role,
        ]);
    }
    println!("{table}");
    println!(
        "{} rows, {} categories, {} ignored columns",
        raw.height(),
        header.categories().len(),
        header.ignored.len()
    );
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

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn stage_cell(label: &str) -> Cell {
    Cell::new(label).add_attribute(Attribute::Bold)
}

fn count_cell(count: usize) -> Cell {
    if count > 0 {
        Cell::new(count).fg(Color::Green).add_attribute(Attribute::Bold)
    } else {
        Cell::new(count).fg(Color::Yellow)
    }
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
