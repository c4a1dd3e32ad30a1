use colored::Colorize;
use stockroom::api::{CmdMessage, CmdResult, MessageLevel};
use stockroom::config::StockroomConfig;
use stockroom::error::StockError;
use stockroom::model::{ProductRecord, COLUMNS};
use unicode_width::UnicodeWidthStr;

const RULE_WIDTH: usize = 80;

pub(super) fn print_messages(messages: &[CmdMessage]) {
    for message in messages {
        print_message(message);
    }
}

pub(super) fn print_message(message: &CmdMessage) {
    match message.level {
        MessageLevel::Info => println!("{}", message.content.dimmed()),
        MessageLevel::Success => println!("{}", message.content.green()),
        MessageLevel::Error => println!("{}", message.content.red()),
    }
}

pub(super) fn print_error(error: &StockError) {
    print_message(&CmdMessage::error(format!("Error: {}", error)));
}

pub(super) fn print_config(config: &StockroomConfig) {
    println!("data-file = {}", config.data_file);
    println!("export-ext = {}", config.get_export_ext());
}

/// Inventory listing with product count and total value.
pub(super) fn print_inventory(result: &CmdResult) {
    if result.listed_products.is_empty() {
        print_messages(&result.messages);
        return;
    }

    print_banner("INVENTORY");
    print!("{}", render_table(&result.listed_products));
    println!("\nTotal Products: {}", result.listed_products.len());
    if let Some(total) = result.total_value {
        println!("Total Inventory Value: {}", format!("${:.2}", total).bold());
    }
    println!("{}\n", "=".repeat(RULE_WIDTH));
    print_messages(&result.messages);
}

pub(super) fn print_search(result: &CmdResult, term: &str) {
    if result.listed_products.is_empty() {
        print_messages(&result.messages);
        return;
    }

    print_banner(&format!("SEARCH RESULTS FOR: '{}'", term));
    print!("{}", render_table(&result.listed_products));
    println!("\nFound {} product(s)", result.listed_products.len());
    println!("{}\n", "=".repeat(RULE_WIDTH));
    print_messages(&result.messages);
}

fn print_banner(title: &str) {
    println!("\n{}", "=".repeat(RULE_WIDTH));
    println!("{}", title.bold());
    println!("{}", "=".repeat(RULE_WIDTH));
}

fn row_cells(record: &ProductRecord) -> [String; 4] {
    [
        record.sku.clone(),
        record.name.clone(),
        record.quantity.to_string(),
        format!("${:.2}", record.price),
    ]
}

fn pad(text: &str, width: usize, align_right: bool) -> String {
    let fill = " ".repeat(width.saturating_sub(text.width()));
    if align_right {
        format!("{}{}", fill, text)
    } else {
        format!("{}{}", text, fill)
    }
}

fn separator(widths: &[usize; 4], fill: char) -> String {
    let mut line = String::from("+");
    for width in widths {
        line.push_str(&fill.to_string().repeat(width + 2));
        line.push('+');
    }
    line
}

/// Grid table in the style of `tabulate`'s "grid" format. Quantity and price
/// are right-aligned.
pub(super) fn render_table(products: &[ProductRecord]) -> String {
    let rows: Vec<[String; 4]> = products.iter().map(row_cells).collect();

    let mut widths = COLUMNS.map(UnicodeWidthStr::width);
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.width());
        }
    }

    let format_row = |cells: [&str; 4]| {
        let mut line = String::from("|");
        for (col, (cell, width)) in cells.iter().zip(widths).enumerate() {
            line.push(' ');
            line.push_str(&pad(cell, width, col >= 2));
            line.push_str(" |");
        }
        line
    };

    let mut out = String::new();
    out.push_str(&separator(&widths, '-'));
    out.push('\n');
    out.push_str(&format_row(COLUMNS));
    out.push('\n');
    out.push_str(&separator(&widths, '='));
    out.push('\n');
    for row in &rows {
        out.push_str(&format_row([
            row[0].as_str(),
            row[1].as_str(),
            row[2].as_str(),
            row[3].as_str(),
        ]));
        out.push('\n');
        out.push_str(&separator(&widths, '-'));
        out.push('\n');
    }
    out
}
