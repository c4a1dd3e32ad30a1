//! Interactive numbered menu, read from any `BufRead` so it can be driven
//! by piped stdin.

use super::print::{print_error, print_inventory, print_messages, print_search};
use super::AppContext;
use rust_decimal::Decimal;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use stockroom::api::ProductFilter;
use stockroom::error::{Result, StockError};
use stockroom::model::{ProductRecord, ProductUpdate};

const MENU_ITEMS: [&str; 8] = [
    "View All Inventory",
    "Search Product",
    "Add New Product",
    "Update Product (Quantity/Price)",
    "Delete Product",
    "Import from Spreadsheet",
    "Export to Spreadsheet",
    "Exit",
];

enum Flow {
    Continue,
    Exit,
}

pub(super) fn run<R: BufRead>(ctx: &mut AppContext, input: &mut R) -> Result<()> {
    loop {
        print_menu();
        let Some(choice) = prompt(input, "Enter your choice (1-8): ")? else {
            println!();
            return Ok(());
        };

        match dispatch(ctx, input, choice.trim()) {
            Ok(Flow::Continue) => {}
            Ok(Flow::Exit) => {
                println!("\nThank you for using the Inventory Management System!");
                return Ok(());
            }
            Err(e) => print_error(&e),
        }
    }
}

fn print_menu() {
    println!("\n{}", "=".repeat(50));
    println!("INVENTORY MANAGEMENT SYSTEM");
    println!("{}", "=".repeat(50));
    for (i, item) in MENU_ITEMS.iter().enumerate() {
        println!("{}. {}", i + 1, item);
    }
    println!("{}", "=".repeat(50));
}

fn dispatch<R: BufRead>(ctx: &mut AppContext, input: &mut R, choice: &str) -> Result<Flow> {
    match choice {
        "1" => {
            print_inventory(&ctx.api.view(ProductFilter::default()));
        }
        "2" => {
            let term = prompt_or_empty(input, "Enter search term (SKU or Product Name): ")?;
            let result = ctx.api.search(&term)?;
            print_search(&result, term.trim());
        }
        "3" => add_product(ctx, input)?,
        "4" => update_product(ctx, input)?,
        "5" => delete_product(ctx, input)?,
        "6" => {
            let path = prompt_or_empty(input, "Enter spreadsheet file path: ")?;
            let result = ctx.api.import_products(&PathBuf::from(path.trim()))?;
            print_messages(&result.messages);
        }
        "7" => {
            let path = prompt_or_empty(
                input,
                "Enter export file path (leave blank for a timestamped file): ",
            )?;
            let path = path.trim();
            let path = (!path.is_empty()).then(|| PathBuf::from(path));
            let result = ctx.api.export_products(path.as_deref())?;
            print_messages(&result.messages);
        }
        "8" => return Ok(Flow::Exit),
        _ => println!("Invalid choice. Please enter a number between 1 and 8."),
    }
    Ok(Flow::Continue)
}

fn add_product<R: BufRead>(ctx: &mut AppContext, input: &mut R) -> Result<()> {
    println!("\n--- Add New Product ---");
    let sku = prompt_or_empty(input, "Enter SKU: ")?;
    let name = prompt_or_empty(input, "Enter Product Name: ")?;
    let quantity = parse_quantity(&prompt_or_empty(input, "Enter Quantity: ")?)?;
    let price = parse_price(&prompt_or_empty(input, "Enter Price: ")?)?;

    let result = ctx
        .api
        .add_product(ProductRecord::new(sku, name, quantity, price))?;
    print_messages(&result.messages);
    Ok(())
}

fn update_product<R: BufRead>(ctx: &mut AppContext, input: &mut R) -> Result<()> {
    println!("\n--- Update Product ---");
    let sku = prompt_or_empty(input, "Enter SKU to update: ")?;
    if !ctx.api.contains(&sku) {
        return Err(StockError::NotFound(sku.trim().to_string()));
    }

    println!("Leave blank to skip updating a field");
    let quantity = prompt_or_empty(input, "Enter new quantity: ")?;
    let price = prompt_or_empty(input, "Enter new price: ")?;

    let update = ProductUpdate::new(
        optional(&quantity).map(parse_quantity).transpose()?,
        optional(&price).map(parse_price).transpose()?,
    );
    let result = ctx.api.update_product(&sku, &update)?;
    print_messages(&result.messages);
    Ok(())
}

fn delete_product<R: BufRead>(ctx: &mut AppContext, input: &mut R) -> Result<()> {
    println!("\n--- Delete Product ---");
    let sku = prompt_or_empty(input, "Enter SKU to delete: ")?;
    if !ctx.api.contains(&sku) {
        return Err(StockError::NotFound(sku.trim().to_string()));
    }
    if !confirm_delete(input, sku.trim())? {
        println!("Delete cancelled.");
        return Ok(());
    }

    let result = ctx.api.delete_product(&sku)?;
    print_messages(&result.messages);
    Ok(())
}

/// Ask for a yes/no confirmation. Anything but "yes"/"y" declines, as does EOF.
pub(super) fn confirm_delete<R: BufRead>(input: &mut R, sku: &str) -> Result<bool> {
    let label = format!("Are you sure you want to delete {}? (yes/no): ", sku);
    let answer = prompt(input, &label)?.unwrap_or_default();
    Ok(matches!(
        answer.trim().to_lowercase().as_str(),
        "yes" | "y"
    ))
}

/// Print `label` and read one line. `None` on end of input.
fn prompt<R: BufRead>(input: &mut R, label: &str) -> Result<Option<String>> {
    print!("{}", label);
    io::stdout().flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim_end_matches(&['\r', '\n'][..]).to_string()))
}

fn prompt_or_empty<R: BufRead>(input: &mut R, label: &str) -> Result<String> {
    Ok(prompt(input, label)?.unwrap_or_default())
}

fn optional(text: &str) -> Option<&str> {
    let text = text.trim();
    (!text.is_empty()).then_some(text)
}

fn invalid_number() -> StockError {
    StockError::Api("Invalid quantity or price format.".to_string())
}

fn parse_quantity(text: &str) -> Result<u32> {
    text.trim().parse().map_err(|_| invalid_number())
}

fn parse_price(text: &str) -> Result<Decimal> {
    let price: Decimal = text
        .trim()
        .trim_start_matches('$')
        .parse()
        .map_err(|_| invalid_number())?;
    if price < Decimal::ZERO {
        return Err(invalid_number());
    }
    Ok(price)
}
