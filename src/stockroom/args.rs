use clap::{Parser, Subcommand};
use rust_decimal::Decimal;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "stockroom")]
#[command(about = "Track products, quantities and prices in a spreadsheet", long_about = None)]
#[command(version = concat!(env!("CARGO_PKG_VERSION"), " (", env!("GIT_HASH"), ")"))]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Directory holding the inventory file and stockroom.json (defaults to the current directory)
    #[arg(short, long, global = true, env = "STOCKROOM_HOME")]
    pub dir: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show the inventory with its total value
    #[command(alias = "ls")]
    View {
        /// Only products whose SKU contains this text
        #[arg(long)]
        sku: Option<String>,

        /// Only products whose name contains this text
        #[arg(long)]
        name: Option<String>,
    },

    /// Search products by SKU or name
    #[command(alias = "s")]
    Search { term: String },

    /// Add a new product
    #[command(alias = "n")]
    Add {
        sku: String,
        name: String,
        quantity: u32,
        price: Decimal,
    },

    /// Change the quantity and/or price of a product
    #[command(alias = "u")]
    Update {
        sku: String,

        /// New quantity
        #[arg(short, long)]
        quantity: Option<u32>,

        /// New unit price
        #[arg(short, long)]
        price: Option<Decimal>,
    },

    /// Delete a product
    #[command(alias = "rm")]
    Delete {
        sku: String,

        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },

    /// Import products from a spreadsheet (xlsx, xls, ods or csv), updating existing SKUs
    Import { path: PathBuf },

    /// Export the inventory to a spreadsheet
    Export {
        /// Output file; the configured extension is added when missing
        path: Option<PathBuf>,
    },

    /// Write a sheet with sample products to import
    Sample {
        #[arg(default_value = "sample_products.xlsx")]
        path: PathBuf,
    },

    /// Get or set configuration
    Config {
        /// Configuration key (data-file, export-ext)
        key: Option<String>,

        /// Value to set (if omitted, prints current value)
        value: Option<String>,
    },

    /// Interactive menu (the default)
    Menu,
}
