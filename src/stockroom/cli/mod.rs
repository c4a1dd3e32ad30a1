//! Command-line client: subcommand handlers and the interactive menu.

mod menu;
mod print;

use crate::args::{Cli, Commands};
use clap::Parser;
use print::{print_config, print_inventory, print_messages, print_search};
use rust_decimal::Decimal;
use std::io;
use std::path::PathBuf;
use stockroom::api::{ConfigAction, InventoryApi, MessageLevel, ProductFilter, StockroomPaths};
use stockroom::config::StockroomConfig;
use stockroom::error::Result;
use stockroom::logging;
use stockroom::model::{ProductRecord, ProductUpdate};
use stockroom::store::fs::FileBackend;

pub(crate) struct AppContext {
    api: InventoryApi<FileBackend>,
}

pub(crate) fn run() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);
    let mut ctx = init_context(&cli)?;

    let loaded = ctx.api.load();
    match cli.command {
        Some(Commands::Menu) | None => {
            print_messages(&loaded.messages);
            return menu::run(&mut ctx, &mut io::stdin().lock());
        }
        // Load problems still need to be seen, the routine "loaded N" line does not.
        Some(_) => print_messages(
            &loaded
                .messages
                .into_iter()
                .filter(|m| m.level != MessageLevel::Info)
                .collect::<Vec<_>>(),
        ),
    }

    match cli.command {
        Some(Commands::View { sku, name }) => handle_view(&mut ctx, sku, name),
        Some(Commands::Search { term }) => handle_search(&mut ctx, term),
        Some(Commands::Add {
            sku,
            name,
            quantity,
            price,
        }) => handle_add(&mut ctx, sku, name, quantity, price),
        Some(Commands::Update {
            sku,
            quantity,
            price,
        }) => handle_update(&mut ctx, sku, quantity, price),
        Some(Commands::Delete { sku, yes }) => handle_delete(&mut ctx, sku, yes),
        Some(Commands::Import { path }) => handle_import(&mut ctx, path),
        Some(Commands::Export { path }) => handle_export(&mut ctx, path),
        Some(Commands::Sample { path }) => handle_sample(&mut ctx, path),
        Some(Commands::Config { key, value }) => handle_config(&mut ctx, key, value),
        Some(Commands::Menu) | None => Ok(()),
    }
}

fn init_context(cli: &Cli) -> Result<AppContext> {
    let data_dir = match &cli.dir {
        Some(dir) => dir.clone(),
        None => std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
    };

    let config = StockroomConfig::load(&data_dir)?;
    let backend = FileBackend::new(config.data_path(&data_dir));
    let paths = StockroomPaths { data_dir };
    let api = InventoryApi::new(backend, paths, config.get_export_ext());

    Ok(AppContext { api })
}

fn handle_view(ctx: &mut AppContext, sku: Option<String>, name: Option<String>) -> Result<()> {
    let result = ctx.api.view(ProductFilter::new(sku, name));
    print_inventory(&result);
    Ok(())
}

fn handle_search(ctx: &mut AppContext, term: String) -> Result<()> {
    let result = ctx.api.search(&term)?;
    print_search(&result, term.trim());
    Ok(())
}

fn handle_add(
    ctx: &mut AppContext,
    sku: String,
    name: String,
    quantity: u32,
    price: Decimal,
) -> Result<()> {
    let result = ctx
        .api
        .add_product(ProductRecord::new(sku, name, quantity, price))?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_update(
    ctx: &mut AppContext,
    sku: String,
    quantity: Option<u32>,
    price: Option<Decimal>,
) -> Result<()> {
    let result = ctx
        .api
        .update_product(&sku, &ProductUpdate::new(quantity, price))?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_delete(ctx: &mut AppContext, sku: String, yes: bool) -> Result<()> {
    if !yes && !menu::confirm_delete(&mut io::stdin().lock(), &sku)? {
        println!("Delete cancelled.");
        return Ok(());
    }
    let result = ctx.api.delete_product(&sku)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_import(ctx: &mut AppContext, path: PathBuf) -> Result<()> {
    let result = ctx.api.import_products(&path)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_export(ctx: &mut AppContext, path: Option<PathBuf>) -> Result<()> {
    let result = ctx.api.export_products(path.as_deref())?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_sample(ctx: &mut AppContext, path: PathBuf) -> Result<()> {
    let result = ctx.api.write_sample(&path)?;
    print_inventory(&result);
    print_messages(&result.messages);
    Ok(())
}

fn handle_config(ctx: &mut AppContext, key: Option<String>, value: Option<String>) -> Result<()> {
    let action = match (key, value) {
        (None, _) => ConfigAction::ShowAll,
        (Some(key), None) => ConfigAction::ShowKey(key),
        (Some(key), Some(value)) => ConfigAction::Set(key, value),
    };
    let show_all = matches!(action, ConfigAction::ShowAll);

    let result = ctx.api.config(action)?;
    if show_all {
        if let Some(config) = &result.config {
            print_config(config);
        }
    }
    print_messages(&result.messages);
    Ok(())
}
