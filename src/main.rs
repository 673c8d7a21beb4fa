use std::{error::Error, path::PathBuf, process::ExitCode};

use clap::Parser;
use colored::Colorize;
use library_catalog::{Book, Catalog, CatalogConfig, InventoryEntry, Library, SmallCatalog};
use tracing_subscriber::EnvFilter;

/// Command-line arguments for the catalog demo
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// JSON catalog configuration; a sample inventory is used when absent
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Query to run against the catalog, may be repeated
    #[arg(short, long = "query")]
    queries: Vec<String>,

    /// Use the small catalog with exact-match search
    #[arg(long)]
    small: bool,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_tracing(args.verbose);

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {e}", "error:".red().bold());
            ExitCode::FAILURE
        }
    }
}

/// Install the global `tracing` subscriber, honouring `RUST_LOG`
fn init_tracing(verbose: bool) {
    let fallback = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));
    tracing_subscriber::fmt().with_env_filter(filter).with_target(false).init();
}

/// Build the catalog, run the queries and walk one copy through its lifecycle
fn run(args: &Args) -> Result<(), Box<dyn Error>> {
    let config = match &args.config {
        Some(path) => CatalogConfig::load(path)?,
        None => sample_config()?,
    };

    let mut catalog: Box<dyn Library> = if args.small {
        Box::new(SmallCatalog::from_config(&config))
    } else {
        Box::new(Catalog::from_config(&config))
    };

    println!("{}", "Library Catalog Demonstration".green().bold());
    println!("=====================================");
    println!("{} books in the collection\n", catalog.books().len());

    let queries = if args.queries.is_empty() {
        config.inventory.iter().take(2).map(|entry| entry.book.title().to_string()).collect()
    } else {
        args.queries.clone()
    };
    for query in &queries {
        print_results(catalog.as_ref(), query);
    }

    if let Some(entry) = config.inventory.first() {
        lifecycle_demo(catalog.as_mut(), &entry.book)?;
    }

    println!("\n{}", "Transition history:".yellow().bold());
    println!("{}", catalog.journal().history_json()?);
    Ok(())
}

/// Print the ranked results of one query
fn print_results(catalog: &dyn Library, query: &str) {
    println!("{} {query:?}", "Query".cyan().bold());
    let results = catalog.find(query);
    if results.is_empty() {
        println!("  (no matches)");
    }
    for (rank, book) in results.iter().enumerate() {
        let available = catalog.available_copies(book).len();
        println!("  {}. {book} [{available} available]", rank.saturating_add(1));
    }
}

/// Check a copy out and in, show a refused transition, then lose every copy
fn lifecycle_demo(catalog: &mut dyn Library, book: &Book) -> Result<(), Box<dyn Error>> {
    println!("\n{} {book}", "Lifecycle of".yellow().bold());

    let copy = catalog.buy(book);
    catalog.checkout(&copy)?;
    println!("  checked out {}: available = {}", copy.id(), catalog.is_available(&copy));

    if let Err(e) = catalog.checkout(&copy) {
        println!("  {} {e}", "refused:".red());
    }

    catalog.checkin(&copy)?;
    println!("  checked in {}: available = {}", copy.id(), catalog.is_available(&copy));

    for lost in catalog.all_copies(book) {
        catalog.lose(&lost)?;
    }
    println!(
        "  all copies lost: {} copies left, {} results for the title",
        catalog.all_copies(book).len(),
        catalog.find(book.title()).len()
    );
    Ok(())
}

/// Built-in inventory used when no configuration file is given
fn sample_config() -> Result<CatalogConfig, Box<dyn Error>> {
    let entries = [
        ("The Rust Programming Language", vec!["Steve Klabnik", "Carol Nichols"], 2019, 2),
        ("The Rust Programming Language", vec!["Steve Klabnik", "Carol Nichols"], 2023, 1),
        ("Programming Rust", vec!["Jim Blandy", "Jason Orendorff"], 2021, 3),
        ("Holes", vec!["Louis Sachar"], 1998, 1),
    ];

    let mut inventory = Vec::with_capacity(entries.len());
    for (title, authors, year, copies) in entries {
        inventory.push(InventoryEntry { book: Book::new(title, authors, year)?, copies });
    }
    Ok(CatalogConfig { inventory, ..CatalogConfig::default() })
}
