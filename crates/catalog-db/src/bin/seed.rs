//! # Seed Data Generator
//!
//! Populates the catalog with fake products for development.
//!
//! ## Usage
//! ```bash
//! # Generate 100 products (default) into DATABASE_URI or ./catalog.db
//! cargo run -p catalog-db --bin seed
//!
//! # Generate custom amount
//! cargo run -p catalog-db --bin seed -- --count 1000
//!
//! # Specify database
//! cargo run -p catalog-db --bin seed -- --db sqlite://./data/catalog.db?mode=rwc
//! ```
//!
//! Products come from `ProductFactory`: a short name from a fixed list,
//! a random price between 0.50 and 2000.00, random availability and category.

use std::collections::BTreeMap;
use std::env;

use catalog_core::{Category, ProductFactory};
use catalog_db::config::DATABASE_URI_VAR;
use catalog_db::{Database, DbConfig};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

const DEFAULT_COUNT: usize = 100;

/// Parsed command line options.
#[derive(Debug, PartialEq, Eq)]
struct SeedArgs {
    count: usize,
    db_uri: Option<String>,
}

/// Parses the arguments after the program name.
///
/// Returns `Ok(None)` when help was requested.
fn parse_args(args: &[String]) -> Result<Option<SeedArgs>, String> {
    let mut parsed = SeedArgs {
        count: DEFAULT_COUNT,
        db_uri: None,
    };

    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--count" | "-c" => {
                let raw = iter.next().ok_or("--count needs a value")?;
                parsed.count = raw
                    .parse()
                    .map_err(|_| format!("--count expects a non-negative number, got {raw:?}"))?;
            }
            "--db" | "-d" => {
                let uri = iter.next().ok_or("--db needs a value")?;
                parsed.db_uri = Some(uri.clone());
            }
            "--help" | "-h" => return Ok(None),
            other => warn!(argument = other, "Ignoring unknown argument"),
        }
    }

    Ok(Some(parsed))
}

fn print_help() {
    println!("Catalog Seed Data Generator");
    println!();
    println!("Usage: seed [OPTIONS]");
    println!();
    println!("Options:");
    println!("  -c, --count <N>    Number of products to generate (default: {DEFAULT_COUNT})");
    println!("  -d, --db <URI>     Database URI (default: $DATABASE_URI or sqlite://catalog.db?mode=rwc)");
    println!("  -h, --help         Show this help message");
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    let args: Vec<String> = env::args().skip(1).collect();
    let Some(SeedArgs { count, db_uri }) = parse_args(&args)? else {
        print_help();
        return Ok(());
    };

    // --db takes the place of DATABASE_URI; everything else still comes from the environment
    let config = DbConfig::from_lookup(|key| match (key, &db_uri) {
        (DATABASE_URI_VAR, Some(uri)) => Some(uri.clone()),
        _ => env::var(key).ok(),
    })?;

    info!(uri = %config.database_uri, count, "Seeding product catalog");

    let db = Database::new(config).await?;
    let repo = db.products();

    let existing = repo.count().await?;
    if existing > 0 {
        warn!(existing, "Database already has products, skipping seed");
        return Ok(());
    }

    let start = std::time::Instant::now();
    let mut generated = 0usize;
    let mut per_category: BTreeMap<String, usize> = BTreeMap::new();

    for mut product in ProductFactory::new().take(count) {
        if let Err(e) = repo.create(&mut product).await {
            warn!(name = %product.name, error = %e, "Failed to insert product");
            continue;
        }

        generated += 1;
        *per_category.entry(product.category.to_string()).or_default() += 1;

        if generated % 500 == 0 {
            info!(generated, "Progress");
        }
    }

    let elapsed = start.elapsed();
    info!(
        generated,
        elapsed_ms = elapsed.as_millis() as u64,
        "Seed complete"
    );

    for category in Category::ALL {
        let n = per_category.get(category.as_str()).copied().unwrap_or(0);
        info!(category = %category, count = n, "Category summary");
    }

    db.close().await;
    Ok(())
}

/// Initializes the tracing subscriber for logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show all debug messages
/// - `RUST_LOG=catalog_db=trace` - Trace-level for the database crate
/// - Default: info level, debug for catalog crates
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,catalog_db=debug,catalog_core=debug,sqlx=warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_defaults() {
        let parsed = parse_args(&[]).unwrap().unwrap();
        assert_eq!(parsed.count, DEFAULT_COUNT);
        assert!(parsed.db_uri.is_none());
    }

    #[test]
    fn test_count_and_db() {
        let parsed = parse_args(&args(&["--count", "25", "-d", "sqlite::memory:"]))
            .unwrap()
            .unwrap();
        assert_eq!(
            parsed,
            SeedArgs {
                count: 25,
                db_uri: Some("sqlite::memory:".to_string()),
            }
        );
    }

    #[test]
    fn test_bad_count_is_an_error() {
        let err = parse_args(&args(&["--count", "abc"])).unwrap_err();
        assert!(err.contains("abc"));

        assert!(parse_args(&args(&["--count", "-5"])).is_err());
        assert!(parse_args(&args(&["--count"])).is_err());
    }

    #[test]
    fn test_help() {
        assert_eq!(parse_args(&args(&["-h"])).unwrap(), None);
    }
}
