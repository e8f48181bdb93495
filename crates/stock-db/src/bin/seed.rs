//! # Seed Data Generator
//!
//! Populates the database with sample items for development.
//!
//! ## Usage
//! ```bash
//! # Generate 200 items (default)
//! cargo run -p stock-db --bin seed
//!
//! # Generate custom amount
//! cargo run -p stock-db --bin seed -- --count 500
//!
//! # Specify database path
//! cargo run -p stock-db --bin seed -- --db ./data/stock.db
//! ```
//!
//! Items are registered through the [`Ledger`], so names are validated and
//! deduplicated exactly as they are for API callers. Quantities are spread
//! from 0 to 40 so that roughly a third of the catalog starts below the
//! low-stock threshold.

use std::env;

use stock_core::LOW_STOCK_THRESHOLD;
use stock_db::{Database, DbConfig, Ledger};

/// Item families for realistic test data
const FAMILIES: &[(&str, &[&str])] = &[
    (
        "Fasteners",
        &[
            "Hex Bolt",
            "Carriage Bolt",
            "Wood Screw",
            "Machine Screw",
            "Lag Screw",
            "Wing Nut",
            "Lock Nut",
            "Flat Washer",
            "Spring Washer",
            "Rivet",
        ],
    ),
    (
        "Hardware",
        &[
            "Hinge",
            "Hasp",
            "Shelf Bracket",
            "Corner Brace",
            "Cabinet Pull",
            "Drawer Slide",
            "Door Stop",
            "Hook",
        ],
    ),
    (
        "Electrical",
        &[
            "Wire Nut",
            "Cable Tie",
            "Junction Box",
            "Outlet Cover",
            "Fuse",
            "Terminal Block",
        ],
    ),
    (
        "Plumbing",
        &[
            "Elbow Joint",
            "Tee Fitting",
            "Ball Valve",
            "Hose Clamp",
            "Pipe Cap",
            "Compression Nut",
        ],
    ),
];

/// Size variants appended to every item name
const SIZES: &[&str] = &["M3", "M4", "M5", "M6", "M8", "M10", "1/4in", "3/8in", "1/2in"];

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Parse command line arguments
    let args: Vec<String> = env::args().collect();

    let mut count: usize = 200;
    let mut db_path = String::from("./stock_dev.db");

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--count" | "-c" => {
                if i + 1 < args.len() {
                    count = args[i + 1].parse().unwrap_or(200);
                    i += 1;
                }
            }
            "--db" | "-d" => {
                if i + 1 < args.len() {
                    db_path = args[i + 1].clone();
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("Stockroom Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -c, --count <N>    Number of items to generate (default: 200)");
                println!("  -d, --db <PATH>    Database file path (default: ./stock_dev.db)");
                println!("  -h, --help         Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    println!("🌱 Stockroom Seed Data Generator");
    println!("================================");
    println!("Database: {}", db_path);
    println!("Items:    {}", count);
    println!();

    let db = Database::new(DbConfig::new(&db_path)).await?;
    println!("✓ Connected to database");
    println!("✓ Migrations applied");

    let existing = db.items().count().await?;
    if existing > 0 {
        println!("⚠ Database already has {} items", existing);
        println!("  Skipping seed to avoid duplicates.");
        println!("  Delete the database file to regenerate.");
        return Ok(());
    }

    let ledger = Ledger::new(db);

    println!();
    println!("Generating items...");

    let start = std::time::Instant::now();
    let mut generated = 0;

    for (index, name) in catalog().take(count).enumerate() {
        if let Err(e) = ledger.create_item(&name, starting_quantity(index), None).await {
            eprintln!("Failed to create {}: {}", name, e);
            continue;
        }

        generated += 1;
        if generated % 50 == 0 {
            println!("  Generated {} items...", generated);
        }
    }

    let elapsed = start.elapsed();
    println!();
    println!("✓ Generated {} items in {:?}", generated, elapsed);

    let low = ledger.low_stock_items().await?;
    println!(
        "  {} items start below the low-stock threshold ({})",
        low.len(),
        LOW_STOCK_THRESHOLD
    );

    println!();
    println!("✓ Seed complete!");

    Ok(())
}

/// Every distinct item name, family by family.
fn catalog() -> impl Iterator<Item = String> {
    FAMILIES.iter().flat_map(|(family, names)| {
        names.iter().flat_map(move |name| {
            SIZES
                .iter()
                .map(move |size| format!("{} {} ({})", name, size, family))
        })
    })
}

/// Deterministic spread of quantities in 0..=40.
fn starting_quantity(index: usize) -> i64 {
    ((index * 7) % 41) as i64
}
