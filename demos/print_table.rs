//! Print a CSV file as a table
//!
//! Usage: cargo run --example print_table -- path/to/file.csv
//!
//! Set `RUST_LOG=debug` to see multi-line records being assembled.

use csvtable::parse;
use std::error::Error;

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    let path = std::env::args()
        .nth(1)
        .ok_or("usage: print_table <file.csv>")?;

    let table = parse(&path)?;

    println!("{}: {} records x {} fields\n", path, table.len(), table.width());
    for (i, record) in table.iter().enumerate() {
        let shown: Vec<String> = record.iter().map(|f| format!("{:?}", f)).collect();
        println!("   Row {}: {}", i + 1, shown.join(" | "));
    }

    Ok(())
}
