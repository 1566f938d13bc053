use crate::utils::config::CSV_COLUMNS;

/// Display the CSV column layout
pub fn display_schema() {
    println!("Kart Timing CSV Columns");
    println!();
    for (index, column) in CSV_COLUMNS.iter().enumerate() {
        println!("  {:>2}. {}", index + 1, column);
    }
    println!();
    println!("All fields are quoted; absent values are empty strings.");
}

/// Display version information
pub fn display_version() {
    println!("Kart Timing v{}", env!("CARGO_PKG_VERSION"));
    println!();
    println!("Records go-kart live-timing leaderboard updates as CSV.");
}
