//! Simple ratsnest example: analyse a board snapshot and print the air wires.

use ratsnest::prelude::*;
use std::path::Path;

fn main() -> Result<(), RatsnestError> {
    let path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "tests/fixtures/two_layer_board.json".to_string());
    let path = Path::new(&path);

    if !path.exists() {
        eprintln!("File not found: {}", path.display());
        eprintln!("Usage: cargo run --example simple_ratsnest [path/to/snapshot.json]");
        std::process::exit(1);
    }

    let result = RatsnestCore::analyze_file(path, None, &RatsnestOptions::default())?;

    println!("Ratsnest of board: {}", result.board);
    println!("Total air wires: {}", result.total_air_wires());
    println!();

    for net in result.nets.iter().filter(|n| !n.is_routed()) {
        println!("{} ({} points, {} clusters):", net.net, net.point_count, net.component_count);
        for wire in &net.air_wires {
            println!("  {} -> {}  {:.3} mm", wire.start, wire.end, wire.length_mm());
        }
    }

    if result.has_unrouted() {
        println!("\n{} of {} nets still unrouted.", result.stats.unrouted_nets, result.stats.nets);
    } else {
        println!("\nAll nets routed.");
    }
    Ok(())
}
