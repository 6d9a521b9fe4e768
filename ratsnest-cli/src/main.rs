//! Ratsnest CLI - air-wire reports for PCB board snapshots from the command line.

use clap::{Parser, Subcommand, ValueEnum};
use ratsnest::{
    BoardAirWiresBuilder, BoardRatsnest, BoardSnapshot, RatsnestCore, RatsnestError,
    RatsnestOptions,
};
use std::path::{Path, PathBuf};
use std::process;

#[derive(Parser)]
#[command(name = "ratsnest")]
#[command(about = "PCB air-wire (ratsnest) report tool", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable debug logging on stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute the air wires of a board snapshot
    Check {
        /// Path to a board snapshot (.json)
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Board name or UUID (defaults to the first board)
        #[arg(short, long)]
        board: Option<String>,

        /// Only analyse these nets (name or UUID, repeatable)
        #[arg(short, long = "net", value_name = "NET")]
        nets: Vec<String>,

        /// Output format
        #[arg(short, long, value_enum, default_value = "human")]
        format: OutputFormat,

        /// Do not treat filled planes as connections
        #[arg(long)]
        no_planes: bool,

        /// Only list nets that still need air wires
        #[arg(long)]
        unrouted_only: bool,

        /// Exit with error code if any air wire remains
        #[arg(long)]
        fail_on_unrouted: bool,
    },

    /// List the boards and nets of a snapshot
    Nets {
        /// Path to a board snapshot (.json)
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Board name or UUID (defaults to the first board)
        #[arg(short, long)]
        board: Option<String>,
    },
}

#[derive(Clone, ValueEnum)]
enum OutputFormat {
    /// Human-readable output
    Human,
    /// JSON output for CI/CD
    Json,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let exit_code = match cli.command {
        Commands::Check {
            file,
            board,
            nets,
            format,
            no_planes,
            unrouted_only,
            fail_on_unrouted,
        } => {
            let options = RatsnestOptions {
                nets,
                include_planes: !no_planes,
                skip_routed: unrouted_only,
            };
            handle_check(&file, board.as_deref(), &options, format, fail_on_unrouted)
        }
        Commands::Nets { file, board } => handle_nets(&file, board.as_deref()),
    };

    process::exit(exit_code);
}

fn init_logging(verbose: bool) {
    let level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

fn handle_check(
    file: &Path,
    board: Option<&str>,
    options: &RatsnestOptions,
    format: OutputFormat,
    fail_on_unrouted: bool,
) -> i32 {
    let result = match RatsnestCore::analyze_file(file, board, options) {
        Ok(result) => result,
        Err(e) => {
            eprintln!("Error: {}", e);
            return 1;
        }
    };

    let printed = match format {
        OutputFormat::Human => {
            output_human(&result);
            Ok(())
        }
        OutputFormat::Json => output_json(&result),
    };
    if let Err(e) = printed {
        eprintln!("Error: {}", e);
        return 1;
    }

    if fail_on_unrouted && result.has_unrouted() {
        return 1;
    }
    0
}

fn output_human(result: &BoardRatsnest) {
    println!("\nBoard: {}", result.board);
    println!("{}", "─".repeat(60));

    for net in &result.nets {
        if net.is_routed() {
            println!("  {}: routed ({} points)", net.net, net.point_count);
            continue;
        }
        println!(
            "  {}: {} air wires ({} points in {} clusters, {:.3} mm)",
            net.net,
            net.air_wires.len(),
            net.point_count,
            net.component_count,
            net.total_length_mm()
        );
        for wire in &net.air_wires {
            println!(
                "    - {} -> {}  {:.3} mm",
                wire.start,
                wire.end,
                wire.length_mm()
            );
        }
    }

    println!("\n  Summary:");
    println!("    Nets:       {}", result.stats.nets);
    println!("    Routed:     {}", result.stats.routed_nets);
    println!("    Unrouted:   {}", result.stats.unrouted_nets);
    println!("    Air wires:  {}", result.stats.air_wires);
    println!("    Length:     {:.3} mm", result.stats.total_length_mm);
    println!("    Longest:    {:.3} mm", result.stats.longest_mm);
}

fn output_json(result: &BoardRatsnest) -> Result<(), RatsnestError> {
    println!("{}", serde_json::to_string_pretty(result)?);
    Ok(())
}

fn handle_nets(file: &Path, board: Option<&str>) -> i32 {
    match list_nets(file, board) {
        Ok(()) => 0,
        Err(e) => {
            eprintln!("Error: {}", e);
            1
        }
    }
}

fn list_nets(file: &Path, board: Option<&str>) -> Result<(), RatsnestError> {
    let snapshot = BoardSnapshot::load(file)?;
    let selected = snapshot.select_board(board)?;

    println!("Boards:\n");
    for candidate in &snapshot.boards {
        let marker = if candidate.uuid == selected.uuid { "*" } else { " " };
        println!("  {} {}  {}", marker, candidate.name, candidate.uuid);
    }

    println!("\nNets on {}:\n", selected.name);
    for net in &snapshot.nets {
        let topology = BoardAirWiresBuilder::new(selected, net).collect_topology();
        println!(
            "  {:<16} {:>4} points  {}",
            net.name,
            topology.points().len(),
            net.uuid
        );
    }
    Ok(())
}
