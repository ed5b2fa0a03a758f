//! Basingen CLI - synthetic drainage basin generator.
//!
//! Carves a random maze over a grid and derives a river network from it,
//! printing the maze, per-cell attributes and basin statistics.

use clap::{Parser, Subcommand};
use std::time::Instant;
use tracing_subscriber::EnvFilter;

use basingen::basin::{BasinConfig, BasinModel, GeoCell, SlopeLaw};
use basingen::geometry::Cell;

/// Synthetic drainage basin generator.
#[derive(Parser)]
#[command(name = "basingen")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Log debug output from the generator (overridden by RUST_LOG).
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a basin and print it.
    Generate {
        /// Grid rows.
        #[arg(long, default_value = "16")]
        rows: usize,

        /// Grid columns.
        #[arg(long, default_value = "16")]
        cols: usize,

        /// Row of the outlet cell.
        #[arg(long, default_value = "0")]
        seed_row: usize,

        /// Column of the outlet cell.
        #[arg(long, default_value = "0")]
        seed_col: usize,

        /// Random seed for reproducible generation.
        #[arg(short, long)]
        seed: Option<u64>,

        /// Slope law numerator.
        #[arg(long, default_value = "1.0")]
        qnumer: f32,

        /// Slope law exponent.
        #[arg(long, default_value = "0.1")]
        qexpon: f32,

        /// Slope law area offset.
        #[arg(long, default_value = "2.0")]
        qintcp: f32,

        /// Slope multiplier (defaults to 4 / max(rows, cols)).
        #[arg(long)]
        elevation_scale: Option<f32>,

        /// Print the maze.
        #[arg(long)]
        maze: bool,

        /// Print the per-cell attribute table.
        #[arg(long)]
        cells: bool,
    },

    /// Display information about a basin configuration.
    Info {
        /// Grid rows.
        #[arg(long, default_value = "16")]
        rows: usize,

        /// Grid columns.
        #[arg(long, default_value = "16")]
        cols: usize,
    },
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Generate {
            rows,
            cols,
            seed_row,
            seed_col,
            seed,
            qnumer,
            qexpon,
            qintcp,
            elevation_scale,
            maze,
            cells,
        } => {
            let seed = seed.unwrap_or_else(|| {
                use std::time::{SystemTime, UNIX_EPOCH};
                SystemTime::now()
                    .duration_since(UNIX_EPOCH)
                    .map_or(0, |d| d.as_nanos() as u64)
            });
            let config = BasinConfig {
                rows,
                cols,
                seed_row,
                seed_col,
                rng_seed: seed,
                slope_law: SlopeLaw { qnumer, qexpon, qintcp },
                elevation_scale: elevation_scale.unwrap_or(4.0 / rows.max(cols).max(1) as f32),
            };
            run_generate(config, maze, cells);
        }
        Commands::Info { rows, cols } => {
            run_info(rows, cols);
        }
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "basingen=debug" } else { "basingen=warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run_generate(config: BasinConfig, show_maze: bool, show_cells: bool) {
    println!("Basingen - Synthetic Drainage Basin Generator");
    println!("=============================================");
    println!("Grid: {}x{}", config.rows, config.cols);
    println!("Outlet: {}", Cell::new(config.seed_row, config.seed_col));
    println!("Seed: {}", config.rng_seed);
    println!(
        "Slope law: {} / (area + {})^{} x {:.4}",
        config.slope_law.qnumer, config.slope_law.qintcp, config.slope_law.qexpon, config.elevation_scale
    );

    let start = Instant::now();

    let mut model = BasinModel::new(config).unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    });

    println!("\nRunning generation...");
    model
        .run_with_callbacks(
            |name, i, total| {
                println!("  [{}/{}] Starting: {}", i + 1, total, name);
            },
            |name, i, total| {
                println!("  [{}/{}] Completed: {}", i + 1, total, name);
            },
        )
        .unwrap_or_else(|e| {
            eprintln!("Error during generation: {}", e);
            std::process::exit(1);
        });

    println!("Generation completed in {:.2?}", start.elapsed());

    if show_maze {
        println!("\nMaze:");
        print!("{}", model.grid());
    }

    if show_cells {
        println!();
        print_cell_table(&model);
    }

    if let Some(summary) = model.summary() {
        println!("\nSummary:");
        println!("{}", summary);
    }
    println!("\nDone!");
}

fn print_cell_table(model: &BasinModel) {
    println!(
        "{:>10} {:>5} {:>6} {:>5} {:>7} {:>8} {:>8}",
        "cell", "order", "area", "exit", "len", "slope", "elev"
    );
    for cell in model.grid().cells() {
        let Some(geo) = model.cell(cell) else { continue };
        println!("{:>10} {}", cell.to_string(), format_geo(geo));
    }
}

fn format_geo(geo: &GeoCell) -> String {
    let order = geo.order.map_or_else(|| "-".to_string(), |o| o.to_string());
    let exit = geo.exit.map_or("-", |d| d.short_name());
    let len = geo.chan_len.map_or_else(|| "-".to_string(), |l| l.to_string());
    format!(
        "{:>5} {:>6} {:>5} {:>7} {:>8.3} {:>8.3}",
        order, geo.area, exit, len, geo.chan_slope, geo.chan_elev
    )
}

fn run_info(rows: usize, cols: usize) {
    let cells = (rows as u64) * (cols as u64);
    let edges = cells.saturating_sub(1);

    let bytes_grid = cells; // u8 per cell
    let bytes_attrs = cells * std::mem::size_of::<GeoCell>() as u64;
    // Worst case: every cell on the frontier or path at once.
    let bytes_stacks = cells * std::mem::size_of::<Cell>() as u64 * 2;

    println!("Basingen - Basin Configuration Info");
    println!("===================================");
    println!();
    println!("Grid: {}x{}", rows, cols);
    println!("  Cells:       {:>12}", cells);
    println!("  Open edges:  {:>12}", edges);
    if cells == 0 || cells > u32::MAX as u64 {
        println!("  (invalid: cell count must be between 1 and {})", u32::MAX);
    }
    println!();
    println!("Memory usage (in-memory):");
    println!("  Grid:            {:>12} bytes ({:.2} MB)", bytes_grid, bytes_grid as f64 / 1024.0 / 1024.0);
    println!("  Attributes:      {:>12} bytes ({:.2} MB)", bytes_attrs, bytes_attrs as f64 / 1024.0 / 1024.0);
    println!("  Traversal peak:  {:>12} bytes ({:.2} MB)", bytes_stacks, bytes_stacks as f64 / 1024.0 / 1024.0);
    let total = bytes_grid + bytes_attrs + bytes_stacks;
    println!("  Total:           {:>12} bytes ({:.2} MB)", total, total as f64 / 1024.0 / 1024.0);
    println!();
    println!("Default elevation scale: {:.4}", 4.0 / rows.max(cols).max(1) as f32);
}
