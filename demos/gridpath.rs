//! Terminal shortest-path demo.
//!
//! Run: cargo run --bin gridpath -- --wall-density 0.3 --seed 7
//!
//! Prints the grid with visited cells (`o`) and the shortest path (`*`).

use std::io::Write;
use std::path::PathBuf;

use clap::Parser;
use gridpath_core::{Grid, Point, manhattan};
use gridpath_demos::{
    DemoError, Report, load_config, load_layout, parse_point, render, run_in_place,
    run_separate, scatter_walls,
};
use gridpath_paths::SearchOutcome;
use rand::SeedableRng;
use rand::rngs::StdRng;

/// Shortest path between two cells of a wall grid
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// JSON grid config (rows, cols, start, finish)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Text layout file (S start, F finish, # wall, . open); overrides the
    /// other grid options
    #[arg(short, long)]
    layout: Option<PathBuf>,

    #[arg(long)]
    rows: Option<i32>,

    #[arg(long)]
    cols: Option<i32>,

    /// Start cell as ROW,COL
    #[arg(long, value_parser = parse_point)]
    start: Option<Point>,

    /// Finish cell as ROW,COL
    #[arg(long, value_parser = parse_point)]
    finish: Option<Point>,

    /// Chance of each open cell becoming a wall
    #[arg(short, long, default_value_t = 0.0)]
    wall_density: f64,

    /// Seed for wall placement
    #[arg(short, long, default_value_t = 42)]
    seed: u64,

    /// Keep search state outside the grid instead of in its cells
    #[arg(long)]
    redesigned: bool,
}

fn build_grid(args: &Args) -> Result<Grid, DemoError> {
    let mut grid = match &args.layout {
        Some(path) => load_layout(path)?,
        None => {
            let mut config = match &args.config {
                Some(path) => load_config(path)?,
                None => Default::default(),
            };
            config.rows = args.rows.unwrap_or(config.rows);
            config.cols = args.cols.unwrap_or(config.cols);
            config.start = args.start.unwrap_or(config.start);
            config.finish = args.finish.unwrap_or(config.finish);
            config.build()?
        }
    };

    if args.wall_density > 0.0 {
        let mut rng = StdRng::seed_from_u64(args.seed);
        let added = scatter_walls(&mut grid, args.wall_density, &mut rng);
        log::info!("placed {added} random walls (seed {})", args.seed);
    }
    Ok(grid)
}

fn run(args: Args) -> Result<(), DemoError> {
    let mut grid = build_grid(&args)?;
    log::info!(
        "{}x{} grid, start {}, finish {}, {} walls",
        grid.rows(),
        grid.cols(),
        grid.start(),
        grid.finish(),
        grid.wall_count()
    );

    let report: Report = if args.redesigned {
        run_separate(&grid)
    } else {
        run_in_place(&mut grid)
    };

    print!("{}", render(&grid, &report));
    match report.outcome {
        SearchOutcome::Found { distance } => {
            let direct = manhattan(grid.start(), grid.finish());
            println!(
                "path of {} cells (distance {distance}, manhattan {direct}), {} cells visited",
                report.path.as_ref().map_or(0, Vec::len),
                report.visited.len()
            );
        }
        SearchOutcome::Unreachable => {
            println!(
                "finish is unreachable, {} cells visited",
                report.visited.len()
            );
        }
        SearchOutcome::NotYetRun => {}
    }
    Ok(())
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format(|buf, record| writeln!(buf, "[{}] {}", record.level(), record.args()))
        .init();

    if let Err(e) = run(Args::parse()) {
        log::error!("{e}");
        std::process::exit(1);
    }
}
