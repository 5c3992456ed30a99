use clap::Parser;

use grid_search::config::Config;
use grid_search::error::Result;
use grid_search::render::TerminalRenderer;
use grid_search::runner::{compare_all, SearchRunner};
use grid_search::statistics::{print_comparison_results, reference_steps, Statistics};
use grid_search::{Algorithm, Grid};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::time::Duration;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = Config::parse();
    if let Err(e) = run(&config) {
        log::error!("{e}");
        std::process::exit(1);
    }
}

fn run(config: &Config) -> Result<()> {
    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let mut grid = Grid::generate(config.rows, config.cols, config.obstacle_ratio, &mut rng)?;
    let reference = reference_steps(&grid);

    if !config.quiet {
        println!("Grid size: {}x{}", config.rows, config.cols);
        println!("{grid}");
    }

    if config.compare_all() {
        let results = compare_all(&grid, &config.injector(), config.limits())?;
        print_comparison_results(&results, reference);
        return Ok(());
    }

    let algorithm: Algorithm = config.algorithm.parse()?;
    let mut runner = SearchRunner::new(config.injector()).with_limits(config.limits());
    let result = if config.no_visualization || config.quiet {
        runner.run(&mut grid, algorithm)?
    } else {
        let mut renderer = TerminalRenderer::new(Duration::from_millis(config.delay_ms));
        runner.run_observed(&mut grid, algorithm, &mut renderer)?
    };

    println!("\n=== FINAL RESULTS ===");
    println!("{result}");
    if !config.quiet {
        println!("{}", Statistics::new(&result, reference));
    }
    Ok(())
}
