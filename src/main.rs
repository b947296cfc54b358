use std::time::Instant;

use log::info;

use mts_gamma_core::{
    DEFAULT_GRID, Result, SolverConfig, input, logging, options::LogOptions, scale_to_grid, solve,
};

/// Edges longer than this multiple of the average edge are reported as spikes.
const SPIKE_FACTOR: f64 = 3.0;

fn main() -> Result<()> {
    let now = Instant::now();
    let log_options = LogOptions::from_env()?;
    logging::init_logger(&log_options)?;

    let raw = input::read_points_from_stdin()?;
    let coords = scale_to_grid(&raw, DEFAULT_GRID)?;

    info!("input: n={}", coords.len());
    info!("logging: {log_options}");
    info!("config: {}", SolverConfig::default());

    let solution = solve(&coords, None)?;
    let tour = solution.tour.closed();

    for city in tour.as_slice() {
        println!("{city}");
    }

    info!(
        "output: n={} length={:.3} time={:.2}s",
        tour.cities().len(),
        solution.length,
        now.elapsed().as_secs_f32()
    );

    tour.metrics(&coords, SPIKE_FACTOR);

    Ok(())
}
