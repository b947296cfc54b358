use crate::{
    Error, Point, Result, Solution, SolverConfig, build_field, gradient_flow,
    refine::{self, refine_tour},
};

/// Runs field construction, gradient-flow ordering and refinement.
///
/// `None` uses [`SolverConfig::default`]. The configuration and the city count
/// are checked before any stage runs; stage errors are returned unchanged.
#[mts_gamma_derive::timer("solver")]
pub fn solve(coords: &[Point], config: Option<&SolverConfig>) -> Result<Solution> {
    let default_config;
    let config = match config {
        Some(config) => config,
        None => {
            default_config = SolverConfig::default();
            &default_config
        }
    };

    config.validate()?;
    if coords.len() < refine::MIN_REFINE_CITIES {
        return Err(Error::invalid_config(format!(
            "need at least {} cities to build a tour, got {}",
            refine::MIN_REFINE_CITIES,
            coords.len()
        )));
    }

    log::info!("solver: start n={}", coords.len());
    log::debug!("solver: config {config}");

    let field = build_field(coords, config)?;
    let order = gradient_flow(&field, coords, config)?;
    let initial = order.length(coords);
    let solution = refine_tour(&order, coords)?;

    log::info!(
        "solver: complete n={} flow_length={initial:.3} length={:.3}",
        coords.len(),
        solution.length
    );
    Ok(solution)
}
