//! Density field construction: rasterize the cities, smooth, diffuse on a
//! torus, then smooth again so the gradients read by the flow stage are
//! stable.

mod diffusion;
mod gaussian;
mod grid;

pub use grid::Field;

use crate::{Error, Point, Result, SolverConfig, config};

#[mts_gamma_derive::timer("field")]
pub fn build_field(coords: &[Point], config: &SolverConfig) -> Result<Field> {
    config.validate_field()?;
    validate_points(coords)?;
    warn_if_unstable(config.gamma);

    let size = config.grid;
    log::info!(
        "field: start n={} grid={size} gamma={} iter_gamma={} smooth={} final_smooth={}",
        coords.len(),
        config.gamma,
        config.iter_gamma,
        config.smooth,
        config.final_smooth
    );

    let raster = rasterize(coords, size);
    let smoothed = gaussian::smooth(raster.cells(), size, config.smooth);
    let diffused = diffusion::diffuse(smoothed, size, config.gamma, config.iter_gamma);
    let field = Field::from_cells(
        size,
        gaussian::smooth(&diffused, size, config.final_smooth),
    );

    log::info!(
        "field: complete grid={size} mass={:.3} peak={:.6}",
        field.mass(),
        field.max()
    );
    Ok(field)
}

/// Gaussian smoothing of an existing field, returning a new field.
pub fn apply_gaussian(field: &Field, sigma: f64) -> Result<Field> {
    config::validate_sigma("sigma", sigma)?;
    Ok(Field::from_cells(
        field.size(),
        gaussian::smooth(field.cells(), field.size(), sigma),
    ))
}

/// `steps` iterations of toroidal gamma-diffusion on a copy of `field`.
pub fn apply_laplacian(field: &Field, gamma: f64, steps: usize) -> Result<Field> {
    if !gamma.is_finite() {
        return Err(Error::invalid_config(format!(
            "gamma must be finite, got {gamma}"
        )));
    }
    warn_if_unstable(gamma);
    Ok(Field::from_cells(
        field.size(),
        diffusion::diffuse(field.clone().into_cells(), field.size(), gamma, steps),
    ))
}

/// Accumulates one unit per city at its clamped, truncated cell. Several
/// cities may share a cell.
fn rasterize(coords: &[Point], size: usize) -> Field {
    let mut field = Field::zeros(size);
    let max = (size - 1) as f64;
    let cells = field.cells_mut();
    for p in coords {
        let col = p.x.clamp(0.0, max) as usize;
        let row = p.y.clamp(0.0, max) as usize;
        cells[row * size + col] += 1.0;
    }
    field
}

fn validate_points(coords: &[Point]) -> Result<()> {
    match coords.iter().position(|p| !p.is_finite()) {
        Some(idx) => Err(Error::invalid_input(format!(
            "point {idx} has a non-finite coordinate"
        ))),
        None => Ok(()),
    }
}

fn warn_if_unstable(gamma: f64) {
    if gamma > diffusion::STABLE_GAMMA_LIMIT {
        log::warn!(
            "field: gamma={gamma} exceeds stable limit {} and may oscillate",
            diffusion::STABLE_GAMMA_LIMIT
        );
    }
}
