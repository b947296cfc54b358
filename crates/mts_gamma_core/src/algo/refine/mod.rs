//! Local-search refinement: pairwise reversal, then triple-edge, then
//! pairwise reversal again, each run to its own fixed point.

mod pairwise;
mod triple;

use pairwise::pairwise_reversal;
use triple::triple_edge;

use crate::{Error, Point, Result, Tour, geometry};

/// Fewest cities accepted for refinement.
pub const MIN_REFINE_CITIES: usize = 4;

/// Sweep and move counts for one local-search pass.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub(crate) struct PassStats {
    pub(crate) sweeps: usize,
    pub(crate) moves: usize,
}

/// A refined tour and its length over the stored entries.
#[derive(Clone, Debug, PartialEq)]
pub struct Solution {
    pub tour: Tour,
    pub length: f64,
}

impl Solution {
    /// Percentage by which this tour is shorter than `baseline_length`.
    pub fn improvement_pct(&self, baseline_length: f64) -> f64 {
        (baseline_length - self.length) / baseline_length * 100.0
    }
}

#[mts_gamma_derive::timer("refine")]
pub fn refine_tour(tour: &Tour, coords: &[Point]) -> Result<Solution> {
    if coords.len() < MIN_REFINE_CITIES {
        return Err(Error::invalid_config(format!(
            "refinement needs at least {MIN_REFINE_CITIES} cities, got {}",
            coords.len()
        )));
    }
    tour.validate(coords.len())?;

    let mut route = tour.as_slice().to_vec();
    let initial = geometry::path_length(coords, &route);
    log::info!(
        "refine: start n={} closed={} length={initial:.3}",
        coords.len(),
        tour.is_closed()
    );

    let first = pairwise_reversal(coords, &mut route);
    log::info!(
        "refine.2opt: complete stage=1 sweeps={} moves={}",
        first.sweeps,
        first.moves
    );
    let middle = triple_edge(coords, &mut route);
    log::info!(
        "refine.3opt: complete sweeps={} moves={}",
        middle.sweeps,
        middle.moves
    );
    let last = pairwise_reversal(coords, &mut route);
    log::info!(
        "refine.2opt: complete stage=3 sweeps={} moves={}",
        last.sweeps,
        last.moves
    );

    let length = geometry::path_length(coords, &route);
    log::info!("refine: complete length={length:.3} saved={:.3}", initial - length);

    Ok(Solution {
        tour: Tour::new(route),
        length,
    })
}
