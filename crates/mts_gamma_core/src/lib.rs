//! MTS-Gamma tours for the Euclidean TSP.
//! Cities are ranked by where they settle when climbing a smoothed, diffused
//! density field, and the resulting order is refined by local search.

mod algo;
mod config;
mod error;
mod geo;
pub mod input;
pub mod logging;
pub mod options;
mod point;
mod tour;

pub(crate) use algo::refine;
pub(crate) use geo::geometry;

pub use algo::field::{Field, apply_gaussian, apply_laplacian, build_field};
pub use algo::flow::{
    FlowTrace, Gradient, VANISHING_GRADIENT, flow_value, gradient_flow, trace_flow,
};
pub use algo::refine::{MIN_REFINE_CITIES, Solution, refine_tour};
pub use algo::solver::solve;
pub use config::{
    DEFAULT_FINAL_SMOOTH, DEFAULT_FLOW_STEPS, DEFAULT_GAMMA, DEFAULT_GRID, DEFAULT_ITER_GAMMA,
    DEFAULT_SMOOTH, DEFAULT_STEP_SIZE, SolverConfig,
};
pub use error::{Error, Result};
pub use geo::scaling::scale_to_grid;
pub use point::Point;
pub use tour::{Tour, TourMetrics};
