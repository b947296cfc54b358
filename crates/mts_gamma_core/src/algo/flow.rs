//! Gradient-flow ordering. Every city is released as a particle at its own
//! position and climbs the density field; cities whose particles settle on
//! denser peaks are visited first.
//!
//! Particles are clamped to `[1, grid - 2]` on both axes. This differs from
//! the wrap-around neighbours used while diffusing the field and is kept as is.

use crate::{Error, Field, Point, Result, SolverConfig, Tour};

/// Gradient magnitude below which a particle is considered settled.
pub const VANISHING_GRADIENT: f64 = 1e-9;

/// Per-axis finite differences of a field: central in the interior,
/// one-sided on the first and last row/column.
#[derive(Clone, Debug)]
pub struct Gradient {
    size: usize,
    dx: Vec<f64>,
    dy: Vec<f64>,
}

impl Gradient {
    pub fn new(field: &Field) -> Self {
        let size = field.size();
        let mut dx = vec![0.0; size * size];
        let mut dy = vec![0.0; size * size];
        if size < 2 {
            return Self { size, dx, dy };
        }
        let last = size - 1;

        for row in 0..size {
            for col in 0..size {
                let idx = row * size + col;
                dy[idx] = match row {
                    0 => field.get(1, col) - field.get(0, col),
                    r if r == last => field.get(last, col) - field.get(last - 1, col),
                    r => (field.get(r + 1, col) - field.get(r - 1, col)) / 2.0,
                };
                dx[idx] = match col {
                    0 => field.get(row, 1) - field.get(row, 0),
                    c if c == last => field.get(row, last) - field.get(row, last - 1),
                    c => (field.get(row, c + 1) - field.get(row, c - 1)) / 2.0,
                };
            }
        }

        Self { size, dx, dy }
    }

    /// `(d/dx, d/dy)` at a cell.
    #[inline]
    pub fn at(&self, row: usize, col: usize) -> (f64, f64) {
        let idx = row * self.size + col;
        (self.dx[idx], self.dy[idx])
    }
}

/// Where a single particle ended up.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FlowTrace {
    /// Field density at the floored final position.
    pub value: f64,
    pub position: Point,
    pub steps: usize,
    /// True when the particle stopped on a vanishing gradient before
    /// exhausting its step budget.
    pub settled: bool,
}

/// Follows the normalized gradient from `start` for at most `steps` moves of
/// `step_size` cells. Depends only on its arguments.
pub fn trace_flow(
    field: &Field,
    gradient: &Gradient,
    start: Point,
    steps: usize,
    step_size: f64,
) -> FlowTrace {
    let lo = 1.0;
    let hi = field.size().saturating_sub(2) as f64;
    let mut x = start.x.clamp(lo, hi);
    let mut y = start.y.clamp(lo, hi);
    let mut taken = 0usize;
    let mut settled = false;

    while taken < steps {
        let (gx, gy) = gradient.at(y as usize, x as usize);
        let mag = gx.hypot(gy);
        if mag < VANISHING_GRADIENT {
            settled = true;
            break;
        }
        x = (x + step_size * gx / mag).clamp(lo, hi);
        y = (y + step_size * gy / mag).clamp(lo, hi);
        taken += 1;
    }

    FlowTrace {
        value: field.get(y as usize, x as usize),
        position: Point::new(x, y),
        steps: taken,
        settled,
    }
}

/// Density reached by the particle released at `start`.
pub fn flow_value(field: &Field, gradient: &Gradient, start: Point, config: &SolverConfig) -> f64 {
    trace_flow(field, gradient, start, config.flow_steps, config.step_size).value
}

/// Orders cities by descending flow value; equal values keep index order.
#[mts_gamma_derive::timer("flow")]
pub fn gradient_flow(field: &Field, coords: &[Point], config: &SolverConfig) -> Result<Tour> {
    config.validate_flow()?;
    if field.size() != config.grid {
        return Err(Error::invalid_config(format!(
            "field is {0}x{0} but config.grid is {1}",
            field.size(),
            config.grid
        )));
    }
    if let Some(idx) = coords.iter().position(|p| !p.is_finite()) {
        return Err(Error::invalid_input(format!(
            "point {idx} has a non-finite coordinate"
        )));
    }

    log::info!(
        "flow: start n={} flow_steps={} step_size={}",
        coords.len(),
        config.flow_steps,
        config.step_size
    );

    let gradient = Gradient::new(field);
    let mut settled = 0usize;
    let values: Vec<f64> = coords
        .iter()
        .enumerate()
        .map(|(idx, &start)| {
            let trace = trace_flow(field, &gradient, start, config.flow_steps, config.step_size);
            if trace.settled {
                settled += 1;
                log::trace!(
                    "flow: settled idx={idx} steps={} value={:.6}",
                    trace.steps,
                    trace.value
                );
            }
            trace.value
        })
        .collect();

    let mut order: Vec<usize> = (0..coords.len()).collect();
    order.sort_by(|&a, &b| values[b].total_cmp(&values[a]));

    log::info!(
        "flow: complete n={} settled={settled} exhausted={}",
        coords.len(),
        coords.len() - settled
    );
    Ok(Tour::new(order))
}

#[cfg(test)]
mod tests {
    use super::{Gradient, gradient_flow, trace_flow};
    use crate::{Error, Field, Point, SolverConfig, build_field};

    fn ramp(size: usize) -> Field {
        // Density grows with x only.
        let cells = (0..size * size).map(|i| (i % size) as f64).collect();
        Field::from_cells(size, cells)
    }

    fn config(grid: usize) -> SolverConfig {
        SolverConfig::default()
            .with_grid(grid)
            .with_iter_gamma(5)
            .with_smooth(1.0)
            .with_flow_steps(60)
            .with_step_size(1.0)
    }

    #[test]
    fn gradient_uses_central_and_one_sided_differences() {
        let cells = vec![
            0.0, 1.0, 4.0, //
            2.0, 3.0, 8.0, //
            6.0, 7.0, 9.0,
        ];
        let gradient = Gradient::new(&Field::from_cells(3, cells));

        assert_eq!(gradient.at(0, 0), (1.0, 2.0));
        assert_eq!(gradient.at(1, 1), (3.0, 3.0));
        assert_eq!(gradient.at(2, 2), (2.0, 1.0));
        assert_eq!(gradient.at(1, 0), (1.0, 3.0));
    }

    #[test]
    fn trace_flow_climbs_ramp_until_clamped() {
        let field = ramp(10);
        let gradient = Gradient::new(&field);
        let trace = trace_flow(&field, &gradient, Point::new(2.0, 4.0), 20, 1.0);

        assert_eq!(trace.position, Point::new(8.0, 4.0));
        assert_eq!(trace.value, 8.0);
        assert_eq!(trace.steps, 20);
        assert!(!trace.settled);
    }

    #[test]
    fn trace_flow_stops_on_flat_field() {
        let field = Field::zeros(8);
        let gradient = Gradient::new(&field);
        let trace = trace_flow(&field, &gradient, Point::new(-3.0, 50.0), 100, 1.0);

        assert!(trace.settled);
        assert_eq!(trace.steps, 0);
        assert_eq!(trace.position, Point::new(1.0, 6.0));
        assert_eq!(trace.value, 0.0);
    }

    #[test]
    fn gradient_flow_orders_by_descending_value_with_index_ties() {
        let field = ramp(10);
        let coords = vec![
            Point::new(3.0, 3.0),
            Point::new(5.0, 3.0),
            Point::new(3.0, 6.0),
            Point::new(7.5, 2.0),
        ];
        let config = SolverConfig::default()
            .with_grid(10)
            .with_flow_steps(1)
            .with_step_size(1.0);

        let order = gradient_flow(&field, &coords, &config).expect("ordering");
        assert_eq!(order.as_slice(), &[3, 1, 0, 2]);
    }

    #[test]
    fn gradient_flow_returns_permutation() {
        let coords: Vec<Point> = (0..25)
            .map(|i| Point::new((i * 7 % 50) as f64 + 5.0, (i * 13 % 50) as f64 + 5.0))
            .collect();
        let config = config(64);
        let field = build_field(&coords, &config).expect("field");

        let order = gradient_flow(&field, &coords, &config).expect("ordering");
        order.validate(coords.len()).expect("permutation");
    }

    #[test]
    fn gradient_flow_handles_single_and_empty_inputs() {
        let config = config(16);
        let field = Field::zeros(16);

        let order = gradient_flow(&field, &[Point::new(4.0, 4.0)], &config).expect("one city");
        assert_eq!(order.as_slice(), &[0]);

        let order = gradient_flow(&field, &[], &config).expect("no cities");
        assert!(order.is_empty());
    }

    #[test]
    fn gradient_flow_rejects_grid_mismatch_and_bad_steps() {
        let field = Field::zeros(16);
        let coords = vec![Point::new(1.0, 1.0)];

        let err = gradient_flow(&field, &coords, &config(32)).expect_err("mismatch");
        assert!(matches!(err, Error::InvalidConfig(_)));

        let err = gradient_flow(&field, &coords, &config(16).with_flow_steps(0))
            .expect_err("zero steps");
        assert!(matches!(err, Error::InvalidConfig(_)));

        let err = gradient_flow(&field, &coords, &config(16).with_step_size(-1.0))
            .expect_err("negative step");
        assert!(matches!(err, Error::InvalidConfig(_)));
    }
}
