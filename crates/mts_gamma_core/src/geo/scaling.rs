use crate::{Error, Point, Result};

/// Margin kept between the scaled points and the far edge of the grid.
const GRID_MARGIN: f64 = 4.0;

/// Maps raw coordinates into `[0, grid - 4]` on both axes so they rasterize
/// inside the density field. Each axis is shifted to start at zero and divided
/// by its own span; a zero span is treated as 1.
pub fn scale_to_grid(coords: &[Point], grid: usize) -> Result<Vec<Point>> {
    if coords.is_empty() {
        return Err(Error::invalid_input("no points to scale"));
    }
    if let Some(idx) = coords.iter().position(|p| !p.is_finite()) {
        return Err(Error::invalid_input(format!(
            "point {idx} has a non-finite coordinate"
        )));
    }
    let extent = grid as f64 - GRID_MARGIN;
    if extent <= 0.0 {
        return Err(Error::invalid_config(format!(
            "grid must be > {GRID_MARGIN} to scale points, got {grid}"
        )));
    }

    let (mut min_x, mut min_y) = (f64::INFINITY, f64::INFINITY);
    let (mut max_x, mut max_y) = (f64::NEG_INFINITY, f64::NEG_INFINITY);
    for p in coords {
        min_x = min_x.min(p.x);
        min_y = min_y.min(p.y);
        max_x = max_x.max(p.x);
        max_y = max_y.max(p.y);
    }
    let span_x = nonzero_span(max_x - min_x);
    let span_y = nonzero_span(max_y - min_y);

    log::debug!(
        "scaling: n={} grid={grid} span_x={span_x:.3} span_y={span_y:.3}",
        coords.len()
    );

    Ok(coords
        .iter()
        .map(|p| {
            Point::new(
                (p.x - min_x) / span_x * extent,
                (p.y - min_y) / span_y * extent,
            )
        })
        .collect())
}

fn nonzero_span(span: f64) -> f64 {
    if span == 0.0 { 1.0 } else { span }
}
