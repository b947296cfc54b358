//! Explicit gamma-diffusion on a torus: every step adds
//! `gamma * (up + down + left + right - 4 * cell)` using wrap-around
//! neighbours, then clamps negative cells to zero.

/// Largest coefficient for which the explicit five-point scheme is stable.
pub(crate) const STABLE_GAMMA_LIMIT: f64 = 0.25;

pub(crate) fn diffuse(cells: Vec<f64>, size: usize, gamma: f64, steps: usize) -> Vec<f64> {
    let mut current = cells;
    if steps == 0 || size == 0 {
        return current;
    }
    let mut next = vec![0.0; current.len()];

    for _ in 0..steps {
        diffusion_step(&current, &mut next, size, gamma);
        std::mem::swap(&mut current, &mut next);
    }
    current
}

fn diffusion_step(src: &[f64], dst: &mut [f64], size: usize, gamma: f64) {
    for row in 0..size {
        let up = if row == 0 { size - 1 } else { row - 1 };
        let down = if row + 1 == size { 0 } else { row + 1 };
        let (up_row, down_row) = (up * size, down * size);
        let base = row * size;

        for col in 0..size {
            let left = if col == 0 { size - 1 } else { col - 1 };
            let right = if col + 1 == size { 0 } else { col + 1 };
            let cell = src[base + col];
            let laplacian = src[up_row + col] + src[down_row + col] + src[base + left]
                + src[base + right]
                - 4.0 * cell;
            let value = cell + gamma * laplacian;
            dst[base + col] = if value < 0.0 { 0.0 } else { value };
        }
    }
}
