//! Separable Gaussian smoothing with half-sample symmetric ("reflect")
//! boundaries: `d c b a | a b c d | d c b a`.

/// Kernel half-width in standard deviations.
const TRUNCATE: f64 = 4.0;

/// Normalized weights over `-radius..=radius`, `radius = trunc(4 * sigma + 0.5)`.
pub(crate) fn gaussian_kernel(sigma: f64) -> Vec<f64> {
    let radius = (TRUNCATE * sigma + 0.5) as isize;
    let denom = sigma * sigma;
    let mut weights: Vec<f64> = (-radius..=radius)
        .map(|k| {
            let k = k as f64;
            (-0.5 / denom * k * k).exp()
        })
        .collect();
    let total: f64 = weights.iter().sum();
    for w in &mut weights {
        *w /= total;
    }
    weights
}

#[inline]
fn reflect_index(idx: isize, n: usize) -> usize {
    let n = n as isize;
    let period = 2 * n;
    let m = idx.rem_euclid(period);
    if m < n {
        m as usize
    } else {
        (period - 1 - m) as usize
    }
}

/// Smooths a `size x size` row-major grid along rows then columns.
pub(crate) fn smooth(cells: &[f64], size: usize, sigma: f64) -> Vec<f64> {
    let kernel = gaussian_kernel(sigma);
    let vertical = smooth_vertical(cells, size, &kernel);
    smooth_horizontal(&vertical, size, &kernel)
}

fn smooth_vertical(cells: &[f64], size: usize, kernel: &[f64]) -> Vec<f64> {
    let radius = (kernel.len() / 2) as isize;
    let mut out = vec![0.0; cells.len()];
    for row in 0..size {
        let dst = &mut out[row * size..(row + 1) * size];
        for (k, &w) in kernel.iter().enumerate() {
            let src_row = reflect_index(row as isize + k as isize - radius, size);
            let src = &cells[src_row * size..(src_row + 1) * size];
            for (d, &s) in dst.iter_mut().zip(src) {
                *d += w * s;
            }
        }
    }
    out
}

fn smooth_horizontal(cells: &[f64], size: usize, kernel: &[f64]) -> Vec<f64> {
    let radius = (kernel.len() / 2) as isize;
    let mut out = vec![0.0; cells.len()];
    for row in 0..size {
        let src = &cells[row * size..(row + 1) * size];
        let dst = &mut out[row * size..(row + 1) * size];
        for (col, d) in dst.iter_mut().enumerate() {
            let mut acc = 0.0;
            for (k, &w) in kernel.iter().enumerate() {
                acc += w * src[reflect_index(col as isize + k as isize - radius, size)];
            }
            *d = acc;
        }
    }
    out
}
