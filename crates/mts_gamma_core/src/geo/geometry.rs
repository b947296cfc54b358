use crate::Point;

#[inline]
pub(crate) fn dist(coords: &[Point], a: usize, b: usize) -> f64 {
    coords[a].dist(&coords[b])
}

/// Sum of distances between consecutive entries of `order`. No closing edge
/// is added; a closed cycle must repeat its first city at the end.
pub(crate) fn path_length(coords: &[Point], order: &[usize]) -> f64 {
    order
        .windows(2)
        .map(|pair| dist(coords, pair[0], pair[1]))
        .sum()
}
