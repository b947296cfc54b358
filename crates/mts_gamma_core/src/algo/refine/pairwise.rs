use crate::{Point, geometry::dist};

use super::PassStats;

/// Segment-reversal local search over an open path.
///
/// For every pair of edges `(r[i-1], r[i])` and `(r[j], r[j+1])` with
/// `1 <= i < j <= n - 2`, reverses `r[i..=j]` when that strictly shortens the
/// path. Moves apply immediately, so later pairs in the same sweep see the
/// updated route. Sweeps repeat until one makes no move. The first and last
/// entries never move.
///
/// `j = i + 1` is included, so adjacent entries can swap places; the
/// classic `j >= i + 2` neighbourhood cannot uncross `[0, 2, 1, 3]`.
pub(crate) fn pairwise_reversal(coords: &[Point], route: &mut [usize]) -> PassStats {
    let n = route.len();
    let mut stats = PassStats::default();
    if n < 4 {
        log::debug!("refine.2opt: skip n={n} reason=insufficient_size");
        return stats;
    }

    loop {
        stats.sweeps += 1;
        let mut sweep_moves = 0usize;

        for i in 1..=n - 3 {
            for j in (i + 1)..=n - 2 {
                let (a, b) = (route[i - 1], route[i]);
                let (c, d) = (route[j], route[j + 1]);

                let current = dist(coords, a, b) + dist(coords, c, d);
                let proposal = dist(coords, a, c) + dist(coords, b, d);
                if proposal < current {
                    route[i..=j].reverse();
                    sweep_moves += 1;
                }
            }
        }

        stats.moves += sweep_moves;
        log::debug!(
            "refine.2opt: sweep={} moves={sweep_moves}",
            stats.sweeps
        );
        if sweep_moves == 0 {
            break;
        }
    }
    stats
}
