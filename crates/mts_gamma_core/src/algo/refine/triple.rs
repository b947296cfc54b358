use crate::{Point, geometry::dist};

use super::PassStats;

/// Required margin for a triple-edge move to count as an improvement.
pub(crate) const TRIPLE_EDGE_EPSILON: f64 = 1e-12;

/// The reconnections considered for edges `(a,b)`, `(c,d)`, `(e,f)` at
/// positions `i`, `j`, `k`. Only these three of the seven 3-opt cases.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum Reconnection {
    /// Reverse `r[i+1..=j]`: `(a,c) (b,d) (e,f)`.
    ReverseFirst,
    /// Reverse `r[j+1..=k]`: `(a,b) (c,e) (d,f)`.
    ReverseSecond,
    /// Reverse both segments: `(a,c) (b,e) (d,f)`.
    ReverseBoth,
}

/// Triple-edge local search over an open path.
///
/// Scans every `i < j - 1 < k - 2` with `k <= n - 2`, picks the cheapest of
/// the three reconnections (earlier options win ties) and applies it when it
/// beats the current three edges by more than [`TRIPLE_EDGE_EPSILON`].
/// Sweeps repeat until one makes no move.
pub(crate) fn triple_edge(coords: &[Point], route: &mut [usize]) -> PassStats {
    let n = route.len();
    let mut stats = PassStats::default();
    if n < 6 {
        log::debug!("refine.3opt: skip n={n} reason=no_triples");
        return stats;
    }

    loop {
        stats.sweeps += 1;
        let mut sweep_moves = 0usize;

        for i in 0..=n - 6 {
            for j in (i + 2)..=n - 4 {
                for k in (j + 2)..=n - 2 {
                    if let Some(option) = best_reconnection(coords, route, i, j, k) {
                        apply(route, option, i, j, k);
                        sweep_moves += 1;
                    }
                }
            }
        }

        stats.moves += sweep_moves;
        log::debug!(
            "refine.3opt: sweep={} moves={sweep_moves}",
            stats.sweeps
        );
        if sweep_moves == 0 {
            break;
        }
    }
    stats
}

fn best_reconnection(
    coords: &[Point],
    route: &[usize],
    i: usize,
    j: usize,
    k: usize,
) -> Option<Reconnection> {
    let (a, b) = (route[i], route[i + 1]);
    let (c, d) = (route[j], route[j + 1]);
    let (e, f) = (route[k], route[k + 1]);

    let current = dist(coords, a, b) + dist(coords, c, d) + dist(coords, e, f);
    let candidates = [
        (
            Reconnection::ReverseFirst,
            dist(coords, a, c) + dist(coords, b, d) + dist(coords, e, f),
        ),
        (
            Reconnection::ReverseSecond,
            dist(coords, a, b) + dist(coords, c, e) + dist(coords, d, f),
        ),
        (
            Reconnection::ReverseBoth,
            dist(coords, a, c) + dist(coords, b, e) + dist(coords, d, f),
        ),
    ];

    let (option, cost) = candidates
        .into_iter()
        .reduce(|best, next| if next.1 < best.1 { next } else { best })?;
    (cost < current - TRIPLE_EDGE_EPSILON).then_some(option)
}

fn apply(route: &mut [usize], option: Reconnection, i: usize, j: usize, k: usize) {
    match option {
        Reconnection::ReverseFirst => route[i + 1..=j].reverse(),
        Reconnection::ReverseSecond => route[j + 1..=k].reverse(),
        Reconnection::ReverseBoth => {
            route[i + 1..=j].reverse();
            route[j + 1..=k].reverse();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Reconnection, apply, best_reconnection, triple_edge};
    use crate::{Point, geometry::path_length};

    fn line(n: usize) -> Vec<Point> {
        (0..n).map(|i| Point::new(i as f64, 0.0)).collect()
    }

    #[test]
    fn apply_reverses_the_selected_segments() {
        let base: Vec<usize> = (0..8).collect();

        let mut route = base.clone();
        apply(&mut route, Reconnection::ReverseFirst, 0, 3, 6);
        assert_eq!(route, vec![0, 3, 2, 1, 4, 5, 6, 7]);

        let mut route = base.clone();
        apply(&mut route, Reconnection::ReverseSecond, 0, 3, 6);
        assert_eq!(route, vec![0, 1, 2, 3, 6, 5, 4, 7]);

        let mut route = base;
        apply(&mut route, Reconnection::ReverseBoth, 0, 3, 6);
        assert_eq!(route, vec![0, 3, 2, 1, 6, 5, 4, 7]);
    }

    #[test]
    fn best_reconnection_picks_reverse_both_when_cheapest() {
        // Both blocks are backwards; flipping both restores the sorted line.
        let coords = line(8);
        let route = vec![0, 3, 2, 1, 6, 5, 4, 7];
        assert_eq!(
            best_reconnection(&coords, &route, 0, 3, 6),
            Some(Reconnection::ReverseBoth)
        );
    }

    #[test]
    fn best_reconnection_picks_cheapest_single_reversal() {
        let coords = line(8);
        let route = vec![0, 3, 2, 1, 4, 5, 6, 7];
        assert_eq!(
            best_reconnection(&coords, &route, 0, 3, 6),
            Some(Reconnection::ReverseFirst)
        );
    }

    #[test]
    fn best_reconnection_prefers_earlier_option_on_ties() {
        // Cities 4 and 6 coincide, so reversing the first block alone costs
        // exactly as much as reversing both.
        let coords = vec![
            Point::new(0.0, 0.0),
            Point::new(3.0, 0.0),
            Point::new(2.0, 0.0),
            Point::new(1.0, 0.0),
            Point::new(4.0, 0.0),
            Point::new(5.0, 0.0),
            Point::new(4.0, 0.0),
            Point::new(7.0, 0.0),
        ];
        let route: Vec<usize> = (0..8).collect();
        assert_eq!(
            best_reconnection(&coords, &route, 0, 3, 6),
            Some(Reconnection::ReverseFirst)
        );
    }

    #[test]
    fn best_reconnection_returns_none_on_sorted_line() {
        let coords = line(8);
        let route: Vec<usize> = (0..8).collect();
        assert_eq!(best_reconnection(&coords, &route, 0, 3, 6), None);
    }

    #[test]
    fn triple_edge_restores_sorted_line() {
        let coords = line(8);
        let mut route = vec![0, 3, 2, 1, 6, 5, 4, 7];
        let before = path_length(&coords, &route);

        let stats = triple_edge(&coords, &mut route);
        assert_eq!(route, (0..8).collect::<Vec<_>>());
        assert!(stats.moves >= 1);
        assert!(path_length(&coords, &route) < before);
    }

    #[test]
    fn triple_edge_skips_routes_without_triples() {
        let coords = line(5);
        let mut route = vec![0, 2, 1, 3, 4];
        let stats = triple_edge(&coords, &mut route);
        assert_eq!(route, vec![0, 2, 1, 3, 4]);
        assert_eq!(stats.sweeps, 0);
    }
}
