use crate::{Error, Point, Result, geometry};

/// Visiting order over city indices.
///
/// Holds either the `N` cities once each, or `N + 1` entries where the last
/// repeats the first to represent the return leg explicitly. Lengths are
/// always measured over the stored entries only.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Tour {
    order: Vec<usize>,
}

impl Tour {
    pub const fn new(order: Vec<usize>) -> Self {
        Self { order }
    }

    pub fn as_slice(&self) -> &[usize] {
        &self.order
    }

    pub fn into_inner(self) -> Vec<usize> {
        self.order
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// True when the last entry repeats the first.
    pub fn is_closed(&self) -> bool {
        self.order.len() >= 2 && self.order.first() == self.order.last()
    }

    /// The distinct cities, without the closing duplicate.
    pub fn cities(&self) -> &[usize] {
        if self.is_closed() {
            &self.order[..self.order.len() - 1]
        } else {
            &self.order
        }
    }

    /// Copy of this tour with the start city appended, unless already closed.
    pub fn closed(&self) -> Self {
        let mut order = self.order.clone();
        if !self.is_closed()
            && let Some(&first) = order.first()
        {
            order.push(first);
        }
        Self { order }
    }

    /// Checks that the cities are exactly `0..n`, each once.
    pub fn validate(&self, n: usize) -> Result<()> {
        let cities = self.cities();
        if cities.len() != n {
            return Err(Error::invalid_input(format!(
                "tour visits {} cities but the coordinate set has {n}",
                cities.len()
            )));
        }
        let mut seen = vec![false; n];
        for (pos, &city) in cities.iter().enumerate() {
            if city >= n {
                return Err(Error::invalid_input(format!(
                    "tour entry {pos} is city {city}, outside 0..{n}"
                )));
            }
            if seen[city] {
                return Err(Error::invalid_input(format!(
                    "tour visits city {city} more than once"
                )));
            }
            seen[city] = true;
        }
        Ok(())
    }

    /// Sum of distances between consecutive stored entries.
    pub fn length(&self, coords: &[Point]) -> f64 {
        geometry::path_length(coords, &self.order)
    }

    /// Edge statistics over the stored entries. Edges longer than
    /// `threshold_factor` times the average edge count as spikes.
    pub fn metrics(&self, coords: &[Point], threshold_factor: f64) -> TourMetrics {
        if self.order.len() < 2 {
            log::info!("metrics: n < 2 so there's nothing to report");
            return TourMetrics::default();
        }

        let distances: Vec<f64> = self
            .order
            .windows(2)
            .map(|pair| geometry::dist(coords, pair[0], pair[1]))
            .collect();
        let total: f64 = distances.iter().sum();
        let average = total / distances.len() as f64;
        let threshold = average * threshold_factor;
        let spikes = distances.iter().filter(|d| **d > threshold).count();
        let longest = distances.iter().copied().fold(0.0_f64, f64::max);

        log::info!(
            "metrics: n={} total={total:.3} longest={longest:.3} avg={average:.3} spike_threshold={threshold:.3} spikes={spikes}",
            self.cities().len()
        );

        TourMetrics {
            total,
            longest,
            average,
            threshold,
            spikes,
        }
    }
}

impl From<Vec<usize>> for Tour {
    fn from(order: Vec<usize>) -> Self {
        Self::new(order)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TourMetrics {
    pub total: f64,
    pub longest: f64,
    pub average: f64,
    pub threshold: f64,
    pub spikes: usize,
}

#[cfg(test)]
mod tests {
    use super::Tour;
    use crate::{Error, Point};

    fn unit_square() -> Vec<Point> {
        vec![
            Point::new(0.0, 0.0),
            Point::new(1.0, 0.0),
            Point::new(1.0, 1.0),
            Point::new(0.0, 1.0),
        ]
    }

    #[test]
    fn closed_appends_start_once() {
        let tour = Tour::new(vec![2, 0, 1]);
        assert!(!tour.is_closed());

        let closed = tour.closed();
        assert_eq!(closed.as_slice(), &[2, 0, 1, 2]);
        assert!(closed.is_closed());
        assert_eq!(closed.closed(), closed);
        assert_eq!(closed.cities(), &[2, 0, 1]);
    }

    #[test]
    fn closed_on_empty_tour_stays_empty() {
        assert!(Tour::default().closed().is_empty());
    }

    #[test]
    fn validate_accepts_open_and_closed_permutations() {
        Tour::new(vec![3, 1, 0, 2]).validate(4).expect("open");
        Tour::new(vec![3, 1, 0, 2, 3]).validate(4).expect("closed");
    }

    #[test]
    fn validate_rejects_missing_duplicate_and_out_of_range_cities() {
        let err = Tour::new(vec![0, 1, 2]).validate(4).expect_err("too short");
        assert!(matches!(err, Error::InvalidInput(_)));

        let err = Tour::new(vec![0, 1, 1, 2]).validate(4).expect_err("duplicate");
        assert!(err.to_string().contains("more than once"));

        let err = Tour::new(vec![0, 1, 2, 7]).validate(4).expect_err("out of range");
        assert!(err.to_string().contains("outside 0..4"));
    }

    #[test]
    fn length_only_counts_stored_edges() {
        let coords = unit_square();
        let open = Tour::new(vec![0, 1, 2, 3]);
        assert!((open.length(&coords) - 3.0).abs() < 1e-12);
        assert!((open.closed().length(&coords) - 4.0).abs() < 1e-12);
    }

    #[test]
    fn metrics_counts_spike_edges() {
        let coords = vec![
            Point::new(0.0, 0.0),
            Point::new(1.0, 0.0),
            Point::new(2.0, 0.0),
            Point::new(3.0, 0.0),
            Point::new(40.0, 0.0),
        ];
        let metrics = Tour::new(vec![0, 1, 2, 3, 4]).metrics(&coords, 2.0);

        assert!((metrics.total - 40.0).abs() < 1e-12);
        assert!((metrics.longest - 37.0).abs() < 1e-12);
        assert!((metrics.average - 10.0).abs() < 1e-12);
        assert_eq!(metrics.spikes, 1);
    }

    #[test]
    fn metrics_of_single_city_is_empty() {
        let metrics = Tour::new(vec![0]).metrics(&unit_square(), 2.0);
        assert_eq!(metrics.total, 0.0);
        assert_eq!(metrics.spikes, 0);
    }
}
