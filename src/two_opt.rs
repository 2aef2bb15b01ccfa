//! Crossing-removal local search (2-opt) over the route polyline.
//!
//! A route that crosses itself is never distance-optimal; reversing the
//! sub-sequence between two crossing edges removes that crossing. The scan is
//! greedy: it applies the first crossing found and restarts, rather than
//! searching for the best swap.

use crate::geo::Coord;
use crate::problem::SurveyProblem;

/// Iteration ceiling of the run-to-completion mode.
const FORCE_ITERATION_CEILING: usize = 1000;

/// Counter-clockwise orientation test on the (lon, lat) plane.
fn ccw(a: Coord, b: Coord, c: Coord) -> bool {
    (c.lat - a.lat) * (b.lon - a.lon) > (b.lat - a.lat) * (c.lon - a.lon)
}

/// Proper intersection of segments `ab` and `cd`.
///
/// Segments sharing an endpoint, and degenerate segments with coincident
/// endpoints, never count as crossing.
pub fn segments_intersect(a: Coord, b: Coord, c: Coord, d: Coord) -> bool {
    if a == c || a == d || b == c || b == d {
        return false;
    }
    ccw(a, c, d) != ccw(b, c, d) && ccw(a, b, c) != ccw(a, b, d)
}

/// Removes polyline self-intersections from routes of one survey instance.
pub struct CrossingRemoval<'a> {
    problem: &'a SurveyProblem,
}

impl<'a> CrossingRemoval<'a> {
    pub fn new(problem: &'a SurveyProblem) -> Self {
        CrossingRemoval { problem }
    }

    fn coord(&self, id: usize) -> Coord {
        self.problem.coord(id)
    }

    /// First pair of crossing edges `(i, i+1)` and `(j, j+1)` in scan order.
    fn find_first_crossing(&self, sequence: &[usize]) -> Option<(usize, usize)> {
        let n = sequence.len();
        if n < 4 {
            return None;
        }

        for i in 0..n - 1 {
            let a = self.coord(sequence[i]);
            let b = self.coord(sequence[i + 1]);
            for j in i + 2..n - 1 {
                let c = self.coord(sequence[j]);
                let d = self.coord(sequence[j + 1]);
                if segments_intersect(a, b, c, d) {
                    return Some((i, j));
                }
            }
        }

        None
    }

    /// Whether the route's polyline intersects itself anywhere.
    pub fn has_crossings(&self, sequence: &[usize]) -> bool {
        self.find_first_crossing(sequence).is_some()
    }

    /// Number of crossing edge pairs in the polyline.
    pub fn crossing_count(&self, sequence: &[usize]) -> usize {
        let n = sequence.len();
        let mut count = 0;

        for i in 0..n.saturating_sub(1) {
            let a = self.coord(sequence[i]);
            let b = self.coord(sequence[i + 1]);
            for j in i + 2..n.saturating_sub(1) {
                let c = self.coord(sequence[j]);
                let d = self.coord(sequence[j + 1]);
                if segments_intersect(a, b, c, d) {
                    count += 1;
                }
            }
        }

        count
    }

    /// Total great-circle length of the route.
    fn tour_length(&self, sequence: &[usize]) -> f64 {
        sequence
            .windows(2)
            .map(|w| self.problem.get_distance(w[0], w[1]))
            .sum()
    }

    /// Bounded cleanup: remove up to `max_iterations` crossings.
    ///
    /// Returns the input unchanged when it is already crossing-free.
    pub fn run(&self, sequence: &[usize], max_iterations: usize) -> Vec<usize> {
        let mut seq = sequence.to_vec();

        for _ in 0..max_iterations {
            match self.find_first_crossing(&seq) {
                Some((i, j)) => seq[i + 1..=j].reverse(),
                None => break,
            }
        }

        seq
    }

    fn edges_cross(&self, sequence: &[usize], i: usize, j: usize) -> bool {
        segments_intersect(
            self.coord(sequence[i]),
            self.coord(sequence[i + 1]),
            self.coord(sequence[j]),
            self.coord(sequence[j + 1]),
        )
    }

    /// Run until the polyline is crossing-free or the iteration ceiling hits.
    ///
    /// Each pass applies the first crossing swap that shortens the tour and
    /// restarts. When crossings remain but no swap improves, one swap is
    /// forced anyway so degenerate configurations cannot stall the loop.
    pub fn run_to_completion(&self, sequence: &[usize]) -> Vec<usize> {
        let mut seq = sequence.to_vec();

        for _ in 0..FORCE_ITERATION_CEILING {
            let n = seq.len();
            let mut first_crossing = None;
            let mut applied = false;

            'scan: for i in 0..n.saturating_sub(1) {
                for j in i + 2..n.saturating_sub(1) {
                    if !self.edges_cross(&seq, i, j) {
                        continue;
                    }
                    if first_crossing.is_none() {
                        first_crossing = Some((i, j));
                    }

                    let length_before = self.tour_length(&seq);
                    let mut candidate = seq.clone();
                    candidate[i + 1..=j].reverse();

                    if self.tour_length(&candidate) < length_before {
                        seq = candidate;
                        applied = true;
                        break 'scan;
                    }
                }
            }

            if !applied {
                match first_crossing {
                    // Escape branch: force the swap even though it does not
                    // shorten the tour.
                    Some((i, j)) => seq[i + 1..=j].reverse(),
                    None => break,
                }
            }
        }

        seq
    }
}
