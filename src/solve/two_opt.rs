//! Intra-tour 2-opt local search.
//!
//! Reversing positions `i..=j` of the tour replaces the edges `(t[i-1], t[i])` and `(t[j], t[j+1])`
//! with `(t[i-1], t[j])` and `(t[i], t[j+1])`. Costs are directed, so the reversed segment is also
//! travelled the other way around and its cost changes too. Prefix sums of the forward and backward
//! costs along the tour make each candidate O(1) to price; they are rebuilt in O(n) after every
//! accepted move.
//!
//! <https://en.wikipedia.org/wiki/2-opt>

use tracing::{info, trace};

use crate::{
    matrix::Cost,
    tour::{closed_cost, validate},
    DistanceMatrix, Result,
};

/// Improve `initial_tour` until no single segment reversal makes it strictly cheaper.
///
/// Position 0 is never moved. Pairs `1 <= i < j < n` are scanned with `i` ascending, then `j`,
/// and the first improving reversal is applied before the scan starts over.
/// The result is a 2-opt local optimum, never more expensive than `initial_tour`.
///
/// Fails if `initial_tour` is not a permutation of the matrix's cities.
pub fn two_opt(matrix: &DistanceMatrix, initial_tour: &[usize]) -> Result<Vec<usize>> {
    validate(matrix, initial_tour)?;
    let n = initial_tour.len();
    let mut tour = initial_tour.to_vec();
    let initial_cost = closed_cost(matrix, &tour);

    let mut segments = SegmentCosts::new(matrix, &tour);
    let mut passes = 0usize;
    let mut moves = 0usize;
    'pass: loop {
        passes += 1;
        for i in 1..n {
            for j in i + 1..n {
                if segments.improves(matrix, &tour, i, j) {
                    tour[i..=j].reverse();
                    segments = SegmentCosts::new(matrix, &tour);
                    moves += 1;
                    trace!("Reversed positions {}..={} (move {})", i, j, moves);
                    continue 'pass;
                }
            }
        }
        break;
    }

    info!(
        "2-opt converged after {} passes (cost: {} -> {})",
        passes,
        initial_cost,
        closed_cost(matrix, &tour)
    );
    Ok(tour)
}

/// Prefix sums of edge costs along a tour, in both directions.
///
/// `forward[k]` is the cost of travelling `t[0] -> ... -> t[k]`,
/// `backward[k]` the cost of travelling `t[k] -> ... -> t[0]`.
struct SegmentCosts {
    forward: Vec<Cost>,
    backward: Vec<Cost>,
}

impl SegmentCosts {
    fn new(matrix: &DistanceMatrix, tour: &[usize]) -> Self {
        let mut forward = Vec::with_capacity(tour.len());
        let mut backward = Vec::with_capacity(tour.len());
        forward.push(0);
        backward.push(0);
        for (k, edge) in tour.windows(2).enumerate() {
            forward.push(forward[k] + matrix.cost(edge[0], edge[1]));
            backward.push(backward[k] + matrix.cost(edge[1], edge[0]));
        }
        Self { forward, backward }
    }

    /// Whether reversing `tour[i..=j]` strictly shortens the closed tour.
    fn improves(&self, matrix: &DistanceMatrix, tour: &[usize], i: usize, j: usize) -> bool {
        let before = tour[i - 1];
        let after = tour[(j + 1) % tour.len()];

        let current = matrix.cost(before, tour[i])
            + (self.forward[j] - self.forward[i])
            + matrix.cost(tour[j], after);
        let reversed = matrix.cost(before, tour[j])
            + (self.backward[j] - self.backward[i])
            + matrix.cost(tour[i], after);
        reversed < current
    }
}
