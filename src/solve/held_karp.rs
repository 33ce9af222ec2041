//! Held–Karp dynamic program over (visited set, last city) states.
//!
//! <https://en.wikipedia.org/wiki/Held%E2%80%93Karp_algorithm>
//!
//! The table is dense: `2^n · n` cells, O(2^n · n^2) time. Memory is the binding limit,
//! around 20 cities already needs on the order of 2×10^7 cells. Nothing here checks the
//! size of the matrix; use [table_cells] or [crate::solve::solve] to gate on it.

use tracing::{debug, info};

use super::Algorithm;
use crate::{matrix::Cost, tour::Solution, DistanceMatrix};

/// Marks a state no path has reached yet. Distinct from a real zero-cost path.
const UNSET: Cost = Cost::MAX;

/// Number of cells in the table for `cities` cities, or [None] if it does not fit in a [usize].
pub fn table_cells(cities: usize) -> Option<usize> {
    let states = 1usize.checked_shl(u32::try_from(cities).ok()?)?;
    states.checked_mul(cities)
}

/// Largest city count whose cost table can be addressed at all on this platform.
///
/// Says nothing about available memory, which runs out far earlier.
pub fn max_cities() -> usize {
    let addressable = |cities| {
        table_cells(cities)
            .and_then(|cells| cells.checked_mul(std::mem::size_of::<Cost>()))
            .is_some_and(|bytes| bytes <= isize::MAX as usize)
    };
    (0..usize::BITS as usize)
        .rev()
        .find(|cities| addressable(*cities))
        .unwrap_or(0)
}

/// Exact minimum tour cost. A single city costs 0 by convention.
pub fn held_karp(matrix: &DistanceMatrix) -> Cost {
    let cost = Table::fill(matrix, false)
        .best_last(matrix)
        .map_or(0, |(_, cost)| cost);
    info!("Held-Karp minimum cost: {}", cost);
    cost
}

/// Like [held_karp], but also reconstructs an optimal tour starting at city 0.
///
/// Keeps a parent table next to the cost table, doubling the memory footprint.
pub fn solve(matrix: &DistanceMatrix) -> Solution {
    let table = Table::fill(matrix, true);
    let (tour, cost) = match table.best_last(matrix) {
        Some((last, cost)) => (table.reconstruct(last), cost),
        None => (vec![0], 0),
    };
    info!("Held-Karp minimum cost: {}", cost);
    Solution {
        algorithm: Algorithm::HeldKarp,
        tour,
        cost,
    }
}

/// `costs[mask * n + last]` is the cheapest path from city 0 through exactly the cities in `mask`, ending at `last`.
struct Table {
    cities: usize,
    costs: Vec<Cost>,
    /// City preceding `last` on that cheapest path.
    ///
    /// A table with more than 256 cities could never be allocated, so a byte suffices.
    parents: Option<Vec<u8>>,
}

impl Table {
    fn fill(matrix: &DistanceMatrix, track_parents: bool) -> Self {
        let n = matrix.size();
        let states = 1usize << n;
        debug!("Allocating {} Held-Karp cells", states * n);

        let mut costs = vec![UNSET; states * n];
        let mut parents = track_parents.then(|| vec![0u8; states * n]);
        // Only city 0 visited, standing at city 0
        costs[n] = 0;

        // Adding a city sets a bit, so every subset is finalized before its supersets
        for mask in (1..states).filter(|mask| mask & 1 == 1) {
            for last in 0..n {
                let base = costs[mask * n + last];
                if base == UNSET {
                    continue;
                }
                for next in (0..n).filter(|next| mask & (1 << next) == 0) {
                    let index = (mask | 1 << next) * n + next;
                    let candidate = base + matrix.cost(last, next);
                    if candidate < costs[index] {
                        costs[index] = candidate;
                        if let Some(parents) = parents.as_mut() {
                            parents[index] = last as u8;
                        }
                    }
                }
            }
        }

        Self {
            cities: n,
            costs,
            parents,
        }
    }

    fn full_mask(&self) -> usize {
        (1 << self.cities) - 1
    }

    /// Cheapest city to close the tour from, and the closed tour's cost.
    ///
    /// [None] for a single city, where there is no edge to close.
    fn best_last(&self, matrix: &DistanceMatrix) -> Option<(usize, Cost)> {
        let row = self.full_mask() * self.cities;
        (1..self.cities)
            .filter(|last| self.costs[row + last] != UNSET)
            .map(|last| (last, self.costs[row + last] + matrix.cost(last, 0)))
            .min_by_key(|(_, cost)| *cost)
    }

    fn reconstruct(&self, last: usize) -> Vec<usize> {
        let Some(parents) = self.parents.as_ref() else {
            return vec![];
        };
        let mut tour = Vec::with_capacity(self.cities);
        let mut mask = self.full_mask();
        let mut city = last;
        while city != 0 {
            tour.push(city);
            let parent = parents[mask * self.cities + city] as usize;
            mask &= !(1 << city);
            city = parent;
        }
        tour.push(0);
        tour.reverse();
        tour
    }
}
