use tracing::{debug, info};

use super::{permutation::Permutations, Algorithm};
use crate::{
    matrix::Cost,
    tour::{closed_cost, Solution},
    DistanceMatrix,
};

/// Exact minimum tour cost by evaluating every tour that starts at city 0.
///
/// O(n! · n): keep `n` small, roughly 10 to 12 cities at most.
pub fn exact_search(matrix: &DistanceMatrix) -> Cost {
    solve(matrix).cost
}

/// Like [exact_search], but also returns the first tour in lexicographic order that attains the minimum.
///
/// A single city costs 0 by convention, whatever its diagonal entry.
pub fn solve(matrix: &DistanceMatrix) -> Solution {
    if matrix.size() == 1 {
        return Solution {
            algorithm: Algorithm::BruteForce,
            tour: vec![0],
            cost: 0,
        };
    }

    let mut best: Option<(Vec<usize>, Cost)> = None;
    let mut evaluated = 0usize;

    for tour in Permutations::new(matrix.size()) {
        evaluated += 1;
        let cost = closed_cost(matrix, &tour);
        if best.as_ref().map_or(true, |(_, best_cost)| cost < *best_cost) {
            debug!("New best tour {:?} with cost {}", tour, cost);
            best = Some((tour, cost));
        }
    }

    let (tour, cost) = best.unwrap_or_default();
    info!("Exhaustive search evaluated {} tours (best: {})", evaluated, cost);
    Solution {
        algorithm: Algorithm::BruteForce,
        tour,
        cost,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_sample_matrix() {
        let matrix = DistanceMatrix::new(vec![
            vec![0, 10, 15, 20],
            vec![10, 0, 35, 25],
            vec![15, 35, 0, 30],
            vec![20, 25, 30, 0],
        ])
        .unwrap();
        let solution = solve(&matrix);
        assert_eq!(solution.cost, 80);
        assert_eq!(solution.tour, vec![0, 1, 3, 2]);
        assert_eq!(exact_search(&matrix), 80);
    }

    #[test]
    fn test_single_city() {
        let matrix = DistanceMatrix::new(vec![vec![0]]).unwrap();
        let solution = solve(&matrix);
        assert_eq!(solution.cost, 0);
        assert_eq!(solution.tour, vec![0]);
    }

    #[test]
    fn test_single_city_ignores_diagonal() {
        let matrix = DistanceMatrix::new(vec![vec![5]]).unwrap();
        assert_eq!(exact_search(&matrix), 0);
    }

    #[test]
    fn test_two_cities_are_asymmetric_round_trip() {
        let matrix = DistanceMatrix::new(vec![vec![0, 3], vec![8, 0]]).unwrap();
        assert_eq!(exact_search(&matrix), 11);
    }

    #[test]
    fn test_respects_edge_direction() {
        // Clockwise is cheap, counter-clockwise is expensive
        let matrix = DistanceMatrix::new(vec![
            vec![0, 1, 9, 9],
            vec![9, 0, 1, 9],
            vec![9, 9, 0, 1],
            vec![1, 9, 9, 0],
        ])
        .unwrap();
        let solution = solve(&matrix);
        assert_eq!(solution.cost, 4);
        assert_eq!(solution.tour, vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_ties_keep_first_lexicographic_tour() {
        let matrix =
            DistanceMatrix::new(vec![vec![0, 1, 1], vec![1, 0, 1], vec![1, 1, 0]]).unwrap();
        assert_eq!(solve(&matrix).tour, vec![0, 1, 2]);
    }
}
