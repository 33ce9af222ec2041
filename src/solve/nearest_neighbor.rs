use bitvec::prelude::*;
use tracing::debug;

use crate::DistanceMatrix;

/// Greedy construction: start at city 0 and always move to the cheapest unvisited city.
///
/// Ties go to the lowest index. O(n^2), no backtracking, so the result is usually
/// improvable with [crate::solve::two_opt].
pub fn nearest_neighbor(matrix: &DistanceMatrix) -> Vec<usize> {
    let n = matrix.size();
    let mut visited = bitvec![u8, Msb0; 0; n];
    let mut tour = Vec::with_capacity(n);

    let mut current = 0;
    visited.set(current, true);
    tour.push(current);

    while tour.len() < n {
        let Some(next) = visited
            .iter_zeros()
            .min_by_key(|candidate| matrix.cost(current, *candidate))
        else {
            break;
        };
        visited.set(next, true);
        tour.push(next);
        current = next;
    }

    debug!("Nearest neighbor tour: {:?}", tour);
    tour
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{solve::brute_force::exact_search, tour::evaluate};
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
        let tour = nearest_neighbor(&matrix);
        assert_eq!(tour, vec![0, 1, 3, 2]);
        assert_eq!(evaluate(&matrix, &tour).unwrap(), 80);
    }

    #[test]
    fn test_degenerate_sizes() {
        let matrix = DistanceMatrix::new(vec![vec![0]]).unwrap();
        assert_eq!(nearest_neighbor(&matrix), vec![0]);
        let matrix = DistanceMatrix::new(vec![vec![0, 1], vec![1, 0]]).unwrap();
        assert_eq!(nearest_neighbor(&matrix), vec![0, 1]);
    }

    #[test]
    fn test_ties_go_to_lowest_index() {
        let matrix = DistanceMatrix::new(vec![
            vec![0, 5, 5, 5],
            vec![5, 0, 2, 2],
            vec![5, 2, 0, 2],
            vec![5, 2, 2, 0],
        ])
        .unwrap();
        assert_eq!(nearest_neighbor(&matrix), vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_greedy_is_not_optimal() {
        // The cheap chain 0 -> 1 -> 2 -> 3 ends with the expensive edge 3 -> 0
        let matrix = DistanceMatrix::new(vec![
            vec![0, 1, 5, 5],
            vec![1, 0, 1, 5],
            vec![5, 1, 0, 1],
            vec![100, 5, 1, 0],
        ])
        .unwrap();
        let tour = nearest_neighbor(&matrix);
        assert_eq!(tour, vec![0, 1, 2, 3]);
        assert_eq!(evaluate(&matrix, &tour).unwrap(), 103);
        assert_eq!(exact_search(&matrix), 8);
    }
}
