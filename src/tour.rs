use bitvec::prelude::*;
use serde::Serialize;

use crate::{matrix::Cost, solve::Algorithm, DistanceMatrix, Error, Result};

/// A tour and its closed length, as produced by one of the solvers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Solution {
    pub algorithm: Algorithm,
    pub tour: Vec<usize>,
    pub cost: Cost,
}

/// Closed tour length: every consecutive edge plus the edge from the last city back to the first.
///
/// Fails if `tour` is not a permutation of all of the matrix's cities.
pub fn evaluate(matrix: &DistanceMatrix, tour: &[usize]) -> Result<Cost> {
    validate(matrix, tour)?;
    Ok(closed_cost(matrix, tour))
}

/// Check that `tour` visits each city of `matrix` exactly once.
pub fn validate(matrix: &DistanceMatrix, tour: &[usize]) -> Result<()> {
    let n = matrix.size();
    if tour.len() != n {
        return Err(Error::invalid_tour(format!(
            "tour has {} cities, expected {n}",
            tour.len()
        )));
    }

    let mut seen = bitvec![u8, Msb0; 0; n];
    for (position, &city) in tour.iter().enumerate() {
        if city >= n {
            return Err(Error::invalid_tour(format!(
                "city {city} at position {position} is out of range"
            )));
        }
        if seen.replace(city, true) {
            return Err(Error::invalid_tour(format!(
                "city {city} is visited more than once"
            )));
        }
    }
    Ok(())
}

/// Closed length of a tour already known to be valid.
pub(crate) fn closed_cost(matrix: &DistanceMatrix, tour: &[usize]) -> Cost {
    match (tour.first(), tour.last()) {
        (Some(&first), Some(&last)) => {
            tour.windows(2)
                .map(|edge| matrix.cost(edge[0], edge[1]))
                .sum::<Cost>()
                + matrix.cost(last, first)
        }
        _ => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, seq::SliceRandom, Rng, SeedableRng};

    fn sample() -> DistanceMatrix {
        DistanceMatrix::new(vec![
            vec![0, 10, 15, 20],
            vec![10, 0, 35, 25],
            vec![15, 35, 0, 30],
            vec![20, 25, 30, 0],
        ])
        .unwrap()
    }

    #[test]
    fn test_evaluate_sample_tour() {
        assert_eq!(evaluate(&sample(), &[0, 1, 3, 2]).unwrap(), 80);
        assert_eq!(evaluate(&sample(), &[0, 2, 1, 3]).unwrap(), 95);
    }

    #[test]
    fn test_single_city_includes_diagonal() {
        let matrix = DistanceMatrix::new(vec![vec![0]]).unwrap();
        assert_eq!(evaluate(&matrix, &[0]).unwrap(), 0);
        let matrix = DistanceMatrix::new(vec![vec![4]]).unwrap();
        assert_eq!(evaluate(&matrix, &[0]).unwrap(), 4);
    }

    #[test]
    fn test_evaluate_is_rotation_invariant() {
        let mut rng = StdRng::seed_from_u64(7);
        for n in 1..=7 {
            let grid = (0..n)
                .map(|_| (0..n).map(|_| rng.gen_range(0..50)).collect())
                .collect();
            let matrix = DistanceMatrix::new(grid).unwrap();
            let mut tour = (0..n).collect::<Vec<_>>();
            tour.shuffle(&mut rng);
            let expected = evaluate(&matrix, &tour).unwrap();
            for _ in 0..n {
                tour.rotate_left(1);
                assert_eq!(evaluate(&matrix, &tour).unwrap(), expected);
            }
        }
    }

    #[test]
    fn test_wrong_length_is_rejected() {
        assert!(matches!(
            evaluate(&sample(), &[0, 1, 2]),
            Err(Error::InvalidTour(_))
        ));
        assert!(matches!(
            evaluate(&sample(), &[0, 1, 2, 3, 0]),
            Err(Error::InvalidTour(_))
        ));
    }

    #[test]
    fn test_duplicate_city_is_rejected() {
        assert!(matches!(
            evaluate(&sample(), &[0, 1, 1, 2]),
            Err(Error::InvalidTour(_))
        ));
    }

    #[test]
    fn test_out_of_range_city_is_rejected() {
        assert!(matches!(
            evaluate(&sample(), &[0, 1, 2, 4]),
            Err(Error::InvalidTour(_))
        ));
    }
}
