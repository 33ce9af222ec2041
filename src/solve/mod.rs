use std::fmt::{self, Display};

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::{tour::Solution, DistanceMatrix, Error, Result};

/// Exhaustive search over every tour that starts at city 0
pub mod brute_force;
/// Exact [Held–Karp](https://en.wikipedia.org/wiki/Held%E2%80%93Karp_algorithm) dynamic program
pub mod held_karp;
/// Greedy [nearest neighbor](https://en.wikipedia.org/wiki/Nearest_neighbour_algorithm) construction
pub mod nearest_neighbor;
/// Lexicographic permutations with a fixed starting city
pub mod permutation;
/// [2-opt](https://en.wikipedia.org/wiki/2-opt) local search
pub mod two_opt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Algorithm {
    /// Exact, O(n! · n)
    BruteForce,
    /// Exact, O(2^n · n^2) time and O(2^n · n) memory
    HeldKarp,
    /// Greedy, O(n^2)
    NearestNeighbor,
    /// Nearest neighbor followed by 2-opt local search
    TwoOpt,
}

impl Algorithm {
    pub const ALL: [Self; 4] = [
        Self::NearestNeighbor,
        Self::TwoOpt,
        Self::BruteForce,
        Self::HeldKarp,
    ];

    /// Whether the algorithm always finds an optimal tour.
    pub fn is_exact(&self) -> bool {
        matches!(self, Self::BruteForce | Self::HeldKarp)
    }
}

impl Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::BruteForce => "brute force",
            Self::HeldKarp => "Held-Karp",
            Self::NearestNeighbor => "nearest neighbor",
            Self::TwoOpt => "2-opt",
        };
        f.write_str(name)
    }
}

/// Largest number of cities each exact algorithm is allowed to run on.
///
/// Heuristics are never limited.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Limits {
    pub brute_force: usize,
    /// 20 cities already needs roughly 2×10^7 table cells.
    pub held_karp: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            brute_force: 10,
            held_karp: 20,
        }
    }
}

impl Limits {
    pub fn for_algorithm(&self, algorithm: Algorithm) -> Option<usize> {
        match algorithm {
            Algorithm::BruteForce => Some(self.brute_force),
            Algorithm::HeldKarp => Some(self.held_karp),
            Algorithm::NearestNeighbor | Algorithm::TwoOpt => None,
        }
    }
}

/// Run `algorithm` on `matrix`, refusing matrices larger than its limit.
///
/// Held-Karp is also refused past [held_karp::max_cities], whatever `limits` says.
/// A single city costs 0 for every algorithm, whatever its diagonal entry.
pub fn solve(matrix: &DistanceMatrix, algorithm: Algorithm, limits: &Limits) -> Result<Solution> {
    let cities = matrix.size();
    let limit = match algorithm {
        Algorithm::HeldKarp => Some(limits.held_karp.min(held_karp::max_cities())),
        _ => limits.for_algorithm(algorithm),
    };
    if let Some(limit) = limit {
        if cities > limit {
            return Err(Error::TooLarge {
                algorithm,
                cities,
                limit,
            });
        }
    }

    info!("Solving {} cities with {}", cities, algorithm);
    let solution = match algorithm {
        Algorithm::BruteForce => brute_force::solve(matrix),
        Algorithm::HeldKarp => held_karp::solve(matrix),
        Algorithm::NearestNeighbor => {
            heuristic_solution(matrix, algorithm, nearest_neighbor::nearest_neighbor(matrix))?
        }
        Algorithm::TwoOpt => {
            let tour = two_opt::two_opt(matrix, &nearest_neighbor::nearest_neighbor(matrix))?;
            heuristic_solution(matrix, algorithm, tour)?
        }
    };
    Ok(solution)
}

fn heuristic_solution(
    matrix: &DistanceMatrix,
    algorithm: Algorithm,
    tour: Vec<usize>,
) -> Result<Solution> {
    // Same convention as the exact solvers: no edge is travelled
    let cost = if matrix.size() == 1 {
        0
    } else {
        crate::tour::evaluate(matrix, &tour)?
    };
    Ok(Solution {
        algorithm,
        tour,
        cost,
    })
}
