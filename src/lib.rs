//! Exact and heuristic solvers for the [Traveling Salesman Problem](https://en.wikipedia.org/wiki/Travelling_salesman_problem)
//! on a complete, directed graph given as a distance matrix.
//!
//! The exact solvers ([exact_search], [held_karp]) grow exponentially and do not limit themselves;
//! gate them by city count, or go through [solve::solve] with [Limits].

mod error;
pub mod matrix;
pub mod solve;
pub mod tour;

pub use error::{Error, Result};
pub use matrix::{Cost, DistanceMatrix};
pub use solve::{
    brute_force::exact_search, held_karp::held_karp, nearest_neighbor::nearest_neighbor,
    two_opt::two_opt, Algorithm, Limits,
};
pub use tour::{evaluate, Solution};
