use std::fmt::{self, Display};

use serde::Deserialize;

use crate::{Error, Result};

/// Total length of a closed tour.
pub type Cost = u64;

/// A dense n×n matrix of directed edge costs stored in row-major order.
///
/// The matrix need not be symmetric: `cost(i, j)` is the cost of travelling from `i` to `j`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DistanceMatrix {
    costs: Vec<Cost>,
    size: usize,
}

impl DistanceMatrix {
    /// Validate a square grid of non-negative integers.
    ///
    /// Fails if the grid is empty, any row's length differs from the number of rows,
    /// or any entry is negative.
    ///
    /// Also fails if any entry exceeds `Cost::MAX / n`. A closed tour is `n` edges long,
    /// so below that ceiling no tour, partial path or 2-opt candidate can overflow a [Cost].
    pub fn new(grid: Vec<Vec<i64>>) -> Result<Self> {
        let size = grid.len();
        if size == 0 {
            return Err(Error::invalid_matrix("grid has no rows"));
        }
        let ceiling = Cost::MAX / size as Cost;

        let mut costs = Vec::with_capacity(size * size);
        for (i, row) in grid.into_iter().enumerate() {
            if row.len() != size {
                return Err(Error::invalid_matrix(format!(
                    "row {i} has {} entries, expected {size}",
                    row.len()
                )));
            }
            for (j, entry) in row.into_iter().enumerate() {
                let cost = Cost::try_from(entry).map_err(|_| {
                    Error::invalid_matrix(format!("entry ({i}, {j}) is negative: {entry}"))
                })?;
                if cost > ceiling {
                    return Err(Error::invalid_matrix(format!(
                        "entry ({i}, {j}) is {cost}, above the {ceiling} limit for {size} cities"
                    )));
                }
                costs.push(cost);
            }
        }

        Ok(Self { costs, size })
    }

    /// Number of cities.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Cost of the directed edge `from -> to`.
    ///
    /// # Panics
    ///
    /// Panics if either index is out of bounds.
    pub fn cost(&self, from: usize, to: usize) -> Cost {
        self.costs[from * self.size + to]
    }

    pub fn rows(&self) -> impl Iterator<Item = &[Cost]> + '_ {
        self.costs.chunks_exact(self.size)
    }
}

impl TryFrom<Vec<Vec<i64>>> for DistanceMatrix {
    type Error = Error;

    fn try_from(grid: Vec<Vec<i64>>) -> Result<Self> {
        Self::new(grid)
    }
}

/// Accepts either a bare grid or an object with a `matrix` field.
impl<'de> Deserialize<'de> for DistanceMatrix {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Input {
            Grid(Vec<Vec<i64>>),
            Wrapped { matrix: Vec<Vec<i64>> },
        }

        let grid = match Input::deserialize(deserializer)? {
            Input::Grid(grid) | Input::Wrapped { matrix: grid } => grid,
        };
        Self::new(grid).map_err(serde::de::Error::custom)
    }
}

/// Tab separated rows.
impl Display for DistanceMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.rows() {
            for cost in row {
                write!(f, "{cost}\t")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
