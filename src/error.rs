use thiserror::Error as ThisError;

use crate::solve::Algorithm;

#[derive(Debug, ThisError)]
pub enum Error {
    #[error("invalid matrix: {0}")]
    InvalidMatrix(String),
    #[error("invalid tour: {0}")]
    InvalidTour(String),
    #[error("{algorithm} is limited to {limit} cities, matrix has {cities}")]
    TooLarge {
        algorithm: Algorithm,
        cities: usize,
        limit: usize,
    },
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub fn invalid_matrix(message: impl Into<String>) -> Self {
        Self::InvalidMatrix(message.into())
    }

    pub fn invalid_tour(message: impl Into<String>) -> Self {
        Self::InvalidTour(message.into())
    }
}
