use thiserror::Error;

/// Error types for the grid k-means library
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ClusterError {
    /// The number of clusters is invalid (must satisfy `1 <= k <= height * width`)
    #[error("Invalid cluster count: k = {k} for a grid of {cells} cells")]
    InvalidClusterCount { k: usize, cells: usize },

    /// Grid shape does not match the given height and width, or the grid is empty
    #[error("Invalid dimensions: {0}")]
    InvalidDimensions(String),

    /// A grid value can not be represented as a finite centroid value
    #[error("Value at ({row}, {col}) is not representable as a finite centroid value")]
    InvalidValue { row: usize, col: usize },

    /// A cluster ended up without members, while [`crate::EmptyClusterStrategy::Fail`] was configured
    #[error("Cluster {cluster} has no members after assignment pass {iteration}")]
    EmptyClusterDuringRefit { cluster: usize, iteration: usize },

    /// The initialization method produced unusable centroids
    #[error("Invalid initialization: {0}")]
    InvalidInitialization(String),
}
