use thiserror::Error;

/// Error produced when a search is misconfigured.
///
/// Failing to find a path is not an error: a run which exhausts
/// its frontier reports that through [crate::SearchOutcome::is_found].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SearchError {
    #[error("No expansion function was provided")]
    MissingExpander,

    #[error("No ordering was provided, and the natural order of the factor was not requested")]
    MissingComparer,

    #[error("A secondary ordering was provided without a primary ordering")]
    ThenByWithoutOrderBy,

    #[error("No search algorithm registered as {0:?}")]
    UnknownAlgorithm(String),

    #[error("Iterative deepening needs at least one iteration")]
    ZeroIterations,
}

/// Result when configuring a search might fail.
pub type Result<T> = std::result::Result<T, SearchError>;
