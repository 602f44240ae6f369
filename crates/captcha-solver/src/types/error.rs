//! Error types for the resolver layer.

use captcha_grid::GridError;

use crate::resolvers::ResolverKind;

/// All errors that can occur while resolving a captcha.
#[derive(thiserror::Error, Debug)]
pub enum SolverError {
    #[error("Grid error: {0}")]
    Grid(#[from] GridError),

    #[error("Resolver {0} requires a query")]
    MissingQuery(ResolverKind),

    #[error("Resolver not registered: {0}")]
    ResolverNotRegistered(ResolverKind),

    #[error("Resolver {kind} needs a {backend} backend, none configured")]
    BackendUnavailable {
        kind: ResolverKind,
        backend: &'static str,
    },

    #[error("Backend error: {0}")]
    Backend(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("All {attempts} resolvers failed, last error: {last}")]
    Exhausted {
        attempts: usize,
        last: Box<SolverError>,
    },
}

impl SolverError {
    /// Whether trying the next resolver in a fallback chain can help.
    ///
    /// Caller mistakes (a missing query, bad configuration) fail the same way
    /// on every resolver and stop the chain.
    pub fn is_retryable(&self) -> bool {
        !matches!(
            self,
            SolverError::MissingQuery(_) | SolverError::Config(_) | SolverError::Exhausted { .. }
        )
    }
}

pub type SolverResult<T> = Result<T, SolverError>;
