use crate::pattern::PatternError;
use crate::types::{HttpMethod, StatusCode};
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CompilationError {
    #[error("endpoint #{index} ({method} '{path}') has an invalid signature: {source}")]
    Endpoint {
        index: usize,
        method: HttpMethod,
        path: String,
        #[source]
        source: PatternError,
    },
    #[error("endpoint #{index} ({method} '{path}') declares status {status} more than once")]
    DuplicateStatus {
        index: usize,
        method: HttpMethod,
        path: String,
        status: StatusCode,
    },
    #[error("collection-wide rules declare status {status} more than once")]
    DuplicateDefaultStatus { status: StatusCode },
    #[error(
        "endpoint #{index} ({method} '{path}') maps status {status} for a signature already mapped by an earlier endpoint"
    )]
    ConflictingEndpoint {
        index: usize,
        method: HttpMethod,
        path: String,
        status: StatusCode,
    },
}

pub type CompileResult<T> = Result<T, CompilationError>;
