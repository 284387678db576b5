use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PatternError {
    #[error("placeholder opened at index {index} in template '{template}' is never closed")]
    UnclosedPlaceholder { template: String, index: usize },
    #[error("closing '}}' at index {index} in template '{template}' has no matching '{{'")]
    UnopenedPlaceholder { template: String, index: usize },
    #[error("placeholder at index {index} in template '{template}' opens inside another placeholder")]
    NestedPlaceholder { template: String, index: usize },
    #[error("placeholder at index {index} in template '{template}' has an empty name")]
    EmptyPlaceholder { template: String, index: usize },
    #[error("query parameter name at position {position} is empty")]
    EmptyQueryName { position: usize },
    #[error("query parameter '{name}' is declared more than once")]
    DuplicateQueryName { name: String },
    #[error("route pattern '{source_pattern}' failed to compile: {message}")]
    InvalidRegex {
        source_pattern: String,
        message: String,
    },
}

pub type PatternResult<T> = Result<T, PatternError>;
